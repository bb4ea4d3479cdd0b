use product_catalog::infra::{config, database};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DATABASE_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let create_schema = args.iter().any(|a| a == "--create-schema");

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let max_connections = config::max_connections()?;

    println!("> Preflight:");
    println!("  DATABASE_MAX_CONNECTIONS={}", max_connections);

    let pool = database::connect(&database_url, max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;

    let info = database::probe(&pool).await?;
    println!("  Server: {}", info.server_version);
    println!("  User: {}", info.user);
    println!("  Database: {}", info.database);

    if database::products_table_exists(&pool).await? {
        println!("  Table `products` exists.");
    } else if create_schema {
        println!("  Table `products` missing -> creating...");
        database::ensure_schema(&pool).await?;
        if !database::products_table_exists(&pool).await? {
            return Err(anyhow::anyhow!("Table `products` still missing after create"));
        }
        println!("  Table `products` created.");
    } else {
        return Err(anyhow::anyhow!(
            "Table `products` does not exist. Re-run with --create-schema"
        ));
    }

    pool.close().await;
    println!("> Preflight OK.");
    Ok(())
}
