//! PostgreSQL accessor tests.
//!
//! Each test creates its own schema, points a fresh pool's `search_path` at it, and drops it at
//! the end, so tests can run in parallel against one database. Tests are skipped when
//! `DATABASE_URL` is not set.

use product_catalog::infra::database;
use product_catalog::{PgProductRepository, Product, ProductRepository, ProductService};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::sync::Arc;

struct TestDb {
    admin: PgPool,
    pool: PgPool,
    schema: String,
}

impl TestDb {
    async fn teardown(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
            .execute(&self.admin)
            .await;
        self.admin.close().await;
    }
}

async fn setup(tag: &str) -> Option<TestDb> {
    dotenv::dotenv().ok();
    let Ok(db_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping PostgreSQL test `{}`", tag);
        return None;
    };

    let schema = format!("products_test_{}_{}", std::process::id(), tag);
    let admin = PgPool::connect(&db_url)
        .await
        .expect("Failed to connect to database");
    sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", schema))
        .execute(&admin)
        .await
        .expect("Failed to drop stale schema");
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&admin)
        .await
        .expect("Failed to create schema");

    let opts: PgConnectOptions = db_url.parse().expect("Invalid DATABASE_URL");
    let opts = opts.options([("search_path", schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect_with(opts)
        .await
        .expect("Failed to connect to database");
    database::ensure_schema(&pool)
        .await
        .expect("Failed to create products table");

    Some(TestDb {
        admin,
        pool,
        schema,
    })
}

fn laptop() -> Product {
    Product::new("Laptop", Some("High-end"), 1500.0, 10, "Laptop")
}

fn phone() -> Product {
    Product::new("Phone", Some("Old"), 500.0, 5, "Smartphone")
}

fn tablet() -> Product {
    Product::new("Tablet", None, 300.0, 8, "Tablet")
}

#[tokio::test]
async fn test_save_and_find_product() {
    let Some(db) = setup("save_find").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    let saved = repo.save(laptop()).await.expect("insert");
    let id = saved.id.expect("generated id");

    let found = repo.find_by_id(id).await.expect("find").expect("present");
    assert_eq!(found, laptop().with_id(id));

    let none_desc = repo.save(tablet()).await.expect("insert");
    let found = repo.find_by_id(none_desc.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(found.description, None);

    db.teardown().await;
}

#[tokio::test]
async fn test_update_product_changes_data() {
    let Some(db) = setup("update").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    let mut saved = repo.save(phone()).await.expect("insert");
    let id = saved.id.unwrap();
    saved.name = "Phone 2".to_string();
    saved.description = Some("New".to_string());
    saved.price = 650.5;
    saved.quantity = 0;
    saved.category = "Phones".to_string();

    let updated = repo.save(saved.clone()).await.expect("update");
    assert_eq!(updated, saved);
    assert_eq!(repo.find_by_id(id).await.unwrap(), Some(saved));
    assert_eq!(repo.count_all().await.unwrap(), 1);

    db.teardown().await;
}

#[tokio::test]
async fn test_update_unknown_id_fails_without_insert() {
    let Some(db) = setup("update_unknown").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    let err = repo.save(laptop().with_id(999_999)).await.unwrap_err();
    assert!(err.is_no_rows_affected());
    assert_eq!(repo.count_all().await.unwrap(), 0);

    db.teardown().await;
}

#[tokio::test]
async fn test_delete_product_removes_from_db() {
    let Some(db) = setup("delete").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    let saved = repo.save(tablet()).await.expect("insert");
    let id = saved.id.unwrap();
    repo.delete_by_id(id).await.expect("delete");
    assert_eq!(repo.find_by_id(id).await.unwrap(), None);

    db.teardown().await;
}

#[tokio::test]
async fn test_delete_unknown_id_fails_and_leaves_table_unchanged() {
    let Some(db) = setup("delete_unknown").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    repo.save(laptop()).await.unwrap();
    let before = repo.find_all().await.unwrap();

    let err = repo.delete_by_id(999_999).await.unwrap_err();
    assert!(err.is_no_rows_affected());
    assert_eq!(err.to_string(), "Failed to delete a product");
    assert_eq!(repo.find_all().await.unwrap(), before);

    db.teardown().await;
}

#[tokio::test]
async fn test_pages_reconstruct_full_scan() {
    let Some(db) = setup("pages").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());

    assert!(repo.find_all().await.unwrap().is_empty());
    assert_eq!(repo.count_all().await.unwrap(), 0);

    for i in 0..7 {
        let mut p = phone();
        p.name = format!("Phone {}", i);
        repo.save(p).await.unwrap();
    }

    let mut all_ids: Vec<i64> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|p| p.id)
        .collect();
    all_ids.sort();
    assert_eq!(repo.count_all().await.unwrap(), all_ids.len() as i64);

    let size = 3;
    let mut paged_ids = Vec::new();
    let mut offset = 0;
    loop {
        let page = repo.find_by_page(offset, size).await.unwrap();
        let ids: Vec<i64> = page.iter().filter_map(|p| p.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "page not ordered by id");
        let short = (ids.len() as i64) < size;
        paged_ids.extend(ids);
        if short {
            break;
        }
        offset += size;
    }
    assert_eq!(paged_ids, all_ids);
    assert!(repo.find_by_page(100, size).await.unwrap().is_empty());

    db.teardown().await;
}

#[tokio::test]
async fn test_service_first_page_over_postgres() {
    let Some(db) = setup("service_page").await else { return };
    let repo = Arc::new(PgProductRepository::new(db.pool.clone()));
    let service = ProductService::new(repo);

    let a = service.create(laptop()).await.unwrap();
    service.create(phone()).await.unwrap();

    let page = service.page(0, 1).await.unwrap();
    assert_eq!(page.content, vec![a]);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.total_items, 2);

    db.teardown().await;
}

#[tokio::test]
async fn test_ping_and_closed_pool_errors() {
    let Some(db) = setup("ping").await else { return };
    let repo = PgProductRepository::new(db.pool.clone());
    repo.ping().await.expect("ping");
    assert!(database::products_table_exists(&db.pool).await.unwrap());

    db.pool.close().await;
    let err = repo.count_all().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to count products");
    assert!(!err.is_no_rows_affected());

    db.teardown().await;
}
