//! The `Product` record and its field validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A product row. `id` is `None` until the store assigns one on insert.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct Product {
    /// Unique product id (server-assigned).
    #[serde(default)]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "iPhone 12")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Apple iPhone 12")]
    pub description: Option<String>,
    #[schema(example = 159.99)]
    pub price: f64,
    #[schema(example = 10)]
    pub quantity: i32,
    #[schema(example = "Smartphone")]
    pub category: String,
}

impl Product {
    /// Builds a product that has not been persisted yet.
    pub fn new(
        name: impl Into<String>,
        description: Option<&str>,
        price: f64,
        quantity: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.map(str::to_string),
            price,
            quantity,
            category: category.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks every field constraint and reports all violations at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.add("name", "Name cannot be blank");
        } else if self.name.chars().count() > NAME_MAX_CHARS {
            errors.add("name", "Name must be less than 100 characters");
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                errors.add("description", "Description must be less than 500 characters");
            }
        }

        // NaN fails this comparison as well.
        if !(self.price > 0.0 && self.price.is_finite()) {
            errors.add("price", "Price must be positive");
        }

        if self.quantity < 0 {
            errors.add("quantity", "Quantity cannot be negative");
        }

        if self.category.trim().is_empty() {
            errors.add("category", "Category cannot be blank");
        }

        errors.into_result()
    }
}

/// Field name -> message, one entry per rejected field.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}
