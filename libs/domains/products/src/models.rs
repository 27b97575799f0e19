use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product entity - a catalog record owned by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the repository
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    /// Product name, trimmed, 1-100 characters
    pub name: String,
    /// Optional description, at most 500 characters
    pub description: Option<String>,
    /// Unit price, greater than 0, rounded to 2 decimals
    pub price: f64,
    /// Units in stock
    pub stock: i64,
    /// Free-form category name
    pub category: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
///
/// Only produced by [`crate::validation::validate_create`], so every value
/// already satisfies the field rules.
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct CreateProduct {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) price: f64,
    pub(crate) stock: i64,
    pub(crate) category: String,
}

impl CreateProduct {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Validated input for a partial update.
///
/// `None` leaves the stored field unchanged. For `description`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, ToSchema)]
pub struct UpdateProduct {
    pub(crate) name: Option<String>,
    #[schema(value_type = Option<String>, nullable)]
    pub(crate) description: Option<Option<String>>,
    pub(crate) price: Option<f64>,
    pub(crate) stock: Option<i64>,
    pub(crate) category: Option<String>,
}

impl UpdateProduct {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn stock(&self) -> Option<i64> {
        self.stock
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
    }
}

/// Response body for `GET /products`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductList {
    pub count: usize,
    pub products: Vec<Product>,
}

impl From<Vec<Product>> for ProductList {
    fn from(products: Vec<Product>) -> Self {
        Self {
            count: products.len(),
            products,
        }
    }
}

/// Response body for `DELETE /products/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedProduct {
    pub message: String,
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
}

impl DeletedProduct {
    pub fn new(id: Uuid) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
        }
    }
}

impl Product {
    /// Create a new product from a validated CreateProduct
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in a validated UpdateProduct and refresh `updated_at`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.touch();
    }

    /// Advance `updated_at`, strictly, even if the clock has not moved.
    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }
}

/// Records the catalog starts with when seeding is enabled.
pub fn sample_products() -> Vec<CreateProduct> {
    vec![
        CreateProduct {
            name: "Laptop Dell XPS 13".to_string(),
            description: Some("Laptop ultradelgada de alto rendimiento".to_string()),
            price: 1299.99,
            stock: 15,
            category: "Electronics".to_string(),
        },
        CreateProduct {
            name: "Mouse Logitech MX Master 3".to_string(),
            description: Some("Mouse ergonomico inalambrico".to_string()),
            price: 99.99,
            stock: 50,
            category: "Accessories".to_string(),
        },
        CreateProduct {
            name: "Teclado Mecanico Keychron K2".to_string(),
            description: Some("Teclado mecanico compacto RGB".to_string()),
            price: 89.99,
            stock: 30,
            category: "Accessories".to_string(),
        },
    ]
}
