use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Absence is a normal outcome: lookups and updates of unknown ids return
/// `None`, and deleting an unknown id returns `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product with a fresh id and timestamps
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Every stored product, in insertion order
    async fn get_all(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply the supplied fields to an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, reporting whether a record was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Number of stored products
    async fn count(&self) -> ProductResult<usize>;
}
