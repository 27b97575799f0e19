//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service sitting between the handlers and the repository.
///
/// Inputs arrive already validated. Ids arrive as the raw path segment; one
/// that is not a UUID cannot name a stored product, so it is reported as
/// not found.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every product
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.get_all().await
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name()))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .get_by_id(uuid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .update(uuid, input)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Delete a product, returning the id that was removed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<Uuid> {
        let uuid = parse_id(id)?;
        if self.repository.delete(uuid).await? {
            Ok(uuid)
        } else {
            Err(ProductError::NotFound(id.to_string()))
        }
    }
}

fn parse_id(id: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
