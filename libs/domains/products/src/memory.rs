//! In-memory implementation of ProductRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct, sample_products};
use crate::repository::ProductRepository;

/// Products keyed by id, plus the order they were inserted in.
#[derive(Debug, Default)]
struct Catalog {
    products: HashMap<Uuid, Product>,
    order: Vec<Uuid>,
}

impl Catalog {
    fn insert(&mut self, product: Product) {
        self.order.push(product.id);
        self.products.insert(product.id, product);
    }

    fn remove(&mut self, id: Uuid) -> bool {
        if self.products.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|stored| *stored != id);
        true
    }

    fn in_order(&self) -> Vec<Product> {
        self.order
            .iter()
            .filter_map(|id| self.products.get(id))
            .cloned()
            .collect()
    }
}

/// Process-lifetime product store.
///
/// One `RwLock` guards the whole catalog: reads share it, and every mutation
/// holds it exclusively from lookup to write. Cloning shares the same catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryProductRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the three sample products
    pub fn with_sample_data() -> Self {
        let mut catalog = Catalog::default();
        for input in sample_products() {
            catalog.insert(Product::new(input));
        }
        tracing::info!(count = catalog.order.len(), "Seeded sample products");

        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, input), fields(product_name = %input.name()))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        let mut catalog = self.catalog.write().await;
        catalog.insert(product.clone());

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.catalog.read().await.in_order();
        tracing::debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let catalog = self.catalog.read().await;
        Ok(catalog.products.get(&id).cloned())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut catalog = self.catalog.write().await;
        let Some(product) = catalog.products.get_mut(&id) else {
            tracing::warn!(product_id = %id, "Update of unknown product");
            return Ok(None);
        };

        product.apply_update(input);

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(Some(product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let removed = self.catalog.write().await.remove(id);

        if removed {
            tracing::info!(product_id = %id, "Product deleted successfully");
        } else {
            tracing::warn!(product_id = %id, "Delete of unknown product");
        }
        Ok(removed)
    }

    async fn count(&self) -> ProductResult<usize> {
        Ok(self.catalog.read().await.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn widget() -> CreateProduct {
        CreateProduct {
            name: "Widget".to_string(),
            description: None,
            price: 10.0,
            stock: 3,
            category: "Misc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_identical_record() {
        let repo = InMemoryProductRepository::new();

        let created = repo.create(widget()).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repo = InMemoryProductRepository::new();
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let product = repo
                .create(CreateProduct {
                    name: name.to_string(),
                    ..widget()
                })
                .await
                .unwrap();
            ids.push(product.id);
        }

        repo.delete(ids[1]).await.unwrap();

        let listed: Vec<Uuid> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(listed, vec![ids[0], ids[2]]);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent_not_an_error() {
        let repo = InMemoryProductRepository::with_sample_data();
        let before = repo.get_all().await.unwrap();

        let id = Uuid::new_v4();
        assert_eq!(repo.get_by_id(id).await.unwrap(), None);
        assert_eq!(
            repo.update(id, UpdateProduct::default()).await.unwrap(),
            None
        );
        assert!(!repo.delete(id).await.unwrap());

        assert_eq!(repo.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(widget()).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert_eq!(repo.get_by_id(product.id).await.unwrap(), None);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_fields() {
        let repo = InMemoryProductRepository::new();
        let original = repo.create(widget()).await.unwrap();

        let updated = repo
            .update(
                original.id,
                UpdateProduct {
                    stock: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert!(updated.updated_at > original.updated_at);
        assert_eq!(
            updated,
            Product {
                stock: 5,
                updated_at: updated.updated_at,
                ..original
            }
        );
        assert_eq!(repo.get_by_id(updated.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_with_sample_data_seeds_three_products() {
        let repo = InMemoryProductRepository::with_sample_data();
        let products = repo.get_all().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Laptop Dell XPS 13");
        assert_eq!(products[0].category, "Electronics");
    }

    #[tokio::test]
    async fn test_clones_share_the_catalog() {
        let repo = InMemoryProductRepository::new();
        let handle = repo.clone();

        let product = handle.create(widget()).await.unwrap();
        assert!(repo.get_by_id(product.id).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_stored() {
        const N: usize = 200;
        let repo = InMemoryProductRepository::new();

        let tasks: Vec<_> = (0..N)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(CreateProduct {
                        name: format!("Product {i}"),
                        ..widget()
                    })
                    .await
                    .unwrap()
                    .id
                })
            })
            .collect();

        let mut issued = HashSet::new();
        for task in tasks {
            assert!(issued.insert(task.await.unwrap()));
        }

        let stored: HashSet<Uuid> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(stored.len(), N);
        assert_eq!(stored, issued);
        assert_eq!(repo.count().await.unwrap(), N);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reads_never_observe_partial_updates() {
        let repo = InMemoryProductRepository::new();
        let product = repo.create(widget()).await.unwrap();

        let writer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 1..=100 {
                    repo.update(
                        product.id,
                        UpdateProduct {
                            name: Some(format!("v{i}")),
                            stock: Some(i),
                            ..Default::default()
                        },
                    )
                    .await
                    .unwrap();
                }
            })
        };

        for _ in 0..100 {
            let seen = repo.get_by_id(product.id).await.unwrap().unwrap();
            if seen.name != "Widget" {
                assert_eq!(seen.name, format!("v{}", seen.stock));
            }
        }
        writer.await.unwrap();
    }
}
