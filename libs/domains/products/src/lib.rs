//! Products Domain
//!
//! An in-memory product catalog: validation, storage and HTTP handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Validation  │  ← raw JSON object → CreateProduct / UpdateProduct
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← id resolution, absent → NotFound
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + in-memory implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, inputs, response bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum::Router;
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let repository = InMemoryProductRepository::with_sample_data();
//! let service = ProductService::new(repository);
//!
//! let app: Router = Router::new().nest("/products", handlers::router(service));
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{CreateProduct, DeletedProduct, Product, ProductList, UpdateProduct};
pub use repository::ProductRepository;
pub use service::ProductService;
pub use validation::{validate_create, validate_update};
