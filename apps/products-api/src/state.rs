//! Application state management

use domain_products::InMemoryProductRepository;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: InMemoryProductRepository,
}

impl AppState {
    /// Build the state, seeding the catalog when configured to
    pub fn new(config: Config) -> Self {
        let repository = if config.seed_sample_data {
            InMemoryProductRepository::with_sample_data()
        } else {
            InMemoryProductRepository::new()
        };

        Self { config, repository }
    }
}
