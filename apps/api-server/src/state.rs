//! Application state - shared across all handlers.

use std::sync::Arc;

use postdesk_core::PostService;
use postdesk_core::domain::resource::{DescriptorError, ResourceDescriptor};
use postdesk_core::ports::{CategoryRepository, PostRepository};
use postdesk_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use postdesk_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use postdesk_infra::database::{PostgresCategoryRepository, PostgresPostRepository};

use crate::config::AppConfig;

type Repositories = (Arc<dyn PostRepository>, Arc<dyn CategoryRepository>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    /// Operation table the routes were registered from.
    pub descriptor: Arc<ResourceDescriptor>,
    /// Name of the storage backing the repositories.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, DescriptorError> {
        #[cfg(feature = "postgres")]
        let (storage, repositories) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let repositories: Repositories = (
                        Arc::new(PostgresPostRepository::new(connections.main.clone())),
                        Arc::new(PostgresCategoryRepository::new(connections.main)),
                    );
                    ("postgres", repositories)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    ("memory", in_memory_repositories())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                ("memory", in_memory_repositories())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (storage, repositories) = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - DATABASE_URL is ignored");
            }
            ("memory", in_memory_repositories())
        };

        let state = Self::with_repositories(config, repositories, storage)?;
        tracing::info!(storage, "Application state initialized");
        Ok(state)
    }

    /// State over a fresh in-memory store.
    pub fn in_memory(config: &AppConfig) -> Result<Self, DescriptorError> {
        Self::with_repositories(config, in_memory_repositories(), "memory")
    }

    fn with_repositories(
        config: &AppConfig,
        (posts, categories): Repositories,
        storage: &'static str,
    ) -> Result<Self, DescriptorError> {
        let service = PostService::new(posts, categories)
            .with_pagination(config.pagination)
            .with_validation(config.validation);

        Ok(Self {
            posts: Arc::new(service),
            descriptor: Arc::new(ResourceDescriptor::posts()?),
            storage,
        })
    }
}

fn in_memory_repositories() -> Repositories {
    let store = InMemoryStore::new();
    (Arc::new(store.posts()), Arc::new(store.categories()))
}
