use crate::config::AppConfig;
use crate::db::{MemoryRepository, PgRepository, Repository};
use crate::storage::{LocalDiskStorage, MemoryStorage, StorageClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    /// Connects to PostgreSQL, runs migrations and prepares the upload directory.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let repo = PgRepository::connect(&config.database_url).await?;
        repo.migrate().await?;

        let storage = Arc::new(LocalDiskStorage::new(config.upload_dir.clone()).await?)
            as Arc<dyn StorageClient>;

        Ok(Self {
            repo: Arc::new(repo),
            config,
            storage,
        })
    }

    pub fn from_parts(
        repo: Arc<dyn Repository>,
        config: Arc<AppConfig>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            repo,
            config,
            storage,
        }
    }

    /// In-memory state with test settings; nothing touches the network or disk.
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryRepository::new()),
            Arc::new(AppConfig::for_tests()),
            Arc::new(MemoryStorage::default()),
        )
    }
}
