use derive_more::Display;
use log::info;

use crate::{
    blobs::{BlobError, PhotoSink},
    config::Config,
    db::{postgres::PgDocumentStore, Backend, DbError},
    models::COLLECTIONS,
};

#[derive(Debug, Display)]
pub enum StartupError {
    #[display(fmt = "{}", _0)]
    Db(DbError),

    #[display(fmt = "{}", _0)]
    Blob(BlobError),
}

impl std::error::Error for StartupError {}

/// Shared by every handler through `web::Data`.
pub struct AppState {
    pub backend: Backend,
    pub photos: PhotoSink,
}

impl AppState {
    pub async fn init(config: &Config) -> Result<Self, StartupError> {
        let backend = match &config.database_url {
            Some(url) => {
                let store = PgDocumentStore::connect(url, config.db_max_connections)
                    .await
                    .map_err(StartupError::Db)?;
                store.migrate(&COLLECTIONS).await.map_err(StartupError::Db)?;
                Backend::Postgres(store)
            }
            None => {
                info!("DATABASE_URL not set, keeping records in memory");
                Backend::in_memory()
            }
        };
        let photos = PhotoSink::new(config.photo_dir.clone())
            .await
            .map_err(StartupError::Blob)?;
        Ok(Self::new(backend, photos))
    }

    pub fn new(backend: Backend, photos: PhotoSink) -> Self {
        Self { backend, photos }
    }
}
