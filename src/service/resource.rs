//! Generic CRUD + search facade, instantiated once per entity kind.
//!
//! The facade owns the translation between typed records and stored
//! documents: identifiers are attached on the way out and never written into
//! the document body. Which backend answers is decided by [`Backend`].

use std::marker::PhantomData;

use log::{error, info};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db::{Backend, Collection, Document, RecordId},
    dto::Page,
    errors::ApiError,
    filter::FilterSpec,
};

/// A storable entity kind: its field schema is the implementing type itself.
pub trait Resource: Serialize + DeserializeOwned {
    /// Human-readable name used in error messages.
    const NAME: &'static str;
    const COLLECTION: Collection;
}

/// A record together with its system-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<R> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: R,
}

fn to_document<R: Resource>(fields: &R) -> Result<Document, ApiError> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(other) => {
            error!("{} serialized to a non-object: {}", R::NAME, other);
            Err(ApiError::InternalError)
        }
        Err(err) => {
            error!("failed to serialize {}: {}", R::NAME, err);
            Err(ApiError::InternalError)
        }
    }
}

fn from_document<R: Resource>(id: RecordId, doc: Document) -> Result<Record<R>, ApiError> {
    serde_json::from_value(Value::Object(doc))
        .map(|fields| Record { id, fields })
        .map_err(|err| {
            error!("stored {} {} does not match its schema: {}", R::NAME, id, err);
            ApiError::InternalError
        })
}

pub struct ResourceStore<'a, R> {
    backend: &'a Backend,
    _kind: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceStore<'a, R> {
    pub fn new(backend: &'a Backend) -> Self {
        Self {
            backend,
            _kind: PhantomData,
        }
    }

    pub async fn create(&self, fields: R) -> Result<Record<R>, ApiError> {
        let doc = to_document(&fields)?;
        let id = self.backend.insert(&R::COLLECTION, doc).await?;
        info!("{} {} created", R::NAME, id);
        Ok(Record { id, fields })
    }

    pub async fn read(&self, id: RecordId) -> Result<Record<R>, ApiError> {
        match self.backend.find_one(&R::COLLECTION, id).await? {
            Some(doc) => from_document(id, doc),
            None => Err(ApiError::NotFound(R::NAME)),
        }
    }

    pub async fn exists(&self, id: RecordId) -> Result<bool, ApiError> {
        Ok(self.backend.find_one(&R::COLLECTION, id).await?.is_some())
    }

    /// Full replacement of every field; the identifier stays as it was.
    pub async fn update(&self, id: RecordId, fields: R) -> Result<Record<R>, ApiError> {
        let doc = to_document(&fields)?;
        if self.backend.replace_one(&R::COLLECTION, id, doc).await? {
            info!("{} {} updated", R::NAME, id);
            Ok(Record { id, fields })
        } else {
            Err(ApiError::NotFound(R::NAME))
        }
    }

    pub async fn delete(&self, id: RecordId) -> Result<(), ApiError> {
        if self.backend.delete_one(&R::COLLECTION, id).await? {
            info!("{} {} deleted", R::NAME, id);
            Ok(())
        } else {
            Err(ApiError::NotFound(R::NAME))
        }
    }

    /// Removes every record matching `filter` and returns their identifiers.
    pub async fn delete_matching(&self, filter: &FilterSpec) -> Result<Vec<RecordId>, ApiError> {
        let ids = self.backend.delete_many(&R::COLLECTION, filter).await?;
        if !ids.is_empty() {
            info!("{} {} records deleted", ids.len(), R::NAME);
        }
        Ok(ids)
    }

    /// Matching records in insertion order, sliced to `[skip, skip + limit)`.
    pub async fn search(&self, filter: &FilterSpec, page: Page) -> Result<Vec<Record<R>>, ApiError> {
        self.backend
            .find_many(&R::COLLECTION, filter, page.skip, page.limit)
            .await?
            .into_iter()
            .map(|(id, doc)| from_document(id, doc))
            .collect()
    }
}
