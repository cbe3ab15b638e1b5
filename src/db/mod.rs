pub mod memory;
pub mod postgres;

use std::{fmt, str::FromStr, sync::Arc};

use derive_more::Display;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::filter::FilterSpec;

use self::{memory::MemoryStore, postgres::PgDocumentStore};

/// Stored body of a record. The identifier never lives inside it.
pub type Document = serde_json::Map<String, Value>;

/// Public identifier of a record.
///
/// The in-memory backend hands out per-collection counters, the document
/// store mints UUIDs. Serialized as a JSON number or string respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordId {
    Seq(u64),
    Uuid(Uuid),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Seq(n) => write!(f, "{n}"),
            RecordId::Uuid(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Display)]
#[display(fmt = "'{}' is not a valid identifier", _0)]
pub struct InvalidRecordId(String);

impl std::error::Error for InvalidRecordId {}

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u64>() {
            return Ok(RecordId::Seq(n));
        }
        Uuid::parse_str(s)
            .map(RecordId::Uuid)
            .map_err(|_| InvalidRecordId(s.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordId::Seq(n) => serializer.serialize_u64(*n),
            RecordId::Uuid(id) => id.serialize(serializer),
        }
    }
}

struct RecordIdVisitor;

impl<'de> de::Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative integer or a UUID")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
        Ok(RecordId::Seq(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
        u64::try_from(v)
            .map(RecordId::Seq)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
        v.parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

// Accepts numbers as well as strings so path segments and query parameters
// (always text) and JSON bodies (either) all parse the same way.
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Seq(n) => Value::from(n),
            RecordId::Uuid(id) => Value::String(id.to_string()),
        }
    }
}

/// A named collection and the fields that must hold distinct values in it.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub name: &'static str,
    pub unique: &'static [&'static str],
}

#[derive(Debug, Display)]
pub enum DbError {
    #[display(fmt = "duplicate value for unique field '{}'", _0)]
    Duplicate(&'static str),

    #[display(fmt = "store lock poisoned")]
    Poisoned,

    #[display(fmt = "database error: {}", _0)]
    Sqlx(sqlx::Error),
}

impl std::error::Error for DbError {}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Sqlx(err)
    }
}

/// Storage backend chosen at startup.
#[derive(Clone)]
pub enum Backend {
    Memory(Arc<MemoryStore>),
    Postgres(PgDocumentStore),
}

impl Backend {
    pub fn in_memory() -> Self {
        Backend::Memory(Arc::new(MemoryStore::default()))
    }

    pub async fn insert(&self, collection: &Collection, doc: Document) -> Result<RecordId, DbError> {
        match self {
            Backend::Memory(store) => store.insert(collection, doc),
            Backend::Postgres(store) => store.insert(collection, doc).await,
        }
    }

    pub async fn find_one(&self, collection: &Collection, id: RecordId) -> Result<Option<Document>, DbError> {
        match self {
            Backend::Memory(store) => store.find_one(collection, id),
            Backend::Postgres(store) => store.find_one(collection, id).await,
        }
    }

    pub async fn find_many(
        &self,
        collection: &Collection,
        filter: &FilterSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(RecordId, Document)>, DbError> {
        match self {
            Backend::Memory(store) => store.find_many(collection, filter, skip, limit),
            Backend::Postgres(store) => store.find_many(collection, filter, skip, limit).await,
        }
    }

    /// Returns `false` when no record carries `id`.
    pub async fn replace_one(&self, collection: &Collection, id: RecordId, doc: Document) -> Result<bool, DbError> {
        match self {
            Backend::Memory(store) => store.replace_one(collection, id, doc),
            Backend::Postgres(store) => store.replace_one(collection, id, doc).await,
        }
    }

    /// Returns `false` when no record carries `id`.
    pub async fn delete_one(&self, collection: &Collection, id: RecordId) -> Result<bool, DbError> {
        match self {
            Backend::Memory(store) => store.delete_one(collection, id),
            Backend::Postgres(store) => store.delete_one(collection, id).await,
        }
    }

    pub async fn delete_many(&self, collection: &Collection, filter: &FilterSpec) -> Result<Vec<RecordId>, DbError> {
        match self {
            Backend::Memory(store) => store.delete_many(collection, filter),
            Backend::Postgres(store) => store.delete_many(collection, filter).await,
        }
    }
}
