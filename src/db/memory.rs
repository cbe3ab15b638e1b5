use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use log::debug;

use crate::filter::FilterSpec;

use super::{Collection, DbError, Document, RecordId};

#[derive(Default)]
struct Table {
    last_id: u64,
    rows: Vec<(u64, Document)>,
}

impl Table {
    /// Name of the first unique field whose value in `doc` is already held
    /// by a row other than `except`.
    fn collision(&self, collection: &Collection, doc: &Document, except: Option<u64>) -> Option<&'static str> {
        collection.unique.iter().copied().find(|field| {
            let Some(value) = doc.get(*field).filter(|v| !v.is_null()) else {
                return false;
            };
            self.rows
                .iter()
                .any(|(id, row)| Some(*id) != except && row.get(*field) == Some(value))
        })
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.rows.iter().position(|(row_id, _)| *row_id == id)
    }
}

/// Process-local store. Every collection lives behind one lock, so id
/// assignment, uniqueness checks and the mutation itself happen atomically.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
}

fn seq(id: RecordId) -> Option<u64> {
    match id {
        RecordId::Seq(n) => Some(n),
        RecordId::Uuid(_) => None,
    }
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<&'static str, Table>>, DbError> {
        self.tables.lock().map_err(|_| DbError::Poisoned)
    }

    pub fn insert(&self, collection: &Collection, doc: Document) -> Result<RecordId, DbError> {
        let mut tables = self.lock()?;
        let table = tables.entry(collection.name).or_default();
        if let Some(field) = table.collision(collection, &doc, None) {
            return Err(DbError::Duplicate(field));
        }
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push((id, doc));
        debug!("memory: inserted {}/{}", collection.name, id);
        Ok(RecordId::Seq(id))
    }

    pub fn find_one(&self, collection: &Collection, id: RecordId) -> Result<Option<Document>, DbError> {
        let Some(id) = seq(id) else {
            return Ok(None);
        };
        let tables = self.lock()?;
        Ok(tables
            .get(collection.name)
            .and_then(|table| table.position(id).map(|pos| table.rows[pos].1.clone())))
    }

    pub fn find_many(
        &self,
        collection: &Collection,
        filter: &FilterSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(RecordId, Document)>, DbError> {
        let tables = self.lock()?;
        let Some(table) = tables.get(collection.name) else {
            return Ok(Vec::new());
        };
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(table
            .rows
            .iter()
            .filter(|(_, doc)| filter.matches(doc))
            .skip(skip)
            .take(limit)
            .map(|(id, doc)| (RecordId::Seq(*id), doc.clone()))
            .collect())
    }

    pub fn replace_one(&self, collection: &Collection, id: RecordId, doc: Document) -> Result<bool, DbError> {
        let Some(id) = seq(id) else {
            return Ok(false);
        };
        let mut tables = self.lock()?;
        let Some(table) = tables.get_mut(collection.name) else {
            return Ok(false);
        };
        let Some(pos) = table.position(id) else {
            return Ok(false);
        };
        if let Some(field) = table.collision(collection, &doc, Some(id)) {
            return Err(DbError::Duplicate(field));
        }
        table.rows[pos].1 = doc;
        debug!("memory: replaced {}/{}", collection.name, id);
        Ok(true)
    }

    pub fn delete_one(&self, collection: &Collection, id: RecordId) -> Result<bool, DbError> {
        let Some(id) = seq(id) else {
            return Ok(false);
        };
        let mut tables = self.lock()?;
        let Some(table) = tables.get_mut(collection.name) else {
            return Ok(false);
        };
        match table.position(id) {
            Some(pos) => {
                table.rows.remove(pos);
                debug!("memory: deleted {}/{}", collection.name, id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_many(&self, collection: &Collection, filter: &FilterSpec) -> Result<Vec<RecordId>, DbError> {
        let mut tables = self.lock()?;
        let Some(table) = tables.get_mut(collection.name) else {
            return Ok(Vec::new());
        };
        let mut removed = Vec::new();
        table.rows.retain(|(id, doc)| {
            if filter.matches(doc) {
                removed.push(RecordId::Seq(*id));
                false
            } else {
                true
            }
        });
        Ok(removed)
    }
}
