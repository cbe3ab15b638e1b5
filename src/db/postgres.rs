use log::{debug, info, warn};
use sqlx::{
    postgres::PgPoolOptions,
    types::Json,
    Pool, Postgres, QueryBuilder,
};
use uuid::Uuid;

use crate::filter::{FilterSpec, Predicate};

use super::{Collection, DbError, Document, RecordId};

pub type PGPool = Pool<Postgres>;

const CREATE_DOCUMENTS: &str = "CREATE TABLE IF NOT EXISTS documents (
    seq BIGSERIAL PRIMARY KEY,
    id UUID NOT NULL UNIQUE,
    collection TEXT NOT NULL,
    body JSONB NOT NULL
)";

const CREATE_COLLECTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_seq_idx ON documents (collection, seq)";

pub async fn init_db_pool(db_url: &str, max_connections: u32) -> Result<PGPool, sqlx::Error> {
    let pool: PGPool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(db_url)
        .await?;
    info!("connected to postgresql");
    Ok(pool)
}

fn unique_index_name(collection: &str, field: &str) -> String {
    format!("{collection}_{field}_key")
}

fn uuid(id: RecordId) -> Option<Uuid> {
    match id {
        RecordId::Uuid(id) => Some(id),
        RecordId::Seq(_) => None,
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends ` AND <predicate>` for every condition of `filter`.
///
/// Field names come from `&'static str` constants and are inlined; every
/// caller-supplied value is bound.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FilterSpec) {
    for condition in filter.conditions() {
        let field = condition.field;
        match &condition.predicate {
            Predicate::Contains(text) => {
                qb.push(format!(" AND (body->>'{field}') ILIKE "));
                qb.push_bind(format!("%{}%", escape_like(text)));
            }
            Predicate::Equals(value) => {
                qb.push(format!(" AND (body->'{field}') = "));
                qb.push_bind(Json(value.clone()));
            }
            Predicate::Range { from, to } => {
                if let Some(lo) = from {
                    qb.push(format!(" AND (body->>'{field}') COLLATE \"C\" >= "));
                    qb.push_bind(lo.clone());
                }
                if let Some(hi) = to {
                    qb.push(format!(" AND (body->>'{field}') COLLATE \"C\" <= "));
                    qb.push_bind(hi.clone());
                }
            }
            Predicate::Member(item) => {
                qb.push(format!(" AND (body->'{field}') @> jsonb_build_array("));
                qb.push_bind(item.clone());
                qb.push("::text)");
            }
        }
    }
}

fn map_write_error(err: sqlx::Error, collection: &Collection) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .and_then(|c| {
                    collection
                        .unique
                        .iter()
                        .find(|f| c == unique_index_name(collection.name, f))
                })
                .or(collection.unique.first())
                .copied();
            if let Some(field) = field {
                return DbError::Duplicate(field);
            }
        }
    }
    DbError::Sqlx(err)
}

/// JSONB document store: one `documents` table shared by all collections,
/// insertion order kept by `seq`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PGPool,
}

impl PgDocumentStore {
    pub fn new(pool: PGPool) -> Self {
        Self { pool }
    }

    pub async fn connect(db_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let pool = init_db_pool(db_url, max_connections).await?;
        Ok(Self::new(pool))
    }

    /// Creates the documents table and one partial unique index per unique
    /// field of each collection.
    pub async fn migrate(&self, collections: &[Collection]) -> Result<(), DbError> {
        sqlx::query(CREATE_DOCUMENTS).execute(&self.pool).await?;
        sqlx::query(CREATE_COLLECTION_INDEX).execute(&self.pool).await?;
        for collection in collections {
            for field in collection.unique {
                let index = unique_index_name(collection.name, field);
                let sql = format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS {index} ON documents ((body->>'{field}')) \
                     WHERE collection = '{}'",
                    collection.name
                );
                sqlx::query(&sql).execute(&self.pool).await?;
                info!("ensured unique index {}", index);
            }
        }
        Ok(())
    }

    pub async fn insert(&self, collection: &Collection, doc: Document) -> Result<RecordId, DbError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection.name)
            .bind(Json(doc))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, collection))?;
        debug!("postgres: inserted {}/{}", collection.name, id);
        Ok(RecordId::Uuid(id))
    }

    pub async fn find_one(&self, collection: &Collection, id: RecordId) -> Result<Option<Document>, DbError> {
        let Some(id) = uuid(id) else {
            return Ok(None);
        };
        let row: Option<(Json<Document>,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection.name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(body,)| body.0))
    }

    pub async fn find_many(
        &self,
        collection: &Collection,
        filter: &FilterSpec,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<(RecordId, Document)>, DbError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, body FROM documents WHERE collection = ");
        qb.push_bind(collection.name);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY seq OFFSET ");
        qb.push_bind(i64::try_from(skip).unwrap_or(i64::MAX));
        qb.push(" LIMIT ");
        qb.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        debug!("postgres: {}", qb.sql());

        let rows: Vec<(Uuid, Json<Document>)> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|(id, body)| (RecordId::Uuid(id), body.0))
            .collect())
    }

    pub async fn replace_one(&self, collection: &Collection, id: RecordId, doc: Document) -> Result<bool, DbError> {
        let Some(id) = uuid(id) else {
            return Ok(false);
        };
        let res = sqlx::query("UPDATE documents SET body = $1 WHERE collection = $2 AND id = $3")
            .bind(Json(doc))
            .bind(collection.name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, collection))?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_one(&self, collection: &Collection, id: RecordId) -> Result<bool, DbError> {
        let Some(id) = uuid(id) else {
            return Ok(false);
        };
        let res = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() > 1 {
            warn!("postgres: delete of {}/{} touched {} rows", collection.name, id, res.rows_affected());
        }
        Ok(res.rows_affected() > 0)
    }

    pub async fn delete_many(&self, collection: &Collection, filter: &FilterSpec) -> Result<Vec<RecordId>, DbError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("DELETE FROM documents WHERE collection = ");
        qb.push_bind(collection.name);
        push_filter(&mut qb, filter);
        qb.push(" RETURNING id");

        let rows: Vec<(Uuid,)> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(id,)| RecordId::Uuid(id)).collect())
    }
}
