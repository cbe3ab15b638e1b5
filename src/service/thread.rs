use log::warn;

use crate::{
    db::RecordId,
    dto::ThreadQuery,
    errors::ApiError,
    models::{Event, Group, Thread},
    state::AppState,
};

use super::resource::{Record, ResourceStore};

fn threads(state: &AppState) -> ResourceStore<'_, Thread> {
    ResourceStore::new(&state.backend)
}

/// A thread hangs off an event or a group. The check is best effort: the
/// parent may still be deleted afterwards.
async fn ensure_parent(parents_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    if ResourceStore::<Event>::new(&state.backend).exists(parents_id).await?
        || ResourceStore::<Group>::new(&state.backend).exists(parents_id).await?
    {
        Ok(())
    } else {
        warn!("thread parent {} is neither an event nor a group", parents_id);
        Err(ApiError::ParentNotFound("Parent"))
    }
}

pub async fn create(thread: Thread, state: &AppState) -> Result<Record<Thread>, ApiError> {
    ensure_parent(thread.parents_id, state).await?;
    threads(state).create(thread).await
}

pub async fn get_by_id(id: RecordId, state: &AppState) -> Result<Record<Thread>, ApiError> {
    threads(state).read(id).await
}

pub async fn exists(id: RecordId, state: &AppState) -> Result<bool, ApiError> {
    threads(state).exists(id).await
}

pub async fn update(id: RecordId, thread: Thread, state: &AppState) -> Result<Record<Thread>, ApiError> {
    ensure_parent(thread.parents_id, state).await?;
    threads(state).update(id, thread).await
}

pub async fn delete(id: RecordId, state: &AppState) -> Result<(), ApiError> {
    threads(state).delete(id).await
}

pub async fn search(query: ThreadQuery, state: &AppState) -> Result<Vec<Record<Thread>>, ApiError> {
    let page = query.page();
    threads(state).search(&query.into_filter(), page).await
}
