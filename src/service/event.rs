use crate::{
    db::RecordId,
    dto::EventQuery,
    errors::ApiError,
    models::Event,
    state::AppState,
};

use super::resource::{Record, ResourceStore};

fn events(state: &AppState) -> ResourceStore<'_, Event> {
    ResourceStore::new(&state.backend)
}

pub async fn create(event: Event, state: &AppState) -> Result<Record<Event>, ApiError> {
    events(state).create(event).await
}

pub async fn get_by_id(id: RecordId, state: &AppState) -> Result<Record<Event>, ApiError> {
    events(state).read(id).await
}

pub async fn update(id: RecordId, event: Event, state: &AppState) -> Result<Record<Event>, ApiError> {
    events(state).update(id, event).await
}

pub async fn delete(id: RecordId, state: &AppState) -> Result<(), ApiError> {
    events(state).delete(id).await
}

pub async fn search(query: EventQuery, state: &AppState) -> Result<Vec<Record<Event>>, ApiError> {
    let page = query.page();
    events(state).search(&query.into_filter(), page).await
}
