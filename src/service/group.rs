use crate::{
    db::RecordId,
    dto::GroupQuery,
    errors::ApiError,
    models::Group,
    state::AppState,
};

use super::resource::{Record, ResourceStore};

fn groups(state: &AppState) -> ResourceStore<'_, Group> {
    ResourceStore::new(&state.backend)
}

pub async fn create(group: Group, state: &AppState) -> Result<Record<Group>, ApiError> {
    groups(state).create(group).await
}

pub async fn get_by_id(id: RecordId, state: &AppState) -> Result<Record<Group>, ApiError> {
    groups(state).read(id).await
}

pub async fn update(id: RecordId, group: Group, state: &AppState) -> Result<Record<Group>, ApiError> {
    groups(state).update(id, group).await
}

pub async fn delete(id: RecordId, state: &AppState) -> Result<(), ApiError> {
    groups(state).delete(id).await
}

pub async fn search(query: GroupQuery, state: &AppState) -> Result<Vec<Record<Group>>, ApiError> {
    let page = query.page();
    groups(state).search(&query.into_filter(), page).await
}
