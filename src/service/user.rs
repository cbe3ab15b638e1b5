use crate::{
    db::RecordId,
    dto::UserQuery,
    errors::ApiError,
    models::User,
    state::AppState,
};

use super::resource::{Record, ResourceStore};

fn users(state: &AppState) -> ResourceStore<'_, User> {
    ResourceStore::new(&state.backend)
}

pub async fn create(user: User, state: &AppState) -> Result<Record<User>, ApiError> {
    users(state).create(user).await
}

pub async fn get_by_id(id: RecordId, state: &AppState) -> Result<Record<User>, ApiError> {
    users(state).read(id).await
}

pub async fn exists(id: RecordId, state: &AppState) -> Result<bool, ApiError> {
    users(state).exists(id).await
}

pub async fn update(id: RecordId, user: User, state: &AppState) -> Result<Record<User>, ApiError> {
    users(state).update(id, user).await
}

pub async fn delete(id: RecordId, state: &AppState) -> Result<(), ApiError> {
    users(state).delete(id).await
}

pub async fn search(query: UserQuery, state: &AppState) -> Result<Vec<Record<User>>, ApiError> {
    let page = query.page();
    users(state).search(&query.into_filter(), page).await
}
