use crate::{
    db::RecordId,
    dto::{MessageQuery, NewMessageDto},
    errors::ApiError,
    models::Message,
    state::AppState,
};

use super::{
    resource::{Record, ResourceStore},
    thread,
};

fn messages(state: &AppState) -> ResourceStore<'_, Message> {
    ResourceStore::new(&state.backend)
}

async fn ensure_thread(thread_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    if thread::exists(thread_id, state).await? {
        Ok(())
    } else {
        Err(ApiError::ParentNotFound("Thread"))
    }
}

/// Loads a message and checks that it belongs to `thread_id`.
async fn load(thread_id: RecordId, id: RecordId, state: &AppState) -> Result<Record<Message>, ApiError> {
    ensure_thread(thread_id, state).await?;
    let message = messages(state).read(id).await?;
    if message.fields.thread_id == thread_id {
        Ok(message)
    } else {
        Err(ApiError::NotFound("Message"))
    }
}

fn into_message(thread_id: RecordId, dto: NewMessageDto) -> Message {
    Message {
        thread_id,
        text: dto.text,
        user: dto.user,
        timestamp: dto.timestamp,
    }
}

pub async fn create(thread_id: RecordId, dto: NewMessageDto, state: &AppState) -> Result<Record<Message>, ApiError> {
    ensure_thread(thread_id, state).await?;
    messages(state).create(into_message(thread_id, dto)).await
}

pub async fn get_by_id(thread_id: RecordId, id: RecordId, state: &AppState) -> Result<Record<Message>, ApiError> {
    load(thread_id, id, state).await
}

pub async fn update(
    thread_id: RecordId,
    id: RecordId,
    dto: NewMessageDto,
    state: &AppState,
) -> Result<Record<Message>, ApiError> {
    load(thread_id, id, state).await?;
    messages(state).update(id, into_message(thread_id, dto)).await
}

pub async fn delete(thread_id: RecordId, id: RecordId, state: &AppState) -> Result<(), ApiError> {
    load(thread_id, id, state).await?;
    messages(state).delete(id).await
}

pub async fn search(thread_id: RecordId, query: MessageQuery, state: &AppState) -> Result<Vec<Record<Message>>, ApiError> {
    ensure_thread(thread_id, state).await?;
    let page = query.page();
    messages(state).search(&query.into_filter(thread_id), page).await
}
