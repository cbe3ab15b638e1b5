use actix_web::{web, get, post, put, delete, HttpResponse};
use serde_json::json;

use super::PathId;
use crate::{dto::{MessageQuery, NewMessageDto}, errors::ApiError, service, state::AppState};

// Mounted under /threads.

#[post("/{thread_id}/messages")]
pub async fn create(
   thread_id: web::Path<PathId>,
   dto: web::Json<NewMessageDto>,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let message = service::message::create(thread_id.into_inner().0, dto.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(message))
}

#[get("/{thread_id}/messages")]
pub async fn search(
   thread_id: web::Path<PathId>,
   query: web::Query<MessageQuery>,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let messages = service::message::search(thread_id.into_inner().0, query.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(messages))
}

#[get("/{thread_id}/messages/{message_id}")]
pub async fn get_by_id(path: web::Path<(PathId, PathId)>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let (PathId(thread_id), PathId(message_id)) = path.into_inner();
   let message = service::message::get_by_id(thread_id, message_id, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(message))
}

#[put("/{thread_id}/messages/{message_id}")]
pub async fn update(
   path: web::Path<(PathId, PathId)>,
   dto: web::Json<NewMessageDto>,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let (PathId(thread_id), PathId(message_id)) = path.into_inner();
   let message = service::message::update(thread_id, message_id, dto.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(message))
}

#[delete("/{thread_id}/messages/{message_id}")]
pub async fn remove(path: web::Path<(PathId, PathId)>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let (PathId(thread_id), PathId(message_id)) = path.into_inner();
   service::message::delete(thread_id, message_id, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(json!({ "message": "Message deleted successfully" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
   cfg.service(create)
      .service(search)
      .service(get_by_id)
      .service(update)
      .service(remove);
}
