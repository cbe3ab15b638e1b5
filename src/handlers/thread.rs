use actix_web::{web, get, post, put, delete, HttpResponse};
use serde_json::json;

use super::PathId;
use crate::{dto::ThreadQuery, errors::ApiError, models::Thread, service, state::AppState};

#[post("")]
pub async fn create(dto: web::Json<Thread>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let thread = service::thread::create(dto.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(thread))
}

#[get("")]
pub async fn search(query: web::Query<ThreadQuery>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let threads = service::thread::search(query.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(threads))
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<PathId>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let thread = service::thread::get_by_id(id.into_inner().0, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(thread))
}

#[put("/{id}")]
pub async fn update(
   id: web::Path<PathId>,
   dto: web::Json<Thread>,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let thread = service::thread::update(id.into_inner().0, dto.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(thread))
}

#[delete("/{id}")]
pub async fn remove(id: web::Path<PathId>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   service::thread::delete(id.into_inner().0, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(json!({ "message": "Thread deleted successfully" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
   cfg.service(create)
      .service(search)
      .service(get_by_id)
      .service(update)
      .service(remove);
}
