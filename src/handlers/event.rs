use actix_web::{Responder, web, get, post, put, delete, HttpResponse};
use log::error;
use serde_json::json;

use super::PathId;
use crate::{dto::EventQuery, models::Event, service, state::AppState};

#[post("")]
pub async fn create(dto: web::Json<Event>, state: web::Data<AppState>) -> impl Responder {
   match service::event::create(dto.into_inner(), state.get_ref()).await {
      Ok(record) => HttpResponse::Ok().json(record),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[get("")]
pub async fn search(query: web::Query<EventQuery>, state: web::Data<AppState>) -> impl Responder {
   match service::event::search(query.into_inner(), state.get_ref()).await {
      Ok(records) => HttpResponse::Ok().json(records),
      Err(err) => {
         error!("[{:} : {:}] event search failed: {:?}", file!(), line!(), err);
         HttpResponse::from_error(err)
      }
   }
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
   match service::event::get_by_id(id.into_inner().0, state.get_ref()).await {
      Ok(record) => HttpResponse::Ok().json(record),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[put("/{id}")]
pub async fn update(id: web::Path<PathId>, dto: web::Json<Event>, state: web::Data<AppState>) -> impl Responder {
   match service::event::update(id.into_inner().0, dto.into_inner(), state.get_ref()).await {
      Ok(record) => HttpResponse::Ok().json(record),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[delete("/{id}")]
pub async fn remove(id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
   match service::event::delete(id.into_inner().0, state.get_ref()).await {
      Ok(()) => HttpResponse::Ok().json(json!({ "message": "Event deleted successfully" })),
      Err(err) => HttpResponse::from_error(err),
   }
}

pub fn config(cfg: &mut web::ServiceConfig) {
   cfg.service(create)
      .service(search)
      .service(get_by_id)
      .service(update)
      .service(remove);
}
