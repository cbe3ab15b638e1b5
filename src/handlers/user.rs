use actix_web::{Responder, web, get, post, put, delete, HttpResponse};
use log::{info, warn};
use serde_json::json;

use super::PathId;
use crate::{dto::UserQuery, errors::ApiError, models::User, service, state::AppState};

#[post("")]
pub async fn register(dto: web::Json<User>, state: web::Data<AppState>) -> impl Responder {
    let response = service::user::create(dto.into_inner(), state.get_ref()).await;
    match response {
        Ok(user) => {
            info!("registered user {} <{}>", user.id, user.fields.email);
            HttpResponse::Ok().json(user)
        },
        Err(err @ ApiError::UniquenessViolation(_)) => {
            warn!("registration rejected: {}", err);
            HttpResponse::from_error(err)
        },
        Err(err) => HttpResponse::from_error(err)
    }
}

#[get("")]
pub async fn get_all(query: web::Query<UserQuery>, state: web::Data<AppState>) -> impl Responder {
    let response = service::user::search(query.into_inner(), state.get_ref()).await;
    match response {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[get("/{id}")]
pub async fn get_by_id(id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
    let response = service::user::get_by_id(id.into_inner().0, state.get_ref()).await;
    match response {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[put("/{id}")]
pub async fn update(id: web::Path<PathId>, dto: web::Json<User>, state: web::Data<AppState>) -> impl Responder {
    let response = service::user::update(id.into_inner().0, dto.into_inner(), state.get_ref()).await;
    match response {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(err) => HttpResponse::from_error(err)
    }
}

#[delete("/{id}")]
pub async fn remove(id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
    let response = service::user::delete(id.into_inner().0, state.get_ref()).await;
    match response {
        Ok(()) => HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })),
        Err(err) => HttpResponse::from_error(err)
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(get_all)
        .service(get_by_id)
        .service(update)
        .service(remove);
}
