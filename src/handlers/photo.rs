use actix_web::{Responder, web, get, post, put, delete, HttpResponse};
use log::info;
use serde_json::json;

use super::PathId;
use crate::{
   dto::{PageQuery, PhotoQuery, PhotoUploadDto},
   errors::ApiError,
   service,
   state::AppState,
};

// Album routes nested under /events.

#[post("/{event_id}/photoalbum")]
pub async fn create_album(event_id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
   match service::photo::create_album(event_id.into_inner().0, state.get_ref()).await {
      Ok(album) => HttpResponse::Ok().json(album),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[get("/{event_id}/photoalbum")]
pub async fn event_albums(
   event_id: web::Path<PathId>,
   query: web::Query<PageQuery>,
   state: web::Data<AppState>
) -> impl Responder {
   match service::photo::albums_for_event(event_id.into_inner().0, query.page(), state.get_ref()).await {
      Ok(albums) => HttpResponse::Ok().json(albums),
      Err(err) => HttpResponse::from_error(err),
   }
}

// Album and photo routes under /photoalbum.

#[get("/{photo_album_id}")]
pub async fn get_album(album_id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
   match service::photo::get_album(album_id.into_inner().0, state.get_ref()).await {
      Ok(album) => HttpResponse::Ok().json(album),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[delete("/{photo_album_id}")]
pub async fn delete_album(album_id: web::Path<PathId>, state: web::Data<AppState>) -> impl Responder {
   match service::photo::delete_album(album_id.into_inner().0, state.get_ref()).await {
      Ok(()) => HttpResponse::Ok().json(json!({ "message": "Photo album deleted successfully" })),
      Err(err) => HttpResponse::from_error(err),
   }
}

#[post("/{photo_album_id}/photo")]
pub async fn upload(
   album_id: web::Path<PathId>,
   meta: web::Query<PhotoUploadDto>,
   body: web::Bytes,
   state: web::Data<AppState>
) -> impl Responder {
   let album_id = album_id.into_inner().0;
   match service::photo::create_photo(album_id, meta.into_inner(), &body, state.get_ref()).await {
      Ok(photo) => {
         info!("album {}: stored photo {} ({} bytes)", album_id, photo.id, photo.fields.size);
         HttpResponse::Ok().json(photo)
      },
      Err(err) => HttpResponse::from_error(err),
   }
}

#[get("/{photo_album_id}/photo")]
pub async fn search_photos(
   album_id: web::Path<PathId>,
   query: web::Query<PhotoQuery>,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let photos = service::photo::search_photos(album_id.into_inner().0, query.into_inner(), state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(photos))
}

/// Raw image bytes.
#[get("/{photo_album_id}/photo/{photo_id}")]
pub async fn download(path: web::Path<(PathId, PathId)>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let (PathId(album_id), PathId(photo_id)) = path.into_inner();
   let (photo, data) = service::photo::get_photo_bytes(album_id, photo_id, state.get_ref()).await?;
   Ok(HttpResponse::Ok()
      .content_type(photo.fields.content_type)
      .body(data))
}

#[get("/{photo_album_id}/photo/{photo_id}/info")]
pub async fn metadata(path: web::Path<(PathId, PathId)>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let (PathId(album_id), PathId(photo_id)) = path.into_inner();
   let photo = service::photo::get_photo(album_id, photo_id, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(photo))
}

#[put("/{photo_album_id}/photo/{photo_id}")]
pub async fn replace(
   path: web::Path<(PathId, PathId)>,
   meta: web::Query<PhotoUploadDto>,
   body: web::Bytes,
   state: web::Data<AppState>
) -> Result<HttpResponse, ApiError> {
   let (PathId(album_id), PathId(photo_id)) = path.into_inner();
   let photo = service::photo::update_photo(album_id, photo_id, meta.into_inner(), &body, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(photo))
}

#[delete("/{photo_album_id}/photo/{photo_id}")]
pub async fn remove(path: web::Path<(PathId, PathId)>, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
   let (PathId(album_id), PathId(photo_id)) = path.into_inner();
   service::photo::delete_photo(album_id, photo_id, state.get_ref()).await?;
   Ok(HttpResponse::Ok().json(json!({ "message": "Photo deleted successfully" })))
}

pub fn event_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(create_album)
      .service(event_albums);
}

pub fn album_routes(cfg: &mut web::ServiceConfig) {
   cfg.service(get_album)
      .service(delete_album)
      .service(upload)
      .service(search_photos)
      .service(download)
      .service(metadata)
      .service(replace)
      .service(remove);
}
