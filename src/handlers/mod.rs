pub mod event;
pub mod group;
pub mod message;
pub mod photo;
pub mod thread;
pub mod user;

use actix_web::web;
use serde::{de, Deserialize, Deserializer};

use crate::{db::RecordId, errors};

/// Identifier taken from a path segment. Segments are always text, so this
/// goes through `FromStr` rather than `RecordId`'s number-or-string decoding.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub RecordId);

impl<'de> Deserialize<'de> for PathId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map(PathId).map_err(de::Error::custom)
    }
}

/// Every route of the service plus the extractor settings that turn
/// malformed input into `{"detail": ...}` client errors.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(errors::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(errors::path_error_handler))
        .service(
            web::scope("/events")
                .configure(event::config)
                .configure(photo::event_routes),
        )
        .service(web::scope("/groups").configure(group::config))
        .service(web::scope("/users").configure(user::config))
        .service(
            web::scope("/threads")
                .configure(thread::config)
                .configure(message::config),
        )
        .service(web::scope("/photoalbum").configure(photo::album_routes));
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, middleware::NormalizePath, test, App};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use super::*;
    use crate::{blobs::PhotoSink, db::Backend, state::AppState};

    macro_rules! app {
        ($dir:expr) => {{
            let photos = PhotoSink::new($dir.path().join("photos")).await.unwrap();
            let state = web::Data::new(AppState::new(Backend::in_memory(), photos));
            test::init_service(
                App::new()
                    .app_data(state)
                    .wrap(NormalizePath::trim())
                    .configure(config),
            )
            .await
        }};
    }

    macro_rules! call {
        ($app:expr, $req:expr) => {{
            let res = test::call_service(&$app, $req.to_request()).await;
            let status = res.status();
            let body: Value = test::read_body_json(res).await;
            (status, body)
        }};
    }

    fn event(name: &str, is_private: bool, start_date: &str) -> Value {
        json!({
            "name": name,
            "description": "all hands",
            "start_date": start_date,
            "end_date": start_date,
            "location": "Porto",
            "cover_photo": "cover.jpg",
            "is_private": is_private,
            "organizers": ["ana"],
            "members": ["ana", "bo"],
        })
    }

    fn group(name: &str, publish: bool) -> Value {
        json!({
            "name": name,
            "description": "hikers",
            "icon": "icon.png",
            "cover_photo": "cover.png",
            "group_type": "public",
            "allow_members_to_publish": publish,
            "allow_members_to_create_events": true,
            "admin": ["ana"],
        })
    }

    fn names(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[actix_web::test]
    async fn created_event_reads_back_identically() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);

        let (status, created) = call!(app, test::TestRequest::post().uri("/events/").set_json(event("Launch", false, "2024-06-01")));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["id"], json!(1));
        assert_eq!(created["polls"], json!([]));

        let (status, read) = call!(app, test::TestRequest::get().uri("/events/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(read, created);
    }

    #[actix_web::test]
    async fn deleted_event_is_gone() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));

        let (status, body) = call!(app, test::TestRequest::delete().uri("/events/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Event deleted successfully" }));

        let (status, body) = call!(app, test::TestRequest::get().uri("/events/1"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Event not found" }));

        let (status, _) = call!(app, test::TestRequest::delete().uri("/events/1"));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_replaces_everything_but_the_id() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Draft", false, "2024-06-01")));

        let replacement = event("Final", true, "2024-07-01");
        let (status, updated) = call!(app, test::TestRequest::put().uri("/events/1").set_json(&replacement));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], json!(1));

        let (_, read) = call!(app, test::TestRequest::get().uri("/events/1"));
        assert_eq!(read["name"], "Final");
        assert_eq!(read["is_private"], true);

        let (status, _) = call!(app, test::TestRequest::put().uri("/events/99").set_json(&replacement));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn user_emails_are_unique() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        let ana = json!({ "name": "Ana", "email": "ana@example.com" });

        let (status, _) = call!(app, test::TestRequest::post().uri("/users/").set_json(&ana));
        assert_eq!(status, StatusCode::OK);
        let (status, body) = call!(app, test::TestRequest::post().uri("/users/").set_json(&ana));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "email already registered");

        let (status, _) = call!(app, test::TestRequest::post().uri("/users/").set_json(json!({ "name": "Bo", "email": "bo@example.com" })));
        assert_eq!(status, StatusCode::OK);

        // keeping your own address is fine, taking someone else's is not
        let (status, _) = call!(app, test::TestRequest::put().uri("/users/1").set_json(json!({ "name": "Ana B", "email": "ana@example.com" })));
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call!(app, test::TestRequest::put().uri("/users/2").set_json(&ana));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn search_pages_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        for n in 0..12 {
            call!(app, test::TestRequest::post().uri("/events").set_json(event(&format!("event {n}"), false, "2024-01-01")));
        }

        let (status, first) = call!(app, test::TestRequest::get().uri("/events/"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&first).len(), 10);
        assert_eq!(names(&first)[0], "event 0");

        let (_, rest) = call!(app, test::TestRequest::get().uri("/events?skip=10"));
        assert_eq!(names(&rest), vec!["event 10", "event 11"]);

        let (_, window) = call!(app, test::TestRequest::get().uri("/events?skip=3&limit=2"));
        assert_eq!(names(&window), vec!["event 3", "event 4"]);
    }

    #[actix_web::test]
    async fn event_filters() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Team Offsite", false, "2024-03-10")));
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Board review", true, "2024-09-01")));

        let (_, body) = call!(app, test::TestRequest::get().uri("/events?name=team"));
        assert_eq!(names(&body), vec!["Team Offsite"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/events?is_private=false"));
        assert_eq!(names(&body), vec!["Team Offsite"]);

        let (status, body) = call!(app, test::TestRequest::get().uri("/events?start_date_to=2024-06-30"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["Team Offsite"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/events?start_date_from=2024-03-10&start_date_to=2024-09-01"));
        assert_eq!(names(&body).len(), 2);

        let (_, body) = call!(app, test::TestRequest::get().uri("/events?members=bo&organizers=zed"));
        assert!(names(&body).is_empty());
    }

    #[actix_web::test]
    async fn group_filters_distinguish_false_from_absent() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/groups").set_json(group("Open Trail", true)));
        call!(app, test::TestRequest::post().uri("/groups").set_json(group("Quiet Trail", false)));

        let (_, body) = call!(app, test::TestRequest::get().uri("/groups?allow_members_to_publish=false"));
        assert_eq!(names(&body), vec!["Quiet Trail"]);
        let (_, body) = call!(app, test::TestRequest::get().uri("/groups?name=TRAIL&admin=ana"));
        assert_eq!(names(&body).len(), 2);
    }

    #[actix_web::test]
    async fn threads_need_an_existing_parent() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        let thread = |parent: Value| json!({ "parents_id": parent, "text": "who's driving?", "user": "ana" });

        let (status, body) = call!(app, test::TestRequest::post().uri("/threads").set_json(thread(json!(1))));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Parent not found");

        call!(app, test::TestRequest::post().uri("/groups").set_json(group("Hikers", true)));
        let (status, created) = call!(app, test::TestRequest::post().uri("/threads").set_json(thread(json!("1"))));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["parents_id"], json!(1));
        assert!(created["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));

        let (_, body) = call!(app, test::TestRequest::get().uri("/threads?parents_id=1&text=DRIVING"));
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn messages_are_scoped_to_their_thread() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        for text in ["first", "second"] {
            call!(app, test::TestRequest::post().uri("/threads").set_json(json!({ "parents_id": 1, "text": text, "user": "ana" })));
        }

        let (status, body) = call!(app, test::TestRequest::post().uri("/threads/7/messages").set_json(json!({ "text": "hi", "user": "bo" })));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Thread not found");

        let (status, message) = call!(app, test::TestRequest::post().uri("/threads/1/messages").set_json(json!({ "text": "hi", "user": "bo", "timestamp": "2024-06-01T10:00:00Z" })));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message["thread_id"], json!(1));

        let (status, _) = call!(app, test::TestRequest::get().uri("/threads/2/messages/1"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, listed) = call!(app, test::TestRequest::get().uri("/threads/1/messages?timestamp_to=2024-06-01T23:59:59Z"));
        assert_eq!(listed, json!([message]));

        let (status, updated) = call!(app, test::TestRequest::put().uri("/threads/1/messages/1").set_json(json!({ "text": "hello", "user": "bo" })));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["text"], "hello");

        let (status, body) = call!(app, test::TestRequest::delete().uri("/threads/1/messages/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Message deleted successfully");
    }

    #[actix_web::test]
    async fn photos_store_bytes_and_check_references_first() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Ana", "email": "ana@example.com" })));

        let (status, body) = call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=a.png").set_payload("png-bytes"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Photo album not found");

        let (status, album) = call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(album, json!({ "id": 1, "event_id": 1 }));

        let (status, body) = call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=5&filename=a.png").set_payload("png-bytes"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
        let (_, listed) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo"));
        assert_eq!(listed, json!([]));

        let (status, photo) = call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=a.png").set_payload("png-bytes"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photo["content_type"], "image/png");
        assert_eq!(photo["size"], 9);

        let res = test::call_service(&app, test::TestRequest::get().uri("/photoalbum/1/photo/1").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("content-type").unwrap(), "image/png");
        assert_eq!(test::read_body(res).await, "png-bytes");

        let (_, info) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo/1/info"));
        assert_eq!(info, photo);

        let (_, view) = call!(app, test::TestRequest::get().uri("/photoalbum/1"));
        assert_eq!(view["photos"], json!([photo]));

        let (status, _) = call!(app, test::TestRequest::delete().uri("/photoalbum/1"));
        assert_eq!(status, StatusCode::OK);
        assert!(!dir.path().join("photos").join("1_1").exists());
        let (status, _) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo/1/info"));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn photo_replace_and_delete() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Ana", "email": "ana@example.com" })));
        call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=a.png").set_payload("v1"));

        let (status, body) = call!(app, test::TestRequest::put().uri("/photoalbum/1/photo/1?user_id=1&filename=b.gif").set_payload(""));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "photo payload must not be empty");

        let (status, photo) = call!(app, test::TestRequest::put().uri("/photoalbum/1/photo/1?user_id=1&filename=b.gif").set_payload("v2-bytes"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photo["id"], json!(1));
        assert_eq!(photo["content_type"], "image/gif");

        let res = test::call_service(&app, test::TestRequest::get().uri("/photoalbum/1/photo/1").to_request()).await;
        assert_eq!(test::read_body(res).await, "v2-bytes");

        let (status, body) = call!(app, test::TestRequest::delete().uri("/photoalbum/1/photo/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Photo deleted successfully");
        assert!(!dir.path().join("photos").join("1_1").exists());
    }

    #[actix_web::test]
    async fn failed_payload_writes_leave_metadata_alone() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Ana", "email": "ana@example.com" })));
        call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        let (_, photo) = call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=a.png").set_payload("v1"));

        let payload = dir.path().join("photos").join("1_1");
        std::fs::remove_file(&payload).unwrap();
        std::fs::create_dir(&payload).unwrap();

        let (status, _) = call!(app, test::TestRequest::put().uri("/photoalbum/1/photo/1?user_id=1&filename=b.gif").set_payload("v2-bytes"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, info) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo/1/info"));
        assert_eq!(info, photo);

        let (status, _) = call!(app, test::TestRequest::delete().uri("/photoalbum/1/photo/1"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, info) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo/1/info"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(info, photo);
    }

    #[actix_web::test]
    async fn photo_without_payload_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Ana", "email": "ana@example.com" })));
        call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=a.png").set_payload("v1"));
        std::fs::remove_file(dir.path().join("photos").join("1_1")).unwrap();

        let (status, body) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo/1"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Photo not found");
    }

    #[actix_web::test]
    async fn photo_search_by_owner_and_filename() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Ana", "email": "ana@example.com" })));
        call!(app, test::TestRequest::post().uri("/users").set_json(json!({ "name": "Bo", "email": "bo@example.com" })));
        call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=1&filename=Beach.png").set_payload("sand"));
        call!(app, test::TestRequest::post().uri("/photoalbum/1/photo?user_id=2&filename=city.png").set_payload("lights"));

        let filenames = |body: &Value| -> Vec<String> {
            body.as_array().unwrap().iter().map(|p| p["filename"].as_str().unwrap().to_string()).collect()
        };

        let (status, body) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo?user_id=2"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(filenames(&body), vec!["city.png"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo?filename=beach"));
        assert_eq!(filenames(&body), vec!["Beach.png"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/photoalbum/1/photo?user_id=1&filename=city"));
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn albums_are_listed_per_event() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Launch", false, "2024-06-01")));
        call!(app, test::TestRequest::post().uri("/events").set_json(event("Retro", false, "2024-07-01")));
        call!(app, test::TestRequest::post().uri("/events/1/photoalbum"));
        call!(app, test::TestRequest::post().uri("/events/2/photoalbum"));

        let (status, body) = call!(app, test::TestRequest::get().uri("/events/1/photoalbum"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": 1, "event_id": 1 }]));

        let (status, body) = call!(app, test::TestRequest::get().uri("/events/9/photoalbum"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Event not found");
    }

    #[actix_web::test]
    async fn threads_filter_by_timestamp_range() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/groups").set_json(group("Hikers", true)));
        for (text, timestamp) in [("early", "2024-01-05T08:00:00Z"), ("middle", "2024-03-01T12:00:00Z"), ("late", "2024-12-24T18:00:00Z")] {
            call!(app, test::TestRequest::post().uri("/threads").set_json(json!({ "parents_id": 1, "text": text, "user": "ana", "timestamp": timestamp })));
        }
        let texts = |body: &Value| -> Vec<String> {
            body.as_array().unwrap().iter().map(|t| t["text"].as_str().unwrap().to_string()).collect()
        };

        let (_, body) = call!(app, test::TestRequest::get().uri("/threads?timestamp_from=2024-02-01&timestamp_to=2024-06-30"));
        assert_eq!(texts(&body), vec!["middle"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/threads?timestamp_from=2024-02-01"));
        assert_eq!(texts(&body), vec!["middle", "late"]);

        let (_, body) = call!(app, test::TestRequest::get().uri("/threads?timestamp_to=2024-02-01"));
        assert_eq!(texts(&body), vec!["early"]);
    }

    #[actix_web::test]
    async fn threads_and_groups_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        call!(app, test::TestRequest::post().uri("/groups").set_json(group("Hikers", true)));
        call!(app, test::TestRequest::post().uri("/threads").set_json(json!({ "parents_id": 1, "text": "route?", "user": "ana" })));

        let (status, updated) = call!(app, test::TestRequest::put().uri("/groups/1").set_json(group("Climbers", false)));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], json!(1));
        let (_, read) = call!(app, test::TestRequest::get().uri("/groups/1"));
        assert_eq!(read["name"], "Climbers");
        assert_eq!(read["allow_members_to_publish"], false);

        let (status, body) = call!(app, test::TestRequest::put().uri("/threads/1").set_json(json!({ "parents_id": 7, "text": "route?", "user": "ana" })));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Parent not found");
        let (status, updated) = call!(app, test::TestRequest::put().uri("/threads/1").set_json(json!({ "parents_id": 1, "text": "north ridge", "user": "bo" })));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["text"], "north ridge");

        let (status, body) = call!(app, test::TestRequest::delete().uri("/threads/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Thread deleted successfully");
        let (status, _) = call!(app, test::TestRequest::get().uri("/threads/1"));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call!(app, test::TestRequest::delete().uri("/groups/1"));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Group deleted successfully");
        let (status, _) = call!(app, test::TestRequest::put().uri("/groups/1").set_json(group("Climbers", false)));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn users_are_stored_as_given() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        let user = json!({ "name": "", "email": "not-an-address" });

        let (status, created) = call!(app, test::TestRequest::post().uri("/users").set_json(&user));
        assert_eq!(status, StatusCode::OK);
        let (_, read) = call!(app, test::TestRequest::get().uri("/users/1"));
        assert_eq!(read, created);
        assert_eq!(read["email"], "not-an-address");
    }

    #[actix_web::test]
    async fn malformed_input_is_a_client_error() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);

        let (status, body) = call!(app, test::TestRequest::get().uri("/events/not-an-id"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().is_some());

        let (status, _) = call!(app, test::TestRequest::post().uri("/events").set_json(json!({ "name": "missing fields" })));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call!(app, test::TestRequest::get().uri("/events?is_private=maybe"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn uuid_ids_do_not_resolve_in_memory() {
        let dir = TempDir::new().unwrap();
        let app = app!(dir);
        let uri = format!("/users/{}", uuid::Uuid::new_v4());
        let (status, body) = call!(app, test::TestRequest::get().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }
}
