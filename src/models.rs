use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    db::{Collection, RecordId},
    service::resource::Resource,
};

pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub cover_photo: String,
    pub is_private: bool,
    #[serde(default)]
    pub organizers: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub polls: Vec<String>,
}

impl Resource for Event {
    const NAME: &'static str = "Event";
    const COLLECTION: Collection = Collection { name: "events", unique: &[] };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub description: String,
    pub icon: String,
    pub cover_photo: String,
    /// `public`, `private` or `secret`; stored as given.
    pub group_type: String,
    pub allow_members_to_publish: bool,
    pub allow_members_to_create_events: bool,
    #[serde(default)]
    pub admin: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Resource for Group {
    const NAME: &'static str = "Group";
    const COLLECTION: Collection = Collection { name: "groups", unique: &[] };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

impl Resource for User {
    const NAME: &'static str = "User";
    const COLLECTION: Collection = Collection { name: "users", unique: &["email"] };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// An event or a group.
    pub parents_id: RecordId,
    pub text: String,
    pub user: String,
    #[serde(default = "now_timestamp")]
    pub timestamp: String,
}

impl Resource for Thread {
    const NAME: &'static str = "Thread";
    const COLLECTION: Collection = Collection { name: "threads", unique: &[] };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub thread_id: RecordId,
    pub text: String,
    pub user: String,
    pub timestamp: String,
}

impl Resource for Message {
    const NAME: &'static str = "Message";
    const COLLECTION: Collection = Collection { name: "messages", unique: &[] };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAlbum {
    pub event_id: RecordId,
}

impl Resource for PhotoAlbum {
    const NAME: &'static str = "Photo album";
    const COLLECTION: Collection = Collection { name: "photo_albums", unique: &[] };
}

/// Metadata of a stored photo. The bytes live in the photo sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub photo_album_id: RecordId,
    pub user_id: RecordId,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}

impl Resource for Photo {
    const NAME: &'static str = "Photo";
    const COLLECTION: Collection = Collection { name: "photos", unique: &[] };
}

pub const COLLECTIONS: [Collection; 7] = [
    Event::COLLECTION,
    Group::COLLECTION,
    User::COLLECTION,
    Thread::COLLECTION,
    Message::COLLECTION,
    PhotoAlbum::COLLECTION,
    Photo::COLLECTION,
];
