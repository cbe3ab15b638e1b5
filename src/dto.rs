use serde::Deserialize;

use crate::{db::RecordId, filter::FilterSpec, models::now_timestamp};

const DEFAULT_LIMIT: u64 = 10;

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: u64::MAX,
        }
    }
}

// Query structs repeat `skip`/`limit` instead of flattening a shared struct:
// flattened fields lose their types under query-string decoding.

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub is_private: Option<bool>,
    pub start_date_from: Option<String>,
    pub start_date_to: Option<String>,
    pub end_date_from: Option<String>,
    pub end_date_to: Option<String>,
    pub organizers: Option<String>,
    pub members: Option<String>,
    pub polls: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl EventQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    pub fn into_filter(self) -> FilterSpec {
        FilterSpec::new()
            .contains("name", self.name)
            .contains("description", self.description)
            .contains("location", self.location)
            .equals("is_private", self.is_private)
            .range("start_date", self.start_date_from, self.start_date_to)
            .range("end_date", self.end_date_from, self.end_date_to)
            .member("organizers", self.organizers)
            .member("members", self.members)
            .member("polls", self.polls)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GroupQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub group_type: Option<String>,
    pub allow_members_to_publish: Option<bool>,
    pub allow_members_to_create_events: Option<bool>,
    pub admin: Option<String>,
    pub members: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl GroupQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    pub fn into_filter(self) -> FilterSpec {
        FilterSpec::new()
            .contains("name", self.name)
            .contains("description", self.description)
            .contains("group_type", self.group_type)
            .equals("allow_members_to_publish", self.allow_members_to_publish)
            .equals("allow_members_to_create_events", self.allow_members_to_create_events)
            .member("admin", self.admin)
            .member("members", self.members)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl UserQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    pub fn into_filter(self) -> FilterSpec {
        FilterSpec::new()
            .contains("name", self.name)
            .contains("email", self.email)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ThreadQuery {
    pub parents_id: Option<RecordId>,
    pub text: Option<String>,
    pub user: Option<String>,
    pub timestamp_from: Option<String>,
    pub timestamp_to: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl ThreadQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    pub fn into_filter(self) -> FilterSpec {
        FilterSpec::new()
            .equals("parents_id", self.parents_id)
            .contains("text", self.text)
            .equals("user", self.user)
            .range("timestamp", self.timestamp_from, self.timestamp_to)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub text: Option<String>,
    pub user: Option<String>,
    pub timestamp_from: Option<String>,
    pub timestamp_to: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl MessageQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    /// Search within one thread.
    pub fn into_filter(self, thread_id: RecordId) -> FilterSpec {
        FilterSpec::new()
            .equals("thread_id", Some(thread_id))
            .contains("text", self.text)
            .equals("user", self.user)
            .range("timestamp", self.timestamp_from, self.timestamp_to)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PhotoQuery {
    pub user_id: Option<RecordId>,
    pub filename: Option<String>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PhotoQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }

    /// Search within one album.
    pub fn into_filter(self, album_id: RecordId) -> FilterSpec {
        FilterSpec::new()
            .equals("photo_album_id", Some(album_id))
            .equals("user_id", self.user_id)
            .contains("filename", self.filename)
    }
}

/// Paging only; used by listings whose scope comes from the path.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page { skip: self.skip, limit: self.limit }
    }
}

/// Message body; the thread comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessageDto {
    pub text: String,
    pub user: String,
    #[serde(default = "now_timestamp")]
    pub timestamp: String,
}

/// Photo metadata passed as query parameters alongside the raw image body.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoUploadDto {
    pub user_id: RecordId,
    pub filename: String,
}
