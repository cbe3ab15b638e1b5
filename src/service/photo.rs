use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::{
    blobs::BlobError,
    db::RecordId,
    dto::{Page, PhotoQuery, PhotoUploadDto},
    errors::ApiError,
    filter::FilterSpec,
    models::{Event, Photo, PhotoAlbum},
    state::AppState,
};

use super::{
    resource::{Record, Resource, ResourceStore},
    user,
};

/// An album as returned to callers, with its photos' metadata attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumView {
    #[serde(flatten)]
    pub album: Record<PhotoAlbum>,
    pub photos: Vec<Record<Photo>>,
}

fn albums(state: &AppState) -> ResourceStore<'_, PhotoAlbum> {
    ResourceStore::new(&state.backend)
}

fn photos(state: &AppState) -> ResourceStore<'_, Photo> {
    ResourceStore::new(&state.backend)
}

pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "image/jpeg",
    }
}

fn album_filter(album_id: RecordId) -> FilterSpec {
    FilterSpec::new().equals("photo_album_id", Some(album_id))
}

async fn ensure_album(album_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    if albums(state).exists(album_id).await? {
        Ok(())
    } else {
        Err(ApiError::ParentNotFound(PhotoAlbum::NAME))
    }
}

async fn ensure_user(user_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    if user::exists(user_id, state).await? {
        Ok(())
    } else {
        Err(ApiError::ParentNotFound("User"))
    }
}

/// Checks album, photo membership, and returns the stored metadata.
async fn load(album_id: RecordId, photo_id: RecordId, state: &AppState) -> Result<Record<Photo>, ApiError> {
    ensure_album(album_id, state).await?;
    let photo = photos(state).read(photo_id).await?;
    if photo.fields.photo_album_id == album_id {
        Ok(photo)
    } else {
        Err(ApiError::NotFound("Photo"))
    }
}

fn metadata(album_id: RecordId, upload: PhotoUploadDto, data: &[u8]) -> Result<Photo, ApiError> {
    if data.is_empty() {
        return Err(ApiError::BadClientData("photo payload must not be empty".to_string()));
    }
    if upload.filename.trim().is_empty() {
        return Err(ApiError::BadClientData("filename must not be empty".to_string()));
    }
    Ok(Photo {
        photo_album_id: album_id,
        user_id: upload.user_id,
        content_type: content_type_for(&upload.filename).to_string(),
        filename: upload.filename,
        size: data.len() as u64,
    })
}

pub async fn create_album(event_id: RecordId, state: &AppState) -> Result<Record<PhotoAlbum>, ApiError> {
    if !ResourceStore::<Event>::new(&state.backend).exists(event_id).await? {
        return Err(ApiError::ParentNotFound("Event"));
    }
    albums(state).create(PhotoAlbum { event_id }).await
}

pub async fn albums_for_event(event_id: RecordId, page: Page, state: &AppState) -> Result<Vec<Record<PhotoAlbum>>, ApiError> {
    if !ResourceStore::<Event>::new(&state.backend).exists(event_id).await? {
        return Err(ApiError::ParentNotFound("Event"));
    }
    let filter = FilterSpec::new().equals("event_id", Some(event_id));
    albums(state).search(&filter, page).await
}

pub async fn get_album(album_id: RecordId, state: &AppState) -> Result<AlbumView, ApiError> {
    let album = albums(state).read(album_id).await?;
    let photos = photos(state).search(&album_filter(album_id), Page::all()).await?;
    Ok(AlbumView { album, photos })
}

/// Deletes the album, then its photos and their payloads.
pub async fn delete_album(album_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    albums(state).delete(album_id).await?;
    let removed = photos(state).delete_matching(&album_filter(album_id)).await?;
    for photo_id in removed {
        if let Err(err) = state.photos.remove(album_id, photo_id).await {
            warn!("orphaned payload for photo {}: {}", photo_id, err);
        }
    }
    Ok(())
}

pub async fn create_photo(
    album_id: RecordId,
    upload: PhotoUploadDto,
    data: &[u8],
    state: &AppState,
) -> Result<Record<Photo>, ApiError> {
    ensure_album(album_id, state).await?;
    ensure_user(upload.user_id, state).await?;
    let photo = metadata(album_id, upload, data)?;

    let record = photos(state).create(photo).await?;
    if let Err(err) = state.photos.write(album_id, record.id, data).await {
        error!("failed to store payload of photo {}: {}", record.id, err);
        if let Err(rollback) = photos(state).delete(record.id).await {
            warn!("photo {} left without payload: {}", record.id, rollback);
        }
        return Err(err.into());
    }
    Ok(record)
}

pub async fn get_photo(album_id: RecordId, photo_id: RecordId, state: &AppState) -> Result<Record<Photo>, ApiError> {
    load(album_id, photo_id, state).await
}

pub async fn get_photo_bytes(
    album_id: RecordId,
    photo_id: RecordId,
    state: &AppState,
) -> Result<(Record<Photo>, Vec<u8>), ApiError> {
    let photo = load(album_id, photo_id, state).await?;
    let data = match state.photos.read(album_id, photo_id).await {
        Ok(data) => data,
        Err(BlobError::NotFound(name)) => {
            warn!("photo {} has metadata but no payload {}", photo_id, name);
            return Err(ApiError::NotFound("Photo"));
        }
        Err(err) => return Err(err.into()),
    };
    Ok((photo, data))
}

pub async fn update_photo(
    album_id: RecordId,
    photo_id: RecordId,
    upload: PhotoUploadDto,
    data: &[u8],
    state: &AppState,
) -> Result<Record<Photo>, ApiError> {
    load(album_id, photo_id, state).await?;
    ensure_user(upload.user_id, state).await?;
    let photo = metadata(album_id, upload, data)?;

    // Bytes go first so a failed write leaves the stored metadata untouched.
    let previous = state.photos.read(album_id, photo_id).await.ok();
    state.photos.write(album_id, photo_id, data).await?;
    match photos(state).update(photo_id, photo).await {
        Ok(record) => Ok(record),
        Err(err) => {
            let restored = match previous {
                Some(bytes) => state.photos.write(album_id, photo_id, &bytes).await,
                None => state.photos.remove(album_id, photo_id).await,
            };
            if let Err(restore) = restored {
                warn!("payload of photo {} no longer matches its metadata: {}", photo_id, restore);
            }
            Err(err)
        }
    }
}

pub async fn delete_photo(album_id: RecordId, photo_id: RecordId, state: &AppState) -> Result<(), ApiError> {
    load(album_id, photo_id, state).await?;
    state.photos.remove(album_id, photo_id).await?;
    photos(state).delete(photo_id).await
}

pub async fn search_photos(album_id: RecordId, query: PhotoQuery, state: &AppState) -> Result<Vec<Record<Photo>>, ApiError> {
    ensure_album(album_id, state).await?;
    let page = query.page();
    photos(state).search(&query.into_filter(album_id), page).await
}
