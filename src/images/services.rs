use anyhow::Context;
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    storage::StorageClient,
};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "image";

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

/// Validates the image and writes it under a fresh filename, which is returned.
pub async fn store_image(
    storage: &dyn StorageClient,
    max_bytes: usize,
    img: UploadItem,
) -> ApiResult<String> {
    let ext = ext_from_mime(&img.content_type).ok_or_else(|| {
        ApiError::validation(format!("Unsupported image type {}", img.content_type))
    })?;
    if img.body.is_empty() {
        return Err(ApiError::validation("Image is empty"));
    }
    if img.body.len() > max_bytes {
        return Err(ApiError::validation(format!(
            "Image exceeds {max_bytes} bytes"
        )));
    }

    let key = unique_filename(ext);
    let size = img.body.len();
    storage
        .put_object(&key, img.body, &img.content_type)
        .await
        .with_context(|| format!("put_object {key}"))?;
    info!(%key, size, "image stored");
    Ok(key)
}

/// Best-effort removal of an image whose record was never written.
pub async fn discard_image(storage: &dyn StorageClient, key: &str) {
    if let Err(e) = storage.delete_object(key).await {
        warn!(error = %e, %key, "failed to remove orphaned image");
    }
}

fn unique_filename(ext: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    format!("{}-{}.{}", millis, Uuid::new_v4().simple(), ext)
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
