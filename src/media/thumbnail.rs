use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;
use tokio::task;
use tracing::{debug, warn};

use crate::catalog::{CatalogClient, CatalogError};

/// Shown in place of any photo whose asset fails to load
pub const FALLBACK_IMAGE_URL: &str = "https://via.placeholder.com/150?text=Image+Not+Found";

/// Longest edge of a decoded photo. Larger renditions are downsized.
const THUMBNAIL_SIZE: u32 = 1080;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("could not download image")]
    Fetch(#[from] CatalogError),
    #[error("could not decode image")]
    Decode(#[from] image::ImageError),
    #[error("decode task failed")]
    Join(#[from] task::JoinError),
}

/// Load state of one image asset
#[derive(Debug, Clone)]
pub enum Thumbnail {
    Loading,
    Ready(Handle),
    Failed,
}

/// What the view should draw for a URL
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The photo itself, or the placeholder standing in for it
    Image(Handle),
    /// Still downloading
    Pending,
    /// Both the photo and the placeholder failed
    Broken,
}

/// Decoded image handles keyed by URL.
///
/// Every URL is requested at most once. A failed URL stays failed and is
/// drawn with the placeholder; the placeholder itself is also requested at
/// most once.
#[derive(Debug, Default)]
pub struct ThumbnailCache {
    entries: HashMap<String, Thumbnail>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `url`. Returns `true` if the caller should start
    /// a download; `false` if the URL is already known.
    ///
    /// An empty URL fails immediately without a request.
    pub fn request(&mut self, url: &str) -> bool {
        if self.entries.contains_key(url) {
            return false;
        }

        if url.is_empty() {
            self.entries.insert(String::new(), Thumbnail::Failed);
            return false;
        }

        self.entries.insert(url.to_string(), Thumbnail::Loading);
        true
    }

    /// Record the outcome of a download.
    pub fn loaded<E: Display>(&mut self, url: &str, result: Result<Handle, E>) {
        let entry = match result {
            Ok(handle) => {
                debug!(url, "📸 image ready");
                Thumbnail::Ready(handle)
            }
            Err(error) => {
                warn!(url, %error, "image failed to load, using placeholder");
                Thumbnail::Failed
            }
        };
        self.entries.insert(url.to_string(), entry);
    }

    /// Whether any known URL has failed and needs the placeholder
    pub fn needs_placeholder(&self) -> bool {
        self.entries.values().any(|entry| matches!(entry, Thumbnail::Failed))
    }

    #[cfg(test)]
    pub fn get(&self, url: &str) -> Option<&Thumbnail> {
        self.entries.get(url)
    }

    pub fn resolve(&self, url: &str) -> Resolved {
        match self.entries.get(url) {
            Some(Thumbnail::Ready(handle)) => Resolved::Image(handle.clone()),
            Some(Thumbnail::Failed) => match self.entries.get(FALLBACK_IMAGE_URL) {
                Some(Thumbnail::Ready(handle)) => Resolved::Image(handle.clone()),
                Some(Thumbnail::Failed) => Resolved::Broken,
                Some(Thumbnail::Loading) | None => Resolved::Pending,
            },
            Some(Thumbnail::Loading) | None => Resolved::Pending,
        }
    }
}

/// Download, decode and downsize one image asset
pub async fn load_thumbnail(client: CatalogClient, url: String) -> Result<Handle, ThumbnailError> {
    let bytes = client.fetch_bytes(&url).await?;

    // Spawn blocking because decoding a full JPEG is CPU-intensive
    let (width, height, pixels) = task::spawn_blocking(move || decode_and_resize(&bytes)).await??;

    Ok(Handle::from_rgba(width, height, pixels))
}

/// Decode an encoded image and fit it within THUMBNAIL_SIZE, returning RGBA8
fn decode_and_resize(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), image::ImageError> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
        img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok((rgba.width(), rgba.height(), rgba.into_raw()))
}
