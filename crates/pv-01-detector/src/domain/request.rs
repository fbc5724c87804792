//! Detection requests

use std::path::Path;
use std::sync::Arc;

/// Media family; nodes route images and videos to different models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Unknown,
}

impl MediaKind {
    /// Guess from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        match extension(name).as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "tif" | "tiff") => {
                MediaKind::Image
            }
            Some("mp4" | "mov" | "avi" | "mkv" | "webm" | "m4v" | "mpeg" | "mpg") => {
                MediaKind::Video
            }
            _ => MediaKind::Unknown,
        }
    }
}

fn extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// MIME type sent with the upload. Nodes reject anything they cannot route.
pub fn mime_type_for(name: &str) -> &'static str {
    match extension(name).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("mpeg" | "mpg") => "video/mpeg",
        _ => "application/octet-stream",
    }
}

/// Content handed to every node of a consensus round.
///
/// Bytes are shared, so fanning out to N nodes does not copy the payload N times
/// until each request body is built.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    bytes: Arc<[u8]>,
    file_name: String,
    mime_type: String,
}

impl DetectionRequest {
    pub fn new(bytes: impl Into<Arc<[u8]>>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).to_string();
        Self {
            bytes: bytes.into(),
            file_name,
            mime_type,
        }
    }

    /// Override the guessed MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn media_kind(&self) -> MediaKind {
        if self.mime_type.starts_with("image/") {
            MediaKind::Image
        } else if self.mime_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::from_file_name(&self.file_name)
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
