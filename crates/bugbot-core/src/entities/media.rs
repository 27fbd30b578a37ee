//! Media entity - an image or video attached to a bug report

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of stored media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Map an attachment content type to a supported kind
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(Self::Image),
            "video/mp4" => Some(Self::Video),
            _ => None,
        }
    }

    /// Database enum label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// File name used when re-uploading the bytes
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Image => "image.png",
            Self::Video => "video.mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored media blob
#[derive(Clone, PartialEq, Eq)]
pub struct Media {
    pub id: i64,
    pub kind: MediaKind,
    pub data: Vec<u8>,
    /// Internal id of the uploading user
    pub user_id: i64,
    pub bug_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Media {
    pub fn new(id: i64, kind: MediaKind, data: Vec<u8>, user_id: i64, bug_id: Option<i64>) -> Self {
        Self {
            id,
            kind,
            data,
            user_id,
            bug_id,
            created_at: Utc::now(),
        }
    }
}

// Skip the payload bytes in debug output
impl fmt::Debug for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Media")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("bytes", &self.data.len())
            .field("user_id", &self.user_id)
            .field("bug_id", &self.bug_id)
            .finish()
    }
}
