//! Response DTOs
//!
//! What each lifecycle step produced, for handlers to turn into replies.

use bugbot_core::entities::{Bug, Media};
use bugbot_core::Snowflake;

/// A freshly created draft and its stored attachment
#[derive(Debug, Clone)]
pub struct Draft {
    pub bug: Bug,
    pub media: Option<Media>,
}

/// A published bug and where it lives
#[derive(Debug, Clone)]
pub struct Published {
    pub bug: Bug,
    pub message_url: String,
    /// Discussion thread link; `None` when the thread could not be started
    pub thread_url: Option<String>,
}

/// A bug looked up for a button press
#[derive(Debug, Clone)]
pub enum Resolved {
    /// The bug behind the control
    Existing(Bug),
    /// A legacy embed-only report that was just adopted
    Adopted(Bug),
}

/// Short reference to a published bug, for the `bug#<id>` shortcut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugReference {
    pub bug_id: i64,
    pub title: String,
    pub reporter: Snowflake,
    pub url: String,
}

/// A posted highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub url: String,
    /// Attachments that were re-uploaded
    pub uploaded: usize,
    /// Attachments skipped for size or download failure
    pub skipped: usize,
}
