//! Bug entity - a bug report and its lifecycle rules

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum title length, in characters
pub const MAX_TITLE_LEN: usize = 256;
/// Minimum title length accepted by the report command
pub const MIN_TITLE_LEN: usize = 8;
/// Maximum description length, in characters
pub const MAX_DESCRIPTION_LEN: usize = 4000;

/// Open/closed state of a sent bug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BugStatus {
    #[default]
    Open,
    Closed,
}

impl BugStatus {
    /// Database enum label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BugStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(DomainError::ValidationError(format!(
                "unknown bug status: {other}"
            ))),
        }
    }
}

/// Bug report record
///
/// A draft has `sent == false` and no `message_id`; a published bug has both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    pub id: i64,
    /// Internal id of the owning guild-scoped user
    pub user_id: i64,
    pub status: BugStatus,
    pub title: String,
    pub description: String,
    pub sent: bool,
    /// Remote message mirroring this report
    pub message_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Bug {
    /// Create a draft
    pub fn draft(id: i64, user_id: i64, title: String, description: String) -> Self {
        Self {
            id,
            user_id,
            status: BugStatus::Open,
            title,
            description,
            sent: false,
            message_id: None,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        !self.sent
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == BugStatus::Open
    }

    /// Check if a guild-scoped user owns this bug
    #[inline]
    pub fn is_owned_by(&self, user_row_id: i64) -> bool {
        self.user_id == user_row_id
    }

    /// Ensure the bug has been published
    pub fn ensure_sent(&self) -> Result<(), DomainError> {
        if self.sent {
            Ok(())
        } else {
            Err(DomainError::BugNotSent(self.id))
        }
    }

    /// Ensure the bug is still a draft
    pub fn ensure_draft(&self) -> Result<(), DomainError> {
        if self.sent {
            Err(DomainError::BugAlreadySent(self.id))
        } else {
            Ok(())
        }
    }

    /// Check that moving to `target` is a legal status transition
    pub fn check_transition(&self, target: BugStatus) -> Result<(), DomainError> {
        self.ensure_sent()?;
        match (self.status, target) {
            (BugStatus::Open, BugStatus::Open) => Err(DomainError::BugAlreadyOpen(self.id)),
            (BugStatus::Closed, BugStatus::Closed) => Err(DomainError::BugAlreadyClosed(self.id)),
            _ => Ok(()),
        }
    }

    /// Mark as published against a remote message
    pub fn publish(
        &mut self,
        title: String,
        description: String,
        message_id: Snowflake,
    ) -> Result<(), DomainError> {
        self.ensure_draft()?;
        self.title = title;
        self.description = description;
        self.sent = true;
        self.message_id = Some(message_id);
        Ok(())
    }

    /// Apply a legal status transition
    pub fn transition(&mut self, target: BugStatus) -> Result<(), DomainError> {
        self.check_transition(target)?;
        self.status = target;
        Ok(())
    }
}
