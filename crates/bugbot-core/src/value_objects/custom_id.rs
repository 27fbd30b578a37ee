//! Component custom ids
//!
//! Buttons and modals carry an opaque `custom_id` of the form
//! `<family>-<payload>`. The family selects the handler; the payload is
//! handler-defined and usually a bug id.

use std::fmt;

use crate::error::DomainError;

/// Delimiter between the family and the payload
pub const CUSTOM_ID_DELIMITER: char = '-';

/// Handler families used by the bug report flow
pub mod family {
    /// "Add Details" button on a draft, and the details modal it opens
    pub const BUG: &str = "bug";
    /// Edit modal submission
    pub const EDIT_BUG: &str = "editBug";
    /// Close control
    pub const BUG_SOLVED: &str = "bugSolved";
    /// Reopen control
    pub const BUG_REOPEN: &str = "bugReopen";
    /// Edit control (opens the edit modal)
    pub const BUG_EDIT: &str = "bugEdit";
    /// Delete control
    pub const BUG_DELETE: &str = "bugDelete";
}

/// A parsed `custom_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomId<'a> {
    discriminator: &'a str,
    payload: &'a str,
}

impl<'a> CustomId<'a> {
    /// Split a raw custom id at the first delimiter.
    ///
    /// A raw id without a delimiter is all discriminator with an empty payload.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once(CUSTOM_ID_DELIMITER) {
            Some((discriminator, payload)) => Self {
                discriminator,
                payload,
            },
            None => Self {
                discriminator: raw,
                payload: "",
            },
        }
    }

    /// The routing key
    pub fn discriminator(&self) -> &'a str {
        self.discriminator
    }

    /// Everything after the first delimiter, uninterpreted
    pub fn payload(&self) -> &'a str {
        self.payload
    }

    /// Interpret the payload as a bug id
    pub fn bug_id(&self) -> Result<i64, DomainError> {
        parse_bug_id(self.payload)
    }
}

impl fmt::Display for CustomId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.payload.is_empty() {
            write!(f, "{}", self.discriminator)
        } else {
            write!(f, "{}{CUSTOM_ID_DELIMITER}{}", self.discriminator, self.payload)
        }
    }
}

/// Build a custom id for a bug-scoped component
pub fn bug_custom_id(family: &str, bug_id: i64) -> String {
    format!("{family}{CUSTOM_ID_DELIMITER}{bug_id}")
}

/// Parse a bug id payload
pub fn parse_bug_id(payload: &str) -> Result<i64, DomainError> {
    payload
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| DomainError::InvalidCustomId(payload.to_string()))
}
