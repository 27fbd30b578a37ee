//! Request DTOs
//!
//! Inputs from the report command and the bug forms. Both implement
//! `Validate`; the `check` methods turn validator output into the matching
//! domain error.

use bugbot_core::{DomainError, ModalSubmission, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, MIN_TITLE_LEN};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Custom id of the title input on bug forms
pub const TITLE_FIELD: &str = "title";
/// Custom id of the description input on bug forms
pub const DESCRIPTION_FIELD: &str = "description";

const BLANK: &str = "blank";

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(BLANK));
    }
    Ok(())
}

fn has_blank(errors: &ValidationErrors) -> bool {
    errors
        .field_errors()
        .values()
        .any(|errs| errs.iter().any(|e| e.code == BLANK))
}

// ============================================================================
// Report command
// ============================================================================

/// `/bug report` input
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DraftRequest {
    #[validate(
        custom(function = "not_blank"),
        length(min = 8, max = 256, message = "Title must be 8-256 characters")
    )]
    pub title: String,
}

impl DraftRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Validate into a domain error
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(|errors| {
            if has_blank(&errors) {
                DomainError::ValidationError("Please provide a title.".to_string())
            } else {
                DomainError::TitleLength {
                    min: MIN_TITLE_LEN,
                    max: MAX_TITLE_LEN,
                }
            }
        })
    }
}

// ============================================================================
// Bug forms
// ============================================================================

/// Details and edit form submission
///
/// The same rules apply when publishing and when editing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct BugForm {
    #[validate(custom(function = "not_blank"), length(max = 256))]
    pub title: String,

    #[validate(custom(function = "not_blank"), length(max = 4000))]
    pub description: String,
}

impl BugForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Read the title and description inputs of a submitted modal.
    /// Missing inputs read as empty and fail validation.
    pub fn from_modal(modal: &ModalSubmission) -> Self {
        Self::new(
            modal.field(TITLE_FIELD).unwrap_or_default(),
            modal.field(DESCRIPTION_FIELD).unwrap_or_default(),
        )
    }

    /// Validate into a domain error
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate().map_err(|errors| {
            if has_blank(&errors) {
                DomainError::MissingFields
            } else {
                DomainError::ReportTooLong {
                    title_max: MAX_TITLE_LEN,
                    description_max: MAX_DESCRIPTION_LEN,
                }
            }
        })
    }
}
