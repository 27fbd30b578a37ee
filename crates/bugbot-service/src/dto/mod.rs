//! Data transfer objects for service inputs and outputs
//!
//! This module provides:
//! - Request DTOs with validation for form and command inputs
//! - Response DTOs describing what a lifecycle step produced

pub mod requests;
pub mod responses;

pub use requests::{BugForm, DraftRequest, DESCRIPTION_FIELD, TITLE_FIELD};
pub use responses::{BugReference, Draft, Highlight, Published, Resolved};
