//! # bugbot-service
//!
//! Application layer: identity provisioning, the authorization policy, the
//! bug report lifecycle with its remote message sync, guild settings and
//! highlight clips.

pub mod dto;
pub mod render;
pub mod services;

pub use services::{
    BugService, ErrorCategory, HighlightService, Identity, IdentityService, PermissionService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings,
    SettingsService,
};
