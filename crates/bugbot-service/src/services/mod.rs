//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! repositories and the chat platform for one area of the bot.

pub mod bug;
pub mod context;
pub mod error;
pub mod highlight;
pub mod identity;
pub mod permission;
pub mod settings;

pub use bug::BugService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ErrorCategory, ServiceError, ServiceResult};
pub use highlight::HighlightService;
pub use identity::{Identity, IdentityService};
pub use permission::PermissionService;
pub use settings::SettingsService;
