//! Database models - SQLx-compatible structs for PostgreSQL tables

mod bug;
mod guild;
mod media;
mod user;

pub use bug::{BugModel, BugStatusModel};
pub use guild::GuildModel;
pub use media::{MediaKindModel, MediaModel};
pub use user::UserModel;
