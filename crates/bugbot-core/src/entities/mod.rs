//! Domain entities - core business objects

mod bug;
mod guild;
mod media;
mod user;

pub use bug::{Bug, BugStatus, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, MIN_TITLE_LEN};
pub use guild::{Guild, GuildChannel};
pub use media::{Media, MediaKind};
pub use user::User;
