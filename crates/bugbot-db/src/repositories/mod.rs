//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in bugbot-core.
//! Each repository handles database operations for a specific domain entity.

mod bug;
mod error;
mod guild;
mod media;
mod user;

pub use bug::PgBugRepository;
pub use guild::PgGuildRepository;
pub use media::PgMediaRepository;
pub use user::PgUserRepository;
