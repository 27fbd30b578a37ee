//! Ports implemented by the infrastructure crates

mod repositories;

pub use repositories::{BugRepository, GuildRepository, MediaRepository, RepoResult, UserRepository};
