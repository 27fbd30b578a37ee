//! Value objects - immutable types that represent domain concepts

mod custom_id;
mod permissions;
mod snowflake;

pub use custom_id::{bug_custom_id, family, parse_bug_id, CustomId, CUSTOM_ID_DELIMITER};
pub use permissions::Permissions;
pub use snowflake::{Snowflake, SnowflakeParseError};
