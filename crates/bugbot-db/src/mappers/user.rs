//! User entity <-> model mapper

use bugbot_core::entities::User;
use bugbot_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            user_id: Snowflake::new(model.user_id),
            guild_id: Snowflake::new(model.guild_id),
            created_at: model.created_at,
        }
    }
}
