//! Guild entity <-> model mapper

use bugbot_core::entities::Guild;
use bugbot_core::value_objects::Snowflake;

use crate::models::GuildModel;

/// Convert GuildModel to Guild entity
impl From<GuildModel> for Guild {
    fn from(model: GuildModel) -> Self {
        Guild {
            id: model.id,
            guild_id: Snowflake::new(model.guild_id),
            bug_channel: model.bug_channel.map(Snowflake::new),
            highlights_channel: model.highlights_channel.map(Snowflake::new),
            suggestion_forum: model.suggestion_forum.map(Snowflake::new),
            commands_channel: model.commands_channel.map(Snowflake::new),
            announcements_channel: model.announcements_channel.map(Snowflake::new),
            manager_roles: model.manager_roles.0.into_iter().map(Snowflake::new).collect(),
            created_at: model.created_at,
        }
    }
}
