//! Bug entity <-> model mapper

use bugbot_core::entities::{Bug, BugStatus};
use bugbot_core::value_objects::Snowflake;

use crate::models::{BugModel, BugStatusModel};

impl From<BugStatusModel> for BugStatus {
    fn from(model: BugStatusModel) -> Self {
        match model {
            BugStatusModel::Open => BugStatus::Open,
            BugStatusModel::Closed => BugStatus::Closed,
        }
    }
}

impl From<BugStatus> for BugStatusModel {
    fn from(status: BugStatus) -> Self {
        match status {
            BugStatus::Open => BugStatusModel::Open,
            BugStatus::Closed => BugStatusModel::Closed,
        }
    }
}

/// Convert BugModel to Bug entity
impl From<BugModel> for Bug {
    fn from(model: BugModel) -> Self {
        Bug {
            id: model.id,
            user_id: model.user_id,
            status: model.status.into(),
            title: model.title,
            description: model.description,
            sent: model.sent,
            message_id: model.message_id.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}
