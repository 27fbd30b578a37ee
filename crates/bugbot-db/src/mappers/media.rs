//! Media entity <-> model mapper

use bugbot_core::entities::{Media, MediaKind};

use crate::models::{MediaKindModel, MediaModel};

impl From<MediaKindModel> for MediaKind {
    fn from(model: MediaKindModel) -> Self {
        match model {
            MediaKindModel::Image => MediaKind::Image,
            MediaKindModel::Video => MediaKind::Video,
        }
    }
}

impl From<MediaKind> for MediaKindModel {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Image => MediaKindModel::Image,
            MediaKind::Video => MediaKindModel::Video,
        }
    }
}

/// Convert MediaModel to Media entity
impl From<MediaModel> for Media {
    fn from(model: MediaModel) -> Self {
        Media {
            id: model.id,
            kind: model.media_type.into(),
            data: model.data,
            user_id: model.user_id,
            bug_id: model.bug_id,
            created_at: model.created_at,
        }
    }
}
