//! Modal handlers for the details and edit forms

use async_trait::async_trait;
use bugbot_core::{family, parse_bug_id, ModalSubmission};
use bugbot_service::dto::BugForm;
use bugbot_service::{render, BugService};

use super::{HandlerContext, ModalHandler};
use crate::error::HandlerResult;
use crate::responder::Reply;

/// `bug-<id>`: details form submission, publishes the draft
pub struct BugDetailsModal;

#[async_trait]
impl ModalHandler for BugDetailsModal {
    fn family(&self) -> &'static str {
        family::BUG
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        submission: &ModalSubmission,
        payload: &str,
    ) -> HandlerResult<()> {
        let bug_id = parse_bug_id(payload)?;
        let form = BugForm::from_modal(submission);

        ctx.responder.defer_if_pending().await?;
        let published = BugService::new(ctx.services)
            .publish(ctx.identity, ctx.actor(), bug_id, form)
            .await?;
        ctx.responder
            .send(Reply::ephemeral(render::publish_ack(&published)))
            .await?;
        Ok(())
    }
}

/// `editBug-<id>`: edit form submission
pub struct EditBugModal;

#[async_trait]
impl ModalHandler for EditBugModal {
    fn family(&self) -> &'static str {
        family::EDIT_BUG
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        submission: &ModalSubmission,
        payload: &str,
    ) -> HandlerResult<()> {
        let bug_id = parse_bug_id(payload)?;
        let form = BugForm::from_modal(submission);
        ctx.responder.defer_if_pending().await?;

        // Edit forms are opened from the bug message, so the submission
        // arrives in the channel holding it
        BugService::new(ctx.services)
            .edit(
                ctx.identity,
                ctx.actor(),
                bug_id,
                form,
                ctx.interaction.channel_id,
            )
            .await?;
        ctx.responder
            .send(Reply::ephemeral(render::EDITED_NOTICE))
            .await?;
        Ok(())
    }
}
