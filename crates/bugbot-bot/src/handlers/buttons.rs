//! Button handlers for the bug message controls and the draft prompt

use async_trait::async_trait;
use bugbot_core::entities::{Bug, BugStatus};
use bugbot_core::{family, parse_bug_id, ComponentPress};
use bugbot_service::dto::Resolved;
use bugbot_service::{render, BugService};
use tracing::info;

use super::{ButtonHandler, HandlerContext};
use crate::error::HandlerResult;
use crate::responder::Reply;

/// Resolve the bug behind a control on a bug message
///
/// Returns `None` after adopting a legacy report; the actor has then been
/// asked to press the button again.
async fn resolve_control(
    ctx: &HandlerContext<'_>,
    press: &ComponentPress,
    payload: &str,
) -> HandlerResult<Option<Bug>> {
    let bug_id = parse_bug_id(payload)?;
    let resolved = BugService::new(ctx.services)
        .resolve_for_component(ctx.identity, ctx.actor(), bug_id, &press.message)
        .await?;
    match resolved {
        Resolved::Existing(bug) => Ok(Some(bug)),
        Resolved::Adopted(bug) => {
            info!(legacy_id = bug_id, bug_id = bug.id, "Legacy bug adopted");
            ctx.responder
                .send(Reply::ephemeral(render::LEGACY_NOTICE))
                .await?;
            Ok(None)
        }
    }
}

async fn change_status(
    ctx: &HandlerContext<'_>,
    press: &ComponentPress,
    payload: &str,
    status: BugStatus,
) -> HandlerResult<()> {
    ctx.responder.defer_if_pending().await?;
    let Some(bug) = resolve_control(ctx, press, payload).await? else {
        return Ok(());
    };

    let bug = BugService::new(ctx.services)
        .set_status(
            ctx.identity,
            ctx.actor(),
            bug.id,
            status,
            press.message.channel_id,
        )
        .await?;
    ctx.responder
        .send(Reply::ephemeral(render::status_ack(bug.id, status)))
        .await?;
    Ok(())
}

/// `bugSolved-<id>`: close a bug
pub struct CloseBugButton;

#[async_trait]
impl ButtonHandler for CloseBugButton {
    fn family(&self) -> &'static str {
        family::BUG_SOLVED
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()> {
        change_status(ctx, press, payload, BugStatus::Closed).await
    }
}

/// `bugReopen-<id>`: reopen a closed bug
pub struct ReopenBugButton;

#[async_trait]
impl ButtonHandler for ReopenBugButton {
    fn family(&self) -> &'static str {
        family::BUG_REOPEN
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()> {
        change_status(ctx, press, payload, BugStatus::Open).await
    }
}

/// `bugEdit-<id>`: open the edit form
pub struct EditBugButton;

#[async_trait]
impl ButtonHandler for EditBugButton {
    fn family(&self) -> &'static str {
        family::BUG_EDIT
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()> {
        let Some(bug) = resolve_control(ctx, press, payload).await? else {
            return Ok(());
        };
        let form = BugService::new(ctx.services)
            .edit_form(ctx.identity, ctx.actor(), bug.id)
            .await?;
        ctx.responder.show_modal(form).await?;
        Ok(())
    }
}

/// `bugDelete-<id>`: delete a bug and its message
pub struct DeleteBugButton;

#[async_trait]
impl ButtonHandler for DeleteBugButton {
    fn family(&self) -> &'static str {
        family::BUG_DELETE
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()> {
        ctx.responder.defer_if_pending().await?;
        let Some(bug) = resolve_control(ctx, press, payload).await? else {
            return Ok(());
        };

        let bug = BugService::new(ctx.services)
            .delete(ctx.identity, ctx.actor(), bug.id, press.message.channel_id)
            .await?;
        ctx.responder
            .send(Reply::ephemeral(render::delete_ack(bug.id)))
            .await?;
        Ok(())
    }
}

/// `bug-<id>`: open the details form for a draft
pub struct AddDetailsButton;

#[async_trait]
impl ButtonHandler for AddDetailsButton {
    fn family(&self) -> &'static str {
        family::BUG
    }

    async fn execute(
        &self,
        ctx: &HandlerContext<'_>,
        _press: &ComponentPress,
        payload: &str,
    ) -> HandlerResult<()> {
        let bug_id = parse_bug_id(payload)?;
        let form = BugService::new(ctx.services)
            .details_form(ctx.identity, bug_id)
            .await?;
        ctx.responder.show_modal(form).await?;
        Ok(())
    }
}
