//! Bug lifecycle scenarios driven through the interaction router
//!
//! Each test builds its own `TestBot`, so no shared state or external
//! services are involved.

use bugbot_core::entities::{Bug, BugStatus};
use bugbot_core::{family, Embed, EmbedAuthor, RemoteMessage, Snowflake};
use bugbot_service::render::{DRAFT_PROMPT, EDITED_NOTICE, LEGACY_NOTICE};
use integration_tests::*;

fn first_button(stored: &StoredMessage) -> String {
    stored.components[0][0].custom_id.clone()
}

// ============================================================================
// Drafts and publishing
// ============================================================================

#[tokio::test]
async fn test_draft_has_no_message() {
    let bot = TestBot::new();
    bot.configure().await;

    let responder = bot
        .dispatch(report_command(reporter(), "Login crashes"))
        .await;

    let replies = responder.messages();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].content, DRAFT_PROMPT);
    assert!(replies[0].ephemeral);

    let bugs = bot.store.bugs();
    assert_eq!(bugs.len(), 1);
    assert!(!bugs[0].sent);
    assert!(bugs[0].message_id.is_none());
    assert_eq!(replies[0].components[0][0].custom_id, format!("bug-{}", bugs[0].id));
    assert_eq!(bot.platform.sent_count(), 0);
}

#[tokio::test]
async fn test_short_title_rejected_at_draft() {
    let bot = TestBot::new();
    bot.configure().await;

    let responder = bot.dispatch(report_command(reporter(), "Crash")).await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some("Title must be between 8 and 256 characters.")
    );
    assert!(bot.store.bugs().is_empty());
}

#[tokio::test]
async fn test_add_details_opens_prefilled_form() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot.draft(REPORTER, "Login crashes").await;

    let message = chat_message(BOT_ID, COMMAND_CHANNEL, DRAFT_PROMPT);
    let responder = bot
        .dispatch(button(reporter(), &format!("bug-{bug_id}"), message))
        .await;

    let form = responder.modal().expect("details form shown");
    assert_eq!(form.custom_id, format!("bug-{bug_id}"));
    assert_eq!(form.inputs[0].value.as_deref(), Some("Login crashes"));
}

#[tokio::test]
async fn test_publish_posts_message_and_thread() {
    let bot = TestBot::new();
    bot.configure().await;

    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let bug = bot.store.bug(bug_id).expect("bug stored");
    assert!(bug.sent);
    assert_eq!(bug.status, BugStatus::Open);
    assert_eq!(bug.title, "Login crashes");
    assert_eq!(bug.description, "Crashes on second login attempt");

    let stored = bot.bug_message(bug_id).expect("bug message posted");
    let embed = &stored.message.embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Login crashes"));
    assert_eq!(
        embed.description.as_deref(),
        Some("Crashes on second login attempt")
    );
    assert_eq!(embed.author.as_ref().map(|a| a.name.as_str()), Some("user4001"));
    assert_eq!(first_button(&stored), format!("bugSolved-{bug_id}"));
    assert_eq!(stored.components[0].len(), 3);

    let thread_id = stored.message.thread_id.expect("thread started");
    assert_eq!(bot.platform.thread_names(), vec![format!("#{bug_id} - Login crashes")]);
    assert_eq!(bot.platform.thread_members(), vec![(thread_id, REPORTER)]);
    assert_eq!(bot.platform.sent_to(thread_id).len(), 1);
}

#[tokio::test]
async fn test_publish_without_bug_channel() {
    let bot = TestBot::new();
    let bug_id = bot.draft(REPORTER, "Login crashes").await;

    let responder = bot
        .dispatch(modal(
            reporter(),
            COMMAND_CHANNEL,
            &format!("bug-{bug_id}"),
            "Login crashes",
            "Crashes on second login attempt",
        ))
        .await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some("Bug channel not set up.")
    );
    assert!(!bot.store.bug(bug_id).expect("draft kept").sent);
}

#[tokio::test]
async fn test_publish_twice_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let sent_before = bot.platform.sent_to(BUG_CHANNEL).len();

    let responder = bot
        .dispatch(modal(
            reporter(),
            COMMAND_CHANNEL,
            &format!("bug-{bug_id}"),
            "Login crashes",
            "Again",
        ))
        .await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: Bug already sent")
    );
    assert_eq!(bot.platform.sent_to(BUG_CHANNEL).len(), sent_before);
}

#[tokio::test]
async fn test_report_media_attached_on_publish() {
    let bot = TestBot::new();
    bot.configure().await;
    let url = "https://cdn.example/crash.png";
    bot.platform.set_download(url, vec![137, 80, 78, 71]);

    let responder = bot
        .dispatch(report_with_media(
            reporter(),
            "Login crashes",
            attachment(url, "image/png", 4),
        ))
        .await;
    assert_eq!(responder.last_content().as_deref(), Some(DRAFT_PROMPT));
    assert_eq!(bot.store.media_count(), 1);

    let bug_id = bot.store.bugs()[0].id;
    bot.dispatch(modal(
        reporter(),
        COMMAND_CHANNEL,
        &format!("bug-{bug_id}"),
        "Login crashes",
        "Crashes on second login attempt",
    ))
    .await;

    let posted = bot.platform.sent_to(BUG_CHANNEL);
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].files.len(), 1);
    assert_eq!(posted[0].files[0].name, "image.png");
    assert_eq!(posted[0].files[0].data, vec![137, 80, 78, 71]);
}

#[tokio::test]
async fn test_report_media_wrong_type_writes_nothing() {
    let bot = TestBot::new();
    bot.configure().await;

    let responder = bot
        .dispatch(report_with_media(
            reporter(),
            "Login crashes",
            attachment("https://cdn.example/crash.gif", "image/gif", 4),
        ))
        .await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some("Invalid media type. Please provide either a .png or .mp4 file.")
    );
    assert!(bot.store.bugs().is_empty());
    assert_eq!(bot.store.media_count(), 0);
}

#[tokio::test]
async fn test_report_media_too_large_writes_nothing() {
    let bot = TestBot::new();
    bot.configure().await;

    bot.dispatch(report_with_media(
        reporter(),
        "Login crashes",
        attachment("https://cdn.example/crash.mp4", "video/mp4", u64::MAX),
    ))
    .await;

    assert!(bot.store.bugs().is_empty());
    assert_eq!(bot.store.media_count(), 0);
}

// ============================================================================
// Length limits
// ============================================================================

const TOO_LONG: &str =
    "Title must be less than 256 characters and description must be less than 4,000 characters.";

#[tokio::test]
async fn test_publish_rejects_long_title() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot.draft(REPORTER, "Login crashes").await;

    let responder = bot
        .dispatch(modal(
            reporter(),
            COMMAND_CHANNEL,
            &format!("bug-{bug_id}"),
            &"t".repeat(257),
            "Crashes on second login attempt",
        ))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(TOO_LONG));
    let bug = bot.store.bug(bug_id).expect("draft kept");
    assert!(bug.message_id.is_none());
    assert_eq!(bug.title, "Login crashes");
    assert!(bot.platform.sent_to(BUG_CHANNEL).is_empty());
}

#[tokio::test]
async fn test_description_limit_is_inclusive() {
    let bot = TestBot::new();
    bot.configure().await;

    let accepted = bot
        .report(REPORTER, "Login crashes", &"d".repeat(4000))
        .await;
    assert!(bot.store.bug(accepted).expect("bug").sent);

    let rejected = bot.draft(REPORTER, "Logout crashes").await;
    let responder = bot
        .dispatch(modal(
            reporter(),
            COMMAND_CHANNEL,
            &format!("bug-{rejected}"),
            "Logout crashes",
            &"d".repeat(4001),
        ))
        .await;
    assert_eq!(responder.last_content().as_deref(), Some(TOO_LONG));
    assert!(!bot.store.bug(rejected).expect("draft kept").sent);
}

#[tokio::test]
async fn test_blank_fields_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot.draft(REPORTER, "Login crashes").await;

    let responder = bot
        .dispatch(modal(
            reporter(),
            COMMAND_CHANNEL,
            &format!("bug-{bug_id}"),
            "Login crashes",
            "   ",
        ))
        .await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some("Please fill out all fields.")
    );
}

// ============================================================================
// Status changes
// ============================================================================

#[tokio::test]
async fn test_close_and_reopen_end_to_end() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let thread_id = bot
        .bug_message(bug_id)
        .and_then(|stored| stored.message.thread_id)
        .expect("thread");

    let responder = bot.press(manager(), family::BUG_SOLVED, bug_id).await;
    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{bug_id} has been closed"))
    );
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Closed);
    let stored = bot.bug_message(bug_id).expect("message kept");
    assert_eq!(first_button(&stored), format!("bugReopen-{bug_id}"));

    let notices = bot.platform.sent_to(thread_id);
    let notice = notices.last().and_then(|m| m.content.clone()).expect("notice");
    assert!(notice.contains(&format!("Bug #{bug_id} has been closed")));
    assert!(notice.contains(&MANAGER.user_mention()));

    let responder = bot.press(reporter(), family::BUG_REOPEN, bug_id).await;
    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{bug_id} has been reopened"))
    );
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Open);
    let stored = bot.bug_message(bug_id).expect("message kept");
    assert_eq!(first_button(&stored), format!("bugSolved-{bug_id}"));
}

#[tokio::test]
async fn test_close_by_bystander_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot.press(bystander(), family::BUG_SOLVED, bug_id).await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: You do not have permission to close this bug")
    );
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Open);
    let stored = bot.bug_message(bug_id).expect("message kept");
    assert_eq!(first_button(&stored), format!("bugSolved-{bug_id}"));
}

#[tokio::test]
async fn test_manager_role_grants_close() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    bot.press(actor(BYSTANDER, &[MANAGER_ROLE]), family::BUG_SOLVED, bug_id)
        .await;

    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Closed);
}

#[tokio::test]
async fn test_reopen_open_bug_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot.press(reporter(), family::BUG_REOPEN, bug_id).await;

    assert_eq!(
        responder.last_content(),
        Some(format!(":x: Bug #{bug_id} is already open"))
    );
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Open);
}

#[tokio::test]
async fn test_status_change_survives_deleted_message() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let stored = bot.bug_message(bug_id).expect("bug message");
    let thread_id = stored.message.thread_id.expect("thread");
    let thread_messages = bot.platform.sent_to(thread_id).len();
    bot.platform
        .remove_message(BUG_CHANNEL, stored.message.id);

    let responder = bot
        .dispatch(button(
            manager(),
            &format!("bugSolved-{bug_id}"),
            stored.message,
        ))
        .await;

    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{bug_id} has been closed"))
    );
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Closed);
    assert_eq!(bot.platform.sent_to(thread_id).len(), thread_messages);
}

// ============================================================================
// Edit and delete
// ============================================================================

#[tokio::test]
async fn test_edit_updates_record_and_embed() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot.press(reporter(), family::BUG_EDIT, bug_id).await;
    let form = responder.modal().expect("edit form");
    assert_eq!(form.custom_id, format!("editBug-{bug_id}"));
    assert_eq!(
        form.inputs[1].value.as_deref(),
        Some("Crashes on second login attempt")
    );

    let responder = bot
        .dispatch(modal(
            reporter(),
            BUG_CHANNEL,
            &form.custom_id,
            "Login crashes on Android",
            "Crashes on every login attempt",
        ))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(EDITED_NOTICE));
    let bug = bot.store.bug(bug_id).expect("bug");
    assert_eq!(bug.title, "Login crashes on Android");
    let stored = bot.bug_message(bug_id).expect("message kept");
    assert_eq!(
        stored.message.embeds[0].title.as_deref(),
        Some("Login crashes on Android")
    );
}

#[tokio::test]
async fn test_edit_rejects_long_title() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot
        .dispatch(modal(
            reporter(),
            BUG_CHANNEL,
            &format!("editBug-{bug_id}"),
            &"t".repeat(257),
            "Crashes on second login attempt",
        ))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(TOO_LONG));
    assert_eq!(bot.store.bug(bug_id).expect("bug").title, "Login crashes");
    let stored = bot.bug_message(bug_id).expect("message kept");
    assert_eq!(stored.message.embeds[0].title.as_deref(), Some("Login crashes"));
}

#[tokio::test]
async fn test_edit_button_requires_permission() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot.press(bystander(), family::BUG_EDIT, bug_id).await;

    assert!(responder.modal().is_none());
    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: You do not have permission to edit this bug")
    );
}

#[tokio::test]
async fn test_delete_by_bystander_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;

    let responder = bot.press(bystander(), family::BUG_DELETE, bug_id).await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: You do not have permission to delete this bug")
    );
    assert!(!bot.store.is_deleted(bug_id));
    assert!(bot.bug_message(bug_id).is_some());
}

#[tokio::test]
async fn test_delete_by_manager() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let stored = bot.bug_message(bug_id).expect("bug message");
    let thread_id = stored.message.thread_id.expect("thread");

    let responder = bot.press(manager(), family::BUG_DELETE, bug_id).await;

    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{bug_id} has been deleted"))
    );
    assert!(bot.store.is_deleted(bug_id));
    assert!(bot.platform.message(BUG_CHANNEL, stored.message.id).is_none());
    assert_eq!(bot.platform.locked_threads(), vec![thread_id]);

    // Deleted bugs no longer resolve
    let mut message = stored.message;
    message.embeds.clear();
    let responder = bot
        .dispatch(button(manager(), &format!("bugReopen-{bug_id}"), message))
        .await;
    assert_eq!(responder.last_content().as_deref(), Some(":x: Bug not found"));
}

#[tokio::test]
async fn test_edit_survives_deleted_message() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let stored = bot.bug_message(bug_id).expect("bug message");
    bot.platform.remove_message(BUG_CHANNEL, stored.message.id);

    let responder = bot
        .dispatch(modal(
            reporter(),
            BUG_CHANNEL,
            &format!("editBug-{bug_id}"),
            "Login crashes on Android",
            "Crashes on every login attempt",
        ))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(EDITED_NOTICE));
    let bug = bot.store.bug(bug_id).expect("bug");
    assert_eq!(bug.title, "Login crashes on Android");
    assert_eq!(bug.description, "Crashes on every login attempt");
    assert!(bot.platform.message(BUG_CHANNEL, stored.message.id).is_none());
}

#[tokio::test]
async fn test_delete_survives_deleted_message() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let stored = bot.bug_message(bug_id).expect("bug message");
    let thread_id = stored.message.thread_id.expect("thread");
    let thread_messages = bot.platform.sent_to(thread_id).len();
    bot.platform.remove_message(BUG_CHANNEL, stored.message.id);

    let responder = bot
        .dispatch(button(
            manager(),
            &format!("bugDelete-{bug_id}"),
            stored.message,
        ))
        .await;

    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{bug_id} has been deleted"))
    );
    assert!(bot.store.is_deleted(bug_id));
    assert!(bot.platform.locked_threads().is_empty());
    assert_eq!(bot.platform.sent_to(thread_id).len(), thread_messages);
}

// ============================================================================
// Legacy reports
// ============================================================================

/// Bug message in the pre-database format, seeded on the platform
fn seed_legacy_message(bot: &TestBot, author: &str) -> RemoteMessage {
    let mut legacy = chat_message(BOT_ID, BUG_CHANNEL, "");
    legacy.embeds.push(Embed {
        author: Some(EmbedAuthor {
            name: author.into(),
            icon_url: None,
        }),
        title: Some("Inventory vanishes".into()),
        description: Some("Items disappear after relog".into()),
        ..Embed::default()
    });
    bot.platform.seed_message(legacy.clone(), Vec::new());
    legacy
}

fn adopted_bug(bot: &TestBot, legacy: &RemoteMessage) -> Option<Bug> {
    bot.store
        .bugs()
        .into_iter()
        .find(|bug| bug.message_id == Some(legacy.id))
}

#[tokio::test]
async fn test_legacy_report_adopted() {
    let bot = TestBot::new();
    bot.configure().await;
    let legacy = seed_legacy_message(&bot, "old reporter");

    let responder = bot
        .dispatch(button(manager(), "bugSolved-77", legacy.clone()))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(LEGACY_NOTICE));
    let adopted = adopted_bug(&bot, &legacy).expect("legacy bug adopted");
    assert!(adopted.sent);
    assert_eq!(adopted.status, BugStatus::Open);
    assert_eq!(adopted.title, "Inventory vanishes");

    // Nobody answers to the author name, so the posting account owns it
    let owner = bot.store.user(adopted.user_id).expect("owner provisioned");
    assert_eq!(owner.user_id, BOT_ID);

    let stored = bot
        .platform
        .message(BUG_CHANNEL, legacy.id)
        .expect("legacy message kept");
    assert_eq!(first_button(&stored), format!("bugSolved-{}", adopted.id));
    assert_eq!(
        stored.message.embeds[0]
            .author
            .as_ref()
            .map(|a| a.name.as_str()),
        Some("old reporter")
    );
}

#[tokio::test]
async fn test_legacy_report_owned_by_embed_author() {
    let bot = TestBot::new();
    bot.configure().await;
    bot.platform.add_member("old reporter", REPORTER);
    let legacy = seed_legacy_message(&bot, "old reporter");

    let responder = bot
        .dispatch(button(bystander(), "bugDelete-77", legacy.clone()))
        .await;
    assert_eq!(responder.last_content().as_deref(), Some(LEGACY_NOTICE));

    let adopted = adopted_bug(&bot, &legacy).expect("legacy bug adopted");
    let owner = bot.store.user(adopted.user_id).expect("owner provisioned");
    assert_eq!(owner.user_id, REPORTER);

    // Adopting did not hand the bystander any rights over the report
    let rendered = bot
        .platform
        .message(BUG_CHANNEL, legacy.id)
        .expect("legacy message kept")
        .message;
    let responder = bot
        .dispatch(button(
            bystander(),
            &format!("bugDelete-{}", adopted.id),
            rendered,
        ))
        .await;
    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: You do not have permission to delete this bug")
    );
    assert!(!bot.store.is_deleted(adopted.id));
    assert!(bot.platform.message(BUG_CHANNEL, legacy.id).is_some());
}

#[tokio::test]
async fn test_legacy_adoption_by_bystander_rejected() {
    let bot = TestBot::new();
    bot.configure().await;
    let legacy = seed_legacy_message(&bot, "old reporter");

    let responder = bot
        .dispatch(button(bystander(), "bugDelete-77", legacy.clone()))
        .await;

    assert_eq!(
        responder.last_content().as_deref(),
        Some(":x: You do not have permission to adopt this bug")
    );
    assert!(adopted_bug(&bot, &legacy).is_none());
    assert!(bot.platform.message(BUG_CHANNEL, legacy.id).is_some());
}

#[tokio::test]
async fn test_stale_legacy_control_resolves_adopted_bug() {
    let bot = TestBot::new();
    bot.configure().await;
    let legacy = seed_legacy_message(&bot, "old reporter");
    bot.dispatch(button(manager(), "bugSolved-77", legacy.clone()))
        .await;
    let adopted = adopted_bug(&bot, &legacy).expect("legacy bug adopted");

    // Same pre-adoption control pressed again
    let responder = bot
        .dispatch(button(manager(), "bugSolved-77", legacy.clone()))
        .await;

    assert_eq!(
        responder.last_content(),
        Some(format!("Bug #{} has been closed", adopted.id))
    );
    assert_eq!(bot.store.bugs().len(), 1);
    assert_eq!(
        bot.store.bug(adopted.id).expect("bug").status,
        BugStatus::Closed
    );
}

#[tokio::test]
async fn test_unknown_bug_without_embed_not_found() {
    let bot = TestBot::new();
    bot.configure().await;
    let message = chat_message(BOT_ID, BUG_CHANNEL, "plain text");

    let responder = bot
        .dispatch(button(manager(), "bugSolved-4242", message))
        .await;

    assert_eq!(responder.last_content().as_deref(), Some(":x: Bug not found"));
    assert!(bot.store.bugs().is_empty());
}

// ============================================================================
// Guild scoping
// ============================================================================

#[tokio::test]
async fn test_bug_from_other_guild_not_found() {
    let bot = TestBot::new();
    bot.configure().await;
    let bug_id = bot
        .report(REPORTER, "Login crashes", "Crashes on second login attempt")
        .await;
    let mut message = bot.bug_message(bug_id).expect("bug message").message;
    message.embeds.clear();

    let mut press = button(manager(), &format!("bugSolved-{bug_id}"), message);
    press.guild_id = Some(Snowflake::new(7777));
    let responder = bot.dispatch(press).await;

    assert_eq!(responder.last_content().as_deref(), Some(":x: Bug not found"));
    assert_eq!(bot.store.bug(bug_id).expect("bug").status, BugStatus::Open);
}
