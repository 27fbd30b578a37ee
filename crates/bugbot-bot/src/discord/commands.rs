//! Application command definitions registered at startup

use bugbot_core::{MAX_TITLE_LEN, MIN_TITLE_LEN};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::model::application::{CommandOptionType, CommandType};
use serenity::model::Permissions;

fn channel_setting(name: &str, description: &str, channel: &str) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description).add_sub_option(
        CreateCommandOption::new(CommandOptionType::Channel, "channel", channel).required(true),
    )
}

fn bug() -> CreateCommand {
    let report = CreateCommandOption::new(
        CommandOptionType::SubCommand,
        "report",
        "Report a bug to the developers.",
    )
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::String,
            "title",
            "Provide a brief summary of the bug. You will be asked to provide more details later.",
        )
        .min_length(MIN_TITLE_LEN as u16)
        .max_length(MAX_TITLE_LEN as u16)
        .required(true),
    )
    .add_sub_option(CreateCommandOption::new(
        CommandOptionType::Attachment,
        "media",
        "Attach a screenshot or video of the bug. Supported formats are .png and .mp4.",
    ));

    CreateCommand::new("bug")
        .description("Report a bug to the developers.")
        .dm_permission(false)
        .add_option(report)
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "help",
            "Get help with reporting a bug.",
        ))
}

fn settings() -> CreateCommand {
    let edit = CreateCommandOption::new(
        CommandOptionType::SubCommandGroup,
        "edit",
        "Edit the settings.",
    )
    .add_sub_option(channel_setting(
        "highlights",
        "Edit the highlights settings.",
        "The channel to send highlights to.",
    ))
    .add_sub_option(channel_setting(
        "bugs",
        "Edit the bug report settings.",
        "The channel to send bug reports to.",
    ))
    .add_sub_option(channel_setting(
        "suggestions",
        "Edit the suggestion settings.",
        "The forum where suggestions are sent.",
    ))
    .add_sub_option(channel_setting(
        "command-channel",
        "Edit the command channel settings.",
        "The channel.",
    ))
    .add_sub_option(
        CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "manager-roles",
            "Edit the manager roles. These roles can manage bugs and highlights.",
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::Role, "role", "The role to add or remove.")
                .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::Boolean,
                "add",
                "Whether to add or remove the role.",
            )
            .required(true),
        ),
    );

    CreateCommand::new("settings")
        .description("Edit the settings.")
        .dm_permission(false)
        .add_option(edit)
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "view",
            "View the settings.",
        ))
}

fn info() -> CreateCommand {
    CreateCommand::new("info")
        .description("Returns information about the user and the guild.")
        .dm_permission(false)
        .default_member_permissions(Permissions::empty())
}

fn highlight_clip() -> CreateCommand {
    CreateCommand::new("Highlight Clip")
        .kind(CommandType::Message)
        .dm_permission(false)
}

/// Every command the bot handles
pub fn definitions() -> Vec<CreateCommand> {
    vec![bug(), settings(), info(), highlight_clip()]
}
