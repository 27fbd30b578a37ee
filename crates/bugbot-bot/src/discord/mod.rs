//! Serenity adapter
//!
//! Connects to the gateway, converts serenity models into the
//! platform-neutral interaction model and implements the chat platform and
//! responder ports over the REST API.

mod commands;
mod convert;
mod events;
mod platform;
mod responder;

pub use commands::definitions;
pub use events::BotEventHandler;
pub use platform::SerenityPlatform;
pub use responder::{InteractionHandle, SerenityResponder};
