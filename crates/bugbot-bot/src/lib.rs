//! # bugbot-bot
//!
//! Interaction routing and handlers for the bug tracking bot, plus the
//! serenity adapter that connects them to the gateway.

pub mod app;
pub mod discord;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod responder;
pub mod router;

pub use app::run;
pub use error::{HandlerError, HandlerResult};
pub use registry::HandlerRegistry;
pub use responder::{InteractionResponder, Reply, ResponseState};
pub use router::InteractionRouter;
