//! Integration test utilities for the bug bot
//!
//! Runs interactions end to end through the `InteractionRouter` against an
//! in-memory store and a recording chat platform.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
