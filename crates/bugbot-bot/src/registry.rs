//! Handler registry
//!
//! Maps command names and custom id families to handlers. Built once at
//! startup and shared read-only by the router.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use crate::handlers::{
    AddDetailsButton, BugCommand, BugDetailsModal, ButtonHandler, CloseBugButton, CommandHandler,
    DeleteBugButton, EditBugButton, EditBugModal, HighlightClipCommand, InfoCommand, ModalHandler,
    ReopenBugButton, SettingsCommand,
};

/// Handlers by namespace and key
#[derive(Default)]
pub struct HandlerRegistry {
    commands: HashMap<&'static str, Arc<dyn CommandHandler>>,
    buttons: HashMap<&'static str, Arc<dyn ButtonHandler>>,
    modals: HashMap<&'static str, Arc<dyn ModalHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in handler
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_command(Arc::new(BugCommand));
        registry.register_command(Arc::new(SettingsCommand));
        registry.register_command(Arc::new(InfoCommand));
        registry.register_command(Arc::new(HighlightClipCommand));

        registry.register_button(Arc::new(AddDetailsButton));
        registry.register_button(Arc::new(CloseBugButton));
        registry.register_button(Arc::new(ReopenBugButton));
        registry.register_button(Arc::new(EditBugButton));
        registry.register_button(Arc::new(DeleteBugButton));

        registry.register_modal(Arc::new(BugDetailsModal));
        registry.register_modal(Arc::new(EditBugModal));

        registry
    }

    /// Register a command handler under its name, replacing any previous one
    pub fn register_command(&mut self, handler: Arc<dyn CommandHandler>) {
        let name = handler.name();
        if self.commands.insert(name, handler).is_some() {
            warn!(command = name, "Command handler replaced");
        }
    }

    /// Register a button handler under its family, replacing any previous one
    pub fn register_button(&mut self, handler: Arc<dyn ButtonHandler>) {
        let family = handler.family();
        if self.buttons.insert(family, handler).is_some() {
            warn!(family, "Button handler replaced");
        }
    }

    /// Register a modal handler under its family, replacing any previous one
    pub fn register_modal(&mut self, handler: Arc<dyn ModalHandler>) {
        let family = handler.family();
        if self.modals.insert(family, handler).is_some() {
            warn!(family, "Modal handler replaced");
        }
    }

    pub fn command(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    pub fn button(&self, family: &str) -> Option<&dyn ButtonHandler> {
        self.buttons.get(family).map(AsRef::as_ref)
    }

    pub fn modal(&self, family: &str) -> Option<&dyn ModalHandler> {
        self.modals.get(family).map(AsRef::as_ref)
    }

    /// Registered command names, sorted
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("commands", &self.commands.len())
            .field("buttons", &self.buttons.len())
            .field("modals", &self.modals.len())
            .finish()
    }
}
