//! Localized labels for the stage header.
//!
//! Only the stage size and full screen labels go through a resolver.
//! Save status texts are fixed strings owned by the projection.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub id: &'static str,
    pub default_message: &'static str,
    pub description: &'static str,
}

pub const LARGE_STAGE_SIZE: MessageDescriptor = MessageDescriptor {
    id: "gui.stageHeader.stageSizeLarge",
    default_message: "Switch to large stage",
    description: "Button to change stage size to large",
};

pub const SMALL_STAGE_SIZE: MessageDescriptor = MessageDescriptor {
    id: "gui.stageHeader.stageSizeSmall",
    default_message: "Switch to small stage",
    description: "Button to change stage size to small",
};

pub const FULL_STAGE_SIZE: MessageDescriptor = MessageDescriptor {
    id: "gui.stageHeader.stageSizeFull",
    default_message: "Enter full screen mode",
    description: "Button to change stage size to full screen",
};

pub const UN_FULL_STAGE_SIZE: MessageDescriptor = MessageDescriptor {
    id: "gui.stageHeader.stageSizeUnFull",
    default_message: "Exit full screen mode",
    description: "Button to get out of full screen mode",
};

pub const FULLSCREEN_CONTROL: MessageDescriptor = MessageDescriptor {
    id: "gui.stageHeader.fullscreenControl",
    default_message: "Full Screen Control",
    description: "Button to enter/exit full screen mode",
};

/// Resolves a message descriptor to display text.
pub trait MessageResolver {
    fn format_message(&self, descriptor: &MessageDescriptor) -> String;
}

/// Resolver that always answers with the default message.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMessages;

impl MessageResolver for DefaultMessages {
    fn format_message(&self, descriptor: &MessageDescriptor) -> String {
        descriptor.default_message.to_string()
    }
}

/// Flat `id -> text` catalog loaded from JSON. Unknown ids use the default.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid message catalog")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message catalog: {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to parse message catalog: {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageResolver for MessageCatalog {
    fn format_message(&self, descriptor: &MessageDescriptor) -> String {
        self.messages
            .get(descriptor.id)
            .cloned()
            .unwrap_or_else(|| descriptor.default_message.to_string())
    }
}
