//! Stage header widget - size toggles, save status, full screen controls
//!
//! `stage_header` projects view state into a control description,
//! `stage_header_ui` draws it with egui.

pub mod messages;
mod stage_header;
mod stage_header_actions;
pub mod stage_header_ui;

pub use messages::{DefaultMessages, MessageCatalog, MessageResolver};
pub use stage_header::{
    BrandingLink, ControlButton, EngineHandle, FullScreenBar, FullScreenButton, Icon, NormalBar,
    SaveIndicator, SizeToggleGroup, StageAction, StageHeader, StageSizeMode, StageViewState,
    ToggleEntry, project,
};
pub use stage_header_actions::{Callback, StageHeaderActions};
pub use stage_header_ui::render;
