//! STAGEBAR - stage header and project id sync for the block editor shell
//!
//! Re-exports all modules for use by the shell binary.

// Core plumbing (event bus, events, store snapshot)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod main_events;
pub mod widgets;

pub use crate::core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use crate::core::gui_state::GuiState;
pub use widgets::project_id::{ProjectId, ProjectIdUpdater, with_project_id_updates};
pub use widgets::stage_header::{StageHeader, StageHeaderActions, StageViewState, project};
