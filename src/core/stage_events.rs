//! Events emitted by the stage header and the project id updater.
//!
//! The host drains these from the [`EventBus`](super::event_bus::EventBus)
//! and applies them to its [`GuiState`](super::gui_state::GuiState).

use crate::widgets::project_id::ProjectId;
use crate::widgets::stage_header::StageSizeMode;

// === Project ===

/// Project id changed on the host side. `None` means the id was cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct SetProjectIdEvent(pub Option<ProjectId>);

/// Save button pressed.
#[derive(Clone, Debug)]
pub struct ManualUpdateProjectEvent;

/// Dev-mode download button pressed.
#[derive(Clone, Debug)]
pub struct DownloadProjectEvent;

// === Stage ===

#[derive(Clone, Debug)]
pub struct SetStageSizeEvent(pub StageSizeMode);

#[derive(Clone, Debug)]
pub struct SetFullScreenEvent(pub bool);

/// Key pressed on the exit-full-screen control (Escape).
#[derive(Clone, Debug)]
pub struct StageKeyPressEvent;
