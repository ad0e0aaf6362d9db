//! Read-only snapshot of the GUI store as seen by the stage header.
//!
//! The store itself belongs to the host. These types only mirror the slices
//! the header selector reads: project loading state, alerts, stage size and
//! display mode.

use serde::{Deserialize, Serialize};

use crate::widgets::project_id::ProjectId;
use crate::widgets::stage_header::StageSizeMode;

/// Alert id raised by the save pipeline after a successful save.
pub const SAVE_SUCCESS_ALERT_ID: &str = "saveSuccess";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiState {
    pub project_state: ProjectState,
    pub alerts: AlertState,
    pub stage_size: StageSizeState,
    pub mode: ModeState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    pub project_id: Option<ProjectId>,
    pub loading_state: LoadingState,
}

/// Project loading lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingState {
    #[default]
    NotLoaded,
    Error,
    AutoUpdating,
    CreatingCopy,
    CreatingNew,
    FetchingNewDefault,
    FetchingWithId,
    LoadingVmFileUpload,
    LoadingVmNewDefault,
    LoadingVmWithId,
    ManualUpdating,
    Remixing,
    ShowingWithId,
    ShowingWithoutId,
    UpdatingBeforeCopy,
    UpdatingBeforeNew,
}

impl LoadingState {
    pub fn is_auto_updating(self) -> bool {
        self == LoadingState::AutoUpdating
    }

    pub fn is_manual_updating(self) -> bool {
        self == LoadingState::ManualUpdating
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
}

impl Alert {
    pub fn new(alert_id: impl Into<String>) -> Self {
        Self { alert_id: alert_id.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertState {
    pub visible: bool,
    pub alerts_list: Vec<Alert>,
}

impl AlertState {
    /// True when alerts are shown and one of them carries `alert_id`.
    pub fn is_showing(&self, alert_id: &str) -> bool {
        self.visible && self.alerts_list.iter().any(|a| a.alert_id == alert_id)
    }
}

/// Stage size button mode, as opposed to the stage's actual rendered size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSizeState {
    pub stage_size: StageSizeMode,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeState {
    pub is_full_screen: bool,
    pub is_player_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updating_classifiers() {
        assert!(LoadingState::AutoUpdating.is_auto_updating());
        assert!(!LoadingState::AutoUpdating.is_manual_updating());
        assert!(LoadingState::ManualUpdating.is_manual_updating());
        assert!(!LoadingState::ShowingWithId.is_auto_updating());
        assert!(!LoadingState::ShowingWithId.is_manual_updating());
    }

    #[test]
    fn test_alert_requires_visibility() {
        let mut alerts = AlertState {
            visible: false,
            alerts_list: vec![Alert::new(SAVE_SUCCESS_ALERT_ID)],
        };
        assert!(!alerts.is_showing(SAVE_SUCCESS_ALERT_ID));
        alerts.visible = true;
        assert!(alerts.is_showing(SAVE_SUCCESS_ALERT_ID));
        assert!(!alerts.is_showing("savingError"));
    }

    #[test]
    fn test_snapshot_from_partial_json() {
        let json = r#"{
            "project_state": { "project_id": 42, "loading_state": "MANUAL_UPDATING" },
            "stage_size": { "stage_size": "huge" }
        }"#;
        let state: GuiState = serde_json::from_str(json).unwrap();
        assert_eq!(state.project_state.project_id, Some(ProjectId::Number(42)));
        assert!(state.project_state.loading_state.is_manual_updating());
        assert_eq!(state.stage_size.stage_size, StageSizeMode::Large);
        assert!(!state.alerts.visible);
        assert!(!state.mode.is_full_screen);
    }

    #[test]
    fn test_non_string_stage_size_keeps_snapshot() {
        let json = r#"{
            "project_state": { "project_id": "draft" },
            "stage_size": { "stage_size": 1 },
            "mode": { "is_full_screen": true }
        }"#;
        let state: GuiState = serde_json::from_str(json).unwrap();
        assert_eq!(state.stage_size.stage_size, StageSizeMode::Large);
        assert_eq!(state.project_state.project_id, Some(ProjectId::Text("draft".into())));
        assert!(state.mode.is_full_screen);
    }
}
