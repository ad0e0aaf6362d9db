//! Host-side event handling - applies header events to the store snapshot.
//!
//! The header never mutates state itself. The shell polls the EventBus each
//! frame and runs every event through [`handle_app_event`], which updates the
//! [`GuiState`] and reports the side effects the shell must carry out
//! (window mode, persisting settings, kicking off a save).

use log::{debug, info};

use crate::core::event_bus::{BoxedEvent, downcast_event};
use crate::core::gui_state::{GuiState, LoadingState};
use crate::core::stage_events::*;

/// Deferred actions for the shell after handling an event
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EventResult {
    /// Window full screen state to apply
    pub set_fullscreen: Option<bool>,
    /// Header settings changed and should be written out
    pub persist_settings: bool,
    /// Manual save requested; the shell hands it to the save pipeline
    pub start_save: bool,
    pub download_project: bool,
}

/// Handle a single app event (called from main event loop).
/// Returns Some(result) if event was handled, None otherwise.
pub fn handle_app_event(event: &BoxedEvent, gui: &mut GuiState) -> Option<EventResult> {
    let mut result = EventResult::default();

    // === Stage ===
    if let Some(e) = downcast_event::<SetStageSizeEvent>(event) {
        if gui.stage_size.stage_size != e.0 {
            debug!("Stage size: {} -> {}", gui.stage_size.stage_size, e.0);
            gui.stage_size.stage_size = e.0;
            result.persist_settings = true;
        }
        return Some(result);
    }
    if let Some(e) = downcast_event::<SetFullScreenEvent>(event) {
        if gui.mode.is_full_screen != e.0 {
            gui.mode.is_full_screen = e.0;
            result.set_fullscreen = Some(e.0);
        }
        return Some(result);
    }
    if downcast_event::<StageKeyPressEvent>(event).is_some() {
        if gui.mode.is_full_screen {
            gui.mode.is_full_screen = false;
            result.set_fullscreen = Some(false);
        }
        return Some(result);
    }

    // === Project ===
    if let Some(e) = downcast_event::<SetProjectIdEvent>(event) {
        info!("Project id set: {:?}", e.0);
        gui.project_state.project_id = e.0.clone();
        return Some(result);
    }
    if downcast_event::<ManualUpdateProjectEvent>(event).is_some() {
        gui.project_state.loading_state = LoadingState::ManualUpdating;
        result.start_save = true;
        return Some(result);
    }
    if downcast_event::<DownloadProjectEvent>(event).is_some() {
        result.download_project = true;
        return Some(result);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::project_id::ProjectId;
    use crate::widgets::stage_header::StageSizeMode;

    fn handle<E: Clone + Send + Sync + 'static>(event: E, gui: &mut GuiState) -> Option<EventResult> {
        handle_app_event(&(Box::new(event) as BoxedEvent), gui)
    }

    #[test]
    fn test_stage_size_is_idempotent() {
        let mut gui = GuiState::default();
        let result = handle(SetStageSizeEvent(StageSizeMode::Small), &mut gui).unwrap();
        assert!(result.persist_settings);
        assert_eq!(gui.stage_size.stage_size, StageSizeMode::Small);

        let again = handle(SetStageSizeEvent(StageSizeMode::Small), &mut gui).unwrap();
        assert_eq!(again, EventResult::default());
    }

    #[test]
    fn test_escape_leaves_full_screen() {
        let mut gui = GuiState::default();
        let entered = handle(SetFullScreenEvent(true), &mut gui).unwrap();
        assert_eq!(entered.set_fullscreen, Some(true));

        let left = handle(StageKeyPressEvent, &mut gui).unwrap();
        assert_eq!(left.set_fullscreen, Some(false));
        assert!(!gui.mode.is_full_screen);

        let ignored = handle(StageKeyPressEvent, &mut gui).unwrap();
        assert_eq!(ignored.set_fullscreen, None);
    }

    #[test]
    fn test_manual_save_marks_updating() {
        let mut gui = GuiState::default();
        let result = handle(ManualUpdateProjectEvent, &mut gui).unwrap();
        assert!(result.start_save);
        assert!(gui.project_state.loading_state.is_manual_updating());
    }

    #[test]
    fn test_project_id_stored() {
        let mut gui = GuiState::default();
        handle(SetProjectIdEvent(Some(ProjectId::from(9))), &mut gui);
        assert_eq!(gui.project_state.project_id, Some(ProjectId::Number(9)));
        handle(SetProjectIdEvent(None), &mut gui);
        assert_eq!(gui.project_state.project_id, None);
    }

    #[test]
    fn test_unknown_event_not_handled() {
        #[derive(Clone)]
        struct Unrelated;
        assert!(handle(Unrelated, &mut GuiState::default()).is_none());
    }
}
