//! Dispatch table for stage header controls.

use log::{debug, warn};

use super::stage_header::{StageAction, StageSizeMode};
use crate::core::event_bus::EventEmitter;
use crate::core::stage_events::{
    DownloadProjectEvent, ManualUpdateProjectEvent, SetFullScreenEvent, SetStageSizeEvent,
    StageKeyPressEvent,
};

pub type Callback = Box<dyn Fn()>;

/// One callback per header control. All but download are required.
pub struct StageHeaderActions {
    pub on_set_stage_small: Callback,
    pub on_set_stage_large: Callback,
    pub on_set_stage_full: Callback,
    pub on_set_stage_un_full: Callback,
    pub on_click_save: Callback,
    pub on_key_press: Callback,
    pub on_download_project: Option<Callback>,
}

impl StageHeaderActions {
    /// Bind every control to its event on `emitter`.
    pub fn from_emitter(emitter: &EventEmitter) -> Self {
        fn bind<E: Clone + Send + Sync + 'static>(emitter: &EventEmitter, event: E) -> Callback {
            let emitter = emitter.clone();
            Box::new(move || emitter.emit(event.clone()))
        }

        Self {
            on_set_stage_small: bind(emitter, SetStageSizeEvent(StageSizeMode::Small)),
            on_set_stage_large: bind(emitter, SetStageSizeEvent(StageSizeMode::Large)),
            on_set_stage_full: bind(emitter, SetFullScreenEvent(true)),
            on_set_stage_un_full: bind(emitter, SetFullScreenEvent(false)),
            on_click_save: bind(emitter, ManualUpdateProjectEvent),
            on_key_press: bind(emitter, StageKeyPressEvent),
            on_download_project: Some(bind(emitter, DownloadProjectEvent)),
        }
    }

    pub fn callback(&self, action: StageAction) -> Option<&Callback> {
        match action {
            StageAction::SetStageSmall => Some(&self.on_set_stage_small),
            StageAction::SetStageLarge => Some(&self.on_set_stage_large),
            StageAction::SetStageFull => Some(&self.on_set_stage_full),
            StageAction::SetStageUnFull => Some(&self.on_set_stage_un_full),
            StageAction::ClickSave => Some(&self.on_click_save),
            StageAction::KeyPress => Some(&self.on_key_press),
            StageAction::DownloadProject => self.on_download_project.as_ref(),
        }
    }

    pub fn is_bound(&self, action: StageAction) -> bool {
        self.callback(action).is_some()
    }

    /// Run the callback wired to `action`.
    pub fn invoke(&self, action: StageAction) {
        match self.callback(action) {
            Some(cb) => {
                debug!("Stage header action: {:?}", action);
                cb();
            }
            None => warn!("Stage header action {:?} has no callback bound", action),
        }
    }
}
