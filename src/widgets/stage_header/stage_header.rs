//! Stage header - state projection
//!
//! Turns a [`StageViewState`] snapshot into a [`StageHeader`] description:
//! which controls exist, which toggle is selected, and what their labels say.
//! No egui here; `stage_header_ui` draws whatever this returns.
//!
//! Rules:
//! - full screen shows only the overlay bar: branding link when branded,
//!   otherwise the exit control. Player-only is ignored in full screen.
//! - normal bar: save indicators (each driven by its own flag), save button,
//!   size toggles unless player-only, enter-full-screen button.

use serde::{Deserialize, Deserializer, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::messages::{
    FULL_STAGE_SIZE, FULLSCREEN_CONTROL, LARGE_STAGE_SIZE, MessageResolver, SMALL_STAGE_SIZE,
    UN_FULL_STAGE_SIZE,
};
use crate::core::gui_state::{GuiState, SAVE_SUCCESS_ALERT_ID};

pub const BRANDING_URL: &str = "https://scratch.mit.edu";
pub const BRANDING_ALT: &str = "Scratch";

pub const SAVED_TEXT: &str = "저장함";
pub const AUTO_SAVING_TEXT: &str = "자동 저장 중..";
pub const SAVING_TEXT: &str = "저장 중..";
pub const SAVE_LABEL: &str = "저장하기";
pub const DOWNLOAD_LABEL: &str = "컴퓨터에 다운로드하기";

/// Stage size button mode. Unknown names fall back to `Large`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageSizeMode {
    Small,
    #[default]
    Large,
}

impl StageSizeMode {
    pub fn from_name(name: &str) -> Self {
        match name {
            "small" => StageSizeMode::Small,
            _ => StageSizeMode::Large,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StageSizeMode::Small => "small",
            StageSizeMode::Large => "large",
        }
    }
}

impl<'de> Deserialize<'de> for StageSizeMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any JSON value is accepted; only the string "small" picks Small
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(name) => Ok(StageSizeMode::from_name(&name)),
            _ => Ok(StageSizeMode::Large),
        }
    }
}

impl fmt::Display for StageSizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to the editor engine, passed through to the run controls.
#[derive(Clone)]
pub struct EngineHandle(Arc<dyn Any + Send + Sync>);

impl EngineHandle {
    pub fn new<T: Any + Send + Sync>(engine: T) -> Self {
        Self(Arc::new(engine))
    }

    /// Handle with no engine behind it (standalone shell, tests).
    pub fn detached() -> Self {
        Self::new(())
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineHandle(..)")
    }
}

/// Everything the header needs to know, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageViewState {
    pub is_full_screen: bool,
    pub is_player_only: bool,
    pub is_auto_updating: bool,
    pub is_manual_updating: bool,
    pub is_save_success_alert_visible: bool,
    pub stage_size_mode: StageSizeMode,
    pub show_branding: bool,
    pub is_dev_mode: bool,
}

impl StageViewState {
    /// Selector: read the header's slice of the store. Branding and dev mode
    /// are host props, not store state.
    pub fn select(gui: &GuiState, show_branding: bool, is_dev_mode: bool) -> Self {
        let loading_state = gui.project_state.loading_state;
        Self {
            is_full_screen: gui.mode.is_full_screen,
            is_player_only: gui.mode.is_player_only,
            is_auto_updating: loading_state.is_auto_updating(),
            is_manual_updating: loading_state.is_manual_updating(),
            is_save_success_alert_visible: gui.alerts.is_showing(SAVE_SUCCESS_ALERT_ID),
            stage_size_mode: gui.stage_size.stage_size,
            show_branding,
            is_dev_mode,
        }
    }
}

/// Callback slot a control is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageAction {
    SetStageSmall,
    SetStageLarge,
    SetStageFull,
    SetStageUnFull,
    ClickSave,
    KeyPress,
    DownloadProject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    FullScreen,
    UnFullScreen,
    SmallStage,
    LargeStage,
    Save,
    Sb3Save,
    CheckboxCircle,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::FullScreen => "⛶",
            Icon::UnFullScreen => "🗗",
            Icon::SmallStage => "◧",
            Icon::LargeStage => "▣",
            Icon::Save => "💾",
            Icon::Sb3Save => "⬇",
            Icon::CheckboxCircle => "✔",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlButton {
    pub action: StageAction,
    pub icon: Icon,
    pub alt: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandingLink {
    pub href: &'static str,
    pub alt: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FullScreenButton {
    Branding(BrandingLink),
    Exit(ControlButton),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullScreenBar {
    pub stage_button: FullScreenButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIndicator {
    Saved,
    AutoSaving,
    Saving,
}

impl SaveIndicator {
    pub fn text(&self) -> &'static str {
        match self {
            SaveIndicator::Saved => SAVED_TEXT,
            SaveIndicator::AutoSaving => AUTO_SAVING_TEXT,
            SaveIndicator::Saving => SAVING_TEXT,
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        match self {
            SaveIndicator::Saved => Some(Icon::CheckboxCircle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleEntry {
    pub mode: StageSizeMode,
    pub action: StageAction,
    pub icon: Icon,
    pub title: String,
    pub selected: bool,
}

/// Small/large pair, always in that order, exactly one selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeToggleGroup {
    pub entries: [ToggleEntry; 2],
}

impl SizeToggleGroup {
    pub fn selected(&self) -> StageSizeMode {
        self.entries
            .iter()
            .find(|e| e.selected)
            .map(|e| e.mode)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalBar {
    pub indicators: Vec<SaveIndicator>,
    pub save: ControlButton,
    /// Dev-mode only; drawn when a download callback is bound.
    pub download: Option<ControlButton>,
    pub size_toggle: Option<SizeToggleGroup>,
    pub full_screen: ControlButton,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageHeader {
    FullScreen(FullScreenBar),
    Normal(NormalBar),
}

impl StageHeader {
    /// All buttons in render order (toggle entries excluded).
    pub fn buttons(&self) -> Vec<&ControlButton> {
        match self {
            StageHeader::FullScreen(bar) => match &bar.stage_button {
                FullScreenButton::Exit(button) => vec![button],
                FullScreenButton::Branding(_) => Vec::new(),
            },
            StageHeader::Normal(bar) => std::iter::once(&bar.save)
                .chain(bar.download.as_ref())
                .chain(std::iter::once(&bar.full_screen))
                .collect(),
        }
    }

    pub fn branding(&self) -> Option<&BrandingLink> {
        match self {
            StageHeader::FullScreen(FullScreenBar {
                stage_button: FullScreenButton::Branding(link),
            }) => Some(link),
            _ => None,
        }
    }

    pub fn size_toggle(&self) -> Option<&SizeToggleGroup> {
        match self {
            StageHeader::Normal(bar) => bar.size_toggle.as_ref(),
            StageHeader::FullScreen(_) => None,
        }
    }

    pub fn indicators(&self) -> &[SaveIndicator] {
        match self {
            StageHeader::Normal(bar) => &bar.indicators,
            StageHeader::FullScreen(_) => &[],
        }
    }

    pub fn count_action(&self, action: StageAction) -> usize {
        self.buttons().iter().filter(|b| b.action == action).count()
    }
}

/// Project the view state into a header description.
pub fn project(state: &StageViewState, messages: &dyn MessageResolver) -> StageHeader {
    if state.is_full_screen {
        let stage_button = if state.show_branding {
            FullScreenButton::Branding(BrandingLink { href: BRANDING_URL, alt: BRANDING_ALT })
        } else {
            FullScreenButton::Exit(ControlButton {
                action: StageAction::SetStageUnFull,
                icon: Icon::UnFullScreen,
                alt: messages.format_message(&UN_FULL_STAGE_SIZE),
                title: messages.format_message(&FULLSCREEN_CONTROL),
            })
        };
        return StageHeader::FullScreen(FullScreenBar { stage_button });
    }

    let indicators = [
        (state.is_save_success_alert_visible, SaveIndicator::Saved),
        (state.is_auto_updating, SaveIndicator::AutoSaving),
        (state.is_manual_updating, SaveIndicator::Saving),
    ]
    .into_iter()
    .filter_map(|(on, indicator)| on.then_some(indicator))
    .collect();

    let size_toggle = (!state.is_player_only).then(|| SizeToggleGroup {
        entries: [
            ToggleEntry {
                mode: StageSizeMode::Small,
                action: StageAction::SetStageSmall,
                icon: Icon::SmallStage,
                title: messages.format_message(&SMALL_STAGE_SIZE),
                selected: state.stage_size_mode == StageSizeMode::Small,
            },
            ToggleEntry {
                mode: StageSizeMode::Large,
                action: StageAction::SetStageLarge,
                icon: Icon::LargeStage,
                title: messages.format_message(&LARGE_STAGE_SIZE),
                selected: state.stage_size_mode == StageSizeMode::Large,
            },
        ],
    });

    let download = state.is_dev_mode.then(|| ControlButton {
        action: StageAction::DownloadProject,
        icon: Icon::Sb3Save,
        alt: DOWNLOAD_LABEL.to_string(),
        title: DOWNLOAD_LABEL.to_string(),
    });

    StageHeader::Normal(NormalBar {
        indicators,
        save: ControlButton {
            action: StageAction::ClickSave,
            icon: Icon::Save,
            alt: SAVE_LABEL.to_string(),
            title: SAVE_LABEL.to_string(),
        },
        download,
        size_toggle,
        full_screen: ControlButton {
            action: StageAction::SetStageFull,
            icon: Icon::FullScreen,
            alt: messages.format_message(&FULL_STAGE_SIZE),
            title: messages.format_message(&FULLSCREEN_CONTROL),
        },
    })
}
