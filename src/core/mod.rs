//! Core plumbing - event bus, events, store snapshot
//!
//! Independent of egui; widgets build on top of these.

pub mod event_bus;
pub mod gui_state;
pub mod stage_events;

pub use event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use gui_state::GuiState;
