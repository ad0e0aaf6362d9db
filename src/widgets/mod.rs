//! UI Widgets - stage header and the project id wrapper
//!
//! Widgets talk to the host only through callbacks bound to the EventBus

pub mod project_id;
pub mod stage_header;
