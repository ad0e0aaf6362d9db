//! Project id sync - keeps the store's project id in step with the host's
//!
//! Wraps any UI unit and emits `SetProjectIdEvent` when the id changes.

mod memo;
mod project_id;
mod project_id_updater;

pub use memo::PropMemo;
pub use project_id::ProjectId;
pub use project_id_updater::{ProjectIdUpdater, with_project_id_updates};
