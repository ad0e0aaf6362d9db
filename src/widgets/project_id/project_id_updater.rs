//! Wrapper that pushes host-side project id changes into the store.
//!
//! The host calls [`ProjectIdUpdater::show`] (or [`ProjectIdUpdater::update`])
//! every frame with the id it currently holds. The inner unit renders as
//! usual, then the id is compared with the one seen on the previous frame.
//! A difference emits exactly one `SetProjectIdEvent`; the first frame and
//! unchanged frames emit nothing.

use log::debug;

use super::memo::PropMemo;
use super::project_id::ProjectId;
use crate::core::event_bus::EventEmitter;
use crate::core::stage_events::SetProjectIdEvent;

type SetProjectId = Box<dyn Fn(Option<ProjectId>)>;

pub struct ProjectIdUpdater<W> {
    inner: W,
    memo: PropMemo<Option<ProjectId>>,
    set_project_id: SetProjectId,
}

/// Wrap `inner` so project id changes are emitted on `emitter`.
pub fn with_project_id_updates<W>(inner: W, emitter: EventEmitter) -> ProjectIdUpdater<W> {
    ProjectIdUpdater::new(inner, move |id| emitter.emit(SetProjectIdEvent(id)))
}

impl<W> ProjectIdUpdater<W> {
    /// Wrap `inner` with an arbitrary `set_project_id` dispatcher.
    pub fn new(inner: W, set_project_id: impl Fn(Option<ProjectId>) + 'static) -> Self {
        Self {
            inner,
            memo: PropMemo::new(),
            set_project_id: Box::new(set_project_id),
        }
    }

    /// Update notification. Returns true if `set_project_id` was dispatched.
    pub fn update(&mut self, project_id: Option<&ProjectId>) -> bool {
        let current = project_id.cloned();
        match self.memo.observe(&current) {
            Some(previous) => {
                debug!("Project id changed: {:?} -> {:?}", previous, current);
                (self.set_project_id)(current);
                true
            }
            None => false,
        }
    }

    /// Render the inner unit, then run the update check.
    pub fn show<R>(&mut self, project_id: Option<&ProjectId>, render: impl FnOnce(&mut W) -> R) -> R {
        let out = render(&mut self.inner);
        self.update(project_id);
        out
    }

    /// Last id seen, `None` before the first update.
    pub fn last_seen(&self) -> Option<Option<&ProjectId>> {
        self.memo.value().map(Option::as_ref)
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}
