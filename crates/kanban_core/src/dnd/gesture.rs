//! Drag gesture state machine.
//!
//! `Idle -> Dragging(task) -> Idle`. A gesture ends on release, with or
//! without a valid target; there is no other cancellation path.

use crate::dnd::resolver::{find_source_task, resolve_drop, DropOutcome, DropTarget};
use crate::model::task::Task;
use crate::store::board_store::BoardStore;

/// Current phase of the pointer gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Copy of the task taken at drag start, rendered as the floating card.
    Dragging(Task),
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: GestureState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Task shown in the drag overlay, if a gesture is in flight.
    pub fn active_task(&self) -> Option<&Task> {
        match &self.state {
            GestureState::Dragging(task) => Some(task),
            GestureState::Idle => None,
        }
    }

    /// Starts a gesture for `source_id`.
    ///
    /// Unknown ids leave the session idle. Starting while another gesture is
    /// in flight replaces it.
    pub fn begin(&mut self, store: &BoardStore, source_id: &str) -> Option<&Task> {
        self.state = match find_source_task(store, source_id) {
            Some(task) => GestureState::Dragging(task.clone()),
            None => GestureState::Idle,
        };
        self.active_task()
    }

    /// Ends the gesture and resolves the drop. Always returns to `Idle`.
    pub fn end(
        &mut self,
        store: &BoardStore,
        source_id: &str,
        target: Option<&DropTarget>,
    ) -> DropOutcome {
        self.state = GestureState::Idle;
        resolve_drop(store, source_id, target)
    }
}
