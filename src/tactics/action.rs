//! Interface between unit actions and the turn-dispatch framework
//!
//! The dispatcher decides which action is active and feeds it input and
//! time; actions answer with these signals. Nothing here ever fails hard:
//! bad input is answered with [`ActionCommit::NoAction`].

use serde::Serialize;

use crate::tactics::level::Level;

/// Answer to a click while an action is prepared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionCommit {
    /// Input ignored, the action stays prepared
    NoAction,
    /// Action committed and will be maintained every tick
    StandardAction,
}

/// Answer to a per-tick maintain call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MaintenanceStatus {
    InProgress,
    /// Progress was made; the dispatcher should look for interrupts
    /// (e.g. a hostile unit came into view)
    CheckForInterrupts,
    Complete,
}

/// Something a unit can do on its turn
pub trait Action {
    /// Prepare the action; false means it is unavailable right now
    fn prep(&mut self, level: &mut Level) -> bool;

    /// Abandon a prepared or committed action
    fn cancel(&mut self, level: &mut Level);

    /// Cursor hovering over a board position
    fn mouse_over(&mut self, level: &mut Level, bx: f32, by: f32);

    /// Cursor click on a board position
    fn mouse_click(&mut self, level: &mut Level, bx: f32, by: f32) -> ActionCommit;

    /// Interrupt a committed action; returns whether it can be resumed
    fn pause(&mut self, level: &mut Level) -> bool;

    /// Advance a committed action by `dt` seconds
    fn maintain(&mut self, level: &mut Level, dt: f32) -> MaintenanceStatus;
}
