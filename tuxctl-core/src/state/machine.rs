//! Lifecycle state machine definition

use super::events::DriverEvent;

/// Driver lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// No `initialize` yet; every operation reports not ready
    #[default]
    Uninitialized,
    /// Initialization burst being queued
    Initializing,
    /// Commands accepted
    Ready,
    /// Board restarted, re-initialization about to be queued
    ResetPending,
}

impl DriverState {
    /// Check if caller operations are accepted
    pub fn is_ready(&self) -> bool {
        !matches!(self, DriverState::Uninitialized)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: DriverEvent) -> Self {
        use DriverEvent::*;
        use DriverState::*;

        match (self, event) {
            // Initialization is allowed from anywhere
            (_, Initialize) => Initializing,

            (Initializing, BurstQueued) => Ready,

            (Ready, ResetNotified) => ResetPending,

            // Default: stay in current state
            _ => self,
        }
    }
}
