//! Reset notification handling
//!
//! A physical board reset is seen as two `RESET` packets in quick
//! succession. Only the first one triggers re-initialization; the second
//! re-arms the coordinator. Running the setup burst twice would queue a
//! duplicate set of commands behind the first.

/// Coordinator phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPhase {
    /// Waiting for the next reset
    #[default]
    Armed,
    /// First notification handled, waiting for the second
    ResetInProgress,
}

/// What to do about a reset notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetAction {
    /// Queue the initialization burst again
    Reinitialize,
    /// Second half of a reset already handled
    Settle,
}

/// Tracks which half of a reset is being observed
#[derive(Debug, Clone, Default)]
pub struct ResetCoordinator {
    phase: ResetPhase,
}

impl ResetCoordinator {
    pub const fn new() -> Self {
        Self {
            phase: ResetPhase::Armed,
        }
    }

    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    /// Process a `RESET` packet
    pub fn on_notification(&mut self) -> ResetAction {
        match self.phase {
            ResetPhase::Armed => {
                self.phase = ResetPhase::ResetInProgress;
                ResetAction::Reinitialize
            }
            ResetPhase::ResetInProgress => {
                self.phase = ResetPhase::Armed;
                ResetAction::Settle
            }
        }
    }

    /// Forget a half-observed reset
    pub fn rearm(&mut self) {
        self.phase = ResetPhase::Armed;
    }
}
