//! Latest button state reported by the board

use tuxctl_protocol::Buttons;

/// Holds the most recent button snapshot
///
/// Written by packet ingestion, read by the caller. Each update replaces
/// the whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct ButtonStore {
    current: Option<Buttons>,
}

impl ButtonStore {
    /// Create an empty store; reads fail until [`reset`](Self::reset)
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Forget the board state and report every button released
    pub fn reset(&mut self) {
        self.current = Some(Buttons::RELEASED);
    }

    /// Store the snapshot carried by a button event
    pub fn on_button_event(&mut self, buttons: Buttons) {
        self.current = Some(buttons);
    }

    /// Latest snapshot, or `None` if the store was never reset
    pub fn read(&self) -> Option<Buttons> {
        self.current
    }
}
