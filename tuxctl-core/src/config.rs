//! Driver configuration

use tuxctl_protocol::DisplayFrame;

/// Driver behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverConfig {
    /// Re-send the last display frame after a board reset
    pub restore_display_on_reset: bool,
    /// Display frame appended to the initialization burst
    pub initial_display: Option<DisplayFrame>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverConfig {
    pub const fn new() -> Self {
        Self {
            restore_display_on_reset: true,
            initial_display: None,
        }
    }
}
