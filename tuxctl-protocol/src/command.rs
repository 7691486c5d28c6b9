//! Outbound command frames
//!
//! A command frame is the complete byte sequence for one command: the
//! opcode followed by its arguments. Frames are built once and never
//! modified afterwards; the pipeline only moves them around.

use crate::display::DisplayFrame;
use crate::opcode;

/// Longest command the host sends (`LED_SET` with four digits)
pub const MAX_COMMAND_LEN: usize = 6;

/// Commands sent to the board to bring it into a usable state
///
/// The board answers every one of them with an `ACK`, so they go through
/// the pipeline one at a time like any other command.
pub const INIT_BURST: [Command; 3] = [
    Command::ResetDevice,
    Command::UserLedMode,
    Command::ButtonEventsOn,
];

/// Command kinds the driver issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    ResetDevice,
    UserLedMode,
    ButtonEventsOn,
    SetDisplay,
    /// Any opcode the driver does not issue itself
    Other(u8),
}

/// High-level command, encoded into a [`CommandFrame`] before queueing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reset the board to power-on state
    ResetDevice,
    /// Hand control of the display to the host
    UserLedMode,
    /// Report button changes as they happen
    ButtonEventsOn,
    /// Show a value on the 7-segment display
    SetDisplay(DisplayFrame),
}

impl Command {
    /// Encode this command into a frame
    pub fn to_frame(&self) -> CommandFrame {
        match self {
            Command::ResetDevice => CommandFrame::opcode_only(opcode::RESET_DEV),
            Command::UserLedMode => CommandFrame::opcode_only(opcode::LED_USR),
            Command::ButtonEventsOn => CommandFrame::opcode_only(opcode::BIOC_ON),
            Command::SetDisplay(display) => display.encode(),
        }
    }
}

/// One encoded command, ready to transmit
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame {
    bytes: [u8; MAX_COMMAND_LEN],
    len: u8,
}

impl CommandFrame {
    /// Create a frame with no arguments
    pub const fn opcode_only(opcode: u8) -> Self {
        let mut bytes = [0u8; MAX_COMMAND_LEN];
        bytes[0] = opcode;
        Self { bytes, len: 1 }
    }

    /// Wrap an already laid out buffer; `len` must be in `1..=MAX_COMMAND_LEN`
    pub(crate) const fn from_array(bytes: [u8; MAX_COMMAND_LEN], len: usize) -> Self {
        Self {
            bytes,
            len: len as u8,
        }
    }

    /// The bytes to put on the wire
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Frames always hold at least the opcode
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn kind(&self) -> CommandKind {
        match self.opcode() {
            opcode::RESET_DEV => CommandKind::ResetDevice,
            opcode::LED_USR => CommandKind::UserLedMode,
            opcode::BIOC_ON => CommandKind::ButtonEventsOn,
            opcode::LED_SET => CommandKind::SetDisplay,
            other => CommandKind::Other(other),
        }
    }

    /// Check if this frame updates the display
    pub fn is_display(&self) -> bool {
        self.kind() == CommandKind::SetDisplay
    }
}

impl core::fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CommandFrame").field(&self.as_bytes()).finish()
    }
}
