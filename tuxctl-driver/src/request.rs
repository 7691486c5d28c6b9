//! Legacy control request dispatch
//!
//! Older callers drive the board through a small set of numbered control
//! requests, with the display contents packed into one word. [`Request`]
//! maps that interface onto the driver operations.

use embassy_sync::blocking_mutex::raw::RawMutex;
use tuxctl_hal::PacketLink;
use tuxctl_protocol::{Buttons, DisplayFrame};

use crate::driver::{DriverError, TuxDriver};

/// Control requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// Initialize the board
    Init,
    /// Read the button snapshot
    Buttons,
    /// Set the display from a packed word, see [`DisplayFrame::from_packed`]
    SetLed(u32),
    LedAck,
    LedRequest,
    ReadLed,
}

/// Successful request outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Done,
    Buttons(Buttons),
}

impl<M: RawMutex, L: PacketLink> TuxDriver<M, L> {
    /// Dispatch a control request
    pub fn handle(&self, request: Request) -> Result<Response, DriverError<L::Error>> {
        match request {
            Request::Init => self.initialize().map(|()| Response::Done),
            Request::Buttons => self.read_buttons().map(Response::Buttons),
            Request::SetLed(arg) => self
                .set_display(DisplayFrame::from_packed(arg))
                .map(|()| Response::Done),
            Request::LedAck | Request::LedRequest | Request::ReadLed => {
                Err(DriverError::Unsupported)
            }
        }
    }
}
