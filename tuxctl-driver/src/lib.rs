//! Non-blocking protocol driver for the Tux accessory board
//!
//! [`TuxDriver`] is the only thing a caller talks to. It exposes three
//! operations (initialize, set display, read buttons) that return at once,
//! plus [`TuxDriver::on_packet`] for the receive path. Commands are paced
//! by the board's acknowledgments, never by the caller.
//!
//! ```text
//!   caller ──► initialize / set_display / read_buttons ─┐
//!                                                       ▼
//!                                      ┌──────────────────────────────┐
//!                                      │ Mutex<RefCell<DriverCore>>   │
//!                                      └──────────────────────────────┘
//!                                          ▲                    │ frame
//!   rx_pump ──► PacketAssembler ──► on_packet                   ▼
//!                                                     PacketLink::send
//! ```
//!
//! The lock is only held while shared state is updated. Frames are handed
//! to the link after it is released.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod driver;
pub mod link;
pub mod request;

pub use driver::{DriverError, TuxDriver};
pub use link::{rx_pump, tx_pump, ChannelLink, TxChannel, TxFrame};
pub use request::{Request, Response};

pub use tuxctl_core::{DriverConfig, DriverState};
pub use tuxctl_protocol::{Button, Buttons, DisplayFrame};
