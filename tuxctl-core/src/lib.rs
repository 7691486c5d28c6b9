//! Transport-agnostic driver logic for the Tux accessory board
//!
//! This crate contains everything the driver decides without touching the
//! serial link:
//!
//! - Driver lifecycle state machine
//! - Single-in-flight command pipeline
//! - Button state store
//! - Reset notification handling
//! - Ordered hand-off of frames to the link
//! - [`DriverCore`], which ties them together behind one `&mut self`
//!
//! Every operation returns the frame (if any) that must be handed to the
//! link next. The caller owns the lock and the link, so transmission never
//! happens while shared state is borrowed.

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod config;
pub mod driver;
pub mod outbox;
pub mod pipeline;
pub mod reset;
pub mod state;

pub use buttons::ButtonStore;
pub use config::DriverConfig;
pub use driver::{CoreError, DriverCore};
pub use outbox::Outbox;
pub use pipeline::{Advance, CommandPipeline, DisplaySubmit, PipelineError, QUEUE_DEPTH};
pub use reset::{ResetAction, ResetCoordinator, ResetPhase};
pub use state::{DriverEvent, DriverState};
