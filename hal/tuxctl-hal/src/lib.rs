//! Tuxctl Hardware Abstraction Layer
//!
//! This crate defines what the protocol driver needs from the serial
//! transport. Concrete transports (a line discipline, a buffered UART, an
//! in-memory channel for tests) implement these traits so the driver never
//! depends on a particular serial stack.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Caller (game loop, input reader, ...)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tuxctl-driver (facade)                 │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tuxctl-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  serial line  │       │  channel link │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`link::PacketLink`] - Non-blocking frame submission to the board

#![no_std]
#![deny(unsafe_code)]

pub mod link;

pub use link::{LinkError, PacketLink};
