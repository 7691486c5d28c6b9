//! Tux Accessory Board Protocol
//!
//! This crate defines the byte protocol spoken between the host and the
//! Tux button/LED accessory board over a 9600 baud serial line.
//!
//! # Protocol Overview
//!
//! Commands (host → board) are a single opcode byte followed by 0-5
//! argument bytes:
//! ```text
//! ┌────────┬──────────────┐
//! │ OPCODE │ ARGS         │
//! │ 1B     │ 0–5B         │
//! └────────┴──────────────┘
//! ```
//!
//! Responses (board → host) are always three bytes. The first byte has
//! bit 7 clear, the two payload bytes have bit 7 set:
//! ```text
//! ┌────────┬───────────┬───────────┐
//! │ OPCODE │ 1xxx DATA │ 1xxx DATA │
//! │ 1B     │ 1B        │ 1B        │
//! └────────┴───────────┴───────────┘
//! ```
//!
//! Every command is acknowledged with an `ACK` response and the board only
//! handles one command at a time. Flow control lives in `tuxctl-core`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buttons;
pub mod command;
pub mod display;
pub mod opcode;
pub mod packet;

pub use buttons::{Button, Buttons};
pub use command::{Command, CommandFrame, CommandKind, INIT_BURST, MAX_COMMAND_LEN};
pub use display::{DisplayFrame, DECIMAL_POINT, SEGMENT_TABLE};
pub use packet::{Packet, PacketAssembler, PacketError, PACKET_LEN};
