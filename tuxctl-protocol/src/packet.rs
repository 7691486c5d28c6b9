//! Inbound packets from the board
//!
//! Every response is exactly [`PACKET_LEN`] bytes. [`Packet::parse`]
//! classifies a complete packet; [`PacketAssembler`] rebuilds packets from
//! a raw byte stream for transports that do not frame them already.

use heapless::Vec;

use crate::buttons::Buttons;
use crate::opcode;

/// Size of every board response
pub const PACKET_LEN: usize = 3;

/// Payload bytes carry bit 7 set, the opcode byte has it clear
const PAYLOAD_MARKER: u8 = 0x80;

/// Errors that can occur while reading packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Packet is not exactly three bytes long
    InvalidLength,
    /// A new opcode arrived before the previous packet was complete
    Desync,
}

/// A decoded board response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// The in-flight command was processed
    Ack,
    /// Button state changed
    ButtonEvent(Buttons),
    /// The board restarted and lost its state
    Reset,
    /// A response the driver does not act on
    Unknown(u8),
}

impl Packet {
    /// Parse a complete packet
    pub fn parse(bytes: &[u8]) -> Result<Self, PacketError> {
        let [op, b, c] = <[u8; PACKET_LEN]>::try_from(bytes)
            .map_err(|_| PacketError::InvalidLength)?;

        Ok(match op {
            opcode::ACK => Packet::Ack,
            opcode::BIOC_EVENT => Packet::ButtonEvent(Buttons::decode(b, c)),
            opcode::RESET => Packet::Reset,
            other => Packet::Unknown(other),
        })
    }
}

/// Rebuilds packets from a serial byte stream
#[derive(Debug, Clone, Default)]
pub struct PacketAssembler {
    buffer: Vec<u8, PACKET_LEN>,
}

impl PacketAssembler {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Drop any partial packet
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(packet))` when the byte completes a packet,
    /// `Ok(None)` when more bytes are needed. An opcode byte in the middle
    /// of a packet reports [`PacketError::Desync`]; the partial packet is
    /// discarded and assembly restarts from that opcode.
    pub fn feed(&mut self, byte: u8) -> Result<Option<[u8; PACKET_LEN]>, PacketError> {
        if byte & PAYLOAD_MARKER == 0 {
            let desynced = !self.buffer.is_empty();
            self.buffer.clear();
            // Cannot fail on an empty buffer
            let _ = self.buffer.push(byte);
            return if desynced {
                Err(PacketError::Desync)
            } else {
                Ok(None)
            };
        }

        if self.buffer.is_empty() {
            // Stray payload byte while waiting for an opcode
            return Ok(None);
        }

        let _ = self.buffer.push(byte);
        if self.buffer.is_full() {
            let mut packet = [0u8; PACKET_LEN];
            packet.copy_from_slice(&self.buffer);
            self.buffer.clear();
            return Ok(Some(packet));
        }

        Ok(None)
    }
}
