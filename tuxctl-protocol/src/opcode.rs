//! Opcode values for the Tux protocol
//!
//! The board packs a 5-bit command number into the opcode byte, leaving
//! bit 3 free. Commands carry the `0xC0` prefix, responses `0x40`.

/// Encode a command number into its opcode byte
pub const fn command(n: u8) -> u8 {
    0xC0 | (n & 0x07) | ((n & 0x18) << 1)
}

/// Encode a response number into its opcode byte
pub const fn response(n: u8) -> u8 {
    0x40 | (n & 0x07) | ((n & 0x18) << 1)
}

// Commands: Host → Board
/// Enable button interrupt-on-change events
pub const BIOC_ON: u8 = command(0x03);
/// Set the 7-segment display contents
pub const LED_SET: u8 = command(0x06);
/// Put the display in user-controlled mode
pub const LED_USR: u8 = command(0x08);
/// Reset the board to its power-on state
pub const RESET_DEV: u8 = command(0x14);

// Responses: Board → Host
/// Previous command processed
pub const ACK: u8 = response(0x00);
/// Button state changed
pub const BIOC_EVENT: u8 = response(0x01);
/// Board (re)started and lost its state
pub const RESET: u8 = response(0x06);
