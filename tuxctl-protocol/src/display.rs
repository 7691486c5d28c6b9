//! 7-segment display encoding
//!
//! The board has four 7-segment digits, each with a decimal point. The host
//! sends the segment patterns directly: one byte per lit digit, ordered
//! from digit 0 (rightmost) upwards. Bit 4 of every segment byte is the
//! decimal point; the other seven bits follow the board's wiring.

use crate::command::{CommandFrame, MAX_COMMAND_LEN};
use crate::opcode;

/// Number of digits on the display
pub const DIGIT_COUNT: usize = 4;

/// Decimal point segment bit
pub const DECIMAL_POINT: u8 = 0x10;

/// Segment patterns for hex digits 0-F
pub const SEGMENT_TABLE: [u8; 16] = [
    0xE7, 0x06, 0xCB, 0x8F, // 0 1 2 3
    0x2E, 0xAD, 0xED, 0x86, // 4 5 6 7
    0xEF, 0xAE, 0xEE, 0x6D, // 8 9 A b
    0xE1, 0x4F, 0xE9, 0xE8, // C d E F
];

/// Largest minute count [`DisplayFrame::elapsed`] can show
const MAX_MINUTES: u32 = 99;

/// Requested display contents
///
/// Digit 0 is the rightmost digit. Bit `n` of `enabled` lights digit `n`,
/// bit `n` of `decimals` lights its decimal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFrame {
    /// Digit values, taken modulo 16
    pub digits: [u8; DIGIT_COUNT],
    /// Which digits are lit (low 4 bits)
    pub enabled: u8,
    /// Which digits show their decimal point (low 4 bits)
    pub decimals: u8,
}

impl DisplayFrame {
    /// Create a display request, truncating every field to its register width
    pub fn new(digits: [u8; DIGIT_COUNT], enabled: u8, decimals: u8) -> Self {
        Self {
            digits: digits.map(|d| d & 0x0F),
            enabled: enabled & 0x0F,
            decimals: decimals & 0x0F,
        }
    }

    /// Display with every digit off
    pub const fn blank() -> Self {
        Self {
            digits: [0; DIGIT_COUNT],
            enabled: 0,
            decimals: 0,
        }
    }

    /// Unpack the legacy single-word request format
    ///
    /// ```text
    ///  31   28 27   24 23   20 19   16 15   12 11    8 7     4 3     0
    /// ┌───────┬───────┬───────┬───────┬───────┬───────┬───────┬───────┐
    /// │   -   │  DP   │   -   │  EN   │ dig 3 │ dig 2 │ dig 1 │ dig 0 │
    /// └───────┴───────┴───────┴───────┴───────┴───────┴───────┴───────┘
    /// ```
    pub fn from_packed(arg: u32) -> Self {
        let mut digits = [0u8; DIGIT_COUNT];
        for (i, digit) in digits.iter_mut().enumerate() {
            *digit = ((arg >> (i * 4)) & 0x0F) as u8;
        }

        Self {
            digits,
            enabled: ((arg >> 16) & 0x0F) as u8,
            decimals: ((arg >> 24) & 0x0F) as u8,
        }
    }

    /// Show an elapsed time as `MM.SS`
    ///
    /// The leading minutes digit stays dark below ten minutes. Minutes
    /// saturate at 99.
    pub fn elapsed(total_seconds: u32) -> Self {
        let minutes = (total_seconds / 60).min(MAX_MINUTES);
        let seconds = total_seconds % 60;

        let digits = [
            (seconds % 10) as u8,
            (seconds / 10) as u8,
            (minutes % 10) as u8,
            (minutes / 10) as u8,
        ];
        let enabled = if minutes < 10 { 0x7 } else { 0xF };

        Self {
            digits,
            enabled,
            decimals: 0x4,
        }
    }

    /// Number of digits that will be lit
    pub fn lit_digits(&self) -> usize {
        (self.enabled & 0x0F).count_ones() as usize
    }

    /// Encode this request into an `LED_SET` command frame
    ///
    /// Layout: `[LED_SET][enable mask][segments for each lit digit...]`.
    /// Digits that are not enabled contribute no byte.
    pub fn encode(&self) -> CommandFrame {
        let mask = self.enabled & 0x0F;

        let mut bytes = [0u8; MAX_COMMAND_LEN];
        bytes[0] = opcode::LED_SET;
        bytes[1] = mask;
        let mut len = 2;

        for (pos, &digit) in self.digits.iter().enumerate() {
            if mask & (1 << pos) == 0 {
                continue;
            }

            let mut segments = SEGMENT_TABLE[(digit & 0x0F) as usize];
            if self.decimals & (1 << pos) != 0 {
                segments |= DECIMAL_POINT;
            }
            bytes[len] = segments;
            len += 1;
        }

        CommandFrame::from_array(bytes, len)
    }
}
