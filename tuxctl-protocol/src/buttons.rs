//! Button state decoding
//!
//! The board reports its eight buttons in two nibbles of a `BIOC_EVENT`
//! packet:
//!
//! ```text
//! byte 1: 1 x x x | C     | B    | A    | START
//! byte 2: 1 x x x | right | down | left | up
//! ```
//!
//! Buttons are active-low: a cleared bit means the button is held. The
//! left and down lines are swapped on the board relative to the order the
//! host reports, so decoding exchanges bits 5 and 6.

/// Physical buttons, by logical bit position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Start,
    A,
    B,
    C,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Start,
        Button::A,
        Button::B,
        Button::C,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Bit of this button in a [`Buttons`] mask
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Snapshot of all eight buttons in logical order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(u8);

impl Buttons {
    /// Nothing held
    pub const RELEASED: Buttons = Buttons(0xFF);

    const SWAP_LOW: u8 = 0x20;
    const SWAP_HIGH: u8 = 0x40;

    /// Wrap a mask that is already in logical order
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Decode the two payload bytes of a `BIOC_EVENT` packet
    pub fn decode(low: u8, high: u8) -> Self {
        Self(swap_wiring(((high & 0x0F) << 4) | (low & 0x0F)))
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if a button is currently held
    pub fn is_pressed(self, button: Button) -> bool {
        self.0 & button.mask() == 0
    }

    /// Iterate over the buttons currently held
    pub fn pressed(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |&b| self.is_pressed(b))
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Exchange bits 5 and 6
fn swap_wiring(raw: u8) -> u8 {
    let low = raw & Buttons::SWAP_LOW;
    let high = raw & Buttons::SWAP_HIGH;
    (raw & !(Buttons::SWAP_LOW | Buttons::SWAP_HIGH)) | (low << 1) | (high >> 1)
}
