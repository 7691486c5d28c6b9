//! Serial link abstraction
//!
//! The board is reached over a slow half-duplex line: one byte takes about a
//! millisecond at 9600 baud. Implementations must therefore hand frames to
//! a transmit buffer and return at once rather than wait for the bytes to
//! leave the wire.

/// Outbound half of the transport link
///
/// Methods take `&self` because the driver calls them from both the caller
/// context and the packet ingestion context. Implementations provide their
/// own interior synchronisation.
pub trait PacketLink {
    /// Error type for link operations
    type Error;

    /// Check that the link is attached and able to accept frames
    fn open(&self) -> Result<(), Self::Error>;

    /// Queue a complete command frame for transmission
    ///
    /// Must not block waiting for the frame to be transmitted.
    fn send(&self, frame: &[u8]) -> Result<(), Self::Error>;
}

impl<T: PacketLink + ?Sized> PacketLink for &T {
    type Error = T::Error;

    fn open(&self) -> Result<(), Self::Error> {
        T::open(self)
    }

    fn send(&self, frame: &[u8]) -> Result<(), Self::Error> {
        T::send(self, frame)
    }
}

/// Generic link failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The link is not attached to a device
    Closed,
    /// The transmit buffer cannot take another frame right now
    Busy,
}
