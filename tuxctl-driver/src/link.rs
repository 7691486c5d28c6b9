//! Channel-backed link and serial pumps
//!
//! [`ChannelLink`] lets the driver submit frames without touching the
//! serial port: frames land in an `embassy-sync` channel and [`tx_pump`]
//! writes them out. [`rx_pump`] does the reverse, turning the serial byte
//! stream into packets for [`TuxDriver::on_packet`].

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embedded_io_async::{Read, Write};
use heapless::Vec;
use tuxctl_hal::{LinkError, PacketLink};
use tuxctl_protocol::{PacketAssembler, MAX_COMMAND_LEN};

use crate::driver::TuxDriver;

/// Buffer size for serial receive
const RX_BUF_SIZE: usize = 16;

/// One frame waiting for the serial port
pub type TxFrame = Vec<u8, MAX_COMMAND_LEN>;

/// Channel between [`ChannelLink`] and [`tx_pump`]
pub type TxChannel<M, const N: usize> = Channel<M, TxFrame, N>;

/// [`PacketLink`] that queues frames on a channel
pub struct ChannelLink<'a, M: RawMutex, const N: usize> {
    channel: &'a TxChannel<M, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelLink<'a, M, N> {
    pub const fn new(channel: &'a TxChannel<M, N>) -> Self {
        Self { channel }
    }
}

impl<M: RawMutex, const N: usize> PacketLink for ChannelLink<'_, M, N> {
    type Error = LinkError;

    fn open(&self) -> Result<(), LinkError> {
        Ok(())
    }

    fn send(&self, frame: &[u8]) -> Result<(), LinkError> {
        let frame = TxFrame::from_slice(frame).map_err(|_| LinkError::Busy)?;
        self.channel.try_send(frame).map_err(|_| LinkError::Busy)
    }
}

/// Write queued frames to the serial port
///
/// Runs forever. Write errors are logged and the frame is dropped; the
/// board will not acknowledge it, so the pipeline waits for a reset.
pub async fn tx_pump<M: RawMutex, const N: usize, W: Write>(
    channel: &TxChannel<M, N>,
    writer: &mut W,
) {
    info!("Tux TX pump started");

    loop {
        let frame = channel.receive().await;

        if writer.write_all(&frame).await.is_err() {
            warn!("Serial write failed, frame dropped");
            continue;
        }
        if writer.flush().await.is_err() {
            warn!("Serial flush failed");
        }
        trace!("TX: {} bytes", frame.len());
    }
}

/// Read packets from the serial port and hand them to the driver
///
/// Returns `Ok(())` at end of stream, or the first read error.
pub async fn rx_pump<R: Read, M: RawMutex, L: PacketLink>(
    reader: &mut R,
    driver: &TuxDriver<M, L>,
) -> Result<(), R::Error> {
    info!("Tux RX pump started");

    let mut assembler = PacketAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            debug!("Serial stream closed");
            return Ok(());
        }
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            match assembler.feed(byte) {
                Ok(Some(packet)) => driver.on_packet(&packet),
                Ok(None) => {
                    // Need more bytes
                }
                Err(e) => warn!("Packet framing error: {:?}", e),
            }
        }
    }
}
