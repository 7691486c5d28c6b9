//! Lock-guarded driver facade

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use tuxctl_core::{
    CoreError, DisplaySubmit, DriverConfig, DriverCore, DriverState, Outbox, ResetPhase,
};
use tuxctl_hal::PacketLink;
use tuxctl_protocol::{Buttons, CommandFrame, DisplayFrame, Packet};

/// Errors returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError<E> {
    /// `initialize` has not been called
    NotReady,
    /// The link could not be opened
    Link(E),
    /// Request the driver does not implement
    Unsupported,
}

/// State guarded by the driver lock
struct Shared {
    core: DriverCore,
    outbox: Outbox,
}

/// Driver for one Tux board
///
/// `M` selects the raw mutex guarding the shared state: use
/// `CriticalSectionRawMutex` when the receive path runs in an interrupt or
/// another thread, `NoopRawMutex` when everything runs on one executor.
pub struct TuxDriver<M: RawMutex, L: PacketLink> {
    link: L,
    shared: Mutex<M, RefCell<Shared>>,
}

impl<M: RawMutex, L: PacketLink> TuxDriver<M, L> {
    /// Create a driver with the default configuration
    pub const fn new(link: L) -> Self {
        Self::with_config(link, DriverConfig::new())
    }

    pub const fn with_config(link: L, config: DriverConfig) -> Self {
        Self {
            link,
            shared: Mutex::new(RefCell::new(Shared {
                core: DriverCore::new(config),
                outbox: Outbox::new(),
            })),
        }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    /// Bring the board into a known state
    ///
    /// Queues the setup burst and returns without waiting for it to be
    /// acknowledged. Fails only if the link cannot be opened.
    pub fn initialize(&self) -> Result<(), DriverError<L::Error>> {
        self.link.open().map_err(DriverError::Link)?;

        let result = self.update(|core| match core.initialize() {
            Ok(frame) => (Ok(()), frame),
            Err(e) => (Err(e), None),
        });
        match result {
            Ok(()) => info!("Tux initialized"),
            Err(e) => warn!("Initialization burst not queued: {:?}", e),
        }

        Ok(())
    }

    /// Show new contents on the display
    ///
    /// Fire-and-forget: the update is queued behind any command in flight,
    /// replacing an older update that has not been sent yet.
    pub fn set_display(&self, frame: DisplayFrame) -> Result<(), DriverError<L::Error>> {
        let result = self.update(|core| match core.set_display(frame) {
            Ok(DisplaySubmit::Transmit(encoded)) => {
                (Ok(DisplaySubmit::Transmit(encoded)), Some(encoded))
            }
            other => (other, None),
        });
        match result {
            Ok(DisplaySubmit::Transmit(_)) => {}
            Ok(DisplaySubmit::Queued) => trace!("Display update queued"),
            Ok(DisplaySubmit::Replaced) => debug!("Display update replaced pending frame"),
            Err(CoreError::NotReady) => return Err(DriverError::NotReady),
            Err(e) => warn!("Display update dropped: {:?}", e),
        }

        Ok(())
    }

    /// Latest button snapshot reported by the board
    pub fn read_buttons(&self) -> Result<Buttons, DriverError<L::Error>> {
        self.with_core(|core| core.read_buttons())
            .map_err(|_| DriverError::NotReady)
    }

    /// Handle one complete packet from the board
    ///
    /// Called from the receive path, one packet at a time. Malformed or
    /// unexpected packets are logged and dropped.
    pub fn on_packet(&self, bytes: &[u8]) {
        let packet = match Packet::parse(bytes) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Malformed packet: {:?}", e);
                return;
            }
        };
        trace!("RX: {:?}", packet);

        let (result, phase) = self.update(|core| {
            let result = core.on_packet(packet);
            ((result, core.reset_phase()), result.ok().flatten())
        });
        match result {
            Ok(_) if packet == Packet::Reset => match phase {
                ResetPhase::ResetInProgress => info!("Board reset, re-initializing"),
                ResetPhase::Armed => debug!("Board reset settled"),
            },
            Ok(_) => {}
            Err(e) => warn!("Packet {:?} ignored: {:?}", packet, e),
        }
    }

    pub fn state(&self) -> DriverState {
        self.with_core(|core| core.state())
    }

    /// Check if every queued command has been acknowledged
    pub fn is_idle(&self) -> bool {
        self.shared.lock(|cell| {
            let shared = cell.borrow();
            shared.core.pipeline().is_idle() && !shared.outbox.is_sending()
        })
    }

    fn with_core<R>(&self, f: impl FnOnce(&mut DriverCore) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut().core))
    }

    /// Run `f` on the core, then send the frame it produced
    fn update<R>(&self, f: impl FnOnce(&mut DriverCore) -> (R, Option<CommandFrame>)) -> R {
        let (result, frame) = self.shared.lock(|cell| {
            let shared = &mut *cell.borrow_mut();
            let (result, frame) = f(&mut shared.core);
            (result, shared.outbox.post(frame))
        });
        self.transmit(frame);
        result
    }

    /// Hand frames to the link with the lock released
    ///
    /// Only the context holding the outbox sender role gets a frame here.
    /// It keeps sending until no frame is left waiting, so frames reach
    /// the link in the order the pipeline released them.
    fn transmit(&self, mut frame: Option<CommandFrame>) {
        while let Some(next) = frame {
            trace!("TX: {:?}", next);
            if self.link.send(next.as_bytes()).is_err() {
                // No retry: the pipeline stays stalled until the board resets
                warn!("Link send failed for {:?}", next.kind());
            }
            frame = self.shared.lock(|cell| cell.borrow_mut().outbox.sent());
        }
    }
}
