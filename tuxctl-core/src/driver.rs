//! Combined driver state
//!
//! [`DriverCore`] owns the lifecycle state, pipeline, button store and reset
//! coordinator. It is meant to sit behind a single lock: every method is
//! short, never blocks and returns the frame the caller must transmit once
//! the lock is released.

use heapless::Vec;
use tuxctl_protocol::{Buttons, CommandFrame, DisplayFrame, Packet, INIT_BURST};

use crate::buttons::ButtonStore;
use crate::config::DriverConfig;
use crate::pipeline::{Advance, CommandPipeline, DisplaySubmit, PipelineError, QUEUE_DEPTH};
use crate::reset::{ResetAction, ResetCoordinator, ResetPhase};
use crate::state::{DriverEvent, DriverState};

/// Setup commands plus one display frame
const MAX_BURST: usize = INIT_BURST.len() + 1;

/// Errors reported by [`DriverCore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreError {
    /// `initialize` has not been called
    NotReady,
    /// Pipeline had no room for the frames
    QueueFull,
    /// Acknowledgment with nothing in flight
    UnexpectedAck,
    /// Response opcode the driver does not handle
    UnknownOpcode(u8),
}

impl From<PipelineError> for CoreError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::QueueFull => CoreError::QueueFull,
        }
    }
}

/// All state shared between the caller and packet ingestion
#[derive(Debug)]
pub struct DriverCore {
    state: DriverState,
    pipeline: CommandPipeline<QUEUE_DEPTH>,
    buttons: ButtonStore,
    reset: ResetCoordinator,
    last_display: DisplayFrame,
    config: DriverConfig,
}

impl Default for DriverCore {
    fn default() -> Self {
        Self::new(DriverConfig::new())
    }
}

impl DriverCore {
    /// Create an uninitialized core
    pub const fn new(config: DriverConfig) -> Self {
        Self {
            state: DriverState::Uninitialized,
            pipeline: CommandPipeline::new(),
            buttons: ButtonStore::new(),
            reset: ResetCoordinator::new(),
            last_display: DisplayFrame::blank(),
            config,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Where the reset handshake stands
    pub fn reset_phase(&self) -> ResetPhase {
        self.reset.phase()
    }

    /// Unacknowledged commands, in flight first
    pub fn pipeline(&self) -> &CommandPipeline<QUEUE_DEPTH> {
        &self.pipeline
    }

    /// Display contents the board should currently show
    pub fn last_display(&self) -> DisplayFrame {
        self.last_display
    }

    /// Start a fresh session with the board
    ///
    /// Drops anything still queued, reports every button released and
    /// queues the setup burst. A frame already in flight stays in flight
    /// and the burst follows its acknowledgment. Returns the frame to
    /// transmit if the link was free.
    pub fn initialize(&mut self) -> Result<Option<CommandFrame>, CoreError> {
        self.state = self.state.transition(DriverEvent::Initialize);
        self.reset.rearm();
        self.last_display = DisplayFrame::blank();

        let display = self.config.initial_display;
        if let Some(frame) = display {
            self.last_display = frame;
        }

        self.pipeline.drop_pending();
        self.queue_setup(display)
    }

    /// Request new display contents
    pub fn set_display(&mut self, frame: DisplayFrame) -> Result<DisplaySubmit, CoreError> {
        if !self.state.is_ready() {
            return Err(CoreError::NotReady);
        }

        self.last_display = frame;
        Ok(self.pipeline.replace_pending_display(frame.encode())?)
    }

    /// Latest button snapshot
    pub fn read_buttons(&self) -> Result<Buttons, CoreError> {
        if !self.state.is_ready() {
            return Err(CoreError::NotReady);
        }

        self.buttons.read().ok_or(CoreError::NotReady)
    }

    /// Apply a packet from the board
    pub fn on_packet(&mut self, packet: Packet) -> Result<Option<CommandFrame>, CoreError> {
        if !self.state.is_ready() {
            return Err(CoreError::NotReady);
        }

        match packet {
            Packet::ButtonEvent(buttons) => {
                self.buttons.on_button_event(buttons);
                Ok(None)
            }
            Packet::Ack => match self.pipeline.on_acknowledged() {
                Advance::Next(frame) => Ok(Some(frame)),
                Advance::Idle => Ok(None),
                Advance::Unexpected => Err(CoreError::UnexpectedAck),
            },
            Packet::Reset => self.on_reset(),
            Packet::Unknown(op) => Err(CoreError::UnknownOpcode(op)),
        }
    }

    fn on_reset(&mut self) -> Result<Option<CommandFrame>, CoreError> {
        match self.reset.on_notification() {
            ResetAction::Reinitialize => {
                self.state = self.state.transition(DriverEvent::ResetNotified);
                self.state = self.state.transition(DriverEvent::Initialize);

                let display = self
                    .config
                    .restore_display_on_reset
                    .then_some(self.last_display);

                // The board lost whatever was in flight
                self.pipeline.clear();
                self.queue_setup(display)
            }
            ResetAction::Settle => Ok(None),
        }
    }

    /// Queue the setup burst behind whatever is left in the pipeline
    fn queue_setup(
        &mut self,
        display: Option<DisplayFrame>,
    ) -> Result<Option<CommandFrame>, CoreError> {
        self.buttons.reset();

        let mut burst: Vec<CommandFrame, MAX_BURST> =
            INIT_BURST.iter().map(|cmd| cmd.to_frame()).collect();
        if let Some(frame) = display {
            let _ = burst.push(frame.encode());
        }

        let tx = self.pipeline.enqueue_burst(&burst)?;
        self.state = self.state.transition(DriverEvent::BurstQueued);
        Ok(tx)
    }
}
