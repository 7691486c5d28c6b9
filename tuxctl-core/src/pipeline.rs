//! Single-in-flight command pipeline
//!
//! The board processes one command at a time and acknowledges each with an
//! `ACK` packet. The pipeline holds every command that has not been
//! acknowledged yet. The front entry is in flight once it has been handed
//! out for transmission; nothing else is handed out until it is
//! acknowledged.
//!
//! ```text
//!            enqueue ──►┌──────┬──────┬──────┐
//!                       │ next │ .... │ tail │
//!   ACK ──► pop front ◄─┴──────┴──────┴──────┘
//!                         ▲
//!                         └─ in flight
//! ```

use heapless::Deque;
use tuxctl_protocol::CommandFrame;

/// Pipeline capacity
///
/// The largest burst is the reset recovery: three setup commands and a
/// display frame.
pub const QUEUE_DEPTH: usize = 8;

/// Pipeline errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// Not enough room for the whole burst; nothing was queued
    QueueFull,
}

/// Result of an acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Advance {
    /// Transmit this frame; it is now in flight
    Next(CommandFrame),
    /// Pipeline drained
    Idle,
    /// Nothing was in flight; no state changed
    Unexpected,
}

/// Result of a display submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplaySubmit {
    /// Pipeline was idle; transmit this frame now
    Transmit(CommandFrame),
    /// Appended behind the in-flight frame
    Queued,
    /// Overwrote a display frame that had not been sent yet
    Replaced,
}

/// Ordered command queue with at most one frame in flight
#[derive(Debug)]
pub struct CommandPipeline<const N: usize = QUEUE_DEPTH> {
    queue: Deque<CommandFrame, N>,
    in_flight: bool,
}

impl<const N: usize> Default for CommandPipeline<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CommandPipeline<N> {
    pub const fn new() -> Self {
        Self {
            queue: Deque::new(),
            in_flight: false,
        }
    }

    /// Append a burst of frames
    ///
    /// The burst is queued whole or not at all. Returns the frame to
    /// transmit if the pipeline was idle.
    pub fn enqueue_burst(
        &mut self,
        frames: &[CommandFrame],
    ) -> Result<Option<CommandFrame>, PipelineError> {
        if N - self.queue.len() < frames.len() {
            return Err(PipelineError::QueueFull);
        }

        for frame in frames {
            // Room checked above
            let _ = self.queue.push_back(*frame);
        }

        Ok(self.start_next())
    }

    /// Handle an acknowledgment from the board
    pub fn on_acknowledged(&mut self) -> Advance {
        if !self.in_flight {
            return Advance::Unexpected;
        }

        self.queue.pop_front();
        self.in_flight = false;

        match self.start_next() {
            Some(frame) => Advance::Next(frame),
            None => Advance::Idle,
        }
    }

    /// Submit a display frame, replacing any display update still waiting
    ///
    /// Only the latest display state matters to the board, so a queued
    /// update that has not been transmitted is overwritten in place. An
    /// update already in flight is left alone and the new one is appended.
    pub fn replace_pending_display(
        &mut self,
        frame: CommandFrame,
    ) -> Result<DisplaySubmit, PipelineError> {
        let skip = usize::from(self.in_flight);
        if let Some(pending) = self.queue.iter_mut().skip(skip).find(|f| f.is_display()) {
            *pending = frame;
            return Ok(DisplaySubmit::Replaced);
        }

        match self.enqueue_burst(core::slice::from_ref(&frame))? {
            Some(next) => Ok(DisplaySubmit::Transmit(next)),
            None => Ok(DisplaySubmit::Queued),
        }
    }

    /// Drop every frame that has not been handed out yet
    ///
    /// The frame in flight stays at the front; its acknowledgment is still
    /// expected.
    pub fn drop_pending(&mut self) {
        let keep = usize::from(self.in_flight);
        while self.queue.len() > keep {
            self.queue.pop_back();
        }
    }

    /// Drop every frame, including the one in flight
    pub fn clear(&mut self) {
        self.queue.clear();
        self.in_flight = false;
    }

    /// Check if nothing is in flight or waiting
    pub fn is_idle(&self) -> bool {
        !self.in_flight && self.queue.is_empty()
    }

    /// The frame awaiting acknowledgment
    pub fn in_flight(&self) -> Option<&CommandFrame> {
        if self.in_flight {
            self.queue.front()
        } else {
            None
        }
    }

    /// Number of unacknowledged frames, in flight included
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterate over unacknowledged frames in transmission order
    pub fn iter(&self) -> impl Iterator<Item = &CommandFrame> {
        self.queue.iter()
    }

    /// Mark the front frame in flight if the link is free
    fn start_next(&mut self) -> Option<CommandFrame> {
        if self.in_flight {
            return None;
        }

        let next = self.queue.front().copied()?;
        self.in_flight = true;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuxctl_protocol::{Command, DisplayFrame, INIT_BURST};

    fn init_frames() -> [CommandFrame; 3] {
        INIT_BURST.map(|cmd| cmd.to_frame())
    }

    fn display(digits: [u8; 4]) -> CommandFrame {
        Command::SetDisplay(DisplayFrame::new(digits, 0xF, 0)).to_frame()
    }

    #[test]
    fn test_burst_transmits_first_only() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        let frames = init_frames();

        let tx = pipeline.enqueue_burst(&frames).unwrap();
        assert_eq!(tx, Some(frames[0]));
        assert_eq!(pipeline.in_flight(), Some(&frames[0]));
        assert_eq!(pipeline.len(), 3);
    }

    #[test]
    fn test_acks_drain_in_order() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        let frames = init_frames();
        pipeline.enqueue_burst(&frames).unwrap();

        assert_eq!(pipeline.on_acknowledged(), Advance::Next(frames[1]));
        assert_eq!(pipeline.on_acknowledged(), Advance::Next(frames[2]));
        assert_eq!(pipeline.on_acknowledged(), Advance::Idle);
        assert!(pipeline.is_idle());
    }

    #[test]
    fn test_enqueue_while_busy_does_not_transmit() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        let frames = init_frames();
        pipeline.enqueue_burst(&frames[..1]).unwrap();

        assert_eq!(pipeline.enqueue_burst(&frames[1..]).unwrap(), None);
        assert_eq!(pipeline.len(), 3);
    }

    #[test]
    fn test_ack_while_idle_is_noop() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        assert_eq!(pipeline.on_acknowledged(), Advance::Unexpected);
        assert!(pipeline.is_idle());

        // A later burst still starts normally
        let frames = init_frames();
        assert_eq!(pipeline.enqueue_burst(&frames).unwrap(), Some(frames[0]));
    }

    #[test]
    fn test_burst_is_all_or_nothing() {
        let mut pipeline = CommandPipeline::<4>::new();
        let frames = init_frames();
        pipeline.enqueue_burst(&frames).unwrap();

        assert_eq!(pipeline.enqueue_burst(&frames), Err(PipelineError::QueueFull));
        assert_eq!(pipeline.len(), 3);
    }

    #[test]
    fn test_display_replaces_pending() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        pipeline.enqueue_burst(&init_frames()).unwrap();

        assert_eq!(
            pipeline.replace_pending_display(display([1, 2, 3, 4])),
            Ok(DisplaySubmit::Queued)
        );
        assert_eq!(
            pipeline.replace_pending_display(display([5, 6, 7, 8])),
            Ok(DisplaySubmit::Replaced)
        );

        let displays: heapless::Vec<_, 4> = pipeline.iter().filter(|f| f.is_display()).collect();
        assert_eq!(displays.len(), 1);
        assert_eq!(*displays[0], display([5, 6, 7, 8]));
    }

    #[test]
    fn test_display_in_flight_not_replaced() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        let first = display([1, 2, 3, 4]);
        let second = display([5, 6, 7, 8]);

        assert_eq!(
            pipeline.replace_pending_display(first),
            Ok(DisplaySubmit::Transmit(first))
        );
        assert_eq!(
            pipeline.replace_pending_display(second),
            Ok(DisplaySubmit::Queued)
        );
        assert_eq!(pipeline.in_flight(), Some(&first));
        assert_eq!(pipeline.on_acknowledged(), Advance::Next(second));
    }

    #[test]
    fn test_drop_pending_keeps_in_flight() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        let frames = init_frames();
        pipeline.enqueue_burst(&frames).unwrap();
        pipeline.drop_pending();

        assert_eq!(pipeline.len(), 1);
        assert_eq!(pipeline.in_flight(), Some(&frames[0]));
        assert_eq!(pipeline.enqueue_burst(&frames[1..]).unwrap(), None);
        assert_eq!(pipeline.on_acknowledged(), Advance::Next(frames[1]));
    }

    #[test]
    fn test_drop_pending_while_idle() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        pipeline.drop_pending();
        assert!(pipeline.is_idle());
    }

    #[test]
    fn test_clear_drops_in_flight() {
        let mut pipeline = CommandPipeline::<QUEUE_DEPTH>::new();
        pipeline.enqueue_burst(&init_frames()).unwrap();
        pipeline.clear();

        assert!(pipeline.is_idle());
        assert_eq!(pipeline.on_acknowledged(), Advance::Unexpected);
    }
}
