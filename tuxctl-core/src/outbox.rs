//! Ordered hand-off of frames to the link
//!
//! Frames leave the core while the lock is held but reach the link only
//! after it is released. Two contexts finishing at once could otherwise
//! put their frames on the wire in the opposite order to the pipeline.
//!
//! [`Outbox`] lets one context at a time act as the sender. Anyone else
//! who produces a frame meanwhile leaves it in the outbox and returns; the
//! sender collects it before giving up the role. A frame left waiting is
//! superseded by a newer one, which only happens when the pipeline was
//! cleared and the older frame was discarded with it.

use tuxctl_protocol::CommandFrame;

/// Single-slot outbox with a sender flag
#[derive(Debug, Default)]
pub struct Outbox {
    waiting: Option<CommandFrame>,
    sending: bool,
}

impl Outbox {
    pub const fn new() -> Self {
        Self {
            waiting: None,
            sending: false,
        }
    }

    /// Post a frame produced under the lock
    ///
    /// Returns the frame to send if the caller has become the sender. The
    /// sender must call [`Outbox::sent`] after each hand-off.
    pub fn post(&mut self, frame: Option<CommandFrame>) -> Option<CommandFrame> {
        if let Some(frame) = frame {
            self.waiting = Some(frame);
        }

        if self.sending {
            return None;
        }

        let next = self.waiting.take()?;
        self.sending = true;
        Some(next)
    }

    /// Report a completed hand-off
    ///
    /// Returns the next frame to send, or releases the sender role.
    pub fn sent(&mut self) -> Option<CommandFrame> {
        let next = self.waiting.take();
        if next.is_none() {
            self.sending = false;
        }
        next
    }

    /// Check if some context currently holds the sender role
    pub fn is_sending(&self) -> bool {
        self.sending
    }
}
