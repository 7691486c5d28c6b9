//! Shared test fixtures

#![allow(dead_code)]

use std::sync::Mutex;

use tuxctl_hal::{LinkError, PacketLink};
use tuxctl_protocol::opcode;

/// Link that records every frame it is asked to send
#[derive(Default)]
pub struct RecordingLink {
    sent: Mutex<Vec<Vec<u8>>>,
}

impl RecordingLink {
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Vec<u8>> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl PacketLink for RecordingLink {
    type Error = LinkError;

    fn open(&self) -> Result<(), LinkError> {
        Ok(())
    }

    fn send(&self, frame: &[u8]) -> Result<(), LinkError> {
        self.sent.lock().unwrap().push(frame.to_vec());
        Ok(())
    }
}

pub const ACK: [u8; 3] = [opcode::ACK, 0x80, 0x80];
pub const RESET: [u8; 3] = [opcode::RESET, 0x80, 0x80];

pub fn button_event(low: u8, high: u8) -> [u8; 3] {
    [opcode::BIOC_EVENT, 0x80 | low, 0x80 | high]
}
