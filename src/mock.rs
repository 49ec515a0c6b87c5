// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory test doubles for the bus transport and the event sink.

use std::collections::VecDeque;
use std::io;

use crate::core::{BusError, BusResult, BusTransport};
use crate::events::{Event, EventSink};

/// Scripted outcome for one `send` on the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendBehavior {
    /// Report the full buffer as transferred
    Full,
    /// Report only this many bytes as transferred
    Short(usize),
    /// Fail with an I/O error
    Fail,
}

/// Mock bus transport
///
/// Records every sent buffer, serves queued payloads on `recv`, and can
/// be scripted to short-transfer or fail on upcoming sends. Unscripted
/// sends transfer fully; an empty recv queue reads zero bytes.
#[derive(Debug, Default)]
pub struct MockBus {
    sends: Vec<Vec<u8>>,
    recv_queue: VecDeque<Vec<u8>>,
    send_script: VecDeque<SendBehavior>,
}

impl MockBus {
    pub fn new() -> MockBus {
        MockBus::default()
    }

    /// Queue a payload to serve on the next `recv`
    pub fn queue_recv(&mut self, data: &[u8]) {
        self.recv_queue.push_back(data.to_vec());
    }

    /// Script the outcome of the next unscripted `send`
    pub fn script_send(&mut self, behavior: SendBehavior) {
        self.send_script.push_back(behavior);
    }

    /// Every buffer sent so far, in order
    pub fn sends(&self) -> &[Vec<u8>] {
        &self.sends
    }
}

impl BusTransport for MockBus {
    fn send(&mut self, data: &[u8]) -> BusResult<usize> {
        self.sends.push(data.to_vec());
        match self.send_script.pop_front().unwrap_or(SendBehavior::Full) {
            SendBehavior::Full => Ok(data.len()),
            SendBehavior::Short(n) => Ok(n.min(data.len())),
            SendBehavior::Fail => Err(BusError::Io(io::Error::new(
                io::ErrorKind::Other,
                "scripted send failure",
            ))),
        }
    }

    fn recv(&mut self, data: &mut [u8]) -> BusResult<usize> {
        match self.recv_queue.pop_front() {
            Some(payload) => {
                let n = payload.len().min(data.len());
                data[..n].copy_from_slice(&payload[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

/// One entry in an [`EventRecorder`] log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Event(Event),
    Sync,
}

/// Event sink that appends everything to a log for assertions
#[derive(Debug, Default)]
pub struct EventRecorder {
    pub log: Vec<Recorded>,
}

impl EventRecorder {
    pub fn new() -> EventRecorder {
        EventRecorder::default()
    }

    /// The events of the log, with sync markers filtered out
    pub fn events(&self) -> Vec<Event> {
        self.log
            .iter()
            .filter_map(|entry| match entry {
                Recorded::Event(event) => Some(*event),
                Recorded::Sync => None,
            })
            .collect()
    }
}

impl EventSink for EventRecorder {
    fn event(&mut self, event: Event) {
        self.log.push(Recorded::Event(event));
    }

    fn sync(&mut self) {
        self.log.push(Recorded::Sync);
    }
}
