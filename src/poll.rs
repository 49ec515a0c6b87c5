// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Polled-device lifecycle and a fixed-interval scheduler shim.

use std::thread;
use std::time::Duration;

use crate::core::AttachError;
use crate::events::{DeviceDescriptor, EventSink};

/// Lifecycle and poll entry points of a polling-driven input driver
///
/// The host discovers a driver through its [`DeviceDescriptor`] and then
/// drives it: `attach` once before the first poll, `poll` once per tick
/// (serially, never concurrently with itself), `detach` after the last
/// poll and before the device is dropped.
pub trait PolledDevice {
    /// Static capabilities for the host's registration layer
    fn descriptor(&self) -> &DeviceDescriptor;

    /// One-time device initialization, before the first scheduled poll
    fn attach(&mut self) -> Result<(), AttachError>;

    /// Acquire one sample and publish it to the sink
    fn poll(&mut self, sink: &mut dyn EventSink);

    /// Teardown hook; no poll is in flight when this runs
    fn detach(&mut self);
}

/// Scheduler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Tick period; each tick runs one poll
    pub poll_interval: Duration,
}

impl PollConfig {
    pub fn from_interval_ms(poll_interval_ms: u64) -> PollConfig {
        PollConfig {
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

impl Default for PollConfig {
    fn default() -> PollConfig {
        PollConfig::from_interval_ms(50)
    }
}

/// Single-threaded cooperative poller
///
/// Owns one device and one sink and invokes the device's poll entry
/// point at the configured interval. Polls are serial by construction,
/// so the device needs no locking.
pub struct Poller<D: PolledDevice, S: EventSink> {
    device: D,
    sink: S,
    config: PollConfig,
}

impl<D, S> Poller<D, S>
where
    D: PolledDevice,
    S: EventSink,
{
    pub fn new(device: D, sink: S, config: PollConfig) -> Poller<D, S> {
        Poller {
            device,
            sink,
            config,
        }
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        self.device.descriptor()
    }

    /// Initialize the device; must be called once before ticking.
    pub fn attach(&mut self) -> Result<(), AttachError> {
        self.device.attach()
    }

    /// Run exactly one poll, without sleeping.
    pub fn tick(&mut self) {
        self.device.poll(&mut self.sink);
    }

    /// Run `ticks` polls, sleeping the configured interval between them.
    pub fn run_ticks(&mut self, ticks: usize) {
        for i in 0..ticks {
            self.tick();
            if i + 1 < ticks {
                thread::sleep(self.config.poll_interval);
            }
        }
    }

    /// Poll forever at the configured interval.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
            thread::sleep(self.config.poll_interval);
        }
    }

    /// Stop polling, run the device's teardown hook and recover the
    /// parts. No poll is in flight here: the poller is single threaded
    /// and this consumes it.
    pub fn detach(mut self) -> (D, S) {
        self.device.detach();
        (self.device, self.sink)
    }
}
