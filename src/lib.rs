// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! # nunchuk-input
//!
//! Polling-driven driver for the Wii Nunchuk, an I2C-attached
//! motion/button controller. The crate covers the acquisition pipeline:
//! the two-command handshake that puts the peripheral into plain
//! reporting mode, the timed arm-and-read transaction that fetches one
//! 6-byte sample, and the bit-level decode of that sample into joystick,
//! accelerometer and button events published as an ordered batch with a
//! trailing sync marker.
//!
//! The host environment supplies the collaborators at the seams:
//! a [`core::BusTransport`] carries bytes to and from the addressed
//! peripheral (a Linux i2c-dev implementation ships in [`linux`]), an
//! [`events::EventSink`] consumes the decoded batches, and a scheduler
//! ticks the driver through [`poll::PolledDevice`] at a fixed interval
//! ([`poll::Poller`] is a ready-made single-threaded one).
//!
//! ```no_run
//! use nunchuk_input::linux::LinuxI2CBus;
//! use nunchuk_input::nunchuk::{Nunchuk, NUNCHUK_SLAVE_ADDR};
//! use nunchuk_input::poll::{PollConfig, Poller};
//! # use nunchuk_input::events::{Event, EventSink};
//! # struct Sink;
//! # impl EventSink for Sink {
//! #     fn event(&mut self, event: Event) { println!("{:?}", event); }
//! #     fn sync(&mut self) {}
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bus = LinuxI2CBus::new("/dev/i2c-1", NUNCHUK_SLAVE_ADDR)?;
//! let mut poller = Poller::new(Nunchuk::new(bus), Sink, PollConfig::default());
//! poller.attach()?;
//! poller.run();
//! # }
//! ```

pub mod core;
pub mod events;
pub mod mock;
pub mod nunchuk;
pub mod poll;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod ffi;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub mod linux;
