// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Error that occurred while performing a bus operation
#[derive(Debug, Error)]
pub enum BusError {
    #[error("bus I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bus ioctl error: {0}")]
    Ioctl(#[from] nix::Error),
    #[error("adapter does not support {0}")]
    AdapterCapability(&'static str),
}

/// Result of a bus operation
pub type BusResult<T> = Result<T, BusError>;

/// Hard failure while bringing a driver instance up
///
/// Transport hiccups during the init handshake are deliberately not
/// represented here; the handshake tolerates them (see the driver module).
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("failed to open peripheral transport: {0}")]
    Bus(#[from] BusError),
    #[error("event device registration failed: {0}")]
    Registration(String),
}

/// Failure of a single acquisition cycle
///
/// Never propagated past the poll entry point; the affected tick simply
/// publishes nothing and the next tick starts fresh.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("short transfer on arm command: sent {sent} of {expected} bytes")]
    ShortTransfer { sent: usize, expected: usize },
    #[error("short sample read: got {got} of {expected} bytes")]
    ShortRead { got: usize, expected: usize },
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// Byte-level transport to an addressed peripheral on some bus
///
/// Typical implementations store a handle to the bus in use with the
/// slave address already bound, so callers deal purely in payload bytes.
/// The trait is modeled on the Linux i2c-dev master send/recv interface.
///
/// Both operations report the number of bytes actually transferred, which
/// may be less than requested. Short transfers are not errors at this
/// layer; each caller applies its own policy.
pub trait BusTransport {
    /// Write the provided buffer to the device
    fn send(&mut self, data: &[u8]) -> BusResult<usize>;

    /// Read from the device into the provided slice
    fn recv(&mut self, data: &mut [u8]) -> BusResult<usize>;
}
