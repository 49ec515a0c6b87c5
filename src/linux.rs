// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Bus transport backed by the Linux i2c-dev userspace interface.

use std::fs::{File, OpenOptions};
use std::io::prelude::*;
use std::os::unix::prelude::*;
use std::path::Path;

use crate::core::{BusError, BusResult, BusTransport};
use crate::ffi;

/// An addressed peripheral behind a `/dev/i2c-N` character device
///
/// `write` and `read` on the bound fd are exactly `i2c_master_send` and
/// `i2c_master_recv` from userspace, transfer counts included.
pub struct LinuxI2CBus {
    devfile: File,
    slave_address: u16,
}

impl AsRawFd for LinuxI2CBus {
    fn as_raw_fd(&self) -> RawFd {
        self.devfile.as_raw_fd()
    }
}

impl LinuxI2CBus {
    /// Open the bus device at `path` and bind `slave_address`.
    ///
    /// Rejects adapters that cannot do plain I2C master transfers
    /// (SMBus-only controllers); the nunchuk protocol needs raw
    /// send/recv, not SMBus framing.
    pub fn new<P: AsRef<Path>>(path: P, slave_address: u16) -> BusResult<LinuxI2CBus> {
        let devfile = OpenOptions::new().read(true).write(true).open(path)?;
        let mut bus = LinuxI2CBus {
            devfile,
            slave_address: 0,
        };
        let funcs = ffi::i2c_get_functionality(bus.as_raw_fd())?;
        if !funcs.contains(ffi::I2CFunctions::I2C) {
            return Err(BusError::AdapterCapability("plain I2C master transfers"));
        }
        bus.set_slave_address(slave_address)?;
        Ok(bus)
    }

    fn set_slave_address(&mut self, slave_address: u16) -> BusResult<()> {
        ffi::i2c_set_slave_address(self.as_raw_fd(), slave_address)?;
        self.slave_address = slave_address;
        Ok(())
    }

    /// The address this handle is bound to
    pub fn slave_address(&self) -> u16 {
        self.slave_address
    }
}

impl BusTransport for LinuxI2CBus {
    fn send(&mut self, data: &[u8]) -> BusResult<usize> {
        Ok(self.devfile.write(data)?)
    }

    fn recv(&mut self, data: &mut [u8]) -> BusResult<usize> {
        Ok(self.devfile.read(data)?)
    }
}
