// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Thin wrappers over the i2c-dev ioctls this crate needs.

use std::os::unix::prelude::*;

use bitflags::bitflags;
use nix::{ioctl_read_bad, ioctl_write_int_bad};

// from include/uapi/linux/i2c-dev.h
const I2C_SLAVE: u16 = 0x0703;
const I2C_FUNCS: u16 = 0x0705;

bitflags! {
    /// Adapter functionality word reported by the I2C_FUNCS ioctl
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct I2CFunctions: libc::c_ulong {
        /// Plain I2C master transfers (i2c_master_send/recv)
        const I2C = 0x0000_0001;
        const TENBIT_ADDR = 0x0000_0002;
        const PROTOCOL_MANGLING = 0x0000_0004;
        const SMBUS_PEC = 0x0000_0008;
        const NOSTART = 0x0000_0010;
        const SMBUS_QUICK = 0x0001_0000;
        const SMBUS_READ_BYTE = 0x0002_0000;
        const SMBUS_WRITE_BYTE = 0x0004_0000;
        const SMBUS_READ_BYTE_DATA = 0x0008_0000;
        const SMBUS_WRITE_BYTE_DATA = 0x0010_0000;
        const SMBUS_READ_WORD_DATA = 0x0020_0000;
        const SMBUS_WRITE_WORD_DATA = 0x0040_0000;
        const SMBUS_PROC_CALL = 0x0080_0000;
        const SMBUS_READ_BLOCK_DATA = 0x0100_0000;
        const SMBUS_WRITE_BLOCK_DATA = 0x0200_0000;
        const SMBUS_READ_I2C_BLOCK = 0x0400_0000;
        const SMBUS_WRITE_I2C_BLOCK = 0x0800_0000;
    }
}

ioctl_write_int_bad!(ioctl_set_i2c_slave_address, I2C_SLAVE);
ioctl_read_bad!(ioctl_get_i2c_functionality, I2C_FUNCS, libc::c_ulong);

/// Bind the slave address all further reads/writes on `fd` talk to.
///
/// Typically the address is 7 bits; little validation is done here as
/// the kernel is good at making sure things are valid.
pub fn i2c_set_slave_address(fd: RawFd, slave_address: u16) -> Result<(), nix::Error> {
    unsafe {
        ioctl_set_i2c_slave_address(fd, libc::c_int::from(slave_address))?;
    }
    Ok(())
}

/// Query what the adapter behind `fd` can do.
pub fn i2c_get_functionality(fd: RawFd) -> Result<I2CFunctions, nix::Error> {
    let mut funcs: libc::c_ulong = 0;
    unsafe {
        ioctl_get_i2c_functionality(fd, &mut funcs)?;
    }
    Ok(I2CFunctions::from_bits_truncate(funcs))
}
