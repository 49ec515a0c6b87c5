// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Typed input events and the sink they are published to.
//!
//! One poll of a device produces a batch of events followed by a single
//! sync marker; consumers treat the batch as committed atomically once
//! the sync arrives. Ordering within a batch is part of the driver
//! contract and must be preserved by sink implementations.

/// Absolute-position axis codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsAxis {
    X,
    Y,
}

/// Relative-motion axis codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelAxis {
    X,
    Y,
    Z,
}

/// Button codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    C,
    Z,
}

/// One decoded input change, as a (code, value) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An absolute axis position
    Absolute { axis: AbsAxis, value: u8 },
    /// A relative axis quantity
    ///
    /// For the nunchuk these are 10-bit accelerometer readings widened
    /// to `i32` without sign-extension; see the driver module for the
    /// sign interpretation options.
    Relative { axis: RelAxis, value: i32 },
    /// A button state, `true` meaning physically pressed
    Key { button: Button, pressed: bool },
}

/// Consumer of decoded events
///
/// The driver calls `event` once per change and `sync` once per poll,
/// after the last event of the batch.
pub trait EventSink {
    /// Accept one event of the current batch
    fn event(&mut self, event: Event);

    /// Commit the current batch; everything since the previous sync
    /// should become visible to observers atomically
    fn sync(&mut self);
}

/// Range and filtering parameters for one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsParams {
    pub min: i32,
    pub max: i32,
    /// Noise filter: changes smaller than this may be discarded
    pub fuzz: i32,
    /// Dead zone around the center position
    pub flat: i32,
}

/// Static capabilities of a polled input device
///
/// A value object the host's registration layer consumes to announce the
/// device and route it by identifier; drivers expose one through
/// [`PolledDevice::descriptor`](crate::poll::PolledDevice::descriptor)
/// instead of registering themselves in any global table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Human-readable device name
    pub name: &'static str,
    /// Identifiers the host may match this driver against
    pub compatible: &'static [&'static str],
    pub abs_x: AbsParams,
    pub abs_y: AbsParams,
}
