// Copyright 2026, the nunchuk-input developers
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/license/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option.  This file may not be copied, modified, or distributed
// except according to those terms.

//! Wii Nunchuk driver: init handshake, timed acquisition, decode.

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::core::{AttachError, BusTransport, PollError};
use crate::events::{AbsAxis, AbsParams, Button, DeviceDescriptor, Event, EventSink, RelAxis};
use crate::poll::PolledDevice;

/// I2C slave address of the nunchuk
pub const NUNCHUK_SLAVE_ADDR: u16 = 0x52;

// Handshake to select unencrypted reporting and the native sample
// format; the documentation is a bit lacking but writing these two
// register pairs is what every known host does.
const INIT_SEQUENCE: [[u8; 2]; 2] = [[0xF0, 0x55], [0xFB, 0x00]];

// Single-byte command telling the peripheral to latch its next sample.
const ARM_COMMAND: [u8; 1] = [0x00];

/// Length of one raw sample read
pub const SAMPLE_LEN: usize = 6;

// The peripheral NAKs or serves stale data if not given time to settle
// after each bus command.
const INIT_SETTLE: Duration = Duration::from_millis(1);
const POLL_SETTLE: Duration = Duration::from_millis(20);

static DESCRIPTOR: DeviceDescriptor = DeviceDescriptor {
    name: "Wii Nunchuk",
    compatible: &["nintendo,nunchuk"],
    abs_x: AbsParams {
        min: 0,
        max: 255,
        fuzz: 4,
        flat: 8,
    },
    abs_y: AbsParams {
        min: 0,
        max: 255,
        fuzz: 4,
        flat: 8,
    },
};

/// One decoded nunchuk sample
///
/// Built only from a complete 6-byte read; a short read skips the poll
/// rather than producing a partial reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub joystick_x: u8,
    pub joystick_y: u8,
    /// 10-bit accelerometer value, widened without sign-extension
    pub accel_x: i32,
    pub accel_y: i32,
    pub accel_z: i32,
    pub c_pressed: bool,
    pub z_pressed: bool,
}

impl Reading {
    /// Decode one raw 6-byte sample.
    ///
    /// Joystick bytes pass through unchanged. Each accelerometer axis is
    /// 10 bits: the top 8 live in their own byte, the low 2 are packed
    /// into byte 5 (bits 2-3 for X, 4-5 for Y, 6-7 for Z). Buttons are
    /// active-low on the wire and inverted here so `true` means pressed.
    pub fn from_data(data: &[u8; SAMPLE_LEN]) -> Reading {
        Reading {
            joystick_x: data[0],
            joystick_y: data[1],
            accel_x: (data[2] as i32) << 2 | ((data[5] as i32 >> 2) & 0b11),
            accel_y: (data[3] as i32) << 2 | ((data[5] as i32 >> 4) & 0b11),
            accel_z: (data[4] as i32) << 2 | ((data[5] as i32 >> 6) & 0b11),
            z_pressed: data[5] & 0b01 == 0,
            c_pressed: data[5] & 0b10 == 0,
        }
    }

    /// Accelerometer values under a two's-complement 10-bit reading.
    ///
    /// Whether the hardware means these as unsigned magnitudes or signed
    /// accelerations is not settled; the raw fields keep the bit-exact
    /// unsigned widening and this view is offered for callers that want
    /// the signed interpretation.
    pub fn signed_accel(&self) -> (i32, i32, i32) {
        (
            sign_extend_10(self.accel_x),
            sign_extend_10(self.accel_y),
            sign_extend_10(self.accel_z),
        )
    }

    /// Publish this reading as one event batch.
    ///
    /// The order is fixed: abs X, abs Y, rel X, rel Y, rel Z, key Z,
    /// key C, sync. Consumers may rely on it for batching.
    pub fn publish(&self, sink: &mut dyn EventSink) {
        sink.event(Event::Absolute {
            axis: AbsAxis::X,
            value: self.joystick_x,
        });
        sink.event(Event::Absolute {
            axis: AbsAxis::Y,
            value: self.joystick_y,
        });
        sink.event(Event::Relative {
            axis: RelAxis::X,
            value: self.accel_x,
        });
        sink.event(Event::Relative {
            axis: RelAxis::Y,
            value: self.accel_y,
        });
        sink.event(Event::Relative {
            axis: RelAxis::Z,
            value: self.accel_z,
        });
        sink.event(Event::Key {
            button: Button::Z,
            pressed: self.z_pressed,
        });
        sink.event(Event::Key {
            button: Button::C,
            pressed: self.c_pressed,
        });
        sink.sync();
    }
}

fn sign_extend_10(value: i32) -> i32 {
    (value << 22) >> 22
}

/// Wii Nunchuk over a byte-level bus transport
///
/// Owns the transport for the lifetime of the driver instance; each poll
/// is a fresh transaction and no state is carried between polls.
pub struct Nunchuk<T: BusTransport> {
    bus: T,
}

impl<T> Nunchuk<T>
where
    T: BusTransport,
{
    /// Wrap an opened transport. The device is not touched until
    /// [`handshake`](Self::handshake) runs, normally via `attach`.
    pub fn new(bus: T) -> Nunchuk<T> {
        Nunchuk { bus }
    }

    /// Tear down and recover the transport.
    pub fn into_bus(self) -> T {
        self.bus
    }

    /// Send the init sequence to the nunchuk.
    ///
    /// Always issues both commands in order. A short or failed transfer
    /// on either is only logged: some peripheral firmware accepts a
    /// command without acknowledging it identically, and aborting here
    /// would brick setups that actually work.
    pub fn handshake(&mut self) {
        for (i, command) in INIT_SEQUENCE.iter().enumerate() {
            match self.bus.send(command) {
                Ok(n) if n == command.len() => debug!("init command #{i} ok"),
                Ok(n) => warn!(
                    "init command #{i} short transfer ({n} of {} bytes)",
                    command.len()
                ),
                Err(err) => warn!("init command #{i} failed: {err}"),
            }
            thread::sleep(INIT_SETTLE);
        }
    }

    /// Run one acquisition cycle and decode the result.
    ///
    /// Arms the peripheral, waits out the settle delays and reads the
    /// 6-byte sample. A short transfer on the arm command makes the
    /// subsequent read meaningless, so the cycle is abandoned; same for
    /// a short sample read.
    pub fn sample(&mut self) -> Result<Reading, PollError> {
        let mut buf = [0u8; SAMPLE_LEN];

        thread::sleep(POLL_SETTLE);

        let sent = self.bus.send(&ARM_COMMAND)?;
        if sent != ARM_COMMAND.len() {
            return Err(PollError::ShortTransfer {
                sent,
                expected: ARM_COMMAND.len(),
            });
        }

        thread::sleep(POLL_SETTLE);

        let got = self.bus.recv(&mut buf)?;
        if got != SAMPLE_LEN {
            return Err(PollError::ShortRead {
                got,
                expected: SAMPLE_LEN,
            });
        }
        Ok(Reading::from_data(&buf))
    }
}

impl<T> PolledDevice for Nunchuk<T>
where
    T: BusTransport,
{
    fn descriptor(&self) -> &DeviceDescriptor {
        &DESCRIPTOR
    }

    fn attach(&mut self) -> Result<(), AttachError> {
        self.handshake();
        Ok(())
    }

    /// One scheduled tick. A failed cycle publishes nothing, not even a
    /// sync; the next tick is 50 ms away and starts clean.
    fn poll(&mut self, sink: &mut dyn EventSink) {
        match self.sample() {
            Ok(reading) => reading.publish(sink),
            Err(err) => debug!("poll skipped: {err}"),
        }
    }

    fn detach(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::mock::{EventRecorder, MockBus, Recorded, SendBehavior};

    #[test]
    fn decode_is_deterministic() {
        let raw = [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC];
        assert_eq!(Reading::from_data(&raw), Reading::from_data(&raw));
    }

    #[test]
    fn decode_worked_example() {
        let reading = Reading::from_data(&[0x80, 0x40, 0x10, 0x20, 0x30, 0b1100_0101]);
        assert_eq!(reading.joystick_x, 128);
        assert_eq!(reading.joystick_y, 64);
        assert_eq!(reading.accel_x, 65);
        assert_eq!(reading.accel_y, 128);
        assert_eq!(reading.accel_z, 195);
        assert!(!reading.z_pressed);
        assert!(reading.c_pressed);
    }

    #[test]
    fn decode_all_zero_sample() {
        let reading = Reading::from_data(&[0; 6]);
        assert_eq!(reading.joystick_x, 0);
        assert_eq!(reading.joystick_y, 0);
        assert_eq!((reading.accel_x, reading.accel_y, reading.accel_z), (0, 0, 0));
        // cleared bits mean pressed
        assert!(reading.z_pressed);
        assert!(reading.c_pressed);
    }

    #[test]
    fn joystick_bytes_pass_through() {
        for (x, y) in [(0u8, 255u8), (255, 0), (127, 128)] {
            let reading = Reading::from_data(&[x, y, 0, 0, 0, 0]);
            assert_eq!(reading.joystick_x, x);
            assert_eq!(reading.joystick_y, y);
        }
    }

    #[test]
    fn accel_low_bits_come_from_byte_five() {
        for b5 in 0u16..=255 {
            let b5 = b5 as u8;
            let reading = Reading::from_data(&[0, 0, 0xAB, 0xCD, 0xEF, b5]);
            assert_eq!(reading.accel_x & 0b11, (b5 as i32 >> 2) & 0b11);
            assert_eq!(reading.accel_y & 0b11, (b5 as i32 >> 4) & 0b11);
            assert_eq!(reading.accel_z & 0b11, (b5 as i32 >> 6) & 0b11);
            assert_eq!(reading.accel_x >> 2, 0xAB);
            assert_eq!(reading.accel_y >> 2, 0xCD);
            assert_eq!(reading.accel_z >> 2, 0xEF);
        }
    }

    #[test]
    fn buttons_are_active_low() {
        for b5 in 0u8..=0b11 {
            let reading = Reading::from_data(&[0, 0, 0, 0, 0, b5]);
            assert_eq!(reading.z_pressed, b5 & 0b01 == 0);
            assert_eq!(reading.c_pressed, b5 & 0b10 == 0);
        }
    }

    #[test]
    fn signed_accel_view() {
        let reading = Reading {
            joystick_x: 0,
            joystick_y: 0,
            accel_x: 0x3FF,
            accel_y: 0x200,
            accel_z: 100,
            c_pressed: false,
            z_pressed: false,
        };
        assert_eq!(reading.signed_accel(), (-1, -512, 100));
    }

    #[test]
    fn handshake_sends_fixed_sequence() {
        let mut nunchuk = Nunchuk::new(MockBus::new());
        nunchuk.handshake();
        assert_eq!(
            nunchuk.into_bus().sends(),
            &[vec![0xF0, 0x55], vec![0xFB, 0x00]]
        );
    }

    #[test]
    fn handshake_continues_past_failures() {
        let mut bus = MockBus::new();
        bus.script_send(SendBehavior::Short(1));
        bus.script_send(SendBehavior::Fail);
        let mut nunchuk = Nunchuk::new(bus);
        nunchuk.handshake();
        // both commands still went out, in order
        assert_eq!(
            nunchuk.into_bus().sends(),
            &[vec![0xF0, 0x55], vec![0xFB, 0x00]]
        );
    }

    #[test]
    fn attach_is_tolerant_of_transport_errors() {
        let mut bus = MockBus::new();
        bus.script_send(SendBehavior::Fail);
        bus.script_send(SendBehavior::Fail);
        let mut nunchuk = Nunchuk::new(bus);
        assert!(nunchuk.attach().is_ok());
    }

    #[test]
    fn short_arm_transfer_aborts_the_poll() {
        let mut bus = MockBus::new();
        bus.script_send(SendBehavior::Short(0));
        bus.queue_recv(&[1, 2, 3, 4, 5, 6]);
        let mut nunchuk = Nunchuk::new(bus);

        let mut recorder = EventRecorder::new();
        nunchuk.poll(&mut recorder);
        assert!(recorder.log.is_empty());
    }

    #[test]
    fn short_sample_read_aborts_the_poll() {
        let mut bus = MockBus::new();
        bus.queue_recv(&[1, 2, 3, 4]);
        let mut nunchuk = Nunchuk::new(bus);

        assert!(matches!(
            nunchuk.sample(),
            Err(PollError::ShortRead {
                got: 4,
                expected: 6
            })
        ));
    }

    #[test]
    fn poll_publishes_in_fixed_order() {
        let mut bus = MockBus::new();
        bus.queue_recv(&[0x80, 0x40, 0x10, 0x20, 0x30, 0b1100_0101]);
        let mut nunchuk = Nunchuk::new(bus);

        let mut recorder = EventRecorder::new();
        nunchuk.poll(&mut recorder);
        assert_eq!(
            recorder.log,
            vec![
                Recorded::Event(Event::Absolute {
                    axis: AbsAxis::X,
                    value: 128
                }),
                Recorded::Event(Event::Absolute {
                    axis: AbsAxis::Y,
                    value: 64
                }),
                Recorded::Event(Event::Relative {
                    axis: RelAxis::X,
                    value: 65
                }),
                Recorded::Event(Event::Relative {
                    axis: RelAxis::Y,
                    value: 128
                }),
                Recorded::Event(Event::Relative {
                    axis: RelAxis::Z,
                    value: 195
                }),
                Recorded::Event(Event::Key {
                    button: Button::Z,
                    pressed: false
                }),
                Recorded::Event(Event::Key {
                    button: Button::C,
                    pressed: true
                }),
                Recorded::Sync,
            ]
        );
    }

    #[test]
    fn failed_tick_self_heals_on_the_next_one() {
        let mut bus = MockBus::new();
        bus.script_send(SendBehavior::Fail);
        bus.queue_recv(&[0; 6]);
        let mut nunchuk = Nunchuk::new(bus);

        let mut recorder = EventRecorder::new();
        nunchuk.poll(&mut recorder);
        assert!(recorder.log.is_empty());

        nunchuk.poll(&mut recorder);
        assert_eq!(recorder.log.len(), 8);
        assert_eq!(recorder.log.last(), Some(&Recorded::Sync));
    }

    #[test]
    fn sample_waits_out_both_settle_delays() {
        let mut bus = MockBus::new();
        bus.queue_recv(&[0; 6]);
        let mut nunchuk = Nunchuk::new(bus);

        let start = Instant::now();
        nunchuk.sample().unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn descriptor_matches_the_hardware() {
        let nunchuk = Nunchuk::new(MockBus::new());
        let desc = nunchuk.descriptor();
        assert_eq!(desc.name, "Wii Nunchuk");
        assert_eq!(desc.compatible, &["nintendo,nunchuk"]);
        assert_eq!(desc.abs_x.min, 0);
        assert_eq!(desc.abs_x.max, 255);
    }
}
