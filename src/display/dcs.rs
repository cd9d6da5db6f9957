/*
 *  display/dcs.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  MIPI Display Command Set commands and panel power sequences
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, version 2 of the License.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::display::error::DisplayError;
use crate::display::traits::{DsiHost, VirtualChannel};

/// DSI data type for a packed 24-bit RGB888 pixel stream
pub const PIXEL_STREAM_24BPP: u8 = 0x3E;

/// DCS commands used by this panel, each sent as a single byte write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DcsCommand {
    SleepIn = 0x10,
    SleepOut = 0x11,
    DisplayOff = 0x28,
    DisplayOn = 0x29,
}

impl DcsCommand {
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Payload handed to the host for a DCS write
    pub const fn payload(self) -> [u8; 1] {
        [self.opcode()]
    }

    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x10 => Some(DcsCommand::SleepIn),
            0x11 => Some(DcsCommand::SleepOut),
            0x28 => Some(DcsCommand::DisplayOff),
            0x29 => Some(DcsCommand::DisplayOn),
            _ => None,
        }
    }
}

/// One step of a power sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Wait at least this many milliseconds
    Delay(u32),
    /// Send a DCS command on the command channel
    Write(DcsCommand),
}

/// Panel configuration after the link is up in HS mode
pub const POWER_ON_SEQUENCE: &[Step] = &[
    Step::Delay(100),
    Step::Write(DcsCommand::SleepOut),
    Step::Delay(120),
    Step::Write(DcsCommand::DisplayOn),
    Step::Delay(10),
];

/// Wait between panel configuration and starting the video stream
pub const VIDEO_ENABLE_SETTLE_MS: u32 = 10;

pub const POWER_OFF_SEQUENCE: &[Step] = &[
    Step::Write(DcsCommand::DisplayOff),
    Step::Delay(100),
    Step::Write(DcsCommand::SleepIn),
    Step::Delay(100),
];

/// Run a sequence, stopping at the first failed write
pub fn run_sequence<H, D>(
    host: &mut H,
    delay: &mut D,
    channel: VirtualChannel,
    steps: &[Step],
) -> Result<(), DisplayError>
where
    H: DsiHost + ?Sized,
    D: DelayNs,
{
    for step in steps {
        match *step {
            Step::Delay(ms) => delay.delay_ms(ms),
            Step::Write(cmd) => {
                debug!("DCS {:?} (0x{:02X}) on VC{}", cmd, cmd.opcode(), channel);
                host.vc_dcs_write(channel, &cmd.payload())?;
            }
        }
    }
    Ok(())
}

/// Run a sequence to the end regardless of write failures
///
/// Timing between steps is kept even when a write fails so the panel
/// still sees the full power-down window. Returns the first error seen.
pub fn run_sequence_best_effort<H, D>(
    host: &mut H,
    delay: &mut D,
    channel: VirtualChannel,
    steps: &[Step],
) -> Result<(), DisplayError>
where
    H: DsiHost + ?Sized,
    D: DelayNs,
{
    let mut first_err = None;
    for step in steps {
        match *step {
            Step::Delay(ms) => delay.delay_ms(ms),
            Step::Write(cmd) => {
                debug!("DCS {:?} (0x{:02X}) on VC{}", cmd, cmd.opcode(), channel);
                if let Err(e) = host.vc_dcs_write(channel, &cmd.payload()) {
                    warn!("DCS {:?} failed: {}", cmd, e);
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Sum of the delays in a sequence
pub fn sequence_duration_ms(steps: &[Step]) -> u32 {
    steps
        .iter()
        .map(|s| match s {
            Step::Delay(ms) => *ms,
            Step::Write(_) => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::trace::{HostOp, TraceRecorder};

    #[test]
    fn test_opcodes() {
        assert_eq!(DcsCommand::SleepIn.opcode(), 0x10);
        assert_eq!(DcsCommand::SleepOut.opcode(), 0x11);
        assert_eq!(DcsCommand::DisplayOff.opcode(), 0x28);
        assert_eq!(DcsCommand::DisplayOn.opcode(), 0x29);
        assert_eq!(DcsCommand::from_opcode(0x29), Some(DcsCommand::DisplayOn));
        assert_eq!(DcsCommand::from_opcode(0x2C), None);
    }

    #[test]
    fn test_sequence_durations() {
        assert_eq!(sequence_duration_ms(POWER_ON_SEQUENCE), 230);
        assert_eq!(sequence_duration_ms(POWER_OFF_SEQUENCE), 200);
    }

    #[test]
    fn test_run_sequence_orders_writes_and_delays() {
        let recorder = TraceRecorder::new();
        let mut host = recorder.host();
        let mut delay = recorder.delay();
        host.display_enable().unwrap();
        recorder.clear_ops();

        run_sequence(&mut host, &mut delay, 1, POWER_ON_SEQUENCE).unwrap();

        assert_eq!(
            recorder.ops(),
            vec![
                HostOp::Delay(100),
                HostOp::DcsWrite { channel: 1, data: vec![0x11] },
                HostOp::Delay(120),
                HostOp::DcsWrite { channel: 1, data: vec![0x29] },
                HostOp::Delay(10),
            ]
        );
    }

    #[test]
    fn test_run_sequence_stops_on_failure() {
        let recorder = TraceRecorder::new();
        recorder.state().lock().unwrap().fail_dcs_write = Some(0x11);
        let mut host = recorder.host();
        let mut delay = recorder.delay();
        host.display_enable().unwrap();
        recorder.clear_ops();

        assert!(run_sequence(&mut host, &mut delay, 1, POWER_ON_SEQUENCE).is_err());
        assert_eq!(recorder.dcs_writes(), Vec::<u8>::new());
        assert_eq!(recorder.total_delay_ms(), 100);
    }

    #[test]
    fn test_best_effort_keeps_going() {
        let recorder = TraceRecorder::new();
        recorder.state().lock().unwrap().fail_dcs_write = Some(0x28);
        let mut host = recorder.host();
        let mut delay = recorder.delay();
        host.display_enable().unwrap();
        recorder.clear_ops();

        let result = run_sequence_best_effort(&mut host, &mut delay, 1, POWER_OFF_SEQUENCE);

        assert!(result.is_err());
        assert_eq!(recorder.dcs_writes(), vec![0x10]);
        assert_eq!(recorder.total_delay_ms(), 200);
    }
}
