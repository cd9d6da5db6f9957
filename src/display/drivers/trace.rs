/*
 *  display/drivers/trace.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Recording DSI host for bring-up dry runs and tests
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

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::display::dcs::DcsCommand;
use crate::display::error::DisplayError;
use crate::display::traits::{DsiHost, VirtualChannel};

/// Virtual channels available on the DSI module
pub const NUM_VIRTUAL_CHANNELS: u8 = 4;

/// A single call into the host, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOp {
    RequestVc(VirtualChannel),
    SetVcId { channel: VirtualChannel, vc_id: u8 },
    ReleaseVc(VirtualChannel),
    DcsWrite { channel: VirtualChannel, data: Vec<u8> },
    BusLock,
    BusUnlock,
    DisplayEnable,
    DisplayDisable { disconnect_lanes: bool, enter_ulps: bool },
    VcEnableHs { channel: VirtualChannel, enable: bool },
    VideoModeEnable(u8),
    VideoModeDisable,
    ClearFirstVsync,
    PlatformEnable,
    PlatformDisable,
    /// Delay in milliseconds, rounded up
    Delay(u32),
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOp::RequestVc(ch) => write!(f, "request_vc -> VC{}", ch),
            HostOp::SetVcId { channel, vc_id } => write!(f, "set_vc_id VC{} id={}", channel, vc_id),
            HostOp::ReleaseVc(ch) => write!(f, "release_vc VC{}", ch),
            HostOp::DcsWrite { channel, data } => {
                write!(f, "dcs_write VC{} [", channel)?;
                for (i, b) in data.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:02X}", b)?;
                }
                write!(f, "]")?;
                match data.as_slice() {
                    [op] => match DcsCommand::from_opcode(*op) {
                        Some(cmd) => write!(f, " {:?}", cmd),
                        None => Ok(()),
                    },
                    _ => Ok(()),
                }
            }
            HostOp::BusLock => write!(f, "bus_lock"),
            HostOp::BusUnlock => write!(f, "bus_unlock"),
            HostOp::DisplayEnable => write!(f, "display_enable"),
            HostOp::DisplayDisable { disconnect_lanes, enter_ulps } =>
                write!(f, "display_disable lanes={} ulps={}", disconnect_lanes, enter_ulps),
            HostOp::VcEnableHs { channel, enable } => write!(f, "vc_enable_hs VC{} {}", channel, enable),
            HostOp::VideoModeEnable(dt) => write!(f, "video_mode_enable 0x{:02X}", dt),
            HostOp::VideoModeDisable => write!(f, "video_mode_disable"),
            HostOp::ClearFirstVsync => write!(f, "clear_first_vsync"),
            HostOp::PlatformEnable => write!(f, "platform_enable"),
            HostOp::PlatformDisable => write!(f, "platform_disable"),
            HostOp::Delay(ms) => write!(f, "msleep {}", ms),
        }
    }
}

/// Shared state behind a [`TraceRecorder`]
#[derive(Debug, Default)]
pub struct TraceState {
    /// Every host call and delay, in order
    pub ops: Vec<HostOp>,

    /// Allocated virtual channels
    pub allocated: Vec<VirtualChannel>,

    /// Channels currently in HS mode
    pub hs_channels: Vec<VirtualChannel>,

    pub bus_locked: bool,
    pub display_enabled: bool,
    pub platform_enabled: bool,
    pub video_data_type: Option<u8>,

    /// Simulate failures (for error testing)
    pub fail_request_vc: Option<VirtualChannel>,
    pub fail_set_vc_id: Option<VirtualChannel>,
    pub fail_dcs_write: Option<u8>,
    pub fail_display_enable: bool,
    pub fail_platform_enable: bool,
    pub fail_video_mode_enable: bool,
}

/// Hands out a host and delay that log into the same trace
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    state: Arc<Mutex<TraceState>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(&self) -> TraceHost {
        TraceHost { state: Arc::clone(&self.state) }
    }

    /// Delay that records without waiting
    pub fn delay(&self) -> TraceDelay<NoWait> {
        self.delay_with(NoWait)
    }

    /// Delay that records and then waits on `inner`
    pub fn delay_with<D: DelayNs>(&self, inner: D) -> TraceDelay<D> {
        TraceDelay { state: Arc::clone(&self.state), inner }
    }

    pub fn state(&self) -> Arc<Mutex<TraceState>> {
        Arc::clone(&self.state)
    }

    pub fn ops(&self) -> Vec<HostOp> {
        lock(&self.state).ops.clone()
    }

    pub fn clear_ops(&self) {
        lock(&self.state).ops.clear();
    }

    /// Opcodes of every DCS write, in order
    pub fn dcs_writes(&self) -> Vec<u8> {
        lock(&self.state)
            .ops
            .iter()
            .filter_map(|op| match op {
                HostOp::DcsWrite { data, .. } => data.first().copied(),
                _ => None,
            })
            .collect()
    }

    pub fn total_delay_ms(&self) -> u32 {
        lock(&self.state)
            .ops
            .iter()
            .map(|op| match op {
                HostOp::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }
}

// A poisoned trace is still worth reading.
fn lock(state: &Mutex<TraceState>) -> MutexGuard<'_, TraceState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// [`DsiHost`] that records every call instead of driving hardware
#[derive(Debug, Clone)]
pub struct TraceHost {
    state: Arc<Mutex<TraceState>>,
}

impl TraceHost {
    fn record(&self, op: HostOp) -> MutexGuard<'_, TraceState> {
        debug!("dsi: {}", op);
        let mut state = lock(&self.state);
        state.ops.push(op);
        state
    }
}

impl DsiHost for TraceHost {
    fn request_vc(&mut self) -> Result<VirtualChannel, DisplayError> {
        let mut state = lock(&self.state);
        let channel = (0..NUM_VIRTUAL_CHANNELS)
            .find(|ch| !state.allocated.contains(ch))
            .ok_or_else(|| DisplayError::VirtualChannel("no free virtual channel".to_string()))?;
        if state.fail_request_vc == Some(channel) {
            return Err(DisplayError::VirtualChannel(format!("simulated request failure on VC{}", channel)));
        }
        state.allocated.push(channel);
        drop(state);
        self.record(HostOp::RequestVc(channel));
        Ok(channel)
    }

    fn set_vc_id(&mut self, channel: VirtualChannel, vc_id: u8) -> Result<(), DisplayError> {
        let state = self.record(HostOp::SetVcId { channel, vc_id });
        if !state.allocated.contains(&channel) {
            return Err(DisplayError::VirtualChannel(format!("VC{} not allocated", channel)));
        }
        if state.fail_set_vc_id == Some(channel) {
            return Err(DisplayError::VirtualChannel(format!("simulated VC_ID failure on VC{}", channel)));
        }
        Ok(())
    }

    fn release_vc(&mut self, channel: VirtualChannel) {
        let mut state = self.record(HostOp::ReleaseVc(channel));
        state.allocated.retain(|&ch| ch != channel);
        state.hs_channels.retain(|&ch| ch != channel);
    }

    fn vc_dcs_write(&mut self, channel: VirtualChannel, data: &[u8]) -> Result<(), DisplayError> {
        let state = lock(&self.state);
        if data.first().is_some_and(|&b| state.fail_dcs_write == Some(b)) {
            return Err(DisplayError::Dsi(format!("simulated DCS write failure 0x{:02X}", data[0])));
        }
        if !state.display_enabled {
            return Err(DisplayError::Dsi("DCS write with link down".to_string()));
        }
        drop(state);
        self.record(HostOp::DcsWrite { channel, data: data.to_vec() });
        Ok(())
    }

    fn bus_lock(&mut self) {
        self.record(HostOp::BusLock).bus_locked = true;
    }

    fn bus_unlock(&mut self) {
        self.record(HostOp::BusUnlock).bus_locked = false;
    }

    fn display_enable(&mut self) -> Result<(), DisplayError> {
        if lock(&self.state).fail_display_enable {
            return Err(DisplayError::Dsi("simulated display enable failure".to_string()));
        }
        self.record(HostOp::DisplayEnable).display_enabled = true;
        Ok(())
    }

    fn display_disable(&mut self, disconnect_lanes: bool, enter_ulps: bool) {
        let mut state = self.record(HostOp::DisplayDisable { disconnect_lanes, enter_ulps });
        state.display_enabled = false;
        state.hs_channels.clear();
    }

    fn vc_enable_hs(&mut self, channel: VirtualChannel, enable: bool) {
        let mut state = self.record(HostOp::VcEnableHs { channel, enable });
        state.hs_channels.retain(|&ch| ch != channel);
        if enable {
            state.hs_channels.push(channel);
        }
    }

    fn video_mode_enable(&mut self, data_type: u8) -> Result<(), DisplayError> {
        if lock(&self.state).fail_video_mode_enable {
            return Err(DisplayError::Dsi("simulated video mode enable failure".to_string()));
        }
        self.record(HostOp::VideoModeEnable(data_type)).video_data_type = Some(data_type);
        Ok(())
    }

    fn video_mode_disable(&mut self) {
        self.record(HostOp::VideoModeDisable).video_data_type = None;
    }

    fn clear_first_vsync(&mut self) {
        self.record(HostOp::ClearFirstVsync);
    }

    fn platform_enable(&mut self) -> Result<(), DisplayError> {
        if lock(&self.state).fail_platform_enable {
            return Err(DisplayError::Platform("simulated platform enable failure".to_string()));
        }
        self.record(HostOp::PlatformEnable).platform_enabled = true;
        Ok(())
    }

    fn platform_disable(&mut self) {
        self.record(HostOp::PlatformDisable).platform_enabled = false;
    }
}

/// Delay that returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWait;

impl DelayNs for NoWait {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Delay that records into the trace before waiting on an inner delay
#[derive(Debug, Clone)]
pub struct TraceDelay<D> {
    state: Arc<Mutex<TraceState>>,
    inner: D,
}

impl<D: DelayNs> DelayNs for TraceDelay<D> {
    fn delay_ns(&mut self, ns: u32) {
        lock(&self.state).ops.push(HostOp::Delay(ns.div_ceil(1_000_000)));
        self.inner.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        lock(&self.state).ops.push(HostOp::Delay(ms));
        self.inner.delay_ms(ms);
    }
}
