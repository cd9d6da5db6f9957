/*
 *  display/drivers/lq070k1sx.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Sharp LQ070K1SX 800x1280 DSI video mode panel
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

use std::sync::{Mutex, MutexGuard};

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::display::bus::DsiBusGuard;
use crate::display::dcs::{self, PIXEL_STREAM_24BPP, POWER_OFF_SEQUENCE, POWER_ON_SEQUENCE, VIDEO_ENABLE_SETTLE_MS};
use crate::display::error::DisplayError;
use crate::display::timings::{PanelInfo, PanelPlatformData, VideoTimings};
use crate::display::traits::{DisplayState, DsiHost, PanelDriver, VirtualChannel};

/// Name the driver registers under
pub const DRIVER_NAME: &str = "panel-sharp-lq070k1sx";

/// VC_ID used for both the video and the command channel
const PANEL_VC_ID: u8 = 0;

/// Everything touched by enable/disable, kept behind one lock
struct PanelInner<H, D> {
    host: H,
    delay: D,
    state: DisplayState,
}

/// Sharp LQ070K1SX panel driver
///
/// Owns the host handle for the lifetime of the binding. Video data goes
/// out on `channel0`, DCS commands on `channel1`.
pub struct Lq070k1sx<H, D> {
    inner: Mutex<PanelInner<H, D>>,
    info: PanelInfo,
    channel0: VirtualChannel,
    channel1: VirtualChannel,
}

impl<H, D> Lq070k1sx<H, D>
where
    H: DsiHost,
    D: DelayNs + Send,
{
    /// Bind to the panel
    ///
    /// Publishes the panel timings and claims two virtual channels, both
    /// carrying VC_ID 0. Any channel already claimed is released again if
    /// a later step fails.
    pub fn probe(
        mut host: H,
        delay: D,
        pdata: Option<&PanelPlatformData>,
    ) -> Result<Self, DisplayError> {
        info!("{}: probe", DRIVER_NAME);

        let Some(pdata) = pdata else {
            error!("{}: no platform data!", DRIVER_NAME);
            error!("{}: Probe failed!", DRIVER_NAME);
            return Err(DisplayError::NoPlatformData);
        };

        let timings = VideoTimings::for_panel(pdata);
        let info = PanelInfo::new(timings);

        let (channel0, channel1) = match claim_channels(&mut host) {
            Ok(channels) => channels,
            Err(e) => {
                error!("{}: Probe failed!", DRIVER_NAME);
                return Err(e);
            }
        };

        info!("{}: Probe OK ({}x{}, VC{} video, VC{} cmd)",
            DRIVER_NAME, timings.x_res, timings.y_res, channel0, channel1);

        Ok(Self {
            inner: Mutex::new(PanelInner {
                host,
                delay,
                state: DisplayState::Disabled,
            }),
            info,
            channel0,
            channel1,
        })
    }

    /// Release both virtual channels and hand back the host and delay
    pub fn release(self) -> (H, D) {
        let channel0 = self.channel0;
        let channel1 = self.channel1;
        let mut inner = self.inner.into_inner().unwrap_or_else(|e| e.into_inner());

        inner.host.release_vc(channel0);
        inner.host.release_vc(channel1);
        debug!("{}: removed", DRIVER_NAME);

        (inner.host, inner.delay)
    }

    /// (video, command) virtual channels
    pub fn channels(&self) -> (VirtualChannel, VirtualChannel) {
        (self.channel0, self.channel1)
    }

    fn lock(&self) -> MutexGuard<'_, PanelInner<H, D>> {
        // state is only written after a sequence finishes, so it stays coherent
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bring the link up, configure the panel, start the video stream
    fn power_on(&self, host: &mut H, delay: &mut D) -> Result<(), DisplayError> {
        debug!("{}: power on", DRIVER_NAME);

        // no vsync has been seen on this power cycle yet
        host.clear_first_vsync();

        if let Err(e) = host.display_enable() {
            error!("{}: failed to enable DSI", DRIVER_NAME);
            return Err(e);
        }

        if let Err(e) = host.platform_enable() {
            error!("{}: platform enable failed", DRIVER_NAME);
            host.display_disable(false, false);
            return Err(e);
        }

        host.vc_enable_hs(self.channel0, true);
        host.vc_enable_hs(self.channel1, true);

        if let Err(e) = self.start_video(host, delay) {
            error!("{}: panel configuration failed", DRIVER_NAME);
            host.platform_disable();
            host.display_disable(false, false);
            return Err(e);
        }

        Ok(())
    }

    fn start_video(&self, host: &mut H, delay: &mut D) -> Result<(), DisplayError> {
        dcs::run_sequence(host, delay, self.channel1, POWER_ON_SEQUENCE)?;
        delay.delay_ms(VIDEO_ENABLE_SETTLE_MS);
        host.video_mode_enable(PIXEL_STREAM_24BPP)
    }

    fn power_off(&self, host: &mut H, delay: &mut D) {
        debug!("{}: power off", DRIVER_NAME);

        if let Err(e) = dcs::run_sequence_best_effort(host, delay, self.channel1, POWER_OFF_SEQUENCE) {
            warn!("{}: power off sequence incomplete: {}", DRIVER_NAME, e);
        }

        host.video_mode_disable();
        host.display_disable(false, false);
        host.platform_disable();
    }
}

/// Claim the video channel then the command channel, unwinding on failure
fn claim_channels<H: DsiHost>(host: &mut H) -> Result<(VirtualChannel, VirtualChannel), DisplayError> {
    let channel0 = match host.request_vc() {
        Ok(ch) => ch,
        Err(e) => {
            error!("{}: failed to get virtual channel0", DRIVER_NAME);
            return Err(e);
        }
    };

    if let Err(e) = host.set_vc_id(channel0, PANEL_VC_ID) {
        error!("{}: failed to set VC_ID0", DRIVER_NAME);
        host.release_vc(channel0);
        return Err(e);
    }

    let channel1 = match host.request_vc() {
        Ok(ch) => ch,
        Err(e) => {
            error!("{}: failed to get virtual channel1", DRIVER_NAME);
            host.release_vc(channel0);
            return Err(e);
        }
    };

    if let Err(e) = host.set_vc_id(channel1, PANEL_VC_ID) {
        error!("{}: failed to set VC_ID1", DRIVER_NAME);
        host.release_vc(channel1);
        host.release_vc(channel0);
        return Err(e);
    }

    Ok((channel0, channel1))
}

impl<H, D> PanelDriver for Lq070k1sx<H, D>
where
    H: DsiHost,
    D: DelayNs + Send,
{
    fn name(&self) -> &'static str {
        DRIVER_NAME
    }

    fn state(&self) -> DisplayState {
        self.lock().state
    }

    fn enable(&self) -> Result<(), DisplayError> {
        debug!("{}: enable", DRIVER_NAME);

        let mut inner = self.lock();

        if inner.state != DisplayState::Disabled {
            return Err(DisplayError::InvalidState(inner.state));
        }

        let result = {
            let PanelInner { host, delay, .. } = &mut *inner;
            let mut bus = DsiBusGuard::lock(host);
            self.power_on(&mut bus, delay)
        };

        match &result {
            Ok(()) => inner.state = DisplayState::Active,
            Err(e) => {
                error!("{}: enable failed: {}", DRIVER_NAME, e);
                inner.state = DisplayState::Disabled;
            }
        }

        result
    }

    fn disable(&self) {
        debug!("{}: disable", DRIVER_NAME);

        let mut inner = self.lock();

        if inner.state == DisplayState::Active {
            let PanelInner { host, delay, .. } = &mut *inner;
            let mut bus = DsiBusGuard::lock(host);
            self.power_off(&mut bus, delay);
        }

        inner.state = DisplayState::Disabled;
    }

    fn suspend(&self) -> Result<(), DisplayError> {
        self.disable();
        Ok(())
    }

    fn resume(&self) -> Result<(), DisplayError> {
        // the panel stays dark but the system resume carries on
        if let Err(e) = self.enable() {
            warn!("{}: resume could not enable panel: {}", DRIVER_NAME, e);
        }
        Ok(())
    }

    fn resolution(&self) -> (u16, u16) {
        (self.info.timings.x_res, self.info.timings.y_res)
    }

    fn recommended_bpp(&self) -> u8 {
        self.info.recommended_bpp()
    }

    fn panel_info(&self) -> &PanelInfo {
        &self.info
    }

    fn timings(&self) -> VideoTimings {
        self.info.timings
    }

    fn set_timings(&self, timings: &VideoTimings) {
        // fixed-mode panel, nothing to reprogram
        debug!("{}: ignoring set_timings {}x{}", DRIVER_NAME, timings.x_res, timings.y_res);
    }

    fn check_timings(&self, timings: &VideoTimings) -> Result<(), DisplayError> {
        self.info.timings.check(timings)
    }

    fn remove(self: Box<Self>) {
        let _ = (*self).release();
    }
}
