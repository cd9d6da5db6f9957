/*
 *  display/traits.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Core trait definitions for the host framework and panel driver seams
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

use crate::display::error::DisplayError;
use crate::display::timings::{PanelInfo, VideoTimings};

/// Power state of the display as tracked by the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayState {
    /// Panel is off, video stream stopped
    #[default]
    Disabled,

    /// Panel is on and receiving the video stream
    Active,
}

/// Identifier of a DSI virtual channel handed out by the host
pub type VirtualChannel = u8;

/// DSI host framework operations used by a panel driver
///
/// The host owns the DSI link, the bus lock and the virtual channel pool.
/// A panel driver only sequences calls into it.
pub trait DsiHost: Send {
    /// Allocate a virtual channel
    fn request_vc(&mut self) -> Result<VirtualChannel, DisplayError>;

    /// Set the DSI VC_ID carried by packets sent on `channel`
    fn set_vc_id(&mut self, channel: VirtualChannel, vc_id: u8) -> Result<(), DisplayError>;

    /// Return a virtual channel to the pool
    fn release_vc(&mut self, channel: VirtualChannel);

    /// Send a DCS write on `channel`
    fn vc_dcs_write(&mut self, channel: VirtualChannel, data: &[u8]) -> Result<(), DisplayError>;

    /// Take exclusive ownership of the DSI bus
    fn bus_lock(&mut self);

    /// Release the DSI bus
    fn bus_unlock(&mut self);

    /// Power up the DSI link and interface
    fn display_enable(&mut self) -> Result<(), DisplayError>;

    /// Power down the DSI link
    fn display_disable(&mut self, disconnect_lanes: bool, enter_ulps: bool);

    /// Switch a virtual channel between LP and HS transmission
    fn vc_enable_hs(&mut self, channel: VirtualChannel, enable: bool);

    /// Start the video stream using the given DSI data type
    fn video_mode_enable(&mut self, data_type: u8) -> Result<(), DisplayError>;

    /// Stop the video stream
    fn video_mode_disable(&mut self);

    /// Forget any vsync seen before the next power on
    fn clear_first_vsync(&mut self);

    /// Board specific power-up hook
    fn platform_enable(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Board specific power-down hook
    fn platform_disable(&mut self) {}
}

/// Operations a panel driver exposes to the display framework
///
/// All methods take `&self`; drivers serialize enable/disable internally
/// so a single instance can be shared between threads.
pub trait PanelDriver: Send + Sync {
    /// Driver name as registered with the framework
    fn name(&self) -> &'static str;

    /// Current display state
    fn state(&self) -> DisplayState;

    /// Power the panel up and start the video stream
    fn enable(&self) -> Result<(), DisplayError>;

    /// Stop the video stream and power the panel down
    fn disable(&self);

    /// System suspend
    fn suspend(&self) -> Result<(), DisplayError>;

    /// System resume
    fn resume(&self) -> Result<(), DisplayError>;

    /// Visible resolution as (x, y)
    fn resolution(&self) -> (u16, u16);

    /// Recommended framebuffer bits per pixel
    fn recommended_bpp(&self) -> u8;

    /// Interface data published to the host at probe
    fn panel_info(&self) -> &PanelInfo;

    /// Timings currently programmed for the panel
    fn timings(&self) -> VideoTimings;

    /// Request new timings
    fn set_timings(&self, timings: &VideoTimings);

    /// Validate timings against what the panel supports
    fn check_timings(&self, timings: &VideoTimings) -> Result<(), DisplayError>;

    /// Unbind from the host, returning everything claimed at probe
    fn remove(self: Box<Self>);
}
