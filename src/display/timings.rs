/*
 *  display/timings.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Video timings and static panel data
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

use serde::{Deserialize, Serialize};

use crate::display::error::DisplayError;

/// Video mode timings, horizontal values in pixels and vertical in lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoTimings {
    pub x_res: u16,
    pub y_res: u16,
    /// Pixel clock in kHz, 0 when the host derives it from the DSI clock
    pub pixel_clock: u32,
    /// Horizontal sync width
    pub hsw: u16,
    /// Horizontal front porch
    pub hfp: u16,
    /// Horizontal back porch
    pub hbp: u16,
    /// Vertical sync width
    pub vsw: u16,
    /// Vertical front porch
    pub vfp: u16,
    /// Vertical back porch
    pub vbp: u16,
}

/// Native LQ070K1SX timings
pub const NATIVE_TIMINGS: VideoTimings = VideoTimings {
    x_res: 800,
    y_res: 1280,
    pixel_clock: 0,
    hsw: 64,
    hfp: 64,
    hbp: 64,
    vsw: 1,
    vfp: 6,
    vbp: 12, // two lines over the datasheet value, avoids a vertical shift
};

impl VideoTimings {
    /// Native timings with the visible area taken from platform data
    pub fn for_panel(pdata: &PanelPlatformData) -> Self {
        Self {
            x_res: pdata.x_res,
            y_res: pdata.y_res,
            ..NATIVE_TIMINGS
        }
    }

    /// Exact match check, the panel accepts nothing but its own timings
    pub fn check(&self, requested: &VideoTimings) -> Result<(), DisplayError> {
        if self != requested {
            return Err(DisplayError::InvalidTimings);
        }
        Ok(())
    }

    pub fn total_width(&self) -> u32 {
        u32::from(self.x_res) + u32::from(self.hsw) + u32::from(self.hfp) + u32::from(self.hbp)
    }

    pub fn total_height(&self) -> u32 {
        u32::from(self.y_res) + u32::from(self.vsw) + u32::from(self.vfp) + u32::from(self.vbp)
    }
}

/// Board supplied panel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPlatformData {
    pub x_res: u16,
    pub y_res: u16,
}

impl Default for PanelPlatformData {
    fn default() -> Self {
        Self {
            x_res: NATIVE_TIMINGS.x_res,
            y_res: NATIVE_TIMINGS.y_res,
        }
    }
}

/// LCD interface type reported to the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LcdConfig {
    /// Active matrix TFT
    Tft,
}

/// Static interface data published at probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelInfo {
    pub config: LcdConfig,
    pub timings: VideoTimings,
    /// Bits per pixel on the DSI link
    pub pixel_size: u8,
    /// AC bias pin transitions per interrupt
    pub acbi: u8,
    /// AC bias pin frequency
    pub acb: u8,
}

impl PanelInfo {
    pub fn new(timings: VideoTimings) -> Self {
        Self {
            config: LcdConfig::Tft,
            timings,
            pixel_size: 24,
            acbi: 0,
            acb: 40,
        }
    }

    /// Host default for DSI panels
    pub fn recommended_bpp(&self) -> u8 {
        match self.pixel_size {
            16 => 16,
            _ => 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_timings() {
        let t = VideoTimings::for_panel(&PanelPlatformData::default());
        assert_eq!(t, NATIVE_TIMINGS);
        assert_eq!((t.x_res, t.y_res), (800, 1280));
        assert_eq!(t.total_width(), 800 + 64 * 3);
        assert_eq!(t.total_height(), 1280 + 1 + 6 + 12);
    }

    #[test]
    fn test_platform_resolution_overrides_native() {
        let t = VideoTimings::for_panel(&PanelPlatformData { x_res: 768, y_res: 1024 });
        assert_eq!((t.x_res, t.y_res), (768, 1024));
        assert_eq!(t.hsw, 64);
        assert_eq!(t.vbp, 12);
    }

    #[test]
    fn test_check_accepts_exact_match() {
        assert!(NATIVE_TIMINGS.check(&NATIVE_TIMINGS).is_ok());
    }

    #[test]
    fn test_check_rejects_any_field_change() {
        let variants = [
            VideoTimings { x_res: 801, ..NATIVE_TIMINGS },
            VideoTimings { y_res: 1279, ..NATIVE_TIMINGS },
            VideoTimings { pixel_clock: 70_000, ..NATIVE_TIMINGS },
            VideoTimings { hsw: 63, ..NATIVE_TIMINGS },
            VideoTimings { hfp: 65, ..NATIVE_TIMINGS },
            VideoTimings { hbp: 0, ..NATIVE_TIMINGS },
            VideoTimings { vsw: 2, ..NATIVE_TIMINGS },
            VideoTimings { vfp: 7, ..NATIVE_TIMINGS },
            VideoTimings { vbp: 10, ..NATIVE_TIMINGS },
        ];
        for v in &variants {
            assert_eq!(NATIVE_TIMINGS.check(v), Err(DisplayError::InvalidTimings));
        }
    }

    #[test]
    fn test_panel_info() {
        let info = PanelInfo::new(NATIVE_TIMINGS);
        assert_eq!(info.config, LcdConfig::Tft);
        assert_eq!(info.pixel_size, 24);
        assert_eq!((info.acbi, info.acb), (0, 40));
        assert_eq!(info.recommended_bpp(), 24);

        let info16 = PanelInfo { pixel_size: 16, ..info };
        assert_eq!(info16.recommended_bpp(), 16);
    }
}
