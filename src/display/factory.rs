/*
 *  display/factory.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Panel driver construction from configuration
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
use log::{error, info};

use crate::config::PanelConfig;
use crate::display::drivers::lq070k1sx::{DRIVER_NAME, Lq070k1sx};
use crate::display::error::DisplayFactoryError;
use crate::display::traits::{DsiHost, PanelDriver};

/// Type alias for boxed panel driver trait objects
pub type BoxedDriver = Box<dyn PanelDriver>;

/// Driver names this crate can bind
pub const SUPPORTED_DRIVERS: &[&str] = &[DRIVER_NAME];

/// Factory for creating panel drivers from configuration
pub struct PanelDriverFactory;

impl PanelDriverFactory {
    /// Probe the configured panel driver on `host`
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let recorder = TraceRecorder::new();
    /// let config = PanelConfig {
    ///     driver: Some("panel-sharp-lq070k1sx".to_string()),
    ///     ..Default::default()
    /// };
    ///
    /// let panel = PanelDriverFactory::create_from_config(&config, recorder.host(), recorder.delay())?;
    /// panel.enable()?;
    /// ```
    pub fn create_from_config<H, D>(
        config: &PanelConfig,
        host: H,
        delay: D,
    ) -> Result<BoxedDriver, DisplayFactoryError>
    where
        H: DsiHost + 'static,
        D: DelayNs + Send + 'static,
    {
        let name = config.driver.as_deref()
            .ok_or(DisplayFactoryError::NoDriverSpecified)?;

        match name {
            DRIVER_NAME => {
                let pdata = config.platform_data();
                info!("Binding {} ({}x{})", name, pdata.x_res, pdata.y_res);
                Ok(Box::new(Lq070k1sx::probe(host, delay, Some(&pdata))?))
            }
            other => {
                error!("Unknown panel driver {} (supported: {})", other, SUPPORTED_DRIVERS.join(", "));
                Err(DisplayFactoryError::UnknownDriver(other.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::trace::TraceRecorder;
    use crate::display::error::DisplayError;
    use crate::display::timings::LcdConfig;
    use crate::display::traits::DisplayState;

    fn config(driver: Option<&str>) -> PanelConfig {
        PanelConfig {
            driver: driver.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_known_driver() {
        let recorder = TraceRecorder::new();
        let panel = PanelDriverFactory::create_from_config(
            &config(Some("panel-sharp-lq070k1sx")),
            recorder.host(),
            recorder.delay(),
        ).unwrap();

        assert_eq!(panel.name(), DRIVER_NAME);
        assert_eq!(panel.state(), DisplayState::Disabled);
        assert_eq!(panel.resolution(), (800, 1280));
    }

    #[test]
    fn test_panel_info_through_boxed_driver() {
        let recorder = TraceRecorder::new();
        let panel: BoxedDriver = PanelDriverFactory::create_from_config(
            &PanelConfig { x_res: Some(720), ..config(Some(DRIVER_NAME)) },
            recorder.host(),
            recorder.delay(),
        ).unwrap();

        let info = panel.panel_info();
        assert_eq!(info.config, LcdConfig::Tft);
        assert_eq!(info.pixel_size, 24);
        assert_eq!(info.acbi, 0);
        assert_eq!(info.acb, 40);
        assert_eq!((info.timings.x_res, info.timings.y_res), (720, 1280));
        assert_eq!(info.timings, panel.timings());
    }

    #[test]
    fn test_no_driver() {
        let recorder = TraceRecorder::new();
        let result = PanelDriverFactory::create_from_config(&config(None), recorder.host(), recorder.delay());
        assert!(matches!(result, Err(DisplayFactoryError::NoDriverSpecified)));
    }

    #[test]
    fn test_unknown_driver() {
        let recorder = TraceRecorder::new();
        let result = PanelDriverFactory::create_from_config(
            &config(Some("panel-taal")),
            recorder.host(),
            recorder.delay(),
        );
        assert!(matches!(result, Err(DisplayFactoryError::UnknownDriver(name)) if name == "panel-taal"));
        assert!(recorder.ops().is_empty());
        assert_eq!(SUPPORTED_DRIVERS, &[DRIVER_NAME]);
    }

    #[test]
    fn test_probe_failure_is_wrapped() {
        let recorder = TraceRecorder::new();
        recorder.state().lock().unwrap().fail_request_vc = Some(0);

        let result = PanelDriverFactory::create_from_config(
            &config(Some(DRIVER_NAME)),
            recorder.host(),
            recorder.delay(),
        );

        assert!(matches!(
            result,
            Err(DisplayFactoryError::ProbeFailed(DisplayError::VirtualChannel(_)))
        ));
    }
}
