/*
 *  display/mod.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Panel driver subsystem
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod timings;
pub mod dcs;
pub mod bus;
pub mod factory;

pub mod drivers;

// Re-exports for convenience
pub use traits::{DisplayState, DsiHost, PanelDriver, VirtualChannel};
pub use error::{DisplayError, DisplayFactoryError};
pub use timings::{VideoTimings, PanelPlatformData, PanelInfo, NATIVE_TIMINGS};
pub use dcs::{DcsCommand, Step};
pub use bus::DsiBusGuard;
pub use factory::{PanelDriverFactory, BoxedDriver};
pub use drivers::lq070k1sx::Lq070k1sx;
pub use drivers::trace::{TraceRecorder, TraceHost, TraceDelay, HostOp};
