/*
 *  lib.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
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

//! # Sharp LQ070K1SX DSI panel driver
//!
//! Brings an 800x1280 Sharp LQ070K1SX video mode panel up and down over a
//! MIPI DSI host and reports its fixed timings.
//!
//! The host framework (bus locking, virtual channels, HS mode, video
//! stream) sits behind [`display::DsiHost`]; the driver only sequences
//! calls into it. [`display::TraceRecorder`] provides a host that records
//! every call, used by the bring-up tool and the tests.
//!
//! ## Usage
//!
//! ```yaml
//! log_level: info
//! panel:
//!   driver: panel-sharp-lq070k1sx
//!   x_res: 800
//!   y_res: 1280
//! ```

pub mod config;
pub mod display;
