/*
 *  display/error.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Unified error types for the panel driver
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
use std::error::Error;

use crate::display::traits::DisplayState;

/// Unified error type for all panel operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Probe was called without panel platform data
    NoPlatformData,

    /// Operation not valid in the current display state
    InvalidState(DisplayState),

    /// Requested timings do not match the panel's native timings
    InvalidTimings,

    /// Virtual channel request/configuration failed
    VirtualChannel(String),

    /// DSI host or link error
    Dsi(String),

    /// Board specific enable/disable hook failed
    Platform(String),

    /// Invalid configuration
    InvalidConfiguration(String),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::NoPlatformData =>
                write!(f, "no platform data"),
            DisplayError::InvalidState(state) =>
                write!(f, "Operation not valid while display is {:?}", state),
            DisplayError::InvalidTimings =>
                write!(f, "Timings do not match the panel's native timings"),
            DisplayError::VirtualChannel(msg) =>
                write!(f, "DSI virtual channel error: {}", msg),
            DisplayError::Dsi(msg) =>
                write!(f, "DSI error: {}", msg),
            DisplayError::Platform(msg) =>
                write!(f, "Platform hook error: {}", msg),
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl Error for DisplayError {}

/// Factory error types
#[derive(Debug)]
pub enum DisplayFactoryError {
    /// No driver specified in configuration
    NoDriverSpecified,

    /// Driver name not handled by this crate
    UnknownDriver(String),

    /// Panel driver probe failed
    ProbeFailed(DisplayError),
}

impl fmt::Display for DisplayFactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFactoryError::NoDriverSpecified =>
                write!(f, "No panel driver specified in configuration"),
            DisplayFactoryError::UnknownDriver(name) =>
                write!(f, "Unknown panel driver: {}", name),
            DisplayFactoryError::ProbeFailed(err) =>
                write!(f, "Panel probe failed: {}", err),
        }
    }
}

impl Error for DisplayFactoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayFactoryError::ProbeFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DisplayError> for DisplayFactoryError {
    fn from(err: DisplayError) -> Self {
        DisplayFactoryError::ProbeFailed(err)
    }
}

impl From<DisplayFactoryError> for DisplayError {
    fn from(err: DisplayFactoryError) -> Self {
        match err {
            DisplayFactoryError::ProbeFailed(e) => e,
            DisplayFactoryError::NoDriverSpecified =>
                DisplayError::InvalidConfiguration("No driver specified".to_string()),
            DisplayFactoryError::UnknownDriver(name) =>
                DisplayError::InvalidConfiguration(format!("Unknown driver {}", name)),
        }
    }
}
