/*
 *  display/drivers/mod.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Panel driver and host implementations
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

pub mod lq070k1sx;

// Recording host for dry runs and tests
pub mod trace;
