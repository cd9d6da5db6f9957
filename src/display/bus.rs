/*
 *  display/bus.rs
 *
 *  sharp-lq070k1sx - Sharp LQ070K1SX DSI video mode panel driver
 *  (c) 2026 Stuart Hunter
 *
 *  Scoped DSI bus lock
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

use std::ops::{Deref, DerefMut};

use crate::display::traits::DsiHost;

/// Holds the DSI bus lock until dropped
///
/// Derefs to the host so every call made while the bus is owned goes
/// through the guard.
pub struct DsiBusGuard<'a, H: DsiHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: DsiHost + ?Sized> DsiBusGuard<'a, H> {
    pub fn lock(host: &'a mut H) -> Self {
        host.bus_lock();
        Self { host }
    }
}

impl<H: DsiHost + ?Sized> Deref for DsiBusGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: DsiHost + ?Sized> DerefMut for DsiBusGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: DsiHost + ?Sized> Drop for DsiBusGuard<'_, H> {
    fn drop(&mut self) {
        self.host.bus_unlock();
    }
}
