//! Virtual joystick input adapter
//!
//! Converts pointer/touch positions into a normalized direction vector plus a
//! queue of fire presses. Pointer events may arrive at any time; the
//! simulation samples the latest state once per tick.

use glam::DVec2;

use crate::clamp_unit_axes;

/// What the simulation reads from the input layer each tick
pub trait InputSource {
    /// Normalized direction in [-1, 1]² and whether the stick is held
    fn direction(&self) -> (DVec2, bool);
    /// Returns true once per fire press, then clears the press
    fn consume_fire(&mut self) -> bool;
}

/// On-screen joystick anchored at a reference center
#[derive(Debug, Clone)]
pub struct Joystick {
    /// Screen-space center of the stick
    center: DVec2,
    /// Offset that maps to full deflection
    max_radius: f64,
    /// Current normalized deflection
    value: DVec2,
    active: bool,
    /// Presses not yet handed to the simulation
    fire_pending: u32,
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new(DVec2::ZERO, 1.0)
    }
}

impl Joystick {
    pub fn new(center: DVec2, max_radius: f64) -> Self {
        Self {
            center,
            max_radius,
            value: DVec2::ZERO,
            active: false,
            fire_pending: 0,
        }
    }

    /// Move the stick anchor (e.g. after a layout change)
    pub fn set_anchor(&mut self, center: DVec2, max_radius: f64) {
        self.center = center;
        self.max_radius = max_radius;
    }

    /// Pointer/touch went down on the stick
    pub fn press(&mut self, point: DVec2) {
        self.active = true;
        self.value = self.normalize(point);
    }

    /// Pointer moved; ignored unless the stick is held
    pub fn drag(&mut self, point: DVec2) {
        if self.active {
            self.value = self.normalize(point);
        }
    }

    /// Pointer/touch released anywhere
    pub fn release(&mut self) {
        self.active = false;
        self.value = DVec2::ZERO;
    }

    /// Fire button pressed. Every press yields one shot on a later tick.
    pub fn trigger_fire(&mut self) {
        self.fire_pending = self.fire_pending.saturating_add(1);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> DVec2 {
        self.value
    }

    fn normalize(&self, point: DVec2) -> DVec2 {
        if !point.is_finite() || !self.center.is_finite() {
            return DVec2::ZERO;
        }
        if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
            return DVec2::ZERO;
        }
        clamp_unit_axes((point - self.center) / self.max_radius)
    }
}

impl InputSource for Joystick {
    fn direction(&self) -> (DVec2, bool) {
        if self.active {
            (self.value, true)
        } else {
            (DVec2::ZERO, false)
        }
    }

    fn consume_fire(&mut self) -> bool {
        if self.fire_pending == 0 {
            return false;
        }
        self.fire_pending -= 1;
        true
    }
}
