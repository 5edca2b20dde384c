use std::f32::consts::PI;

use crate::constants::TILT_FACTOR;

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Tilt in degrees for a pointer at `pointer_x` over a card.
///
/// `atan2(dx, 0)` only yields the sign of the offset scaled to ±π/2, so the
/// result is one of `-17.5`, `0` or `17.5` degrees.
pub fn tilt_angle(pointer_x: f32, card: &Bounds) -> f32 {
    let offset = pointer_x - card.center_x();
    offset.atan2(0.0) * (TILT_FACTOR / PI)
}

/// Pointer-tilt binding for the current card.
#[derive(Debug, Clone, Default)]
pub struct Tilt {
    bound: bool,
    angle: f32,
}

impl Tilt {
    pub fn bind(&mut self) {
        self.bound = true;
    }

    pub fn unbind(&mut self) {
        self.bound = false;
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    #[cfg(test)]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Returns the new angle, or `None` while unbound.
    pub fn pointer_move(&mut self, pointer_x: f32, card: &Bounds) -> Option<f32> {
        if !self.bound {
            return None;
        }
        self.angle = tilt_angle(pointer_x, card);
        Some(self.angle)
    }

    pub fn pointer_leave(&mut self) {
        self.angle = 0.0;
    }
}
