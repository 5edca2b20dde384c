use raylib::prelude::*;

use crate::constants::*;
use crate::ring::Role;
use crate::tilt::Bounds;

/// Where a card or background layer rests for a given role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Horizontal centre as a fraction of the window width.
    pub x: f32,
    pub scale: f32,
    /// Tint multiplier, 1.0 is full colour.
    pub brightness: f32,
    pub opacity: f32,
}

impl Pose {
    pub fn card(role: Role) -> Self {
        match role {
            Role::Current => Pose {
                x: 0.5,
                scale: 1.0,
                brightness: 1.0,
                opacity: 1.0,
            },
            Role::Previous => Pose {
                x: 0.5 - SIDE_CARD_SHIFT,
                scale: SIDE_CARD_SCALE,
                brightness: SIDE_CARD_BRIGHTNESS,
                opacity: 1.0,
            },
            Role::Next => Pose {
                x: 0.5 + SIDE_CARD_SHIFT,
                scale: SIDE_CARD_SCALE,
                brightness: SIDE_CARD_BRIGHTNESS,
                opacity: 1.0,
            },
        }
    }

    pub fn background(role: Role) -> Self {
        let opacity = if role == Role::Current { 1.0 } else { 0.0 };
        Pose {
            x: 0.5,
            scale: 1.0,
            brightness: BACKGROUND_BRIGHTNESS,
            opacity,
        }
    }

    /// On-screen rectangle of a card in this pose, `rise` window heights below rest.
    pub fn card_bounds(&self, rise: f32, screen_width: f32, screen_height: f32) -> Bounds {
        let height = screen_height * CARD_HEIGHT * self.scale;
        let width = height * CARD_ASPECT;
        let center_x = screen_width * self.x;
        let center_y = screen_height * (CARD_CENTER_Y + rise);
        Bounds::new(center_x - width / 2.0, center_y - height / 2.0, width, height)
    }

    fn blend(&self, end: &Pose, easing: impl Fn(f32, f32) -> f32) -> Pose {
        Pose {
            x: easing(self.x, end.x),
            scale: easing(self.scale, end.scale),
            brightness: easing(self.brightness, end.brightness),
            opacity: easing(self.opacity, end.opacity),
        }
    }
}

/// Eases a layer from its previous role pose to its new one after relabeling.
#[derive(Debug, Clone)]
pub struct Motion {
    pub pose: Pose,

    start_pose: Pose,
    end_pose: Pose,

    animation_timer: f32,
    pub is_animating: bool,
}

impl Motion {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            start_pose: pose,
            end_pose: pose,
            animation_timer: 0.0,
            is_animating: false,
        }
    }

    /// Restarts from wherever the layer currently is, so retargeting mid-flight never jumps.
    pub fn move_to(&mut self, target: Pose) {
        self.start_pose = self.pose;
        self.end_pose = target;
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }
        self.animation_timer += dt;
        let t = self.animation_timer.min(CARD_TRANSITION);

        self.pose = self
            .start_pose
            .blend(&self.end_pose, |from, to| ease::cubic_out(t, from, to - from, CARD_TRANSITION));

        if self.animation_timer >= CARD_TRANSITION {
            self.is_animating = false;
            self.pose = self.end_pose;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_cards_mirror_each_other() {
        let previous = Pose::card(Role::Previous);
        let next = Pose::card(Role::Next);
        assert!(previous.x < 0.5 && next.x > 0.5);
        assert!(((0.5 - previous.x) - (next.x - 0.5)).abs() < 1e-6);
        assert!(previous.scale < Pose::card(Role::Current).scale);
    }

    #[test]
    fn motion_settles_on_target() {
        let mut motion = Motion::new(Pose::card(Role::Next));
        motion.move_to(Pose::card(Role::Current));

        motion.update(CARD_TRANSITION * 0.5);
        assert!(motion.is_animating);
        assert!(motion.pose.x > 0.5 && motion.pose.x < Pose::card(Role::Next).x);

        motion.update(CARD_TRANSITION);
        assert!(!motion.is_animating);
        assert_eq!(motion.pose, Pose::card(Role::Current));
    }

    #[test]
    fn current_card_is_centred() {
        let bounds = Pose::card(Role::Current).card_bounds(0.0, 1000.0, 800.0);
        assert!((bounds.center_x() - 500.0).abs() < 1e-3);
        assert!((bounds.height - 800.0 * CARD_HEIGHT).abs() < 1e-3);

        let risen = Pose::card(Role::Current).card_bounds(1.0, 1000.0, 800.0);
        assert!((risen.y - bounds.y - 800.0).abs() < 1e-3);
    }

    #[test]
    fn only_current_background_is_visible() {
        assert_eq!(Pose::background(Role::Current).opacity, 1.0);
        assert_eq!(Pose::background(Role::Previous).opacity, 0.0);
        assert_eq!(Pose::background(Role::Next).opacity, 0.0);
    }
}
