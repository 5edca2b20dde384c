use raylib::prelude::*;
use tracing::trace;

use crate::carousel::{Advance, CarouselState};
use crate::render::{control_at, current_card_bounds};
use crate::ring::Direction;
use crate::style::Control;

/// Disabled buttons swallow the request, like pointer-events: none.
fn request(carousel: &mut CarouselState, direction: Direction) -> Advance {
    if !carousel.controls_enabled() {
        return Advance::Ignored;
    }
    carousel.advance(direction)
}

/// Routes mouse and keyboard events to the carousel.
#[derive(Debug, Default)]
pub struct Pointer {
    over_card: bool,
}

impl Pointer {
    pub fn handle(&mut self, rl: &RaylibHandle, carousel: &mut CarouselState) {
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;
        let mouse = rl.get_mouse_position();

        let mut requested = None;
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            requested = control_at(mouse.x, mouse.y, sw, sh).map(|control| match control {
                Control::Prev => Direction::Left,
                Control::Next => Direction::Right,
            });
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            requested = Some(Direction::Left);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            requested = Some(Direction::Right);
        }

        if let Some(direction) = requested {
            request(carousel, direction);
        }

        let card = current_card_bounds(carousel, sw, sh);
        if card.contains(mouse.x, mouse.y) {
            self.over_card = true;
            if let Some(angle) = carousel.on_pointer_move(mouse.x, &card) {
                trace!(angle, "tilt");
            }
        } else if self.over_card {
            self.over_card = false;
            carousel.on_pointer_leave();
        }
    }
}
