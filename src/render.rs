use raylib::prelude::*;

use crate::caption::Caption;
use crate::carousel::CarouselState;
use crate::constants::*;
use crate::progress::ProgressBar;
use crate::ring::{Role, SLOT_COUNT};
use crate::style::Control;
use crate::tilt::Bounds;

/// GPU-side assets: one texture per card, reused for its background layer.
pub struct Scene {
    textures: [Option<Texture2D>; SLOT_COUNT],
    captions: Vec<Caption>,
}

impl Scene {
    pub fn new(captions: Vec<Caption>) -> Self {
        Self {
            textures: [None, None, None],
            captions,
        }
    }

    pub fn set_texture(&mut self, slot: usize, texture: Texture2D) {
        if let Some(entry) = self.textures.get_mut(slot) {
            *entry = Some(texture);
        }
    }
}

/// Current card rectangle including its rise offset, for pointer hit tests.
pub fn current_card_bounds(carousel: &CarouselState, screen_width: f32, screen_height: f32) -> Bounds {
    let card = carousel.cards().element(Role::Current);
    let rise = carousel.styles().cards[card].rise_offset;
    carousel
        .card_pose(card)
        .card_bounds(rise, screen_width, screen_height)
}

/// Centre of a navigation button, just below the current card's lower corners.
pub fn control_center(control: Control, screen_width: f32, screen_height: f32) -> (f32, f32) {
    let card_height = screen_height * CARD_HEIGHT;
    let half_width = card_height * CARD_ASPECT / 2.0;
    let y = screen_height * CARD_CENTER_Y + card_height / 2.0 + CONTROL_RADIUS * 1.5;
    let x = match control {
        Control::Prev => screen_width / 2.0 - half_width,
        Control::Next => screen_width / 2.0 + half_width,
    };
    (x, y)
}

pub fn control_at(px: f32, py: f32, screen_width: f32, screen_height: f32) -> Option<Control> {
    Control::BOTH.into_iter().find(|&control| {
        let (cx, cy) = control_center(control, screen_width, screen_height);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= CONTROL_RADIUS * CONTROL_RADIUS
    })
}

/// Source rectangle that fills `dst` with the texture without distorting it.
pub fn cover_crop(tex_width: f32, tex_height: f32, dst_width: f32, dst_height: f32) -> Bounds {
    let scale = (dst_width / tex_width).max(dst_height / tex_height);
    let width = dst_width / scale;
    let height = dst_height / scale;
    Bounds::new((tex_width - width) / 2.0, (tex_height - height) / 2.0, width, height)
}

fn shade(brightness: f32, opacity: f32) -> Color {
    let level = (brightness.clamp(0.0, 1.0) * 255.0) as u8;
    Color::new(level, level, level, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    Color::new(color.r, color.g, color.b, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

fn draw_cover(d: &mut RaylibDrawHandle, texture: &Texture2D, dest: Bounds, tint: Color) {
    let src = cover_crop(texture.width() as f32, texture.height() as f32, dest.width, dest.height);
    d.draw_texture_pro(
        texture,
        Rectangle::new(src.x, src.y, src.width, src.height),
        Rectangle::new(dest.x, dest.y, dest.width, dest.height),
        Vector2::new(0.0, 0.0),
        0.0,
        tint,
    );
}

pub fn draw_frame(d: &mut RaylibDrawHandle, carousel: &CarouselState, scene: &Scene, bar: &ProgressBar) {
    let sw = d.get_screen_width() as f32;
    let sh = d.get_screen_height() as f32;
    let styles = carousel.styles();

    d.clear_background(Color::BLACK);

    // Background layers, lowest tier first
    let mut layers: Vec<usize> = (0..SLOT_COUNT).collect();
    layers.sort_by_key(|&i| styles.backgrounds[i].z_index);
    for i in layers {
        let pose = carousel.background_pose(i);
        let opacity = pose.opacity * styles.backgrounds[i].opacity;
        if let (Some(texture), true) = (&scene.textures[i], opacity > 0.0) {
            draw_cover(d, texture, Bounds::new(0.0, 0.0, sw, sh), shade(pose.brightness, opacity));
        }
    }

    // Cards
    let mut cards: Vec<usize> = (0..SLOT_COUNT).collect();
    cards.sort_by_key(|&i| styles.cards[i].z_index);
    for i in cards {
        let style = &styles.cards[i];
        let pose = carousel.card_pose(i);
        let mut bounds = pose.card_bounds(style.rise_offset, sw, sh);

        // Y-axis rotation seen head-on only narrows the card
        let narrowed = bounds.width * style.rotation_y.to_radians().cos();
        bounds.x += (bounds.width - narrowed) / 2.0;
        bounds.width = narrowed;

        if let Some(texture) = &scene.textures[i] {
            draw_cover(d, texture, bounds, shade(pose.brightness, pose.opacity * style.opacity));
        }
    }

    // Caption blocks
    let left = sw / 2.0 - sh * CARD_HEIGHT * CARD_ASPECT / 2.0;
    for (caption, text) in scene.captions.iter().enumerate().take(SLOT_COUNT) {
        let shift = styles.captions[caption].rotation_y.to_radians().sin() * 12.0;
        let mut y = sh * CAPTION_TOP;
        for (index, line) in text.fragments.iter().enumerate() {
            let size = if index == 0 { TITLE_FONT_SIZE } else { TEXT_FONT_SIZE };
            if let Some(fragment) = styles.fragments[caption].get(index) {
                if fragment.opacity > 0.0 {
                    d.draw_text(
                        line,
                        (left + shift) as i32,
                        (y + fragment.translate_y) as i32,
                        size,
                        with_opacity(Color::WHITE, fragment.opacity),
                    );
                }
            }
            y += size as f32 * 1.3;
        }
    }

    // Navigation buttons
    for control in Control::BOTH {
        let style = styles.control(control);
        if style.opacity <= 0.0 {
            continue;
        }
        let (cx, cy) = control_center(control, sw, sh);
        d.draw_circle(cx as i32, cy as i32, CONTROL_RADIUS, with_opacity(Color::WHITE, style.opacity * 0.9));
        let glyph = match control {
            Control::Prev => "<",
            Control::Next => ">",
        };
        d.draw_text(
            glyph,
            cx as i32 - 6,
            cy as i32 - 12,
            24,
            with_opacity(Color::BLACK, style.opacity),
        );
    }

    // Loading overlay
    let overlay = &styles.overlay;
    if overlay.opacity > 0.0 {
        d.draw_rectangle(0, 0, sw as i32, sh as i32, with_opacity(Color::BLACK, overlay.opacity));
        let track = sw * 0.3;
        let x = (sw - track) / 2.0;
        let y = sh / 2.0;
        d.draw_rectangle(x as i32, y as i32, track as i32, 4, with_opacity(Color::DARKGRAY, overlay.opacity));
        d.draw_rectangle(
            x as i32,
            y as i32,
            (track * bar.scale()) as i32,
            4,
            with_opacity(bar.color(), overlay.opacity),
        );
    }
}
