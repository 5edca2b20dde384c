//! Current/previous/next bookkeeping for the cards, background layers and
//! caption blocks, plus the timelines that sequence every swap.

use raylib::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::card::{Motion, Pose};
use crate::constants::*;
use crate::ring::{Direction, RingError, Role, SlotRing, SLOT_COUNT};
use crate::state::CarouselPhase;
use crate::style::{Control, Element, Prop, Styles};
use crate::tilt::{Bounds, Tilt};
use crate::timeline::{Animatable, Stagger, Timeline, Tweening};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("expected 3 caption blocks, got {0}")]
    CaptionCount(usize),
    #[error(transparent)]
    Ring(#[from] RingError),
}

/// Work a timeline hands back to the carousel once the steps before it complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Relabel(Direction),
    BindTilt,
    EnableControls,
    HideOverlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Started,
    /// Another timeline is still running; nothing changed.
    Ignored,
}

#[derive(Debug)]
pub struct CarouselState {
    cards: SlotRing,
    backgrounds: SlotRing,
    captions: SlotRing,

    styles: Styles,
    card_motion: [Motion; SLOT_COUNT],
    background_motion: [Motion; SLOT_COUNT],
    tilt: Tilt,

    phase: CarouselPhase,
    timeline: Option<Timeline<Element, Prop, Action>>,
}

impl CarouselState {
    /// Carousel in the markup layout (element 0 current, 1 next, 2 previous)
    /// with `fragments[i]` text fragments in caption block `i`.
    pub fn new(fragments: &[usize]) -> Result<Self, CarouselError> {
        let ring = SlotRing::new(0, 2, 1)?;
        Self::with_rings(fragments, ring.clone(), ring.clone(), ring)
    }

    pub fn with_rings(
        fragments: &[usize],
        cards: SlotRing,
        backgrounds: SlotRing,
        captions: SlotRing,
    ) -> Result<Self, CarouselError> {
        let counts: [usize; SLOT_COUNT] = fragments
            .try_into()
            .map_err(|_| CarouselError::CaptionCount(fragments.len()))?;

        let card_motion = cards.assignment().map(|role| Motion::new(Pose::card(role)));
        let background_motion = backgrounds
            .assignment()
            .map(|role| Motion::new(Pose::background(role)));

        let mut carousel = Self {
            cards,
            backgrounds,
            captions,
            styles: Styles::new(counts),
            card_motion,
            background_motion,
            tilt: Tilt::default(),
            phase: CarouselPhase::Loading,
            timeline: None,
        };
        carousel.prepare_entrance();
        Ok(carousel)
    }

    // Hidden starting state the entrance timeline animates from.
    fn prepare_entrance(&mut self) {
        let current_caption = self.captions.element(Role::Current);

        for card in 0..SLOT_COUNT {
            let style = &mut self.styles.cards[card];
            style.rise_offset = CARD_START_OFFSET;
            style.z_index = match self.cards.role_of(card) {
                Some(Role::Current) => Z_CURRENT_CARD,
                Some(Role::Next) => Z_DEPARTING_CARD,
                _ => Z_WRAPPING_CARD,
            };
        }

        for background in 0..SLOT_COUNT {
            self.styles.backgrounds[background].z_index = match self.backgrounds.role_of(background) {
                Some(Role::Current) => Z_CURRENT_BACKGROUND,
                Some(Role::Next) => Z_DEPARTING_BACKGROUND,
                _ => Z_HIDDEN_BACKGROUND,
            };
        }

        for (caption, fragments) in self.styles.fragments.iter_mut().enumerate() {
            for fragment in fragments.iter_mut() {
                fragment.opacity = 0.0;
                if caption == current_caption {
                    fragment.translate_y = TEXT_ENTER_OFFSET;
                }
            }
        }

        for control in Control::BOTH {
            let style = self.styles.control_mut(control);
            style.opacity = 0.0;
            style.interactive = false;
        }
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn cards(&self) -> &SlotRing {
        &self.cards
    }

    #[cfg(test)]
    pub fn backgrounds(&self) -> &SlotRing {
        &self.backgrounds
    }

    #[cfg(test)]
    pub fn captions(&self) -> &SlotRing {
        &self.captions
    }

    pub fn card_pose(&self, card: usize) -> Pose {
        self.card_motion[card].pose
    }

    pub fn background_pose(&self, background: usize) -> Pose {
        self.background_motion[background].pose
    }

    #[cfg(test)]
    pub fn tilt(&self) -> &Tilt {
        &self.tilt
    }

    pub fn controls_enabled(&self) -> bool {
        Control::BOTH
            .iter()
            .all(|&control| self.styles.control(control).interactive)
    }

    /// Starts the one-time entrance once every image has loaded.
    /// Returns `false` if it already ran.
    pub fn images_ready(&mut self) -> bool {
        if self.phase != CarouselPhase::Loading {
            return false;
        }
        info!("all images loaded, starting entrance");

        let rising: Vec<Element> = [Role::Previous, Role::Current, Role::Next]
            .iter()
            .map(|&role| Element::Card(self.cards.element(role)))
            .collect();
        let caption_text = self.styles.fragment_targets(self.captions.element(Role::Current));
        let controls = Control::BOTH.map(Element::Control);

        let timeline = Timeline::new()
            .to(
                &[Element::Overlay],
                &[(Prop::Opacity, 0.0)],
                Tweening::over(LOADER_FADE_DURATION),
            )
            .call(Action::HideOverlay)
            .to(
                &rising,
                &[(Prop::RiseOffset, 0.0)],
                Tweening::over(CARD_RISE_DURATION)
                    .delay(CARD_RISE_DELAY)
                    .stagger(Stagger::FromEnd {
                        amount: CARD_RISE_SPREAD,
                        easing: ease::cubic_in_out,
                    }),
            )
            .to(
                &caption_text,
                &[(Prop::Opacity, 1.0), (Prop::TranslateY, 0.0)],
                Tweening::over(TEXT_FADE_DURATION)
                    .delay(INTRO_TEXT_DELAY)
                    .stagger(Stagger::Each(TEXT_STAGGER)),
            )
            .call_overlapping(Action::EnableControls, INTRO_CONTROLS_DURATION)
            .to(
                &controls,
                &[(Prop::Opacity, 1.0)],
                Tweening::over(INTRO_CONTROLS_DURATION).overlap(INTRO_CONTROLS_DURATION),
            )
            .call(Action::BindTilt);

        self.timeline = Some(timeline);
        self.phase = CarouselPhase::Entering;
        true
    }

    /// Swap to the neighbouring card. Ignored while any timeline is running.
    pub fn advance(&mut self, direction: Direction) -> Advance {
        if self.phase != CarouselPhase::Idle {
            debug!(?direction, phase = ?self.phase, "swap ignored");
            return Advance::Ignored;
        }
        debug!(?direction, "swap started");

        // Unbound right away so no tilt lands on a card that is about to leave.
        self.tilt.unbind();
        for control in Control::BOTH {
            self.styles.control_mut(control).interactive = false;
        }

        let outgoing = self.captions.element(Role::Current);
        let incoming = self.captions.element(match direction {
            Direction::Right => Role::Next,
            Direction::Left => Role::Previous,
        });
        let controls = Control::BOTH.map(Element::Control);
        let outgoing_text = self.styles.fragment_targets(outgoing);
        let incoming_text = self.styles.fragment_targets(incoming);

        let timeline = Timeline::new()
            .to(
                &controls,
                &[(Prop::Opacity, CONTROL_DISABLED_OPACITY)],
                Tweening::over(CONTROL_FADE_DURATION),
            )
            .to(
                &outgoing_text,
                &[(Prop::TranslateY, TEXT_EXIT_OFFSET), (Prop::Opacity, 0.0)],
                Tweening::over(TEXT_FADE_DURATION)
                    .stagger(Stagger::Each(TEXT_STAGGER))
                    .overlap(CONTROL_FADE_DURATION),
            )
            .call(Action::Relabel(direction))
            .call(Action::BindTilt)
            .from_to(
                &incoming_text,
                &[
                    (Prop::Opacity, 0.0, 1.0),
                    (Prop::TranslateY, TEXT_ENTER_OFFSET, 0.0),
                ],
                Tweening::over(TEXT_FADE_DURATION).stagger(Stagger::Each(TEXT_STAGGER)),
            )
            // Clickable as soon as the fade-in starts
            .call(Action::EnableControls)
            .to(
                &controls,
                &[(Prop::Opacity, 1.0)],
                Tweening::over(CONTROL_FADE_DURATION),
            );

        self.timeline = Some(timeline);
        self.phase = CarouselPhase::Transitioning;
        Advance::Started
    }

    fn relabel(&mut self, direction: Direction) {
        let departing_card = self.cards.element(Role::Current);
        let departing_background = self.backgrounds.element(Role::Current);
        let departing_caption = self.captions.element(Role::Current);

        self.cards.rotate(direction);
        self.backgrounds.rotate(direction);
        self.captions.rotate(direction);

        let arriving_card = self.cards.element(Role::Current);
        let arriving_background = self.backgrounds.element(Role::Current);

        for card in 0..SLOT_COUNT {
            self.styles.cards[card].z_index = if card == arriving_card {
                Z_CURRENT_CARD
            } else if card == departing_card {
                Z_DEPARTING_CARD
            } else {
                Z_WRAPPING_CARD
            };
            if let Some(role) = self.cards.role_of(card) {
                self.card_motion[card].move_to(Pose::card(role));
            }
        }

        for background in 0..SLOT_COUNT {
            self.styles.backgrounds[background].z_index = if background == arriving_background {
                Z_CURRENT_BACKGROUND
            } else if background == departing_background {
                Z_DEPARTING_BACKGROUND
            } else {
                Z_HIDDEN_BACKGROUND
            };
            if let Some(role) = self.backgrounds.role_of(background) {
                self.background_motion[background].move_to(Pose::background(role));
            }
        }

        // The tilt only ever applies to whatever is current.
        self.tilt.pointer_leave();
        self.set_rotation(departing_card, departing_caption, 0.0);

        debug!(
            current = arriving_card,
            previous = self.cards.element(Role::Previous),
            next = self.cards.element(Role::Next),
            "relabeled"
        );
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Relabel(direction) => self.relabel(direction),
            Action::BindTilt => self.tilt.bind(),
            Action::EnableControls => {
                for control in Control::BOTH {
                    self.styles.control_mut(control).interactive = true;
                }
            }
            Action::HideOverlay => self.styles.overlay.interactive = false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        for motion in self.card_motion.iter_mut().chain(self.background_motion.iter_mut()) {
            motion.update(dt);
        }

        let Some(timeline) = self.timeline.as_mut() else {
            return;
        };
        let actions = timeline.update(dt, &mut self.styles);
        let finished = timeline.is_finished();

        for action in actions {
            self.apply(action);
        }

        if finished {
            self.timeline = None;
            if self.phase != CarouselPhase::Idle {
                debug!(from = ?self.phase, "carousel idle");
            }
            self.phase = CarouselPhase::Idle;
        }
    }

    /// Tilts the current card and caption toward the pointer. Returns the applied angle.
    pub fn on_pointer_move(&mut self, pointer_x: f32, card_bounds: &Bounds) -> Option<f32> {
        let angle = self.tilt.pointer_move(pointer_x, card_bounds)?;
        self.set_rotation(self.cards.element(Role::Current), self.captions.element(Role::Current), angle);
        Some(angle)
    }

    pub fn on_pointer_leave(&mut self) {
        self.tilt.pointer_leave();
        self.set_rotation(self.cards.element(Role::Current), self.captions.element(Role::Current), 0.0);
    }

    fn set_rotation(&mut self, card: usize, caption: usize, angle: f32) {
        self.styles.set_value(Element::Card(card), Prop::RotationY, angle);
        self.styles.set_value(Element::Caption(caption), Prop::RotationY, angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn settle(carousel: &mut CarouselState) {
        for _ in 0..600 {
            carousel.update(STEP);
            if carousel.phase() == CarouselPhase::Idle {
                return;
            }
        }
        panic!("carousel never settled: {:?}", carousel.phase());
    }

    fn ready() -> CarouselState {
        let mut carousel = CarouselState::new(&[2, 3, 2]).unwrap();
        assert!(carousel.images_ready());
        settle(&mut carousel);
        carousel
    }

    fn card_at(carousel: &CarouselState) -> Bounds {
        let current = carousel.cards().element(Role::Current);
        carousel.card_pose(current).card_bounds(0.0, 1280.0, 720.0)
    }

    #[test]
    fn rejects_wrong_caption_count() {
        assert_eq!(
            CarouselState::new(&[1, 1]).unwrap_err(),
            CarouselError::CaptionCount(2)
        );
    }

    #[test]
    fn starts_hidden_and_locked() {
        let mut carousel = CarouselState::new(&[1, 1, 1]).unwrap();
        assert_eq!(carousel.phase(), CarouselPhase::Loading);
        assert!(!carousel.controls_enabled());
        assert_eq!(carousel.styles().cards[0].rise_offset, CARD_START_OFFSET);
        assert_eq!(carousel.advance(Direction::Right), Advance::Ignored);

        let bounds = card_at(&carousel);
        assert_eq!(carousel.on_pointer_move(bounds.x + bounds.width, &bounds), None);
    }

    #[test]
    fn entrance_runs_once() {
        let mut carousel = ready();
        let styles = carousel.styles();

        assert!(carousel.controls_enabled());
        assert!(carousel.tilt().is_bound());
        assert_eq!(styles.overlay.opacity, 0.0);
        assert!(!styles.overlay.interactive);
        assert!(styles.cards.iter().all(|card| card.rise_offset == 0.0));
        assert!(styles.fragments[0].iter().all(|f| f.opacity == 1.0 && f.translate_y == 0.0));
        assert!(styles.fragments[1].iter().all(|f| f.opacity == 0.0));
        assert!(Control::BOTH.iter().all(|&c| styles.control(c).opacity == 1.0));

        assert!(!carousel.images_ready());
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
    }

    fn step_until_controls_enabled(carousel: &mut CarouselState) {
        for _ in 0..600 {
            carousel.update(STEP);
            if carousel.controls_enabled() {
                return;
            }
        }
        panic!("controls never enabled: {:?}", carousel.phase());
    }

    #[test]
    fn entrance_enables_controls_as_they_start_fading_in() {
        let mut carousel = CarouselState::new(&[2, 3, 2]).unwrap();
        carousel.images_ready();
        step_until_controls_enabled(&mut carousel);

        assert_eq!(carousel.phase(), CarouselPhase::Entering);
        assert!(Control::BOTH.iter().all(|&c| carousel.styles().control(c).opacity < 1.0));
        assert!(!carousel.tilt().is_bound());
    }

    #[test]
    fn swap_enables_controls_as_they_start_fading_in() {
        let mut carousel = ready();
        carousel.advance(Direction::Right);
        step_until_controls_enabled(&mut carousel);

        assert_eq!(carousel.phase(), CarouselPhase::Transitioning);
        assert!(Control::BOTH.iter().all(|&c| carousel.styles().control(c).opacity < 1.0));
        assert_eq!(carousel.advance(Direction::Left), Advance::Ignored);
    }

    #[test]
    fn swap_right_rotates_every_ring() {
        let mut carousel = ready();
        let next_card = carousel.cards().element(Role::Next);
        let next_caption = carousel.captions().element(Role::Next);

        assert_eq!(carousel.advance(Direction::Right), Advance::Started);
        settle(&mut carousel);

        assert_eq!(carousel.cards().element(Role::Current), next_card);
        assert_eq!(carousel.backgrounds().element(Role::Current), next_card);
        assert_eq!(carousel.captions().element(Role::Current), next_caption);

        let styles = carousel.styles();
        assert_eq!(styles.cards[next_card].z_index, Z_CURRENT_CARD);
        assert_eq!(styles.cards[0].z_index, Z_DEPARTING_CARD);
        assert_eq!(styles.backgrounds[next_card].z_index, Z_CURRENT_BACKGROUND);
        assert_eq!(styles.backgrounds[0].z_index, Z_DEPARTING_BACKGROUND);
        assert!(styles.fragments[next_caption].iter().all(|f| f.opacity == 1.0 && f.translate_y == 0.0));
        assert!(styles.fragments[0].iter().all(|f| f.opacity == 0.0));
        assert!(carousel.controls_enabled());
        assert!(carousel.tilt().is_bound());
    }

    #[test]
    fn relabel_waits_for_caption_fade_out() {
        let mut carousel = ready();
        let before = carousel.cards().clone();

        carousel.advance(Direction::Left);
        assert!(!carousel.tilt().is_bound());
        assert!(!carousel.controls_enabled());

        // Two fragments: the fade-out ends at 0.1 + 0.4 seconds.
        carousel.update(0.45);
        assert_eq!(carousel.cards(), &before);
        assert_eq!(carousel.phase(), CarouselPhase::Transitioning);

        carousel.update(0.1);
        assert_ne!(carousel.cards(), &before);
        assert!(carousel.tilt().is_bound());
        assert!(!carousel.controls_enabled());
    }

    #[test]
    fn swaps_are_ignored_mid_transition() {
        let mut carousel = ready();
        carousel.advance(Direction::Right);
        carousel.update(0.1);
        assert_eq!(carousel.advance(Direction::Right), Advance::Ignored);
        assert_eq!(carousel.advance(Direction::Left), Advance::Ignored);
        settle(&mut carousel);

        let mut expected = SlotRing::new(0, 2, 1).unwrap();
        expected.rotate(Direction::Right);
        assert_eq!(carousel.cards(), &expected);
    }

    #[test]
    fn right_then_left_round_trips() {
        let mut carousel = ready();
        let original = carousel.cards().assignment();

        carousel.advance(Direction::Right);
        settle(&mut carousel);
        carousel.advance(Direction::Left);
        settle(&mut carousel);

        assert_eq!(carousel.cards().assignment(), original);
        assert_eq!(carousel.captions().assignment(), original);
    }

    #[test]
    fn three_swaps_return_home() {
        let mut carousel = ready();
        let original = carousel.cards().assignment();
        for _ in 0..3 {
            carousel.advance(Direction::Right);
            settle(&mut carousel);
        }
        assert_eq!(carousel.cards().assignment(), original);
        assert_eq!(carousel.backgrounds().assignment(), original);
    }

    #[test]
    fn pointer_tilts_card_and_caption() {
        let mut carousel = ready();
        let bounds = card_at(&carousel);

        let right = carousel.on_pointer_move(bounds.x + bounds.width * 0.9, &bounds).unwrap();
        assert!(right > 0.0);
        assert_eq!(carousel.styles().cards[0].rotation_y, right);
        assert_eq!(carousel.styles().captions[0].rotation_y, right);

        let left = carousel.on_pointer_move(bounds.x + 1.0, &bounds).unwrap();
        assert!(left < 0.0);

        carousel.on_pointer_leave();
        assert_eq!(carousel.styles().cards[0].rotation_y, 0.0);
        assert_eq!(carousel.styles().captions[0].rotation_y, 0.0);
    }

    #[test]
    fn pointer_is_ignored_while_swapping() {
        let mut carousel = ready();
        let bounds = card_at(&carousel);
        carousel.on_pointer_move(bounds.x + bounds.width, &bounds);

        carousel.advance(Direction::Right);
        assert_eq!(carousel.on_pointer_move(bounds.x, &bounds), None);
        settle(&mut carousel);

        assert_eq!(carousel.styles().cards[0].rotation_y, 0.0);
        assert_eq!(carousel.tilt().angle(), 0.0);
    }

    #[test]
    fn custom_initial_labels_are_respected() {
        let rings = || SlotRing::new(2, 0, 1).unwrap();
        let mut carousel = CarouselState::with_rings(&[1, 1, 1], rings(), rings(), rings()).unwrap();
        assert_eq!(carousel.styles().cards[2].z_index, Z_CURRENT_CARD);

        carousel.images_ready();
        settle(&mut carousel);
        assert_eq!(carousel.styles().fragments[2][0].opacity, 1.0);

        carousel.advance(Direction::Right);
        settle(&mut carousel);
        assert_eq!(carousel.cards().element(Role::Current), 1);
    }
}
