//! A small sequenced tween scheduler.
//!
//! Steps are placed one after another on a shared clock. Property tweens
//! write through an [`Animatable`] sink; `call` steps hand their action
//! back to the owner once every step placed before them has completed.

use raylib::prelude::*;

/// Penner-style easing signature used by `raylib::ease`: `(t, begin, change, duration)`.
pub type Easing = fn(f32, f32, f32, f32) -> f32;

/// Anything whose numeric properties a timeline can read and write.
pub trait Animatable<T, P> {
    fn value(&self, target: T, prop: P) -> f32;
    fn set_value(&mut self, target: T, prop: P, value: f32);
}

#[derive(Debug, Clone, Copy)]
pub enum Stagger {
    None,
    /// Fixed offset between consecutive targets.
    Each(f32),
    /// Spread `amount` seconds over all targets, last target first,
    /// with offsets distributed by `easing`.
    FromEnd { amount: f32, easing: Easing },
}

#[derive(Debug, Clone, Copy)]
pub struct Tweening {
    pub duration: f32,
    pub delay: f32,
    pub stagger: Stagger,
    pub easing: Easing,
    /// How far this step starts before the previous one ends.
    pub overlap: f32,
}

impl Default for Tweening {
    fn default() -> Self {
        Self {
            duration: 0.5,
            delay: 0.0,
            stagger: Stagger::None,
            easing: ease::quad_out,
            overlap: 0.0,
        }
    }
}

impl Tweening {
    pub fn over(duration: f32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = stagger;
        self
    }

    #[cfg(test)]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn overlap(mut self, overlap: f32) -> Self {
        self.overlap = overlap;
        self
    }

    fn offset(&self, index: usize, count: usize) -> f32 {
        match self.stagger {
            Stagger::None => 0.0,
            Stagger::Each(step) => step * index as f32,
            Stagger::FromEnd { amount, easing } => {
                if count < 2 {
                    return 0.0;
                }
                let rank = (count - 1 - index) as f32;
                let span = (count - 1) as f32;
                easing(rank, 0.0, amount, span)
            }
        }
    }
}

#[derive(Debug)]
struct Track<T, P> {
    target: T,
    prop: P,
    from: Option<f32>,
    to: f32,
    start: f32,
    duration: f32,
    easing: Easing,
    done: bool,
}

#[derive(Debug)]
enum Entry<T, P, A> {
    Tween(Track<T, P>),
    Call { at: f32, action: Option<A> },
}

#[derive(Debug)]
pub struct Timeline<T, P, A> {
    entries: Vec<Entry<T, P, A>>,
    cursor: f32,
    clock: f32,
}

impl<T: Copy, P: Copy, A> Default for Timeline<T, P, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, P: Copy, A> Timeline<T, P, A> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0.0,
            clock: 0.0,
        }
    }

    /// Tween `props` on every target from whatever value they hold when the step starts.
    pub fn to(self, targets: &[T], props: &[(P, f32)], tweening: Tweening) -> Self {
        let props: Vec<(P, Option<f32>, f32)> = props.iter().map(|&(p, to)| (p, None, to)).collect();
        self.place(targets, &props, tweening)
    }

    /// Tween `props` on every target between explicit `(prop, from, to)` values.
    pub fn from_to(self, targets: &[T], props: &[(P, f32, f32)], tweening: Tweening) -> Self {
        let props: Vec<(P, Option<f32>, f32)> = props
            .iter()
            .map(|&(p, from, to)| (p, Some(from), to))
            .collect();
        self.place(targets, &props, tweening)
    }

    /// Hand `action` back once all previously placed steps have completed.
    pub fn call(self, action: A) -> Self {
        self.call_overlapping(action, 0.0)
    }

    /// Hand `action` back `overlap` seconds before the previous steps end,
    /// where a following step placed with the same overlap starts.
    pub fn call_overlapping(mut self, action: A, overlap: f32) -> Self {
        self.entries.push(Entry::Call {
            at: (self.cursor - overlap).max(0.0),
            action: Some(action),
        });
        self
    }

    fn place(mut self, targets: &[T], props: &[(P, Option<f32>, f32)], tweening: Tweening) -> Self {
        let position = (self.cursor - tweening.overlap).max(0.0);
        let mut end = position;

        for (index, &target) in targets.iter().enumerate() {
            let start = position + tweening.delay + tweening.offset(index, targets.len());
            end = end.max(start + tweening.duration);
            for &(prop, from, to) in props {
                self.entries.push(Entry::Tween(Track {
                    target,
                    prop,
                    from,
                    to,
                    start,
                    duration: tweening.duration,
                    easing: tweening.easing,
                    done: false,
                }));
            }
        }

        self.cursor = self.cursor.max(end);
        self
    }

    /// Total length of the placed steps in seconds.
    #[cfg(test)]
    pub fn duration(&self) -> f32 {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.entries.iter().all(|entry| match entry {
            Entry::Tween(track) => track.done,
            Entry::Call { action, .. } => action.is_none(),
        })
    }

    /// Advance the clock, writing tweened values into `sink` in placement
    /// order and returning the actions that became due.
    pub fn update<S: Animatable<T, P>>(&mut self, dt: f32, sink: &mut S) -> Vec<A> {
        self.clock += dt;
        let clock = self.clock;
        let mut due = Vec::new();

        for entry in self.entries.iter_mut() {
            match entry {
                Entry::Tween(track) => {
                    if track.done || clock < track.start {
                        continue;
                    }
                    let from = *track
                        .from
                        .get_or_insert_with(|| sink.value(track.target, track.prop));
                    let t = (clock - track.start).min(track.duration);
                    let value = if track.duration <= 0.0 || t >= track.duration {
                        track.done = true;
                        track.to
                    } else {
                        (track.easing)(t, from, track.to - from, track.duration)
                    };
                    sink.set_value(track.target, track.prop, value);
                }
                Entry::Call { at, action } => {
                    if clock >= *at {
                        if let Some(action) = action.take() {
                            due.push(action);
                        }
                    }
                }
            }
        }

        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Sink {
        values: HashMap<(u8, char), f32>,
        writes: Vec<(u8, char, f32)>,
    }

    impl Animatable<u8, char> for Sink {
        fn value(&self, target: u8, prop: char) -> f32 {
            self.values.get(&(target, prop)).copied().unwrap_or(1.0)
        }

        fn set_value(&mut self, target: u8, prop: char, value: f32) {
            self.values.insert((target, prop), value);
            self.writes.push((target, prop, value));
        }
    }

    fn linear() -> Tweening {
        Tweening::over(1.0).easing(ease::linear_none)
    }

    #[test]
    fn steps_run_in_sequence() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, &str> = Timeline::new()
            .to(&[1], &[('o', 0.0)], linear())
            .call("swap")
            .from_to(&[2], &[('o', 0.0, 1.0)], linear());

        assert_eq!(timeline.duration(), 2.0);

        let fired = timeline.update(0.5, &mut sink);
        assert!(fired.is_empty());
        assert!((sink.value(1, 'o') - 0.5).abs() < 1e-5);
        assert!(!sink.values.contains_key(&(2, 'o')));

        let fired = timeline.update(0.5, &mut sink);
        assert_eq!(fired, vec!["swap"]);
        assert_eq!(sink.value(1, 'o'), 0.0);
        assert_eq!(sink.value(2, 'o'), 0.0);

        let fired = timeline.update(1.5, &mut sink);
        assert!(fired.is_empty());
        assert_eq!(sink.value(2, 'o'), 1.0);
        assert!(timeline.is_finished());
    }

    #[test]
    fn call_waits_for_the_slowest_staggered_target() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, ()> = Timeline::new()
            .to(&[1, 2, 3], &[('o', 0.0)], linear().stagger(Stagger::Each(0.1)))
            .call(());

        assert!((timeline.duration() - 1.2).abs() < 1e-5);
        assert!(timeline.update(1.1, &mut sink).is_empty());
        assert!(sink.value(3, 'o') > 0.0);
        assert_eq!(timeline.update(0.2, &mut sink).len(), 1);
        assert!(timeline.is_finished());
    }

    #[test]
    fn actions_fire_once() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, u32> = Timeline::new().call(7);
        assert_eq!(timeline.update(0.0, &mut sink), vec![7]);
        assert!(timeline.update(1.0, &mut sink).is_empty());
    }

    #[test]
    fn overlap_starts_before_previous_end() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, ()> = Timeline::new()
            .to(&[1], &[('o', 0.0)], linear())
            .to(&[2], &[('o', 0.0)], linear().overlap(0.4));

        assert!((timeline.duration() - 1.6).abs() < 1e-5);
        timeline.update(0.8, &mut sink);
        assert!(sink.value(2, 'o') < 1.0);
    }

    #[test]
    fn from_end_stagger_starts_last_target_first() {
        let tweening = linear().stagger(Stagger::FromEnd {
            amount: 0.1,
            easing: ease::linear_none,
        });
        assert!((tweening.offset(2, 3) - 0.0).abs() < 1e-6);
        assert!((tweening.offset(1, 3) - 0.05).abs() < 1e-6);
        assert!((tweening.offset(0, 3) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn to_reads_value_when_step_starts() {
        let mut sink = Sink::default();
        sink.values.insert((1, 'o'), 0.25);
        let mut timeline: Timeline<u8, char, ()> =
            Timeline::new().to(&[1], &[('o', 0.75)], linear().delay(1.0));

        sink.values.insert((1, 'o'), 0.5);
        timeline.update(1.5, &mut sink);
        assert!((sink.value(1, 'o') - 0.625).abs() < 1e-5);
    }

    #[test]
    fn overlapping_call_fires_when_the_overlapping_step_starts() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, &str> = Timeline::new()
            .to(&[1], &[('o', 0.0)], linear())
            .call_overlapping("enable", 0.4)
            .to(&[2], &[('o', 0.0)], linear().overlap(0.4))
            .call("done");

        assert!(timeline.update(0.5, &mut sink).is_empty());
        assert!(!sink.values.contains_key(&(2, 'o')));

        assert_eq!(timeline.update(0.2, &mut sink), vec!["enable"]);
        assert!(sink.value(2, 'o') > 0.0 && sink.value(2, 'o') < 1.0);

        assert_eq!(timeline.update(1.0, &mut sink), vec!["done"]);
        assert!(timeline.is_finished());
    }

    #[test]
    fn delay_postpones_first_write() {
        let mut sink = Sink::default();
        let mut timeline: Timeline<u8, char, ()> =
            Timeline::new().to(&[1], &[('o', 0.0)], linear().delay(0.5));
        timeline.update(0.25, &mut sink);
        assert!(sink.writes.is_empty());
        assert!(!timeline.is_finished());
    }
}
