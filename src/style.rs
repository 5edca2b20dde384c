use crate::ring::SLOT_COUNT;
use crate::timeline::Animatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Prev,
    Next,
}

impl Control {
    pub const BOTH: [Control; 2] = [Control::Prev, Control::Next];

    fn index(self) -> usize {
        match self {
            Control::Prev => 0,
            Control::Next => 1,
        }
    }
}

/// Everything on screen a timeline can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Card(usize),
    Caption(usize),
    Fragment { caption: usize, index: usize },
    Control(Control),
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prop {
    Opacity,
    /// Vertical offset in pixels.
    TranslateY,
    /// Vertical offset as a fraction of the window height.
    RiseOffset,
    /// Y-axis rotation in degrees.
    RotationY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    pub opacity: f32,
    pub translate_y: f32,
    pub rise_offset: f32,
    pub rotation_y: f32,
    pub z_index: i32,
    pub interactive: bool,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
            rise_offset: 0.0,
            rotation_y: 0.0,
            z_index: 0,
            interactive: true,
        }
    }
}

impl ElementStyle {
    pub fn get(&self, prop: Prop) -> f32 {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::TranslateY => self.translate_y,
            Prop::RiseOffset => self.rise_offset,
            Prop::RotationY => self.rotation_y,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f32) {
        match prop {
            Prop::Opacity => self.opacity = value,
            Prop::TranslateY => self.translate_y = value,
            Prop::RiseOffset => self.rise_offset = value,
            Prop::RotationY => self.rotation_y = value,
        }
    }
}

/// Inline styles for every element of the carousel.
#[derive(Debug, Clone)]
pub struct Styles {
    pub cards: [ElementStyle; SLOT_COUNT],
    pub backgrounds: [ElementStyle; SLOT_COUNT],
    pub captions: [ElementStyle; SLOT_COUNT],
    pub fragments: [Vec<ElementStyle>; SLOT_COUNT],
    pub controls: [ElementStyle; 2],
    pub overlay: ElementStyle,
}

impl Styles {
    pub fn new(fragment_counts: [usize; SLOT_COUNT]) -> Self {
        Self {
            cards: [ElementStyle::default(); SLOT_COUNT],
            backgrounds: [ElementStyle::default(); SLOT_COUNT],
            captions: [ElementStyle::default(); SLOT_COUNT],
            fragments: fragment_counts.map(|count| vec![ElementStyle::default(); count]),
            controls: [ElementStyle::default(); 2],
            overlay: ElementStyle::default(),
        }
    }

    pub fn control(&self, control: Control) -> &ElementStyle {
        &self.controls[control.index()]
    }

    pub fn control_mut(&mut self, control: Control) -> &mut ElementStyle {
        &mut self.controls[control.index()]
    }

    pub fn fragment_targets(&self, caption: usize) -> Vec<Element> {
        (0..self.fragments[caption].len())
            .map(|index| Element::Fragment { caption, index })
            .collect()
    }

    fn style(&self, element: Element) -> Option<&ElementStyle> {
        match element {
            Element::Card(i) => self.cards.get(i),
            Element::Caption(i) => self.captions.get(i),
            Element::Fragment { caption, index } => self.fragments.get(caption)?.get(index),
            Element::Control(control) => Some(self.control(control)),
            Element::Overlay => Some(&self.overlay),
        }
    }

    fn style_mut(&mut self, element: Element) -> Option<&mut ElementStyle> {
        match element {
            Element::Card(i) => self.cards.get_mut(i),
            Element::Caption(i) => self.captions.get_mut(i),
            Element::Fragment { caption, index } => self.fragments.get_mut(caption)?.get_mut(index),
            Element::Control(control) => Some(self.control_mut(control)),
            Element::Overlay => Some(&mut self.overlay),
        }
    }
}

impl Animatable<Element, Prop> for Styles {
    fn value(&self, target: Element, prop: Prop) -> f32 {
        self.style(target).map_or(0.0, |style| style.get(prop))
    }

    fn set_value(&mut self, target: Element, prop: Prop, value: f32) {
        if let Some(style) = self.style_mut(target) {
            style.set(prop, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_reach_the_addressed_element() {
        let mut styles = Styles::new([2, 3, 1]);
        styles.set_value(Element::Fragment { caption: 1, index: 2 }, Prop::Opacity, 0.25);
        styles.set_value(Element::Control(Control::Next), Prop::TranslateY, 4.0);

        assert_eq!(styles.fragments[1][2].opacity, 0.25);
        assert_eq!(styles.control(Control::Next).translate_y, 4.0);
        assert_eq!(styles.control(Control::Prev).translate_y, 0.0);
    }

    #[test]
    fn rotation_reaches_cards_and_captions() {
        let mut styles = Styles::new([1, 1, 1]);
        styles.set_value(Element::Card(2), Prop::RotationY, 17.5);
        styles.set_value(Element::Caption(2), Prop::RotationY, -17.5);

        assert_eq!(styles.cards[2].rotation_y, 17.5);
        assert_eq!(styles.captions[2].rotation_y, -17.5);
        assert_eq!(styles.value(Element::Caption(2), Prop::RotationY), -17.5);
        assert_eq!(styles.captions[0].rotation_y, 0.0);
    }

    #[test]
    fn missing_elements_are_ignored() {
        let mut styles = Styles::new([1, 1, 1]);
        styles.set_value(Element::Fragment { caption: 0, index: 9 }, Prop::Opacity, 0.0);
        assert_eq!(styles.value(Element::Card(7), Prop::Opacity), 0.0);
        assert_eq!(styles.fragment_targets(2), vec![Element::Fragment { caption: 2, index: 0 }]);
    }
}
