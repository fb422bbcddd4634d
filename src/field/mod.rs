use crate::{
    graphics::{blend::Pixel, Argb},
    math::{self, rng::Rng},
};

/// Horizontal sway speed, radians per millisecond before the /4 slowdown.
pub const SWAY_RATE: f64 = 0.005;

/// Headroom below the viewport within which a bubble still scales in.
pub const FADE_MARGIN: f32 = 75.0;

const RADIUS_MIN: f32 = 25.0;
const RADIUS_SPREAD: f32 = 50.0;
const ALPHA_SPREAD: f32 = 0.3;
const VELOCITY_MIN: f32 = 4.0;
const VELOCITY_SPREAD: f32 = 1.0;

pub struct Bubble {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub base_radius: f32,
    pub base_alpha: f32,
    pub velocity: f32,
    pub sin_offset: f32,
}

impl Bubble {
    /// Depth cue: bubbles shrink and fade as they rise toward the top.
    ///
    /// Outside [0, view_h + FADE_MARGIN] the factor is NaN and the
    /// bubble stays invisible for the frame. A freshly wrapped large
    /// bubble starts below that band and fades in once it enters it.
    pub fn depth_factor(&self, view_h: f32) -> f32 {
        math::map(self.y, 0.0, view_h + FADE_MARGIN, 0.0, 1.0)
    }

    /// Advances the rise and recycles the bubble to below the viewport
    /// once its top edge clears the screen. The wrap check uses the
    /// radius the bubble was drawn with this frame; a NaN radius never
    /// wraps, the bubble keeps rising until its depth factor is valid
    /// again.
    pub fn rise_and_wrap(&mut self, radius: f32, view_h: f32) {
        self.y -= self.velocity;

        if self.y - 2.0 * radius <= 0.0 {
            self.y = view_h + 2.0 * self.base_radius;
        }
    }

    /// Sideways wobble. Neighboring indices move in counterphase so
    /// the field does not drift as a block.
    pub fn sway(&mut self, now_ms: f64) {
        let angle = (now_ms * SWAY_RATE / 4.0) as f32 + self.sin_offset;
        let step = angle.sin() * 2.0;

        if self.index % 2 == 1 {
            self.x += step;
        } else {
            self.x -= step;
        }
    }
}

pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self {
            bubbles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn bubbles_mut(&mut self) -> &mut [Bubble] {
        &mut self.bubbles
    }

    /// Discards the whole batch and rolls a fresh one scattered over
    /// the given viewport.
    pub fn populate(&mut self, count: usize, view_w: f32, view_h: f32) {
        let mut rng = Rng::new(1.0);

        self.bubbles.clear();
        self.bubbles.reserve(count);

        for index in 0..count {
            self.bubbles.push(Bubble {
                index,
                x: rng.advance() * view_w,
                y: rng.advance() * view_h,
                base_radius: RADIUS_MIN + rng.advance() * RADIUS_SPREAD,
                base_alpha: rng.advance() * ALPHA_SPREAD,
                velocity: VELOCITY_MIN + rng.advance() * VELOCITY_SPREAD,
                sin_offset: rng.advance() * std::f32::consts::TAU,
            });
        }
    }
}

/// How many bubbles a viewport of the given size gets.
pub fn bubble_count(view_w: f32, view_h: f32, pixels_per_bubble: f32) -> usize {
    (view_w * view_h / pixels_per_bubble).round() as usize
}

/// Per-frame callback: clear, then draw and advance every bubble in
/// index order.
pub const render: crate::RenderFunc = |prog, now| {
    let view_h = prog.view_h();

    prog.pix.clear();

    let pix = &mut prog.pix;

    for bubble in prog.field.bubbles_mut() {
        let factor = bubble.depth_factor(view_h);
        let radius = bubble.base_radius * factor;
        let alpha = bubble.base_alpha * factor;

        let color = Argb::white().set_alpha((alpha * 255.0) as u8);
        pix.draw_circle((bubble.x, bubble.y), radius, color);

        bubble.rise_and_wrap(radius, view_h);
        bubble.sway(now);
    }
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Program, PIXELS_PER_BUBBLE};
    use crate::graphics::blend::Pixel;
    use std::f32::consts::FRAC_PI_2;

    fn bubble(index: usize) -> Bubble {
        Bubble {
            index,
            x: 50.0,
            y: 100.0,
            base_radius: 30.0,
            base_alpha: 0.25,
            velocity: 4.0,
            sin_offset: 0.0,
        }
    }

    #[test]
    fn count_follows_viewport_area() {
        assert_eq!(bubble_count(1920.0, 1080.0, PIXELS_PER_BUBBLE), 138);
        assert_eq!(bubble_count(800.0, 600.0, PIXELS_PER_BUBBLE), 32);
        assert_eq!(bubble_count(0.0, 600.0, PIXELS_PER_BUBBLE), 0);
    }

    #[test]
    fn populate_replaces_batch_within_ranges() {
        let mut field = BubbleField::new();
        field.populate(100, 1920.0, 1080.0);

        assert_eq!(field.len(), 100);

        for (i, b) in field.bubbles().iter().enumerate() {
            assert_eq!(b.index, i);
            assert!((0.0..1920.0).contains(&b.x));
            assert!((0.0..1080.0).contains(&b.y));
            assert!((25.0..75.0).contains(&b.base_radius));
            assert!((0.0..0.3).contains(&b.base_alpha));
            assert!((4.0..5.0).contains(&b.velocity));
            assert!((0.0..std::f32::consts::TAU).contains(&b.sin_offset));
        }

        field.populate(10, 1920.0, 1080.0);
        assert_eq!(field.len(), 10);
    }

    #[test]
    fn depth_factor_spans_viewport_with_margin() {
        let mut b = bubble(0);

        b.y = 0.0;
        assert_eq!(b.depth_factor(600.0), 0.0);

        b.y = 675.0;
        assert!((b.depth_factor(600.0) - 1.0).abs() < 1e-5);

        b.y = 676.0;
        assert!(b.depth_factor(600.0).is_nan());

        b.y = -1.0;
        assert!(b.depth_factor(600.0).is_nan());
    }

    #[test]
    fn bubble_wraps_to_below_viewport() {
        let mut b = bubble(0);
        b.y = 3.0;

        // drawn tiny near the top, recycled the moment the step
        // carries its top edge past the upper border
        b.rise_and_wrap(0.5, 600.0);
        assert_eq!(b.y, 600.0 + 2.0 * b.base_radius);
    }

    #[test]
    fn nan_radius_never_wraps() {
        let mut b = bubble(0);
        b.y = 690.0;

        b.rise_and_wrap(f32::NAN, 600.0);
        assert_eq!(b.y, 686.0);
    }

    #[test]
    fn high_bubble_keeps_rising() {
        let mut b = bubble(0);
        b.y = 300.0;

        b.rise_and_wrap(20.0, 600.0);
        assert_eq!(b.y, 296.0);
    }

    #[test]
    fn sway_alternates_by_index_parity() {
        let mut even = bubble(0);
        let mut odd = bubble(1);
        even.sin_offset = FRAC_PI_2;
        odd.sin_offset = FRAC_PI_2;

        even.sway(0.0);
        odd.sway(0.0);

        assert_eq!(even.x, 48.0);
        assert_eq!(odd.x, 52.0);
    }

    #[test]
    fn render_draws_and_advances() {
        let mut prog = Program::new();
        prog.update_size((200, 120), 1.0);
        prog.regenerate_field();

        prog.field.bubbles_mut()[0] = Bubble {
            index: 0,
            x: 100.0,
            y: 60.0,
            base_radius: 30.0,
            base_alpha: 0.25,
            velocity: 4.0,
            sin_offset: 0.0,
        };

        (render)(&mut prog, 0.0);

        // center pixel got lightened over the background
        let bg_red = prog.pix.background().decompose()[1];
        let red = prog.pix.as_slice()[60 * 200 + 100].decompose()[1];
        assert!(red > bg_red, "red {red} <= background {bg_red}");

        // motion advanced; phase zero sway leaves x alone
        assert_eq!(prog.field.bubbles()[0].y, 56.0);
        assert_eq!(prog.field.bubbles()[0].x, 100.0);
    }
}
