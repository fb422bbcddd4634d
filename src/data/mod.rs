pub mod config;
pub mod log;

use crate::field::{self, BubbleField};
use crate::graphics::Canvas;

pub const DEFAULT_MILLI_HZ: u32 = 30 * 1000;

pub const DEFAULT_WIN_W: u16 = 960;
pub const DEFAULT_WIN_H: u16 = 540;

/// Viewport pixels claimed by a single bubble.
pub const PIXELS_PER_BUBBLE: f32 = 15_000.0;

pub const MAX_WIDTH: u32 = 7680;
pub const MAX_HEIGHT: u32 = 4320;

pub struct WindowProps {
    pub width: u16,
    pub height: u16,
}

/// Main program struct
///
/// Owns the pixel canvas, the bubble field and the startup
/// parameters. Window plumbing lives in `modes::windowed_mode`,
/// frame pacing in `animator`; both borrow this struct through the
/// defined operations only.
pub(crate) struct Program {
    pub pix: Canvas,
    pub field: BubbleField,
    pub window_props: WindowProps,

    pub milli_hz: u32,
    pub density: f32,
    pub quiet: bool,

    view_w: f32,
    view_h: f32,

    bubble_budget: Option<usize>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            pix: Canvas::new(DEFAULT_WIN_W as usize, DEFAULT_WIN_H as usize),
            field: BubbleField::new(),
            window_props: WindowProps {
                width: DEFAULT_WIN_W,
                height: DEFAULT_WIN_H,
            },

            milli_hz: DEFAULT_MILLI_HZ,
            density: PIXELS_PER_BUBBLE,
            quiet: false,

            view_w: DEFAULT_WIN_W as f32,
            view_h: DEFAULT_WIN_H as f32,

            bubble_budget: None,
        }
    }

    pub fn view_w(&self) -> f32 {
        self.view_w
    }

    pub fn view_h(&self) -> f32 {
        self.view_h
    }

    /// Adopts a new backing-store size. The canvas transform and the
    /// viewport are re-derived from `scale_factor`; nothing is stacked
    /// onto the previous transform.
    pub fn update_size(&mut self, size: (u32, u32), scale_factor: f64) {
        let (w, h) = size;
        let scale = scale_factor as f32;

        self.pix.resize(w as usize, h as usize, scale);

        self.view_w = w as f32 / scale;
        self.view_h = h as f32 / scale;
    }

    /// Rolls a whole new batch of bubbles for the current viewport.
    /// The bubble budget is frozen the first time this runs; later
    /// calls reuse it even if the viewport has changed since.
    pub fn regenerate_field(&mut self) {
        let budget = *self.bubble_budget.get_or_insert(field::bubble_count(
            self.view_w,
            self.view_h,
            self.density,
        ));

        self.field.populate(budget, self.view_w, self.view_h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_size_derives_viewport_from_scale() {
        let mut prog = Program::new();
        prog.update_size((200, 100), 2.0);

        assert_eq!(prog.view_w(), 100.0);
        assert_eq!(prog.view_h(), 50.0);
        assert_eq!(prog.pix.width(), 200);
        assert_eq!(prog.pix.height(), 100);
        assert_eq!(prog.pix.scale(), 2.0);
    }

    #[test]
    fn bubble_budget_is_frozen_at_first_generation() {
        let mut prog = Program::new();

        prog.update_size((1500, 1000), 1.0);
        prog.regenerate_field();
        assert_eq!(prog.field.len(), 100);

        // a much larger viewport keeps the original budget, so the
        // field gets sparser instead of denser
        prog.update_size((3000, 2000), 1.0);
        prog.regenerate_field();
        assert_eq!(prog.field.len(), 100);
    }

    #[test]
    fn regeneration_scatters_into_current_viewport() {
        let mut prog = Program::new();
        prog.update_size((1500, 1000), 1.0);
        prog.regenerate_field();

        for b in prog.field.bubbles() {
            assert!(b.x < 1500.0);
            assert!(b.y < 1000.0);
        }
    }
}
