pub mod blend;

use blend::Pixel;

pub use blend::{Argb, Mixer};

const DEFAULT_BACKGROUND: Argb = 0xFF_0A_1A_2F;

/// CPU pixel canvas.
///
/// The buffer is kept at the backing-store resolution. Draw calls take
/// viewport coordinates and go through a uniform scale transform, so
/// callers never handle the device pixel ratio themselves.
pub struct Canvas {
    buffer: Vec<Argb>,
    width: usize,
    height: usize,
    scale: f32,
    background: Argb,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![DEFAULT_BACKGROUND; width * height],
            width,
            height,
            scale: 1.0,
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn as_slice(&self) -> &[Argb] {
        &self.buffer
    }

    pub fn set_background(&mut self, background: Argb) {
        self.background = background;
    }

    pub fn background(&self) -> Argb {
        self.background
    }

    /// Adopts a new backing-store size and scale. The transform is
    /// re-derived from `scale` on every call, it never accumulates
    /// across resizes.
    pub fn resize(&mut self, width: usize, height: usize, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;

        self.buffer.clear();
        self.buffer.resize(width * height, self.background);
    }

    pub fn clear(&mut self) {
        self.buffer.fill(self.background);
    }

    /// Fills a circle given in viewport coordinates. A radius that is
    /// zero, negative or NaN draws nothing.
    pub fn draw_circle_by(&mut self, center: (f32, f32), radius: f32, color: Argb, mixer: Mixer) {
        if !(radius > 0.0) {
            return;
        }

        let cx = center.0 * self.scale;
        let cy = center.1 * self.scale;
        let r = radius * self.scale;
        let r2 = r * r;

        let y_start = (cy - r).floor().max(0.0) as i32;
        let y_end = (cy + r).ceil().min(self.height as f32 - 1.0) as i32;

        for y in y_start..=y_end {
            let dy = y as f32 - cy;
            let span2 = r2 - dy * dy;

            if span2 <= 0.0 {
                continue;
            }

            let half = span2.sqrt();
            let x_start = (cx - half).floor().max(0.0) as i32;
            let x_end = (cx + half).ceil().min(self.width as f32 - 1.0) as i32;

            let row = y as usize * self.width;

            for x in x_start..=x_end {
                let i = row + x as usize;
                self.buffer[i] = mixer(self.buffer[i], color);
            }
        }
    }

    pub fn draw_circle(&mut self, center: (f32, f32), radius: f32, color: Argb) {
        self.draw_circle_by(center, radius, color, u32::mix);
    }
}
