use std::ops::Range;

use sparkfall_engine::{
    GameConfig,
    render::{PixelRect, Rgb, Surface},
};

/// Raster dots per board cell along each axis.
pub(crate) const DOTS_PER_CELL: usize = 2;

/// Row-major grid of colored dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DotRaster {
    width: usize,
    height: usize,
    dots: Vec<Rgb>,
}

impl DotRaster {
    pub(crate) fn new(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            dots: vec![color; width * height],
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.dots[y * self.width + x])
    }

    fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.dots[y * self.width + x] = color;
        }
    }

    fn fill(&mut self, color: Rgb) {
        self.dots.fill(color);
    }
}

/// [`Surface`] backed by a double-buffered dot raster.
///
/// Each board cell maps to `DOTS_PER_CELL × DOTS_PER_CELL` dots. A rectangle
/// covers the dots whose centers lie inside it. A circle covers the dots
/// whose centers lie within its radius, or at least the dot under its center,
/// so small particles stay visible. Drawing goes to the back raster until
/// [`Surface::present`] publishes it.
#[derive(Debug, Clone)]
pub(crate) struct TerminalSurface {
    back: DotRaster,
    front: DotRaster,
    dot_px: f32,
}

impl TerminalSurface {
    pub(crate) fn new(config: &GameConfig) -> Self {
        let width = config.columns * DOTS_PER_CELL;
        let height = config.rows * DOTS_PER_CELL;
        let background = config.palette.background;
        #[expect(clippy::cast_precision_loss)]
        let dot_px = f32::from(config.cell_size) / DOTS_PER_CELL as f32;
        Self {
            back: DotRaster::new(width, height, background),
            front: DotRaster::new(width, height, background),
            dot_px,
        }
    }

    /// The last presented raster.
    pub(crate) fn front(&self) -> &DotRaster {
        &self.front
    }

    /// Dots whose centers fall in `[start, start + len)` pixels.
    fn dot_span(&self, start: f32, len: f32, limit: usize) -> Range<usize> {
        let first = to_index((start / self.dot_px - 0.5).ceil(), limit);
        let end = to_index(((start + len) / self.dot_px - 0.5).ceil(), limit);
        first..end.max(first)
    }

    #[expect(clippy::cast_precision_loss)]
    fn dot_center(&self, index: usize) -> f32 {
        (index as f32 + 0.5) * self.dot_px
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(value: f32, limit: usize) -> usize {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    (value as usize).min(limit)
}

impl Surface for TerminalSurface {
    fn fill_background(&mut self, color: Rgb) {
        self.back.fill(color);
    }

    #[expect(clippy::cast_precision_loss)]
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let xs = self.dot_span(rect.x as f32, rect.width as f32, self.back.width());
        let ys = self.dot_span(rect.y as f32, rect.height as f32, self.back.height());
        for y in ys {
            for x in xs.clone() {
                self.back.set(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, (cx, cy): (f32, f32), radius: f32, color: Rgb) {
        let xs = self.dot_span(cx - radius, 2.0 * radius, self.back.width());
        let ys = self.dot_span(cy - radius, 2.0 * radius, self.back.height());
        let mut covered = false;
        for y in ys {
            for x in xs.clone() {
                let (dx, dy) = (self.dot_center(x) - cx, self.dot_center(y) - cy);
                if dx * dx + dy * dy <= radius * radius {
                    self.back.set(x, y, color);
                    covered = true;
                }
            }
        }
        if !covered && cx >= 0.0 && cy >= 0.0 {
            let x = to_index((cx / self.dot_px).floor(), usize::MAX);
            let y = to_index((cy / self.dot_px).floor(), usize::MAX);
            self.back.set(x, y, color);
        }
    }

    fn present(&mut self) {
        self.front.clone_from(&self.back);
    }
}
