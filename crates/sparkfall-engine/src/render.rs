//! Drawing commands for a frame, independent of any display backend.
//!
//! [`draw_frame`] turns a [`GameLoop`] into a short sequence of fill calls on
//! a [`Surface`]. Coordinates are board pixels: the cell at `(col, row)`
//! covers `col * cell_size .. (col + 1) * cell_size` horizontally, and the
//! same vertically.

use crate::{core::Grid, engine::GameLoop};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in board pixels. `x` and `y` may be negative for
/// cells above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A 2-D drawing target.
pub trait Surface {
    /// Clears the whole surface to `color`.
    fn fill_background(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb);

    /// Publishes everything drawn since the previous `present`.
    fn present(&mut self);
}

/// Emits one frame of `game` onto `surface`.
///
/// Draw order is background, locked cells, falling piece, particles, and
/// the game-over box when the game is over, followed by
/// [`Surface::present`].
pub fn draw_frame<S>(game: &GameLoop, surface: &mut S)
where
    S: Surface + ?Sized,
{
    let config = game.config();
    let palette = &config.palette;
    let cell = f32::from(config.cell_size);

    surface.fill_background(palette.background);
    draw_grid(game.grid(), config.cell_size, palette.locked, surface);

    let offset = game.controller().offset();
    for (col, row) in game.falling_piece().occupied_positions() {
        #[expect(clippy::cast_precision_loss)]
        let (x, y) = (
            (col as f32 + offset.x()) * cell,
            (row as f32 + offset.y()) * cell,
        );
        let rect = PixelRect::new(
            to_px(x),
            to_px(y),
            u32::from(config.cell_size),
            u32::from(config.cell_size),
        );
        surface.fill_rect(rect, palette.falling);
    }

    let radius = config.particles.radius;
    for p in game.particles().particles() {
        surface.fill_circle((p.x(), p.y()), radius, p.color());
    }

    if game.state().is_game_over() {
        surface.fill_rect(game_over_box(game), palette.overlay);
    }

    surface.present();
}

/// Centered box behind the game-over message: two cells narrower than the
/// board and four cells tall, clipped to the board.
#[must_use]
pub fn game_over_box(game: &GameLoop) -> PixelRect {
    let config = game.config();
    let cell = u32::from(config.cell_size);
    let (board_w, board_h) = (config.board_width_px(), config.board_height_px());
    let width = board_w.saturating_sub(2 * cell).max(cell).min(board_w);
    let height = (4 * cell).min(board_h);
    let x = i32::try_from((board_w - width) / 2).unwrap_or(0);
    let y = i32::try_from((board_h - height) / 2).unwrap_or(0);
    PixelRect::new(x, y, width, height)
}

fn draw_grid<S>(grid: &Grid, cell_size: u16, color: Rgb, surface: &mut S)
where
    S: Surface + ?Sized,
{
    let size = i32::from(cell_size);
    for (col, row) in grid.occupied_cells() {
        let (Ok(col), Ok(row)) = (i32::try_from(col), i32::try_from(row)) else {
            continue;
        };
        let rect = PixelRect::new(
            col * size,
            row * size,
            u32::from(cell_size),
            u32::from(cell_size),
        );
        surface.fill_rect(rect, color);
    }
}

#[expect(clippy::cast_possible_truncation)]
fn to_px(value: f32) -> i32 {
    value.floor() as i32
}
