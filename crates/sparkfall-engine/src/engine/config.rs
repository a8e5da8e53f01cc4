use std::time::Duration;

use crate::render::Rgb;

/// Smallest accepted board side; every catalog shape fits in 4×4.
pub const MIN_BOARD_SIZE: usize = 4;

/// Rejected [`GameConfig`] combinations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board {columns}x{rows} is smaller than 4x4")]
    BoardTooSmall { columns: usize, rows: usize },
    #[display("fast fall interval {fast:?} must be shorter than normal interval {normal:?}")]
    FastIntervalNotShorter { fast: Duration, normal: Duration },
    #[display("cell size must be non-zero")]
    ZeroCellSize,
}

/// Particle burst parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleConfig {
    /// Particles spawned for each cell of a cleared row.
    pub per_cell: usize,
    pub lifetime: Duration,
    /// Downward acceleration in pixels per frame².
    pub gravity: f32,
    /// Drawn radius in pixels.
    pub radius: f32,
    pub color: Rgb,
}

/// Colors used by [`draw_frame`](crate::render::draw_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub locked: Rgb,
    pub falling: Rgb,
    pub overlay: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::new(0, 0, 0),
            locked: Rgb::new(0, 255, 0),
            falling: Rgb::new(255, 0, 0),
            overlay: Rgb::new(50, 50, 50),
        }
    }
}

/// Game constants, fixed for the lifetime of a [`GameLoop`](super::GameLoop).
///
/// Pixel values are in the coordinate space handed to a
/// [`Surface`](crate::render::Surface): one grid cell spans `cell_size`
/// pixels on each side.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use sparkfall_engine::{ConfigError, GameConfig};
///
/// let config = GameConfig::default();
/// assert_eq!((config.board_width_px(), config.board_height_px()), (300, 600));
/// assert!(config.validate().is_ok());
///
/// let mut config = GameConfig::with_board(8, 16);
/// config.fast_fall_interval = Duration::from_millis(800);
/// assert!(matches!(
///     config.validate(),
///     Err(ConfigError::FastIntervalNotShorter { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: u16,
    pub normal_fall_interval: Duration,
    /// Fall interval while soft-drop is held.
    pub fast_fall_interval: Duration,
    pub lateral_repeat_interval: Duration,
    pub particles: ParticleConfig,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 20,
            cell_size: 30,
            normal_fall_interval: Duration::from_millis(500),
            fast_fall_interval: Duration::from_millis(100),
            lateral_repeat_interval: Duration::from_millis(100),
            particles: ParticleConfig {
                per_cell: 5,
                lifetime: Duration::from_millis(1000),
                gravity: 0.1,
                radius: 3.0,
                color: Rgb::new(255, 255, 0),
            },
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Default configuration with a different board size.
    #[must_use]
    pub fn with_board(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn board_width_px(&self) -> u32 {
        Self::cells_to_px(self.columns, self.cell_size)
    }

    #[must_use]
    pub fn board_height_px(&self) -> u32 {
        Self::cells_to_px(self.rows, self.cell_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_BOARD_SIZE || self.rows < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.fast_fall_interval >= self.normal_fall_interval {
            return Err(ConfigError::FastIntervalNotShorter {
                fast: self.fast_fall_interval,
                normal: self.normal_fall_interval,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(())
    }

    fn cells_to_px(cells: usize, cell_size: u16) -> u32 {
        u32::try_from(cells)
            .unwrap_or(u32::MAX)
            .saturating_mul(u32::from(cell_size))
    }
}
