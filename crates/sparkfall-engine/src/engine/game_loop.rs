use std::time::Duration;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::{FallingPiece, Grid, Shape};

use super::{
    config::{ConfigError, GameConfig},
    controller::{FallingPieceController, SubCellOffset},
    input::{HeldKeys, InputEvent, Key},
    particles::ParticleSystem,
    timer::IntervalTimer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameState {
    Running,
    /// Simulation is frozen until any key is pressed.
    GameOver,
    /// Terminal state; further ticks do nothing.
    Quit,
}

/// Counters accumulated over a whole session, across restarts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub locked_pieces: usize,
    pub cleared_lines: usize,
    pub restarts: usize,
    /// Frames simulated while running.
    pub frames: u64,
}

/// Frame-driven game state machine.
///
/// Owns the grid, the falling piece, the particles and both movement timers.
/// A front end calls [`tick`](Self::tick) once per frame with the input
/// gathered since the previous frame and the frame's elapsed time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use sparkfall_engine::{GameConfig, GameLoop, GameState, InputEvent, Key};
///
/// let mut game = GameLoop::with_seed(GameConfig::default(), 42)?;
/// let frame = Duration::from_millis(16);
///
/// assert_eq!(game.tick(&[InputEvent::Pressed(Key::SoftDrop)], frame), GameState::Running);
/// assert_eq!(game.tick(&[InputEvent::Pressed(Key::Quit)], frame), GameState::Quit);
/// # Ok::<(), sparkfall_engine::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameLoop {
    config: GameConfig,
    rng: Pcg32,
    grid: Grid,
    controller: FallingPieceController,
    particles: ParticleSystem,
    fall_timer: IntervalTimer,
    lateral_timer: IntervalTimer,
    held: HeldKeys,
    state: GameState,
    stats: SessionStats,
}

impl GameLoop {
    /// Starts a session with a randomly seeded generator.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a fixed seed for a reproducible shape
    /// and particle sequence.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = Grid::new(config.columns, config.rows);
        let controller = FallingPieceController::spawn(Shape::random(&mut rng), &grid);
        let particles = ParticleSystem::new(&config);
        Ok(Self {
            config,
            rng,
            grid,
            controller,
            particles,
            fall_timer: IntervalTimer::new(),
            lateral_timer: IntervalTimer::new(),
            held: HeldKeys::default(),
            state: GameState::Running,
            stats: SessionStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn controller(&self) -> &FallingPieceController {
        &self.controller
    }

    #[must_use]
    pub fn falling_piece(&self) -> &FallingPiece {
        self.controller.piece()
    }

    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Advances the game by one frame.
    ///
    /// A quit request anywhere in `events` wins over everything else and
    /// leaves the game untouched. Otherwise, while game over, any key press
    /// restarts; while running, the events are applied in order before the
    /// timers advance by `dt`.
    pub fn tick(&mut self, events: &[InputEvent], dt: Duration) -> GameState {
        if self.state.is_quit() {
            return self.state;
        }
        if events.iter().any(|event| event.is_quit_request()) {
            self.state = GameState::Quit;
            return self.state;
        }

        match self.state {
            GameState::Running => {
                for &event in events {
                    self.apply_input(event);
                }
                self.step(dt);
            }
            GameState::GameOver => {
                if events.iter().any(InputEvent::is_pressed) {
                    self.restart();
                }
            }
            GameState::Quit => {}
        }
        self.state
    }

    fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(Key::Rotate) => {
                // A blocked rotation is simply ignored.
                let _ = self.controller.try_rotate(&self.grid);
            }
            InputEvent::Pressed(key) => self.held.press(key),
            InputEvent::Released(key) => self.held.release(key),
            InputEvent::CloseRequested => {}
        }
    }

    fn step(&mut self, dt: Duration) {
        self.stats.frames += 1;
        self.particles.advance(dt);
        self.fall_timer.accumulate(dt);
        self.lateral_timer.accumulate(dt);

        if self
            .lateral_timer
            .fire(self.config.lateral_repeat_interval)
        {
            if self.held.left {
                let _ = self.controller.try_move(-1, 0, &self.grid);
            }
            if self.held.right {
                let _ = self.controller.try_move(1, 0, &self.grid);
            }
        }

        if self.fall_timer.fire(self.fall_interval()) {
            let outcome = self.controller.gravity_step(&self.grid);
            if outcome.is_landed() {
                self.lock_piece();
            }
        }

        self.update_offset();
    }

    fn fall_interval(&self) -> Duration {
        if self.held.soft_drop {
            self.config.fast_fall_interval
        } else {
            self.config.normal_fall_interval
        }
    }

    fn lock_piece(&mut self) {
        self.grid.lock(self.controller.piece());
        let (grid, cleared) = self.grid.clear_completed_lines();
        for &row in &cleared {
            for col in 0..grid.columns() {
                self.particles
                    .spawn_burst(col, row, self.config.particles.per_cell, &mut self.rng);
            }
        }
        self.grid = grid;
        self.stats.locked_pieces += 1;
        self.stats.cleared_lines += cleared.len();

        if self.grid.is_game_over() {
            self.state = GameState::GameOver;
            return;
        }
        let shape = Shape::random(&mut self.rng);
        self.place_new_piece(shape);
    }

    fn place_new_piece(&mut self, shape: Shape) {
        self.controller = FallingPieceController::spawn(shape, &self.grid);
        if self.controller.is_blocked(&self.grid) {
            self.state = GameState::GameOver;
        }
    }

    fn update_offset(&mut self) {
        let y = if self.state.is_running() && !self.controller.is_landed(&self.grid) {
            self.fall_timer.progress(self.fall_interval())
        } else {
            0.0
        };
        self.controller.set_offset(SubCellOffset::new(0.0, y));
    }

    fn restart(&mut self) {
        self.grid = Grid::new(self.config.columns, self.config.rows);
        self.particles.clear();
        self.fall_timer.reset();
        self.lateral_timer.reset();
        self.held.reset();
        self.stats.restarts += 1;
        self.state = GameState::Running;
        let shape = Shape::random(&mut self.rng);
        self.place_new_piece(shape);
    }
}

#[cfg(test)]
impl GameLoop {
    /// Replaces the board and falling piece, keeping everything else.
    pub(crate) fn set_board(&mut self, grid: Grid, piece: FallingPiece) {
        self.grid = grid;
        self.controller = FallingPieceController::new(piece);
    }

    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{PiecePosition, ShapeKind};

    use super::*;

    const FRAME: Duration = Duration::from_millis(10);

    fn frames_to_first_lock(soft_drop: bool) -> u64 {
        let mut game = GameLoop::with_seed(GameConfig::default(), 11).unwrap();
        let first: &[InputEvent] = if soft_drop {
            &[InputEvent::Pressed(Key::SoftDrop)]
        } else {
            &[]
        };
        game.tick(first, FRAME);
        while game.stats().locked_pieces == 0 {
            assert_eq!(game.tick(&[], FRAME), GameState::Running);
            assert!(game.stats().frames < 10_000, "piece never locked");
        }
        game.stats().frames
    }

    fn game_with(config: GameConfig, grid: &[&str], piece: FallingPiece) -> GameLoop {
        let mut game = GameLoop::with_seed(config, 0).unwrap();
        game.set_board(Grid::from_rows(grid), piece);
        game
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GameLoop::new(GameConfig::with_board(2, 2)).is_err());
        assert!(GameLoop::new(GameConfig::default()).is_ok());
    }

    #[test]
    fn test_same_seed_same_first_shape() {
        let a = GameLoop::with_seed(GameConfig::default(), 123).unwrap();
        let b = GameLoop::with_seed(GameConfig::default(), 123).unwrap();
        assert_eq!(a.falling_piece(), b.falling_piece());
    }

    #[test]
    fn test_soft_drop_shortens_time_to_lock() {
        let normal = frames_to_first_lock(false);
        let fast = frames_to_first_lock(true);
        let config = GameConfig::default();
        let ratio = u64::try_from(
            config.normal_fall_interval.as_millis() / config.fast_fall_interval.as_millis(),
        )
        .unwrap();

        assert!(fast < normal);
        assert_eq!(normal, fast * ratio);
    }

    #[test]
    fn test_soft_drop_release_restores_normal_interval() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 5).unwrap();
        let row = game.falling_piece().position().row();

        game.tick(&[InputEvent::Pressed(Key::SoftDrop)], FRAME);
        game.tick(&[InputEvent::Released(Key::SoftDrop)], FRAME);
        for _ in 0..20 {
            game.tick(&[], FRAME);
        }
        assert_eq!(game.falling_piece().position().row(), row);
    }

    #[test]
    fn test_quit_takes_precedence_without_mutation() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 1).unwrap();
        let piece = game.falling_piece().clone();

        let state = game.tick(
            &[
                InputEvent::Pressed(Key::Left),
                InputEvent::Pressed(Key::Rotate),
                InputEvent::CloseRequested,
            ],
            Duration::from_secs(1),
        );

        assert_eq!(state, GameState::Quit);
        assert_eq!(game.falling_piece(), &piece);
        assert_eq!(game.stats().frames, 0);
        assert!(!game.held.left);
        assert_eq!(game.tick(&[InputEvent::Pressed(Key::Other)], FRAME), GameState::Quit);
    }

    #[test]
    fn test_close_request_quits_from_game_over() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 6).unwrap();
        game.set_state(GameState::GameOver);
        let restarts = game.stats().restarts;

        let state = game.tick(
            &[InputEvent::Pressed(Key::Other), InputEvent::CloseRequested],
            FRAME,
        );

        assert_eq!(state, GameState::Quit);
        assert_eq!(game.stats().restarts, restarts, "quit must not restart");
        assert_eq!(game.tick(&[InputEvent::Pressed(Key::Left)], FRAME), GameState::Quit);
    }

    #[test]
    fn test_quit_key_quits_from_game_over() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 6).unwrap();
        game.set_state(GameState::GameOver);
        assert_eq!(
            game.tick(&[InputEvent::Pressed(Key::Quit)], FRAME),
            GameState::Quit
        );
    }

    #[test]
    fn test_rotate_applies_on_press() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 8).unwrap();
        let expected = game.falling_piece().rotated_right();
        game.tick(&[InputEvent::Pressed(Key::Rotate)], FRAME);
        assert_eq!(game.falling_piece().shape(), expected.shape());
    }

    #[test]
    fn test_lateral_moves_repeat_on_timer() {
        let mut game = GameLoop::with_seed(GameConfig::default(), 2).unwrap();
        let col = game.falling_piece().position().col();

        game.tick(&[InputEvent::Pressed(Key::Left)], FRAME);
        for _ in 0..8 {
            game.tick(&[], FRAME);
        }
        assert_eq!(game.falling_piece().position().col(), col);

        game.tick(&[], FRAME);
        assert_eq!(game.falling_piece().position().col(), col - 1);

        for _ in 0..10 {
            game.tick(&[], FRAME);
        }
        assert_eq!(game.falling_piece().position().col(), col - 2);

        game.tick(&[InputEvent::Released(Key::Left)], FRAME);
        for _ in 0..20 {
            game.tick(&[], FRAME);
        }
        assert_eq!(game.falling_piece().position().col(), col - 2);
    }

    #[test]
    fn test_lock_clears_lines_and_bursts_particles() {
        let config = GameConfig::with_board(4, 4);
        let per_cell = config.particles.per_cell;
        let interval = config.normal_fall_interval;
        let mut game = game_with(
            config,
            &["....", "....", "##..", "##.."],
            FallingPiece::new(Shape::new(ShapeKind::O), PiecePosition::new(2, 2)),
        );

        assert_eq!(game.tick(&[], interval), GameState::Running);

        assert_eq!(game.stats().locked_pieces, 1);
        assert_eq!(game.stats().cleared_lines, 2);
        assert_eq!(game.grid().occupied_count(), 0);
        assert_eq!(game.particles().len(), 2 * 4 * per_cell);
        let rows: Vec<f32> = game.particles().particles().iter().map(|p| p.y()).collect();
        assert!(rows.iter().any(|&y| (y - 75.0).abs() < f32::EPSILON));
        assert!(rows.iter().any(|&y| (y - 105.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_top_row_lock_is_game_over_and_any_key_restarts() {
        let config = GameConfig::with_board(4, 4);
        let interval = config.normal_fall_interval;
        let mut game = game_with(
            config,
            &["....", "##..", "##..", "##.."],
            FallingPiece::new(Shape::new(ShapeKind::O), PiecePosition::new(0, -1)),
        );

        assert_eq!(game.tick(&[], interval), GameState::GameOver);
        assert!(game.grid().is_occupied(0, 0));
        assert!(game.grid().is_occupied(1, 0));

        let frozen = game.grid().clone();
        assert_eq!(game.tick(&[], interval), GameState::GameOver);
        assert_eq!(game.grid(), &frozen);
        assert_eq!(
            game.tick(&[InputEvent::Released(Key::Left)], interval),
            GameState::GameOver
        );

        assert_eq!(
            game.tick(&[InputEvent::Pressed(Key::Other)], FRAME),
            GameState::Running
        );
        assert_eq!(game.stats().restarts, 1);
        assert_eq!(game.grid().occupied_count(), 0);
        assert!(game.particles().is_empty());
        assert_eq!(game.falling_piece().position().row(), 0);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut game = game_with(
            GameConfig::with_board(4, 4),
            &["....", "####", "....", "...."],
            FallingPiece::new(Shape::new(ShapeKind::I), PiecePosition::new(0, 3)),
        );
        game.place_new_piece(Shape::new(ShapeKind::O));
        assert!(game.state().is_game_over());
    }

    #[test]
    fn test_offset_tracks_fall_progress() {
        let config = GameConfig::default();
        let half = config.normal_fall_interval / 2;
        let mut game = GameLoop::with_seed(config, 4).unwrap();

        game.tick(&[], half);

        let offset = game.controller().offset();
        assert!((offset.y() - 0.5).abs() < 1e-3);
        assert!(offset.x().abs() < f32::EPSILON);
    }

    #[test]
    fn test_offset_is_zero_when_landed() {
        let config = GameConfig::with_board(4, 4);
        let half = config.normal_fall_interval / 2;
        let mut game = game_with(
            config,
            &["....", "....", "....", "...."],
            FallingPiece::new(Shape::new(ShapeKind::O), PiecePosition::new(0, 2)),
        );

        game.tick(&[], half);

        assert!(game.controller().offset().y().abs() < f32::EPSILON);
    }
}
