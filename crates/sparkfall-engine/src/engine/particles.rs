use std::{ops::Range, time::Duration};

use rand::Rng;

use crate::render::Rgb;

use super::config::GameConfig;

/// Horizontal launch speed range, pixels per frame.
const LAUNCH_VX: Range<f32> = -2.0..2.0;
/// Vertical launch speed range, pixels per frame. Always upward.
const LAUNCH_VY: Range<f32> = -4.0..-2.0;

/// A short-lived decorative point in board pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    lifetime: Duration,
    color: Rgb,
}

impl Particle {
    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    /// Remaining lifetime.
    #[must_use]
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Unordered set of live particles.
///
/// Velocities and gravity are applied once per [`advance`](Self::advance)
/// call, independent of `dt`; `dt` only drains lifetimes. A particle is
/// dropped once its lifetime runs out or it falls below the board.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use sparkfall_engine::{GameConfig, ParticleSystem};
///
/// let config = GameConfig::default();
/// let mut particles = ParticleSystem::new(&config);
/// let mut rng = Pcg32::seed_from_u64(1);
///
/// particles.spawn_burst(3, 19, 5, &mut rng);
/// assert_eq!(particles.len(), 5);
///
/// particles.advance(config.particles.lifetime);
/// assert!(particles.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cell_size: u16,
    board_height: f32,
    gravity: f32,
    lifetime: Duration,
    color: Rgb,
}

impl ParticleSystem {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        #[expect(clippy::cast_precision_loss)]
        let board_height = config.board_height_px() as f32;
        Self {
            particles: Vec::new(),
            cell_size: config.cell_size,
            board_height,
            gravity: config.particles.gravity,
            lifetime: config.particles.lifetime,
            color: config.particles.color,
        }
    }

    /// Launches `count` particles from the center of cell `(col, row)`.
    pub fn spawn_burst<R>(&mut self, col: usize, row: usize, count: usize, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let (x, y) = self.cell_center(col, row);
        self.particles.extend((0..count).map(|_| Particle {
            x,
            y,
            vx: rng.random_range(LAUNCH_VX),
            vy: rng.random_range(LAUNCH_VY),
            lifetime: self.lifetime,
            color: self.color,
        }));
    }

    /// Integrates one frame and drops expired particles.
    pub fn advance(&mut self, dt: Duration) {
        let gravity = self.gravity;
        for p in &mut self.particles {
            p.vy += gravity;
            p.x += p.vx;
            p.y += p.vy;
            p.lifetime = p.lifetime.saturating_sub(dt);
        }
        let board_height = self.board_height;
        self.particles
            .retain(|p| !p.lifetime.is_zero() && p.y < board_height);
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[expect(clippy::cast_precision_loss)]
    fn cell_center(&self, col: usize, row: usize) -> (f32, f32) {
        let size = usize::from(self.cell_size);
        let x = col * size + size / 2;
        let y = row * size + size / 2;
        (x as f32, y as f32)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_burst_starts_at_cell_center_moving_up() {
        let config = GameConfig::default();
        let mut system = ParticleSystem::new(&config);
        let mut rng = Pcg32::seed_from_u64(42);

        system.spawn_burst(2, 5, 5, &mut rng);

        assert_eq!(system.len(), 5);
        for p in system.particles() {
            assert!((p.x() - 75.0).abs() < f32::EPSILON);
            assert!((p.y() - 165.0).abs() < f32::EPSILON);
            let (vx, vy) = p.velocity();
            assert!((-2.0..2.0).contains(&vx), "vx {vx} out of range");
            assert!(vy < 0.0, "initial vy {vy} must point upward");
            assert_eq!(p.lifetime(), config.particles.lifetime);
            assert_eq!(p.color(), config.particles.color);
        }
    }

    #[test]
    fn test_particles_expire_with_lifetime() {
        let config = GameConfig::default();
        let mut system = ParticleSystem::new(&config);
        let mut rng = Pcg32::seed_from_u64(3);
        system.spawn_burst(5, 10, 5, &mut rng);

        let dt = Duration::from_millis(100);
        for _ in 0..9 {
            system.advance(dt);
        }
        assert_eq!(system.len(), 5, "particles alive before lifetime ends");

        system.advance(dt);
        assert!(system.is_empty());
    }

    #[test]
    fn test_gravity_pulls_velocity_down() {
        let config = GameConfig::default();
        let mut system = ParticleSystem::new(&config);
        let mut rng = Pcg32::seed_from_u64(9);
        system.spawn_burst(0, 10, 1, &mut rng);
        let (_, vy0) = system.particles()[0].velocity();
        let y0 = system.particles()[0].y();

        system.advance(Duration::from_millis(16));

        let p = &system.particles()[0];
        let expected_vy = vy0 + config.particles.gravity;
        assert!((p.velocity().1 - expected_vy).abs() < 1e-5);
        assert!((p.y() - (y0 + expected_vy)).abs() < 1e-4);
    }

    #[test]
    fn test_particles_below_board_are_dropped() {
        let config = GameConfig::with_board(4, 4);
        let mut system = ParticleSystem::new(&config);
        let mut rng = Pcg32::seed_from_u64(5);
        system.spawn_burst(1, 3, 5, &mut rng);

        // Launch speed is at most 4 px/frame and gravity adds 0.1 per frame,
        // so within 200 frames every particle passes the bottom edge.
        for _ in 0..200 {
            system.advance(Duration::ZERO);
        }
        assert!(system.is_empty());
    }
}
