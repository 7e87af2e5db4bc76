//! Particle state and spawning

use crate::config::{Color, FieldConfig};
use crate::render::surface::Point;
use rand::Rng;

/// One drifting particle
///
/// `size`, `velocity`, `color` and `base_alpha` are fixed at spawn; only
/// `position` and `alpha` change during a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Radius in pixels
    pub size: f64,
    /// Displacement per tick
    pub velocity: (f64, f64),
    pub color: Color,
    pub alpha: f64,
    pub base_alpha: f64,
}

impl Particle {
    pub fn new(position: Point, velocity: (f64, f64), size: f64, base_alpha: f64) -> Self {
        Self {
            position,
            size,
            velocity,
            color: Color::WHITE,
            alpha: base_alpha,
            base_alpha,
        }
    }

    /// Draw a particle uniformly placed inside a `width` x `height` surface
    pub fn spawn<R: Rng>(rng: &mut R, config: &FieldConfig, width: f64, height: f64) -> Self {
        let speed = config.max_speed;

        let position = Point::new(uniform(rng, (0.0, width)), uniform(rng, (0.0, height)));
        let velocity = (uniform(rng, (-speed, speed)), uniform(rng, (-speed, speed)));
        let size = uniform(rng, config.size_range);
        let base_alpha = uniform(rng, config.alpha_range);

        Self {
            color: config.particle_color,
            ..Self::new(position, velocity, size, base_alpha)
        }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.position.x - x;
        let dy = self.position.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Sample `[min, max)`; an empty interval yields `min`
fn uniform<R: Rng>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if min < max {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_respects_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let p = Particle::spawn(&mut rng, &config, 800.0, 600.0);
            assert!(p.position.x >= 0.0 && p.position.x < 800.0);
            assert!(p.position.y >= 0.0 && p.position.y < 600.0);
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.velocity.0 >= -0.15 && p.velocity.0 < 0.15);
            assert!(p.velocity.1 >= -0.15 && p.velocity.1 < 0.15);
            assert!(p.base_alpha >= 0.1 && p.base_alpha < 0.6);
            assert_eq!(p.alpha, p.base_alpha);
            assert_eq!(p.color, Color::WHITE);
        }
    }

    #[test]
    fn test_spawn_with_zero_speed_stays_still() {
        let config = FieldConfig {
            max_speed: 0.0,
            ..FieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let p = Particle::spawn(&mut rng, &config, 100.0, 100.0);
        assert_eq!(p.velocity, (0.0, 0.0));
    }

    #[test]
    fn test_distance_is_euclidean() {
        let p = Particle::new(Point::new(3.0, 4.0), (0.0, 0.0), 1.0, 0.5);
        assert_eq!(p.distance_to(0.0, 0.0), 5.0);
    }
}
