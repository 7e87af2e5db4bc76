//! Spring physics used to smooth the pointer signal
//!
//! Implements a damped spring system so the field reads a pointer that
//! glides toward the latest raw position instead of jumping with every event.

use crate::config::SpringConfig;

/// Largest integration step; longer frames are split into sub-steps
pub const MAX_STEP_SECONDS: f64 = 1.0 / 240.0;

/// Longest frame integrated in one `advance`; a stalled host resumes from here
pub const MAX_FRAME_SECONDS: f64 = 0.25;

/// 1D spring state tracking position and velocity
#[derive(Debug, Clone)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    /// Create a new spring state at the given position with zero velocity
    pub fn new(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
        }
    }

    /// Advance the spring simulation by dt seconds toward the target
    ///
    /// Uses the damped harmonic oscillator equation:
    /// F = -k * x - c * v
    /// where k = stiffness, c = damping, x = displacement, v = velocity
    pub fn step(&mut self, target: f64, config: &SpringConfig, dt: f64) {
        let displacement = self.position - target;
        let spring_force = -config.stiffness * displacement;
        let damping_force = -config.damping * self.velocity;
        let acceleration = (spring_force + damping_force) / config.mass;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Check if spring has settled (velocity and displacement below threshold)
    pub fn is_settled(&self, target: f64, threshold: f64) -> bool {
        (self.position - target).abs() < threshold && self.velocity.abs() < threshold
    }
}

/// 2D spring for the pointer position (X and Y axes)
#[derive(Debug, Clone)]
pub struct Spring2D {
    pub x: SpringState,
    pub y: SpringState,
}

impl Spring2D {
    /// Create a new 2D spring at the given position
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: SpringState::new(x),
            y: SpringState::new(y),
        }
    }

    /// Advance both X and Y springs toward the target position
    pub fn step(&mut self, target_x: f64, target_y: f64, config: &SpringConfig, dt: f64) {
        self.x.step(target_x, config, dt);
        self.y.step(target_y, config, dt);
    }

    /// Advance by an arbitrary frame duration in bounded sub-steps.
    ///
    /// Snaps onto the target once both axes come to rest so a settled
    /// spring reports an exact, unchanging value. Frames longer than
    /// `MAX_FRAME_SECONDS` are integrated as `MAX_FRAME_SECONDS`.
    pub fn advance(&mut self, target_x: f64, target_y: f64, config: &SpringConfig, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let dt = dt.min(MAX_FRAME_SECONDS);
        if self.is_settled(target_x, target_y, config.rest_threshold) {
            self.reset(target_x, target_y);
            return;
        }

        let steps = (dt / MAX_STEP_SECONDS).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            self.step(target_x, target_y, config, h);
        }

        if self.is_settled(target_x, target_y, config.rest_threshold) {
            self.reset(target_x, target_y);
        }
    }

    /// Get the current smoothed position
    pub fn position(&self) -> (f64, f64) {
        (self.x.position, self.y.position)
    }

    /// Reset the spring to a new position with zero velocity
    pub fn reset(&mut self, x: f64, y: f64) {
        self.x = SpringState::new(x);
        self.y = SpringState::new(y);
    }

    /// Check if both axes have settled
    pub fn is_settled(&self, target_x: f64, target_y: f64, threshold: f64) -> bool {
        self.x.is_settled(target_x, threshold) && self.y.is_settled(target_y, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer_config() -> SpringConfig {
        SpringConfig::default()
    }

    #[test]
    fn test_spring_approaches_target() {
        let config = pointer_config();
        let mut state = SpringState::new(0.0);

        // One second at 240 steps per second
        for _ in 0..240 {
            state.step(1.0, &config, MAX_STEP_SECONDS);
        }

        assert!(
            (state.position - 1.0).abs() < 0.01,
            "Position {} should be close to 1",
            state.position
        );
    }

    #[test]
    fn test_pointer_spring_does_not_overshoot() {
        let config = pointer_config();
        let mut state = SpringState::new(0.5);
        let mut max_pos = 0.0f64;

        for _ in 0..480 {
            state.step(1.0, &config, MAX_STEP_SECONDS);
            max_pos = max_pos.max(state.position);
        }

        assert!(max_pos <= 1.0 + 1e-3, "Max position {} overshot the target", max_pos);
    }

    #[test]
    fn test_advance_settles_within_a_few_hundred_ms() {
        let config = pointer_config();
        let mut spring = Spring2D::new(0.5, 0.5);

        // 300ms in 60Hz frames
        for _ in 0..18 {
            spring.advance(1.0, 0.0, &config, 1.0 / 60.0);
        }
        let (x, y) = spring.position();
        assert!(x > 0.5 + 0.65 * 0.5, "X {} should be most of the way to 1", x);
        assert!(y < 0.5 - 0.65 * 0.5, "Y {} should be most of the way to 0", y);

        // 400ms
        for _ in 0..6 {
            spring.advance(1.0, 0.0, &config, 1.0 / 60.0);
        }
        let (x, y) = spring.position();
        assert!(x > 0.5 + 0.8 * 0.5, "X {} should be past 80% at 400ms", x);
        assert!(y < 0.5 - 0.8 * 0.5, "Y {} should be past 80% at 400ms", y);

        for _ in 0..36 {
            spring.advance(1.0, 0.0, &config, 1.0 / 60.0);
        }
        let (x, y) = spring.position();
        assert!((x - 1.0).abs() < 0.01, "X {} should settle at 1", x);
        assert!(y.abs() < 0.01, "Y {} should settle at 0", y);
    }

    #[test]
    fn test_advance_snaps_when_settled() {
        let config = pointer_config();
        let mut spring = Spring2D::new(0.2, 0.2);

        for _ in 0..600 {
            spring.advance(0.8, 0.4, &config, 1.0 / 60.0);
        }

        assert_eq!(spring.position(), (0.8, 0.4));
        assert_eq!(spring.x.velocity, 0.0);
    }

    #[test]
    fn test_advance_caps_long_frames() {
        let config = pointer_config();
        let mut stalled = Spring2D::new(0.0, 0.0);
        let mut capped = Spring2D::new(0.0, 0.0);

        // A frame of ~30 years must cost no more than a quarter second of integration
        stalled.advance(1.0, 1.0, &config, 1e9);
        capped.advance(1.0, 1.0, &config, MAX_FRAME_SECONDS);

        assert_eq!(stalled.position(), capped.position());
        let (x, _) = stalled.position();
        assert!(x > 0.0 && x < 1.0);
    }

    #[test]
    fn test_advance_ignores_degenerate_dt() {
        let config = pointer_config();
        let mut spring = Spring2D::new(0.0, 0.0);

        spring.advance(1.0, 1.0, &config, 0.0);
        spring.advance(1.0, 1.0, &config, f64::NAN);
        spring.advance(1.0, 1.0, &config, -1.0);

        assert_eq!(spring.position(), (0.0, 0.0));
    }

    #[test]
    fn test_spring_reset() {
        let config = pointer_config();
        let mut spring = Spring2D::new(0.0, 0.0);

        for _ in 0..30 {
            spring.step(1.0, 1.0, &config, 1.0 / 60.0);
        }

        spring.reset(0.25, 0.75);

        let (x, y) = spring.position();
        assert_eq!(x, 0.25);
        assert_eq!(y, 0.75);
        assert_eq!(spring.x.velocity, 0.0);
        assert_eq!(spring.y.velocity, 0.0);
    }
}
