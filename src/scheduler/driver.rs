//! Tokio-driven display refresh
//!
//! Stands in for the browser's refresh signal when the field runs headless:
//! a tokio interval fires at the refresh rate and each firing performs one
//! `FieldSession::refresh`. Runs on the current task, so refreshes never
//! overlap.

use crate::render::surface::DrawSurface;
use crate::session::FieldSession;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Default display refresh rate in Hz
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct RefreshDriver {
    period: Duration,
}

impl RefreshDriver {
    /// Create a driver for the given refresh rate; non-positive rates fall back to 60Hz
    pub fn new(refresh_hz: f64) -> Self {
        let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
            refresh_hz
        } else {
            tracing::debug!("Invalid refresh rate {}, using {}Hz", refresh_hz, DEFAULT_REFRESH_HZ);
            DEFAULT_REFRESH_HZ
        };
        Self {
            period: Duration::from_secs_f64(1.0 / hz).max(Duration::from_nanos(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `refreshes` display refreshes. Returns the number of frames ticked.
    pub async fn run<S: DrawSurface>(&self, session: &mut FieldSession<S>, refreshes: u64) -> u64 {
        self.run_with(session, refreshes, |_, _| {}).await
    }

    /// Like `run`, calling `before_refresh` ahead of every refresh so the
    /// caller can feed pointer and viewport events in between frames
    pub async fn run_with<S, H>(&self, session: &mut FieldSession<S>, refreshes: u64, mut before_refresh: H) -> u64
    where
        S: DrawSurface,
        H: FnMut(&mut FieldSession<S>, u64),
    {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // The first tick completes immediately
        let mut last = interval.tick().await;
        let mut ticked = 0u64;

        for refresh in 0..refreshes {
            let now = interval.tick().await;
            let dt = now.duration_since(last).as_secs_f64();
            last = now;

            before_refresh(session, refresh);
            ticked += session.refresh(dt) as u64;
        }

        tracing::debug!("Refresh driver finished ({} refreshes, {} frames)", refreshes, ticked);
        ticked
    }
}

impl Default for RefreshDriver {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::render::surface::RecordingSurface;

    fn session() -> FieldSession<RecordingSurface> {
        let config = FieldConfig {
            seed: Some(3),
            ..FieldConfig::default()
        };
        FieldSession::mount(config, Some(RecordingSurface::new()), 640.0, 480.0, true)
    }

    #[test]
    fn test_invalid_rate_falls_back_to_sixty_hz() {
        assert_eq!(RefreshDriver::new(0.0).period(), RefreshDriver::default().period());
        assert_eq!(RefreshDriver::new(f64::NAN).period(), Duration::from_secs_f64(1.0 / 60.0));
        assert_eq!(RefreshDriver::new(120.0).period(), Duration::from_secs_f64(1.0 / 120.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_refresh() {
        let mut session = session();
        let driver = RefreshDriver::default();

        let ticked = driver.run(&mut session, 30).await;
        assert_eq!(ticked, 30);
        assert_eq!(session.engine().frames_rendered(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_session_does_not_tick() {
        let mut session = session();
        session.engine_mut().stop();

        let ticked = RefreshDriver::default().run(&mut session, 10).await;
        assert_eq!(ticked, 0);
        assert_eq!(session.engine().frames_rendered(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hook_feeds_pointer_between_frames() {
        let mut session = session();
        session.pointer_enter();

        let driver = RefreshDriver::default();
        driver
            .run_with(&mut session, 60, |session, refresh| {
                if refresh == 0 {
                    session.pointer_move(640.0, 480.0);
                }
            })
            .await;

        let pointer = session.engine_pointer();
        assert!(pointer.x > 0.9 && pointer.y > 0.9, "pointer {:?} should track the corner", pointer);
    }
}
