//! Particle Field - interactive particle background.
//!
//! A fixed set of drifting particles painted onto a 2D surface. While the
//! pointer hovers the surface, particles near its spring-smoothed position
//! are nudged and brightened; nearby particles are joined by faint links.

pub mod config;
pub mod field;
pub mod input;
pub mod processing;
pub mod render;
pub mod scheduler;
pub mod session;

pub use config::{Color, FieldConfig, InteractionMode, SpringConfig};
pub use field::{Connection, EngineState, FieldError, Particle, ParticleField};
pub use input::{InputTracker, PointerPosition, PointerSample, SubscriptionId};
pub use render::{Canvas, DrawSurface, Point, RecordingSurface};
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler, RefreshDriver};
pub use session::FieldSession;

use std::f64::consts::TAU;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_WIDTH: u32 = 1280;
const DEMO_HEIGHT: u32 = 720;
const DEMO_REFRESHES: u64 = 300;

/// Run the field headless for a few seconds against a software canvas
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "particle_field_lib=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Particle Field v{}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(demo(
        FieldConfig::default(),
        DEMO_WIDTH,
        DEMO_HEIGHT,
        DEMO_REFRESHES,
    ))
}

async fn demo(config: FieldConfig, canvas_width: u32, canvas_height: u32, refreshes: u64) -> anyhow::Result<()> {
    config.validate()?;

    let (width, height) = (canvas_width as f64, canvas_height as f64);
    let canvas = Canvas::new(canvas_width, canvas_height);
    let mut session = FieldSession::mount(config, Some(canvas), width, height, false);
    if !session.engine().is_running() {
        anyhow::bail!("particle field failed to start on a {}x{} canvas", width, height);
    }

    session.pointer_enter();
    let frames = RefreshDriver::default()
        .run_with(&mut session, refreshes, |session, refresh| {
            // Sweep the pointer around an ellipse, leaving for the last second
            let angle = refresh as f64 / 120.0 * TAU;
            session.pointer_move(
                width / 2.0 + angle.cos() * width / 4.0,
                height / 2.0 + angle.sin() * height / 4.0,
            );
            if refresh + 60 == refreshes {
                session.pointer_leave();
            }
        })
        .await;

    let painted = session.engine().surface().map(Canvas::painted_pixels).unwrap_or(0);
    tracing::info!(
        "Rendered {} frames (particles={}, links={}, painted pixels={})",
        frames,
        session.engine().particles().len(),
        session.engine().connections().len(),
        painted
    );

    session.unmount();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_demo_runs_to_completion() {
        let config = FieldConfig {
            seed: Some(1),
            ..FieldConfig::default()
        };
        assert!(demo(config, 320, 240, 90).await.is_ok());
    }
}
