//! Particle field engine
//!
//! Owns the particle set, advances it once per display refresh and paints
//! it onto the attached surface. Motion is a fixed displacement per tick, so
//! the field drifts faster on high refresh-rate displays.

use crate::config::{FieldConfig, InteractionMode};
use crate::field::connections::{find_connections, Connection};
use crate::field::error::{FieldError, FieldResult};
use crate::field::particle::Particle;
use crate::input::types::PointerSample;
use crate::render::surface::DrawSurface;
use crate::scheduler::{FrameHandle, FrameQueue, FrameScheduler};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Lifecycle of the engine
///
/// `Uninitialized → Initialized → Running ⇄ Stopped`. Re-initialising a
/// running field stops it; the caller has to `start` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initialized,
    Running,
    Stopped,
}

pub struct ParticleField<S, F = FrameQueue> {
    config: FieldConfig,
    surface: Option<S>,
    scheduler: F,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    state: EngineState,
    pending_frame: Option<FrameHandle>,
    rng: StdRng,
    frames_rendered: u64,
}

fn check_dimensions(width: f64, height: f64) -> FieldResult<()> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidDimensions { width, height })
    }
}

impl<S: DrawSurface> ParticleField<S, FrameQueue> {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_scheduler(config, FrameQueue::new())
    }
}

impl<S: DrawSurface, F: FrameScheduler> ParticleField<S, F> {
    pub fn with_scheduler(config: FieldConfig, scheduler: F) -> Self {
        let config = config.validated_or_default();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            surface: None,
            scheduler,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            state: EngineState::Uninitialized,
            pending_frame: None,
            rng,
            frames_rendered: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Supply the drawing surface; a pending `initialize` can then be retried
    pub fn attach_surface(&mut self, mut surface: S) {
        if check_dimensions(self.width, self.height).is_ok() {
            surface.resize(self.width.round() as u32, self.height.round() as u32);
        }
        self.surface = Some(surface);
    }

    /// Take the surface back. Stops the refresh chain first.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.stop();
        self.surface.take()
    }

    /// Allocate a fresh particle set, 50 in compact mode and 150 otherwise by default.
    ///
    /// Silently does nothing (returning `false`) while no surface is attached
    /// or the dimensions are degenerate; call again once they are usable.
    pub fn initialize(&mut self, width: f64, height: f64, compact: bool) -> bool {
        match self.try_initialize(width, height, compact) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Skipping particle field initialization: {}", e);
                false
            }
        }
    }

    /// Like `initialize`, reporting why the field was not ready
    pub fn try_initialize(&mut self, width: f64, height: f64, compact: bool) -> FieldResult<usize> {
        self.check_ready(width, height)?;

        let count = self.config.particle_count_for(compact);
        let particles: Vec<Particle> = (0..count)
            .map(|_| Particle::spawn(&mut self.rng, &self.config, width, height))
            .collect();

        self.install(width, height, particles);

        tracing::info!(
            "Particle field initialized (particles={}, compact={}, surface={}x{})",
            count,
            compact,
            width,
            height
        );
        Ok(count)
    }

    /// Install a caller-built particle set under the same readiness rules as `initialize`
    pub fn initialize_with(&mut self, width: f64, height: f64, particles: Vec<Particle>) -> bool {
        if let Err(e) = self.check_ready(width, height) {
            tracing::debug!("Skipping particle field initialization: {}", e);
            return false;
        }
        self.install(width, height, particles);
        true
    }

    fn check_ready(&self, width: f64, height: f64) -> FieldResult<()> {
        if self.surface.is_none() {
            return Err(FieldError::SurfaceUnavailable);
        }
        check_dimensions(width, height)
    }

    fn install(&mut self, width: f64, height: f64, particles: Vec<Particle>) {
        if self.state == EngineState::Running {
            tracing::info!("Re-initializing a running particle field; animation stopped");
        }
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }

        self.width = width;
        self.height = height;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width.round() as u32, height.round() as u32);
        }
        self.particles = particles;
        self.state = EngineState::Initialized;
    }

    /// Track a new viewport size. Particles keep their positions and wrap in on later ticks.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;

        match check_dimensions(width, height) {
            Ok(()) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.resize(width.round() as u32, height.round() as u32);
                }
                tracing::debug!("Particle field resized to {}x{}", width, height);
            }
            Err(e) => tracing::debug!("Particle field paused until resized: {}", e),
        }
    }

    /// Physics half of a tick: drift, wrap, pointer nudge and alpha
    pub fn step(&mut self, sample: PointerSample) {
        if self.state == EngineState::Uninitialized {
            return;
        }
        let (width, height) = (self.width, self.height);
        if check_dimensions(width, height).is_err() {
            return;
        }

        let (pointer_x, pointer_y) = sample.position.to_surface(width, height);
        let radius = self.config.interaction_radius;
        let strength = self.config.interaction_strength;
        let boost = self.config.hover_alpha_boost;
        let mode = self.config.interaction_mode;

        for particle in self.particles.iter_mut() {
            particle.position.x += particle.velocity.0;
            particle.position.y += particle.velocity.1;

            // Wrap to the opposite edge, not mirrored by the overshoot
            if particle.position.x > width {
                particle.position.x = 0.0;
            } else if particle.position.x < 0.0 {
                particle.position.x = width;
            }
            if particle.position.y > height {
                particle.position.y = 0.0;
            } else if particle.position.y < 0.0 {
                particle.position.y = height;
            }

            particle.alpha = particle.base_alpha;
            if !sample.hover {
                continue;
            }

            let distance = particle.distance_to(pointer_x, pointer_y);
            if distance < radius {
                let force = (1.0 - distance / radius) * strength;
                let (dx, dy) = match mode {
                    InteractionMode::Attract => {
                        (pointer_x - particle.position.x, pointer_y - particle.position.y)
                    }
                    InteractionMode::Repel => {
                        (particle.position.x - pointer_x, particle.position.y - pointer_y)
                    }
                };
                particle.position.x += dx * force;
                particle.position.y += dy * force;
                particle.alpha = particle.base_alpha * boost;
            }
        }
    }

    /// Drawing half of a tick: particles first, then proximity links on top
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.clear();
        for particle in &self.particles {
            surface.fill_circle(particle.position, particle.size, particle.color, particle.alpha);
        }

        let links = find_connections(&self.particles, self.config.link_distance, self.config.link_opacity);
        for link in &links {
            let a = &self.particles[link.particle_a];
            let b = &self.particles[link.particle_b];
            surface.stroke_line(
                a.position,
                b.position,
                self.config.link_width,
                self.config.link_color,
                link.alpha,
            );
        }

        self.frames_rendered += 1;
        tracing::trace!(
            "Rendered frame {} (particles={}, links={})",
            self.frames_rendered,
            self.particles.len(),
            links.len()
        );
    }

    /// One frame: update every particle against the pointer, then repaint
    pub fn tick(&mut self, pointer_x: f64, pointer_y: f64, hover: bool) {
        if self.surface.is_none()
            || self.state == EngineState::Uninitialized
            || check_dimensions(self.width, self.height).is_err()
        {
            return;
        }
        self.step(PointerSample::new(pointer_x, pointer_y, hover));
        self.render();
    }

    /// Links that the next render would draw for the current positions
    pub fn connections(&self) -> Vec<Connection> {
        find_connections(&self.particles, self.config.link_distance, self.config.link_opacity)
    }

    /// Begin the refresh-callback chain. Does nothing if already running.
    pub fn start(&mut self) -> bool {
        match self.state {
            EngineState::Uninitialized => {
                tracing::debug!("Cannot start particle field before initialization");
                false
            }
            EngineState::Running => true,
            EngineState::Initialized | EngineState::Stopped => {
                self.pending_frame = Some(self.scheduler.request_frame());
                self.state = EngineState::Running;
                tracing::info!("Particle field animation started");
                true
            }
        }
    }

    /// Cancel the pending refresh callback. Safe to call any number of times.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }

        match self.state {
            EngineState::Running => {
                self.state = EngineState::Stopped;
                tracing::info!(
                    "Particle field animation stopped after {} frames",
                    self.frames_rendered
                );
            }
            EngineState::Initialized => self.state = EngineState::Stopped,
            EngineState::Stopped | EngineState::Uninitialized => {}
        }
    }

    /// Refresh callback: tick once and request the next frame.
    ///
    /// Handles other than the pending one (cancelled, or from an earlier
    /// chain) are ignored so a stopped field never ticks.
    pub fn on_frame(&mut self, handle: FrameHandle, sample: PointerSample) -> bool {
        if self.state != EngineState::Running || self.pending_frame != Some(handle) {
            tracing::debug!("Ignoring stale frame callback {}", handle.id());
            return false;
        }

        self.pending_frame = None;
        self.tick(sample.position.x, sample.position.y, sample.hover);
        self.pending_frame = Some(self.scheduler.request_frame());
        true
    }
}
