//! Mounted particle field
//!
//! Wires the pointer tracker, the engine and the drawing surface together
//! the way the page hosts them: the engine reads the smoothed pointer
//! through a subscription, every display refresh advances the spring and
//! delivers due frame callbacks, and unmounting tears both down.

use crate::config::FieldConfig;
use crate::field::engine::{EngineState, ParticleField};
use crate::input::tracker::InputTracker;
use crate::input::types::{PointerPosition, PointerSample, SubscriptionId};
use crate::render::surface::DrawSurface;
use std::cell::Cell;
use std::rc::Rc;

pub struct FieldSession<S: DrawSurface> {
    tracker: InputTracker,
    engine: ParticleField<S>,
    /// Engine-side copy of the smoothed pointer, written by the tracker subscription
    pointer: Rc<Cell<PointerPosition>>,
    subscription: Option<SubscriptionId>,
    viewport: (f64, f64),
    compact: bool,
}

impl<S: DrawSurface> FieldSession<S> {
    /// Mount the field and start animating if the surface is ready.
    ///
    /// Without a surface (or with a degenerate viewport) the engine stays
    /// uninitialised; `attach_surface` or `resize` retries.
    pub fn mount(config: FieldConfig, surface: Option<S>, width: f64, height: f64, compact: bool) -> Self {
        let config = config.validated_or_default();
        let mut tracker = InputTracker::new(config.spring);
        let pointer = Rc::new(Cell::new(tracker.current_position()));
        let sink = pointer.clone();
        let subscription = tracker.subscribe(move |position| sink.set(position));

        let mut engine = ParticleField::new(config);
        if let Some(surface) = surface {
            engine.attach_surface(surface);
        }

        let mut session = Self {
            tracker,
            engine,
            pointer,
            subscription: Some(subscription),
            viewport: (width, height),
            compact,
        };

        let started = session.bring_up();
        tracing::info!(
            "Particle field mounted (viewport={}x{}, compact={}, running={})",
            width,
            height,
            compact,
            started
        );
        session
    }

    fn bring_up(&mut self) -> bool {
        let (width, height) = self.viewport;
        self.engine.initialize(width, height, self.compact) && self.engine.start()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn engine(&self) -> &ParticleField<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ParticleField<S> {
        &mut self.engine
    }

    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    /// Pointer position the engine will use on its next frame
    pub fn engine_pointer(&self) -> PointerPosition {
        self.pointer.get()
    }

    /// Provide the drawing surface once it exists
    pub fn attach_surface(&mut self, surface: S) {
        self.engine.attach_surface(surface);
        if self.is_mounted() && self.engine.state() == EngineState::Uninitialized {
            self.bring_up();
        }
    }

    /// Pointer moved, in viewport pixels
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        let (width, height) = self.viewport;
        self.tracker.on_pointer_move(client_x, client_y, width, height);
    }

    pub fn pointer_enter(&mut self) {
        self.tracker.set_hover(true);
    }

    pub fn pointer_leave(&mut self) {
        self.tracker.set_hover(false);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        self.engine.resize(width, height);
        if self.is_mounted() && self.engine.state() == EngineState::Uninitialized {
            self.bring_up();
        }
    }

    /// Switch between the compact and full particle counts.
    ///
    /// A change rebuilds the particle set from scratch and resumes animating.
    pub fn set_compact_mode(&mut self, compact: bool) {
        if compact == self.compact {
            return;
        }
        self.compact = compact;
        if self.is_mounted() {
            tracing::info!("Compact mode {}; rebuilding particles", if compact { "on" } else { "off" });
            self.bring_up();
        }
    }

    /// One display refresh of `dt` seconds. Returns the number of frames ticked.
    pub fn refresh(&mut self, dt: f64) -> usize {
        if !self.is_mounted() {
            return 0;
        }

        self.tracker.advance(dt);
        let sample = PointerSample {
            position: self.pointer.get(),
            hover: self.tracker.is_hovering(),
        };

        let due = self.engine.scheduler_mut().take_due();
        due.into_iter()
            .filter(|handle| self.engine.on_frame(*handle, sample))
            .count()
    }

    /// Stop the animation and drop the pointer subscription. Idempotent.
    pub fn unmount(&mut self) {
        let Some(subscription) = self.subscription.take() else {
            return;
        };
        self.engine.stop();
        self.tracker.unsubscribe(subscription);
        tracing::info!(
            "Particle field unmounted after {} frames",
            self.engine.frames_rendered()
        );
    }
}

impl<S: DrawSurface> Drop for FieldSession<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
