use crate::config::SpringConfig;
use crate::input::types::{PointerPosition, PointerSample, SubscriptionId};
use crate::processing::spring::Spring2D;

type Listener = Box<dyn FnMut(PointerPosition)>;

/// Turns raw pointer events into a spring-smoothed, normalised position plus a hover flag.
///
/// The raw position only moves the spring target; the smoothed value moves
/// when the host calls [`InputTracker::advance`] on each display refresh.
/// Listeners fire synchronously whenever the smoothed value changes.
pub struct InputTracker {
    config: SpringConfig,
    raw: PointerPosition,
    spring: Spring2D,
    hover: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl InputTracker {
    pub fn new(config: SpringConfig) -> Self {
        let start = PointerPosition::CENTER;
        Self {
            config,
            raw: start,
            spring: Spring2D::new(start.x, start.y),
            hover: false,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Record a pointer move in device pixels relative to the surface origin
    pub fn on_pointer_move(&mut self, raw_x: f64, raw_y: f64, surface_width: f64, surface_height: f64) {
        let dims_ok = surface_width.is_finite()
            && surface_height.is_finite()
            && surface_width > 0.0
            && surface_height > 0.0;
        if !dims_ok || !raw_x.is_finite() || !raw_y.is_finite() {
            tracing::debug!(
                "Ignoring pointer move ({}, {}) on {}x{} surface",
                raw_x,
                raw_y,
                surface_width,
                surface_height
            );
            return;
        }

        self.raw = PointerPosition::new(raw_x / surface_width, raw_y / surface_height);
    }

    pub fn set_hover(&mut self, active: bool) {
        if self.hover != active {
            tracing::trace!("Pointer hover {}", if active { "entered" } else { "left" });
        }
        self.hover = active;
    }

    pub fn is_hovering(&self) -> bool {
        self.hover
    }

    /// Latest smoothed position; the surface centre until the pointer first moves
    pub fn current_position(&self) -> PointerPosition {
        let (x, y) = self.spring.position();
        PointerPosition::new(x, y)
    }

    /// Latest normalised position before smoothing
    pub fn raw_position(&self) -> PointerPosition {
        self.raw
    }

    pub fn sample(&self) -> PointerSample {
        PointerSample {
            position: self.current_position(),
            hover: self.hover,
        }
    }

    /// Integrate the spring over `dt` seconds and notify listeners if the value moved
    pub fn advance(&mut self, dt: f64) {
        let before = self.current_position();
        self.spring.advance(self.raw.x, self.raw.y, &self.config, dt);
        let mut after = self.current_position();

        if !(after.x.is_finite() && after.y.is_finite()) {
            tracing::warn!(
                "Pointer spring diverged (stiffness={}, damping={}, mass={}); snapping to target",
                self.config.stiffness,
                self.config.damping,
                self.config.mass
            );
            self.spring.reset(self.raw.x, self.raw.y);
            after = self.current_position();
        }

        if after != before {
            for (_, listener) in self.listeners.iter_mut() {
                listener(after);
            }
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(PointerPosition) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
