use serde::{Deserialize, Serialize};

/// Pointer position normalised to the surface, `(0, 0)` top-left and `(1, 1)` bottom-right.
///
/// Values outside the unit square are legal and mean the pointer is beyond an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const CENTER: PointerPosition = PointerPosition { x: 0.5, y: 0.5 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Map into surface pixels
    pub fn to_surface(self, width: f64, height: f64) -> (f64, f64) {
        (self.x * width, self.y * height)
    }
}

impl Default for PointerPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

/// What the field reads from the pointer on every frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub position: PointerPosition,
    pub hover: bool,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, hover: bool) -> Self {
        Self {
            position: PointerPosition::new(x, y),
            hover,
        }
    }
}

/// Handle returned by `InputTracker::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
