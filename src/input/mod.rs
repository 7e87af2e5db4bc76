//! Pointer input tracking
//!
//! Converts raw pointer movement into the smoothed, normalised position and
//! hover flag the particle field reads every frame.

pub mod tracker;
pub mod types;

pub use tracker::InputTracker;
pub use types::{PointerPosition, PointerSample, SubscriptionId};
