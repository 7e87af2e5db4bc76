//! Rendering targets for the particle field

pub mod canvas;
pub mod surface;

pub use canvas::Canvas;
pub use surface::{DrawCommand, DrawSurface, Point, RecordingSurface};
