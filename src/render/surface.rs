//! Drawing surface trait
//!
//! Defines the minimal 2D raster API the particle field paints through.
//! Hosts implement it for their real surface; `RecordingSurface` captures
//! draw calls and `Canvas` rasterises into an RGBA buffer.

use crate::config::Color;

/// A point in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Trait for drawing surfaces
///
/// `alpha` is passed through unclamped; surfaces that composite clamp it themselves.
pub trait DrawSurface {
    /// Wipe the whole surface before a new frame
    fn clear(&mut self);

    /// Fill a disc
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64);

    /// Stroke a straight segment
    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64);

    /// Called when the viewport changes size
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        alpha: f64,
    },
}

/// Surface that records the draw calls of the latest frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: u64,
    size: Option<(u32, u32)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last `clear`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Number of frames started on this surface
    pub fn clear_count(&self) -> u64 {
        self.clears
    }

    /// Last size pushed through `resize`
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
}
