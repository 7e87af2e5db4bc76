//! Software raster surface
//!
//! A straight-alpha RGBA8 pixel buffer with anti-aliased discs and lines,
//! composited source-over. Draws outside the buffer are clipped.

use crate::config::Color;
use crate::render::surface::{DrawSurface, Point};

pub struct Canvas {
    width: u32,
    height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at a pixel, `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Count of pixels with any coverage
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Pixel index range covering `[min, max]`, clipped to the buffer
    fn span(min: f64, max: f64, limit: u32) -> Option<(u32, u32)> {
        if !(min.is_finite() && max.is_finite()) || limit == 0 {
            return None;
        }
        let lo = min.floor().max(0.0);
        let hi = max.ceil().min(limit as f64 - 1.0);
        if lo > hi {
            return None;
        }
        Some((lo as u32, hi as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f64) {
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let da = self.pixels[i + 3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);

        let src = [color.r, color.g, color.b];
        for (c, s) in src.iter().enumerate() {
            let d = self.pixels[i + c] as f64;
            let v = (*s as f64 * sa + d * da * (1.0 - sa)) / out_a;
            self.pixels[i + c] = v.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0).round() as u8;
    }
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + abx * t, a.y + aby * t);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

impl DrawSurface for Canvas {
    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        let reach = radius + 1.0;
        let Some((x0, x1)) = Self::span(center.x - reach, center.x + reach, self.width) else {
            return;
        };
        let Some((y0, y1)) = Self::span(center.y - reach, center.y + reach, self.height) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let coverage = (radius + 0.5 - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha.clamp(0.0, 1.0) * coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64) {
        let half = width / 2.0;
        let reach = half + 1.0;
        let Some((x0, x1)) = Self::span(from.x.min(to.x) - reach, from.x.max(to.x) + reach, self.width)
        else {
            return;
        };
        let Some((y0, y1)) = Self::span(from.y.min(to.y) - reach, from.y.max(to.y) + reach, self.height)
        else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (half + 0.5 - segment_distance(p, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha.clamp(0.0, 1.0) * coverage);
                }
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
    }
}
