use glam::{vec2, Vec2};

use crate::color::Color;
use crate::geometry::Segment;

/// Logical size of the play area, in both directions.
pub const CANVAS_SIZE: u32 = 370;

/// A software raster surface. Pixels start blank and are painted opaque, with
/// no anti-aliasing: a pixel is covered when its centre lies inside the stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Option<Color>>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.index(x, y)]
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.width as f32 && p.y < self.height as f32
    }

    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    pub fn stroke(&mut self, segments: &[Segment], width: f32, color: Color) -> usize {
        segments.iter().map(|segment| self.stroke_segment(segment, width, color)).sum()
    }

    /// Paints `segment` and returns how many pixels were not `color` before.
    /// Only the segment's bounding box is visited.
    pub fn stroke_segment(&mut self, segment: &Segment, width: f32, color: Color) -> usize {
        let half_width = width / 2.0;
        let min = segment.min() - Vec2::splat(half_width);
        let max = segment.max() + Vec2::splat(half_width);
        let Some((x0, y0, x1, y1)) = self.clamp_box(min, max) else { return 0 };

        let mut newly_set = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                let centre = vec2(x as f32 + 0.5, y as f32 + 0.5);
                if segment.distance_to(centre) <= half_width {
                    let index = self.index(x, y);
                    if self.pixels[index] != Some(color) {
                        self.pixels[index] = Some(color);
                        newly_set += 1;
                    }
                }
            }
        }
        newly_set
    }

    pub fn count_pixels(&self, mut predicate: impl FnMut(Color) -> bool) -> usize {
        self.pixels.iter().flatten().filter(|color| predicate(**color)).count()
    }

    /// Paints every pixel of `other` that is set over this canvas.
    pub fn composite(&mut self, other: &Canvas) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            if src.is_some() {
                *dst = *src;
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn clamp_box(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0, y0, x1, y1))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new(CANVAS_SIZE, CANVAS_SIZE)
    }
}
