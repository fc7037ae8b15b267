use crate::canvas::Canvas;
use crate::color::OUTLINE_COLOR;
use crate::shape::{Shape, OUTLINE_WIDTH};

/// The stroked outline rasterised onto a blank canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineMask {
    canvas: Canvas,
    total_outline_pixels: usize,
}

impl OutlineMask {
    pub fn generate(shape: &Shape) -> OutlineMask {
        let mut canvas = Canvas::default();
        canvas.stroke(shape.segments(), OUTLINE_WIDTH, OUTLINE_COLOR);
        let total_outline_pixels = canvas.count_pixels(|color| color == OUTLINE_COLOR);
        OutlineMask { canvas, total_outline_pixels }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.canvas.pixel(x, y) == Some(OUTLINE_COLOR)
    }

    pub fn total_outline_pixels(&self) -> usize {
        self.total_outline_pixels
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }
}
