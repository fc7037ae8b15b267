#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const OUTLINE_COLOR: Color = Color::rgb(66, 10, 0);
pub const TRACE_COLOR: Color = Color::rgb(247, 226, 135);

/// Per-channel distance below which a pixel still counts as trace colored.
pub const TRACE_COLOR_TOLERANCE: u8 = 30;

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// True when every channel differs from `other` by strictly less than `tolerance`.
    pub fn is_near(&self, other: Color, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) < tolerance
            && self.g.abs_diff(other.g) < tolerance
            && self.b.abs_diff(other.b) < tolerance
    }
}
