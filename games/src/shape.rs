use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::{vec2, Vec2};

use crate::error::TracingError;
use crate::geometry::{stroke_contains, ArcDirection, Path, Segment};

pub const OUTLINE_WIDTH: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeId {
    Circle,
    Triangle,
    Star,
    Umbrella,
}

impl ShapeId {
    pub const ALL: [ShapeId; 4] = [ShapeId::Circle, ShapeId::Triangle, ShapeId::Star, ShapeId::Umbrella];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeId::Circle => "circle",
            ShapeId::Triangle => "triangle",
            ShapeId::Star => "star",
            ShapeId::Umbrella => "umbrella",
        }
    }

    /// Empirical multiplier turning the raw fill ratio into a percentage.
    /// A thin trace saturates far below a full ratio, so these are tuned per shape.
    pub fn progress_scale(&self) -> f32 {
        match self {
            ShapeId::Circle => 14.0,
            ShapeId::Triangle => 14.0,
            ShapeId::Star => 15.0,
            ShapeId::Umbrella => 8.0,
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> ShapeId {
        ShapeId::ALL[rng.usize(..ShapeId::ALL.len())]
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeId {
    type Err = TracingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| TracingError::UnknownShape(s.to_owned()))
    }
}

/// The target outline: a path in canvas space and its flattened segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    path: Path,
    segments: Vec<Segment>,
}

impl Shape {
    pub fn new(id: ShapeId) -> Shape {
        let path = match id {
            ShapeId::Circle => circle_path(),
            ShapeId::Triangle => triangle_path(),
            ShapeId::Star => star_path(vec2(185.0, 185.0), 5, 100.0, 50.0),
            ShapeId::Umbrella => umbrella_path(),
        };
        let segments = path.flatten();
        Shape { id, path, segments }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether `p` falls inside the outline as stroked at [`OUTLINE_WIDTH`].
    pub fn stroke_contains(&self, p: Vec2) -> bool {
        stroke_contains(&self.segments, p, OUTLINE_WIDTH)
    }
}

fn circle_path() -> Path {
    let mut path = Path::new();
    path.arc(185.0, 185.0, 100.0, 0.0, TAU, ArcDirection::Clockwise);
    path
}

fn triangle_path() -> Path {
    let mut path = Path::new();
    path.move_to(185.0, 70.0);
    path.line_to(285.0, 270.0);
    path.line_to(85.0, 270.0);
    path.close();
    path
}

/// Alternates outer and inner vertices, starting straight up from `center`.
fn star_path(center: Vec2, spikes: u32, outer_radius: f32, inner_radius: f32) -> Path {
    let mut path = Path::new();
    let step = PI / spikes as f32;
    let mut rotation = PI / 2.0 * 3.0;
    path.move_to(center.x, center.y - outer_radius);
    for _ in 0..spikes {
        for radius in [outer_radius, inner_radius] {
            let p = center + radius * vec2(rotation.cos(), rotation.sin());
            path.line_to(p.x, p.y);
            rotation += step;
        }
    }
    path.close();
    path
}

fn umbrella_path() -> Path {
    use ArcDirection::*;

    let mut path = Path::new();
    // canopy
    path.arc(185.0, 165.0, 120.0, 0.0, PI, Counterclockwise);
    for center_x in [93.0, 146.0, 228.0, 279.0] {
        path.move_to(center_x + 26.0, 165.0);
        path.arc(center_x, 165.0, 26.0, 0.0, PI, Counterclockwise);
    }

    // handle
    path.move_to(172.0, 165.0);
    path.line_to(172.0, 285.0);
    path.move_to(172.0, 285.0);
    path.arc(222.0, 285.0, 50.0, PI, TAU, Counterclockwise);
    path.move_to(240.0, 285.0);
    path.arc(256.0, 285.0, 16.0, PI, TAU, Clockwise);
    path.move_to(202.0, 285.0);
    path.arc(221.0, 285.0, 19.0, PI, TAU, Counterclockwise);
    path.move_to(202.0, 285.0);
    path.line_to(202.0, 165.0);
    path
}
