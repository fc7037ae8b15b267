use std::f32::consts::TAU;

use glam::{vec2, Vec2};

/// Largest distance a flattened arc chord may stray from the true arc.
const FLATTEN_TOLERANCE: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArcDirection {
    /// Increasing angle, which is clockwise on screen because y points down.
    Clockwise,
    Counterclockwise,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        direction: ArcDirection,
    },
    Close,
}

/// A position in canvas coordinates as it arrives from a client.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Point {
        Point { x, y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Vec2 {
        vec2(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Point {
        Point { x: v.x, y: v.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Segment {
        Segment { a, b }
    }

    pub fn distance_to(&self, p: Vec2) -> f32 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        let t = if len_sq > 0.0 {
            ((p - self.a).dot(ab) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        p.distance(self.a + ab * t)
    }

    pub fn min(&self) -> Vec2 {
        self.a.min(self.b)
    }

    pub fn max(&self) -> Vec2 {
        self.a.max(self.b)
    }
}

/// True if `p` lies inside the stroke of `segments` drawn at `width` with round caps and joins.
pub fn stroke_contains(segments: &[Segment], p: Vec2, width: f32) -> bool {
    let half_width = width / 2.0;
    segments.iter().any(|segment| segment.distance_to(p) <= half_width)
}

/// An ordered list of path operations with 2D canvas semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    ops: Vec<PathOp>,
}

impl Path {
    pub fn new() -> Path {
        Path { ops: Vec::new() }
    }

    pub fn ops(&self) -> &[PathOp] {
        &self.ops
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(PathOp::MoveTo(vec2(x, y)));
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(PathOp::LineTo(vec2(x, y)));
    }

    pub fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32, direction: ArcDirection) {
        self.ops.push(PathOp::Arc {
            center: vec2(x, y),
            radius,
            start_angle,
            end_angle,
            direction,
        });
    }

    pub fn close(&mut self) {
        self.ops.push(PathOp::Close);
    }

    /// Turns the path into straight segments. An arc that starts away from the
    /// current point is joined to it by a line, as a canvas would draw it.
    pub fn flatten(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current: Option<Vec2> = None;
        let mut subpath_start: Option<Vec2> = None;

        for op in &self.ops {
            match *op {
                PathOp::MoveTo(p) => {
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathOp::LineTo(p) => {
                    match current {
                        Some(from) => segments.push(Segment::new(from, p)),
                        None => subpath_start = Some(p),
                    }
                    current = Some(p);
                }
                PathOp::Arc { center, radius, start_angle, end_angle, direction } => {
                    let point_at = |angle: f32| center + radius * vec2(angle.cos(), angle.sin());
                    let first = point_at(start_angle);
                    match current {
                        Some(from) if from.distance(first) > f32::EPSILON => segments.push(Segment::new(from, first)),
                        Some(_) => {}
                        None => subpath_start = Some(first),
                    }

                    let sweep = arc_sweep(start_angle, end_angle, direction);
                    let steps = arc_steps(radius, sweep);
                    let mut previous = first;
                    for i in 1..=steps {
                        let next = point_at(start_angle + sweep * i as f32 / steps as f32);
                        segments.push(Segment::new(previous, next));
                        previous = next;
                    }
                    current = Some(previous);
                }
                PathOp::Close => {
                    if let (Some(from), Some(start)) = (current, subpath_start) {
                        if from.distance(start) > f32::EPSILON {
                            segments.push(Segment::new(from, start));
                        }
                        current = Some(start);
                    }
                }
            }
        }
        segments
    }
}

/// Signed angular extent of an arc. A requested extent of a full turn or more
/// in the drawing direction is a full circle, anything else wraps into one turn.
pub fn arc_sweep(start_angle: f32, end_angle: f32, direction: ArcDirection) -> f32 {
    match direction {
        ArcDirection::Clockwise => {
            let delta = end_angle - start_angle;
            if delta >= TAU { TAU } else { delta.rem_euclid(TAU) }
        }
        ArcDirection::Counterclockwise => {
            let delta = start_angle - end_angle;
            if delta >= TAU { -TAU } else { -delta.rem_euclid(TAU) }
        }
    }
}

fn arc_steps(radius: f32, sweep: f32) -> usize {
    if radius <= FLATTEN_TOLERANCE {
        return 1;
    }
    let max_step = 2.0 * (1.0 - FLATTEN_TOLERANCE / radius).acos();
    ((sweep.abs() / max_step).ceil() as usize).max(1)
}
