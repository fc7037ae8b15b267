use std::fmt;

use glam::Vec2;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::color::TRACE_COLOR;
use crate::error::TracingError;
use crate::geometry::{Point, Segment};
use crate::outline::OutlineMask;
use crate::shape::{Shape, ShapeId};

pub const TRACE_WIDTH: f32 = 12.0;
pub const DEFAULT_SUCCESS_THRESHOLD: f32 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Tracing,
    Failed,
    Succeeded,
}

impl Status {
    pub fn is_over(&self) -> bool {
        matches!(self, Status::Failed | Status::Succeeded)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Idle => "idle",
            Status::Tracing => "tracing",
            Status::Failed => "failed",
            Status::Succeeded => "succeeded",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerSample {
    pub kind: PointerKind,
    #[serde(flatten)]
    pub position: Point,
}

impl PointerSample {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> PointerSample {
        PointerSample { kind, position: Point::new(x, y) }
    }
}

/// What a pointer event did to a session that is still going.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Started,
    Resumed,
    Traced { progress: f32 },
    Lifted { progress: f32 },
    Succeeded { progress: f32 },
    Ignored,
}

/// One play attempt at tracing a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingSession {
    shape: Shape,
    outline: OutlineMask,
    trace: Canvas,
    /// Trace-coloured pixels on `trace`, kept up to date as segments are painted.
    filled: usize,
    status: Status,
    progress: f32,
    pen_down: bool,
    last_pointer_position: Option<Vec2>,
    success_threshold: f32,
}

impl TracingSession {
    pub fn new(shape_id: ShapeId) -> TracingSession {
        TracingSession::with_success_threshold(shape_id, DEFAULT_SUCCESS_THRESHOLD)
    }

    pub fn with_success_threshold(shape_id: ShapeId, success_threshold: f32) -> TracingSession {
        let shape = Shape::new(shape_id);
        let outline = OutlineMask::generate(&shape);
        TracingSession {
            shape,
            outline,
            trace: Canvas::default(),
            filled: 0,
            status: Status::Idle,
            progress: 0.0,
            pen_down: false,
            last_pointer_position: None,
            success_threshold,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn shape_id(&self) -> ShapeId {
        self.shape.id()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn outline(&self) -> &OutlineMask {
        &self.outline
    }

    pub fn trace(&self) -> &Canvas {
        &self.trace
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn last_pointer_position(&self) -> Option<Point> {
        self.last_pointer_position.map(Point::from)
    }

    pub fn success_threshold(&self) -> f32 {
        self.success_threshold
    }

    pub fn handle(&mut self, sample: PointerSample) -> Result<Step, TracingError> {
        let p = sample.position.into();
        match sample.kind {
            PointerKind::Down => self.pointer_down(p),
            PointerKind::Move => self.pointer_move(p),
            PointerKind::Up => Ok(self.pointer_up()),
        }
    }

    pub fn pointer_down(&mut self, p: Vec2) -> Result<Step, TracingError> {
        let step = match (self.status, self.pen_down) {
            (Status::Idle, _) => Step::Started,
            (Status::Tracing, false) => Step::Resumed,
            (Status::Tracing, true) => return Ok(Step::Ignored),
            (status, _) => return Err(TracingError::AttemptOver(status)),
        };

        if !self.shape.stroke_contains(p) {
            return Err(self.fail(TracingError::StartedOutside));
        }

        self.status = Status::Tracing;
        self.pen_down = true;
        self.last_pointer_position = Some(p);
        debug!(shape = %self.shape.id(), x = p.x, y = p.y, ?step, "pointer down");
        Ok(step)
    }

    pub fn pointer_move(&mut self, p: Vec2) -> Result<Step, TracingError> {
        if self.status.is_over() {
            return Err(TracingError::AttemptOver(self.status));
        }
        if self.status != Status::Tracing || !self.pen_down {
            return Ok(Step::Ignored);
        }

        if !self.shape.stroke_contains(p) {
            let progress = self.progress;
            return Err(self.fail(TracingError::OutOfBounds { progress }));
        }

        let from = self.last_pointer_position.unwrap_or(p);
        self.filled += self.trace.stroke_segment(&Segment::new(from, p), TRACE_WIDTH, TRACE_COLOR);
        self.progress = compute_progress(self.filled, self.outline.total_outline_pixels(), self.shape.id())?;
        self.last_pointer_position = Some(p);
        Ok(Step::Traced { progress: self.progress })
    }

    pub fn pointer_up(&mut self) -> Step {
        if self.status != Status::Tracing {
            return Step::Ignored;
        }

        self.pen_down = false;
        if self.progress >= self.success_threshold {
            self.status = Status::Succeeded;
            info!(shape = %self.shape.id(), progress = self.progress, "traced the outline");
            Step::Succeeded { progress: self.progress }
        } else {
            Step::Lifted { progress: self.progress }
        }
    }

    /// Replays `path` as one stroke: down on the first point, a move to each
    /// following point, then up. Stops at the first failure.
    pub fn trace_stroke(&mut self, path: &[Point]) -> Result<Step, TracingError> {
        let Some((first, rest)) = path.split_first() else { return Ok(Step::Ignored) };
        self.pointer_down((*first).into())?;
        for p in rest {
            self.pointer_move((*p).into())?;
        }
        Ok(self.pointer_up())
    }

    /// Back to idle with a fresh trace surface and outline for the current shape.
    pub fn reset(&mut self) {
        self.trace = Canvas::default();
        self.filled = 0;
        self.outline = OutlineMask::generate(&self.shape);
        self.status = Status::Idle;
        self.progress = 0.0;
        self.pen_down = false;
        self.last_pointer_position = None;
    }

    pub fn change_shape(&mut self, shape_id: ShapeId) -> Result<(), TracingError> {
        if self.status != Status::Idle {
            return Err(TracingError::ShapeChangeWhileActive(self.status));
        }
        self.shape = Shape::new(shape_id);
        self.reset();
        debug!(shape = %shape_id, total_outline_pixels = self.outline.total_outline_pixels(), "shape changed");
        Ok(())
    }

    /// Outline with the trace drawn over it, as a player would see the canvas.
    pub fn render(&self) -> Canvas {
        let mut canvas = self.outline.canvas().clone();
        canvas.composite(&self.trace);
        canvas
    }

    fn fail(&mut self, error: TracingError) -> TracingError {
        self.status = Status::Failed;
        self.pen_down = false;
        info!(shape = %self.shape.id(), progress = self.progress, "{error}");
        error
    }
}

/// Percentage of the outline covered by `filled` trace pixels, scaled per shape and capped at 100.
pub fn compute_progress(filled: usize, total_outline_pixels: usize, shape_id: ShapeId) -> Result<f32, TracingError> {
    if total_outline_pixels == 0 {
        return Err(TracingError::EmptyOutline);
    }
    let raw = filled as f32 / total_outline_pixels as f32 * 100.0 * shape_id.progress_scale();
    Ok(raw.min(100.0))
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    fn on_circle(degrees: f32) -> Vec2 {
        let angle = degrees.to_radians();
        vec2(185.0, 185.0) + 100.0 * vec2(angle.cos(), angle.sin())
    }

    fn trace_arc(session: &mut TracingSession, from_degrees: u32, to_degrees: u32) -> Vec<f32> {
        (from_degrees..=to_degrees)
            .step_by(2)
            .map(|degrees| match session.pointer_move(on_circle(degrees as f32)).unwrap() {
                Step::Traced { progress } => progress,
                step => panic!("unexpected {step:?}"),
            })
            .collect()
    }

    #[test]
    fn down_on_the_stroke_starts_tracing() {
        let mut session = TracingSession::new(ShapeId::Circle);
        assert_eq!(session.pointer_down(vec2(285.0, 185.0)), Ok(Step::Started));
        assert_eq!(session.status(), Status::Tracing);
        assert_eq!(session.last_pointer_position(), Some(Point::new(285.0, 185.0)));
    }

    #[test]
    fn down_in_the_middle_fails_with_zero_progress() {
        let mut session = TracingSession::new(ShapeId::Circle);
        assert_eq!(session.pointer_down(vec2(185.0, 185.0)), Err(TracingError::StartedOutside));
        assert_eq!(session.status(), Status::Failed);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(TracingError::StartedOutside.to_string(), "started outside outline");
    }

    #[test]
    fn progress_is_monotone_and_bounded() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        let progress = trace_arc(&mut session, 0, 360);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert!(progress.iter().all(|p| (0.0..=100.0).contains(p)));
        assert_eq!(session.progress(), 100.0);
    }

    #[test]
    fn leaving_the_outline_fails_and_keeps_progress() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        trace_arc(&mut session, 0, 6);
        let before = session.progress();
        assert!(before > 0.0);

        let err = session.pointer_move(vec2(185.0, 185.0)).unwrap_err();
        assert_eq!(err, TracingError::OutOfBounds { progress: before });
        assert_eq!(err.to_string(), "went out of bounds");
        assert_eq!(session.status(), Status::Failed);
        assert_eq!(session.progress(), before);
    }

    #[test]
    fn finished_attempt_rejects_further_input() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(vec2(185.0, 185.0)).unwrap_err();
        let snapshot = session.clone();

        assert_eq!(session.pointer_down(on_circle(0.0)), Err(TracingError::AttemptOver(Status::Failed)));
        assert_eq!(session.pointer_move(vec2(285.0, 185.0)), Err(TracingError::AttemptOver(Status::Failed)));
        assert_eq!(session.pointer_up(), Step::Ignored);
        assert_eq!(session, snapshot);
    }

    #[test]
    fn lifting_above_threshold_succeeds() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        trace_arc(&mut session, 0, 360);
        assert_eq!(session.pointer_up(), Step::Succeeded { progress: 100.0 });
        assert_eq!(session.status(), Status::Succeeded);
        assert_eq!(session.pointer_move(on_circle(10.0)), Err(TracingError::AttemptOver(Status::Succeeded)));
        assert_eq!(session.progress(), 100.0);
    }

    #[test]
    fn lifting_below_threshold_allows_resuming() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        trace_arc(&mut session, 0, 6);
        let lifted = session.progress();
        assert!(lifted < DEFAULT_SUCCESS_THRESHOLD);
        assert_eq!(session.pointer_up(), Step::Lifted { progress: lifted });
        assert_eq!(session.status(), Status::Tracing);

        assert_eq!(session.pointer_move(on_circle(10.0)), Ok(Step::Ignored));
        assert_eq!(session.progress(), lifted);

        assert_eq!(session.pointer_down(on_circle(180.0)), Ok(Step::Resumed));
        trace_arc(&mut session, 180, 186);
        assert!(session.progress() > lifted);
    }

    #[test]
    fn resuming_outside_fails() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        session.pointer_up();
        assert_eq!(session.pointer_down(vec2(20.0, 20.0)), Err(TracingError::StartedOutside));
        assert_eq!(session.status(), Status::Failed);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut session = TracingSession::new(ShapeId::Star);
        session.pointer_down(vec2(185.0, 85.0)).unwrap();
        session.pointer_move(vec2(186.0, 87.0)).unwrap();
        session.pointer_move(vec2(40.0, 40.0)).unwrap_err();

        session.reset();
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.progress(), 0.0);
        assert_eq!(session.trace(), &Canvas::default());
        assert_eq!(session.outline(), &OutlineMask::generate(&Shape::new(ShapeId::Star)));

        let once = session.clone();
        session.reset();
        assert_eq!(session, once);
    }

    #[test]
    fn shape_change_only_while_idle() {
        let mut session = TracingSession::new(ShapeId::Circle);
        let circle_pixels = session.outline().total_outline_pixels();

        session.change_shape(ShapeId::Umbrella).unwrap();
        assert_eq!(session.shape_id(), ShapeId::Umbrella);
        assert_eq!(
            session.outline().total_outline_pixels(),
            OutlineMask::generate(&Shape::new(ShapeId::Umbrella)).total_outline_pixels()
        );
        assert_ne!(session.outline().total_outline_pixels(), circle_pixels);

        session.pointer_down(vec2(172.0, 230.0)).unwrap();
        assert_eq!(
            session.change_shape(ShapeId::Circle),
            Err(TracingError::ShapeChangeWhileActive(Status::Tracing))
        );
        assert_eq!(session.shape_id(), ShapeId::Umbrella);
    }

    #[test]
    fn handle_dispatches_on_kind() {
        let mut session = TracingSession::new(ShapeId::Triangle);
        assert_eq!(session.handle(PointerSample::new(PointerKind::Down, 185.0, 70.0)), Ok(Step::Started));
        assert!(matches!(
            session.handle(PointerSample::new(PointerKind::Move, 190.0, 80.0)),
            Ok(Step::Traced { .. })
        ));
        assert!(matches!(
            session.handle(PointerSample::new(PointerKind::Up, 190.0, 80.0)),
            Ok(Step::Lifted { .. })
        ));
    }

    #[test]
    fn stroke_replay_reports_outcome() {
        let full_circle: Vec<Point> = (0..=360).step_by(3).map(|d| on_circle(d as f32).into()).collect();
        let mut session = TracingSession::new(ShapeId::Circle);
        assert_eq!(session.trace_stroke(&full_circle), Ok(Step::Succeeded { progress: 100.0 }));

        let mut session = TracingSession::new(ShapeId::Circle);
        let broken = [on_circle(0.0).into(), on_circle(4.0).into(), Point::new(185.0, 185.0), on_circle(8.0).into()];
        assert!(matches!(session.trace_stroke(&broken), Err(TracingError::OutOfBounds { .. })));
        assert_eq!(session.status(), Status::Failed);

        assert_eq!(session.trace_stroke(&[]), Ok(Step::Ignored));
    }

    #[test]
    fn triangle_progress_grows_along_an_edge() {
        let mut session = TracingSession::new(ShapeId::Triangle);
        let (top, right) = (vec2(185.0, 70.0), vec2(285.0, 270.0));
        session.pointer_down(top).unwrap();
        let progress: Vec<f32> = (1..=40)
            .map(|i| match session.pointer_move(top.lerp(right, i as f32 / 40.0)).unwrap() {
                Step::Traced { progress } => progress,
                step => panic!("unexpected {step:?}"),
            })
            .collect();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
        assert!(progress.iter().all(|p| (0.0..=100.0).contains(p)));
        assert!(progress[39] > progress[0]);
        assert_eq!(session.status(), Status::Tracing);
    }

    #[test]
    fn filled_count_matches_the_trace_surface() {
        let mut session = TracingSession::new(ShapeId::Star);
        session.pointer_down(vec2(185.0, 85.0)).unwrap();
        for (x, y) in [(186.0, 87.0), (190.0, 95.0), (186.0, 87.0), (188.0, 90.0)] {
            session.pointer_move(vec2(x, y)).unwrap();
        }
        let on_surface = session
            .trace()
            .count_pixels(|color| color.is_near(TRACE_COLOR, crate::color::TRACE_COLOR_TOLERANCE));
        assert!(on_surface > 0);
        assert_eq!(session.filled, on_surface);
        assert_eq!(
            session.progress(),
            compute_progress(on_surface, session.outline().total_outline_pixels(), ShapeId::Star).unwrap()
        );

        session.reset();
        assert_eq!(session.filled, 0);
    }

    #[test]
    fn progress_uses_shape_scale() {
        let progress = compute_progress(100, 10_000, ShapeId::Umbrella).unwrap();
        assert!((progress - 8.0).abs() < 1e-4);
        assert_eq!(compute_progress(10_000, 10_000, ShapeId::Circle), Ok(100.0));
        assert_eq!(compute_progress(1, 0, ShapeId::Star), Err(TracingError::EmptyOutline));
    }

    #[test]
    fn render_shows_trace_over_outline() {
        let mut session = TracingSession::new(ShapeId::Circle);
        session.pointer_down(on_circle(0.0)).unwrap();
        trace_arc(&mut session, 0, 10);
        let canvas = session.render();
        assert_eq!(canvas.pixel(285, 186), Some(TRACE_COLOR));
        assert!(canvas.count_pixels(|c| c == crate::color::OUTLINE_COLOR) > 0);
    }

    #[test]
    fn pointer_sample_reads_flat_json() {
        let sample: PointerSample = serde_json::from_str(r#"{"kind":"move","x":1.5,"y":2}"#).unwrap();
        assert_eq!(sample, PointerSample::new(PointerKind::Move, 1.5, 2.0));
    }
}
