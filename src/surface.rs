//! The rendering surface the turtle draws on.
//!
//! The interpreter only talks to the [`Surface`] trait. [`Canvas`] is a software
//! implementation that keeps the geometry it was asked to produce: a log of every
//! call, pen-down polylines and fill polygons.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Upper bound on the chords used to approximate one arc.
pub const MAX_ARC_STEPS: usize = 360;

/// Drawing primitives consumed by the turtle interpreter.
///
/// Headings are degrees, counter-clockwise from +x. Implementations must apply
/// commands in call order.
pub trait Surface {
    /// Moves to an absolute position, tracing a line if the pen is down.
    fn move_to(&mut self, position: DVec2);
    /// Sets the absolute heading.
    fn set_heading(&mut self, heading: f64);
    /// Moves `distance` along the current heading.
    fn forward(&mut self, distance: f64);
    fn pen_up(&mut self);
    fn pen_down(&mut self);
    /// Travels along a circular arc of `|radius|` sweeping `sweep` degrees.
    ///
    /// A positive radius keeps the center on the left and turns counter-clockwise,
    /// a negative one turns clockwise.
    fn arc(&mut self, radius: f64, sweep: f64);
    /// Starts recording the outline of a fill region.
    fn begin_fill(&mut self);
    /// Closes and fills the region started by [`begin_fill`](Self::begin_fill).
    fn end_fill(&mut self);
    /// Sets both stroke and fill color.
    fn set_color(&mut self, color: &str);
    fn position(&self) -> DVec2;
    fn heading(&self) -> f64;
    /// Size of the drawable area, used to scale normalized start points.
    fn viewport(&self) -> DVec2;
}

/// A single call made against a [`Canvas`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    MoveTo(DVec2),
    SetHeading(f64),
    Forward(f64),
    PenUp,
    PenDown,
    Arc { radius: f64, sweep: f64 },
    BeginFill,
    EndFill,
    SetColor(String),
}

/// A connected pen-down run in one color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub points: Vec<DVec2>,
}

/// The outline traversed between `begin_fill` and `end_fill`, regardless of pen state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillRegion {
    pub color: String,
    pub points: Vec<DVec2>,
}

/// Software turtle surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Canvas {
    viewport: DVec2,
    position: DVec2,
    heading: f64,
    pen_down: bool,
    color: String,
    stroke_open: bool,
    fill_path: Option<Vec<DVec2>>,
    commands: Vec<Command>,
    strokes: Vec<Stroke>,
    fills: Vec<FillRegion>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DVec2::new(400.0, 300.0))
    }
}

impl Canvas {
    /// Creates an empty canvas at the origin, heading east, pen down, drawing in black.
    pub fn new(viewport: DVec2) -> Self {
        Self {
            viewport,
            position: DVec2::ZERO,
            heading: 0.0,
            pen_down: true,
            color: "black".to_string(),
            stroke_open: false,
            fill_path: None,
            commands: Vec::new(),
            strokes: Vec::new(),
            fills: Vec::new(),
        }
    }

    /// Every call received so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn fills(&self) -> &[FillRegion] {
        &self.fills
    }

    pub fn is_pen_down(&self) -> bool {
        self.pen_down
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Number of [`Command::SetHeading`] and [`Command::Arc`] calls received.
    pub fn rotation_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::SetHeading(_) | Command::Arc { .. }))
            .count()
    }

    fn trace_to(&mut self, target: DVec2) {
        if self.pen_down {
            if !self.stroke_open {
                self.strokes.push(Stroke {
                    color: self.color.clone(),
                    points: vec![self.position],
                });
                self.stroke_open = true;
            }
            if let Some(stroke) = self.strokes.last_mut() {
                stroke.points.push(target);
            }
        }
        if let Some(path) = self.fill_path.as_mut() {
            path.push(target);
        }
        self.position = target;
    }

    fn advance(&mut self, distance: f64) {
        let direction = DVec2::from_angle(self.heading.to_radians());
        self.trace_to(self.position + direction * distance);
    }
}

fn normalize_heading(heading: f64) -> f64 {
    heading.rem_euclid(360.0)
}

impl Surface for Canvas {
    fn move_to(&mut self, position: DVec2) {
        self.commands.push(Command::MoveTo(position));
        self.trace_to(position);
    }

    fn set_heading(&mut self, heading: f64) {
        self.commands.push(Command::SetHeading(heading));
        self.heading = normalize_heading(heading);
    }

    fn forward(&mut self, distance: f64) {
        self.commands.push(Command::Forward(distance));
        self.advance(distance);
    }

    fn pen_up(&mut self) {
        self.commands.push(Command::PenUp);
        self.pen_down = false;
        self.stroke_open = false;
    }

    fn pen_down(&mut self) {
        self.commands.push(Command::PenDown);
        self.pen_down = true;
    }

    fn arc(&mut self, radius: f64, sweep: f64) {
        self.commands.push(Command::Arc { radius, sweep });

        // Chord polygon inscribed in the arc: half-step turn, then
        // `steps` chords each followed by a full step turn, then undo the half step.
        let start_heading = self.heading;
        let steps = (radius.abs() as usize).clamp(1, MAX_ARC_STEPS);
        let mut step = sweep / steps as f64;
        let chord = 2.0 * radius.abs() * (step / 2.0).to_radians().sin();
        if radius < 0.0 {
            step = -step;
        }

        self.heading += step / 2.0;
        for _ in 0..steps {
            self.advance(chord);
            self.heading += step;
        }
        let signed_sweep = if radius < 0.0 { -sweep } else { sweep };
        self.heading = normalize_heading(start_heading + signed_sweep);
    }

    fn begin_fill(&mut self) {
        self.commands.push(Command::BeginFill);
        self.fill_path = Some(vec![self.position]);
    }

    fn end_fill(&mut self) {
        self.commands.push(Command::EndFill);
        if let Some(points) = self.fill_path.take() {
            self.fills.push(FillRegion {
                color: self.color.clone(),
                points,
            });
        }
    }

    fn set_color(&mut self, color: &str) {
        self.commands.push(Command::SetColor(color.to_string()));
        self.color = color.to_string();
        self.stroke_open = false;
    }

    fn position(&self) -> DVec2 {
        self.position
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn viewport(&self) -> DVec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_up_splits_strokes() {
        let mut canvas = Canvas::default();
        canvas.forward(10.0);
        canvas.pen_up();
        canvas.forward(10.0);
        canvas.pen_down();
        canvas.forward(10.0);

        assert_eq!(canvas.strokes().len(), 2);
        assert_eq!(canvas.strokes()[0].points, vec![DVec2::ZERO, DVec2::new(10.0, 0.0)]);
        assert_eq!(canvas.strokes()[1].points[0], DVec2::new(20.0, 0.0));
    }

    #[test]
    fn test_arc_ends_on_circle() {
        let mut canvas = Canvas::default();
        // Quarter turn left around a center at (0, 10).
        canvas.arc(10.0, 90.0);
        assert!(canvas.position().abs_diff_eq(DVec2::new(10.0, 10.0), 1e-9));
        assert_eq!(canvas.heading(), 90.0);

        let mut canvas = Canvas::default();
        canvas.arc(-10.0, 90.0);
        assert!(canvas.position().abs_diff_eq(DVec2::new(10.0, -10.0), 1e-9));
        assert_eq!(canvas.heading(), 270.0);
    }

    #[test]
    fn test_fill_ignores_pen_state() {
        let mut canvas = Canvas::default();
        canvas.begin_fill();
        canvas.pen_up();
        canvas.forward(5.0);
        canvas.pen_down();
        canvas.forward(5.0);
        canvas.end_fill();

        assert_eq!(canvas.fills().len(), 1);
        assert_eq!(canvas.fills()[0].points.len(), 3);
        assert_eq!(canvas.strokes().len(), 1);
    }

    #[test]
    fn test_huge_radius_caps_chords() {
        let mut canvas = Canvas::default();
        canvas.arc(1e9, 1e-6);

        assert_eq!(canvas.strokes().len(), 1);
        assert_eq!(canvas.strokes()[0].points.len(), MAX_ARC_STEPS + 1);
        // Endpoint still lies on the true arc.
        let sweep = 1e-6_f64.to_radians();
        let expected = DVec2::new(1e9 * sweep.sin(), 1e9 * (1.0 - sweep.cos()));
        assert!(canvas.position().abs_diff_eq(expected, 1e-3));
    }
}
