//! Turtle state and the closed set of actions it understands.

use crate::error::LSystemError;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A saved cursor, pushed by `[` and restored by `]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub position: DVec2,
    pub heading: f64,
    pub pending_turn: f64,
}

/// The state of the drawing turtle for one render pass.
///
/// Position and heading mirror the surface after every motion; `pending_turn`
/// holds rotation that has been requested but not yet applied.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current cursor position in surface coordinates.
    pub position: DVec2,

    /// Current heading in degrees, counter-clockwise from +x.
    pub heading: f64,

    /// Signed degrees accumulated by turn actions since the last forward motion.
    pub pending_turn: f64,

    /// Saved cursors, most recent last.
    pub stack: Vec<Snapshot>,

    /// Position in the sequential color list. `None` until the first cycle step.
    pub color_index: Option<usize>,

    /// Running maximum of x and y reached by forward motion.
    pub bounds: DVec2,
}

impl TurtleState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            heading: self.heading,
            pending_turn: self.pending_turn,
        }
    }

    /// Folds the current position into the running bounds.
    pub fn extend_bounds(&mut self) {
        self.bounds = self.bounds.max(self.position);
    }

    /// Advances the sequential color index, wrapping at `len`.
    ///
    /// Returns the new index, or `None` when there is nothing to cycle through.
    pub fn next_color(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let next = self.color_index.map_or(0, |i| (i + 1) % len);
        self.color_index = Some(next);
        Some(next)
    }
}

/// Operations a terminal symbol can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move forward with the pen down (`A`..`F`).
    Draw,
    /// Move forward with the pen up (`G`..`L`).
    Move,
    /// Queue a counter-clockwise turn (`+`).
    TurnLeft,
    /// Queue a clockwise turn (`-`).
    TurnRight,
    /// Save the cursor (`[`).
    Push,
    /// Restore the most recently saved cursor (`]`).
    Pop,
    /// No-op, symbol has no registered meaning.
    Noop,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::Draw => "draw",
            Action::Move => "move",
            Action::TurnLeft => "left",
            Action::TurnRight => "right",
            Action::Push => "push",
            Action::Pop => "pop",
            Action::Noop => "noop",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(Action::Draw),
            "move" => Ok(Action::Move),
            "left" | "turn-left" | "turn_left" => Ok(Action::TurnLeft),
            "right" | "turn-right" | "turn_right" => Ok(Action::TurnRight),
            "push" => Ok(Action::Push),
            "pop" => Ok(Action::Pop),
            "noop" => Ok(Action::Noop),
            other => Err(LSystemError::UnknownAction(other.to_string())),
        }
    }
}
