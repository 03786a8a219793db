//! Interpreter that turns terminal L-System symbols into turtle motion.
//!
//! Configure a [`DrawConfig`], map symbols to [`Action`]s with an [`ActionMap`]
//! (or take [`ActionMap::standard`]), then drive a [`TurtleInterpreter`] one
//! symbol at a time. Rule expansion lives in [`crate::lsystem`].

use crate::error::{LSystemError, Result};
use crate::jitter::{JitterSource, jitter};
use crate::surface::Surface;
use crate::turtle::{Action, TurtleState};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for turtle interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Degrees added to the pending turn by a left turn.
    pub left_angle: f64,
    /// Degrees subtracted from the pending turn by a right turn.
    pub right_angle: f64,
    /// Fractional jitter applied to every segment length.
    pub rand_unit: f64,
    /// Fractional jitter applied to every turn angle.
    pub rand_angle: f64,
    /// Radius of the arc used to round corners. Zero turns in place.
    pub corner_radius: f64,
    /// Order at which each substitution is wrapped in a fill region. Zero disables filling.
    pub fill_order: i32,
    /// Color set before a fill region opens, keyed by the substituted symbol.
    pub fill_colors: HashMap<char, String>,
    /// Order at which each substitution advances the color cycle. Zero disables cycling.
    pub seq_color_order: i32,
    pub seq_colors: Vec<String>,
    /// Start point, normalized so `(1, 1)` is the viewport size.
    pub start_point: DVec2,
    /// Compass heading in degrees: 0 points up, angles grow clockwise.
    pub start_heading: f64,
    pub default_order: i32,
    pub default_unit: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            left_angle: 0.0,
            right_angle: 0.0,
            rand_unit: 0.0,
            rand_angle: 0.0,
            corner_radius: 0.0,
            fill_order: 0,
            fill_colors: HashMap::new(),
            seq_color_order: 0,
            seq_colors: Vec::new(),
            start_point: DVec2::ZERO,
            start_heading: 0.0,
            default_order: 5,
            default_unit: 5.0,
        }
    }
}

impl DrawConfig {
    /// Sets both turn angles (builder pattern).
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.left_angle = angle;
        self.right_angle = angle;
        self
    }

    /// The start heading converted to surface convention (counter-clockwise from +x).
    pub fn surface_start_heading(&self) -> f64 {
        90.0 - self.start_heading
    }

    /// Whether substitutions at `order` advance the color cycle.
    pub fn cycles_color_at(&self, order: i32) -> bool {
        self.seq_color_order != 0 && !self.seq_colors.is_empty() && order == self.seq_color_order
    }
}

/// An entry in the [`ActionMap`].
///
/// Names that do not parse are kept as written and only fail when their symbol
/// is dispatched, so a bad entry on a symbol that is never reached is harmless.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    Resolved(Action),
    Unknown(String),
}

/// Symbol-to-action table. Symbols without an entry resolve to [`Action::Noop`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionMap {
    map: HashMap<char, Binding>,
}

impl ActionMap {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional table: `A`..`F` draw, `G`..`L` move, `+`/`-` turn, `[`/`]` push/pop.
    pub fn standard() -> Self {
        let mut map = Self::new();
        for sym in 'A'..='F' {
            map.set_action(sym, Action::Draw);
        }
        for sym in 'G'..='L' {
            map.set_action(sym, Action::Move);
        }
        map.set_action('+', Action::TurnLeft);
        map.set_action('-', Action::TurnRight);
        map.set_action('[', Action::Push);
        map.set_action(']', Action::Pop);
        map
    }

    /// Builds a table from action names.
    ///
    /// An empty table yields [`ActionMap::standard`]. Unknown names are stored
    /// as [`Binding::Unknown`] and reported by [`resolve`](Self::resolve).
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let mut map = Self::new();
        for (sym, name) in names {
            map.set_name(sym, name);
        }
        if map.map.is_empty() {
            return Self::standard();
        }
        map
    }

    /// Assigns an action to a symbol, replacing any previous one.
    pub fn set_action(&mut self, sym: char, action: Action) {
        self.map.insert(sym, Binding::Resolved(action));
    }

    /// Assigns an action by name, keeping unknown names for dispatch-time failure.
    pub fn set_name(&mut self, sym: char, name: &str) {
        let binding = match name.parse() {
            Ok(action) => Binding::Resolved(action),
            Err(_) => Binding::Unknown(name.to_string()),
        };
        self.map.insert(sym, binding);
    }

    pub fn binding(&self, sym: char) -> Option<&Binding> {
        self.map.get(&sym)
    }

    /// The action for `sym`, [`Action::Noop`] when unmapped.
    ///
    /// Fails with [`LSystemError::UnknownAction`] when `sym` is bound to an unknown name.
    pub fn resolve(&self, sym: char) -> Result<Action> {
        match self.map.get(&sym) {
            Some(Binding::Resolved(action)) => Ok(*action),
            Some(Binding::Unknown(name)) => Err(LSystemError::UnknownAction(name.clone())),
            None => Ok(Action::Noop),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Executes actions against a [`Surface`], owning the turtle state of one render.
pub struct TurtleInterpreter<'a, S: Surface + ?Sized, J: JitterSource + ?Sized> {
    config: &'a DrawConfig,
    surface: &'a mut S,
    jitter: &'a mut J,
    state: TurtleState,
    trace: bool,
}

impl<'a, S: Surface + ?Sized, J: JitterSource + ?Sized> TurtleInterpreter<'a, S, J> {
    /// Creates an interpreter with a fresh turtle mirroring the surface cursor.
    pub fn new(config: &'a DrawConfig, surface: &'a mut S, jitter: &'a mut J) -> Self {
        let state = TurtleState {
            position: surface.position(),
            heading: surface.heading(),
            ..Default::default()
        };
        Self {
            config,
            surface,
            jitter,
            state,
            trace: false,
        }
    }

    /// Emits one `tracing` line per dispatched action (builder pattern).
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn config(&self) -> &DrawConfig {
        self.config
    }

    pub fn state(&self) -> &TurtleState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &*self.surface
    }

    pub fn into_state(self) -> TurtleState {
        self.state
    }

    /// Lifts the pen, jumps to `position` facing `heading`, and lowers the pen.
    pub fn place(&mut self, position: DVec2, heading: f64) {
        self.surface.pen_up();
        self.surface.move_to(position);
        self.surface.set_heading(heading);
        self.surface.pen_down();
        self.sync();
    }

    /// Resolves an action by name and executes it.
    pub fn dispatch_named(&mut self, name: &str, unit: f64) -> Result<()> {
        let action = name.parse()?;
        self.dispatch(action, unit)
    }

    /// Executes a single action with the given base `unit`.
    pub fn dispatch(&mut self, action: Action, unit: f64) -> Result<()> {
        if action == Action::Noop {
            return Ok(());
        }
        if self.trace {
            tracing::info!("action: {action} unit: {unit}");
        }
        tracing::trace!(%action, unit, "dispatch");

        match action {
            Action::Draw => {
                self.flush_turn();
                self.advance(unit);
            }
            Action::Move => {
                self.flush_turn();
                self.surface.pen_up();
                self.advance(unit);
                self.surface.pen_down();
            }
            Action::TurnLeft => {
                self.state.pending_turn +=
                    jitter(&mut *self.jitter, self.config.left_angle, self.config.rand_angle);
            }
            Action::TurnRight => {
                self.state.pending_turn -=
                    jitter(&mut *self.jitter, self.config.right_angle, self.config.rand_angle);
            }
            Action::Push => {
                let snapshot = self.state.snapshot();
                self.state.stack.push(snapshot);
            }
            Action::Pop => {
                let snapshot = self.state.stack.pop().ok_or(LSystemError::EmptyStack)?;
                self.place(snapshot.position, snapshot.heading);
                self.state.pending_turn = snapshot.pending_turn;
            }
            Action::Noop => {}
        }
        Ok(())
    }

    /// Advances the color cycle and applies the new color.
    pub fn cycle_color(&mut self) {
        let config = self.config;
        if let Some(idx) = self.state.next_color(config.seq_colors.len()) {
            self.surface.set_color(&config.seq_colors[idx]);
        }
    }

    /// Opens a fill region, first applying the fill color registered for `sym`.
    pub fn begin_fill(&mut self, sym: char) {
        if let Some(color) = self.config.fill_colors.get(&sym) {
            self.surface.set_color(color);
        }
        self.surface.begin_fill();
    }

    pub fn end_fill(&mut self) {
        self.surface.end_fill();
    }

    /// Moves forward by the jittered unit, shortened to leave room for both corner arcs.
    fn advance(&mut self, unit: f64) {
        let length =
            jitter(&mut *self.jitter, unit, self.config.rand_unit) - 2.0 * self.config.corner_radius;
        self.surface.forward(length);
        self.sync();
        self.state.extend_bounds();
    }

    /// Applies the accumulated turn as one rotation, or one arc when corners are rounded.
    fn flush_turn(&mut self) {
        let turn = self.state.pending_turn;
        let radius = self.config.corner_radius;
        if radius > 0.0 {
            let signed_radius = if turn < 0.0 { -radius } else { radius };
            self.surface.arc(signed_radius, turn.abs());
        } else {
            let heading = self.surface.heading() + turn;
            self.surface.set_heading(heading);
        }
        self.state.pending_turn = 0.0;
        self.sync();
    }

    fn sync(&mut self) {
        self.state.position = self.surface.position();
        self.state.heading = self.surface.heading();
    }
}
