//! Depth-first expansion of a [`Grammar`] into turtle actions.
//!
//! Unlike a parallel rewriter, [`LSystem::expand`] never materializes the derived
//! string: each symbol is rewritten recursively and terminal symbols are handed to
//! the [`TurtleInterpreter`] the moment they are reached. This lets substitutions
//! at a chosen order open fill regions or advance a color cycle around exactly
//! the geometry they produce.

use crate::config::{LSystemConfig, symbol_entries};
use crate::error::Result;
use crate::grammar::Grammar;
use crate::interpreter::{ActionMap, DrawConfig, TurtleInterpreter};
use crate::jitter::JitterSource;
use crate::surface::Surface;
use crate::turtle::{Action, TurtleState};

/// A grammar bound to its action table and drawing configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct LSystem {
    grammar: Grammar,
    actions: ActionMap,
    config: DrawConfig,
    trace: bool,
}

impl LSystem {
    pub fn new(grammar: Grammar, actions: ActionMap, config: DrawConfig) -> Self {
        Self {
            grammar,
            actions,
            config,
            trace: false,
        }
    }

    /// Builds an L-System from a parsed configuration record.
    pub fn from_config(config: LSystemConfig) -> Result<Self> {
        config.validate()?;
        let actions = if config.actions.is_empty() {
            ActionMap::standard()
        } else {
            let mut actions = ActionMap::new();
            for (sym, name) in symbol_entries("actions", &config.actions) {
                actions.set_name(sym, name);
            }
            actions
        };
        let mut grammar = Grammar::new(config.axiom.as_str());
        for (sym, replacement) in symbol_entries("rules", &config.rules) {
            grammar.set_rule(sym, replacement);
        }
        let trace = config.trace;
        Ok(Self::new(grammar, actions, config.into_draw_config()).with_trace(trace))
    }

    /// Parses a JSON configuration record and builds the L-System.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_config(LSystemConfig::from_json(json)?)
    }

    /// Logs every rule expansion and dispatched action at `info` level (builder pattern).
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn actions(&self) -> &ActionMap {
        &self.actions
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Draws the axiom on `surface` using the thread-local random generator for jitter.
    ///
    /// `None` or zero for `order` or `unit` selects the configured default; an
    /// explicit zero cannot be requested.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        order: Option<i32>,
        unit: Option<f64>,
    ) -> Result<()> {
        let mut rng = rand::thread_rng();
        self.render_with(surface, &mut rng, order, unit).map(|_| ())
    }

    /// Draws the axiom on `surface` with an injected jitter source.
    ///
    /// The turtle is placed at `viewport * start_point` facing the configured start
    /// heading before expansion begins. Returns the final turtle state.
    pub fn render_with<S, J>(
        &self,
        surface: &mut S,
        jitter: &mut J,
        order: Option<i32>,
        unit: Option<f64>,
    ) -> Result<TurtleState>
    where
        S: Surface + ?Sized,
        J: JitterSource + ?Sized,
    {
        let order = order.filter(|&o| o != 0).unwrap_or(self.config.default_order);
        let unit = unit.filter(|&u| u != 0.0).unwrap_or(self.config.default_unit);
        tracing::debug!(order, unit, axiom = %self.grammar.axiom, "render started");

        let start = surface.viewport() * self.config.start_point;
        let mut turtle =
            TurtleInterpreter::new(&self.config, surface, jitter).with_trace(self.trace);
        turtle.place(start, self.config.surface_start_heading());
        self.expand(&mut turtle, &self.grammar.axiom, order, unit)?;

        let state = turtle.into_state();
        tracing::debug!(position = ?state.position, heading = state.heading, "render finished");
        Ok(state)
    }

    /// Expands `sequence` at `order`, dispatching terminal symbols to `turtle`.
    ///
    /// A symbol is rewritten when `order > 0` and it has a rule; otherwise its action
    /// (default [`Action::Noop`]) runs with `unit`. Negative orders behave like zero.
    /// The first failing action, including a symbol bound to an unknown action name,
    /// aborts the whole expansion and leaves earlier drawing on the surface.
    pub fn expand<S, J>(
        &self,
        turtle: &mut TurtleInterpreter<'_, S, J>,
        sequence: &str,
        order: i32,
        unit: f64,
    ) -> Result<()>
    where
        S: Surface + ?Sized,
        J: JitterSource + ?Sized,
    {
        for sym in sequence.chars() {
            match self.grammar.rule(sym) {
                Some(replacement) if order > 0 => {
                    if self.config.cycles_color_at(order) {
                        turtle.cycle_color();
                    }
                    if self.trace {
                        tracing::info!("order #{order}: {sym} -> {replacement}");
                    }

                    let fill = order == self.config.fill_order;
                    if fill {
                        turtle.begin_fill(sym);
                    }
                    self.expand(turtle, replacement, order - 1, unit)?;
                    if fill {
                        turtle.end_fill();
                    }
                }
                _ => {
                    let action = self.actions.resolve(sym)?;
                    if self.trace && action != Action::Noop {
                        tracing::info!("order #{order}: {sym} -> [{action}]");
                    }
                    turtle.dispatch(action, unit)?;
                }
            }
        }
        Ok(())
    }
}
