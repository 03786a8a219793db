//! # lsystem-turtle
//!
//! Expands L-System grammars depth-first and interprets the terminal symbols as
//! 2D turtle-graphics commands.
//!
//! Consecutive turns are batched into a single rotation applied at the next forward
//! motion, which lets corners be rendered as arcs of a fixed radius. Segment lengths
//! and angles can be jittered through an injectable [`JitterSource`], and chosen
//! expansion orders can wrap their output in fill regions or advance a color cycle.
//!
//! Drawing goes through the [`Surface`] trait; [`Canvas`] is an in-memory
//! implementation that records geometry.

pub mod config;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod jitter;
pub mod lsystem;
pub mod surface;
pub mod turtle;

pub use config::*;
pub use error::LSystemError;
pub use grammar::*;
pub use interpreter::*;
pub use jitter::*;
pub use lsystem::*;
pub use surface::*;
pub use turtle::*;
