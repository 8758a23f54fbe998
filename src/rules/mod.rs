//! Game rules.
//!
//! `Engine` is the entry point: `init` builds a game, `execute` applies one
//! action and returns the next state. The engine never interprets wire
//! formats or storage; callers hand it values and get values back.
//!
//! - `compiler`: payload shape checks run before any rule
//! - `phase`: which handler a state dispatches to
//! - `phases`: one handler per phase, plus the game-wide actions

pub mod compiler;
pub mod engine;
pub mod phase;
mod phases;

pub use compiler::{ActionCompiler, DefaultActionCompiler};
pub use engine::Engine;
pub use phase::PhaseKind;
