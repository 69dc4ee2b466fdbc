//! Photosynth Core - decision engine for the Photosynthesis board game
//!
//! This crate provides everything needed to pick one move per turn:
//! - Board geometry (hex grid with axial coordinates, protocol cell ids)
//! - Game state, rules tables and the one-step action simulator
//! - Shadow, territory and score analytics for hypothetical states
//! - Utility calculators and the group-ordered move selector

pub mod board;
pub mod rules;
pub mod game;
pub mod actions;
pub mod shadow;
pub mod curves;
pub mod eval;
pub mod utility;
pub mod ai;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Hex, Cube, DIRECTIONS, SUPPORTED_NUM_CELLS};
pub use game::{Board, GameState, Player, PlayerState, Tree, TurnStats};
pub use actions::{Action, ActionKind};
pub use shadow::Analytics;
pub use eval::{Evaluation, PlayerEvaluation};
pub use ai::{ScoredAction, UtilityAgent};
pub use config::{Heuristics, HeuristicsLoadError};
pub use error::{AgentError, ConfigError, GeometryError, ParseActionError, RulesError, SimulationError};
