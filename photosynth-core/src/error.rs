//! Error types for the decision engine

use thiserror::Error;

use crate::actions::ActionKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("unsupported board size: {num_cells} cells (only 37 is supported)")]
    UnsupportedBoardSize { num_cells: usize },
    #[error("invalid hex key: {0:?}")]
    InvalidKey(String),
    #[error("cell {0} is not on the board")]
    UnknownCell(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no harvest bonus for richness {0:?}")]
    InvalidRichness(Option<u8>),
    #[error("no grow cost for target size {0}")]
    InvalidGrowTarget(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseActionError {
    #[error("empty move string")]
    Empty,
    #[error("unknown action type: {0:?}")]
    UnknownAction(String),
    #[error("missing cell id for {0}")]
    MissingCell(ActionKind),
    #[error("invalid cell id: {0:?}")]
    InvalidCell(String),
    #[error("unexpected trailing input: {0:?}")]
    TrailingInput(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("no tree of ours at cell {0}")]
    NoTreeAt(usize),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pacing exponent must be at least 1, got {0}")]
    ExponentBelowOne(f64),
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("projection discount must lie in (0, 1], got {0}")]
    DiscountOutOfRange(f64),
    #[error("seed window is empty: earliest day {earliest_day} with {min_days_left} days left required")]
    EmptySeedWindow { earliest_day: u32, min_days_left: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("cannot parse legal move {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseActionError,
    },
    #[error("simulating {action} failed: {source}")]
    Simulation {
        action: String,
        #[source]
        source: SimulationError,
    },
}
