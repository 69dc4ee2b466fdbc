//! Moves and the one-step action simulator

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseActionError, SimulationError};
use crate::game::{GameState, Tree};
use crate::rules::{self, HARVESTABLE_TREE_SIZE, HARVEST_TREE_SUN_COST, SEED_SIZE};

/// Action type, in the order the selector considers groups
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Wait,
    Complete,
    Grow,
    Seed,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Wait => "WAIT",
            ActionKind::Complete => "COMPLETE",
            ActionKind::Grow => "GROW",
            ActionKind::Seed => "SEED",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A move, addressed by protocol cell ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Wait,
    Complete { cell: usize },
    Grow { cell: usize },
    Seed { source: usize, target: usize },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Wait => ActionKind::Wait,
            Action::Complete { .. } => ActionKind::Complete,
            Action::Grow { .. } => ActionKind::Grow,
            Action::Seed { .. } => ActionKind::Seed,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Complete { cell } => write!(f, "COMPLETE {}", cell),
            Action::Grow { cell } => write!(f, "GROW {}", cell),
            Action::Seed { source, target } => write!(f, "SEED {} {}", source, target),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = input.split_whitespace();
        let kind = match tokens.next() {
            Some("WAIT") => ActionKind::Wait,
            Some("COMPLETE") => ActionKind::Complete,
            Some("GROW") => ActionKind::Grow,
            Some("SEED") => ActionKind::Seed,
            Some(other) => return Err(ParseActionError::UnknownAction(other.to_string())),
            None => return Err(ParseActionError::Empty),
        };

        let mut next_cell = || -> Result<usize, ParseActionError> {
            let token = tokens.next().ok_or(ParseActionError::MissingCell(kind))?;
            token
                .parse()
                .map_err(|_| ParseActionError::InvalidCell(token.to_string()))
        };

        let action = match kind {
            ActionKind::Wait => Action::Wait,
            ActionKind::Complete => Action::Complete { cell: next_cell()? },
            ActionKind::Grow => Action::Grow { cell: next_cell()? },
            ActionKind::Seed => {
                let source = next_cell()?;
                let target = next_cell()?;
                Action::Seed { source, target }
            }
        };

        let rest: Vec<&str> = tokens.collect();
        if !rest.is_empty() {
            return Err(ParseActionError::TrailingInput(rest.join(" ")));
        }
        Ok(action)
    }
}

// ============================================================================
// LEGALITY
// ============================================================================

/// Sun needed to grow one of our trees one step
pub fn tree_grow_cost(state: &GameState, tree: &Tree) -> Result<i32, SimulationError> {
    let target_size = tree.size + 1;
    Ok(rules::grow_cost(target_size, state.num_trees_of_size(target_size))?)
}

pub fn is_harvestable(state: &GameState, tree: &Tree) -> bool {
    state.me.sun >= HARVEST_TREE_SUN_COST && tree.size == HARVESTABLE_TREE_SIZE && !tree.is_dormant
}

pub fn is_growable(state: &GameState, tree: &Tree) -> bool {
    if tree.size >= HARVESTABLE_TREE_SIZE || tree.is_dormant {
        return false;
    }
    tree_grow_cost(state, tree).map_or(false, |cost| cost <= state.me.sun)
}

/// Local re-check of a move the referee claims is legal
pub fn looks_legal(state: &GameState, action: &Action) -> bool {
    match *action {
        Action::Wait => true,
        Action::Complete { cell } => matches!(
            state.my_tree_at_cell(cell),
            Ok(Some(tree)) if is_harvestable(state, &tree)
        ),
        Action::Grow { cell } => matches!(
            state.my_tree_at_cell(cell),
            Ok(Some(tree)) if is_growable(state, &tree)
        ),
        Action::Seed { source, target } => {
            let source_ok = matches!(
                state.my_tree_at_cell(source),
                Ok(Some(tree)) if tree.size > SEED_SIZE && !tree.is_dormant
            );
            let target_free = state
                .board
                .cell(target)
                .map_or(false, |hex| state.tree_at(hex).is_none());
            source_ok && target_free
        }
    }
}

// ============================================================================
// SIMULATION
// ============================================================================

impl GameState {
    /// Hypothetical state after we play `action`. Every action advances the day by one.
    pub fn apply_action(&self, action: &Action) -> Result<GameState, SimulationError> {
        let mut next = self.clone();
        next.apply_action_in_place(action)?;
        Ok(next)
    }

    pub fn apply_action_in_place(&mut self, action: &Action) -> Result<(), SimulationError> {
        self.day += 1;
        match *action {
            Action::Wait => Ok(()),
            Action::Complete { cell } => self.apply_harvest(cell),
            Action::Grow { cell } => self.apply_grow(cell),
            Action::Seed { source, target } => self.apply_seed(source, target),
        }
    }

    fn apply_harvest(&mut self, cell: usize) -> Result<(), SimulationError> {
        let hex = self.board.cell(cell)?;
        if !self.me.trees.contains_key(&hex) {
            return Err(SimulationError::NoTreeAt(cell));
        }
        let harvest_score = rules::harvest_score(self.nutrients, self.board.richness_at(hex))?;
        self.me.score += harvest_score;
        self.me.trees.remove(&hex);
        Ok(())
    }

    fn apply_grow(&mut self, cell: usize) -> Result<(), SimulationError> {
        let hex = self.board.cell(cell)?;
        let tree = *self.me.trees.get(&hex).ok_or(SimulationError::NoTreeAt(cell))?;
        let cost = tree_grow_cost(self, &tree)?;

        self.me.sun -= cost;
        if let Some(tree) = self.me.trees.get_mut(&hex) {
            tree.size += 1;
            tree.is_dormant = true;
        }
        Ok(())
    }

    fn apply_seed(&mut self, source: usize, target: usize) -> Result<(), SimulationError> {
        let source_hex = self.board.cell(source)?;
        let target_hex = self.board.cell(target)?;
        let cost = rules::seed_cost(self.num_trees_of_size(SEED_SIZE));

        let source_tree = self
            .me
            .trees
            .get_mut(&source_hex)
            .ok_or(SimulationError::NoTreeAt(source))?;
        source_tree.is_dormant = true;

        self.me.trees.insert(target_hex, Tree::new(SEED_SIZE, true));
        self.me.sun -= cost;
        Ok(())
    }
}
