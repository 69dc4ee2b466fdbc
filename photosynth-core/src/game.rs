//! Game state: board richness, trees and per-player counters

use crate::board::{map_radius, spiral_cells, Hex};
use crate::error::GeometryError;
use crate::rules;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Which side of the table a tree or counter belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Me,
    Opponent,
}

/// A tree on the board. Size 0 is a seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub size: u8,
    pub is_dormant: bool,
}

impl Tree {
    pub fn new(size: u8, is_dormant: bool) -> Self {
        Self { size, is_dormant }
    }

    pub fn is_seed(&self) -> bool {
        self.size == rules::SEED_SIZE
    }
}

/// Trees keyed by their cell
pub type TreeMap = FxHashMap<Hex, Tree>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub sun: i32,
    pub score: i32,
    pub trees: TreeMap,
    /// Only meaningful for the opponent: asleep until the next day
    pub is_waiting: bool,
}

impl PlayerState {
    /// Trees in a fixed order (by cell), for accumulations that must not
    /// depend on hash-map iteration order
    pub fn sorted_trees(&self) -> Vec<(Hex, Tree)> {
        let mut trees: Vec<(Hex, Tree)> = self.trees.iter().map(|(h, t)| (*h, *t)).collect();
        trees.sort_unstable_by_key(|(hex, _)| *hex);
        trees
    }

    pub fn num_trees_of_size(&self, size: u8) -> usize {
        self.trees.values().filter(|tree| tree.size == size).count()
    }
}

/// Scalar fields refreshed from the input at the start of every turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub day: u32,
    pub nutrients: i32,
    pub my_sun: i32,
    pub my_score: i32,
    pub opp_sun: i32,
    pub opp_score: i32,
    pub opp_is_waiting: bool,
}

// ============================================================================
// BOARD
// ============================================================================

/// Richness grid plus the protocol cell-id table
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    num_cells: usize,
    width: i8,
    height: i8,
    /// cell id -> hex, built by the spiral walk
    cells: Vec<Hex>,
    /// richness[r][q], None outside the playable hexagon
    richness: Vec<Vec<Option<u8>>>,
}

impl Board {
    pub fn new(num_cells: usize) -> Result<Self, GeometryError> {
        let radius = map_radius(num_cells)?;
        let width = 2 * radius + 1;
        let height = 2 * radius + 1;

        Ok(Self {
            num_cells,
            width,
            height,
            cells: spiral_cells(radius),
            richness: vec![vec![None; width as usize]; height as usize],
        })
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    pub fn width(&self) -> i8 {
        self.width
    }

    pub fn height(&self) -> i8 {
        self.height
    }

    /// The cell id -> hex table
    pub fn cells(&self) -> &[Hex] {
        &self.cells
    }

    pub fn cell(&self, cell_id: usize) -> Result<Hex, GeometryError> {
        self.cells
            .get(cell_id)
            .copied()
            .ok_or(GeometryError::UnknownCell(cell_id))
    }

    /// Reverse lookup from a hex to its protocol cell id
    pub fn cell_id(&self, hex: Hex) -> Option<usize> {
        self.cells.iter().position(|&cell| cell == hex)
    }

    pub fn set_richness(&mut self, cell_id: usize, richness: u8) -> Result<(), GeometryError> {
        let hex = self.cell(cell_id)?;
        self.richness[hex.r as usize][hex.q as usize] = Some(richness);
        Ok(())
    }

    fn in_bounds(&self, hex: Hex) -> bool {
        hex.q >= 0 && hex.r >= 0 && hex.q < self.width && hex.r < self.height
    }

    pub fn richness_at(&self, hex: Hex) -> Option<u8> {
        if !self.in_bounds(hex) {
            return None;
        }
        self.richness[hex.r as usize][hex.q as usize]
    }

    /// Inside the bounding rectangle and part of the playable hexagon
    pub fn is_valid(&self, hex: Hex) -> bool {
        self.richness_at(hex).is_some()
    }

    /// Cells that can hold a tree (non-zero richness)
    pub fn num_usable_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&hex| self.richness_at(hex).unwrap_or(0) != 0)
            .count()
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full observable game state (clone to mutate)
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub day: u32,
    pub nutrients: i32,
    pub board: Board,
    pub me: PlayerState,
    pub opponent: PlayerState,
}

impl GameState {
    /// Empty state for a board of `num_cells` cells, no richness set yet
    pub fn create_empty(num_cells: usize) -> Result<Self, GeometryError> {
        Ok(Self {
            day: 0,
            nutrients: 0,
            board: Board::new(num_cells)?,
            me: PlayerState::default(),
            opponent: PlayerState::default(),
        })
    }

    pub fn set_richness(&mut self, cell_id: usize, richness: u8) -> Result<(), GeometryError> {
        self.board.set_richness(cell_id, richness)
    }

    pub fn set_stats_for_turn(&mut self, stats: TurnStats) {
        self.day = stats.day;
        self.nutrients = stats.nutrients;
        self.me.sun = stats.my_sun;
        self.me.score = stats.my_score;
        self.opponent.sun = stats.opp_sun;
        self.opponent.score = stats.opp_score;
        self.opponent.is_waiting = stats.opp_is_waiting;
    }

    /// Clear everything the next turn's input will provide again
    pub fn reset_for_turn(&mut self) {
        self.day = 0;
        self.nutrients = 0;
        self.me = PlayerState::default();
        self.opponent = PlayerState::default();
    }

    pub fn set_tree(
        &mut self,
        cell_id: usize,
        size: u8,
        is_mine: bool,
        is_dormant: bool,
    ) -> Result<(), GeometryError> {
        let hex = self.board.cell(cell_id)?;
        let owner = if is_mine { Player::Me } else { Player::Opponent };
        self.player_mut(owner).trees.insert(hex, Tree::new(size, is_dormant));
        Ok(())
    }

    pub fn is_valid_coordinates(&self, hex: Hex) -> bool {
        self.board.is_valid(hex)
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        match player {
            Player::Me => &self.me,
            Player::Opponent => &self.opponent,
        }
    }

    pub fn player_mut(&mut self, player: Player) -> &mut PlayerState {
        match player {
            Player::Me => &mut self.me,
            Player::Opponent => &mut self.opponent,
        }
    }

    /// Count of our own trees at `size`
    pub fn num_trees_of_size(&self, size: u8) -> usize {
        self.me.num_trees_of_size(size)
    }

    /// Our tree at a protocol cell id, if any
    pub fn my_tree_at_cell(&self, cell_id: usize) -> Result<Option<Tree>, GeometryError> {
        let hex = self.board.cell(cell_id)?;
        Ok(self.me.trees.get(&hex).copied())
    }

    /// Tree of either player on a cell
    pub fn tree_at(&self, hex: Hex) -> Option<Tree> {
        self.me
            .trees
            .get(&hex)
            .or_else(|| self.opponent.trees.get(&hex))
            .copied()
    }

    /// Both players' trees, ours first, each side sorted by cell
    pub fn all_trees(&self) -> Vec<(Hex, Tree)> {
        let mut trees = self.me.sorted_trees();
        trees.extend(self.opponent.sorted_trees());
        trees
    }

    pub fn days_left(&self) -> u32 {
        rules::days_left(self.day)
    }
}
