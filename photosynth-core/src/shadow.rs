//! Shadow casting and territory analytics, recomputed for each hypothetical state

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::board::{Hex, DIRECTIONS};
use crate::game::{GameState, Player, Tree};
use crate::rules;

/// Each of the six sun directions holds for one day of the cycle
pub const SHADOW_WEIGHT_PER_DIRECTION: f64 = 1.0 / 6.0;

/// Cells whose 7-cell neighbourhood is analysed for crowding
pub const AREA_CENTERS: [usize; 19] = [11, 10, 9, 12, 3, 2, 8, 13, 4, 0, 1, 7, 14, 5, 6, 18, 15, 16, 17];

/// Shade fraction over the coming 6-day cycle, per tree
pub type ShadowModifiers = FxHashMap<Hex, f64>;

/// Walk the shadow of `caster` along one direction, calling `on_shaded`
/// for every tree it covers. Stops at the edge of the board.
fn cast_ray(
    state: &GameState,
    origin: Hex,
    caster: Tree,
    direction_id: usize,
    mut on_shaded: impl FnMut(Hex),
) {
    for scale in 1..=caster.size as i8 {
        let target = origin.step(direction_id, scale);
        if !state.is_valid_coordinates(target) {
            break;
        }
        match state.tree_at(target) {
            Some(shaded) if shaded.size <= caster.size => on_shaded(target),
            _ => {}
        }
    }
}

/// Trees standing in shadow on `day`
pub fn trees_in_shadow_for_day(state: &GameState, day: u32) -> FxHashSet<Hex> {
    let direction_id = rules::sun_direction(day);
    let mut shadowed = FxHashSet::default();

    for (hex, tree) in state.all_trees() {
        if tree.size == 0 {
            continue;
        }
        cast_ray(state, hex, tree, direction_id, |target| {
            shadowed.insert(target);
        });
    }

    shadowed
}

/// Accumulated shade per tree over all six directions, 1/6 per covering caster
pub fn shadow_modifiers_for_week(state: &GameState) -> ShadowModifiers {
    let mut modifiers = ShadowModifiers::default();

    for (hex, tree) in state.all_trees() {
        if tree.size == 0 {
            continue;
        }
        for direction_id in 0..DIRECTIONS.len() {
            cast_ray(state, hex, tree, direction_id, |target| {
                *modifiers.entry(target).or_insert(0.0) += SHADOW_WEIGHT_PER_DIRECTION;
            });
        }
    }

    modifiers
}

/// Tree/seed counts of one player inside an area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AreaOccupancy {
    pub num_of_trees: usize,
    pub num_of_seeds: usize,
}

impl AreaOccupancy {
    pub fn total(&self) -> usize {
        self.num_of_trees + self.num_of_seeds
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AreaAnalysis {
    pub center_cell: usize,
    pub me: AreaOccupancy,
    pub opponent: AreaOccupancy,
}

/// Occupancy of every area (center cell plus its six neighbours)
pub fn area_analysis(state: &GameState) -> Vec<AreaAnalysis> {
    AREA_CENTERS
        .iter()
        .filter_map(|&center_cell| {
            let center = state.board.cell(center_cell).ok()?;
            let mut analysis = AreaAnalysis {
                center_cell,
                me: AreaOccupancy::default(),
                opponent: AreaOccupancy::default(),
            };

            let cells = std::iter::once(center).chain((0..6).map(|dir| center.neighbor(dir)));
            for hex in cells {
                for (player, occupancy) in [
                    (Player::Me, &mut analysis.me),
                    (Player::Opponent, &mut analysis.opponent),
                ] {
                    if let Some(tree) = state.player(player).trees.get(&hex) {
                        if tree.is_seed() {
                            occupancy.num_of_seeds += 1;
                        } else {
                            occupancy.num_of_trees += 1;
                        }
                    }
                }
            }

            Some(analysis)
        })
        .collect()
}

/// Distinct cells occupied by or adjacent to a player's trees
pub fn influence(state: &GameState, player: Player) -> usize {
    let trees = &state.player(player).trees;
    let mut influenced: FxHashSet<Hex> = trees.keys().copied().collect();

    for hex in trees.keys() {
        for dir in 0..6 {
            let neighbor = hex.neighbor(dir);
            if state.is_valid_coordinates(neighbor) {
                influenced.insert(neighbor);
            }
        }
    }

    influenced.len()
}

/// Trees inside a tree's shadow reach before and after it grows one size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlockedTrees {
    pub mine_before: usize,
    pub mine_after: usize,
    pub opponent_before: usize,
    pub opponent_after: usize,
}

pub fn trees_blocked_after_grow(state: &GameState, origin: Hex, tree: Tree) -> BlockedTrees {
    let mut blocked = BlockedTrees::default();
    if tree.is_seed() {
        return blocked;
    }

    let size_after_grow = tree.size as i8 + 1;
    for direction_id in 0..6 {
        for scale in 1..=size_after_grow {
            let target = origin.step(direction_id, scale);
            let already_reached = scale != size_after_grow;
            if state.me.trees.contains_key(&target) {
                blocked.mine_after += 1;
                if already_reached {
                    blocked.mine_before += 1;
                }
            }
            if state.opponent.trees.contains_key(&target) {
                blocked.opponent_after += 1;
                if already_reached {
                    blocked.opponent_before += 1;
                }
            }
        }
    }

    blocked
}

/// Everything the utility calculators need about one hypothetical state
#[derive(Clone, Debug)]
pub struct Analytics {
    pub shadow_modifiers: ShadowModifiers,
    pub areas: Vec<AreaAnalysis>,
    pub my_influence: usize,
    pub opponent_influence: usize,
}

impl Analytics {
    pub fn compute(state: &GameState) -> Self {
        Self {
            shadow_modifiers: shadow_modifiers_for_week(state),
            areas: area_analysis(state),
            my_influence: influence(state, Player::Me),
            opponent_influence: influence(state, Player::Opponent),
        }
    }

    pub fn shadow_modifier(&self, hex: Hex) -> f64 {
        self.shadow_modifiers.get(&hex).copied().unwrap_or(0.0)
    }
}
