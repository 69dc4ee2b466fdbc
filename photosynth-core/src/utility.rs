//! Utility calculators
//!
//! Each calculator maps a hypothetical state (plus the analytics computed for
//! it) to a scalar, normally in `[0, 1]`. Hard gates return
//! [`IMPOSSIBLE`] to push a move to the bottom of the ranking.

use crate::actions::Action;
use crate::config::Heuristics;
use crate::curves::{
    average, normalized_exponential, normalized_linear, normalized_linear_decay, normalized_pyramid,
    ratio_or_neutral, NEUTRAL,
};
use crate::eval::{average_sun_production, Evaluation};
use crate::game::{GameState, Player};
use crate::rules::{self, HARVESTABLE_TREE_SIZE, HARVEST_TREE_SUN_COST, MAX_NUM_OF_DAYS, SEED_SIZE};
use crate::shadow::{trees_blocked_after_grow, trees_in_shadow_for_day, AreaAnalysis, Analytics, ShadowModifiers};

/// Sentinel for "this move must not be chosen now"
pub const IMPOSSIBLE: f64 = f64::NEG_INFINITY;

/// Highest possible richness times highest tree size
const MAX_RICHNESS_WEIGHTED_SIZE: f64 = 9.0;

/// Named utility values for one candidate, kept for logging
pub type Utilities = Vec<(&'static str, f64)>;

/// A candidate move together with the state it leads to
pub struct Hypothesis<'a> {
    pub before: &'a GameState,
    pub after: &'a GameState,
    pub action: &'a Action,
    pub analytics: &'a Analytics,
    pub evaluation: &'a Evaluation,
    pub heuristics: &'a Heuristics,
}

/// Mean of the named utilities; any gate at `IMPOSSIBLE` sinks the whole move
pub fn combine(utilities: &Utilities) -> f64 {
    let values: Vec<f64> = utilities.iter().map(|(_, value)| *value).collect();
    average(&values)
}

// ============================================================================
// SCORE PROJECTION
// ============================================================================

/// Forecast of a player's final score.
///
/// Future production is discounted, then spent on harvesting the player's
/// size-3 trees richest first. Each harvest is worth the nutrient pool
/// (shrinking with every harvest) plus the cell's richness bonus. Leftover
/// sun converts to points at the end.
pub fn projected_final_score(
    state: &GameState,
    player: Player,
    modifiers: &ShadowModifiers,
    heuristics: &Heuristics,
) -> f64 {
    let production = average_sun_production(state, player, modifiers);
    let mut sun = production * state.days_left() as f64 * heuristics.projection_discount;
    let mut score = state.player(player).score as f64;

    let mut harvestable: Vec<_> = state
        .player(player)
        .sorted_trees()
        .into_iter()
        .filter(|(_, tree)| tree.size == HARVESTABLE_TREE_SIZE)
        .map(|(hex, _)| {
            let bonus = rules::richness_bonus(state.board.richness_at(hex)).unwrap_or(0);
            (bonus, hex)
        })
        .collect();
    // richest first, cell order breaks ties
    harvestable.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut nutrients_modifier = 0.0;
    for (bonus, _) in harvestable {
        if sun < HARVEST_TREE_SUN_COST as f64 {
            break;
        }
        sun -= HARVEST_TREE_SUN_COST as f64;
        let nutrients = (state.nutrients as f64 + nutrients_modifier).max(0.0);
        score += nutrients + bonus as f64;
        nutrients_modifier -= heuristics.nutrient_decay_per_harvest;
    }

    (score + sun / heuristics.sun_per_point).max(0.0)
}

/// Own projected score as a share of both players' projections
pub fn relative_projected_score_utility(
    state: &GameState,
    modifiers: &ShadowModifiers,
    heuristics: &Heuristics,
) -> f64 {
    let mine = projected_final_score(state, Player::Me, modifiers, heuristics);
    let theirs = projected_final_score(state, Player::Opponent, modifiers, heuristics);
    ratio_or_neutral(mine, theirs)
}

// ============================================================================
// PRODUCTION
// ============================================================================

/// Own daily production against the target ceiling
pub fn sun_production_utility(evaluation: &Evaluation, heuristics: &Heuristics) -> f64 {
    normalized_linear(
        evaluation.me.average_sun_production_per_day,
        heuristics.production_target,
        1.0,
    )
    .clamp(0.0, 1.0)
}

/// Share of total production, fading out as the game ends
pub fn relative_production_utility(state: &GameState, evaluation: &Evaluation, heuristics: &Heuristics) -> f64 {
    let share = ratio_or_neutral(
        evaluation.me.average_sun_production_per_day.max(0.0),
        evaluation.opponent.average_sun_production_per_day.max(0.0),
    );
    share * late_game_decay(state.day, heuristics)
}

/// Share of the sun both players collect over the next `days`, simulating the
/// sun direction day by day
pub fn relative_sun_for_next_days(state: &GameState, days: u32) -> f64 {
    let days_ahead = days.min(state.days_left());
    if days_ahead == 0 {
        return 0.0;
    }

    let mut mine = 0u32;
    let mut theirs = 0u32;
    for offset in 1..=days_ahead {
        let shadowed = trees_in_shadow_for_day(state, state.day + offset);
        for (hex, tree) in &state.me.trees {
            if !shadowed.contains(hex) {
                mine += tree.size as u32;
            }
        }
        for (hex, tree) in &state.opponent.trees {
            if !shadowed.contains(hex) {
                theirs += tree.size as u32;
            }
        }
    }

    ratio_or_neutral(mine as f64, theirs as f64)
}

// ============================================================================
// GROWING
// ============================================================================

/// Gate: growing is pointless once the game is about to end, unless a
/// harvest is still worth it
pub fn stop_growing_at_end_utility(state: &GameState, heuristics: &Heuristics) -> f64 {
    let days_left = state.days_left();
    if days_left <= 1 {
        return IMPOSSIBLE;
    }
    if days_left >= heuristics.grow_min_days_left {
        return 1.0;
    }
    let has_harvestable = state.me.trees.values().any(|tree| tree.size == HARVESTABLE_TREE_SIZE);
    if state.nutrients > heuristics.grow_late_min_nutrients && has_harvestable {
        1.0
    } else {
        IMPOSSIBLE
    }
}

/// Late in the game, prefer big trees standing on rich soil. The day weight
/// rises linearly over the whole game.
pub fn prefer_rich_soil_utility(state: &GameState) -> f64 {
    let trees = state.me.sorted_trees();
    if trees.is_empty() {
        return 0.0;
    }
    let total: f64 = trees
        .iter()
        .map(|(hex, tree)| state.board.richness_at(*hex).unwrap_or(0) as f64 * tree.size as f64)
        .sum();
    let average_richness = total / trees.len() as f64;
    normalized_linear(state.day as f64, MAX_NUM_OF_DAYS as f64, 1.0).min(1.0)
        * 0.5
        * normalized_linear(average_richness, MAX_RICHNESS_WEIGHTED_SIZE, 1.0)
}

/// Share of newly shaded trees that belong to the opponent
pub fn block_opponent_utility(before: &GameState, action: &Action) -> f64 {
    let Action::Grow { cell } = *action else {
        return NEUTRAL;
    };
    let Ok(hex) = before.board.cell(cell) else {
        return NEUTRAL;
    };
    let Some(tree) = before.me.trees.get(&hex) else {
        return NEUTRAL;
    };
    let blocked = trees_blocked_after_grow(before, hex, *tree);
    ratio_or_neutral(
        (blocked.opponent_after - blocked.opponent_before) as f64,
        (blocked.mine_after - blocked.mine_before) as f64,
    )
}

// ============================================================================
// SEEDING AND TERRITORY
// ============================================================================

/// Gate: no seeding too early, nor when a seed can no longer grow up in time
pub fn seed_window_utility(state: &GameState, heuristics: &Heuristics) -> f64 {
    if state.day < heuristics.seed_earliest_day || state.days_left() < heuristics.seed_min_days_left {
        IMPOSSIBLE
    } else {
        1.0
    }
}

/// Own trees against all usable cells
pub fn map_cells_controlled_utility(state: &GameState) -> f64 {
    normalized_linear(
        state.me.trees.len() as f64,
        state.board.num_usable_cells() as f64,
        1.0,
    )
}

/// Territorial footprint, weighted to matter most mid-game
pub fn influence_utility(state: &GameState, analytics: &Analytics) -> f64 {
    let footprint = normalized_linear(
        analytics.my_influence as f64,
        state.board.num_usable_cells() as f64,
        1.0,
    )
    .min(1.0);
    footprint * normalized_pyramid(state.day as f64, MAX_NUM_OF_DAYS as f64)
}

/// Penalize high average occupancy in areas we already use
pub fn avoid_crowding_utility(areas: &[AreaAnalysis], heuristics: &Heuristics) -> f64 {
    let occupied: Vec<f64> = areas
        .iter()
        .map(|area| area.me.total())
        .filter(|&total| total > 0)
        .map(|total| total as f64)
        .collect();
    if occupied.is_empty() {
        return 1.0;
    }
    1.0 - normalized_linear(average(&occupied), heuristics.area_size as f64, 1.0).min(1.0)
}

/// Penalize own trees lined up where they can shade each other
pub fn avoid_self_shading_utility(state: &GameState) -> f64 {
    let num_of_trees = state.me.trees.len();
    if num_of_trees <= 1 {
        return 1.0;
    }
    let max_shadows = (num_of_trees * (num_of_trees - 1)) as f64;

    let mut shaded = 0usize;
    for hex in state.me.trees.keys() {
        for direction_id in 0..6 {
            for scale in 1..=HARVESTABLE_TREE_SIZE as i8 {
                let target = hex.step(direction_id, scale);
                if !state.is_valid_coordinates(target) {
                    break;
                }
                if state.me.trees.contains_key(&target) {
                    shaded += 1;
                }
            }
        }
    }

    normalized_linear_decay(shaded as f64, max_shadows, 1.0)
}

/// Penalize holding more unplanted seeds than we can grow
pub fn avoid_seed_spam_utility(state: &GameState, heuristics: &Heuristics) -> f64 {
    let num_of_seeds = state.num_trees_of_size(SEED_SIZE);
    if num_of_seeds == 0 {
        return NEUTRAL;
    }
    normalized_linear_decay(
        num_of_seeds.min(heuristics.max_seeds) as f64,
        heuristics.max_seeds as f64,
        1.0,
    )
}

/// Prefer seeds that will stand in the light
pub fn avoid_seeds_in_shade_utility(state: &GameState, analytics: &Analytics) -> f64 {
    let light: Vec<f64> = state
        .me
        .sorted_trees()
        .into_iter()
        .filter(|(_, tree)| tree.is_seed())
        .map(|(hex, _)| (1.0 - analytics.shadow_modifier(hex)).max(0.0))
        .collect();
    if light.is_empty() {
        return NEUTRAL;
    }
    average(&light)
}

fn late_game_decay(day: u32, heuristics: &Heuristics) -> f64 {
    1.0 - normalized_exponential(day as f64, MAX_NUM_OF_DAYS as f64, heuristics.pacing_exponent).min(1.0)
}

// ============================================================================
// PER-GROUP SCORING
// ============================================================================

/// Harvest group: only the projected score race matters
pub fn complete_utilities(hypothesis: &Hypothesis) -> Utilities {
    vec![(
        "relative_projected_score",
        relative_projected_score_utility(
            hypothesis.after,
            &hypothesis.analytics.shadow_modifiers,
            hypothesis.heuristics,
        ),
    )]
}

pub fn grow_utilities(hypothesis: &Hypothesis) -> Utilities {
    let Hypothesis {
        before,
        after,
        action,
        evaluation,
        heuristics,
        ..
    } = *hypothesis;
    vec![
        ("sun_production", sun_production_utility(evaluation, heuristics)),
        ("relative_production", relative_production_utility(after, evaluation, heuristics)),
        (
            "relative_sun_next_cycle",
            relative_sun_for_next_days(after, heuristics.lookahead_days),
        ),
        ("stop_growing_at_end", stop_growing_at_end_utility(after, heuristics)),
        ("prefer_rich_soil", prefer_rich_soil_utility(after)),
        ("block_opponent", block_opponent_utility(before, action)),
    ]
}

pub fn seed_utilities(hypothesis: &Hypothesis) -> Utilities {
    let Hypothesis {
        after,
        analytics,
        heuristics,
        ..
    } = *hypothesis;
    vec![
        ("seed_window", seed_window_utility(after, heuristics)),
        ("map_cells_controlled", map_cells_controlled_utility(after)),
        ("influence", influence_utility(after, analytics)),
        ("avoid_crowding", avoid_crowding_utility(&analytics.areas, heuristics)),
        ("avoid_self_shading", avoid_self_shading_utility(after)),
        ("avoid_seed_spam", avoid_seed_spam_utility(after, heuristics)),
        ("avoid_seeds_in_shade", avoid_seeds_in_shade_utility(after, analytics)),
    ]
}
