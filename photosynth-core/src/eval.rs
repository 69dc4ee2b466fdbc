//! State evaluation: production, territory and score forecasts for both players

use serde::Serialize;

use crate::config::Heuristics;
use crate::game::{GameState, Player};
use crate::shadow::{Analytics, ShadowModifiers};

/// Derived statistics for one player in a hypothetical state
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlayerEvaluation {
    /// Sum of tree sizes, each weighted by the share of the cycle it stands in light
    pub average_sun_production_per_day: f64,
    pub total_tree_size: u32,
    pub influence: usize,
    /// Seeds currently planted
    pub num_of_expansions: usize,
    /// Mean light share of those seeds
    pub expansions_average_sunniness_per_day: f64,
    pub num_of_dormant_trees: usize,
    pub score: i32,
    pub sun: i32,
    /// Banked score plus remaining production converted at the sun-per-point
    /// rate. Only forecast for our side; the opponent's stays 0.
    pub projected_final_score: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Evaluation {
    pub me: PlayerEvaluation,
    pub opponent: PlayerEvaluation,
}

/// Expected sun per day for a player's trees under the weekly shade estimate
pub fn average_sun_production(state: &GameState, player: Player, modifiers: &ShadowModifiers) -> f64 {
    state
        .player(player)
        .sorted_trees()
        .into_iter()
        .map(|(hex, tree)| {
            let light = 1.0 - modifiers.get(&hex).copied().unwrap_or(0.0);
            tree.size as f64 * light
        })
        .sum()
}

fn evaluate_player(
    state: &GameState,
    player: Player,
    analytics: &Analytics,
    heuristics: &Heuristics,
) -> PlayerEvaluation {
    let player_state = state.player(player);
    let trees = player_state.sorted_trees();
    let num_of_expansions = trees.iter().filter(|(_, tree)| tree.is_seed()).count();

    let mut evaluation = PlayerEvaluation {
        average_sun_production_per_day: average_sun_production(state, player, &analytics.shadow_modifiers),
        num_of_expansions,
        score: player_state.score,
        sun: player_state.sun,
        influence: match player {
            Player::Me => analytics.my_influence,
            Player::Opponent => analytics.opponent_influence,
        },
        ..Default::default()
    };

    for (hex, tree) in &trees {
        evaluation.total_tree_size += tree.size as u32;
        if tree.is_dormant {
            evaluation.num_of_dormant_trees += 1;
        }
        if tree.is_seed() {
            let light = 1.0 - analytics.shadow_modifier(*hex);
            evaluation.expansions_average_sunniness_per_day += light / num_of_expansions as f64;
        }
    }

    if player == Player::Me {
        let days_left = state.days_left() as f64;
        evaluation.projected_final_score = player_state.score as f64
            + evaluation.average_sun_production_per_day * days_left / heuristics.sun_per_point;
    }

    evaluation
}

impl Evaluation {
    pub fn compute(state: &GameState, analytics: &Analytics, heuristics: &Heuristics) -> Self {
        Self {
            me: evaluate_player(state, Player::Me, analytics, heuristics),
            opponent: evaluate_player(state, Player::Opponent, analytics, heuristics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_evaluates_to_zero() {
        let mut state = GameState::create_empty(37).unwrap();
        for cell_id in 0..37 {
            state.set_richness(cell_id, 1).unwrap();
        }
        let analytics = Analytics::compute(&state);
        let evaluation = Evaluation::compute(&state, &analytics, &Heuristics::default());
        assert_eq!(evaluation.me.average_sun_production_per_day, 0.0);
        assert_eq!(evaluation.me.influence, 0);
        assert_eq!(evaluation.opponent.projected_final_score, 0.0);
    }

    #[test]
    fn test_seed_sunniness_and_dormancy() {
        let mut state = GameState::create_empty(37).unwrap();
        for cell_id in 0..37 {
            state.set_richness(cell_id, 2).unwrap();
        }
        state.day = 12;
        state.me.score = 10;
        // a size-1 tree between two seeds
        state.set_tree(0, 1, true, true).unwrap();
        state.set_tree(1, 0, true, false).unwrap();
        state.set_tree(4, 0, true, false).unwrap();

        let analytics = Analytics::compute(&state);
        let evaluation = Evaluation::compute(&state, &analytics, &Heuristics::default());

        assert_eq!(evaluation.me.num_of_expansions, 2);
        assert_eq!(evaluation.me.num_of_dormant_trees, 1);
        assert_eq!(evaluation.me.total_tree_size, 1);
        // each seed is shaded one day in six
        let expected = (5.0 / 6.0) / 2.0 + (5.0 / 6.0) / 2.0;
        assert!((evaluation.me.expansions_average_sunniness_per_day - expected).abs() < 1e-12);
        // 1 sun/day for 12 days at 3 sun per point on top of the banked 10
        assert!((evaluation.me.projected_final_score - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_opponent_projection_is_not_forecast() {
        let mut state = GameState::create_empty(37).unwrap();
        for cell_id in 0..37 {
            state.set_richness(cell_id, 2).unwrap();
        }
        state.day = 6;
        state.opponent.score = 12;
        state.set_tree(7, 3, false, false).unwrap();

        let analytics = Analytics::compute(&state);
        let evaluation = Evaluation::compute(&state, &analytics, &Heuristics::default());

        assert_eq!(evaluation.opponent.score, 12);
        assert!(evaluation.opponent.average_sun_production_per_day > 0.0);
        assert_eq!(evaluation.opponent.projected_final_score, 0.0);
    }
}
