//! Integration tests for the photosynth decision engine
//!
//! Tests the full stack: board fixture, analytics, evaluation and move selection

use photosynth_core::{
    board::{map_radius, spiral_cells},
    shadow::{trees_in_shadow_for_day, Analytics},
    Action, Evaluation, GameState, Heuristics, Hex, TurnStats, UtilityAgent,
};

const EPS: f64 = 1e-9;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Cell id -> (q, r) as the referee numbers the cells
const SPIRAL: [(i8, i8); 37] = [
    (3, 3), (4, 3), (4, 2), (3, 2), (2, 3), (2, 4), (3, 4),
    (5, 3), (5, 2), (5, 1), (4, 1), (3, 1), (2, 2), (1, 3), (1, 4), (1, 5), (2, 5), (3, 5), (4, 4),
    (6, 3), (6, 2), (6, 1), (6, 0), (5, 0), (4, 0), (3, 0), (2, 1), (1, 2), (0, 3), (0, 4), (0, 5),
    (0, 6), (1, 6), (2, 6), (3, 6), (4, 5), (5, 4),
];

/// Richness 3 in the center ring, 2 in the middle ring, 1 on the edge
fn ringed_board() -> GameState {
    let mut state = GameState::create_empty(37).unwrap();
    for cell_id in 0..37 {
        let richness = match cell_id {
            0..=6 => 3,
            7..=18 => 2,
            _ => 1,
        };
        state.set_richness(cell_id, richness).unwrap();
    }
    state
}

fn cell_of(state: &GameState, q: i8, r: i8) -> usize {
    state.board.cell_id(Hex::new(q, r)).unwrap()
}

/// Two mirrored lines of three trees, sizes 3-2-1
fn mirrored_lines() -> GameState {
    let mut state = ringed_board();
    state.day = 2;
    state.nutrients = 3;

    let mine = [((4, 3), 3, false), ((5, 3), 2, true), ((6, 3), 1, false)];
    let theirs = [((3, 2), 3, false), ((3, 1), 2, false), ((3, 0), 1, false)];
    for ((q, r), size, dormant) in mine {
        let cell = cell_of(&state, q, r);
        state.set_tree(cell, size, true, dormant).unwrap();
    }
    for ((q, r), size, dormant) in theirs {
        let cell = cell_of(&state, q, r);
        state.set_tree(cell, size, false, dormant).unwrap();
    }
    state
}

/// A mid-game position with many legal moves of every kind
fn crowded_mid_game() -> (GameState, Vec<String>) {
    let mut state = ringed_board();
    state.set_stats_for_turn(TurnStats {
        day: 8,
        nutrients: 20,
        my_sun: 15,
        my_score: 0,
        opp_sun: 8,
        opp_score: 0,
        opp_is_waiting: false,
    });

    for (cell, size) in [(11, 2), (27, 2), (30, 2), (32, 2), (5, 3), (17, 1), (7, 1)] {
        state.set_tree(cell, size, true, false).unwrap();
    }
    for (cell, size) in [(9, 1), (21, 1), (34, 1), (36, 1), (6, 0), (8, 0), (20, 0), (35, 0)] {
        state.set_tree(cell, size, false, false).unwrap();
    }

    let moves = [
        "WAIT", "COMPLETE 5", "GROW 11", "GROW 27", "GROW 17", "GROW 7", "GROW 32", "GROW 30",
        "SEED 30 15", "SEED 30 4", "SEED 32 14", "SEED 11 4", "SEED 11 24", "SEED 11 13",
        "SEED 7 1", "SEED 11 3", "SEED 30 13", "SEED 11 10", "SEED 5 15", "SEED 30 31",
        "SEED 27 14", "SEED 11 0", "SEED 5 33", "SEED 7 19", "SEED 30 29", "SEED 30 16",
        "SEED 5 3", "SEED 7 18", "SEED 32 33", "SEED 11 23", "SEED 27 26", "SEED 11 2",
        "SEED 5 4", "SEED 5 0", "SEED 30 14", "SEED 27 12", "SEED 11 26", "SEED 27 3",
        "SEED 5 1", "SEED 5 12", "SEED 27 29", "SEED 5 29", "SEED 27 13", "SEED 27 4",
        "SEED 5 26", "SEED 5 28", "SEED 5 10", "SEED 27 25", "SEED 5 31", "SEED 32 16",
        "SEED 11 12", "SEED 32 15", "SEED 5 14", "SEED 5 13", "SEED 5 18", "SEED 27 28",
        "SEED 11 25", "SEED 5 16", "SEED 30 28", "SEED 5 2", "SEED 32 31",
    ];
    (state, moves.iter().map(|s| s.to_string()).collect())
}

// ============================================================================
// BOARD
// ============================================================================

#[test]
fn test_cell_table_matches_referee_numbering() {
    let state = ringed_board();
    let cells = state.board.cells();
    assert_eq!(cells.len(), 37);
    for (cell_id, &(q, r)) in SPIRAL.iter().enumerate() {
        assert_eq!(cells[cell_id], Hex::new(q, r), "cell {cell_id}");
    }
    assert_eq!(spiral_cells(map_radius(37).unwrap()), cells);
}

#[test]
fn test_cell_keys_are_unique_and_reversible() {
    let state = ringed_board();
    let mut keys: Vec<String> = state.board.cells().iter().map(|hex| hex.to_key()).collect();
    for (key, hex) in keys.iter().zip(state.board.cells()) {
        assert_eq!(Hex::from_key(key).unwrap(), *hex);
    }
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 37);
}

#[test]
fn test_every_cell_is_inside_the_hexagon() {
    let state = ringed_board();
    for hex in state.board.cells() {
        let cube = hex.to_cube();
        assert_eq!(cube.x + cube.y + cube.z, 0);
        assert!(state.is_valid_coordinates(*hex));
    }
    assert_eq!(state.board.num_usable_cells(), 37);
}

// ============================================================================
// EVALUATION
// ============================================================================

#[test]
fn test_mirrored_lines_evaluation() {
    let state = mirrored_lines();
    let heuristics = Heuristics::default();
    let analytics = Analytics::compute(&state);
    let evaluation = Evaluation::compute(&state, &analytics, &heuristics);

    assert!(close(evaluation.me.average_sun_production_per_day, 5.333333333333334));
    assert!(close(evaluation.opponent.average_sun_production_per_day, 5.333333333333334));
    assert_eq!(evaluation.me.influence, 10);
    assert_eq!(evaluation.me.total_tree_size, 6);
    assert_eq!(evaluation.me.num_of_expansions, 0);
    assert_eq!(evaluation.me.num_of_dormant_trees, 1);
    assert_eq!(evaluation.me.score, 0);
    assert_eq!(evaluation.me.sun, 0);
    assert!(close(evaluation.me.projected_final_score, 39.111111111111114));
    // same production on the other side, but only our projection is forecast
    assert!(close(
        evaluation.opponent.average_sun_production_per_day,
        evaluation.me.average_sun_production_per_day
    ));
    assert_eq!(evaluation.opponent.projected_final_score, 0.0);
}

#[test]
fn test_day_shadow_follows_the_line() {
    let state = mirrored_lines();
    // sun from direction 0 on day 0: our line is shaded from the big tree down
    let shadowed = trees_in_shadow_for_day(&state, 0);
    assert!(shadowed.contains(&Hex::new(5, 3)));
    assert!(shadowed.contains(&Hex::new(6, 3)));
    assert!(!shadowed.contains(&Hex::new(4, 3)));
    assert!(!shadowed.contains(&Hex::new(3, 1)));

    // direction 2 on day 2 runs down the opponent's line instead
    let shadowed = trees_in_shadow_for_day(&state, 2);
    assert!(shadowed.contains(&Hex::new(3, 1)));
    assert!(shadowed.contains(&Hex::new(3, 0)));
    assert!(!shadowed.contains(&Hex::new(5, 3)));
}

#[test]
fn test_simulation_leaves_the_original_alone() {
    let state = mirrored_lines();
    let grow_cell = cell_of(&state, 6, 3);
    let next = state.apply_action(&Action::Grow { cell: grow_cell }).unwrap();

    assert_eq!(next.day, 3);
    assert_eq!(next.me.trees[&Hex::new(6, 3)].size, 2);
    assert_eq!(state.me.trees[&Hex::new(6, 3)].size, 1);
    assert_eq!(state.day, 2);
}

// ============================================================================
// MOVE SELECTION
// ============================================================================

#[test]
fn test_crowded_mid_game_picks_an_offered_move() {
    let (state, moves) = crowded_mid_game();
    let agent = UtilityAgent::default();
    let chosen = agent.choose_move(&state, &moves).unwrap();
    assert!(moves.contains(&chosen.to_string()), "{chosen} was not offered");
}

#[test]
fn test_selection_is_deterministic() {
    let (state, moves) = crowded_mid_game();
    let agent = UtilityAgent::default();
    let first = agent.choose_move(&state, &moves).unwrap();
    for _ in 0..3 {
        assert_eq!(agent.choose_move(&state, &moves).unwrap(), first);
    }
}

#[test]
fn test_final_day_harvest_beats_everything_else() {
    let (mut state, _) = crowded_mid_game();
    state.day = 22;
    state.opponent.score = 40;
    let moves: Vec<String> = ["WAIT", "GROW 11", "SEED 11 4", "COMPLETE 5"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let agent = UtilityAgent::default();
    assert_eq!(agent.choose_move(&state, &moves).unwrap(), Action::Complete { cell: 5 });
}

#[test]
fn test_custom_heuristics_change_nothing_about_legality() {
    let (state, moves) = crowded_mid_game();
    let heuristics = Heuristics::from_json(r#"{"max_seeds": 1, "seed_earliest_day": 0}"#).unwrap();
    let chosen = UtilityAgent::new(heuristics).choose_move(&state, &moves).unwrap();
    assert!(moves.contains(&chosen.to_string()));
}
