//! Utility-based move selector

use tracing::{debug, info, trace, warn};

use crate::actions::{looks_legal, Action, ActionKind};
use crate::config::Heuristics;
use crate::error::AgentError;
use crate::eval::Evaluation;
use crate::game::GameState;
use crate::shadow::Analytics;
use crate::utility::{combine, complete_utilities, grow_utilities, seed_utilities, Hypothesis, Utilities};

/// Groups are tried in this order; the first one that beats waiting wins
pub const SELECTION_ORDER: [ActionKind; 3] = [ActionKind::Complete, ActionKind::Grow, ActionKind::Seed];

// ============================================================================
// CANDIDATES
// ============================================================================

/// A candidate together with its combined and per-concern utilities
#[derive(Clone, Debug)]
pub struct ScoredAction {
    pub action: Action,
    pub utility: f64,
    pub utilities: Utilities,
}

/// Legal moves split by action type, input order preserved
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MoveGroups {
    pub can_wait: bool,
    pub complete: Vec<Action>,
    pub grow: Vec<Action>,
    pub seed: Vec<Action>,
}

impl MoveGroups {
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut groups = Self::default();
        for &action in actions {
            match action.kind() {
                ActionKind::Wait => groups.can_wait = true,
                ActionKind::Complete => groups.complete.push(action),
                ActionKind::Grow => groups.grow.push(action),
                ActionKind::Seed => groups.seed.push(action),
            }
        }
        groups
    }

    pub fn get(&self, kind: ActionKind) -> &[Action] {
        match kind {
            ActionKind::Wait => &[],
            ActionKind::Complete => &self.complete,
            ActionKind::Grow => &self.grow,
            ActionKind::Seed => &self.seed,
        }
    }
}

pub fn parse_legal_moves(legal_moves: &[String]) -> Result<Vec<Action>, AgentError> {
    legal_moves
        .iter()
        .map(|line| {
            line.trim().parse().map_err(|source| AgentError::Parse {
                input: line.clone(),
                source,
            })
        })
        .collect()
}

/// First candidate strictly above `floor` and every earlier candidate.
/// Ties keep the earlier move; WAIT when nothing clears the floor.
pub fn select(scored: &[ScoredAction], floor: f64) -> Action {
    let mut best = floor;
    let mut chosen = Action::Wait;
    for candidate in scored {
        if candidate.utility > best {
            best = candidate.utility;
            chosen = candidate.action;
        }
    }
    chosen
}

// ============================================================================
// UTILITY AGENT
// ============================================================================

pub struct UtilityAgent {
    pub heuristics: Heuristics,
}

impl Default for UtilityAgent {
    fn default() -> Self {
        Self::new(Heuristics::default())
    }
}

impl UtilityAgent {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Pick one of the referee's legal move strings for this turn
    pub fn choose_move(&self, state: &GameState, legal_moves: &[String]) -> Result<Action, AgentError> {
        let actions = parse_legal_moves(legal_moves)?;
        self.choose_action(state, &actions)
    }

    pub fn choose_action(&self, state: &GameState, legal: &[Action]) -> Result<Action, AgentError> {
        for action in legal {
            if !looks_legal(state, action) {
                warn!(%action, day = state.day, sun = state.me.sun, "move offered as legal fails local check");
            }
        }

        let groups = MoveGroups::from_actions(legal);
        for kind in SELECTION_ORDER {
            let moves = groups.get(kind);
            if moves.is_empty() {
                continue;
            }

            let mut candidates = Vec::with_capacity(moves.len() + 1);
            if groups.can_wait {
                candidates.push(Action::Wait);
            }
            candidates.extend_from_slice(moves);

            let scored = self.score_candidates(state, &candidates, kind)?;
            for candidate in &scored {
                debug!(
                    action = %candidate.action,
                    utility = candidate.utility,
                    utilities = ?candidate.utilities,
                    "scored {} candidate",
                    kind
                );
            }

            let chosen = select(&scored, self.heuristics.wait_baseline);
            if chosen != Action::Wait {
                info!(day = state.day, action = %chosen, "chose move");
                return Ok(chosen);
            }
            debug!("no {} move beats waiting", kind);
        }

        info!(day = state.day, "chose to wait");
        Ok(Action::Wait)
    }

    #[cfg(not(feature = "parallel"))]
    fn score_candidates(
        &self,
        state: &GameState,
        candidates: &[Action],
        group: ActionKind,
    ) -> Result<Vec<ScoredAction>, AgentError> {
        candidates
            .iter()
            .map(|&action| self.score_action(state, action, group))
            .collect()
    }

    /// Candidates scored on the rayon pool; `collect` keeps input order
    #[cfg(feature = "parallel")]
    fn score_candidates(
        &self,
        state: &GameState,
        candidates: &[Action],
        group: ActionKind,
    ) -> Result<Vec<ScoredAction>, AgentError> {
        use rayon::prelude::*;

        candidates
            .par_iter()
            .map(|&action| self.score_action(state, action, group))
            .collect()
    }

    /// Simulate `action` and score the resulting state with `group`'s utilities
    pub fn score_action(
        &self,
        state: &GameState,
        action: Action,
        group: ActionKind,
    ) -> Result<ScoredAction, AgentError> {
        let after = state
            .apply_action(&action)
            .map_err(|source| AgentError::Simulation {
                action: action.to_string(),
                source,
            })?;
        let analytics = Analytics::compute(&after);
        let evaluation = Evaluation::compute(&after, &analytics, &self.heuristics);
        trace!(%action, ?evaluation, "evaluated hypothetical state");

        let hypothesis = Hypothesis {
            before: state,
            after: &after,
            action: &action,
            analytics: &analytics,
            evaluation: &evaluation,
            heuristics: &self.heuristics,
        };
        let utilities = match group {
            ActionKind::Complete => complete_utilities(&hypothesis),
            ActionKind::Grow => grow_utilities(&hypothesis),
            ActionKind::Seed => seed_utilities(&hypothesis),
            ActionKind::Wait => Utilities::new(),
        };

        Ok(ScoredAction {
            action,
            utility: combine(&utilities),
            utilities,
        })
    }
}
