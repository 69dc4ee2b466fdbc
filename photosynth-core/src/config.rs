//! Tuning knobs for the utility calculators

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::MAX_NUM_OF_DAYS;

/// Heuristic weights and thresholds. None of these are rules of the game;
/// they shape how the agent values hypothetical states.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Daily sun output treated as "full" production
    pub production_target: f64,
    /// Share of future sun we expect to actually turn into points
    pub projection_discount: f64,
    /// How much the nutrient pool shrinks per projected harvest
    pub nutrient_decay_per_harvest: f64,
    /// Exchange rate of leftover sun into points at the end of the game
    pub sun_per_point: f64,
    /// Exponent of the power-law pacing curves
    pub pacing_exponent: f64,
    /// Seeds we are happy to hold at once
    pub max_seeds: usize,
    /// Cells per crowding area (center plus six neighbours)
    pub area_size: usize,
    /// No seeding before this day
    pub seed_earliest_day: u32,
    /// No seeding when fewer days than this remain
    pub seed_min_days_left: u32,
    /// Growing stops paying off when fewer days than this remain
    pub grow_min_days_left: u32,
    /// ...unless the nutrient pool is still above this
    pub grow_late_min_nutrients: i32,
    /// Look-ahead for day-by-day sun simulation
    pub lookahead_days: u32,
    /// Utility a group must beat to be preferred over waiting when WAIT is not offered
    pub wait_baseline: f64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            production_target: 20.0,
            projection_discount: 0.7,
            nutrient_decay_per_harvest: 1.0,
            sun_per_point: 3.0,
            pacing_exponent: 3.0,
            max_seeds: 5,
            area_size: 7,
            seed_earliest_day: 2,
            seed_min_days_left: 6,
            grow_min_days_left: 4,
            grow_late_min_nutrients: 5,
            lookahead_days: 6,
            wait_baseline: 0.0,
        }
    }
}

impl Heuristics {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pacing_exponent < 1.0 {
            return Err(ConfigError::ExponentBelowOne(self.pacing_exponent));
        }
        if !(self.projection_discount > 0.0 && self.projection_discount <= 1.0) {
            return Err(ConfigError::DiscountOutOfRange(self.projection_discount));
        }
        let positives = [
            ("production_target", self.production_target),
            ("sun_per_point", self.sun_per_point),
            ("max_seeds", self.max_seeds as f64),
            ("area_size", self.area_size as f64),
            ("lookahead_days", self.lookahead_days as f64),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if self.nutrient_decay_per_harvest < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "nutrient_decay_per_harvest",
                value: self.nutrient_decay_per_harvest,
            });
        }
        if self.seed_earliest_day.saturating_add(self.seed_min_days_left) > MAX_NUM_OF_DAYS {
            return Err(ConfigError::EmptySeedWindow {
                earliest_day: self.seed_earliest_day,
                min_days_left: self.seed_min_days_left,
            });
        }
        Ok(())
    }

    /// Parse and validate heuristics from JSON; missing fields take defaults
    pub fn from_json(content: &str) -> Result<Self, HeuristicsLoadError> {
        let heuristics: Heuristics = serde_json::from_str(content)?;
        heuristics.validate()?;
        Ok(heuristics)
    }

    pub fn load(path: &Path) -> Result<Self, HeuristicsLoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HeuristicsLoadError {
    #[error("cannot read heuristics file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed heuristics JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
