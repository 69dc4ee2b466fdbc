//! Game constants and cost tables

use crate::error::RulesError;

/// The game lasts 24 days (0-23)
pub const MAX_NUM_OF_DAYS: u32 = 24;

pub const HARVESTABLE_TREE_SIZE: u8 = 3;
pub const SEED_SIZE: u8 = 0;

/// Sun spent by a COMPLETE action in the real game
pub const HARVEST_TREE_SUN_COST: i32 = 4;

pub const RICHNESS_1_COMPLETE_BONUS: i32 = 0;
pub const RICHNESS_2_COMPLETE_BONUS: i32 = 2;
pub const RICHNESS_3_COMPLETE_BONUS: i32 = 4;

pub const BASE_GROW_COST_TO_1: i32 = 1;
pub const BASE_GROW_COST_TO_2: i32 = 3;
pub const BASE_GROW_COST_TO_3: i32 = 7;

/// Days remaining after `day`, never negative
pub fn days_left(day: u32) -> u32 {
    MAX_NUM_OF_DAYS.saturating_sub(day)
}

/// Direction index into `DIRECTIONS` the sun shines from on `day`
pub fn sun_direction(day: u32) -> usize {
    (day % 6) as usize
}

/// Planting costs one sun per seed we already own
pub fn seed_cost(num_of_seeds: usize) -> i32 {
    num_of_seeds as i32
}

/// Cost to grow a tree to `target_size` given how many of our trees already have that size
pub fn grow_cost(target_size: u8, num_of_trees_of_same_size: usize) -> Result<i32, RulesError> {
    let base = match target_size {
        1 => BASE_GROW_COST_TO_1,
        2 => BASE_GROW_COST_TO_2,
        3 => BASE_GROW_COST_TO_3,
        other => return Err(RulesError::InvalidGrowTarget(other)),
    };
    Ok(base + num_of_trees_of_same_size as i32)
}

pub fn richness_bonus(richness: Option<u8>) -> Result<i32, RulesError> {
    match richness {
        Some(1) => Ok(RICHNESS_1_COMPLETE_BONUS),
        Some(2) => Ok(RICHNESS_2_COMPLETE_BONUS),
        Some(3) => Ok(RICHNESS_3_COMPLETE_BONUS),
        other => Err(RulesError::InvalidRichness(other)),
    }
}

/// Points banked by harvesting a tree on a cell of the given richness
pub fn harvest_score(nutrients: i32, richness: Option<u8>) -> Result<i32, RulesError> {
    Ok(nutrients + richness_bonus(richness)?)
}
