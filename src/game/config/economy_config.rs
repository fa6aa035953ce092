//! Economy Configuration

use serde::{Deserialize, Serialize};

use crate::game::economy::{INTERACTION_RADIUS, TradeRange, WinCondition};

/// Win thresholds and the merchant's offer ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub win: WinCondition,
    /// Meat the merchant asks for, drawn once at spawn
    pub meat_wanted: TradeRange,
    /// Metal the merchant gives, drawn once at spawn
    pub metal_offered: TradeRange,
    pub interaction_radius: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            win: WinCondition::default(),
            meat_wanted: TradeRange::new(5, 11),
            metal_offered: TradeRange::new(3, 6),
            interaction_radius: INTERACTION_RADIUS,
        }
    }
}
