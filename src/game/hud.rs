//! HUD Snapshot
//!
//! Everything the DOM overlay shows, serialized to JSON once per frame:
//! inventory counters, win targets, the trade popup and whether the trade
//! button is live.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::economy::{Inventory, TradeOffer, WinCondition};
use crate::player::AnimationState;

/// Trade popup contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePopup {
    pub meat_wanted: u32,
    pub metal_offered: u32,
}

impl From<TradeOffer> for TradePopup {
    fn from(offer: TradeOffer) -> Self {
        Self {
            meat_wanted: offer.meat_wanted,
            metal_offered: offer.metal_offered,
        }
    }
}

/// Per-frame HUD state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub inventory: Inventory,
    pub win: WinCondition,
    /// Present once the merchant has spawned
    pub trade: Option<TradePopup>,
    /// Player within the merchant's interaction radius
    pub trade_available: bool,
    pub won: bool,
    pub animation: AnimationState,
}

impl HudSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
