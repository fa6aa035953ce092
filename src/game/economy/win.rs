//! Win Condition
//!
//! All three counters must reach their thresholds at the same time. The
//! tracker reports the transition exactly once; later ticks where the
//! condition still holds are ignored.

use serde::{Deserialize, Serialize};

use super::inventory::Inventory;

/// Target thresholds for the three inventory counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinCondition {
    pub meat: u32,
    pub lumber: u32,
    pub metal: u32,
}

impl Default for WinCondition {
    fn default() -> Self {
        Self {
            meat: 10,
            lumber: 6,
            metal: 10,
        }
    }
}

impl WinCondition {
    pub fn new(meat: u32, lumber: u32, metal: u32) -> Self {
        Self {
            meat,
            lumber,
            metal,
        }
    }

    pub fn is_met(&self, inventory: &Inventory) -> bool {
        inventory.meat >= self.meat && inventory.lumber >= self.lumber && inventory.metal >= self.metal
    }
}

/// Edge detector over [`WinCondition`]
#[derive(Debug, Clone, Default)]
pub struct WinTracker {
    condition: WinCondition,
    won: bool,
}

impl WinTracker {
    pub fn new(condition: WinCondition) -> Self {
        Self {
            condition,
            won: false,
        }
    }

    pub fn condition(&self) -> &WinCondition {
        &self.condition
    }

    /// Whether the win has already fired
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Evaluate once per tick. Returns true only on the tick the condition first holds.
    pub fn check(&mut self, inventory: &Inventory) -> bool {
        if self.won || !self.condition.is_met(inventory) {
            return false;
        }
        self.won = true;
        log::info!("win condition met: {inventory:?}");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_three_required() {
        let win = WinCondition::new(1, 1, 1);
        assert!(!win.is_met(&Inventory::new(5, 5, 0)));
        assert!(win.is_met(&Inventory::new(1, 1, 1)));
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut tracker = WinTracker::new(WinCondition::new(1, 1, 1));
        let rich = Inventory::new(9, 9, 9);

        assert!(!tracker.check(&Inventory::default()));
        assert!(tracker.check(&rich));
        for _ in 0..10 {
            assert!(!tracker.check(&rich));
        }
        assert!(tracker.has_won());
    }
}
