//! Player Inventory
//!
//! Three non-negative counters: meat, lumber, metal.

use serde::{Deserialize, Serialize};

/// Kinds of resource the player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Meat,
    Lumber,
    Metal,
}

impl ResourceKind {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Meat => "meat",
            ResourceKind::Lumber => "lumber",
            ResourceKind::Metal => "metal",
        }
    }
}

/// A counted amount of one resource, credited when a harvestable is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceYield {
    pub kind: ResourceKind,
    pub amount: u32,
}

impl ResourceYield {
    pub fn meat(amount: u32) -> Self {
        Self {
            kind: ResourceKind::Meat,
            amount,
        }
    }

    pub fn lumber(amount: u32) -> Self {
        Self {
            kind: ResourceKind::Lumber,
            amount,
        }
    }
}

/// Player's resource counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Inventory {
    pub meat: u32,
    pub lumber: u32,
    pub metal: u32,
}

impl Inventory {
    pub fn new(meat: u32, lumber: u32, metal: u32) -> Self {
        Self {
            meat,
            lumber,
            metal,
        }
    }

    /// Starting inventory of a new game: 15 meat
    pub fn starting() -> Self {
        Self::new(15, 0, 0)
    }

    /// Get current amount of a resource
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Meat => self.meat,
            ResourceKind::Lumber => self.lumber,
            ResourceKind::Metal => self.metal,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Meat => &mut self.meat,
            ResourceKind::Lumber => &mut self.lumber,
            ResourceKind::Metal => &mut self.metal,
        }
    }

    /// Add to a resource
    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Credit a harvest yield
    pub fn credit(&mut self, resource: ResourceYield) {
        self.add(resource.kind, resource.amount);
    }

    /// Spend a resource. Returns false (and leaves the counter alone) if there is not enough.
    pub fn spend(&mut self, kind: ResourceKind, amount: u32) -> bool {
        let slot = self.slot_mut(kind);
        match slot.checked_sub(amount) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }

    /// Check if the player can afford an amount
    pub fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        self.get(kind) >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_inventory() {
        let inv = Inventory::starting();
        assert_eq!(inv.get(ResourceKind::Meat), 15);
        assert_eq!(inv.get(ResourceKind::Lumber), 0);
        assert_eq!(inv.get(ResourceKind::Metal), 0);
    }

    #[test]
    fn test_spend_never_goes_negative() {
        let mut inv = Inventory::new(4, 0, 0);
        assert!(!inv.spend(ResourceKind::Meat, 5));
        assert_eq!(inv.meat, 4);
        assert!(inv.spend(ResourceKind::Meat, 4));
        assert_eq!(inv.meat, 0);
    }

    #[test]
    fn test_credit_yield() {
        let mut inv = Inventory::default();
        inv.credit(ResourceYield::lumber(2));
        inv.credit(ResourceYield::meat(3));
        assert_eq!(inv, Inventory::new(3, 2, 0));
    }

    #[test]
    fn test_add_saturates() {
        let mut inv = Inventory::new(u32::MAX - 1, 0, 0);
        inv.add(ResourceKind::Meat, 10);
        assert_eq!(inv.meat, u32::MAX);
    }
}
