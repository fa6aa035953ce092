//! Merchant Trade
//!
//! Meat-for-metal exchange with the moored boat. A trade commits only when
//! the player holds at least `meat_wanted`; otherwise nothing changes.
//! Rejections are ordinary outcomes; [`TradeOutcome::into_result`] turns them
//! into [`SimError`]s for callers that want `?`.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::physics::planar_distance;
use crate::world::random_int;

use super::inventory::{Inventory, ResourceKind};

/// Distance within which the player can trade with a merchant
pub const INTERACTION_RADIUS: f32 = 15.0;

/// A fixed meat-for-metal offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub meat_wanted: u32,
    pub metal_offered: u32,
}

impl TradeOffer {
    pub fn new(meat_wanted: u32, metal_offered: u32) -> Self {
        Self {
            meat_wanted,
            metal_offered,
        }
    }

    /// Draw an offer from two half-open ranges.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, meat: TradeRange, metal: TradeRange) -> Self {
        Self::new(meat.sample(rng), metal.sample(rng))
    }
}

/// Half-open integer range `[min, max)` used to draw offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRange {
    pub min: u32,
    pub max: u32,
}

impl TradeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Uniform draw; an empty range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        random_int(rng, self.min as f32, self.max as f32).max(0) as u32
    }
}

/// Why a trade did not happen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TradeRejection {
    InsufficientMeat { wanted: u32, available: u32 },
    NoMerchant,
    OutOfReach { distance: f32, radius: f32 },
}

/// Result of a trade attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TradeOutcome {
    Completed { meat_paid: u32, metal_received: u32 },
    Rejected(TradeRejection),
}

impl TradeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TradeOutcome::Completed { .. })
    }

    /// `(meat_paid, metal_received)` or the matching error.
    pub fn into_result(self) -> Result<(u32, u32)> {
        match self {
            TradeOutcome::Completed {
                meat_paid,
                metal_received,
            } => Ok((meat_paid, metal_received)),
            TradeOutcome::Rejected(TradeRejection::InsufficientMeat { wanted, available }) => {
                Err(SimError::InvalidTrade { wanted, available })
            }
            TradeOutcome::Rejected(TradeRejection::NoMerchant) => Err(SimError::MissingMerchant),
            TradeOutcome::Rejected(TradeRejection::OutOfReach { distance, radius }) => {
                Err(SimError::OutOfReach { distance, radius })
            }
        }
    }
}

/// Execute an offer against an inventory. Commits all or nothing.
pub fn execute_trade(inventory: &mut Inventory, offer: &TradeOffer) -> TradeOutcome {
    if !inventory.spend(ResourceKind::Meat, offer.meat_wanted) {
        return TradeOutcome::Rejected(TradeRejection::InsufficientMeat {
            wanted: offer.meat_wanted,
            available: inventory.meat,
        });
    }
    inventory.add(ResourceKind::Metal, offer.metal_offered);
    log::info!(
        "traded {} meat for {} metal",
        offer.meat_wanted,
        offer.metal_offered
    );
    TradeOutcome::Completed {
        meat_paid: offer.meat_wanted,
        metal_received: offer.metal_offered,
    }
}

/// Whether a merchant at `merchant_pos` is within `radius` of the player (XZ plane).
pub fn within_reach(player_pos: Vec3, merchant_pos: Vec3, radius: f32) -> bool {
    planar_distance(player_pos, merchant_pos) <= radius
}

/// Full trade attempt: merchant present, in reach, then [`execute_trade`].
///
/// # Arguments
/// * `merchant` - `(position, offer, interaction radius)` of the merchant, if any
pub fn attempt_trade(
    inventory: &mut Inventory,
    player_pos: Vec3,
    merchant: Option<(Vec3, TradeOffer, f32)>,
) -> TradeOutcome {
    let Some((position, offer, radius)) = merchant else {
        log::warn!("trade attempted with no merchant present");
        return TradeOutcome::Rejected(TradeRejection::NoMerchant);
    };

    let distance = planar_distance(player_pos, position);
    if distance > radius {
        log::debug!("merchant out of reach: {distance:.1} > {radius:.1}");
        return TradeOutcome::Rejected(TradeRejection::OutOfReach { distance, radius });
    }

    execute_trade(inventory, &offer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_exact_meat_succeeds_once() {
        let mut inv = Inventory::new(5, 0, 0);
        let offer = TradeOffer::new(5, 3);

        let outcome = execute_trade(&mut inv, &offer);
        assert_eq!(
            outcome,
            TradeOutcome::Completed {
                meat_paid: 5,
                metal_received: 3
            }
        );
        assert_eq!(inv, Inventory::new(0, 0, 3));

        // Nothing left to pay with
        assert!(!execute_trade(&mut inv, &offer).is_completed());
        assert_eq!(inv, Inventory::new(0, 0, 3));
    }

    #[test]
    fn test_short_meat_rejected_without_mutation() {
        let mut inv = Inventory::new(4, 1, 2);
        let outcome = execute_trade(&mut inv, &TradeOffer::new(5, 3));
        assert_eq!(
            outcome,
            TradeOutcome::Rejected(TradeRejection::InsufficientMeat {
                wanted: 5,
                available: 4
            })
        );
        assert_eq!(inv, Inventory::new(4, 1, 2));
        assert!(matches!(
            outcome.into_result(),
            Err(SimError::InvalidTrade { wanted: 5, available: 4 })
        ));
    }

    #[test]
    fn test_no_merchant() {
        let mut inv = Inventory::starting();
        let outcome = attempt_trade(&mut inv, Vec3::ZERO, None);
        assert_eq!(outcome, TradeOutcome::Rejected(TradeRejection::NoMerchant));
        assert!(matches!(outcome.into_result(), Err(SimError::MissingMerchant)));
    }

    #[test]
    fn test_reach_is_planar() {
        let mut inv = Inventory::starting();
        let merchant = Some((Vec3::new(0.0, 50.0, 14.0), TradeOffer::new(5, 1), INTERACTION_RADIUS));
        assert!(attempt_trade(&mut inv, Vec3::ZERO, merchant).is_completed());

        let far = Some((Vec3::new(0.0, 0.0, 16.0), TradeOffer::new(5, 1), INTERACTION_RADIUS));
        assert!(matches!(
            attempt_trade(&mut inv, Vec3::ZERO, far),
            TradeOutcome::Rejected(TradeRejection::OutOfReach { .. })
        ));
        assert_eq!(inv.meat, 10);
    }

    #[test]
    fn test_generated_offer_within_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let offer = TradeOffer::generate(&mut rng, TradeRange::new(5, 11), TradeRange::new(1, 6));
            assert!((5..11).contains(&offer.meat_wanted));
            assert!((1..6).contains(&offer.metal_offered));
        }
        assert_eq!(TradeRange::new(3, 3).sample(&mut rng), 3);
    }
}
