//! Economy System
//!
//! Inventory counters, the merchant trade and the win condition.
//! Starting inventory: 15 meat
//! Merchant interaction radius: 15 units

pub mod inventory;
pub mod trade;
pub mod win;

pub use inventory::{Inventory, ResourceKind, ResourceYield};
pub use trade::{
    INTERACTION_RADIUS, TradeOffer, TradeOutcome, TradeRange, TradeRejection, attempt_trade,
    execute_trade, within_reach,
};
pub use win::{WinCondition, WinTracker};
