//! Error types
//!
//! Failures are contained where entities are created: a failed load or placement
//! drops that one entity and the tick carries on. Trade rejections are ordinary
//! outcomes (see [`crate::game::economy::TradeOutcome`]) and only become a
//! [`SimError`] when a caller asks for one.

use thiserror::Error;

use crate::game::assets::LoadError;

/// Errors surfaced by the simulation core.
#[derive(Debug, Error)]
pub enum SimError {
    /// The rejection sampler ran out of attempts without finding a free spot.
    #[error("no free position after {attempts} attempts (min distance {min_distance})")]
    PlacementExhausted { attempts: u32, min_distance: f32 },

    /// A model load future resolved with an error; the entity is never added.
    #[error("failed to load model `{path}`: {source}")]
    AssetLoadFailure {
        path: String,
        #[source]
        source: LoadError,
    },

    /// The player does not carry enough meat for the offer.
    #[error("trade rejected: merchant wants {wanted} meat, player has {available}")]
    InvalidTrade { wanted: u32, available: u32 },

    /// A trade was attempted while no merchant is registered.
    #[error("no merchant present")]
    MissingMerchant,

    /// The player is outside the merchant's interaction radius.
    #[error("merchant out of reach ({distance:.1} > {radius:.1})")]
    OutOfReach { distance: f32, radius: f32 },

    /// Entity names are unique within the registry.
    #[error("entity name `{0}` is already registered")]
    DuplicateName(String),

    #[error("config I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
