use crate::{
    farm::UpgradeTrack,
    produce::Produce,
    types::{Day, Money, Quantity},
};
use thiserror::Error;

/// Persistence and infrastructure failures.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("Save slot '{slot}' not found")]
    SlotNotFound { slot: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;

/// A player action that was refused. The state it was checked against is
/// left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Tile {tile} does not exist")]
    TileOutOfRange { tile: usize },

    #[error("Tile {tile} is already planted")]
    TileOccupied { tile: usize },

    #[error("Tile {tile} has nothing planted")]
    TileEmpty { tile: usize },

    #[error("Tile {tile} is not ready to harvest")]
    NotMature { tile: usize },

    #[error("Family {family} does not exist")]
    FamilyOutOfRange { family: usize },

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Not enough {produce}: requested {requested}, have {available}")]
    InsufficientStock {
        produce: Produce,
        requested: Quantity,
        available: Quantity,
    },

    #[error("{produce} has no market price")]
    NotTraded { produce: Produce },

    #[error("Not enough money: need {price}, have {money}")]
    InsufficientFunds { price: Money, money: Money },

    #[error("{track} is already at max level")]
    MaxLevel { track: UpgradeTrack },

    #[error("The game ended on day {day}")]
    SessionEnded { day: Day },
}

/// Terminal outcome of a day transition: a household went hungry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Game over on day {day}: {reason}")]
pub struct GameOver {
    pub day: Day,
    pub family: String,
    pub reason: String,
}
