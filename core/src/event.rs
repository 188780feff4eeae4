//! Events and view notices.
//!
//! RULE: the kernel never calls into a view. Every applied command yields
//! one GameEvent; the view asks the event which Notices it raises and
//! refreshes those panels.

use crate::{
    farm::UpgradeTrack,
    produce::Produce,
    types::{Day, Money, Price, Quantity, SessionId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every event a session records.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Session events ─────────────────────────────
    GameStarted {
        session_id: SessionId,
        seed: u64,
    },
    GameLoaded {
        day: Day,
        slot: Option<String>,
    },

    // ── Player actions ─────────────────────────────
    CropPlanted {
        day: Day,
        tile: usize,
        produce: Produce,
    },
    CropHarvested {
        day: Day,
        tile: usize,
        produce: Produce,
        quantity: Quantity,
    },
    ProduceAssigned {
        day: Day,
        family: usize,
        produce: Produce,
        quantity: Quantity,
    },
    ProduceSold {
        day: Day,
        produce: Produce,
        quantity: Quantity,
        unit_price: Price,
        revenue: Money,
    },
    UpgradePurchased {
        day: Day,
        track: UpgradeTrack,
        level: u8,
        price: Money,
    },
    CommandRejected {
        day: Day,
        command: String,
        reason: String,
    },

    // ── Day transition ─────────────────────────────
    DayEnded {
        day: Day,
        next_day: Day,
        prices: BTreeMap<Produce, Price>,
    },
    GameEnded {
        day: Day,
        family: String,
        reason: String,
    },
}

/// Which part of the presented state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    InventoryChanged,
    MoneyChanged,
    FarmChanged,
    GridChanged,
    FamiliesChanged,
    MarketChanged,
    DayAdvanced,
}

impl GameEvent {
    pub fn day(&self) -> Day {
        match self {
            Self::GameStarted { .. } => 1,
            Self::GameLoaded { day, .. }
            | Self::CropPlanted { day, .. }
            | Self::CropHarvested { day, .. }
            | Self::ProduceAssigned { day, .. }
            | Self::ProduceSold { day, .. }
            | Self::UpgradePurchased { day, .. }
            | Self::CommandRejected { day, .. }
            | Self::DayEnded { day, .. }
            | Self::GameEnded { day, .. } => *day,
        }
    }

    pub fn notices(&self) -> &'static [Notice] {
        use Notice::*;
        match self {
            Self::GameStarted { .. } | Self::GameLoaded { .. } => &[
                InventoryChanged, MoneyChanged, FarmChanged, GridChanged,
                FamiliesChanged, MarketChanged, DayAdvanced,
            ],
            Self::CropPlanted { .. }      => &[GridChanged],
            Self::CropHarvested { .. }    => &[GridChanged, InventoryChanged],
            Self::ProduceAssigned { .. }  => &[InventoryChanged, FamiliesChanged],
            Self::ProduceSold { .. }      => &[InventoryChanged, MoneyChanged],
            Self::UpgradePurchased { .. } => &[FarmChanged, MoneyChanged],
            Self::CommandRejected { .. }  => &[],
            Self::DayEnded { .. }         => &[GridChanged, FamiliesChanged, MarketChanged, DayAdvanced],
            Self::GameEnded { .. }        => &[],
        }
    }

    /// Stable string name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GameStarted { .. }      => "game_started",
            Self::GameLoaded { .. }       => "game_loaded",
            Self::CropPlanted { .. }      => "crop_planted",
            Self::CropHarvested { .. }    => "crop_harvested",
            Self::ProduceAssigned { .. }  => "produce_assigned",
            Self::ProduceSold { .. }      => "produce_sold",
            Self::UpgradePurchased { .. } => "upgrade_purchased",
            Self::CommandRejected { .. }  => "command_rejected",
            Self::DayEnded { .. }         => "day_ended",
            Self::GameEnded { .. }        => "game_ended",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub session_id: SessionId,
    pub day:        Day,
    pub event_type: String,
    pub payload:    String, // JSON-serialized GameEvent
}
