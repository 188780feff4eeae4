use serde::{Deserialize, Serialize};
use crate::{farm::UpgradeTrack, produce::Produce, types::Quantity};

/// All player-issued commands.
/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Field work ─────────────────────────────────
    Plant {
        tile:    usize,
        produce: Produce,
    },
    Harvest {
        tile: usize,
    },

    // ── Household and trade ────────────────────────
    Assign {
        family:   usize,
        produce:  Produce,
        quantity: Quantity,
    },
    Sell {
        produce:  Produce,
        quantity: Quantity,
    },
    BuyUpgrade {
        track: UpgradeTrack,
    },

    // ── Calendar ───────────────────────────────────
    EndDay,
}

impl PlayerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plant { .. }      => "plant",
            Self::Harvest { .. }    => "harvest",
            Self::Assign { .. }     => "assign",
            Self::Sell { .. }       => "sell",
            Self::BuyUpgrade { .. } => "buy_upgrade",
            Self::EndDay            => "end_day",
        }
    }
}
