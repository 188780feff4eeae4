//! Crop tile growth automaton: Empty → Growing(n) → Mature → (harvest) Empty.
//!
//! Mature is derived, not stored: a growing tile whose `days_grown` has
//! reached its produce's maturation threshold.

use crate::produce::Produce;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropTile {
    seed:       Option<Produce>,
    days_grown: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStage {
    Empty,
    Growing { produce: Produce, days_grown: u32 },
    Mature { produce: Produce },
}

impl CropTile {
    pub const fn empty() -> Self {
        Self { seed: None, days_grown: 0 }
    }

    /// Rebuild a tile from persisted parts. `days_grown` is dropped when
    /// there is no seed.
    pub fn from_parts(seed: Option<Produce>, days_grown: u32) -> Self {
        match seed {
            Some(_) => Self { seed, days_grown },
            None => Self::empty(),
        }
    }

    pub fn seed(&self) -> Option<Produce> {
        self.seed
    }

    pub fn days_grown(&self) -> u32 {
        self.days_grown
    }

    pub fn is_empty(&self) -> bool {
        self.seed.is_none()
    }

    pub fn is_mature(&self) -> bool {
        self.seed
            .is_some_and(|p| self.days_grown >= p.days_to_mature())
    }

    pub fn stage(&self) -> TileStage {
        match self.seed {
            None => TileStage::Empty,
            Some(produce) if self.is_mature() => TileStage::Mature { produce },
            Some(produce) => TileStage::Growing { produce, days_grown: self.days_grown },
        }
    }

    /// Days left until harvest, zero when mature, `None` when empty.
    pub fn days_remaining(&self) -> Option<u32> {
        self.seed
            .map(|p| p.days_to_mature().saturating_sub(self.days_grown))
    }

    /// Plant into an empty tile. An occupied tile comes back unchanged;
    /// callers check `is_empty` first.
    pub fn plant(&self, produce: Produce) -> CropTile {
        if self.seed.is_some() {
            return *self;
        }
        CropTile { seed: Some(produce), days_grown: 0 }
    }

    /// Advance one day plus `bonus_days` of irrigation. Empty tiles stay put.
    pub fn grow_one_day(&self, bonus_days: u32) -> CropTile {
        match self.seed {
            None => *self,
            Some(_) => CropTile {
                seed:       self.seed,
                days_grown: self.days_grown.saturating_add(1).saturating_add(bonus_days),
            },
        }
    }

    /// Take the crop if it is mature. Otherwise nothing comes out and the
    /// tile is returned as it was.
    pub fn harvest(&self) -> (CropTile, Option<Produce>) {
        if self.is_mature() {
            (CropTile::empty(), self.seed)
        } else {
            (*self, None)
        }
    }
}
