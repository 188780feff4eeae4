//! The aggregate game state.
//!
//! A GameState is a value. Actions and the day transition return a new
//! one; nothing edits a GameState in place once it has been handed out.

use crate::{
    config::SimConfig,
    crop::CropTile,
    family::Family,
    farm::{Farm, MAX_UPGRADE_LEVEL},
    storage::Storage,
    types::{Day, Money, FAMILY_COUNT, GRID_SIZE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub families: [Family; FAMILY_COUNT],
    pub farm:     Farm,
    pub grid:     [CropTile; GRID_SIZE],
    pub storage:  Storage,
    pub day:      Day,
    pub money:    Money,
}

impl GameState {
    /// A fresh day-1 state built from configuration.
    pub fn new_game(config: &SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let families: Vec<Family> = config
            .families
            .iter()
            .map(|f| Family::new(f.name.clone(), f.daily_need))
            .collect();
        let families: [Family; FAMILY_COUNT] = families
            .try_into()
            .map_err(|v: Vec<Family>| anyhow::anyhow!("expected {FAMILY_COUNT} families, found {}", v.len()))?;

        Ok(Self {
            families,
            farm:    Farm::default(),
            grid:    [CropTile::empty(); GRID_SIZE],
            storage: Storage::from_stock(config.starting_stock.iter().map(|(&p, &q)| (p, q))),
            day:     1,
            money:   config.starting_money,
        })
    }

    pub fn tile(&self, index: usize) -> Option<&CropTile> {
        self.grid.get(index)
    }

    pub fn family(&self, index: usize) -> Option<&Family> {
        self.families.get(index)
    }

    /// Indices of families whose needs are not covered today.
    pub fn unsatisfied_families(&self) -> Vec<usize> {
        self.families
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_satisfied())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn mature_tiles(&self) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_mature())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn empty_tiles(&self) -> Vec<usize> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Check cross-entity invariants that the type system does not already
    /// carry. Returns one line per violation; empty means consistent.
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        if self.day == 0 {
            violations.push("day counter is 0".to_string());
        }
        for track in crate::farm::UpgradeTrack::ALL {
            let level = self.farm.level(track);
            if level > MAX_UPGRADE_LEVEL {
                violations.push(format!("{track} level {level} exceeds {MAX_UPGRADE_LEVEL}"));
            }
        }
        for (i, tile) in self.grid.iter().enumerate() {
            if tile.is_empty() && tile.days_grown() != 0 {
                violations.push(format!("tile {i} is empty with {} days grown", tile.days_grown()));
            }
        }
        for (produce, qty) in self.storage.iter() {
            if qty == 0 {
                violations.push(format!("storage holds a zero entry for {}", produce.id()));
            }
        }

        violations
    }
}
