//! Snapshot serialization: full game state to and from JSON.
//!
//! A snapshot captures everything needed to resume play except the market's
//! price history and RNG position. A restored market has no `yesterday`,
//! so price deltas read as unavailable until the next day ends.
//!
//! Produce is keyed by catalog id. Unknown ids do not fail the load; they
//! are replaced by the first catalog entry (see `Produce::from_id_or_fallback`).

use crate::{
    crop::CropTile,
    error::{SimError, SimResult},
    family::Family,
    farm::{Farm, MAX_UPGRADE_LEVEL},
    market::Market,
    nutrition::Nutrition,
    produce::Produce,
    state::GameState,
    storage::Storage,
    types::{Day, Money, Price, Quantity, FAMILY_COUNT, GRID_SIZE},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub day:      Day,
    pub money:    Money,
    pub families: Vec<FamilySnapshot>,
    pub grid:     Vec<TileSnapshot>,
    pub storage:  StorageSnapshot,
    pub farm:     Farm,
    pub market:   MarketSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySnapshot {
    pub name:       String,
    pub daily_need: Nutrition,
    #[serde(default)]
    pub assigned:   BTreeMap<String, Quantity>,
    /// Older saves carry no stockpile; it loads as zero.
    #[serde(default)]
    pub stockpile:  Nutrition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub seed:       Option<String>,
    #[serde(default)]
    pub days_grown: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSnapshot {
    #[serde(default)]
    pub stock: BTreeMap<String, Quantity>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub prices: BTreeMap<String, Price>,
}

fn keyed<V: Copy>(entries: impl Iterator<Item = (Produce, V)>) -> BTreeMap<String, V> {
    entries.map(|(p, v)| (p.id().to_string(), v)).collect()
}

/// Fold id-keyed quantities back onto the catalog. Two unknown ids that
/// both fall back to the same entry are summed.
fn unkeyed_quantities(entries: &BTreeMap<String, Quantity>) -> BTreeMap<Produce, Quantity> {
    let mut out = BTreeMap::new();
    for (id, &qty) in entries {
        let entry = out.entry(Produce::from_id_or_fallback(id)).or_insert(0u32);
        *entry = entry.saturating_add(qty);
    }
    out
}

fn invalid(reason: impl Into<String>) -> SimError {
    SimError::InvalidSnapshot { reason: reason.into() }
}

impl GameSnapshot {
    pub fn capture(state: &GameState, market: &Market) -> Self {
        Self {
            day:   state.day,
            money: state.money,
            families: state
                .families
                .iter()
                .map(|f| FamilySnapshot {
                    name:       f.name.clone(),
                    daily_need: f.daily_need,
                    assigned:   keyed(f.assigned.iter().map(|(&p, &q)| (p, q))),
                    stockpile:  f.stockpile,
                })
                .collect(),
            grid: state
                .grid
                .iter()
                .map(|t| TileSnapshot {
                    seed:       t.seed().map(|p| p.id().to_string()),
                    days_grown: t.days_grown(),
                })
                .collect(),
            storage: StorageSnapshot { stock: keyed(state.storage.iter()) },
            farm:    state.farm,
            market:  MarketSnapshot {
                prices: keyed(market.prices().iter().map(|(&p, &price)| (p, price))),
            },
        }
    }

    /// Rebuild a live pair. Nothing is returned unless the whole document
    /// is usable.
    pub fn restore(&self, seed: u64, max_drift_pct: i64) -> SimResult<(GameState, Market)> {
        if self.day == 0 {
            return Err(invalid("day must be at least 1"));
        }
        if self.farm.irrigation_level > MAX_UPGRADE_LEVEL || self.farm.yield_level > MAX_UPGRADE_LEVEL {
            return Err(invalid(format!(
                "farm levels {}/{} exceed {MAX_UPGRADE_LEVEL}",
                self.farm.irrigation_level, self.farm.yield_level
            )));
        }

        let families: Vec<Family> = self
            .families
            .iter()
            .map(|f| Family {
                name:       f.name.clone(),
                daily_need: f.daily_need,
                assigned:   unkeyed_quantities(&f.assigned)
                    .into_iter()
                    .filter(|&(_, q)| q > 0)
                    .collect(),
                stockpile:  f.stockpile,
            })
            .collect();
        let families: [Family; FAMILY_COUNT] = families.try_into().map_err(|v: Vec<Family>| {
            invalid(format!("expected {FAMILY_COUNT} families, found {}", v.len()))
        })?;

        let grid: Vec<CropTile> = self
            .grid
            .iter()
            .map(|t| {
                let seed = t.seed.as_deref().map(Produce::from_id_or_fallback);
                CropTile::from_parts(seed, t.days_grown)
            })
            .collect();
        let grid: [CropTile; GRID_SIZE] = grid.try_into().map_err(|v: Vec<CropTile>| {
            invalid(format!("expected {GRID_SIZE} tiles, found {}", v.len()))
        })?;

        let mut prices = BTreeMap::new();
        let mut unknown = Vec::new();
        for (id, &price) in &self.market.prices {
            if price == 0 {
                return Err(invalid(format!("price of '{id}' is 0")));
            }
            match Produce::from_id(id) {
                Some(produce) => {
                    prices.insert(produce, price);
                }
                None => unknown.push((id, price)),
            }
        }
        // Unknown ids only fill the fallback's price when it has none.
        for (id, price) in unknown {
            let fallback = Produce::from_id_or_fallback(id);
            if prices.contains_key(&fallback) {
                log::warn!("snapshot: price for unknown '{id}' ignored, {fallback} already priced");
            } else {
                prices.insert(fallback, price);
            }
        }

        let state = GameState {
            families,
            farm:    self.farm,
            grid,
            storage: Storage::from_stock(unkeyed_quantities(&self.storage.stock)),
            day:     self.day,
            money:   self.money,
        };
        let market = Market::new(prices, seed).with_max_drift_pct(max_drift_pct);

        Ok((state, market))
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
