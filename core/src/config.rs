//! Game configuration: starting conditions and economy tuning.
//!
//! `SimConfig::default()` is the reference game. `SimConfig::load()` reads
//! the same shape from JSON files in a data directory.

use crate::{
    market::DEFAULT_MAX_DRIFT_PCT,
    nutrition::Nutrition,
    produce::Produce,
    types::{Money, Price, Quantity, FAMILY_COUNT},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyConfig {
    pub name:       String,
    pub daily_need: Nutrition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub initial_prices: BTreeMap<Produce, Price>,
    #[serde(default = "default_drift")]
    pub max_drift_pct:  i64,
}

fn default_drift() -> i64 {
    DEFAULT_MAX_DRIFT_PCT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Price of levels 1, 2, 3 in order.
    pub cost_curve:    Vec<Money>,
    /// Price of any level past the end of the curve.
    pub fallback_cost: Money,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            cost_curve:    vec![500, 1000, 2000],
            fallback_cost: 1000,
        }
    }
}

/// When assigned food reaches a family's stockpile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryAccounting {
    /// Credit the stockpile at assignment time as well as counting the
    /// delivery in `assigned`. Today's food is counted twice by the
    /// satisfaction check and by settlement.
    #[default]
    CreditStockpile,
    /// Only record the delivery in `assigned`; settlement rolls any
    /// surplus into the stockpile.
    DeferToSettlement,
}

#[derive(Debug, Clone, Deserialize)]
struct FamiliesFile {
    families: Vec<FamilyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct EconomyFile {
    starting_money:      Money,
    #[serde(default)]
    starting_stock:      BTreeMap<Produce, Quantity>,
    market:              MarketConfig,
    #[serde(default)]
    upgrades:            UpgradeConfig,
    #[serde(default)]
    delivery_accounting: DeliveryAccounting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub starting_money:      Money,
    pub starting_stock:      BTreeMap<Produce, Quantity>,
    pub families:            Vec<FamilyConfig>,
    pub market:              MarketConfig,
    pub upgrades:            UpgradeConfig,
    pub delivery_accounting: DeliveryAccounting,
}

impl SimConfig {
    /// Load from `{data_dir}/families.json` and `{data_dir}/economy.json`.
    /// In tests, use SimConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let families_path = format!("{data_dir}/families.json");
        let families_content = std::fs::read_to_string(&families_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {families_path}: {e}"))?;
        let families_file: FamiliesFile = serde_json::from_str(&families_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {families_path}: {e}"))?;

        let economy_path = format!("{data_dir}/economy.json");
        let economy_content = std::fs::read_to_string(&economy_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {economy_path}: {e}"))?;
        let economy: EconomyFile = serde_json::from_str(&economy_content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {economy_path}: {e}"))?;

        let config = SimConfig {
            starting_money:      economy.starting_money,
            starting_stock:      economy.starting_stock,
            families:            families_file.families,
            market:              economy.market,
            upgrades:            economy.upgrades,
            delivery_accounting: economy.delivery_accounting,
        };
        config.validate()?;

        log::info!(
            "config: loaded {} families, {} priced produce from {data_dir}",
            config.families.len(),
            config.market.initial_prices.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.families.len() != FAMILY_COUNT {
            anyhow::bail!(
                "expected {FAMILY_COUNT} families, found {}",
                self.families.len()
            );
        }
        for produce in Produce::ALL {
            match self.market.initial_prices.get(&produce) {
                Some(0) => anyhow::bail!("initial price of {} must be at least 1", produce.id()),
                Some(_) => {}
                None => anyhow::bail!("no initial price for {}", produce.id()),
            }
        }
        if self.market.max_drift_pct < 0 {
            anyhow::bail!("max_drift_pct must not be negative");
        }
        Ok(())
    }

    pub fn with_delivery_accounting(mut self, accounting: DeliveryAccounting) -> Self {
        self.delivery_accounting = accounting;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let family = |name: &str| FamilyConfig {
            name:       name.into(),
            daily_need: Nutrition::new(250, 8, 50, 6),
        };

        Self {
            starting_money: 1000,
            starting_stock: BTreeMap::from([
                (Produce::Rice, 8),
                (Produce::Beans, 8),
                (Produce::Vegetables, 8),
            ]),
            families: vec![
                family("Alder"),
                family("Birch"),
                family("Cedar"),
                family("Dogwood"),
            ],
            market: MarketConfig {
                initial_prices: BTreeMap::from([
                    (Produce::Rice, 20),
                    (Produce::Beans, 25),
                    (Produce::Vegetables, 30),
                ]),
                max_drift_pct: DEFAULT_MAX_DRIFT_PCT,
            },
            upgrades: UpgradeConfig::default(),
            delivery_accounting: DeliveryAccounting::default(),
        }
    }
}
