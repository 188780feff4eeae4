//! Market prices and their daily random walk.
//!
//! Each produce moves independently by a whole-percent step drawn
//! uniformly from [-max_drift_pct, +max_drift_pct]. Prices never drop
//! below 1.

use crate::{
    produce::Produce,
    rng::{RngBank, RngStream, StreamRng},
    types::{Price, Quantity},
};
use std::collections::BTreeMap;

pub const DEFAULT_MAX_DRIFT_PCT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    prices:        BTreeMap<Produce, Price>,
    yesterday:     BTreeMap<Produce, Price>,
    max_drift_pct: i64,
    rng:           StreamRng,
}

impl Market {
    /// Build a market with no price history. Zero prices are lifted to 1.
    pub fn new(prices: impl IntoIterator<Item = (Produce, Price)>, seed: u64) -> Self {
        Self {
            prices: prices.into_iter().map(|(p, price)| (p, price.max(1))).collect(),
            yesterday: BTreeMap::new(),
            max_drift_pct: DEFAULT_MAX_DRIFT_PCT,
            rng: RngBank::new(seed).for_stream(RngStream::Market),
        }
    }

    pub fn with_max_drift_pct(mut self, pct: i64) -> Self {
        self.max_drift_pct = pct.abs();
        self
    }

    pub fn price(&self, produce: Produce) -> Option<Price> {
        self.prices.get(&produce).copied()
    }

    pub fn yesterday_price(&self, produce: Produce) -> Option<Price> {
        self.yesterday.get(&produce).copied()
    }

    pub fn prices(&self) -> &BTreeMap<Produce, Price> {
        &self.prices
    }

    pub fn max_drift_pct(&self) -> i64 {
        self.max_drift_pct
    }

    /// Today's price minus yesterday's. `None` on the first day or right
    /// after a load.
    pub fn delta(&self, produce: Produce) -> Option<i64> {
        let today = self.price(produce)?;
        let before = self.yesterday_price(produce)?;
        Some(today as i64 - before as i64)
    }

    /// Revenue for selling `qty` at today's price. Storage is not touched.
    pub fn sell(&self, produce: Produce, qty: Quantity) -> Option<Price> {
        self.price(produce)
            .map(|price| price.saturating_mul(u64::from(qty)))
    }

    /// Advance prices one day. Today's prices become `yesterday`.
    pub fn next_day(&self) -> Market {
        let mut rng = self.rng.clone();
        let prices = self
            .prices
            .iter()
            .map(|(&produce, &price)| {
                let epsilon = rng.range_inclusive(-self.max_drift_pct, self.max_drift_pct);
                (produce, drift(price, epsilon))
            })
            .collect();

        Market {
            prices,
            yesterday: self.prices.clone(),
            max_drift_pct: self.max_drift_pct,
            rng,
        }
    }
}

/// `max(1, price + floor(price * epsilon / 100))`.
/// Computed in i128 so every `u64` price is exact; the result saturates
/// at `Price::MAX`.
pub fn drift(price: Price, epsilon_pct: i64) -> Price {
    let price = i128::from(price);
    let change = (price * i128::from(epsilon_pct)).div_euclid(100);
    (price + change).clamp(1, i128::from(Price::MAX)) as Price
}
