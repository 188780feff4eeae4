//! Households and the satisfaction rule that can end the game.

use crate::{
    nutrition::Nutrition,
    produce::Produce,
    types::Quantity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub name:       String,
    pub daily_need: Nutrition,
    /// Deliveries made today. Cleared at settlement.
    pub assigned:   BTreeMap<Produce, Quantity>,
    /// Nutrition carried over from earlier days.
    pub stockpile:  Nutrition,
}

impl Family {
    pub fn new(name: impl Into<String>, daily_need: Nutrition) -> Self {
        Self {
            name: name.into(),
            daily_need,
            assigned: BTreeMap::new(),
            stockpile: Nutrition::ZERO,
        }
    }

    pub fn with_stockpile(mut self, stockpile: Nutrition) -> Self {
        self.stockpile = stockpile;
        self
    }

    /// Nutrition of everything delivered today.
    pub fn received_today(&self) -> Nutrition {
        self.assigned
            .iter()
            .map(|(p, &qty)| p.nutrition_per_unit() * qty)
            .sum()
    }

    pub fn available(&self) -> Nutrition {
        self.stockpile + self.received_today()
    }

    pub fn is_satisfied(&self) -> bool {
        self.available().covers(&self.daily_need)
    }

    /// What is still missing before the family is satisfied.
    pub fn remaining_need(&self) -> Nutrition {
        self.available().shortfall(&self.daily_need)
    }

    /// Record a delivery in today's `assigned` map.
    pub fn receive(&self, produce: Produce, qty: Quantity) -> Family {
        let mut next = self.clone();
        let entry = next.assigned.entry(produce).or_insert(0);
        *entry = entry.saturating_add(qty);
        next
    }

    /// Add nutrition straight to the stockpile.
    pub fn credit_stockpile(&self, nutrition: Nutrition) -> Family {
        Family {
            stockpile: self.stockpile + nutrition,
            ..self.clone()
        }
    }

    /// End-of-day consumption: eat the daily need out of stockpile plus
    /// today's deliveries, roll the rest forward, and clear `assigned`.
    pub fn settle(&self) -> Family {
        Family {
            name:       self.name.clone(),
            daily_need: self.daily_need,
            assigned:   BTreeMap::new(),
            stockpile:  self.available() - self.daily_need,
        }
    }
}
