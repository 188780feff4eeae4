//! Produce inventory ledger.

use crate::{
    error::ActionError,
    produce::Produce,
    types::Quantity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Produce → quantity. An absent key means zero; zero entries are removed
/// so two ledgers holding the same goods compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Storage {
    stock: BTreeMap<Produce, Quantity>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_stock(stock: impl IntoIterator<Item = (Produce, Quantity)>) -> Self {
        stock
            .into_iter()
            .fold(Storage::new(), |s, (produce, qty)| s.deposit(produce, qty))
    }

    pub fn quantity(&self, produce: Produce) -> Quantity {
        self.stock.get(&produce).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Produce, Quantity)> + '_ {
        self.stock.iter().map(|(&p, &q)| (p, q))
    }

    pub fn deposit(&self, produce: Produce, qty: Quantity) -> Storage {
        if qty == 0 {
            return self.clone();
        }
        let mut next = self.clone();
        let entry = next.stock.entry(produce).or_insert(0);
        *entry = entry.saturating_add(qty);
        next
    }

    /// Remove `qty` units, or fail leaving nothing changed.
    pub fn withdraw(&self, produce: Produce, qty: Quantity) -> Result<Storage, ActionError> {
        let available = self.quantity(produce);
        if qty > available {
            return Err(ActionError::InsufficientStock {
                produce,
                requested: qty,
                available,
            });
        }
        let mut next = self.clone();
        let remaining = available - qty;
        if remaining == 0 {
            next.stock.remove(&produce);
        } else {
            next.stock.insert(produce, remaining);
        }
        Ok(next)
    }
}
