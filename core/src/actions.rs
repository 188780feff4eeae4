//! Player actions on the working state.
//!
//! RULES:
//!   - Every action takes the current state by reference and returns either
//!     a new state plus the event describing it, or an ActionError.
//!   - A rejected action changes nothing.
//!   - Only `sell` reads the market; no action writes it.

use crate::{
    config::{DeliveryAccounting, UpgradeConfig},
    error::ActionError,
    event::GameEvent,
    farm::UpgradeTrack,
    market::Market,
    produce::Produce,
    state::GameState,
    types::Quantity,
    upgrade,
};

/// An accepted action: the state to install and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: GameState,
    pub event: GameEvent,
}

fn check_tile(state: &GameState, tile: usize) -> Result<(), ActionError> {
    match state.tile(tile) {
        Some(_) => Ok(()),
        None => Err(ActionError::TileOutOfRange { tile }),
    }
}

fn check_quantity(qty: Quantity) -> Result<(), ActionError> {
    if qty == 0 {
        return Err(ActionError::ZeroQuantity);
    }
    Ok(())
}

pub fn plant(state: &GameState, tile: usize, produce: Produce) -> Result<Step, ActionError> {
    check_tile(state, tile)?;
    let current = state.grid[tile];
    if !current.is_empty() {
        return Err(ActionError::TileOccupied { tile });
    }

    let mut next = state.clone();
    next.grid[tile] = current.plant(produce);

    Ok(Step {
        state: next,
        event: GameEvent::CropPlanted { day: state.day, tile, produce },
    })
}

/// Harvest a mature tile into storage. Each harvest yields
/// `farm.yield_per_harvest()` units.
pub fn harvest(state: &GameState, tile: usize) -> Result<Step, ActionError> {
    check_tile(state, tile)?;
    let current = state.grid[tile];
    if current.is_empty() {
        return Err(ActionError::TileEmpty { tile });
    }

    let (cleared, produce) = current.harvest();
    let produce = produce.ok_or(ActionError::NotMature { tile })?;
    let quantity = state.farm.yield_per_harvest();

    let mut next = state.clone();
    next.grid[tile] = cleared;
    next.storage = state.storage.deposit(produce, quantity);

    Ok(Step {
        state: next,
        event: GameEvent::CropHarvested { day: state.day, tile, produce, quantity },
    })
}

/// Deliver produce from storage to a family.
///
/// Storage is withdrawn first; if that fails nothing else happens. Under
/// `DeliveryAccounting::CreditStockpile` the delivered nutrition also goes
/// into the stockpile immediately.
pub fn assign(
    state: &GameState,
    family: usize,
    produce: Produce,
    qty: Quantity,
    accounting: DeliveryAccounting,
) -> Result<Step, ActionError> {
    check_quantity(qty)?;
    let current = state
        .family(family)
        .ok_or(ActionError::FamilyOutOfRange { family })?;

    let storage = state.storage.withdraw(produce, qty)?;

    let mut delivered = current.receive(produce, qty);
    if accounting == DeliveryAccounting::CreditStockpile {
        delivered = delivered.credit_stockpile(produce.nutrition_per_unit() * qty);
    }

    let mut next = state.clone();
    next.storage = storage;
    next.families[family] = delivered;

    Ok(Step {
        state: next,
        event: GameEvent::ProduceAssigned { day: state.day, family, produce, quantity: qty },
    })
}

/// Sell from storage at today's market price.
pub fn sell(
    state: &GameState,
    market: &Market,
    produce: Produce,
    qty: Quantity,
) -> Result<Step, ActionError> {
    check_quantity(qty)?;
    let (unit_price, revenue) = market
        .price(produce)
        .zip(market.sell(produce, qty))
        .ok_or(ActionError::NotTraded { produce })?;
    let storage = state.storage.withdraw(produce, qty)?;

    let next = GameState {
        storage,
        money: state.money.saturating_add(revenue),
        ..state.clone()
    };

    Ok(Step {
        state: next,
        event: GameEvent::ProduceSold { day: state.day, produce, quantity: qty, unit_price, revenue },
    })
}

pub fn buy_upgrade(
    config: &UpgradeConfig,
    state: &GameState,
    track: UpgradeTrack,
) -> Result<Step, ActionError> {
    let (next, quote) = upgrade::buy(config, state, track)?;
    Ok(Step {
        state: next,
        event: GameEvent::UpgradePurchased {
            day:   state.day,
            track,
            level: quote.level,
            price: quote.price,
        },
    })
}
