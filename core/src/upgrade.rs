//! Upgrade economy: what the next level costs and buying it.

use crate::{
    config::UpgradeConfig,
    error::ActionError,
    farm::{Farm, UpgradeTrack, MAX_UPGRADE_LEVEL},
    state::GameState,
    types::Money,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeQuote {
    /// The level the purchase brings the track to.
    pub level: u8,
    pub price: Money,
}

/// Price of reaching `level` (1-based). Levels past the curve cost the
/// fallback.
pub fn level_cost(config: &UpgradeConfig, level: u8) -> Money {
    let index = usize::from(level).saturating_sub(1);
    config
        .cost_curve
        .get(index)
        .copied()
        .unwrap_or(config.fallback_cost)
}

/// `None` when the track is maxed out.
pub fn next_cost(config: &UpgradeConfig, farm: &Farm, track: UpgradeTrack) -> Option<UpgradeQuote> {
    let current = farm.level(track);
    if current >= MAX_UPGRADE_LEVEL {
        return None;
    }
    let level = current + 1;
    Some(UpgradeQuote { level, price: level_cost(config, level) })
}

/// Raise `track` one level and pay for it, or fail with nothing changed.
pub fn buy(
    config: &UpgradeConfig,
    state: &GameState,
    track: UpgradeTrack,
) -> Result<(GameState, UpgradeQuote), ActionError> {
    let quote = next_cost(config, &state.farm, track)
        .ok_or(ActionError::MaxLevel { track })?;

    if state.money < quote.price {
        return Err(ActionError::InsufficientFunds {
            price: quote.price,
            money: state.money,
        });
    }

    let next = GameState {
        farm:  state.farm.with_level(track, quote.level),
        money: state.money - quote.price,
        ..state.clone()
    };
    Ok((next, quote))
}
