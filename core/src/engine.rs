//! The end-of-day transition: the heart of the simulation.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Gate        every family satisfied, checked on the pre-transition state
//!   2. Settlement  families eat, surplus rolls into the stockpile
//!   3. Growth      every tile grows one day plus the irrigation bonus
//!   4. Calendar    day += 1, money and farm carried over
//!   5. Market      prices take one random-walk step
//!
//! RULES:
//!   - The gate is a pure precondition. If it fails nothing is advanced.
//!   - Steps 2–5 build a new state and market; either both are returned or
//!     neither is.

use crate::{
    error::GameOver,
    market::Market,
    state::GameState,
};

/// The pair the session installs after a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAdvance {
    pub state:  GameState,
    pub market: Market,
}

/// Advance one day, or report that a family went hungry.
pub fn end_day(state: &GameState, market: &Market) -> Result<DayAdvance, GameOver> {
    let day = state.day;

    // 1. Gate
    if let Some(hungry) = state.families.iter().find(|f| !f.is_satisfied()) {
        let missing = hungry.remaining_need();
        log::info!("day={day} engine: {} went hungry, short {missing}", hungry.name);
        return Err(GameOver {
            day,
            family: hungry.name.clone(),
            reason: format!("The {} family's needs went unmet (short {missing})", hungry.name),
        });
    }

    // 2. Settlement
    let families = state.families.clone().map(|f| f.settle());

    // 3. Growth
    let bonus = state.farm.growth_bonus_days();
    let grid = state.grid.map(|tile| tile.grow_one_day(bonus));

    // 4. Calendar
    let next = GameState {
        families,
        grid,
        farm:    state.farm,
        storage: state.storage.clone(),
        day:     day + 1,
        money:   state.money,
    };

    // 5. Market
    let market = market.next_day();

    log::debug!(
        "day={day} engine: advanced to day {} with {} mature tiles, prices {:?}",
        next.day,
        next.mature_tiles().len(),
        market.prices()
    );

    Ok(DayAdvance { state: next, market })
}
