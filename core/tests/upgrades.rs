use homestead_core::{
    actions,
    config::{SimConfig, UpgradeConfig},
    error::ActionError,
    farm::{Farm, UpgradeTrack, MAX_UPGRADE_LEVEL},
    state::GameState,
    upgrade::{self, UpgradeQuote},
};

fn rich_state(money: u64) -> GameState {
    let mut state = GameState::new_game(&SimConfig::default()).unwrap();
    state.money = money;
    state
}

#[test]
fn level_two_quotes_two_thousand_for_level_three() {
    let config = UpgradeConfig::default();
    let farm = Farm { irrigation_level: 2, yield_level: 0 };

    assert_eq!(
        upgrade::next_cost(&config, &farm, UpgradeTrack::Irrigation),
        Some(UpgradeQuote { level: 3, price: 2000 })
    );
    assert_eq!(
        upgrade::next_cost(&config, &farm, UpgradeTrack::Yield),
        Some(UpgradeQuote { level: 1, price: 500 })
    );
}

#[test]
fn buying_at_max_level_fails() {
    let config = UpgradeConfig::default();
    let mut state = rich_state(10_000);
    state.farm.yield_level = MAX_UPGRADE_LEVEL;

    assert_eq!(upgrade::next_cost(&config, &state.farm, UpgradeTrack::Yield), None);
    assert_eq!(
        upgrade::buy(&config, &state, UpgradeTrack::Yield),
        Err(ActionError::MaxLevel { track: UpgradeTrack::Yield })
    );
}

#[test]
fn buying_without_enough_money_fails() {
    let config = UpgradeConfig::default();
    let state = rich_state(499);

    assert_eq!(
        upgrade::buy(&config, &state, UpgradeTrack::Irrigation),
        Err(ActionError::InsufficientFunds { price: 500, money: 499 })
    );
}

#[test]
fn buying_raises_level_and_deducts_price() {
    let config = UpgradeConfig::default();
    let state = rich_state(500);

    let (next, quote) = upgrade::buy(&config, &state, UpgradeTrack::Irrigation).unwrap();

    assert_eq!(quote, UpgradeQuote { level: 1, price: 500 });
    assert_eq!(next.farm.irrigation_level, 1);
    assert_eq!(next.farm.yield_level, 0);
    assert_eq!(next.money, 0);
    assert_eq!(next.farm.growth_bonus_days(), 1);
}

#[test]
fn full_track_costs_the_whole_curve() {
    let config = UpgradeConfig::default();
    let mut state = rich_state(3500);

    for _ in 0..MAX_UPGRADE_LEVEL {
        state = actions::buy_upgrade(&config, &state, UpgradeTrack::Yield).unwrap().state;
    }

    assert_eq!(state.farm.yield_level, 3);
    assert_eq!(state.farm.yield_per_harvest(), 4);
    assert_eq!(state.money, 0);
}

#[test]
fn levels_past_the_curve_use_the_fallback_cost() {
    let short = UpgradeConfig { cost_curve: vec![300], fallback_cost: 1000 };

    assert_eq!(upgrade::level_cost(&short, 1), 300);
    assert_eq!(upgrade::level_cost(&short, 2), 1000);
    assert_eq!(upgrade::level_cost(&short, 3), 1000);
}
