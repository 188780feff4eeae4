use homestead_core::{
    actions,
    config::{DeliveryAccounting, SimConfig},
    crop::CropTile,
    engine::end_day,
    market::Market,
    produce::Produce,
    state::GameState,
};

fn start() -> (SimConfig, GameState, Market) {
    let config = SimConfig::default();
    let state = GameState::new_game(&config).unwrap();
    let market = Market::new(config.market.initial_prices.clone(), 42);
    (config, state, market)
}

/// One unit of each produce per family covers the reference daily need.
fn feed_everyone(state: &GameState, accounting: DeliveryAccounting) -> GameState {
    let mut fed = state.clone();
    for family in 0..fed.families.len() {
        for produce in Produce::ALL {
            fed = actions::assign(&fed, family, produce, 1, accounting).unwrap().state;
        }
    }
    fed
}

#[test]
fn unsatisfied_family_ends_the_game_without_advancing() {
    let (_, state, market) = start();
    let mut partly_fed = state.clone();
    for family in 0..3 {
        for produce in Produce::ALL {
            partly_fed = actions::assign(&partly_fed, family, produce, 1, DeliveryAccounting::CreditStockpile)
                .unwrap()
                .state;
        }
    }
    let before = partly_fed.clone();

    let over = end_day(&partly_fed, &market).unwrap_err();

    assert_eq!(over.day, 1);
    assert_eq!(over.family, "Dogwood");
    assert!(over.reason.contains("Dogwood"));
    assert_eq!(partly_fed, before, "game over must leave the state untouched");
    assert_eq!(partly_fed.day, 1);
}

#[test]
fn new_game_with_nothing_assigned_is_game_over() {
    let (_, state, market) = start();
    assert!(end_day(&state, &market).is_err());
}

#[test]
fn satisfied_day_advances_everything_once() {
    let (_, state, market) = start();
    let mut state = feed_everyone(&state, DeliveryAccounting::CreditStockpile);
    state.farm.irrigation_level = 1;
    state.grid[0] = CropTile::empty().plant(Produce::Rice);
    state.grid[5] = CropTile::empty().plant(Produce::Beans).grow_one_day(0);

    let advance = end_day(&state, &market).unwrap();
    let next = advance.state;

    assert_eq!(next.day, state.day + 1);
    assert_eq!(next.money, state.money);
    assert_eq!(next.farm, state.farm);
    assert_eq!(next.storage, state.storage);
    for family in &next.families {
        assert!(family.assigned.is_empty(), "{} still has deliveries", family.name);
    }
    for (i, tile) in next.grid.iter().enumerate() {
        assert_eq!(*tile, state.grid[i].grow_one_day(1), "tile {i} grew wrongly");
    }
    assert_eq!(next.grid[0].days_grown(), 2);
    assert_eq!(next.grid[5].days_grown(), 3);
    assert!(next.grid[1].is_empty());
}

#[test]
fn settlement_rolls_surplus_forward() {
    let (config, state, market) = start();
    let fed = feed_everyone(&state, DeliveryAccounting::DeferToSettlement);

    let next = end_day(&fed, &market).unwrap().state;

    // 370 cal / 15 protein / 75 carbs / 11 vitamins delivered, need 250/8/50/6.
    let need = config.families[0].daily_need;
    for family in &next.families {
        assert_eq!(family.stockpile.cal, 370 - need.cal);
        assert_eq!(family.stockpile.protein, 15 - need.protein);
        assert_eq!(family.stockpile.carbs, 75 - need.carbs);
        assert_eq!(family.stockpile.vitamins, 11 - need.vitamins);
    }
}

#[test]
fn market_moves_in_the_same_step() {
    let (_, state, market) = start();
    let fed = feed_everyone(&state, DeliveryAccounting::CreditStockpile);

    let advance = end_day(&fed, &market).unwrap();

    assert_eq!(advance.market, market.next_day());
    for produce in Produce::ALL {
        assert_eq!(advance.market.yesterday_price(produce), market.price(produce));
    }
}

#[test]
fn stockpile_can_carry_a_family_through_a_day() {
    let (_, state, market) = start();
    let fed = feed_everyone(&state, DeliveryAccounting::CreditStockpile);
    let day_two = end_day(&fed, &market).unwrap();

    // Reference accounting leaves 2 * 370 - 250 = 490 calories banked.
    assert_eq!(day_two.state.families[0].stockpile.cal, 490);
    assert!(day_two.state.unsatisfied_families().is_empty());

    let day_three = end_day(&day_two.state, &day_two.market).unwrap();
    assert_eq!(day_three.state.day, 3);
}
