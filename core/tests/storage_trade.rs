use homestead_core::{
    actions,
    config::{DeliveryAccounting, SimConfig},
    error::ActionError,
    event::GameEvent,
    market::Market,
    produce::Produce,
    state::GameState,
    storage::Storage,
};

fn state_with_five_beans() -> GameState {
    let mut state = GameState::new_game(&SimConfig::default()).unwrap();
    state.storage = Storage::from_stock([(Produce::Beans, 5)]);
    state
}

fn market() -> Market {
    Market::new([(Produce::Rice, 20), (Produce::Beans, 25), (Produce::Vegetables, 30)], 1)
}

#[test]
fn withdraw_more_than_stock_fails_and_keeps_stock() {
    let storage = Storage::from_stock([(Produce::Beans, 5)]);

    assert_eq!(
        storage.withdraw(Produce::Beans, 6),
        Err(ActionError::InsufficientStock { produce: Produce::Beans, requested: 6, available: 5 })
    );
    assert_eq!(storage.quantity(Produce::Beans), 5);

    let emptied = storage.withdraw(Produce::Beans, 5).unwrap();
    assert_eq!(emptied.quantity(Produce::Beans), 0);
    assert_eq!(emptied, Storage::new());
}

#[test]
fn absent_produce_reads_as_zero() {
    let storage = Storage::new();
    assert_eq!(storage.quantity(Produce::Rice), 0);
    assert!(storage.withdraw(Produce::Rice, 1).is_err());
}

#[test]
fn assign_over_stock_fails_then_exact_stock_succeeds() {
    let state = state_with_five_beans();

    let too_many = actions::assign(&state, 0, Produce::Beans, 6, DeliveryAccounting::CreditStockpile);
    assert!(matches!(too_many, Err(ActionError::InsufficientStock { .. })));
    assert_eq!(state.storage.quantity(Produce::Beans), 5);
    assert!(state.families[0].assigned.is_empty());

    let all = actions::assign(&state, 0, Produce::Beans, 5, DeliveryAccounting::CreditStockpile).unwrap();
    assert_eq!(all.state.storage.quantity(Produce::Beans), 0);
    assert_eq!(all.state.families[0].assigned.get(&Produce::Beans), Some(&5));
}

#[test]
fn sell_over_stock_fails_then_exact_stock_succeeds() {
    let state = state_with_five_beans();
    let market = market();

    let too_many = actions::sell(&state, &market, Produce::Beans, 6);
    assert!(matches!(too_many, Err(ActionError::InsufficientStock { .. })));
    assert_eq!(state.storage.quantity(Produce::Beans), 5);

    let sold = actions::sell(&state, &market, Produce::Beans, 5).unwrap();
    assert_eq!(sold.state.storage.quantity(Produce::Beans), 0);
    assert_eq!(sold.state.money, state.money + 5 * 25);
}

#[test]
fn sale_uses_the_price_in_effect_at_call_time() {
    let state = state_with_five_beans();
    let today = market();
    let tomorrow = today.next_day();

    let sold = actions::sell(&state, &today, Produce::Beans, 2).unwrap();

    assert_eq!(sold.state.money, state.money + 50);
    assert_eq!(today.sell(Produce::Beans, 2), Some(50));
    assert_eq!(tomorrow.yesterday_price(Produce::Beans), Some(25));
}

#[test]
fn zero_quantity_is_rejected() {
    let state = state_with_five_beans();

    assert_eq!(actions::sell(&state, &market(), Produce::Beans, 0), Err(ActionError::ZeroQuantity));
    assert_eq!(
        actions::assign(&state, 0, Produce::Beans, 0, DeliveryAccounting::CreditStockpile),
        Err(ActionError::ZeroQuantity)
    );
}

#[test]
fn unpriced_produce_cannot_be_sold() {
    let state = state_with_five_beans();
    let market = Market::new([(Produce::Rice, 20)], 1);

    assert_eq!(
        actions::sell(&state, &market, Produce::Beans, 1),
        Err(ActionError::NotTraded { produce: Produce::Beans })
    );
}

#[test]
fn sale_revenue_is_the_market_quote() {
    let state = state_with_five_beans();
    let pricey = Market::new([(Produce::Beans, u64::MAX)], 1);

    let sold = actions::sell(&state, &pricey, Produce::Beans, 3).unwrap();

    assert_eq!(pricey.sell(Produce::Beans, 3), Some(u64::MAX));
    assert_eq!(sold.state.money, u64::MAX);
    assert_eq!(
        sold.event,
        GameEvent::ProduceSold {
            day:        1,
            produce:    Produce::Beans,
            quantity:   3,
            unit_price: u64::MAX,
            revenue:    u64::MAX,
        }
    );
}
