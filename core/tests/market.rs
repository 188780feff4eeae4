use homestead_core::{
    market::{drift, Market},
    produce::Produce,
};

fn market(seed: u64) -> Market {
    Market::new([(Produce::Rice, 20), (Produce::Beans, 25), (Produce::Vegetables, 30)], seed)
}

#[test]
fn drift_floors_toward_negative_infinity() {
    assert_eq!(drift(100, -5), 95);
    assert_eq!(drift(100, 5), 105);
    assert_eq!(drift(19, 5), 19);
    assert_eq!(drift(19, -5), 18);
    assert_eq!(drift(19, 0), 19);
}

#[test]
fn drift_never_goes_below_one() {
    for epsilon in -5..=5 {
        assert!(drift(1, epsilon) >= 1);
        assert!(drift(2, epsilon) >= 1);
    }
    assert_eq!(drift(1, -100), 1);
}

#[test]
fn prices_stay_positive_over_a_long_walk() {
    let mut m = Market::new([(Produce::Rice, 1), (Produce::Beans, 3)], 99);
    for day in 0..2000 {
        m = m.next_day();
        for (&produce, &price) in m.prices() {
            assert!(price >= 1, "day {day}: {produce} fell to {price}");
        }
    }
}

#[test]
fn each_step_stays_within_the_drift_bound() {
    let mut m = market(7);
    for _ in 0..500 {
        let next = m.next_day();
        for produce in Produce::ALL {
            let before = m.price(produce).unwrap() as i64;
            let after = next.price(produce).unwrap() as i64;
            let bound = before * 5 / 100 + 1;
            assert!((after - before).abs() <= bound, "{produce}: {before} -> {after}");
        }
        m = next;
    }
}

#[test]
fn delta_is_unavailable_until_the_first_step() {
    let day_one = market(3);
    for produce in Produce::ALL {
        assert_eq!(day_one.delta(produce), None);
        assert_eq!(day_one.yesterday_price(produce), None);
    }

    let day_two = day_one.next_day();
    for produce in Produce::ALL {
        let expected = day_two.price(produce).unwrap() as i64 - day_one.price(produce).unwrap() as i64;
        assert_eq!(day_two.delta(produce), Some(expected));
        assert_eq!(day_two.yesterday_price(produce), day_one.price(produce));
    }
}

#[test]
fn next_day_does_not_alter_the_original() {
    let today = market(11);
    let copy = today.clone();
    let _ = today.next_day();

    assert_eq!(today, copy);
}

#[test]
fn same_seed_same_price_path() {
    let mut a = market(0xBEEF);
    let mut b = market(0xBEEF);
    for _ in 0..60 {
        a = a.next_day();
        b = b.next_day();
    }
    assert_eq!(a.prices(), b.prices());
}

#[test]
fn different_seeds_diverge() {
    let mut a = market(1);
    let mut b = market(2);
    let mut diverged = false;
    for _ in 0..60 {
        a = a.next_day();
        b = b.next_day();
        diverged |= a.prices() != b.prices();
    }
    assert!(diverged, "Different seeds produced identical price paths");
}

#[test]
fn zero_drift_bound_freezes_prices() {
    let frozen = market(5).with_max_drift_pct(0);
    let next = frozen.next_day().next_day();

    assert_eq!(next.prices(), frozen.prices());
    assert_eq!(next.delta(Produce::Rice), Some(0));
}

#[test]
fn drift_is_exact_for_the_largest_prices() {
    assert_eq!(drift(u64::MAX, 5), u64::MAX);
    assert_eq!(drift(u64::MAX, 0), u64::MAX);
    assert_eq!(drift(u64::MAX, -5), u64::MAX - (u64::MAX / 20 + 1));

    let big = 1u64 << 61;
    assert_eq!(drift(big, 5), big + big / 20);
    assert_eq!(drift(big, -5), big - big / 20 - 1);
}

#[test]
fn huge_prices_survive_a_day_change() {
    let m = Market::new([(Produce::Rice, u64::MAX), (Produce::Beans, 1 << 61)], 4);
    let next = m.next_day();

    assert!(next.price(Produce::Rice).unwrap() >= u64::MAX - u64::MAX / 20 - 1);
    assert!(next.price(Produce::Beans).unwrap() >= (1 << 61) - (1 << 61) / 20 - 1);
}
