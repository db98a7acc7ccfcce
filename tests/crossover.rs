use pretty_assertions::assert_eq;
use sma_crossover_bot::{Action, CrossoverSignalEngine, PositionState, SignalError};

fn actions(engine: &mut CrossoverSignalEngine, prices: &[f64]) -> Vec<Action> {
    prices
        .iter()
        .map(|p| engine.observe(*p).unwrap().action)
        .collect()
}

#[test]
fn reference_scenario_period_three() {
    let mut engine = CrossoverSignalEngine::new(3, 10).unwrap();

    let third = {
        engine.observe(1.0).unwrap();
        engine.observe(1.0).unwrap();
        engine.observe(1.0).unwrap()
    };
    assert_eq!(third.action, Action::None);
    assert_eq!(third.moving_average, Some(1.0));
    assert!(!engine.has_position());

    let fourth = engine.observe(5.0).unwrap();
    assert_eq!(fourth.action, Action::Enter);
    assert_eq!(fourth.target_quantity, 10);
    assert_eq!(fourth.current_price, 5.0);
    let ma = fourth.moving_average.unwrap();
    assert!((ma - 2.333_333).abs() < 1e-6, "ma = {ma}");
    assert_eq!(engine.window().collect::<Vec<_>>(), vec![1.0, 1.0, 5.0]);
}

#[test]
fn rising_series_through_constant_mean_enters_once() {
    // A flat base at 100 holds the mean in place; the ramp then climbs through it.
    let period = 20;
    let mut prices = vec![100.0; period];
    prices.push(99.0);
    prices.extend((1..=30).map(|i| 99.0 + i as f64 * 0.5));

    let mut engine = CrossoverSignalEngine::new(period, 20).unwrap();
    let acts = actions(&mut engine, &prices);

    let enters: Vec<usize> = acts
        .iter()
        .enumerate()
        .filter(|(_, a)| **a == Action::Enter)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(enters.len(), 1, "{acts:?}");
    assert!(!acts.contains(&Action::Exit));
    // Dip to 99, recover to 99.5 (still under a mean of 99.925), then 100 crosses.
    assert_eq!(prices[enters[0]], 100.0);
    assert_eq!(engine.position(), PositionState::Long);
}

#[test]
fn signals_alternate_strictly() {
    let mut engine = CrossoverSignalEngine::new(5, 3).unwrap();
    let prices: Vec<f64> = (0..400)
        .map(|i| 100.0 + 10.0 * ((i as f64) * 0.37).sin() + ((i * 7919) % 13) as f64 * 0.3)
        .collect();
    let signals: Vec<Action> = actions(&mut engine, &prices)
        .into_iter()
        .filter(|a| *a != Action::None)
        .collect();

    assert!(!signals.is_empty());
    assert_eq!(signals[0], Action::Enter);
    for pair in signals.windows(2) {
        assert_ne!(pair[0], pair[1], "duplicate signal in {signals:?}");
    }
}

#[test]
fn warm_up_is_exactly_period_minus_one_bars() {
    let mut engine = CrossoverSignalEngine::new(20, 20).unwrap();
    for i in 0..19 {
        let d = engine.observe(50.0 + i as f64).unwrap();
        assert_eq!(d.action, Action::None);
        assert!(d.moving_average.is_none());
    }
    let d = engine.observe(69.0).unwrap();
    // mean of 50..=69
    assert_eq!(d.moving_average, Some(59.5));
}

#[test]
fn rejected_price_leaves_engine_untouched() {
    let mut engine = CrossoverSignalEngine::new(3, 10).unwrap();
    engine.observe(1.0).unwrap();
    engine.observe(1.0).unwrap();

    let err = engine.observe(f64::NAN).unwrap_err();
    assert!(matches!(err, SignalError::InvalidInput(_)));
    assert_eq!(engine.window().len(), 2);
    assert_eq!(engine.observations(), 2);
    assert!(!engine.has_position());

    // The stream continues as if the bad bar never arrived.
    engine.observe(1.0).unwrap();
    assert_eq!(engine.observe(5.0).unwrap().action, Action::Enter);
}
