//! Property tests for the interpolation engine
//!
//! Checks the behaviour regulators care about at bracket edges: coverage,
//! continuity, monotonicity and the truncate-then-round discipline.

mod common;

use aqi_core::{AqiError, Decimal, IndexCalculator, Pollutant, Reading};
use proptest::prelude::*;

use common::{dec, epa_like_engine, step};

#[test]
fn every_value_in_the_domain_has_an_index() {
    let engine = epa_like_engine();

    for breakpoints in engine.table().iter() {
        let pollutant = breakpoints.pollutant();
        let step = step(breakpoints.precision());
        let mut value = breakpoints.min_concentration();

        while value <= breakpoints.max_concentration() {
            let result = engine.intermediate_index(pollutant, value);
            assert!(result.is_ok(), "{} {} -> {:?}", pollutant, value, result);
            value += step;
        }
    }
}

#[test]
fn adjacent_brackets_differ_by_one() {
    let engine = epa_like_engine();

    for breakpoints in engine.table().iter() {
        let pollutant = breakpoints.pollutant();
        for pair in breakpoints.brackets().windows(2) {
            let below = engine
                .intermediate_index(pollutant, pair[0].concentration_high)
                .unwrap();
            let above = engine
                .intermediate_index(pollutant, pair[1].concentration_low)
                .unwrap();

            assert_eq!(below.value(), pair[0].aqi_high);
            assert_eq!(above.value(), pair[1].aqi_low);
            assert_eq!(above.value() - below.value(), 1, "{} at {}", pollutant, pair[0].concentration_high);
        }
    }
}

#[test]
fn extra_digits_are_truncated_before_lookup() {
    let engine = epa_like_engine();

    // 12.049 must stay in the "Good" bracket
    assert_eq!(engine.intermediate_index(Pollutant::Pm25, dec("12.049")).unwrap().value(), 50);
    assert_eq!(engine.intermediate_index(Pollutant::Pm25, dec("12.099")).unwrap().value(), 50);
    // 0.0709 ppm ozone truncates to 0.070
    assert_eq!(
        engine.intermediate_index(Pollutant::O3EightHour, dec("0.0709")).unwrap().value(),
        100
    );
}

#[test]
fn known_values() {
    let engine = epa_like_engine();
    let cases = [
        (Pollutant::Pm25, "35.9", 102),
        (Pollutant::Pm25, "55.4", 150),
        (Pollutant::Pm25, "500.4", 500),
        (Pollutant::Pm10, "155", 101),
        (Pollutant::Pm10, "604", 500),
        (Pollutant::O3EightHour, "0.078", 126),
    ];

    for (pollutant, text, expected) in cases {
        assert_eq!(
            engine.intermediate_index_str(pollutant, text).unwrap().value(),
            expected,
            "{} {}",
            pollutant,
            text
        );
    }
}

#[test]
fn above_the_last_bracket_is_rejected() {
    let engine = epa_like_engine();

    for (pollutant, text) in [
        (Pollutant::Pm25, "500.5"),
        (Pollutant::Pm10, "605"),
        (Pollutant::O3EightHour, "0.201"),
    ] {
        assert!(matches!(
            engine.intermediate_index_str(pollutant, text),
            Err(AqiError::OutOfRange { .. })
        ));
    }
}

#[test]
fn aggregation_picks_the_worst_pollutant() {
    let engine = epa_like_engine();
    let readings = [
        Reading::parse(Pollutant::Pm25, "10.0").unwrap(),
        Reading::parse(Pollutant::Pm10, "120").unwrap(),
    ];

    assert_eq!(engine.intermediate_index(readings[0].pollutant, readings[0].concentration).unwrap().value(), 42);
    assert_eq!(engine.intermediate_index(readings[1].pollutant, readings[1].concentration).unwrap().value(), 83);
    assert_eq!(engine.index(&readings).unwrap().value(), 83);

    let assessment = engine.assess(&readings).unwrap();
    assert_eq!(assessment.dominant, Pollutant::Pm10);
    assert_eq!(engine.index(&[]), Err(AqiError::EmptyInput));
}

#[test]
fn engine_shared_between_threads() {
    let engine = std::sync::Arc::new(epa_like_engine());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .intermediate_index(Pollutant::Pm10, Decimal::from(50 * i))
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap().value()).collect();
    assert_eq!(results, vec![0, 46, 73, 98]);
}

proptest! {
    #[test]
    fn pm25_is_monotonic(a in 0i64..=5004, b in 0i64..=5004) {
        let engine = epa_like_engine();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let low = engine.intermediate_index(Pollutant::Pm25, Decimal::new(lo, 1)).unwrap();
        let high = engine.intermediate_index(Pollutant::Pm25, Decimal::new(hi, 1)).unwrap();
        prop_assert!(low <= high);
    }

    #[test]
    fn pm10_is_monotonic(a in 0i64..=604, b in 0i64..=604) {
        let engine = epa_like_engine();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let low = engine.intermediate_index(Pollutant::Pm10, Decimal::from(lo)).unwrap();
        let high = engine.intermediate_index(Pollutant::Pm10, Decimal::from(hi)).unwrap();
        prop_assert!(low <= high);
    }

    #[test]
    fn digits_beyond_precision_never_change_the_index(tenths in 0i64..=5004, extra in 0i64..100) {
        let engine = epa_like_engine();
        let exact = Decimal::new(tenths, 1);
        let noisy = Decimal::new(tenths * 100 + extra, 3);

        prop_assert_eq!(
            engine.intermediate_index(Pollutant::Pm25, exact),
            engine.intermediate_index(Pollutant::Pm25, noisy)
        );
    }

    #[test]
    fn calls_are_idempotent(tenths in 0i64..=5004) {
        let engine = epa_like_engine();
        let value = Decimal::new(tenths, 1);

        prop_assert_eq!(
            engine.intermediate_index(Pollutant::Pm25, value),
            engine.intermediate_index(Pollutant::Pm25, value)
        );
    }

    #[test]
    fn index_is_order_independent(pm25 in 0i64..=5004, pm10 in 0i64..=604) {
        let engine = epa_like_engine();
        let a = Reading::new(Pollutant::Pm25, Decimal::new(pm25, 1));
        let b = Reading::new(Pollutant::Pm10, Decimal::from(pm10));

        prop_assert_eq!(engine.index(&[a, b]), engine.index(&[b, a]));
        prop_assert_eq!(
            engine.index(&[a, b]).unwrap(),
            IndexCalculator::index(&engine, &[a]).unwrap().max(engine.index(&[b]).unwrap())
        );
    }
}
