mod common;

use chrono::{Datelike, NaiveDate};
use market_simulator::domain_types::{Accuracy, SymbolTable};
use market_simulator::simulation::{Forecaster, FixedClock, PriceWalker, RngSource, SeriesGenerator};
use market_simulator::validator::SeriesValidator;
use proptest::prelude::*;

fn any_symbol() -> impl Strategy<Value = String> {
    let known: Vec<String> = SymbolTable::builtin()
        .list()
        .iter()
        .map(|profile| profile.symbol.to_string())
        .collect();
    prop_oneof![
        proptest::sample::select(known),
        "[A-Z]{1,6}",
    ]
}

fn any_anchor() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

proptest! {
    #[test]
    fn prop_walker_quote_is_consistent(prev_close in 0.5f64..100_000.0, seed in any::<u64>()) {
        let quote = PriceWalker::default().next_bar(prev_close, &mut RngSource::seeded(seed));
        prop_assert!(quote.is_consistent(), "{:?}", quote);
        prop_assert!(quote.low > 0.0);
    }

    #[test]
    fn prop_generated_series_is_valid(
        days in 0u32..200,
        symbol in any_symbol(),
        anchor in any_anchor(),
        seed in any::<u64>(),
    ) {
        let generator = SeriesGenerator::new(FixedClock(anchor));
        let series = generator.generate(days, &symbol, &mut RngSource::seeded(seed));

        for bar in &series {
            prop_assert!(bar.low <= bar.open && bar.open <= bar.high);
            prop_assert!(bar.low <= bar.close && bar.close <= bar.high);
            prop_assert!(bar.date.weekday().number_from_monday() <= 5);
            prop_assert!(bar.date <= anchor);
        }
        for pair in series.bars().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }

        // 閉區間共 days + 1 天，週末最多佔 2/7 再加上一個週末
        if days > 0 {
            let expected = days as f64 * 5.0 / 7.0;
            prop_assert!((series.len() as f64 - expected).abs() <= 3.0);
        }

        prop_assert!(SeriesValidator::new().validate(&series).is_valid());
    }

    #[test]
    fn prop_append_prediction_shape(
        days in 1u32..120,
        accuracy in 50.0f64..=100.0,
        seed in any::<u64>(),
    ) {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let mut rng = RngSource::seeded(seed);
        let series = SeriesGenerator::new(FixedClock(anchor)).generate(days, "AAPL", &mut rng);
        prop_assume!(!series.is_empty());
        let before = series.clone();

        let forecaster = Forecaster::default();
        let accuracy = Accuracy::new(accuracy).unwrap();
        let prediction = forecaster.predict(&series, accuracy, &mut rng).unwrap();
        let extended = forecaster.append_prediction(&series, prediction, &mut rng);

        prop_assert_eq!(&series, &before);
        prop_assert_eq!(extended.len(), series.len() + 1);
        let last = extended.last().unwrap();
        prop_assert_eq!(last.close, prediction);
        prop_assert_eq!(last.predicted, Some(prediction));
        prop_assert!(last.date > series.last().unwrap().date);
        prop_assert!(SeriesValidator::new().validate(&extended).is_valid());
    }
}
