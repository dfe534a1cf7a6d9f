//! Property tests for the classifier, numeric coercion and the action
//! aggregator.

use proptest::prelude::*;
use ventil_core::diagnose::{Finding, RuleId};
use ventil_core::model::{Cell, Dataset, Role, Severity};
use ventil_core::parsing::header::{classify_headers, explain_headers};
use ventil_core::parsing::values::parse_number;
use ventil_core::parsing::NumericSeries;
use ventil_core::recommend::aggregate;

fn header() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9 _%/-]{0,20}",
        Just("SucPr1".to_string()),
        Just("Dischg2".to_string()),
        Just("Date".to_string()),
        Just("Time".to_string()),
        Just("Indoor Temp".to_string()),
        Just("OA RH".to_string()),
    ]
}

fn raw_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1.0e6f64..1.0e6).prop_map(|v| v.to_string()),
        "[a-z]{0,5}",
        Just(String::new()),
        Just("NaN".to_string()),
    ]
}

fn finding() -> impl Strategy<Value = Finding> {
    let pool = vec!["a", "b", "c", "d", "e", "f"];
    (
        1u8..=5,
        proptest::collection::vec(proptest::sample::select(pool), 0..5),
    )
        .prop_map(|(priority, suggestions)| {
            let mut f = Finding::new(
                RuleId::FrequentOutliers,
                Severity::Medium,
                "col",
                0.0,
                format!("p{priority}"),
            );
            f.priority = priority;
            f.suggestions = suggestions.into_iter().map(String::from).collect();
            f
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_classification_is_idempotent(headers in proptest::collection::vec(header(), 0..10)) {
        let first = classify_headers(&headers);
        let second = classify_headers(&headers);
        prop_assert_eq!(&first, &second);

        let (map, decisions) = explain_headers(&headers);
        prop_assert_eq!(&map, &first);
        prop_assert_eq!(decisions.len(), headers.len());
        for d in &decisions {
            prop_assert_eq!(map.role_of(d.index), d.role);
        }
    }

    #[test]
    fn prop_suction_and_pressure_is_suction_pressure(
        pre in "[xyz ]{0,5}",
        mid in "[ xyz]{0,5}",
        post in "[ xyz]{0,5}",
        upper in any::<bool>(),
    ) {
        let mut h = format!("{pre}suction{mid}pressure{post}");
        if upper {
            h = h.to_uppercase();
        }
        let map = classify_headers(&[h.as_str()]);
        prop_assert_eq!(map.role_of(0), Some(Role::SuctionPressure));
        prop_assert_eq!(map.classified_count(), 1);
    }

    #[test]
    fn prop_coercion_never_invents_values(cells in proptest::collection::vec(raw_cell(), 0..30)) {
        let rows: Vec<Vec<Cell>> = cells.iter().map(|c| vec![Cell::from_text(c)]).collect();
        let ds = Dataset::new(vec!["SucPr1".into()], rows).unwrap();
        let series = NumericSeries::from_column(&ds, 0);

        let expected: Vec<f64> = cells.iter().filter_map(|c| parse_number(c)).collect();
        prop_assert!(series.len() <= ds.row_count());
        prop_assert_eq!(series.values, expected);
    }

    #[test]
    fn prop_actions_unique_and_ranked(
        findings in proptest::collection::vec(finding(), 0..8),
        limit in proptest::option::of(1usize..10),
    ) {
        let actions = aggregate(&findings, limit);

        let mut texts: Vec<&str> = actions.iter().map(|a| a.text.as_str()).collect();
        texts.sort();
        texts.dedup();
        prop_assert_eq!(texts.len(), actions.len());

        prop_assert!(actions.windows(2).all(|w| w[0].priority <= w[1].priority));
        if let Some(max) = limit {
            prop_assert!(actions.len() <= max);
        }
        for (i, a) in actions.iter().enumerate() {
            prop_assert_eq!(a.id, i + 1);
        }
    }
}
