//! Property tests for the offline response engine.

use floatchat::classify_and_respond;
use floatchat::engine::data::DomainData;
use floatchat::engine::intent::{Intent, resolve};
use floatchat::engine::normalize::normalize;
use floatchat::engine::viz::VisualizationKind;
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "temperature",
    "anomaly",
    "unusual",
    "depth",
    "profile",
    "trend",
    "salinity",
    "current",
    "velocity",
    "atlantic",
    "pacific",
];

fn message_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\r\n]{0,12}",
        any::<String>(),
        "[a-zA-Z ]{0,40}",
        (
            "[a-zA-Z ]{0,12}",
            prop::sample::select(KEYWORDS),
            "[a-zA-Z ]{0,12}"
        )
            .prop_map(|(a, k, b)| format!("{a}{k}{b}")),
    ]
}

fn ascii_with_keywords() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            prop::sample::select(KEYWORDS).prop_map(str::to_string),
            "[a-zA-Z ]{0,6}",
        ],
        0..6,
    )
    .prop_map(|parts| parts.concat())
}

fn random_case(s: &str, mask: &[bool]) -> String {
    s.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn prop_engine_is_total(s in message_strategy()) {
        let doc = classify_and_respond(&s);
        prop_assert!(!doc.message.is_empty());
        prop_assert_eq!(doc.suggestions.len(), 4);
        prop_assert!(!doc.visualizations.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn prop_resolution_ignores_case(
        s in ascii_with_keywords(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let recased = random_case(&s, &mask);
        prop_assert_eq!(resolve(&normalize(&s)), resolve(&normalize(&recased)));
    }

    #[test]
    fn prop_resolution_is_repeatable(s in message_strategy()) {
        prop_assert_eq!(resolve(&normalize(&s)), resolve(&normalize(&s)));
    }

    #[test]
    fn prop_temperature_outranks_salinity(
        a in "[a-zA-Z ]{0,10}",
        b in "[a-zA-Z ]{0,10}",
        c in "[a-zA-Z ]{0,10}",
        salinity_first in any::<bool>(),
    ) {
        let s = if salinity_first {
            format!("{a}Salinity{b}TEMPERATURE{c}")
        } else {
            format!("{a}temperature{b}salinity{c}")
        };
        let intent = resolve(&normalize(&s));
        prop_assert!(intent.is_temperature(), "{} resolved to {}", s, intent);
    }

    #[test]
    fn prop_generic_series_stays_in_band(prefix in "[ ]{0,3}") {
        let doc = classify_and_respond(&format!("{prefix}temperature"));
        let DomainData::TemperatureSeries(series) = doc.data else {
            return Err(TestCaseError::fail("expected temperature series"));
        };
        prop_assert_eq!(series.temperatures.len(), 30);
        for t in &series.temperatures {
            prop_assert!((16.4 - 1e-9..=21.0 + 1e-9).contains(t), "{} out of band", t);
        }
        prop_assert_eq!(series.statistics.mean, 18.7);
        prop_assert_eq!(series.statistics.std, 2.3);
        prop_assert_eq!(series.statistics.min, 15.2);
        prop_assert_eq!(series.statistics.max, 22.1);
        prop_assert_eq!(series.statistics.valid_measurements, 0.96);
        prop_assert_eq!(series.statistics.active_floats, 47);
    }
}

#[test]
fn anomaly_response_is_deterministic() {
    for _ in 0..3 {
        let doc = classify_and_respond("Show temperature anomaly");
        let DomainData::Anomalies(report) = &doc.data else {
            panic!("expected anomalies, got {:?}", doc.data);
        };
        let values: Vec<f64> = report.anomalies.iter().map(|a| a.anomaly).collect();
        assert_eq!(values, vec![2.1, -1.8, 3.2]);
        assert_eq!(report.statistics.confidence, 0.95);
    }
}

#[test]
fn depth_profile_response() {
    let doc = classify_and_respond("temperature depth profile");
    let DomainData::DepthProfile(profile) = &doc.data else {
        panic!("expected depth profile, got {:?}", doc.data);
    };
    assert_eq!(profile.depths.len(), 13);
    assert_eq!(profile.temperatures.len(), 13);
    assert_eq!(profile.depths[0], 0.0);
    assert_eq!(profile.depths[12], 2000.0);
    assert_eq!(profile.temperatures[0], 22.1);
    assert_eq!(profile.temperatures[12], 4.0);
    assert!(profile.temperatures.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn empty_message_falls_to_default() {
    assert_eq!(resolve(&normalize("")), Intent::Default);
    let doc = classify_and_respond("");
    assert!(matches!(doc.data, DomainData::Summary(_)));
    assert!(!doc.message.is_empty());
    assert_eq!(doc.visualizations.len(), 1);
    assert_eq!(doc.visualizations[0].kind(), VisualizationKind::Plot);
    assert_eq!(doc.suggestions.len(), 4);
}

#[test]
fn region_rules_lose_to_temperature() {
    assert_eq!(
        resolve(&normalize("pacific temperature trend")),
        Intent::TemperatureTrend
    );
    assert_eq!(
        resolve(&normalize("Atlantic temperature")),
        Intent::TemperatureGeneric
    );
}

#[test]
fn response_document_wire_shape() {
    let doc = classify_and_respond("ocean current velocity");
    let json = serde_json::to_value(&doc).unwrap();
    assert!(json["message"].is_string());
    assert_eq!(json["data"]["statistics"]["mean_velocity"], 0.28);
    assert_eq!(json["visualizations"][0]["type"], "map");
    assert_eq!(json["visualizations"][1]["type"], "plot");
    assert_eq!(json["suggestions"].as_array().unwrap().len(), 4);
}
