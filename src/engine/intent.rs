//! Intent resolution for chat messages.
//!
//! Rules are evaluated top-down over the normalized text and the first match
//! wins. The temperature sub-branches sit ahead of every other topic, so a
//! message mentioning both temperature and salinity is a temperature query.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The closed set of query intents the engine can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TemperatureAnomaly,
    TemperatureDepthProfile,
    TemperatureTrend,
    TemperatureGeneric,
    Salinity,
    CurrentVelocity,
    RegionAtlantic,
    RegionPacific,
    Default,
}

impl Intent {
    pub const ALL: [Intent; 9] = [
        Intent::TemperatureAnomaly,
        Intent::TemperatureDepthProfile,
        Intent::TemperatureTrend,
        Intent::TemperatureGeneric,
        Intent::Salinity,
        Intent::CurrentVelocity,
        Intent::RegionAtlantic,
        Intent::RegionPacific,
        Intent::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::TemperatureAnomaly => "temperature_anomaly",
            Intent::TemperatureDepthProfile => "temperature_depth_profile",
            Intent::TemperatureTrend => "temperature_trend",
            Intent::TemperatureGeneric => "temperature_generic",
            Intent::Salinity => "salinity",
            Intent::CurrentVelocity => "current_velocity",
            Intent::RegionAtlantic => "region_atlantic",
            Intent::RegionPacific => "region_pacific",
            Intent::Default => "default",
        }
    }

    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            Intent::TemperatureAnomaly
                | Intent::TemperatureDepthProfile
                | Intent::TemperatureTrend
                | Intent::TemperatureGeneric
        )
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered rule table.
#[derive(Clone, Copy)]
pub struct IntentRule {
    pub name: &'static str,
    pub intent: Intent,
    pub predicate: fn(&str) -> bool,
}

impl std::fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRule")
            .field("name", &self.name)
            .field("intent", &self.intent)
            .finish()
    }
}

/// Rule name reported when nothing in the table matched.
pub const FALLBACK_RULE: &str = "fallback";

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn mentions_temperature(text: &str) -> bool {
    text.contains("temperature")
}

fn temperature_anomaly(text: &str) -> bool {
    mentions_temperature(text) && contains_any(text, &["anomaly", "unusual"])
}

fn temperature_profile(text: &str) -> bool {
    mentions_temperature(text) && contains_any(text, &["depth", "profile"])
}

fn temperature_trend(text: &str) -> bool {
    mentions_temperature(text) && text.contains("trend")
}

fn salinity(text: &str) -> bool {
    text.contains("salinity")
}

fn current(text: &str) -> bool {
    contains_any(text, &["current", "velocity"])
}

fn atlantic(text: &str) -> bool {
    text.contains("atlantic")
}

fn pacific(text: &str) -> bool {
    text.contains("pacific")
}

/// Ordered rule table; position is priority.
pub static RULES: Lazy<Vec<IntentRule>> = Lazy::new(|| {
    vec![
        IntentRule {
            name: "temperature_anomaly",
            intent: Intent::TemperatureAnomaly,
            predicate: temperature_anomaly,
        },
        IntentRule {
            name: "temperature_profile",
            intent: Intent::TemperatureDepthProfile,
            predicate: temperature_profile,
        },
        IntentRule {
            name: "temperature_trend",
            intent: Intent::TemperatureTrend,
            predicate: temperature_trend,
        },
        IntentRule {
            name: "temperature",
            intent: Intent::TemperatureGeneric,
            predicate: mentions_temperature,
        },
        IntentRule {
            name: "salinity",
            intent: Intent::Salinity,
            predicate: salinity,
        },
        IntentRule {
            name: "current",
            intent: Intent::CurrentVelocity,
            predicate: current,
        },
        IntentRule {
            name: "atlantic",
            intent: Intent::RegionAtlantic,
            predicate: atlantic,
        },
        IntentRule {
            name: "pacific",
            intent: Intent::RegionPacific,
            predicate: pacific,
        },
    ]
});

/// Resolve normalized text to its intent.
pub fn resolve(normalized: &str) -> Intent {
    resolve_rule(normalized).0
}

/// Resolve normalized text, also reporting which rule fired.
pub fn resolve_rule(normalized: &str) -> (Intent, &'static str) {
    RULES
        .iter()
        .find(|rule| (rule.predicate)(normalized))
        .map(|rule| (rule.intent, rule.name))
        .unwrap_or((Intent::Default, FALLBACK_RULE))
}
