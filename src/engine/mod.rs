//! Offline response engine: intent resolution plus synthetic answers.
//!
//! Everything here is total. Any message, including empty or non-ASCII
//! input, produces a well-formed [`ResponseDocument`].

pub mod data;
pub mod intent;
pub mod message;
pub mod normalize;
pub mod suggestions;
pub mod viz;

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schemas::ResponseDocument;
use intent::Intent;

/// Result of classifying one message.
#[derive(Debug, Clone)]
pub struct Classification {
    pub intent: Intent,
    /// Name of the rule that fired, or [`intent::FALLBACK_RULE`]
    pub rule: &'static str,
    pub document: ResponseDocument,
}

/// Run the full pipeline with an explicit random source and date anchor.
pub fn classify<R: Rng>(raw: &str, rng: &mut R, today: NaiveDate) -> Classification {
    let normalized = normalize::normalize(raw);
    let (intent, rule) = intent::resolve_rule(&normalized);
    tracing::debug!(intent = %intent, rule, chars = raw.chars().count(), "Resolved intent");

    let data = data::synthesize(intent, rng, today);
    let visualizations = viz::build(&data);
    let document = ResponseDocument {
        message: message::compose(&data),
        data,
        visualizations,
        suggestions: suggestions::suggestions_for(intent)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    Classification {
        intent,
        rule,
        document,
    }
}

/// Answer a message using the thread-local generator and today's date.
pub fn classify_and_respond(raw: &str) -> ResponseDocument {
    classify(raw, &mut rand::thread_rng(), Utc::now().date_naive()).document
}

/// Engine owning a seedable random source, shareable across tasks.
pub struct ResponseEngine {
    rng: Mutex<StdRng>,
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResponseEngine {
    /// `seed` fixes the synthetic series; `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn classify(&self, raw: &str) -> Classification {
        self.classify_on(raw, Utc::now().date_naive())
    }

    pub fn classify_on(&self, raw: &str, today: NaiveDate) -> Classification {
        classify(raw, &mut *self.lock_rng(), today)
    }

    /// Data record for `intent` without going through the resolver.
    pub fn synthesize(&self, intent: Intent) -> data::DomainData {
        data::synthesize(intent, &mut *self.lock_rng(), Utc::now().date_naive())
    }

    fn lock_rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        // A poisoned lock still holds a usable generator.
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn respond(&self, raw: &str) -> ResponseDocument {
        self.classify(raw).document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data::DomainData;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_empty_message_is_default() {
        let c = ResponseEngine::new(Some(1)).classify_on("", today());
        assert_eq!(c.intent, Intent::Default);
        assert_eq!(c.rule, intent::FALLBACK_RULE);
        assert!(!c.document.message.is_empty());
        assert_eq!(c.document.visualizations.len(), 1);
        assert_eq!(c.document.suggestions.len(), 4);
    }

    #[test]
    fn test_anomaly_document() {
        let doc = classify_and_respond("Show temperature anomaly");
        let DomainData::Anomalies(report) = &doc.data else {
            panic!("expected anomalies");
        };
        let values: Vec<f64> = report.anomalies.iter().map(|a| a.anomaly).collect();
        assert_eq!(values, vec![2.1, -1.8, 3.2]);
        assert_eq!(report.statistics.confidence, 0.95);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let a = ResponseEngine::new(Some(11)).classify_on("temperature", today());
        let b = ResponseEngine::new(Some(11)).classify_on("temperature", today());
        assert_eq!(a.document, b.document);
    }

    #[test]
    fn test_engine_advances_its_generator() {
        let engine = ResponseEngine::new(Some(11));
        let a = engine.classify_on("temperature", today());
        let b = engine.classify_on("temperature", today());
        assert_ne!(a.document.data, b.document.data);
        assert_eq!(a.document.suggestions, b.document.suggestions);
    }

    #[test]
    fn test_direct_synthesis_matches_intent() {
        let engine = ResponseEngine::new(Some(4));
        assert!(matches!(
            engine.synthesize(Intent::TemperatureTrend),
            DomainData::Trend(_)
        ));
        assert!(matches!(
            engine.synthesize(Intent::Default),
            DomainData::Summary(_)
        ));
    }

    #[test]
    fn test_suggestions_follow_intent() {
        let c = ResponseEngine::default().classify_on("Tell me about the Pacific", today());
        assert_eq!(c.intent, Intent::RegionPacific);
        assert_eq!(
            c.document.suggestions,
            suggestions::suggestions_for(Intent::RegionPacific).to_vec()
        );
    }
}
