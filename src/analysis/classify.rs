use uuid::Uuid;

use super::extract::excerpt;
use super::taxonomy::{Taxonomy, TestCategory};
use crate::config::AnalysisConfig;
use crate::models::events::DeclaredTestEvent;

/// Scores segment text against every category in the registry and emits a
/// declared-test event for each one clearing the detection threshold.
/// Categories are not mutually exclusive — one segment may legitimately
/// declare several tests, and all of them are emitted; consumers rank by
/// confidence if they need a single winner.
pub struct IntentClassifier<'a> {
    taxonomy: &'a Taxonomy,
    config: &'a AnalysisConfig,
}

impl<'a> IntentClassifier<'a> {
    pub fn new(taxonomy: &'a Taxonomy, config: &'a AnalysisConfig) -> Self {
        Self { taxonomy, config }
    }

    /// Classify one segment's text. Pure: identical input and registry give
    /// identical events, including ids.
    pub fn classify(&self, text: &str, timestamp: f64, speaker: &str) -> Vec<DeclaredTestEvent> {
        let lower = text.to_lowercase();
        self.taxonomy
            .categories()
            .iter()
            .filter_map(|category| self.score_category(category, text, &lower, timestamp, speaker))
            .collect()
    }

    /// Combine lexical coverage, structural pattern evidence, and the
    /// declaration-phrase bonus into one clamped confidence.
    ///
    /// Structural evidence dominates: a single pattern hit already clears the
    /// threshold, while keyword coverage alone is capped below it. The
    /// declaration bonus only ever amplifies an existing signal — transition
    /// language with no category cue scores zero.
    fn score_category(
        &self,
        category: &TestCategory,
        text: &str,
        lower: &str,
        timestamp: f64,
        speaker: &str,
    ) -> Option<DeclaredTestEvent> {
        let mut confidence = 0.0;

        let keyword_hits = category
            .keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()))
            .count();
        if keyword_hits > 0 {
            let coverage = (keyword_hits as f64 / category.keywords.len() as f64).min(1.0);
            confidence += self.config.lexical_weight * coverage;
        }

        if category.matches_structurally(lower) {
            confidence += self.config.structural_weight;
        }

        if confidence > 0.0
            && self
                .taxonomy
                .declaration_phrases()
                .iter()
                .any(|phrase| lower.contains(phrase.as_str()))
        {
            confidence += self.config.declaration_bonus;
        }

        let confidence = confidence.min(1.0);
        if confidence < self.config.detection_threshold {
            return None;
        }

        Some(DeclaredTestEvent {
            id: event_id(&category.id, timestamp, speaker, text),
            category: category.id.clone(),
            timestamp,
            confidence,
            matched_text: excerpt(text, self.config.excerpt_max_chars),
            speaker: speaker.to_string(),
        })
    }
}

/// Deterministic event identity: reprocessing the same transcript yields the
/// same ids, so evidence verdicts filed against a previous pass stay valid.
fn event_id(category: &str, timestamp: f64, speaker: &str, text: &str) -> Uuid {
    let name = format!("{category}:{timestamp}:{speaker}:{text}");
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}
