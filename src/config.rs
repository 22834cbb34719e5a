//! Analysis configuration.
//!
//! Every tunable threshold the detection engine uses lives here, constructed
//! once at startup and passed by reference into the classifier, demeanor
//! analyzer, and reconciler. Defaults mirror the values the taxonomy was
//! calibrated against; changing them changes what counts as a detection.

pub const CRATE_NAME: &str = "cmelens";
pub const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `RUST_LOG`-style filter when the environment sets none.
pub fn default_log_filter() -> &'static str {
    "cmelens=info"
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Minimum combined score for a category to be emitted as a declared test.
    pub detection_threshold: f64,
    /// Weight of the keyword-coverage term. Keyword hits alone are capped at
    /// this value, so lexical evidence by itself never crosses the threshold.
    pub lexical_weight: f64,
    /// Flat score added when any structural pattern rule matches. The first
    /// match saturates this term; it is the dominant signal.
    pub structural_weight: f64,
    /// Bonus when a declaration phrase ("let's", "going to", ...) accompanies
    /// an already-positive score. Never a sole trigger.
    pub declaration_bonus: f64,
    /// Cap, in characters, on verbatim transcript excerpts carried by events.
    pub excerpt_max_chars: usize,
    /// Consecutive examiner segments at which an interruption flag fires.
    pub interruption_run_length: usize,
    /// How many leading examiner segments feed the holistic sentiment check.
    pub sentiment_segment_limit: usize,
    /// Input cap, in characters, of the sentiment oracle.
    pub sentiment_input_limit: usize,
    /// Negative-polarity score above which a sentiment flag is raised.
    pub negative_sentiment_threshold: f64,
    /// Input cap, in characters, of the medical entity oracle.
    pub entity_input_limit: usize,
    /// Seconds of video requested before a declaration timestamp.
    pub evidence_window_lead_secs: f64,
    /// Total length, in seconds, of the requested evidence window.
    pub evidence_window_secs: f64,
    /// Transcript cap, in characters, for LLM-assisted detection prompts.
    pub assist_transcript_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            detection_threshold: 0.5,
            lexical_weight: 0.3,
            structural_weight: 0.7,
            declaration_bonus: 0.2,
            excerpt_max_chars: 200,
            interruption_run_length: 3,
            sentiment_segment_limit: 10,
            sentiment_input_limit: 5000,
            negative_sentiment_threshold: 0.6,
            entity_input_limit: 20_000,
            evidence_window_lead_secs: 30.0,
            evidence_window_secs: 60.0,
            assist_transcript_limit: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_match_alone_clears_threshold() {
        let config = AnalysisConfig::default();
        assert!(config.structural_weight >= config.detection_threshold);
    }

    #[test]
    fn lexical_evidence_alone_never_clears_threshold() {
        let config = AnalysisConfig::default();
        assert!(config.lexical_weight < config.detection_threshold);
    }

    #[test]
    fn evidence_window_brackets_the_declaration() {
        let config = AnalysisConfig::default();
        assert!(config.evidence_window_secs >= config.evidence_window_lead_secs);
    }

    #[test]
    fn crate_version_matches_cargo() {
        assert_eq!(CRATE_VERSION, "0.3.0");
    }
}
