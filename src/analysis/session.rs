use chrono::Utc;

use super::classify::IntentClassifier;
use super::demeanor::DemeanorAnalyzer;
use super::extract::{excerpt, segment_text};
use super::taxonomy::Taxonomy;
use super::AnalysisError;
use crate::config::AnalysisConfig;
use crate::models::entity::MedicalEntity;
use crate::models::events::SessionAnalysis;
use crate::models::transcript::Transcript;
use crate::oracle::{MedicalEntityOracle, SentimentOracle};

/// Default diarization label for the examiner. Sessions where the examiner
/// was diarized differently override it with `with_examiner_label`.
const DEFAULT_EXAMINER_LABEL: &str = "speaker_0";

/// Orchestrates one full analysis pass over a session's transcript:
/// per-segment text extraction and intent classification, plus the demeanor
/// passes, producing one atomically-published `SessionAnalysis`.
///
/// Sessions share no state; analyzers for different sessions can run freely
/// in parallel, and reprocessing a session simply builds a new result.
pub struct SessionAnalyzer {
    taxonomy: Taxonomy,
    config: AnalysisConfig,
    examiner_label: String,
    sentiment: Option<Box<dyn SentimentOracle + Send + Sync>>,
    entities: Option<Box<dyn MedicalEntityOracle + Send + Sync>>,
}

impl SessionAnalyzer {
    pub fn new(taxonomy: Taxonomy, config: AnalysisConfig) -> Self {
        Self {
            taxonomy,
            config,
            examiner_label: DEFAULT_EXAMINER_LABEL.to_string(),
            sentiment: None,
            entities: None,
        }
    }

    pub fn with_examiner_label(mut self, label: &str) -> Self {
        self.examiner_label = label.to_string();
        self
    }

    pub fn with_sentiment_oracle(
        mut self,
        oracle: Box<dyn SentimentOracle + Send + Sync>,
    ) -> Self {
        self.sentiment = Some(oracle);
        self
    }

    pub fn with_entity_oracle(
        mut self,
        oracle: Box<dyn MedicalEntityOracle + Send + Sync>,
    ) -> Self {
        self.entities = Some(oracle);
        self
    }

    /// Run the full pass. Deterministic given the same transcript and
    /// registry, sentiment-oracle nondeterminism aside. A transcript with
    /// nothing in it at all is a session-level failure; anything partial
    /// yields partial results — a bad segment contributes nothing but never
    /// aborts the rest.
    pub fn process(
        &self,
        session_id: &str,
        transcript: &Transcript,
    ) -> Result<SessionAnalysis, AnalysisError> {
        let _span = tracing::info_span!("process_session", session_id).entered();

        if transcript.is_empty() {
            return Err(AnalysisError::EmptyTranscript(session_id.to_string()));
        }

        let classifier = IntentClassifier::new(&self.taxonomy, &self.config);
        let mut declared_tests = Vec::new();
        for segment in &transcript.segments {
            let text = segment_text(segment, &transcript.items);
            if text.is_empty() {
                continue;
            }
            declared_tests.extend(classifier.classify(&text, segment.start_time, &segment.speaker));
        }

        let mut demeanor = DemeanorAnalyzer::new(&self.taxonomy, &self.config);
        if let Some(oracle) = &self.sentiment {
            demeanor = demeanor.with_sentiment_oracle(oracle.as_ref());
        }
        let mut demeanor_flags = demeanor.analyze(transcript, &self.examiner_label);

        // Diarization can hand us out-of-order segment times; reporting
        // expects a timeline, so both collections are sorted here.
        declared_tests.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        demeanor_flags.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        tracing::info!(
            session_id,
            declared_tests = declared_tests.len(),
            demeanor_flags = demeanor_flags.len(),
            "Session analysis complete"
        );

        Ok(SessionAnalysis {
            session_id: session_id.to_string(),
            declared_tests,
            demeanor_flags,
            processed_at: Utc::now(),
        })
    }

    /// Medical entity recognition over arbitrary transcript text, for report
    /// enrichment. Soft-failing: no oracle or a failed call yields an empty
    /// list, never an error.
    pub fn extract_entities(&self, text: &str) -> Vec<MedicalEntity> {
        let Some(oracle) = &self.entities else {
            return Vec::new();
        };
        let sample = excerpt(text, self.config.entity_input_limit);
        match oracle.detect_entities(&sample) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!(error = %e, "Entity oracle unavailable, returning no entities");
                Vec::new()
            }
        }
    }
}
