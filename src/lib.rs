//! Cmelens core: turns a diarized CME transcript into timestamped
//! declared-test and demeanor-flag events, and reconciles declared tests
//! against video evidence from the vision collaborator.
//!
//! Transcription, video analysis, session storage, and report rendering all
//! live outside this crate; they meet it at the interfaces in [`oracle`] and
//! the data model in [`models`].

pub mod analysis;
pub mod config;
pub mod models;
pub mod oracle;

pub use analysis::{
    compare_observations, detect_tests_with_llm, reconcile, AnalysisError, DemeanorAnalyzer,
    EvidenceLookup, IntentClassifier, SessionAnalyzer, Taxonomy,
};
pub use config::AnalysisConfig;
pub use models::events::{DeclaredTestEvent, DemeanorFlagEvent, SessionAnalysis};
pub use models::evidence::{EvidenceVerdict, ReconciledOutcome};
pub use models::transcript::Transcript;

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber. Call once from the
/// embedding service's entry point; never invoked implicitly.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
