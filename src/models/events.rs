use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{FlagKind, Severity};

/// A medical test the examiner stated, aloud, they are about to perform.
/// Created once by the intent classifier and never mutated; the event id is
/// the key under which the vision collaborator files its verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclaredTestEvent {
    pub id: Uuid,
    pub category: String,
    /// Seconds from the start of the recording (owning segment's start).
    pub timestamp: f64,
    pub confidence: f64,
    /// Verbatim segment text, truncated to the configured excerpt length.
    pub matched_text: String,
    pub speaker: String,
}

/// A recorded instance of adverse examiner tone or behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemeanorFlagEvent {
    pub kind: FlagKind,
    pub timestamp: f64,
    pub excerpt: String,
    pub severity: Severity,
    pub description: String,
}

/// The complete, atomically-published result of one session-processing pass.
/// Reprocessing a session produces a new independent value; nothing is
/// appended in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalysis {
    pub session_id: String,
    pub declared_tests: Vec<DeclaredTestEvent>,
    pub demeanor_flags: Vec<DemeanorFlagEvent>,
    pub processed_at: DateTime<Utc>,
}
