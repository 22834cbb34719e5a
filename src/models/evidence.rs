use serde::{Deserialize, Serialize};

use super::enums::{DiscrepancyStatus, MotionPresent, PoseMatch};
use super::events::DeclaredTestEvent;

/// The vision collaborator's coarse verdict for one declared test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceVerdict {
    pub motion_present: MotionPresent,
    pub pose_match: PoseMatch,
    pub confidence: f64,
}

/// One declared test paired with whatever video evidence exists for it.
/// A missing verdict is a valid terminal state ("no verdict yet"), not an
/// error, and never implies the test was skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciledOutcome {
    pub event: DeclaredTestEvent,
    pub verdict: Option<EvidenceVerdict>,
    pub status: DiscrepancyStatus,
}

/// Raw output of the completed vision jobs for one evidence window: the
/// movement labels the label-detection job reported, and whether the
/// person-tracking job kept a subject in frame.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservedActions {
    pub movement_labels: Vec<ObservedLabel>,
    pub person_tracked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedLabel {
    pub label: String,
    pub confidence: f64,
}

impl ObservedLabel {
    pub fn new(label: &str, confidence: f64) -> Self {
        Self {
            label: label.to_string(),
            confidence,
        }
    }
}
