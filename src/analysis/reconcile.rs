use std::collections::HashMap;

use uuid::Uuid;

use super::taxonomy::MotionExpectation;
use crate::models::enums::{DiscrepancyStatus, MotionPresent, PoseMatch};
use crate::models::events::DeclaredTestEvent;
use crate::models::evidence::{EvidenceVerdict, ObservedActions, ReconciledOutcome};

/// Where reconciliation finds video verdicts. Keyed by declared-event id;
/// verdicts arrive asynchronously, so absence is normal.
pub trait EvidenceLookup {
    fn verdict_for(&self, event_id: &Uuid) -> Option<EvidenceVerdict>;
}

impl EvidenceLookup for HashMap<Uuid, EvidenceVerdict> {
    fn verdict_for(&self, event_id: &Uuid) -> Option<EvidenceVerdict> {
        self.get(event_id).cloned()
    }
}

/// Pair each declared test with whatever verdict exists for it.
///
/// A test is discrepant precisely when the video shows its motion as brief
/// or absent; `performed` is the only non-discrepant outcome. Pose detail is
/// carried along for the report but never drives the verdict. An event with
/// no verdict yet is `pending` — never assumed unperformed. Designed to be
/// re-run as verdicts trickle in from the vision collaborator.
pub fn reconcile(
    declared: &[DeclaredTestEvent],
    evidence: &dyn EvidenceLookup,
) -> Vec<ReconciledOutcome> {
    declared
        .iter()
        .map(|event| {
            let verdict = evidence.verdict_for(&event.id);
            let status = match &verdict {
                None => DiscrepancyStatus::Pending,
                Some(v) => match v.motion_present {
                    MotionPresent::Performed => DiscrepancyStatus::Consistent,
                    MotionPresent::Brief | MotionPresent::NotObserved => {
                        DiscrepancyStatus::Discrepant
                    }
                },
            };
            ReconciledOutcome {
                event: event.clone(),
                verdict,
                status,
            }
        })
        .collect()
}

/// Derive a verdict by comparing completed vision-job output against a
/// category's motion-expectation profile.
///
/// Coverage is the fraction of expected movements seen among the observed
/// labels (case-insensitive). Tests driven by the patient's own motion need
/// at least half their expected movements on camera to count as performed;
/// examiner-driven tests (palpation, reflexes) show less gross motion, so
/// any expected movement suffices — but when the profile requires examiner
/// touch and no person was tracked, the hands-on action cannot be confirmed
/// and a performed outcome is downgraded to brief.
pub fn compare_observations(
    observed: &ObservedActions,
    expectation: &MotionExpectation,
) -> EvidenceVerdict {
    let matched: Vec<f64> = observed
        .movement_labels
        .iter()
        .filter(|l| {
            expectation
                .expected_movements
                .iter()
                .any(|m| m.eq_ignore_ascii_case(&l.label))
        })
        .map(|l| l.confidence)
        .collect();

    let coverage = if expectation.expected_movements.is_empty() {
        0.0
    } else {
        matched.len() as f64 / expectation.expected_movements.len() as f64
    };

    let mut motion_present = if coverage <= 0.0 {
        MotionPresent::NotObserved
    } else if !expectation.patient_motion_required || coverage >= 0.5 {
        MotionPresent::Performed
    } else {
        MotionPresent::Brief
    };

    if motion_present == MotionPresent::Performed
        && expectation.examiner_touch
        && !observed.person_tracked
    {
        motion_present = MotionPresent::Brief;
    }

    let pose_match = if !observed.person_tracked {
        PoseMatch::NoMatch
    } else if coverage >= 1.0 {
        PoseMatch::FullMatch
    } else {
        PoseMatch::Partial
    };

    let confidence = if matched.is_empty() {
        0.0
    } else {
        let mean = matched.iter().sum::<f64>() / matched.len() as f64;
        (mean * coverage).clamp(0.0, 1.0)
    };

    EvidenceVerdict {
        motion_present,
        pose_match,
        confidence,
    }
}
