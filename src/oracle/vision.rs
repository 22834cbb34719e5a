use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OracleError;
use crate::config::AnalysisConfig;
use crate::models::events::DeclaredTestEvent;
use crate::models::evidence::EvidenceVerdict;

/// What the core asks the vision collaborator to look at: the recording
/// window bracketing one declared test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRequest {
    pub event_id: Uuid,
    pub category: String,
    pub window_start: f64,
    pub window_end: f64,
}

impl EvidenceRequest {
    /// Window bracketing the declaration: the configured lead before the
    /// timestamp (clamped at the start of the recording) through the
    /// configured total duration.
    pub fn around(event: &DeclaredTestEvent, config: &AnalysisConfig) -> Self {
        let window_start = (event.timestamp - config.evidence_window_lead_secs).max(0.0);
        Self {
            event_id: event.id,
            category: event.category.clone(),
            window_start,
            window_end: window_start + config.evidence_window_secs,
        }
    }
}

/// Handle for a long-running vision job. Analysis jobs routinely outlive the
/// classification pass; the handle is what gets persisted and re-polled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
}

/// Result of polling a vision job. `Pending` is a first-class state the
/// reconciler reports as-is — never a retry-by-exception condition.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    Pending,
    Complete(EvidenceVerdict),
    Failed(String),
}

/// Two-phase interface to the out-of-scope vision collaborator: submit a
/// window for analysis, poll the handle later. Implementations apply their
/// own timeouts; a timeout is "oracle unavailable", not a fatal error.
pub trait VisionEvidenceSource {
    fn submit(&self, request: &EvidenceRequest) -> Result<JobHandle, OracleError>;
    fn poll(&self, handle: &JobHandle) -> Result<PollOutcome, OracleError>;
}

/// Mock vision source. Every submitted job yields the scripted outcome
/// sequence in order; the final outcome is sticky, matching a real job whose
/// terminal state keeps being reported on re-poll.
pub struct MockVisionSource {
    template: Vec<PollOutcome>,
    jobs: Mutex<HashMap<String, VecDeque<PollOutcome>>>,
    counter: AtomicUsize,
}

impl MockVisionSource {
    pub fn new(template: Vec<PollOutcome>) -> Self {
        Self {
            template,
            jobs: Mutex::new(HashMap::new()),
            counter: AtomicUsize::new(0),
        }
    }

    /// A source whose jobs complete immediately with the given verdict.
    pub fn completing_with(verdict: EvidenceVerdict) -> Self {
        Self::new(vec![PollOutcome::Complete(verdict)])
    }
}

impl VisionEvidenceSource for MockVisionSource {
    fn submit(&self, request: &EvidenceRequest) -> Result<JobHandle, OracleError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        let job_id = format!("job-{n}-{}", request.category);
        self.jobs
            .lock()
            .expect("mock vision lock poisoned")
            .insert(job_id.clone(), self.template.iter().cloned().collect());
        Ok(JobHandle { job_id })
    }

    fn poll(&self, handle: &JobHandle) -> Result<PollOutcome, OracleError> {
        let mut jobs = self.jobs.lock().expect("mock vision lock poisoned");
        let queue = jobs
            .get_mut(&handle.job_id)
            .ok_or_else(|| OracleError::MalformedResponse(format!("unknown job {}", handle.job_id)))?;
        match queue.len() {
            0 => Ok(PollOutcome::Pending),
            1 => Ok(queue.front().cloned().unwrap_or(PollOutcome::Pending)),
            _ => Ok(queue.pop_front().unwrap_or(PollOutcome::Pending)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{MotionPresent, PoseMatch};

    fn event_at(timestamp: f64) -> DeclaredTestEvent {
        DeclaredTestEvent {
            id: Uuid::new_v4(),
            category: "gait".into(),
            timestamp,
            confidence: 0.9,
            matched_text: "let's watch you walk".into(),
            speaker: "speaker_0".into(),
        }
    }

    fn verdict() -> EvidenceVerdict {
        EvidenceVerdict {
            motion_present: MotionPresent::Performed,
            pose_match: PoseMatch::FullMatch,
            confidence: 0.75,
        }
    }

    #[test]
    fn request_window_brackets_timestamp() {
        let config = AnalysisConfig::default();
        let request = EvidenceRequest::around(&event_at(100.0), &config);
        assert!((request.window_start - 70.0).abs() < f64::EPSILON);
        assert!((request.window_end - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn request_window_clamps_at_recording_start() {
        let config = AnalysisConfig::default();
        let request = EvidenceRequest::around(&event_at(10.0), &config);
        assert!((request.window_start - 0.0).abs() < f64::EPSILON);
        assert!((request.window_end - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scripted_job_goes_pending_then_complete() {
        let source = MockVisionSource::new(vec![
            PollOutcome::Pending,
            PollOutcome::Complete(verdict()),
        ]);
        let config = AnalysisConfig::default();
        let handle = source
            .submit(&EvidenceRequest::around(&event_at(42.0), &config))
            .unwrap();

        assert!(matches!(source.poll(&handle).unwrap(), PollOutcome::Pending));
        assert!(matches!(
            source.poll(&handle).unwrap(),
            PollOutcome::Complete(_)
        ));
        // Terminal state is sticky on re-poll.
        assert!(matches!(
            source.poll(&handle).unwrap(),
            PollOutcome::Complete(_)
        ));
    }

    #[test]
    fn polling_unknown_handle_errors() {
        let source = MockVisionSource::new(vec![PollOutcome::Pending]);
        let bogus = JobHandle {
            job_id: "job-missing".into(),
        };
        assert!(source.poll(&bogus).is_err());
    }
}
