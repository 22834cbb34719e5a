use serde::{Deserialize, Serialize};

/// A medical entity recognized in transcript text by the entity oracle
/// (medication names, conditions, anatomy, procedures).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalEntity {
    pub text: String,
    pub category: String,
    pub entity_type: String,
    pub score: f64,
    pub begin_offset: usize,
    pub end_offset: usize,
}
