use super::OracleError;
use crate::models::entity::MedicalEntity;

/// Medical entity recognition over transcript text. Callers cap input at the
/// configured limit; failure is soft (no entities, analysis continues).
pub trait MedicalEntityOracle {
    fn detect_entities(&self, text: &str) -> Result<Vec<MedicalEntity>, OracleError>;
}

/// Mock entity oracle — returns a configured entity list, or fails.
pub struct MockEntityOracle {
    entities: Option<Vec<MedicalEntity>>,
}

impl MockEntityOracle {
    pub fn new(entities: Vec<MedicalEntity>) -> Self {
        Self {
            entities: Some(entities),
        }
    }

    pub fn unavailable() -> Self {
        Self { entities: None }
    }
}

impl MedicalEntityOracle for MockEntityOracle {
    fn detect_entities(&self, _text: &str) -> Result<Vec<MedicalEntity>, OracleError> {
        match &self.entities {
            Some(entities) => Ok(entities.clone()),
            None => Err(OracleError::Connection("mock://entities".into())),
        }
    }
}
