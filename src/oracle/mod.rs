//! External AI collaborators, behind trait seams.
//!
//! The core never analyzes audio or pixels itself; it consumes verdicts from
//! cloud services through these interfaces. Every trait ships a mock so the
//! deterministic analysis path is testable offline, and every failure here is
//! soft from the analysis pipeline's point of view.

pub mod entities;
pub mod llm;
pub mod sentiment;
pub mod vision;

pub use entities::*;
pub use llm::*;
pub use sentiment::*;
pub use vision::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("oracle is not reachable at {0}")]
    Connection(String),

    #[error("oracle returned error (status {status}): {body}")]
    Http { status: u16, body: String },

    #[error("oracle request timed out after {0}s")]
    Timeout(u64),

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}
