pub mod assist;
pub mod classify;
pub mod demeanor;
pub mod extract;
pub mod reconcile;
pub mod session;
pub mod taxonomy;

pub use assist::*;
pub use classify::*;
pub use demeanor::*;
pub use extract::*;
pub use reconcile::*;
pub use session::*;
pub use taxonomy::*;

use thiserror::Error;

use crate::oracle::OracleError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A broken pattern silently disables detection for its whole category,
    /// so registry load refuses to hand out a partially-valid taxonomy.
    #[error("invalid pattern '{pattern}' for category {category}: {source}")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("transcript for session {0} has no segments or items")]
    EmptyTranscript(String),

    #[error("malformed assistant response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
