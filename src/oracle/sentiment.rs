use serde::{Deserialize, Serialize};

use super::OracleError;
use crate::models::enums::SentimentLabel;

/// Overall tone verdict for a block of text, with one confidence score per
/// polarity. Scores are independent; they need not sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentScore {
    pub sentiment: SentimentLabel,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

impl SentimentScore {
    /// A predominantly negative score, used by tests and mocks.
    pub fn negative(negative: f64) -> Self {
        Self {
            sentiment: SentimentLabel::Negative,
            positive: 0.0,
            negative,
            neutral: 1.0 - negative,
            mixed: 0.0,
        }
    }

    /// A flat neutral score.
    pub fn neutral() -> Self {
        Self {
            sentiment: SentimentLabel::Neutral,
            positive: 0.1,
            negative: 0.1,
            neutral: 0.8,
            mixed: 0.0,
        }
    }
}

/// Holistic tone scoring for examiner speech. Callers cap input at the
/// configured limit; failure is a soft error (no flag, analysis continues).
pub trait SentimentOracle {
    fn detect_sentiment(&self, text: &str) -> Result<SentimentScore, OracleError>;
}

/// Request body for POST {base}/v1/sentiment
#[derive(Serialize)]
struct SentimentRequest<'a> {
    text: &'a str,
    language: &'a str,
}

/// Response body from the sentiment endpoint
#[derive(Deserialize)]
struct SentimentResponse {
    sentiment: SentimentLabel,
    scores: PolarityScores,
}

#[derive(Deserialize)]
struct PolarityScores {
    positive: f64,
    negative: f64,
    neutral: f64,
    mixed: f64,
}

/// HTTP client for a hosted sentiment service.
pub struct HttpSentimentOracle {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpSentimentOracle {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }
}

impl SentimentOracle for HttpSentimentOracle {
    fn detect_sentiment(&self, text: &str) -> Result<SentimentScore, OracleError> {
        let url = format!("{}/v1/sentiment", self.base_url);
        let body = SentimentRequest {
            text,
            language: "en",
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                OracleError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                OracleError::Timeout(self.timeout_secs)
            } else {
                OracleError::Client(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SentimentResponse = response
            .json()
            .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

        Ok(SentimentScore {
            sentiment: parsed.sentiment,
            positive: parsed.scores.positive,
            negative: parsed.scores.negative,
            neutral: parsed.scores.neutral,
            mixed: parsed.scores.mixed,
        })
    }
}

/// Mock sentiment oracle — returns a configured score, or fails.
pub struct MockSentimentOracle {
    score: Option<SentimentScore>,
}

impl MockSentimentOracle {
    pub fn new(score: SentimentScore) -> Self {
        Self { score: Some(score) }
    }

    /// A mock that always reports the oracle as unreachable.
    pub fn unavailable() -> Self {
        Self { score: None }
    }
}

impl SentimentOracle for MockSentimentOracle {
    fn detect_sentiment(&self, _text: &str) -> Result<SentimentScore, OracleError> {
        match &self.score {
            Some(score) => Ok(score.clone()),
            None => Err(OracleError::Connection("mock://sentiment".into())),
        }
    }
}
