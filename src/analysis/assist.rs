use serde::Deserialize;

use super::extract::excerpt;
use super::AnalysisError;
use crate::config::AnalysisConfig;
use crate::models::enums::ApproximateTime;
use crate::oracle::LlmClient;

/// One declared test the assisting model found: a free-form category guess,
/// the examiner's exact words, and a coarse position in the conversation.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistedDetection {
    pub test_type: String,
    pub declaration: String,
    pub approximate_time: ApproximateTime,
}

/// LLM-assisted test detection, for transcripts where pattern matching is
/// not sufficient (novel phrasing, heavy transcription noise). The output is
/// advisory: it carries no timestamps or confidences and never feeds the
/// deterministic `process` path.
pub fn detect_tests_with_llm(
    llm: &dyn LlmClient,
    model: &str,
    transcript_text: &str,
    config: &AnalysisConfig,
) -> Result<Vec<AssistedDetection>, AnalysisError> {
    let sample = excerpt(transcript_text, config.assist_transcript_limit);
    let prompt = build_assist_prompt(&sample);
    let response = llm.generate(model, &prompt)?;
    parse_assist_response(&response)
}

fn build_assist_prompt(transcript: &str) -> String {
    format!(
        r#"You are analyzing a transcript of a Compulsory Medical Examination (CME).
Extract all instances where the examiner declares they are performing a specific medical test or examination.

Transcript:
{transcript}

For each declared test, return JSON with:
- test_type: The type of medical test (e.g., "lumbar_rom", "straight_leg_raise", "gait", "reflex")
- declaration: The exact words the examiner used
- approximate_time: An estimate of when this occurred in the conversation ("early", "middle", or "late")

Return ONLY a JSON array of test declarations, no additional text:
[{{"test_type": "...", "declaration": "...", "approximate_time": "..."}}]"#
    )
}

/// Parse the model's reply. Tolerates a fenced ```json block or a bare
/// array with surrounding prose; items that fail to deserialize are skipped
/// rather than failing the whole reply.
pub fn parse_assist_response(response: &str) -> Result<Vec<AssistedDetection>, AnalysisError> {
    let json = extract_json_array(response)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
    Ok(values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

fn extract_json_array(response: &str) -> Result<&str, AnalysisError> {
    if let Some(fence_start) = response.find("```json") {
        let body_start = fence_start + 7;
        if let Some(fence_len) = response[body_start..].find("```") {
            return Ok(response[body_start..body_start + fence_len].trim());
        }
    }

    let start = response
        .find('[')
        .ok_or_else(|| AnalysisError::MalformedResponse("no JSON array in response".into()))?;
    let end = response
        .rfind(']')
        .filter(|end| *end > start)
        .ok_or_else(|| AnalysisError::MalformedResponse("unterminated JSON array".into()))?;
    Ok(&response[start..=end])
}
