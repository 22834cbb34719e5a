use super::extract::{excerpt, segment_text};
use super::taxonomy::Taxonomy;
use crate::config::AnalysisConfig;
use crate::models::enums::{FlagKind, SentimentLabel, Severity};
use crate::models::events::DemeanorFlagEvent;
use crate::models::transcript::{Segment, Transcript};
use crate::oracle::SentimentOracle;

/// Scans examiner speech for adverse behavior: floor-hogging (consecutive
/// utterances), hostile or dismissive language, and overall negative tone
/// via the external sentiment oracle.
///
/// Diarization noise is an accepted limitation — consecutive-utterance
/// counting is a heuristic proxy for talking over the patient, not a claim
/// about who interrupted whom.
pub struct DemeanorAnalyzer<'a> {
    taxonomy: &'a Taxonomy,
    config: &'a AnalysisConfig,
    sentiment: Option<&'a dyn SentimentOracle>,
}

impl<'a> DemeanorAnalyzer<'a> {
    pub fn new(taxonomy: &'a Taxonomy, config: &'a AnalysisConfig) -> Self {
        Self {
            taxonomy,
            config,
            sentiment: None,
        }
    }

    pub fn with_sentiment_oracle(mut self, oracle: &'a dyn SentimentOracle) -> Self {
        self.sentiment = Some(oracle);
        self
    }

    /// Run every detection pass over the transcript, scoped to segments
    /// attributed to `examiner`. A failure in any single pass degrades to a
    /// partial result; it never aborts the others.
    pub fn analyze(&self, transcript: &Transcript, examiner: &str) -> Vec<DemeanorFlagEvent> {
        let mut flags = Vec::new();

        let mut consecutive = 0usize;
        let mut last_speaker: Option<&str> = None;
        for segment in &transcript.segments {
            if segment.speaker == examiner {
                let text = segment_text(segment, &transcript.items);

                if last_speaker == Some(examiner) {
                    consecutive += 1;
                    let run = consecutive + 1;
                    if run >= self.config.interruption_run_length {
                        flags.push(DemeanorFlagEvent {
                            kind: FlagKind::Interruption,
                            timestamp: segment.start_time,
                            excerpt: excerpt(&text, self.config.excerpt_max_chars),
                            severity: Severity::Medium,
                            description: format!("Examiner spoke {run} times consecutively"),
                        });
                    }
                } else {
                    consecutive = 0;
                }

                self.scan_tone(&text, segment.start_time, &mut flags);
            }
            last_speaker = Some(segment.speaker.as_str());
        }

        if let Some(flag) = self.overall_sentiment(transcript, examiner) {
            flags.push(flag);
        }

        flags
    }

    /// Lexical tone scan for one segment. Checks are independent — a single
    /// segment can yield several flags of different kinds, and every
    /// matching indicator produces its own flag entry.
    fn scan_tone(&self, text: &str, timestamp: f64, flags: &mut Vec<DemeanorFlagEvent>) {
        let lower = text.to_lowercase();
        let lexicon = self.taxonomy.demeanor();

        for phrase in &lexicon.negative_tone_phrases {
            if lower.contains(phrase.as_str()) {
                flags.push(DemeanorFlagEvent {
                    kind: FlagKind::NegativeTone,
                    timestamp,
                    excerpt: excerpt(text, self.config.excerpt_max_chars),
                    severity: Severity::High,
                    description: format!("Negative language detected: \"{phrase}\""),
                });
            }
        }

        for pattern in lexicon.dismissive_patterns() {
            if pattern.is_match(&lower) {
                flags.push(DemeanorFlagEvent {
                    kind: FlagKind::Dismissive,
                    timestamp,
                    excerpt: excerpt(text, self.config.excerpt_max_chars),
                    severity: Severity::Medium,
                    description: "Dismissive language detected".to_string(),
                });
            }
        }

        for pattern in lexicon.aggressive_patterns() {
            if pattern.is_match(&lower) {
                flags.push(DemeanorFlagEvent {
                    kind: FlagKind::Aggressive,
                    timestamp,
                    excerpt: excerpt(text, self.config.excerpt_max_chars),
                    severity: Severity::High,
                    description: "Aggressive or controlling language detected".to_string(),
                });
            }
        }
    }

    /// Coarse whole-session tone check: the leading examiner segments are
    /// concatenated, capped to the oracle's input limit, and scored once.
    /// Oracle failure degrades gracefully — no flag, nothing else affected.
    fn overall_sentiment(
        &self,
        transcript: &Transcript,
        examiner: &str,
    ) -> Option<DemeanorFlagEvent> {
        let oracle = self.sentiment?;

        let examiner_segments: Vec<&Segment> = transcript
            .segments
            .iter()
            .filter(|s| s.speaker == examiner)
            .collect();
        let first = examiner_segments.first()?;

        let text = examiner_segments
            .iter()
            .take(self.config.sentiment_segment_limit)
            .map(|s| segment_text(s, &transcript.items))
            .collect::<Vec<_>>()
            .join(" ");
        if text.trim().is_empty() {
            return None;
        }
        let sample = excerpt(&text, self.config.sentiment_input_limit);

        match oracle.detect_sentiment(&sample) {
            Ok(score)
                if score.sentiment == SentimentLabel::Negative
                    && score.negative > self.config.negative_sentiment_threshold =>
            {
                Some(DemeanorFlagEvent {
                    kind: FlagKind::NegativeSentiment,
                    timestamp: first.start_time,
                    excerpt: excerpt(&sample, self.config.excerpt_max_chars),
                    severity: Severity::Medium,
                    description: format!(
                        "Overall negative sentiment detected (score: {:.2})",
                        score.negative
                    ),
                })
            }
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Sentiment oracle unavailable, skipping holistic tone check");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transcript::TranscriptItem;
    use crate::oracle::{MockSentimentOracle, SentimentScore};

    const EXAMINER: &str = "speaker_0";

    /// Build a transcript where each entry is (speaker, text, start_time);
    /// words are laid out one second apart inside each segment.
    fn transcript_of(entries: &[(&str, &str, f64)]) -> Transcript {
        let mut items = Vec::new();
        let mut segments = Vec::new();
        for (speaker, text, start) in entries {
            let words: Vec<&str> = text.split_whitespace().collect();
            let end = start + words.len() as f64;
            for (i, word) in words.iter().enumerate() {
                items.push(TranscriptItem::word(word, start + i as f64));
            }
            segments.push(Segment::new(speaker, *start, end));
        }
        Transcript { items, segments }
    }

    #[test]
    fn no_interruption_flag_before_third_consecutive_segment() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[
            (EXAMINER, "please sit down", 0.0),
            (EXAMINER, "we will begin shortly", 10.0),
        ]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);
        assert!(flags.iter().all(|f| f.kind != FlagKind::Interruption));
    }

    #[test]
    fn third_consecutive_segment_raises_interruption() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[
            (EXAMINER, "please sit down", 0.0),
            (EXAMINER, "we will begin shortly", 10.0),
            (EXAMINER, "and hold still please", 20.0),
        ]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);

        let interruptions: Vec<_> = flags
            .iter()
            .filter(|f| f.kind == FlagKind::Interruption)
            .collect();
        assert_eq!(interruptions.len(), 1);
        assert!((interruptions[0].timestamp - 20.0).abs() < f64::EPSILON);
        assert_eq!(interruptions[0].severity, Severity::Medium);
        assert!(interruptions[0].description.contains("3 times consecutively"));
    }

    #[test]
    fn fourth_consecutive_segment_raises_another_interruption() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[
            (EXAMINER, "one", 0.0),
            (EXAMINER, "two", 10.0),
            (EXAMINER, "three", 20.0),
            (EXAMINER, "four", 30.0),
        ]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);
        let descriptions: Vec<_> = flags
            .iter()
            .filter(|f| f.kind == FlagKind::Interruption)
            .map(|f| f.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec![
                "Examiner spoke 3 times consecutively",
                "Examiner spoke 4 times consecutively"
            ]
        );
    }

    #[test]
    fn patient_segment_resets_the_run() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[
            (EXAMINER, "one", 0.0),
            (EXAMINER, "two", 10.0),
            ("speaker_1", "it hurts here", 20.0),
            (EXAMINER, "three", 30.0),
            (EXAMINER, "four", 40.0),
        ]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);
        assert!(flags.iter().all(|f| f.kind != FlagKind::Interruption));
    }

    #[test]
    fn negative_tone_flag_names_the_indicator() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[(EXAMINER, "that's ridiculous, you're lying", 12.0)]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);

        let negative: Vec<_> = flags
            .iter()
            .filter(|f| f.kind == FlagKind::NegativeTone)
            .collect();
        // Two indicator phrases, two flags.
        assert_eq!(negative.len(), 2);
        assert!(negative.iter().all(|f| f.severity == Severity::High));
        assert!(negative
            .iter()
            .any(|f| f.description.contains("that's ridiculous")));
        assert!(negative.iter().any(|f| f.description.contains("you're lying")));
    }

    #[test]
    fn dismissive_and_aggressive_flags_are_independent() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[(
            EXAMINER,
            "that doesn't matter, stop talking and be quiet",
            5.0,
        )]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);

        assert!(flags.iter().any(|f| f.kind == FlagKind::Dismissive));
        // Two control patterns match, each yields its own flag.
        assert_eq!(
            flags.iter().filter(|f| f.kind == FlagKind::Aggressive).count(),
            2
        );
    }

    #[test]
    fn patient_speech_is_never_tone_scanned() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[("speaker_1", "that's ridiculous, shut up", 3.0)]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);
        assert!(flags.is_empty());
    }

    #[test]
    fn negative_sentiment_above_threshold_raises_one_flag() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let oracle = MockSentimentOracle::new(SentimentScore::negative(0.82));
        let transcript = transcript_of(&[
            (EXAMINER, "hurry up", 7.0),
            ("speaker_1", "i am trying", 9.0),
            (EXAMINER, "we do not have all day", 11.0),
        ]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config)
            .with_sentiment_oracle(&oracle)
            .analyze(&transcript, EXAMINER);

        let sentiment: Vec<_> = flags
            .iter()
            .filter(|f| f.kind == FlagKind::NegativeSentiment)
            .collect();
        assert_eq!(sentiment.len(), 1);
        // Timestamped at the first examiner segment's start.
        assert!((sentiment[0].timestamp - 7.0).abs() < f64::EPSILON);
        assert_eq!(sentiment[0].severity, Severity::Medium);
        assert!(sentiment[0].description.contains("0.82"));
    }

    #[test]
    fn mild_sentiment_raises_no_flag() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let oracle = MockSentimentOracle::new(SentimentScore::negative(0.4));
        let transcript = transcript_of(&[(EXAMINER, "please sit down", 0.0)]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config)
            .with_sentiment_oracle(&oracle)
            .analyze(&transcript, EXAMINER);
        assert!(flags.iter().all(|f| f.kind != FlagKind::NegativeSentiment));
    }

    #[test]
    fn oracle_failure_degrades_gracefully() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let oracle = MockSentimentOracle::unavailable();
        let transcript = transcript_of(&[(EXAMINER, "that's ridiculous anyway", 4.0)]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config)
            .with_sentiment_oracle(&oracle)
            .analyze(&transcript, EXAMINER);

        // The lexical pass still produced its flag.
        assert!(flags.iter().any(|f| f.kind == FlagKind::NegativeTone));
        assert!(flags.iter().all(|f| f.kind != FlagKind::NegativeSentiment));
    }

    #[test]
    fn no_oracle_configured_means_no_sentiment_pass() {
        let taxonomy = Taxonomy::standard().unwrap();
        let config = AnalysisConfig::default();
        let transcript = transcript_of(&[(EXAMINER, "please sit down", 0.0)]);
        let flags = DemeanorAnalyzer::new(&taxonomy, &config).analyze(&transcript, EXAMINER);
        assert!(flags.is_empty());
    }
}
