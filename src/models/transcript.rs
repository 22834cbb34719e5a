use serde::{Deserialize, Serialize};

use super::enums::ItemKind;

/// A diarized speech transcript: a flat token stream plus speaker-attributed
/// time spans. Items and segments are correlated only by time overlap — the
/// upstream transcription service emits no explicit linkage between them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Transcript {
    pub items: Vec<TranscriptItem>,
    pub segments: Vec<Segment>,
}

impl Transcript {
    /// True when there is nothing at all to analyze.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.segments.is_empty()
    }
}

/// One transcript token: a spoken word or a punctuation marker.
/// Punctuation items routinely carry no timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub kind: ItemKind,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub content: String,
}

impl TranscriptItem {
    pub fn word(content: &str, start_time: f64) -> Self {
        Self {
            kind: ItemKind::Pronunciation,
            start_time: Some(start_time),
            end_time: Some(start_time),
            content: content.to_string(),
        }
    }

    pub fn punctuation(content: &str) -> Self {
        Self {
            kind: ItemKind::Punctuation,
            start_time: None,
            end_time: None,
            content: content.to_string(),
        }
    }
}

/// A continuous span attributed to one speaker. Spans never overlap within a
/// speaker, but speakers may overlap each other in real time, and segment
/// times are not guaranteed monotonic across the sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub speaker: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl Segment {
    pub fn new(speaker: &str, start_time: f64, end_time: f64) -> Self {
        Self {
            speaker: speaker.to_string(),
            start_time,
            end_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_is_empty() {
        assert!(Transcript::default().is_empty());
    }

    #[test]
    fn transcript_with_only_items_is_not_empty() {
        let transcript = Transcript {
            items: vec![TranscriptItem::word("hello", 1.0)],
            segments: vec![],
        };
        assert!(!transcript.is_empty());
    }

    #[test]
    fn punctuation_has_no_timestamps() {
        let item = TranscriptItem::punctuation(".");
        assert_eq!(item.kind, ItemKind::Punctuation);
        assert!(item.start_time.is_none());
        assert!(item.end_time.is_none());
    }
}
