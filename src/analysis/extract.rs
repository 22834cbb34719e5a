use crate::models::enums::ItemKind;
use crate::models::transcript::{Segment, TranscriptItem};

/// Reconstruct the words spoken inside a segment's time window.
///
/// Items and segments carry no explicit linkage, so membership is recomputed
/// per query: a word belongs to the segment when its own start time falls in
/// `[start_time, end_time]`, inclusive on both ends. Punctuation and items
/// with no start time are skipped. Empty inputs yield an empty string.
pub fn segment_text(segment: &Segment, items: &[TranscriptItem]) -> String {
    let mut words: Vec<&str> = Vec::new();
    for item in items {
        if item.kind != ItemKind::Pronunciation {
            continue;
        }
        let Some(start) = item.start_time else {
            continue;
        };
        if start >= segment.start_time && start <= segment.end_time {
            words.push(item.content.as_str());
        }
    }
    words.join(" ")
}

/// Char-boundary-safe prefix of `text`, at most `max_chars` characters.
/// Verbatim transcript excerpts carried on events are bounded with this.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    text.chars().take(max_chars).collect()
}
