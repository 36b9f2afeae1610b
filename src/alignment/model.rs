/*!
 * Core data types for sentence alignment.
 *
 * Times are seconds as `f64`, matching what transcription and speech
 * synthesis collaborators report. Word and window types deserialize from the
 * transcription collaborator's JSON (`word`, `start_time`, `end_time`).
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One transcribed word with its timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Word text, including any attached punctuation
    #[serde(rename = "word")]
    pub text: String,

    /// Start time in seconds
    #[serde(rename = "start_time")]
    pub start: f64,

    /// End time in seconds
    #[serde(rename = "end_time")]
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Time interval attributed to one original sentence.
///
/// `start` equals the first word's start; `end` is at least the last word's
/// end and may be extended into the following pause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceWindow {
    pub start: f64,
    pub end: f64,
    pub words: Vec<Word>,
}

impl SentenceWindow {
    /// Window length in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Original sentence text, words joined by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One timed subtitle display unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// 1-based position in the output sequence
    pub index: usize,
    pub start: f64,
    pub end: f64,
    /// At most `max_lines_per_cue` display lines
    pub lines: Vec<String>,
}

impl Cue {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Lines joined the way they are shown on screen
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Synthesized audio measurement for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSegmentRecord {
    /// Sentence index the audio belongs to
    pub index: usize,
    pub original_start: f64,
    pub original_end: f64,
    /// Measured length of the synthesized audio in seconds
    pub synthesized_duration: f64,
}

impl AudioSegmentRecord {
    pub fn new(index: usize, original_start: f64, original_end: f64, synthesized_duration: f64) -> Self {
        Self {
            index,
            original_start,
            original_end,
            synthesized_duration,
        }
    }

    /// When the audio ends if played at its original start
    pub fn playback_end(&self) -> f64 {
        self.original_start + self.synthesized_duration
    }
}

/// Sequential placement of one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub sequential_start: f64,
    pub sequential_end: f64,
}

/// Overlap-free timing that supersedes original windows for cue placement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequentialTimeline {
    entries: BTreeMap<usize, TimelineEntry>,
}

impl SequentialTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, entry: TimelineEntry) {
        self.entries.insert(index, entry);
    }

    /// Sequential timing for a sentence index, if one was assigned
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending sentence index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &TimelineEntry)> {
        self.entries.iter().map(|(index, entry)| (*index, entry))
    }

    /// Records that place each segment at its sequential slot
    pub fn as_records(&self) -> Vec<AudioSegmentRecord> {
        self.iter()
            .map(|(index, entry)| {
                AudioSegmentRecord::new(
                    index,
                    entry.sequential_start,
                    entry.sequential_end,
                    entry.sequential_end - entry.sequential_start,
                )
            })
            .collect()
    }
}
