use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::alignment::model::Cue;
use crate::errors::SubtitleError;

// @module: SubRip rendering and parsing

// @const: SRT timecode line regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2,}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2,}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, lines separated by '\n'
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: text.into(),
        }
    }

    // @creates: Entry for a timed cue
    pub fn from_cue(cue: &Cue) -> Self {
        Self::new(
            cue.index,
            Self::seconds_to_ms(cue.start),
            Self::seconds_to_ms(cue.end),
            cue.text(),
        )
    }

    /// Convert seconds to whole milliseconds, dropping any fraction.
    ///
    /// Negative and non-finite values map to zero.
    pub fn seconds_to_ms(seconds: f64) -> u64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        // Nudge so values like 1.001 (stored as 1.00099..) land on the intended ms
        (seconds * 1000.0 + 1e-6).floor() as u64
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());
        let parts: Vec<&str> = timestamp.trim().split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut values = [0u64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| invalid())?;
        }
        let [hours, minutes, seconds, millis] = values;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered subtitle entries for one target language
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleCollection {
    /// Language of the subtitle text
    pub language: String,

    /// Entries in ascending sequence order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    pub fn new(language: impl Into<String>) -> Self {
        SubtitleCollection {
            language: language.into(),
            entries: Vec::new(),
        }
    }

    /// Build a collection from allocated cues
    pub fn from_cues(cues: &[Cue], language: &str) -> Self {
        SubtitleCollection {
            language: language.to_string(),
            entries: cues.iter().map(SubtitleEntry::from_cue).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every entry as SubRip text
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write subtitles to an SRT file, creating parent directories
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        debug!("Wrote {} subtitle entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Read an SRT file into a collection
    pub fn read_from_srt<P: AsRef<Path>>(path: P, language: &str) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let entries = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;

        Ok(SubtitleCollection {
            language: language.to_string(),
            entries,
        })
    }

    /// Parse SRT content into entries sorted by start time and renumbered from 1
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let mut entries = Vec::new();

        let mut current_seq_num: Option<usize> = None;
        let mut current_times: Option<(u64, u64)> = None;
        let mut current_text = String::new();

        let mut flush = |seq_num: Option<usize>, times: Option<(u64, u64)>, text: &str| {
            let (Some(seq_num), Some((start_ms, end_ms))) = (seq_num, times) else {
                return;
            };
            if text.trim().is_empty() {
                warn!("Skipping empty subtitle entry {}", seq_num);
            } else if end_ms < start_ms {
                warn!("Skipping subtitle entry {} that ends before it starts", seq_num);
            } else {
                entries.push(SubtitleEntry::new(seq_num, start_ms, end_ms, text.trim()));
            }
        };

        for (line_number, line) in content.lines().enumerate() {
            let trimmed = line.trim().trim_start_matches('\u{feff}');

            if trimmed.is_empty() {
                if current_times.is_some() && !current_text.is_empty() {
                    flush(current_seq_num.take(), current_times.take(), &current_text);
                    current_text.clear();
                }
                continue;
            }

            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            if current_seq_num.is_some() && current_times.is_none() {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    current_times = Some((Self::captured_ms(&caps, 1)?, Self::captured_ms(&caps, 5)?));
                    continue;
                }
            }

            if current_times.is_some() {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!(
                    "Unexpected text at line {} before sequence number or timestamp: {}",
                    line_number + 1,
                    trimmed
                );
            }
        }

        flush(current_seq_num, current_times, &current_text);

        if entries.is_empty() {
            return Err(SubtitleError::NoEntries);
        }

        entries.sort_by_key(|entry| entry.start_time_ms);

        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }

    fn captured_ms(caps: &regex::Captures, start_idx: usize) -> Result<u64, SubtitleError> {
        let timestamp = format!(
            "{}:{}:{},{}",
            &caps[start_idx],
            &caps[start_idx + 1],
            &caps[start_idx + 2],
            &caps[start_idx + 3]
        );
        SubtitleEntry::parse_timestamp(&timestamp)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Entries: {}", self.entries.len())
    }
}
