/*!
 * Sentence boundary extraction from word-level timestamps.
 *
 * Words accumulate into a window until one ends with a sentence mark. A
 * second pass stretches each window into the pause that follows it so
 * subtitles stay visible while the speaker breathes.
 */

use log::{debug, warn};

use crate::alignment::model::{SentenceWindow, Word};
use crate::app_config::TimingConfig;

/// Marks that close a sentence window
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Closing quotes and brackets allowed after a sentence mark
const TRAILING_CLOSERS: &[char] = &['"', '\'', '”', '’', ')', '」', '』', '）'];

/// Whether a word closes its sentence
pub fn ends_sentence(word: &str) -> bool {
    word.trim_end()
        .trim_end_matches(TRAILING_CLOSERS)
        .ends_with(SENTENCE_TERMINATORS)
}

/// Turns a flat word sequence into sentence windows
#[derive(Debug, Clone)]
pub struct SentenceExtractor {
    gap_fill_threshold_secs: f64,
    gap_fill_ratio: f64,
}

impl SentenceExtractor {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            gap_fill_threshold_secs: timing.gap_fill_threshold_secs,
            gap_fill_ratio: timing.gap_fill_ratio,
        }
    }

    /// Extract sentence windows; an empty word list yields no windows
    pub fn extract(&self, words: &[Word]) -> Vec<SentenceWindow> {
        let mut windows = Vec::new();
        let mut current: Vec<Word> = Vec::new();

        for word in words {
            current.push(word.clone());

            if ends_sentence(&word.text) {
                windows.push(Self::close_window(std::mem::take(&mut current)));
            }
        }

        if !current.is_empty() {
            windows.push(Self::close_window(current));
        }

        self.fill_gaps(&mut windows);

        debug!("Extracted {} sentences from {} words", windows.len(), words.len());
        windows
    }

    fn close_window(words: Vec<Word>) -> SentenceWindow {
        let start = words.first().map_or(0.0, |w| w.start);
        let end = words.last().map_or(start, |w| w.end);
        SentenceWindow { start, end, words }
    }

    /// Extend each window into the pause before the next one
    fn fill_gaps(&self, windows: &mut [SentenceWindow]) {
        for i in 0..windows.len().saturating_sub(1) {
            let next_start = windows[i + 1].start;
            let current = &mut windows[i];

            if current.duration() <= 0.0 {
                warn!(
                    "Sentence {} has non-positive duration {:.3}s, leaving it unextended",
                    i,
                    current.duration()
                );
                continue;
            }

            let gap = next_start - current.end;
            if gap > self.gap_fill_threshold_secs {
                current.end = (current.end + gap * self.gap_fill_ratio).min(next_start);
            } else if gap < 0.0 {
                warn!("Sentence {} overlaps the next one by {:.3}s", i, -gap);
            }
        }
    }
}

impl Default for SentenceExtractor {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}
