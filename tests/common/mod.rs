/*!
 * Common test utilities for the subalign test suite
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use subalign::Word;

// Re-export the mock delegates module
pub mod mock_delegates;

/// Latin vocabulary for generated text
const LATIN_WORDS: &[&str] = &[
    "the", "river", "slowly", "carried", "boats", "toward", "a", "quiet", "harbor", "where",
    "children", "played", "until", "evening", "lights", "appeared", "over", "old", "stone", "bridge",
];

/// CJK characters for generated text
const CJK_CHARS: &[char] = &[
    '我', '们', '今', '天', '去', '公', '园', '散', '步', '看', '见', '很', '多', '花', '朵', '和',
    '小', '鸟', '在', '唱', '歌',
];

/// Install a test logger once; later calls are no-ops
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Timed words for the given sentences.
///
/// Each word lasts `word_secs`; sentences are separated by `pause_secs`.
pub fn timed_words(sentences: &[&str], word_secs: f64, pause_secs: f64) -> Vec<Word> {
    let mut words = Vec::new();
    let mut cursor = 0.0;

    for sentence in sentences {
        for text in sentence.split_whitespace() {
            words.push(Word::new(text, cursor, cursor + word_secs));
            cursor += word_secs;
        }
        cursor += pause_secs;
    }

    words
}

/// Seeded generator for reproducible property tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random Latin text with sentence and clause punctuation
pub fn random_latin_text(rng: &mut StdRng, sentences: usize) -> String {
    let mut parts = Vec::new();

    for _ in 0..sentences {
        let length = rng.random_range(1..10);
        let mut words: Vec<String> = (0..length)
            .map(|_| LATIN_WORDS[rng.random_range(0..LATIN_WORDS.len())].to_string())
            .collect();

        if length > 2 && rng.random_bool(0.4) {
            let at = rng.random_range(0..length - 1);
            words[at].push(',');
        }

        let terminator = ['.', '!', '?'][rng.random_range(0..3)];
        if let Some(last) = words.last_mut() {
            last.push(terminator);
        }
        parts.push(words.join(" "));
    }

    parts.join(" ")
}

/// Random CJK text with full-width punctuation
pub fn random_cjk_text(rng: &mut StdRng, sentences: usize) -> String {
    let mut text = String::new();

    for _ in 0..sentences {
        let length = rng.random_range(2..20);
        for i in 0..length {
            text.push(CJK_CHARS[rng.random_range(0..CJK_CHARS.len())]);
            if i > 0 && i + 1 < length && rng.random_bool(0.1) {
                text.push('，');
            }
        }
        text.push(['。', '！', '？'][rng.random_range(0..3)]);
    }

    text
}

/// Text with every whitespace character removed
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
