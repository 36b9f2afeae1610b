use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for language tag handling
///
/// This module validates and normalizes ISO 639-1 (2-letter) and ISO 639-2
/// (3-letter) codes, including region-qualified tags such as `zh-CN`, and
/// derives the per-language display and splitting policy used by the
/// alignment stages.
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Max line length for English and untagged text
pub const DEFAULT_LATIN_LINE_LENGTH: usize = 50;

/// Max line length for Japanese
pub const JAPANESE_LINE_LENGTH: usize = 15;

/// Max line length for Chinese and Korean
pub const CJK_LINE_LENGTH: usize = 30;

/// Max line length for every other language
pub const OTHER_LINE_LENGTH: usize = 40;

const LATIN_TERMINATORS: &[char] = &['.', '!', '?'];
const CJK_TERMINATORS: &[char] = &['。', '！', '？'];
const SECONDARY_PUNCTUATION: &[char] = &[',', ';', ':', '，', '；', '：', '、'];
const LATIN_BREAKS: &[char] = &[' '];
const CJK_BREAKS: &[char] = &['、', '，', '。', '！', '？', ' '];
const JAPANESE_TOKEN_BOUNDARIES: &[char] = &['、', '。', '！', '？'];

/// Map an ISO 639-2/B code to its ISO 639-2/T equivalent
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let mapped = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(mapped)
}

/// Chinese varieties reported by transcription services without a 639-1 code
fn chinese_variety(code: &str) -> bool {
    matches!(code, "cmn" | "yue" | "wuu" | "hak" | "nan")
}

/// Extract the primary subtag from a tag like `zh-CN` or `ja_JP`
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Validate if a language tag is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = primary_subtag(code);

    match normalized_code.len() {
        2 if Language::from_639_1(&normalized_code).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&normalized_code).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&normalized_code).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = primary_subtag(code);

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a language tag to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let part2t = normalize_to_part2t(code)?;

    if chinese_variety(&part2t) {
        return Ok("zh".to_string());
    }

    let lang = Language::from_639_3(&part2t)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(lang
        .to_639_1()
        .map(|c| c.to_string())
        .unwrap_or(part2t))
}

/// Check if two language tags represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part1_or_part2t(code1), normalize_to_part1_or_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a tag
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// How a segment is cut into tokens before line packing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenization {
    /// Split on runs of whitespace, rejoin with single spaces
    Whitespace,
    /// Split after clause punctuation, rejoin without separator
    Punctuation,
}

/// Display and splitting policy for one target language
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageProfile {
    /// Normalized ISO 639-1 code, when the tag was recognized
    pub code: Option<String>,
    /// Maximum characters per display line
    pub max_line_length: usize,
    /// Tokenization used by the display formatter
    pub tokenization: Tokenization,
    /// Marks that end a sentence in translated text
    pub terminators: &'static [char],
    /// Clause marks used when sentence marks yield too few pieces
    pub secondary_punctuation: &'static [char],
    /// Acceptable break characters for the proportional split search
    pub break_chars: &'static [char],
    /// Token boundaries for punctuation tokenization
    pub token_boundaries: &'static [char],
    /// Separator used when merged segments are joined
    pub joiner: &'static str,
}

impl LanguageProfile {
    /// Build the profile for a language tag; an empty tag means English defaults
    pub fn for_language(tag: &str) -> Self {
        let code = if tag.trim().is_empty() {
            None
        } else {
            normalize_to_part1_or_part2t(tag).ok()
        };

        let (max_line_length, tokenization, cjk) = match code.as_deref() {
            Some("ja") => (JAPANESE_LINE_LENGTH, Tokenization::Punctuation, true),
            Some("zh") => (CJK_LINE_LENGTH, Tokenization::Whitespace, true),
            Some("ko") => (CJK_LINE_LENGTH, Tokenization::Whitespace, false),
            Some("en") => (DEFAULT_LATIN_LINE_LENGTH, Tokenization::Whitespace, false),
            None if tag.trim().is_empty() => {
                (DEFAULT_LATIN_LINE_LENGTH, Tokenization::Whitespace, false)
            }
            _ => (OTHER_LINE_LENGTH, Tokenization::Whitespace, false),
        };

        Self {
            code,
            max_line_length,
            tokenization,
            terminators: if cjk { CJK_TERMINATORS } else { LATIN_TERMINATORS },
            secondary_punctuation: SECONDARY_PUNCTUATION,
            break_chars: if cjk { CJK_BREAKS } else { LATIN_BREAKS },
            token_boundaries: JAPANESE_TOKEN_BOUNDARIES,
            joiner: if cjk { "" } else { " " },
        }
    }

    /// Override the maximum line length
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length.max(1);
        self
    }

    /// Whether the language is written without spaces between words
    pub fn is_unspaced(&self) -> bool {
        self.joiner.is_empty()
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::for_language("")
    }
}
