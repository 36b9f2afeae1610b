/*!
 * Delegated split, the first matching tier.
 *
 * An orchestrator may inject a collaborator (typically an LLM client) that
 * receives the original sentences with their timing and returns the
 * translated text pre-split, one `Sentence k: <text>` line per segment.
 * The collaborator is synchronous from this crate's point of view: any
 * network I/O, retries and credentials live with the caller.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

use crate::alignment::matcher::merge::merge_shortest_pairs;
use crate::alignment::matcher::{SplitRequest, SplitStrategy};
use crate::errors::{AlignmentError, ProviderError};

/// `Sentence 3:`, `句子3：`, `3:` and similar labels
static LABEL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^\s:：]{0,12}\s*\d+|\d+)\s*[:：]\s*").unwrap()
});

/// `句子3` without a colon
static BARE_SENTENCE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^句子\s*\d+\s*").unwrap()
});

/// One original sentence as shown to the delegate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalSentence {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl OriginalSentence {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Everything a delegate needs to split a translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelegationRequest {
    pub translated_text: String,
    /// Target language code, empty when unknown
    pub target_language: String,
    pub sentences: Vec<OriginalSentence>,
    pub target_count: usize,
}

impl DelegationRequest {
    fn from_split_request(request: &SplitRequest<'_>) -> Self {
        Self {
            translated_text: request.text.to_string(),
            target_language: request.profile.code.clone().unwrap_or_default(),
            sentences: request
                .windows
                .iter()
                .map(|w| OriginalSentence {
                    text: w.text(),
                    start: w.start,
                    end: w.end,
                })
                .collect(),
            target_count: request.target_count,
        }
    }

    /// Prompt text for LLM-backed delegates
    pub fn prompt(&self) -> String {
        SplitPromptBuilder::new(self).build()
    }
}

/// Collaborator able to pre-split a translation
pub trait SplitDelegate: Send + Sync {
    /// Return the raw line-per-segment answer
    fn split(&self, request: &DelegationRequest) -> Result<String, ProviderError>;
}

impl<F> SplitDelegate for F
where
    F: Fn(&DelegationRequest) -> Result<String, ProviderError> + Send + Sync,
{
    fn split(&self, request: &DelegationRequest) -> Result<String, ProviderError> {
        self(request)
    }
}

/// Delegate that replays a response fetched ahead of time
#[derive(Debug, Clone)]
pub struct PrecomputedSplit {
    response: String,
}

impl PrecomputedSplit {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl SplitDelegate for PrecomputedSplit {
    fn split(&self, _request: &DelegationRequest) -> Result<String, ProviderError> {
        Ok(self.response.clone())
    }
}

/// Renders the split prompt
#[derive(Debug, Clone)]
pub struct SplitPromptBuilder<'a> {
    request: &'a DelegationRequest,
}

impl<'a> SplitPromptBuilder<'a> {
    pub fn new(request: &'a DelegationRequest) -> Self {
        Self { request }
    }

    pub fn build(&self) -> String {
        let count = self.request.target_count;
        let mut prompt = String::new();

        prompt.push_str(
            "You are a professional text splitting assistant. Split the translated text into the \
             same number of sentences as the original text, keeping the content aligned.\n\n",
        );

        let _ = writeln!(prompt, "Original text ({} sentences):", count);
        for (i, sentence) in self.request.sentences.iter().enumerate() {
            let _ = writeln!(
                prompt,
                "Sentence {} ({:.2}s-{:.2}s, duration {:.2}s): {}",
                i + 1,
                sentence.start,
                sentence.end,
                sentence.duration(),
                sentence.text
            );
        }

        if !self.request.target_language.is_empty() {
            let _ = writeln!(prompt, "\nTranslation language: {}", self.request.target_language);
        }

        let _ = write!(
            prompt,
            "\nTranslated text (split into {} sentences):\n{}\n\n",
            count, self.request.translated_text
        );

        prompt.push_str(
            "Split the translated text into the same number of sentences as the original, keeping \
             the content aligned. Do not add, remove or reword anything. Return only the split \
             sentences, one per line, without explanations.\nFor example:\n\
             Sentence 1: [translation of the first sentence]\n\
             Sentence 2: [translation of the second sentence]\n...\n",
        );

        prompt
    }
}

/// Parse a line-per-segment answer, stripping sentence labels.
///
/// Blank lines are skipped and unlabeled lines are kept as they are.
pub fn parse_split_response(response: &str) -> Result<Vec<String>, ProviderError> {
    let lines: Vec<String> = response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if let Some(m) = LABEL_PREFIX.find(line) {
                line[m.end()..].trim().to_string()
            } else if let Some(m) = BARE_SENTENCE_PREFIX.find(line) {
                line[m.end()..].trim().to_string()
            } else {
                line.to_string()
            }
        })
        .collect();

    if lines.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(lines)
}

/// Strategy wrapper around a [`SplitDelegate`]
pub struct DelegatedSplit {
    delegate: Arc<dyn SplitDelegate>,
}

impl DelegatedSplit {
    pub fn new(delegate: Arc<dyn SplitDelegate>) -> Self {
        Self { delegate }
    }
}

impl SplitStrategy for DelegatedSplit {
    fn name(&self) -> &'static str {
        "delegation"
    }

    fn split(&self, request: &SplitRequest<'_>) -> Result<Vec<String>, AlignmentError> {
        let delegation = DelegationRequest::from_split_request(request);
        let response = self.delegate.split(&delegation)?;
        let lines = parse_split_response(&response)?;

        if lines.len() < request.target_count {
            return Err(AlignmentError::CountMismatch {
                strategy: self.name().to_string(),
                expected: request.target_count,
                actual: lines.len(),
            });
        }

        Ok(merge_shortest_pairs(
            lines,
            request.target_count,
            request.profile.joiner,
        ))
    }
}
