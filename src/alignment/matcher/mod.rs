/*!
 * Sentence-count matching.
 *
 * Splits one translated text blob into exactly as many segments as there are
 * original sentence windows. Strategies are tried in a fixed order:
 *
 * - `delegation`: an injected collaborator returns a line-per-segment split
 * - `punctuation`: split on sentence marks, then clause marks, then merge
 * - `proportional`: cut by character share of window durations (always succeeds)
 *
 * Every strategy result goes through the same count and fidelity check; any
 * failure means "reject and try the next strategy".
 */

use log::{debug, warn};
use std::sync::Arc;

use crate::alignment::model::SentenceWindow;
use crate::app_config::Config;
use crate::errors::AlignmentError;
use crate::language_utils::LanguageProfile;
use crate::logging::RequestContext;

pub mod delegation;
pub mod merge;
pub mod proportional;
pub mod punctuation;

pub use delegation::{
    parse_split_response, DelegatedSplit, DelegationRequest, OriginalSentence, PrecomputedSplit,
    SplitDelegate, SplitPromptBuilder,
};
pub use proportional::ProportionalSplit;
pub use punctuation::PunctuationSplit;

/// Input handed to each split strategy
#[derive(Debug, Clone, Copy)]
pub struct SplitRequest<'a> {
    /// Translated text, trimmed
    pub text: &'a str,
    /// Number of segments to produce
    pub target_count: usize,
    /// Original windows; may be empty when only a count is known
    pub windows: &'a [SentenceWindow],
    pub profile: &'a LanguageProfile,
}

impl<'a> SplitRequest<'a> {
    pub fn new(
        text: &'a str,
        target_count: usize,
        windows: &'a [SentenceWindow],
        profile: &'a LanguageProfile,
    ) -> Self {
        Self {
            text,
            target_count,
            windows,
            profile,
        }
    }
}

/// One tier of the matching fallback chain
pub trait SplitStrategy: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Produce candidate segments; the matcher validates them afterwards
    fn split(&self, request: &SplitRequest<'_>) -> Result<Vec<String>, AlignmentError>;
}

/// Remove every whitespace character
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check a candidate split for count exactness and concatenation fidelity
pub fn validate_split(
    strategy: &str,
    text: &str,
    segments: &[String],
    expected: usize,
) -> Result<(), AlignmentError> {
    if segments.len() != expected {
        return Err(AlignmentError::CountMismatch {
            strategy: strategy.to_string(),
            expected,
            actual: segments.len(),
        });
    }

    let joined: String = segments.iter().map(|s| strip_whitespace(s)).collect();
    if joined != strip_whitespace(text) {
        return Err(AlignmentError::FidelityMismatch {
            strategy: strategy.to_string(),
        });
    }

    Ok(())
}

/// Runs the strategy chain for one translated text
pub struct SentenceMatcher {
    strategies: Vec<Box<dyn SplitStrategy>>,
    profile: LanguageProfile,
    enable_delegation: bool,
}

impl SentenceMatcher {
    /// Matcher with the punctuation and proportional tiers
    pub fn new(config: &Config) -> Self {
        let strategies: Vec<Box<dyn SplitStrategy>> = vec![
            Box::new(PunctuationSplit::new(config.matching.punctuation_merge)),
            Box::new(ProportionalSplit::new(config.matching.proportional_search_window)),
        ];

        Self {
            strategies,
            profile: config.language_profile(),
            enable_delegation: config.matching.enable_delegation,
        }
    }

    /// Matcher for a language with default settings
    pub fn for_language(target_language: &str) -> Self {
        Self::new(&Config::for_language(target_language))
    }

    /// Put a delegation tier in front of the chain, unless delegation is disabled
    pub fn with_delegate(mut self, delegate: Arc<dyn SplitDelegate>) -> Self {
        if self.enable_delegation {
            self.strategies.insert(0, Box::new(DelegatedSplit::new(delegate)));
        } else {
            debug!("Delegation disabled by configuration, ignoring delegate");
        }
        self
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Names of the strategies in the order they are tried
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Split `text` into one segment per window
    pub fn match_windows(
        &self,
        text: &str,
        windows: &[SentenceWindow],
    ) -> Result<Vec<String>, AlignmentError> {
        self.match_windows_with_context(text, windows, &RequestContext::new())
    }

    /// Split `text` into exactly `target_count` segments without timing hints
    pub fn match_count(&self, text: &str, target_count: usize) -> Result<Vec<String>, AlignmentError> {
        self.run(text, target_count, &[], &RequestContext::new())
    }

    /// Like [`match_windows`](Self::match_windows), logging under an existing request
    pub fn match_windows_with_context(
        &self,
        text: &str,
        windows: &[SentenceWindow],
        context: &RequestContext,
    ) -> Result<Vec<String>, AlignmentError> {
        self.run(text, windows.len(), windows, context)
    }

    fn run(
        &self,
        text: &str,
        target_count: usize,
        windows: &[SentenceWindow],
        context: &RequestContext,
    ) -> Result<Vec<String>, AlignmentError> {
        let tag = context.stage("match");
        let text = text.trim();

        if text.is_empty() {
            debug!("{} empty translated text, no segments", tag);
            return Ok(Vec::new());
        }
        if target_count == 0 {
            return Err(AlignmentError::InvalidSegmentCount);
        }
        if target_count == 1 {
            return Ok(vec![text.to_string()]);
        }

        let request = SplitRequest::new(text, target_count, windows, &self.profile);
        let mut last_error = AlignmentError::InvalidSegmentCount;

        for strategy in &self.strategies {
            let outcome = strategy
                .split(&request)
                .and_then(|segments| {
                    validate_split(strategy.name(), text, &segments, target_count)?;
                    Ok(segments)
                });

            match outcome {
                Ok(segments) => {
                    debug!(
                        "{} strategy '{}' produced {} segments",
                        tag,
                        strategy.name(),
                        segments.len()
                    );
                    return Ok(segments);
                }
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => {
                    warn!("{} strategy '{}' rejected: {}", tag, strategy.name(), e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
