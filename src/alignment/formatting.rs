/*!
 * Display line wrapping for translated segments.
 *
 * A segment that fits the language's line length is shown as one line.
 * Longer segments are tokenized (on whitespace, or after clause punctuation
 * for Japanese) and tokens are packed greedily into lines. A token longer
 * than a line stays whole unless long-token breaking is switched on.
 */

use crate::language_utils::{LanguageProfile, Tokenization};

/// Wraps segments into display lines
#[derive(Debug, Clone)]
pub struct DisplayFormatter {
    max_line_length: usize,
    tokenization: Tokenization,
    token_boundaries: &'static [char],
    break_long_tokens: bool,
}

impl DisplayFormatter {
    pub fn new(profile: &LanguageProfile) -> Self {
        Self {
            max_line_length: profile.max_line_length.max(1),
            tokenization: profile.tokenization,
            token_boundaries: profile.token_boundaries,
            break_long_tokens: false,
        }
    }

    /// Formatter using the language's default line length
    pub fn for_language(target_language: &str) -> Self {
        Self::new(&LanguageProfile::for_language(target_language))
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length.max(1);
        self
    }

    pub fn with_long_token_breaking(mut self, enabled: bool) -> Self {
        self.break_long_tokens = enabled;
        self
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Wrap one segment; an empty segment yields no lines
    pub fn wrap(&self, segment: &str) -> Vec<String> {
        let segment = segment.trim();
        if segment.is_empty() {
            return Vec::new();
        }
        if segment.chars().count() <= self.max_line_length {
            return vec![segment.to_string()];
        }

        let separator = match self.tokenization {
            Tokenization::Whitespace => " ",
            Tokenization::Punctuation => "",
        };

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for token in self.tokenize(segment) {
            let token_len = token.chars().count();

            if current.is_empty() {
                current = token;
                current_len = token_len;
            } else if current_len + token_len + 1 <= self.max_line_length {
                current.push_str(separator);
                current.push_str(&token);
                current_len += separator.chars().count() + token_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current = token;
                current_len = token_len;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        lines
    }

    fn tokenize(&self, segment: &str) -> Vec<String> {
        let raw: Vec<String> = match self.tokenization {
            Tokenization::Whitespace => segment.split_whitespace().map(str::to_string).collect(),
            Tokenization::Punctuation => {
                let mut tokens = Vec::new();
                let mut current = String::new();
                for c in segment.chars() {
                    current.push(c);
                    if self.token_boundaries.contains(&c) {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                if !current.is_empty() {
                    tokens.push(current);
                }
                tokens
            }
        };

        if !self.break_long_tokens {
            return raw;
        }

        raw.into_iter()
            .flat_map(|token| self.hard_break(token))
            .collect()
    }

    /// Cut a token longer than a line into line-sized chunks
    fn hard_break(&self, token: String) -> Vec<String> {
        if token.chars().count() <= self.max_line_length {
            return vec![token];
        }

        let chars: Vec<char> = token.chars().collect();
        chars
            .chunks(self.max_line_length)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new(&LanguageProfile::default())
    }
}
