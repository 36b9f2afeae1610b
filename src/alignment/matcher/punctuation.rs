/*!
 * Punctuation-structural split.
 *
 * Cuts the translated text after sentence marks, falling back to clause
 * marks when sentence marks alone give too few pieces. Surplus pieces are
 * merged down to the target count.
 */

use crate::alignment::matcher::merge::{merge_proportional, merge_shortest_pairs};
use crate::alignment::matcher::{SplitRequest, SplitStrategy};
use crate::app_config::MergePolicy;
use crate::errors::AlignmentError;

/// Split `text` after every run of `marks`, trimming and dropping empty pieces.
///
/// A mark between two ASCII digits (`3.5`, `1,000`, `10:30`) is not a cut point.
pub fn split_after_marks(text: &str, marks: &[char]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut pieces = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        current.push(c);

        if !marks.contains(&c) {
            continue;
        }

        let next = chars.get(i + 1).copied();
        let prev = i.checked_sub(1).map(|p| chars[p]);

        if next.is_some_and(|n| marks.contains(&n)) {
            continue;
        }
        if prev.is_some_and(|p| p.is_ascii_digit()) && next.is_some_and(|n| n.is_ascii_digit()) {
            continue;
        }

        push_trimmed(&mut pieces, &current);
        current.clear();
    }

    push_trimmed(&mut pieces, &current);
    pieces
}

fn push_trimmed(pieces: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        pieces.push(trimmed.to_string());
    }
}

/// Second tier: split on language-aware punctuation
#[derive(Debug, Clone, Default)]
pub struct PunctuationSplit {
    merge_policy: MergePolicy,
}

impl PunctuationSplit {
    pub fn new(merge_policy: MergePolicy) -> Self {
        Self { merge_policy }
    }

    fn reduce(&self, pieces: Vec<String>, target: usize, joiner: &str) -> Vec<String> {
        match self.merge_policy {
            MergePolicy::Proportional => merge_proportional(pieces, target, joiner),
            MergePolicy::ShortestPair => merge_shortest_pairs(pieces, target, joiner),
        }
    }
}

impl SplitStrategy for PunctuationSplit {
    fn name(&self) -> &'static str {
        "punctuation"
    }

    fn split(&self, request: &SplitRequest<'_>) -> Result<Vec<String>, AlignmentError> {
        let target = request.target_count;
        let profile = request.profile;

        let sentences = split_after_marks(request.text, profile.terminators);
        if sentences.len() >= target {
            return Ok(self.reduce(sentences, target, profile.joiner));
        }

        let clauses: Vec<String> = sentences
            .iter()
            .flat_map(|sentence| split_after_marks(sentence, profile.secondary_punctuation))
            .collect();
        if clauses.len() >= target {
            return Ok(self.reduce(clauses, target, profile.joiner));
        }

        Err(AlignmentError::CountMismatch {
            strategy: self.name().to_string(),
            expected: target,
            actual: clauses.len(),
        })
    }
}
