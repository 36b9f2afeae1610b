/*!
 * Length-proportional split, the terminal matching tier.
 *
 * For two segments the cut lands near the character offset given by the
 * first window's share of the total duration, moved to the nearest break
 * character when one is close. For more segments the text is cut into equal
 * character ranges. Either way the tier returns exactly the requested count.
 */

use crate::alignment::matcher::{SplitRequest, SplitStrategy};
use crate::errors::AlignmentError;

/// Last-resort tier; never fails for a target count of at least 1
#[derive(Debug, Clone)]
pub struct ProportionalSplit {
    search_window: usize,
}

impl ProportionalSplit {
    pub fn new(search_window: usize) -> Self {
        Self { search_window }
    }

    /// Share of the text that belongs to the first of two windows
    fn first_share(request: &SplitRequest<'_>) -> f64 {
        let [first, second, ..] = request.windows else {
            return 0.5;
        };

        let first_duration = first.duration().max(0.0);
        let total = first_duration + second.duration().max(0.0);
        if total > 0.0 && total.is_finite() {
            first_duration / total
        } else {
            0.5
        }
    }

    /// Cut position for a two-way split, in chars
    fn find_cut(&self, chars: &[char], share: f64, break_chars: &[char]) -> usize {
        let len = chars.len();
        let target = ((len as f64) * share).round() as usize;
        let target = target.clamp(1, len - 1);
        let radius = self.search_window.min(len / 4);

        let acceptable = |pos: usize| -> bool {
            if pos == 0 || pos >= len {
                return false;
            }
            let before = chars[pos - 1];
            chars[pos].is_whitespace() || (break_chars.contains(&before) && !before.is_whitespace())
        };

        for distance in 0..=radius {
            if let Some(pos) = target.checked_sub(distance) {
                if acceptable(pos) {
                    return pos;
                }
            }
            if distance > 0 && acceptable(target + distance) {
                return target + distance;
            }
        }

        target
    }

    fn split_at(chars: &[char], bounds: &[usize]) -> Vec<String> {
        bounds
            .windows(2)
            .map(|range| {
                chars[range[0]..range[1]]
                    .iter()
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .collect()
    }
}

impl Default for ProportionalSplit {
    fn default() -> Self {
        Self::new(20)
    }
}

impl SplitStrategy for ProportionalSplit {
    fn name(&self) -> &'static str {
        "proportional"
    }

    fn split(&self, request: &SplitRequest<'_>) -> Result<Vec<String>, AlignmentError> {
        let target = request.target_count;
        if target == 0 {
            return Err(AlignmentError::InvalidSegmentCount);
        }

        let chars: Vec<char> = request.text.chars().collect();
        let len = chars.len();

        if target == 1 {
            return Ok(vec![request.text.trim().to_string()]);
        }

        if target == 2 && len >= 2 {
            let cut = self.find_cut(&chars, Self::first_share(request), request.profile.break_chars);
            return Ok(Self::split_at(&chars, &[0, cut, len]));
        }

        let bounds: Vec<usize> = (0..=target).map(|i| i * len / target).collect();
        Ok(Self::split_at(&chars, &bounds))
    }
}
