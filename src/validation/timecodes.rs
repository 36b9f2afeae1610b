/*!
 * Timing validation for sentence windows and cues.
 *
 * This module checks that:
 * - Windows are ordered and never overlap the next window
 * - Windows and cues have non-negative durations
 * - Cue indices run contiguously from 1 with non-decreasing starts
 * - Cues respect the per-cue line limit
 *
 * Validation only reports; it never alters timing.
 */

use log::debug;

use crate::alignment::model::{Cue, SentenceWindow};

/// Tolerance for floating point comparisons, in seconds
const TIME_EPSILON: f64 = 1e-9;

/// Types of timing issues
#[derive(Debug, Clone, PartialEq)]
pub enum TimingIssue {
    /// Window or cue ends before it starts
    NegativeDuration { index: usize, duration: f64 },
    /// Window runs past the start of the next window
    WindowOverlap { index: usize, end: f64, next_start: f64 },
    /// Cue index does not follow the previous one
    IndexGap { position: usize, expected: usize, actual: usize },
    /// Cue starts before the previous cue
    StartRegression { index: usize, start: f64, previous_start: f64 },
    /// Cue is still showing when the next cue starts
    CueOverlap { index: usize, overlap: f64 },
    /// Cue holds more lines than allowed
    TooManyLines { index: usize, lines: usize, max_lines: usize },
}

impl std::fmt::Display for TimingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingIssue::NegativeDuration { index, duration } => {
                write!(f, "Item {} has negative duration {:.3}s", index, duration)
            }
            TimingIssue::WindowOverlap { index, end, next_start } => {
                write!(
                    f,
                    "Window {} ends at {:.3}s after next window starts at {:.3}s",
                    index, end, next_start
                )
            }
            TimingIssue::IndexGap { position, expected, actual } => {
                write!(
                    f,
                    "Cue at position {} has index {} (expected {})",
                    position, actual, expected
                )
            }
            TimingIssue::StartRegression { index, start, previous_start } => {
                write!(
                    f,
                    "Cue {} starts at {:.3}s before previous start {:.3}s",
                    index, start, previous_start
                )
            }
            TimingIssue::CueOverlap { index, overlap } => {
                write!(f, "Cue {} overlaps the next cue by {:.3}s", index, overlap)
            }
            TimingIssue::TooManyLines { index, lines, max_lines } => {
                write!(f, "Cue {} has {} lines (max: {})", index, lines, max_lines)
            }
        }
    }
}

/// Result of validating a window or cue sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingValidationResult {
    /// Overall pass/fail status
    pub passed: bool,
    /// Issues found, in sequence order
    pub issues: Vec<TimingIssue>,
}

impl TimingValidationResult {
    fn from_issues(issues: Vec<TimingIssue>) -> Self {
        Self {
            passed: issues.is_empty(),
            issues,
        }
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Validator for alignment timing
#[derive(Debug, Clone)]
pub struct TimelineValidator {
    max_lines_per_cue: usize,
}

impl TimelineValidator {
    pub fn new() -> Self {
        Self { max_lines_per_cue: 2 }
    }

    pub fn with_max_lines_per_cue(max_lines_per_cue: usize) -> Self {
        Self { max_lines_per_cue }
    }

    /// Validate sentence windows from the extractor
    pub fn validate_windows(&self, windows: &[SentenceWindow]) -> TimingValidationResult {
        let mut issues = Vec::new();

        for (index, window) in windows.iter().enumerate() {
            if window.duration() < -TIME_EPSILON {
                issues.push(TimingIssue::NegativeDuration {
                    index,
                    duration: window.duration(),
                });
            }

            if let Some(next) = windows.get(index + 1) {
                if window.end > next.start + TIME_EPSILON {
                    issues.push(TimingIssue::WindowOverlap {
                        index,
                        end: window.end,
                        next_start: next.start,
                    });
                }
            }
        }

        debug!("Validated {} windows, {} issues", windows.len(), issues.len());
        TimingValidationResult::from_issues(issues)
    }

    /// Validate allocated cues
    pub fn validate_cues(&self, cues: &[Cue]) -> TimingValidationResult {
        let mut issues = Vec::new();

        for (position, cue) in cues.iter().enumerate() {
            if cue.index != position + 1 {
                issues.push(TimingIssue::IndexGap {
                    position,
                    expected: position + 1,
                    actual: cue.index,
                });
            }

            if cue.duration() < -TIME_EPSILON {
                issues.push(TimingIssue::NegativeDuration {
                    index: cue.index,
                    duration: cue.duration(),
                });
            }

            if cue.lines.len() > self.max_lines_per_cue {
                issues.push(TimingIssue::TooManyLines {
                    index: cue.index,
                    lines: cue.lines.len(),
                    max_lines: self.max_lines_per_cue,
                });
            }

            if let Some(next) = cues.get(position + 1) {
                if next.start < cue.start - TIME_EPSILON {
                    issues.push(TimingIssue::StartRegression {
                        index: next.index,
                        start: next.start,
                        previous_start: cue.start,
                    });
                } else if cue.end > next.start + TIME_EPSILON {
                    issues.push(TimingIssue::CueOverlap {
                        index: cue.index,
                        overlap: cue.end - next.start,
                    });
                }
            }
        }

        debug!("Validated {} cues, {} issues", cues.len(), issues.len());
        TimingValidationResult::from_issues(issues)
    }
}

impl Default for TimelineValidator {
    fn default() -> Self {
        Self::new()
    }
}
