/*!
 * Cue allocation.
 *
 * Turns wrapped segments into timed cues. A segment that fits in one cue
 * spans its whole window; a longer one is cut into consecutive cues that
 * share the window, with a shorter dwell for a single trailing line.
 *
 * On a sequential timeline a segment without audio has no slot of its own;
 * it gets a zero-length cue at the point where the next segment would start.
 */

use log::{debug, warn};

use crate::alignment::model::{Cue, SentenceWindow, SequentialTimeline};
use crate::app_config::{FormattingConfig, TimingConfig};

/// Assigns time ranges and global indices to display lines
#[derive(Debug, Clone)]
pub struct CueAllocator {
    max_lines_per_cue: usize,
    short_tail_bonus_secs: f64,
    inter_segment_gap_secs: f64,
}

impl CueAllocator {
    pub fn new(formatting: &FormattingConfig, timing: &TimingConfig) -> Self {
        Self {
            max_lines_per_cue: formatting.max_lines_per_cue.max(1),
            short_tail_bonus_secs: timing.short_tail_bonus_secs,
            inter_segment_gap_secs: timing.inter_segment_gap_secs,
        }
    }

    /// Allocate cues for wrapped segments paired with their windows.
    ///
    /// `wrapped[i]` belongs to `windows[i]`. With a `timeline`, every segment
    /// is placed on it: an entry's sequential range replaces the window's
    /// range, and a segment missing from the timeline is pinned at the running
    /// sequential position. Segments without lines produce no cue; indices
    /// stay contiguous.
    pub fn allocate(
        &self,
        wrapped: &[Vec<String>],
        windows: &[SentenceWindow],
        timeline: Option<&SequentialTimeline>,
    ) -> Vec<Cue> {
        let mut cues = Vec::new();
        let mut sequential_end: Option<f64> = None;

        for (i, (lines, window)) in wrapped.iter().zip(windows).enumerate() {
            let (start, end) = match timeline {
                None => (window.start, window.end),
                Some(timeline) => match timeline.get(i) {
                    Some(entry) => {
                        sequential_end = Some(entry.sequential_end);
                        (entry.sequential_start, entry.sequential_end)
                    }
                    None => {
                        let at = sequential_end.map_or(0.0, |end| end + self.inter_segment_gap_secs);
                        if !lines.is_empty() {
                            warn!("Segment {} has no sequential slot, pinned at {:.2}s", i, at);
                        }
                        (at, at)
                    }
                },
            };

            if lines.is_empty() {
                continue;
            }

            self.allocate_segment(lines, start, end, &mut cues);
        }

        cues
    }

    fn allocate_segment(&self, lines: &[String], start: f64, end: f64, cues: &mut Vec<Cue>) {
        if lines.len() <= self.max_lines_per_cue {
            cues.push(Cue {
                index: cues.len() + 1,
                start,
                end,
                lines: lines.to_vec(),
            });
            return;
        }

        let parts: Vec<&[String]> = lines.chunks(self.max_lines_per_cue).collect();
        let base_duration = (end - start) / parts.len() as f64;
        let last = parts.len() - 1;

        debug!(
            "Splitting {} lines into {} cues of {:.2}s",
            lines.len(),
            parts.len(),
            base_duration
        );

        for (k, part) in parts.into_iter().enumerate() {
            let part_start = start + k as f64 * base_duration;
            let duration = if k == last && part.len() == 1 {
                base_duration / 2.0 + self.short_tail_bonus_secs
            } else {
                base_duration
            };

            cues.push(Cue {
                index: cues.len() + 1,
                start: part_start,
                end: (part_start + duration).min(end),
                lines: part.to_vec(),
            });
        }
    }
}

impl Default for CueAllocator {
    fn default() -> Self {
        Self::new(&FormattingConfig::default(), &TimingConfig::default())
    }
}
