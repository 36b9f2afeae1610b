/*!
 * Timeline reconciliation after speech synthesis.
 *
 * When synthesized audio placed at its original start would run into the
 * next segment, the whole batch is retimed sequentially: each segment starts
 * a fixed gap after the previous one ends. The decision is all-or-nothing.
 */

use log::{debug, warn};

use crate::alignment::model::{AudioSegmentRecord, SentenceWindow, SequentialTimeline, TimelineEntry};
use crate::app_config::TimingConfig;
use crate::errors::AlignmentError;

/// Build reconciler input from windows, their segments and measured audio durations.
///
/// Segments with empty text or a non-positive duration have no audio and are skipped.
pub fn audio_records_for(
    windows: &[SentenceWindow],
    segments: &[String],
    durations: &[f64],
) -> Vec<AudioSegmentRecord> {
    windows
        .iter()
        .zip(segments)
        .zip(durations)
        .enumerate()
        .filter_map(|(index, ((window, segment), &duration))| {
            if segment.trim().is_empty() {
                debug!("Segment {} has no text, no audio record", index);
                return None;
            }
            if !(duration.is_finite() && duration > 0.0) {
                warn!("{}", AlignmentError::InvalidDuration { index, duration });
                return None;
            }
            Some(AudioSegmentRecord::new(index, window.start, window.end, duration))
        })
        .collect()
}

/// Detects audio overruns and derives the sequential timeline
#[derive(Debug, Clone)]
pub struct TimelineReconciler {
    overlap_margin_secs: f64,
    inter_segment_gap_secs: f64,
}

impl TimelineReconciler {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            overlap_margin_secs: timing.overlap_margin_secs,
            inter_segment_gap_secs: timing.inter_segment_gap_secs,
        }
    }

    /// Usable records in original start order; invalid durations are dropped
    fn ordered(records: &[AudioSegmentRecord]) -> Vec<&AudioSegmentRecord> {
        let mut valid: Vec<&AudioSegmentRecord> = records
            .iter()
            .filter(|record| {
                let duration = record.synthesized_duration;
                let ok = duration.is_finite() && duration > 0.0;
                if !ok {
                    warn!(
                        "{}",
                        AlignmentError::InvalidDuration {
                            index: record.index,
                            duration
                        }
                    );
                }
                ok
            })
            .collect();

        valid.sort_by(|a, b| a.original_start.total_cmp(&b.original_start));
        valid
    }

    /// Whether any segment's audio runs into the next segment's start
    pub fn detect_overlap(&self, records: &[AudioSegmentRecord]) -> bool {
        Self::ordered(records).windows(2).any(|pair| {
            let (current, next) = (pair[0], pair[1]);
            let overrun = current.playback_end() - self.overlap_margin_secs;
            if overrun > next.original_start {
                warn!(
                    "Segment {} audio ends at {:.2}s, past segment {} start {:.2}s",
                    current.index,
                    current.playback_end(),
                    next.index,
                    next.original_start
                );
                true
            } else {
                false
            }
        })
    }

    /// Back-to-back placement of every usable record, starting at zero
    pub fn sequential_timeline(&self, records: &[AudioSegmentRecord]) -> SequentialTimeline {
        let mut timeline = SequentialTimeline::new();
        let mut cursor: Option<f64> = None;

        for record in Self::ordered(records) {
            let start = cursor.map_or(0.0, |end| end + self.inter_segment_gap_secs);
            let end = start + record.synthesized_duration;

            debug!(
                "Segment {} retimed from {:.2}s to {:.2}s-{:.2}s",
                record.index, record.original_start, start, end
            );

            timeline.insert(
                record.index,
                TimelineEntry {
                    sequential_start: start,
                    sequential_end: end,
                },
            );
            cursor = Some(end);
        }

        timeline
    }

    /// Sequential timeline when any overlap exists, otherwise `None`
    pub fn reconcile(&self, records: &[AudioSegmentRecord]) -> Option<SequentialTimeline> {
        if self.detect_overlap(records) {
            Some(self.sequential_timeline(records))
        } else {
            None
        }
    }
}

impl Default for TimelineReconciler {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}
