/*!
 * Property tests for window extraction, cue allocation and reconciliation
 */

use rand::Rng;

use subalign::alignment::{
    AudioSegmentRecord, CueAllocator, DisplayFormatter, SentenceExtractor, SentenceWindow,
    TimelineReconciler, Word,
};
use subalign::validation::TimelineValidator;
use crate::common;

fn random_words(rng: &mut rand::rngs::StdRng, count: usize) -> Vec<Word> {
    let mut cursor = 0.0;
    (0..count)
        .map(|i| {
            let start = cursor + rng.random_range(0.0..1.5);
            let end = start + rng.random_range(0.05..0.8);
            cursor = end;
            let text = if rng.random_bool(0.25) || i + 1 == count {
                format!("word{}.", i)
            } else {
                format!("word{}", i)
            };
            Word::new(text, start, end)
        })
        .collect()
}

/// Test that gap filling never pushes a window past the next start
#[test]
fn test_extract_randomWords_shouldKeepWindowsMonotonic() {
    let mut rng = common::seeded_rng(3);
    let extractor = SentenceExtractor::default();

    for _ in 0..50 {
        let count = rng.random_range(1..60);
        let words = random_words(&mut rng, count);

        let windows = extractor.extract(&words);

        assert_eq!(windows.iter().map(|w| w.words.len()).sum::<usize>(), count);
        for pair in windows.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        for window in &windows {
            assert_eq!(window.start, window.words[0].start);
            assert!(window.end >= window.words[window.words.len() - 1].end);
        }
        assert!(TimelineValidator::new().validate_windows(&windows).passed);
    }
}

/// Test that cue indices are contiguous and starts never regress
#[test]
fn test_allocate_randomSegments_shouldOrderCues() {
    let mut rng = common::seeded_rng(5);
    let formatter = DisplayFormatter::for_language("en").with_max_line_length(12);
    let allocator = CueAllocator::default();

    for _ in 0..50 {
        let count = rng.random_range(1..15);
        let mut cursor = 0.0;
        let mut windows = Vec::new();
        let mut wrapped = Vec::new();

        for _ in 0..count {
            let start = cursor;
            let end = start + rng.random_range(0.2..8.0);
            cursor = end + rng.random_range(0.0..0.5);
            windows.push(SentenceWindow { start, end, words: Vec::new() });

            let sentences = rng.random_range(0..4);
            let text = common::random_latin_text(&mut rng, sentences);
            wrapped.push(formatter.wrap(&text));
        }

        let cues = allocator.allocate(&wrapped, &windows, None);

        for (i, cue) in cues.iter().enumerate() {
            assert_eq!(cue.index, i + 1);
            assert!(cue.lines.len() <= 2);
            assert!(cue.end >= cue.start);
        }
        for pair in cues.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        assert!(TimelineValidator::new().validate_cues(&cues).passed);
    }
}

/// Test that reconciling an already sequential batch finds nothing to do
#[test]
fn test_reconcile_randomOverruns_shouldBeIdempotent() {
    let mut rng = common::seeded_rng(9);
    let reconciler = TimelineReconciler::default();

    for _ in 0..50 {
        let count = rng.random_range(2..20);
        let records: Vec<AudioSegmentRecord> = (0..count)
            .map(|i| {
                let start = i as f64 * 2.0;
                AudioSegmentRecord::new(i, start, start + 2.0, rng.random_range(0.5..6.0))
            })
            .collect();

        if let Some(timeline) = reconciler.reconcile(&records) {
            assert_eq!(timeline.len(), count);
            let entries: Vec<_> = timeline.iter().map(|(_, e)| *e).collect();
            assert_eq!(entries[0].sequential_start, 0.0);
            for pair in entries.windows(2) {
                assert!((pair[1].sequential_start - pair[0].sequential_end - 0.1).abs() < 1e-9);
            }
            assert!(reconciler.reconcile(&timeline.as_records()).is_none());
        } else {
            assert!(!reconciler.detect_overlap(&records));
        }
    }
}
