/*!
 * Property tests for sentence-count matching.
 *
 * For seeded random Latin and CJK texts, every requested count yields exactly
 * that many segments and the segments reproduce the text.
 */

use subalign::alignment::{SentenceMatcher, SentenceWindow};
use subalign::app_config::{Config, MergePolicy};
use crate::common;

const TARGET_COUNTS: [usize; 5] = [1, 2, 3, 5, 10];

fn windows_for(rng: &mut rand::rngs::StdRng, count: usize) -> Vec<SentenceWindow> {
    use rand::Rng;

    let mut cursor = 0.0;
    (0..count)
        .map(|_| {
            let start = cursor;
            let end = start + rng.random_range(0.3..6.0);
            cursor = end + rng.random_range(0.0..1.0);
            SentenceWindow {
                start,
                end,
                words: Vec::new(),
            }
        })
        .collect()
}

fn assert_exact_and_faithful(matcher: &SentenceMatcher, text: &str, windows: &[SentenceWindow]) {
    let segments = matcher.match_windows(text, windows).unwrap();

    assert_eq!(segments.len(), windows.len(), "count for {:?}", text);
    assert_eq!(
        common::compact(&segments.concat()),
        common::compact(text),
        "fidelity for {:?} into {}",
        text,
        windows.len()
    );
}

/// Test count exactness and fidelity over random Latin text
#[test]
fn test_matchWindows_randomLatinText_shouldBeExactAndFaithful() {
    common::init_test_logging();
    let mut rng = common::seeded_rng(7);
    let matcher = SentenceMatcher::for_language("en");

    for round in 0..40 {
        let text = common::random_latin_text(&mut rng, 1 + round % 12);
        for target in TARGET_COUNTS {
            let windows = windows_for(&mut rng, target);
            assert_exact_and_faithful(&matcher, &text, &windows);
        }
    }
}

/// Test count exactness and fidelity over random CJK text
#[test]
fn test_matchWindows_randomCjkText_shouldBeExactAndFaithful() {
    let mut rng = common::seeded_rng(11);
    let matcher = SentenceMatcher::for_language("zh");

    for round in 0..40 {
        let text = common::random_cjk_text(&mut rng, 1 + round % 12);
        for target in TARGET_COUNTS {
            let windows = windows_for(&mut rng, target);
            assert_exact_and_faithful(&matcher, &text, &windows);
        }
    }
}

/// Test the same properties with the shortest-pair merge policy and Japanese
#[test]
fn test_matchWindows_shortestPairJapanese_shouldBeExactAndFaithful() {
    let mut rng = common::seeded_rng(23);
    let mut config = Config::for_language("ja");
    config.matching.punctuation_merge = MergePolicy::ShortestPair;
    let matcher = SentenceMatcher::new(&config);

    for round in 0..30 {
        let text = common::random_cjk_text(&mut rng, 1 + round % 8);
        for target in TARGET_COUNTS {
            let windows = windows_for(&mut rng, target);
            assert_exact_and_faithful(&matcher, &text, &windows);
        }
    }
}

/// Test that counts above the character count still come back exact
#[test]
fn test_matchCount_moreSegmentsThanCharacters_shouldStillBeExact() {
    let matcher = SentenceMatcher::for_language("en");

    let segments = matcher.match_count("Hi", 10).unwrap();

    assert_eq!(segments.len(), 10);
    assert_eq!(segments.concat(), "Hi");
}

/// Test the punctuation example from the documentation
#[test]
fn test_matchCount_chineseExample_shouldSplitOnFullStops() {
    let matcher = SentenceMatcher::for_language("zh");

    assert_eq!(matcher.match_count("你好。再见。", 2).unwrap(), vec!["你好。", "再见。"]);
}
