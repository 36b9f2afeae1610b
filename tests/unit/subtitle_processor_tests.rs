/*!
 * Tests for SubRip rendering and parsing
 */

use std::fmt::Write;

use subalign::alignment::Cue;
use subalign::errors::SubtitleError;
use subalign::subtitle_processor::{SubtitleCollection, SubtitleEntry};

fn cue(index: usize, start: f64, end: f64, lines: &[&str]) -> Cue {
    Cue {
        index,
        start,
        end,
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5025678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitleEntry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle");
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert_eq!(output, "1\n00:00:05,000 --> 00:00:10,000\nTest subtitle\n\n");
}

/// Test rendering a collection built from cues
#[test]
fn test_fromCues_toSrtString_shouldRenderEveryCue() {
    let cues = vec![
        cue(1, 0.0, 1.4, &["Hello world."]),
        cue(2, 1.5, 2.0, &["Bye."]),
        cue(3, 3661.0015, 3662.9999, &["two", "lines"]),
    ];

    let srt = SubtitleCollection::from_cues(&cues, "en").to_srt_string();

    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:01,400\nHello world.\n\n\
         2\n00:00:01,500 --> 00:00:02,000\nBye.\n\n\
         3\n01:01:01,001 --> 01:01:02,999\ntwo\nlines\n\n"
    );
}

/// Test that rendered output parses back to the same entries
#[test]
fn test_parseSrtString_withRenderedCues_shouldRecoverEntries() {
    let cues = vec![cue(1, 0.25, 1.75, &["first", "second"]), cue(2, 2.0, 3.0, &["third"])];
    let collection = SubtitleCollection::from_cues(&cues, "en");

    let parsed = SubtitleCollection::parse_srt_string(&collection.to_srt_string()).unwrap();

    assert_eq!(parsed, collection.entries);
}

/// Test recovery from malformed content around valid entries
#[test]
fn test_parseSrtString_withStrayText_shouldKeepValidEntries() {
    let content = "stray line\n1\n00:00:01,000 --> 00:00:02,000\nValid\n\n2\n00:00:05,000 --> 00:00:04,000\nBackwards\n";

    let entries = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].text, "Valid");
}

/// Test empty content
#[test]
fn test_parseSrtString_withEmptyContent_shouldReportNoEntries() {
    assert_eq!(SubtitleCollection::parse_srt_string(""), Err(SubtitleError::NoEntries));
}
