/*!
 * Integration tests for SubRip files on disk
 */

use std::fs;

use anyhow::Result;

use subalign::pipeline::{AlignmentJob, SubtitlePipeline};
use subalign::subtitle_processor::SubtitleCollection;
use crate::common;

/// Test writing pipeline output to a nested path and reading it back
#[test]
fn test_writeSrt_toNestedPath_shouldCreateDirectoriesAndRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("ko").join("episode.srt");
    let words = common::timed_words(&["Hello there.", "How are you?"], 0.5, 1.0);
    let job = AlignmentJob::new(words, "안녕하세요. 잘 지내세요?");

    let output = SubtitlePipeline::for_language("ko")?.run(&job)?;
    output.write_srt(&path)?;

    let content = fs::read_to_string(&path)?;
    assert_eq!(content, output.srt);

    let collection = SubtitleCollection::read_from_srt(&path, "ko")?;
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.entries[0].text, "안녕하세요.");
    assert_eq!(collection.entries[1].text, "잘 지내세요?");
    assert_eq!(collection.entries, output.subtitles().entries);
    Ok(())
}

/// Test reading a hand-written file with Windows line endings
#[test]
fn test_readFromSrt_withCrlfFile_shouldParseEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "input.srt",
        "1\r\n00:00:01,000 --> 00:00:04,000\r\nThis is a test subtitle.\r\n\r\n2\r\n00:00:05,000 --> 00:00:09,000\r\nIt contains\r\nmultiple lines.\r\n",
    )?;

    let collection = SubtitleCollection::read_from_srt(&path, "en")?;

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.entries[1].text, "It contains\nmultiple lines.");
    assert_eq!(collection.entries[1].end_time_ms, 9_000);
    Ok(())
}

/// Test that an unreadable file reports its path
#[test]
fn test_readFromSrt_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("missing.srt");

    let error = SubtitleCollection::read_from_srt(&path, "en").unwrap_err();

    assert!(error.to_string().contains("missing.srt"));
    Ok(())
}
