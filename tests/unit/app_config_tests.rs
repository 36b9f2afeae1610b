/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use subalign::app_config::{Config, LogLevel, MergePolicy};
use crate::common;

/// Test loading a complete configuration file
#[test]
fn test_fromFile_withFullConfig_shouldLoadAllSections() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "config.json",
        r#"{
            "target_language": "ja",
            "formatting": { "max_line_length": 20, "max_lines_per_cue": 3, "break_long_tokens": true },
            "timing": {
                "gap_fill_threshold_secs": 0.3,
                "gap_fill_ratio": 0.5,
                "overlap_margin_secs": 1.5,
                "inter_segment_gap_secs": 0.2,
                "short_tail_bonus_secs": 0.5
            },
            "matching": {
                "enable_delegation": false,
                "proportional_search_window": 10,
                "punctuation_merge": "shortest_pair"
            },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "ja");
    assert_eq!(config.formatting.max_lines_per_cue, 3);
    assert!(config.formatting.break_long_tokens);
    assert_eq!(config.timing.overlap_margin_secs, 1.5);
    assert!(!config.matching.enable_delegation);
    assert_eq!(config.matching.punctuation_merge, MergePolicy::ShortestPair);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.language_profile().max_line_length, 20);
    Ok(())
}

/// Test that an empty JSON object yields the documented defaults
#[test]
fn test_fromFile_withEmptyObject_shouldUseDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "config.json", "{}")?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.target_language, "en");
    assert!(!config.formatting.break_long_tokens);
    assert_eq!(config.timing.gap_fill_threshold_secs, 0.2);
    assert_eq!(config.timing.inter_segment_gap_secs, 0.1);
    assert_eq!(config.timing.short_tail_bonus_secs, 1.0);
    assert_eq!(config.matching.proportional_search_window, 20);
    assert_eq!(config.matching.punctuation_merge, MergePolicy::Proportional);
    Ok(())
}

/// Test that an unknown language is rejected at load time
#[test]
fn test_fromFile_withUnknownLanguage_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "config.json", r#"{"target_language": "qq"}"#)?;

    let error = Config::from_file(&path).unwrap_err();

    assert!(format!("{:#}", error).contains("Invalid language code"));
    Ok(())
}

/// Test that a missing file reports its path
#[test]
fn test_fromFile_withMissingFile_shouldReportPath() {
    let error = Config::from_file("/definitely/not/here.json").unwrap_err();

    assert!(error.to_string().contains("/definitely/not/here.json"));
}

/// Test validation of negative timing constants
#[test]
fn test_validate_withNegativeGap_shouldFail() {
    let mut config = Config::for_language("fr");
    config.timing.inter_segment_gap_secs = -0.1;

    assert!(config.validate().is_err());
}

/// Test the log level mapping
#[test]
fn test_logLevel_toLevelFilter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
