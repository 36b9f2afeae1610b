use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::language_utils::{self, LanguageProfile};

/// Library configuration module
/// This module handles the alignment configuration including loading,
/// validating and deriving the per-language profile.
/// Represents the alignment configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Target language tag (ISO, optionally region-qualified)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Display formatting config
    #[serde(default)]
    pub formatting: FormattingConfig,

    /// Timing constants
    #[serde(default)]
    pub timing: TimingConfig,

    /// Sentence-count matching config
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Display formatting configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FormattingConfig {
    /// Explicit maximum line length, overriding the language default
    #[serde(default)]
    pub max_line_length: Option<usize>,

    /// Lines shown together in one cue
    #[serde(default = "default_max_lines_per_cue")]
    pub max_lines_per_cue: usize,

    /// Cut tokens longer than a line into line-sized chunks
    #[serde(default)]
    pub break_long_tokens: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            max_line_length: None,
            max_lines_per_cue: default_max_lines_per_cue(),
            break_long_tokens: false,
        }
    }
}

/// Timing constants used by the extractor, allocator and reconciler
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimingConfig {
    /// Gap between sentences (seconds) above which the earlier window is extended
    #[serde(default = "default_gap_fill_threshold_secs")]
    pub gap_fill_threshold_secs: f64,

    /// Share of the gap absorbed by the earlier window (0.0 to 1.0)
    #[serde(default = "default_gap_fill_ratio")]
    pub gap_fill_ratio: f64,

    /// Safety margin (seconds) tolerated before synthesized audio counts as overlapping
    #[serde(default = "default_overlap_margin_secs")]
    pub overlap_margin_secs: f64,

    /// Silence inserted between segments on a sequential timeline
    #[serde(default = "default_inter_segment_gap_secs")]
    pub inter_segment_gap_secs: f64,

    /// Seconds added to half the base duration for a one-line final cue
    #[serde(default = "default_short_tail_bonus_secs")]
    pub short_tail_bonus_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gap_fill_threshold_secs: default_gap_fill_threshold_secs(),
            gap_fill_ratio: default_gap_fill_ratio(),
            overlap_margin_secs: default_overlap_margin_secs(),
            inter_segment_gap_secs: default_inter_segment_gap_secs(),
            short_tail_bonus_secs: default_short_tail_bonus_secs(),
        }
    }
}

/// How surplus punctuation pieces are merged down to the target count
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Group boundaries at `round(i * parts / n)`
    #[default]
    Proportional,
    /// Repeatedly merge the adjacent pair with the smallest combined length
    ShortestPair,
}

/// Sentence-count matching configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Whether an injected split delegate is consulted first
    #[serde(default = "default_true")]
    pub enable_delegation: bool,

    /// Maximum radius (characters) searched around the proportional split point
    #[serde(default = "default_proportional_search_window")]
    pub proportional_search_window: usize,

    /// Merge policy applied by the punctuation tier
    #[serde(default)]
    pub punctuation_merge: MergePolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            enable_delegation: true,
            proportional_search_window: default_proportional_search_window(),
            punctuation_merge: MergePolicy::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_max_lines_per_cue() -> usize {
    2
}

fn default_gap_fill_threshold_secs() -> f64 {
    0.2
}

fn default_gap_fill_ratio() -> f64 {
    0.8
}

fn default_overlap_margin_secs() -> f64 {
    2.0
}

fn default_inter_segment_gap_secs() -> f64 {
    0.1
}

fn default_short_tail_bonus_secs() -> f64 {
    1.0
}

fn default_proportional_search_window() -> usize {
    20
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Create a default configuration for a target language
    pub fn for_language(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate().context("Configuration validation failed")?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !self.target_language.trim().is_empty() {
            language_utils::validate_language_code(&self.target_language)?;
        }

        if self.formatting.max_line_length == Some(0) {
            return Err(anyhow!("max_line_length must be greater than zero"));
        }

        if self.formatting.max_lines_per_cue == 0 {
            return Err(anyhow!("max_lines_per_cue must be greater than zero"));
        }

        let timing = &self.timing;
        let constants = [
            ("gap_fill_threshold_secs", timing.gap_fill_threshold_secs),
            ("overlap_margin_secs", timing.overlap_margin_secs),
            ("inter_segment_gap_secs", timing.inter_segment_gap_secs),
            ("short_tail_bonus_secs", timing.short_tail_bonus_secs),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number, got {}", name, value));
            }
        }

        if !(0.0..=1.0).contains(&timing.gap_fill_ratio) {
            return Err(anyhow!(
                "gap_fill_ratio must be between 0.0 and 1.0, got {}",
                timing.gap_fill_ratio
            ));
        }

        Ok(())
    }

    /// Language profile with any line length override applied
    pub fn language_profile(&self) -> LanguageProfile {
        let profile = LanguageProfile::for_language(&self.target_language);
        match self.formatting.max_line_length {
            Some(max) => profile.with_max_line_length(max),
            None => profile,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            formatting: FormattingConfig::default(),
            timing: TimingConfig::default(),
            matching: MatchingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
