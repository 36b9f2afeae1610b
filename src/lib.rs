/*!
 * # subalign - Sentence alignment for translated subtitles
 *
 * A Rust library that aligns a translated text with the timing of the
 * original speech and produces display-ready SubRip subtitles.
 *
 * ## Features
 *
 * - Sentence windows from word-level transcription timestamps
 * - Exact sentence-count matching of the translation, with a pluggable
 *   delegation tier (e.g. an LLM) ahead of punctuation and proportional splits
 * - Language-aware line wrapping (Latin, Japanese, Chinese, Korean)
 * - Cue allocation that keeps long segments inside their time window
 * - Sequential retiming when synthesized speech overruns its window
 * - SubRip rendering and parsing
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: The alignment stages:
 *   - `alignment::sentences`: Sentence boundary extraction
 *   - `alignment::matcher`: Sentence-count matching strategies
 *   - `alignment::formatting`: Display line wrapping
 *   - `alignment::cues`: Cue allocation
 *   - `alignment::timeline`: Timeline reconciliation
 * - `pipeline`: All stages composed for one request
 * - `subtitle_processor`: SubRip file handling
 * - `validation`: Timing checks on windows and cues
 * - `app_config`: Configuration management
 * - `language_utils`: ISO language code utilities and per-language policy
 * - `logging`: Console logger and request-scoped log context
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod logging;
pub mod pipeline;
pub mod subtitle_processor;
pub mod validation;

// Re-export main types for easier usage
pub use alignment::{
    AudioSegmentRecord, Cue, CueAllocator, DisplayFormatter, SentenceExtractor, SentenceMatcher,
    SentenceWindow, SequentialTimeline, SplitDelegate, TimelineReconciler, Word,
};
pub use app_config::Config;
pub use errors::{AlignmentError, AppError, ProviderError, SubtitleError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t, LanguageProfile};
pub use logging::{ConsoleLogger, RequestContext};
pub use pipeline::{AlignmentJob, PipelineOutput, SubtitlePipeline};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
