/*!
 * Alignment pipeline.
 *
 * Runs the alignment stages in order for one request:
 * 1. Extract: word timestamps to sentence windows
 * 2. Match: translated text to one segment per window
 * 3. Format: segments to display lines
 * 4. Reconcile: sequential retiming when synthesized audio overruns
 * 5. Allocate: display lines to timed cues
 * 6. Render: cues to SubRip text
 *
 * Every stage logs under the request id so one run can be followed in the logs.
 */

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::alignment::matcher::{SentenceMatcher, SplitDelegate};
use crate::alignment::model::{AudioSegmentRecord, Cue, SentenceWindow, SequentialTimeline, Word};
use crate::alignment::timeline::audio_records_for;
use crate::alignment::{CueAllocator, DisplayFormatter, SentenceExtractor, TimelineReconciler};
use crate::app_config::Config;
use crate::errors::AlignmentError;
use crate::language_utils;
use crate::logging::RequestContext;
use crate::subtitle_processor::SubtitleCollection;
use crate::validation::{TimelineValidator, TimingValidationResult};

/// Stages of the alignment pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Extract,
    Match,
    Format,
    Reconcile,
    Allocate,
    Render,
}

impl PipelineStage {
    /// Stage name used in log prefixes
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Extract => "extract",
            PipelineStage::Match => "match",
            PipelineStage::Format => "format",
            PipelineStage::Reconcile => "reconcile",
            PipelineStage::Allocate => "allocate",
            PipelineStage::Render => "render",
        }
    }
}

/// Input for one alignment request.
///
/// Deserializes from the transcription collaborator's JSON plus the
/// translation and, once speech has been synthesized, audio measurements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlignmentJob {
    /// Caller-supplied request id; a fresh one is generated when absent
    #[serde(default)]
    pub request_id: Option<String>,

    /// Full original transcript
    #[serde(default)]
    pub transcript: String,

    /// Timed words of the original speech
    #[serde(default)]
    pub words: Vec<Word>,

    /// Language detected by transcription
    #[serde(default)]
    pub detected_language: Option<String>,

    /// Translation of the transcript as a single blob
    #[serde(default)]
    pub translated_text: String,

    /// Measured audio per segment, when already paired with windows
    #[serde(default)]
    pub audio_segments: Vec<AudioSegmentRecord>,

    /// Synthesized duration per segment, in segment order
    #[serde(default)]
    pub audio_durations: Vec<f64>,
}

impl AlignmentJob {
    pub fn new(words: Vec<Word>, translated_text: impl Into<String>) -> Self {
        Self {
            words,
            translated_text: translated_text.into(),
            ..Default::default()
        }
    }

    /// Parse a job from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse alignment job")
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_audio_durations(mut self, durations: Vec<f64>) -> Self {
        self.audio_durations = durations;
        self
    }
}

/// Everything produced for one request
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub request_id: String,
    pub target_language: String,
    pub windows: Vec<SentenceWindow>,
    pub segments: Vec<String>,
    /// Present only when synthesized audio overran its windows
    pub timeline: Option<SequentialTimeline>,
    pub cues: Vec<Cue>,
    /// Rendered SubRip document
    pub srt: String,
}

impl PipelineOutput {
    pub fn subtitles(&self) -> SubtitleCollection {
        SubtitleCollection::from_cues(&self.cues, &self.target_language)
    }

    /// Write the subtitles to an SRT file
    pub fn write_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.subtitles().write_to_srt(path)
    }

    /// Short description for logs
    pub fn summary(&self) -> String {
        format!(
            "{} windows | {} segments | {} cues | {}",
            self.windows.len(),
            self.segments.len(),
            self.cues.len(),
            if self.timeline.is_some() {
                "sequential timing"
            } else {
                "original timing"
            }
        )
    }
}

/// Composes the alignment stages for one target language
pub struct SubtitlePipeline {
    config: Config,
    extractor: SentenceExtractor,
    matcher: SentenceMatcher,
    formatter: DisplayFormatter,
    allocator: CueAllocator,
    reconciler: TimelineReconciler,
    validator: TimelineValidator,
}

impl SubtitlePipeline {
    /// Create a pipeline from a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate().context("Invalid pipeline configuration")?;

        let profile = config.language_profile();

        Ok(Self {
            extractor: SentenceExtractor::new(&config.timing),
            matcher: SentenceMatcher::new(&config),
            formatter: DisplayFormatter::new(&profile)
                .with_long_token_breaking(config.formatting.break_long_tokens),
            allocator: CueAllocator::new(&config.formatting, &config.timing),
            reconciler: TimelineReconciler::new(&config.timing),
            validator: TimelineValidator::with_max_lines_per_cue(config.formatting.max_lines_per_cue),
            config,
        })
    }

    /// Pipeline with default settings for a target language
    pub fn for_language(target_language: &str) -> Result<Self> {
        Self::new(Config::for_language(target_language))
    }

    /// Consult `delegate` before the built-in split strategies
    pub fn with_delegate(mut self, delegate: Arc<dyn SplitDelegate>) -> Self {
        self.matcher = self.matcher.with_delegate(delegate);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run every stage for one job
    pub fn run(&self, job: &AlignmentJob) -> Result<PipelineOutput, AlignmentError> {
        let context = match &job.request_id {
            Some(id) => RequestContext::with_id(id.clone()),
            None => RequestContext::new(),
        };
        let target_language = self.config.target_language.clone();

        if let Some(detected) = &job.detected_language {
            if language_utils::language_codes_match(detected, &target_language) {
                warn!(
                    "{} detected language '{}' matches the target language",
                    context.stage(PipelineStage::Extract.name()),
                    detected
                );
            }
        }

        let windows = self.extract(job, &context);
        let segments = self.match_segments(job, &windows, &context)?;
        let wrapped = self.format(&segments, &context);
        let timeline = self.reconcile(job, &windows, &segments, &context);
        let cues = self.allocate(&wrapped, &windows, timeline.as_ref(), &context);

        let render_tag = context.stage(PipelineStage::Render.name());
        let srt = SubtitleCollection::from_cues(&cues, &target_language).to_srt_string();
        debug!("{} rendered {} bytes of SubRip", render_tag, srt.len());

        let output = PipelineOutput {
            request_id: context.request_id().to_string(),
            target_language,
            windows,
            segments,
            timeline,
            cues,
            srt,
        };

        info!("{} {}", render_tag, output.summary());
        Ok(output)
    }

    fn extract(&self, job: &AlignmentJob, context: &RequestContext) -> Vec<SentenceWindow> {
        let tag = context.stage(PipelineStage::Extract.name());
        let windows = self.extractor.extract(&job.words);

        info!("{} {} sentence windows from {} words", tag, windows.len(), job.words.len());
        Self::log_issues(&tag.to_string(), &self.validator.validate_windows(&windows));

        windows
    }

    fn match_segments(
        &self,
        job: &AlignmentJob,
        windows: &[SentenceWindow],
        context: &RequestContext,
    ) -> Result<Vec<String>, AlignmentError> {
        let tag = context.stage(PipelineStage::Match.name());

        if windows.is_empty() {
            info!("{} no sentence windows, nothing to match", tag);
            return Ok(Vec::new());
        }

        let segments = self
            .matcher
            .match_windows_with_context(&job.translated_text, windows, context)?;

        info!("{} {} segments for {} windows", tag, segments.len(), windows.len());
        Ok(segments)
    }

    fn format(&self, segments: &[String], context: &RequestContext) -> Vec<Vec<String>> {
        let tag = context.stage(PipelineStage::Format.name());
        let wrapped: Vec<Vec<String>> = segments.iter().map(|s| self.formatter.wrap(s)).collect();

        debug!(
            "{} {} display lines at {} chars per line",
            tag,
            wrapped.iter().map(Vec::len).sum::<usize>(),
            self.formatter.max_line_length()
        );
        wrapped
    }

    fn reconcile(
        &self,
        job: &AlignmentJob,
        windows: &[SentenceWindow],
        segments: &[String],
        context: &RequestContext,
    ) -> Option<SequentialTimeline> {
        let tag = context.stage(PipelineStage::Reconcile.name());

        let records = if !job.audio_segments.is_empty() {
            job.audio_segments.clone()
        } else {
            audio_records_for(windows, segments, &job.audio_durations)
        };

        if records.is_empty() {
            debug!("{} no synthesized audio, keeping original timing", tag);
            return None;
        }

        let timeline = self.reconciler.reconcile(&records);
        match &timeline {
            Some(t) => warn!("{} audio overlap detected, retimed {} segments sequentially", tag, t.len()),
            None => debug!("{} {} audio segments fit their windows", tag, records.len()),
        }
        timeline
    }

    fn allocate(
        &self,
        wrapped: &[Vec<String>],
        windows: &[SentenceWindow],
        timeline: Option<&SequentialTimeline>,
        context: &RequestContext,
    ) -> Vec<Cue> {
        let tag = context.stage(PipelineStage::Allocate.name());
        let cues = self.allocator.allocate(wrapped, windows, timeline);

        info!("{} {} cues", tag, cues.len());
        Self::log_issues(&tag.to_string(), &self.validator.validate_cues(&cues));

        cues
    }

    fn log_issues(tag: &str, result: &TimingValidationResult) {
        for issue in &result.issues {
            warn!("{} {}", tag, issue);
        }
    }
}
