/*!
 * Sentence alignment between an original transcript and its translation.
 *
 * The stages run in order and each is a pure transformation:
 * - `sentences`: word timestamps to sentence windows
 * - `matcher`: translated text to one segment per window
 * - `formatting`: segments to display lines
 * - `cues`: display lines to timed cues
 * - `timeline`: sequential retiming when synthesized audio overruns
 */

pub mod cues;
pub mod formatting;
pub mod matcher;
pub mod model;
pub mod sentences;
pub mod timeline;

pub use cues::CueAllocator;
pub use formatting::DisplayFormatter;
pub use matcher::{SentenceMatcher, SplitDelegate, SplitStrategy};
pub use model::{AudioSegmentRecord, Cue, SentenceWindow, SequentialTimeline, TimelineEntry, Word};
pub use sentences::SentenceExtractor;
pub use timeline::{audio_records_for, TimelineReconciler};
