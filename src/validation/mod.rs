/*!
 * Validation of alignment output.
 *
 * - `timecodes`: ordering and duration checks for windows and cues
 */

pub mod timecodes;

pub use timecodes::{TimelineValidator, TimingIssue, TimingValidationResult};
