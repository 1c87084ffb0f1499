use super::score_record::ScoreRecord;
use super::time_interval::TimeInterval;
use crate::shared::constants::{
    MAX_RECORDING_SECS, MILLIS_THRESHOLD, MIN_INTERVAL_SECS, TICKS_PER_SECOND,
};

/// Derives the recording interval for a scored word.
///
/// Phone extents are preferred; item-level bounds are the fallback. A word
/// with neither is reported as untimed rather than given a guessed interval.
pub struct TimingResolver;

impl TimingResolver {
    pub fn resolve(record: &ScoreRecord) -> Option<TimeInterval> {
        Self::from_phone_extents(record).or_else(|| Self::from_item_bounds(record))
    }

    /// Uses the first phone's start tick and the last phone's end tick.
    pub fn from_phone_extents(record: &ScoreRecord) -> Option<TimeInterval> {
        let first = record.phones.first()?.extent?;
        let last = record.phones.last()?.extent?;

        let start = (first[0] as f64 / TICKS_PER_SECOND).max(0.0);
        let end = (last[1] as f64 / TICKS_PER_SECOND).max(start + MIN_INTERVAL_SECS);
        Self::within_recording(&record.word, start, end)
    }

    pub fn from_item_bounds(record: &ScoreRecord) -> Option<TimeInterval> {
        let (Some(start), Some(end)) = (
            Self::normalize_bound(record.start?),
            Self::normalize_bound(record.end?),
        ) else {
            log::warn!("Rejected non-finite item timing for '{}'", record.word);
            return None;
        };

        let start = start.max(0.0);
        let end = end.max(start + MIN_INTERVAL_SECS);
        Self::within_recording(&record.word, start, end)
    }

    fn within_recording(word: &str, start: f64, end: f64) -> Option<TimeInterval> {
        if end > MAX_RECORDING_SECS {
            log::warn!("Rejected timing {start:.2}s-{end:.2}s for '{word}'");
            return None;
        }
        TimeInterval::new(start, end)
    }

    /// Values above the threshold are milliseconds; the rest are seconds.
    pub fn normalize_bound(value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        if value > MILLIS_THRESHOLD {
            Some(value / 1000.0)
        } else {
            Some(value)
        }
    }
}
