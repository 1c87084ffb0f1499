use serde::Serialize;

use crate::scoring::domain::score_record::{PhoneRecord, ScoreRecord};
use crate::scoring::domain::time_interval::TimeInterval;
use crate::scoring::domain::timing_resolver::TimingResolver;

/// Display-ready feedback for one word of the reference text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WordDisplay {
    /// Position among the word tokens of the text.
    pub index: usize,
    pub word: String,
    pub quality: Option<f64>,
    pub phones: Vec<PhoneRecord>,
    pub timing: Option<TimeInterval>,
    /// Position of the attached record in the service's score list.
    pub record_index: Option<usize>,
}

impl WordDisplay {
    pub fn new(index: usize, word: &str, attached: Option<(usize, &ScoreRecord)>) -> Self {
        match attached {
            Some((record_index, record)) => Self {
                index,
                word: word.to_string(),
                quality: record.quality,
                phones: record.phones.clone(),
                timing: TimingResolver::resolve(record),
                record_index: Some(record_index),
            },
            None => Self::unscored(index, word),
        }
    }

    pub fn unscored(index: usize, word: &str) -> Self {
        Self {
            index,
            word: word.to_string(),
            quality: None,
            phones: Vec::new(),
            timing: None,
            record_index: None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.record_index.is_some()
    }
}
