use serde::Serialize;
use serde_json::Value;

use crate::scoring::domain::score_extractor::{ExtractError, ScoreExtractor};
use crate::scoring::domain::score_record::ScoreRecord;
use crate::shared::settings::Settings;
use crate::text::domain::token::Token;
use crate::text::domain::word_display::WordDisplay;
use crate::text::domain::word_score_aligner::AlignedText;

/// Aggregate figures over one alignment pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub word_count: usize,
    pub scored_count: usize,
    pub timed_count: usize,
    /// Mean quality over words that have one.
    pub average_quality: Option<f64>,
}

impl FeedbackSummary {
    pub fn from_words(words: &[WordDisplay]) -> Self {
        let qualities: Vec<f64> = words.iter().filter_map(|w| w.quality).collect();
        let average_quality = if qualities.is_empty() {
            None
        } else {
            Some(qualities.iter().sum::<f64>() / qualities.len() as f64)
        };
        Self {
            word_count: words.len(),
            scored_count: words.iter().filter(|w| w.is_scored()).count(),
            timed_count: words.iter().filter(|w| w.timing.is_some()).count(),
            average_quality,
        }
    }
}

/// Everything the rendering layer needs for one scoring result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReadingFeedback {
    pub tokens: Vec<Token>,
    pub words: Vec<WordDisplay>,
    pub summary: FeedbackSummary,
}

/// Turns a reference text and a raw scoring response into per-word feedback.
pub struct ReadingFeedbackUseCase {
    lookahead: usize,
}

impl ReadingFeedbackUseCase {
    pub fn new(settings: &Settings) -> Self {
        Self {
            lookahead: settings.lookahead,
        }
    }

    pub fn execute(&self, text: &str, response: &Value) -> ReadingFeedback {
        let records = ScoreExtractor::extract(response);
        self.execute_records(text, &records)
    }

    pub fn execute_str(&self, text: &str, body: &str) -> Result<ReadingFeedback, ExtractError> {
        let records = ScoreExtractor::extract_from_str(body)?;
        Ok(self.execute_records(text, &records))
    }

    pub fn execute_records(&self, text: &str, records: &[ScoreRecord]) -> ReadingFeedback {
        let AlignedText { tokens, words } = AlignedText::build(text, records, self.lookahead);
        let summary = FeedbackSummary::from_words(&words);
        log::debug!(
            "Aligned {} words against {} scores ({} timed)",
            summary.word_count,
            records.len(),
            summary.timed_count
        );
        ReadingFeedback {
            tokens,
            words,
            summary,
        }
    }
}
