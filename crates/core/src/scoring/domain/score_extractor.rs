use serde_json::Value;
use thiserror::Error;

use super::score_record::ScoreRecord;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("scoring response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Known layouts of a scoring response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Reference-text reading: `text_score.word_score_list`.
    TextScore,
    /// Free-form speech: `speech_score.word_score_list`.
    SpeechScore,
    /// Word list at the top level: `word_score_list`.
    TopLevel,
    /// The response body is the word list itself.
    BareList,
}

struct ExtractionAttempt {
    shape: ResponseShape,
    path: &'static [&'static str],
}

/// Probed in order; the first path that resolves to a list wins.
const ATTEMPTS: &[ExtractionAttempt] = &[
    ExtractionAttempt {
        shape: ResponseShape::TextScore,
        path: &["text_score", "word_score_list"],
    },
    ExtractionAttempt {
        shape: ResponseShape::SpeechScore,
        path: &["speech_score", "word_score_list"],
    },
    ExtractionAttempt {
        shape: ResponseShape::TopLevel,
        path: &["word_score_list"],
    },
    ExtractionAttempt {
        shape: ResponseShape::BareList,
        path: &[],
    },
];

impl ExtractionAttempt {
    fn try_extract<'a>(&self, response: &'a Value) -> Option<&'a Vec<Value>> {
        self.path
            .iter()
            .try_fold(response, |node, key| node.get(*key))?
            .as_array()
    }
}

pub struct ScoreExtractor;

impl ScoreExtractor {
    /// Returns the per-word score list in service order.
    ///
    /// An unrecognised shape yields an empty list, which callers treat as
    /// "no scoring data available".
    pub fn extract(response: &Value) -> Vec<ScoreRecord> {
        match Self::locate(response) {
            Some((shape, list)) => {
                log::debug!("Found {} word scores ({shape:?})", list.len());
                list.iter().map(ScoreRecord::from_value).collect()
            }
            None => {
                log::debug!("No word score list in scoring response");
                Vec::new()
            }
        }
    }

    /// Parses a raw response body, then extracts as [`ScoreExtractor::extract`].
    pub fn extract_from_str(body: &str) -> Result<Vec<ScoreRecord>, ExtractError> {
        let response: Value = serde_json::from_str(body).map_err(ExtractError::Parse)?;
        Ok(Self::extract(&response))
    }

    pub fn detect_shape(response: &Value) -> Option<ResponseShape> {
        Self::locate(response).map(|(shape, _)| shape)
    }

    fn locate(response: &Value) -> Option<(ResponseShape, &Vec<Value>)> {
        ATTEMPTS
            .iter()
            .find_map(|attempt| attempt.try_extract(response).map(|list| (attempt.shape, list)))
    }
}
