use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("no timing available for word {index} ('{word}')")]
    NoTiming { index: usize, word: String },
    #[error("invalid playback interval {start_secs}s-{end_secs}s")]
    InvalidInterval { start_secs: f64, end_secs: f64 },
    #[error("audio output failed: {0}")]
    Output(String),
}
