use super::playback_error::PlaybackError;

/// Domain interface for the single shared audio resource.
///
/// Only the playback scheduler drives it. Loading is asynchronous: once
/// metadata becomes available the implementation must notify the scheduler
/// (see `PlaybackScheduler::on_metadata_ready`).
pub trait AudioOutput: Send {
    fn is_metadata_ready(&self) -> bool;

    /// Starts loading metadata. Must be idempotent.
    fn load(&mut self);

    fn set_position(&mut self, secs: f64);

    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Idempotent.
    fn pause(&mut self);
}
