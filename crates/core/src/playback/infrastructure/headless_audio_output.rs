use std::time::Instant;

use crossbeam_channel::Sender;

use super::playback_event_loop::PlaybackEvent;
use crate::playback::domain::audio_output::AudioOutput;
use crate::playback::domain::playback_error::PlaybackError;

/// Audio output without a device: keeps a software transport clock and logs
/// every transport call it receives.
///
/// Metadata is "loaded" on the first `load()` call; readiness is announced
/// to the playback loop as [`PlaybackEvent::MetadataReady`], the same way a
/// real device reports it asynchronously.
pub struct HeadlessAudioOutput {
    source: String,
    events: Sender<PlaybackEvent>,
    metadata_ready: bool,
    position: f64,
    playing_since: Option<Instant>,
}

impl HeadlessAudioOutput {
    pub fn new(source: impl Into<String>, events: Sender<PlaybackEvent>) -> Self {
        Self {
            source: source.into(),
            events,
            metadata_ready: false,
            position: 0.0,
            playing_since: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    /// Current transport position in seconds.
    pub fn position(&self) -> f64 {
        match self.playing_since {
            Some(since) => self.position + since.elapsed().as_secs_f64(),
            None => self.position,
        }
    }
}

impl AudioOutput for HeadlessAudioOutput {
    fn is_metadata_ready(&self) -> bool {
        self.metadata_ready
    }

    fn load(&mut self) {
        if self.metadata_ready {
            return;
        }
        log::debug!("Loading {}", self.source);
        self.metadata_ready = true;
        let _ = self.events.send(PlaybackEvent::MetadataReady);
    }

    fn set_position(&mut self, secs: f64) {
        log::debug!("{}: seek to {secs:.2}s", self.source);
        self.position = secs;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.metadata_ready {
            return Err(PlaybackError::Output(format!(
                "{} is not loaded",
                self.source
            )));
        }
        log::info!("{}: play from {:.2}s", self.source, self.position);
        if self.playing_since.is_none() {
            self.playing_since = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(since) = self.playing_since.take() {
            self.position += since.elapsed().as_secs_f64();
            log::info!("{}: pause at {:.2}s", self.source, self.position);
        }
    }
}
