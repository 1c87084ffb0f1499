use std::time::Duration;

use super::audio_output::AudioOutput;
use super::generation::{Generation, GenerationCounter};
use super::playback_error::PlaybackError;
use super::playback_observer::{PlaybackObserver, PlaybackStatus};
use super::stop_timer::{StopTimer, TimerHandle};
use crate::scoring::domain::time_interval::TimeInterval;
use crate::shared::constants::DEFAULT_STOP_SLACK_MS;
use crate::text::domain::word_display::WordDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    AwaitingMetadata,
    Playing,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Idle,
    AwaitingMetadata {
        generation: Generation,
        interval: TimeInterval,
    },
    Playing {
        generation: Generation,
        interval: TimeInterval,
    },
}

/// Plays one interval of the shared audio output at a time.
///
/// Every request mints a new [`Generation`]; a request never queues behind
/// another, it preempts it. The two resumption points (metadata ready and
/// stop timer) each carry the generation they were issued under and do
/// nothing once it is stale, so only the latest request can seek, play or
/// pause.
///
/// The scheduler is driven from a single thread. Infrastructure feeds it
/// requests and the two resumption signals in order.
pub struct PlaybackScheduler {
    output: Box<dyn AudioOutput>,
    timer: Box<dyn StopTimer>,
    observer: Box<dyn PlaybackObserver>,
    slack: Duration,
    generations: GenerationCounter,
    pending_timer: Option<TimerHandle>,
    state: State,
}

impl PlaybackScheduler {
    pub fn new(
        output: Box<dyn AudioOutput>,
        timer: Box<dyn StopTimer>,
        observer: Box<dyn PlaybackObserver>,
    ) -> Self {
        Self {
            output,
            timer,
            observer,
            slack: Duration::from_millis(DEFAULT_STOP_SLACK_MS),
            generations: GenerationCounter::new(),
            pending_timer: None,
            state: State::Idle,
        }
    }

    /// Extra time the stop timer waits past the interval end.
    pub fn with_slack(mut self, slack: Duration) -> Self {
        self.slack = slack;
        self
    }

    pub fn phase(&self) -> PlaybackPhase {
        match self.state {
            State::Idle => PlaybackPhase::Idle,
            State::AwaitingMetadata { .. } => PlaybackPhase::AwaitingMetadata,
            State::Playing { .. } => PlaybackPhase::Playing,
        }
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.generations.current()
    }

    /// Plays the interval belonging to a word.
    ///
    /// An untimed word is reported as [`PlaybackError::NoTiming`] and leaves
    /// the audio output untouched.
    pub fn play_word(&mut self, word: &WordDisplay) -> Result<Generation, PlaybackError> {
        match word.timing {
            Some(interval) => self.play(interval),
            None => {
                self.observer.notify(PlaybackStatus::Unavailable {
                    index: word.index,
                    word: word.word.clone(),
                });
                Err(PlaybackError::NoTiming {
                    index: word.index,
                    word: word.word.clone(),
                })
            }
        }
    }

    pub fn play_interval(
        &mut self,
        start_secs: f64,
        end_secs: f64,
    ) -> Result<Generation, PlaybackError> {
        let interval = TimeInterval::new(start_secs, end_secs).ok_or(
            PlaybackError::InvalidInterval {
                start_secs,
                end_secs,
            },
        )?;
        self.play(interval)
    }

    /// Preempts any in-flight request and starts this one, or parks it
    /// until the output's metadata is ready.
    pub fn play(&mut self, interval: TimeInterval) -> Result<Generation, PlaybackError> {
        let generation = self.generations.advance();

        if let Some(handle) = self.pending_timer.take() {
            self.timer.cancel(handle);
        }
        let previous = self.state;
        let was_awaiting = matches!(previous, State::AwaitingMetadata { .. });
        if let State::AwaitingMetadata { generation: old, .. }
        | State::Playing { generation: old, .. } = previous
        {
            self.observer
                .notify(PlaybackStatus::Superseded { generation: old });
        }
        self.output.pause();

        if !self.output.is_metadata_ready() {
            log::debug!("Awaiting audio metadata for {interval} ({generation})");
            self.state = State::AwaitingMetadata {
                generation,
                interval,
            };
            if !was_awaiting {
                self.output.load();
            }
            return Ok(generation);
        }

        self.start(generation, interval)?;
        Ok(generation)
    }

    /// Resumes the request parked while metadata was loading, if it is
    /// still the latest.
    pub fn on_metadata_ready(&mut self) -> Result<(), PlaybackError> {
        let state = self.state;
        match state {
            State::AwaitingMetadata {
                generation,
                interval,
            } => self.start(generation, interval),
            _ => Ok(()),
        }
    }

    /// Handles an elapsed stop timer. Only the timer of the current,
    /// still-playing request pauses the output.
    pub fn on_stop_timer(&mut self, generation: Generation) {
        let state = self.state;
        match state {
            State::Playing {
                generation: playing,
                ..
            } if playing == generation && self.generations.is_current(generation) => {
                self.output.pause();
                self.pending_timer = None;
                self.state = State::Idle;
                self.observer.notify(PlaybackStatus::Stopped { generation });
            }
            _ => log::debug!("Ignoring stale stop timer {generation}"),
        }
    }

    fn start(&mut self, generation: Generation, interval: TimeInterval) -> Result<(), PlaybackError> {
        if !self.generations.is_current(generation) {
            log::debug!("Dropping superseded request {generation}");
            return Ok(());
        }

        let Some(delay) = Duration::try_from_secs_f64(interval.duration())
            .ok()
            .and_then(|d| d.checked_add(self.slack))
        else {
            let err = PlaybackError::InvalidInterval {
                start_secs: interval.start_secs(),
                end_secs: interval.end_secs(),
            };
            self.state = State::Idle;
            self.observer.notify(PlaybackStatus::Failed {
                generation,
                message: err.to_string(),
            });
            return Err(err);
        };

        self.output.set_position(interval.start_secs());
        if let Err(e) = self.output.play() {
            self.state = State::Idle;
            self.observer.notify(PlaybackStatus::Failed {
                generation,
                message: e.to_string(),
            });
            return Err(e);
        }

        self.pending_timer = Some(self.timer.schedule(delay, generation));
        self.state = State::Playing {
            generation,
            interval,
        };
        self.observer.notify(PlaybackStatus::Started {
            generation,
            interval,
        });
        Ok(())
    }
}
