use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use crate::playback::domain::generation::Generation;
use crate::playback::domain::playback_scheduler::{PlaybackPhase, PlaybackScheduler};
use crate::text::domain::word_display::WordDisplay;

/// Everything the playback thread reacts to, in arrival order.
#[derive(Debug, Clone)]
pub enum PlaybackEvent {
    PlayWord(WordDisplay),
    PlayInterval { start_secs: f64, end_secs: f64 },
    MetadataReady,
    StopTimerFired(Generation),
    /// Exit once the scheduler is idle.
    Shutdown,
}

pub fn event_channel() -> (Sender<PlaybackEvent>, Receiver<PlaybackEvent>) {
    crossbeam_channel::unbounded()
}

/// Owns the scheduler on a dedicated thread and feeds it events one at a
/// time, so requests, metadata notifications and stop timers never
/// interleave.
///
/// Layout: `callers / timers / audio output → channel → scheduler thread`
pub struct PlaybackEventLoop {
    events: Sender<PlaybackEvent>,
    handle: JoinHandle<PlaybackScheduler>,
}

impl PlaybackEventLoop {
    /// `events` must be the sender paired with `rx`; the scheduler's audio
    /// output and stop timer post to clones of it.
    pub fn spawn(
        scheduler: PlaybackScheduler,
        events: Sender<PlaybackEvent>,
        rx: Receiver<PlaybackEvent>,
    ) -> Self {
        let handle = std::thread::spawn(move || run_loop(scheduler, rx));
        Self { events, handle }
    }

    pub fn sender(&self) -> Sender<PlaybackEvent> {
        self.events.clone()
    }

    pub fn play_word(&self, word: WordDisplay) -> Result<(), Box<dyn std::error::Error>> {
        self.send(PlaybackEvent::PlayWord(word))
    }

    pub fn play_interval(
        &self,
        start_secs: f64,
        end_secs: f64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.send(PlaybackEvent::PlayInterval {
            start_secs,
            end_secs,
        })
    }

    /// Lets in-flight playback run to its stop timer, then joins the thread.
    pub fn finish(self) -> Result<PlaybackScheduler, Box<dyn std::error::Error>> {
        self.send(PlaybackEvent::Shutdown)?;
        self.handle
            .join()
            .map_err(|_| "Playback thread panicked".into())
    }

    fn send(&self, event: PlaybackEvent) -> Result<(), Box<dyn std::error::Error>> {
        self.events
            .send(event)
            .map_err(|_| "Playback loop has stopped".into())
    }
}

fn run_loop(mut scheduler: PlaybackScheduler, rx: Receiver<PlaybackEvent>) -> PlaybackScheduler {
    let mut shutting_down = false;

    for event in rx {
        match event {
            PlaybackEvent::PlayWord(word) => {
                // Failures already reach the observer; the caller is not waiting.
                if let Err(e) = scheduler.play_word(&word) {
                    log::debug!("Play request rejected: {e}");
                }
            }
            PlaybackEvent::PlayInterval {
                start_secs,
                end_secs,
            } => {
                if let Err(e) = scheduler.play_interval(start_secs, end_secs) {
                    log::warn!("Play request rejected: {e}");
                }
            }
            PlaybackEvent::MetadataReady => {
                if let Err(e) = scheduler.on_metadata_ready() {
                    log::debug!("Deferred playback failed: {e}");
                }
            }
            PlaybackEvent::StopTimerFired(generation) => scheduler.on_stop_timer(generation),
            PlaybackEvent::Shutdown => shutting_down = true,
        }

        if shutting_down && scheduler.phase() == PlaybackPhase::Idle {
            break;
        }
    }

    scheduler
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::domain::playback_observer::{ChannelPlaybackObserver, PlaybackStatus};
    use crate::playback::infrastructure::headless_audio_output::HeadlessAudioOutput;
    use crate::playback::infrastructure::threaded_stop_timer::ThreadedStopTimer;
    use crate::scoring::domain::time_interval::TimeInterval;
    use std::time::{Duration, Instant};

    fn spawn_loop() -> (PlaybackEventLoop, Receiver<PlaybackStatus>) {
        let (tx, rx) = event_channel();
        let (status_tx, status_rx) = crossbeam_channel::unbounded();
        let scheduler = PlaybackScheduler::new(
            Box::new(HeadlessAudioOutput::new("test.wav", tx.clone())),
            Box::new(ThreadedStopTimer::new(tx.clone())),
            Box::new(ChannelPlaybackObserver::new(status_tx)),
        )
        .with_slack(Duration::from_millis(10));
        (PlaybackEventLoop::spawn(scheduler, tx, rx), status_rx)
    }

    fn timed_word(index: usize, start: f64, end: f64) -> WordDisplay {
        WordDisplay {
            timing: TimeInterval::new(start, end),
            ..WordDisplay::unscored(index, "word")
        }
    }

    #[test]
    fn test_single_word_plays_and_stops() {
        let (playback, statuses) = spawn_loop();
        playback.play_word(timed_word(0, 0.0, 0.05)).unwrap();
        let scheduler = playback.finish().unwrap();

        assert_eq!(scheduler.phase(), PlaybackPhase::Idle);
        let statuses: Vec<_> = statuses.try_iter().collect();
        assert!(matches!(statuses.first(), Some(PlaybackStatus::Started { .. })));
        assert!(matches!(statuses.last(), Some(PlaybackStatus::Stopped { .. })));
    }

    #[test]
    fn test_second_request_preempts_first() {
        let (playback, statuses) = spawn_loop();
        playback.play_word(timed_word(0, 0.0, 0.5)).unwrap();
        playback.play_word(timed_word(1, 1.0, 1.05)).unwrap();

        let started = Instant::now();
        let scheduler = playback.finish().unwrap();
        // The first word's 0.5 s interval never has to elapse.
        assert!(started.elapsed() < Duration::from_millis(450));

        let statuses: Vec<_> = statuses.try_iter().collect();
        let stopped: Vec<_> = statuses
            .iter()
            .filter_map(|s| match s {
                PlaybackStatus::Stopped { generation } => Some(*generation),
                _ => None,
            })
            .collect();
        assert_eq!(stopped, vec![scheduler.current_generation().unwrap()]);
        assert!(statuses
            .iter()
            .any(|s| matches!(s, PlaybackStatus::Superseded { .. })));
    }

    #[test]
    fn test_untimed_word_reports_unavailable() {
        let (playback, statuses) = spawn_loop();
        playback.play_word(WordDisplay::unscored(3, "cat")).unwrap();
        let scheduler = playback.finish().unwrap();

        assert_eq!(scheduler.current_generation(), None);
        assert_eq!(
            statuses.try_iter().collect::<Vec<_>>(),
            vec![PlaybackStatus::Unavailable {
                index: 3,
                word: "cat".to_string()
            }]
        );
    }

    #[test]
    fn test_play_interval_event() {
        let (playback, statuses) = spawn_loop();
        playback.play_interval(0.2, 0.25).unwrap();
        playback.finish().unwrap();

        let statuses: Vec<_> = statuses.try_iter().collect();
        assert!(matches!(statuses.last(), Some(PlaybackStatus::Stopped { .. })));
    }

    #[test]
    fn test_unschedulable_interval_keeps_loop_alive() {
        let (playback, statuses) = spawn_loop();
        playback.play_interval(0.0, 1e20).unwrap();
        let first = statuses.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(first, PlaybackStatus::Failed { .. }));

        playback.play_word(timed_word(1, 0.0, 0.05)).unwrap();
        let scheduler = playback.finish().unwrap();

        assert_eq!(scheduler.phase(), PlaybackPhase::Idle);
        let statuses: Vec<_> = statuses.try_iter().collect();
        assert!(matches!(statuses.first(), Some(PlaybackStatus::Started { .. })));
        assert!(matches!(statuses.last(), Some(PlaybackStatus::Stopped { .. })));
    }

    #[test]
    fn test_finish_when_idle_returns_immediately() {
        let (playback, _statuses) = spawn_loop();
        let scheduler = playback.finish().unwrap();
        assert_eq!(scheduler.phase(), PlaybackPhase::Idle);
    }
}
