use std::collections::VecDeque;

use crossbeam_channel::Sender;

use super::generation::Generation;
use crate::scoring::domain::time_interval::TimeInterval;
use crate::shared::constants::DEFAULT_HISTORY_LIMIT;

/// What happened to a playback request, as reported to the embedding layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackStatus {
    Started {
        generation: Generation,
        interval: TimeInterval,
    },
    /// The interval finished and playback was paused.
    Stopped { generation: Generation },
    /// A newer request took over before this one finished.
    Superseded { generation: Generation },
    /// The word has no timing; nothing was played.
    Unavailable { index: usize, word: String },
    Failed {
        generation: Generation,
        message: String,
    },
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackStatus::Started {
                generation,
                interval,
            } => write!(f, "Playing {interval} ({generation})"),
            PlaybackStatus::Stopped { generation } => write!(f, "Stopped ({generation})"),
            PlaybackStatus::Superseded { generation } => write!(f, "Superseded ({generation})"),
            PlaybackStatus::Unavailable { index, word } => {
                write!(f, "No timing available for word {index} ('{word}')")
            }
            PlaybackStatus::Failed {
                generation,
                message,
            } => write!(f, "Playback failed ({generation}): {message}"),
        }
    }
}

/// Receives playback status changes from the scheduler.
///
/// Decouples the scheduler from how status reaches the user (log output,
/// UI messages, tests).
pub trait PlaybackObserver: Send {
    fn notify(&mut self, status: PlaybackStatus);
}

/// Discards all status updates.
pub struct NullPlaybackObserver;

impl PlaybackObserver for NullPlaybackObserver {
    fn notify(&mut self, _status: PlaybackStatus) {}
}

/// Writes every status to the `log` facade and keeps the most recent ones.
pub struct LoggingPlaybackObserver {
    history: VecDeque<PlaybackStatus>,
    limit: usize,
}

impl Default for LoggingPlaybackObserver {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl LoggingPlaybackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` statuses; older ones are dropped first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Oldest first.
    pub fn history(&self) -> &VecDeque<PlaybackStatus> {
        &self.history
    }
}

impl PlaybackObserver for LoggingPlaybackObserver {
    fn notify(&mut self, status: PlaybackStatus) {
        match &status {
            PlaybackStatus::Unavailable { .. } | PlaybackStatus::Failed { .. } => {
                log::warn!("{status}")
            }
            PlaybackStatus::Superseded { .. } => log::debug!("{status}"),
            _ => log::info!("{status}"),
        }
        if self.limit == 0 {
            return;
        }
        if self.history.len() == self.limit {
            self.history.pop_front();
        }
        self.history.push_back(status);
    }
}

/// Forwards every status over a channel, for callers on another thread.
pub struct ChannelPlaybackObserver {
    tx: Sender<PlaybackStatus>,
}

impl ChannelPlaybackObserver {
    pub fn new(tx: Sender<PlaybackStatus>) -> Self {
        Self { tx }
    }
}

impl PlaybackObserver for ChannelPlaybackObserver {
    fn notify(&mut self, status: PlaybackStatus) {
        let _ = self.tx.send(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::domain::generation::GenerationCounter;

    fn started(n: u64) -> PlaybackStatus {
        let mut counter = GenerationCounter::new();
        let generation = (0..n).map(|_| counter.advance()).last().unwrap();
        PlaybackStatus::Started {
            generation,
            interval: TimeInterval::new(0.5, 1.5).unwrap(),
        }
    }

    #[test]
    fn test_null_observer_is_noop() {
        let mut observer = NullPlaybackObserver;
        observer.notify(started(1));
        // No panics = success
    }

    #[test]
    fn test_logging_observer_keeps_history() {
        let mut observer = LoggingPlaybackObserver::new();
        observer.notify(started(1));
        observer.notify(PlaybackStatus::Unavailable {
            index: 2,
            word: "sat".to_string(),
        });
        assert_eq!(observer.history().len(), 2);
        assert_eq!(observer.history()[0], started(1));
    }

    #[test]
    fn test_logging_observer_history_is_capped() {
        let mut observer = LoggingPlaybackObserver::with_limit(2);
        for n in 1..=5 {
            observer.notify(started(n));
        }
        assert_eq!(
            observer.history().iter().cloned().collect::<Vec<_>>(),
            vec![started(4), started(5)]
        );
    }

    #[test]
    fn test_logging_observer_zero_limit_keeps_nothing() {
        let mut observer = LoggingPlaybackObserver::with_limit(0);
        observer.notify(started(1));
        assert!(observer.history().is_empty());
    }

    #[test]
    fn test_channel_observer_forwards() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut observer = ChannelPlaybackObserver::new(tx);
        observer.notify(started(3));
        assert_eq!(rx.try_recv().unwrap(), started(3));
    }

    #[test]
    fn test_channel_observer_ignores_closed_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut observer = ChannelPlaybackObserver::new(tx);
        observer.notify(started(1));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(started(2).to_string(), "Playing 0.50s-1.50s (#2)");
        let unavailable = PlaybackStatus::Unavailable {
            index: 0,
            word: "the".to_string(),
        };
        assert_eq!(
            unavailable.to_string(),
            "No timing available for word 0 ('the')"
        );
    }
}
