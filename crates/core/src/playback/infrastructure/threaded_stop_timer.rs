use std::collections::HashMap;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;

use super::playback_event_loop::PlaybackEvent;
use crate::playback::domain::generation::Generation;
use crate::playback::domain::stop_timer::{StopTimer, TimerHandle};

struct PendingTimer {
    cancel_tx: Sender<()>,
    thread: JoinHandle<()>,
}

/// Stop timer backed by one short-lived thread per scheduled stop.
///
/// Each thread waits on either its cancel channel or the deadline and, if
/// the deadline wins, posts [`PlaybackEvent::StopTimerFired`] to the
/// playback loop. Dropping the timer cancels everything still pending.
pub struct ThreadedStopTimer {
    events: Sender<PlaybackEvent>,
    next_handle: u64,
    pending: HashMap<TimerHandle, PendingTimer>,
}

impl ThreadedStopTimer {
    pub fn new(events: Sender<PlaybackEvent>) -> Self {
        Self {
            events,
            next_handle: 0,
            pending: HashMap::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending
            .values()
            .filter(|p| !p.thread.is_finished())
            .count()
    }
}

impl StopTimer for ThreadedStopTimer {
    fn schedule(&mut self, delay: Duration, generation: Generation) -> TimerHandle {
        self.pending.retain(|_, p| !p.thread.is_finished());

        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(1);
        let events = self.events.clone();

        let thread = std::thread::spawn(move || {
            crossbeam_channel::select! {
                recv(cancel_rx) -> _ => {}
                recv(crossbeam_channel::after(delay)) -> _ => {
                    let _ = events.send(PlaybackEvent::StopTimerFired(generation));
                }
            }
        });

        self.pending.insert(handle, PendingTimer { cancel_tx, thread });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(pending) = self.pending.remove(&handle) {
            let _ = pending.cancel_tx.send(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::domain::generation::GenerationCounter;

    #[test]
    fn test_fires_with_generation_after_delay() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut timer = ThreadedStopTimer::new(tx);
        let generation = GenerationCounter::new().advance();

        timer.schedule(Duration::from_millis(20), generation);

        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            PlaybackEvent::StopTimerFired(g) => assert_eq!(g, generation),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_timer_does_not_fire() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut timer = ThreadedStopTimer::new(tx);
        let generation = GenerationCounter::new().advance();

        let handle = timer.schedule(Duration::from_millis(50), generation);
        timer.cancel(handle);

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_cancel_unknown_handle_is_noop() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut timer = ThreadedStopTimer::new(tx);
        timer.cancel(TimerHandle(99));
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn test_handles_are_unique() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut timer = ThreadedStopTimer::new(tx);
        let mut counter = GenerationCounter::new();
        let a = timer.schedule(Duration::from_secs(5), counter.advance());
        let b = timer.schedule(Duration::from_secs(5), counter.advance());
        assert_ne!(a, b);
        assert_eq!(timer.pending_count(), 2);
    }

    #[test]
    fn test_drop_cancels_pending() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut timer = ThreadedStopTimer::new(tx);
        timer.schedule(Duration::from_millis(50), GenerationCounter::new().advance());
        drop(timer);

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
