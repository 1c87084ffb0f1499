use std::time::Duration;

use super::generation::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Deferred stop signal for the playback scheduler.
///
/// When a scheduled timer elapses, the implementation delivers its
/// generation back to `PlaybackScheduler::on_stop_timer`. A cancelled timer
/// should not fire, but the scheduler tolerates one that does.
pub trait StopTimer: Send {
    fn schedule(&mut self, delay: Duration, generation: Generation) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);
}
