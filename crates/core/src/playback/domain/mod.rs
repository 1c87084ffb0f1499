pub mod audio_output;
pub mod generation;
pub mod playback_error;
pub mod playback_observer;
pub mod playback_scheduler;
pub mod stop_timer;
