pub mod headless_audio_output;
pub mod playback_event_loop;
pub mod threaded_stop_timer;
