/// Phone extents are reported in 10 ms ticks.
pub const TICKS_PER_SECOND: f64 = 100.0;

/// Smallest interval the timing resolver will produce (20 ms).
pub const MIN_INTERVAL_SECS: f64 = 0.02;

/// Timings ending later than this (24 h) are treated as corrupt.
pub const MAX_RECORDING_SECS: f64 = 86_400.0;

/// Item-level bounds above this are taken to be milliseconds.
pub const MILLIS_THRESHOLD: f64 = 1000.0;

/// Number of upcoming score records the aligner scans for a match.
pub const DEFAULT_LOOKAHEAD: usize = 4;

/// Extra time granted to the stop timer on top of the interval length.
pub const DEFAULT_STOP_SLACK_MS: u64 = 50;

/// Playback statuses kept by the logging observer.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

pub const SETTINGS_DIR_NAME: &str = "Readback";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
