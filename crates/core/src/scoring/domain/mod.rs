pub mod score_extractor;
pub mod score_record;
pub mod time_interval;
pub mod timing_resolver;
