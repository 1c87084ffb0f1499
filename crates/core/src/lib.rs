//! Reading-practice feedback core: aligns a pronunciation-scoring service's
//! per-word scores with the reference text, resolves each word's interval in
//! the recording, and plays single intervals on demand.

pub mod pipeline;
pub mod playback;
pub mod scoring;
pub mod shared;
pub mod text;
