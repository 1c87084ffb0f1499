pub mod token;
pub mod tokenizer;
pub mod word_display;
pub mod word_score_aligner;
