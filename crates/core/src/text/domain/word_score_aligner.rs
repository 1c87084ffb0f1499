use std::sync::OnceLock;

use regex::Regex;

use super::token::Token;
use super::tokenizer::Tokenizer;
use super::word_display::WordDisplay;
use crate::scoring::domain::score_record::ScoreRecord;

fn non_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\p{L}\p{N}\p{M}]+").expect("non-word pattern is valid"))
}

/// Lowercases and drops everything outside the tokenizer's word class.
///
/// Combining marks are kept, so `cafe\u{301}` and `cafe` differ. No Unicode
/// normalization is applied: a decomposed spelling does not match its
/// precomposed form (`cafe\u{301}` vs `café`).
pub fn normalize_word(word: &str) -> String {
    non_word_regex().replace_all(word, "").to_lowercase()
}

/// Bounded-lookahead positional matcher between text words and the
/// service's score list.
///
/// Keeps a single forward cursor into the score list. Each word takes the
/// first record within `lookahead` positions of the cursor whose normalized
/// word matches; failing that it takes the record at the cursor as a best
/// guess. The cursor only moves forward. When the service drops two or more
/// consecutive words this can attach a neighbour's record; that is accepted.
pub struct WordScoreAligner<'a> {
    records: &'a [ScoreRecord],
    normalized: Vec<String>,
    lookahead: usize,
    cursor: usize,
}

impl<'a> WordScoreAligner<'a> {
    pub fn new(records: &'a [ScoreRecord], lookahead: usize) -> Self {
        Self {
            records,
            normalized: records.iter().map(|r| normalize_word(&r.word)).collect(),
            lookahead: lookahead.max(1),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Consumes the record for the next word, returning its position in the
    /// score list, or `None` once the list is exhausted.
    pub fn next_record(&mut self, word: &str) -> Option<usize> {
        if self.cursor >= self.records.len() {
            return None;
        }

        let target = normalize_word(word);
        let window_end = (self.cursor + self.lookahead).min(self.records.len());
        let position = match (self.cursor..window_end).find(|&p| self.normalized[p] == target) {
            Some(p) => p,
            None => {
                log::debug!(
                    "No match for '{word}' within {} records of {}; using '{}'",
                    self.lookahead,
                    self.cursor,
                    self.records[self.cursor].word
                );
                self.cursor
            }
        };

        self.cursor = position + 1;
        Some(position)
    }

    /// Produces exactly one [`WordDisplay`] per word, in text order.
    pub fn align<S: AsRef<str>>(
        words: &[S],
        records: &[ScoreRecord],
        lookahead: usize,
    ) -> Vec<WordDisplay> {
        let mut aligner = WordScoreAligner::new(records, lookahead);
        words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                let word = word.as_ref();
                let attached = aligner.next_record(word).map(|p| (p, &records[p]));
                WordDisplay::new(index, word, attached)
            })
            .collect()
    }
}

/// Fills each word token's attachment with the display at the same word
/// position. Tokens beyond the end of `displays` are left unattached.
pub fn attach_displays(tokens: &mut [Token], displays: &[WordDisplay]) {
    let word_slots = tokens.iter_mut().filter_map(|t| match t {
        Token::Word { attach, .. } => Some(attach),
        _ => None,
    });
    for (slot, display) in word_slots.zip(displays) {
        *slot = Some(display.clone());
    }
}

/// Reference text split into tokens with every word token attached.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignedText {
    pub tokens: Vec<Token>,
    pub words: Vec<WordDisplay>,
}

impl AlignedText {
    pub fn build(text: &str, records: &[ScoreRecord], lookahead: usize) -> Self {
        let mut tokens = Tokenizer::tokenize(text);
        let words = WordScoreAligner::align(&Token::words(&tokens), records, lookahead);
        attach_displays(&mut tokens, &words);
        Self { tokens, words }
    }
}
