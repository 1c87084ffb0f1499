use std::sync::OnceLock;

use regex::Regex;

use super::token::Token;

/// Whitespace runs, words (letters/digits with at most one internal
/// apostrophe), or runs of anything else. Every character falls in exactly
/// one class, so matches tile the input.
const TOKEN_PATTERN: &str = concat!(
    r"(?P<space>\s+)",
    r"|(?P<word>[\p{L}\p{N}\p{M}]+(?:['’][\p{L}\p{N}\p{M}]+)?)",
    r"|(?P<punct>[^\s\p{L}\p{N}\p{M}]+)",
);

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"))
}

pub struct Tokenizer;

impl Tokenizer {
    /// Splits reference text into space, punctuation and word tokens.
    /// Word tokens carry no attachment yet.
    pub fn tokenize(text: &str) -> Vec<Token> {
        let tokens: Vec<Token> = token_regex()
            .captures_iter(text)
            .filter_map(|caps| {
                if let Some(m) = caps.name("space") {
                    Some(Token::Space {
                        text: m.as_str().to_string(),
                    })
                } else if let Some(m) = caps.name("word") {
                    Some(Token::Word {
                        text: m.as_str().to_string(),
                        attach: None,
                    })
                } else {
                    caps.name("punct").map(|m| Token::Punct {
                        text: m.as_str().to_string(),
                    })
                }
            })
            .collect();

        debug_assert_eq!(
            Token::join(&tokens),
            text,
            "tokenizer reconstruction contract violated"
        );
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(tokens: &[Token]) -> Vec<(&'static str, &str)> {
        tokens
            .iter()
            .map(|t| {
                let kind = match t {
                    Token::Space { .. } => "space",
                    Token::Punct { .. } => "punct",
                    Token::Word { .. } => "word",
                };
                (kind, t.text())
            })
            .collect()
    }

    #[test]
    fn test_sentence_with_period() {
        let tokens = Tokenizer::tokenize("The cat sat.");
        assert_eq!(
            kinds(&tokens),
            vec![
                ("word", "The"),
                ("space", " "),
                ("word", "cat"),
                ("space", " "),
                ("word", "sat"),
                ("punct", "."),
            ]
        );
    }

    #[rstest]
    #[case::contraction("don't", vec![("word", "don't")])]
    #[case::typographic_apostrophe("it’s", vec![("word", "it’s")])]
    #[case::trailing_apostrophe("dogs'", vec![("word", "dogs"), ("punct", "'")])]
    #[case::leading_apostrophe("'tis", vec![("punct", "'"), ("word", "tis")])]
    #[case::two_apostrophes("rock'n'roll", vec![("word", "rock'n"), ("punct", "'"), ("word", "roll")])]
    #[case::digits("room 101", vec![("word", "room"), ("space", " "), ("word", "101")])]
    #[case::punct_run("wait...!", vec![("word", "wait"), ("punct", "...!")])]
    #[case::hyphen("well-known", vec![("word", "well"), ("punct", "-"), ("word", "known")])]
    fn test_token_boundaries(#[case] text: &str, #[case] expected: Vec<(&str, &str)>) {
        assert_eq!(kinds(&Tokenizer::tokenize(text)), expected);
    }

    #[test]
    fn test_whitespace_runs_are_single_tokens() {
        let tokens = Tokenizer::tokenize("a \t\n b");
        assert_eq!(kinds(&tokens), vec![("word", "a"), ("space", " \t\n "), ("word", "b")]);
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_space("   ")]
    #[case::mixed("  Hello, world!  How's it going?\n")]
    #[case::unicode("Café naïve — “quoted” 日本語")]
    #[case::combining("cafe\u{301} ok")]
    fn test_reconstruction(#[case] text: &str) {
        assert_eq!(Token::join(&Tokenizer::tokenize(text)), text);
    }

    #[test]
    fn test_combining_mark_stays_in_word() {
        let tokens = Tokenizer::tokenize("cafe\u{301}");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_word());
    }

    #[test]
    fn test_words_have_no_attachment() {
        let tokens = Tokenizer::tokenize("one two");
        assert!(tokens.iter().all(|t| t.attachment().is_none()));
    }
}
