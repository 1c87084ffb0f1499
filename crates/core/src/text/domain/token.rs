use serde::Serialize;

use super::word_display::WordDisplay;

/// One piece of the reference text. Concatenating every token's text
/// reproduces the original string exactly.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token {
    Space {
        text: String,
    },
    Punct {
        text: String,
    },
    Word {
        text: String,
        attach: Option<WordDisplay>,
    },
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Space { text } | Token::Punct { text } | Token::Word { text, .. } => text,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word { .. })
    }

    pub fn attachment(&self) -> Option<&WordDisplay> {
        match self {
            Token::Word { attach, .. } => attach.as_ref(),
            _ => None,
        }
    }

    /// Rebuilds the source text from a token sequence.
    pub fn join(tokens: &[Token]) -> String {
        tokens.iter().map(Token::text).collect()
    }

    /// Word-token texts in text order.
    pub fn words(tokens: &[Token]) -> Vec<&str> {
        tokens
            .iter()
            .filter(|t| t.is_word())
            .map(Token::text)
            .collect()
    }
}
