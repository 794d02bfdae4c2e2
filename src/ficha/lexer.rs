//! Lexer for the ficha notation.
//!
//! One raw line of input in, a sequence of typed tokens out. The lexer holds no
//! state beyond the current line; line numbers are threaded through by the
//! stream processor so errors can point at the source.
//!
//! An unrecognized character aborts the line with a [`LexError`] naming the
//! character and the 1-based line number. There is no silent skipping: the
//! stream processor stops at the first failed line.

pub mod tokens;

pub use tokens::Token;

use logos::Logos;
use std::fmt;

/// Lexical failure: a character the notation does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// 1-based source line.
    pub line: usize,
    pub offending: char,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: unrecognized character '{}'",
            self.line, self.offending
        )
    }
}

impl std::error::Error for LexError {}

/// Tokenize one line of ficha notation.
///
/// `line_no` is the 1-based line number used in error reporting.
pub fn lex_line(line: &str, line_no: usize) -> Result<Vec<Token>, LexError> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                let offending = lexer.slice().chars().next().unwrap_or('\u{fffd}');
                return Err(LexError {
                    line: line_no,
                    offending,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_line_happy_path() {
        let tokens = lex_line("TARJETA: RMA, 40, 6, AMARILLA", 3).unwrap();
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[0], Token::CardKey);
    }

    #[test]
    fn test_unrecognized_character_fails_the_line() {
        let err = lex_line("GOL: BAR, 25, 9 !", 7).unwrap_err();
        assert_eq!(err.line, 7);
        assert_eq!(err.offending, '!');
        assert_eq!(err.to_string(), "line 7: unrecognized character '!'");
    }

    #[test]
    fn test_lowercase_word_is_a_lex_error() {
        // Bare words are not part of the notation; only keys, codes, colors,
        // numbers, dates and punctuation are.
        let err = lex_line("EQUIPO LOCAL: bar", 2).unwrap_err();
        assert_eq!(err.offending, 'b');
    }

    #[test]
    fn test_empty_line_lexes_to_nothing() {
        assert_eq!(lex_line("", 1).unwrap(), Vec::<Token>::new());
        assert_eq!(lex_line("   \t ", 1).unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn test_comment_only_line_lexes_to_nothing() {
        assert_eq!(lex_line("# just a comment", 1).unwrap(), Vec::<Token>::new());
    }
}
