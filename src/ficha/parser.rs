//! Line grammar for the ficha notation.
//!
//! This module parses one line's token sequence into one [`Statement`]: a
//! field assignment (date, team codes, formations, lineups) or an event
//! command (goal, card, substitution). Parsing is stateless; everything that
//! depends on what came before in the stream (match boundaries, roster
//! validation, required fields) lives in the assembler and stream processor.

pub mod grammar;
pub mod statement;

pub use grammar::{parse_statement, GrammarError, GrammarErrorKind};
pub use statement::{Side, Statement};
