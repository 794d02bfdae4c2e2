//! The stream processor: many lines in, finalized matches out.
//!
//! Drives the lexer, grammar, and assembler across one input, one line at a
//! time. Blank lines and `#` comment lines are skipped before lexing. A date
//! field statement arriving while a match is open closes the previous match
//! (that is the notation's boundary rule; there is no explicit END marker),
//! and an open match at end of input is finalized implicitly.
//!
//! Failure policy is fail-fast with partial commit: the first error of any
//! kind halts processing, but matches finalized strictly before the failing
//! line stay in the outcome. The caller decides whether to keep or discard
//! them.

use crate::ficha::assembler::{AssemblerError, MatchAssembler};
use crate::ficha::lexer::{lex_line, LexError};
use crate::ficha::model::Match;
use crate::ficha::parser::{parse_statement, GrammarError};
use crate::ficha::registry::Registry;
use std::fmt;
use tracing::debug;

/// First failure of an ingest run, annotated with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    Lex(LexError),
    Grammar(GrammarError),
    Semantic { line: usize, error: AssemblerError },
}

impl LineError {
    /// 1-based line the error was detected at. For an implicit finalize at
    /// end of input this is the last line of the source.
    pub fn line(&self) -> usize {
        match self {
            LineError::Lex(e) => e.line,
            LineError::Grammar(e) => e.line,
            LineError::Semantic { line, .. } => *line,
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::Lex(e) => e.fmt(f),
            LineError::Grammar(e) => e.fmt(f),
            LineError::Semantic { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

impl std::error::Error for LineError {}

impl From<LexError> for LineError {
    fn from(e: LexError) -> Self {
        LineError::Lex(e)
    }
}

impl From<GrammarError> for LineError {
    fn from(e: GrammarError) -> Self {
        LineError::Grammar(e)
    }
}

/// Result of one ingest run: the matches finalized before any failure, plus
/// the first failure if there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub matches: Vec<Match>,
    pub error: Option<LineError>,
}

impl IngestOutcome {
    /// Collapse the partial-commit semantics into a plain result, discarding
    /// already-finalized matches on failure.
    pub fn into_result(self) -> Result<Vec<Match>, LineError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.matches),
        }
    }
}

/// Ingest one source stream against a registry.
///
/// Lines are consumed strictly sequentially; the registry is only read.
pub fn ingest(source: &str, registry: &Registry) -> IngestOutcome {
    let mut matches = Vec::new();
    let mut assembler = MatchAssembler::new(registry);
    let mut last_line = 0;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens = match lex_line(line, line_no) {
            Ok(tokens) => tokens,
            Err(e) => return fail(matches, e.into()),
        };
        if tokens.is_empty() {
            // The lexer can consume a whole line as trailing comment.
            continue;
        }
        let statement = match parse_statement(&tokens, line_no) {
            Ok(statement) => statement,
            Err(e) => return fail(matches, e.into()),
        };

        // Boundary rule: a new date field while a match is open closes the
        // previous match before the date is applied to a fresh assembler.
        if statement.is_date_field() && assembler.is_open() {
            debug!(line = line_no, "match boundary");
            let finished = std::mem::replace(&mut assembler, MatchAssembler::new(registry));
            match finished.finalize() {
                Ok(m) => matches.push(m),
                Err(error) => {
                    return fail(
                        matches,
                        LineError::Semantic {
                            line: line_no,
                            error,
                        },
                    )
                }
            }
        }

        if let Err(error) = assembler.apply(statement) {
            return fail(
                matches,
                LineError::Semantic {
                    line: line_no,
                    error,
                },
            );
        }
    }

    // Implicit finalize of the in-progress match at end of input.
    if assembler.is_open() {
        match assembler.finalize() {
            Ok(m) => matches.push(m),
            Err(error) => {
                return fail(
                    matches,
                    LineError::Semantic {
                        line: last_line,
                        error,
                    },
                )
            }
        }
    }

    debug!(matches = matches.len(), "ingest complete");
    IngestOutcome {
        matches,
        error: None,
    }
}

fn fail(matches: Vec<Match>, error: LineError) -> IngestOutcome {
    IngestOutcome {
        matches,
        error: Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ficha::testing::liga_registry;

    const SINGLE: &str = "\
FECHA: 15/10/2023
EQUIPO LOCAL: BAR
EQUIPO VISITANTE: RMA
FORMACION LOCAL: 4-3-3
FORMACION VISITANTE: 4-4-2
TITULARES LOCAL: 1,2,3,4,5,6,8,9,11,14,21
TITULARES VISITANTE: 1,2,3,4,5,6,8,10,7,9,15
BANCO LOCAL: 13,18,20
BANCO VISITANTE: 13,18,24
GOL: BAR, 25, 9, 8
GOL: RMA, 80, 7
GOL: BAR, 88, 9
";

    #[test]
    fn test_single_match() {
        let registry = liga_registry();
        let outcome = ingest(SINGLE, &registry);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.matches.len(), 1);
        let m = &outcome.matches[0];
        assert_eq!(m.goals_for("BAR"), 2);
        assert_eq!(m.goals_for("RMA"), 1);
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let registry = liga_registry();
        let source = format!("# jornada 9\n\n{}\n# fin\n", SINGLE);
        let outcome = ingest(&source, &registry);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.matches.len(), 1);
    }

    #[test]
    fn test_second_date_closes_first_match() {
        let registry = liga_registry();
        let two = format!(
            "{}\
FECHA: 22/10/2023
EQUIPO LOCAL: RMA
EQUIPO VISITANTE: BAR
FORMACION LOCAL: 4-4-2
FORMACION VISITANTE: 4-3-3
TITULARES LOCAL: 1,2,3,4,5,6,8,10,7,9,15
TITULARES VISITANTE: 1,2,3,4,5,6,8,9,11,14,21
BANCO LOCAL: 13,18,24
BANCO VISITANTE: 13,18,20
",
            SINGLE
        );
        let outcome = ingest(&two, &registry);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.matches[0].home_team, "BAR");
        assert_eq!(outcome.matches[1].home_team, "RMA");
        // The first match's events stayed with the first match.
        assert_eq!(outcome.matches[0].events.len(), 3);
        assert_eq!(outcome.matches[1].events.len(), 0);
    }

    #[test]
    fn test_first_error_halts_with_line_number() {
        let registry = liga_registry();
        let source = "FECHA: 15/10/2023\nEQUIPO LOCAL: ZZZ\n";
        let outcome = ingest(source, &registry);
        let error = outcome.error.unwrap();
        assert_eq!(error.line(), 2);
        assert!(matches!(
            error,
            LineError::Semantic {
                error: AssemblerError::UnknownTeam { .. },
                ..
            }
        ));
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_partial_commit_keeps_earlier_matches() {
        let registry = liga_registry();
        let source = format!("{}FECHA: 22/10/2023\nEQUIPO LOCAL: ZZZ\n", SINGLE);
        let outcome = ingest(&source, &registry);
        assert_eq!(outcome.matches.len(), 1);
        let error = outcome.error.unwrap();
        assert_eq!(error.line(), 14);
    }

    #[test]
    fn test_boundary_finalize_failure_points_at_date_line() {
        // A match opened by a team line but missing its date cannot be closed
        // by the next FECHA.
        let registry = liga_registry();
        let source = "EQUIPO LOCAL: BAR\nFECHA: 22/10/2023\n";
        let outcome = ingest(source, &registry);
        let error = outcome.error.unwrap();
        assert_eq!(error.line(), 2);
        assert!(matches!(
            error,
            LineError::Semantic {
                error: AssemblerError::MissingField { field: "FECHA" },
                ..
            }
        ));
    }

    #[test]
    fn test_incomplete_match_at_eof() {
        let registry = liga_registry();
        let source = "FECHA: 15/10/2023\nEQUIPO LOCAL: BAR\n";
        let outcome = ingest(source, &registry);
        let error = outcome.error.unwrap();
        assert!(matches!(
            error,
            LineError::Semantic {
                error: AssemblerError::MissingField {
                    field: "EQUIPO VISITANTE"
                },
                ..
            }
        ));
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let registry = liga_registry();
        let outcome = ingest("", &registry);
        assert_eq!(outcome.error, None);
        assert!(outcome.matches.is_empty());
    }

    #[test]
    fn test_into_result() {
        let registry = liga_registry();
        assert_eq!(ingest(SINGLE, &registry).into_result().unwrap().len(), 1);
        assert!(ingest("GOL: BAR, 10, 9\n", &registry)
            .into_result()
            .is_err());
    }
}
