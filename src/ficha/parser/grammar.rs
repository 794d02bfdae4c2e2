//! The line grammar: token sequence to statement.
//!
//! Every production here is a pure function of one line's tokens. The grammar
//! is strict about shape and arity; anything that does not match a production
//! exactly is a [`GrammarError`] naming the shape the statement expected.
//!
//! Number lists are order-preserving and duplicates are not rejected at this
//! layer; cardinality and roster policy belong to the assembler.

use crate::ficha::lexer::Token;
use crate::ficha::model::CardColor;
use crate::ficha::parser::statement::{Side, Statement};
use std::fmt;

const DATE_SHAPE: &str = "a date in DD/MM/YYYY form";
const TEAM_SHAPE: &str = "a single 3-letter team code";
const FORMATION_SHAPE: &str = "three numbers joined by hyphens, like 4-3-3";
const LIST_SHAPE: &str = "a comma-separated list of jersey numbers";
const GOAL_SHAPE: &str = "EQUIPO, MINUTO, AUTOR[, ASISTENTE]";
const CARD_SHAPE: &str = "EQUIPO, MINUTO, JUGADOR, AMARILLA|ROJA";
const SUBSTITUTION_SHAPE: &str = "EQUIPO, MINUTO, SALE, ENTRA";

/// Grammar failure: the line's tokens do not form a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// 1-based source line.
    pub line: usize,
    pub kind: GrammarErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// No tokens on the line.
    EmptyLine,
    /// The line does not begin with a statement key.
    UnknownStatement,
    /// A field statement's body has the wrong shape.
    BadField {
        key: &'static str,
        expected: &'static str,
    },
    /// An event statement has the wrong arity or field shape.
    BadEvent {
        key: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            GrammarErrorKind::EmptyLine => write!(f, "nothing to parse"),
            GrammarErrorKind::UnknownStatement => {
                write!(f, "line does not begin with a known statement key")
            }
            GrammarErrorKind::BadField { key, expected }
            | GrammarErrorKind::BadEvent { key, expected } => {
                write!(f, "{} expects {}", key, expected)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Parse one line's tokens into a [`Statement`].
///
/// `line_no` is the 1-based line number used in error reporting.
pub fn parse_statement(tokens: &[Token], line_no: usize) -> Result<Statement, GrammarError> {
    let Some((key, rest)) = tokens.split_first() else {
        return Err(GrammarError {
            line: line_no,
            kind: GrammarErrorKind::EmptyLine,
        });
    };
    match key {
        Token::DateKey => parse_date(rest, line_no),
        Token::HomeTeamKey => parse_team(rest, Side::Home, "EQUIPO LOCAL", line_no),
        Token::AwayTeamKey => parse_team(rest, Side::Away, "EQUIPO VISITANTE", line_no),
        Token::HomeFormationKey => parse_formation(rest, Side::Home, "FORMACION LOCAL", line_no),
        Token::AwayFormationKey => parse_formation(rest, Side::Away, "FORMACION VISITANTE", line_no),
        Token::HomeStartersKey => {
            parse_list(rest, "TITULARES LOCAL", line_no).map(|ns| Statement::Starters(Side::Home, ns))
        }
        Token::AwayStartersKey => parse_list(rest, "TITULARES VISITANTE", line_no)
            .map(|ns| Statement::Starters(Side::Away, ns)),
        Token::HomeBenchKey => {
            parse_list(rest, "BANCO LOCAL", line_no).map(|ns| Statement::Bench(Side::Home, ns))
        }
        Token::AwayBenchKey => {
            parse_list(rest, "BANCO VISITANTE", line_no).map(|ns| Statement::Bench(Side::Away, ns))
        }
        Token::GoalKey => parse_goal(rest, line_no),
        Token::CardKey => parse_card(rest, line_no),
        Token::SubstitutionKey => parse_substitution(rest, line_no),
        _ => Err(GrammarError {
            line: line_no,
            kind: GrammarErrorKind::UnknownStatement,
        }),
    }
}

fn bad_field(key: &'static str, expected: &'static str, line: usize) -> GrammarError {
    GrammarError {
        line,
        kind: GrammarErrorKind::BadField { key, expected },
    }
}

fn bad_event(key: &'static str, expected: &'static str, line: usize) -> GrammarError {
    GrammarError {
        line,
        kind: GrammarErrorKind::BadEvent { key, expected },
    }
}

fn parse_date(rest: &[Token], line: usize) -> Result<Statement, GrammarError> {
    match rest {
        [Token::Date(text)] => Ok(Statement::Date(text.clone())),
        [Token::Quoted(text)] => Ok(Statement::Date(text.clone())),
        _ => Err(bad_field("FECHA", DATE_SHAPE, line)),
    }
}

fn parse_team(
    rest: &[Token],
    side: Side,
    key: &'static str,
    line: usize,
) -> Result<Statement, GrammarError> {
    match rest {
        [Token::TeamCode(code)] => Ok(Statement::Team(side, code.clone())),
        _ => Err(bad_field(key, TEAM_SHAPE, line)),
    }
}

fn parse_formation(
    rest: &[Token],
    side: Side,
    key: &'static str,
    line: usize,
) -> Result<Statement, GrammarError> {
    match rest {
        [Token::Int(a), Token::Hyphen, Token::Int(b), Token::Hyphen, Token::Int(c)] => Ok(
            Statement::Formation(side, format!("{}-{}-{}", a, b, c)),
        ),
        _ => Err(bad_field(key, FORMATION_SHAPE, line)),
    }
}

/// A possibly-empty, order-preserving `n1,n2,...` list.
fn parse_list(rest: &[Token], key: &'static str, line: usize) -> Result<Vec<u32>, GrammarError> {
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let mut numbers = Vec::new();
    let mut expect_number = true;
    for token in rest {
        match (expect_number, token) {
            (true, Token::Int(n)) => {
                numbers.push(*n);
                expect_number = false;
            }
            (false, Token::Comma) => expect_number = true,
            _ => return Err(bad_field(key, LIST_SHAPE, line)),
        }
    }
    if expect_number {
        // Trailing comma
        return Err(bad_field(key, LIST_SHAPE, line));
    }
    Ok(numbers)
}

/// Split an event body on commas into its fields.
fn comma_fields(rest: &[Token]) -> Vec<&[Token]> {
    rest.split(|t| matches!(t, Token::Comma)).collect()
}

fn single_team(field: &[Token]) -> Option<String> {
    match field {
        [Token::TeamCode(code)] => Some(code.clone()),
        _ => None,
    }
}

fn single_int(field: &[Token]) -> Option<u32> {
    match field {
        [Token::Int(n)] => Some(*n),
        _ => None,
    }
}

fn single_color(field: &[Token]) -> Option<CardColor> {
    match field {
        [Token::Color(color)] => Some(*color),
        _ => None,
    }
}

fn parse_goal(rest: &[Token], line: usize) -> Result<Statement, GrammarError> {
    let fields = comma_fields(rest);
    let bad = || bad_event("GOL", GOAL_SHAPE, line);
    if fields.len() != 3 && fields.len() != 4 {
        return Err(bad());
    }
    let team = single_team(fields[0]).ok_or_else(bad)?;
    let minute = single_int(fields[1]).ok_or_else(bad)?;
    let scorer = single_int(fields[2]).ok_or_else(bad)?;
    let assist = match fields.get(3) {
        Some(field) => Some(single_int(field).ok_or_else(bad)?),
        None => None,
    };
    Ok(Statement::Goal {
        team,
        minute,
        scorer,
        assist,
    })
}

fn parse_card(rest: &[Token], line: usize) -> Result<Statement, GrammarError> {
    let fields = comma_fields(rest);
    let bad = || bad_event("TARJETA", CARD_SHAPE, line);
    if fields.len() != 4 {
        return Err(bad());
    }
    let team = single_team(fields[0]).ok_or_else(bad)?;
    let minute = single_int(fields[1]).ok_or_else(bad)?;
    let player = single_int(fields[2]).ok_or_else(bad)?;
    let color = single_color(fields[3]).ok_or_else(bad)?;
    Ok(Statement::Card {
        team,
        minute,
        player,
        color,
    })
}

fn parse_substitution(rest: &[Token], line: usize) -> Result<Statement, GrammarError> {
    let fields = comma_fields(rest);
    let bad = || bad_event("CAMBIO", SUBSTITUTION_SHAPE, line);
    if fields.len() != 4 {
        return Err(bad());
    }
    let team = single_team(fields[0]).ok_or_else(bad)?;
    let minute = single_int(fields[1]).ok_or_else(bad)?;
    let player_out = single_int(fields[2]).ok_or_else(bad)?;
    let player_in = single_int(fields[3]).ok_or_else(bad)?;
    Ok(Statement::Substitution {
        team,
        minute,
        player_out,
        player_in,
    })
}
