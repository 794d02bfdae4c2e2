//! Token definitions for the ficha notation.
//!
//! All tokens are defined with the logos derive macro; there is no custom lexer
//! code beyond the per-token callbacks that extract values. Keys are matched
//! case-insensitively, with the trailing colon folded into the key token, and
//! internal whitespace tolerated (`EQUIPO   LOCAL :` is the same key).
//!
//! Minutes and jersey numbers share one integer class; the grammar
//! disambiguates them by position.

use crate::ficha::model::CardColor;
use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All possible tokens in one line of the ficha notation.
#[derive(Logos, Debug, Clone, PartialEq, Serialize)]
#[logos(skip r"[ \t]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    // Field keys
    #[regex(r"(?i)FECHA[ \t]*:")]
    DateKey,
    #[regex(r"(?i)EQUIPO[ \t]+LOCAL[ \t]*:")]
    HomeTeamKey,
    #[regex(r"(?i)EQUIPO[ \t]+VISITANTE[ \t]*:")]
    AwayTeamKey,
    #[regex(r"(?i)FORMACION[ \t]+LOCAL[ \t]*:")]
    HomeFormationKey,
    #[regex(r"(?i)FORMACION[ \t]+VISITANTE[ \t]*:")]
    AwayFormationKey,
    #[regex(r"(?i)TITULARES[ \t]+LOCAL[ \t]*:")]
    HomeStartersKey,
    #[regex(r"(?i)TITULARES[ \t]+VISITANTE[ \t]*:")]
    AwayStartersKey,
    #[regex(r"(?i)BANCO[ \t]+LOCAL[ \t]*:")]
    HomeBenchKey,
    #[regex(r"(?i)BANCO[ \t]+VISITANTE[ \t]*:")]
    AwayBenchKey,

    // Event keys
    #[regex(r"(?i)GOL[ \t]*:")]
    GoalKey,
    #[regex(r"(?i)TARJETA[ \t]*:")]
    CardKey,
    #[regex(r"(?i)CAMBIO[ \t]*:")]
    SubstitutionKey,

    // Values
    #[token("AMARILLA", |_| CardColor::Yellow)]
    #[token("ROJA", |_| CardColor::Red)]
    Color(CardColor),

    #[regex(r"[A-Z]{3}", |lex| lex.slice().to_string())]
    TeamCode(String),

    #[regex(r"[0-9]{1,3}", |lex| lex.slice().parse::<u32>().ok())]
    Int(u32),

    // Date literals: bare D/M/YYYY, or quoted with the quotes stripped
    #[regex(r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}", |lex| lex.slice().to_string())]
    Date(String),

    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Quoted(String),

    // Punctuation
    #[token(",")]
    Comma,
    #[token("-")]
    Hyphen,
    #[token(":")]
    Colon,
}

impl Token {
    /// Whether this token opens a field statement.
    pub fn is_field_key(&self) -> bool {
        matches!(
            self,
            Token::DateKey
                | Token::HomeTeamKey
                | Token::AwayTeamKey
                | Token::HomeFormationKey
                | Token::AwayFormationKey
                | Token::HomeStartersKey
                | Token::AwayStartersKey
                | Token::HomeBenchKey
                | Token::AwayBenchKey
        )
    }

    /// Whether this token opens an event statement.
    pub fn is_event_key(&self) -> bool {
        matches!(
            self,
            Token::GoalKey | Token::CardKey | Token::SubstitutionKey
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::DateKey => write!(f, "<fecha-key>"),
            Token::HomeTeamKey => write!(f, "<equipo-local-key>"),
            Token::AwayTeamKey => write!(f, "<equipo-visitante-key>"),
            Token::HomeFormationKey => write!(f, "<formacion-local-key>"),
            Token::AwayFormationKey => write!(f, "<formacion-visitante-key>"),
            Token::HomeStartersKey => write!(f, "<titulares-local-key>"),
            Token::AwayStartersKey => write!(f, "<titulares-visitante-key>"),
            Token::HomeBenchKey => write!(f, "<banco-local-key>"),
            Token::AwayBenchKey => write!(f, "<banco-visitante-key>"),
            Token::GoalKey => write!(f, "<gol-key>"),
            Token::CardKey => write!(f, "<tarjeta-key>"),
            Token::SubstitutionKey => write!(f, "<cambio-key>"),
            Token::Color(color) => write!(f, "<color:{}>", color),
            Token::TeamCode(code) => write!(f, "<team-code:{}>", code),
            Token::Int(n) => write!(f, "<int:{}>", n),
            Token::Date(d) => write!(f, "<date:{}>", d),
            Token::Quoted(s) => write!(f, "<quoted:{}>", s),
            Token::Comma => write!(f, "<comma>"),
            Token::Hyphen => write!(f, "<hyphen>"),
            Token::Colon => write!(f, "<colon>"),
        }
    }
}
