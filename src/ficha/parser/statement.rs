//! Parsed statement shapes.
//!
//! One line of notation parses into exactly one [`Statement`]: either a field
//! assignment on the match under construction, or a timed event command. The
//! per-side fields are folded over [`Side`] so the grammar and the assembler
//! do not repeat themselves for local/visitante pairs.

use crate::ficha::model::CardColor;
use serde::Serialize;
use std::fmt;

/// Which side of the match a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "LOCAL"),
            Side::Away => write!(f, "VISITANTE"),
        }
    }
}

/// One parsed line: a field assignment or an event command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Raw date text; calendar validation is the assembler's.
    Date(String),
    Team(Side, String),
    Formation(Side, String),
    Starters(Side, Vec<u32>),
    Bench(Side, Vec<u32>),
    Goal {
        team: String,
        minute: u32,
        scorer: u32,
        assist: Option<u32>,
    },
    Card {
        team: String,
        minute: u32,
        player: u32,
        color: CardColor,
    },
    Substitution {
        team: String,
        minute: u32,
        player_out: u32,
        player_in: u32,
    },
}

impl Statement {
    /// Whether this statement is the date field (the match boundary marker).
    pub fn is_date_field(&self) -> bool {
        matches!(self, Statement::Date(_))
    }

    pub fn is_field(&self) -> bool {
        matches!(
            self,
            Statement::Date(_)
                | Statement::Team(..)
                | Statement::Formation(..)
                | Statement::Starters(..)
                | Statement::Bench(..)
        )
    }

    pub fn is_event(&self) -> bool {
        !self.is_field()
    }
}
