//! Core match records shared across the lexer, parser, and tooling.
//!
//!     A finalized [`Match`] is produced exclusively by the match assembler and is never
//!     mutated afterwards. Everything in this module is plain data: events are kept in
//!     arrival order, and consumers that care about chronology sort by minute themselves
//!     (stable, so ties keep arrival order).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of starting players each side must name.
pub const STARTERS_PER_SIDE: usize = 11;

/// A registered player: jersey number plus name.
///
/// Owned exclusively by its [`Team`]; jersey numbers are unique within one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub number: u32,
    pub name: String,
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.name)
    }
}

/// A registered team: 3-uppercase-letter code, display name, and its roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub code: String,
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Whether a jersey number exists on this team's roster.
    pub fn has_player(&self, number: u32) -> bool {
        self.players.iter().any(|p| p.number == number)
    }

    /// Look up a roster player by jersey number.
    pub fn player(&self, number: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }

    /// The name behind a jersey number, if registered.
    pub fn player_name(&self, number: u32) -> Option<&str> {
        self.player(number).map(|p| p.name.as_str())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Card color, rendered in the notation's own words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardColor {
    Yellow,
    Red,
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardColor::Yellow => write!(f, "AMARILLA"),
            CardColor::Red => write!(f, "ROJA"),
        }
    }
}

/// A timed in-match event.
///
/// All variants carry the minute of play and the team code of the side the event
/// belongs to. Events have no identity beyond their position in the match's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    Goal {
        minute: u32,
        team: String,
        scorer: u32,
        assist: Option<u32>,
    },
    Card {
        minute: u32,
        team: String,
        player: u32,
        color: CardColor,
    },
    Substitution {
        minute: u32,
        team: String,
        player_out: u32,
        player_in: u32,
    },
}

impl Event {
    /// Minute of play, shared by every variant.
    pub fn minute(&self) -> u32 {
        match self {
            Event::Goal { minute, .. }
            | Event::Card { minute, .. }
            | Event::Substitution { minute, .. } => *minute,
        }
    }

    /// Team code the event belongs to, shared by every variant.
    pub fn team(&self) -> &str {
        match self {
            Event::Goal { team, .. }
            | Event::Card { team, .. }
            | Event::Substitution { team, .. } => team,
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, Event::Goal { .. })
    }
}

/// The score derived from a match's goal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
    /// Code of the winning side, or `None` on a draw.
    pub winner: Option<String>,
}

/// A finalized, immutable match record.
///
/// Created only by the assembler's finalize operation once all nine fields are
/// present; additional events belong to the next match being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_formation: String,
    pub away_formation: String,
    pub home_starters: Vec<u32>,
    pub away_starters: Vec<u32>,
    pub home_bench: Vec<u32>,
    pub away_bench: Vec<u32>,
    /// Events in arrival order, not necessarily minute order.
    pub events: Vec<Event>,
}

impl Match {
    /// Goals scored by the given side, counted over the goal events.
    pub fn goals_for(&self, code: &str) -> u32 {
        self.events
            .iter()
            .filter(|e| e.is_goal() && e.team() == code)
            .count() as u32
    }

    /// Score and winner derived from the event list.
    pub fn result(&self) -> MatchResult {
        let home_goals = self.goals_for(&self.home_team);
        let away_goals = self.goals_for(&self.away_team);
        let winner = if home_goals > away_goals {
            Some(self.home_team.clone())
        } else if away_goals > home_goals {
            Some(self.away_team.clone())
        } else {
            None
        };
        MatchResult {
            home_goals,
            away_goals,
            winner,
        }
    }

    /// Points this match awards the given side: win 3, draw 1, loss 0.
    ///
    /// A code that played no part in the match earns nothing.
    pub fn points_for(&self, code: &str) -> u32 {
        if code != self.home_team && code != self.away_team {
            return 0;
        }
        match self.result().winner {
            Some(winner) if winner == code => 3,
            Some(_) => 0,
            None => 1,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result();
        write!(
            f,
            "{} - {} {}-{} {}",
            self.date.format("%d/%m/%Y"),
            self.home_team,
            result.home_goals,
            result.away_goals,
            self.away_team
        )
    }
}
