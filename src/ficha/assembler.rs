//! The match assembler: statements in, one immutable match out.
//!
//!     One assembler instance accumulates exactly one match. Field statements
//!     fill optional slots (last write wins, repeating a field is not an
//!     error), event statements append to the event buffer, and `finalize`
//!     consumes the assembler to produce a [`Match`] once all nine field slots
//!     are present.
//!
//!     Roster validation is deliberately order-dependent: starter and bench
//!     numbers are checked against the corresponding team's roster only when
//!     that team-code field was already set earlier in the same match's
//!     statement sequence. A lineup that arrives before its team line is
//!     accepted unchecked. This mirrors the notation's documented permissive
//!     ordering and is not validation the grammar forgot.

use crate::ficha::model::{Event, Match, STARTERS_PER_SIDE};
use crate::ficha::parser::{Side, Statement};
use crate::ficha::registry::Registry;
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

/// Semantic failure while assembling a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblerError {
    InvalidDate { text: String },
    UnknownTeam { code: String },
    WrongStarterCount { expected: usize, got: usize },
    UnknownRosterNumber { team: String, number: u32 },
    /// An event arrived before any field statement opened a match.
    NoMatchInProgress,
    /// A required field was never set; names the first missing one in
    /// canonical order.
    MissingField { field: &'static str },
    /// The same code was given for both sides.
    SameTeam { code: String },
}

impl fmt::Display for AssemblerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssemblerError::InvalidDate { text } => {
                write!(f, "invalid date '{}', expected DD/MM/YYYY", text)
            }
            AssemblerError::UnknownTeam { code } => {
                write!(f, "team '{}' is not registered", code)
            }
            AssemblerError::WrongStarterCount { expected, got } => {
                write!(f, "expected exactly {} starters, got {}", expected, got)
            }
            AssemblerError::UnknownRosterNumber { team, number } => {
                write!(f, "player #{} does not exist on team {}", number, team)
            }
            AssemblerError::NoMatchInProgress => {
                write!(f, "event before any match field was set")
            }
            AssemblerError::MissingField { field } => {
                write!(f, "missing required field: {}", field)
            }
            AssemblerError::SameTeam { code } => {
                write!(f, "team '{}' cannot play both sides", code)
            }
        }
    }
}

impl std::error::Error for AssemblerError {}

/// Accumulator for the match currently under construction.
///
/// Created fresh for each match; spent by [`MatchAssembler::finalize`].
#[derive(Debug)]
pub struct MatchAssembler<'r> {
    registry: &'r Registry,
    date: Option<NaiveDate>,
    home_team: Option<String>,
    away_team: Option<String>,
    home_formation: Option<String>,
    away_formation: Option<String>,
    home_starters: Option<Vec<u32>>,
    away_starters: Option<Vec<u32>>,
    home_bench: Option<Vec<u32>>,
    away_bench: Option<Vec<u32>>,
    events: Vec<Event>,
}

impl<'r> MatchAssembler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        MatchAssembler {
            registry,
            date: None,
            home_team: None,
            away_team: None,
            home_formation: None,
            away_formation: None,
            home_starters: None,
            away_starters: None,
            home_bench: None,
            away_bench: None,
            events: Vec::new(),
        }
    }

    /// Whether at least one field statement has been applied.
    ///
    /// Events do not open a match; they are rejected until a field does.
    pub fn is_open(&self) -> bool {
        self.date.is_some()
            || self.home_team.is_some()
            || self.away_team.is_some()
            || self.home_formation.is_some()
            || self.away_formation.is_some()
            || self.home_starters.is_some()
            || self.away_starters.is_some()
            || self.home_bench.is_some()
            || self.away_bench.is_some()
    }

    /// Apply one parsed statement to the match under construction.
    pub fn apply(&mut self, statement: Statement) -> Result<(), AssemblerError> {
        match statement {
            Statement::Date(text) => {
                let date = NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y")
                    .map_err(|_| AssemblerError::InvalidDate { text })?;
                self.date = Some(date);
            }
            Statement::Team(side, code) => {
                if self.registry.team(&code).is_none() {
                    return Err(AssemblerError::UnknownTeam { code });
                }
                match side {
                    Side::Home => self.home_team = Some(code),
                    Side::Away => self.away_team = Some(code),
                }
            }
            Statement::Formation(side, shape) => match side {
                Side::Home => self.home_formation = Some(shape),
                Side::Away => self.away_formation = Some(shape),
            },
            Statement::Starters(side, numbers) => {
                if numbers.len() != STARTERS_PER_SIDE {
                    return Err(AssemblerError::WrongStarterCount {
                        expected: STARTERS_PER_SIDE,
                        got: numbers.len(),
                    });
                }
                self.check_roster(side, &numbers)?;
                match side {
                    Side::Home => self.home_starters = Some(numbers),
                    Side::Away => self.away_starters = Some(numbers),
                }
            }
            Statement::Bench(side, numbers) => {
                self.check_roster(side, &numbers)?;
                match side {
                    Side::Home => self.home_bench = Some(numbers),
                    Side::Away => self.away_bench = Some(numbers),
                }
            }
            Statement::Goal {
                team,
                minute,
                scorer,
                assist,
            } => self.push_event(Event::Goal {
                minute,
                team,
                scorer,
                assist,
            })?,
            Statement::Card {
                team,
                minute,
                player,
                color,
            } => self.push_event(Event::Card {
                minute,
                team,
                player,
                color,
            })?,
            Statement::Substitution {
                team,
                minute,
                player_out,
                player_in,
            } => self.push_event(Event::Substitution {
                minute,
                team,
                player_out,
                player_in,
            })?,
        }
        Ok(())
    }

    /// Validate a number list against the side's roster, but only if that
    /// side's team code is already known.
    fn check_roster(&self, side: Side, numbers: &[u32]) -> Result<(), AssemblerError> {
        let code = match side {
            Side::Home => self.home_team.as_deref(),
            Side::Away => self.away_team.as_deref(),
        };
        let Some(code) = code else {
            return Ok(());
        };
        let Some(team) = self.registry.team(code) else {
            return Ok(());
        };
        for &number in numbers {
            if !team.has_player(number) {
                return Err(AssemblerError::UnknownRosterNumber {
                    team: code.to_string(),
                    number,
                });
            }
        }
        Ok(())
    }

    fn push_event(&mut self, event: Event) -> Result<(), AssemblerError> {
        if !self.is_open() {
            return Err(AssemblerError::NoMatchInProgress);
        }
        // No cross-validation against lineups: a scorer outside the starting
        // eleven is accepted.
        self.events.push(event);
        Ok(())
    }

    /// Consume the assembler and produce the immutable match record.
    ///
    /// Fails with `MissingField` naming the first unset field in canonical
    /// order: date, teams, formations, starters, benches.
    pub fn finalize(self) -> Result<Match, AssemblerError> {
        let missing = |field| AssemblerError::MissingField { field };
        let date = self.date.ok_or(missing("FECHA"))?;
        let home_team = self.home_team.ok_or(missing("EQUIPO LOCAL"))?;
        let away_team = self.away_team.ok_or(missing("EQUIPO VISITANTE"))?;
        let home_formation = self.home_formation.ok_or(missing("FORMACION LOCAL"))?;
        let away_formation = self.away_formation.ok_or(missing("FORMACION VISITANTE"))?;
        let home_starters = self.home_starters.ok_or(missing("TITULARES LOCAL"))?;
        let away_starters = self.away_starters.ok_or(missing("TITULARES VISITANTE"))?;
        let home_bench = self.home_bench.ok_or(missing("BANCO LOCAL"))?;
        let away_bench = self.away_bench.ok_or(missing("BANCO VISITANTE"))?;
        if home_team == away_team {
            return Err(AssemblerError::SameTeam { code: home_team });
        }
        debug!(
            home = %home_team,
            away = %away_team,
            events = self.events.len(),
            "finalized match"
        );
        Ok(Match {
            date,
            home_team,
            away_team,
            home_formation,
            away_formation,
            home_starters,
            away_starters,
            home_bench,
            away_bench,
            events: self.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ficha::model::CardColor;
    use crate::ficha::testing::liga_registry;

    fn starters() -> Vec<u32> {
        vec![1, 2, 3, 4, 5, 6, 8, 9, 11, 14, 21]
    }

    fn apply_full_match(assembler: &mut MatchAssembler<'_>) {
        let statements = vec![
            Statement::Date("15/10/2023".to_string()),
            Statement::Team(Side::Home, "BAR".to_string()),
            Statement::Team(Side::Away, "RMA".to_string()),
            Statement::Formation(Side::Home, "4-3-3".to_string()),
            Statement::Formation(Side::Away, "4-4-2".to_string()),
            Statement::Starters(Side::Home, starters()),
            Statement::Starters(Side::Away, vec![1, 2, 3, 4, 5, 6, 8, 10, 7, 9, 15]),
            Statement::Bench(Side::Home, vec![13, 18, 20]),
            Statement::Bench(Side::Away, vec![13, 18, 24]),
        ];
        for statement in statements {
            assembler.apply(statement).unwrap();
        }
    }

    #[test]
    fn test_full_match_finalizes() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        apply_full_match(&mut assembler);
        assembler
            .apply(Statement::Goal {
                team: "BAR".to_string(),
                minute: 25,
                scorer: 9,
                assist: Some(8),
            })
            .unwrap();
        let m = assembler.finalize().unwrap();
        assert_eq!(m.home_team, "BAR");
        assert_eq!(m.home_starters.len(), 11);
        assert_eq!(m.events.len(), 1);
        assert_eq!(m.goals_for("BAR"), 1);
    }

    #[test]
    fn test_unknown_team_is_rejected() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        let err = assembler
            .apply(Statement::Team(Side::Home, "ZZZ".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            AssemblerError::UnknownTeam {
                code: "ZZZ".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_starter_count() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Team(Side::Home, "BAR".to_string()))
            .unwrap();
        let err = assembler
            .apply(Statement::Starters(Side::Home, vec![1, 2, 3]))
            .unwrap_err();
        assert_eq!(
            err,
            AssemblerError::WrongStarterCount {
                expected: 11,
                got: 3
            }
        );
    }

    #[test]
    fn test_roster_check_when_team_already_set() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Team(Side::Home, "BAR".to_string()))
            .unwrap();
        let mut numbers = starters();
        numbers[10] = 77; // nobody wears 77 at BAR
        let err = assembler
            .apply(Statement::Starters(Side::Home, numbers))
            .unwrap_err();
        assert_eq!(
            err,
            AssemblerError::UnknownRosterNumber {
                team: "BAR".to_string(),
                number: 77
            }
        );
    }

    #[test]
    fn test_no_roster_check_before_team_is_set() {
        // The documented permissive ordering: the lineup arrives first, so
        // nothing is checked against a roster.
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        let mut numbers = starters();
        numbers[10] = 77;
        assert!(assembler
            .apply(Statement::Starters(Side::Home, numbers))
            .is_ok());
    }

    #[test]
    fn test_bench_roster_check() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Team(Side::Away, "RMA".to_string()))
            .unwrap();
        let err = assembler
            .apply(Statement::Bench(Side::Away, vec![13, 99]))
            .unwrap_err();
        assert_eq!(
            err,
            AssemblerError::UnknownRosterNumber {
                team: "RMA".to_string(),
                number: 99
            }
        );
        // Bench has no length constraint; empty is fine.
        assert!(assembler.apply(Statement::Bench(Side::Away, vec![])).is_ok());
    }

    #[test]
    fn test_event_requires_open_match() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        let err = assembler
            .apply(Statement::Card {
                team: "BAR".to_string(),
                minute: 10,
                player: 4,
                color: CardColor::Yellow,
            })
            .unwrap_err();
        assert_eq!(err, AssemblerError::NoMatchInProgress);
    }

    #[test]
    fn test_missing_field_reports_canonical_order() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Team(Side::Home, "BAR".to_string()))
            .unwrap();
        let err = assembler.finalize().unwrap_err();
        assert_eq!(err, AssemblerError::MissingField { field: "FECHA" });

        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Date("15/10/2023".to_string()))
            .unwrap();
        let err = assembler.finalize().unwrap_err();
        assert_eq!(
            err,
            AssemblerError::MissingField {
                field: "EQUIPO LOCAL"
            }
        );
    }

    #[test]
    fn test_invalid_date() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        let err = assembler
            .apply(Statement::Date("31/02/2023".to_string()))
            .unwrap_err();
        assert_eq!(
            err,
            AssemblerError::InvalidDate {
                text: "31/02/2023".to_string()
            }
        );
    }

    #[test]
    fn test_last_write_wins_on_repeated_fields() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        apply_full_match(&mut assembler);
        assembler
            .apply(Statement::Formation(Side::Home, "3-5-2".to_string()))
            .unwrap();
        let m = assembler.finalize().unwrap();
        assert_eq!(m.home_formation, "3-5-2");
    }

    #[test]
    fn test_same_team_both_sides_rejected_at_finalize() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        apply_full_match(&mut assembler);
        assembler
            .apply(Statement::Team(Side::Away, "BAR".to_string()))
            .unwrap();
        let err = assembler.finalize().unwrap_err();
        assert_eq!(
            err,
            AssemblerError::SameTeam {
                code: "BAR".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_starters_accepted_when_on_roster() {
        let registry = liga_registry();
        let mut assembler = MatchAssembler::new(&registry);
        assembler
            .apply(Statement::Team(Side::Home, "BAR".to_string()))
            .unwrap();
        let numbers = vec![9, 9, 9, 9, 9, 9, 9, 9, 9, 9, 9];
        assert!(assembler
            .apply(Statement::Starters(Side::Home, numbers))
            .is_ok());
    }
}
