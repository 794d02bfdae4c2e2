//! Team registration: the fluent roster builders and the registry the parser
//! validates against.
//!
//!     Teams are registered up front, before any match sheet is ingested. The
//!     registry is insertion-ordered (the standings table relies on that for its
//!     tie policy) and is read-only from the parser's perspective: an ingest run
//!     looks codes and jersey numbers up, it never registers anything.

use crate::ficha::model::{Player, Team};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Jersey numbers live in 1..=99.
const NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

static TEAM_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("team code pattern compiles"));

/// Errors raised while building teams or registering them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyTeamName,
    EmptyPlayerName { number: u32 },
    InvalidTeamCode { code: String },
    NumberOutOfRange { number: u32 },
    DuplicateNumber { number: u32 },
    DuplicateTeamCode { code: String },
    MissingTeamName,
    MissingTeamCode,
    InvalidTeamFile { message: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyTeamName => write!(f, "team name must not be empty"),
            RegistryError::EmptyPlayerName { number } => {
                write!(f, "player #{} has an empty name", number)
            }
            RegistryError::InvalidTeamCode { code } => {
                write!(f, "team code '{}' must be exactly 3 uppercase letters", code)
            }
            RegistryError::NumberOutOfRange { number } => {
                write!(f, "jersey number {} is outside 1-99", number)
            }
            RegistryError::DuplicateNumber { number } => {
                write!(f, "jersey number {} is already taken on this team", number)
            }
            RegistryError::DuplicateTeamCode { code } => {
                write!(f, "team code '{}' is already registered", code)
            }
            RegistryError::MissingTeamName => write!(f, "team name was never set"),
            RegistryError::MissingTeamCode => write!(f, "team code was never set"),
            RegistryError::InvalidTeamFile { message } => {
                write!(f, "invalid team file: {}", message)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Fluent builder for a [`Team`].
///
/// Each step validates as it goes; `build` requires name and code.
///
/// ```ignore
/// let team = TeamBuilder::new()
///     .name("FC Barcelona")?
///     .code("BAR")?
///     .player(9, "Lewandowski")?
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct TeamBuilder {
    name: Option<String>,
    code: Option<String>,
    players: Vec<Player>,
}

impl TeamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Result<Self, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyTeamName);
        }
        self.name = Some(name.to_string());
        Ok(self)
    }

    /// Set the 3-letter code. Lowercase input is accepted and uppercased.
    pub fn code(mut self, code: &str) -> Result<Self, RegistryError> {
        let code = code.trim().to_uppercase();
        if !TEAM_CODE.is_match(&code) {
            return Err(RegistryError::InvalidTeamCode { code });
        }
        self.code = Some(code);
        Ok(self)
    }

    /// Add a roster player, keeping jersey numbers unique within the team.
    pub fn player(mut self, number: u32, name: &str) -> Result<Self, RegistryError> {
        if !NUMBER_RANGE.contains(&number) {
            return Err(RegistryError::NumberOutOfRange { number });
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::EmptyPlayerName { number });
        }
        if self.players.iter().any(|p| p.number == number) {
            return Err(RegistryError::DuplicateNumber { number });
        }
        self.players.push(Player {
            number,
            name: name.to_string(),
        });
        Ok(self)
    }

    pub fn build(self) -> Result<Team, RegistryError> {
        let name = self.name.ok_or(RegistryError::MissingTeamName)?;
        let code = self.code.ok_or(RegistryError::MissingTeamCode)?;
        Ok(Team {
            code,
            name,
            players: self.players,
        })
    }
}

/// Insertion-ordered collection of registered teams, keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    teams: Vec<Team>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team; codes are unique within a registry.
    pub fn register(&mut self, team: Team) -> Result<(), RegistryError> {
        if self.team(&team.code).is_some() {
            return Err(RegistryError::DuplicateTeamCode { code: team.code });
        }
        self.teams.push(team);
        Ok(())
    }

    /// Look up a team by its 3-letter code.
    pub fn team(&self, code: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.code == code)
    }

    /// Teams in registration order.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Build a registry from a JSON team file.
    ///
    /// Every entry is funneled through the validating builder, so a team file
    /// cannot smuggle in codes or rosters the fluent API would reject.
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let file: TeamFile =
            serde_json::from_str(text).map_err(|e| RegistryError::InvalidTeamFile {
                message: e.to_string(),
            })?;
        let mut registry = Registry::new();
        for entry in file.teams {
            let mut builder = TeamBuilder::new().name(&entry.name)?.code(&entry.code)?;
            for player in entry.players {
                builder = builder.player(player.number, &player.name)?;
            }
            registry.register(builder.build()?)?;
        }
        Ok(registry)
    }
}

/// On-disk shape of a team file (`--teams teams.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamFile {
    pub teams: Vec<TeamFileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamFileEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub players: Vec<PlayerFileEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerFileEntry {
    pub number: u32,
    pub name: String,
}
