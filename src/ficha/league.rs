//! League tables: a deterministic fold over the finalized match list.
//!
//! Standings rows are seeded in registry insertion order and the sort by
//! points is stable, so teams level on points keep their registration order.
//! That is the documented tie policy, not a missing tie-breaker.

use crate::ficha::model::{Event, Match};
use crate::ficha::registry::Registry;
use serde::Serialize;

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingRow {
    pub team: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl StandingRow {
    fn new(team: String) -> Self {
        StandingRow {
            team,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }
}

/// One row of the scorer ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorerRow {
    pub player: String,
    pub team: String,
    pub number: u32,
    pub goals: u32,
}

/// Fold the match list into a standings table.
///
/// Every registered team gets a row, even with zero matches played.
pub fn standings(matches: &[Match], registry: &Registry) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = registry
        .teams()
        .map(|t| StandingRow::new(t.code.clone()))
        .collect();

    for m in matches {
        let result = m.result();
        if let Some(row) = row_mut(&mut rows, &m.home_team) {
            row.played += 1;
            row.goals_for += result.home_goals;
            row.goals_against += result.away_goals;
        }
        if let Some(row) = row_mut(&mut rows, &m.away_team) {
            row.played += 1;
            row.goals_for += result.away_goals;
            row.goals_against += result.home_goals;
        }
        match result.winner.as_deref() {
            Some(winner) => {
                if let Some(row) = row_mut(&mut rows, winner) {
                    row.won += 1;
                    row.points += 3;
                }
                let loser = if winner == m.home_team {
                    &m.away_team
                } else {
                    &m.home_team
                };
                if let Some(row) = row_mut(&mut rows, loser) {
                    row.lost += 1;
                }
            }
            None => {
                for code in [&m.home_team, &m.away_team] {
                    if let Some(row) = row_mut(&mut rows, code) {
                        row.drawn += 1;
                        row.points += 1;
                    }
                }
            }
        }
    }

    // Stable: ties on points keep registry insertion order.
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

fn row_mut<'a>(rows: &'a mut [StandingRow], code: &str) -> Option<&'a mut StandingRow> {
    rows.iter_mut().find(|r| r.team == code)
}

/// Fold the goal events into a scorer ranking.
///
/// Goals are grouped by (team, jersey number) and resolved to a player name
/// through the team's roster; goals whose roster lookup fails are skipped.
/// The sort by goal count is stable, so ties keep first-seen order.
pub fn scorers(matches: &[Match], registry: &Registry) -> Vec<ScorerRow> {
    let mut rows: Vec<ScorerRow> = Vec::new();

    for m in matches {
        for event in &m.events {
            let Event::Goal { team, scorer, .. } = event else {
                continue;
            };
            let Some(name) = registry.team(team).and_then(|t| t.player_name(*scorer)) else {
                continue;
            };
            match rows
                .iter_mut()
                .find(|r| r.team == *team && r.number == *scorer)
            {
                Some(row) => row.goals += 1,
                None => rows.push(ScorerRow {
                    player: name.to_string(),
                    team: team.clone(),
                    number: *scorer,
                    goals: 1,
                }),
            }
        }
    }

    rows.sort_by(|a, b| b.goals.cmp(&a.goals));
    rows
}
