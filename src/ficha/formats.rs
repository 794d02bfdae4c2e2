//! Rendering: matches back to notation, and tables to plain text.
//!
//! `to_notation` writes the nine field lines in canonical order and the
//! events in arrival order, so re-ingesting the output reproduces the match
//! field-for-field. The human-readable renderers sort events by minute
//! (stable, ties keep arrival order) because that is display order, not
//! storage order.

use crate::ficha::league::{ScorerRow, StandingRow};
use crate::ficha::model::{CardColor, Event, Match};
use std::fmt::Write;

fn number_list(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn event_line(event: &Event) -> String {
    match event {
        Event::Goal {
            minute,
            team,
            scorer,
            assist,
        } => match assist {
            Some(assist) => format!("GOL: {}, {}, {}, {}", team, minute, scorer, assist),
            None => format!("GOL: {}, {}, {}", team, minute, scorer),
        },
        Event::Card {
            minute,
            team,
            player,
            color,
        } => format!("TARJETA: {}, {}, {}, {}", team, minute, player, color),
        Event::Substitution {
            minute,
            team,
            player_out,
            player_in,
        } => format!("CAMBIO: {}, {}, {}, {}", team, minute, player_out, player_in),
    }
}

/// Serialize a finalized match back into the notation.
pub fn to_notation(m: &Match) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "FECHA: {}", m.date.format("%d/%m/%Y"));
    let _ = writeln!(out, "EQUIPO LOCAL: {}", m.home_team);
    let _ = writeln!(out, "EQUIPO VISITANTE: {}", m.away_team);
    let _ = writeln!(out, "FORMACION LOCAL: {}", m.home_formation);
    let _ = writeln!(out, "FORMACION VISITANTE: {}", m.away_formation);
    let _ = writeln!(out, "TITULARES LOCAL: {}", number_list(&m.home_starters));
    let _ = writeln!(out, "TITULARES VISITANTE: {}", number_list(&m.away_starters));
    let _ = writeln!(out, "BANCO LOCAL: {}", number_list(&m.home_bench));
    let _ = writeln!(out, "BANCO VISITANTE: {}", number_list(&m.away_bench));
    for event in &m.events {
        let _ = writeln!(out, "{}", event_line(event));
    }
    out
}

/// One summary block per match: score line, then events in minute order.
pub fn render_matches(matches: &[Match]) -> String {
    let mut out = String::new();
    for m in matches {
        let _ = writeln!(out, "{}", m);
        let mut events: Vec<&Event> = m.events.iter().collect();
        events.sort_by_key(|e| e.minute());
        for event in events {
            let line = match event {
                Event::Goal {
                    minute,
                    team,
                    scorer,
                    assist,
                } => {
                    let assist = assist
                        .map(|a| format!(" (asistencia #{})", a))
                        .unwrap_or_default();
                    format!("  {}' gol {} #{}{}", minute, team, scorer, assist)
                }
                Event::Card {
                    minute,
                    team,
                    player,
                    color,
                } => {
                    let color = match color {
                        CardColor::Yellow => "amarilla",
                        CardColor::Red => "roja",
                    };
                    format!("  {}' tarjeta {} {} #{}", minute, color, team, player)
                }
                Event::Substitution {
                    minute,
                    team,
                    player_out,
                    player_in,
                } => format!(
                    "  {}' cambio {} #{} -> #{}",
                    minute, team, player_out, player_in
                ),
            };
            let _ = writeln!(out, "{}", line);
        }
    }
    out
}

/// Standings as a fixed-width text table.
pub fn render_standings(rows: &[StandingRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
        "EQUIPO", "PJ", "G", "E", "P", "GF", "GC", "PTS"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<6} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.points
        );
    }
    out
}

/// Scorer ranking as a fixed-width text table.
pub fn render_scorers(rows: &[ScorerRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<6} {:>5}", "JUGADOR", "EQUIPO", "GOLES");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<6} {:>5}",
            format!("{} (#{})", row.player, row.number),
            row.team,
            row.goals
        );
    }
    out
}
