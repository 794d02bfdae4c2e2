//! Integration tests for ingesting the verified sample sheets.
//!
//! Samples are read through the sample-sources module so tests always run
//! against the canonical sheets under docs/specs/v1/samples/.

use chrono::NaiveDate;
use ficha::ficha::formats::to_notation;
use ficha::ficha::model::Event;
use ficha::ficha::processor::ficha_sources::FichaSources;
use ficha::ficha::stream::ingest;

#[test]
fn test_010_single_match() {
    let registry = FichaSources::team_registry().unwrap();
    let source = FichaSources::get_string("010-single-match.ficha").unwrap();
    let outcome = ingest(&source, &registry);

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.matches.len(), 1);
    let m = &outcome.matches[0];
    assert_eq!(m.date, NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
    assert_eq!(m.home_team, "BAR");
    assert_eq!(m.away_team, "RMA");
    assert_eq!(m.home_starters.len(), 11);
    assert_eq!(m.away_starters.len(), 11);
    assert_eq!(m.home_formation, "4-3-3");

    let result = m.result();
    assert_eq!((result.home_goals, result.away_goals), (2, 1));
    assert_eq!(result.winner.as_deref(), Some("BAR"));

    // Goal conservation: per-side counts add up to the goal events.
    let goal_events = m.events.iter().filter(|e| e.is_goal()).count() as u32;
    assert_eq!(m.goals_for("BAR") + m.goals_for("RMA"), goal_events);
}

#[test]
fn test_010_first_goal_is_lewandowski_at_25() {
    let registry = FichaSources::team_registry().unwrap();
    let source = FichaSources::get_string("010-single-match.ficha").unwrap();
    let matches = ingest(&source, &registry).into_result().unwrap();
    match &matches[0].events[0] {
        Event::Goal {
            minute,
            team,
            scorer,
            assist,
        } => {
            assert_eq!(*minute, 25);
            assert_eq!(team, "BAR");
            assert_eq!(*scorer, 9);
            assert_eq!(*assist, Some(8));
            assert_eq!(
                registry.team(team).unwrap().player_name(*scorer),
                Some("Lewandowski")
            );
        }
        other => panic!("expected a goal first, got {:?}", other),
    }
}

#[test]
fn test_020_second_fecha_closes_first_match() {
    let registry = FichaSources::team_registry().unwrap();
    let source = FichaSources::get_string("020-two-matches.ficha").unwrap();
    let matches = ingest(&source, &registry).into_result().unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(
        matches[0].date,
        NaiveDate::from_ymd_opt(2023, 10, 15).unwrap()
    );
    assert_eq!(
        matches[1].date,
        NaiveDate::from_ymd_opt(2023, 10, 22).unwrap()
    );
    // Everything before the second FECHA belongs to the first match.
    assert_eq!(matches[0].events.len(), 3);
    assert_eq!(matches[1].events.len(), 2);
    assert_eq!(matches[0].home_team, "BAR");
    assert_eq!(matches[1].home_team, "RMA");
}

#[test]
fn test_030_comments_blanks_and_case() {
    let registry = FichaSources::team_registry().unwrap();
    let source = FichaSources::get_string("030-comments-and-blanks.ficha").unwrap();
    let matches = ingest(&source, &registry).into_result().unwrap();

    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    // Quoted date, lowercase keys.
    assert_eq!(m.date, NaiveDate::from_ymd_opt(2023, 11, 5).unwrap());
    assert_eq!(m.home_team, "RMA");
    // An empty bench line is a set (empty) field, not a missing one.
    assert_eq!(m.home_bench, Vec::<u32>::new());
    assert_eq!(m.away_bench, vec![13]);
    assert_eq!(m.events.len(), 1);
    assert_eq!(m.events[0].minute(), 12);
}

#[test]
fn test_040_events_keep_arrival_order() {
    let registry = FichaSources::team_registry().unwrap();
    let source = FichaSources::get_string("040-events-heavy.ficha").unwrap();
    let matches = ingest(&source, &registry).into_result().unwrap();

    let m = &matches[0];
    assert_eq!(m.events.len(), 8);
    // Arrival order, not minute order: the 70' goal was written first.
    let minutes: Vec<u32> = m.events.iter().map(|e| e.minute()).collect();
    assert_eq!(minutes, vec![70, 25, 40, 85, 60, 46, 55, 90]);
    assert_eq!(m.result().home_goals, 2);
    assert_eq!(m.result().away_goals, 1);
}

#[test]
fn test_samples_round_trip() {
    let registry = FichaSources::team_registry().unwrap();
    for sample in ["010-single-match.ficha", "040-events-heavy.ficha"] {
        let source = FichaSources::get_string(sample).unwrap();
        let matches = ingest(&source, &registry).into_result().unwrap();
        for original in &matches {
            let reparsed = ingest(&to_notation(original), &registry)
                .into_result()
                .unwrap();
            assert_eq!(reparsed.len(), 1, "{} should reparse", sample);
            assert_eq!(&reparsed[0], original, "{} should round-trip", sample);
        }
    }
}
