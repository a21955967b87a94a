//! End-to-end tests of the league state machine against the in-memory store.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use league_core::{
    Consistency, FixedScoring, InMemoryStore, League, LeagueError, LeagueOptions, LeagueStore,
    WeekOutcome, compute_standings, recalc,
};
use league_types::{LeaguePhase, Match, MatchId, Team};

fn seeded(seed: u64) -> LeagueOptions {
    LeagueOptions {
        seed: Some(seed),
        ..LeagueOptions::default()
    }
}

async fn started(seed: u64) -> (League<InMemoryStore>, InMemoryStore) {
    let store = InMemoryStore::new();
    let league = League::new(store.clone(), seeded(seed)).unwrap();
    league.init().await.unwrap();
    (league, store)
}

#[tokio::test]
async fn init_seeds_default_roster() {
    let (league, store) = started(1).await;

    let status = league.status().await;
    assert_eq!(status.phase, LeaguePhase::Active);
    assert_eq!((status.week, status.max_week, status.teams), (0, 6, 4));

    let persisted: Vec<(String, u32)> = store
        .teams()
        .await
        .into_iter()
        .map(|t| (t.name, t.strength))
        .collect();
    assert_eq!(
        persisted,
        vec![
            ("Lions".to_owned(), 90),
            ("Tigers".to_owned(), 80),
            ("Bears".to_owned(), 70),
            ("Wolves".to_owned(), 60),
        ]
    );
}

#[tokio::test]
async fn init_is_idempotent() {
    let (league, _store) = started(2).await;
    league.play_next_week().await.unwrap();
    let before = league.snapshot().await;

    league.init().await.unwrap();
    assert_eq!(league.snapshot().await, before);
}

#[tokio::test]
async fn full_season_then_complete_is_a_no_op() {
    let (league, store) = started(3).await;

    let reports = league.play_all().await.unwrap();
    assert_eq!(reports.len(), 6);
    assert_eq!(reports.last().unwrap().week, 6);
    assert_eq!(league.matches().await.len(), 12);
    assert_eq!(league.status().await.phase, LeaguePhase::Completed);

    let before = league.snapshot().await;
    let persisted = store.matches().await;
    assert_eq!(league.play_next_week().await.unwrap(), WeekOutcome::Complete);
    assert_eq!(league.snapshot().await, before);
    assert_eq!(store.matches().await, persisted);
    assert!(league.play_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn every_pair_meets_home_and_away() {
    let (league, _store) = started(4).await;
    league.play_all().await.unwrap();

    let matches = league.matches().await;
    for home in ["Lions", "Tigers", "Bears", "Wolves"] {
        for away in ["Lions", "Tigers", "Bears", "Wolves"] {
            if home == away {
                continue;
            }
            let count = matches
                .iter()
                .filter(|m| m.home_team == home && m.away_team == away)
                .count();
            assert_eq!(count, 1, "{home} v {away}");
        }
    }
}

#[tokio::test]
async fn standings_are_stable_between_mutations() {
    let (league, _store) = started(5).await;
    league.play_next_week().await.unwrap();
    league.play_next_week().await.unwrap();
    assert_eq!(league.standings().await, league.standings().await);
}

#[tokio::test]
async fn same_seed_same_season() {
    let (a, _) = started(77).await;
    let (b, _) = started(77).await;
    a.play_all().await.unwrap();
    b.play_all().await.unwrap();
    assert_eq!(a.matches().await, b.matches().await);
    assert_eq!(a.standings().await, b.standings().await);
}

#[tokio::test]
async fn edit_with_swapped_arguments_is_identical() {
    let (a, store_a) = started(9).await;
    let (b, store_b) = started(9).await;
    a.play_next_week().await.unwrap();
    b.play_next_week().await.unwrap();

    let edited_a = a.edit_match_result(1, "Lions", "Tigers", 3, 1).await.unwrap();
    let edited_b = b.edit_match_result(1, "Tigers", "Lions", 1, 3).await.unwrap();

    assert_eq!(edited_a, edited_b);
    assert_eq!(edited_a.home_team, "Lions");
    assert_eq!((edited_a.home_goals, edited_a.away_goals), (3, 1));
    assert_eq!(store_a.matches().await, store_b.matches().await);
    assert_eq!(a.teams().await, b.teams().await);
}

#[tokio::test]
async fn edit_by_id_rebuilds_aggregates() {
    let league = League::with_scoring(
        InMemoryStore::new(),
        FixedScoring::new(1, 0),
        LeagueOptions::default(),
    )
    .unwrap();
    league.init().await.unwrap();
    league.play_next_week().await.unwrap();

    // Week 1: Lions 1-0 Tigers, Bears 1-0 Wolves. Flip the first result.
    let edited = league
        .edit_match_result_by_id(MatchId::new(0), 0, 2)
        .await
        .unwrap();
    assert_eq!((edited.home_goals, edited.away_goals), (0, 2));

    let teams = league.teams().await;
    let lions = teams.iter().find(|t| t.name == "Lions").unwrap();
    let tigers = teams.iter().find(|t| t.name == "Tigers").unwrap();
    assert_eq!((lions.record.lost, lions.record.points), (1, 0));
    assert_eq!((tigers.record.won, tigers.record.points), (1, 3));
    assert_eq!(tigers.record.goals_for, 2);
}

#[tokio::test]
async fn cached_aggregates_match_replay_after_plays_and_edits() {
    let (league, store) = started(11).await;
    league.play_next_week().await.unwrap();
    league.play_next_week().await.unwrap();
    league.edit_match_result(1, "Bears", "Wolves", 4, 4).await.unwrap();
    league.play_next_week().await.unwrap();
    league
        .edit_match_result_by_id(MatchId::new(3), 0, 5)
        .await
        .unwrap();

    let teams = league.teams().await;
    let matches = league.matches().await;
    assert_eq!(
        recalc::verify_consistency(&teams, &matches).unwrap(),
        Consistency::Consistent
    );
    for row in compute_standings(&teams, &matches) {
        let team = teams.iter().find(|t| t.name == row.name).unwrap();
        assert_eq!(team.record, row.record);
    }
    assert_eq!(store.teams().await, teams);
}

#[tokio::test]
async fn invalid_edits_change_nothing() {
    let (league, _store) = started(12).await;
    league.play_next_week().await.unwrap();
    let before = league.snapshot().await;

    assert!(matches!(
        league.edit_match_result(1, "Lions", "Tigers", -1, 0).await,
        Err(LeagueError::Validation { .. })
    ));
    assert!(matches!(
        league.edit_match_result(1, "Lions", "Lions", 1, 0).await,
        Err(LeagueError::Validation { .. })
    ));
    assert!(matches!(
        league.edit_match_result(2, "Lions", "Tigers", 1, 0).await,
        Err(LeagueError::NotFound { .. })
    ));
    assert!(matches!(
        league.edit_match_result(1, "Lions", "Bears", 1, 0).await,
        Err(LeagueError::NotFound { .. })
    ));
    assert!(matches!(
        league.edit_match_result_by_id(MatchId::new(99), 1, 0).await,
        Err(LeagueError::NotFound { .. })
    ));
    assert!(matches!(
        league.edit_match_result_by_id(MatchId::new(0), 0, -3).await,
        Err(LeagueError::Validation { .. })
    ));

    assert_eq!(league.snapshot().await, before);
}

#[tokio::test]
async fn reset_zeroes_everything_but_strength() {
    let (league, store) = started(13).await;
    league.play_all().await.unwrap();

    let status = league.reset().await.unwrap();
    assert_eq!(status.week, 0);
    assert_eq!(status.phase, LeaguePhase::Active);

    let table = league.standings().await;
    assert_eq!(table.len(), 4);
    assert!(table.iter().all(|s| s.record.is_zero() && s.goal_diff == 0));
    assert!(league.matches().await.is_empty());
    assert!(store.matches().await.is_empty());

    let strengths: Vec<u32> = league.teams().await.iter().map(|t| t.strength).collect();
    assert_eq!(strengths, vec![90, 80, 70, 60]);
    assert!(store.teams().await.iter().all(|t| t.record.is_zero()));

    // The season can be replayed after a reset.
    assert!(matches!(
        league.play_next_week().await.unwrap(),
        WeekOutcome::Played { week: 1, .. }
    ));
}

#[tokio::test]
async fn failing_store_leaves_memory_unchanged() {
    let (league, store) = started(14).await;
    league.play_next_week().await.unwrap();
    let before = league.snapshot().await;

    store.fail_writes(true);
    assert!(matches!(
        league.play_next_week().await,
        Err(LeagueError::Persistence(_))
    ));
    assert!(matches!(
        league.edit_match_result(1, "Lions", "Tigers", 5, 0).await,
        Err(LeagueError::Persistence(_))
    ));
    assert!(matches!(league.reset().await, Err(LeagueError::Persistence(_))));
    assert_eq!(league.snapshot().await, before);

    store.fail_writes(false);
    assert!(matches!(
        league.play_next_week().await.unwrap(),
        WeekOutcome::Played { week: 2, .. }
    ));
}

async fn assert_store_consistent(store: &InMemoryStore) {
    let teams = store.teams().await;
    let matches = store.matches().await;
    assert!(recalc::verify_consistency(&teams, &matches).unwrap().is_consistent());
}

#[tokio::test]
async fn week_interrupted_between_matches_is_retried_without_duplicates() {
    let (league, store) = started(40).await;
    let (clean, clean_store) = started(40).await;

    store.fail_after_writes(1);
    assert!(matches!(
        league.play_next_week().await,
        Err(LeagueError::Persistence(_))
    ));
    assert_eq!(store.matches().await.len(), 1);
    assert_eq!(league.status().await.week, 0);

    store.fail_writes(false);
    assert!(matches!(
        league.play_next_week().await.unwrap(),
        WeekOutcome::Played { week: 1, .. }
    ));
    clean.play_next_week().await.unwrap();

    assert_eq!(store.matches().await, clean_store.matches().await);
    assert_eq!(store.teams().await, clean_store.teams().await);
    assert_store_consistent(&store).await;

    let restarted = League::new(store.clone(), seeded(40)).unwrap();
    assert_eq!(restarted.init().await.unwrap().week, 1);
    assert_eq!(restarted.standings().await, clean.standings().await);
}

#[tokio::test]
async fn restart_after_interrupted_week_replays_it() {
    let (league, store) = started(41).await;
    store.fail_after_writes(1);
    assert!(league.play_next_week().await.is_err());
    drop(league);
    store.fail_writes(false);

    let restarted = League::new(store.clone(), seeded(41)).unwrap();
    let status = restarted.init().await.unwrap();
    assert_eq!(status.week, 0);
    assert!(restarted.matches().await.is_empty());
    assert!(restarted.standings().await.iter().all(|s| s.record.is_zero()));

    assert!(matches!(
        restarted.play_next_week().await.unwrap(),
        WeekOutcome::Played { week: 1, .. }
    ));
    let ids: Vec<u64> = store.matches().await.iter().map(|m| m.id.into_inner()).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_store_consistent(&store).await;
}

#[tokio::test]
async fn restart_after_failed_team_write_repairs_aggregates() {
    let (league, store) = started(43).await;
    // Both matches land, the team write does not.
    store.fail_after_writes(2);
    assert!(league.play_next_week().await.is_err());
    assert_eq!(store.matches().await.len(), 2);
    assert!(store.teams().await.iter().all(|t| t.record.is_zero()));
    drop(league);
    store.fail_writes(false);

    let restarted = League::new(store.clone(), seeded(43)).unwrap();
    assert_eq!(restarted.init().await.unwrap().week, 1);
    assert!(store.teams().await.iter().all(|t| t.record.played == 1));
    assert_store_consistent(&store).await;
}

#[tokio::test]
async fn interrupted_edit_never_reaches_the_log() {
    let (league, store) = started(42).await;
    league.play_next_week().await.unwrap();
    let log_before = store.matches().await;
    let table_before = league.standings().await;
    let snapshot_before = league.snapshot().await;

    // Fail at the stats reset, at the team write, and at the log write.
    for allowed in 0..3 {
        store.fail_after_writes(allowed);
        assert!(
            matches!(
                league.edit_match_result(1, "Lions", "Tigers", 7, 0).await,
                Err(LeagueError::Persistence(_))
            ),
            "allowed={allowed}"
        );
        store.fail_writes(false);

        assert_eq!(store.matches().await, log_before, "allowed={allowed}");
        assert_eq!(league.snapshot().await, snapshot_before, "allowed={allowed}");

        let restarted = League::new(store.clone(), seeded(42)).unwrap();
        restarted.init().await.unwrap();
        assert_eq!(restarted.standings().await, table_before, "allowed={allowed}");
        assert_store_consistent(&store).await;
    }

    league.edit_match_result(1, "Lions", "Tigers", 7, 0).await.unwrap();
    assert_eq!(store.matches().await[0].home_goals, 7);
    assert_store_consistent(&store).await;
}

#[tokio::test]
async fn interrupted_reset_keeps_the_season() {
    let (league, store) = started(44).await;
    league.play_next_week().await.unwrap();
    let table_before = league.standings().await;

    // Team stats are zeroed, the log clear fails.
    store.fail_after_writes(1);
    assert!(league.reset().await.is_err());
    store.fail_writes(false);
    assert_eq!(store.matches().await.len(), 2);

    let restarted = League::new(store.clone(), seeded(44)).unwrap();
    assert_eq!(restarted.init().await.unwrap().week, 1);
    assert_eq!(restarted.standings().await, table_before);
    assert_store_consistent(&store).await;
}

#[tokio::test]
async fn restart_resumes_at_persisted_week() {
    let (league, store) = started(15).await;
    league.play_next_week().await.unwrap();
    league.play_next_week().await.unwrap();
    league.play_next_week().await.unwrap();
    let table = league.standings().await;
    drop(league);

    let restarted = League::new(store.clone(), seeded(99)).unwrap();
    let status = restarted.init().await.unwrap();
    assert_eq!(status.week, 3);
    assert_eq!(restarted.standings().await, table);

    let WeekOutcome::Played { week, .. } = restarted.play_next_week().await.unwrap() else {
        panic!("expected week 4 to be played");
    };
    assert_eq!(week, 4);
    let ids: Vec<u64> = restarted
        .matches()
        .await
        .iter()
        .map(|m| m.id.into_inner())
        .collect();
    assert_eq!(ids, (0..8).collect::<Vec<u64>>());
}

#[tokio::test]
async fn init_repairs_drifted_aggregates() {
    let mut lions = Team::new("Lions", 90);
    lions.record.add_result(9, 0);
    let teams = vec![
        lions,
        Team::new("Tigers", 80),
        Team::new("Bears", 70),
        Team::new("Wolves", 60),
    ];
    let log = vec![
        Match {
            id: MatchId::new(0),
            week: 1,
            home_team: "Lions".to_owned(),
            away_team: "Tigers".to_owned(),
            home_goals: 0,
            away_goals: 1,
            played: true,
        },
        Match {
            id: MatchId::new(1),
            week: 1,
            home_team: "Bears".to_owned(),
            away_team: "Wolves".to_owned(),
            home_goals: 2,
            away_goals: 2,
            played: true,
        },
    ];
    let store = InMemoryStore::with_state(teams, log);

    let league = League::new(store.clone(), seeded(1)).unwrap();
    league.init().await.unwrap();

    let repaired = store.load_teams().await.unwrap();
    let lions = repaired.iter().find(|t| t.name == "Lions").unwrap();
    assert_eq!((lions.record.played, lions.record.lost, lions.record.points), (1, 1, 0));
    assert_eq!(league.teams().await, repaired);
    assert_eq!(league.status().await.week, 1);
}

#[tokio::test]
async fn init_rejects_log_with_unknown_team() {
    let teams = vec![Team::new("Lions", 90), Team::new("Tigers", 80)];
    let log = vec![Match {
        id: MatchId::new(0),
        week: 1,
        home_team: "Lions".to_owned(),
        away_team: "Eagles".to_owned(),
        home_goals: 1,
        away_goals: 0,
        played: true,
    }];
    let league = League::new(InMemoryStore::with_state(teams, log), seeded(1)).unwrap();

    assert!(matches!(
        league.init().await,
        Err(LeagueError::UnknownTeam { ref name }) if name == "Eagles"
    ));
    assert_eq!(league.status().await.phase, LeaguePhase::Uninitialized);
}

#[tokio::test]
async fn concurrent_week_requests_never_double_play() {
    let (league, _store) = started(21).await;
    let league = Arc::new(league);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let league = Arc::clone(&league);
            tokio::spawn(async move { league.play_next_week().await })
        })
        .collect();

    let mut played_weeks = Vec::new();
    for handle in handles {
        if let WeekOutcome::Played { week, .. } = handle.await.unwrap().unwrap() {
            played_weeks.push(week);
        }
    }
    played_weeks.sort_unstable();

    assert_eq!(played_weeks, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(league.matches().await.len(), 12);
}

#[tokio::test]
async fn prediction_input_mirrors_log() {
    let (league, _store) = started(31).await;
    league.play_next_week().await.unwrap();

    let rows = league.prediction_input().await;
    let matches = league.matches().await;
    assert_eq!(rows.len(), matches.len());
    assert!(rows.iter().all(|r| r.season == 1 && r.week == 1));
    assert_eq!(rows[0].home_team, matches[0].home_team);
    assert_eq!(rows[0].home_goals, matches[0].home_goals);
}
