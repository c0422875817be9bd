mod common;
use common::{NOW, SECRET, count, gate, open_test_pool};

use rpomodoro::core::aggregate::Aggregator;
use rpomodoro::core::gate::AccessGate;
use rpomodoro::core::recorder::{MAX_DURATION, PomodoroRecorder, RecordRequest};
use rpomodoro::core::resolver::ProjectResolver;
use rpomodoro::db::pool::DbPool;
use rpomodoro::errors::AppError;
use rpomodoro::models::window::TimeWindow;
use std::thread;

#[test]
fn deep_work_scenario() {
    let (mut pool, _) = open_test_pool("rec_deep_work");

    let req = RecordRequest::new(1500, "Deep Work");
    let pomo = PomodoroRecorder::record_at(&mut pool, &gate(), Some(SECRET), &req, NOW).unwrap();

    assert_eq!(pomo.duration, 1500);
    assert_eq!(pomo.start, NOW - 1500);
    assert!(!pomo.test);

    let project = ProjectResolver::find_by_name(&pool.conn, "deep_work")
        .unwrap()
        .expect("project created");
    let summary = Aggregator::aggregate(&pool.conn, &project, &TimeWindow::unbounded()).unwrap();

    assert_eq!(summary.n_pomodoros, 1);
    assert_eq!(summary.total_duration, 1500);
    assert_eq!(summary.pomodoros[0].id, pomo.id);
}

#[test]
fn wall_clock_start_is_now_minus_duration() {
    let (mut pool, _) = open_test_pool("rec_wall_clock");

    let before = chrono::Utc::now().timestamp();
    let pomo = PomodoroRecorder::record(
        &mut pool,
        &gate(),
        Some(SECRET),
        &RecordRequest::new(1500, "clock"),
    )
    .unwrap();
    let after = chrono::Utc::now().timestamp();

    assert!(pomo.start >= before - 1500 && pomo.start <= after - 1500);
}

#[test]
fn explicit_start_is_used_verbatim_and_test_flag_kept() {
    let (mut pool, _) = open_test_pool("rec_explicit_start");

    let req = RecordRequest::new(1800, "backfill")
        .starting_at(1_600_000_000)
        .test(true);
    let pomo = PomodoroRecorder::record_at(&mut pool, &gate(), Some(SECRET), &req, NOW).unwrap();

    assert_eq!(pomo.start, 1_600_000_000);
    assert!(pomo.test);

    let stored = rpomodoro::db::queries::find_pomodoro_by_id(&pool.conn, pomo.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored, pomo);
}

#[test]
fn recording_sets_last_touched_to_the_new_start() {
    let (mut pool, _) = open_test_pool("rec_last_touched");
    let g = gate();

    let first = RecordRequest::new(600, "alpha").starting_at(5_000);
    PomodoroRecorder::record_at(&mut pool, &g, Some(SECRET), &first, NOW).unwrap();
    let p = ProjectResolver::find_by_name(&pool.conn, "alpha").unwrap().unwrap();
    assert_eq!(p.last_touched, 5_000);

    // a backfilled, older entry still moves the marker to its own start
    let older = RecordRequest::new(600, "alpha").starting_at(1_000);
    PomodoroRecorder::record_at(&mut pool, &g, Some(SECRET), &older, NOW).unwrap();
    let p = ProjectResolver::find_by_name(&pool.conn, "alpha").unwrap().unwrap();
    assert_eq!(p.last_touched, 1_000);
}

#[test]
fn equivalent_names_share_one_project() {
    let (mut pool, _) = open_test_pool("rec_same_project");
    let g = gate();

    for raw in ["Deep Work", "deep work", "  DEEP WORK  ", "deep_work"] {
        PomodoroRecorder::record_at(&mut pool, &g, Some(SECRET), &RecordRequest::new(60, raw), NOW)
            .unwrap();
    }

    assert_eq!(count(&pool, "project"), 1);
    assert_eq!(count(&pool, "pomodoro"), 4);
}

#[test]
fn out_of_range_duration_is_rejected_without_writes() {
    let (mut pool, _) = open_test_pool("rec_bad_duration");

    for d in [0, -1500, MAX_DURATION + 1, i64::MAX / 2 + 1] {
        let err = PomodoroRecorder::record_at(
            &mut pool,
            &gate(),
            Some(SECRET),
            &RecordRequest::new(d, "never"),
            NOW,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidDuration(_)));
        assert!(!err.is_retryable());
    }

    assert_eq!(count(&pool, "project"), 0);
    assert_eq!(count(&pool, "pomodoro"), 0);
}

#[test]
fn a_full_day_is_the_longest_accepted_duration() {
    let (mut pool, _) = open_test_pool("rec_max_duration");

    let pomo = PomodoroRecorder::record_at(
        &mut pool,
        &gate(),
        Some(SECRET),
        &RecordRequest::new(MAX_DURATION, "marathon"),
        NOW,
    )
    .unwrap();

    assert_eq!(pomo.duration, 86_400);
    assert_eq!(pomo.start, NOW - 86_400);
}

#[test]
fn blank_project_name_is_rejected() {
    let (mut pool, _) = open_test_pool("rec_blank_name");

    let err = PomodoroRecorder::record_at(
        &mut pool,
        &gate(),
        Some(SECRET),
        &RecordRequest::new(60, "   "),
        NOW,
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidProjectName(_)));
    assert_eq!(count(&pool, "project"), 0);
}

#[test]
fn wrong_or_missing_key_performs_no_mutation() {
    let (mut pool, _) = open_test_pool("rec_wrong_key");
    let req = RecordRequest::new(1500, "secret project");
    let log_rows = count(&pool, "log");

    for key in [Some("wrong"), Some(""), None] {
        let err = PomodoroRecorder::record_at(&mut pool, &gate(), key, &req, NOW).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    // a gate without a configured secret refuses even an empty key
    let open = AccessGate::new(None);
    let err = PomodoroRecorder::record_at(&mut pool, &open, Some(""), &req, NOW).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    assert_eq!(count(&pool, "project"), 0);
    assert_eq!(count(&pool, "pomodoro"), 0);
    assert_eq!(count(&pool, "log"), log_rows);
}

#[test]
fn storage_failure_rolls_back_the_new_project() {
    let (mut pool, _) = open_test_pool("rec_rollback");

    pool.conn
        .execute_batch(
            "CREATE TRIGGER refuse_pomodoro BEFORE INSERT ON pomodoro
             BEGIN SELECT RAISE(ABORT, 'disk on fire'); END;",
        )
        .unwrap();

    let err = PomodoroRecorder::record_at(
        &mut pool,
        &gate(),
        Some(SECRET),
        &RecordRequest::new(1500, "ghost"),
        NOW,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Db(_)));

    // the project insert that preceded the failure is gone too
    assert!(ProjectResolver::find_by_name(&pool.conn, "ghost").unwrap().is_none());
    assert_eq!(count(&pool, "project"), 0);
    assert_eq!(count(&pool, "pomodoro"), 0);

    // and the connection is usable again once the cause is removed
    pool.conn.execute_batch("DROP TRIGGER refuse_pomodoro;").unwrap();
    PomodoroRecorder::record_at(
        &mut pool,
        &gate(),
        Some(SECRET),
        &RecordRequest::new(1500, "ghost"),
        NOW,
    )
    .unwrap();
    assert_eq!(count(&pool, "project"), 1);
}

#[test]
fn concurrent_first_use_creates_a_single_project() {
    let (pool, db_path) = open_test_pool("rec_concurrent");
    drop(pool);

    let names = ["Team Sync", "team sync", "TEAM SYNC", "team_sync"];
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = db_path.clone();
            let raw = names[i % names.len()].to_string();
            thread::spawn(move || {
                let mut pool = DbPool::new(&path).expect("open db");
                let req = RecordRequest::new(300, &raw).starting_at(NOW + i as i64);
                PomodoroRecorder::record_at(&mut pool, &gate(), Some(SECRET), &req, NOW)
                    .map(|p| p.project_id)
            })
        })
        .collect();

    let ids: Vec<i64> = handles
        .into_iter()
        .map(|h| h.join().expect("thread").expect("record"))
        .collect();

    assert!(ids.windows(2).all(|w| w[0] == w[1]));

    let pool = DbPool::new(&db_path).unwrap();
    assert_eq!(count(&pool, "project"), 1);
    assert_eq!(count(&pool, "pomodoro"), 8);
}
