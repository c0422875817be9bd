mod common;
use common::{NOW, SECRET, count, gate, open_test_pool};

use rpomodoro::core::aggregate::Aggregator;
use rpomodoro::core::recorder::{PomodoroRecorder, RecordRequest};
use rpomodoro::core::resolver::ProjectResolver;
use rpomodoro::core::work_index::WorkIndex;
use rpomodoro::db::pool::DbPool;
use rpomodoro::db::queries::{insert_pomodoro, insert_project_if_absent};
use rpomodoro::models::project::Project;
use rpomodoro::models::window::TimeWindow;

const T: i64 = 1_699_000_000;

fn record(pool: &mut DbPool, name: &str, duration: i64, start: i64) {
    let req = RecordRequest::new(duration, name).starting_at(start);
    PomodoroRecorder::record_at(pool, &gate(), Some(SECRET), &req, NOW).unwrap();
}

fn project(pool: &DbPool, name: &str) -> Project {
    ProjectResolver::find_by_name(&pool.conn, name)
        .unwrap()
        .expect("project exists")
}

/// alpha: two 30 minute pomodoros one hour apart; beta: one later entry
fn seeded(name: &str) -> DbPool {
    let (mut pool, _) = open_test_pool(name);
    record(&mut pool, "alpha", 1800, T);
    record(&mut pool, "alpha", 1800, T + 3600);
    record(&mut pool, "beta", 900, T + 5000);
    pool
}

#[test]
fn unbounded_window_sums_everything() {
    let pool = seeded("agg_unbounded");

    let s = Aggregator::aggregate(&pool.conn, &project(&pool, "alpha"), &TimeWindow::unbounded())
        .unwrap();

    assert_eq!(s.n_pomodoros, 2);
    assert_eq!(s.total_duration, 3600);
    assert_eq!(s.first_start, Some(T));
    assert_eq!(s.last_start, Some(T + 3600));
}

#[test]
fn window_selects_by_start_only() {
    let pool = seeded("agg_window");
    let alpha = project(&pool, "alpha");

    // first pomodoro starts one second before the window and still overlaps it
    let s = Aggregator::aggregate(
        &pool.conn,
        &alpha,
        &TimeWindow::new(Some(T + 1), Some(T + 3601)),
    )
    .unwrap();
    assert_eq!(s.n_pomodoros, 1);
    assert_eq!(s.total_duration, 1800);
    assert_eq!(s.pomodoros[0].start, T + 3600);
}

#[test]
fn window_bounds_are_inclusive() {
    let pool = seeded("agg_inclusive");
    let alpha = project(&pool, "alpha");

    let s = Aggregator::aggregate(&pool.conn, &alpha, &TimeWindow::new(Some(T), Some(T)))
        .unwrap();
    assert_eq!(s.n_pomodoros, 1);

    let s = Aggregator::aggregate(&pool.conn, &alpha, &TimeWindow::new(None, Some(T + 3600)))
        .unwrap();
    assert_eq!(s.n_pomodoros, 2);

    let s = Aggregator::aggregate(&pool.conn, &alpha, &TimeWindow::new(Some(T + 3600), None))
        .unwrap();
    assert_eq!(s.n_pomodoros, 1);
}

#[test]
fn empty_window_gives_zero_totals() {
    let pool = seeded("agg_empty");

    let s = Aggregator::aggregate(
        &pool.conn,
        &project(&pool, "alpha"),
        &TimeWindow::new(Some(T + 100_000), Some(T + 200_000)),
    )
    .unwrap();

    assert_eq!(s.n_pomodoros, 0);
    assert_eq!(s.total_duration, 0);
    assert!(s.pomodoros.is_empty());
    assert_eq!(s.first_start, None);
    assert_eq!(s.last_start, None);
}

#[test]
fn pomodoros_come_back_most_recent_first() {
    let (mut pool, _) = open_test_pool("agg_order");
    for start in [T + 20, T, T + 40, T + 10] {
        record(&mut pool, "gamma", 60, start);
    }

    let s = Aggregator::aggregate(&pool.conn, &project(&pool, "gamma"), &TimeWindow::unbounded())
        .unwrap();
    let starts: Vec<i64> = s.pomodoros.iter().map(|p| p.start).collect();

    assert_eq!(starts, vec![T + 40, T + 20, T + 10, T]);
}

#[test]
fn equal_starts_are_ordered_by_id() {
    let (mut pool, _) = open_test_pool("agg_ties");
    for _ in 0..3 {
        record(&mut pool, "tie", 60, T);
    }

    let s = Aggregator::aggregate(&pool.conn, &project(&pool, "tie"), &TimeWindow::unbounded())
        .unwrap();
    let ids: Vec<i64> = s.pomodoros.iter().map(|p| p.id).collect();

    let mut expected = ids.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(ids, expected);
}

#[test]
fn lookup_of_unknown_project_creates_nothing() {
    let pool = seeded("agg_unknown");
    let before = count(&pool, "project");

    assert!(
        ProjectResolver::find_by_name(&pool.conn, "Nope")
            .unwrap()
            .is_none()
    );
    assert_eq!(count(&pool, "project"), before);
}

#[test]
fn active_projects_in_narrow_window() {
    let pool = seeded("agg_active_narrow");

    let active =
        WorkIndex::find_active_projects(&pool.conn, &TimeWindow::new(Some(T), Some(T + 1)))
            .unwrap();

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "alpha");
    assert_eq!(active[0].n_pomodoros, 1);
    assert_eq!(active[0].total_duration, 1800);
}

#[test]
fn active_projects_are_ordered_by_last_touched() {
    let pool = seeded("agg_active_order");

    let active = WorkIndex::find_active_projects(&pool.conn, &TimeWindow::unbounded()).unwrap();
    let names: Vec<&str> = active.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["beta", "alpha"]);

    // same data, same sequence
    let again = WorkIndex::find_active_projects(&pool.conn, &TimeWindow::unbounded()).unwrap();
    let ids: Vec<i64> = active.iter().map(|s| s.id).collect();
    let ids_again: Vec<i64> = again.iter().map(|s| s.id).collect();
    assert_eq!(ids, ids_again);
}

#[test]
fn empty_window_has_no_active_projects() {
    let pool = seeded("agg_active_empty");

    let active = WorkIndex::find_active_projects(
        &pool.conn,
        &TimeWindow::new(Some(T - 10_000), Some(T - 1)),
    )
    .unwrap();

    assert!(active.is_empty());
}

#[test]
fn all_projects_include_idle_ones_with_zero_totals() {
    let pool = seeded("agg_all_projects");

    let all = WorkIndex::all_projects(&pool.conn, &TimeWindow::new(Some(T), Some(T + 1))).unwrap();

    assert_eq!(all.len(), 2);
    let beta = all.iter().find(|s| s.name == "beta").unwrap();
    assert_eq!(beta.n_pomodoros, 0);
    assert_eq!(beta.total_duration, 0);
    assert_eq!(beta.last_touched, T + 5000);
}

#[test]
fn liveness_reports_data_whatever_the_key() {
    let pool = seeded("agg_liveness");
    let g = gate();

    let ok = g.liveness(&pool.conn, Some(SECRET)).unwrap();
    assert!(ok.authorized);
    assert!(ok.any_pomodoros_exist);

    let bad = g.liveness(&pool.conn, Some("wrong")).unwrap();
    assert!(!bad.authorized);
    assert!(bad.any_pomodoros_exist);

    let (empty, _) = open_test_pool("agg_liveness_empty");
    let none = g.liveness(&empty.conn, None).unwrap();
    assert!(!none.authorized);
    assert!(!none.any_pomodoros_exist);
}

#[test]
fn inverted_window_is_rejected() {
    assert!(TimeWindow::checked(Some(T + 1), Some(T)).is_err());
    assert!(TimeWindow::checked(Some(T), Some(T)).is_ok());
    assert!(TimeWindow::checked(None, Some(T)).is_ok());
}

#[test]
fn oversized_stored_durations_saturate_instead_of_overflowing() {
    let (pool, _) = open_test_pool("agg_saturating");

    // rows written by an older build, before durations were capped
    let (huge, _) = insert_project_if_absent(&pool.conn, "huge").unwrap();
    let big = i64::MAX / 2 + 1;
    insert_pomodoro(&pool.conn, huge.id, big, T, false).unwrap();
    insert_pomodoro(&pool.conn, huge.id, big, T + 1, false).unwrap();

    let s = Aggregator::aggregate(&pool.conn, &huge, &TimeWindow::unbounded()).unwrap();

    assert_eq!(s.n_pomodoros, 2);
    assert_eq!(s.total_duration, i64::MAX);
    assert_eq!(s.pomodoros[0].end(), i64::MAX);
}
