//! End-to-end flow against an on-disk database: register users, build the
//! friend graph, log workouts, track goals, and verify everything survives a
//! close-and-reopen cycle.

use chrono::NaiveDate;
use fitlog::workouts::types::ExerciseInput;
use fitlog::{Database, FriendGraph, GoalTracker, UserDirectory, WeeklyLeaderboard, WorkoutLog};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn exercises() -> Vec<ExerciseInput> {
    vec![
        ExerciseInput {
            name: "Squats".to_string(),
            reps: 8,
            sets: 5,
            weight_kg: 80.0,
        },
        ExerciseInput {
            name: "Pushups".to_string(),
            reps: 10,
            sets: 3,
            weight_kg: 0.0,
        },
    ]
}

#[test]
fn test_full_flow_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fitlog.db");

    let alice;
    let bob;
    let goal_id;
    {
        let mut db = Database::open(&db_path).unwrap();
        let directory = UserDirectory::new(db.connection());

        alice = directory.register("Alice", "alice@example.com", 62.5).unwrap();
        bob = directory.register("Bob", "bob@example.com", 80.0).unwrap();

        FriendGraph::new(&mut db)
            .add_friend(alice, "bob@example.com")
            .unwrap();

        let mut log = WorkoutLog::new(&mut db);
        log.log_workout(alice, date("2026-08-04"), 45, &exercises()).unwrap();
        log.log_workout(bob, date("2026-08-05"), 30, &exercises()).unwrap();

        goal_id = GoalTracker::new(db.connection())
            .set_goal(alice, "Squat 100 kg", 100.0)
            .unwrap();
    }

    // Reopen: all state must be durable
    let mut db = Database::open(&db_path).unwrap();

    let user = UserDirectory::new(db.connection())
        .find_by_email("alice@example.com")
        .unwrap()
        .expect("user lost on reopen");
    assert_eq!(user.id, alice);

    let friends = FriendGraph::new(&mut db).list_friends(alice).unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].id, bob);

    let history = WorkoutLog::new(&mut db).list_workouts(alice).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].duration_minutes, 45);

    let tracker = GoalTracker::new(db.connection());
    tracker.complete_goal(alice, goal_id).unwrap();
    let goals = tracker.list_goals(alice).unwrap();
    assert_eq!(goals.len(), 1);
    assert!(goals[0].completed);

    let board = WeeklyLeaderboard::new(db.connection())
        .weekly_totals_on(alice, date("2026-08-05"))
        .unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].name, "Alice");
    assert_eq!(board[0].total_minutes, 45);
    assert_eq!(board[1].name, "Bob");
    assert_eq!(board[1].total_minutes, 30);
}

#[test]
fn test_schema_ensure_is_idempotent_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fitlog.db");

    // Opening runs the schema setup each time; neither data nor schema may
    // be disturbed by a second run
    {
        let db = Database::open(&db_path).unwrap();
        UserDirectory::new(db.connection())
            .register("Alice", "alice@example.com", 62.5)
            .unwrap();
    }
    let db = Database::open(&db_path).unwrap();

    let tables: Vec<String> = db
        .connection()
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name = 'users'")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .filter_map(|r| r.ok())
        .collect();
    assert_eq!(tables.len(), 1);

    assert!(UserDirectory::new(db.connection())
        .find_by_email("alice@example.com")
        .unwrap()
        .is_some());
}

#[test]
fn test_friendship_rows_cascade_with_user_deletion() {
    // Not an exposed operation, but the schema's referential integrity
    // should hold if an operator deletes a user by hand
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fitlog.db");

    let mut db = Database::open(&db_path).unwrap();
    let directory = UserDirectory::new(db.connection());
    let alice = directory.register("Alice", "alice@example.com", 62.5).unwrap();
    directory.register("Bob", "bob@example.com", 80.0).unwrap();

    FriendGraph::new(&mut db)
        .add_friend(alice, "bob@example.com")
        .unwrap();

    db.connection()
        .execute("DELETE FROM users WHERE email = 'bob@example.com'", [])
        .unwrap();

    let remaining: i64 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM friendships", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}
