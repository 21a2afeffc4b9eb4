//! End-to-end menu sessions against an in-memory store.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use student_records::{Shell, Student, StudentStore};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Counts events at `WARN` or above.
struct LoudEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for LoudEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn run_session(store: &StudentStore, input: &str) -> String {
    let mut shell = Shell::new(store, Cursor::new(input.to_owned()), Vec::new());
    shell.run().expect("session should finish");
    String::from_utf8(shell.into_output()).expect("output is utf-8")
}

#[test]
fn add_update_search_delete_scenario() {
    let store = StudentStore::in_memory().unwrap();

    let output = run_session(&store, "1\nAlice\n20\n1\n5\n6\n");
    assert!(output.contains("Student added successfully."));
    assert_eq!(output.matches("Name: Alice // Age: 20 // ID: 1").count(), 1);
    assert_eq!(store.list_all().unwrap(), vec![Student::new("Alice", 20, 1)]);

    let output = run_session(&store, "3 Alice Alicia 21 1\n4 1 Alicia\n4 1 Alice\n6\n");
    assert!(output.contains("Student updated successfully."));
    assert!(output.contains("Student found: Alicia // Age: 21 // ID: 1"));
    assert!(output.contains("Student not found."));

    let output = run_session(&store, "2 Alicia\n5\n6\n");
    assert!(output.contains("Student deleted successfully."));
    assert!(output.contains("No students found."));
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn search_by_id_prints_inserted_fields() {
    let store = StudentStore::in_memory().unwrap();
    store.add(&Student::new("Dana", 25, 42)).unwrap();

    let output = run_session(&store, "4\n2\n42\n4\n2\n7\n6\n");
    assert!(output.contains("Student found: Dana // Age: 25 // ID: 42"));
    assert!(output.contains("Student not found."));
}

#[test]
fn missing_names_report_not_found_and_change_nothing() {
    let store = StudentStore::in_memory().unwrap();
    store.add(&Student::new("Bob", 30, 2)).unwrap();

    let output = run_session(&store, "2 Ghost\n3 Ghost Casper 1 9\n6\n");
    assert_eq!(output.matches("Student not found.").count(), 2);
    assert_eq!(store.list_all().unwrap(), vec![Student::new("Bob", 30, 2)]);
}

#[test]
fn update_keeping_the_same_name_still_finds_it() {
    let store = StudentStore::in_memory().unwrap();
    store.add(&Student::new("Alice", 20, 1)).unwrap();

    run_session(&store, "3 Alice Alice 22 5\n6\n");
    assert_eq!(
        store.find_by_name("Alice").unwrap(),
        Some(Student::new("Alice", 22, 5))
    );
}

#[test]
fn storage_errors_are_reported_and_the_loop_continues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.sqlite");
    let store = StudentStore::open(&path).unwrap();

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute("DROP TABLE students", []).unwrap();
    }

    let output = run_session(&store, "1 Alice 20 1\n5\n6\n");
    assert!(output.contains("Error adding student: "));
    assert!(output.contains("Error fetching students: "));
    assert!(output.ends_with("Exiting...\n"));
}

#[test]
fn messages_shown_to_the_user_are_not_logged_again_at_warn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.sqlite");
    let store = StudentStore::open(&path).unwrap();
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute("DROP TABLE students", []).unwrap();
    }

    let loud = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(LoudEvents(Arc::clone(&loud)));
    let output = tracing::subscriber::with_default(subscriber, || {
        run_session(&store, "9\n4 3\n1 Alice 20 1\n6\n")
    });

    assert!(output.contains("Invalid choice. Please try again."));
    assert!(output.contains("Invalid search option. Please try again."));
    assert!(output.contains("Error adding student: "));
    assert_eq!(loud.load(Ordering::SeqCst), 0);
}
