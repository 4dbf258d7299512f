/// Persistence across restarts with the SQLite store
use daily_habits::*;
use tempfile::NamedTempFile;

fn date(s: &str) -> chrono::NaiveDate {
    parse_date(s).expect("valid test date")
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[test]
    fn test_state_survives_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let config = AppConfig::default();

        let (exercise, reading) = {
            let store = SqliteStore::new(&db_path).expect("Failed to open storage");
            let mut engine = HabitOperations::new(HabitStore::load(store), date("2024-01-01"), &config);
            let exercise = engine.add_habit("Exercise").unwrap();
            let reading = engine.add_habit("Reading").unwrap();
            engine.toggle_habit(exercise);
            engine.set_selected_date(date("2024-01-03"));
            engine.stop_habit(reading);
            (exercise, reading)
        };

        let store = SqliteStore::new(&db_path).expect("Failed to reopen storage");
        let engine = HabitOperations::new(HabitStore::load(store), date("2024-01-01"), &config);

        assert_eq!(engine.habits().len(), 2);
        assert_eq!(engine.completed_habits(), &[exercise]);
        let habit = engine.store().habit(reading).unwrap();
        assert_eq!(habit.stop_date, Some(date("2024-01-03")));
        assert_eq!(habit.resume_date, None);
    }

    #[test]
    fn test_delete_cascade_is_persisted() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let config = AppConfig::default();

        {
            let store = SqliteStore::new(&db_path).unwrap();
            let mut engine = HabitOperations::new(HabitStore::load(store), date("2024-01-01"), &config);
            let id = engine.add_habit("Exercise").unwrap();
            engine.toggle_habit(id);
            engine.delete_habit(id);
        }

        let store = SqliteStore::new(&db_path).unwrap();
        assert_eq!(store.get(HABITS_KEY).unwrap(), Some("[]".to_string()));
        assert_eq!(
            store.get(COMPLETIONS_KEY).unwrap(),
            Some(r#"{"2024-01-01":[]}"#.to_string())
        );
    }

    #[test]
    fn test_corrupt_rows_load_empty() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let store = SqliteStore::new(temp_file.path()).unwrap();
        store.set(HABITS_KEY, "[{\"id\": \"oops\"}]").unwrap();
        store.set(COMPLETIONS_KEY, r#"{"2024-01-01":[1]}"#).unwrap();

        let loaded = HabitStore::load(store);
        assert!(loaded.habits().is_empty());
        assert_eq!(loaded.completions().completed_on(date("2024-01-01")), &[HabitId(1)]);
    }

    #[test]
    fn test_reads_blobs_written_by_earlier_versions() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .set(
                HABITS_KEY,
                r#"[{"id":1704067200000,"name":"Exercise","createdDate":"2024-01-01","stopDate":"2024-01-05","resumeDate":null}]"#,
            )
            .unwrap();

        let engine = HabitOperations::new(HabitStore::load(store), date("2024-01-06"), &AppConfig::default());
        let habit = &engine.habits()[0];
        assert!(engine.is_habit_stopped_on_date(habit, date("2024-01-06")));
        assert!(!engine.is_habit_stopped_on_date(habit, date("2024-01-04")));
    }

    #[test]
    fn test_tracker_opens_on_route_date() {
        let tracker = HabitTracker::open(
            Box::new(MemoryStore::new()),
            Some("/day/2024-02-29"),
            &AppConfig::default(),
        );
        assert_eq!(tracker.operations().selected_date(), date("2024-02-29"));

        let tracker = HabitTracker::open(Box::new(MemoryStore::new()), Some("not a date"), &AppConfig::default());
        assert_eq!(tracker.operations().selected_date(), today());
    }

    #[test]
    fn test_shell_session_over_sqlite() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();
        let config = AppConfig::default();

        {
            let store = SqliteStore::new(&db_path).unwrap();
            let engine = HabitOperations::new(HabitStore::load(store), date("2024-01-01"), &config);
            let mut session = Session::new(engine, &config);
            let input: &[u8] = b"add Exercise\nadd Stretch\nquit\n";
            let mut output = Vec::new();
            tokio_test::block_on(session.run(input, &mut output)).unwrap();
        }

        let engine = HabitOperations::new(
            HabitStore::load(SqliteStore::new(&db_path).unwrap()),
            date("2024-01-01"),
            &config,
        );
        let names: Vec<&str> = engine.habits().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Exercise", "Stretch"]);
    }
}
