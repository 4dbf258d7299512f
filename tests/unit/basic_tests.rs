/// Engine behaviour through the public API, backed by the in-memory store
use daily_habits::*;
use chrono::NaiveDate;

fn date(s: &str) -> NaiveDate {
    parse_date(s).expect("valid test date")
}

fn engine_on(day: &str) -> HabitOperations<MemoryStore> {
    HabitOperations::new(HabitStore::load(MemoryStore::new()), date(day), &AppConfig::default())
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_toggle_scenario() {
        let mut engine = engine_on("2024-01-01");
        let id = engine.add_habit("exercise").unwrap();

        assert!(engine.completed_habits().is_empty());
        engine.toggle_habit(id);
        assert_eq!(engine.completed_habits(), &[id]);
        engine.toggle_habit(id);
        assert!(engine.completed_habits().is_empty());
    }

    #[test]
    fn test_duplicate_name_scenario() {
        let mut engine = engine_on("2024-01-01");
        engine.add_habit("Exercise").unwrap();

        assert_eq!(
            engine.validation_message("exercise", None),
            "A habit with this name already exists"
        );
        assert_eq!(engine.add_habit("exercise"), Err(ValidationError::DuplicateName));
        assert_eq!(engine.error(), "A habit with this name already exists");
    }

    #[test]
    fn test_empty_name_iff_blank() {
        let engine = engine_on("2024-01-01");
        for (name, blank) in [("", true), (" ", true), ("\t", true), (" a ", false), ("x", false)] {
            let is_empty_error = engine.validate_habit_name(name, None) == Err(ValidationError::EmptyName);
            assert_eq!(is_empty_error, blank, "{:?}", name);
        }
    }

    #[test]
    fn test_same_date_names_stay_unique() {
        let mut engine = engine_on("2024-01-01");
        let a = engine.add_habit("Exercise").unwrap();
        let b = engine.add_habit("Reading").unwrap();
        let _ = engine.add_habit(" EXERCISE ");
        let _ = engine.edit_habit(b, "exercise");
        assert!(engine.edit_habit(a, "exercise").is_ok());

        let mut names: Vec<String> = engine
            .habits()
            .iter()
            .filter(|h| h.created_date == date("2024-01-01"))
            .map(|h| h.name.trim().to_lowercase())
            .collect();
        let before = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), before);
    }

    #[test]
    fn test_stop_resume_scenario() {
        let mut engine = engine_on("2024-01-01");
        let id = engine.add_habit("exercise").unwrap();

        engine.set_selected_date(date("2024-01-10"));
        engine.stop_habit(id);
        engine.set_selected_date(date("2024-01-20"));
        engine.resume_habit(id);

        let habit = engine.store().habit(id).unwrap().clone();
        let mut day = date("2024-01-01");
        while day <= date("2024-01-31") {
            let expected = day >= date("2024-01-10") && day < date("2024-01-20");
            assert_eq!(engine.is_habit_stopped_on_date(&habit, day), expected, "{}", day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_two_habits_set_semantics() {
        let mut engine = engine_on("2024-01-01");
        let a = engine.add_habit("Exercise").unwrap();
        let b = engine.add_habit("Reading").unwrap();
        engine.toggle_habit(b);
        engine.toggle_habit(a);

        let mut completed = engine.completed_habits().to_vec();
        completed.sort();
        assert_eq!(completed, vec![a, b]);
    }

    #[test]
    fn test_delete_removes_every_completion() {
        let mut engine = engine_on("2024-01-01");
        let id = engine.add_habit("exercise").unwrap();
        for _ in 0..5 {
            engine.toggle_habit(id);
            engine.next_day();
            engine.toggle_habit(id);
        }

        engine.delete_habit(id);

        let completions = engine.store().completions();
        assert!(completions.dates().all(|d| !completions.completed_on(d).contains(&id)));
    }

    #[test]
    fn test_notices_clear_after_configured_delay() {
        let config = AppConfig {
            notice_delay_ms: 50,
            ..AppConfig::default()
        };
        let mut engine = HabitOperations::new(HabitStore::load(MemoryStore::new()), date("2024-01-01"), &config);
        engine.add_habit("exercise").unwrap();
        assert_eq!(engine.success(), ADDED_MESSAGE);

        let deadline = engine.next_notice_deadline().unwrap();
        assert!(engine.expire_notices(deadline));
        assert_eq!(engine.success(), "");
    }

    #[test]
    fn test_write_failure_does_not_block_operations() {
        let mut engine = HabitOperations::new(
            HabitStore::load(MemoryStore::with_quota(8)),
            date("2024-01-01"),
            &AppConfig::default(),
        );

        let id = engine.add_habit("exercise").unwrap();
        engine.toggle_habit(id);

        assert_eq!(engine.completed_habits(), &[id]);
        assert_eq!(engine.store().backend().value(HABITS_KEY), None);
    }
}
