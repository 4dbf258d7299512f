/// Per-day completion toggling and date queries

use chrono::NaiveDate;

use crate::domain::{Habit, HabitId};
use crate::operations::HabitOperations;
use crate::routing;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> HabitOperations<S> {
    /// Flip completion of `habit_id` on the cursor date
    ///
    /// Returns whether the habit is completed after the call.
    pub fn toggle_habit(&mut self, habit_id: HabitId) -> bool {
        let date = self.selected_date;
        let completed = self.store.update_completions(|index| index.toggle(date, habit_id));
        tracing::debug!(
            "Habit {} {} on {}",
            habit_id,
            if completed { "completed" } else { "unchecked" },
            date
        );
        completed
    }

    /// Ids completed on the cursor date
    pub fn completed_habits(&self) -> &[HabitId] {
        self.store.completions().completed_on(self.selected_date)
    }

    /// Whether the cursor date is after today (local time)
    pub fn is_future_day(&self) -> bool {
        self.is_future_day_relative_to(routing::today())
    }

    pub fn is_future_day_relative_to(&self, today: NaiveDate) -> bool {
        self.selected_date > today
    }

    pub fn is_habit_stopped_on_date(&self, habit: &Habit, date: NaiveDate) -> bool {
        habit.is_stopped_on(date)
    }
}
