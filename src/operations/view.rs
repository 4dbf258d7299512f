/// Read model for one day
///
/// Packs what a habit list needs to render the cursor date: which habits
/// exist on that day, whether each is done, stopped or locked, and the
/// "Completed: x / y | Left: z" counts.

use chrono::NaiveDate;

use crate::domain::Habit;
use crate::operations::HabitOperations;
use crate::routing;
use crate::storage::KeyValueStore;

/// One habit as shown on a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitRow<'a> {
    pub habit: &'a Habit,
    pub completed: bool,
    pub stopped: bool,
    /// Completion cannot be changed (future day or stopped habit)
    pub disabled: bool,
}

/// Completion counts over the habits still being tracked that day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DaySummary {
    pub completed: usize,
    pub total: usize,
}

impl DaySummary {
    pub fn left(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub is_future: bool,
    pub rows: Vec<HabitRow<'a>>,
    pub summary: DaySummary,
}

impl<S: KeyValueStore> HabitOperations<S> {
    /// View of the cursor date, relative to today's local date
    pub fn day_view(&self) -> DayView<'_> {
        self.day_view_relative_to(routing::today())
    }

    /// View of the cursor date with an explicit "today"
    ///
    /// Habits created after the cursor date are not listed.
    pub fn day_view_relative_to(&self, today: NaiveDate) -> DayView<'_> {
        let date = self.selected_date;
        let is_future = self.is_future_day_relative_to(today);
        let completions = self.store.completions();

        let rows: Vec<HabitRow<'_>> = self
            .store
            .habits()
            .iter()
            .filter(|habit| habit.is_trackable_on(date))
            .map(|habit| {
                let stopped = habit.is_stopped_on(date);
                HabitRow {
                    habit,
                    completed: completions.is_completed(date, habit.id),
                    stopped,
                    disabled: is_future || stopped,
                }
            })
            .collect();

        let tracked = rows.iter().filter(|row| !row.stopped);
        let summary = DaySummary {
            completed: tracked.clone().filter(|row| row.completed).count(),
            total: tracked.count(),
        };

        DayView {
            date,
            is_future,
            rows,
            summary,
        }
    }
}
