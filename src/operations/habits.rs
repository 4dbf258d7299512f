/// Habit CRUD and stop/resume lifecycle
///
/// Name uniqueness is scoped to the cursor date: two habits created on
/// different days may share a name, two created on the same day may not.

use tracing::{debug, info};

use crate::domain::{Habit, HabitId, ValidationError};
use crate::operations::{
    HabitOperations, ADDED_MESSAGE, DELETED_MESSAGE, RESUMED_MESSAGE, STOPPED_MESSAGE,
    UPDATED_MESSAGE,
};
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> HabitOperations<S> {
    /// Whether another habit created on the cursor date already uses `name`
    ///
    /// Comparison ignores case and surrounding whitespace. The habit with id
    /// `exclude_id` is skipped so a habit can keep its own name when edited.
    pub fn is_duplicate_habit_name(&self, name: &str, exclude_id: Option<HabitId>) -> bool {
        self.store.habits().iter().any(|h| {
            h.has_name(name)
                && Some(h.id) != exclude_id
                && h.created_date == self.selected_date
        })
    }

    /// Validate a candidate name, returning it trimmed
    pub fn validate_habit_name<'a>(
        &self,
        name: &'a str,
        exclude_id: Option<HabitId>,
    ) -> Result<&'a str, ValidationError> {
        let trimmed = Habit::normalize_name(name)?;
        if self.is_duplicate_habit_name(trimmed, exclude_id) {
            return Err(ValidationError::DuplicateName);
        }
        Ok(trimmed)
    }

    /// Validation result as display text, empty when the name is valid
    pub fn validation_message(&self, name: &str, exclude_id: Option<HabitId>) -> String {
        match self.validate_habit_name(name, exclude_id) {
            Ok(_) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// Create a habit on the cursor date
    ///
    /// On success the draft input is cleared and a success notice is shown.
    pub fn add_habit(&mut self, name: &str) -> Result<HabitId, ValidationError> {
        let name = match self.validate_habit_name(name, None) {
            Ok(name) => name.to_string(),
            Err(e) => return Err(self.reject(e)),
        };

        let id = HabitId::generate(self.store.highest_id(), |id| self.store.contains_id(id));
        let habit = Habit::new(id, &name, self.selected_date)?;
        self.store.push_habit(habit);

        self.draft.clear();
        self.notify_success(ADDED_MESSAGE);
        info!("Added habit '{}' ({}) on {}", name, id, self.selected_date);
        Ok(id)
    }

    /// Add a habit from the draft input; the draft is kept if rejected
    pub fn submit_draft(&mut self) -> Result<HabitId, ValidationError> {
        let draft = self.draft.clone();
        self.add_habit(&draft)
    }

    /// Rename a habit in place
    ///
    /// Validation runs first, so an invalid name is reported even if the id
    /// is unknown. A valid name for an unknown id is a silent no-op.
    pub fn edit_habit(&mut self, habit_id: HabitId, name: &str) -> Result<(), ValidationError> {
        let name = match self.validate_habit_name(name, Some(habit_id)) {
            Ok(name) => name.to_string(),
            Err(e) => return Err(self.reject(e)),
        };

        let renamed = self.store.update_habit(habit_id, |habit| {
            habit.name = name.clone();
        });
        if renamed.is_some() {
            self.notify_success(UPDATED_MESSAGE);
            info!("Renamed habit {} to '{}'", habit_id, name);
        } else {
            debug!("Edit ignored, no habit {}", habit_id);
        }
        Ok(())
    }

    /// Stop tracking from the cursor date; returns whether a habit matched
    pub fn stop_habit(&mut self, habit_id: HabitId) -> bool {
        let date = self.selected_date;
        let found = self.store.update_habit(habit_id, |habit| habit.stop(date)).is_some();
        if found {
            self.notify_success(STOPPED_MESSAGE);
            info!("Stopped habit {} from {}", habit_id, date);
        }
        found
    }

    /// Resume tracking from the cursor date; returns whether a habit matched
    pub fn resume_habit(&mut self, habit_id: HabitId) -> bool {
        let date = self.selected_date;
        let found = self.store.update_habit(habit_id, |habit| habit.resume(date)).is_some();
        if found {
            self.notify_success(RESUMED_MESSAGE);
            info!("Resumed habit {} from {}", habit_id, date);
        }
        found
    }

    /// Delete a habit and all of its completions
    pub fn delete_habit(&mut self, habit_id: HabitId) -> bool {
        match self.store.remove_habit(habit_id) {
            Some(habit) => {
                self.notify_success(DELETED_MESSAGE);
                info!("Deleted habit '{}' ({})", habit.name, habit_id);
                true
            }
            None => false,
        }
    }

    fn reject(&mut self, error: ValidationError) -> ValidationError {
        debug!("Rejected habit name: {}", error);
        self.notify_error(error.to_string());
        error
    }
}
