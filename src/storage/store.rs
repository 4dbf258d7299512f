/// Habit store: the two persisted collections
///
/// Loads the habit list and the completion index once at construction and
/// writes the full collection back through the adapter after every change.
/// Neither loading nor saving ever fails from the caller's point of view:
/// bad stored data loads as empty and failed writes are logged.

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{CompletionIndex, Habit, HabitId};
use crate::storage::{KeyValueStore, StorageError, COMPLETIONS_KEY, HABITS_KEY};

pub struct HabitStore<S: KeyValueStore> {
    backend: S,
    habits: Vec<Habit>,
    completions: CompletionIndex,
}

impl<S: KeyValueStore> HabitStore<S> {
    /// Load both collections from `backend`
    ///
    /// Each blob is decoded independently; one corrupt blob does not affect
    /// the other.
    pub fn load(backend: S) -> Self {
        let habits: Vec<Habit> = load_blob(&backend, HABITS_KEY);
        let completions: CompletionIndex = load_blob(&backend, COMPLETIONS_KEY);

        debug!(
            "Loaded {} habits and {} completion dates",
            habits.len(),
            completions.dates().count()
        );

        Self {
            backend,
            habits,
            completions,
        }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn completions(&self) -> &CompletionIndex {
        &self.completions
    }

    pub fn habit(&self, habit_id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Give the adapter back, e.g. to reload a fresh store from it
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Highest id in use by either collection
    pub fn highest_id(&self) -> Option<HabitId> {
        let from_habits = self.habits.iter().map(|h| h.id).max();
        from_habits.max(self.completions.highest_id())
    }

    /// Whether either collection refers to `habit_id`
    pub fn contains_id(&self, habit_id: HabitId) -> bool {
        self.habit(habit_id).is_some() || self.completions.references(habit_id)
    }

    /// Append a habit and persist the list
    pub fn push_habit(&mut self, habit: Habit) {
        self.habits.push(habit);
        self.persist_habits();
    }

    /// Apply `f` to the habit with `habit_id` and persist the list
    ///
    /// Returns `None`, without writing anything, when no habit has that id.
    pub fn update_habit<R>(&mut self, habit_id: HabitId, f: impl FnOnce(&mut Habit) -> R) -> Option<R> {
        let habit = self.habits.iter_mut().find(|h| h.id == habit_id)?;
        let result = f(habit);
        self.persist_habits();
        Some(result)
    }

    /// Remove the habit with `habit_id` and every completion that names it
    ///
    /// Completions are pruned even when the habit list has no such id.
    /// Returns the removed habit, if there was one.
    pub fn remove_habit(&mut self, habit_id: HabitId) -> Option<Habit> {
        let removed = self
            .habits
            .iter()
            .position(|h| h.id == habit_id)
            .map(|position| self.habits.remove(position));
        if removed.is_some() {
            self.persist_habits();
        }

        if self.completions.remove_habit(habit_id) {
            self.persist_completions();
        }

        removed
    }

    /// Apply `f` to the completion index and persist it
    pub fn update_completions<R>(&mut self, f: impl FnOnce(&mut CompletionIndex) -> R) -> R {
        let result = f(&mut self.completions);
        self.persist_completions();
        result
    }

    fn persist_habits(&self) {
        if let Err(e) = save_blob(&self.backend, HABITS_KEY, &self.habits) {
            warn!("Failed to save habits: {}", e);
        }
    }

    fn persist_completions(&self) {
        if let Err(e) = save_blob(&self.backend, COMPLETIONS_KEY, &self.completions) {
            warn!("Failed to save completed habits: {}", e);
        }
    }
}

fn load_blob<S, T>(backend: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: serde::de::DeserializeOwned + Default,
{
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!("Failed to read '{}' from storage: {}", key, e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse '{}' from storage, starting empty: {}", key, e);
            T::default()
        }
    }
}

fn save_blob<S, T>(backend: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    backend.set(key, &json)
}
