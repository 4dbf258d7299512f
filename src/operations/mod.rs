/// Habit operations over the store and the selected date
///
/// `HabitOperations` owns the `HabitStore` plus a date cursor. Every read and
/// write implicitly targets the cursor date: new habits are created on it,
/// completions are toggled for it, stop/resume dates are taken from it.
///
/// Validation failures are reported twice: as an `Err` to the caller and as
/// a transient error notice for display. Operations on unknown habit ids do
/// nothing and report nothing.

pub mod habits;
pub mod completion;
pub mod notice;
pub mod view;

pub use notice::*;
pub use view::*;

use std::time::Instant;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::domain::Habit;
use crate::routing;
use crate::storage::{HabitStore, KeyValueStore};

pub const ADDED_MESSAGE: &str = "Habit added successfully";
pub const UPDATED_MESSAGE: &str = "Habit updated successfully";
pub const STOPPED_MESSAGE: &str = "Habit stopped successfully";
pub const RESUMED_MESSAGE: &str = "Habit resumed successfully";
pub const DELETED_MESSAGE: &str = "Habit deleted successfully";

pub struct HabitOperations<S: KeyValueStore> {
    store: HabitStore<S>,
    selected_date: NaiveDate,
    min_date: NaiveDate,
    draft: String,
    notices: Notices,
}

impl<S: KeyValueStore> HabitOperations<S> {
    /// Wrap a loaded store with the cursor at `selected_date`
    pub fn new(store: HabitStore<S>, selected_date: NaiveDate, config: &AppConfig) -> Self {
        Self {
            store,
            selected_date: selected_date.max(config.min_date),
            min_date: config.min_date,
            draft: String::new(),
            notices: Notices::new(config.notice_delay()),
        }
    }

    pub fn store(&self) -> &HabitStore<S> {
        &self.store
    }

    pub fn into_store(self) -> HabitStore<S> {
        self.store
    }

    pub fn habits(&self) -> &[Habit] {
        self.store.habits()
    }

    // Date cursor

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// Move the cursor, never before the configured minimum date
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date.max(self.min_date);
        tracing::debug!("Selected date is now {}", self.selected_date);
    }

    pub fn next_day(&mut self) {
        if let Some(next) = self.selected_date.succ_opt() {
            self.set_selected_date(next);
        }
    }

    pub fn previous_day(&mut self) {
        if let Some(previous) = self.selected_date.pred_opt() {
            self.set_selected_date(previous);
        }
    }

    pub fn go_to_today(&mut self) {
        self.set_selected_date(routing::today());
    }

    // Draft input

    /// Pending text of the "new habit" input
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    // Notices

    /// Current error notice, empty when none is showing
    pub fn error(&self) -> &str {
        self.notices.error()
    }

    /// Current success notice, empty when none is showing
    pub fn success(&self) -> &str {
        self.notices.success()
    }

    pub fn expire_notices(&mut self, now: Instant) -> bool {
        self.notices.expire(now)
    }

    pub fn next_notice_deadline(&self) -> Option<Instant> {
        self.notices.next_deadline()
    }

    fn notify_error(&mut self, text: impl Into<String>) {
        self.notices.set_error(text, Instant::now());
    }

    fn notify_success(&mut self, text: impl Into<String>) {
        self.notices.set_success(text, Instant::now());
    }
}
