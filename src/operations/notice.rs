/// Transient notices
///
/// Error and success messages that clear themselves a fixed delay after they
/// are set. Each message carries its own deadline; setting a new message
/// replaces the deadline, so an expiry scheduled for an older message can
/// never wipe a newer one.

use std::time::{Duration, Instant};

/// A short-lived status message
#[derive(Debug, Default)]
pub struct TransientMessage {
    text: String,
    expires_at: Option<Instant>,
}

impl TransientMessage {
    /// Current text, empty when nothing is showing
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    pub fn set(&mut self, text: impl Into<String>, expires_at: Instant) {
        self.text = text.into();
        self.expires_at = Some(expires_at);
    }

    /// Clear the message if its deadline is at or before `now`
    ///
    /// Returns true when something was cleared. Clearing an empty message is
    /// a no-op.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if deadline <= now => {
                self.text.clear();
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}

/// The error/success pair shown to the user
#[derive(Debug)]
pub struct Notices {
    error: TransientMessage,
    success: TransientMessage,
    delay: Duration,
}

impl Notices {
    pub fn new(delay: Duration) -> Self {
        Self {
            error: TransientMessage::default(),
            success: TransientMessage::default(),
            delay,
        }
    }

    pub fn error(&self) -> &str {
        self.error.text()
    }

    pub fn success(&self) -> &str {
        self.success.text()
    }

    pub fn set_error(&mut self, text: impl Into<String>, now: Instant) {
        self.error.set(text, now + self.delay);
    }

    pub fn set_success(&mut self, text: impl Into<String>, now: Instant) {
        self.success.set(text, now + self.delay);
    }

    /// Clear every message whose deadline has passed
    pub fn expire(&mut self, now: Instant) -> bool {
        let error_cleared = self.error.expire(now);
        let success_cleared = self.success.expire(now);
        error_cleared || success_cleared
    }

    /// Earliest pending deadline, if any message is showing
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.error.expires_at(), self.success.expires_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn test_message_clears_after_delay() {
        let start = Instant::now();
        let mut notices = Notices::new(DELAY);
        notices.set_success("Habit added successfully", start);

        assert!(!notices.expire(start + Duration::from_millis(2999)));
        assert_eq!(notices.success(), "Habit added successfully");

        assert!(notices.expire(start + DELAY));
        assert_eq!(notices.success(), "");
        assert_eq!(notices.next_deadline(), None);
    }

    #[test]
    fn test_newer_message_survives_older_deadline() {
        let start = Instant::now();
        let mut notices = Notices::new(DELAY);
        notices.set_error("first", start);
        notices.set_error("second", start + Duration::from_millis(2000));

        notices.expire(start + DELAY);
        assert_eq!(notices.error(), "second");

        notices.expire(start + Duration::from_millis(5000));
        assert_eq!(notices.error(), "");
    }

    #[test]
    fn test_expire_on_empty_is_noop() {
        let mut notices = Notices::new(DELAY);
        assert!(!notices.expire(Instant::now() + DELAY));
        assert_eq!(notices.error(), "");
    }

    #[test]
    fn test_next_deadline_is_earliest() {
        let start = Instant::now();
        let mut notices = Notices::new(DELAY);
        notices.set_error("late", start + Duration::from_millis(500));
        notices.set_success("early", start);

        assert_eq!(notices.next_deadline(), Some(start + DELAY));
    }
}
