use std::time::{Duration, Instant};

/// Quiet period before a search string is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancel-and-reschedule debounce for the search field.
///
/// Every keystroke calls [`schedule`](Self::schedule), which drops any text
/// still waiting. The event loop calls [`poll`](Self::poll) on each tick and
/// gets the latest text back once the quiet period has elapsed.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<PendingSearch>,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    text: String,
    due_at: Instant,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(PendingSearch {
            text: text.into(),
            due_at: now + self.delay,
        });
    }

    /// Returns the pending text once, when it is due
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.due_at);
        if due {
            self.pending.take().map(|p| p.text)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
