//! Search debouncing
//!
//! Every keystroke re-arms a single timer. Timers are identified by a
//! generation number; arming a new one makes every older generation stale,
//! so only the timer that survives a full quiet period produces a search.

use std::time::Duration;
use tracing::trace;

/// Default quiet period before a search is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// What the caller must do after the search term changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceAction {
    /// Start a timer that reports back with `generation` after `delay`.
    /// Any previously armed timer is stale and should be cancelled.
    Arm { generation: u64, delay: Duration },
    /// The term is blank: cancel any pending timer and clear results now.
    Clear,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    generation: u64,
    term: String,
}

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: u64,
    pending: Option<PendingSearch>,
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
            generation: 0,
            pending: None,
        }
    }

    /// Whether a timer is currently armed
    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a new search term, cancelling whatever was pending.
    pub fn on_term_changed(&mut self, term: &str) -> DebounceAction {
        self.generation += 1;

        if term.trim().is_empty() {
            self.pending = None;
            return DebounceAction::Clear;
        }

        if let Some(stale) = self.pending.replace(PendingSearch {
            generation: self.generation,
            term: term.to_string(),
        }) {
            trace!(generation = stale.generation, "superseded pending search");
        }

        DebounceAction::Arm {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// A timer elapsed. Returns the term to search for if the timer was the
    /// current one, or `None` if it was superseded in the meantime.
    pub fn on_timer_elapsed(&mut self, generation: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending.take().map(|pending| pending.term)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once_for_last_term() {
        let mut debouncer = SearchDebouncer::default();

        let generations: Vec<u64> = ["a", "ab", "abc"]
            .iter()
            .map(|term| match debouncer.on_term_changed(term) {
                DebounceAction::Arm { generation, delay } => {
                    assert_eq!(delay, SEARCH_DEBOUNCE);
                    generation
                }
                DebounceAction::Clear => panic!("non-empty term must arm a timer"),
            })
            .collect();

        // Every timer eventually reports back; only the last one searches
        let fired: Vec<String> = generations
            .into_iter()
            .filter_map(|generation| debouncer.on_timer_elapsed(generation))
            .collect();

        assert_eq!(fired, ["abc"]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_timer_fires_only_once() {
        let mut debouncer = SearchDebouncer::default();
        let DebounceAction::Arm { generation, .. } = debouncer.on_term_changed("fox") else {
            panic!("expected a timer");
        };

        assert_eq!(debouncer.on_timer_elapsed(generation).as_deref(), Some("fox"));
        assert_eq!(debouncer.on_timer_elapsed(generation), None);
    }

    #[test]
    fn test_blank_term_clears_without_timer() {
        let mut debouncer = SearchDebouncer::default();
        let DebounceAction::Arm { generation, .. } = debouncer.on_term_changed("fox") else {
            panic!("expected a timer");
        };

        assert_eq!(debouncer.on_term_changed("   "), DebounceAction::Clear);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.on_timer_elapsed(generation), None);
    }

    #[test]
    fn test_term_is_kept_untrimmed() {
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(10));
        let DebounceAction::Arm { generation, delay } = debouncer.on_term_changed(" red fox ") else {
            panic!("expected a timer");
        };

        assert_eq!(delay, Duration::from_millis(10));
        assert_eq!(debouncer.on_timer_elapsed(generation).as_deref(), Some(" red fox "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_against_real_timers() {
        let mut debouncer = SearchDebouncer::default();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        for term in ["a", "ab", "abc"] {
            if let DebounceAction::Arm { generation, delay } = debouncer.on_term_changed(term) {
                let tx = tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(generation);
                });
            }
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        drop(tx);

        let mut searches = Vec::new();
        while let Some(generation) = rx.recv().await {
            searches.extend(debouncer.on_timer_elapsed(generation));
        }

        assert_eq!(searches, ["abc"]);
    }
}
