//! Transient highlighting of evidence cards

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

/// How long a navigated-to evidence card stays highlighted by default
pub const DEFAULT_HIGHLIGHT_MS: u64 = 1200;

#[derive(Debug, Default)]
struct HighlightState {
    /// Highlighted id → generation of the highlight currently shown
    active: HashMap<String, u64>,
    next_generation: u64,
}

/// Highlights evidence entries and clears each one after a fixed interval
///
/// Each entry has at most one pending clear. Highlighting an entry again
/// cancels its pending clear and starts a fresh interval; a clear only
/// removes the highlight generation it was scheduled for, so a timer that
/// already fired can never remove a newer highlight.
///
/// Clears are scheduled on the current Tokio runtime. Outside a runtime the
/// highlight is still set but stays until it is replaced or cancelled.
#[derive(Debug)]
pub struct Highlighter {
    duration: Duration,
    state: Arc<Mutex<HighlightState>>,
    pending: HashMap<String, JoinHandle<()>>,
}

impl Highlighter {
    /// Create a highlighter with the given display interval
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            state: Arc::new(Mutex::new(HighlightState::default())),
            pending: HashMap::new(),
        }
    }

    /// The display interval
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Highlight an entry, replacing any pending clear for it
    pub fn highlight(&mut self, evidence_id: &str) {
        let generation = {
            let mut state = lock(&self.state);
            state.next_generation += 1;
            let generation = state.next_generation;
            state.active.insert(evidence_id.to_string(), generation);
            generation
        };

        if let Some(previous) = self.pending.remove(evidence_id) {
            previous.abort();
            debug!("Cancelled pending highlight clear for {}", evidence_id);
        }
        self.pending.retain(|_, handle| !handle.is_finished());

        let Ok(runtime) = Handle::try_current() else {
            warn!("No Tokio runtime, highlight for {} will not clear automatically", evidence_id);
            return;
        };

        let state = Arc::clone(&self.state);
        let id = evidence_id.to_string();
        let duration = self.duration;
        let handle = runtime.spawn(async move {
            sleep(duration).await;
            let mut state = lock(&state);
            if state.active.get(&id) == Some(&generation) {
                state.active.remove(&id);
                debug!("Highlight cleared for {}", id);
            }
        });

        self.pending.insert(evidence_id.to_string(), handle);
    }

    /// Whether the entry is currently highlighted
    pub fn is_highlighted(&self, evidence_id: &str) -> bool {
        lock(&self.state).active.contains_key(evidence_id)
    }

    /// Currently highlighted ids, sorted
    pub fn highlighted(&self) -> Vec<String> {
        let mut ids: Vec<String> = lock(&self.state).active.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of clears still waiting to fire
    pub fn pending_clears(&self) -> usize {
        self.pending.values().filter(|h| !h.is_finished()).count()
    }

    /// Drop every highlight and cancel every pending clear
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
        lock(&self.state).active.clear();
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_HIGHLIGHT_MS))
    }
}

impl Drop for Highlighter {
    fn drop(&mut self) {
        for handle in self.pending.values() {
            handle.abort();
        }
    }
}

fn lock(state: &Mutex<HighlightState>) -> MutexGuard<'_, HighlightState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(DEFAULT_HIGHLIGHT_MS);

    #[tokio::test(start_paused = true)]
    async fn test_highlight_clears_after_interval() {
        let mut highlighter = Highlighter::default();
        highlighter.highlight("e1");
        assert!(highlighter.is_highlighted("e1"));

        sleep(INTERVAL - Duration::from_millis(100)).await;
        assert!(highlighter.is_highlighted("e1"));

        sleep(Duration::from_millis(200)).await;
        assert!(!highlighter.is_highlighted("e1"));
        assert_eq!(highlighter.pending_clears(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rehighlight_restarts_interval() {
        let mut highlighter = Highlighter::default();
        highlighter.highlight("e1");
        sleep(Duration::from_millis(800)).await;

        highlighter.highlight("e1");
        assert_eq!(highlighter.pending_clears(), 1);

        // Past the first clear's deadline, inside the second's
        sleep(Duration::from_millis(800)).await;
        assert!(highlighter.is_highlighted("e1"));

        sleep(Duration::from_millis(500)).await;
        assert!(!highlighter.is_highlighted("e1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_clear_independently() {
        let mut highlighter = Highlighter::new(Duration::from_millis(100));
        highlighter.highlight("a");
        sleep(Duration::from_millis(60)).await;
        highlighter.highlight("b");
        assert_eq!(highlighter.highlighted(), vec!["a".to_string(), "b".to_string()]);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(highlighter.highlighted(), vec!["b".to_string()]);

        sleep(Duration::from_millis(100)).await;
        assert!(highlighter.highlighted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let mut highlighter = Highlighter::default();
        highlighter.highlight("a");
        highlighter.highlight("b");
        highlighter.cancel_all();
        assert!(highlighter.highlighted().is_empty());
        assert_eq!(highlighter.pending_clears(), 0);
    }

    #[test]
    fn test_highlight_without_runtime() {
        let mut highlighter = Highlighter::default();
        highlighter.highlight("e1");
        highlighter.highlight("e1");
        assert!(highlighter.is_highlighted("e1"));
        assert_eq!(highlighter.pending_clears(), 0);

        highlighter.cancel_all();
        assert!(!highlighter.is_highlighted("e1"));
    }

    #[test]
    fn test_default_duration() {
        assert_eq!(Highlighter::default().duration(), INTERVAL);
    }
}
