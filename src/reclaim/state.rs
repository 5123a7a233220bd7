use serde::Serialize;
use std::fmt;

/// Lifecycle of a single reclaim request
///
/// `Pending → Resolving → Planning → (Executing | SkippedAlreadyMapped) → {Succeeded | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestState {
    Pending,
    Resolving,
    Planning,
    Executing,
    SkippedAlreadyMapped,
    Succeeded,
    Failed,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RequestState::SkippedAlreadyMapped | RequestState::Succeeded | RequestState::Failed
        )
    }

    /// Whether `next` is a legal forward step from `self`
    pub fn can_advance_to(self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Pending, Resolving)
                | (Pending, Failed)
                | (Resolving, Planning)
                | (Resolving, Failed)
                | (Planning, Executing)
                | (Planning, SkippedAlreadyMapped)
                | (Executing, Succeeded)
                | (Executing, Failed)
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestState::Pending => "pending",
            RequestState::Resolving => "resolving",
            RequestState::Planning => "planning",
            RequestState::Executing => "executing",
            RequestState::SkippedAlreadyMapped => "skipped (already mapped)",
            RequestState::Succeeded => "succeeded",
            RequestState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks one request through its states, refusing backwards moves
#[derive(Debug)]
pub struct RequestTracker {
    state: RequestState,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self {
            state: RequestState::Pending,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Move to `next`. Illegal transitions are ignored and reported as `false`.
    pub fn advance(&mut self, next: RequestState) -> bool {
        if !self.state.can_advance_to(next) {
            tracing::warn!("Ignoring illegal transition {} -> {}", self.state, next);
            return false;
        }
        tracing::debug!("Request {} -> {}", self.state, next);
        self.state = next;
        true
    }
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut tracker = RequestTracker::new();
        for next in [
            RequestState::Resolving,
            RequestState::Planning,
            RequestState::Executing,
            RequestState::Succeeded,
        ] {
            assert!(tracker.advance(next));
        }
        assert!(tracker.state().is_terminal());
        assert_eq!(tracker.state(), RequestState::Succeeded);
    }

    #[test]
    fn test_skip_is_terminal() {
        let mut tracker = RequestTracker::new();
        tracker.advance(RequestState::Resolving);
        tracker.advance(RequestState::Planning);
        assert!(tracker.advance(RequestState::SkippedAlreadyMapped));
        assert!(tracker.state().is_terminal());
        assert!(!tracker.advance(RequestState::Executing));
    }

    #[test]
    fn test_no_revisiting_earlier_states() {
        let mut tracker = RequestTracker::new();
        tracker.advance(RequestState::Resolving);
        tracker.advance(RequestState::Planning);
        assert!(!tracker.advance(RequestState::Resolving));
        assert_eq!(tracker.state(), RequestState::Planning);
    }

    #[test]
    fn test_planning_cannot_fail() {
        assert!(!RequestState::Planning.can_advance_to(RequestState::Failed));
        assert!(RequestState::Resolving.can_advance_to(RequestState::Failed));
    }
}
