//! Lifecycle wrapper for the outcome of one asynchronous catalog operation.
//!
//! Transitions are monotonic: `NotStarted -> Pending -> {Failed | Ready}`.
//! `Failed` and `Ready` are terminal; the transition helpers refuse to leave
//! them and report whether the transition was applied.

use serde::Serialize;

use crate::constants::GENERIC_ERROR_MESSAGE;

pub const NOT_STARTED_TEXT: &str = "Not started.";
pub const PENDING_TEXT: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    NotStarted,
    Pending,
    Failed,
    Ready(T),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::NotStarted
    }
}

impl<T> RequestState<T> {
    /// Total projection over every state.
    pub fn render<V>(
        &self,
        on_failed: impl FnOnce() -> V,
        on_not_started: impl FnOnce() -> V,
        on_pending: impl FnOnce() -> V,
        on_ready: impl FnOnce(&T) -> V,
    ) -> V {
        match self {
            RequestState::NotStarted => on_not_started(),
            RequestState::Pending => on_pending(),
            RequestState::Failed => on_failed(),
            RequestState::Ready(value) => on_ready(value),
        }
    }

    /// Projection with the stock renderings for the three non-ready states.
    pub fn render_or<V>(&self, on_ready: impl FnOnce(&T) -> V) -> V
    where
        V: From<&'static str>,
    {
        self.render(
            || V::from(GENERIC_ERROR_MESSAGE),
            || V::from(NOT_STARTED_TEXT),
            || V::from(PENDING_TEXT),
            on_ready,
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Failed | RequestState::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            RequestState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// `NotStarted -> Pending`. Returns false if the operation was already started.
    pub fn start(&mut self) -> bool {
        if matches!(self, RequestState::NotStarted) {
            *self = RequestState::Pending;
            true
        } else {
            false
        }
    }

    /// Moves a started operation to its terminal state. A stage that was never
    /// started may also be settled directly (derived states fail together with
    /// their source). Terminal states are never overwritten.
    pub fn settle<E>(&mut self, outcome: std::result::Result<T, E>) -> bool {
        if self.is_terminal() {
            return false;
        }
        *self = match outcome {
            Ok(value) => RequestState::Ready(value),
            Err(_) => RequestState::Failed,
        };
        true
    }

    pub fn fail(&mut self) -> bool {
        self.settle::<()>(Err(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(state: &RequestState<u32>) -> String {
        state.render(
            || "failed".to_string(),
            || "idle".to_string(),
            || "pending".to_string(),
            |v| format!("ready {}", v),
        )
    }

    #[test]
    fn test_render_covers_every_state() {
        assert_eq!(label(&RequestState::NotStarted), "idle");
        assert_eq!(label(&RequestState::Pending), "pending");
        assert_eq!(label(&RequestState::Failed), "failed");
        assert_eq!(label(&RequestState::Ready(7)), "ready 7");
    }

    #[test]
    fn test_render_or_uses_stock_text() {
        let failed: RequestState<u32> = RequestState::Failed;
        let text: String = failed.render_or(|v| v.to_string());
        assert_eq!(text, GENERIC_ERROR_MESSAGE);

        let pending: RequestState<u32> = RequestState::Pending;
        let text: String = pending.render_or(|v| v.to_string());
        assert_eq!(text, PENDING_TEXT);

        let ready = RequestState::Ready(3u32);
        let text: String = ready.render_or(|v| v.to_string());
        assert_eq!(text, "3");
    }

    #[test]
    fn test_transitions_are_monotonic() {
        let mut state: RequestState<&str> = RequestState::default();
        assert!(state.start());
        assert!(!state.start());
        assert!(state.settle::<()>(Ok("done")));
        assert!(!state.fail());
        assert!(!state.start());
        assert_eq!(state, RequestState::Ready("done"));
    }

    #[test]
    fn test_failed_is_terminal() {
        let mut state: RequestState<u8> = RequestState::Pending;
        assert!(state.fail());
        assert!(!state.settle::<()>(Ok(1)));
        assert_eq!(state, RequestState::Failed);
    }

    #[test]
    fn test_serializes_with_state_tag() {
        let json = serde_json::to_value(RequestState::Ready(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "ready", "value": [1, 2] }));
        let json = serde_json::to_value(RequestState::<u8>::Pending).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "pending" }));
    }
}
