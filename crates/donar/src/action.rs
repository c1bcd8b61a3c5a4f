//! Element-interaction dispatch.
//!
//! [`dispatch`] is the single funnel through which page objects touch the
//! page: it validates the locator and payload, consults the strategy/action
//! compatibility table, resolves the locator, and performs exactly one
//! browser-level interaction. It does not wait for any navigation the
//! interaction may trigger; callers compose explicit waits when the flow
//! requires them.

use tracing::debug;

use crate::locator::{resolve, Strategy};
use crate::result::{DonarError, DonarResult};
use crate::session::BrowserSession;

/// The kind of an action, payload-free (used by the compatibility table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Click the element
    Click,
    /// Fill the element with text
    Fill,
}

impl ActionKind {
    /// Lowercase name for error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Fill => "fill",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action to perform on a located element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Click the element
    Click,
    /// Fill the element with the given payload
    Fill(String),
}

impl Action {
    /// Fill with the given payload
    #[must_use]
    pub fn fill(payload: impl Into<String>) -> Self {
        Self::Fill(payload.into())
    }

    /// The payload-free kind of this action
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Click => ActionKind::Click,
            Self::Fill(_) => ActionKind::Fill,
        }
    }
}

/// Perform one interaction against the session.
///
/// Preconditions are checked before the session is touched:
/// - `raw` must be non-empty, else `InvalidLocator`;
/// - a `Fill` payload must be non-empty, else `MissingInput`;
/// - `(strategy, action)` must be in the compatibility table, else
///   `UnsupportedAction`.
///
/// On success the session performs exactly one click or fill; any error it
/// reports propagates unmodified.
pub async fn dispatch(
    session: &dyn BrowserSession,
    strategy: Strategy,
    raw: &str,
    action: Action,
) -> DonarResult<()> {
    if raw.is_empty() {
        return Err(DonarError::InvalidLocator {
            strategy: strategy.to_string(),
        });
    }

    if let Action::Fill(payload) = &action {
        if payload.is_empty() {
            return Err(DonarError::MissingInput);
        }
    }

    if !strategy.supports(action.kind()) {
        return Err(DonarError::UnsupportedAction {
            action: action.kind().to_string(),
            strategy: strategy.to_string(),
        });
    }

    let query = resolve(strategy, raw)?;
    debug!(query = %query, action = %action.kind(), "dispatching interaction");

    match action {
        Action::Click => session.click(&query).await,
        Action::Fill(payload) => session.fill(&query, &payload).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ALL_STRATEGIES;
    use crate::mock::MockSession;

    fn sample_raw(strategy: Strategy) -> &'static str {
        match strategy {
            Strategy::PathExpr => "//button[text()='Continue']",
            _ => "some-locator",
        }
    }

    #[tokio::test]
    async fn test_empty_locator_fails_for_every_combination() {
        let session = MockSession::builder().build();
        for strategy in ALL_STRATEGIES {
            for action in [Action::Click, Action::fill("20")] {
                let result = dispatch(&session, strategy, "", action).await;
                assert!(
                    matches!(result, Err(DonarError::InvalidLocator { .. })),
                    "empty raw must fail for {strategy}"
                );
            }
        }
        assert!(session.clicked_keys().is_empty());
    }

    #[tokio::test]
    async fn test_empty_fill_payload_fails_before_session() {
        let session = MockSession::builder().build();
        for strategy in ALL_STRATEGIES {
            let result = dispatch(&session, strategy, "field", Action::fill("")).await;
            assert!(
                matches!(result, Err(DonarError::MissingInput)),
                "empty payload must fail for {strategy}"
            );
        }
        assert!(session.filled_values().is_empty());
    }

    #[tokio::test]
    async fn test_compatibility_table_is_exhaustive() {
        // Every (strategy, action) pair either reaches the session or fails
        // with UnsupportedAction; nothing silently no-ops.
        for strategy in ALL_STRATEGIES {
            for kind in [ActionKind::Click, ActionKind::Fill] {
                let session = MockSession::builder().build();
                let action = match kind {
                    ActionKind::Click => Action::Click,
                    ActionKind::Fill => Action::fill("value"),
                };
                let result = dispatch(&session, strategy, sample_raw(strategy), action).await;

                if strategy.supports(kind) {
                    assert!(result.is_ok(), "{strategy}/{kind} should dispatch");
                    let touched =
                        session.clicked_keys().len() + session.filled_values().len();
                    assert_eq!(touched, 1, "{strategy}/{kind} must touch exactly once");
                } else {
                    assert!(
                        matches!(result, Err(DonarError::UnsupportedAction { .. })),
                        "{strategy}/{kind} must be rejected"
                    );
                    assert!(session.clicked_keys().is_empty());
                    assert!(session.filled_values().is_empty());
                }
            }
        }
    }

    #[tokio::test]
    async fn test_fill_on_text_rejected() {
        let session = MockSession::builder().build();
        let result = dispatch(&session, Strategy::Text, "Continue", Action::fill("x")).await;
        assert!(matches!(
            result,
            Err(DonarError::UnsupportedAction { ref strategy, .. }) if strategy == "TEXT"
        ));
    }

    #[tokio::test]
    async fn test_click_reaches_session_with_resolved_query() {
        let session = MockSession::builder().build();
        dispatch(&session, Strategy::Id, "giftAid", Action::Click)
            .await
            .unwrap();
        assert_eq!(session.clicked_keys(), vec!["css=#giftAid".to_string()]);
    }

    #[tokio::test]
    async fn test_fill_records_payload() {
        let session = MockSession::builder().build();
        dispatch(
            &session,
            Strategy::Label,
            "First name",
            Action::fill("Ada"),
        )
        .await
        .unwrap();
        assert_eq!(
            session.filled_values().get("label=First name"),
            Some(&"Ada".to_string())
        );
    }
}
