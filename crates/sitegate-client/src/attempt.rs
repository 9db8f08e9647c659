//! Mutation attempt state machine.
//!
//! One [`MutationAttempt`] tracks one user-triggered mutation from button
//! press to settlement. The machine only moves forward:
//!
//! ```text
//! NotAttempted → Routed → Submitted → Succeeded | Failed
//!       └──────────────────────────────────────► Failed (denied locally)
//! ```
//!
//! Transition requests that do not match an edge are ignored with a `warn`:
//! a settled attempt stays settled, and a retry is always a fresh
//! [`MutationAttempt`].

use sitegate_auth::ActionRoute;
use sitegate_types::{ApiError, Capability, ErrorCode};

/// How the attempt was routed, without the envelope payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMode {
    /// Direct call to the write endpoint.
    Execute,
    /// Submission to the change-request queue.
    Request,
}

impl From<&ActionRoute> for RouteMode {
    fn from(route: &ActionRoute) -> Self {
        match route {
            ActionRoute::Execute { .. } => Self::Execute,
            ActionRoute::Request(_) => Self::Request,
        }
    }
}

/// Where a mutation attempt currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState {
    /// Nothing has happened yet.
    NotAttempted,
    /// The router has decided how the attempt will be carried out.
    Routed(RouteMode),
    /// The network call is in flight.
    Submitted,
    /// The collaborator confirmed the mutation (or queued the request).
    Succeeded,
    /// Terminal failure; carries the error code for display logic.
    Failed {
        /// Machine-readable code of the failure ([`ErrorCode::code`]).
        code: &'static str,
    },
}

impl Default for AttemptState {
    fn default() -> Self {
        Self::NotAttempted
    }
}

/// A single mutation attempt.
///
/// # Example
///
/// ```
/// use sitegate_client::{MutationAttempt, RouteMode};
///
/// let mut attempt = MutationAttempt::new();
/// attempt.mark_routed(RouteMode::Request);
/// attempt.mark_submitted();
/// assert!(attempt.is_in_flight());
///
/// attempt.mark_succeeded();
/// assert!(attempt.is_settled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationAttempt {
    state: AttemptState,
}

impl MutationAttempt {
    /// Starts a fresh attempt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    /// Returns `true` while the network call is in flight. Callers disable
    /// the triggering control while this holds.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, AttemptState::Submitted)
    }

    /// Returns `true` once the attempt reached a terminal state.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            AttemptState::Succeeded | AttemptState::Failed { .. }
        )
    }

    /// Records the local permission denial. Valid only from `NotAttempted`.
    pub fn mark_denied(&mut self, capability: &Capability) {
        let code = ApiError::permission_denied(capability.clone()).code();
        self.advance(AttemptState::Failed { code });
    }

    /// Records the routing decision. Valid only from `NotAttempted`.
    pub fn mark_routed(&mut self, mode: RouteMode) {
        self.advance(AttemptState::Routed(mode));
    }

    /// Records the start of the network call. Valid only from `Routed`.
    pub fn mark_submitted(&mut self) {
        self.advance(AttemptState::Submitted);
    }

    /// Records collaborator confirmation. Valid only from `Submitted`.
    pub fn mark_succeeded(&mut self) {
        self.advance(AttemptState::Succeeded);
    }

    /// Records a collaborator failure. Valid only from `Submitted`.
    pub fn mark_failed(&mut self, error: &ApiError) {
        self.advance(AttemptState::Failed { code: error.code() });
    }

    fn advance(&mut self, next: AttemptState) {
        let legal = matches!(
            (&self.state, &next),
            (AttemptState::NotAttempted, AttemptState::Routed(_))
                | (AttemptState::NotAttempted, AttemptState::Failed { .. })
                | (AttemptState::Routed(_), AttemptState::Submitted)
                | (AttemptState::Submitted, AttemptState::Succeeded)
                | (AttemptState::Submitted, AttemptState::Failed { .. })
        );

        if legal {
            tracing::debug!(from = ?self.state, to = ?next, "attempt transition");
            self.state = next;
        } else {
            tracing::warn!(from = ?self.state, to = ?next, "illegal attempt transition ignored");
        }
    }
}
