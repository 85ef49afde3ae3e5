//! Mutation Lifecycle
//!
//! Typed state machine for one logical create or delete:
//!
//! ```text
//! Idle -> Pending { optimistic_applied } -> Confirmed        -> Idle
//!                                        -> Failed { rolled_back } -> Idle
//! ```
//!
//! The machine holds no transport; the reconciliation controller drives it
//! and it rejects any transition outside the diagram.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    /// Remote call in flight; `optimistic_applied` records whether local
    /// state was changed ahead of it
    Pending { optimistic_applied: bool },
    Confirmed,
    /// Remote call failed; `rolled_back` records whether the refetch
    /// restored authoritative state
    Failed { rolled_back: bool },
}

impl std::fmt::Display for MutationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationPhase::Idle => write!(f, "idle"),
            MutationPhase::Pending { optimistic_applied } => {
                write!(f, "pending(optimistic_applied={optimistic_applied})")
            }
            MutationPhase::Confirmed => write!(f, "confirmed"),
            MutationPhase::Failed { rolled_back } => {
                write!(f, "failed(rolled_back={rolled_back})")
            }
        }
    }
}

/// How a settled mutation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Confirmed,
    Failed { rolled_back: bool },
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed)
    }
}

#[derive(Debug, Clone)]
pub struct MutationLifecycle {
    kind: MutationKind,
    phase: MutationPhase,
    history: Vec<MutationPhase>,
}

impl MutationLifecycle {
    pub fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            phase: MutationPhase::Idle,
            history: vec![MutationPhase::Idle],
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn phase(&self) -> MutationPhase {
        self.phase
    }

    /// Every phase visited, starting with `Idle`.
    pub fn history(&self) -> &[MutationPhase] {
        &self.history
    }

    /// `Idle -> Pending`.
    pub fn begin(&mut self, optimistic_applied: bool) -> CoreResult<()> {
        match self.phase {
            MutationPhase::Idle => {
                self.enter(MutationPhase::Pending { optimistic_applied });
                Ok(())
            }
            from => Err(CoreError::invalid_transition(
                from,
                MutationPhase::Pending { optimistic_applied },
            )),
        }
    }

    /// `Pending -> Confirmed`.
    pub fn confirm(&mut self) -> CoreResult<()> {
        match self.phase {
            MutationPhase::Pending { .. } => {
                self.enter(MutationPhase::Confirmed);
                Ok(())
            }
            from => Err(CoreError::invalid_transition(from, MutationPhase::Confirmed)),
        }
    }

    /// `Pending -> Failed`.
    pub fn fail(&mut self, rolled_back: bool) -> CoreResult<()> {
        match self.phase {
            MutationPhase::Pending { .. } => {
                self.enter(MutationPhase::Failed { rolled_back });
                Ok(())
            }
            from => Err(CoreError::invalid_transition(
                from,
                MutationPhase::Failed { rolled_back },
            )),
        }
    }

    /// `Confirmed | Failed -> Idle`, reporting how the mutation ended.
    pub fn settle(&mut self) -> CoreResult<MutationOutcome> {
        let outcome = match self.phase {
            MutationPhase::Confirmed => MutationOutcome::Confirmed,
            MutationPhase::Failed { rolled_back } => MutationOutcome::Failed { rolled_back },
            from => return Err(CoreError::invalid_transition(from, MutationPhase::Idle)),
        };
        self.enter(MutationPhase::Idle);
        Ok(outcome)
    }

    fn enter(&mut self, next: MutationPhase) {
        self.phase = next;
        self.history.push(next);
    }
}
