#![forbid(unsafe_code)]

//! Error model.
//!
//! Two kinds of failure exist in the activation subsystem:
//!
//! 1. **Configuration errors** ([`PanelError`]): programming mistakes such as
//!    re-parenting a panel, adding children after finalization, or naming a
//!    state outside the enabled subset. They surface immediately as `Err`.
//! 2. **Cancellation** ([`TransitionOutcome::Cancelled`]): an expected control
//!    signal raised by a confirmation step. It is an ordinary `Ok` value, so a
//!    cancelled transition never looks like a defect.
//!
//! Navigation toward a missing target is neither; it is a silent no-op.

use thiserror::Error;

use crate::id::{ComponentId, PanelId};
use crate::state::PanelState;

/// Configuration and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("panel id 0 is invalid")]
    ZeroPanelId,
    #[error("panel id overflow after {current}")]
    PanelIdOverflow { current: PanelId },
    #[error("{panel} not found")]
    UnknownPanel { panel: PanelId },
    #[error("{child} already has parent {existing}, cannot assign {requested}")]
    ParentAlreadyAssigned {
        child: PanelId,
        existing: PanelId,
        requested: PanelId,
    },
    #[error("{panel} cannot be its own detail panel")]
    SelfParent { panel: PanelId },
    #[error("adding {detail} under {master} would create a cycle")]
    DetailCycle { master: PanelId, detail: PanelId },
    #[error("panel tree is finalized; details can no longer be added")]
    TreeFinalized,
    #[error("panel tree must be finalized first")]
    TreeNotFinalized,
    #[error("enabled state set must not be empty")]
    EmptyEnabledStates,
    #[error("state {state} listed twice in enabled states")]
    DuplicateEnabledState { state: PanelState },
    #[error("state {state} is not enabled (enabled: {enabled:?})")]
    StateNotEnabled {
        state: PanelState,
        enabled: Vec<PanelState>,
    },
    #[error("floating is not a supported initial state")]
    FloatingInitialState,
    #[error("{panel} has no edit surface")]
    NoEditor { panel: PanelId },
    #[error("{master} has no detail panels")]
    NoDetailPanels { master: PanelId },
    #[error("{detail} is not a detail panel of {master}")]
    NotADetailOf { master: PanelId, detail: PanelId },
    #[error("listeners must be registered before the panels are finalized")]
    ListenersSealed,
    #[error("{component} not found")]
    UnknownComponent { component: ComponentId },
    #[error("{component} is already registered")]
    DuplicateComponent { component: ComponentId },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result of a state transition request.
///
/// `Cancelled` means a confirmation step declined the transition; nothing was
/// changed (no window created or disposed, no detail link flipped).
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// The state changed and all side effects were applied.
    Applied,
    /// The requested state was already current.
    Unchanged,
    /// A confirmation step declined; the previous state is intact.
    Cancelled,
}

impl TransitionOutcome {
    /// `true` when the transition was declined.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// `true` when side effects were applied.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Stable lowercase name, used as a log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Unchanged => "unchanged",
            Self::Cancelled => "cancelled",
        }
    }
}
