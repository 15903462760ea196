#![forbid(unsafe_code)]

//! Detail controllers.
//!
//! Every master panel gets one [`DetailController`], chosen by its
//! [`DetailLayout`] when the panel tree is finalized:
//!
//! - [`DetailController::Tabbed`] shows the detail panels as tabs in a single
//!   switched slot beside the master, and owns one [`PanelState`] for the
//!   whole detail area.
//! - [`DetailController::NoOp`] is used for panels without details, or whose
//!   details the host lays out itself. It has no state and accepts every
//!   request silently.
//!
//! Controllers hold state only. The runtime applies the side effects of a
//! transition (links, slots, windows, focus) and then commits the new state
//! with [`TabbedDetail::commit`].

use mdpanel_core::{PanelError, PanelId, PanelState};
use serde::{Deserialize, Serialize};

use crate::state::{StateConfig, StateCycle};

/// How far forcing floating detail areas hidden reaches when a detail area
/// leaves [`PanelState::Floating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cascade {
    /// Only the master's direct detail panels. A forced panel cascades again
    /// when its own area was floating.
    #[default]
    Siblings,
    /// Every panel below the master.
    Descendants,
}

/// Detail layout choice for one master panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailLayout {
    /// Tabbed detail area. `None` uses the application defaults.
    Tabbed { states: Option<StateConfig> },
    /// The core does not manage the detail area.
    None,
}

impl DetailLayout {
    /// Tabbed layout with default states.
    #[must_use]
    pub const fn tabbed() -> Self {
        Self::Tabbed { states: None }
    }

    /// Tabbed layout with explicit states.
    #[must_use]
    pub const fn tabbed_with(states: StateConfig) -> Self {
        Self::Tabbed {
            states: Some(states),
        }
    }
}

impl Default for DetailLayout {
    fn default() -> Self {
        Self::tabbed()
    }
}

/// Detail area state for a tabbed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabbedDetail {
    master: PanelId,
    cycle: StateCycle,
    state: PanelState,
    selected: PanelId,
}

impl TabbedDetail {
    /// The first detail panel starts selected.
    #[must_use]
    pub fn new(master: PanelId, config: &StateConfig, first: PanelId) -> Self {
        Self {
            master,
            cycle: config.cycle().clone(),
            state: config.initial(),
            selected: first,
        }
    }

    #[must_use]
    pub fn master(&self) -> PanelId {
        self.master
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub fn selected(&self) -> PanelId {
        self.selected
    }

    #[must_use]
    pub fn cycle(&self) -> &StateCycle {
        &self.cycle
    }

    /// Validate a requested state. Returns `false` when it is already current.
    pub fn check(&self, target: PanelState) -> Result<bool, PanelError> {
        self.cycle.require(target)?;
        Ok(target != self.state)
    }

    /// The target of the toggle affordance.
    #[must_use]
    pub fn toggle_target(&self) -> PanelState {
        self.cycle.toggled(self.state)
    }

    /// The state a hidden area is revealed into; `None` when already visible.
    #[must_use]
    pub fn reveal_target(&self) -> Option<PanelState> {
        (self.state == PanelState::Hidden).then(|| self.cycle.reveal_from_hidden())
    }

    /// Record the applied state.
    pub fn commit(&mut self, state: PanelState) {
        self.state = state;
    }

    /// Record the selected tab.
    pub fn select(&mut self, detail: PanelId) {
        self.selected = detail;
    }
}

/// Per-master detail controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailController {
    Tabbed(TabbedDetail),
    NoOp,
}

impl DetailController {
    /// Build the controller for a master with the given details.
    ///
    /// `defaults` applies when the layout does not carry its own states.
    #[must_use]
    pub fn for_master(
        master: PanelId,
        details: &[PanelId],
        layout: &DetailLayout,
        defaults: &StateConfig,
    ) -> Self {
        let Some(first) = details.first().copied() else {
            return Self::NoOp;
        };
        match layout {
            DetailLayout::Tabbed { states } => Self::Tabbed(TabbedDetail::new(
                master,
                states.as_ref().unwrap_or(defaults),
                first,
            )),
            DetailLayout::None => Self::NoOp,
        }
    }

    #[must_use]
    pub fn as_tabbed(&self) -> Option<&TabbedDetail> {
        match self {
            Self::Tabbed(tabbed) => Some(tabbed),
            Self::NoOp => None,
        }
    }

    pub fn as_tabbed_mut(&mut self) -> Option<&mut TabbedDetail> {
        match self {
            Self::Tabbed(tabbed) => Some(tabbed),
            Self::NoOp => None,
        }
    }

    /// Current state, `None` for the no-op controller.
    #[must_use]
    pub fn state(&self) -> Option<PanelState> {
        self.as_tabbed().map(TabbedDetail::state)
    }

    /// Selected detail panel, `None` for the no-op controller.
    #[must_use]
    pub fn selected(&self) -> Option<PanelId> {
        self.as_tabbed().map(TabbedDetail::selected)
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}
