#![forbid(unsafe_code)]

//! Edit-surface state owner.
//!
//! One [`EditController`] per panel with an editor. Unlike the detail area,
//! the toggle uses the configurable enabled-state cycle.

use mdpanel_core::{PanelError, PanelId, PanelState};

use crate::state::{StateConfig, StateCycle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditController {
    panel: PanelId,
    cycle: StateCycle,
    state: PanelState,
    focus_activation: bool,
}

impl EditController {
    #[must_use]
    pub fn new(panel: PanelId, config: &StateConfig, focus_activation: bool) -> Self {
        Self {
            panel,
            cycle: config.cycle().clone(),
            state: config.initial(),
            focus_activation,
        }
    }

    #[must_use]
    pub fn panel(&self) -> PanelId {
        self.panel
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub fn cycle(&self) -> &StateCycle {
        &self.cycle
    }

    /// Whether focus entering this editor marks it active.
    #[must_use]
    pub fn focus_activation(&self) -> bool {
        self.focus_activation
    }

    /// Validate a requested state. Returns `false` when it is already current.
    pub fn check(&self, target: PanelState) -> Result<bool, PanelError> {
        self.cycle.require(target)?;
        Ok(target != self.state)
    }

    /// Successor of the current state in the enabled cycle.
    pub fn toggle_target(&self) -> Result<PanelState, PanelError> {
        self.cycle.next(self.state)
    }

    pub fn commit(&mut self, state: PanelState) {
        self.state = state;
    }
}
