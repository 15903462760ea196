#![forbid(unsafe_code)]

//! Enabled-state subsets and the cyclic successor mapper.
//!
//! A panel's reachable states are a non-empty ordered subset of
//! [`PanelState::ALL`]. [`StateCycle::next`] maps a state to the one after it
//! in that order, wrapping around. The mapper is pure; the controllers that
//! apply the result own every side effect.
//!
//! # Invariants
//!
//! 1. The subset is non-empty and duplicate free.
//! 2. `next(s)` is defined only for `s` in the subset, and is in the subset.
//! 3. Applying `next` `len()` times returns to the starting state.

use mdpanel_core::{PanelError, PanelState};
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free, non-empty set of enabled states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<PanelState>", into = "Vec<PanelState>")]
pub struct StateCycle {
    states: Vec<PanelState>,
}

impl StateCycle {
    /// Validate and build a cycle from an ordered list.
    pub fn new(states: impl IntoIterator<Item = PanelState>) -> Result<Self, PanelError> {
        let mut collected: Vec<PanelState> = Vec::with_capacity(PanelState::ALL.len());
        for state in states {
            if collected.contains(&state) {
                return Err(PanelError::DuplicateEnabledState { state });
            }
            collected.push(state);
        }
        if collected.is_empty() {
            return Err(PanelError::EmptyEnabledStates);
        }
        Ok(Self { states: collected })
    }

    /// All three states, `HIDDEN -> EMBEDDED -> FLOATING`.
    #[must_use]
    pub fn all() -> Self {
        Self {
            states: PanelState::ALL.to_vec(),
        }
    }

    /// The successor of `current`, wrapping after the last element.
    pub fn next(&self, current: PanelState) -> Result<PanelState, PanelError> {
        let Some(index) = self.states.iter().position(|s| *s == current) else {
            return Err(self.not_enabled(current));
        };
        Ok(self.states[(index + 1) % self.states.len()])
    }

    /// `true` if `state` is enabled.
    #[must_use]
    pub fn contains(&self, state: PanelState) -> bool {
        self.states.contains(&state)
    }

    /// `true` if every state in `states` is enabled.
    #[must_use]
    pub fn contains_all(&self, states: &[PanelState]) -> bool {
        states.iter().all(|s| self.contains(*s))
    }

    /// Enabled states in cycle order.
    #[must_use]
    pub fn states(&self) -> &[PanelState] {
        &self.states
    }

    /// Number of enabled states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Fail with [`PanelError::StateNotEnabled`] unless `state` is enabled.
    pub fn require(&self, state: PanelState) -> Result<(), PanelError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(self.not_enabled(state))
        }
    }

    /// Successor of `current` along the fixed toggle cycle, skipping states
    /// that are not enabled.
    ///
    /// Returns `current` when no other state is enabled.
    #[must_use]
    pub fn toggled(&self, current: PanelState) -> PanelState {
        let mut candidate = current.toggled();
        for _ in 0..PanelState::ALL.len() {
            if candidate == current || self.contains(candidate) {
                return candidate;
            }
            candidate = candidate.toggled();
        }
        current
    }

    /// The state a hidden panel should be revealed into: the successor of
    /// `HIDDEN` when hidden is enabled, otherwise the first enabled visible
    /// state.
    #[must_use]
    pub fn reveal_from_hidden(&self) -> PanelState {
        match self.next(PanelState::Hidden) {
            Ok(state) => state,
            Err(_) => self
                .states
                .iter()
                .copied()
                .find(|s| s.is_visible())
                .unwrap_or(PanelState::Embedded),
        }
    }

    fn not_enabled(&self, state: PanelState) -> PanelError {
        PanelError::StateNotEnabled {
            state,
            enabled: self.states.clone(),
        }
    }
}

impl Default for StateCycle {
    fn default() -> Self {
        Self::all()
    }
}

impl TryFrom<Vec<PanelState>> for StateCycle {
    type Error = PanelError;

    fn try_from(states: Vec<PanelState>) -> Result<Self, Self::Error> {
        Self::new(states)
    }
}

impl From<StateCycle> for Vec<PanelState> {
    fn from(cycle: StateCycle) -> Self {
        cycle.states
    }
}

/// Enabled states plus the validated initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    cycle: StateCycle,
    initial: PanelState,
}

impl StateConfig {
    /// Validate `initial` against `cycle`.
    ///
    /// Fails when `initial` is [`PanelState::Floating`] (floating is reachable
    /// only by an explicit toggle) or not enabled.
    pub fn new(cycle: StateCycle, initial: PanelState) -> Result<Self, PanelError> {
        if initial == PanelState::Floating {
            return Err(PanelError::FloatingInitialState);
        }
        cycle.require(initial)?;
        Ok(Self { cycle, initial })
    }

    /// The enabled states.
    #[must_use]
    pub fn cycle(&self) -> &StateCycle {
        &self.cycle
    }

    /// The initial state.
    #[must_use]
    pub fn initial(&self) -> PanelState {
        self.initial
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            cycle: StateCycle::all(),
            initial: PanelState::Embedded,
        }
    }
}
