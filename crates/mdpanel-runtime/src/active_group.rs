#![forbid(unsafe_code)]

//! Active-editor mutual-exclusion group.
//!
//! The group owns the active flags of its members. [`ActiveGroup::activate`]
//! is the only mutator: it clears the current member and sets the new one,
//! so at most one member is active at any instant.

use std::collections::BTreeSet;

use mdpanel_core::{PanelError, PanelId};

/// Outcome of [`ActiveGroup::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChange {
    /// Member that lost the flag, if any.
    pub previous: Option<PanelId>,
    pub current: PanelId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveGroup {
    members: BTreeSet<PanelId>,
    active: Option<PanelId>,
}

impl ActiveGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a member. Returns `false` if it already was one.
    pub fn add_member(&mut self, panel: PanelId) -> bool {
        self.members.insert(panel)
    }

    #[must_use]
    pub fn contains(&self, panel: PanelId) -> bool {
        self.members.contains(&panel)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The active member, if any.
    #[must_use]
    pub fn active(&self) -> Option<PanelId> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, panel: PanelId) -> bool {
        self.active == Some(panel)
    }

    /// Make `member` the unique active member.
    ///
    /// Returns `None` when it already was.
    pub fn activate(&mut self, member: PanelId) -> Result<Option<ActiveChange>, PanelError> {
        if !self.members.contains(&member) {
            return Err(PanelError::UnknownPanel { panel: member });
        }
        if self.active == Some(member) {
            return Ok(None);
        }
        let previous = self.active.replace(member);
        tracing::debug!(
            message = "active_group.activate",
            member = %member,
            previous = ?previous
        );
        Ok(Some(ActiveChange {
            previous,
            current: member,
        }))
    }
}
