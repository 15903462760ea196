#![forbid(unsafe_code)]

//! Stable identifiers.
//!
//! Every node the subsystem talks about is addressed by a small copyable id
//! instead of a pointer: panels live in an arena, host components live in the
//! [`ComponentTree`](crate::component::ComponentTree), and floating windows are
//! owned by the host and handed back as opaque handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PanelError;

/// Stable identifier for a panel in a panel tree.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(u64);

impl PanelId {
    /// Lowest valid panel ID.
    pub const MIN: Self = Self(1);

    /// Create a new panel ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, PanelError> {
        if raw == 0 {
            return Err(PanelError::ZeroPanelId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, PanelError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(PanelError::PanelIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for PanelId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Opaque handle for a host top-level window.
///
/// Handles are minted by the host's window service. The core never
/// interprets the value; it only stores it and hands it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub u64);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Identifier for a host UI component registered in a component tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u64);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_panel_id_is_rejected() {
        assert_eq!(PanelId::new(0), Err(PanelError::ZeroPanelId));
        assert_eq!(PanelId::new(7).map(PanelId::get), Ok(7));
    }

    #[test]
    fn checked_next_reports_overflow() {
        let last = PanelId::new(u64::MAX).unwrap();
        assert_eq!(
            last.checked_next(),
            Err(PanelError::PanelIdOverflow { current: last })
        );
        assert_eq!(PanelId::MIN.checked_next().unwrap().get(), 2);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = PanelId::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert_eq!(serde_json::to_string(&WindowHandle(9)).unwrap(), "9");
    }
}
