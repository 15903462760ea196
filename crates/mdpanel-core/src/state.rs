#![forbid(unsafe_code)]

//! The three-valued visibility mode shared by detail areas and edit surfaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility mode of a detail area or an edit surface.
///
/// Serializes as `"hidden" | "embedded" | "floating"` so a preferences
/// collaborator can persist the last used value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    /// Content is removed from its slot but stays initialized.
    Hidden,
    /// Content occupies its slot inside the owning panel.
    Embedded,
    /// Content lives in its own top-level window.
    Floating,
}

impl PanelState {
    /// All states, in declaration order.
    pub const ALL: [PanelState; 3] = [Self::Hidden, Self::Embedded, Self::Floating];

    /// Successor in the fixed toggle cycle `FLOATING -> HIDDEN -> EMBEDDED -> FLOATING`.
    ///
    /// This is the one-keystroke toggle of a detail area. Edit surfaces use
    /// their configurable enabled-state cycle instead.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Floating => Self::Hidden,
            Self::Hidden => Self::Embedded,
            Self::Embedded => Self::Floating,
        }
    }

    /// `true` unless the state is [`PanelState::Hidden`].
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Embedded => "embedded",
            Self::Floating => "floating",
        }
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
