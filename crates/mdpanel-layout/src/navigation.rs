#![forbid(unsafe_code)]

//! Directional navigation over the panel tree.

use std::fmt;

use mdpanel_core::PanelId;
use serde::{Deserialize, Serialize};

use crate::tree::PanelTree;

/// A navigation or resize direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The panel to activate when navigating from `from`.
///
/// - `Left`/`Right`: previous/next peer in the ring, wrapping.
/// - `Up`: the parent.
/// - `Down`: the first detail panel whose link is active, else the first
///   detail panel.
///
/// Returns `None` when there is no target or `from` is unknown.
#[must_use]
pub fn target(tree: &PanelTree, from: PanelId, direction: Direction) -> Option<PanelId> {
    match direction {
        Direction::Left => tree.previous_sibling(from),
        Direction::Right => tree.next_sibling(from),
        Direction::Up => tree.parent(from),
        Direction::Down => {
            let children = tree.children(from);
            children
                .iter()
                .copied()
                .find(|child| tree.get(*child).is_ok_and(|record| record.link_active()))
                .or_else(|| children.first().copied())
        }
    }
}
