#![forbid(unsafe_code)]

//! Focus-driven activation.
//!
//! The host forwards every "focus owner changed" notification to
//! [`PanelApp::focus_owner_changed`](crate::PanelApp::focus_owner_changed).
//! Nothing happens unless the listener is installed. Install it once at
//! application start; [`FocusActivation::uninstall`] exists for test
//! isolation.
//!
//! The registration is per UI thread. All panel state lives on that thread,
//! so this is the process-wide listener as far as the panels can tell.
//!
//! # Owner resolution
//!
//! Walking up from the focused component, nearest first:
//!
//! 1. An edit surface owns the focus outright.
//! 2. The first panel seen is the candidate owner.
//! 3. A switched slot seen before any panel resolves to its currently
//!    selected child, so focus inside a tab follows the visible tab.

use std::cell::Cell;

use mdpanel_core::{ComponentId, ComponentKind, ComponentTree, PanelId, SlotOwner};

thread_local! {
    static INSTALLED: Cell<bool> = const { Cell::new(false) };
}

/// Install/uninstall lifecycle of the focus listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusActivation;

impl FocusActivation {
    /// Install the listener. Returns `false` if it already was installed.
    pub fn install() -> bool {
        let fresh = !INSTALLED.with(|flag| flag.replace(true));
        if fresh {
            tracing::debug!(message = "focus.install");
        }
        fresh
    }

    /// Remove the listener. Returns `false` if it was not installed.
    pub fn uninstall() -> bool {
        INSTALLED.with(|flag| flag.replace(false))
    }

    #[must_use]
    pub fn is_installed() -> bool {
        INSTALLED.with(Cell::get)
    }
}

/// The panel owning `component`, or `None` when no panel encloses it.
///
/// `selected` reports the child currently shown by a switched slot.
pub fn resolve_owner(
    components: &ComponentTree,
    component: ComponentId,
    selected: impl Fn(SlotOwner) -> Option<PanelId>,
) -> Option<PanelId> {
    let mut owner = None;
    for (_, kind) in components.ancestors(component) {
        match kind {
            ComponentKind::EditSurface(panel) => return Some(panel),
            ComponentKind::Panel(panel) if owner.is_none() => owner = Some(panel),
            ComponentKind::SwitchedSlot(slot) if owner.is_none() => owner = selected(slot),
            _ => {}
        }
    }
    owner
}
