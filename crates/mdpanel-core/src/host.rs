#![forbid(unsafe_code)]

//! Collaborator interfaces.
//!
//! The activation subsystem owns no widgets. Everything it needs from the
//! outside world is expressed here as a small trait:
//!
//! - [`DetailLink`]: the record-level link between a master selection and a
//!   detail data source (one per detail panel).
//! - [`EditSurface`] / [`TableSurface`]: the editor and record list owned by a
//!   panel.
//! - [`WindowService`]: creates, disposes and raises top-level windows.
//! - [`Confirmation`]: the one synchronous, blocking yes/no prompt.
//! - [`LayoutHost`]: moves content in and out of container slots and routes
//!   focus requests to host widgets.
//!
//! Per-panel collaborators are boxed into the panel arena. Toolkit-wide
//! services are passed to each operation as a single `&mut dyn Host`.
//!
//! All calls happen on the UI thread. Hosts that finish work on another
//! thread must marshal back before calling into the core.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};
use crate::id::{PanelId, WindowHandle};

/// Link between a master selection and one detail data source.
pub trait DetailLink {
    /// Activate or deactivate the link.
    fn set_active(&mut self, active: bool);
    /// Current activation.
    fn is_active(&self) -> bool;
}

/// The editor owned by a panel.
pub trait EditSurface {
    /// Build the editor UI. Must be idempotent.
    fn initialize(&mut self);
    /// Move keyboard focus to the editor's initial input component.
    fn request_initial_focus(&mut self);
    /// `true` when there are unsaved edits that a hide would discard.
    fn is_modified(&self) -> bool;
    /// Preferred floating window size, if the editor has one.
    fn preferred_size(&self) -> Option<Size> {
        None
    }
}

/// The record list owned by a panel.
pub trait TableSurface {
    /// Build the table UI. Must be idempotent.
    fn initialize(&mut self);
    /// Move keyboard focus to the table.
    fn request_focus(&mut self);
}

/// Top-level window flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Non-modal dialog owned by the panel's window.
    #[default]
    Dialog,
    /// Independent frame.
    Frame,
}

/// Who a floating window belongs to.
///
/// A panel can own at most one window per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOwner {
    /// The detail area of a master panel.
    Detail { master: PanelId },
    /// The edit surface of a panel.
    Edit { panel: PanelId },
}

impl WindowOwner {
    /// The panel owning the window.
    #[must_use]
    pub const fn panel(self) -> PanelId {
        match self {
            Self::Detail { master } => master,
            Self::Edit { panel } => panel,
        }
    }
}

/// What a window position is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowAnchor {
    /// The top-level window currently containing the panel.
    ParentWindow(PanelId),
    /// The panel's table display, when it is showing.
    Table(PanelId),
    /// The panel itself, when it is showing.
    Panel(PanelId),
}

/// Where a new window goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPlacement {
    /// Explicit bounds in screen coordinates.
    Bounds(Rect),
    /// Let the host decide.
    Auto,
}

/// Everything the window service needs to create a floating window.
///
/// The close callback is implicit: when the user closes the window, the host
/// reports the returned [`WindowHandle`] back to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRequest {
    pub owner: WindowOwner,
    pub title: String,
    pub icon: Option<String>,
    pub kind: WindowKind,
    pub placement: WindowPlacement,
    pub dispose_on_escape: bool,
}

/// Creates and manages owned top-level windows.
pub trait WindowService {
    /// Create and show a window hosting the owner's content.
    fn open_window(&mut self, request: WindowRequest) -> WindowHandle;
    /// Hide and destroy a window. Never reused afterwards.
    fn dispose_window(&mut self, handle: WindowHandle);
    /// Raise a window above its siblings.
    fn bring_to_front(&mut self, handle: WindowHandle);
    /// Screen bounds of an anchor, or `None` if it is not showing.
    fn anchor_bounds(&self, anchor: WindowAnchor) -> Option<Rect>;
}

/// Why a confirmation is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmReason {
    /// Hiding an edit surface that holds unsaved edits.
    HideEditor,
    /// Hiding a detail area whose shown detail holds unsaved edits.
    HideDetail,
}

/// A confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfirmPrompt {
    /// The panel whose edits would be discarded.
    pub panel: PanelId,
    pub reason: ConfirmReason,
}

/// Synchronous, modal yes/no prompt.
pub trait Confirmation {
    /// Block until the user answers. `false` cancels the transition.
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

/// A container slot whose occupant the core controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    /// The detail side of a master panel's split.
    Detail { master: PanelId },
    /// The edit area of a panel.
    Edit { panel: PanelId },
}

/// Split divider adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividerCommand {
    /// Move the divider right by this many pixels.
    Grow(u32),
    /// Move the divider left by this many pixels.
    Shrink(u32),
    /// Expand the detail side fully, or restore preferred sizes if already
    /// expanded or collapsed.
    Expand,
    /// Collapse the detail side fully, or restore preferred sizes if already
    /// expanded or collapsed.
    Collapse,
}

/// Containment and focus operations on host widgets.
pub trait LayoutHost {
    /// Put `occupant`'s content into `slot`, or empty it with `None`.
    fn set_slot(&mut self, slot: Slot, occupant: Option<PanelId>);
    /// Show `detail`'s tab in `master`'s tabbed detail container.
    fn select_detail_tab(&mut self, master: PanelId, detail: PanelId);
    /// Show a top-level panel in the application layout.
    fn select_application_panel(&mut self, panel: PanelId);
    /// Focus the panel itself (neither editor nor table is available).
    fn focus_panel(&mut self, panel: PanelId);
    /// Adjust the divider of `master`'s detail split.
    fn move_divider(&mut self, master: PanelId, command: DividerCommand) {
        let _ = (master, command);
    }
}

/// All toolkit-wide services, passed to every operation.
pub trait Host: WindowService + Confirmation + LayoutHost {}

impl<T: WindowService + Confirmation + LayoutHost + ?Sized> Host for T {}
