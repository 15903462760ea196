#![forbid(unsafe_code)]

//! Floating window geometry and the per-owner window registry.
//!
//! A [`FloatingWindows`] registry maps each [`WindowOwner`] to the single
//! live host window it owns. Windows are created lazily, never reused, and
//! forgotten when disposed or when the user closes them.

use std::collections::BTreeMap;

use mdpanel_core::{
    PanelError, Rect, Size, WindowHandle, WindowOwner, WindowPlacement, WindowRequest,
    WindowService,
};

/// Default fraction of the parent window a detail window covers.
pub const DEFAULT_SIZE_RATIO: f64 = 0.66;
/// Default upward offset leaving room for the parent's title bar.
pub const DEFAULT_TITLE_BAR_OFFSET: u32 = 38;

/// Sizing rules for floating windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowGeometry {
    size_ratio: f64,
    title_bar_offset: u32,
}

impl WindowGeometry {
    /// Validate and build. `size_ratio` must lie in `(0, 1]`.
    pub fn new(size_ratio: f64, title_bar_offset: u32) -> Result<Self, PanelError> {
        if !(size_ratio > 0.0 && size_ratio <= 1.0) {
            return Err(PanelError::InvalidConfig(format!(
                "detail window size ratio must be in (0, 1], got {size_ratio}"
            )));
        }
        Ok(Self {
            size_ratio,
            title_bar_offset,
        })
    }

    #[must_use]
    pub fn size_ratio(&self) -> f64 {
        self.size_ratio
    }

    #[must_use]
    pub fn title_bar_offset(&self) -> u32 {
        self.title_bar_offset
    }

    /// Bounds of a detail window for a parent window at `parent`.
    ///
    /// The width is scaled by the ratio. The height is scaled only when the
    /// master shows an editor above its detail area, otherwise it spans the
    /// parent. The window sits flush with the parent's bottom-right corner,
    /// lifted by the title bar offset.
    #[must_use]
    pub fn detail_bounds(&self, parent: Rect, master_has_editor: bool) -> Rect {
        let width = self.scale(parent.width);
        let height = if master_has_editor {
            self.scale(parent.height)
        } else {
            parent.height
        };
        let x = i64::from(parent.x) + i64::from(parent.width) - i64::from(width);
        let y = i64::from(parent.y) + i64::from(parent.height)
            - i64::from(height)
            - i64::from(self.title_bar_offset);
        Rect::new(clamp_i32(x), clamp_i32(y), width, height)
    }

    /// Placement of a detail window; `Auto` when the parent is not showing.
    #[must_use]
    pub fn detail_placement(
        &self,
        parent: Option<Rect>,
        master_has_editor: bool,
    ) -> WindowPlacement {
        match parent {
            Some(parent) => WindowPlacement::Bounds(self.detail_bounds(parent, master_has_editor)),
            None => WindowPlacement::Auto,
        }
    }

    /// Placement of an edit window: centered over `anchor` at the editor's
    /// preferred size, or `Auto` when either is unknown.
    #[must_use]
    pub fn edit_placement(
        &self,
        anchor: Option<Rect>,
        preferred: Option<Size>,
    ) -> WindowPlacement {
        match (anchor, preferred) {
            (Some(anchor), Some(size)) => WindowPlacement::Bounds(anchor.centered(size)),
            _ => WindowPlacement::Auto,
        }
    }

    fn scale(&self, extent: u32) -> u32 {
        // Truncation matches integer pixel sizing.
        (f64::from(extent) * self.size_ratio) as u32
    }
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            size_ratio: DEFAULT_SIZE_RATIO,
            title_bar_offset: DEFAULT_TITLE_BAR_OFFSET,
        }
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Live floating windows, at most one per owner.
#[derive(Debug, Default)]
pub struct FloatingWindows {
    open: BTreeMap<WindowOwner, WindowHandle>,
    created: u64,
    disposed: u64,
}

impl FloatingWindows {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window for `request.owner` unless one is already live.
    ///
    /// Returns the live handle either way. An existing window is raised
    /// instead of duplicated.
    pub fn open(
        &mut self,
        service: &mut (impl WindowService + ?Sized),
        request: WindowRequest,
    ) -> WindowHandle {
        let owner = request.owner;
        if let Some(handle) = self.open.get(&owner).copied() {
            service.bring_to_front(handle);
            return handle;
        }
        let handle = service.open_window(request);
        self.open.insert(owner, handle);
        self.created += 1;
        tracing::debug!(message = "window.open", ?owner, %handle);
        handle
    }

    /// Dispose the owner's window, if any. Returns `true` if one was live.
    pub fn dispose(
        &mut self,
        service: &mut (impl WindowService + ?Sized),
        owner: WindowOwner,
    ) -> bool {
        let Some(handle) = self.open.remove(&owner) else {
            return false;
        };
        service.dispose_window(handle);
        self.disposed += 1;
        tracing::debug!(message = "window.dispose", ?owner, %handle);
        true
    }

    /// Drop the record of a window the host already closed.
    ///
    /// Returns its owner, or `None` for a handle this registry never issued
    /// (or already forgot).
    pub fn forget(&mut self, handle: WindowHandle) -> Option<WindowOwner> {
        let owner = self.owner_of(handle)?;
        self.open.remove(&owner);
        tracing::debug!(message = "window.closed_by_user", ?owner, %handle);
        Some(owner)
    }

    /// Raise the owner's window if it is live.
    pub fn bring_to_front(
        &self,
        service: &mut (impl WindowService + ?Sized),
        owner: WindowOwner,
    ) -> bool {
        match self.open.get(&owner) {
            Some(handle) => {
                service.bring_to_front(*handle);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn handle(&self, owner: WindowOwner) -> Option<WindowHandle> {
        self.open.get(&owner).copied()
    }

    #[must_use]
    pub fn owner_of(&self, handle: WindowHandle) -> Option<WindowOwner> {
        self.open
            .iter()
            .find_map(|(owner, live)| (*live == handle).then_some(*owner))
    }

    #[must_use]
    pub fn is_open(&self, owner: WindowOwner) -> bool {
        self.open.contains_key(&owner)
    }

    /// Number of live windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Windows opened through this registry since creation.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    /// Windows disposed through this registry since creation.
    #[must_use]
    pub fn disposed(&self) -> u64 {
        self.disposed
    }
}
