#![forbid(unsafe_code)]

//! Mock per-panel collaborators.
//!
//! Each mock is moved into the panel arena, so tests observe it through a
//! probe that shares its state.

use std::cell::Cell;
use std::rc::Rc;

use mdpanel_core::{DetailLink, EditSurface, Size, TableSurface};

// ============================================================================
// Detail link
// ============================================================================

/// Shared view of a [`MockLink`].
#[derive(Debug, Clone, Default)]
pub struct LinkProbe {
    active: Rc<Cell<bool>>,
    changes: Rc<Cell<u32>>,
}

impl LinkProbe {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Flip the link from outside, as a record model would.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// Number of `set_active` calls that changed the value.
    #[must_use]
    pub fn changes(&self) -> u32 {
        self.changes.get()
    }
}

#[derive(Debug, Default)]
pub struct MockLink {
    probe: LinkProbe,
}

impl MockLink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn probed() -> (Self, LinkProbe) {
        let link = Self::new();
        let probe = link.probe.clone();
        (link, probe)
    }
}

impl DetailLink for MockLink {
    fn set_active(&mut self, active: bool) {
        if self.probe.active.get() != active {
            self.probe.changes.set(self.probe.changes.get() + 1);
        }
        self.probe.active.set(active);
    }

    fn is_active(&self) -> bool {
        self.probe.active.get()
    }
}

// ============================================================================
// Edit surface
// ============================================================================

/// Shared view of a [`MockEditor`].
#[derive(Debug, Clone, Default)]
pub struct EditorProbe {
    initialized: Rc<Cell<u32>>,
    focus_requests: Rc<Cell<u32>>,
    modified: Rc<Cell<bool>>,
}

impl EditorProbe {
    #[must_use]
    pub fn initialized(&self) -> u32 {
        self.initialized.get()
    }

    #[must_use]
    pub fn focus_requests(&self) -> u32 {
        self.focus_requests.get()
    }

    /// Mark the editor as holding (or not holding) unsaved edits.
    pub fn set_modified(&self, modified: bool) {
        self.modified.set(modified);
    }
}

#[derive(Debug, Default)]
pub struct MockEditor {
    probe: EditorProbe,
    preferred_size: Option<Size>,
}

impl MockEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_preferred_size(mut self, size: Size) -> Self {
        self.preferred_size = Some(size);
        self
    }

    #[must_use]
    pub fn probe(&self) -> EditorProbe {
        self.probe.clone()
    }

    #[must_use]
    pub fn probed() -> (Self, EditorProbe) {
        let editor = Self::new();
        let probe = editor.probe();
        (editor, probe)
    }
}

impl EditSurface for MockEditor {
    fn initialize(&mut self) {
        self.probe.initialized.set(self.probe.initialized.get() + 1);
    }

    fn request_initial_focus(&mut self) {
        self.probe
            .focus_requests
            .set(self.probe.focus_requests.get() + 1);
    }

    fn is_modified(&self) -> bool {
        self.probe.modified.get()
    }

    fn preferred_size(&self) -> Option<Size> {
        self.preferred_size
    }
}

// ============================================================================
// Table surface
// ============================================================================

/// Shared view of a [`MockTable`].
#[derive(Debug, Clone, Default)]
pub struct TableProbe {
    initialized: Rc<Cell<u32>>,
    focus_requests: Rc<Cell<u32>>,
}

impl TableProbe {
    #[must_use]
    pub fn initialized(&self) -> u32 {
        self.initialized.get()
    }

    #[must_use]
    pub fn focus_requests(&self) -> u32 {
        self.focus_requests.get()
    }
}

#[derive(Debug, Default)]
pub struct MockTable {
    probe: TableProbe,
}

impl MockTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn probed() -> (Self, TableProbe) {
        let table = Self::new();
        let probe = table.probe.clone();
        (table, probe)
    }
}

impl TableSurface for MockTable {
    fn initialize(&mut self) {
        self.probe.initialized.set(self.probe.initialized.get() + 1);
    }

    fn request_focus(&mut self) {
        self.probe
            .focus_requests
            .set(self.probe.focus_requests.get() + 1);
    }
}
