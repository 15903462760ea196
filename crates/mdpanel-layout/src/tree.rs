#![forbid(unsafe_code)]

//! Panel arena with parent back-references and sibling rings.
//!
//! Panels are stored by [`PanelId`] in a single arena. Relationships are ids,
//! never ownership: a detail panel points at its master through `parent`, and
//! peers point at each other through `previous`/`next`. The peer groups are
//!
//! - the detail panels of one master, in declaration order, and
//! - the top-level panels (those without a parent), in creation order.
//!
//! # Lifecycle
//!
//! 1. Panels are added with [`PanelTree::add_panel`].
//! 2. Details are attached with [`PanelTree::add_detail`]. A panel accepts a
//!    parent exactly once.
//! 3. [`PanelTree::finalize`] computes the rings. From then on the structure is
//!    immutable; further `add_*` calls fail with [`PanelError::TreeFinalized`].
//!
//! # Invariants
//!
//! - Every ring is closed: walking `next` `n` times from any member of an
//!   `n`-member group returns to it, and `previous` inverts `next`.
//! - The parent relation is acyclic.

use std::collections::BTreeMap;
use std::fmt;

use mdpanel_core::{DetailLink, EditSurface, PanelError, PanelId, TableSurface};

use crate::detail::DetailLayout;
use crate::state::StateConfig;

/// Everything needed to create a panel.
///
/// Unset options fall back to application-wide defaults when the runtime
/// builds its controllers.
#[derive(Default)]
pub struct PanelSpec {
    caption: String,
    description: Option<String>,
    icon: Option<String>,
    editor: Option<Box<dyn EditSurface>>,
    table: Option<Box<dyn TableSurface>>,
    link: Option<Box<dyn DetailLink>>,
    edit_states: Option<StateConfig>,
    focus_activation: Option<bool>,
    detail_layout: Option<DetailLayout>,
}

impl PanelSpec {
    /// Start a spec with a caption.
    #[must_use]
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Attach an edit surface.
    #[must_use]
    pub fn editor(mut self, editor: impl EditSurface + 'static) -> Self {
        self.editor = Some(Box::new(editor));
        self
    }

    /// Attach a record list.
    #[must_use]
    pub fn table(mut self, table: impl TableSurface + 'static) -> Self {
        self.table = Some(Box::new(table));
        self
    }

    /// Attach the link between this panel's data and its master's selection.
    ///
    /// Only meaningful for panels that become details.
    #[must_use]
    pub fn link(mut self, link: impl DetailLink + 'static) -> Self {
        self.link = Some(Box::new(link));
        self
    }

    /// Override the enabled/initial edit-surface states.
    #[must_use]
    pub fn edit_states(mut self, config: StateConfig) -> Self {
        self.edit_states = Some(config);
        self
    }

    /// Override focus-driven activation for this panel's editor.
    #[must_use]
    pub fn focus_activation(mut self, enabled: bool) -> Self {
        self.focus_activation = Some(enabled);
        self
    }

    /// Override how this panel lays out its detail panels.
    #[must_use]
    pub fn detail_layout(mut self, layout: DetailLayout) -> Self {
        self.detail_layout = Some(layout);
        self
    }
}

/// One node of the arena.
pub struct PanelRecord {
    id: PanelId,
    caption: String,
    description: Option<String>,
    icon: Option<String>,
    editor: Option<Box<dyn EditSurface>>,
    table: Option<Box<dyn TableSurface>>,
    link: Option<Box<dyn DetailLink>>,
    edit_states: Option<StateConfig>,
    focus_activation: Option<bool>,
    detail_layout: Option<DetailLayout>,
    parent: Option<PanelId>,
    children: Vec<PanelId>,
    previous: PanelId,
    next: PanelId,
    initialized: bool,
}

impl PanelRecord {
    #[must_use]
    pub fn id(&self) -> PanelId {
        self.id
    }

    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<PanelId> {
        self.parent
    }

    /// Detail panels in declaration order.
    #[must_use]
    pub fn children(&self) -> &[PanelId] {
        &self.children
    }

    #[must_use]
    pub fn has_editor(&self) -> bool {
        self.editor.is_some()
    }

    #[must_use]
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    #[must_use]
    pub fn editor(&self) -> Option<&dyn EditSurface> {
        self.editor.as_deref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut (dyn EditSurface + 'static)> {
        self.editor.as_deref_mut()
    }

    pub fn table_mut(&mut self) -> Option<&mut (dyn TableSurface + 'static)> {
        self.table.as_deref_mut()
    }

    #[must_use]
    pub fn link(&self) -> Option<&dyn DetailLink> {
        self.link.as_deref()
    }

    pub fn link_mut(&mut self) -> Option<&mut (dyn DetailLink + 'static)> {
        self.link.as_deref_mut()
    }

    /// `true` when the link to the master is active.
    #[must_use]
    pub fn link_active(&self) -> bool {
        self.link.as_ref().is_some_and(|link| link.is_active())
    }

    #[must_use]
    pub fn edit_states(&self) -> Option<&StateConfig> {
        self.edit_states.as_ref()
    }

    #[must_use]
    pub fn focus_activation(&self) -> Option<bool> {
        self.focus_activation
    }

    #[must_use]
    pub fn detail_layout(&self) -> Option<&DetailLayout> {
        self.detail_layout.as_ref()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize the editor and table once.
    ///
    /// Returns `true` on the first call only.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        if let Some(editor) = self.editor.as_deref_mut() {
            editor.initialize();
        }
        if let Some(table) = self.table.as_deref_mut() {
            table.initialize();
        }
        true
    }
}

impl fmt::Debug for PanelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelRecord")
            .field("id", &self.id)
            .field("caption", &self.caption)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("has_editor", &self.editor.is_some())
            .field("has_table", &self.table.is_some())
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

/// Arena of panels.
#[derive(Debug, Default)]
pub struct PanelTree {
    next_id: PanelId,
    nodes: BTreeMap<PanelId, PanelRecord>,
    roots: Vec<PanelId>,
    finalized: bool,
}

impl PanelTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel as a new top-level panel.
    pub fn add_panel(&mut self, spec: PanelSpec) -> Result<PanelId, PanelError> {
        if self.finalized {
            return Err(PanelError::TreeFinalized);
        }
        let id = self.next_id;
        self.next_id = id.checked_next()?;
        let PanelSpec {
            caption,
            description,
            icon,
            editor,
            table,
            link,
            edit_states,
            focus_activation,
            detail_layout,
        } = spec;
        self.nodes.insert(
            id,
            PanelRecord {
                id,
                caption,
                description,
                icon,
                editor,
                table,
                link,
                edit_states,
                focus_activation,
                detail_layout,
                parent: None,
                children: Vec::new(),
                previous: id,
                next: id,
                initialized: false,
            },
        );
        self.roots.push(id);
        Ok(id)
    }

    /// Attach `detail` as the last detail panel of `master`.
    pub fn add_detail(&mut self, master: PanelId, detail: PanelId) -> Result<(), PanelError> {
        if self.finalized {
            return Err(PanelError::TreeFinalized);
        }
        self.get(master)?;
        let detail_record = self.get(detail)?;
        if master == detail {
            return Err(PanelError::SelfParent { panel: master });
        }
        if let Some(existing) = detail_record.parent {
            return Err(PanelError::ParentAlreadyAssigned {
                child: detail,
                existing,
                requested: master,
            });
        }
        if self.ancestors(master).any(|ancestor| ancestor == detail) {
            return Err(PanelError::DetailCycle { master, detail });
        }
        self.get_mut(detail)?.parent = Some(master);
        self.get_mut(master)?.children.push(detail);
        self.roots.retain(|root| *root != detail);
        Ok(())
    }

    /// Compute the sibling rings and freeze the structure.
    ///
    /// Calling it again is a no-op.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let mut groups: Vec<Vec<PanelId>> = vec![self.roots.clone()];
        groups.extend(
            self.nodes
                .values()
                .filter(|node| !node.children.is_empty())
                .map(|node| node.children.clone()),
        );
        for group in &groups {
            let len = group.len();
            for (index, id) in group.iter().enumerate() {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.previous = group[(index + len - 1) % len];
                    node.next = group[(index + 1) % len];
                }
            }
        }
        self.finalized = true;
        tracing::debug!(
            message = "panel_tree.finalize",
            panels = self.nodes.len(),
            roots = self.roots.len()
        );
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Fail with [`PanelError::TreeNotFinalized`] until [`Self::finalize`].
    pub fn require_finalized(&self) -> Result<(), PanelError> {
        if self.finalized {
            Ok(())
        } else {
            Err(PanelError::TreeNotFinalized)
        }
    }

    pub fn get(&self, id: PanelId) -> Result<&PanelRecord, PanelError> {
        self.nodes
            .get(&id)
            .ok_or(PanelError::UnknownPanel { panel: id })
    }

    pub fn get_mut(&mut self, id: PanelId) -> Result<&mut PanelRecord, PanelError> {
        self.nodes
            .get_mut(&id)
            .ok_or(PanelError::UnknownPanel { panel: id })
    }

    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// All panels in id order.
    pub fn panels(&self) -> impl Iterator<Item = &PanelRecord> {
        self.nodes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level panels in creation order.
    #[must_use]
    pub fn roots(&self) -> &[PanelId] {
        &self.roots
    }

    #[must_use]
    pub fn parent(&self, id: PanelId) -> Option<PanelId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    #[must_use]
    pub fn children(&self, id: PanelId) -> &[PanelId] {
        self.nodes
            .get(&id)
            .map_or(&[][..], |node| node.children.as_slice())
    }

    /// Previous peer in the ring, wrapping. `None` before finalization.
    #[must_use]
    pub fn previous_sibling(&self, id: PanelId) -> Option<PanelId> {
        if !self.finalized {
            return None;
        }
        self.nodes.get(&id).map(|node| node.previous)
    }

    /// Next peer in the ring, wrapping. `None` before finalization.
    #[must_use]
    pub fn next_sibling(&self, id: PanelId) -> Option<PanelId> {
        if !self.finalized {
            return None;
        }
        self.nodes.get(&id).map(|node| node.next)
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: PanelId) -> impl Iterator<Item = PanelId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// The top-level panel `id` belongs to (itself when it has no parent).
    #[must_use]
    pub fn top_level(&self, id: PanelId) -> PanelId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Every strict descendant of `id`, depth first in declaration order.
    #[must_use]
    pub fn descendants(&self, id: PanelId) -> Vec<PanelId> {
        let mut out = Vec::new();
        let mut stack: Vec<PanelId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}
