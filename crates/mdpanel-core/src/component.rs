#![forbid(unsafe_code)]

//! Host component ancestry.
//!
//! The focus-activation listener receives "focus owner changed to component C"
//! and must find the panel that owns C. Hosts mirror the relevant part of
//! their widget hierarchy here: every component that can receive focus, plus
//! the panels, edit surfaces and switched (tabbed) containers above it.
//!
//! # Invariants
//!
//! 1. A component's parent is registered before the component itself, so the
//!    parent chain is acyclic and always terminates.
//! 2. Removing a component removes its whole subtree.

use rustc_hash::FxHashMap;

use crate::error::PanelError;
use crate::id::{ComponentId, PanelId};

/// Owner of a switched single-slot container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotOwner {
    /// A master panel's tabbed detail container.
    Detail(PanelId),
    /// The application-level tabbed layout of top-level panels.
    Application,
}

/// What a registered component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Any ordinary widget.
    Plain,
    /// The root component of a panel.
    Panel(PanelId),
    /// The root component of a panel's edit surface.
    EditSurface(PanelId),
    /// A container showing one child at a time (a tabbed pane).
    SwitchedSlot(SlotOwner),
}

#[derive(Debug, Clone)]
struct ComponentNode {
    parent: Option<ComponentId>,
    kind: ComponentKind,
    children: Vec<ComponentId>,
}

/// Arena of host components with parent links.
#[derive(Debug, Clone, Default)]
pub struct ComponentTree {
    nodes: FxHashMap<ComponentId, ComponentNode>,
}

impl ComponentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component under `parent` (or as a root).
    pub fn insert(
        &mut self,
        id: ComponentId,
        parent: Option<ComponentId>,
        kind: ComponentKind,
    ) -> Result<(), PanelError> {
        if self.nodes.contains_key(&id) {
            return Err(PanelError::DuplicateComponent { component: id });
        }
        if let Some(parent) = parent {
            let Some(parent_node) = self.nodes.get_mut(&parent) else {
                return Err(PanelError::UnknownComponent { component: parent });
            };
            parent_node.children.push(id);
        }
        self.nodes.insert(
            id,
            ComponentNode {
                parent,
                kind,
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Remove a component and everything below it.
    ///
    /// Returns the number of removed components.
    pub fn remove(&mut self, id: ComponentId) -> Result<usize, PanelError> {
        let Some(node) = self.nodes.get(&id) else {
            return Err(PanelError::UnknownComponent { component: id });
        };
        if let Some(parent) = node.parent
            && let Some(parent_node) = self.nodes.get_mut(&parent)
        {
            parent_node.children.retain(|child| *child != id);
        }
        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                removed += 1;
                stack.extend(node.children);
            }
        }
        Ok(removed)
    }

    /// Kind of a registered component.
    #[must_use]
    pub fn kind(&self, id: ComponentId) -> Option<ComponentKind> {
        self.nodes.get(&id).map(|node| node.kind)
    }

    /// Parent of a registered component.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    /// `true` if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk from `id` (inclusive) up to its root.
    ///
    /// Yields nothing when `id` is not registered.
    pub fn ancestors(&self, id: ComponentId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }
}

/// Iterator over a component and its ancestors, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a ComponentTree,
    next: Option<ComponentId>,
}

impl Iterator for Ancestors<'_> {
    type Item = (ComponentId, ComponentKind);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.nodes.get(&id)?;
        self.next = node.parent;
        Some((id, node.kind))
    }
}
