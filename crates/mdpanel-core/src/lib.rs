#![forbid(unsafe_code)]

//! Core vocabulary for mdpanel.
//!
//! This crate holds the leaf types every other layer speaks: stable
//! identifiers, window geometry, the [`PanelState`] value, the error taxonomy,
//! the collaborator traits a host toolkit implements, and the component
//! ancestry tree the focus listener walks.
//!
//! # Role in mdpanel
//! `mdpanel-core` has no behavior of its own. `mdpanel-layout` builds the
//! state model on top of it and `mdpanel-runtime` orchestrates transitions
//! against a host implementing [`host::Host`].

pub mod component;
pub mod error;
pub mod geometry;
pub mod host;
pub mod id;
pub mod state;

pub use component::{ComponentKind, ComponentTree, SlotOwner};
pub use error::{PanelError, TransitionOutcome};
pub use geometry::{Rect, Size};
pub use host::{
    ConfirmPrompt, ConfirmReason, Confirmation, DetailLink, DividerCommand, EditSurface, Host,
    LayoutHost, Slot, TableSurface, WindowAnchor, WindowKind, WindowOwner, WindowPlacement,
    WindowRequest, WindowService,
};
pub use id::{ComponentId, PanelId, WindowHandle};
pub use state::PanelState;
