#![forbid(unsafe_code)]

//! State model for mdpanel.
//!
//! - [`state`]: enabled-state subsets and the cyclic successor mapper.
//! - [`tree`]: the panel arena with parent back-references and sibling rings.
//! - [`navigation`]: directional target resolution over the tree.
//! - [`window`]: floating window geometry and the per-owner registry.
//! - [`detail`] / [`edit`]: per-panel controllers holding visibility state.
//!
//! Nothing here talks to a host except [`window::FloatingWindows`], which
//! forwards to a [`mdpanel_core::WindowService`].

pub mod detail;
pub mod edit;
pub mod navigation;
pub mod state;
pub mod tree;
pub mod window;

pub use detail::{Cascade, DetailController, DetailLayout, TabbedDetail};
pub use edit::EditController;
pub use navigation::Direction;
pub use state::{StateConfig, StateCycle};
pub use tree::{PanelRecord, PanelSpec, PanelTree};
pub use window::{FloatingWindows, WindowGeometry};
