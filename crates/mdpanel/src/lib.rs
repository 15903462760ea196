#![forbid(unsafe_code)]

//! mdpanel public facade crate.
//!
//! Re-exports the types an application needs to declare panels, drive them
//! and implement the host services, plus a prelude for day-to-day usage.
//!
//! ```rust,ignore
//! use mdpanel::prelude::*;
//!
//! let mut app = PanelApp::new(AppConfig::default())?;
//! let orders = app.add_panel(PanelSpec::new("Orders").editor(editor))?;
//! let lines = app.add_panel(PanelSpec::new("Lines").link(link))?;
//! app.add_detail(orders, lines)?;
//! app.finalize()?;
//!
//! app.activate(&mut host, lines)?;
//! app.set_detail_state(&mut host, orders, PanelState::Floating)?;
//! ```

// --- Core re-exports -------------------------------------------------------

pub use mdpanel_core::{
    ComponentId, ComponentKind, ComponentTree, ConfirmPrompt, ConfirmReason, Confirmation,
    DetailLink, DividerCommand, EditSurface, Host, LayoutHost, PanelError, PanelId, PanelState,
    Rect, Size, Slot, SlotOwner, TableSurface, TransitionOutcome, WindowAnchor, WindowHandle,
    WindowKind, WindowOwner, WindowPlacement, WindowRequest, WindowService,
};

// --- Layout re-exports -----------------------------------------------------

pub use mdpanel_layout::{
    Cascade, DetailController, DetailLayout, Direction, EditController, PanelSpec, PanelTree,
    StateConfig, StateCycle, WindowGeometry,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use mdpanel_runtime::{
    AppConfig, ConfigError, FocusActivation, PanelApp, PanelEvent, StateSnapshot, Subscription,
    Surface, TabGesture,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DetailLayout, Direction, EditSurface, Host, PanelError, PanelId, PanelSpec, PanelState,
        StateConfig, StateCycle, TransitionOutcome,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{AppConfig, FocusActivation, PanelApp, PanelEvent, TabGesture};

    pub use crate::{core, layout};

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use mdpanel_core as core;
pub use mdpanel_layout as layout;
#[cfg(feature = "runtime")]
pub use mdpanel_runtime as runtime;
