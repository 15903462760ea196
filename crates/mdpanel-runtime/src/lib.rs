#![forbid(unsafe_code)]

//! Runtime for master/detail panels.
//!
//! [`PanelApp`] drives activation, visibility transitions, floating windows
//! and focus-driven editor activation over a host supplied per call. The
//! remaining modules are its parts:
//!
//! - [`config`]: [`AppConfig`], loadable from TOML or JSON.
//! - [`notify`]: [`PanelEvent`] fan-out to subscribers.
//! - [`active_group`]: the single-active-editor group.
//! - [`focus`]: focus-owner resolution and the listener lifecycle.

pub mod active_group;
pub mod app;
pub mod config;
pub mod focus;
pub mod notify;
mod transitions;

pub use active_group::{ActiveChange, ActiveGroup};
pub use app::{PanelApp, StateSnapshot, TabGesture};
pub use config::{AppConfig, ConfigError};
pub use focus::FocusActivation;
pub use notify::{Notifier, PanelEvent, Subscription, Surface};
