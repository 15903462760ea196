#![forbid(unsafe_code)]

//! Test fixtures for mdpanel.
//!
//! - [`RecordingHost`]: a host that records window, slot, focus and divider
//!   calls and answers confirmations from a script.
//! - [`MockLink`], [`MockEditor`], [`MockTable`]: per-panel collaborators
//!   observable through shared probes.
//! - [`logs::capture`]: collect `tracing` events emitted by a closure.

pub mod host;
pub mod logs;
pub mod mocks;

pub use host::RecordingHost;
pub use logs::{CapturedEvent, capture};
pub use mocks::{EditorProbe, LinkProbe, MockEditor, MockLink, MockTable, TableProbe};
