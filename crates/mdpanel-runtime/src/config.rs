#![forbid(unsafe_code)]

//! Application configuration as data.
//!
//! [`AppConfig`] collects every application-wide default consumed once, when
//! the panels are finalized. Per-panel overrides go through
//! [`PanelSpec`](mdpanel_layout::PanelSpec) and
//! [`DetailLayout`](mdpanel_layout::DetailLayout).
//!
//! # Loading
//!
//! ```toml
//! # mdpanel.toml
//! [panels]
//! focus_activation = true
//! window_kind = "frame"
//! edit_states = ["embedded", "floating"]
//!
//! [detail]
//! enabled_states = ["hidden", "embedded"]
//! initial_state = "hidden"
//! cascade = "descendants"
//!
//! [detail_window]
//! size_ratio = 0.66
//! ```
//!
//! ```rust,ignore
//! let config = AppConfig::from_toml_file("mdpanel.toml")?;
//! let config = AppConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `AppConfig::default()` enables all three states everywhere in the order
//! `hidden, embedded, floating`, starts embedded, and sizes detail windows at
//! 0.66 of the parent window.

#[cfg(feature = "config-files")]
use std::path::Path;

use mdpanel_core::{PanelError, PanelState, WindowKind};
use mdpanel_layout::window::{DEFAULT_SIZE_RATIO, DEFAULT_TITLE_BAR_OFFSET};
use mdpanel_layout::{Cascade, StateConfig, StateCycle, WindowGeometry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default divider resize step in pixels.
pub const DEFAULT_RESIZE_STEP: u32 = 30;

// ---------------------------------------------------------------------------
// Top-level AppConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub panels: PanelsConfig,
    pub detail: DetailConfig,
    pub detail_window: DetailWindowConfig,
    pub resize: ResizeConfig,
}

impl AppConfig {
    /// Parse from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Render as pretty TOML.
    #[cfg(feature = "config-files")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    /// Every problem with this configuration, in section order.
    ///
    /// An empty list means the configuration is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(err) = state_config(&self.panels.edit_states, self.panels.initial_edit_state) {
            errors.push(format!("panels.edit_states / initial_edit_state: {err}"));
        }
        if let Err(err) = state_config(&self.detail.enabled_states, self.detail.initial_state) {
            errors.push(format!("detail.enabled_states / initial_state: {err}"));
        }
        if self.detail.window_title_suffix.trim().is_empty() {
            errors.push("detail.window_title_suffix must not be empty".into());
        }

        let ratio = self.detail_window.size_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            errors.push(format!(
                "detail_window.size_ratio must be in (0, 1], got {ratio}"
            ));
        }

        if self.resize.step == 0 {
            errors.push("resize.step must be > 0".into());
        }

        errors
    }

    /// Fail with [`ConfigError::Validation`] unless [`Self::validate`] is
    /// clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Default edit-surface states.
    pub fn edit_state_config(&self) -> Result<StateConfig, PanelError> {
        state_config(&self.panels.edit_states, self.panels.initial_edit_state)
    }

    /// Default detail-area states.
    pub fn detail_state_config(&self) -> Result<StateConfig, PanelError> {
        state_config(&self.detail.enabled_states, self.detail.initial_state)
    }

    /// Floating window sizing.
    pub fn window_geometry(&self) -> Result<WindowGeometry, PanelError> {
        WindowGeometry::new(
            self.detail_window.size_ratio,
            self.detail_window.title_bar_offset,
        )
    }
}

fn state_config(states: &[PanelState], initial: PanelState) -> Result<StateConfig, PanelError> {
    StateConfig::new(StateCycle::new(states.iter().copied())?, initial)
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[panels]`: behavior shared by every panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Focus entering an editor marks it the active editor.
    pub focus_activation: bool,
    /// Directional navigation commands are honored.
    pub keyboard_navigation: bool,
    /// Every editor is permanently active; the exclusive group stays empty.
    pub all_panels_active: bool,
    /// Flavor of every floating window.
    pub window_kind: WindowKind,
    /// Edit windows close on Escape.
    pub dispose_edit_window_on_escape: bool,
    /// Enabled edit-surface states, in toggle order.
    pub edit_states: Vec<PanelState>,
    /// Initial edit-surface state.
    pub initial_edit_state: PanelState,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            focus_activation: true,
            keyboard_navigation: true,
            all_panels_active: false,
            window_kind: WindowKind::Dialog,
            dispose_edit_window_on_escape: true,
            edit_states: PanelState::ALL.to_vec(),
            initial_edit_state: PanelState::Embedded,
        }
    }
}

/// `[detail]`: tabbed detail areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    pub enabled_states: Vec<PanelState>,
    pub initial_state: PanelState,
    /// Which floating detail areas are hidden when a master's area stops
    /// floating.
    pub cascade: Cascade,
    /// Detail window titles read `"<master caption> - <suffix>"`.
    pub window_title_suffix: String,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            enabled_states: PanelState::ALL.to_vec(),
            initial_state: PanelState::Embedded,
            cascade: Cascade::Siblings,
            window_title_suffix: "Detail tables".into(),
        }
    }
}

/// `[detail_window]`: detail window sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailWindowConfig {
    pub size_ratio: f64,
    pub title_bar_offset: u32,
}

impl Default for DetailWindowConfig {
    fn default() -> Self {
        Self {
            size_ratio: DEFAULT_SIZE_RATIO,
            title_bar_offset: DEFAULT_TITLE_BAR_OFFSET,
        }
    }
}

/// `[resize]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Divider move per resize command, in pixels.
    pub step: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_RESIZE_STEP,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[cfg(feature = "config-files")]
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[source] toml::ser::Error),
    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
