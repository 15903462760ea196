#![forbid(unsafe_code)]

//! The panel application.
//!
//! [`PanelApp`] owns the panel arena, one controller per panel, the floating
//! window registry, the active-editor group, the component ancestry used for
//! focus resolution and the notification channel. Host services are passed
//! into each operation as `&mut dyn Host`.
//!
//! # Lifecycle
//!
//! 1. Build: [`PanelApp::add_panel`], [`PanelApp::add_detail`],
//!    [`PanelApp::subscribe`].
//! 2. [`PanelApp::finalize`]: rings are computed, controllers are created,
//!    detail links are synchronized and the notifier is sealed.
//! 3. Run: every other operation. Calling one before finalization fails with
//!    [`PanelError::TreeNotFinalized`].
//!
//! # Activation
//!
//! `activate(P)` walks the ancestor chain from the top-level panel down. Each
//! master selects the next panel of the chain in its detail area and reveals
//! the area if it is hidden. Then `P` is initialized (once), focused, and
//! observers receive [`PanelEvent::Activated`].

use std::collections::BTreeMap;

use mdpanel_core::{
    ComponentId, ComponentTree, DividerCommand, Host, PanelError, PanelId, PanelState, Slot,
    TransitionOutcome, WindowHandle, WindowOwner,
};
use mdpanel_layout::navigation::{self, Direction};
use mdpanel_layout::{
    DetailController, DetailLayout, EditController, FloatingWindows, PanelSpec, PanelTree,
    StateConfig, TabbedDetail, WindowGeometry,
};
use serde::{Deserialize, Serialize};

use crate::active_group::ActiveGroup;
use crate::config::AppConfig;
use crate::focus::{self, FocusActivation};
use crate::notify::{Notifier, PanelEvent, Subscription};

/// Mouse gestures on a detail tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabGesture {
    /// Primary button, two clicks: toggle floating and embedded.
    DoubleClick,
    /// Middle button: toggle embedded and hidden.
    MiddleClick,
}

/// Serializable view of every controller's state.
///
/// Holds no window data; a preferences collaborator can store it and feed the
/// values back through the setters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Detail-area state per master with a tabbed layout.
    pub detail: BTreeMap<PanelId, PanelState>,
    /// Selected detail panel per master with a tabbed layout.
    pub selected: BTreeMap<PanelId, PanelId>,
    /// Edit-surface state per panel with an editor.
    pub edit: BTreeMap<PanelId, PanelState>,
    /// The active editor, if any.
    pub active: Option<PanelId>,
    /// The top-level panel shown by the application layout.
    pub application: Option<PanelId>,
}

/// Owner of the panel tree and every controller hanging off it.
pub struct PanelApp {
    pub(crate) config: AppConfig,
    pub(crate) edit_defaults: StateConfig,
    pub(crate) detail_defaults: StateConfig,
    pub(crate) geometry: WindowGeometry,
    pub(crate) tree: PanelTree,
    pub(crate) details: BTreeMap<PanelId, DetailController>,
    pub(crate) edits: BTreeMap<PanelId, EditController>,
    pub(crate) windows: FloatingWindows,
    pub(crate) group: ActiveGroup,
    pub(crate) components: ComponentTree,
    pub(crate) notifier: Notifier,
    pub(crate) application_panel: Option<PanelId>,
}

impl std::fmt::Debug for PanelApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelApp")
            .field("tree", &self.tree)
            .field("details", &self.details)
            .field("edits", &self.edits)
            .field("windows", &self.windows)
            .field("group", &self.group)
            .field("application_panel", &self.application_panel)
            .finish_non_exhaustive()
    }
}

impl Default for PanelApp {
    fn default() -> Self {
        Self::from_parts(
            AppConfig::default(),
            StateConfig::default(),
            StateConfig::default(),
            WindowGeometry::default(),
        )
    }
}

impl PanelApp {
    /// Create an empty application. Fails when `config` does not validate.
    pub fn new(config: AppConfig) -> Result<Self, PanelError> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(PanelError::InvalidConfig(problems.join("; ")));
        }
        let edit_defaults = config.edit_state_config()?;
        let detail_defaults = config.detail_state_config()?;
        let geometry = config.window_geometry()?;
        Ok(Self::from_parts(
            config,
            edit_defaults,
            detail_defaults,
            geometry,
        ))
    }

    fn from_parts(
        config: AppConfig,
        edit_defaults: StateConfig,
        detail_defaults: StateConfig,
        geometry: WindowGeometry,
    ) -> Self {
        Self {
            config,
            edit_defaults,
            detail_defaults,
            geometry,
            tree: PanelTree::new(),
            details: BTreeMap::new(),
            edits: BTreeMap::new(),
            windows: FloatingWindows::new(),
            group: ActiveGroup::new(),
            components: ComponentTree::new(),
            notifier: Notifier::new(),
            application_panel: None,
        }
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    pub fn add_panel(&mut self, spec: PanelSpec) -> Result<PanelId, PanelError> {
        self.tree.add_panel(spec)
    }

    /// Attach `detail` under `master`. A panel accepts a master only once.
    pub fn add_detail(&mut self, master: PanelId, detail: PanelId) -> Result<(), PanelError> {
        self.tree.add_detail(master, detail)
    }

    /// Register an observer for every [`PanelEvent`].
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&PanelEvent) + 'static,
    ) -> Result<Subscription, PanelError> {
        self.notifier.subscribe(callback)
    }

    /// Freeze the structure and create the controllers. Idempotent.
    pub fn finalize(&mut self) -> Result<(), PanelError> {
        if self.tree.is_finalized() {
            return Ok(());
        }
        self.tree.finalize();

        let default_layout = DetailLayout::default();
        for record in self.tree.panels() {
            let id = record.id();
            let layout = record.detail_layout().unwrap_or(&default_layout);
            self.details.insert(
                id,
                DetailController::for_master(
                    id,
                    record.children(),
                    layout,
                    &self.detail_defaults,
                ),
            );
            if record.has_editor() {
                let states = record.edit_states().unwrap_or(&self.edit_defaults);
                let focus_activation = record
                    .focus_activation()
                    .unwrap_or(self.config.panels.focus_activation);
                self.edits
                    .insert(id, EditController::new(id, states, focus_activation));
                if !self.config.panels.all_panels_active {
                    self.group.add_member(id);
                }
            }
        }

        let masters: Vec<PanelId> = self.details.keys().copied().collect();
        for master in masters {
            self.sync_links(master)?;
        }
        self.notifier.seal();
        tracing::debug!(
            message = "panel_app.finalize",
            panels = self.tree.len(),
            editors = self.edits.len(),
            group_members = self.group.len()
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn tree(&self) -> &PanelTree {
        &self.tree
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.tree.is_finalized()
    }

    /// Host component ancestry used to resolve focus owners.
    #[must_use]
    pub fn components(&self) -> &ComponentTree {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentTree {
        &mut self.components
    }

    #[must_use]
    pub fn detail_controller(&self, master: PanelId) -> Option<&DetailController> {
        self.details.get(&master)
    }

    #[must_use]
    pub fn edit_controller(&self, panel: PanelId) -> Option<&EditController> {
        self.edits.get(&panel)
    }

    /// State of `master`'s detail area, `None` without a tabbed layout.
    #[must_use]
    pub fn detail_state(&self, master: PanelId) -> Option<PanelState> {
        self.details.get(&master).and_then(DetailController::state)
    }

    /// State of the detail area showing `detail`, read through its master.
    /// `None` for top-level panels.
    #[must_use]
    pub fn detail_panel_state(&self, detail: PanelId) -> Option<PanelState> {
        self.tree
            .parent(detail)
            .and_then(|master| self.detail_state(master))
    }

    /// State of `panel`'s edit surface, `None` without an editor.
    #[must_use]
    pub fn edit_state(&self, panel: PanelId) -> Option<PanelState> {
        self.edits.get(&panel).map(EditController::state)
    }

    /// Detail panel currently selected in `master`'s detail area.
    #[must_use]
    pub fn selected_detail(&self, master: PanelId) -> Option<PanelId> {
        self.details
            .get(&master)
            .and_then(DetailController::selected)
    }

    /// Top-level panel currently shown by the application layout.
    #[must_use]
    pub fn application_panel(&self) -> Option<PanelId> {
        self.application_panel
    }

    /// The editor holding the exclusive active flag.
    #[must_use]
    pub fn active_panel(&self) -> Option<PanelId> {
        self.group.active()
    }

    /// `true` when `panel` has an editor and that editor is active.
    #[must_use]
    pub fn is_active(&self, panel: PanelId) -> bool {
        self.edits.contains_key(&panel)
            && (self.config.panels.all_panels_active || self.group.is_active(panel))
    }

    /// Live floating window of `owner`.
    #[must_use]
    pub fn window(&self, owner: WindowOwner) -> Option<WindowHandle> {
        self.windows.handle(owner)
    }

    /// Number of live floating windows.
    #[must_use]
    pub fn open_windows(&self) -> usize {
        self.windows.len()
    }

    /// Snapshot of every controller's state.
    #[must_use]
    pub fn state_snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot {
            active: self.group.active(),
            application: self.application_panel,
            ..StateSnapshot::default()
        };
        for (master, controller) in &self.details {
            if let Some(tabbed) = controller.as_tabbed() {
                snapshot.detail.insert(*master, tabbed.state());
                snapshot.selected.insert(*master, tabbed.selected());
            }
        }
        for (panel, edit) in &self.edits {
            snapshot.edit.insert(*panel, edit.state());
        }
        snapshot
    }

    pub(crate) fn tabbed(&self, master: PanelId) -> Result<&TabbedDetail, PanelError> {
        self.tree.get(master)?;
        self.details
            .get(&master)
            .and_then(DetailController::as_tabbed)
            .ok_or(PanelError::NoDetailPanels { master })
    }

    pub(crate) fn edit(&self, panel: PanelId) -> Result<&EditController, PanelError> {
        self.tree.get(panel)?;
        self.edits.get(&panel).ok_or(PanelError::NoEditor { panel })
    }

    fn require_detail_of(&self, master: PanelId, detail: PanelId) -> Result<(), PanelError> {
        self.tree.get(master)?;
        self.tree.get(detail)?;
        if self.tree.parent(detail) == Some(master) {
            Ok(())
        } else {
            Err(PanelError::NotADetailOf { master, detail })
        }
    }

    // -----------------------------------------------------------------------
    // Activation and display
    // -----------------------------------------------------------------------

    /// Make `panel` the display and focus target.
    ///
    /// Repeating the call changes nothing further: no window is created
    /// twice and no state moves.
    pub fn activate(&mut self, host: &mut dyn Host, panel: PanelId) -> Result<(), PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        let _span = tracing::debug_span!("panel.activate", panel = %panel).entered();
        tracing::debug!(message = "panel.activate", panel = %panel);

        self.surface_ancestors(host, panel)?;
        self.initialize_panel(host, panel)?;
        self.request_initial_focus(host, panel)?;
        self.windows
            .bring_to_front(&mut *host, WindowOwner::Edit { panel });
        self.notifier.emit(&PanelEvent::Activated { panel });
        Ok(())
    }

    /// Surface `panel` without a focus change.
    ///
    /// Hidden detail areas along the ancestor chain and a hidden edit surface
    /// are revealed, then the nearest floating window holding the panel is
    /// raised.
    pub fn request_display(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<(), PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        tracing::debug!(message = "panel.display_requested", panel = %panel);

        self.surface_ancestors(host, panel)?;
        if let Some(edit) = self.edits.get(&panel)
            && edit.state() == PanelState::Hidden
        {
            let target = edit.cycle().reveal_from_hidden();
            let _ = self.set_edit_state(host, panel, target)?;
        }

        let owners = std::iter::once(WindowOwner::Edit { panel }).chain(
            self.tree
                .ancestors(panel)
                .map(|master| WindowOwner::Detail { master }),
        );
        for owner in owners.collect::<Vec<_>>() {
            if self.windows.bring_to_front(&mut *host, owner) {
                break;
            }
        }
        self.notifier.emit(&PanelEvent::DisplayRequested { panel });
        Ok(())
    }

    /// Select and reveal every link of the chain from the top-level panel
    /// down to `panel`, and show the top-level panel in the application
    /// layout.
    fn surface_ancestors(&mut self, host: &mut dyn Host, panel: PanelId) -> Result<(), PanelError> {
        let mut chain = Vec::new();
        let mut child = panel;
        for master in self.tree.ancestors(panel) {
            chain.push((master, child));
            child = master;
        }
        self.select_application(host, child);
        for (master, detail) in chain.into_iter().rev() {
            self.show_detail(host, master, detail)?;
        }
        Ok(())
    }

    fn select_application(&mut self, host: &mut dyn Host, top: PanelId) {
        if self.application_panel != Some(top) {
            self.application_panel = Some(top);
            host.select_application_panel(top);
        }
    }

    /// Select `detail` in `master`'s area and reveal the area if hidden.
    fn show_detail(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        detail: PanelId,
    ) -> Result<(), PanelError> {
        let Some(tabbed) = self.details.get(&master).and_then(DetailController::as_tabbed)
        else {
            return Ok(());
        };
        let reveal = tabbed.reveal_target();
        self.select(host, master, detail)?;
        if let Some(target) = reveal {
            let _ = self.set_detail_state(host, master, target)?;
        }
        Ok(())
    }

    /// Show `detail` in `master`'s detail area.
    ///
    /// The detail's link becomes active (when the area is visible) and every
    /// sibling link inactive. An embedded area swaps its slot content.
    pub fn select(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        detail: PanelId,
    ) -> Result<(), PanelError> {
        self.tree.require_finalized()?;
        self.require_detail_of(master, detail)?;
        let Some(tabbed) = self
            .details
            .get_mut(&master)
            .and_then(DetailController::as_tabbed_mut)
        else {
            return Ok(());
        };
        let changed = tabbed.selected() != detail;
        tabbed.select(detail);
        let state = tabbed.state();

        host.select_detail_tab(master, detail);
        self.sync_links(master)?;
        if state.is_visible() {
            self.initialize_panel(host, detail)?;
        }
        if changed && state == PanelState::Embedded {
            host.set_slot(Slot::Detail { master }, Some(detail));
        }
        if changed {
            tracing::debug!(message = "detail.select", master = %master, detail = %detail);
        }
        Ok(())
    }

    /// Initialize `panel` on first use and push its initial layout to the
    /// host.
    pub(crate) fn initialize_panel(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<(), PanelError> {
        if !self.tree.get_mut(panel)?.initialize() {
            return Ok(());
        }
        tracing::debug!(message = "panel.initialize", panel = %panel);
        if let Some(edit) = self.edits.get(&panel) {
            let occupant = (edit.state() == PanelState::Embedded).then_some(panel);
            host.set_slot(Slot::Edit { panel }, occupant);
        }
        let tabbed = self
            .details
            .get(&panel)
            .and_then(DetailController::as_tabbed)
            .map(|tabbed| (tabbed.selected(), tabbed.state()));
        if let Some((selected, state)) = tabbed {
            host.select_detail_tab(panel, selected);
            let occupant = (state == PanelState::Embedded).then_some(selected);
            host.set_slot(Slot::Detail { master: panel }, occupant);
            if state.is_visible() {
                self.initialize_panel(host, selected)?;
            }
        }
        Ok(())
    }

    /// Focus the editor if it is showing, else the table, else the panel.
    pub(crate) fn request_initial_focus(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<(), PanelError> {
        let editor_showing = self
            .edits
            .get(&panel)
            .is_some_and(|edit| edit.state().is_visible());
        let record = self.tree.get_mut(panel)?;
        if editor_showing && let Some(editor) = record.editor_mut() {
            editor.request_initial_focus();
        } else if let Some(table) = record.table_mut() {
            table.request_focus();
        } else {
            host.focus_panel(panel);
        }
        Ok(())
    }

    /// Make the links of `master`'s details match its area: only the selected
    /// detail's link is active, and only while the area is visible.
    pub(crate) fn sync_links(&mut self, master: PanelId) -> Result<(), PanelError> {
        let Some(tabbed) = self.details.get(&master).and_then(DetailController::as_tabbed)
        else {
            return Ok(());
        };
        let selected = tabbed.selected();
        let visible = tabbed.state().is_visible();
        let children = self.tree.children(master).to_vec();
        for child in children.iter().filter(|child| **child != selected) {
            if let Some(link) = self.tree.get_mut(*child)?.link_mut() {
                link.set_active(false);
            }
        }
        if let Some(link) = self.tree.get_mut(selected)?.link_mut() {
            link.set_active(visible);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Activate the panel in `direction` from `panel`.
    ///
    /// Returns the activated panel, or `None` when there is no target or
    /// keyboard navigation is disabled. Navigating down into a hidden detail
    /// area embeds it first.
    pub fn navigate(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
        direction: Direction,
    ) -> Result<Option<PanelId>, PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        if !self.config.panels.keyboard_navigation {
            return Ok(None);
        }
        if direction == Direction::Down
            && let Ok(tabbed) = self.tabbed(panel)
            && tabbed.state() == PanelState::Hidden
        {
            let target = if tabbed.cycle().contains(PanelState::Embedded) {
                PanelState::Embedded
            } else {
                tabbed.cycle().reveal_from_hidden()
            };
            let _ = self.set_detail_state(host, panel, target)?;
        }
        let Some(target) = navigation::target(&self.tree, panel, direction) else {
            tracing::trace!(message = "panel.navigate.no_target", panel = %panel, %direction);
            return Ok(None);
        };
        tracing::debug!(message = "panel.navigate", from = %panel, to = %target, %direction);
        self.activate(host, target)?;
        Ok(Some(target))
    }

    // -----------------------------------------------------------------------
    // Focus activation
    // -----------------------------------------------------------------------

    /// Handle a "focus owner changed" notification.
    ///
    /// Resolves the owning panel and, when its editor takes part in focus
    /// activation, makes that editor the unique active one. Returns the
    /// resolved panel. Does nothing unless [`FocusActivation`] is installed.
    pub fn focus_owner_changed(&mut self, component: Option<ComponentId>) -> Option<PanelId> {
        if !FocusActivation::is_installed() {
            return None;
        }
        let component = component?;
        let panel = focus::resolve_owner(&self.components, component, |slot| match slot {
            mdpanel_core::SlotOwner::Detail(master) => self
                .details
                .get(&master)
                .and_then(DetailController::selected),
            mdpanel_core::SlotOwner::Application => self.application_panel,
        })?;
        tracing::trace!(message = "focus.activation", %component, panel = %panel);

        let participates = self
            .edits
            .get(&panel)
            .is_some_and(EditController::focus_activation);
        if participates && self.group.contains(panel) {
            self.set_active(panel);
        }
        Some(panel)
    }

    fn set_active(&mut self, panel: PanelId) {
        let Ok(Some(change)) = self.group.activate(panel) else {
            return;
        };
        if let Some(previous) = change.previous {
            self.notifier.emit(&PanelEvent::ActiveChanged {
                panel: previous,
                active: false,
            });
        }
        self.notifier.emit(&PanelEvent::ActiveChanged {
            panel: change.current,
            active: true,
        });
    }

    // -----------------------------------------------------------------------
    // Gestures and commands
    // -----------------------------------------------------------------------

    /// A row of `panel`'s table was double clicked.
    ///
    /// A hidden editor is surfaced first (floating when enabled); otherwise a
    /// hidden detail area is surfaced the same way.
    pub fn table_double_clicked(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        if let Some(edit) = self.edits.get(&panel)
            && edit.state() == PanelState::Hidden
        {
            let target = surface_target(edit.cycle());
            return self.set_edit_state(host, panel, target);
        }
        if let Ok(tabbed) = self.tabbed(panel)
            && tabbed.state() == PanelState::Hidden
        {
            let target = surface_target(tabbed.cycle());
            return self.set_detail_state(host, panel, target);
        }
        Ok(TransitionOutcome::Unchanged)
    }

    /// A mouse gesture on `master`'s detail tabs.
    pub fn detail_tab_gesture(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        gesture: TabGesture,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        let tabbed = self.tabbed(master)?;
        let (cycle, state) = (tabbed.cycle(), tabbed.state());
        let target = match gesture {
            TabGesture::DoubleClick
                if cycle.contains_all(&[PanelState::Floating, PanelState::Embedded]) =>
            {
                if state == PanelState::Floating {
                    PanelState::Embedded
                } else {
                    PanelState::Floating
                }
            }
            TabGesture::MiddleClick
                if cycle.contains_all(&[PanelState::Hidden, PanelState::Embedded]) =>
            {
                if state == PanelState::Embedded {
                    PanelState::Hidden
                } else {
                    PanelState::Embedded
                }
            }
            _ => return Ok(TransitionOutcome::Unchanged),
        };
        self.set_detail_state(host, master, target)
    }

    /// Menu command: reveal `master`'s detail area if hidden, then activate
    /// `detail`.
    pub fn activate_detail_from_menu(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        detail: PanelId,
    ) -> Result<(), PanelError> {
        self.tree.require_finalized()?;
        self.require_detail_of(master, detail)?;
        if let Ok(tabbed) = self.tabbed(master)
            && let Some(target) = tabbed.reveal_target()
        {
            let _ = self.set_detail_state(host, master, target)?;
        }
        self.activate(host, detail)
    }

    /// Resize command.
    ///
    /// `Up` hides the edit surface, `Down` toggles it between embedded and
    /// floating, `Left`/`Right` move the divider of the master's split by
    /// the configured step. Missing targets and disabled states are no-ops.
    pub fn resize(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
        direction: Direction,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        let step = self.config.resize.step;
        match direction {
            Direction::Up | Direction::Down => {
                let Some(edit) = self.edits.get(&panel) else {
                    return Ok(TransitionOutcome::Unchanged);
                };
                let target = match (direction, edit.state()) {
                    (Direction::Up, _) => PanelState::Hidden,
                    (_, PanelState::Embedded) => PanelState::Floating,
                    _ => PanelState::Embedded,
                };
                if !edit.cycle().contains(target) {
                    return Ok(TransitionOutcome::Unchanged);
                }
                self.set_edit_state(host, panel, target)
            }
            Direction::Left | Direction::Right => {
                if let Some(master) = self.tree.parent(panel) {
                    let command = if direction == Direction::Right {
                        DividerCommand::Grow(step)
                    } else {
                        DividerCommand::Shrink(step)
                    };
                    host.move_divider(master, command);
                }
                Ok(TransitionOutcome::Unchanged)
            }
        }
    }

    /// Expand command on the master's split.
    ///
    /// `right` pushes the divider right (collapsing the detail side), else
    /// left (expanding it). The host restores preferred sizes when the split
    /// is already fully expanded or collapsed.
    pub fn expand(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
        right: bool,
    ) -> Result<(), PanelError> {
        self.tree.require_finalized()?;
        self.tree.get(panel)?;
        if let Some(master) = self.tree.parent(panel) {
            let command = if right {
                DividerCommand::Collapse
            } else {
                DividerCommand::Expand
            };
            host.move_divider(master, command);
        }
        Ok(())
    }

    /// Reveal a hidden edit surface (embedded when enabled) and focus it.
    pub fn select_edit_surface(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        let edit = self.edit(panel)?;
        let mut outcome = TransitionOutcome::Unchanged;
        if edit.state() == PanelState::Hidden {
            let target = if edit.cycle().contains(PanelState::Embedded) {
                PanelState::Embedded
            } else {
                edit.cycle().reveal_from_hidden()
            };
            outcome = self.set_edit_state(host, panel, target)?;
        }
        if let Some(editor) = self.tree.get_mut(panel)?.editor_mut() {
            editor.request_initial_focus();
        }
        Ok(outcome)
    }
}

/// Floating when enabled, else the successor of hidden.
fn surface_target(cycle: &mdpanel_layout::StateCycle) -> PanelState {
    if cycle.contains(PanelState::Floating) {
        PanelState::Floating
    } else {
        cycle.reveal_from_hidden()
    }
}
