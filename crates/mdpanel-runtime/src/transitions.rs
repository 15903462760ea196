#![forbid(unsafe_code)]

//! Visibility transitions of detail areas and edit surfaces.
//!
//! A transition is validated against the enabled subset, confirmed when it
//! would hide a modified editor, then applied: windows are disposed before
//! slots change, floating windows are opened last, and the new state is
//! committed before observers are told.
//!
//! Leaving `Floating` for a detail area also folds up the floating detail
//! windows below it, per [`Cascade`].

use mdpanel_core::{
    ConfirmPrompt, ConfirmReason, Host, PanelError, PanelId, PanelState, Slot,
    TransitionOutcome, WindowAnchor, WindowHandle, WindowOwner, WindowRequest,
};
use mdpanel_layout::{Cascade, DetailController};

use crate::app::PanelApp;
use crate::notify::{PanelEvent, Surface};

impl PanelApp {
    // -----------------------------------------------------------------------
    // Detail area
    // -----------------------------------------------------------------------

    /// Move `master`'s detail area to `target`.
    pub fn set_detail_state(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        target: PanelState,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        let tabbed = self.tabbed(master)?;
        if !tabbed.check(target)? {
            return Ok(TransitionOutcome::Unchanged);
        }
        let selected = tabbed.selected();
        if target == PanelState::Hidden
            && !self.confirm_hide(host, selected, ConfirmReason::HideDetail)
        {
            tracing::debug!(
                message = "detail.transition",
                master = %master,
                to = %target,
                outcome = TransitionOutcome::Cancelled.as_str()
            );
            return Ok(TransitionOutcome::Cancelled);
        }
        self.apply_detail_state(host, master, target, true)?;
        Ok(TransitionOutcome::Applied)
    }

    /// Advance `master`'s detail area along the toggle cycle.
    pub fn toggle_detail(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        let target = self.tabbed(master)?.toggle_target();
        self.set_detail_state(host, master, target)
    }

    fn apply_detail_state(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
        target: PanelState,
        cascade: bool,
    ) -> Result<(), PanelError> {
        let tabbed = self.tabbed(master)?;
        let (from, selected) = (tabbed.state(), tabbed.selected());
        if cascade && from == PanelState::Floating {
            self.fold_floating_details(host, master)?;
        }

        let owner = WindowOwner::Detail { master };
        let slot = Slot::Detail { master };
        match target {
            PanelState::Hidden => {
                self.windows.dispose(&mut *host, owner);
                host.set_slot(slot, None);
            }
            PanelState::Embedded => {
                self.initialize_panel(host, selected)?;
                self.windows.dispose(&mut *host, owner);
                host.set_slot(slot, Some(selected));
            }
            PanelState::Floating => {
                self.initialize_panel(host, selected)?;
                if from == PanelState::Embedded {
                    host.set_slot(slot, None);
                }
                self.open_detail_window(host, master)?;
            }
        }

        if let Some(tabbed) = self
            .details
            .get_mut(&master)
            .and_then(DetailController::as_tabbed_mut)
        {
            tabbed.commit(target);
        }
        self.sync_links(master)?;
        if target.is_visible() {
            self.request_initial_focus(host, selected)?;
        }
        self.notifier.emit(&PanelEvent::StateChanged {
            panel: master,
            surface: Surface::Detail,
            state: target,
        });
        tracing::debug!(
            message = "detail.transition",
            master = %master,
            from = %from,
            to = %target,
            selected = %selected,
            outcome = TransitionOutcome::Applied.as_str()
        );
        Ok(())
    }

    /// Move floating detail areas below `master` out of their windows.
    ///
    /// Each goes to `Hidden` when enabled, else `Embedded`, and folds its own
    /// floating details in turn. No confirmation is asked; the enclosing
    /// transition already was confirmed.
    fn fold_floating_details(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
    ) -> Result<(), PanelError> {
        let affected = match self.config.detail.cascade {
            Cascade::Siblings => self.tree.children(master).to_vec(),
            Cascade::Descendants => self.tree.descendants(master),
        };
        for panel in affected {
            let Some(tabbed) = self.details.get(&panel).and_then(DetailController::as_tabbed)
            else {
                continue;
            };
            if tabbed.state() != PanelState::Floating {
                continue;
            }
            let target = if tabbed.cycle().contains(PanelState::Hidden) {
                PanelState::Hidden
            } else {
                PanelState::Embedded
            };
            tracing::debug!(message = "detail.cascade", master = %master, panel = %panel, to = %target);
            self.apply_detail_state(host, panel, target, true)?;
        }
        Ok(())
    }

    fn open_detail_window(
        &mut self,
        host: &mut dyn Host,
        master: PanelId,
    ) -> Result<WindowHandle, PanelError> {
        let record = self.tree.get(master)?;
        let parent = host.anchor_bounds(WindowAnchor::ParentWindow(master));
        let request = WindowRequest {
            owner: WindowOwner::Detail { master },
            title: format!(
                "{} - {}",
                record.caption(),
                self.config.detail.window_title_suffix
            ),
            icon: record.icon().map(str::to_owned),
            kind: self.config.panels.window_kind,
            placement: self.geometry.detail_placement(parent, record.has_editor()),
            dispose_on_escape: false,
        };
        Ok(self.windows.open(&mut *host, request))
    }

    // -----------------------------------------------------------------------
    // Edit surface
    // -----------------------------------------------------------------------

    /// Move `panel`'s edit surface to `target`.
    pub fn set_edit_state(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
        target: PanelState,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        if !self.edit(panel)?.check(target)? {
            return Ok(TransitionOutcome::Unchanged);
        }
        if target == PanelState::Hidden
            && !self.confirm_hide(host, panel, ConfirmReason::HideEditor)
        {
            tracing::debug!(
                message = "edit.transition",
                panel = %panel,
                to = %target,
                outcome = TransitionOutcome::Cancelled.as_str()
            );
            return Ok(TransitionOutcome::Cancelled);
        }

        let from = self.edit(panel)?.state();
        if target.is_visible() {
            self.initialize_panel(host, panel)?;
        }
        let owner = WindowOwner::Edit { panel };
        let slot = Slot::Edit { panel };
        match target {
            PanelState::Hidden => {
                self.windows.dispose(&mut *host, owner);
                host.set_slot(slot, None);
            }
            PanelState::Embedded => {
                self.windows.dispose(&mut *host, owner);
                host.set_slot(slot, Some(panel));
            }
            PanelState::Floating => {
                if from == PanelState::Embedded {
                    host.set_slot(slot, None);
                }
                self.open_edit_window(host, panel)?;
            }
        }

        if let Some(edit) = self.edits.get_mut(&panel) {
            edit.commit(target);
        }
        if target.is_visible() {
            self.request_initial_focus(host, panel)?;
        }
        self.notifier.emit(&PanelEvent::StateChanged {
            panel,
            surface: Surface::Edit,
            state: target,
        });
        tracing::debug!(
            message = "edit.transition",
            panel = %panel,
            from = %from,
            to = %target,
            outcome = TransitionOutcome::Applied.as_str()
        );
        Ok(TransitionOutcome::Applied)
    }

    /// Advance `panel`'s edit surface to the next enabled state.
    pub fn toggle_edit(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<TransitionOutcome, PanelError> {
        self.tree.require_finalized()?;
        let target = self.edit(panel)?.toggle_target()?;
        self.set_edit_state(host, panel, target)
    }

    fn open_edit_window(
        &mut self,
        host: &mut dyn Host,
        panel: PanelId,
    ) -> Result<WindowHandle, PanelError> {
        let record = self.tree.get(panel)?;
        let anchor = if record.has_table() {
            WindowAnchor::Table(panel)
        } else {
            WindowAnchor::Panel(panel)
        };
        let preferred = record.editor().and_then(|editor| editor.preferred_size());
        let request = WindowRequest {
            owner: WindowOwner::Edit { panel },
            title: record.caption().to_owned(),
            icon: record.icon().map(str::to_owned),
            kind: self.config.panels.window_kind,
            placement: self
                .geometry
                .edit_placement(host.anchor_bounds(anchor), preferred),
            dispose_on_escape: self.config.panels.dispose_edit_window_on_escape,
        };
        Ok(self.windows.open(&mut *host, request))
    }

    // -----------------------------------------------------------------------
    // Shared
    // -----------------------------------------------------------------------

    /// Ask before hiding a modified editor. Unmodified editors pass.
    fn confirm_hide(&self, host: &mut dyn Host, panel: PanelId, reason: ConfirmReason) -> bool {
        let modified = self
            .tree
            .get(panel)
            .ok()
            .and_then(|record| record.editor())
            .is_some_and(|editor| editor.is_modified());
        !modified || host.confirm(&ConfirmPrompt { panel, reason })
    }

    /// The user closed a floating window.
    ///
    /// The owner falls back to `Hidden`, or `Embedded` when hidden is not
    /// enabled. When neither is enabled, or the fallback is cancelled, the
    /// window is opened again so the owner stays floating. Unknown handles
    /// are ignored.
    pub fn window_closed(
        &mut self,
        host: &mut dyn Host,
        handle: WindowHandle,
    ) -> Result<TransitionOutcome, PanelError> {
        let Some(owner) = self.windows.forget(handle) else {
            tracing::trace!(message = "window.closed.unknown", %handle);
            return Ok(TransitionOutcome::Unchanged);
        };
        match owner {
            WindowOwner::Detail { master } => {
                let tabbed = self.tabbed(master)?;
                if tabbed.state() != PanelState::Floating {
                    return Ok(TransitionOutcome::Unchanged);
                }
                let Some(target) = close_fallback(tabbed.cycle()) else {
                    self.open_detail_window(host, master)?;
                    return Ok(TransitionOutcome::Unchanged);
                };
                let outcome = self.set_detail_state(host, master, target)?;
                if outcome.is_cancelled() {
                    self.open_detail_window(host, master)?;
                }
                Ok(outcome)
            }
            WindowOwner::Edit { panel } => {
                let edit = self.edit(panel)?;
                if edit.state() != PanelState::Floating {
                    return Ok(TransitionOutcome::Unchanged);
                }
                let Some(target) = close_fallback(edit.cycle()) else {
                    self.open_edit_window(host, panel)?;
                    return Ok(TransitionOutcome::Unchanged);
                };
                let outcome = self.set_edit_state(host, panel, target)?;
                if outcome.is_cancelled() {
                    self.open_edit_window(host, panel)?;
                }
                Ok(outcome)
            }
        }
    }
}

fn close_fallback(cycle: &mdpanel_layout::StateCycle) -> Option<PanelState> {
    [PanelState::Hidden, PanelState::Embedded]
        .into_iter()
        .find(|state| cycle.contains(*state))
}
