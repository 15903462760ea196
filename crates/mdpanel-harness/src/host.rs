#![forbid(unsafe_code)]

//! Recording host.
//!
//! [`RecordingHost`] implements every host service and remembers what it was
//! asked to do: windows opened, disposed and raised, slot occupants, selected
//! tabs, focus requests and divider moves. Confirmation answers are scripted.

use std::collections::{BTreeMap, VecDeque};

use mdpanel_core::{
    ConfirmPrompt, Confirmation, DividerCommand, LayoutHost, PanelId, Rect, Slot, WindowAnchor,
    WindowHandle, WindowOwner, WindowRequest, WindowService,
};

// ============================================================================
// RecordingHost
// ============================================================================

/// A host that records every call.
#[derive(Debug)]
pub struct RecordingHost {
    next_handle: u64,
    live: BTreeMap<WindowHandle, WindowRequest>,
    created: u64,
    disposed: u64,
    max_live: usize,
    raised: Vec<WindowHandle>,
    anchors: Vec<(WindowAnchor, Rect)>,
    answers: VecDeque<bool>,
    default_answer: bool,
    prompts: Vec<ConfirmPrompt>,
    slots: BTreeMap<Slot, Option<PanelId>>,
    tabs: BTreeMap<PanelId, PanelId>,
    application_panel: Option<PanelId>,
    focused_panels: Vec<PanelId>,
    dividers: Vec<(PanelId, DividerCommand)>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            next_handle: 1,
            live: BTreeMap::new(),
            created: 0,
            disposed: 0,
            max_live: 0,
            raised: Vec::new(),
            anchors: Vec::new(),
            answers: VecDeque::new(),
            default_answer: true,
            prompts: Vec::new(),
            slots: BTreeMap::new(),
            tabs: BTreeMap::new(),
            application_panel: None,
            focused_panels: Vec::new(),
            dividers: Vec::new(),
        }
    }
}

impl RecordingHost {
    /// A host that answers every confirmation with yes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `bounds` for `anchor` from now on.
    #[must_use]
    pub fn with_anchor(mut self, anchor: WindowAnchor, bounds: Rect) -> Self {
        self.set_anchor(anchor, bounds);
        self
    }

    pub fn set_anchor(&mut self, anchor: WindowAnchor, bounds: Rect) {
        self.anchors.retain(|(known, _)| *known != anchor);
        self.anchors.push((anchor, bounds));
    }

    /// Queue the answer to the next confirmation.
    pub fn answer_next(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// Answer used once the queue is empty.
    pub fn set_default_answer(&mut self, answer: bool) {
        self.default_answer = answer;
    }

    /// Simulate the user closing a window. The core is not told; pass the
    /// returned handle to the application's close handler.
    pub fn user_close(&mut self, handle: WindowHandle) -> Option<WindowRequest> {
        self.live.remove(&handle)
    }

    /// The live window owned by `owner`.
    #[must_use]
    pub fn window_of(&self, owner: WindowOwner) -> Option<WindowHandle> {
        self.live
            .iter()
            .find_map(|(handle, request)| (request.owner == owner).then_some(*handle))
    }

    #[must_use]
    pub fn request(&self, handle: WindowHandle) -> Option<&WindowRequest> {
        self.live.get(&handle)
    }

    #[must_use]
    pub fn windows_created(&self) -> u64 {
        self.created
    }

    #[must_use]
    pub fn windows_disposed(&self) -> u64 {
        self.disposed
    }

    #[must_use]
    pub fn live_windows(&self) -> usize {
        self.live.len()
    }

    /// Highest number of simultaneously live windows seen.
    #[must_use]
    pub fn max_live_windows(&self) -> usize {
        self.max_live
    }

    #[must_use]
    pub fn raised(&self) -> &[WindowHandle] {
        &self.raised
    }

    #[must_use]
    pub fn prompts(&self) -> &[ConfirmPrompt] {
        &self.prompts
    }

    /// Current occupant of `slot`, `None` when empty or never set.
    #[must_use]
    pub fn slot(&self, slot: Slot) -> Option<PanelId> {
        self.slots.get(&slot).copied().flatten()
    }

    /// Number of distinct slots the core has touched.
    #[must_use]
    pub fn slots_touched(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn selected_tab(&self, master: PanelId) -> Option<PanelId> {
        self.tabs.get(&master).copied()
    }

    #[must_use]
    pub fn application_panel(&self) -> Option<PanelId> {
        self.application_panel
    }

    #[must_use]
    pub fn focused_panels(&self) -> &[PanelId] {
        &self.focused_panels
    }

    #[must_use]
    pub fn dividers(&self) -> &[(PanelId, DividerCommand)] {
        &self.dividers
    }
}

impl WindowService for RecordingHost {
    fn open_window(&mut self, request: WindowRequest) -> WindowHandle {
        let handle = WindowHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, request);
        self.created += 1;
        self.max_live = self.max_live.max(self.live.len());
        handle
    }

    fn dispose_window(&mut self, handle: WindowHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposed += 1;
        }
    }

    fn bring_to_front(&mut self, handle: WindowHandle) {
        self.raised.push(handle);
    }

    fn anchor_bounds(&self, anchor: WindowAnchor) -> Option<Rect> {
        self.anchors
            .iter()
            .find_map(|(known, bounds)| (*known == anchor).then_some(*bounds))
    }
}

impl Confirmation for RecordingHost {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.push(*prompt);
        self.answers.pop_front().unwrap_or(self.default_answer)
    }
}

impl LayoutHost for RecordingHost {
    fn set_slot(&mut self, slot: Slot, occupant: Option<PanelId>) {
        self.slots.insert(slot, occupant);
    }

    fn select_detail_tab(&mut self, master: PanelId, detail: PanelId) {
        self.tabs.insert(master, detail);
    }

    fn select_application_panel(&mut self, panel: PanelId) {
        self.application_panel = Some(panel);
    }

    fn focus_panel(&mut self, panel: PanelId) {
        self.focused_panels.push(panel);
    }

    fn move_divider(&mut self, master: PanelId, command: DividerCommand) {
        self.dividers.push((master, command));
    }
}
