#![forbid(unsafe_code)]

//! End-to-end behavior of [`PanelApp`] against the recording host.

use std::cell::RefCell;
use std::rc::Rc;

use mdpanel_core::{
    ComponentId, ComponentKind, ConfirmReason, DividerCommand, PanelId, PanelState, Rect, Size,
    Slot, SlotOwner, TransitionOutcome, WindowAnchor, WindowOwner, WindowPlacement,
};
use mdpanel_harness::{
    EditorProbe, LinkProbe, MockEditor, MockLink, MockTable, RecordingHost, capture,
};
use mdpanel_layout::{Cascade, Direction, PanelSpec};
use mdpanel_runtime::config::DetailConfig;
use mdpanel_runtime::{AppConfig, FocusActivation, PanelApp, PanelEvent, Surface, TabGesture};

use PanelState::{Embedded, Floating, Hidden};

// ============================================================================
// Fixtures
// ============================================================================

fn detail_only(states: &[PanelState], initial: PanelState) -> AppConfig {
    AppConfig {
        detail: DetailConfig {
            enabled_states: states.to_vec(),
            initial_state: initial,
            ..DetailConfig::default()
        },
        ..AppConfig::default()
    }
}

fn linked(app: &mut PanelApp, caption: &str) -> (PanelId, LinkProbe) {
    let (link, probe) = MockLink::probed();
    let id = app.add_panel(PanelSpec::new(caption).link(link)).unwrap();
    (id, probe)
}

fn edited(app: &mut PanelApp, caption: &str) -> (PanelId, EditorProbe) {
    let (editor, probe) = MockEditor::probed();
    let id = app.add_panel(PanelSpec::new(caption).editor(editor)).unwrap();
    (id, probe)
}

/// Master `Orders` with three linked details.
struct ThreeDetails {
    app: PanelApp,
    master: PanelId,
    details: Vec<(PanelId, LinkProbe)>,
}

impl ThreeDetails {
    fn new(config: AppConfig) -> Self {
        let mut app = PanelApp::new(config).unwrap();
        let master = app.add_panel(PanelSpec::new("Orders")).unwrap();
        let details: Vec<_> = ["Lines", "Payments", "Shipments"]
            .into_iter()
            .map(|caption| linked(&mut app, caption))
            .collect();
        for (detail, _) in &details {
            app.add_detail(master, *detail).unwrap();
        }
        Self {
            app,
            master,
            details,
        }
    }

    fn id(&self, index: usize) -> PanelId {
        self.details[index].0
    }

    fn active_links(&self) -> Vec<bool> {
        self.details
            .iter()
            .map(|(_, probe)| probe.is_active())
            .collect()
    }
}

fn recorder(app: &mut PanelApp) -> (Rc<RefCell<Vec<PanelEvent>>>, mdpanel_runtime::Subscription) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let subscription = app
        .subscribe(move |event| sink.borrow_mut().push(*event))
        .unwrap();
    (log, subscription)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn selecting_then_embedding_activates_only_the_selected_link() {
    let mut fx = ThreeDetails::new(detail_only(&[Hidden, Embedded], Hidden));
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    assert_eq!(fx.active_links(), vec![false, false, false]);

    let (master, d2) = (fx.master, fx.id(1));
    fx.app.select(&mut host, master, d2).unwrap();
    assert_eq!(fx.active_links(), vec![false, false, false]);

    let outcome = fx.app.set_detail_state(&mut host, master, Embedded).unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(fx.active_links(), vec![false, true, false]);
    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(fx.app.selected_detail(master), Some(d2));
    assert_eq!(host.slot(Slot::Detail { master }), Some(d2));
    assert_eq!(host.selected_tab(master), Some(d2));
}

#[test]
fn edit_toggle_round_trip_creates_and_disposes_one_window() {
    let config = AppConfig {
        panels: mdpanel_runtime::config::PanelsConfig {
            edit_states: vec![Embedded, Floating],
            ..Default::default()
        },
        ..AppConfig::default()
    };
    let mut app = PanelApp::new(config).unwrap();
    let (panel, editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    assert_eq!(app.toggle_edit(&mut host, panel).unwrap(), TransitionOutcome::Applied);
    assert_eq!(app.edit_state(panel), Some(Floating));
    assert_eq!(host.live_windows(), 1);

    assert_eq!(app.toggle_edit(&mut host, panel).unwrap(), TransitionOutcome::Applied);
    assert_eq!(app.edit_state(panel), Some(Embedded));
    assert_eq!(host.windows_created(), 1);
    assert_eq!(host.windows_disposed(), 1);
    assert_eq!(app.open_windows(), 0);
    assert_eq!(host.slot(Slot::Edit { panel }), Some(panel));
    assert_eq!(editor.initialized(), 1);
}

#[test]
fn cancelled_hide_leaves_the_editor_embedded() {
    let mut app = PanelApp::default();
    let (panel, editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    editor.set_modified(true);
    host.answer_next(false);
    let outcome = app.set_edit_state(&mut host, panel, Hidden).unwrap();

    assert_eq!(outcome, TransitionOutcome::Cancelled);
    assert_eq!(app.edit_state(panel), Some(Embedded));
    assert_eq!(host.windows_created(), 0);
    assert_eq!(host.windows_disposed(), 0);
    assert_eq!(host.slots_touched(), 0);
    assert_eq!(host.prompts().len(), 1);
    assert_eq!(host.prompts()[0].reason, ConfirmReason::HideEditor);
}

#[test]
fn cancelled_hide_keeps_a_floating_editor_window() {
    let mut app = PanelApp::default();
    let (panel, editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();
    let _ = app.set_edit_state(&mut host, panel, Floating).unwrap();

    editor.set_modified(true);
    host.answer_next(false);
    let outcome = app.set_edit_state(&mut host, panel, Hidden).unwrap();

    assert!(outcome.is_cancelled());
    assert_eq!(app.edit_state(panel), Some(Floating));
    assert_eq!(host.live_windows(), 1);
    assert_eq!(host.windows_disposed(), 0);
}

#[test]
fn unmodified_editor_hides_without_asking() {
    let mut app = PanelApp::default();
    let (panel, _editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    let outcome = app.set_edit_state(&mut host, panel, Hidden).unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert!(host.prompts().is_empty());
    assert_eq!(host.slot(Slot::Edit { panel }), None);
}

#[test]
fn focus_inside_a_tab_follows_the_selected_detail() {
    let mut app = PanelApp::default();
    let master = app.add_panel(PanelSpec::new("Orders")).unwrap();
    let (first, _) = edited(&mut app, "Lines");
    let (second, _) = edited(&mut app, "Payments");
    app.add_detail(master, first).unwrap();
    app.add_detail(master, second).unwrap();

    let components = app.components_mut();
    components
        .insert(ComponentId(1), None, ComponentKind::Panel(master))
        .unwrap();
    components
        .insert(
            ComponentId(2),
            Some(ComponentId(1)),
            ComponentKind::SwitchedSlot(SlotOwner::Detail(master)),
        )
        .unwrap();
    components
        .insert(ComponentId(3), Some(ComponentId(2)), ComponentKind::Plain)
        .unwrap();

    let mut host = RecordingHost::new();
    app.finalize().unwrap();
    app.select(&mut host, master, second).unwrap();

    FocusActivation::install();
    let owner = app.focus_owner_changed(Some(ComponentId(3)));
    FocusActivation::uninstall();

    assert_eq!(owner, Some(second));
    assert_eq!(app.active_panel(), Some(second));
    assert!(app.is_active(second));
    assert!(!app.is_active(first));
}

#[test]
fn user_closing_a_detail_window_hides_the_area() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    assert_eq!(fx.active_links(), vec![true, false, false]);
    let handle = fx.app.window(WindowOwner::Detail { master }).unwrap();

    assert!(host.user_close(handle).is_some());
    let outcome = fx.app.window_closed(&mut host, handle).unwrap();

    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(fx.app.detail_state(master), Some(Hidden));
    assert_eq!(fx.active_links(), vec![false, false, false]);
    assert_eq!(fx.app.open_windows(), 0);
    assert_eq!(host.windows_disposed(), 0);
}

// ============================================================================
// Window lifecycle
// ============================================================================

#[test]
fn floating_then_embedded_keeps_at_most_one_window() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    let _ = fx.app.set_detail_state(&mut host, master, Embedded).unwrap();

    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(host.max_live_windows(), 1);
    assert_eq!(host.windows_created(), 1);
    assert_eq!(host.live_windows(), 0);
    assert_eq!(host.slot(Slot::Detail { master }), Some(fx.id(0)));
}

#[test]
fn detail_window_is_titled_and_placed_against_the_parent_window() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let master = fx.master;
    let mut host = RecordingHost::new()
        .with_anchor(WindowAnchor::ParentWindow(master), Rect::new(100, 50, 1000, 800));
    fx.app.finalize().unwrap();

    let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    let handle = fx.app.window(WindowOwner::Detail { master }).unwrap();
    let request = host.request(handle).unwrap();

    assert_eq!(request.title, "Orders - Detail tables");
    assert!(!request.dispose_on_escape);
    assert_eq!(
        request.placement,
        WindowPlacement::Bounds(Rect::new(440, 12, 660, 800))
    );
}

#[test]
fn edit_window_centers_on_the_table_at_the_preferred_size() {
    let mut app = PanelApp::default();
    let editor = MockEditor::new().with_preferred_size(Size::new(200, 100));
    let panel = app
        .add_panel(PanelSpec::new("Customers").editor(editor).table(MockTable::new()))
        .unwrap();
    let mut host = RecordingHost::new()
        .with_anchor(WindowAnchor::Table(panel), Rect::new(0, 0, 600, 400));
    app.finalize().unwrap();

    let _ = app.set_edit_state(&mut host, panel, Floating).unwrap();
    let handle = app.window(WindowOwner::Edit { panel }).unwrap();
    let request = host.request(handle).unwrap();

    assert_eq!(request.title, "Customers");
    assert!(request.dispose_on_escape);
    assert_eq!(
        request.placement,
        WindowPlacement::Bounds(Rect::new(200, 150, 200, 100))
    );
}

#[test]
fn cancelled_close_reopens_the_window() {
    let mut app = PanelApp::default();
    let master = app.add_panel(PanelSpec::new("Orders")).unwrap();
    let (detail, editor) = edited(&mut app, "Lines");
    app.add_detail(master, detail).unwrap();
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    let _ = app.set_detail_state(&mut host, master, Floating).unwrap();
    let first = app.window(WindowOwner::Detail { master }).unwrap();
    editor.set_modified(true);
    host.answer_next(false);
    host.user_close(first);

    let outcome = app.window_closed(&mut host, first).unwrap();

    assert!(outcome.is_cancelled());
    assert_eq!(app.detail_state(master), Some(Floating));
    let second = app.window(WindowOwner::Detail { master }).unwrap();
    assert_ne!(first, second);
    assert_eq!(host.windows_created(), 2);
    assert_eq!(host.live_windows(), 1);
    assert_eq!(host.prompts()[0].reason, ConfirmReason::HideDetail);
}

#[test]
fn close_falls_back_to_embedded_when_hidden_is_disabled() {
    let mut fx = ThreeDetails::new(detail_only(&[Embedded, Floating], Embedded));
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    let handle = fx.app.window(WindowOwner::Detail { master }).unwrap();
    host.user_close(handle);
    let _ = fx.app.window_closed(&mut host, handle).unwrap();

    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(fx.active_links(), vec![true, false, false]);
}

#[test]
fn unknown_window_handles_are_ignored() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();

    let outcome = fx
        .app
        .window_closed(&mut host, mdpanel_core::WindowHandle(42))
        .unwrap();
    assert_eq!(outcome, TransitionOutcome::Unchanged);
}

#[test]
fn leaving_floating_folds_floating_details_below() {
    let mut app = PanelApp::default();
    let master = app.add_panel(PanelSpec::new("Customers")).unwrap();
    let orders = app.add_panel(PanelSpec::new("Orders")).unwrap();
    let lines = app.add_panel(PanelSpec::new("Lines")).unwrap();
    app.add_detail(master, orders).unwrap();
    app.add_detail(orders, lines).unwrap();
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    let _ = app.set_detail_state(&mut host, master, Floating).unwrap();
    let _ = app.set_detail_state(&mut host, orders, Floating).unwrap();
    assert_eq!(app.open_windows(), 2);

    let _ = app.set_detail_state(&mut host, master, Embedded).unwrap();
    assert_eq!(app.detail_state(master), Some(Embedded));
    assert_eq!(app.detail_state(orders), Some(Hidden));
    assert_eq!(app.open_windows(), 0);
    assert_eq!(host.live_windows(), 0);
}

/// `Customers > Orders > Lines > Items`, a chain of single details.
fn detail_chain(config: AppConfig) -> (PanelApp, [PanelId; 4]) {
    let mut app = PanelApp::new(config).unwrap();
    let ids = ["Customers", "Orders", "Lines", "Items"]
        .map(|caption| app.add_panel(PanelSpec::new(caption)).unwrap());
    for pair in ids.windows(2) {
        app.add_detail(pair[0], pair[1]).unwrap();
    }
    app.finalize().unwrap();
    (app, ids)
}

fn cascading(cascade: Cascade) -> AppConfig {
    AppConfig {
        detail: DetailConfig {
            cascade,
            ..DetailConfig::default()
        },
        ..AppConfig::default()
    }
}

#[test]
fn folding_reaches_floating_details_two_levels_down() {
    let (mut app, [customers, orders, lines, _]) = detail_chain(AppConfig::default());
    let mut host = RecordingHost::new();
    for master in [customers, orders, lines] {
        let _ = app.set_detail_state(&mut host, master, Floating).unwrap();
    }
    assert_eq!(app.open_windows(), 3);

    let _ = app.set_detail_state(&mut host, customers, Embedded).unwrap();

    assert_eq!(app.detail_state(customers), Some(Embedded));
    assert_eq!(app.detail_state(orders), Some(Hidden));
    assert_eq!(app.detail_state(lines), Some(Hidden));
    assert_eq!(app.open_windows(), 0);
    assert_eq!(host.live_windows(), 0);
}

#[test]
fn descendant_cascade_hides_every_floating_area_below() {
    let (mut app, [customers, orders, lines, items]) =
        detail_chain(cascading(Cascade::Descendants));
    let mut host = RecordingHost::new();
    for master in [customers, orders, lines] {
        let _ = app.set_detail_state(&mut host, master, Floating).unwrap();
    }
    assert_eq!(app.open_windows(), 3);

    let _ = app.set_detail_state(&mut host, customers, Hidden).unwrap();

    assert_eq!(app.detail_state(customers), Some(Hidden));
    assert_eq!(app.detail_state(orders), Some(Hidden));
    assert_eq!(app.detail_state(lines), Some(Hidden));
    assert_eq!(app.detail_panel_state(items), Some(Hidden));
    assert_eq!(app.open_windows(), 0);
    assert_eq!(host.live_windows(), 0);
}

#[test]
fn descendant_cascade_skips_over_areas_that_were_not_floating() {
    for (cascade, lines_after) in [
        (Cascade::Siblings, Floating),
        (Cascade::Descendants, Hidden),
    ] {
        let (mut app, [customers, orders, lines, _]) = detail_chain(cascading(cascade));
        let mut host = RecordingHost::new();
        let _ = app.set_detail_state(&mut host, customers, Floating).unwrap();
        let _ = app.set_detail_state(&mut host, lines, Floating).unwrap();
        assert_eq!(app.detail_state(orders), Some(Embedded));

        let _ = app.set_detail_state(&mut host, customers, Embedded).unwrap();

        assert_eq!(app.detail_state(orders), Some(Embedded), "{cascade:?}");
        assert_eq!(app.detail_state(lines), Some(lines_after), "{cascade:?}");
        assert_eq!(host.live_windows(), usize::from(lines_after == Floating));
    }
}

// ============================================================================
// Activation and display
// ============================================================================

#[test]
fn activation_reveals_ancestors_and_notifies() {
    let mut fx = ThreeDetails::new(detail_only(&[Hidden, Embedded, Floating], Hidden));
    let (events, _subscription) = recorder(&mut fx.app);
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let (master, d3) = (fx.master, fx.id(2));

    fx.app.activate(&mut host, d3).unwrap();

    assert_eq!(fx.app.application_panel(), Some(master));
    assert_eq!(host.application_panel(), Some(master));
    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(fx.app.selected_detail(master), Some(d3));
    assert_eq!(fx.active_links(), vec![false, false, true]);
    assert!(fx.app.tree().get(d3).unwrap().is_initialized());
    assert_eq!(host.focused_panels().last(), Some(&d3));
    assert_eq!(
        events.borrow().last(),
        Some(&PanelEvent::Activated { panel: d3 })
    );
    assert!(events.borrow().contains(&PanelEvent::StateChanged {
        panel: master,
        surface: Surface::Detail,
        state: Embedded,
    }));
}

#[test]
fn activating_twice_changes_nothing_further() {
    let mut app = PanelApp::default();
    let (panel, editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();
    let _ = app.set_edit_state(&mut host, panel, Floating).unwrap();

    app.activate(&mut host, panel).unwrap();
    let once = app.state_snapshot();
    let created = host.windows_created();
    app.activate(&mut host, panel).unwrap();

    assert_eq!(app.state_snapshot(), once);
    assert_eq!(host.windows_created(), created);
    assert_eq!(host.live_windows(), 1);
    assert_eq!(editor.initialized(), 1);
}

#[test]
fn display_request_surfaces_a_hidden_editor_and_raises_its_window() {
    let mut app = PanelApp::default();
    let master = app.add_panel(PanelSpec::new("Orders")).unwrap();
    let (detail, _) = edited(&mut app, "Lines");
    app.add_detail(master, detail).unwrap();
    let (events, _subscription) = recorder(&mut app);
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    let _ = app.set_detail_state(&mut host, master, Floating).unwrap();
    let _ = app.set_edit_state(&mut host, detail, Hidden).unwrap();
    let window = app.window(WindowOwner::Detail { master }).unwrap();

    app.request_display(&mut host, detail).unwrap();

    assert_eq!(app.edit_state(detail), Some(Embedded));
    assert_eq!(host.raised().last(), Some(&window));
    assert_eq!(
        events.borrow().last(),
        Some(&PanelEvent::DisplayRequested { panel: detail })
    );
    assert!(
        !events
            .borrow()
            .iter()
            .any(|event| matches!(event, PanelEvent::Activated { .. }))
    );
}

#[test]
fn operations_require_finalization() {
    let mut app = PanelApp::default();
    let panel = app.add_panel(PanelSpec::new("Customers")).unwrap();
    let mut host = RecordingHost::new();

    assert_eq!(
        app.activate(&mut host, panel),
        Err(mdpanel_core::PanelError::TreeNotFinalized)
    );
    app.finalize().unwrap();
    assert!(app.subscribe(|_| {}).is_err());
    assert!(app.activate(&mut host, panel).is_ok());
}

#[test]
fn detail_states_outside_the_enabled_subset_are_rejected() {
    let mut fx = ThreeDetails::new(detail_only(&[Hidden, Embedded], Embedded));
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();

    let err = fx
        .app
        .set_detail_state(&mut host, fx.master, Floating)
        .unwrap_err();
    assert!(matches!(err, mdpanel_core::PanelError::StateNotEnabled { .. }));
    assert_eq!(host.windows_created(), 0);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn navigation_walks_rings_and_parents() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let (master, d1, d2, d3) = (fx.master, fx.id(0), fx.id(1), fx.id(2));

    let right = fx.app.navigate(&mut host, d1, Direction::Right).unwrap();
    assert_eq!(right, Some(d2));
    assert_eq!(fx.active_links(), vec![false, true, false]);

    let left = fx.app.navigate(&mut host, d1, Direction::Left).unwrap();
    assert_eq!(left, Some(d3));

    let up = fx.app.navigate(&mut host, d3, Direction::Up).unwrap();
    assert_eq!(up, Some(master));
    assert_eq!(fx.app.navigate(&mut host, master, Direction::Up).unwrap(), None);

    let down = fx.app.navigate(&mut host, master, Direction::Down).unwrap();
    assert_eq!(down, Some(d3));
}

#[test]
fn navigating_down_embeds_a_hidden_detail_area() {
    let mut fx = ThreeDetails::new(detail_only(&[Hidden, Embedded, Floating], Hidden));
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let down = fx.app.navigate(&mut host, master, Direction::Down).unwrap();
    assert_eq!(down, Some(fx.id(0)));
    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(fx.active_links(), vec![true, false, false]);
}

#[test]
fn navigation_can_be_disabled() {
    let mut config = AppConfig::default();
    config.panels.keyboard_navigation = false;
    let mut fx = ThreeDetails::new(config);
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();

    let target = fx.app.navigate(&mut host, fx.id(0), Direction::Right).unwrap();
    assert_eq!(target, None);
    assert!(host.focused_panels().is_empty());
}

// ============================================================================
// Gestures and commands
// ============================================================================

#[test]
fn tab_gestures_toggle_between_pairs() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let _ = fx
        .app
        .detail_tab_gesture(&mut host, master, TabGesture::DoubleClick)
        .unwrap();
    assert_eq!(fx.app.detail_state(master), Some(Floating));
    let _ = fx
        .app
        .detail_tab_gesture(&mut host, master, TabGesture::DoubleClick)
        .unwrap();
    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    let _ = fx
        .app
        .detail_tab_gesture(&mut host, master, TabGesture::MiddleClick)
        .unwrap();
    assert_eq!(fx.app.detail_state(master), Some(Hidden));
    let _ = fx
        .app
        .detail_tab_gesture(&mut host, master, TabGesture::MiddleClick)
        .unwrap();
    assert_eq!(fx.app.detail_state(master), Some(Embedded));
}

#[test]
fn toggle_detail_follows_the_fixed_cycle() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let mut seen = Vec::new();
    for _ in 0..3 {
        let _ = fx.app.toggle_detail(&mut host, master).unwrap();
        seen.push(fx.app.detail_state(master).unwrap());
    }
    assert_eq!(seen, vec![Floating, Hidden, Embedded]);
}

#[test]
fn double_click_surfaces_a_hidden_editor_as_floating() {
    let mut app = PanelApp::default();
    let (panel, _) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();
    let _ = app.set_edit_state(&mut host, panel, Hidden).unwrap();

    let outcome = app.table_double_clicked(&mut host, panel).unwrap();
    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(app.edit_state(panel), Some(Floating));

    let again = app.table_double_clicked(&mut host, panel).unwrap();
    assert_eq!(again, TransitionOutcome::Unchanged);
}

#[test]
fn resize_commands_drive_editor_and_divider() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let d1 = fx.id(0);
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let _ = fx.app.resize(&mut host, d1, Direction::Right).unwrap();
    let _ = fx.app.resize(&mut host, d1, Direction::Left).unwrap();
    fx.app.expand(&mut host, d1, true).unwrap();
    fx.app.expand(&mut host, master, false).unwrap();

    assert_eq!(
        host.dividers(),
        &[
            (master, DividerCommand::Grow(30)),
            (master, DividerCommand::Shrink(30)),
            (master, DividerCommand::Collapse),
        ]
    );
    assert_eq!(
        fx.app.resize(&mut host, d1, Direction::Up).unwrap(),
        TransitionOutcome::Unchanged
    );
}

#[test]
fn resize_up_and_down_move_the_edit_surface() {
    let mut app = PanelApp::default();
    let (panel, _) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();

    let _ = app.resize(&mut host, panel, Direction::Down).unwrap();
    assert_eq!(app.edit_state(panel), Some(Floating));
    let _ = app.resize(&mut host, panel, Direction::Down).unwrap();
    assert_eq!(app.edit_state(panel), Some(Embedded));
    let _ = app.resize(&mut host, panel, Direction::Up).unwrap();
    assert_eq!(app.edit_state(panel), Some(Hidden));
    let _ = app.resize(&mut host, panel, Direction::Down).unwrap();
    assert_eq!(app.edit_state(panel), Some(Embedded));
}

#[test]
fn select_edit_surface_reveals_and_focuses() {
    let mut app = PanelApp::default();
    let (panel, editor) = edited(&mut app, "Customers");
    let mut host = RecordingHost::new();
    app.finalize().unwrap();
    let _ = app.set_edit_state(&mut host, panel, Hidden).unwrap();
    let before = editor.focus_requests();

    let outcome = app.select_edit_surface(&mut host, panel).unwrap();

    assert_eq!(outcome, TransitionOutcome::Applied);
    assert_eq!(app.edit_state(panel), Some(Embedded));
    assert!(editor.focus_requests() > before);
}

#[test]
fn menu_activation_reveals_the_detail_area() {
    let mut fx = ThreeDetails::new(detail_only(&[Hidden, Embedded], Hidden));
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let (master, d2) = (fx.master, fx.id(1));

    fx.app
        .activate_detail_from_menu(&mut host, master, d2)
        .unwrap();

    assert_eq!(fx.app.detail_state(master), Some(Embedded));
    assert_eq!(fx.active_links(), vec![false, true, false]);
    assert!(matches!(
        fx.app.activate_detail_from_menu(&mut host, d2, master),
        Err(mdpanel_core::PanelError::NotADetailOf { .. })
    ));
}

// ============================================================================
// Focus activation
// ============================================================================

#[test]
fn focus_moves_the_single_active_flag() {
    let mut app = PanelApp::default();
    let (first, _) = edited(&mut app, "Customers");
    let (second, _) = edited(&mut app, "Suppliers");
    let (events, _subscription) = recorder(&mut app);
    for (component, panel) in [(1, first), (2, second)] {
        app.components_mut()
            .insert(ComponentId(component), None, ComponentKind::EditSurface(panel))
            .unwrap();
    }
    app.finalize().unwrap();

    FocusActivation::install();
    app.focus_owner_changed(Some(ComponentId(1)));
    app.focus_owner_changed(Some(ComponentId(2)));
    app.focus_owner_changed(None);
    FocusActivation::uninstall();

    assert_eq!(app.active_panel(), Some(second));
    assert_eq!(
        *events.borrow(),
        vec![
            PanelEvent::ActiveChanged {
                panel: first,
                active: true
            },
            PanelEvent::ActiveChanged {
                panel: first,
                active: false
            },
            PanelEvent::ActiveChanged {
                panel: second,
                active: true
            },
        ]
    );
}

#[test]
fn focus_is_ignored_until_the_listener_is_installed() {
    let mut app = PanelApp::default();
    let (panel, _) = edited(&mut app, "Customers");
    app.components_mut()
        .insert(ComponentId(1), None, ComponentKind::EditSurface(panel))
        .unwrap();
    app.finalize().unwrap();

    FocusActivation::uninstall();
    assert_eq!(app.focus_owner_changed(Some(ComponentId(1))), None);
    assert_eq!(app.active_panel(), None);
}

#[test]
fn opted_out_editors_never_become_active() {
    let mut app = PanelApp::default();
    let panel = app
        .add_panel(
            PanelSpec::new("Audit")
                .editor(MockEditor::new())
                .focus_activation(false),
        )
        .unwrap();
    app.components_mut()
        .insert(ComponentId(1), None, ComponentKind::EditSurface(panel))
        .unwrap();
    app.finalize().unwrap();

    FocusActivation::install();
    let owner = app.focus_owner_changed(Some(ComponentId(1)));
    FocusActivation::uninstall();

    assert_eq!(owner, Some(panel));
    assert_eq!(app.active_panel(), None);
}

#[test]
fn all_active_policy_keeps_every_editor_active() {
    let mut config = AppConfig::default();
    config.panels.all_panels_active = true;
    let mut app = PanelApp::new(config).unwrap();
    let (first, _) = edited(&mut app, "Customers");
    let (second, _) = edited(&mut app, "Suppliers");
    let plain = app.add_panel(PanelSpec::new("Reports")).unwrap();
    app.finalize().unwrap();

    assert!(app.is_active(first));
    assert!(app.is_active(second));
    assert!(!app.is_active(plain));
}

// ============================================================================
// Logging and snapshots
// ============================================================================

#[test]
fn transitions_are_logged_with_outcomes() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let master = fx.master;

    let (_, events) = capture(|| {
        let _ = fx.app.set_detail_state(&mut host, master, Floating).unwrap();
    });

    let transition = events
        .iter()
        .find(|event| event.message == "detail.transition")
        .unwrap();
    assert_eq!(transition.field("from"), Some("embedded"));
    assert_eq!(transition.field("to"), Some("floating"));
    assert_eq!(transition.field("outcome"), Some("applied"));
    assert!(events.iter().any(|event| event.message == "window.open"));
    assert!(
        events
            .iter()
            .all(|event| event.level != tracing::Level::ERROR)
    );
}

#[test]
fn snapshot_serializes_states_by_name() {
    let mut fx = ThreeDetails::new(AppConfig::default());
    let mut host = RecordingHost::new();
    fx.app.finalize().unwrap();
    let _ = fx.app.set_detail_state(&mut host, fx.master, Hidden).unwrap();

    let snapshot = fx.app.state_snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    let key = fx.master.get().to_string();
    assert_eq!(json["detail"][key.as_str()], "hidden");
    assert_eq!(json["selected"][key.as_str()], fx.id(0).get());
    assert_eq!(json["active"], serde_json::Value::Null);
}
