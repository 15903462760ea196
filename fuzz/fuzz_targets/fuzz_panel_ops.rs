#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mdpanel_core::{PanelId, PanelState, WindowOwner};
use mdpanel_harness::{MockEditor, MockLink, RecordingHost};
use mdpanel_layout::{Direction, PanelSpec};
use mdpanel_runtime::{PanelApp, TabGesture};

#[derive(Debug, Arbitrary)]
enum Op {
    SetDetail(u8, u8),
    SetEdit(u8, u8),
    ToggleDetail(u8),
    ToggleEdit(u8),
    Activate(u8),
    Display(u8),
    Select(u8, u8),
    Navigate(u8, u8),
    DoubleClick(u8),
    Gesture(u8, bool),
    Resize(u8, u8),
    Answer(bool),
    Close(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    /// Parent index (mod position) for each panel after the first; `None`
    /// makes a top-level panel.
    shape: Vec<Option<u8>>,
    editors: u16,
    ops: Vec<Op>,
}

fn state(raw: u8) -> PanelState {
    PanelState::ALL[usize::from(raw) % PanelState::ALL.len()]
}

fn direction(raw: u8) -> Direction {
    Direction::ALL[usize::from(raw) % Direction::ALL.len()]
}

fuzz_target!(|input: Input| {
    let count = input.shape.len().clamp(1, 16);
    let mut app = PanelApp::default();
    let mut ids: Vec<PanelId> = Vec::with_capacity(count);
    for i in 0..count {
        let mut spec = PanelSpec::new(format!("P{i}")).link(MockLink::new());
        if input.editors & (1 << i) != 0 {
            spec = spec.editor(MockEditor::new());
        }
        ids.push(app.add_panel(spec).expect("add panel"));
    }
    for (i, parent) in input.shape.iter().take(count).enumerate().skip(1) {
        if let Some(parent) = parent {
            let parent = usize::from(*parent) % i;
            app.add_detail(ids[parent], ids[i]).expect("acyclic by construction");
        }
    }
    app.finalize().expect("finalize");

    let mut host = RecordingHost::new();
    let id = |raw: u8| ids[usize::from(raw) % count];
    for op in input.ops.iter().take(256) {
        match *op {
            Op::SetDetail(p, s) => {
                let _ = app.set_detail_state(&mut host, id(p), state(s));
            }
            Op::SetEdit(p, s) => {
                let _ = app.set_edit_state(&mut host, id(p), state(s));
            }
            Op::ToggleDetail(p) => {
                let _ = app.toggle_detail(&mut host, id(p));
            }
            Op::ToggleEdit(p) => {
                let _ = app.toggle_edit(&mut host, id(p));
            }
            Op::Activate(p) => {
                let _ = app.activate(&mut host, id(p));
            }
            Op::Display(p) => {
                let _ = app.request_display(&mut host, id(p));
            }
            Op::Select(m, d) => {
                let _ = app.select(&mut host, id(m), id(d));
            }
            Op::Navigate(p, d) => {
                let _ = app.navigate(&mut host, id(p), direction(d));
            }
            Op::DoubleClick(p) => {
                let _ = app.table_double_clicked(&mut host, id(p));
            }
            Op::Gesture(p, double) => {
                let gesture = if double {
                    TabGesture::DoubleClick
                } else {
                    TabGesture::MiddleClick
                };
                let _ = app.detail_tab_gesture(&mut host, id(p), gesture);
            }
            Op::Resize(p, d) => {
                let _ = app.resize(&mut host, id(p), direction(d));
            }
            Op::Answer(answer) => host.answer_next(answer),
            Op::Close(p) => {
                let panel = id(p);
                for owner in [
                    WindowOwner::Detail { master: panel },
                    WindowOwner::Edit { panel },
                ] {
                    if let Some(handle) = app.window(owner) {
                        host.user_close(handle);
                        let _ = app.window_closed(&mut host, handle);
                        break;
                    }
                }
            }
        }

        // Post-conditions that must always hold:
        assert_eq!(app.open_windows(), host.live_windows(), "window leak");
        for &panel in &ids {
            if let Some(detail) = app.detail_state(panel) {
                let live = app.window(WindowOwner::Detail { master: panel }).is_some();
                assert_eq!(detail == PanelState::Floating, live, "detail window mismatch");
                let active = app
                    .tree()
                    .children(panel)
                    .iter()
                    .filter(|child| app.tree().get(**child).is_ok_and(|r| r.link_active()))
                    .count();
                assert!(active <= 1, "more than one active link");
            }
            if let Some(edit) = app.edit_state(panel) {
                let live = app.window(WindowOwner::Edit { panel }).is_some();
                assert_eq!(edit == PanelState::Floating, live, "edit window mismatch");
            }
        }
    }
});
