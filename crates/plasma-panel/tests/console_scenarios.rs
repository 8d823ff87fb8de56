//! End-to-end scenarios over simulated panels.
//!
//! These drive full operator actions through the dispatcher and both panel
//! sessions, asserting the wire traffic, the confirmed state, and the status
//! text the presentation layer would observe.

use std::cell::RefCell;

use plasma_panel::{
    Dispatcher, FixedSelection, PanelId, PanelSession, Selection, SimulatedPanel, StatusSink,
};
use plasma_protocol::Category;

/// Records every status update in call order.
#[derive(Default)]
struct RecordingSink {
    calls: RefCell<Vec<(PanelId, String)>>,
}

impl RecordingSink {
    fn texts_for(&self, panel: PanelId) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(p, _)| *p == panel)
            .map(|(_, t)| t.clone())
            .collect()
    }
}

impl StatusSink for RecordingSink {
    fn set_status(&self, panel: PanelId, text: &str) {
        self.calls.borrow_mut().push((panel, text.to_string()));
    }
}

fn both_panels() -> Dispatcher<SimulatedPanel, SimulatedPanel, FixedSelection> {
    Dispatcher::new(
        PanelSession::new(PanelId::Left, "COM1", SimulatedPanel::new()),
        PanelSession::new(PanelId::Right, "COM2", SimulatedPanel::new()),
        FixedSelection(Selection::Both),
    )
}

#[test]
fn power_on_against_powered_off_panel() {
    // Simulated panels power up holding POF; turning power on is a state
    // change, acknowledged with \x02PON\x03, and cascades Source then Mode.
    let mut d = both_panels();
    let sink = RecordingSink::default();

    d.send(Category::Power, "On", &sink);

    for session in [d.left(), d.right()] {
        let written = session.transport().written();
        assert_eq!(written[0], b"\x02PON\x03");
        assert_eq!(written[1], b"\x02IIS:PC1\x03");
        assert_eq!(written[2], b"\x02DAM:FULL\x03");
        assert_eq!(session.confirmed_code(Category::Power), Some("PON"));
        assert_eq!(session.transport().current_code("PO"), Some("PON"));
    }

    // The power ack re-renders the full state; the cascaded Source/Mode
    // sends hit state the panel already holds and stay silent.
    assert_eq!(
        sink.texts_for(PanelId::Left),
        vec!["Power: On\nSource: PC VGA\nMode: Full\n".to_string()]
    );
}

#[test]
fn repeated_power_on_is_silent_but_still_cascades() {
    let mut d = both_panels();
    let sink = RecordingSink::default();

    d.send(Category::Power, "On", &sink);
    let first_reports = sink.calls.borrow().len();

    d.send(Category::Power, "On", &sink);

    // Second action: panel already holds PON, so every send times out with
    // an empty buffer. No new status text, no state change, but the cascade
    // still produced two more frames per panel.
    assert_eq!(sink.calls.borrow().len(), first_reports);
    for session in [d.left(), d.right()] {
        assert_eq!(session.transport().written().len(), 6);
        assert_eq!(session.confirmed_code(Category::Power), Some("PON"));
    }
}

#[test]
fn mode_change_updates_both_panels_in_order() {
    let mut d = both_panels();
    let sink = RecordingSink::default();

    d.send(Category::Mode, "Justified", &sink);

    let calls = sink.calls.borrow();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, PanelId::Left);
    assert_eq!(calls[1].0, PanelId::Right);
    for (_, text) in calls.iter() {
        assert_eq!(text, "Power: On\nSource: PC VGA\nMode: Justified\n");
    }
}

#[test]
fn open_failure_reports_and_leaves_other_panel_working() {
    let mut d = Dispatcher::new(
        PanelSession::new(PanelId::Left, "COM1", SimulatedPanel::failing()),
        PanelSession::new(PanelId::Right, "COM2", SimulatedPanel::new()),
        FixedSelection(Selection::Both),
    );
    let sink = RecordingSink::default();

    d.send(Category::Mode, "Zoom", &sink);

    assert_eq!(
        sink.texts_for(PanelId::Left),
        vec!["Error Opening\nCOM1".to_string()]
    );
    // The right panel is unaffected by the left panel's failure.
    assert_eq!(d.right().confirmed_code(Category::Mode), Some("DAM:ZOOM"));
    assert_eq!(
        sink.texts_for(PanelId::Right),
        vec!["Power: On\nSource: PC VGA\nMode: Zoom\n".to_string()]
    );
}

#[test]
fn source_switch_then_power_cycle_restores_new_source() {
    let mut d = both_panels();
    let sink = RecordingSink::default();

    // Switch to Video, power off, power back on: the cascade must restore
    // Video, the last acknowledged source, not the construction default.
    d.send(Category::Source, "Video", &sink);
    d.send(Category::Power, "Off", &sink);
    d.send(Category::Power, "On", &sink);

    let written = d.left().transport().written();
    let n = written.len();
    // Final action: PON + cascade.
    assert_eq!(&written[n - 3..], &[
        b"\x02PON\x03".to_vec(),
        b"\x02IIS:VID\x03".to_vec(),
        b"\x02DAM:FULL\x03".to_vec(),
    ]);
}
