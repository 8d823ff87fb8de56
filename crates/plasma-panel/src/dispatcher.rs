//! Dual-panel dispatch.
//!
//! The dispatcher routes one operator-initiated (category, value) request to
//! the subset of panel sessions implied by the current selection target. The
//! selection is read fresh at dispatch time, never cached, so a concurrent
//! selection change resolves last-write-wins. Routing is fire-and-forget per
//! session: outcomes terminate at the session's status sink.

use std::sync::{Arc, Mutex};

use plasma_protocol::Category;
use tracing::debug;

use crate::session::{PanelSession, StatusSink};
use crate::transport::Transport;

/// Operator choice of which panel(s) a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Left panel only.
    Left,
    /// Right panel only.
    Right,
    /// Both panels, left then right.
    Both,
}

impl Selection {
    /// Get the selection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Left => "left",
            Selection::Right => "right",
            Selection::Both => "both",
        }
    }

    /// Parse a selection from its name.
    pub fn from_str(s: &str) -> Option<Selection> {
        match s {
            "left" => Some(Selection::Left),
            "right" => Some(Selection::Right),
            "both" => Some(Selection::Both),
            _ => None,
        }
    }

    fn includes_left(&self) -> bool {
        matches!(self, Selection::Left | Selection::Both)
    }

    fn includes_right(&self) -> bool {
        matches!(self, Selection::Right | Selection::Both)
    }
}

/// Source of the current selection target, read at each dispatch.
pub trait SelectionSource {
    /// The panels the next command should go to.
    fn selection(&self) -> Selection;
}

/// A selection that never changes (one-shot commands, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedSelection(pub Selection);

impl SelectionSource for FixedSelection {
    fn selection(&self) -> Selection {
        self.0
    }
}

/// A selection shared with an interactive front end.
#[derive(Debug, Clone)]
pub struct SharedSelection(Arc<Mutex<Selection>>);

impl SharedSelection {
    /// Create a shared selection with an initial target.
    pub fn new(initial: Selection) -> Self {
        SharedSelection(Arc::new(Mutex::new(initial)))
    }

    /// Change the target for subsequent dispatches.
    pub fn set(&self, selection: Selection) {
        *self.lock() = selection;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Selection> {
        // A poisoned lock still holds a valid Selection.
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SelectionSource for SharedSelection {
    fn selection(&self) -> Selection {
        *self.lock()
    }
}

/// Routes operator commands to the left panel, the right panel, or both.
pub struct Dispatcher<L: Transport, R: Transport, S: SelectionSource> {
    left: PanelSession<L>,
    right: PanelSession<R>,
    selection: S,
}

impl<L: Transport, R: Transport, S: SelectionSource> Dispatcher<L, R, S> {
    /// Create a dispatcher over two panel sessions.
    pub fn new(left: PanelSession<L>, right: PanelSession<R>, selection: S) -> Self {
        Dispatcher {
            left,
            right,
            selection,
        }
    }

    /// Route one command to the currently selected panel(s).
    ///
    /// For `both`, the left send runs to completion before the right send
    /// starts; observable reporting order is deterministic left-then-right.
    pub fn send(&mut self, category: Category, value: &str, sink: &dyn StatusSink) {
        let selection = self.selection.selection();
        debug!(selection = selection.as_str(), %category, value, "dispatching");
        if selection.includes_left() {
            let _ = self.left.send(category, value, sink);
        }
        if selection.includes_right() {
            let _ = self.right.send(category, value, sink);
        }
    }

    /// Borrow the left session.
    pub fn left(&self) -> &PanelSession<L> {
        &self.left
    }

    /// Borrow the right session.
    pub fn right(&self) -> &PanelSession<R> {
        &self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PanelId;
    use crate::sim::SimulatedPanel;
    use std::cell::RefCell;

    struct NullSink;

    impl StatusSink for NullSink {
        fn set_status(&self, _panel: PanelId, _text: &str) {}
    }

    /// Sink that records which panel reported, in order.
    #[derive(Default)]
    struct OrderSink {
        order: RefCell<Vec<PanelId>>,
    }

    impl StatusSink for OrderSink {
        fn set_status(&self, panel: PanelId, _text: &str) {
            self.order.borrow_mut().push(panel);
        }
    }

    fn dispatcher(
        selection: Selection,
    ) -> Dispatcher<SimulatedPanel, SimulatedPanel, FixedSelection> {
        Dispatcher::new(
            PanelSession::new(PanelId::Left, "COM1", SimulatedPanel::new()),
            PanelSession::new(PanelId::Right, "COM2", SimulatedPanel::new()),
            FixedSelection(selection),
        )
    }

    #[test]
    fn test_selection_round_trip() {
        for sel in [Selection::Left, Selection::Right, Selection::Both] {
            assert_eq!(Selection::from_str(sel.as_str()), Some(sel));
        }
        assert_eq!(Selection::from_str("middle"), None);
    }

    #[test]
    fn test_left_target_reaches_only_left() {
        let mut d = dispatcher(Selection::Left);
        d.send(Category::Mode, "Zoom", &NullSink);
        assert_eq!(d.left().transport().written().len(), 1);
        assert!(d.right().transport().written().is_empty());
    }

    #[test]
    fn test_right_target_reaches_only_right() {
        let mut d = dispatcher(Selection::Right);
        d.send(Category::Mode, "Zoom", &NullSink);
        assert!(d.left().transport().written().is_empty());
        assert_eq!(d.right().transport().written().len(), 1);
    }

    #[test]
    fn test_both_target_reports_left_before_right() {
        let mut d = dispatcher(Selection::Both);
        let sink = OrderSink::default();
        d.send(Category::Mode, "Zoom", &sink);
        assert_eq!(*sink.order.borrow(), vec![PanelId::Left, PanelId::Right]);
        assert_eq!(d.left().transport().written(), d.right().transport().written());
    }

    #[test]
    fn test_selection_read_fresh_at_dispatch() {
        let shared = SharedSelection::new(Selection::Left);
        let mut d = Dispatcher::new(
            PanelSession::new(PanelId::Left, "COM1", SimulatedPanel::new()),
            PanelSession::new(PanelId::Right, "COM2", SimulatedPanel::new()),
            shared.clone(),
        );

        d.send(Category::Mode, "Zoom", &NullSink);
        shared.set(Selection::Right);
        d.send(Category::Mode, "Normal", &NullSink);

        assert_eq!(d.left().transport().written().len(), 1);
        assert_eq!(d.right().transport().written().len(), 1);
        assert_eq!(d.right().transport().written()[0], b"\x02DAM:NORM\x03");
    }
}
