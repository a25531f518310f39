//! Leptos DragDrop Utilities
//!
//! Mouse-driven reordering of a flat list for Leptos.
//! Uses a movement threshold to distinguish click from drag.
//!
//! Rows are addressed by index. Drop slots sit between rows: slot `n` is the
//! gap before row `n`, and slot `len` is the gap after the last row.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    /// Slot currently under the pointer
    pub drop_slot_read: ReadSignal<Option<usize>>,
    pub drop_slot_write: WriteSignal<Option<usize>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (drop_slot_read, drop_slot_write) = signal(None::<usize>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_slot_read,
        drop_slot_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Index the dragged row ends up at when released over `slot`.
///
/// Returns `None` when the drop leaves the list unchanged.
pub fn reorder_destination(from: usize, slot: usize) -> Option<usize> {
    let to = if slot > from { slot - 1 } else { slot };
    (to != from).then_some(to)
}

/// Whether the pointer moved far enough from the mousedown point to start a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_slot_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Create mousedown handler for a drag handle.
/// Records a pending drag with its start position.
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Text fields and buttons keep their own mouse behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                return;
            }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                return;
            }
        }
        ev.prevent_default();
        dnd.pending_write.set(Some(index));
        dnd.start_x_write.set(ev.client_x());
        dnd.start_y_write.set(ev.client_y());
    }
}

/// Create mouseenter handler for a drop slot
pub fn make_on_slot_mouseenter(dnd: DndSignals, slot: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_slot_write.set(Some(slot));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.drop_slot_write.set(None);
        }
    }
}

/// Bind document mousemove handler - starts the drag once past the threshold
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();
        if pending.is_none() || dnd.dragging_read.get_untracked().is_some() {
            return;
        }
        let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            dnd.dragging_write.set(pending);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind document mouseup handler for drop detection.
///
/// `on_drop(from, to)` fires only for drops that actually move a row.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(usize, usize) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let slot = dnd.drop_slot_read.get_untracked();

        end_drag(&dnd);

        if let (Some(from), Some(slot)) = (dragging, slot) {
            if let Some(to) = reorder_destination(from, slot) {
                on_drop(from, to);
            }
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_destination_moves_down() {
        // Row 0 dropped in the gap before row 3 lands at index 2
        assert_eq!(reorder_destination(0, 3), Some(2));
        // Dropped after the last of four rows
        assert_eq!(reorder_destination(0, 4), Some(3));
    }

    #[test]
    fn test_reorder_destination_moves_up() {
        assert_eq!(reorder_destination(3, 0), Some(0));
        assert_eq!(reorder_destination(2, 1), Some(1));
    }

    #[test]
    fn test_reorder_destination_noop_slots() {
        // The gaps directly above and below a row leave it in place
        assert_eq!(reorder_destination(2, 2), None);
        assert_eq!(reorder_destination(2, 3), None);
    }

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }
}
