//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.
//!
//! Draggables are identified by string ids and dropped either onto another
//! draggable (insert before it) or onto a container (append to it).

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop on another draggable
    Item(String),
    /// Drop on a container's free space
    Container(String),
}

/// What a finished gesture produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    Dropped { item_id: String, target: DropTarget },
    Cancelled { item_id: String },
}

/// Gesture state: idle -> pending -> dragging -> idle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Mouse is down on an item but hasn't moved past the threshold
    Pending { item_id: String, start_x: i32, start_y: i32 },
    Dragging { item_id: String, over: Option<DropTarget> },
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

impl DragPhase {
    pub fn press(&mut self, item_id: &str, x: i32, y: i32) {
        *self = DragPhase::Pending { item_id: item_id.to_string(), start_x: x, start_y: y };
    }

    /// Returns true when this motion started the drag
    pub fn motion(&mut self, x: i32, y: i32) -> bool {
        if let DragPhase::Pending { item_id, start_x, start_y } = self {
            let dx = (x - *start_x).abs();
            let dy = (y - *start_y).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                let item_id = std::mem::take(item_id);
                *self = DragPhase::Dragging { item_id, over: None };
                return true;
            }
        }
        false
    }

    pub fn enter(&mut self, target: DropTarget) {
        if let DragPhase::Dragging { item_id, over } = self {
            // Don't allow dropping on self
            if target != DropTarget::Item(item_id.clone()) {
                *over = Some(target);
            }
        }
    }

    /// Pointer left the current target; `fallback` is whatever encloses it
    pub fn leave(&mut self, fallback: Option<DropTarget>) {
        if let DragPhase::Dragging { over, .. } = self {
            *over = fallback;
        }
    }

    /// Mouse released. A pending press is a click and yields nothing.
    pub fn release(&mut self) -> Option<DragOutcome> {
        match std::mem::take(self) {
            DragPhase::Dragging { item_id, over: Some(target) } => {
                Some(DragOutcome::Dropped { item_id, target })
            }
            DragPhase::Dragging { item_id, over: None } => Some(DragOutcome::Cancelled { item_id }),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<DragOutcome> {
        match std::mem::take(self) {
            DragPhase::Dragging { item_id, .. } => Some(DragOutcome::Cancelled { item_id }),
            _ => None,
        }
    }

    pub fn dragging_id(&self) -> Option<&str> {
        match self {
            DragPhase::Dragging { item_id, .. } => Some(item_id),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&DropTarget> {
        match self {
            DragPhase::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub phase_read: ReadSignal<DragPhase>,
    pub phase_write: WriteSignal<DragPhase>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
}

impl DndSignals {
    /// Reactive: id of the item being dragged
    pub fn dragging_id(&self) -> Option<String> {
        self.phase_read.with(|p| p.dragging_id().map(str::to_string))
    }

    pub fn is_dragging(&self) -> bool {
        self.phase_read.with(|p| p.dragging_id().is_some())
    }

    pub fn is_target(&self, target: &DropTarget) -> bool {
        self.phase_read.with(|p| p.target() == Some(target))
    }
}

pub fn create_dnd_signals() -> DndSignals {
    let (phase_read, phase_write) = signal(DragPhase::Idle);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    DndSignals {
        phase_read,
        phase_write,
        drag_just_ended_read,
        drag_just_ended_write,
    }
}

/// Flag the end of a drag so the trailing click can be ignored
fn mark_drag_ended(dnd: &DndSignals) {
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

fn is_form_control(ev: &web_sys::MouseEvent) -> bool {
    ev.target().is_some_and(|target| {
        target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlSelectElement>().is_some()
            || target.dyn_ref::<web_sys::HtmlTextAreaElement>().is_some()
    })
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 && !is_form_control(&ev) {
            dnd.phase_write.update(|p| p.press(&item_id, ev.client_x(), ev.client_y()));
        }
    }
}

/// Create mouseenter handler for items (insert-before target)
pub fn make_on_item_mouseenter(dnd: DndSignals, item_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.phase_read.with_untracked(|p| p.dragging_id().is_some()) {
            dnd.phase_write.update(|p| p.enter(DropTarget::Item(item_id.clone())));
        }
    }
}

/// Create mouseleave handler for items; the enclosing container becomes the target again
pub fn make_on_item_mouseleave(dnd: DndSignals, container_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.phase_read.with_untracked(|p| p.dragging_id().is_some()) {
            dnd.phase_write.update(|p| p.leave(Some(DropTarget::Container(container_id.clone()))));
        }
    }
}

/// Create mouseenter handler for containers (append target)
pub fn make_on_container_mouseenter(dnd: DndSignals, container_id: String) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.phase_read.with_untracked(|p| p.dragging_id().is_some()) {
            dnd.phase_write.update(|p| p.enter(DropTarget::Container(container_id.clone())));
        }
    }
}

/// Create mouseleave handler for containers
pub fn make_on_container_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.phase_read.with_untracked(|p| p.dragging_id().is_some()) {
            dnd.phase_write.update(|p| p.leave(None));
        }
    }
}

/// Bind global mousemove: starts the drag once moved past the threshold
fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.phase_read.with_untracked(|p| matches!(p, DragPhase::Pending { .. }));
        if pending {
            dnd.phase_write.update(|p| {
                p.motion(ev.client_x(), ev.client_y());
            });
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
}

/// Bind global keydown: Escape cancels an active drag
fn bind_global_escape<F>(dnd: DndSignals, on_outcome: F)
where
    F: Fn(DragOutcome) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        let mut outcome = None;
        dnd.phase_write.update(|p| outcome = p.cancel());
        if let Some(outcome) = outcome {
            mark_drag_ended(&dnd);
            on_outcome(outcome);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    on_keydown.forget();
}

/// Bind global mouseup handler for drop detection
///
/// `on_outcome` receives drops and cancellations; plain clicks are left to
/// the element's own click handler.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_outcome: F)
where
    F: Fn(DragOutcome) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_release = on_outcome.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let mut outcome = None;
        dnd.phase_write.update(|p| outcome = p.release());
        if let Some(outcome) = outcome {
            mark_drag_ended(&dnd);
            on_release(outcome);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mouseup.forget();

    bind_global_mousemove(dnd);
    bind_global_escape(dnd, on_outcome);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(id: &str) -> DragPhase {
        let mut phase = DragPhase::Idle;
        phase.press(id, 0, 0);
        assert!(phase.motion(10, 0));
        phase
    }

    #[test]
    fn test_small_motion_stays_pending() {
        let mut phase = DragPhase::Idle;
        phase.press("item-1", 100, 100);
        assert!(!phase.motion(103, 104));
        assert!(matches!(phase, DragPhase::Pending { .. }));
        // Released without moving: a click, not a drop
        assert_eq!(phase.release(), None);
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_drop_on_item() {
        let mut phase = dragging("item-1");
        assert_eq!(phase.dragging_id(), Some("item-1"));
        phase.enter(DropTarget::Item("item-2".into()));
        assert_eq!(
            phase.release(),
            Some(DragOutcome::Dropped { item_id: "item-1".into(), target: DropTarget::Item("item-2".into()) })
        );
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_cannot_target_self() {
        let mut phase = dragging("item-1");
        phase.enter(DropTarget::Item("item-1".into()));
        assert_eq!(phase.target(), None);
        assert_eq!(phase.release(), Some(DragOutcome::Cancelled { item_id: "item-1".into() }));
    }

    #[test]
    fn test_leaving_item_falls_back_to_container() {
        let mut phase = dragging("item-1");
        phase.enter(DropTarget::Container("day-2".into()));
        phase.enter(DropTarget::Item("item-7".into()));
        phase.leave(Some(DropTarget::Container("day-2".into())));
        assert_eq!(phase.target(), Some(&DropTarget::Container("day-2".into())));
    }

    #[test]
    fn test_cancel_only_affects_active_drag() {
        let mut idle = DragPhase::Idle;
        assert_eq!(idle.cancel(), None);

        let mut phase = dragging("item-3");
        phase.enter(DropTarget::Container("day-1".into()));
        assert_eq!(phase.cancel(), Some(DragOutcome::Cancelled { item_id: "item-3".into() }));
        assert_eq!(phase, DragPhase::Idle);
    }

    #[test]
    fn test_enter_ignored_when_not_dragging() {
        let mut phase = DragPhase::Idle;
        phase.enter(DropTarget::Container("day-1".into()));
        assert_eq!(phase, DragPhase::Idle);
    }
}
