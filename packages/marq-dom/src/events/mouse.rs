use crate::BaseDocument;
use marq_traits::{DomEvent, DomEventData, MouseButtonEvent, MouseEventButton};

pub(crate) fn handle_mouseup<F: FnMut(DomEvent)>(
    _doc: &mut BaseDocument,
    target: usize,
    event: &MouseButtonEvent,
    mut dispatch_event: F,
) {
    // Dispatch a click event
    if event.button == MouseEventButton::Main {
        dispatch_event(DomEvent::new(target, DomEventData::Click(event.clone())));
    }
}
