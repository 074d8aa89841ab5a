mod binder;
mod driver;
mod mouse;

pub use binder::EventBinder;
pub use driver::{EventDriver, EventHandler, NoopEventHandler};
use mouse::handle_mouseup;

use crate::BaseDocument;
use marq_traits::{DomEvent, DomEventData};

/// Run the document default action for an event whose handlers did not
/// prevent it.
pub(crate) fn handle_dom_event<F: FnMut(DomEvent)>(
    doc: &mut BaseDocument,
    event: &mut DomEvent,
    dispatch_event: F,
) {
    let target_node_id = event.target;

    match &event.data {
        DomEventData::MouseUp(data) => {
            handle_mouseup(doc, target_node_id, data, dispatch_event);
        }
        DomEventData::MouseDown(_) => {
            // Do nothing (no default action)
        }
        DomEventData::Click(_) => {
            // Do nothing (no default action)
        }
        DomEventData::SelectStart => {
            // Beginning a selection is the host's job
        }
    }
}
