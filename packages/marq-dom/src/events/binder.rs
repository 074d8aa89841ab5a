use crate::BaseDocument;
use marq_traits::EventListener;

/// Capability-detecting facade over event registration.
///
/// Hosts expose one of two listener models (see
/// [`ListenerModel`](marq_traits::ListenerModel)): the modern model
/// registers under the plain event name, the legacy model under the
/// "on"-prefixed name. The model is probed from the document at every call
/// so a host that changes capability between calls still resolves
/// consistently at each one.
pub struct EventBinder;

impl EventBinder {
    /// Register interest in `event_name` on `node_id`. Idempotent per
    /// (node, registered name).
    pub fn bind(doc: &mut BaseDocument, node_id: usize, event_name: &str) {
        let name = doc.listener_model().mangle(event_name);
        let Some(node) = doc.get_node_mut(node_id) else {
            return;
        };
        if node.listeners.iter().any(|l| l.name == name) {
            return;
        }
        node.listeners.push(EventListener { name });
    }

    /// Whether `node_id` has a listener for `event_name` under the current
    /// model.
    pub fn listens(doc: &BaseDocument, node_id: usize, event_name: &str) -> bool {
        let name = doc.listener_model().mangle(event_name);
        doc.get_node(node_id)
            .is_some_and(|node| node.listeners.iter().any(|l| l.name == name))
    }

    /// Walk a bubble chain (target first) and return the first node holding
    /// a listener for `event_name` under the current model.
    pub fn delegate(doc: &BaseDocument, chain: &[usize], event_name: &str) -> Option<usize> {
        let name = doc.listener_model().mangle(event_name);
        chain
            .iter()
            .copied()
            .find(|node_id| {
                doc.get_node(*node_id)
                    .is_some_and(|node| node.listeners.iter().any(|l| l.name == name))
            })
    }
}
