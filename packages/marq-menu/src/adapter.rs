//! Capability-detecting facade over the host's selection primitives.

use marq_dom::{BaseDocument, SelectionHandle, SelectionSupport};

pub struct SelectionAdapter;

impl SelectionAdapter {
    /// The host's current selection, normalized to one of the two supported
    /// models, or `None` when the platform supports neither. Absence is a
    /// normal, silently-degraded state, not an error.
    ///
    /// The capability is probed on every call so that mixed-capability or
    /// emulated hosts resolve correctly at each call site.
    pub fn current(doc: &BaseDocument) -> Option<SelectionHandle> {
        doc.selection()
    }

    /// Extract plain text from whichever representation [`Self::current`]
    /// returned. No side effects.
    pub fn selected_text(doc: &BaseDocument, handle: &SelectionHandle) -> String {
        match handle {
            SelectionHandle::Ranged(selection) => selection
                .to_ordered_range(doc)
                .map(|range| range.text(doc))
                .unwrap_or_default(),
            SelectionHandle::Legacy(range) => range.text(doc),
        }
    }

    /// Whether the host exposes any selection capability at all. Exposed so
    /// callers can feature-detect up front instead of relying on the silent
    /// degradation of the other operations.
    pub fn is_supported(doc: &BaseDocument) -> bool {
        doc.selection_support() != SelectionSupport::None
    }
}
