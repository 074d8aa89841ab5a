//! Canonical end-of-selection resolution.

use std::cmp::Ordering;

use marq_dom::{BaseDocument, Position, SelectionHandle};

/// Resolve the canonical end of a selection: the textually later boundary,
/// independent of the direction the user dragged in.
///
/// Returns `None` when the selection has no usable endpoints.
pub fn resolve_end(doc: &BaseDocument, handle: &SelectionHandle) -> Option<Position> {
    match handle {
        SelectionHandle::Ranged(selection) => {
            let anchor = selection.anchor.node?;
            let focus = selection.focus.node?;

            // The backing ordered range exposes a single end offset shared
            // between the two boundary nodes; which node owns it flips with
            // drag direction.
            let end_offset = selection.to_ordered_range(doc)?.end().offset;
            match doc.compare_document_order(anchor, focus) {
                // Focus precedes anchor: a backward drag, so the anchor is
                // the textually later boundary.
                Ordering::Greater => Some(Position::new(anchor, end_offset)),
                // Forward drag (or a single-node selection).
                Ordering::Less | Ordering::Equal => Some(Position::new(focus, end_offset)),
            }
        }
        // The legacy range is already ordered: collapsing a copy onto its
        // end boundary gives the canonical end without any comparison.
        SelectionHandle::Legacy(range) => {
            let mut range = range.duplicate();
            range.collapse_to_end();
            Some(range.start())
        }
    }
}
