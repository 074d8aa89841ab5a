//! Marker insertion: splice the reusable marker element into the tree at a
//! resolved position.
//!
//! Two mutually exclusive strategies, selected by the selection model that
//! produced the handle:
//!
//! - **Structural** (ranged model): the existing marker node is spliced
//!   directly, leaving every other node reference valid.
//! - **Serialized** (legacy model): the marker is round-tripped through
//!   markup and pasted at a collapsed copy of the range. Parsing produces
//!   fresh nodes, so the held marker id becomes stale and the caller must
//!   act on [`InsertOutcome::Replaced`] by re-binding listeners.

use marq_dom::{BaseDocument, Position, SelectionHandle, local_name, serialize};

/// The result of a successful marker insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The marker node was spliced directly; its id is unchanged.
    InPlace,
    /// The marker was recreated from markup. The previous node id is stale
    /// and activation listeners must be re-bound on the new node.
    Replaced { marker_id: usize },
}

/// Splice the marker into the tree at `end`, refreshing its content from
/// `menu_html` first.
///
/// Returns `None` when the host cannot perform the insertion (for example,
/// no markup-parsing capability on the serialized path); no error is
/// raised — selection menus degrade silently on unsupported platforms.
pub fn insert_at(
    doc: &mut BaseDocument,
    marker_id: usize,
    menu_html: &str,
    handle: &SelectionHandle,
    end: Position,
) -> Option<InsertOutcome> {
    let provider = doc.html_parser_provider();

    match handle {
        SelectionHandle::Ranged(_) => {
            // Structural insertion: fill the marker, then splice the node
            // itself into the tree.
            let mut mutr = doc.mutate();
            provider.parse_inner_html(&mut mutr, marker_id, menu_html);
            mutr.insert_node_at(end, marker_id);
            drop(mutr);

            if doc.get_node(marker_id)?.parent.is_none() {
                return None;
            }
            Some(InsertOutcome::InPlace)
        }
        SelectionHandle::Legacy(range) => {
            let marker_dom_id = doc.get_node(marker_id)?.attr(local_name!("id"))?.to_string();

            // Fill the marker, detach it (it must not appear twice), then
            // round-trip it through markup at a collapsed copy of the range.
            {
                let mut mutr = doc.mutate();
                provider.parse_inner_html(&mut mutr, marker_id, menu_html);
                mutr.remove_node(marker_id);
            }
            let markup = serialize::outer_html(doc, marker_id);

            let mut insertion_range = range.duplicate();
            insertion_range.collapse_to_end();
            {
                let mut mutr = doc.mutate();
                provider.paste_html(&mut mutr, insertion_range.start(), &markup);
            }

            // The paste went through serialized markup, so the held node id
            // is stale: re-acquire the marker by its stable id attribute.
            let Some(new_id) = doc.get_element_by_id(&marker_dom_id) else {
                #[cfg(feature = "tracing")]
                tracing::warn!("marker missing after markup insertion; menu stays hidden");
                return None;
            };
            if doc.get_node(new_id).is_none_or(|node| node.parent.is_none()) {
                #[cfg(feature = "tracing")]
                tracing::warn!("marker not attached after markup insertion; menu stays hidden");
                return None;
            }

            // Free the superseded node; the re-acquired one is the marker
            // from here on.
            if new_id != marker_id {
                doc.mutate().remove_node_if_unparented(marker_id);
            }
            Some(InsertOutcome::Replaced { marker_id: new_id })
        }
    }
}
