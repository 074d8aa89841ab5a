//! Host selection state and the two selection models it can be exposed
//! through.
//!
//! The document keeps one canonical anchor/focus pair; which *model* a
//! caller sees is decided per call from [`SelectionSupport`]: the ranged
//! model hands out the raw (possibly backward) anchor/focus endpoints, the
//! legacy model hands out a directionless [`TextRange`] that is already in
//! document order.

use std::cmp::Ordering;

use crate::BaseDocument;

/// A resolved location in the document tree.
///
/// For text nodes `offset` is a byte offset into the node's content; for
/// element nodes it is a child index (range boundary convention).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub node: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Represents one endpoint (anchor or focus) of a text selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionEndpoint {
    /// The node the endpoint sits in, if set.
    pub node: Option<usize>,
    /// Byte offset within the node's text content.
    pub offset: usize,
}

impl SelectionEndpoint {
    fn new(node: usize, offset: usize) -> Self {
        Self {
            node: Some(node),
            offset,
        }
    }

    /// Check if this endpoint is set
    pub fn is_some(&self) -> bool {
        self.node.is_some()
    }

    /// Clear this endpoint
    pub fn clear(&mut self) {
        self.node = None;
        self.offset = 0;
    }

    /// Set this endpoint to the given node and offset
    pub fn set(&mut self, node: usize, offset: usize) {
        self.node = Some(node);
        self.offset = offset;
    }
}

/// Drag-direction-aware selection state.
///
/// Tracks both the anchor (where the selection started) and the focus
/// (where it currently ends). Either may precede the other in document
/// order; a backward drag leaves the focus before the anchor.
#[derive(Clone, Debug, Default)]
pub struct TextSelection {
    /// The anchor point (where selection started via mousedown)
    pub anchor: SelectionEndpoint,
    /// The focus point (where selection currently ends, updated during drag)
    pub focus: SelectionEndpoint,
}

impl TextSelection {
    /// Create a selection spanning from anchor to focus
    pub fn new(
        anchor_node: usize,
        anchor_offset: usize,
        focus_node: usize,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor: SelectionEndpoint::new(anchor_node, anchor_offset),
            focus: SelectionEndpoint::new(focus_node, focus_offset),
        }
    }

    /// Check if there is an active (non-empty) selection.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
            && self.focus.is_some()
            && (self.anchor.node != self.focus.node || self.anchor.offset != self.focus.offset)
    }

    /// Clear the selection
    pub fn clear(&mut self) {
        self.anchor.clear();
        self.focus.clear();
    }

    /// Update the focus endpoint
    pub fn set_focus(&mut self, node: usize, offset: usize) {
        self.focus.set(node, offset);
    }

    /// The anchor/focus pair rearranged into document order.
    ///
    /// Returns `None` when either endpoint is unset. A collapsed selection
    /// yields a collapsed range.
    pub fn to_ordered_range(&self, doc: &BaseDocument) -> Option<TextRange> {
        let anchor = Position::new(self.anchor.node?, self.anchor.offset);
        let focus = Position::new(self.focus.node?, self.focus.offset);

        let ordering = match doc.compare_document_order(anchor.node, focus.node) {
            Ordering::Equal => anchor.offset.cmp(&focus.offset),
            order => order,
        };
        let (start, end) = match ordering {
            Ordering::Less | Ordering::Equal => (anchor, focus),
            Ordering::Greater => (focus, anchor),
        };
        Some(TextRange { start, end })
    }
}

/// A directionless span of document content, always in document order.
///
/// This is the legacy selection model: there is no anchor/focus distinction
/// and therefore no drag-direction handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRange {
    start: Position,
    end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-length range at `position`.
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Copy this range, leaving the original untouched.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Move the start boundary to the end boundary, collapsing the range at
    /// its textually later point.
    pub fn collapse_to_end(&mut self) {
        self.start = self.end;
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// The plain text covered by this range.
    pub fn text(&self, doc: &BaseDocument) -> String {
        doc.text_between(self.start, self.end)
    }
}

/// Which selection model the host exposes, if any.
///
/// Probed per call site; documents constructed without an explicit value
/// default to [`SelectionSupport::Ranged`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionSupport {
    /// Anchor/focus endpoints in drag order plus a shared end offset.
    #[default]
    Ranged,
    /// A directionless range with implicit start/end ordering.
    Legacy,
    /// No selection capability at all.
    None,
}

/// The per-call view of the host selection, normalized to one of the two
/// supported models. Obtained through `SelectionAdapter` in marq-menu (or
/// directly via [`BaseDocument::selection`]).
#[derive(Clone, Debug)]
pub enum SelectionHandle {
    Ranged(TextSelection),
    Legacy(TextRange),
}
