//! A contextual menu anchored at the end of a text selection.
//!
//! When the user finishes selecting text inside a designated container and
//! the selection is long enough, a single reusable marker element is
//! spliced into the document immediately after the end of the selection —
//! regardless of whether the user dragged left-to-right or right-to-left —
//! anchoring a caller-supplied menu. Activating the marker invokes the
//! caller's handler with the selected text.
//!
//! The pieces:
//!
//! - [`adapter::SelectionAdapter`] normalizes the host's two selection
//!   models (drag-ordered anchor/focus vs. directionless range) behind a
//!   per-call capability probe;
//! - [`endpoint::resolve_end`] computes the canonical end of the
//!   selection, independent of drag direction;
//! - [`insert`] splices the marker, structurally or through a markup
//!   round-trip (re-acquiring the element by id when the round-trip
//!   invalidates the held node);
//! - [`SelectionMenu`] owns the marker and the hidden/visible lifecycle,
//!   driven as the handler of an [`EventDriver`](marq_dom::EventDriver).
//!
//! Hosts without selection or parsing capability degrade silently: every
//! operation becomes a no-op and the menu simply never appears.
//!
//! ```no_run
//! use std::sync::Arc;
//! use marq_dom::{BaseDocument, DocumentConfig, EventDriver};
//! use marq_menu::{MenuConfig, MenuHandler, SelectionMenu};
//!
//! struct Share;
//! impl MenuHandler for Share {
//!     fn on_activate(&self, menu: &SelectionMenu, _event: &marq_traits::DomEvent) {
//!         println!("share: {}", menu.selected_text());
//!     }
//! }
//!
//! let mut doc = BaseDocument::new(DocumentConfig::default());
//! # let container = 0;
//! let mut menu = SelectionMenu::new(
//!     &mut doc,
//!     MenuConfig::new(container, "<a href=\"#share\">Share</a>", Arc::new(Share)),
//! );
//! // Feed host events through an EventDriver with `&mut menu` as handler.
//! let driver = EventDriver::new(&mut doc, &mut menu);
//! # drop(driver);
//! ```

pub mod adapter;
pub mod endpoint;
pub mod insert;
mod menu;

pub use adapter::SelectionAdapter;
pub use endpoint::resolve_end;
pub use insert::{InsertOutcome, insert_at};
pub use menu::{
    DEFERRED_RECHECK_DELAY, MARKER_ID, MenuConfig, MenuHandler, MenuState, SelectionMenu,
};
