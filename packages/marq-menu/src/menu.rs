use std::sync::Arc;
use std::time::Duration;

use marq_dom::{Attribute, BaseDocument, EventBinder, EventHandler, qual_name};
use marq_traits::{DomEvent, DomEventData};

use crate::adapter::SelectionAdapter;
use crate::endpoint::resolve_end;
use crate::insert::{InsertOutcome, insert_at};

/// The id attribute carried by the marker element, used to re-acquire it
/// after insertion paths that replace the underlying node.
pub const MARKER_ID: &str = "selection-menu";

/// Fixed delay for the post-mouseup selection re-check.
pub const DEFERRED_RECHECK_DELAY: Duration = Duration::from_millis(1);

/// Vertical gap between the marker and the selected line.
const MARKER_MARGIN_PX: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Hidden,
    Visible,
}

/// Invoked when the marker is activated. The menu exposes the text that was
/// selected when the marker was shown; the return value is ignored and the
/// activation's default action is always suppressed.
pub trait MenuHandler {
    fn on_activate(&self, menu: &SelectionMenu, event: &DomEvent);
}

/// Construction-time configuration, read-only to the menu after creation.
pub struct MenuConfig {
    /// Markup injected as the marker's content on each show.
    pub menu_html: String,
    /// Minimum selected-character count to trigger display.
    pub minimal_selection: usize,
    /// The element whose selections are observed.
    pub container: usize,
    /// Callback invoked when the marker is activated.
    pub handler: Arc<dyn MenuHandler>,
}

impl MenuConfig {
    pub fn new(
        container: usize,
        menu_html: impl Into<String>,
        handler: Arc<dyn MenuHandler>,
    ) -> Self {
        Self {
            menu_html: menu_html.into(),
            minimal_selection: 5,
            container,
            handler,
        }
    }
}

/// A contextual menu anchored at the end of the user's text selection.
///
/// Owns the single reusable marker element: created once, spliced into the
/// document after each qualifying selection, detached (never dropped) when
/// the menu hides. Drive it by registering it as the handler of an
/// [`EventDriver`](marq_dom::EventDriver) over the same document, and call
/// [`Self::hide_if_no_selection`] when the deferred re-check requested from
/// the shell fires.
pub struct SelectionMenu {
    config: MenuConfig,
    state: MenuState,
    marker_id: Option<usize>,
    selected_text: String,
}

impl SelectionMenu {
    pub fn new(doc: &mut BaseDocument, config: MenuConfig) -> Self {
        let mut menu = Self {
            config,
            state: MenuState::Hidden,
            marker_id: None,
            selected_text: String::new(),
        };
        menu.create(doc);
        menu.setup_events(doc);
        menu
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// The text that was selected when the marker was last shown.
    pub fn selected_text(&self) -> &str {
        &self.selected_text
    }

    /// The marker element, once created. Stays valid across hides; replaced
    /// only by the serialized insertion path.
    pub fn marker_id(&self) -> Option<usize> {
        self.marker_id
    }

    /// Create the marker element, if that hasn't happened yet.
    fn create(&mut self, doc: &mut BaseDocument) {
        if self.marker_id.is_some() {
            return;
        }
        let id = doc.mutate().create_element(
            qual_name!("span"),
            vec![Attribute {
                name: qual_name!("id"),
                value: MARKER_ID.to_string(),
            }],
        );
        self.marker_id = Some(id);
    }

    fn setup_events(&mut self, doc: &mut BaseDocument) {
        EventBinder::bind(doc, self.config.container, "mousedown");
        EventBinder::bind(doc, self.config.container, "mouseup");
        self.setup_menu_events(doc);
    }

    /// (Re-)bind the marker's listeners. Called at construction and again
    /// whenever an insertion path replaces the marker node — a replaced
    /// node carries no registrations.
    fn setup_menu_events(&mut self, doc: &mut BaseDocument) {
        let Some(marker) = self.marker_id else {
            return;
        };
        EventBinder::bind(doc, marker, "click");
        // Keep the menu itself from being selected
        EventBinder::bind(doc, marker, "selectstart");
    }

    /// Is the event target the marker element or contained in it?
    fn mouse_on_menu(&self, doc: &BaseDocument, target: usize) -> bool {
        self.marker_id
            .is_some_and(|marker| target == marker || doc.is_ancestor_of(marker, target))
    }

    /// Detach the marker from the tree, keeping the element alive for
    /// reuse. When `target` is given and sits on the menu itself, the
    /// marker is left in place.
    pub fn hide(&mut self, doc: &mut BaseDocument, target: Option<usize>) {
        if let Some(target) = target {
            if self.mouse_on_menu(doc, target) {
                return;
            }
        }
        self.state = MenuState::Hidden;

        let Some(marker) = self.marker_id else {
            return;
        };
        if doc.get_node(marker).is_some_and(|node| node.parent.is_some()) {
            doc.mutate().remove_node(marker);
            doc.shell_provider().request_redraw();
        }
    }

    /// The deferred re-check: hide if the host selection turned out empty
    /// once the mouseup's default handling completed.
    ///
    /// Scheduled once per mouseup with no cancellation token, so it may
    /// fire against state that has since changed; hiding an already-hidden
    /// marker is a no-op, which makes the stale case harmless.
    pub fn hide_if_no_selection(&mut self, doc: &mut BaseDocument) {
        let Some(selection) = SelectionAdapter::current(doc) else {
            return;
        };
        if SelectionAdapter::selected_text(doc, &selection).is_empty() {
            self.hide(doc, None);
        }
    }

    fn insert(&mut self, doc: &mut BaseDocument, target: usize) {
        if self.mouse_on_menu(doc, target) {
            return;
        }

        let Some(selection) = SelectionAdapter::current(doc) else {
            // No selection support
            return;
        };

        self.selected_text = SelectionAdapter::selected_text(doc, &selection);

        if self.selected_text.chars().count() < self.config.minimal_selection {
            self.hide(doc, Some(target));
            return;
        }

        let Some(marker) = self.marker_id else {
            return;
        };
        let Some(end) = resolve_end(doc, &selection) else {
            return;
        };

        match insert_at(doc, marker, &self.config.menu_html, &selection, end) {
            Some(InsertOutcome::InPlace) => {}
            Some(InsertOutcome::Replaced { marker_id }) => {
                // The markup round-trip invalidated the old node: track the
                // replacement and restore its listeners.
                self.marker_id = Some(marker_id);
                self.setup_menu_events(doc);
            }
            // Degraded host: nothing was inserted
            None => return,
        }

        self.position(doc);
        self.state = MenuState::Visible;
        doc.shell_provider().request_redraw();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "selection menu shown ({} chars selected)",
            self.selected_text.chars().count()
        );
    }

    /// Shift the marker above the selected line: up by its own rendered
    /// height plus a small margin.
    fn position(&self, doc: &mut BaseDocument) {
        let Some(marker) = self.marker_id else {
            return;
        };
        let height = doc.shell_provider().node_height(marker).unwrap_or(0.0);
        let margin = format!("-{}px", height + MARKER_MARGIN_PX);
        doc.set_style_property(marker, "margin-top", &margin);
    }
}

impl EventHandler for SelectionMenu {
    fn handle_event(&mut self, chain: &[usize], event: &mut DomEvent, doc: &mut BaseDocument) {
        match &event.data {
            DomEventData::MouseDown(_) => {
                if EventBinder::delegate(doc, chain, "mousedown") == Some(self.config.container) {
                    self.hide(doc, Some(event.target));
                }
            }
            DomEventData::MouseUp(_) => {
                if EventBinder::delegate(doc, chain, "mouseup") == Some(self.config.container) {
                    self.insert(doc, event.target);
                    // A mousedown inside an existing selection collapses it
                    // only after default handling completes; check again
                    // shortly after this gesture.
                    doc.shell_provider().request_timeout(DEFERRED_RECHECK_DELAY);
                }
            }
            DomEventData::Click(_) => {
                let Some(marker) = self.marker_id else {
                    return;
                };
                if EventBinder::delegate(doc, chain, "click") == Some(marker) {
                    let handler = Arc::clone(&self.config.handler);
                    handler.on_activate(self, event);
                    event.prevent_default();
                }
            }
            DomEventData::SelectStart => {
                let Some(marker) = self.marker_id else {
                    return;
                };
                if EventBinder::delegate(doc, chain, "selectstart") == Some(marker) {
                    event.prevent_default();
                }
            }
        }
    }
}
