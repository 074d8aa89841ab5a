//! End-to-end tests for the selection menu over a parsed document, driving
//! it the way a host would: DOM events through an `EventDriver`, selection
//! state set between mousedown and mouseup, the deferred re-check fired by
//! hand.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use marq_dom::{
    BaseDocument, DocumentConfig, EventDriver, SelectionSupport, TreeTraverser, serialize,
};
use marq_html::{DocumentHtmlParser, HtmlParser};
use marq_menu::{MARKER_ID, MenuConfig, MenuHandler, MenuState, SelectionAdapter, SelectionMenu};
use marq_traits::{DomEvent, DomEventData, ListenerModel, MouseButtonEvent, ShellProvider};

const PAGE: &str = "<html><body><div id=\"content\"><p>The quick brown fox</p></div></body></html>";
const MENU_HTML: &str = "<a href=\"#share\">Share</a>";

#[derive(Default)]
struct RecordingShell {
    timeouts: Mutex<Vec<Duration>>,
}

impl ShellProvider for RecordingShell {
    fn request_timeout(&self, delay: Duration) {
        self.timeouts.lock().unwrap().push(delay);
    }

    fn node_height(&self, _node_id: usize) -> Option<f32> {
        Some(18.0)
    }
}

#[derive(Default)]
struct RecordingHandler {
    activations: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl MenuHandler for RecordingHandler {
    fn on_activate(&self, menu: &SelectionMenu, _event: &DomEvent) {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.texts
            .lock()
            .unwrap()
            .push(menu.selected_text().to_string());
    }
}

struct Harness {
    doc: BaseDocument,
    menu: SelectionMenu,
    shell: Arc<RecordingShell>,
    handler: Arc<RecordingHandler>,
    container: usize,
    paragraph: usize,
    text: usize,
}

fn harness(support: SelectionSupport, model: ListenerModel) -> Harness {
    let shell = Arc::new(RecordingShell::default());
    let handler = Arc::new(RecordingHandler::default());

    let mut doc = BaseDocument::new(DocumentConfig {
        selection_support: Some(support),
        listener_model: Some(model),
        shell_provider: Some(shell.clone()),
        html_parser_provider: Some(Arc::new(HtmlParser)),
    });
    DocumentHtmlParser::parse_into_doc(&mut doc, PAGE);

    let container = doc.get_element_by_id("content").expect("container");
    let text = TreeTraverser::new(&doc)
        .find(|id| {
            doc.get_node(*id)
                .is_some_and(|n| n.text_data().is_some_and(|t| t.content.contains("quick")))
        })
        .expect("text node");
    let paragraph = doc.get_node(text).unwrap().parent.unwrap();

    let menu = SelectionMenu::new(
        &mut doc,
        MenuConfig::new(container, MENU_HTML, handler.clone()),
    );

    Harness {
        doc,
        menu,
        shell,
        handler,
        container,
        paragraph,
        text,
    }
}

impl Harness {
    fn mousedown(&mut self, target: usize) {
        let mut driver = EventDriver::new(&mut self.doc, &mut self.menu);
        driver.handle_dom_event(DomEvent::new(
            target,
            DomEventData::MouseDown(MouseButtonEvent::main(0.0, 0.0)),
        ));
    }

    fn mouseup(&mut self, target: usize) {
        let mut driver = EventDriver::new(&mut self.doc, &mut self.menu);
        driver.handle_dom_event(DomEvent::new(
            target,
            DomEventData::MouseUp(MouseButtonEvent::main(0.0, 0.0)),
        ));
    }

    /// A full select gesture over the text node: press, drag (the host
    /// updates the selection), release.
    fn select(&mut self, anchor_offset: usize, focus_offset: usize) {
        self.mousedown(self.text);
        self.doc
            .set_selection(self.text, anchor_offset, self.text, focus_offset);
        self.mouseup(self.text);
    }

    fn marker(&self) -> usize {
        self.menu.marker_id().expect("marker created")
    }

    fn marker_attached(&self) -> bool {
        self.doc
            .get_node(self.marker())
            .is_some_and(|node| node.parent.is_some())
    }
}

// "quick brown" is bytes 4..15 of "The quick brown fox"; "fox" is 16..19.

#[test]
fn forward_selection_shows_menu_after_its_end() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);

    assert_eq!(h.menu.state(), MenuState::Visible);
    assert_eq!(h.menu.selected_text(), "quick brown");
    assert!(h.marker_attached());
    assert_eq!(
        serialize::outer_html(&h.doc, h.paragraph),
        "<p>The quick brown\
         <span id=\"selection-menu\" style=\"margin-top: -23px\">\
         <a href=\"#share\">Share</a></span> fox</p>"
    );
}

#[test]
fn backward_selection_inserts_at_the_same_position() {
    let mut forward = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    forward.select(4, 15);
    let mut backward = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    backward.select(15, 4); // dragged right-to-left

    assert_eq!(backward.menu.state(), MenuState::Visible);
    assert_eq!(backward.menu.selected_text(), "quick brown");
    assert_eq!(
        serialize::outer_html(&forward.doc, forward.paragraph),
        serialize::outer_html(&backward.doc, backward.paragraph),
    );
}

#[test]
fn short_selection_keeps_menu_hidden() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(16, 19); // "fox", 3 chars < default minimum of 5

    assert_eq!(h.menu.state(), MenuState::Hidden);
    assert!(!h.marker_attached());
    assert_eq!(h.menu.selected_text(), "fox");
}

#[test]
fn click_elsewhere_hides_but_keeps_the_marker_for_reuse() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);
    let marker = h.marker();
    assert!(h.marker_attached());

    // Click somewhere else in the container: the selection collapses
    h.mousedown(h.text);
    h.doc.clear_selection();
    h.mouseup(h.text);

    assert_eq!(h.menu.state(), MenuState::Hidden);
    assert!(!h.marker_attached());
    // The element survives detachment and is reused by the next show
    assert_eq!(h.menu.marker_id(), Some(marker));
    h.select(4, 15);
    assert_eq!(h.menu.state(), MenuState::Visible);
    assert_eq!(h.menu.marker_id(), Some(marker));
}

#[test]
fn mousedown_on_the_marker_does_not_detach_it() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);
    let marker = h.marker();

    h.mousedown(marker);
    assert!(h.marker_attached());

    // Same guard for a descendant of the marker
    let link = h.doc.get_node(marker).unwrap().children[0];
    h.mousedown(link);
    assert!(h.marker_attached());
}

#[test]
fn activating_the_marker_invokes_the_handler_and_suppresses_default() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);

    // Mouseup on the marker's content synthesizes the click that activates
    let link = h.doc.get_node(h.marker()).unwrap().children[0];
    h.mouseup(link);

    assert_eq!(h.handler.activations.load(Ordering::SeqCst), 1);
    assert_eq!(*h.handler.texts.lock().unwrap(), vec!["quick brown"]);
    // The gesture on the menu itself did not re-insert or hide
    assert_eq!(h.menu.state(), MenuState::Visible);
    assert!(h.marker_attached());
}

#[test]
fn deferred_recheck_hides_stale_marker_and_is_idempotent() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);
    assert_eq!(h.menu.state(), MenuState::Visible);
    // One re-check was scheduled per mouseup (including the initial one of
    // the gesture), with the fixed minimal delay
    let timeouts = h.shell.timeouts.lock().unwrap().clone();
    assert!(!timeouts.is_empty());
    assert!(timeouts.iter().all(|d| *d == marq_menu::DEFERRED_RECHECK_DELAY));

    // Selection still live: the re-check does nothing
    h.menu.hide_if_no_selection(&mut h.doc);
    assert_eq!(h.menu.state(), MenuState::Visible);

    // Selection collapsed after the fact: the re-check hides
    h.doc.clear_selection();
    h.menu.hide_if_no_selection(&mut h.doc);
    assert_eq!(h.menu.state(), MenuState::Hidden);
    assert!(!h.marker_attached());

    // A stale timer firing again against hidden state is a no-op
    h.menu.hide_if_no_selection(&mut h.doc);
    assert_eq!(h.menu.state(), MenuState::Hidden);
}

#[test]
fn unsupported_platform_degrades_silently() {
    let mut h = harness(SelectionSupport::None, ListenerModel::Modern);
    assert!(!SelectionAdapter::is_supported(&h.doc));

    h.select(4, 15);
    assert_eq!(h.menu.state(), MenuState::Hidden);
    assert!(!h.marker_attached());
    assert_eq!(h.menu.selected_text(), "");
}

#[test]
fn serialized_insertion_replaces_the_marker_node() {
    let mut h = harness(SelectionSupport::Legacy, ListenerModel::Legacy);
    let original_marker = h.marker();
    h.select(4, 15);

    assert_eq!(h.menu.state(), MenuState::Visible);
    let new_marker = h.marker();
    assert_ne!(new_marker, original_marker, "markup round-trip invalidates the node");
    // The superseded node was freed, the replacement is attached and
    // indexed under the stable id
    assert!(h.doc.get_node(original_marker).is_none());
    assert_eq!(h.doc.get_element_by_id(MARKER_ID), Some(new_marker));
    assert!(h.marker_attached());
    assert_eq!(
        serialize::outer_html(&h.doc, h.paragraph),
        "<p>The quick brown\
         <span id=\"selection-menu\" style=\"margin-top: -23px\">\
         <a href=\"#share\">Share</a></span> fox</p>"
    );
}

#[test]
fn handler_stays_bound_across_serialized_insertion() {
    let mut h = harness(SelectionSupport::Legacy, ListenerModel::Legacy);
    h.select(4, 15);

    // Activate through the replaced node's content: this only works if the
    // click listener was re-bound after re-acquiring the marker by id
    let link = h.doc.get_node(h.marker()).unwrap().children[0];
    h.mouseup(link);

    assert_eq!(h.handler.activations.load(Ordering::SeqCst), 1);
    assert_eq!(*h.handler.texts.lock().unwrap(), vec!["quick brown"]);
}

#[test]
fn legacy_backward_drag_resolves_like_forward() {
    let mut h = harness(SelectionSupport::Legacy, ListenerModel::Legacy);
    h.select(15, 4);

    assert_eq!(h.menu.state(), MenuState::Visible);
    assert_eq!(h.menu.selected_text(), "quick brown");
    let marker = h.marker();
    // Marker sits immediately after "brown": previous sibling is the
    // leading half of the split text node
    let parent = h.doc.get_node(marker).unwrap().parent.unwrap();
    let children = &h.doc.get_node(parent).unwrap().children;
    let marker_index = children.iter().position(|id| *id == marker).unwrap();
    let before = h.doc.get_node(children[marker_index - 1]).unwrap();
    assert_eq!(before.text_data().unwrap().content, "The quick brown");
}

#[test]
fn hide_when_already_hidden_is_a_no_op() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    assert_eq!(h.menu.state(), MenuState::Hidden);

    let snapshot = serialize::outer_html(&h.doc, h.container);
    h.menu.hide(&mut h.doc, None);
    h.menu.hide(&mut h.doc, None);
    assert_eq!(h.menu.state(), MenuState::Hidden);
    assert_eq!(serialize::outer_html(&h.doc, h.container), snapshot);
}

#[test]
fn menu_content_is_refreshed_on_every_show() {
    let mut h = harness(SelectionSupport::Ranged, ListenerModel::Modern);
    h.select(4, 15);
    let marker = h.marker();
    assert_eq!(serialize::inner_html(&h.doc, marker), MENU_HTML);

    // Hide, select again: content is re-parsed rather than accumulated
    h.mousedown(h.text);
    h.doc.set_selection(h.text, 0, h.text, 9);
    h.mouseup(h.text);
    assert_eq!(h.menu.state(), MenuState::Visible);
    assert_eq!(h.menu.selected_text(), "The quick");
    assert_eq!(serialize::inner_html(&h.doc, marker), MENU_HTML);
}
