use std::collections::HashMap;
use std::sync::Arc;

use markup5ever::local_name;
use slab::Slab;

use crate::config::DocumentConfig;
use crate::html::{DummyHtmlParserProvider, HtmlParserProvider};
use crate::mutator::DocumentMutator;
use crate::node::{Node, NodeData, TextNodeData};
use crate::selection::{Position, SelectionHandle, SelectionSupport, TextRange, TextSelection};
use marq_traits::{DomEvent, DummyShellProvider, ListenerModel, ShellProvider};

/// A headless DOM document.
///
/// Owns a slab-backed node tree plus the host capability surface (selection
/// model, event-listener model, shell and parser providers). It is designed
/// to be embedded in and driven by external code: the host feeds events and
/// maintains selection state, this type owns the tree.
pub struct BaseDocument {
    pub(crate) nodes: Slab<Node>,

    /// A map of node id's to nodes with that id attribute
    pub(crate) nodes_to_id: HashMap<String, usize>,

    /// The canonical selection state (anchor/focus in drag order)
    pub(crate) selection: TextSelection,

    selection_support: SelectionSupport,
    listener_model: ListenerModel,

    pub(crate) shell_provider: Arc<dyn ShellProvider>,
    pub(crate) html_parser_provider: Arc<dyn HtmlParserProvider>,
}

impl BaseDocument {
    pub fn new(config: DocumentConfig) -> Self {
        let mut nodes = Slab::new();
        let root_id = nodes.insert(Node::new(0, NodeData::Document));
        debug_assert_eq!(root_id, 0);

        Self {
            nodes,
            nodes_to_id: HashMap::new(),
            selection: TextSelection::default(),
            selection_support: config.selection_support.unwrap_or_default(),
            listener_model: config.listener_model.unwrap_or_default(),
            shell_provider: config
                .shell_provider
                .unwrap_or_else(|| Arc::new(DummyShellProvider)),
            html_parser_provider: config
                .html_parser_provider
                .unwrap_or_else(|| Arc::new(DummyHtmlParserProvider)),
        }
    }

    pub fn tree(&self) -> &Slab<Node> {
        &self.nodes
    }

    pub fn get_node(&self, node_id: usize) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_node_mut(&mut self, node_id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    /// The root element of the document (the first element child of the
    /// document node), if there is one.
    pub fn try_root_element(&self) -> Option<&Node> {
        self.root_node()
            .children
            .iter()
            .map(|id| &self.nodes[*id])
            .find(|node| node.is_element())
    }

    /// Get a [`DocumentMutator`] for this document, which allows mutating
    /// the document tree through a consolidated interface
    pub fn mutate<'doc>(&'doc mut self) -> DocumentMutator<'doc> {
        DocumentMutator::new(self)
    }

    pub fn handle_dom_event<F: FnMut(DomEvent)>(&mut self, event: &mut DomEvent, dispatch_event: F) {
        crate::events::handle_dom_event(self, event, dispatch_event)
    }

    pub fn print_tree(&self) {
        crate::util::walk_tree(self, 0, self.root_node())
    }

    pub fn print_subtree(&self, node_id: usize) {
        if let Some(node) = self.get_node(node_id) {
            crate::util::walk_tree(self, 0, node)
        }
    }

    pub fn shell_provider(&self) -> &Arc<dyn ShellProvider> {
        &self.shell_provider
    }

    pub fn html_parser_provider(&self) -> Arc<dyn HtmlParserProvider> {
        Arc::clone(&self.html_parser_provider)
    }

    pub fn set_shell_provider(&mut self, shell_provider: Arc<dyn ShellProvider>) {
        self.shell_provider = shell_provider;
    }

    pub fn set_html_parser_provider(&mut self, html_parser_provider: Arc<dyn HtmlParserProvider>) {
        self.html_parser_provider = html_parser_provider;
    }

    // --- Node creation ---

    pub fn create_node(&mut self, node_data: NodeData) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node::new(id, node_data));
        id
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        let content = text.to_string();
        let data = NodeData::Text(TextNodeData::new(content));
        self.create_node(data)
    }

    /// Find the node with the specified id attribute (if one exists)
    pub fn get_element_by_id(&self, id: &str) -> Option<usize> {
        self.nodes_to_id.get(id).copied()
    }

    // --- Tree splicing ---

    /// Append `new_node_ids` to the end of `parent_id`'s children,
    /// detaching them from any previous parent.
    pub fn append(&mut self, parent_id: usize, new_node_ids: &[usize]) {
        for node_id in new_node_ids.iter().copied() {
            self.detach(node_id);
            self.nodes[parent_id].children.push(node_id);
            self.nodes[node_id].parent = Some(parent_id);
        }
    }

    /// Insert `new_node_ids` as siblings immediately before
    /// `anchor_node_id`, detaching them from any previous parent. No-op if
    /// the anchor has no parent.
    pub fn insert_before(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        let Some(parent_id) = self.nodes[anchor_node_id].parent else {
            return;
        };

        for node_id in new_node_ids.iter().copied() {
            self.detach(node_id);
            self.nodes[node_id].parent = Some(parent_id);
        }

        let parent = &mut self.nodes[parent_id];
        let index = parent
            .children
            .iter()
            .position(|id| *id == anchor_node_id)
            .unwrap_or(parent.children.len());
        parent
            .children
            .splice(index..index, new_node_ids.iter().copied());
    }

    /// Remove the node from the tree, but keep it (and its subtree) alive
    /// in the slab so that it can be reinserted later.
    pub fn remove_node(&mut self, node_id: usize) {
        self.detach(node_id);
    }

    /// Remove the node from the tree and drop it and its entire subtree.
    pub fn remove_and_drop_node(&mut self, node_id: usize) -> Option<Node> {
        fn remove_ignoring_parent(doc: &mut BaseDocument, node_id: usize) -> Option<Node> {
            let node = doc.nodes.try_remove(node_id);
            if let Some(node) = &node {
                // Unregister the id attribute unless the map has since been
                // repointed at a replacement node.
                if let Some(id_attr) = node.attr(local_name!("id")) {
                    if doc.nodes_to_id.get(id_attr) == Some(&node_id) {
                        doc.nodes_to_id.remove(id_attr);
                    }
                }
                for &child in &node.children {
                    remove_ignoring_parent(doc, child);
                }
            }
            node
        }

        let node = remove_ignoring_parent(self, node_id);
        if let Some(parent_id) = node.as_ref().and_then(|node| node.parent) {
            self.nodes[parent_id].children.retain(|id| *id != node_id);
        }
        node
    }

    fn detach(&mut self, node_id: usize) {
        if let Some(old_parent) = self.nodes[node_id].parent.take() {
            self.nodes[old_parent].children.retain(|id| *id != node_id);
        }
    }

    // --- Styling ---

    /// Upsert a single declaration in the node's style attribute.
    pub fn set_style_property(&mut self, node_id: usize, name: &str, value: &str) {
        let Some(el) = self.nodes[node_id].element_data_mut() else {
            return;
        };

        let existing = el.attr(local_name!("style")).unwrap_or("");
        let mut decls: Vec<(String, String)> = existing
            .split(';')
            .filter_map(|decl| {
                let (key, val) = decl.split_once(':')?;
                Some((key.trim().to_string(), val.trim().to_string()))
            })
            .collect();

        match decls.iter_mut().find(|(key, _)| key == name) {
            Some((_, val)) => *val = value.to_string(),
            None => decls.push((name.to_string(), value.to_string())),
        }

        let style = decls
            .iter()
            .map(|(key, val)| format!("{key}: {val}"))
            .collect::<Vec<_>>()
            .join("; ");

        match el
            .attrs
            .iter_mut()
            .find(|attr| attr.name.local == local_name!("style"))
        {
            Some(attr) => attr.value = style,
            None => el.attrs.push(crate::node::Attribute {
                name: crate::qual_name!("style"),
                value: style,
            }),
        }
    }

    // --- Selection ---

    /// Which selection model the host exposes. Probed by callers at each
    /// call site rather than cached.
    pub fn selection_support(&self) -> SelectionSupport {
        self.selection_support
    }

    /// Which event-registration model the host exposes.
    pub fn listener_model(&self) -> ListenerModel {
        self.listener_model
    }

    /// Replace the selection state with the given anchor/focus endpoints
    /// (in drag order — a backward drag passes a focus that precedes the
    /// anchor).
    pub fn set_selection(
        &mut self,
        anchor_node: usize,
        anchor_offset: usize,
        focus_node: usize,
        focus_offset: usize,
    ) {
        self.selection = TextSelection::new(anchor_node, anchor_offset, focus_node, focus_offset);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection_state(&self) -> &TextSelection {
        &self.selection
    }

    /// The current selection through whichever model the host supports, or
    /// `None` when selections are unsupported. Note that a supported but
    /// empty selection still yields a handle (whose text is empty).
    pub fn selection(&self) -> Option<SelectionHandle> {
        match self.selection_support {
            SelectionSupport::None => None,
            SelectionSupport::Ranged => Some(SelectionHandle::Ranged(self.selection.clone())),
            SelectionSupport::Legacy => {
                let range = self
                    .selection
                    .to_ordered_range(self)
                    .unwrap_or_else(|| TextRange::collapsed(Position::new(0, 0)));
                Some(SelectionHandle::Legacy(range))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_nodes_survive_for_reinsertion() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let text = doc.create_text_node("hello");
        doc.append(0, &[text]);
        assert_eq!(doc.get_node(text).unwrap().parent, Some(0));

        doc.remove_node(text);
        let node = doc.get_node(text).unwrap();
        assert_eq!(node.parent, None);
        assert_eq!(node.text_data().unwrap().content, "hello");

        doc.append(0, &[text]);
        assert_eq!(doc.get_node(text).unwrap().parent, Some(0));
    }

    #[test]
    fn set_style_property_upserts() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let el = {
            let mut mutr = doc.mutate();
            mutr.create_element(crate::qual_name!("span"), vec![])
        };
        doc.set_style_property(el, "margin-top", "-10px");
        doc.set_style_property(el, "color", "red");
        doc.set_style_property(el, "margin-top", "-23px");

        let node = doc.get_node(el).unwrap();
        assert_eq!(
            node.attr(local_name!("style")),
            Some("margin-top: -23px; color: red")
        );
    }

    #[test]
    fn selection_capability_probed_per_call() {
        let mut doc = BaseDocument::new(DocumentConfig {
            selection_support: Some(SelectionSupport::None),
            ..Default::default()
        });
        let text = doc.create_text_node("hello");
        doc.append(0, &[text]);
        doc.set_selection(text, 0, text, 5);
        assert!(doc.selection().is_none());
    }
}
