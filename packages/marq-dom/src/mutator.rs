use markup5ever::{QualName, local_name};

use crate::node::{Attribute, ElementData, NodeData};
use crate::selection::Position;
use crate::BaseDocument;

pub enum AppendTextErr {
    /// The node is not a text node
    NotTextNode,
}

/// Consolidated mutation interface for a [`BaseDocument`].
///
/// All tree edits made by parsers and widgets go through this type, which
/// keeps bookkeeping such as the id-attribute map in one place.
pub struct DocumentMutator<'doc> {
    /// Document is public as an escape hatch, but users of this API should
    /// ideally avoid using it and prefer exposing additional functionality
    /// in DocumentMutator.
    pub doc: &'doc mut BaseDocument,
}

impl DocumentMutator<'_> {
    pub fn new<'doc>(doc: &'doc mut BaseDocument) -> DocumentMutator<'doc> {
        DocumentMutator { doc }
    }

    pub fn node_has_parent(&self, node_id: usize) -> bool {
        self.doc.nodes[node_id].parent.is_some()
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.doc.nodes[node_id].parent?;
        let children = &self.doc.nodes[parent_id].children;
        let index = children.iter().position(|id| *id == node_id)?;
        index.checked_sub(1).map(|idx| children[idx])
    }

    pub fn last_child_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].children.last().copied()
    }

    pub fn element_name(&self, node_id: usize) -> Option<&QualName> {
        self.doc.nodes[node_id].element_data().map(|el| &el.name)
    }

    pub fn create_comment_node(&mut self) -> usize {
        self.doc.create_node(NodeData::Comment)
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        self.doc.create_text_node(text)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        let data = ElementData::new(name, attrs);
        let id = self.doc.create_node(NodeData::Element(data));

        // If the node has an "id" attribute, store it in the ID map.
        let node = &self.doc.nodes[id];
        if let Some(id_attr) = node.attr(local_name!("id")) {
            self.doc.nodes_to_id.insert(id_attr.to_string(), id);
        }

        id
    }

    /// Remove all of the children from old_parent_id and append them to new_parent_id
    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let child_ids = std::mem::take(&mut self.doc.nodes[old_parent_id].children);
        for child_id in child_ids.iter().copied() {
            self.doc.nodes[child_id].parent = None;
        }
        self.append_children(new_parent_id, &child_ids);
    }

    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        self.doc.append(parent_id, child_ids);
    }

    pub fn insert_nodes_before(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        self.doc.insert_before(anchor_node_id, new_node_ids);
    }

    pub fn insert_nodes_after(&mut self, anchor_node_id: usize, new_node_ids: &[usize]) {
        let next_sibling_id = self.next_sibling_id(anchor_node_id);
        match next_sibling_id {
            Some(sibling_id) => self.doc.insert_before(sibling_id, new_node_ids),
            None => {
                if let Some(parent_id) = self.doc.nodes[anchor_node_id].parent {
                    self.doc.append(parent_id, new_node_ids);
                }
            }
        }
    }

    pub fn next_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.doc.nodes[node_id].parent?;
        let children = &self.doc.nodes[parent_id].children;
        let index = children.iter().position(|id| *id == node_id)?;
        children.get(index + 1).copied()
    }

    /// Detach the node from its parent, keeping the node alive for
    /// reinsertion.
    pub fn remove_node(&mut self, node_id: usize) {
        self.doc.remove_node(node_id);
    }

    pub fn remove_node_if_unparented(&mut self, node_id: usize) {
        if let Some(node) = self.doc.get_node(node_id) {
            if node.parent.is_none() {
                self.doc.remove_and_drop_node(node_id);
            }
        }
    }

    pub fn append_text_to_node(&mut self, node_id: usize, text: &str) -> Result<(), AppendTextErr> {
        match self.doc.nodes[node_id].text_data_mut() {
            Some(data) => {
                data.content += text;
                Ok(())
            }
            None => Err(AppendTextErr::NotTextNode),
        }
    }

    pub fn set_node_text(&mut self, node_id: usize, value: &str) {
        let Some(node) = self.doc.get_node_mut(node_id) else {
            return;
        };
        let NodeData::Text(ref mut text) = node.data else {
            return;
        };
        text.content.clear();
        text.content.push_str(value);
    }

    pub fn add_attrs_if_missing(&mut self, node_id: usize, attrs: Vec<Attribute>) {
        let Some(element) = self.doc.nodes[node_id].element_data() else {
            return;
        };
        let existing_names: Vec<QualName> =
            element.attrs.iter().map(|attr| attr.name.clone()).collect();

        for attr in attrs
            .into_iter()
            .filter(|attr| !existing_names.contains(&attr.name))
        {
            self.set_attribute(node_id, attr.name, &attr.value);
        }
    }

    pub fn set_attribute(&mut self, node_id: usize, name: QualName, value: &str) {
        // Maintain the id map when the id attribute changes
        if name.local == local_name!("id") {
            if let Some(old_id) = self.doc.nodes[node_id].attr(local_name!("id")) {
                let old_id = old_id.to_string();
                if self.doc.nodes_to_id.get(&old_id) == Some(&node_id) {
                    self.doc.nodes_to_id.remove(&old_id);
                }
            }
            self.doc.nodes_to_id.insert(value.to_string(), node_id);
        }

        let Some(element) = self.doc.nodes[node_id].element_data_mut() else {
            return;
        };
        let existing_attr = element.attrs.iter_mut().find(|a| a.name == name);
        if let Some(existing_attr) = existing_attr {
            existing_attr.value.clear();
            existing_attr.value.push_str(value);
        } else {
            element.attrs.push(Attribute {
                name,
                value: value.to_string(),
            });
        }
    }

    pub fn clear_attribute(&mut self, node_id: usize, name: QualName) {
        if name.local == local_name!("id") {
            if let Some(old_id) = self.doc.nodes[node_id].attr(local_name!("id")) {
                let old_id = old_id.to_string();
                if self.doc.nodes_to_id.get(&old_id) == Some(&node_id) {
                    self.doc.nodes_to_id.remove(&old_id);
                }
            }
        }
        if let Some(element) = self.doc.nodes[node_id].element_data_mut() {
            element.attrs.retain(|attr| attr.name.local != name.local);
        }
    }

    /// Split a text node at `offset` (a byte offset into its content),
    /// producing a new following sibling that owns the trailing half.
    /// Returns the new node's id.
    ///
    /// Offsets beyond the content, or not on a char boundary, are clamped
    /// to the nearest valid boundary at or below.
    pub fn split_text_node(&mut self, node_id: usize, offset: usize) -> usize {
        let trailing = {
            let node = &mut self.doc.nodes[node_id];
            let content = match node.data {
                NodeData::Text(ref mut text) => &mut text.content,
                _ => return node_id,
            };
            let mut at = offset.min(content.len());
            while !content.is_char_boundary(at) {
                at -= 1;
            }
            content.split_off(at)
        };

        let new_id = self.doc.create_text_node(&trailing);
        self.insert_nodes_after(node_id, &[new_id]);
        new_id
    }

    /// Splice a single node into the tree at `position`, detaching it from
    /// any previous parent first.
    ///
    /// Follows range-insertion semantics: a position strictly inside a text
    /// node splits it and inserts between the halves; a position at a text
    /// node's boundary inserts before/after it; a position in an element
    /// node treats the offset as a child index.
    pub fn insert_node_at(&mut self, position: Position, node_id: usize) {
        self.insert_nodes_at(position, &[node_id]);
    }

    /// Splice `node_ids` (in order) into the tree at `position`.
    pub fn insert_nodes_at(&mut self, position: Position, node_ids: &[usize]) {
        if node_ids.is_empty() {
            return;
        }

        let anchor = &self.doc.nodes[position.node];
        match &anchor.data {
            NodeData::Text(text) => {
                let len = text.content.len();
                if position.offset == 0 {
                    self.insert_nodes_before(position.node, node_ids);
                } else if position.offset >= len {
                    self.insert_nodes_after(position.node, node_ids);
                } else {
                    let trailing = self.split_text_node(position.node, position.offset);
                    self.insert_nodes_before(trailing, node_ids);
                }
            }
            _ => {
                let children = &anchor.children;
                match children.get(position.offset).copied() {
                    Some(sibling) => self.insert_nodes_before(sibling, node_ids),
                    None => self.append_children(position.node, node_ids),
                }
            }
        }
    }
}
