use std::cmp::Ordering;

use crate::BaseDocument;
use crate::selection::Position;

#[derive(Clone)]
/// A pre-order tree traverser for a [BaseDocument](crate::document::BaseDocument).
pub struct TreeTraverser<'a> {
    doc: &'a BaseDocument,
    stack: Vec<usize>,
}

impl<'a> TreeTraverser<'a> {
    /// Creates a new tree traverser for the given document which starts at the root node.
    pub fn new(doc: &'a BaseDocument) -> Self {
        Self::new_with_root(doc, 0)
    }

    /// Creates a new tree traverser for the given document which starts at the specified node.
    pub fn new_with_root(doc: &'a BaseDocument, root: usize) -> Self {
        let mut stack = Vec::with_capacity(32);
        stack.push(root);
        TreeTraverser { doc, stack }
    }
}
impl Iterator for TreeTraverser<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.doc.get_node(id)?;
        self.stack.extend(node.children.iter().rev());
        Some(id)
    }
}

#[derive(Clone)]
/// An ancestor traverser for a [BaseDocument](crate::document::BaseDocument).
pub struct AncestorTraverser<'a> {
    doc: &'a BaseDocument,
    current: usize,
}
impl<'a> AncestorTraverser<'a> {
    /// Creates a new ancestor traverser for the given document and node ID.
    pub fn new(doc: &'a BaseDocument, node_id: usize) -> Self {
        AncestorTraverser {
            doc,
            current: node_id,
        }
    }
}
impl Iterator for AncestorTraverser<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current_node = self.doc.get_node(self.current)?;
        self.current = current_node.parent?;
        Some(self.current)
    }
}

impl BaseDocument {
    /// Collect the nodes into a chain by traversing upwards
    pub fn node_chain(&self, node_id: usize) -> Vec<usize> {
        let mut chain = Vec::with_capacity(16);
        chain.push(node_id);
        chain.extend(AncestorTraverser::new(self, node_id));
        chain
    }

    /// Check if `ancestor_id` is an ancestor of `descendant_id`
    pub fn is_ancestor_of(&self, ancestor_id: usize, descendant_id: usize) -> bool {
        let mut current = descendant_id;
        while let Some(parent) = self.nodes[current].parent {
            if parent == ancestor_id {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Compare the document order of two nodes.
    /// Returns Ordering::Less if node_a comes before node_b in document order.
    /// Returns Ordering::Greater if node_a comes after node_b.
    /// Returns Ordering::Equal if they are the same node.
    pub fn compare_document_order(&self, node_a: usize, node_b: usize) -> Ordering {
        if node_a == node_b {
            return Ordering::Equal;
        }

        // Build ancestor chains from root to node (inclusive)
        let chain_a = self.ancestor_chain_from_root(node_a);
        let chain_b = self.ancestor_chain_from_root(node_b);

        // Find where the chains diverge
        let mut common_depth = 0;
        for (a, b) in chain_a.iter().zip(chain_b.iter()) {
            if a != b {
                break;
            }
            common_depth += 1;
        }

        // If one is an ancestor of the other
        if common_depth == chain_a.len() {
            return Ordering::Less; // node_a is ancestor of node_b
        }
        if common_depth == chain_b.len() {
            return Ordering::Greater; // node_b is ancestor of node_a
        }

        // Both chains start at the root, so they share at least that node
        debug_assert!(
            common_depth > 0,
            "nodes must share a common ancestor (the root)"
        );

        // Compare position among siblings at the divergence point
        let divergent_a = chain_a[common_depth];
        let divergent_b = chain_b[common_depth];
        let parent_id = chain_a[common_depth - 1];
        let parent = &self.nodes[parent_id];

        for &child_id in &parent.children {
            if child_id == divergent_a {
                return Ordering::Less;
            }
            if child_id == divergent_b {
                return Ordering::Greater;
            }
        }

        // Should not reach here if tree is well-formed
        Ordering::Equal
    }

    /// Build ancestor chain from root to node (inclusive), ordered [root, ..., node].
    fn ancestor_chain_from_root(&self, node_id: usize) -> Vec<usize> {
        let mut ancestors = Vec::with_capacity(16);
        let mut current = Some(node_id);
        while let Some(id) = current {
            ancestors.push(id);
            current = self.nodes[id].parent;
        }
        ancestors.reverse();
        ancestors
    }

    /// Collect the plain text between two positions, walking text nodes in
    /// document order and honoring byte offsets into the boundary nodes.
    ///
    /// The positions may be passed in either order; they are sorted first.
    /// Element-node boundaries contribute their whole subtree.
    pub fn text_between(&self, a: Position, b: Position) -> String {
        let (start, end) = match self.compare_document_order(a.node, b.node) {
            Ordering::Less => (a, b),
            Ordering::Greater => (b, a),
            Ordering::Equal => {
                if a.offset <= b.offset {
                    (a, b)
                } else {
                    (b, a)
                }
            }
        };

        let mut out = String::new();
        let mut started = false;
        for node_id in TreeTraverser::new(self) {
            if !started {
                if node_id != start.node {
                    continue;
                }
                started = true;
                if let Some(text) = self.nodes[node_id].text_data() {
                    let from = clamp_boundary(&text.content, start.offset);
                    if node_id == end.node {
                        let to = clamp_boundary(&text.content, end.offset).max(from);
                        out.push_str(&text.content[from..to]);
                    } else {
                        out.push_str(&text.content[from..]);
                    }
                }
                if node_id == end.node {
                    break;
                }
                continue;
            }

            if node_id == end.node {
                if let Some(text) = self.nodes[node_id].text_data() {
                    let to = clamp_boundary(&text.content, end.offset);
                    out.push_str(&text.content[..to]);
                }
                break;
            }

            if let Some(text) = self.nodes[node_id].text_data() {
                out.push_str(&text.content);
            }
        }

        out
    }
}

fn clamp_boundary(content: &str, offset: usize) -> usize {
    let mut at = offset.min(content.len());
    while !content.is_char_boundary(at) {
        at -= 1;
    }
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentConfig, qual_name};

    /// <div><p>one</p><p>two <b>three</b></p></div>
    fn sample_doc() -> (BaseDocument, Vec<usize>) {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let div = mutr.create_element(qual_name!("div"), vec![]);
        let p1 = mutr.create_element(qual_name!("p"), vec![]);
        let t1 = mutr.create_text_node("one");
        let p2 = mutr.create_element(qual_name!("p"), vec![]);
        let t2 = mutr.create_text_node("two ");
        let b = mutr.create_element(qual_name!("b"), vec![]);
        let t3 = mutr.create_text_node("three");
        mutr.append_children(0, &[div]);
        mutr.append_children(div, &[p1, p2]);
        mutr.append_children(p1, &[t1]);
        mutr.append_children(p2, &[t2, b]);
        mutr.append_children(b, &[t3]);
        drop(mutr);
        (doc, vec![div, p1, t1, p2, t2, b, t3])
    }

    #[test]
    fn document_order_of_siblings_and_ancestors() {
        let (doc, ids) = sample_doc();
        let [div, p1, t1, p2, _t2, b, t3] = ids[..] else {
            unreachable!()
        };
        assert_eq!(doc.compare_document_order(p1, p2), Ordering::Less);
        assert_eq!(doc.compare_document_order(p2, p1), Ordering::Greater);
        assert_eq!(doc.compare_document_order(div, t3), Ordering::Less);
        assert_eq!(doc.compare_document_order(t3, div), Ordering::Greater);
        assert_eq!(doc.compare_document_order(t1, b), Ordering::Less);
        assert_eq!(doc.compare_document_order(b, b), Ordering::Equal);
    }

    #[test]
    fn text_between_spans_nodes() {
        let (doc, ids) = sample_doc();
        let [_, _, t1, _, t2, _, t3] = ids[..] else {
            unreachable!()
        };
        let text = doc.text_between(Position::new(t1, 1), Position::new(t3, 3));
        assert_eq!(text, "netwo thr");
        // Reversed argument order gives the same answer
        let text = doc.text_between(Position::new(t3, 3), Position::new(t1, 1));
        assert_eq!(text, "netwo thr");
        // Within a single node
        let text = doc.text_between(Position::new(t2, 0), Position::new(t2, 3));
        assert_eq!(text, "two");
    }

    #[test]
    fn node_chain_walks_to_root() {
        let (doc, ids) = sample_doc();
        let [div, _, _, p2, _, b, t3] = ids[..] else {
            unreachable!()
        };
        assert_eq!(doc.node_chain(t3), vec![t3, b, p2, div, 0]);
    }
}
