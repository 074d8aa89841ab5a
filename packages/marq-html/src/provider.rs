use marq_dom::local_name;
use marq_dom::node::NodeData;
use marq_dom::selection::Position;
use marq_dom::{BaseDocument, DocumentConfig, DocumentMutator, HtmlParserProvider, TreeTraverser};

use crate::DocumentHtmlParser;

/// The real [`HtmlParserProvider`]: parses markup fragments with html5ever
/// and splices the results into a target document.
///
/// Fragments are parsed into a scratch document and then transferred node
/// by node, so every spliced node gets a fresh id in the target document.
/// This is what makes the serialized marker-insertion path invalidate held
/// node handles, exactly like a host that round-trips markup through
/// serialization.
pub struct HtmlParser;

impl HtmlParserProvider for HtmlParser {
    fn parse_inner_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        element_id: usize,
        html: &str,
    ) {
        let Some(node) = mutr.doc.get_node(element_id) else {
            return;
        };
        let old_children = node.children.clone();
        for child_id in old_children {
            mutr.remove_node(child_id);
            mutr.remove_node_if_unparented(child_id);
        }

        let new_ids = parse_fragment_into(mutr, html);
        mutr.append_children(element_id, &new_ids);
    }

    fn paste_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        position: Position,
        html: &str,
    ) {
        let new_ids = parse_fragment_into(mutr, html);
        mutr.insert_nodes_at(position, &new_ids);
    }
}

/// Parse `html` as fragment content and create matching nodes in the target
/// document, returning the top-level node ids in order.
fn parse_fragment_into(mutr: &mut DocumentMutator<'_>, html: &str) -> Vec<usize> {
    let mut scratch = BaseDocument::new(DocumentConfig::default());
    DocumentHtmlParser::parse_into_doc(&mut scratch, html);

    let Some(body_id) = find_body(&scratch) else {
        return Vec::new();
    };
    scratch.get_node(body_id).map_or_else(Vec::new, |body| {
        body.children
            .iter()
            .map(|child_id| transfer(&scratch, *child_id, mutr))
            .collect()
    })
}

fn find_body(doc: &BaseDocument) -> Option<usize> {
    TreeTraverser::new(doc).find(|node_id| {
        doc.get_node(*node_id).is_some_and(|node| {
            node.element_data()
                .is_some_and(|el| el.name.local == local_name!("body"))
        })
    })
}

/// Recursively recreate a scratch-document subtree in the target document.
fn transfer(src: &BaseDocument, src_id: usize, mutr: &mut DocumentMutator<'_>) -> usize {
    let node = &src.tree()[src_id];
    let new_id = match &node.data {
        NodeData::Element(el) => mutr.create_element(el.name.clone(), el.attrs.clone()),
        NodeData::Text(text) => mutr.create_text_node(&text.content),
        NodeData::Comment | NodeData::Document => mutr.create_comment_node(),
    };

    let new_children: Vec<usize> = node
        .children
        .iter()
        .map(|child_id| transfer(src, *child_id, mutr))
        .collect();
    mutr.append_children(new_id, &new_children);
    new_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use marq_dom::qual_name;

    #[test]
    fn parse_inner_html_replaces_children() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let span = {
            let mut mutr = doc.mutate();
            let span = mutr.create_element(qual_name!("span"), vec![]);
            let old_text = mutr.create_text_node("old");
            mutr.append_children(0, &[span]);
            mutr.append_children(span, &[old_text]);
            span
        };

        let mut mutr = doc.mutate();
        HtmlParser.parse_inner_html(&mut mutr, span, "Click <b>me</b>");
        drop(mutr);

        assert_eq!(
            marq_dom::serialize::inner_html(&doc, span),
            "Click <b>me</b>"
        );
    }

    #[test]
    fn paste_html_splits_text_at_position() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let (p, text) = {
            let mut mutr = doc.mutate();
            let p = mutr.create_element(qual_name!("p"), vec![]);
            let text = mutr.create_text_node("hello world");
            mutr.append_children(0, &[p]);
            mutr.append_children(p, &[text]);
            (p, text)
        };

        let mut mutr = doc.mutate();
        HtmlParser.paste_html(&mut mutr, Position::new(text, 5), "<em>!</em>");
        drop(mutr);

        assert_eq!(
            marq_dom::serialize::outer_html(&doc, p),
            "<p>hello<em>!</em> world</p>"
        );
    }

    #[test]
    fn pasted_nodes_get_fresh_ids_and_reindex() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let (p, text, stale) = {
            let mut mutr = doc.mutate();
            let p = mutr.create_element(qual_name!("p"), vec![]);
            let text = mutr.create_text_node("x");
            let stale = mutr.create_element(
                qual_name!("span"),
                vec![marq_dom::Attribute {
                    name: qual_name!("id"),
                    value: "menu".to_string(),
                }],
            );
            mutr.append_children(0, &[p]);
            mutr.append_children(p, &[text]);
            (p, text, stale)
        };
        assert_eq!(doc.get_element_by_id("menu"), Some(stale));

        let mut mutr = doc.mutate();
        HtmlParser.paste_html(
            &mut mutr,
            Position::new(text, 1),
            "<span id=\"menu\"></span>",
        );
        drop(mutr);

        let fresh = doc.get_element_by_id("menu").expect("menu was re-indexed");
        assert_ne!(fresh, stale);
        assert_eq!(doc.get_node(fresh).unwrap().parent, Some(p));
    }
}
