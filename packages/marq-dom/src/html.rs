use crate::selection::Position;
use crate::DocumentMutator;

/// Host HTML-parsing capability.
///
/// Kept behind a provider trait so that this crate does not depend on a
/// parser; `marq-html` supplies a real implementation. The Dummy provider
/// turns both operations into no-ops, which is the silent-degradation path
/// for hosts without markup parsing.
pub trait HtmlParserProvider {
    /// Replace `element_id`'s children with the parse of `html`.
    fn parse_inner_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        element_id: usize,
        html: &str,
    );

    /// Parse `html` and splice the resulting nodes into the tree at
    /// `position` (splitting a text node when the position falls inside
    /// one).
    fn paste_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        position: Position,
        html: &str,
    );
}

pub struct DummyHtmlParserProvider;
impl HtmlParserProvider for DummyHtmlParserProvider {
    fn parse_inner_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        element_id: usize,
        html: &str,
    ) {
        let _ = mutr;
        let _ = element_id;
        let _ = html;
    }

    fn paste_html<'m, 'doc>(
        &self,
        mutr: &'m mut DocumentMutator<'doc>,
        position: Position,
        html: &str,
    ) {
        let _ = mutr;
        let _ = position;
        let _ = html;
    }
}
