//! HTML parsing for Marq documents.
//!
//! Provides a html5ever [`TreeSink`](html5ever::tree_builder::TreeSink)
//! over [`DocumentMutator`](marq_dom::DocumentMutator) for parsing whole
//! documents, and the real [`HtmlParserProvider`](marq_dom::HtmlParserProvider)
//! implementation used for inner-HTML replacement and paste-at-position
//! markup insertion.

mod html_sink;
mod provider;

pub use html_sink::DocumentHtmlParser;
pub use provider::HtmlParser;
