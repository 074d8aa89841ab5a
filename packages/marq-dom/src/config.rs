use std::sync::Arc;

use crate::HtmlParserProvider;
use crate::selection::SelectionSupport;
use marq_traits::{ListenerModel, ShellProvider};

/// Options used when constructing a [`BaseDocument`](crate::BaseDocument)
#[derive(Default)]
pub struct DocumentConfig {
    /// Which selection model the host exposes. Defaults to
    /// [`SelectionSupport::Ranged`].
    pub selection_support: Option<SelectionSupport>,
    /// Which event-registration model the host exposes. Defaults to
    /// [`ListenerModel::Modern`].
    pub listener_model: Option<ListenerModel>,
    /// Shell provider for redraw requests, timeouts and measurement
    pub shell_provider: Option<Arc<dyn ShellProvider>>,
    /// HTML parser provider. Used to parse markup for setInnerHTML-style
    /// content replacement and paste-at-position insertion
    pub html_parser_provider: Option<Arc<dyn HtmlParserProvider>>,
}
