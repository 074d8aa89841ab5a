use std::collections::VecDeque;

use crate::BaseDocument;
use marq_traits::DomEvent;

/// A consumer of DOM events, run before document default actions.
///
/// Handlers may mutate the document and call [`DomEvent::prevent_default`]
/// to suppress the default action (e.g. the click synthesized after a
/// mouseup).
pub trait EventHandler {
    fn handle_event(&mut self, chain: &[usize], event: &mut DomEvent, doc: &mut BaseDocument);
}

pub struct NoopEventHandler;
impl EventHandler for NoopEventHandler {
    fn handle_event(&mut self, _chain: &[usize], _event: &mut DomEvent, _doc: &mut BaseDocument) {
        // Do nothing
    }
}

impl<H: EventHandler + ?Sized> EventHandler for &mut H {
    fn handle_event(&mut self, chain: &[usize], event: &mut DomEvent, doc: &mut BaseDocument) {
        (**self).handle_event(chain, event, doc)
    }
}

/// Drives DOM events through a handler and then through document default
/// actions, processing any events the default actions synthesize (such as
/// the click following a mouseup) in order.
pub struct EventDriver<'doc, Handler: EventHandler> {
    doc: &'doc mut BaseDocument,
    handler: Handler,
    queue: VecDeque<DomEvent>,
}

impl<'doc, Handler: EventHandler> EventDriver<'doc, Handler> {
    pub fn new(doc: &'doc mut BaseDocument, handler: Handler) -> Self {
        EventDriver {
            doc,
            handler,
            queue: VecDeque::with_capacity(4),
        }
    }

    pub fn handle_dom_event(&mut self, event: DomEvent) {
        self.queue.push_back(event);
        self.process_queue();
    }

    fn process_queue(&mut self) {
        while let Some(mut event) = self.queue.pop_front() {
            self.run_handler_event(&mut event);
            if !event.default_prevented {
                self.run_default_action(&mut event);
            }
        }
    }

    fn run_handler_event(&mut self, event: &mut DomEvent) {
        let chain = if event.bubbles {
            self.doc.node_chain(event.target)
        } else {
            vec![event.target]
        };

        self.handler.handle_event(&chain, event, self.doc);
    }

    fn run_default_action(&mut self, event: &mut DomEvent) {
        self.doc
            .handle_dom_event(event, |new_evt| self.queue.push_back(new_evt));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocumentConfig, qual_name};
    use marq_traits::{DomEventData, MouseButtonEvent};

    struct RecordingHandler {
        names: Vec<&'static str>,
        prevent: bool,
    }
    impl EventHandler for RecordingHandler {
        fn handle_event(
            &mut self,
            _chain: &[usize],
            event: &mut DomEvent,
            _doc: &mut BaseDocument,
        ) {
            self.names.push(event.name());
            if self.prevent {
                event.prevent_default();
            }
        }
    }

    #[test]
    fn mouseup_synthesizes_click() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let el = doc.mutate().create_element(qual_name!("div"), vec![]);
        doc.append(0, &[el]);

        let mut handler = RecordingHandler {
            names: vec![],
            prevent: false,
        };
        let mut driver = EventDriver::new(&mut doc, &mut handler);
        driver.handle_dom_event(DomEvent::new(
            el,
            DomEventData::MouseUp(MouseButtonEvent::main(0.0, 0.0)),
        ));
        assert_eq!(handler.names, vec!["mouseup", "click"]);
    }

    #[test]
    fn prevented_mouseup_suppresses_click() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let el = doc.mutate().create_element(qual_name!("div"), vec![]);
        doc.append(0, &[el]);

        let mut handler = RecordingHandler {
            names: vec![],
            prevent: true,
        };
        let mut driver = EventDriver::new(&mut doc, &mut handler);
        driver.handle_dom_event(DomEvent::new(
            el,
            DomEventData::MouseUp(MouseButtonEvent::main(0.0, 0.0)),
        ));
        assert_eq!(handler.names, vec!["mouseup"]);
    }
}
