//! The headless DOM at the core of Marq.
//!
//! This crate implements a small headless document ([`BaseDocument`]) which
//! is designed to be embedded in and "driven" by external code. It carries
//! exactly what a selection-anchored widget needs from a host document:
//!
//! - a slab-backed node tree with a consolidated mutation API
//!   ([`DocumentMutator`]), including range-style splicing
//!   (`insert_node_at`) and text-node splitting;
//! - the two host selection models (drag-ordered anchor/focus vs.
//!   directionless range) behind a per-call capability probe;
//! - document-order traversal and comparison;
//! - an event driver with default actions and a dual-model
//!   [`EventBinder`] for listener registration;
//! - markup serialization, and a provider hook for markup *parsing*
//!   (implemented for real by [marq-html](https://docs.rs/marq-html)).
//!
//! There is deliberately no style, layout or paint here: geometry, when a
//! widget needs it, comes from the host via
//! [`ShellProvider`](marq_traits::ShellProvider).

/// The document implementation.
///
/// This is the primary entry point for this crate.
mod document;

/// The nodes themselves, and their data.
pub mod node;

mod config;
mod events;
mod mutator;
/// Host selection state and the two selection models.
pub mod selection;
/// Markup serialization.
pub mod serialize;
mod traversal;

mod html;
pub mod util;

pub use config::DocumentConfig;
pub use document::BaseDocument;
pub use events::{EventBinder, EventDriver, EventHandler, NoopEventHandler};
pub use html::{DummyHtmlParserProvider, HtmlParserProvider};
pub use markup5ever::{
    LocalName, Namespace, Prefix, QualName, local_name, namespace_prefix, namespace_url, ns,
};
pub use mutator::{AppendTextErr, DocumentMutator};
pub use node::{Attribute, ElementData, Node, NodeData, TextNodeData};
pub use selection::{
    Position, SelectionEndpoint, SelectionHandle, SelectionSupport, TextRange, TextSelection,
};
pub use traversal::{AncestorTraverser, TreeTraverser};
