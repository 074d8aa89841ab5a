//! Shared types and provider traits for the Marq selection-menu stack.
//!
//! This crate deliberately has a minimal dependency footprint so that both
//! the document implementation ([marq-dom](https://docs.rs/marq-dom)) and
//! embedders can depend on it cheaply.

pub mod events;
pub use events::{
    DomEvent, DomEventData, EventListener, ListenerModel, MouseButtonEvent, MouseEventButton,
    MouseEventButtons,
};

pub mod shell;
pub use shell::{DummyShellProvider, ShellProvider};
