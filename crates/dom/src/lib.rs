//! Minimal DOM surface for the page utility crates.
//!
//! Provides the tree, element, and window pieces the utilities operate on:
//! element creation and reparenting, id lookup, offset computation, inline
//! style with a supported-property probe surface, and the window's
//! animation-frame registry.

pub mod document;
pub mod element;
pub mod node;
pub mod style;
pub mod tree;
pub mod window;

pub use document::{Document, ElementRef};
pub use element::{ElementData, LayoutMetrics};
pub use node::{Node, NodeData, NodeId};
pub use style::{StyleDeclaration, StyleProfile};
pub use tree::DomTree;
pub use window::{FrameCallback, Window};
