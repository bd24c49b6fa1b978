//! The layout markup compiler: an ordered list of positioned, typed, styled
//! element descriptors in, renderable HTML and CSS text out.
//!
//! Dispatch is a closed [`element::ElementKind`] resolved through a renderer
//! table; unrecognized types land on the generic container arm instead of
//! failing. All user-supplied content goes through the escaping layer in
//! [`renderers`], and page shells are produced by registered templates in
//! [`page`] rather than ad-hoc concatenation.

pub mod compiler;
pub mod css;
pub mod element;
pub mod page;
pub mod renderers;

pub use compiler::{CompileOptions, CompiledLayout, compile};
pub use element::{Element, ElementId, ElementKind, FooterColumn, FormField, LinkItem};
pub use page::{linked_page, standalone_page};
