//! Rich-text compilation: a bounded HTML subset in, the abstract document
//! model out.
//!
//! The pipeline is split the way the template parsers are structured in the
//! rest of the workspace: a dumb event driver ([`parser`]) builds a small
//! node tree ([`dom`]), and the compiler ([`compiler`]) walks it with an
//! immutable resolved style threaded through the recursion. Malformed input
//! degrades; it never fails the caller.

pub mod compiler;
pub mod dom;
pub mod parser;
pub mod sanitize;

pub use compiler::compile;
pub use dom::{HtmlElement, HtmlNode};
pub use parser::{HtmlParseError, parse_html};
pub use sanitize::sanitize_html;
