//! HTML tree used by the transformation engine.
//!
//! html5ever parses into an index-addressed [`ArenaDom`]; the passes edit it
//! in place and [`inner_html`] writes the result back out.

mod arena;
mod serialize;
mod style;
mod tree_sink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter};
pub use serialize::{SerializableNode, inner_html, outer_html};
pub use style::InlineStyle;
pub use tree_sink::{ArenaSink, NodeHandle};

/// Parse an HTML document or fragment into an arena.
///
/// Fragments are wrapped in the implied `html`/`head`/`body` elements the
/// way a browser would; use [`body`] to get at their content.
pub fn parse_html(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// The `body` element of a parsed document.
pub fn body(dom: &ArenaDom) -> Option<ArenaNodeId> {
    dom.find_by_tag("body")
}
