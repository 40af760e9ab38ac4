//! Serialization of arena nodes back to HTML.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node paired with its arena, serializable by html5ever.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self.dom, self.id, serializer),
            TraversalScope::ChildrenOnly(_) => {
                for child in self.dom.children(self.id) {
                    write_node(self.dom, child, serializer)?;
                }
                Ok(())
            }
        }
    }
}

fn write_node<S: Serializer>(dom: &ArenaDom, id: ArenaNodeId, serializer: &mut S) -> io::Result<()> {
    let Some(node) = dom.get(id) else {
        return Ok(());
    };

    match &node.data {
        ArenaNodeData::Element { name, attrs } => {
            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|a| (&a.name, a.value.as_str())),
            )?;
            for child in dom.children(id) {
                write_node(dom, child, serializer)?;
            }
            serializer.end_elem(name.clone())
        }
        ArenaNodeData::Text(text) => serializer.write_text(text),
        ArenaNodeData::Comment(text) => serializer.write_comment(text),
        ArenaNodeData::Doctype { name } => serializer.write_doctype(name),
        ArenaNodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, serializer)?;
            }
            Ok(())
        }
    }
}

/// Serialize the children of `id` (its inner HTML).
pub fn inner_html(dom: &ArenaDom, id: ArenaNodeId) -> String {
    write_html(dom, id, TraversalScope::ChildrenOnly(None))
}

/// Serialize `id` including its own tag.
pub fn outer_html(dom: &ArenaDom, id: ArenaNodeId) -> String {
    write_html(dom, id, TraversalScope::IncludeNode)
}

fn write_html(dom: &ArenaDom, id: ArenaNodeId, traversal_scope: TraversalScope) -> String {
    let opts = SerializeOpts {
        traversal_scope,
        ..SerializeOpts::default()
    };

    let mut buf = Vec::new();
    if let Err(e) = serialize(&mut buf, &SerializableNode::new(dom, id), opts) {
        tracing::warn!(error = %e, "HTML serialization failed");
    }
    String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
