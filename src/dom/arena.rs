//! Arena-backed HTML tree.
//!
//! Every node lives in one vector and links to its relatives by index. A
//! [`ArenaNodeId`] therefore stays valid for the lifetime of the tree, even
//! after the node has been detached or the structure around it rewritten,
//! which lets the transformation passes gather their targets up front and
//! mutate afterwards.
//!
//! Detached nodes are never freed; a conversion builds one small tree and
//! drops it whole.

use html5ever::{LocalName, QualName, ns};

use super::style::InlineStyle;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    Element { name: QualName, attrs: Vec<Attribute> },
    Text(String),
    Comment(String),
    Doctype { name: String },
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        }
    }
}

/// A node and its links.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree with a document root.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
}

impl ArenaDom {
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    /// Create an HTML-namespace element with no attributes.
    pub fn create_html_element(&mut self, tag: &str) -> ArenaNodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        self.create_element(name, Vec::new())
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text.into())))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text)))
    }

    pub fn create_doctype(&mut self, name: String) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype { name }))
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current position first.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        self.detach(child);

        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert `new_node` immediately before `sibling`, detaching it first.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        if sibling == new_node {
            return;
        }
        self.detach(new_node);

        let Some((parent, prev)) = self.get(sibling).map(|n| (n.parent, n.prev_sibling)) else {
            return;
        };

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if prev.is_some() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_node;
            }
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Append text to the last child when it is a text node, otherwise
    /// append a new text node.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(last_child)
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// Insert text before `sibling`, merging into a preceding text node.
    pub fn insert_text_before(&mut self, sibling: ArenaNodeId, text: &str) {
        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(prev)
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.insert_before(sibling, text_node);
    }

    /// Unlink a node from its parent and siblings. Its own subtree is kept.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };
        if parent.is_none() {
            return;
        }

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = next;
        }

        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(par) = self.get_mut(parent) {
            par.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Put `replacement` where `old` is and detach `old`.
    pub fn replace(&mut self, old: ArenaNodeId, replacement: ArenaNodeId) {
        self.insert_before(old, replacement);
        self.detach(old);
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn move_children(&mut self, from: ArenaNodeId, to: ArenaNodeId) {
        let children: Vec<_> = self.children(from).collect();
        for child in children {
            self.append(to, child);
        }
    }

    /// Deep-copy `id` and its subtree out of `other` into this arena. The
    /// copy is returned detached.
    pub fn import(&mut self, other: &ArenaDom, id: ArenaNodeId) -> ArenaNodeId {
        let Some(node) = other.get(id) else {
            return ArenaNodeId::NONE;
        };
        let copy = self.alloc(ArenaNode::new(node.data.clone()));
        for child in other.children(id) {
            let child_copy = self.import(other, child);
            self.append(copy, child_copy);
        }
        copy
    }

    pub fn parent(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_some())
    }

    pub fn first_child(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).map(|n| n.first_child).filter(|c| c.is_some())
    }

    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Ancestors of a node, nearest first.
    pub fn ancestors(&self, id: ArenaNodeId) -> impl Iterator<Item = ArenaNodeId> + '_ {
        std::iter::successors(self.parent(id), |&n| self.parent(n))
    }

    /// All nodes below `root` in document order, `root` excluded.
    pub fn descendants(&self, root: ArenaNodeId) -> Vec<ArenaNodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<_> = self.children(root).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let first = stack.len();
            stack.extend(self.children(id));
            stack[first..].reverse();
        }
        out
    }

    /// Descendant elements of `root` with the given tag, in document order.
    pub fn descendants_by_tag(&self, root: ArenaNodeId, tag: &str) -> Vec<ArenaNodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.is_tag(id, tag))
            .collect()
    }

    /// Find the first node matching a predicate (DFS from the document).
    pub fn find<F>(&self, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if predicate(node) {
                    return Some(id);
                }
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find(|node| match &node.data {
            ArenaNodeData::Element { name, .. } => name.local.as_ref() == tag,
            _ => false,
        })
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        Some(id)
    }
}

/// Element, attribute and text accessors.
impl ArenaDom {
    /// Local name of an element.
    pub fn tag(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(name.local.as_ref()),
            _ => None,
        })
    }

    pub fn is_tag(&self, id: ArenaNodeId, tag: &str) -> bool {
        self.tag(id) == Some(tag)
    }

    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Element { .. }))
    }

    pub fn attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set_attr(&mut self, id: ArenaNodeId, attr_name: &str, value: impl Into<String>) {
        if let Some(ArenaNode {
            data: ArenaNodeData::Element { attrs, .. },
            ..
        }) = self.get_mut(id)
        {
            let value = value.into();
            match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
                Some(existing) => existing.value = value,
                None => attrs.push(Attribute::new(attr_name, value)),
            }
        }
    }

    pub fn remove_attr(&mut self, id: ArenaNodeId, attr_name: &str) {
        if let Some(ArenaNode {
            data: ArenaNodeData::Element { attrs, .. },
            ..
        }) = self.get_mut(id)
        {
            attrs.retain(|a| a.name.local.as_ref() != attr_name);
        }
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self, id: ArenaNodeId) -> impl Iterator<Item = &str> {
        self.attr(id, "class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, id: ArenaNodeId, class: &str) -> bool {
        self.classes(id).any(|c| c == class)
    }

    /// Contents of a text node.
    pub fn text(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn text_mut(&mut self, id: ArenaNodeId) -> Option<&mut String> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            ArenaNodeData::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn is_text(&self, id: ArenaNodeId) -> bool {
        self.text(id).is_some()
    }

    /// Concatenated text of a node and all its descendants.
    pub fn text_content(&self, id: ArenaNodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_owned();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Parsed `style` attribute.
    pub fn style(&self, id: ArenaNodeId) -> InlineStyle {
        self.attr(id, "style")
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    /// Replace the `style` attribute wholesale.
    pub fn set_style(&mut self, id: ArenaNodeId, style: &InlineStyle) {
        self.set_attr(id, "style", style.to_string());
    }

    /// Edit individual declarations of the `style` attribute.
    pub fn update_style(&mut self, id: ArenaNodeId, edit: impl FnOnce(&mut InlineStyle)) {
        let mut style = self.style(id);
        edit(&mut style);
        self.set_style(id, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(dom: &mut ArenaDom, tag: &str) -> ArenaNodeId {
        dom.create_html_element(tag)
    }

    fn child_tags(dom: &ArenaDom, parent: ArenaNodeId) -> Vec<String> {
        dom.children(parent)
            .map(|c| dom.tag(c).unwrap_or("#text").to_owned())
            .collect()
    }

    #[test]
    fn test_create_and_append() {
        let mut dom = ArenaDom::new();
        let div = element(&mut dom, "div");
        let p = element(&mut dom, "p");
        dom.append(dom.document(), div);
        dom.append(div, p);
        dom.append_text(p, "Hello");
        dom.append_text(p, ", world");

        assert_eq!(dom.len(), 4);
        assert_eq!(dom.parent(p), Some(div));
        assert_eq!(dom.text_content(div), "Hello, world");
        assert_eq!(dom.children(p).count(), 1);
    }

    #[test]
    fn test_insert_before_and_detach() {
        let mut dom = ArenaDom::new();
        let ul = element(&mut dom, "ul");
        let a = element(&mut dom, "a");
        let b = element(&mut dom, "b");
        let i = element(&mut dom, "i");
        dom.append(ul, a);
        dom.append(ul, b);
        dom.insert_before(b, i);
        assert_eq!(child_tags(&dom, ul), ["a", "i", "b"]);

        dom.detach(a);
        assert_eq!(child_tags(&dom, ul), ["i", "b"]);
        assert_eq!(dom.parent(a), None);

        dom.detach(b);
        assert_eq!(child_tags(&dom, ul), ["i"]);
        assert_eq!(dom.get(ul).unwrap().last_child, i);
    }

    #[test]
    fn test_insert_text_before_merges() {
        let mut dom = ArenaDom::new();
        let body = element(&mut dom, "body");
        let table = element(&mut dom, "table");
        dom.append(body, table);

        dom.insert_text_before(table, "one ");
        dom.insert_text_before(table, "two");
        assert_eq!(child_tags(&dom, body), ["#text", "table"]);
        assert_eq!(dom.text_content(body), "one two");
    }

    #[test]
    fn test_append_moves_attached_node() {
        let mut dom = ArenaDom::new();
        let first = element(&mut dom, "div");
        let second = element(&mut dom, "div");
        let span = element(&mut dom, "span");
        dom.append(first, span);
        dom.append(second, span);

        assert_eq!(dom.children(first).count(), 0);
        assert_eq!(dom.parent(span), Some(second));
    }

    #[test]
    fn test_replace_and_move_children() {
        let mut dom = ArenaDom::new();
        let body = element(&mut dom, "body");
        let h1 = element(&mut dom, "h1");
        dom.append(body, h1);
        dom.append_text(h1, "Title");
        let em = element(&mut dom, "em");
        dom.append(h1, em);

        let td = element(&mut dom, "td");
        dom.move_children(h1, td);
        dom.replace(h1, td);

        assert_eq!(child_tags(&dom, body), ["td"]);
        assert_eq!(child_tags(&dom, td), ["#text", "em"]);
        assert_eq!(dom.children(h1).count(), 0);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut dom = ArenaDom::new();
        let root = element(&mut dom, "div");
        let p1 = element(&mut dom, "p");
        let strong = element(&mut dom, "strong");
        let p2 = element(&mut dom, "p");
        dom.append(root, p1);
        dom.append(p1, strong);
        dom.append(root, p2);

        assert_eq!(dom.descendants(root), vec![p1, strong, p2]);
        assert_eq!(dom.descendants_by_tag(root, "p"), vec![p1, p2]);
        assert_eq!(dom.ancestors(strong).collect::<Vec<_>>(), vec![p1, root]);
    }

    #[test]
    fn test_attributes_and_classes() {
        let mut dom = ArenaDom::new();
        let span = element(&mut dom, "span");
        dom.set_attr(span, "class", "hljs-keyword hljs-title");
        assert!(dom.has_class(span, "hljs-title"));
        assert!(!dom.has_class(span, "hljs"));

        dom.set_attr(span, "class", "other");
        assert_eq!(dom.classes(span).collect::<Vec<_>>(), ["other"]);

        dom.remove_attr(span, "class");
        assert_eq!(dom.attr(span, "class"), None);
    }

    #[test]
    fn test_update_style_replaces_declarations() {
        let mut dom = ArenaDom::new();
        let ul = element(&mut dom, "ul");
        dom.set_attr(ul, "style", "padding-left: 2em; margin: 0 0 1em 0;");
        dom.update_style(ul, |style| {
            style.set("margin", "0");
            style.set("padding-left", "40px");
        });
        assert_eq!(dom.attr(ul, "style"), Some("padding-left: 40px; margin: 0;"));
    }

    #[test]
    fn test_import_deep_copies() {
        let mut scratch = ArenaDom::new();
        let span = scratch.create_html_element("span");
        scratch.set_attr(span, "class", "hljs-string");
        scratch.append_text(span, "\"hi\"");

        let mut dom = ArenaDom::new();
        let copy = dom.import(&scratch, span);
        assert_eq!(dom.tag(copy), Some("span"));
        assert_eq!(dom.attr(copy, "class"), Some("hljs-string"));
        assert_eq!(dom.text_content(copy), "\"hi\"");
        assert_eq!(dom.parent(copy), None);
    }
}
