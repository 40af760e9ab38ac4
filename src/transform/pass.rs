//! Tree traversal utilities for the transformation passes.

use crate::dom::{ArenaDom, ArenaNodeId};

/// Walk the tree below `root` top-down, calling `visitor` at each node.
///
/// The visitor may replace the node it is given. It returns the node whose
/// children should be walked next: the node itself, or the element that
/// received its children. Child ids are collected before descending, so a
/// child replacing itself never derails the walk over its siblings.
pub fn walk_pre_order<F>(dom: &mut ArenaDom, root: ArenaNodeId, mut visitor: F)
where
    F: FnMut(&mut ArenaDom, ArenaNodeId) -> ArenaNodeId,
{
    let children: Vec<_> = dom.children(root).collect();
    for child in children {
        walk_node(dom, child, &mut visitor);
    }
}

fn walk_node<F>(dom: &mut ArenaDom, id: ArenaNodeId, visitor: &mut F)
where
    F: FnMut(&mut ArenaDom, ArenaNodeId) -> ArenaNodeId,
{
    let next = visitor(dom, id);
    let children: Vec<_> = dom.children(next).collect();
    for child in children {
        walk_node(dom, child, visitor);
    }
}

/// Elements below `root` matching one of `tags`, in document order.
pub fn collect_tags(dom: &ArenaDom, root: ArenaNodeId, tags: &[&str]) -> Vec<ArenaNodeId> {
    dom.descendants(root)
        .into_iter()
        .filter(|&id| dom.tag(id).is_some_and(|tag| tags.contains(&tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_order_and_replacement() {
        // root > [a > [b], c]
        let mut dom = ArenaDom::new();
        let root = dom.create_html_element("div");
        let a = dom.create_html_element("a");
        let b = dom.create_html_element("b");
        let c = dom.create_html_element("c");
        dom.append(root, a);
        dom.append(a, b);
        dom.append(root, c);

        let mut seen = Vec::new();
        walk_pre_order(&mut dom, root, |dom, id| {
            seen.push(dom.tag(id).unwrap_or("#text").to_owned());
            if dom.is_tag(id, "a") {
                // Swap `a` for `x`, handing over its children.
                let x = dom.create_html_element("x");
                dom.move_children(id, x);
                dom.replace(id, x);
                return x;
            }
            id
        });

        assert_eq!(seen, ["a", "b", "c"]);
        let tags: Vec<_> = dom.children(root).filter_map(|id| dom.tag(id)).collect();
        assert_eq!(tags, ["x", "c"]);
    }

    #[test]
    fn test_collect_tags() {
        let mut dom = ArenaDom::new();
        let root = dom.create_html_element("div");
        let ul = dom.create_html_element("ul");
        let ol = dom.create_html_element("ol");
        let p = dom.create_html_element("p");
        dom.append(root, ul);
        dom.append(ul, ol);
        dom.append(root, p);

        assert_eq!(collect_tags(&dom, root, &["ul", "ol"]), [ul, ol]);
        assert!(collect_tags(&dom, root, &["table"]).is_empty());
    }
}
