//! DOM Tree (arena-based allocation)

use crate::{DomError, Namespace, Node, NodeId};

/// Arena-based DOM tree
///
/// Index 0 always holds the document node. Nodes are never freed; a
/// detached node keeps its slot and can be re-inserted.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node ID
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_ns(tag, Namespace::Html)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> NodeId {
        self.push(Node::element(tag, namespace))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_valid)
    }

    /// Check if `ancestor` is `id` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = id;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(node) => node.parent,
                None => return false,
            };
        }
        false
    }

    /// Check if a node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.get(parent).ok_or(DomError::NodeNotFound(parent))?;
        if self.get(child).is_none() {
            return Err(DomError::NodeNotFound(child));
        }
        if !parent_node.can_have_children()
            || child == NodeId::ROOT
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NodeNotFound(child));
        }
        self.detach(child);
        Ok(())
    }

    /// Unlink a node from its parent. Returns false if it had none.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return false;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        true
    }

    /// Iterate over the children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Collect a node and all of its descendants in tree order
    pub fn inclusive_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.get(current).is_none() {
                continue;
            }
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).map(|(k, _)| k).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Child iterator
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_ids(tree: &DomTree, id: NodeId) -> Vec<NodeId> {
        tree.children(id).map(|(c, _)| c).collect()
    }

    #[test]
    fn test_append_and_detach() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_element("span");
        let b = tree.create_element("span");
        let c = tree.create_element("span");

        tree.append_child(tree.root(), div).unwrap();
        for child in [a, b, c] {
            tree.append_child(div, child).unwrap();
        }
        assert_eq!(child_ids(&tree, div), vec![a, b, c]);

        assert!(tree.detach(b));
        assert_eq!(child_ids(&tree, div), vec![a, c]);
        assert!(!tree.detach(b));

        tree.remove_child(div, c).unwrap();
        assert_eq!(child_ids(&tree, div), vec![a]);
        assert_eq!(tree.remove_child(div, c), Err(DomError::NodeNotFound(c)));
    }

    #[test]
    fn test_append_moves_node() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let leaf = tree.create_element("p");
        tree.append_child(first, leaf).unwrap();
        tree.append_child(second, leaf).unwrap();

        assert!(child_ids(&tree, first).is_empty());
        assert_eq!(tree.parent(leaf), Some(second));
    }

    #[test]
    fn test_hierarchy_errors() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        let text = tree.create_text("hello");
        tree.append_child(outer, inner).unwrap();

        assert!(matches!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            tree.append_child(text, inner),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert_eq!(
            tree.append_child(outer, NodeId(99)),
            Err(DomError::NodeNotFound(NodeId(99)))
        );
    }

    #[test]
    fn test_connected() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert!(!tree.is_connected(div));
        tree.append_child(tree.root(), div).unwrap();
        assert!(tree.is_connected(div));
        assert_eq!(tree.inclusive_descendants(tree.root()), vec![NodeId::ROOT, div]);
    }
}
