//! Document - High-level document API

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::{DomError, DomTree, ElementData, EventTarget, Namespace, NodeId};

/// HTML Document
///
/// Connected `<iframe>` elements own a nested browsing context whose
/// window is exposed as an [`EventTarget`]. The context is created when the
/// frame becomes connected and discarded when it is removed.
///
/// Elements carrying a fill-parent class take their parent's size when
/// inserted, standing in for a `width: 100%; height: 100%` style rule.
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    body_element: NodeId,
    content_windows: HashMap<NodeId, Rc<EventTarget>>,
    fill_parent_classes: HashSet<String>,
}

impl Document {
    /// Create a document with `<html>`, `<head>` and `<body>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes always satisfy the hierarchy rules.
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            body_element: body,
            content_windows: HashMap::new(),
            fill_parent_classes: HashSet::new(),
        }
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Create a detached HTML element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached element in the given namespace
    pub fn create_element_ns(&mut self, tag: &str, namespace: Namespace) -> NodeId {
        self.tree.create_element_ns(tag, namespace)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Install a style rule that sizes elements of `class` to their parent
    pub fn add_fill_parent_class(&mut self, class: &str) {
        self.fill_parent_classes.insert(class.to_string());
    }

    /// Check if a class attribute value matches a fill-parent rule
    pub fn fills_parent(&self, class_name: &str) -> bool {
        class_name
            .split_ascii_whitespace()
            .any(|c| self.fill_parent_classes.contains(c))
    }

    /// Append a child, attaching browsing contexts for frames that become connected
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.tree.append_child(parent, child)?;
        let parent_size = self.element(parent).map(|e| e.size);
        if let Some(size) = parent_size {
            let fills = self.element(child).is_some_and(|e| self.fills_parent(&e.class_name));
            if let Some(elem) = self.element_mut(child).filter(|_| fills) {
                elem.size = size;
            }
        }
        if self.tree.is_connected(child) {
            for id in self.tree.inclusive_descendants(child) {
                if self.element(id).is_some_and(ElementData::is_frame) {
                    self.content_windows.entry(id).or_default();
                }
            }
        }
        Ok(())
    }

    /// Remove a child from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.tree.remove_child(parent, child)?;
        self.discard_contexts(child);
        Ok(())
    }

    /// Remove a node from whatever parent it has. Returns false if it had none.
    pub fn detach(&mut self, node: NodeId) -> bool {
        let detached = self.tree.detach(node);
        if detached {
            self.discard_contexts(node);
        }
        detached
    }

    fn discard_contexts(&mut self, subtree: NodeId) {
        for id in self.tree.inclusive_descendants(subtree) {
            if self.content_windows.remove(&id).is_some() {
                tracing::trace!("Discarded browsing context of frame {:?}", id);
            }
        }
    }

    /// Get element by ID (first match in tree order among connected nodes)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.find_element_with_id(self.tree.root(), id)
    }

    fn find_element_with_id(&self, start: NodeId, target_id: &str) -> Option<NodeId> {
        for (node_id, node) in self.tree.children(start) {
            if let Some(elem) = node.as_element() {
                if elem.id.as_deref() == Some(target_id) {
                    return Some(node_id);
                }
            }
            // Recurse into children
            if let Some(found) = self.find_element_with_id(node_id, target_id) {
                return Some(found);
            }
        }
        None
    }

    /// Element data for a node, if it is an element
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        self.tree.get(node).and_then(|n| n.as_element())
    }

    /// Mutable element data for a node, if it is an element
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(node).and_then(|n| n.as_element_mut())
    }

    /// Check if a node is an element in the HTML namespace
    pub fn is_html_element(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.namespace == Namespace::Html)
    }

    /// Set an attribute of an element
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let elem = self.element_mut(node).ok_or(DomError::NotAnElement(node))?;
        elem.set_attribute(name, value);
        Ok(())
    }

    /// Window of the frame's nested browsing context, if the frame is connected
    pub fn content_window(&self, frame: NodeId) -> Option<Rc<EventTarget>> {
        self.content_windows.get(&frame).cloned()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Size;

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.set_attribute(outer, "id", "outer").unwrap();
        doc.set_attribute(inner, "id", "player-1").unwrap();
        doc.append_child(doc.body(), outer).unwrap();
        doc.append_child(outer, inner).unwrap();
        assert_eq!(doc.get_element_by_id("player-1"), Some(inner));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.get_element_by_id(""), None);

        doc.detach(inner);
        assert_eq!(doc.get_element_by_id("player-1"), None);
    }

    #[test]
    fn test_frame_browsing_context_lifecycle() {
        let mut doc = Document::new();
        let holder = doc.create_element("div");
        let frame = doc.create_element("iframe");

        doc.append_child(holder, frame).unwrap();
        assert!(doc.content_window(frame).is_none());

        doc.append_child(doc.body(), holder).unwrap();
        assert!(doc.content_window(frame).is_some());

        doc.remove_child(doc.body(), holder).unwrap();
        assert!(doc.content_window(frame).is_none());
    }

    #[test]
    fn test_fill_parent_element_takes_parent_size_on_insert() {
        let mut doc = Document::new();
        doc.add_fill_parent_class("size-frame");
        let player = doc.create_element("div");
        doc.element_mut(player).unwrap().size = Size::new(100.0, 100.0);

        let filler = doc.create_element("iframe");
        doc.set_attribute(filler, "class", "hidden size-frame").unwrap();
        let plain = doc.create_element("iframe");
        doc.append_child(player, filler).unwrap();
        doc.append_child(player, plain).unwrap();

        assert_eq!(doc.element(filler).unwrap().size, Size::new(100.0, 100.0));
        assert_eq!(doc.element(plain).unwrap().size, Size::default());
        assert!(!doc.fills_parent("size"));
    }

    #[test]
    fn test_svg_is_not_html_element() {
        let mut doc = Document::new();
        let svg = doc.create_element_ns("svg", Namespace::Svg);
        let text = doc.create_text("hi");
        assert!(!doc.is_html_element(svg));
        assert!(!doc.is_html_element(text));
        assert!(doc.is_html_element(doc.body()));
        assert_eq!(doc.set_attribute(text, "id", "x"), Err(DomError::NotAnElement(text)));
    }
}
