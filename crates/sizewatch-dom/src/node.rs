//! DOM Node - Compact representation
//!
//! Nodes link to each other through `NodeId` indices instead of pointers,
//! so the whole tree lives in a single arena.

use std::collections::HashMap;

use crate::NodeId;

/// Layout size of an element box in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str, namespace: Namespace) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag, namespace)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this node may hold children
    #[inline]
    pub fn can_have_children(&self) -> bool {
        !matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

/// Element data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased tag name
    pub tag: String,
    pub namespace: Namespace,
    /// Value of the `id` attribute, kept out of `attrs` for fast lookup
    pub id: Option<String>,
    /// Value of the `class` attribute
    pub class_name: String,
    attrs: HashMap<String, String>,
    /// Current layout box size
    pub size: Size,
}

impl ElementData {
    pub fn new(tag: &str, namespace: Namespace) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            namespace,
            id: None,
            class_name: String::new(),
            attrs: HashMap::new(),
            size: Size::default(),
        }
    }

    /// Get an attribute value
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "class" => Some(self.class_name.as_str()).filter(|c| !c.is_empty()),
            _ => self.attrs.get(name).map(String::as_str),
        }
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.class_name = value.to_string(),
            _ => {
                self.attrs.insert(name.to_string(), value.to_string());
            }
        }
    }

    /// Check the class list for a class name
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_ascii_whitespace().any(|c| c == class)
    }

    /// Is this an `<iframe>` in the HTML namespace
    pub fn is_frame(&self) -> bool {
        self.namespace == Namespace::Html && self.tag == "iframe"
    }
}
