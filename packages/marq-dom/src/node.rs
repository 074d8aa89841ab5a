use markup5ever::{LocalName, QualName};
use marq_traits::EventListener;

/// An element or text attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

pub struct Node {
    /// Our Id
    pub id: usize,
    /// Our parent's ID
    pub parent: Option<usize>,
    /// What are our children?
    pub children: Vec<usize>,

    /// Node type (Element, Text, etc) specific data
    pub data: NodeData,

    /// Event registrations against this node. The stored names follow the
    /// registration convention of the listener model active when they were
    /// bound (see `EventBinder`).
    pub listeners: Vec<EventListener>,
}

impl Node {
    pub fn new(id: usize, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            children: vec![],
            data,
            listeners: Vec::new(),
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        match self.data {
            NodeData::Element(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        match self.data {
            NodeData::Element(ref mut data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data(&self) -> Option<&TextNodeData> {
        match self.data {
            NodeData::Text(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextNodeData> {
        match self.data {
            NodeData::Text(ref mut data) => Some(data),
            _ => None,
        }
    }

    pub fn attr(&self, name: LocalName) -> Option<&str> {
        self.element_data().and_then(|el| el.attr(name))
    }
}

#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document root node
    Document,
    /// An element node
    Element(ElementData),
    /// A text node
    Text(TextNodeData),
    /// A comment node
    Comment,
}

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The elements tag name, namespace and prefix
    pub name: QualName,
    /// The elements attributes
    pub attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        ElementData { name, attrs }
    }

    pub fn attr(&self, name: LocalName) -> Option<&str> {
        let attr = self.attrs.iter().find(|attr| attr.name.local == name)?;
        Some(&attr.value)
    }
}

#[derive(Debug, Clone)]
pub struct TextNodeData {
    /// The textual content of the text node
    pub content: String,
}

impl TextNodeData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}
