//! DOM node implementation.

use crate::element::ElementData;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a DOM node.
    pub struct NodeId;
}

/// Data specific to each node type.
#[derive(Clone, Debug)]
pub enum NodeData {
    Element(ElementData),
    Text { content: String },
}

impl NodeData {
    /// Element data, if this is an element node.
    pub fn element(&self) -> Option<&ElementData> {
        match self {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            NodeData::Element(data) => Some(data),
            _ => None,
        }
    }
}

/// A DOM node.
#[derive(Debug)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Node-specific data.
    pub data: NodeData,
    /// Parent node.
    pub parent: Option<NodeId>,
    /// Child nodes.
    pub children: SmallVec<[NodeId; 8]>,
}

impl Node {
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }
}
