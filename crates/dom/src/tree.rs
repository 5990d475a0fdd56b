//! DOM tree storage and manipulation.

use crate::element::ElementData;
use crate::node::{Node, NodeData, NodeId};
use slotmap::SlotMap;
use smallvec::SmallVec;

/// The DOM tree.
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: SlotMap<NodeId, Node>,
    root: Option<NodeId>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn get_element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id).and_then(|node| node.data.element())
    }

    pub fn get_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id).and_then(|node| node.data.element_mut())
    }

    /// Create a detached element node.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        self.nodes.insert_with_key(|id| Node {
            id,
            data: NodeData::Element(data),
            parent: None,
            children: SmallVec::new(),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, content: String) -> NodeId {
        self.nodes.insert_with_key(|id| Node {
            id,
            data: NodeData::Text { content },
            parent: None,
            children: SmallVec::new(),
        })
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove_from_parent(child);

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Detach a node from its parent, leaving it (and its subtree) alive.
    pub fn remove_from_parent(&mut self, node: NodeId) {
        let parent = match self.nodes.get(node) {
            Some(n) => n.parent,
            None => return,
        };

        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != node);
            }
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// Detach a node and drop its entire subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.remove_from_parent(node);

        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.remove(id) {
                stack.extend(n.children);
            }
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
            .into_iter()
    }

    /// Depth-first search for the first element whose `id` attribute matches.
    pub fn find_element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root?;
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            let node = self.nodes.get(current)?;
            if let Some(element) = node.data.element() {
                if element.id() == Some(id) {
                    return Some(current);
                }
            }
            // Push in reverse so document order is visited first.
            stack.extend(node.children.iter().rev().copied());
        }

        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
