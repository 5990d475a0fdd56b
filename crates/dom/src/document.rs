//! DOM document implementation.

use crate::element::ElementData;
use crate::node::NodeId;
use crate::style::StyleProfile;
use crate::tree::DomTree;
use common::Point;
use std::sync::Arc;
use url::Url;

/// Reference to an element: either an `id` attribute value or a node the
/// caller already holds. Mirrors the two call shapes DOM helpers accept.
#[derive(Clone, Debug)]
pub enum ElementRef {
    Id(String),
    Node(NodeId),
}

impl ElementRef {
    pub fn is_id(&self) -> bool {
        matches!(self, ElementRef::Id(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, ElementRef::Node(_))
    }
}

impl From<&str> for ElementRef {
    fn from(id: &str) -> Self {
        ElementRef::Id(id.to_string())
    }
}

impl From<NodeId> for ElementRef {
    fn from(node: NodeId) -> Self {
        ElementRef::Node(node)
    }
}

/// DOM document.
pub struct Document {
    /// The DOM tree.
    pub tree: DomTree,
    /// Document URL.
    pub url: Url,
    /// Document element (`<html>`).
    pub document_element: Option<NodeId>,
    /// Head element.
    pub head: Option<NodeId>,
    /// Body element.
    pub body: Option<NodeId>,
    /// Supported-property profile of the hosting engine.
    style_profile: Arc<StyleProfile>,
}

impl Document {
    /// Create a document with the html/head/body skeleton in place.
    pub fn new(url: Url) -> Self {
        Self::with_style_profile(url, StyleProfile::standard())
    }

    /// Create a document hosted by an engine with the given style profile.
    pub fn with_style_profile(url: Url, profile: StyleProfile) -> Self {
        let profile = Arc::new(profile);
        let mut tree = DomTree::new();

        let html = tree.create_element(ElementData::new("html", profile.clone()));
        let head = tree.create_element(ElementData::new("head", profile.clone()));
        let body = tree.create_element(ElementData::new("body", profile.clone()));
        tree.set_root(html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url,
            document_element: Some(html),
            head: Some(head),
            body: Some(body),
            style_profile: profile,
        }
    }

    /// Create a detached element in this document.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        let data = ElementData::new(tag_name, self.style_profile.clone());
        self.tree.create_element(data)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_element_by_id(id)
    }

    /// Resolve an element reference: an id is looked up in the tree, a node
    /// is checked for existence. A missing element is `None`, never an error.
    pub fn resolve(&self, element: &ElementRef) -> Option<NodeId> {
        match element {
            ElementRef::Id(id) => self.get_element_by_id(id),
            ElementRef::Node(node) => self.tree.get(*node).map(|n| n.id),
        }
    }

    /// The element scripts get appended to: head when present, body otherwise.
    pub fn script_parent(&self) -> Option<NodeId> {
        self.head.or(self.body)
    }

    /// Offset of an element's top-left corner, accumulated up the offset
    /// chain until `relative_to` (default: body) or the body is reached.
    pub fn offset_of(&self, target: NodeId, relative_to: Option<NodeId>) -> Option<Point> {
        let rel = relative_to.or(self.body);

        let node = self.tree.get(target)?;
        let element = node.data.element()?;
        let mut offset = Point::new(element.layout.offset_left, element.layout.offset_top);

        let mut parent = node.parent;
        while let Some(current) = parent {
            if Some(current) == rel || Some(current) == self.body {
                break;
            }
            let parent_node = self.tree.get(current)?;
            if let Some(parent_element) = parent_node.data.element() {
                offset = offset
                    + Point::new(
                        parent_element.layout.offset_left,
                        parent_element.layout.offset_top,
                    );
            }
            parent = parent_node.parent;
        }

        Some(offset)
    }
}
