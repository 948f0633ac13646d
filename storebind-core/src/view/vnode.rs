//! Virtual Nodes
//!
//! The content a render callback hands back to the host. The adapter does
//! not diff or patch these; it only builds them and passes them on.

use serde::{Deserialize, Serialize};

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VNode {
    /// An element with a tag name and child nodes.
    Element { tag: String, children: Vec<VNode> },

    /// A text leaf.
    Text { text: String },
}

impl VNode {
    /// Create an element node.
    pub fn element(tag: impl Into<String>, children: impl Into<Children>) -> Self {
        Self::Element {
            tag: tag.into(),
            children: children.into().into_vec(),
        }
    }

    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Get the tag name, if this is an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text { .. } => None,
        }
    }

    /// Get the child nodes. Text nodes have none.
    pub fn children(&self) -> &[VNode] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text { .. } => &[],
        }
    }

    /// Concatenate all text in this subtree, depth first.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }

    /// Serialize this subtree to JSON for the host.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The children produced by a render callback: one node or many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Children(Vec<VNode>);

impl Children {
    /// No children.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of child nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no child nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying nodes.
    pub fn into_vec(self) -> Vec<VNode> {
        self.0
    }
}

impl From<VNode> for Children {
    fn from(node: VNode) -> Self {
        Self(vec![node])
    }
}

impl From<Vec<VNode>> for Children {
    fn from(nodes: Vec<VNode>) -> Self {
        Self(nodes)
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        VNode::text(text).into()
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        VNode::text(text).into()
    }
}

impl FromIterator<VNode> for Children {
    fn from_iter<I: IntoIterator<Item = VNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Children {
    type Item = VNode;
    type IntoIter = std::vec::IntoIter<VNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_node_and_sequences_become_children() {
        let one: Children = VNode::text("a").into();
        assert_eq!(one.len(), 1);

        let many: Children = vec![VNode::text("a"), VNode::text("b")].into();
        assert_eq!(many.len(), 2);

        let text: Children = "plain".into();
        assert_eq!(text.into_vec(), vec![VNode::text("plain")]);
    }

    #[test]
    fn text_content_walks_the_tree() {
        let tree = VNode::element(
            "div",
            vec![
                VNode::text("count: "),
                VNode::element("span", VNode::text("5")),
            ],
        );

        assert_eq!(tree.tag(), Some("div"));
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.text_content(), "count: 5");
    }

    #[test]
    fn json_is_tagged_by_type() {
        let tree = VNode::element("div", VNode::text("hi"));
        let json: serde_json::Value = serde_json::from_str(&tree.to_json().unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "element",
                "tag": "div",
                "children": [{ "type": "text", "text": "hi" }]
            })
        );
    }
}
