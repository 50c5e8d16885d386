//! Core types of the document tree.

use xmlspan::{NodeKind, SourceNode};

/// Identity of a node within one [`Document`](crate::Document).
///
/// Ids are handed out in document order as the parser meets each node, so
/// an element's id is always smaller than its descendants' ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// An attribute of an element, value already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// The qualified name as written (`xml:lang`, `href`).
    pub name: String,
    pub value: String,
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    Element {
        /// The qualified name as written.
        name: String,
        attributes: Vec<XmlAttribute>,
        children: Vec<XmlNode>,
    },
    /// Character data with entities resolved.
    Text(String),
    /// The body of a `<![CDATA[...]]>` section.
    Cdata(String),
    /// The body of a `<!-- ... -->` comment.
    Comment(String),
}

/// One node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub id: NodeId,
    pub content: NodeContent,
}

impl XmlNode {
    pub fn kind(&self) -> NodeKind {
        match self.content {
            NodeContent::Element { .. } => NodeKind::Element,
            NodeContent::Text(_) => NodeKind::Text,
            NodeContent::Cdata(_) => NodeKind::CdataSection,
            NodeContent::Comment(_) => NodeKind::Comment,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.content, NodeContent::Element { .. })
    }

    /// The tag name of an element, `None` for every other node.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Value of the attribute `name`.
    ///
    /// An attribute written with an empty value reads the same as a missing
    /// one.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// Names of the element's attributes, in source order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes()
            .iter()
            .map(|attr| attr.name.as_str())
            .collect()
    }

    pub fn attributes(&self) -> &[XmlAttribute] {
        match &self.content {
            NodeContent::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// The character data of this node.
    ///
    /// For an element this is the text and CDATA of all its descendants,
    /// concatenated in document order; comments contribute nothing. Text,
    /// CDATA and comment nodes return their own data.
    pub fn text(&self) -> String {
        match &self.content {
            NodeContent::Element { .. } => {
                let mut buf = String::new();
                self.collect_text(&mut buf);
                buf
            }
            NodeContent::Text(data) | NodeContent::Cdata(data) | NodeContent::Comment(data) => {
                data.clone()
            }
        }
    }

    fn collect_text(&self, buf: &mut String) {
        match &self.content {
            NodeContent::Element { children, .. } => {
                for child in children {
                    child.collect_text(buf);
                }
            }
            NodeContent::Text(data) | NodeContent::Cdata(data) => buf.push_str(data),
            NodeContent::Comment(_) => {}
        }
    }

    /// Element, text and CDATA children. Comments are left out.
    pub fn children(&self) -> Vec<&XmlNode> {
        self.child_nodes()
            .iter()
            .filter(|child| !matches!(child.content, NodeContent::Comment(_)))
            .collect()
    }

    /// Element children only.
    pub fn element_children(&self) -> Vec<&XmlNode> {
        self.child_nodes()
            .iter()
            .filter(|child| child.is_element())
            .collect()
    }

    /// Element children with the given tag name.
    pub fn children_named(&self, name: &str) -> Vec<&XmlNode> {
        self.child_nodes()
            .iter()
            .filter(|child| child.tag_name() == Some(name))
            .collect()
    }

    /// Every child node, comments included.
    pub fn child_nodes(&self) -> &[XmlNode] {
        match &self.content {
            NodeContent::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// This node and all its descendants in document order.
    pub fn descendants(&self) -> Vec<&XmlNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.child_nodes().iter().rev());
        }
        out
    }
}

impl SourceNode for XmlNode {
    type Id = NodeId;

    fn node_id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> NodeKind {
        XmlNode::kind(self)
    }

    fn element_children(&self) -> Vec<&XmlNode> {
        XmlNode::element_children(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: usize, content: NodeContent) -> XmlNode {
        XmlNode {
            id: NodeId(id),
            content,
        }
    }

    fn sample() -> XmlNode {
        XmlNode {
            id: NodeId(0),
            content: NodeContent::Element {
                name: "a".to_string(),
                attributes: vec![
                    XmlAttribute {
                        name: "x".to_string(),
                        value: "1".to_string(),
                    },
                    XmlAttribute {
                        name: "blank".to_string(),
                        value: String::new(),
                    },
                ],
                children: vec![
                    leaf(1, NodeContent::Text("one ".to_string())),
                    leaf(2, NodeContent::Comment("skip".to_string())),
                    XmlNode {
                        id: NodeId(3),
                        content: NodeContent::Element {
                            name: "b".to_string(),
                            attributes: vec![],
                            children: vec![leaf(4, NodeContent::Cdata("two".to_string()))],
                        },
                    },
                ],
            },
        }
    }

    #[test]
    fn test_empty_attribute_reads_as_absent() {
        let node = sample();
        assert_eq!(node.attribute("x"), Some("1"));
        assert_eq!(node.attribute("blank"), None);
        assert_eq!(node.attribute("missing"), None);
        assert_eq!(node.attribute_names(), vec!["x", "blank"]);
    }

    #[test]
    fn test_text_skips_comments() {
        let node = sample();
        assert_eq!(node.text(), "one two");
        assert_eq!(node.child_nodes()[1].text(), "skip");
    }

    #[test]
    fn test_children_filters() {
        let node = sample();
        let ids: Vec<_> = node.children().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        let ids: Vec<_> = node.element_children().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(node.children_named("b").len(), 1);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let ids: Vec<_> = sample().descendants().iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_non_elements_have_no_name() {
        let text = leaf(0, NodeContent::Text("t".to_string()));
        assert_eq!(text.tag_name(), None);
        assert_eq!(text.kind(), NodeKind::Text);
        assert!(text.attribute_names().is_empty());
    }
}
