//! Parser that builds [`Document`] trees from text.

use crate::{Error, NodeContent, NodeId, Result, XmlAttribute, XmlNode};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;
use xmlspan::{Annotator, Location};

/// Parse `content` with the default [`ParseOptions`].
///
/// # Example
///
/// ```rust
/// use xmlspan_dom::parse;
///
/// let doc = parse("<root>\n  <child/>\n</root>").unwrap();
/// let child = doc.root.element_children()[0];
/// let loc = doc.location(child).unwrap();
/// assert_eq!((loc.start_line(), loc.start_column()), (2, 3));
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed.
pub fn parse(content: &str) -> Result<Document> {
    Parser::default().parse(content)
}

/// Knobs for [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record source locations for the parsed nodes.
    pub keep_positions: bool,
    /// Trim whitespace around text and drop whitespace-only text nodes.
    pub trim_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_positions: true,
            trim_text: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_positions(mut self, keep: bool) -> Self {
        self.keep_positions = keep;
        self
    }

    pub fn trim_text(mut self, trim: bool) -> Self {
        self.trim_text = trim;
        self
    }
}

/// A reusable parser configured by [`ParseOptions`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `content` into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if quick-xml rejects the text, if the element
    /// structure is broken, or (when positions are kept) if the text cannot
    /// be scanned for locations.
    pub fn parse(&self, content: &str) -> Result<Document> {
        let root = TreeBuilder::new(content, &self.options).build()?;
        let annotator = if self.options.keep_positions {
            Some(Annotator::new(content, &root)?)
        } else {
            None
        };

        Ok(Document { root, annotator })
    }
}

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Document {
    /// The root element.
    pub root: XmlNode,
    annotator: Option<Annotator<NodeId>>,
}

impl Document {
    /// Where `node` sits in the source text.
    ///
    /// `None` if positions were not kept, or if `node` is not an element.
    pub fn location(&self, node: &XmlNode) -> Option<Location<'_>> {
        self.annotator.as_ref()?.location(node)
    }

    pub fn keeps_positions(&self) -> bool {
        self.annotator.is_some()
    }

    /// The annotator holding the source text and its spans, if positions
    /// were kept.
    pub fn annotator(&self) -> Option<&Annotator<NodeId>> {
        self.annotator.as_ref()
    }
}

/// Internal builder state.
struct TreeBuilder<'a> {
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,

    root: Option<XmlNode>,

    next_id: usize,
}

/// An element whose close tag has not been seen yet.
struct BuildNode {
    id: NodeId,
    name: String,
    attributes: Vec<XmlAttribute>,
    children: Vec<XmlNode>,
}

impl BuildNode {
    fn finish(self) -> XmlNode {
        XmlNode {
            id: self.id,
            content: NodeContent::Element {
                name: self.name,
                attributes: self.attributes,
                children: self.children,
            },
        }
    }
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, options: &ParseOptions) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(options.trim_text);

        Self {
            reader,
            stack: Vec::new(),
            root: None,
            next_id: 0,
        }
    }

    fn build(mut self) -> Result<XmlNode> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.open_element(&e)?;
                    self.stack.push(node);
                }
                Ok(Event::End(e)) => {
                    let node = self.stack.pop().ok_or_else(|| {
                        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                        Error::UnexpectedEndTag(name)
                    })?;
                    self.attach(node.finish())?;
                }
                Ok(Event::Empty(e)) => {
                    let node = self.open_element(&e)?;
                    self.attach(node.finish())?;
                }
                Ok(Event::Text(e)) => {
                    // Character data outside the root is only whitespace
                    if self.stack.is_empty() {
                        continue;
                    }
                    let position = self.reader.buffer_position();
                    let text = e
                        .unescape()
                        .map_err(|err| Error::Xml {
                            source: err.into(),
                            position,
                        })?
                        .into_owned();
                    self.push_leaf(NodeContent::Text(text));
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    self.push_leaf(NodeContent::Cdata(text));
                }
                Ok(Event::Comment(e)) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    self.push_leaf(NodeContent::Comment(text));
                }
                Ok(Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {
                    // Not part of the tree
                }
                Ok(Event::Eof) => break,
                Err(source) => {
                    return Err(Error::Xml {
                        source,
                        position: self.reader.error_position(),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnclosedElement(node.name.clone()));
        }

        let root = self.root.ok_or(Error::EmptyDocument)?;
        debug!(nodes = self.next_id, "built document tree");
        Ok(root)
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn open_element(&mut self, e: &BytesStart<'_>) -> Result<BuildNode> {
        let id = self.allocate_id();
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let value = attr.unescape_value().map_err(|err| Error::Xml {
                source: err.into(),
                position: self.reader.buffer_position(),
            })?;
            attributes.push(XmlAttribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value: value.into_owned(),
            });
        }

        Ok(BuildNode {
            id,
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Hang a finished element under the open element, or make it the root.
    fn attach(&mut self, node: XmlNode) -> Result<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if self.root.is_some() {
            let name = node.tag_name().unwrap_or_default().to_string();
            return Err(Error::MultipleRoots(name));
        }
        self.root = Some(node);
        Ok(())
    }

    /// Add a text, CDATA or comment child to the open element. Outside the
    /// root these are dropped.
    fn push_leaf(&mut self, content: NodeContent) {
        if self.stack.is_empty() {
            return;
        }
        let id = self.allocate_id();
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlNode { id, content });
        }
    }
}
