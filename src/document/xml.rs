//! Owned element tree for the XML parts of a docx package.
//!
//! Parts are small enough to hold in memory, so each one is read into a tree
//! once, edited in place, and written back. Anything that is not an element
//! or character data (declaration, comments, processing instructions) is kept
//! as the original event and written back untouched.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

pub const PARAGRAPH: &str = "w:p";
pub const RUN: &str = "w:r";
pub const TEXT: &str = "w:t";
pub const TEXTBOX_CONTENT: &str = "w:txbxContent";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("parse error at byte {position}: {message}")]
    Parse { position: u64, message: String },
    #[error("closing tag without a matching opening tag")]
    Unbalanced,
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("write error: {0}")]
    Write(String),
}

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Raw(Event<'static>),
}

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    start: BytesStart<'static>,
    pub children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    fn open(start: BytesStart<'static>, self_closing: bool) -> Self {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        Self {
            name,
            start,
            children: Vec::new(),
            self_closing,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn attribute(&self, key: &str) -> Option<String> {
        self.start
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == key.as_bytes())
            .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
    }

    /// Character data directly under this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace the element content with `value`.
    ///
    /// Word trims leading and trailing spaces of `w:t` unless told otherwise,
    /// so every rewritten node is marked `xml:space="preserve"`.
    pub fn set_text(&mut self, value: String) {
        self.children.clear();
        if !value.is_empty() {
            self.children.push(Node::Text(value));
        }
        self.self_closing = false;
        if self.attribute("xml:space").is_none() {
            self.start.push_attribute(("xml:space", "preserve"));
        }
    }

    /// Collect descendants named `name`, without descending into a match or
    /// into any element named in `skip`.
    pub fn collect_mut<'a>(&'a mut self, name: &str, skip: &[&str], out: &mut Vec<&'a mut Element>) {
        for child in self.children.iter_mut() {
            if let Node::Element(element) = child {
                if skip.contains(&element.name.as_str()) {
                    continue;
                }
                if element.is(name) {
                    out.push(element);
                } else {
                    element.collect_mut(name, skip, out);
                }
            }
        }
    }
}

/// A parsed XML part.
#[derive(Debug, Clone, Default)]
pub struct XmlTree {
    pub nodes: Vec<Node>,
}

impl XmlTree {
    pub fn parse(bytes: &[u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(bytes);
        let mut stack: Vec<Element> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();

        loop {
            let event = reader.read_event().map_err(|e| XmlError::Parse {
                position: reader.buffer_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(start) => stack.push(Element::open(start.into_owned(), false)),
                Event::Empty(start) => {
                    let element = Element::open(start.into_owned(), true);
                    attach(&mut stack, &mut nodes, Node::Element(element));
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(XmlError::Unbalanced)?;
                    attach(&mut stack, &mut nodes, Node::Element(element));
                }
                Event::Text(text) => {
                    let value = text.unescape().map_err(|e| XmlError::Parse {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    attach(&mut stack, &mut nodes, Node::Text(value.into_owned()));
                }
                Event::Eof => break,
                other => attach(&mut stack, &mut nodes, Node::Raw(other.into_owned())),
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmlError::Unclosed(open.name.clone()));
        }

        Ok(Self { nodes })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, XmlError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.nodes {
            write_node(&mut writer, node)?;
        }
        Ok(writer.into_inner())
    }

    /// Tree-wide version of [`Element::collect_mut`].
    pub fn collect_mut<'a>(&'a mut self, name: &str, skip: &[&str]) -> Vec<&'a mut Element> {
        let mut out = Vec::new();
        for node in self.nodes.iter_mut() {
            if let Node::Element(element) = node {
                if skip.contains(&element.name.as_str()) {
                    continue;
                }
                if element.is(name) {
                    out.push(element);
                } else {
                    element.collect_mut(name, skip, &mut out);
                }
            }
        }
        out
    }
}

fn attach(stack: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), XmlError> {
    match node {
        Node::Element(element) => {
            if element.self_closing && element.children.is_empty() {
                return emit(writer, Event::Empty(element.start.borrow()));
            }
            emit(writer, Event::Start(element.start.borrow()))?;
            for child in &element.children {
                write_node(writer, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
        }
        Node::Text(text) => emit(writer, Event::Text(BytesText::new(text))),
        Node::Raw(event) => emit(writer, event.borrow()),
    }
}
