//! Arena node types
//!
//! Nodes refer to each other by index; a node keeps its slot for the life of
//! the document even when detached.

/// Index into the document arena
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    Element,
    Text,
    Comment,
    /// Markup kept verbatim (doctype, CDATA, processing instruction)
    Raw,
}

/// One node of an [`HtmlDocument`](super::HtmlDocument)
#[derive(Debug, Clone)]
pub struct HtmlNode {
    pub kind: NodeKind,
    /// None for the document node and for detached nodes
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Lowercase tag name for elements, empty otherwise
    pub name: String,
    /// Text, comment or raw markup content
    pub content: String,
    /// Element attributes in source order
    pub attributes: Vec<HtmlAttribute>,
    /// Written as `<name/>`
    pub self_closing: bool,
    /// Inline `display` the element had before it was hidden
    pub display_before_hide: Option<String>,
}

impl HtmlNode {
    fn with_kind(kind: NodeKind) -> Self {
        HtmlNode {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            content: String::new(),
            attributes: Vec::new(),
            self_closing: false,
            display_before_hide: None,
        }
    }

    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document)
    }

    pub fn element(name: impl Into<String>) -> Self {
        let mut node = Self::with_kind(NodeKind::Element);
        node.name = name.into();
        node
    }

    pub fn text(content: impl Into<String>) -> Self {
        let mut node = Self::with_kind(NodeKind::Text);
        node.content = content.into();
        node
    }

    pub fn comment(content: impl Into<String>) -> Self {
        let mut node = Self::with_kind(NodeKind::Comment);
        node.content = content.into();
        node
    }

    /// Doctype, CDATA or processing instruction, kept as written
    pub fn raw(content: impl Into<String>) -> Self {
        let mut node = Self::with_kind(NodeKind::Raw);
        node.content = content.into();
        node
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Attribute value; a valueless attribute reads as `""`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_deref().unwrap_or(""))
    }
}

/// Stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlAttribute {
    /// Lowercase attribute name
    pub name: String,
    /// Raw value, `None` for valueless attributes
    pub value: Option<String>,
}

impl HtmlAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlAttribute {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Elements that never have content or an end tag
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// `h1` to `h6`
pub fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Start tags that close an open `<p>`
pub fn closes_paragraph(name: &str) -> bool {
    is_heading(name)
        || matches!(
            name,
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "center"
                | "dd"
                | "details"
                | "dialog"
                | "dir"
                | "div"
                | "dl"
                | "dt"
                | "fieldset"
                | "figcaption"
                | "figure"
                | "footer"
                | "form"
                | "header"
                | "hgroup"
                | "hr"
                | "li"
                | "listing"
                | "main"
                | "menu"
                | "nav"
                | "ol"
                | "p"
                | "plaintext"
                | "pre"
                | "section"
                | "summary"
                | "table"
                | "ul"
                | "xmp"
        )
}

/// SVG and MathML roots; inside them `<x/>` really is empty
pub fn is_foreign_root(name: &str) -> bool {
    matches!(name, "svg" | "math")
}
