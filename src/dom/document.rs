//! HTML Document - Arena-based mutable DOM
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes (node 0 is the document)
//! - NodeId indices with parent/child/sibling links for traversal
//! - In-place mutation: detaching and re-inserting nodes only relinks,
//!   so ids stay stable for the lifetime of the document

use super::node::{
    closes_paragraph, is_foreign_root, is_heading, is_void_element, HtmlAttribute, HtmlNode,
    NodeId, NodeKind,
};
use super::style;
use crate::reader::{HtmlEvent, SliceReader};

/// Id of the document node
pub const DOCUMENT_NODE: NodeId = 0;

/// Elements that stop the search for an open `<p>` to close
const BUTTON_SCOPE: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// Elements that stop the search for an open `<li>`, `<dt>` or `<dd>`
const LIST_ITEM_SCOPE: &[&str] = &[
    "applet", "button", "caption", "dl", "html", "marquee", "object", "ol", "table", "td",
    "template", "th", "ul",
];

/// An HTML document stored in arena format
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    /// Arena of nodes
    nodes: Vec<HtmlNode>,
}

impl Default for HtmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlDocument {
    /// Create an empty document
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(256);
        nodes.push(HtmlNode::document());
        HtmlDocument { nodes }
    }

    /// Parse an HTML document (lenient, never fails)
    pub fn parse(input: &str) -> Self {
        let mut doc = HtmlDocument::new();
        doc.build_from_events(input.as_bytes());
        log::trace!("parsed {} bytes into {} nodes", input.len(), doc.nodes.len());
        doc
    }

    /// Build DOM from HTML events
    fn build_from_events(&mut self, input: &[u8]) {
        let mut stack: Vec<NodeId> = vec![DOCUMENT_NODE];

        for event in SliceReader::new(input) {
            let parent_id = *stack.last().unwrap_or(&DOCUMENT_NODE);

            match event {
                HtmlEvent::StartTag(tag) => {
                    let name = lossy(tag.name).to_ascii_lowercase();
                    self.close_implied(&mut stack, &name);
                    let parent_id = *stack.last().unwrap_or(&DOCUMENT_NODE);

                    // A trailing `/` only means something on void and foreign elements
                    let foreign = is_foreign_root(&name)
                        || stack
                            .iter()
                            .any(|&id| is_foreign_root(&self.nodes[id as usize].name));
                    let void = is_void_element(&name);

                    let mut node = HtmlNode::element(name);
                    node.self_closing = tag.self_closing && (void || foreign);
                    node.attributes = tag
                        .attributes
                        .iter()
                        .map(|attr| HtmlAttribute {
                            name: lossy(attr.name).to_ascii_lowercase(),
                            value: attr.value.map(lossy),
                        })
                        .collect();

                    let opens = !node.self_closing && !void;
                    let node_id = self.push_node(node);
                    self.link_child(parent_id, node_id);
                    if opens {
                        stack.push(node_id);
                    }
                }

                HtmlEvent::EndTag(name) => {
                    let name = lossy(name).to_ascii_lowercase();
                    // Close the nearest open element of that name and everything above it
                    if let Some(pos) = stack
                        .iter()
                        .skip(1)
                        .rposition(|&id| self.nodes[id as usize].name == name)
                    {
                        stack.truncate(pos + 1);
                    }
                }

                HtmlEvent::Text(content) => {
                    let node_id = self.push_node(HtmlNode::text(lossy(content)));
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::Comment(content) => {
                    let node_id = self.push_node(HtmlNode::comment(lossy(content)));
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::Raw(content) => {
                    let node_id = self.push_node(HtmlNode::raw(lossy(content)));
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::EndDocument => {}
            }
        }
    }

    /// Pop the elements a start tag `name` ends implicitly
    /// (`<p>a<h1>`, `<li>a<li>`, `<dt>a<dd>`, `<h2>a<h3>`)
    fn close_implied(&self, stack: &mut Vec<NodeId>, name: &str) {
        if name == "li" {
            self.close_nearest(stack, &["li"], LIST_ITEM_SCOPE);
        } else if name == "dt" || name == "dd" {
            self.close_nearest(stack, &["dt", "dd"], LIST_ITEM_SCOPE);
        }
        if closes_paragraph(name) {
            self.close_nearest(stack, &["p"], BUTTON_SCOPE);
        }
        if is_heading(name)
            && stack
                .last()
                .is_some_and(|&id| is_heading(&self.nodes[id as usize].name))
        {
            stack.pop();
        }
    }

    /// Close the innermost open element named in `targets`, unless a
    /// `boundaries` element sits between it and the current node
    fn close_nearest(&self, stack: &mut Vec<NodeId>, targets: &[&str], boundaries: &[&str]) {
        let found = stack
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .map(|(pos, &id)| (pos, self.nodes[id as usize].name.as_str()))
            .take_while(|(_, open)| !boundaries.contains(open))
            .find(|(_, open)| targets.contains(open))
            .map(|(pos, _)| pos);
        if let Some(pos) = found {
            stack.truncate(pos);
        }
    }

    fn push_node(&mut self, node: HtmlNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        node_id
    }

    /// Link a detached child node as the last child of its new parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
        self.nodes[child_id as usize].parent = Some(parent_id);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&HtmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get total number of nodes (detached ones included)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get_node(id)
            .filter(|node| node.is_element())
            .map(|node| node.name.as_str())
    }

    /// Check whether `id` is an element with the given (lowercase) tag name
    pub fn is_element_named(&self, id: NodeId, name: &str) -> bool {
        self.tag_name(id) == Some(name)
    }

    /// Get attribute value by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get_node(id)?.attribute(name)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.parent
    }

    /// Check whether `node` is `ancestor` or lies inside its subtree
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over the siblings following a node, in document order
    pub fn following_siblings(&self, id: NodeId) -> ChildIter<'_> {
        let next = self.get_node(id).and_then(|n| n.next_sibling);
        ChildIter { doc: self, next }
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.following_siblings(id)
            .find(|&sibling| self.nodes[sibling as usize].is_element())
    }

    /// Iterate over all descendants of a node (depth-first, document order)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        // Initialize stack with all children in reverse order (so first is processed first)
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// All attached elements in document order
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(DOCUMENT_NODE)
            .filter(|&id| self.nodes[id as usize].is_element())
    }

    /// Elements whose `id` equals `value`, in document order
    pub fn elements_by_id(&self, value: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|&id| self.attribute(id, "id") == Some(value))
            .collect()
    }

    /// Elements whose `id` starts with `prefix` (`[id^='prefix']`), in document order
    pub fn elements_with_id_prefix(&self, prefix: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|&id| {
                self.attribute(id, "id")
                    .is_some_and(|value| value.starts_with(prefix))
            })
            .collect()
    }

    /// Concatenated text of a node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get_node(id) else {
            return String::new();
        };
        if node.is_text() {
            return node.content.clone();
        }

        let mut result = String::new();
        for desc in self.descendants(id) {
            let desc = &self.nodes[desc as usize];
            if desc.is_text() {
                result.push_str(&desc.content);
            }
        }
        result
    }

    // ------------------------------------------------------------------
    // Mutation
    //
    // All mutation methods take ids handed out by this document and panic on
    // ids that are out of range.
    // ------------------------------------------------------------------

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push_node(HtmlNode::element(name.to_ascii_lowercase()))
    }

    /// Set (or replace) an attribute value
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let node = &mut self.nodes[id as usize];
        let name = name.to_ascii_lowercase();
        match node.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = Some(value.to_string()),
            None => node.attributes.push(HtmlAttribute::new(name, value)),
        }
    }

    /// Remove an attribute if present
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        self.nodes[id as usize]
            .attributes
            .retain(|attr| !attr.name.eq_ignore_ascii_case(name));
    }

    /// Unlink a node (and its subtree) from its parent. No-op if already detached.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id as usize];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        let Some(parent) = parent else {
            return;
        };

        match prev {
            Some(prev) => self.nodes[prev as usize].next_sibling = next,
            None => self.nodes[parent as usize].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next as usize].prev_sibling = prev,
            None => self.nodes[parent as usize].last_child = prev,
        }

        let node = &mut self.nodes[id as usize];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.contains(child, parent) {
            return;
        }
        self.detach(child);
        self.link_child(parent, child);
    }

    /// Insert `child` immediately before `reference`, moving it if attached elsewhere.
    /// No-op when `reference` is detached.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        if self.contains(child, reference) {
            return;
        }
        self.detach(child);
        let Some(parent) = self.nodes[reference as usize].parent else {
            return;
        };
        let prev = self.nodes[reference as usize].prev_sibling;

        {
            let node = &mut self.nodes[child as usize];
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = Some(reference);
        }
        self.nodes[reference as usize].prev_sibling = Some(child);
        match prev {
            Some(prev) => self.nodes[prev as usize].next_sibling = Some(child),
            None => self.nodes[parent as usize].first_child = Some(child),
        }
    }

    /// Insert `child` immediately after `reference`, moving it if attached elsewhere.
    /// No-op when `reference` is detached.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) {
        if self.contains(child, reference) {
            return;
        }
        self.detach(child);
        let Some(parent) = self.nodes[reference as usize].parent else {
            return;
        };
        let next = self.nodes[reference as usize].next_sibling;

        {
            let node = &mut self.nodes[child as usize];
            node.parent = Some(parent);
            node.prev_sibling = Some(reference);
            node.next_sibling = next;
        }
        self.nodes[reference as usize].next_sibling = Some(child);
        match next {
            Some(next) => self.nodes[next as usize].prev_sibling = Some(child),
            None => self.nodes[parent as usize].last_child = Some(child),
        }
    }

    /// Mark an element as written `<name />`
    pub fn set_self_closing(&mut self, id: NodeId, self_closing: bool) {
        self.nodes[id as usize].self_closing = self_closing;
    }

    // ------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------

    /// Value of an inline style property
    pub fn style_get(&self, id: NodeId, property: &str) -> Option<String> {
        let decls = style::parse_declarations(self.attribute(id, "style")?);
        decls
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set an inline style property; an empty value removes it.
    /// The `style` attribute is dropped once no declarations remain.
    pub fn style_set(&mut self, id: NodeId, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        let mut decls = style::parse_declarations(self.attribute(id, "style").unwrap_or(""));

        if let Some(pos) = decls.iter().position(|(name, _)| *name == property) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((property, value.to_string()));
        }

        if decls.is_empty() {
            self.remove_attribute(id, "style");
        } else {
            self.set_attribute(id, "style", &style::serialize_declarations(&decls));
        }
    }

    /// Hide an element (`display: none`), remembering any inline `display`
    /// it had so `show` can put it back. Hidden elements are left alone.
    pub fn hide(&mut self, id: NodeId) {
        if !self.nodes[id as usize].is_element() || self.is_hidden(id) {
            return;
        }
        let display = self.style_get(id, "display");
        self.nodes[id as usize].display_before_hide = display;
        self.style_set(id, "display", "none");
    }

    /// Undo `hide`: restore the remembered inline `display`, or drop the
    /// declaration when there was none. Visible elements are left alone.
    pub fn show(&mut self, id: NodeId) {
        if !self.nodes[id as usize].is_element() || !self.is_hidden(id) {
            return;
        }
        let display = self.nodes[id as usize].display_before_hide.take();
        self.style_set(id, "display", display.as_deref().unwrap_or(""));
    }

    /// Check whether an element carries `display: none` inline
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.style_get(id, "display")
            .is_some_and(|value| value.eq_ignore_ascii_case("none"))
    }

    /// Serialize the whole document back to HTML
    pub fn to_html(&self) -> String {
        super::serialize::to_html(self, DOCUMENT_NODE)
    }

}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Iterator over sibling chains (children of a node, or following siblings)
pub struct ChildIter<'d> {
    doc: &'d HtmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d HtmlDocument,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}
