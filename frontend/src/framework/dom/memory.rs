//! In-process document.
//!
//! `MemoryDom` keeps every node in an arena and hands out [`NodeId`]s as
//! element handles, so element identity is plain index equality. Markup is
//! read with `quick-xml`; the views write void elements self-closing, but
//! unclosed `<input>`/`<img>` tags are accepted as well.
//!
//! Event dispatch mirrors the browser closely enough for the views: the
//! propagation path is fixed when dispatch starts, and listeners are looked
//! up on each node when the event reaches it, so a listener removed by an
//! earlier handler never fires.
//!
//! Nodes are never freed: a detached subtree stays in the arena, so a stale
//! [`NodeId`] can never alias a newer node. Every redraw grows the arena by
//! one subtree, which suits tests and the one-shot native preview but not a
//! long-running page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::escape::escape;
use quick_xml::Reader;

use super::selector::Selector;
use super::{Dom, DomEvent, EventKind};
use crate::framework::error::DomError;
use crate::framework::render::RenderPosition;

const VOID_ELEMENTS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta", "source", "wbr"];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    /// Text exactly as written in the markup, entities included.
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

type Handler = Rc<dyn Fn(&DomEvent)>;

struct Binding {
    id: u64,
    node: NodeId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct Document {
    nodes: Vec<Node>,
    bindings: Vec<Binding>,
    next_binding: u64,
}

impl Document {
    /// Appends a node to the arena. Ids are never reused.
    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(id).parent?;
        let index = self.node(parent).children.iter().position(|child| *child == id)?;
        Some((parent, index))
    }

    /// `id` followed by its ancestors, innermost first.
    fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            path.push(parent);
            current = parent;
        }
        path
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.node(root).children {
            out.push(*child);
            self.descendants(*child, out);
        }
    }

    fn matching(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            warn!("unsupported selector `{selector}`");
            return Vec::new();
        };
        let mut all = Vec::new();
        self.descendants(root, &mut all);
        all.into_iter()
            .filter(|id| match self.tag(*id) {
                Some(tag) => selector.matches(tag, |name| self.attribute(*id, name)),
                None => false,
            })
            .collect()
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape(value.as_str())));
                }
                if is_void(tag) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in &self.node(id).children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }

    fn write_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &self.node(id).children {
                    self.write_text(*child, out);
                }
            }
        }
    }

    fn element_from(&mut self, start: &BytesStart<'_>) -> Result<NodeId, DomError> {
        let tag = utf8(start.name().as_ref())?.to_ascii_lowercase();
        let mut attributes = Vec::new();
        for attribute in start.html_attributes() {
            let attribute = attribute.map_err(|err| DomError::Markup(err.to_string()))?;
            let name = utf8(attribute.key.as_ref())?.to_ascii_lowercase();
            let value = attribute
                .unescape_value()
                .map_err(|err| DomError::Markup(err.to_string()))?;
            attributes.push((name, value.into_owned()));
        }
        Ok(self.push(NodeKind::Element { tag, attributes }))
    }

    fn parse(&mut self, markup: &str) -> Result<NodeId, DomError> {
        let mut reader = Reader::from_str(markup);
        reader.config_mut().check_end_names = false;

        let mut open: Vec<NodeId> = Vec::new();
        let mut roots: Vec<NodeId> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|err| DomError::Markup(format!("at byte {}: {}", reader.buffer_position(), err)))?;
            match event {
                Event::Start(start) => {
                    let node = self.element_from(&start)?;
                    self.attach_parsed(&open, &mut roots, node);
                    if !self.tag(node).is_some_and(is_void) {
                        open.push(node);
                    }
                }
                Event::Empty(start) => {
                    let node = self.element_from(&start)?;
                    self.attach_parsed(&open, &mut roots, node);
                }
                Event::End(end) => {
                    let name = utf8(end.name().as_ref())?.to_ascii_lowercase();
                    if is_void(&name) {
                        continue;
                    }
                    match open.pop() {
                        Some(node) if self.tag(node) == Some(name.as_str()) => {}
                        _ => return Err(DomError::Markup(format!("unexpected closing tag </{name}>"))),
                    }
                }
                Event::Text(text) => self.push_text(&open, utf8(&text)?)?,
                Event::CData(data) => self.push_text(&open, utf8(&data)?)?,
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(node) = open.last() {
            let tag = self.tag(*node).unwrap_or_default();
            return Err(DomError::Markup(format!("unclosed <{tag}>")));
        }
        match roots.as_slice() {
            [root] => Ok(*root),
            _ => Err(DomError::FragmentRoots(roots.len())),
        }
    }

    fn attach_parsed(&mut self, open: &[NodeId], roots: &mut Vec<NodeId>, node: NodeId) {
        match open.last() {
            Some(parent) => {
                let index = self.node(*parent).children.len();
                self.insert_child(*parent, index, node);
            }
            None => roots.push(node),
        }
    }

    /// Text inside an element is kept verbatim, whitespace included, so
    /// serializing gives the markup back. Outside any element only
    /// whitespace is allowed, and it is dropped.
    fn push_text(&mut self, open: &[NodeId], text: &str) -> Result<(), DomError> {
        let Some(parent) = open.last() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(DomError::Markup(format!("text outside of an element: `{}`", text.trim())));
        };
        if text.is_empty() {
            return Ok(());
        }
        let node = self.push(NodeKind::Text(text.to_string()));
        let index = self.node(*parent).children.len();
        self.insert_child(*parent, index, node);
        Ok(())
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, DomError> {
    std::str::from_utf8(bytes).map_err(|err| DomError::Markup(err.to_string()))
}

/// Shared handle to an in-process document, for tests and the native
/// preview. See the module docs on node retention.
#[derive(Clone, Default)]
pub struct MemoryDom {
    doc: Rc<RefCell<Document>>,
}

/// Unbinds its handler when dropped.
pub struct MemoryListener {
    doc: Weak<RefCell<Document>>,
    id: u64,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.upgrade() {
            doc.borrow_mut().bindings.retain(|binding| binding.id != self.id);
        }
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// A detached, empty element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.doc.borrow_mut().push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let doc = self.doc.borrow();
        doc.node(id)
            .children
            .iter()
            .copied()
            .filter(|child| doc.tag(*child).is_some())
            .collect()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.doc.borrow().attribute(id, name).map(str::to_string)
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) {
        let mut doc = self.doc.borrow_mut();
        if let NodeKind::Element { attributes, .. } = &mut doc.nodes[id.0].kind {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, current)) => *current = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.doc.borrow().attribute(id, name).is_some()
    }

    /// Concatenated text of `id` and its descendants, as written in the markup.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.doc.borrow().write_text(id, &mut out);
        out
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.doc.borrow().write_html(id, &mut out);
        out
    }

    /// Number of handlers currently bound anywhere in the document.
    pub fn listener_count(&self) -> usize {
        self.doc.borrow().bindings.len()
    }

    /// Fires `kind` at `target` and bubbles it up to the document root.
    ///
    /// The event carries the target's `value` attribute. The returned event
    /// reports whether a handler prevented the default action or rejected
    /// the input.
    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> DomEvent {
        let (path, value) = {
            let doc = self.doc.borrow();
            (doc.path(target), doc.attribute(target, "value").map(str::to_string))
        };
        let event = DomEvent::new(value);

        for node in path {
            let handlers: Vec<(u64, Handler)> = self
                .doc
                .borrow()
                .bindings
                .iter()
                .filter(|binding| binding.node == node && binding.kind == kind)
                .map(|binding| (binding.id, binding.handler.clone()))
                .collect();
            for (id, handler) in handlers {
                let still_bound = self.doc.borrow().bindings.iter().any(|binding| binding.id == id);
                if still_bound {
                    handler(&event);
                }
            }
        }
        event
    }
}

impl Dom for MemoryDom {
    type Element = NodeId;
    type Listener = MemoryListener;

    fn parse_fragment(&self, markup: &str) -> Result<NodeId, DomError> {
        let mut doc = self.doc.borrow_mut();
        let mark = doc.nodes.len();
        let parsed = doc.parse(markup);
        if parsed.is_err() {
            doc.nodes.truncate(mark);
        }
        parsed
    }

    fn insert_adjacent(&self, target: &NodeId, position: RenderPosition, element: &NodeId) -> Result<(), DomError> {
        let mut doc = self.doc.borrow_mut();
        let (target, element) = (*target, *element);

        let anchor = match position {
            RenderPosition::AfterBegin | RenderPosition::BeforeEnd => target,
            RenderPosition::BeforeBegin | RenderPosition::AfterEnd => doc.node(target).parent.ok_or(DomError::NotAttached)?,
        };
        if doc.path(anchor).contains(&element) {
            return Err(DomError::Host("cannot insert an element inside itself".to_string()));
        }

        doc.detach(element);
        match position {
            RenderPosition::AfterBegin => doc.insert_child(target, 0, element),
            RenderPosition::BeforeEnd => {
                let index = doc.node(target).children.len();
                doc.insert_child(target, index, element);
            }
            RenderPosition::BeforeBegin | RenderPosition::AfterEnd => {
                let (parent, index) = doc.index_in_parent(target).ok_or(DomError::NotAttached)?;
                let index = if position == RenderPosition::AfterEnd { index + 1 } else { index };
                doc.insert_child(parent, index, element);
            }
        }
        Ok(())
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.doc.borrow().node(*element).parent
    }

    fn replace_with(&self, old: &NodeId, new: &NodeId) -> Result<(), DomError> {
        let mut doc = self.doc.borrow_mut();
        let (old, new) = (*old, *new);
        if old == new {
            return Ok(());
        }
        if doc.node(old).parent.is_none() {
            return Err(DomError::NotAttached);
        }
        if doc.path(old).contains(&new) {
            return Err(DomError::Host("cannot replace an element with its ancestor".to_string()));
        }

        doc.detach(new);
        let (parent, index) = doc.index_in_parent(old).ok_or(DomError::NotAttached)?;
        doc.nodes[parent.0].children[index] = new;
        doc.nodes[new.0].parent = Some(parent);
        doc.nodes[old.0].parent = None;
        Ok(())
    }

    fn query_selector(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.doc.borrow().matching(*root, selector).into_iter().next()
    }

    fn query_selector_all(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.doc.borrow().matching(*root, selector)
    }

    fn listen<F>(&self, element: &NodeId, kind: EventKind, handler: F) -> MemoryListener
    where
        F: Fn(&DomEvent) + 'static,
    {
        let mut doc = self.doc.borrow_mut();
        let id = doc.next_binding;
        doc.next_binding += 1;
        doc.bindings.push(Binding {
            id,
            node: *element,
            kind,
            handler: Rc::new(handler),
        });
        MemoryListener {
            doc: Rc::downgrade(&self.doc),
            id,
        }
    }
}
