#![forbid(unsafe_code)]

//! Minimal in-memory document model.
//!
//! A [`Document`] is an arena of [`Element`]s addressed by [`NodeId`]. It
//! carries just enough of the DOM for the widgets: tags, ids, classes,
//! attributes, inline style, text, a horizontal scroll offset and the tree.
//! Nodes are never freed; detached nodes simply have no parent.
//!
//! Selectors are compound simple selectors without combinators:
//! `div`, `#gallery`, `.slide.active`, `img.centered-image`,
//! `source[media*="min-width"]`. Descendant lookups use
//! [`Document::query_within`].

use core::fmt;

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Opaque key hosts put into events.
    #[inline]
    #[must_use]
    pub const fn key(self) -> u32 {
        self.0
    }

    /// Handle from a key produced by [`NodeId::key`].
    #[inline]
    #[must_use]
    pub const fn from_key(key: u32) -> Self {
        Self(key)
    }
}

/// Document errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// Handle does not belong to this document.
    NodeNotFound(NodeId),
    /// Selector text could not be parsed.
    InvalidSelector(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {} not found", id.key()),
            Self::InvalidSelector(sel) => write!(f, "invalid selector: {sel:?}"),
        }
    }
}

impl std::error::Error for DomError {}

/// One element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub style: Vec<(String, String)>,
    pub text: Option<String>,
    pub scroll_left: f64,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self
                .attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Inline style value by property.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Child handles in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle, `None` when detached or the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_owned()),
            "class" => self.classes = split_classes(value),
            _ => upsert(&mut self.attrs, name, value),
        }
    }
}

fn split_classes(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_owned).collect()
}

fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == key) {
        slot.1 = value.to_owned();
    } else {
        pairs.push((key.to_owned(), value.to_owned()));
    }
}

/// Declarative element description for [`Document::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Element with tag `tag`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    /// Set the id.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set the class list (space separated).
    #[must_use]
    pub fn class(self, classes: &str) -> Self {
        self.attr("class", classes)
    }

    /// Set an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        upsert(&mut self.attrs, name, value);
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_owned());
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
    value: String,
}

/// Parsed compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`] on empty input, combinators, or
    /// malformed attribute filters.
    pub fn parse(text: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(text.to_owned());
        let text = text.trim();
        if text.is_empty() || text.contains(char::is_whitespace) || text.contains(['>', '+', '~', ',']) {
            return Err(invalid());
        }

        let mut selector = Self::default();
        let mut rest = text;
        let name_end = |s: &str| s.find(['#', '.', '[']).unwrap_or(s.len());

        let valid_name = |s: &str| s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        let end = name_end(rest);
        if end > 0 {
            if !valid_name(&rest[..end]) {
                return Err(invalid());
            }
            selector.tag = Some(rest[..end].to_ascii_lowercase());
            rest = &rest[end..];
        }

        while let Some(c) = rest.chars().next() {
            match c {
                '#' | '.' => {
                    let body = &rest[1..];
                    let end = name_end(body);
                    if end == 0 || !valid_name(&body[..end]) {
                        return Err(invalid());
                    }
                    let name = body[..end].to_owned();
                    if c == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let close = rest.find(']').ok_or_else(invalid)?;
                    selector.attrs.push(parse_attr(&rest[1..close]).ok_or_else(invalid)?);
                    rest = &rest[close + 1..];
                }
                _ => return Err(invalid()),
            }
        }
        Ok(selector)
    }

    /// Whether `element` matches.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == element.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| element.id.as_ref() == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attrs.iter().all(|m| {
                element.attr(&m.name).is_some_and(|v| match m.op {
                    AttrOp::Exists => true,
                    AttrOp::Equals => v == m.value,
                    AttrOp::Contains => v.contains(m.value.as_str()),
                })
            })
    }
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let unquote = |v: &str| {
        let v = v.trim();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_owned()
    };
    let (name, op, value) = if let Some((name, value)) = body.split_once("*=") {
        (name, AttrOp::Contains, unquote(value))
    } else if let Some((name, value)) = body.split_once('=') {
        (name, AttrOp::Equals, unquote(value))
    } else {
        (body, AttrOp::Exists, String::new())
    };
    let name = name.trim();
    (!name.is_empty()).then(|| AttrMatch {
        name: name.to_owned(),
        op,
        value,
    })
}

/// Arena-backed document. Node 0 is the `<body>` root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Element {
                tag: "body".to_owned(),
                ..Element::default()
            }],
        }
    }

    /// The root element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Element by handle.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0 as usize)
    }

    /// Element by handle, mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn node(&self, id: NodeId) -> Result<&Element, DomError> {
        self.get(id).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.get_mut(id).ok_or(DomError::NodeNotFound(id))
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        });
        id
    }

    /// Build `spec` and append it under `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] when `parent` does not exist.
    pub fn insert(&mut self, parent: NodeId, spec: &ElementSpec) -> Result<NodeId, DomError> {
        self.node(parent)?;
        let id = self.create_element(&spec.tag);
        for (name, value) in &spec.attrs {
            self.nodes[id.0 as usize].set_attr(name, value);
        }
        self.nodes[id.0 as usize].text = spec.text.clone();
        for child in &spec.children {
            self.insert(id, child)?;
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Set an attribute (`id` and `class` update the dedicated fields).
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an unknown handle.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.node_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Set an inline style property.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an unknown handle.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        upsert(&mut self.node_mut(id)?.style, property, value);
        Ok(())
    }

    /// Inline style property of `id`.
    #[must_use]
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)?.style(property)
    }

    /// Attribute of `id`.
    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.attr(name)
    }

    /// Children of `id` (empty for unknown handles).
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], Element::children)
    }

    /// Move `child` to the end of `parent`'s children, detaching it first.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for unknown handles.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        self.detach(child)?;
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
        Ok(())
    }

    /// Remove `id` from its parent, if any.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an unknown handle.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.node_mut(id)?.parent.take() {
            self.nodes[parent.0 as usize].children.retain(|c| *c != id);
        }
        Ok(())
    }

    /// Detach and return every child of `id`, in order.
    pub fn take_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let Some(element) = self.get_mut(id) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut element.children);
        for child in &children {
            self.nodes[child.0 as usize].parent = None;
        }
        children
    }

    /// Detached structural copy of `id` and its subtree.
    ///
    /// # Errors
    ///
    /// [`DomError::NodeNotFound`] for an unknown handle.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId, DomError> {
        let source = self.node(id)?.clone();
        let copy = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element {
            children: Vec::new(),
            parent: None,
            ..source.clone()
        });
        for child in source.children {
            let child_copy = self.deep_clone(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    /// First element in document order matching `selector`.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`] for unparsable selectors.
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        self.query_within(self.body(), selector)
    }

    /// Every element in document order matching `selector`.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`] for unparsable selectors.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        self.query_all_within(self.body(), selector)
    }

    /// First strict descendant of `scope` matching `selector`.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`] for unparsable selectors.
    pub fn query_within(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants(scope).find(|id| self.nodes[id.0 as usize].matches(&selector)))
    }

    /// Every strict descendant of `scope` matching `selector`.
    ///
    /// # Errors
    ///
    /// [`DomError::InvalidSelector`] for unparsable selectors.
    pub fn query_all_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .filter(|id| self.nodes[id.0 as usize].matches(&selector))
            .collect())
    }

    /// Whether `ancestor` contains `id` (or is `id`).
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(node) = cursor {
            if node == ancestor {
                return true;
            }
            cursor = self.get(node).and_then(Element::parent);
        }
        false
    }

    /// Strict descendants of `scope` in pre-order.
    pub fn descendants(&self, scope: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.children(next).iter().rev().copied());
            Some(next)
        })
    }

    /// Serialize `id` and its subtree as compact HTML.
    #[must_use]
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Some(el) = self.get(id) else {
            return;
        };
        out.push('<');
        out.push_str(&el.tag);
        if let Some(value) = &el.id {
            push_attr(out, "id", value);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        for (name, value) in &el.attrs {
            push_attr(out, name, value);
        }
        if !el.style.is_empty() {
            let css: Vec<String> = el.style.iter().map(|(k, v)| format!("{k}: {v}")).collect();
            push_attr(out, "style", &css.join("; "));
        }
        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape(text));
        }
        for child in &el.children {
            self.write_html(*child, out);
        }
        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

impl Element {
    fn matches(&self, selector: &Selector) -> bool {
        selector.matches(self)
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
