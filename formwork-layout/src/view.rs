//! Headless view tree produced by renderers.
//!
//! A pass does not draw anything: every renderer returns a [`Node`] tree that a
//! host can diff, walk, or serialise with [`Node::to_html`]. Elements can carry
//! a change listener (controlled inputs) and a submit listener (the form root).

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::binding::{ChangeEvent, ChangeHandler};
use crate::submit::{SubmitEvent, SubmitHandler};

/// Tags that have no closing tag when serialised.
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

/// A node in the rendered view tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    /// Renders nothing
    #[default]
    Empty,
    /// Plain text content
    Text(String),
    /// An element with attributes and children
    Element(Element),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Depth-first search for the first element matching `pred`, self included.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        match self {
            Node::Element(el) => el.find(pred),
            _ => None,
        }
    }

    /// First element with the given tag.
    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|el| el.tag() == tag)
    }

    /// First element whose class list contains `class`.
    pub fn find_class(&self, class: &str) -> Option<&Element> {
        self.find(&|el| el.has_class(class))
    }

    /// Concatenated text of this node and all its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Empty => {}
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialise the tree as HTML. Listeners are not serialised.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Empty => {}
            Node::Text(t) => out.push_str(&html_escape::encode_text(t)),
            Node::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element of the view tree.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    children: Vec<Node>,
    on_change: Option<ChangeHandler>,
    on_submit: Option<SubmitHandler>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an attribute only when `value` is present.
    pub fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Set a boolean attribute (`checked`, `disabled`, ...) when `on` is true.
    pub fn flag(self, name: &str, on: bool) -> Self {
        if on {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Append classes to the class list. Empty input is ignored.
    pub fn class(mut self, class: &str) -> Self {
        let class = class.trim();
        if class.is_empty() {
            return self;
        }
        match self.attrs.get_mut("class") {
            Some(existing) if !existing.is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            _ => {
                self.attrs.insert("class".into(), class.to_string());
            }
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        let node = node.into();
        if !node.is_empty() {
            self.children.push(node);
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        for node in nodes {
            self = self.child(node);
        }
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn on_change(mut self, handler: ChangeHandler) -> Self {
        self.on_change = Some(handler);
        self
    }

    pub fn on_submit(mut self, handler: SubmitHandler) -> Self {
        self.on_submit = Some(handler);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn change_handler(&self) -> Option<&ChangeHandler> {
        self.on_change.as_ref()
    }

    pub fn submit_handler(&self) -> Option<&SubmitHandler> {
        self.on_submit.as_ref()
    }

    /// Dispatch a change event to this element's listener.
    ///
    /// Returns false when the element has no change listener.
    pub fn dispatch_change(&self, event: ChangeEvent) -> bool {
        match &self.on_change {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }

    /// Dispatch a native submit to this element's listener.
    pub fn dispatch_submit(&self, event: &mut SubmitEvent) -> bool {
        match &self.on_submit {
            Some(handler) => {
                handler.call(event);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            if value.is_empty() && name != "class" && name != "value" {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(
                    out,
                    " {name}=\"{}\"",
                    html_escape::encode_double_quoted_attribute(value)
                );
            }
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Listener identity is not comparable; two elements are equal when their
/// structure matches and they carry listeners in the same places.
impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.attrs == other.attrs
            && self.children == other.children
            && self.on_change.is_some() == other.on_change.is_some()
            && self.on_submit.is_some() == other.on_submit.is_some()
    }
}
