//! Minimal render tree handed to and returned from gates
//!
//! Gates treat children, fallbacks and loading content as opaque values. The
//! only structure they add is an optional wrapper element.

use std::collections::BTreeMap;

/// A renderable node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum View {
    /// Renders nothing
    #[default]
    Empty,
    Text(String),
    Element(Element),
    Fragment(Vec<View>),
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            View::Empty => true,
            View::Fragment(children) => children.iter().all(View::is_empty),
            _ => false,
        }
    }

    /// Whether any text node in the tree contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        match self {
            View::Empty => false,
            View::Text(text) => text.contains(needle),
            View::Element(element) => element.children.iter().any(|c| c.contains_text(needle)),
            View::Fragment(children) => children.iter().any(|c| c.contains_text(needle)),
        }
    }

    /// The root element, if this view is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            View::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        View::text(text)
    }
}

/// A tagged element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<View>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn attrs(mut self, attrs: BTreeMap<String, String>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }
}

/// Wrapper element a gate places around granted content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WrapperKind {
    /// Children are returned as-is
    #[default]
    None,
    /// Block container (`div`)
    Container,
    /// Interactive wrapper (`button`)
    Button,
    /// Inline container (`span`)
    Inline,
}

impl WrapperKind {
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            WrapperKind::None => None,
            WrapperKind::Container => Some("div"),
            WrapperKind::Button => Some("button"),
            WrapperKind::Inline => Some("span"),
        }
    }

    /// Wrap `children`, forwarding `attrs` to the wrapper element
    pub fn wrap(&self, children: View, attrs: &BTreeMap<String, String>) -> View {
        match self.tag() {
            None => children,
            Some(tag) => Element::new(tag).attrs(attrs.clone()).child(children).into(),
        }
    }
}

/// Generic loading placeholder
pub fn loading_placeholder(label: &str) -> View {
    Element::new("div")
        .attr("class", "permission-loading")
        .attr("role", "status")
        .child(View::text(label))
        .into()
}
