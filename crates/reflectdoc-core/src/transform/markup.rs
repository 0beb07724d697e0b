//! Generic markup tree
//!
//! Rules build a small element tree instead of concatenating strings; the
//! tree is serialized once per documented type. Text is written verbatim
//! because generators embed pre-formatted anchors and template tags.
//!
//! Copyright (c) 2025 Reflectdoc Team
//! Licensed under the Apache-2.0 license

/// A node of the generic markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(GenericElement),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

impl GenericElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Append an attribute, keeping insertion order
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Value of the first attribute with this name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Markup {
    pub fn text(body: impl Into<String>) -> Self {
        Markup::Text(body.into())
    }

    pub fn as_element(&self) -> Option<&GenericElement> {
        match self {
            Markup::Element(element) => Some(element),
            Markup::Text(_) => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Markup::Element(element) => element.write_html(out),
            Markup::Text(text) => out.push_str(text),
        }
    }
}

impl From<GenericElement> for Markup {
    fn from(element: GenericElement) -> Self {
        Markup::Element(element)
    }
}

/// An element hosting a single text node
pub fn text_element(tag: &str, body: impl Into<String>) -> GenericElement {
    GenericElement {
        tag: tag.to_string(),
        attributes: Vec::new(),
        children: vec![Markup::Text(body.into())],
    }
}

/// An element hosting a sequence of children
pub fn parent_element(tag: &str, children: Vec<Markup>) -> GenericElement {
    GenericElement {
        tag: tag.to_string(),
        attributes: Vec::new(),
        children,
    }
}

/// Serialize a markup sequence to HTML
pub fn to_html(nodes: &[Markup]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_serialization() {
        let heading = text_element("h4", "focus")
            .attr("class", "method-name")
            .attr("id", "Window-focus");
        let section = parent_element("section", vec![heading.into(), Markup::text("")]);
        assert_eq!(
            to_html(&[section.into()]),
            r#"<section><h4 class="method-name" id="Window-focus">focus</h4></section>"#
        );
    }

    #[test]
    fn test_text_is_verbatim() {
        let dt = text_element("dt", r##"<a href="#Window">Window</a>&lt;T&gt;"##);
        assert_eq!(
            to_html(&[dt.into()]),
            r##"<dt><a href="#Window">Window</a>&lt;T&gt;</dt>"##
        );
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let element = GenericElement::new("section")
            .attr("id", "Window")
            .attr("class", "docs-title");
        assert_eq!(element.attribute("class"), Some("docs-title"));
        assert_eq!(to_html(&[element.into()]), r#"<section id="Window" class="docs-title"></section>"#);
    }
}
