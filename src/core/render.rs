//! Declarative page rendering.
//!
//! Builders return an immutable [`Node`] tree; nothing is mutated in place.
//! The tree is serialized with [`Node::to_html`].

use crate::domain::model::{ImageSet, Restaurant};

const VOID_ELEMENTS: &[&str] = &["img", "source", "meta", "link", "br", "input"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&element.text_content()),
            }
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

pub fn option(value: &str, label: &str, selected: bool) -> Node {
    let element = Element::new("option").attr("value", value);
    let element = if selected {
        element.attr("selected", "selected")
    } else {
        element
    };
    element.text(label).into()
}

/// Builds the list item for one restaurant.
///
/// The picture block is only emitted when the restaurant has a photograph;
/// its caption is tied to the picture through `fig_<id>`.
pub fn restaurant_item(restaurant: &Restaurant, images: &ImageSet, details_url: &str) -> Node {
    let mut item = Element::new("li");

    if restaurant.photograph.is_some() {
        let caption_id = format!("fig_{}", restaurant.id);
        let picture = Element::new("picture")
            .attr("class", "restaurant-img")
            .attr("aria-labelledby", caption_id.clone())
            .attr("role", "img")
            .child(
                Element::new("source")
                    .attr("media", "(max-width:700px)")
                    .attr("srcset", srcset(&images.small_1x, &images.small_2x)),
            )
            .child(
                Element::new("source")
                    .attr("media", "(min-width:701px)")
                    .attr("srcset", srcset(&images.large_1x, &images.large_2x)),
            )
            .child(
                Element::new("img")
                    .attr("src", images.small_2x.clone())
                    .attr(
                        "alt",
                        format!("restaurant {}, {}", restaurant.name, restaurant.alt),
                    )
                    .attr("class", "restaurant-img"),
            )
            .child(
                Element::new("figcaption")
                    .attr("id", caption_id)
                    .text(restaurant.caption.clone()),
            );
        item = item.child(picture);
    }

    item.child(Element::new("h1").text(restaurant.name.clone()))
        .child(Element::new("p").text(restaurant.neighborhood.clone()))
        .child(Element::new("p").text(restaurant.address.clone()))
        .child(
            Element::new("a")
                .attr("role", "button")
                .attr("aria-label", format!("View more about {}", restaurant.name))
                .attr("href", details_url)
                .text("View Details"),
        )
        .into()
}

fn srcset(one_x: &str, two_x: &str) -> String {
    format!("{} 1x,{} 2x", one_x, two_x)
}
