use crate::core::render::{self, Element, Node};
use crate::domain::model::{FilterSelection, MapOptions, ALL};

pub const NEIGHBORHOODS_SELECT_ID: &str = "neighborhoods-select";
pub const CUISINES_SELECT_ID: &str = "cuisines-select";
pub const MAP_ELEMENT_ID: &str = "map";
pub const RESTAURANTS_LIST_ID: &str = "restaurants-list";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// A `<select>` element: its options and which one is selected.
#[derive(Debug, Clone)]
pub struct SelectWidget {
    id: String,
    options: Vec<SelectOption>,
    selected_index: usize,
}

impl SelectWidget {
    pub fn new(id: &str, default_label: &str) -> Self {
        Self {
            id: id.to_string(),
            options: vec![SelectOption {
                value: ALL.to_string(),
                label: default_label.to_string(),
            }],
            selected_index: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Appends one option per name, in order. Names are not de-duplicated.
    pub fn fill(&mut self, names: &[String]) {
        self.options.extend(names.iter().map(|name| SelectOption {
            value: name.clone(),
            label: name.clone(),
        }));
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_value(&self) -> &str {
        &self.options[self.selected_index].value
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected_index = index;
            true
        } else {
            false
        }
    }

    /// Selects the first option with this value. Returns false when absent.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|opt| opt.value == value) {
            Some(index) => {
                self.selected_index = index;
                true
            }
            None => false,
        }
    }

    pub fn render(&self) -> Node {
        Element::new("select")
            .attr("id", self.id.clone())
            .children(self.options.iter().enumerate().map(|(index, opt)| {
                render::option(&opt.value, &opt.label, index == self.selected_index)
            }))
            .into()
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub neighborhoods: SelectWidget,
    pub cuisines: SelectWidget,
    pub restaurants_list: Vec<Node>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            neighborhoods: SelectWidget::new(NEIGHBORHOODS_SELECT_ID, "All Neighborhoods"),
            cuisines: SelectWidget::new(CUISINES_SELECT_ID, "All Cuisines"),
            restaurants_list: Vec::new(),
        }
    }

    pub fn selection(&self) -> FilterSelection {
        FilterSelection::new(
            self.cuisines.selected_value(),
            self.neighborhoods.selected_value(),
        )
    }

    pub fn render_document(&self, map: Option<&MapOptions>, marker_count: usize) -> String {
        let mut map_element = Element::new("div").attr("id", MAP_ELEMENT_ID);
        if let Some(options) = map {
            map_element = map_element
                .attr("data-zoom", options.zoom.to_string())
                .attr(
                    "data-center",
                    format!("{},{}", options.center.lat, options.center.lng),
                )
                .attr("data-scrollwheel", options.scrollwheel.to_string());
        }
        map_element = map_element.attr("data-markers", marker_count.to_string());

        let body = Element::new("body").child(
            Element::new("main")
                .child(
                    Element::new("section")
                        .attr("id", "map-container")
                        .child(map_element),
                )
                .child(
                    Element::new("section")
                        .child(
                            Element::new("div")
                                .attr("class", "filter-options")
                                .child(Element::new("h2").text("Filter Results"))
                                .child(self.neighborhoods.render())
                                .child(self.cuisines.render()),
                        )
                        .child(
                            Element::new("ul")
                                .attr("id", RESTAURANTS_LIST_ID)
                                .children(self.restaurants_list.iter().cloned()),
                        ),
                ),
        );

        let html: Node = Element::new("html")
            .attr("lang", "en")
            .child(
                Element::new("head")
                    .child(Element::new("meta").attr("charset", "utf-8"))
                    .child(Element::new("title").text("Restaurant Reviews")),
            )
            .child(body)
            .into();

        format!("<!DOCTYPE html>\n{}\n", html.to_html())
    }
}
