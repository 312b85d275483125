//! In-memory DOM fragment
//!
//! Renderers build [`Element`] trees; the widget controller queries and mutates
//! them; the host serialises them with [`Element::to_html`]. Layout metrics
//! (scroll offsets and widths) are host-supplied, the tree never computes layout.
//!
//! Event handlers are not closures. An element carries [`Binding`]s from an
//! event kind to a [`WidgetAction`], and the controller interprets them with the
//! container passed in explicitly.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::widget::WidgetAction;

/// Child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Host-supplied layout metrics, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
    pub offset_width: f64,
}

/// How the last programmatic scroll was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Scroll,
}

impl EventKind {
    fn attr_name(&self) -> &'static str {
        match self {
            EventKind::Click => "data-on-click",
            EventKind::Scroll => "data-on-scroll",
        }
    }
}

/// Event kind bound to an action
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub event: EventKind,
    pub action: WidgetAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
    bindings: Vec<Binding>,
    pub layout: Layout,
    pub last_scroll: Option<ScrollBehavior>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            bindings: Vec::new(),
            layout: Layout::default(),
            last_scroll: None,
        }
    }

    // ------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------

    /// Add one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        for c in classes.split_whitespace() {
            self.add_class(c);
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children.into_iter().map(Node::Element));
        self
    }

    pub fn on_click(self, action: WidgetAction) -> Self {
        self.on(EventKind::Click, action)
    }

    pub fn on(mut self, event: EventKind, action: WidgetAction) -> Self {
        self.bind(event, action);
        self
    }

    // ------------------------------------------------------------------
    // Accessors and mutators
    // ------------------------------------------------------------------

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Returns whether the class is present afterwards
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.set_attr("disabled", "");
        } else {
            self.remove_attr("disabled");
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Action bound to an event, if any
    pub fn action_for(&self, event: EventKind) -> Option<&WidgetAction> {
        self.bindings
            .iter()
            .find(|b| b.event == event)
            .map(|b| &b.action)
    }

    /// Bind an action, replacing any previous binding for the same event
    pub fn bind(&mut self, event: EventKind, action: WidgetAction) {
        self.bindings.retain(|b| b.event != event);
        self.bindings.push(Binding { event, action });
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace all content with a single element
    pub fn replace_children(&mut self, child: Element) {
        self.children.clear();
        self.children.push(Node::Element(child));
    }

    /// Replace all content with a text node
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Largest reachable `scroll_left`
    pub fn max_scroll(&self) -> f64 {
        (self.layout.scroll_width - self.layout.client_width).max(0.0)
    }

    pub fn set_scroll_left(&mut self, value: f64) {
        self.layout.scroll_left = value.clamp(0.0, self.max_scroll());
        self.last_scroll = Some(ScrollBehavior::Instant);
    }

    /// Scroll horizontally by `delta`, clamped to the scrollable range
    pub fn scroll_by(&mut self, delta: f64, behavior: ScrollBehavior) {
        self.layout.scroll_left = (self.layout.scroll_left + delta).clamp(0.0, self.max_scroll());
        self.last_scroll = Some(behavior);
    }

    // ------------------------------------------------------------------
    // Queries (descendants only, document order)
    // ------------------------------------------------------------------

    pub fn find(&self, pred: impl Fn(&Element) -> bool) -> Option<&Element> {
        self.find_dyn(&pred)
    }

    fn find_dyn(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        for el in self.child_elements() {
            if pred(el) {
                return Some(el);
            }
            if let Some(found) = el.find_dyn(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, pred: impl Fn(&Element) -> bool) -> Option<&mut Element> {
        self.find_mut_dyn(&pred)
    }

    fn find_mut_dyn(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        for node in self.children.iter_mut() {
            if let Node::Element(el) = node {
                if pred(el) {
                    return Some(el);
                }
                if let Some(found) = el.find_mut_dyn(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_all(&self, pred: impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.find_all_dyn(&pred, &mut out);
        out
    }

    fn find_all_dyn<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        for el in self.child_elements() {
            if pred(el) {
                out.push(el);
            }
            el.find_all_dyn(pred, out);
        }
    }

    /// Apply `f` to every matching descendant
    pub fn for_each_mut(&mut self, pred: impl Fn(&Element) -> bool, mut f: impl FnMut(&mut Element)) {
        self.for_each_mut_dyn(&pred, &mut f);
    }

    fn for_each_mut_dyn(&mut self, pred: &dyn Fn(&Element) -> bool, f: &mut dyn FnMut(&mut Element)) {
        for node in self.children.iter_mut() {
            if let Node::Element(el) = node {
                if pred(el) {
                    f(el);
                }
                el.for_each_mut_dyn(pred, f);
            }
        }
    }

    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.find(|e| e.get_id() == Some(id))
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.find_mut(|e| e.get_id() == Some(id))
    }

    /// Element whose direct children include the element with `id`, `self` included
    pub fn parent_of_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.child_elements().any(|c| c.get_id() == Some(id)) {
            return Some(self);
        }
        self.find_mut(|e| e.child_elements().any(|c| c.get_id() == Some(id)))
    }

    // ------------------------------------------------------------------
    // Serialisation
    // ------------------------------------------------------------------

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Indented HTML, one element per line. Elements holding only text stay inline.
    pub fn to_html_pretty(&self) -> String {
        let mut out = String::new();
        self.write_html_pretty(&mut out, 0);
        out
    }

    fn write_open_tag(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attributes {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(out, " {}=\"{}\"", name, escape(value));
            }
        }
        for binding in &self.bindings {
            let json = serde_json::to_string(&binding.action).unwrap_or_default();
            let _ = write!(out, " {}=\"{}\"", binding.event.attr_name(), escape(&json));
        }
        out.push('>');
    }

    fn write_html(&self, out: &mut String) {
        self.write_open_tag(out);
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(&escape(t)),
                Node::Element(e) => e.write_html(out),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    fn write_html_pretty(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        if self.child_elements().next().is_none() {
            self.write_html(out);
            out.push('\n');
            return;
        }
        self.write_open_tag(out);
        out.push('\n');
        for node in &self.children {
            match node {
                Node::Text(t) if t.trim().is_empty() => {}
                Node::Text(t) => {
                    let _ = writeln!(out, "{}  {}", indent, escape(t));
                }
                Node::Element(e) => e.write_html_pretty(out, depth + 1),
            }
        }
        let _ = writeln!(out, "{}</{}>", indent, self.tag);
    }
}

/// Escape text for HTML content and double-quoted attributes
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
