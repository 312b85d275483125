//! Shared region population
//!
//! Every renderer variant goes through these functions for the skeleton and the
//! common regions (header actions, rating, meta, tags, overview). Variants only
//! decide the primary header action and what goes into the children region.

use serde_json::Value;

use crate::dom::{Element, EventKind};
use crate::model::{display_name, value_id, LearningObjectGraph, Rating};
use crate::widget::WidgetAction;

/// Attribute carrying the learning object id on cards and toggle buttons
pub const LO_ID_ATTR: &str = "data-lo-id";

/// Class names forming the rendered markup contract
pub mod classes {
    pub const ROOT: &str = "learning-object";
    pub const ACTIVE: &str = "active";
    pub const BOOKMARKED: &str = "bookmarked";
    pub const PRIMARY_BUTTON: &str = "btn-enroll-header";
    pub const WISHLIST_BUTTON: &str = "btn-wishlist-header";
    pub const BOOKMARK_BUTTON: &str = "btn-bookmark-header";
    pub const SECTION_TAB: &str = "section-tab";
    pub const SECTION_SLIDE: &str = "section-slide";
    pub const SLIDER: &str = "courses-slider";
    pub const CARD: &str = "course-slide";
    pub const PREV_BUTTON: &str = "prev-btn";
    pub const NEXT_BUTTON: &str = "next-btn";
    pub const LOADING: &str = "lo-loading";
    pub const ERROR: &str = "lo-error";
}

/// Addressable regions of the skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Title,
    Description,
    HeaderActions,
    Rating,
    Meta,
    Tags,
    Overview,
    Children,
}

impl Region {
    pub fn attr(&self) -> &'static str {
        match self {
            Region::Title => "data-title",
            Region::Description => "data-description",
            Region::HeaderActions => "data-header-actions",
            Region::Rating => "data-rating",
            Region::Meta => "data-meta",
            Region::Tags => "data-tags",
            Region::Overview => "data-overview",
            Region::Children => "data-children",
        }
    }

    fn element(&self, tag: &str, class: &str) -> Element {
        Element::new(tag).class(class).attr(self.attr(), "")
    }
}

/// Look up a region in a rendered page
pub fn region_mut(page: &mut Element, region: Region) -> Option<&mut Element> {
    page.find_mut(|e| e.has_attr(region.attr()))
}

pub fn region(page: &Element, region: Region) -> Option<&Element> {
    page.find(|e| e.has_attr(region.attr()))
}

/// Button bound into the header next to the toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAction {
    pub label: String,
    pub action: WidgetAction,
}

impl HeaderAction {
    pub fn new(label: &str, action: WidgetAction) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }
}

// ============================================================================
// Skeleton and state views
// ============================================================================

/// Empty page skeleton for a root object
pub fn skeleton(root: &LearningObjectGraph) -> Element {
    Element::new("div")
        .class(classes::ROOT)
        .class(&format!("lo-{}", root.lo_type.path_prefix().to_ascii_lowercase()))
        .attr(LO_ID_ATTR, root.id.as_str())
        .child(
            Element::new("header")
                .class("lo-header")
                .child(Element::new("div").class("lo-image"))
                .child(
                    Element::new("div")
                        .class("lo-heading")
                        .child(Element::new("span").class("lo-type-badge"))
                        .child(Region::Title.element("h1", "lo-title"))
                        .child(Region::Description.element("p", "lo-description"))
                        .child(Region::Rating.element("div", "lo-rating"))
                        .child(Region::Meta.element("div", "lo-meta")),
                )
                .child(Region::HeaderActions.element("div", "lo-header-actions")),
        )
        .child(Region::Tags.element("div", "lo-tags"))
        .child(Region::Overview.element("section", "lo-overview"))
        .child(Region::Children.element("section", "lo-children"))
}

pub fn loading_view(message: &str) -> Element {
    Element::new("div")
        .class(classes::LOADING)
        .attr("role", "status")
        .child(Element::new("div").class("spinner"))
        .child(Element::new("p").class("loading-message").text(message))
}

pub fn error_view(message: &str) -> Element {
    Element::new("div")
        .class(classes::ERROR)
        .attr("role", "alert")
        .child(Element::new("h3").text("Unable to load learning object"))
        .child(Element::new("p").class("error-message").text(message))
}

// ============================================================================
// Common regions
// ============================================================================

/// Populate everything except the children region
pub fn populate_common(page: &mut Element, root: &LearningObjectGraph, primary: Option<HeaderAction>) {
    populate_main(page, root);
    populate_rating(page, root.attributes.rating.as_ref());
    populate_meta(page, root);
    populate_tags(page, &root.attributes.tags);
    populate_header_actions(page, root, primary);
    populate_overview(page, root);
}

pub fn populate_main(page: &mut Element, root: &LearningObjectGraph) {
    if let Some(title) = region_mut(page, Region::Title) {
        title.set_text(root.title());
    }
    if let Some(desc) = region_mut(page, Region::Description) {
        desc.set_text(root.attributes.description().unwrap_or_default());
    }
    if let Some(badge) = page.find_mut(|e| e.has_class("lo-type-badge")) {
        badge.set_text(root.lo_type.label());
    }
    if let Some(url) = root.attributes.image_url.as_deref() {
        if let Some(image) = page.find_mut(|e| e.has_class("lo-image")) {
            image.replace_children(
                Element::new("img")
                    .attr("src", url)
                    .attr("alt", root.title())
                    .attr("loading", "lazy"),
            );
        }
    }
}

pub fn populate_rating(page: &mut Element, rating: Option<&Rating>) {
    let Some(el) = region_mut(page, Region::Rating) else {
        return;
    };
    el.clear();
    match rating.filter(|r| r.ratings_count > 0) {
        Some(r) => {
            el.append(Element::new("span").class("stars").text(stars(r.average_rating)));
            el.append(
                Element::new("span")
                    .class("rating-value")
                    .text(format!("{:.1} ({} ratings)", r.average_rating, r.ratings_count)),
            );
        }
        None => el.append(Element::new("span").class("rating-empty").text("No ratings yet")),
    }
}

fn stars(average: f64) -> String {
    let full = average.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

pub fn populate_meta(page: &mut Element, root: &LearningObjectGraph) {
    let Some(el) = region_mut(page, Region::Meta) else {
        return;
    };
    el.clear();

    let attrs = &root.attributes;
    if let Some(duration) = attrs.duration.and_then(format_duration) {
        el.append(meta_item("Duration", &duration));
    }
    if !attrs.skills.is_empty() {
        el.append(meta_item("Skills", &attrs.skills.join(", ")));
    }
    if !attrs.author_names.is_empty() {
        el.append(meta_item("Authors", &attrs.author_names.join(", ")));
    }
    if let Some(kind) = attrs.enrollment_type.as_deref() {
        el.append(meta_item("Enrollment", kind));
    }
    if let Some(state) = root.enrollment_state() {
        el.append(meta_item("Status", state));
    }
}

fn meta_item(label: &str, value: &str) -> Element {
    Element::new("div")
        .class("meta-item")
        .child(Element::new("span").class("meta-label").text(label))
        .child(Element::new("span").class("meta-value").text(value))
}

/// `5400.0` → `"1h 30m"`; zero or negative durations are not shown
pub fn format_duration(seconds: f64) -> Option<String> {
    if seconds.is_nan() || seconds <= 0.0 {
        return None;
    }
    let minutes = (seconds / 60.0).round() as u64;
    let (h, m) = (minutes / 60, minutes % 60);
    Some(match (h, m) {
        (0, 0) => "< 1m".to_string(),
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    })
}

pub fn populate_tags(page: &mut Element, tags: &[String]) {
    let Some(el) = region_mut(page, Region::Tags) else {
        return;
    };
    el.clear();
    for tag in tags {
        el.append(Element::new("span").class("tag").text(tag.as_str()));
    }
}

pub fn populate_overview(page: &mut Element, root: &LearningObjectGraph) {
    let Some(el) = region_mut(page, Region::Overview) else {
        return;
    };
    let text = root
        .attributes
        .overview()
        .or_else(|| root.attributes.description())
        .unwrap_or("No overview available.");
    el.clear();
    el.append(Element::new("h2").text("Overview"));
    el.append(Element::new("p").class("overview-text").text(text));
}

pub fn populate_header_actions(page: &mut Element, root: &LearningObjectGraph, primary: Option<HeaderAction>) {
    let Some(el) = region_mut(page, Region::HeaderActions) else {
        return;
    };
    let mut actions = Element::new("div").class("header-actions-container");
    if let Some(primary) = primary {
        actions.append(
            Element::new("button")
                .class(classes::PRIMARY_BUTTON)
                .attr("title", primary.label.as_str())
                .attr("aria-label", primary.label.as_str())
                .text(primary.label.as_str())
                .on_click(primary.action),
        );
    }
    actions.append(wishlist_button(&root.id, root.is_bookmarked()));
    actions.append(bookmark_button(&root.id, root.is_bookmarked()));
    el.replace_children(actions);
}

// ============================================================================
// Toggles
// ============================================================================

pub fn wishlist_button(id: &str, wishlisted: bool) -> Element {
    let mut button = Element::new("button")
        .class(classes::WISHLIST_BUTTON)
        .attr(LO_ID_ATTR, id);
    apply_wishlist_state(&mut button, id, wishlisted);
    button
}

pub fn bookmark_button(id: &str, bookmarked: bool) -> Element {
    let mut button = Element::new("button")
        .class(classes::BOOKMARK_BUTTON)
        .attr(LO_ID_ATTR, id);
    apply_bookmark_state(&mut button, id, bookmarked);
    button
}

/// Set class, label and next-click binding of a wishlist button
pub fn apply_wishlist_state(button: &mut Element, id: &str, wishlisted: bool) {
    set_class(button, classes::BOOKMARKED, wishlisted);
    button.set_text(if wishlisted {
        "Remove from Wishlist"
    } else {
        "Add to Wishlist"
    });
    button.bind(
        EventKind::Click,
        WidgetAction::ToggleWishlist {
            id: id.to_string(),
            wishlisted,
        },
    );
}

/// Set class, icon, title, aria-label and next-click binding of a bookmark button
pub fn apply_bookmark_state(button: &mut Element, id: &str, bookmarked: bool) {
    let label = if bookmarked {
        "Remove from bookmarks"
    } else {
        "Add to bookmarks"
    };
    set_class(button, classes::BOOKMARKED, bookmarked);
    button.set_attr("title", label);
    button.set_attr("aria-label", label);
    button.replace_children(bookmark_icon(bookmarked));
    button.bind(
        EventKind::Click,
        WidgetAction::ToggleBookmark {
            id: id.to_string(),
            bookmarked,
        },
    );
}

fn set_class(el: &mut Element, class: &str, on: bool) {
    if on {
        el.add_class(class);
    } else {
        el.remove_class(class);
    }
}

fn bookmark_icon(filled: bool) -> Element {
    let svg = Element::new("svg")
        .attr("width", "20")
        .attr("height", "20")
        .attr("viewBox", "0 0 24 24");
    if filled {
        svg.attr("fill", "currentColor")
            .child(Element::new("path").attr("d", "M17 3H7c-1.1 0-2 .9-2 2v16l7-3 7 3V5c0-1.1-.9-2-2-2z"))
    } else {
        svg.attr("fill", "none")
            .attr("stroke", "currentColor")
            .attr("stroke-width", "2")
            .child(Element::new("path").attr("d", "M19 21l-7-5-7 5V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2z"))
    }
}

// ============================================================================
// Children building blocks
// ============================================================================

/// One tab + slider pair
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub title: String,
    pub cards: Vec<Element>,
}

/// Tabbed sections, each with a horizontally paged slider. Section 0 starts active.
pub fn slider_section(sections: Vec<SectionSpec>) -> Element {
    let mut tabs = Element::new("div").class("section-tabs").attr("role", "tablist");
    let mut slides = Element::new("div").class("section-slides");

    for (index, section) in sections.into_iter().enumerate() {
        let active = index == 0;
        let mut tab = Element::new("button")
            .class(classes::SECTION_TAB)
            .attr("data-section", index.to_string())
            .attr("role", "tab")
            .text(format!("{} ({})", section.title, section.cards.len()))
            .on_click(WidgetAction::SwitchSection { index });
        let mut slide = Element::new("div")
            .class(classes::SECTION_SLIDE)
            .attr("data-section", index.to_string())
            .child(
                Element::new("div")
                    .class("slider-container")
                    .child(
                        Element::new("button")
                            .class("slider-btn")
                            .class(classes::PREV_BUTTON)
                            .attr("aria-label", "Previous")
                            .text("‹")
                            .on_click(WidgetAction::SlideLeft { index }),
                    )
                    .child(
                        Element::new("div")
                            .class(classes::SLIDER)
                            .id(format!("slider-{}", index))
                            .children(section.cards)
                            .on(EventKind::Scroll, WidgetAction::SliderScrolled { index }),
                    )
                    .child(
                        Element::new("button")
                            .class("slider-btn")
                            .class(classes::NEXT_BUTTON)
                            .attr("aria-label", "Next")
                            .text("›")
                            .on_click(WidgetAction::SlideRight { index }),
                    ),
            );
        if active {
            tab.add_class(classes::ACTIVE);
            slide.add_class(classes::ACTIVE);
        }
        tabs.append(tab);
        slides.append(slide);
    }

    Element::new("div")
        .class("program-sections")
        .child(tabs)
        .child(slides)
}

/// Slider card for a child object
pub fn child_card(child: &LearningObjectGraph) -> Element {
    let mut card = Element::new("div")
        .class(classes::CARD)
        .attr(LO_ID_ATTR, child.id.as_str())
        .child(Element::new("span").class("card-type").text(child.lo_type.label()))
        .child(Element::new("h3").class("card-title").text(child.title()));
    if let Some(duration) = child.attributes.duration.and_then(format_duration) {
        card.append(Element::new("span").class("card-duration").text(duration));
    }
    if let Some(r) = child.attributes.rating.as_ref().filter(|r| r.ratings_count > 0) {
        card.append(Element::new("span").class("card-rating").text(format!("{:.1}", r.average_rating)));
    }
    card.append(
        Element::new("button")
            .class("btn-view-details")
            .text("View Details")
            .on_click(WidgetAction::ViewCourseDetails { id: child.id.clone() }),
    );
    card
}

/// Titled list section
pub fn list_section(class: &str, heading: &str, items: Vec<Element>) -> Element {
    Element::new("div")
        .class(class)
        .child(Element::new("h2").text(heading))
        .child(Element::new("ul").class("lo-list").children(items))
}

/// List item with a label and one action button
pub fn action_item(class: &str, id: &str, label: &str, detail: Option<&str>, button: &str, action: WidgetAction) -> Element {
    let mut item = Element::new("li")
        .class(class)
        .attr(LO_ID_ATTR, id)
        .child(Element::new("span").class("item-title").text(label));
    if let Some(detail) = detail {
        item.append(Element::new("span").class("item-detail").text(detail));
    }
    item.child(Element::new("button").class("item-action").text(button).on_click(action))
}

/// Item for a pass-through resource value
pub fn value_item(class: &str, value: &Value, button: &str, action: impl FnOnce(String) -> WidgetAction) -> Element {
    let id = value_id(value);
    let detail = value
        .pointer("/attributes/resourceType")
        .or_else(|| value.pointer("/attributes/loType"))
        .and_then(Value::as_str);
    action_item(class, &id, &display_name(value), detail, button, action(id.clone()))
}
