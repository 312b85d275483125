//! Widget controller: section tabs, slider paging, bookmark and wishlist toggles
//!
//! ## Slider button rule
//!
//! ```text
//! prev.disabled = scroll_left <= 0
//! next.disabled = scroll_left >= (scroll_width - client_width) - tolerance
//! ```
//!
//! Buttons at an extreme are disabled, never hidden.

use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use super::WidgetAction;
use crate::config::PipelineConfig;
use crate::dom::{Element, EventKind, ScrollBehavior};
use crate::render::sections::{self, classes};

/// Stub notification raised in place of a platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub action: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    Left,
    Right,
}

/// Client-side state of one rendered widget
#[derive(Debug, Clone, Default)]
pub struct WidgetState {
    /// Render pass that produced the tree
    pub render_id: Uuid,
    /// Section indexes in document order
    pub sections: Vec<usize>,
    pub active_section: Option<usize>,
    bookmarks: HashMap<String, bool>,
    wishlist: HashMap<String, bool>,
}

impl WidgetState {
    pub fn is_bookmarked(&self, id: &str) -> Option<bool> {
        self.bookmarks.get(id).copied()
    }

    pub fn is_wishlisted(&self, id: &str) -> Option<bool> {
        self.wishlist.get(id).copied()
    }
}

/// Behaviour wiring for a rendered container
#[derive(Debug)]
pub struct WidgetController {
    state: WidgetState,
    slide_gap_px: f64,
    tolerance_px: f64,
    notifications: Vec<Notification>,
}

fn slider_id(index: usize) -> String {
    format!("slider-{}", index)
}

fn section_index(el: &Element) -> Option<usize> {
    el.get_attr("data-section").and_then(|v| v.parse().ok())
}

impl WidgetController {
    /// Scan the rendered tree, seed state from it and initialise slider buttons
    pub fn attach(container: &mut Element, config: &PipelineConfig, render_id: Uuid) -> Self {
        let mut state = WidgetState {
            render_id,
            ..Default::default()
        };

        for slide in container.find_all(|e| e.has_class(classes::SECTION_SLIDE)) {
            if let Some(index) = section_index(slide) {
                state.sections.push(index);
                if slide.has_class(classes::ACTIVE) && state.active_section.is_none() {
                    state.active_section = Some(index);
                }
            }
        }

        for button in container.find_all(|e| e.has_class(classes::BOOKMARK_BUTTON)) {
            if let Some(id) = button.get_attr(sections::LO_ID_ATTR) {
                state.bookmarks.insert(id.to_string(), button.has_class(classes::BOOKMARKED));
            }
        }
        for button in container.find_all(|e| e.has_class(classes::WISHLIST_BUTTON)) {
            if let Some(id) = button.get_attr(sections::LO_ID_ATTR) {
                state.wishlist.insert(id.to_string(), button.has_class(classes::BOOKMARKED));
            }
        }

        let controller = Self {
            state,
            slide_gap_px: config.slide_gap_px,
            tolerance_px: config.scroll_tolerance_px,
            notifications: Vec::new(),
        };

        let slider_indexes: Vec<usize> = container
            .find_all(|e| e.has_class(classes::SLIDER))
            .iter()
            .filter_map(|s| s.get_id().and_then(|id| id.strip_prefix("slider-")))
            .filter_map(|n| n.parse().ok())
            .collect();
        for index in slider_indexes {
            controller.update_slider_buttons(container, index);
        }

        debug!(
            render_id = %render_id,
            sections = controller.state.sections.len(),
            "widget attached"
        );
        controller
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Notifications raised so far, oldest first
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Fire the click binding of the element with `element_id`
    pub fn click(&mut self, container: &mut Element, element_id: &str) -> Option<Notification> {
        let action = container
            .by_id(element_id)
            .and_then(|e| e.action_for(EventKind::Click))
            .cloned()?;
        self.dispatch(container, &action)
    }

    /// Fire the click binding of the first element matching `pred`
    pub fn click_where(
        &mut self,
        container: &mut Element,
        pred: impl Fn(&Element) -> bool,
    ) -> Option<Notification> {
        let action = container
            .find(|e| pred(e) && e.action_for(EventKind::Click).is_some())
            .and_then(|e| e.action_for(EventKind::Click))
            .cloned()?;
        self.dispatch(container, &action)
    }

    /// Run an action against the container
    pub fn dispatch(&mut self, container: &mut Element, action: &WidgetAction) -> Option<Notification> {
        debug!(action = action.name(), "dispatch");
        let notification = match action {
            WidgetAction::SwitchSection { index } => {
                self.switch_section(container, *index);
                None
            }
            WidgetAction::SlideLeft { index } => {
                self.slide(container, *index, SlideDirection::Left);
                None
            }
            WidgetAction::SlideRight { index } => {
                self.slide(container, *index, SlideDirection::Right);
                None
            }
            WidgetAction::SliderScrolled { index } => {
                self.update_slider_buttons(container, *index);
                None
            }
            WidgetAction::ToggleBookmark { id, bookmarked } => {
                Some(self.toggle_bookmark(container, id, *bookmarked))
            }
            WidgetAction::ToggleWishlist { id, wishlisted } => {
                Some(self.toggle_wishlist(container, id, *wishlisted))
            }
            other => other.stub_message().map(|message| Notification {
                action: other.name(),
                message,
            }),
        };

        if let Some(n) = &notification {
            info!(action = n.action, "{}", n.message);
            self.notifications.push(n.clone());
        }
        notification
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    /// Activate one section and its tab, reset its slider to the start
    pub fn switch_section(&mut self, container: &mut Element, index: usize) {
        let wanted = index.to_string();
        let is_slide = |e: &Element| e.has_class(classes::SECTION_SLIDE);
        let is_tab = |e: &Element| e.has_class(classes::SECTION_TAB);

        container.for_each_mut(
            |e| is_slide(e) || is_tab(e),
            |e| {
                if e.get_attr("data-section") == Some(wanted.as_str()) {
                    e.add_class(classes::ACTIVE);
                } else {
                    e.remove_class(classes::ACTIVE);
                }
            },
        );

        if self.state.sections.contains(&index) {
            self.state.active_section = Some(index);
        }

        if let Some(slider) = container.by_id_mut(&slider_id(index)) {
            slider.set_scroll_left(0.0);
            self.update_slider_buttons(container, index);
        }
    }

    // ------------------------------------------------------------------
    // Sliders
    // ------------------------------------------------------------------

    /// Page a slider by one card width plus the gap
    pub fn slide(&mut self, container: &mut Element, index: usize, direction: SlideDirection) {
        let Some(slider) = container.by_id_mut(&slider_id(index)) else {
            return;
        };
        let Some(card_width) = slider
            .find(|e| e.has_class(classes::CARD))
            .map(|card| card.layout.offset_width)
        else {
            return;
        };

        let step = card_width + self.slide_gap_px;
        let delta = match direction {
            SlideDirection::Left => -step,
            SlideDirection::Right => step,
        };
        slider.scroll_by(delta, ScrollBehavior::Smooth);
        self.update_slider_buttons(container, index);
    }

    /// Recompute prev/next disabled state from the slider's scroll position
    pub fn update_slider_buttons(&self, container: &mut Element, index: usize) {
        let id = slider_id(index);
        let Some(slider) = container.by_id(&id) else {
            return;
        };
        let layout = slider.layout;
        let at_start = layout.scroll_left <= 0.0;
        let max_scroll = layout.scroll_width - layout.client_width;
        let at_end = layout.scroll_left >= max_scroll - self.tolerance_px;

        if let Some(parent) = container.parent_of_mut(&id) {
            parent.for_each_mut(
                |e| e.has_class(classes::PREV_BUTTON),
                |e| e.set_disabled(at_start),
            );
            parent.for_each_mut(
                |e| e.has_class(classes::NEXT_BUTTON),
                |e| e.set_disabled(at_end),
            );
        }
    }

    // ------------------------------------------------------------------
    // Toggles
    // ------------------------------------------------------------------

    fn toggle_bookmark(&mut self, container: &mut Element, id: &str, bookmarked: bool) -> Notification {
        let now = !bookmarked;
        container.for_each_mut(
            |e| e.has_class(classes::BOOKMARK_BUTTON) && e.get_attr(sections::LO_ID_ATTR) == Some(id),
            |button| sections::apply_bookmark_state(button, id, now),
        );
        self.state.bookmarks.insert(id.to_string(), now);

        Notification {
            action: "toggleBookmark",
            message: format!("Learning object {} bookmarks: {}", verb(now), id),
        }
    }

    fn toggle_wishlist(&mut self, container: &mut Element, id: &str, wishlisted: bool) -> Notification {
        let now = !wishlisted;
        container.for_each_mut(
            |e| e.has_class(classes::WISHLIST_BUTTON) && e.get_attr(sections::LO_ID_ATTR) == Some(id),
            |button| sections::apply_wishlist_state(button, id, now),
        );
        self.state.wishlist.insert(id.to_string(), now);

        Notification {
            action: "toggleWishlist",
            message: format!("Learning object {} wishlist: {}", verb(now), id),
        }
    }
}

fn verb(added: bool) -> &'static str {
    if added {
        "added to"
    } else {
        "removed from"
    }
}
