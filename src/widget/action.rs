//! Actions bound to rendered elements
//!
//! Each variant replaces one page-global callback. Bindings serialise into the
//! HTML as `data-on-click='{"action":"toggleBookmark",...}'` so a browser host
//! can route events back to [`WidgetController::dispatch`](super::WidgetController::dispatch).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum WidgetAction {
    EnrollInProgram { id: String },
    EnrollInCourse { id: String },
    EnrollInCertification { id: String },
    AccessJobAid { id: String },
    StartModule { id: String },
    ViewRequirement { id: String },
    /// `wishlisted` is the state before the click
    ToggleWishlist { id: String, wishlisted: bool },
    /// `bookmarked` is the state before the click
    ToggleBookmark { id: String, bookmarked: bool },
    ViewCourseDetails { id: String },
    ViewCourse { id: String },
    SwitchSection { index: usize },
    SlideLeft { index: usize },
    SlideRight { index: usize },
    /// Scroll listener on a slider
    SliderScrolled { index: usize },
}

impl WidgetAction {
    /// Callback name as exposed to markup
    pub fn name(&self) -> &'static str {
        match self {
            WidgetAction::EnrollInProgram { .. } => "enrollInProgram",
            WidgetAction::EnrollInCourse { .. } => "enrollInCourse",
            WidgetAction::EnrollInCertification { .. } => "enrollInCertification",
            WidgetAction::AccessJobAid { .. } => "accessJobAid",
            WidgetAction::StartModule { .. } => "startModule",
            WidgetAction::ViewRequirement { .. } => "viewRequirement",
            WidgetAction::ToggleWishlist { .. } => "toggleWishlist",
            WidgetAction::ToggleBookmark { .. } => "toggleBookmark",
            WidgetAction::ViewCourseDetails { .. } => "viewCourseDetails",
            WidgetAction::ViewCourse { .. } => "viewCourse",
            WidgetAction::SwitchSection { .. } => "switchSection",
            WidgetAction::SlideLeft { .. } => "slideLeft",
            WidgetAction::SlideRight { .. } => "slideRight",
            WidgetAction::SliderScrolled { .. } => "sliderScrolled",
        }
    }

    /// Stub message for actions that would call out to the platform.
    /// Toggles and slider actions are handled locally and return `None`.
    pub fn stub_message(&self) -> Option<String> {
        let msg = match self {
            WidgetAction::EnrollInProgram { id } => {
                format!("Enrollment initiated for learning program: {}", id)
            }
            WidgetAction::EnrollInCourse { id } => format!("Enrollment initiated for course: {}", id),
            WidgetAction::EnrollInCertification { id } => {
                format!("Certification enrollment initiated: {}", id)
            }
            WidgetAction::AccessJobAid { id } => format!("Accessing job aid: {}", id),
            WidgetAction::StartModule { id } => format!("Starting module: {}", id),
            WidgetAction::ViewRequirement { id } => format!("Viewing requirement: {}", id),
            WidgetAction::ViewCourseDetails { id } => format!("Viewing course details for: {}", id),
            WidgetAction::ViewCourse { id } => format!("Viewing course: {}", id),
            _ => return None,
        };
        Some(msg)
    }
}
