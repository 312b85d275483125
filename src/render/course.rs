//! Course renderer
//!
//! Header binds `enroll`, or `start` on the first module once the learner is
//! enrolled. Children region lists module resources, then any sub-objects.

use super::sections::{self, HeaderAction, Region};
use super::{Renderer, RendererKind};
use crate::dom::Element;
use crate::model::{value_id, LearningObjectGraph};
use crate::widget::WidgetAction;

#[derive(Debug, Clone, Copy, Default)]
pub struct CourseRenderer;

impl Renderer for CourseRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Course
    }

    fn primary_action(&self, root: &LearningObjectGraph) -> Option<HeaderAction> {
        let first_module = root.resources.first().map(value_id).filter(|id| !id.is_empty());
        match (root.enrollment_state(), first_module) {
            (Some(_), Some(module)) => Some(HeaderAction::new("Start", WidgetAction::StartModule { id: module })),
            _ => Some(HeaderAction::new(
                "Enroll",
                WidgetAction::EnrollInCourse { id: root.id.clone() },
            )),
        }
    }

    fn populate_children(&self, page: &mut Element, root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        let Some(region) = sections::region_mut(page, Region::Children) else {
            return;
        };
        region.clear();

        if root.resources.is_empty() {
            region.append(Element::new("p").class("lo-empty").text("No modules available."));
        } else {
            let modules = root
                .resources
                .iter()
                .map(|r| sections::value_item("module-item", r, "Start", |id| WidgetAction::StartModule { id }))
                .collect();
            region.append(sections::list_section("lo-modules", "Modules", modules));
        }

        if !children.is_empty() {
            let items = children
                .iter()
                .map(|c| {
                    sections::action_item(
                        "child-item",
                        &c.id,
                        c.title(),
                        Some(c.lo_type.label()),
                        "View",
                        WidgetAction::ViewCourse { id: c.id.clone() },
                    )
                })
                .collect();
            region.append(sections::list_section("lo-child-list", "Related", items));
        }
    }
}
