//! Base renderer: every shared region, children as a flat list

use super::sections::{self, Region};
use super::{Renderer, RendererKind};
use crate::dom::Element;
use crate::model::LearningObjectGraph;
use crate::widget::WidgetAction;

#[derive(Debug, Clone, Copy, Default)]
pub struct BaseRenderer;

impl Renderer for BaseRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Base
    }

    fn populate_children(&self, page: &mut Element, _root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        if children.is_empty() {
            return;
        }
        let Some(region) = sections::region_mut(page, Region::Children) else {
            return;
        };
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
        region.replace_children(sections::list_section("lo-child-list", "Contents", items));
    }
}
