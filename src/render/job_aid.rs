//! Job aid renderer: shared regions and a single access button

use super::sections::HeaderAction;
use super::{Renderer, RendererKind};
use crate::model::LearningObjectGraph;
use crate::widget::WidgetAction;

#[derive(Debug, Clone, Copy, Default)]
pub struct JobAidRenderer;

impl Renderer for JobAidRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::JobAid
    }

    fn primary_action(&self, root: &LearningObjectGraph) -> Option<HeaderAction> {
        Some(HeaderAction::new(
            "Access Job Aid",
            WidgetAction::AccessJobAid { id: root.id.clone() },
        ))
    }
}
