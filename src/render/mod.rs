//! Renderers
//!
//! One [`Renderer`] trait, one implementation per learning-object kind, and a
//! [`RendererKind`] tag that the registry hands out. Shared region population
//! lives in [`sections`]; variants override only the primary header action and
//! the children region.
//!
//! ```text
//! Program        enroll   tabbed sliders grouped by child type
//! Course         enroll   module list (start), sub-object list
//! Certification  enroll   requirement list, prerequisite list
//! JobAid         access   (no children region content)
//! Base           -        flat child list
//! ```

pub mod base;
pub mod certification;
pub mod course;
pub mod job_aid;
pub mod program;
pub mod registry;
pub mod sections;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;
use std::fmt;

use crate::dom::Element;
use crate::model::LearningObjectGraph;
use sections::HeaderAction;

pub use base::BaseRenderer;
pub use certification::CertificationRenderer;
pub use course::CourseRenderer;
pub use job_aid::JobAidRenderer;
pub use program::ProgramRenderer;
pub use registry::{select, supported_types};

/// Rendering capability shared by all variants
pub trait Renderer: Send + Sync {
    fn kind(&self) -> RendererKind;

    /// Primary header button, if the variant binds one
    fn primary_action(&self, _root: &LearningObjectGraph) -> Option<HeaderAction> {
        None
    }

    /// Fill the children region of an already populated page
    fn populate_children(&self, _page: &mut Element, _root: &LearningObjectGraph, _children: &[LearningObjectGraph]) {}

    fn render_loading(&self, container: &mut Element, message: &str) {
        container.replace_children(sections::loading_view(message));
    }

    fn render_error(&self, container: &mut Element, message: &str) {
        container.replace_children(sections::error_view(message));
    }

    /// Replace the container's content with the rendered object
    fn render(&self, container: &mut Element, root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        let mut page = sections::skeleton(root);
        sections::populate_common(&mut page, root, self.primary_action(root));
        self.populate_children(&mut page, root, children);
        container.replace_children(page);
    }
}

/// Tag selecting a renderer implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RendererKind {
    Base,
    Program,
    Course,
    Certification,
    JobAid,
}

impl RendererKind {
    /// Implementation behind the tag
    pub fn handle(self) -> &'static dyn Renderer {
        match self {
            RendererKind::Base => &BaseRenderer,
            RendererKind::Program => &ProgramRenderer,
            RendererKind::Course => &CourseRenderer,
            RendererKind::Certification => &CertificationRenderer,
            RendererKind::JobAid => &JobAidRenderer,
        }
    }

    pub fn render_loading(self, container: &mut Element, message: &str) {
        self.handle().render_loading(container, message)
    }

    pub fn render_error(self, container: &mut Element, message: &str) {
        self.handle().render_error(container, message)
    }

    pub fn render(self, container: &mut Element, root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        self.handle().render(container, root, children)
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RendererKind::Base => "base",
            RendererKind::Program => "program",
            RendererKind::Course => "course",
            RendererKind::Certification => "certification",
            RendererKind::JobAid => "job_aid",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoType;
    use sections::{classes, region, Region};
    use test_support::graph;

    #[test]
    fn test_handles_report_their_kind() {
        for kind in [
            RendererKind::Base,
            RendererKind::Program,
            RendererKind::Course,
            RendererKind::Certification,
            RendererKind::JobAid,
        ] {
            assert_eq!(kind.handle().kind(), kind);
        }
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut container = Element::new("div").class("learning-program-container");
        RendererKind::Base.render_loading(&mut container, "Loading...");
        assert!(container.find(|e| e.has_class(classes::LOADING)).is_some());

        let root = graph("course:1", LoType::Course, "Intro");
        RendererKind::Course.render(&mut container, &root, &[]);
        RendererKind::Course.render(&mut container, &root, &[]);

        assert_eq!(container.child_elements().count(), 1);
        assert!(container.find(|e| e.has_class(classes::LOADING)).is_none());
        assert_eq!(region(&container, Region::Title).unwrap().text_content(), "Intro");
    }

    #[test]
    fn test_render_error_shows_message() {
        let mut container = Element::new("div");
        RendererKind::Program.render_error(&mut container, "Learning object not found.");
        let err = container.find(|e| e.has_class(classes::ERROR)).unwrap();
        assert!(err.text_content().contains("Learning object not found."));
    }
}
