//! Learning program renderer
//!
//! Children are grouped by their declared type, in order of first appearance,
//! and each group becomes one tab + slider section.

use super::sections::{self, HeaderAction, Region, SectionSpec};
use super::{Renderer, RendererKind};
use crate::dom::Element;
use crate::model::{LearningObjectGraph, LoType};
use crate::widget::WidgetAction;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramRenderer;

/// Group children by type, preserving first-appearance order of types and
/// original order within each group
pub fn group_by_type(children: &[LearningObjectGraph]) -> Vec<(LoType, Vec<&LearningObjectGraph>)> {
    let mut groups: Vec<(LoType, Vec<&LearningObjectGraph>)> = Vec::new();
    for child in children {
        match groups.iter_mut().find(|(t, _)| *t == child.lo_type) {
            Some((_, members)) => members.push(child),
            None => groups.push((child.lo_type, vec![child])),
        }
    }
    groups
}

impl Renderer for ProgramRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Program
    }

    fn primary_action(&self, root: &LearningObjectGraph) -> Option<HeaderAction> {
        Some(HeaderAction::new(
            "Enroll",
            WidgetAction::EnrollInProgram { id: root.id.clone() },
        ))
    }

    fn populate_children(&self, page: &mut Element, _root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        let Some(region) = sections::region_mut(page, Region::Children) else {
            return;
        };
        if children.is_empty() {
            region.replace_children(
                Element::new("p")
                    .class("lo-empty")
                    .text("No courses available in this program."),
            );
            return;
        }

        let specs = group_by_type(children)
            .into_iter()
            .map(|(lo_type, members)| SectionSpec {
                title: lo_type.plural_label().to_string(),
                cards: members.into_iter().map(sections::child_card).collect(),
            })
            .collect();
        region.replace_children(sections::slider_section(specs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::EventKind;
    use crate::render::sections::{classes, region};
    use crate::render::test_support::graph;

    fn children() -> Vec<LearningObjectGraph> {
        vec![
            graph("course:1", LoType::Course, "C1"),
            graph("jobAid:5", LoType::JobAid, "J1"),
            graph("course:2", LoType::Course, "C2"),
        ]
    }

    #[test]
    fn test_group_by_type_keeps_order() {
        let kids = children();
        let groups = group_by_type(&kids);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, LoType::Course);
        let ids: Vec<&str> = groups[0].1.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["course:1", "course:2"]);
        assert_eq!(groups[1].0, LoType::JobAid);
    }

    #[test]
    fn test_program_renders_sections_and_enroll() {
        let root = graph("learningProgram:9", LoType::Program, "Onboarding");
        let mut container = Element::new("div");
        ProgramRenderer.render(&mut container, &root, &children());

        let tabs = container.find_all(|e| e.has_class(classes::SECTION_TAB));
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].text_content(), "Courses (2)");
        assert_eq!(tabs[1].text_content(), "Job Aids (1)");

        let slider = container.by_id("slider-0").unwrap();
        assert_eq!(slider.find_all(|e| e.has_class(classes::CARD)).len(), 2);

        let enroll = container.find(|e| e.has_class(classes::PRIMARY_BUTTON)).unwrap();
        assert_eq!(
            enroll.action_for(EventKind::Click),
            Some(&WidgetAction::EnrollInProgram {
                id: "learningProgram:9".into()
            })
        );
    }

    #[test]
    fn test_program_without_children_shows_empty_note() {
        let root = graph("learningProgram:9", LoType::Program, "Onboarding");
        let mut container = Element::new("div");
        ProgramRenderer.render(&mut container, &root, &[]);
        let region = region(&container, Region::Children).unwrap();
        assert!(region.text_content().contains("No courses"));
        assert!(container.find(|e| e.has_class(classes::SECTION_TAB)).is_none());
    }
}
