//! Certification renderer: requirement list and prerequisite list

use super::sections::{self, HeaderAction, Region};
use super::{Renderer, RendererKind};
use crate::dom::Element;
use crate::model::LearningObjectGraph;
use crate::widget::WidgetAction;

#[derive(Debug, Clone, Copy, Default)]
pub struct CertificationRenderer;

impl Renderer for CertificationRenderer {
    fn kind(&self) -> RendererKind {
        RendererKind::Certification
    }

    fn primary_action(&self, root: &LearningObjectGraph) -> Option<HeaderAction> {
        Some(HeaderAction::new(
            "Enroll",
            WidgetAction::EnrollInCertification { id: root.id.clone() },
        ))
    }

    fn populate_children(&self, page: &mut Element, root: &LearningObjectGraph, children: &[LearningObjectGraph]) {
        let Some(region) = sections::region_mut(page, Region::Children) else {
            return;
        };
        region.clear();

        let requirements: Vec<Element> = children
            .iter()
            .map(|c| {
                sections::action_item(
                    "requirement-item",
                    &c.id,
                    c.title(),
                    Some(c.lo_type.label()),
                    "View",
                    WidgetAction::ViewRequirement { id: c.id.clone() },
                )
            })
            .collect();
        if requirements.is_empty() {
            region.append(Element::new("p").class("lo-empty").text("No requirements listed."));
        } else {
            region.append(sections::list_section("lo-requirements", "Requirements", requirements));
        }

        if !root.prerequisite_los.is_empty() {
            let prerequisites = root
                .prerequisite_los
                .iter()
                .map(|p| sections::value_item("prerequisite-item", p, "View", |id| WidgetAction::ViewCourse { id }))
                .collect();
            region.append(sections::list_section("lo-prerequisites", "Prerequisites", prerequisites));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::EventKind;
    use crate::model::LoType;
    use crate::render::sections::classes;
    use crate::render::test_support::graph;
    use serde_json::json;

    #[test]
    fn test_certification_requirements_and_prerequisites() {
        let mut root = graph("certification:3", LoType::Certification, "Rustacean");
        root.prerequisite_los = vec![json!({
            "id": "course:100",
            "type": "learningObject",
            "attributes": { "loType": "course", "localizedMetadata": [ { "name": "Basics" } ] }
        })];
        let children = vec![
            graph("course:1", LoType::Course, "Traits"),
            graph("course:2", LoType::Course, "Lifetimes"),
        ];

        let mut container = Element::new("div");
        CertificationRenderer.render(&mut container, &root, &children);

        let reqs = container.find_all(|e| e.has_class("requirement-item"));
        assert_eq!(reqs.len(), 2);
        let view = reqs[1].find(|e| e.has_class("item-action")).unwrap();
        assert_eq!(
            view.action_for(EventKind::Click),
            Some(&WidgetAction::ViewRequirement { id: "course:2".into() })
        );

        let prereq = container.find(|e| e.has_class("prerequisite-item")).unwrap();
        assert!(prereq.text_content().starts_with("Basics"));

        let enroll = container.find(|e| e.has_class(classes::PRIMARY_BUTTON)).unwrap();
        assert_eq!(
            enroll.action_for(EventKind::Click),
            Some(&WidgetAction::EnrollInCertification {
                id: "certification:3".into()
            })
        );
    }

    #[test]
    fn test_certification_without_children() {
        let root = graph("certification:3", LoType::Certification, "Rustacean");
        let mut container = Element::new("div");
        CertificationRenderer.render(&mut container, &root, &[]);
        assert!(container.text_content().contains("No requirements listed."));
        assert!(container.find(|e| e.has_class("lo-prerequisites")).is_none());
    }
}
