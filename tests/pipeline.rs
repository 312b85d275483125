//! End-to-end render passes against the in-process API

use std::collections::HashMap;

use lo_render::api::fixture::RequestKind;
use lo_render::api::FixtureApi;
use lo_render::dom::{Element, Layout};
use lo_render::render::sections::{classes, region, Region};
use lo_render::session::MemorySessionStore;
use lo_render::widget::WidgetAction;
use lo_render::{LoadError, LoType, Orchestrator, PipelineConfig, PipelineState, RendererKind};

const PROGRAM_FIXTURES: &str = include_str!("fixtures/program.json");

fn config() -> PipelineConfig {
    PipelineConfig::default().without_delays()
}

fn program_api() -> FixtureApi {
    FixtureApi::from_json_str(PROGRAM_FIXTURES).unwrap()
}

fn signed_in() -> MemorySessionStore {
    MemorySessionStore::with_token("alm_access_token", "bearer-abc")
}

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn error_text(container: &Element) -> String {
    container
        .find(|e| e.has_class(classes::ERROR))
        .and_then(|e| e.find(|m| m.has_class("error-message")))
        .map(|e| e.text_content())
        .unwrap_or_default()
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_missing_token_errors_without_network() {
    let api = program_api();
    let session = MemorySessionStore::new();
    let config = config();
    let mut container = Element::new("div");

    let outcome = Orchestrator::new(&api, &session, &config)
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;

    assert_eq!(outcome.error(), Some(&LoadError::Unauthenticated));
    assert_eq!(api.request_count(), 0);
    assert!(error_text(&container).contains("Please authenticate first using the OAuth block."));
    assert!(outcome.widget.is_none());
}

#[tokio::test]
async fn test_root_not_found_renders_message_and_skips_children() {
    let api = FixtureApi::new().with_status("course:404", 404);
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");

    let outcome = Orchestrator::new(&api, &session, &config)
        .load_location("/course/course:404", &HashMap::new(), &mut container)
        .await;

    assert_eq!(outcome.error(), Some(&LoadError::NotFound));
    assert!(error_text(&container).contains("Learning object not found."));
    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, RequestKind::Root);
    assert!(!outcome.transitions.iter().any(|s| matches!(s, PipelineState::LoadingChildren { .. })));
}

#[tokio::test]
async fn test_root_status_messages() {
    let cases = [
        (401, "Authentication failed. Please re-authenticate."),
        (403, "Access denied. Check your permissions."),
        (503, "API error: 503 Service Unavailable"),
    ];
    for (status, message) in cases {
        let api = FixtureApi::new().with_status("learningProgram:1", status);
        let session = signed_in();
        let config = config();
        let mut container = Element::new("div");

        let outcome = Orchestrator::new(&api, &session, &config)
            .load_location("/1", &HashMap::new(), &mut container)
            .await;

        assert!(matches!(outcome.state, PipelineState::Error(_)));
        assert_eq!(error_text(&container), message, "status {}", status);
    }
}

// ============================================================================
// Partial child failure
// ============================================================================

#[tokio::test]
async fn test_failed_child_is_dropped_and_order_kept() {
    let api = program_api();
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");

    let outcome = Orchestrator::new(&api, &session, &config)
        .load_location("/learning-program", &query(&[("programId", "155841")]), &mut container)
        .await;

    assert!(outcome.is_rendered());
    assert!(outcome.error().is_none());
    assert_eq!(outcome.renderer, RendererKind::Program);

    let graph = outcome.graph.as_ref().unwrap();
    let ids: Vec<&str> = graph.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["course:1", "jobAid:3"]);
    assert_eq!(graph.lo_type, LoType::Program);

    assert_eq!(outcome.skipped_children.len(), 1);
    assert!(matches!(
        &outcome.skipped_children[0],
        LoadError::ChildFetchFailed { id, .. } if id == "course:2"
    ));

    let child_requests: Vec<String> = api
        .requests()
        .into_iter()
        .filter(|r| r.kind == RequestKind::Child)
        .map(|r| r.id)
        .collect();
    assert_eq!(child_requests, vec!["course:1", "course:2", "jobAid:3"]);
    assert!(api.requests().iter().all(|r| r.token == "bearer-abc"));
}

// ============================================================================
// Rendered tree and widget
// ============================================================================

#[tokio::test]
async fn test_rendered_program_regions() {
    let api = program_api();
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");

    Orchestrator::new(&api, &session, &config)
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;

    let meta = region(&container, Region::Meta).unwrap().text_content();
    assert!(meta.contains("3h 30m"));
    assert!(meta.contains("Systems Programming"));
    assert!(meta.contains("Ferris"));

    let rating = region(&container, Region::Rating).unwrap().text_content();
    assert!(rating.contains("4.5 (12 ratings)"));

    let tabs = container.find_all(|e| e.has_class(classes::SECTION_TAB));
    let labels: Vec<String> = tabs.iter().map(|t| t.text_content()).collect();
    assert_eq!(labels, vec!["Courses (1)", "Job Aids (1)"]);

    let html = container.to_html();
    assert!(html.contains("Rust Onboarding"));
    assert!(html.contains("data-on-click"));
}

#[tokio::test]
async fn test_slider_paging_to_the_right_extreme() {
    let api = program_api();
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");

    let mut outcome = Orchestrator::new(&api, &session, &config)
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;
    let widget = outcome.widget.as_mut().unwrap();

    // host-supplied layout: one 300px card in a 200px viewport
    {
        let slider = container.by_id_mut("slider-0").unwrap();
        slider.layout = Layout {
            scroll_left: 0.0,
            scroll_width: 300.0,
            client_width: 200.0,
            offset_width: 200.0,
        };
        slider.for_each_mut(
            |e| e.has_class(classes::CARD),
            |card| card.layout.offset_width = 300.0,
        );
    }
    widget.dispatch(&mut container, &WidgetAction::SliderScrolled { index: 0 });

    let buttons = |c: &Element| {
        let prev = c.find(|e| e.has_class(classes::PREV_BUTTON)).unwrap().is_disabled();
        let next = c.find(|e| e.has_class(classes::NEXT_BUTTON)).unwrap().is_disabled();
        (prev, next)
    };
    assert_eq!(buttons(&container), (true, false));

    widget.dispatch(&mut container, &WidgetAction::SlideRight { index: 0 });
    assert_eq!(container.by_id("slider-0").unwrap().layout.scroll_left, 100.0);
    assert_eq!(buttons(&container), (false, true));

    // within one pixel of the extreme still counts as the end
    container.by_id_mut("slider-0").unwrap().set_scroll_left(99.5);
    widget.dispatch(&mut container, &WidgetAction::SliderScrolled { index: 0 });
    assert_eq!(buttons(&container), (false, true));
}

#[tokio::test]
async fn test_bookmark_toggle_after_render() {
    let api = program_api();
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");

    let mut outcome = Orchestrator::new(&api, &session, &config)
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;
    let widget = outcome.widget.as_mut().unwrap();
    assert_eq!(widget.state().is_bookmarked("learningProgram:155841"), Some(false));

    let note = widget
        .click_where(&mut container, |e| e.has_class(classes::BOOKMARK_BUTTON))
        .unwrap();
    assert_eq!(note.message, "Learning object added to bookmarks: learningProgram:155841");
    assert_eq!(widget.state().is_bookmarked("learningProgram:155841"), Some(true));

    let button = container.find(|e| e.has_class(classes::BOOKMARK_BUTTON)).unwrap();
    assert!(button.has_class(classes::BOOKMARKED));
    assert_eq!(button.get_attr("aria-label"), Some("Remove from bookmarks"));

    let enroll = widget
        .click_where(&mut container, |e| e.has_class(classes::PRIMARY_BUTTON))
        .unwrap();
    assert_eq!(enroll.action, "enrollInProgram");
}

#[tokio::test]
async fn test_rerender_replaces_container_and_widget_state() {
    let api = program_api();
    let session = signed_in();
    let config = config();
    let mut container = Element::new("div");
    let orchestrator = Orchestrator::new(&api, &session, &config);

    let first = orchestrator
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;
    let second = orchestrator
        .load_location("/cohort/learningProgram:155841", &HashMap::new(), &mut container)
        .await;

    assert_ne!(first.render_id, second.render_id);
    assert_eq!(container.child_elements().count(), 1);
    assert_eq!(
        second.widget.as_ref().unwrap().state().render_id,
        second.render_id
    );
}
