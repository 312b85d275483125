//! Object fetch orchestrator
//!
//! Drives one render pass for one container:
//!
//! ```text
//! Idle -> AuthCheck -> LoadingRoot -> [LoadingChildren] -> Rendered
//!   \________\______________\_______________________________-> Error
//! ```
//!
//! The container always ends in either the rendered object or an error
//! message. Child failures are logged and collected, never escalated.

use std::collections::HashMap;

use tracing::{debug, error, info, info_span, warn, Instrument};
use url::Url;
use uuid::Uuid;

use crate::api::LearningObjectApi;
use crate::config::PipelineConfig;
use crate::dom::Element;
use crate::error::LoadError;
use crate::identity;
use crate::model::{LearningObjectGraph, LearningObjectRef};
use crate::render::{self, RendererKind};
use crate::session::SessionStore;
use crate::widget::WidgetController;

const LOADING_MESSAGE: &str = "Loading...";
const LOADING_CHILDREN_MESSAGE: &str = "Loading course details...";

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    AuthCheck,
    LoadingRoot,
    LoadingChildren { total: usize },
    Rendered,
    Error(LoadError),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Rendered | PipelineState::Error(_))
    }
}

/// Everything one render pass produced
#[derive(Debug)]
pub struct RenderOutcome {
    pub render_id: Uuid,
    pub state: PipelineState,
    /// Every state entered, `Idle` first
    pub transitions: Vec<PipelineState>,
    /// Renderer that drew the final content
    pub renderer: RendererKind,
    pub graph: Option<LearningObjectGraph>,
    pub skipped_children: Vec<LoadError>,
    pub widget: Option<WidgetController>,
}

impl RenderOutcome {
    fn new(render_id: Uuid) -> Self {
        Self {
            render_id,
            state: PipelineState::Idle,
            transitions: vec![PipelineState::Idle],
            renderer: RendererKind::Base,
            graph: None,
            skipped_children: Vec::new(),
            widget: None,
        }
    }

    fn enter(&mut self, state: PipelineState) {
        debug!(from = ?self.state, to = ?state, "pipeline transition");
        self.transitions.push(state.clone());
        self.state = state;
    }

    fn fail(mut self, container: &mut Element, err: LoadError) -> Self {
        self.renderer.render_error(container, &err.to_string());
        self.enter(PipelineState::Error(err));
        self
    }

    pub fn is_rendered(&self) -> bool {
        self.state == PipelineState::Rendered
    }

    pub fn error(&self) -> Option<&LoadError> {
        match &self.state {
            PipelineState::Error(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs render passes against an API and a session store
pub struct Orchestrator<'a> {
    api: &'a dyn LearningObjectApi,
    session: &'a dyn SessionStore,
    config: &'a PipelineConfig,
}

impl<'a> Orchestrator<'a> {
    pub fn new(api: &'a dyn LearningObjectApi, session: &'a dyn SessionStore, config: &'a PipelineConfig) -> Self {
        Self { api, session, config }
    }

    /// Resolve identity from a path and query map, then run
    pub async fn load_location(
        &self,
        path: &str,
        query: &HashMap<String, String>,
        container: &mut Element,
    ) -> RenderOutcome {
        self.run(identity::resolve(path, query), container).await
    }

    /// Resolve identity from a full page URL, then run
    pub async fn load_url(&self, url: &Url, container: &mut Element) -> RenderOutcome {
        self.run(identity::resolve_url(url), container).await
    }

    /// One full render pass into `container`
    pub async fn run(&self, lo_ref: Option<LearningObjectRef>, container: &mut Element) -> RenderOutcome {
        let render_id = Uuid::new_v4();
        let span = info_span!("render_pass", render_id = %render_id);
        self.run_pass(render_id, lo_ref, container).instrument(span).await
    }

    async fn run_pass(
        &self,
        render_id: Uuid,
        lo_ref: Option<LearningObjectRef>,
        container: &mut Element,
    ) -> RenderOutcome {
        let mut outcome = RenderOutcome::new(render_id);

        let Some(lo_ref) = lo_ref else {
            warn!("no learning object in page location");
            return outcome.fail(container, LoadError::IdentityUnresolved);
        };
        info!(%lo_ref, "starting render pass");

        outcome.enter(PipelineState::AuthCheck);
        let Some(token) = self.session.get(&self.config.token_key) else {
            warn!(key = %self.config.token_key, "no access token in session");
            return outcome.fail(container, LoadError::Unauthenticated);
        };

        outcome.enter(PipelineState::LoadingRoot);
        RendererKind::Base.render_loading(container, LOADING_MESSAGE);

        let doc = match self.api.fetch_root(&lo_ref, &token).await {
            Ok(doc) => doc,
            Err(e) => {
                error!(%lo_ref, error = %e, "root fetch failed");
                return outcome.fail(container, LoadError::from(e));
            }
        };

        let renderer = render::select(doc.data.attributes.lo_type.as_deref());
        outcome.renderer = renderer;
        let mut graph = LearningObjectGraph::from_document(doc);

        if !graph.sub_lo_refs.is_empty() {
            outcome.enter(PipelineState::LoadingChildren {
                total: graph.sub_lo_refs.len(),
            });
            renderer.render_loading(container, LOADING_CHILDREN_MESSAGE);

            for child_ref in &graph.sub_lo_refs {
                match self.api.fetch_child(&child_ref.id, &token).await {
                    Ok(child_doc) => graph.children.push(LearningObjectGraph::from_document(child_doc)),
                    Err(e) => {
                        warn!(child = %child_ref.id, error = %e, "skipping child that failed to load");
                        outcome.skipped_children.push(LoadError::child(&child_ref.id, &e));
                    }
                }
            }
        }

        renderer.render(container, &graph, &graph.children);
        outcome.enter(PipelineState::Rendered);
        info!(
            renderer = %renderer,
            children = graph.children.len(),
            skipped = outcome.skipped_children.len(),
            "learning object rendered"
        );

        if !self.config.slider_init_delay.is_zero() {
            tokio::time::sleep(self.config.slider_init_delay).await;
        }
        outcome.widget = Some(WidgetController::attach(container, self.config, render_id));
        outcome.graph = Some(graph);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FixtureApi;
    use crate::render::sections::classes;
    use crate::session::MemorySessionStore;
    use serde_json::json;

    fn config() -> PipelineConfig {
        PipelineConfig::default().without_delays()
    }

    fn session() -> MemorySessionStore {
        MemorySessionStore::with_token("alm_access_token", "token-1")
    }

    #[tokio::test]
    async fn test_unresolved_identity_goes_straight_to_error() {
        let api = FixtureApi::new();
        let session = session();
        let config = config();
        let mut container = Element::new("div");

        let outcome = Orchestrator::new(&api, &session, &config)
            .load_location("/about", &HashMap::new(), &mut container)
            .await;

        assert_eq!(outcome.error(), Some(&LoadError::IdentityUnresolved));
        assert!(outcome.state.is_terminal());
        assert_eq!(
            outcome.transitions,
            vec![PipelineState::Idle, PipelineState::Error(LoadError::IdentityUnresolved)]
        );
        assert_eq!(api.request_count(), 0);
        assert!(container.find(|e| e.has_class(classes::ERROR)).is_some());
    }

    #[tokio::test]
    async fn test_declared_type_picks_renderer() {
        let api = FixtureApi::new()
            .with_json(
                "learningProgram:5",
                json!({ "data": { "id": "course:5", "type": "learningObject", "attributes": { "loType": "course" } } }),
            )
            .unwrap();
        let session = session();
        let config = config();
        let mut container = Element::new("div");

        let outcome = Orchestrator::new(&api, &session, &config)
            .run(Some(LearningObjectRef::program("5")), &mut container)
            .await;

        assert!(outcome.is_rendered());
        assert_eq!(outcome.renderer, RendererKind::Course);
        assert_eq!(
            outcome.transitions,
            vec![
                PipelineState::Idle,
                PipelineState::AuthCheck,
                PipelineState::LoadingRoot,
                PipelineState::Rendered
            ]
        );
        assert!(outcome.widget.is_some());
    }

    #[tokio::test]
    async fn test_token_sent_with_every_request() {
        let api = FixtureApi::new()
            .with_json(
                "learningProgram:1",
                json!({
                    "data": {
                        "id": "learningProgram:1",
                        "attributes": { "loType": "learningProgram" },
                        "relationships": { "subLOs": { "data": [ { "id": "course:2", "type": "learningObject" } ] } }
                    }
                }),
            )
            .unwrap();
        let session = session();
        let config = config();
        let mut container = Element::new("div");

        let outcome = Orchestrator::new(&api, &session, &config)
            .run(Some(LearningObjectRef::program("1")), &mut container)
            .await;

        // the missing child is a 404 from the fixture
        assert!(outcome.is_rendered());
        assert_eq!(outcome.skipped_children.len(), 1);
        assert!(outcome
            .transitions
            .contains(&PipelineState::LoadingChildren { total: 1 }));
        assert!(api.requests().iter().all(|r| r.token == "token-1"));
    }

    #[tokio::test]
    async fn test_child_with_null_display_fields_still_renders() {
        let api = FixtureApi::new()
            .with_json(
                "learningProgram:1",
                json!({
                    "data": {
                        "id": "learningProgram:1",
                        "attributes": { "loType": "learningProgram" },
                        "relationships": { "subLOs": { "data": [ { "id": "course:2", "type": "learningObject" } ] } }
                    }
                }),
            )
            .unwrap()
            .with_json(
                "course:2",
                json!({
                    "data": {
                        "id": "course:2",
                        "attributes": { "loType": "course", "tags": null, "authorNames": null, "isBookmarked": null }
                    },
                    "included": null
                }),
            )
            .unwrap();
        let session = session();
        let config = config();
        let mut container = Element::new("div");

        let outcome = Orchestrator::new(&api, &session, &config)
            .run(Some(LearningObjectRef::program("1")), &mut container)
            .await;

        assert!(outcome.is_rendered());
        assert!(outcome.skipped_children.is_empty());
        let graph = outcome.graph.as_ref().unwrap();
        assert_eq!(graph.children.len(), 1);
        assert_eq!(graph.children[0].id, "course:2");
    }
}
