//! lo-render - learning object render pipeline
//!
//! Resolves a learning object from the page location, fetches it (and its
//! one-level children) from the learning-management API with a session bearer
//! token, renders it with the renderer matching its declared type, and wires
//! the interactive widget on top of the rendered tree.
//!
//! ## Call chain
//! page location -> identity -> orchestrator (auth, root, children) ->
//! renderer registry -> renderer -> widget controller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lo_render::api::HttpLearningObjectApi;
//! use lo_render::dom::Element;
//! use lo_render::session::MemorySessionStore;
//! use lo_render::{Orchestrator, PipelineConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::from_env();
//! let api = HttpLearningObjectApi::new(&config)?;
//! let session = MemorySessionStore::with_token(&config.token_key, "bearer-token");
//!
//! let url = url::Url::parse("https://example.com/cohort/learningProgram:155841")?;
//! let mut container = Element::new("div").class("learning-program-container");
//! let outcome = Orchestrator::new(&api, &session, &config)
//!     .load_url(&url, &mut container)
//!     .await;
//! println!("{} -> {}", outcome.renderer, container.to_html());
//! # Ok(())
//! # }
//! ```

// Errors and configuration
pub mod config;
pub mod error;

// Domain model and identity
pub mod identity;
pub mod model;

// Collaborator boundaries
pub mod api;
pub mod session;

// Rendering
pub mod dom;
pub mod render;
pub mod widget;

// Render pass state machine
pub mod orchestrator;

pub use config::PipelineConfig;
pub use error::{ApiError, LoadError};
pub use model::{LearningObjectGraph, LearningObjectRef, LoType};
pub use orchestrator::{Orchestrator, PipelineState, RenderOutcome};
pub use render::RendererKind;
pub use widget::{WidgetAction, WidgetController};
