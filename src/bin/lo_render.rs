//! Learning object render CLI
//!
//! Runs the render pipeline outside a browser and prints the rendered fragment.
//!
//! # Usage
//!
//! ```bash
//! # Render against the live API (token from LO_ACCESS_TOKEN or --token)
//! lo_render render --location "https://example.com/cohort/learningProgram:155841"
//!
//! # Render offline from a fixture file and simulate clicks
//! lo_render render --location "/course/course:7" --fixtures fixtures.json --token t --click btn-bookmark-header
//!
//! # Show which object a location resolves to
//! lo_render resolve --location "/learning-program?programId=155841"
//!
//! # List recognised loType spellings
//! lo_render types
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use lo_render::api::{FixtureApi, HttpLearningObjectApi, LearningObjectApi};
use lo_render::dom::Element;
use lo_render::session::MemorySessionStore;
use lo_render::{identity, render, Orchestrator, PipelineConfig};

const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

#[derive(Parser)]
#[command(name = "lo_render")]
#[command(version)]
#[command(about = "Render a learning object the way the page block does")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and render a learning object, printing HTML
    Render {
        /// Page location: full URL or path with optional query
        #[arg(short, long)]
        location: String,

        /// Bearer token placed in the session store
        #[arg(long, env = "LO_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Serve responses from a fixture file instead of the live API
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Indent the HTML output
        #[arg(long)]
        pretty: bool,

        /// Class of an element to click after rendering, first match wins (repeatable)
        #[arg(long = "click")]
        clicks: Vec<String>,
    },

    /// Print the learning object a location resolves to
    Resolve {
        #[arg(short, long)]
        location: String,
    },

    /// List recognised loType spellings
    Types,
}

/// Accept both absolute URLs and bare paths
fn parse_location(location: &str) -> Result<Url> {
    Url::parse(location).or_else(|_| {
        Url::parse(PLACEHOLDER_ORIGIN)
            .and_then(|base| base.join(location))
            .with_context(|| format!("Invalid location: {}", location))
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lo_render=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            location,
            token,
            fixtures,
            pretty,
            clicks,
        } => cmd_render(&location, token, fixtures, pretty, &clicks).await,
        Commands::Resolve { location } => cmd_resolve(&location),
        Commands::Types => {
            for spelling in render::supported_types() {
                println!("{:<18} -> {}", spelling, render::select(Some(*spelling)));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_resolve(location: &str) -> Result<ExitCode> {
    let url = parse_location(location)?;
    match identity::resolve_url(&url) {
        Some(lo_ref) => {
            println!("{}", lo_ref);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            eprintln!("No learning object found in {}", location);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn cmd_render(
    location: &str,
    token: Option<String>,
    fixtures: Option<PathBuf>,
    pretty: bool,
    clicks: &[String],
) -> Result<ExitCode> {
    let config = PipelineConfig::from_env();
    let url = parse_location(location)?;

    let session = MemorySessionStore::new();
    if let Some(token) = token {
        session.set(&config.token_key, token);
    }

    let api: Box<dyn LearningObjectApi> = match fixtures {
        Some(path) => {
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read fixtures {}", path.display()))?;
            let api = FixtureApi::from_json_str(&body)
                .with_context(|| format!("Failed to parse fixtures {}", path.display()))?;
            info!(path = %path.display(), "serving from fixtures");
            Box::new(api)
        }
        None => Box::new(HttpLearningObjectApi::new(&config).context("Failed to create HTTP client")?),
    };

    let mut container = Element::new("div").class("learning-program-container");
    let mut outcome = Orchestrator::new(api.as_ref(), &session, &config)
        .load_url(&url, &mut container)
        .await;

    if let Some(widget) = outcome.widget.as_mut() {
        for class in clicks {
            match widget.click_where(&mut container, |e| e.has_class(class)) {
                Some(note) => eprintln!("[{}] {}", note.action, note.message),
                None => info!(class = %class, "click produced no notification"),
            }
        }
    }

    let html = if pretty {
        container.to_html_pretty()
    } else {
        container.to_html()
    };
    println!("{}", html);

    Ok(if outcome.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
