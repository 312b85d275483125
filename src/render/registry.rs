//! Renderer registry
//!
//! Maps a server-declared `loType` to a [`RendererKind`]. Unknown or missing
//! types fall back to [`RendererKind::Base`]; selection never fails.

use tracing::warn;

use super::RendererKind;
use crate::model::LoType;

/// Spellings recognised by [`select`], lower-case
pub fn supported_types() -> &'static [&'static str] {
    &[
        "learningprogram",
        "learning_program",
        "program",
        "course",
        "certification",
        "cert",
        "jobaid",
        "job_aid",
    ]
}

impl From<LoType> for RendererKind {
    fn from(lo_type: LoType) -> Self {
        match lo_type {
            LoType::Program => RendererKind::Program,
            LoType::Course => RendererKind::Course,
            LoType::Certification => RendererKind::Certification,
            LoType::JobAid => RendererKind::JobAid,
            LoType::Unknown => RendererKind::Base,
        }
    }
}

/// Select a renderer, case-insensitively and tolerant of synonyms
pub fn select(lo_type: Option<&str>) -> RendererKind {
    let declared = lo_type.unwrap_or("unknown");
    let kind = RendererKind::from(LoType::from_declared(declared));
    if kind == RendererKind::Base {
        warn!(lo_type = declared, "unknown loType, using base renderer");
    }
    kind
}
