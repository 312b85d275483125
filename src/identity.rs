//! Learning object identity resolution
//!
//! Derives a [`LearningObjectRef`] from the page location. Rules are tried in
//! order and the first match wins:
//!
//! 1. `{type}:{digits}` anywhere in the path
//! 2. `/cohort/{digits}` at the end of the path (program)
//! 3. any trailing `/{digits}` segment (program)
//! 4. query `programId`, then `courseId`, then `id`: digits (program) or a
//!    `{type}:{id}` value taken verbatim
//!
//! Supported locations include `/cohort/learningProgram:155841`,
//! `/course/course:14267563` and `/learning-program?programId=155841`.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use crate::model::{LearningObjectRef, LoType};

/// Query parameters consulted by rule 4, in precedence order
pub const QUERY_KEYS: &[&str] = &["programId", "courseId", "id"];

fn type_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(learningProgram|course|certification|jobAid):(\d+)").expect("valid regex")
    })
}

fn cohort_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/cohort/(\d+)$").expect("valid regex"))
}

fn numeric_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d+)$").expect("valid regex"))
}

fn prefixed_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(learningProgram|course|certification|jobAid):(.+)$").expect("valid regex")
    })
}

/// Resolve a learning object reference from a path and its query parameters
pub fn resolve(path: &str, query: &HashMap<String, String>) -> Option<LearningObjectRef> {
    if let Some(caps) = type_token().captures(path) {
        let lo_type = LoType::from_path_prefix(&caps[1])?;
        debug!(path, "resolved from type token");
        return Some(LearningObjectRef::new(lo_type, &caps[2]));
    }

    if let Some(caps) = cohort_suffix().captures(path) {
        debug!(path, "resolved from cohort segment");
        return Some(LearningObjectRef::program(&caps[1]));
    }

    if let Some(caps) = numeric_suffix().captures(path) {
        debug!(path, "resolved from trailing numeric segment");
        return Some(LearningObjectRef::program(&caps[1]));
    }

    // Only the first non-empty parameter is considered.
    let value = QUERY_KEYS
        .iter()
        .filter_map(|k| query.get(*k))
        .find(|v| !v.is_empty())?;

    if value.bytes().all(|b| b.is_ascii_digit()) {
        debug!(value = %value, "resolved from numeric query parameter");
        return Some(LearningObjectRef::program(value.as_str()));
    }

    let caps = prefixed_value().captures(value)?;
    let lo_type = LoType::from_path_prefix(&caps[1])?;
    debug!(value = %value, "resolved from prefixed query parameter");
    Some(LearningObjectRef::new(lo_type, &caps[2]))
}

/// Resolve from a full page URL
pub fn resolve_url(url: &Url) -> Option<LearningObjectRef> {
    let query: HashMap<String, String> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    resolve(url.path(), &query)
}
