//! Learning-object data model
//!
//! - [`LearningObjectRef`]: the `type:id` reference derived from the page location
//! - [`LoDocument`]: the JSON:API document returned by the learning-management API
//! - [`LearningObjectGraph`]: the normalised root + children a renderer consumes

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Learning object type
// ============================================================================

/// Learning object kinds understood by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoType {
    Program,
    Course,
    Certification,
    JobAid,
    Unknown,
}

impl LoType {
    /// Prefix used in API paths and canonical references
    pub fn path_prefix(&self) -> &'static str {
        match self {
            LoType::Program => "learningProgram",
            LoType::Course => "course",
            LoType::Certification => "certification",
            LoType::JobAid => "jobAid",
            LoType::Unknown => "unknown",
        }
    }

    /// Exact-case match on an API path prefix
    pub fn from_path_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "learningProgram" => Some(LoType::Program),
            "course" => Some(LoType::Course),
            "certification" => Some(LoType::Certification),
            "jobAid" => Some(LoType::JobAid),
            _ => None,
        }
    }

    /// Case-insensitive match on a server-declared `loType`, synonyms included
    pub fn from_declared(declared: &str) -> Self {
        match declared.trim().to_ascii_lowercase().as_str() {
            "learningprogram" | "learning_program" | "program" => LoType::Program,
            "course" => LoType::Course,
            "certification" | "cert" => LoType::Certification,
            "jobaid" | "job_aid" => LoType::JobAid,
            _ => LoType::Unknown,
        }
    }

    /// Human label for section headings and badges
    pub fn label(&self) -> &'static str {
        match self {
            LoType::Program => "Learning Program",
            LoType::Course => "Course",
            LoType::Certification => "Certification",
            LoType::JobAid => "Job Aid",
            LoType::Unknown => "Learning Object",
        }
    }

    /// Plural label used for grouped section tabs
    pub fn plural_label(&self) -> &'static str {
        match self {
            LoType::Program => "Learning Programs",
            LoType::Course => "Courses",
            LoType::Certification => "Certifications",
            LoType::JobAid => "Job Aids",
            LoType::Unknown => "Other",
        }
    }
}

impl fmt::Display for LoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_prefix())
    }
}

// ============================================================================
// Learning object reference
// ============================================================================

/// Canonical `type:id` reference to a learning object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearningObjectRef {
    pub lo_type: LoType,
    pub id: String,
}

impl LearningObjectRef {
    pub fn new(lo_type: LoType, id: impl Into<String>) -> Self {
        Self {
            lo_type,
            id: id.into(),
        }
    }

    /// Program reference, the default when only a numeric id is known
    pub fn program(id: impl Into<String>) -> Self {
        Self::new(LoType::Program, id)
    }
}

impl fmt::Display for LearningObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo_type, self.id)
    }
}

/// Error parsing a `type:id` string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a learning object reference: {0}")]
pub struct ParseRefError(pub String);

impl FromStr for LearningObjectRef {
    type Err = ParseRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, id) = s.split_once(':').ok_or_else(|| ParseRefError(s.to_string()))?;
        let lo_type = LoType::from_path_prefix(prefix).ok_or_else(|| ParseRefError(s.to_string()))?;
        if id.is_empty() {
            return Err(ParseRefError(s.to_string()));
        }
        Ok(Self::new(lo_type, id))
    }
}

// ============================================================================
// JSON:API document
// ============================================================================

/// Explicit `null` reads as the type's default, same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top-level API response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoDocument {
    pub data: LoResource,
    #[serde(default, deserialize_with = "null_as_default")]
    pub included: Vec<Value>,
}

/// The primary resource of a document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoResource {
    pub id: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: LoAttributes,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: Relationships,
}

/// `{id, type}` stub pointing at another resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
}

/// Relationship linkage: to-one, to-many, or null
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
}

impl Linkage {
    pub fn identifiers(&self) -> Vec<ResourceIdentifier> {
        match self {
            Linkage::Many(ids) => ids.clone(),
            Linkage::One(id) => vec![id.clone()],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationships {
    #[serde(rename = "subLOs")]
    pub sub_los: Option<Relationship>,
    pub enrollment: Option<Relationship>,
    pub instances: Option<Relationship>,
    #[serde(rename = "prerequisiteLOs")]
    pub prerequisite_los: Option<Relationship>,
    pub skills: Option<Relationship>,
    pub authors: Option<Relationship>,
}

fn linked(rel: &Option<Relationship>) -> Vec<ResourceIdentifier> {
    rel.as_ref()
        .and_then(|r| r.data.as_ref())
        .map(Linkage::identifiers)
        .unwrap_or_default()
}

/// Localised name/description block
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizedMetadata {
    pub locale: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    pub rich_text_overview: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    #[serde(deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ratings_count: u64,
}

/// Learning object attributes
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoAttributes {
    pub lo_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub localized_metadata: Vec<LocalizedMetadata>,
    pub rating: Option<Rating>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bookmarked: bool,
    /// Seconds
    pub duration: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub author_names: Vec<String>,
    pub image_url: Option<String>,
    pub enrollment_type: Option<String>,
    pub state: Option<String>,
    /// Resolved from `included`, not part of the wire attributes
    #[serde(skip)]
    pub skills: Vec<String>,
}

const PREFERRED_LOCALE: &str = "en-US";

impl LoAttributes {
    fn metadata(&self) -> Option<&LocalizedMetadata> {
        self.localized_metadata
            .iter()
            .find(|m| m.locale.as_deref() == Some(PREFERRED_LOCALE))
            .or_else(|| self.localized_metadata.first())
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata().and_then(|m| m.name.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.metadata().and_then(|m| m.description.as_deref())
    }

    /// Overview text, plain overview preferred over rich text
    pub fn overview(&self) -> Option<&str> {
        self.metadata()
            .and_then(|m| m.overview.as_deref().or(m.rich_text_overview.as_deref()))
    }
}

// ============================================================================
// Included-resource helpers
// ============================================================================

fn find_included<'a>(included: &'a [Value], rid: &ResourceIdentifier) -> Option<&'a Value> {
    included.iter().find(|v| {
        v.get("id").and_then(Value::as_str) == Some(rid.id.as_str())
            && (rid.resource_type.is_empty()
                || v.get("type").and_then(Value::as_str) == Some(rid.resource_type.as_str()))
    })
}

fn relationship_ids(value: &Value, name: &str) -> Vec<ResourceIdentifier> {
    value
        .pointer(&format!("/relationships/{}/data", name))
        .cloned()
        .and_then(|d| serde_json::from_value::<Linkage>(d).ok())
        .map(|l| l.identifiers())
        .unwrap_or_default()
}

/// Follow relationship names hop by hop through `included`
fn follow<'a>(included: &'a [Value], start: &[ResourceIdentifier], hops: &[&str]) -> Vec<&'a Value> {
    let mut current: Vec<&Value> = start.iter().filter_map(|r| find_included(included, r)).collect();
    for hop in hops {
        current = current
            .iter()
            .flat_map(|v| relationship_ids(v, hop))
            .filter_map(|r| find_included(included, &r))
            .collect();
    }
    current
}

/// Display name of a pass-through resource value
pub fn display_name(value: &Value) -> String {
    let attrs = value.get("attributes");
    attrs
        .and_then(|a| a.pointer("/localizedMetadata/0/name"))
        .or_else(|| attrs.and_then(|a| a.get("name")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| value.get("id").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_default()
}

/// `id` of a pass-through resource value
pub fn value_id(value: &Value) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ============================================================================
// Normalised graph
// ============================================================================

/// Root object plus its one-level child objects
#[derive(Debug, Clone, Serialize)]
pub struct LearningObjectGraph {
    pub id: String,
    pub lo_type: LoType,
    pub attributes: LoAttributes,
    pub sub_lo_refs: Vec<ResourceIdentifier>,
    pub children: Vec<LearningObjectGraph>,
    pub enrollment: Option<Value>,
    pub instances: Vec<Value>,
    pub resources: Vec<Value>,
    pub prerequisite_los: Vec<Value>,
}

impl LearningObjectGraph {
    /// Normalise a document. `lo_type` comes from the declared `loType` only.
    pub fn from_document(doc: LoDocument) -> Self {
        let LoDocument { data, included } = doc;
        let rel = &data.relationships;

        let lo_type = data
            .attributes
            .lo_type
            .as_deref()
            .map(LoType::from_declared)
            .unwrap_or(LoType::Unknown);

        let enrollment = linked(&rel.enrollment)
            .first()
            .and_then(|r| find_included(&included, r))
            .cloned();

        let instance_ids = linked(&rel.instances);
        let instances: Vec<Value> = follow(&included, &instance_ids, &[]).into_iter().cloned().collect();
        let resources: Vec<Value> = follow(&included, &instance_ids, &["loResources"])
            .into_iter()
            .cloned()
            .collect();

        // Prerequisites may be referenced without being included; keep the stub.
        let prerequisite_los = linked(&rel.prerequisite_los)
            .iter()
            .map(|r| {
                find_included(&included, r)
                    .cloned()
                    .unwrap_or_else(|| serde_json::json!({ "id": r.id, "type": r.resource_type }))
            })
            .collect();

        let mut attributes = data.attributes;
        attributes.skills = follow(&included, &linked(&rel.skills), &["skillLevel", "skill"])
            .into_iter()
            .filter_map(|v| v.pointer("/attributes/name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        Self {
            id: data.id,
            lo_type,
            sub_lo_refs: linked(&rel.sub_los),
            attributes,
            children: Vec::new(),
            enrollment,
            instances,
            resources,
            prerequisite_los,
        }
    }

    pub fn title(&self) -> &str {
        self.attributes.title().unwrap_or("Untitled")
    }

    pub fn is_bookmarked(&self) -> bool {
        self.attributes.is_bookmarked
    }

    /// Enrollment state, when the learner is enrolled
    pub fn enrollment_state(&self) -> Option<&str> {
        self.enrollment
            .as_ref()
            .and_then(|e| e.pointer("/attributes/state"))
            .and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn program_doc() -> LoDocument {
        serde_json::from_value(json!({
            "data": {
                "id": "learningProgram:155841",
                "type": "learningObject",
                "attributes": {
                    "loType": "learningProgram",
                    "localizedMetadata": [
                        { "locale": "fr-FR", "name": "Programme" },
                        { "locale": "en-US", "name": "Onboarding", "description": "Start here", "overview": "All the basics" }
                    ],
                    "rating": { "averageRating": 4.5, "ratingsCount": 12 },
                    "tags": ["new-hire"],
                    "isBookmarked": true,
                    "duration": 5400
                },
                "relationships": {
                    "subLOs": { "data": [
                        { "id": "course:1", "type": "learningObject" },
                        { "id": "course:2", "type": "learningObject" }
                    ] },
                    "enrollment": { "data": { "id": "enr-1", "type": "learningObjectInstanceEnrollment" } },
                    "prerequisiteLOs": { "data": [ { "id": "course:9", "type": "learningObject" } ] },
                    "skills": { "data": [ { "id": "ls-1", "type": "learningObjectSkill" } ] },
                    "instances": { "data": [ { "id": "inst-1", "type": "learningObjectInstance" } ] }
                }
            },
            "included": [
                { "id": "enr-1", "type": "learningObjectInstanceEnrollment", "attributes": { "state": "ENROLLED" } },
                { "id": "ls-1", "type": "learningObjectSkill",
                  "relationships": { "skillLevel": { "data": { "id": "sl-1", "type": "skillLevel" } } } },
                { "id": "sl-1", "type": "skillLevel",
                  "relationships": { "skill": { "data": { "id": "sk-1", "type": "skill" } } } },
                { "id": "sk-1", "type": "skill", "attributes": { "name": "Negotiation" } },
                { "id": "inst-1", "type": "learningObjectInstance",
                  "relationships": { "loResources": { "data": [ { "id": "res-1", "type": "learningObjectResource" } ] } } },
                { "id": "res-1", "type": "learningObjectResource",
                  "attributes": { "localizedMetadata": [ { "name": "Module 1" } ] } }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_ref_display_and_parse() {
        let r = LearningObjectRef::program("42");
        assert_eq!(r.to_string(), "learningProgram:42");
        assert_eq!("course:7".parse::<LearningObjectRef>().unwrap(), LearningObjectRef::new(LoType::Course, "7"));
        assert!("widget:7".parse::<LearningObjectRef>().is_err());
        assert!("course:".parse::<LearningObjectRef>().is_err());
    }

    #[test]
    fn test_declared_type_synonyms() {
        assert_eq!(LoType::from_declared("LEARNINGPROGRAM"), LoType::Program);
        assert_eq!(LoType::from_declared("Cert"), LoType::Certification);
        assert_eq!(LoType::from_declared("job_aid"), LoType::JobAid);
        assert_eq!(LoType::from_declared("widget"), LoType::Unknown);
    }

    #[test]
    fn test_graph_from_document() {
        let graph = LearningObjectGraph::from_document(program_doc());
        assert_eq!(graph.lo_type, LoType::Program);
        assert_eq!(graph.title(), "Onboarding");
        assert_eq!(graph.attributes.description(), Some("Start here"));
        assert_eq!(graph.sub_lo_refs.len(), 2);
        assert_eq!(graph.sub_lo_refs[1].id, "course:2");
        assert!(graph.children.is_empty());
        assert_eq!(graph.enrollment_state(), Some("ENROLLED"));
        assert_eq!(graph.attributes.skills, vec!["Negotiation".to_string()]);
        assert_eq!(graph.resources.len(), 1);
        assert_eq!(display_name(&graph.resources[0]), "Module 1");
        // not included, kept as a stub
        assert_eq!(value_id(&graph.prerequisite_los[0]), "course:9");
    }

    #[test]
    fn test_missing_lo_type_is_unknown() {
        let doc: LoDocument = serde_json::from_value(json!({ "data": { "id": "x", "attributes": {} } })).unwrap();
        let graph = LearningObjectGraph::from_document(doc);
        assert_eq!(graph.lo_type, LoType::Unknown);
        assert_eq!(graph.title(), "Untitled");
        assert!(graph.sub_lo_refs.is_empty());
    }

    #[test]
    fn test_null_display_fields_decode_as_empty() {
        let doc: LoDocument = serde_json::from_value(json!({
            "data": {
                "id": "course:5",
                "type": "learningObject",
                "attributes": {
                    "loType": "course",
                    "localizedMetadata": null,
                    "tags": null,
                    "authorNames": null,
                    "isBookmarked": null,
                    "rating": { "averageRating": null, "ratingsCount": 3 }
                },
                "relationships": null
            },
            "included": null
        }))
        .unwrap();

        let graph = LearningObjectGraph::from_document(doc);
        assert_eq!(graph.lo_type, LoType::Course);
        assert_eq!(graph.title(), "Untitled");
        assert!(graph.attributes.tags.is_empty());
        assert!(graph.attributes.author_names.is_empty());
        assert!(!graph.is_bookmarked());
        assert_eq!(graph.attributes.rating.as_ref().map(|r| r.average_rating), Some(0.0));
        assert!(graph.sub_lo_refs.is_empty());
    }
}
