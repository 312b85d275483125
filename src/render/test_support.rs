//! Graph builders shared by renderer tests

use serde_json::{json, Value};

use crate::model::{LearningObjectGraph, LoAttributes, LoType, LocalizedMetadata};

pub(crate) fn graph(id: &str, lo_type: LoType, title: &str) -> LearningObjectGraph {
    LearningObjectGraph {
        id: id.to_string(),
        lo_type,
        attributes: LoAttributes {
            localized_metadata: vec![LocalizedMetadata {
                name: Some(title.to_string()),
                ..Default::default()
            }],
            ..Default::default()
        },
        sub_lo_refs: vec![],
        children: vec![],
        enrollment: None,
        instances: vec![],
        resources: vec![],
        prerequisite_los: vec![],
    }
}

pub(crate) fn resource(id: &str, name: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "type": "learningObjectResource",
        "attributes": {
            "resourceType": kind,
            "localizedMetadata": [ { "name": name } ]
        }
    })
}
