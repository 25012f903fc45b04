use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lenient::or_default;
use super::schema::SchemaOrRef;

/// Components object; only `schemas` contribute to the graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, SchemaOrRef>>,
}

/// An OpenAPI document reduced to the parts the resolver reads.
///
/// Everything outside `components` (`openapi`, `info`, `paths`, ...) is
/// accepted and ignored, so any version of the format deserializes. A
/// `components` or `schemas` entry of the wrong shape reads as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl ParsedDocument {
    /// The `components.schemas` collection, if the document has one.
    pub fn schemas(&self) -> Option<&IndexMap<String, SchemaOrRef>> {
        self.components.as_ref()?.schemas.as_ref()
    }
}
