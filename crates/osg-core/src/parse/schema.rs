use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lenient::or_default;

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Anything outside the JSON Schema vocabulary (e.g. Swagger 2 `file`).
    #[serde(other)]
    Other,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that describes the shape of the value, ignoring `null` in
    /// OpenAPI 3.1 style `type: [string, "null"]` unions.
    pub fn primary(&self) -> Option<&SchemaType> {
        match self {
            TypeSet::Single(t) => Some(t),
            TypeSet::Multiple(types) => types
                .iter()
                .find(|t| **t != SchemaType::Null)
                .or_else(|| types.first()),
        }
    }
}

/// A reference or inline schema.
///
/// Any mapping carrying `$ref` is a reference; sibling keys are ignored the
/// same way OpenAPI 3.0 Reference Objects ignore them. Values that are not a
/// mapping (3.1 boolean schemas, `null`, stray scalars) land in `Opaque` and
/// act as an empty schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<SchemaDefinition>),
    Opaque(serde_yaml_ng::Value),
}

impl SchemaOrRef {
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { ref_path } => Some(ref_path),
            SchemaOrRef::Schema(_) | SchemaOrRef::Opaque(_) => None,
        }
    }

    pub fn schema(&self) -> Option<&SchemaDefinition> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema),
            SchemaOrRef::Ref { .. } | SchemaOrRef::Opaque(_) => None,
        }
    }
}

/// The subset of a JSON Schema object that shapes the graph.
///
/// Composition keywords and `enum` stay optional so that their presence is
/// observable even when the list is empty. Every field tolerates a mistyped
/// value by reading it as absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_type: Option<TypeSet>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Object properties
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Array items
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaOrRef>>,

    // Composition
    #[serde(
        rename = "allOf",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub all_of: Option<Vec<SchemaOrRef>>,

    #[serde(
        rename = "oneOf",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub one_of: Option<Vec<SchemaOrRef>>,

    #[serde(
        rename = "anyOf",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub any_of: Option<Vec<SchemaOrRef>>,

    // Enum values
    #[serde(
        rename = "enum",
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl SchemaDefinition {
    /// Iterate the composition branches that are present, tagged with their keyword.
    pub fn compositions(&self) -> impl Iterator<Item = (CompositionKind, &[SchemaOrRef])> {
        [
            (CompositionKind::AllOf, self.all_of.as_deref()),
            (CompositionKind::OneOf, self.one_of.as_deref()),
            (CompositionKind::AnyOf, self.any_of.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, branches)| branches.map(|b| (kind, b)))
    }
}

/// One of the three composition keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
    AllOf,
    OneOf,
    AnyOf,
}

impl CompositionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionKind::AllOf => "allOf",
            CompositionKind::OneOf => "oneOf",
            CompositionKind::AnyOf => "anyOf",
        }
    }
}
