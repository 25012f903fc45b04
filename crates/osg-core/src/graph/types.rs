use serde::{Deserialize, Serialize};

/// Classification of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Enum,
    OneOf,
    AllOf,
    AnyOf,
    External,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Enum => "enum",
            NodeKind::OneOf => "oneOf",
            NodeKind::AllOf => "allOf",
            NodeKind::AnyOf => "anyOf",
            NodeKind::External => "external",
        }
    }
}

/// Classification of a relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Property,
    Reference,
    ArrayItems,
    Composition,
    ExternalRef,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Property => "property",
            EdgeKind::Reference => "reference",
            EdgeKind::ArrayItems => "array_items",
            EdgeKind::Composition => "composition",
            EdgeKind::ExternalRef => "external_ref",
        }
    }
}

/// One named schema, or one distinct external reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_names: Vec<String>,

    #[serde(default)]
    pub is_external: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_file_path: Option<String>,
}

/// A directed relationship `source -> target`.
///
/// `target` may name a node that is not part of the graph (a reference to a
/// schema the document never defines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub kind: EdgeKind,
}

impl GraphEdge {
    pub fn new(source: &str, target: &str, label: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            id: edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            label: label.into(),
            kind,
        }
    }
}

/// Deterministic edge id for an ordered source/target pair.
pub fn edge_id(source: &str, target: &str) -> String {
    format!("{source}->{target}")
}

/// The resolver's output: nodes and edges in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl SchemaGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn external_nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.is_external)
    }
}
