//! Schema-to-graph resolution.
//!
//! Three passes over `components.schemas`, all in document order:
//! 1. one node per schema that is not itself a `$ref`
//! 2. one node per distinct external `$ref` found anywhere in the tree
//! 3. edges for every direct reference (properties, items, composition, nested inline schemas)
//!
//! Target ids for pass 3 come from [`reference::target_id`].

pub mod reference;

use indexmap::{IndexMap, IndexSet};

use crate::graph::{EdgeKind, GraphBuilder, GraphEdge, GraphNode, NodeKind, SchemaGraph};
use crate::parse::document::ParsedDocument;
use crate::parse::schema::{SchemaDefinition, SchemaOrRef, SchemaType, TypeSet};

use reference::{ExternalRef, is_external, target_id};

/// Resolve a parsed document into its schema graph.
///
/// A document without `components.schemas` yields an empty graph.
pub fn resolve(document: &ParsedDocument) -> SchemaGraph {
    match document.schemas() {
        Some(schemas) => resolve_schemas(schemas),
        None => {
            log::debug!("document has no components.schemas, returning empty graph");
            SchemaGraph::default()
        }
    }
}

/// Resolve a bare schema collection (name -> definition).
pub fn resolve_schemas(schemas: &IndexMap<String, SchemaOrRef>) -> SchemaGraph {
    let mut builder = GraphBuilder::new();

    for (name, schema_or_ref) in schemas {
        match schema_or_ref {
            SchemaOrRef::Ref { .. } => {}
            SchemaOrRef::Schema(schema) => {
                builder.upsert_node(schema_node(name, schema));
            }
            SchemaOrRef::Opaque(_) => {
                builder.upsert_node(schema_node(name, &SchemaDefinition::default()));
            }
        }
    }
    let internal_nodes = builder.node_count();

    let mut external_refs = IndexSet::new();
    for schema_or_ref in schemas.values() {
        collect_external_refs(schema_or_ref, &mut external_refs);
    }
    for ref_path in &external_refs {
        builder.upsert_node(external_node(ref_path));
    }

    for (name, schema_or_ref) in schemas {
        schema_relationships(&mut builder, name, schema_or_ref);
    }

    log::debug!(
        "resolved {} schemas: {} nodes ({} internal, {} external refs), {} edges",
        schemas.len(),
        builder.node_count(),
        internal_nodes,
        external_refs.len(),
        builder.edge_count()
    );
    builder.build()
}

/// Classify a schema. First match wins:
/// enum, allOf, oneOf, anyOf, array type, other explicit type, object.
pub fn classify(schema: &SchemaDefinition) -> NodeKind {
    if schema.enum_values.is_some() {
        return NodeKind::Enum;
    }
    if schema.all_of.is_some() {
        return NodeKind::AllOf;
    }
    if schema.one_of.is_some() {
        return NodeKind::OneOf;
    }
    if schema.any_of.is_some() {
        return NodeKind::AnyOf;
    }
    match schema.schema_type.as_ref().and_then(TypeSet::primary) {
        Some(SchemaType::Array) => NodeKind::Array,
        Some(SchemaType::String) => NodeKind::String,
        Some(SchemaType::Number | SchemaType::Integer) => NodeKind::Number,
        Some(SchemaType::Boolean) => NodeKind::Boolean,
        Some(SchemaType::Object | SchemaType::Null | SchemaType::Other) | None => NodeKind::Object,
    }
}

fn schema_node(name: &str, schema: &SchemaDefinition) -> GraphNode {
    GraphNode {
        id: name.to_string(),
        label: name.to_string(),
        kind: classify(schema),
        description: schema.description.clone(),
        property_names: schema.properties.keys().cloned().collect(),
        required_names: schema.required.clone(),
        is_external: false,
        external_file_path: None,
    }
}

fn external_node(ref_path: &str) -> GraphNode {
    let parsed = ExternalRef::parse(ref_path);
    GraphNode {
        id: parsed.node_id(),
        label: parsed.schema_name.to_string(),
        kind: NodeKind::External,
        description: Some(format!("External schema from {}", parsed.file_name)),
        property_names: Vec::new(),
        required_names: Vec::new(),
        is_external: true,
        external_file_path: Some(parsed.file_name.to_string()),
    }
}

/// Depth-first walk through properties, items and composition branches.
fn collect_external_refs<'a>(schema_or_ref: &'a SchemaOrRef, refs: &mut IndexSet<&'a str>) {
    let schema = match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            if is_external(ref_path) {
                refs.insert(ref_path.as_str());
            }
            return;
        }
        SchemaOrRef::Schema(schema) => schema,
        SchemaOrRef::Opaque(_) => return,
    };

    for prop in schema.properties.values() {
        collect_external_refs(prop, refs);
    }
    if let Some(ref items) = schema.items {
        collect_external_refs(items, refs);
    }
    for (_, branches) in schema.compositions() {
        for branch in branches {
            collect_external_refs(branch, refs);
        }
    }
}

fn schema_relationships(builder: &mut GraphBuilder, name: &str, schema_or_ref: &SchemaOrRef) {
    let schema = match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            let kind = if is_external(ref_path) {
                EdgeKind::ExternalRef
            } else {
                EdgeKind::Reference
            };
            builder.upsert_edge(GraphEdge::new(name, &target_id(ref_path), "$ref", kind));
            return;
        }
        SchemaOrRef::Schema(schema) => schema,
        SchemaOrRef::Opaque(_) => return,
    };

    for (prop_name, prop) in &schema.properties {
        match prop.ref_path() {
            Some(ref_path) => {
                builder.upsert_edge(GraphEdge::new(
                    name,
                    &target_id(ref_path),
                    prop_name.as_str(),
                    EdgeKind::Property,
                ));
            }
            None => nested_relationships(builder, name, prop, prop_name),
        }
    }

    if let Some(ref items) = schema.items {
        match items.ref_path() {
            Some(ref_path) => {
                builder.upsert_edge(GraphEdge::new(
                    name,
                    &target_id(ref_path),
                    "items",
                    EdgeKind::ArrayItems,
                ));
            }
            None => nested_relationships(builder, name, items, "items"),
        }
    }

    // Inline composition branches are not traversed, only direct refs count.
    for (composition, branches) in schema.compositions() {
        for (index, branch) in branches.iter().enumerate() {
            if let Some(ref_path) = branch.ref_path() {
                builder.upsert_edge(GraphEdge::new(
                    name,
                    &target_id(ref_path),
                    format!("{}[{}]", composition.as_str(), index),
                    EdgeKind::Composition,
                ));
            }
        }
    }
}

/// Edges out of an anonymous inline schema are attributed to the enclosing
/// named schema, labelled with the path that leads to the ref.
fn nested_relationships(
    builder: &mut GraphBuilder,
    parent: &str,
    schema_or_ref: &SchemaOrRef,
    path: &str,
) {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => {
            builder.upsert_edge(GraphEdge::new(
                parent,
                &target_id(ref_path),
                path,
                EdgeKind::Reference,
            ));
        }
        SchemaOrRef::Schema(schema) => {
            for (prop_name, prop) in &schema.properties {
                nested_relationships(builder, parent, prop, &format!("{path}.{prop_name}"));
            }
            if let Some(ref items) = schema.items {
                nested_relationships(builder, parent, items, &format!("{path}[]"));
            }
        }
        SchemaOrRef::Opaque(_) => {}
    }
}
