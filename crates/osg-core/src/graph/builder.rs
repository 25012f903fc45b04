use indexmap::IndexMap;
use indexmap::map::Entry;

use super::types::{GraphEdge, GraphNode, SchemaGraph};

/// Accumulates nodes and edges keyed by id.
///
/// Both upserts are first-write-wins: a second node or edge with an id that
/// is already present is dropped and the call reports `false`.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: IndexMap<String, GraphNode>,
    edges: IndexMap<String, GraphEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_node(&mut self, node: GraphNode) -> bool {
        match self.nodes.entry(node.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    pub fn upsert_edge(&mut self, edge: GraphEdge) -> bool {
        match self.edges.entry(edge.id.clone()) {
            Entry::Occupied(existing) => {
                log::trace!(
                    "dropping edge {} ({}), already recorded as {}",
                    edge.id,
                    edge.label,
                    existing.get().label
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(edge);
                true
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn build(self) -> SchemaGraph {
        SchemaGraph {
            nodes: self.nodes.into_values().collect(),
            edges: self.edges.into_values().collect(),
        }
    }
}
