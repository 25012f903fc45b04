mod builder;
mod types;

pub use builder::GraphBuilder;
pub use types::{EdgeKind, GraphEdge, GraphNode, NodeKind, SchemaGraph, edge_id};
