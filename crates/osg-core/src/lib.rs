pub mod cache;
pub mod config;
pub mod error;
pub mod graph;
pub mod parse;
pub mod resolve;
pub mod upload;

pub use graph::{EdgeKind, GraphEdge, GraphNode, NodeKind, SchemaGraph};
pub use resolve::resolve;
