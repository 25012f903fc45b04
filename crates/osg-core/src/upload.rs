//! Upload boundary: a submitted form field in, a graph or a displayable error out.

use serde::{Deserialize, Serialize};

use crate::graph::SchemaGraph;
use crate::parse;
use crate::resolve::resolve;

/// File extensions a client file picker should offer. The handler itself
/// accepts any content that parses.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Message returned when the form carries no file.
pub const NO_FILE_MESSAGE: &str = "No file uploaded";

/// The value submitted under the form's `file` field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    File { name: String, bytes: Vec<u8> },
    Text(String),
}

/// Either a resolved graph or a message meant for the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Error { error: String },
    Graph(SchemaGraph),
}

impl UploadResponse {
    pub fn error(message: impl Into<String>) -> Self {
        UploadResponse::Error {
            error: message.into(),
        }
    }

    pub fn graph(&self) -> Option<&SchemaGraph> {
        match self {
            UploadResponse::Graph(graph) => Some(graph),
            UploadResponse::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadResponse::Error { error } => Some(error),
            UploadResponse::Graph(_) => None,
        }
    }
}

/// Whether a file name carries one of [`ACCEPTED_EXTENSIONS`].
pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}

/// Handle the `file` field of an upload form.
///
/// Missing or non-file values and parse failures come back as
/// [`UploadResponse::Error`]; a failure never yields a partial graph. Parse
/// failures carry the parser's own message unchanged.
pub fn handle_upload(field: Option<FormField>) -> UploadResponse {
    let (name, bytes) = match field {
        Some(FormField::File { name, bytes }) => (name, bytes),
        Some(FormField::Text(_)) | None => return UploadResponse::error(NO_FILE_MESSAGE),
    };

    match parse::from_slice(&bytes) {
        Ok(document) => {
            let graph = resolve(&document);
            log::debug!(
                "upload {}: {} nodes, {} edges",
                name,
                graph.nodes.len(),
                graph.edges.len()
            );
            UploadResponse::Graph(graph)
        }
        Err(err) => {
            log::debug!("upload {} rejected: {}", name, err);
            UploadResponse::error(err.parser_message())
        }
    }
}
