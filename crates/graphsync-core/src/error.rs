//! Errors raised by graph operations

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    #[error("edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    #[error("edge '{0}' already exists")]
    DuplicateEdge(String),

    #[error("edge '{edge}' references missing {role} node '{node}'")]
    MissingEndpoint {
        edge: String,
        role: &'static str,
        node: String,
    },

    #[error("unknown event name '{0}'")]
    UnknownEvent(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
