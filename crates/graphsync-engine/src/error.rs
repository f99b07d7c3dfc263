//! Errors surfaced by a sync pass

use std::fmt;
use std::path::PathBuf;

use graphsync_core::GraphError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of element a decision or failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => f.write_str("node"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

/// A sync pass stops at the first failure and reports it unchanged.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("{kind} predicate failed for '{key}': {source}")]
    Predicate {
        kind: ElementKind,
        key: String,
        source: anyhow::Error,
    },
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read policy {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid policy: {0}")]
    Parse(#[from] toml::de::Error),
}
