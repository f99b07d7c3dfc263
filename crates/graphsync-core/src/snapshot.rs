//! Serialized graph snapshots

use std::ops::ControlFlow;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capability::{GraphMut, GraphView};
use crate::error::Result;
use crate::graph::Graph;
use crate::model::Attributes;

/// Snapshot format version written by `save_snapshot`.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub key: String,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub key: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Plain data form of a graph. Listeners are not part of a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl Graph {
    /// Copy the graph's contents into a snapshot, in insertion order.
    pub fn export(&self) -> GraphSnapshot {
        let mut snapshot = GraphSnapshot {
            attributes: self.attributes().clone(),
            ..GraphSnapshot::default()
        };
        self.for_each_node(&mut |key, attributes| {
            snapshot.nodes.push(NodeRecord {
                key: key.to_string(),
                attributes: attributes.clone(),
            });
            ControlFlow::Continue(())
        });
        self.for_each_edge(&mut |key, attributes, source, target| {
            snapshot.edges.push(EdgeRecord {
                key: key.to_string(),
                source: source.to_string(),
                target: target.to_string(),
                attributes: attributes.clone(),
            });
            ControlFlow::Continue(())
        });
        snapshot
    }

    /// Build a fresh graph from a snapshot.
    pub fn import(snapshot: GraphSnapshot) -> Result<Graph> {
        let mut graph = Graph::new();
        graph.merge_attributes(snapshot.attributes);
        for node in snapshot.nodes {
            graph.add_node(node.key, node.attributes)?;
        }
        for edge in snapshot.edges {
            graph.add_edge_with_key(edge.key, &edge.source, &edge.target, edge.attributes)?;
        }
        Ok(graph)
    }
}

/// Write a graph to `path` as pretty JSON.
pub fn save_snapshot(graph: &Graph, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut snapshot = graph.export();
    snapshot.version = Some(SNAPSHOT_VERSION);
    snapshot.saved_at = Some(chrono::Utc::now().to_rfc3339());

    let json_str = serde_json::to_string_pretty(&snapshot)?;
    std::fs::write(path, json_str)?;

    tracing::debug!(
        "Graph snapshot saved: {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(())
}

/// Read a graph from a JSON snapshot at `path`.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Graph> {
    let json_str = std::fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json_str)?;
    let graph = Graph::import(snapshot)?;

    tracing::debug!(
        "Graph snapshot loaded from: {} ({} nodes, {} edges)",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
