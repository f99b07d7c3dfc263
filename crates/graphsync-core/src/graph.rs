//! Graph wrapper using petgraph::StableDiGraph with string keys

use std::ops::ControlFlow;

use indexmap::IndexMap;
use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use crate::capability::{EventSource, GraphMut, GraphView};
use crate::error::{GraphError, Result};
use crate::events::{EventName, GraphEvent, ListenerHandle, ListenerRegistry};
use crate::model::*;

/// An attributed directed multigraph keyed by strings.
///
/// Keys map to stable petgraph indices. The key maps are ordered, so
/// iteration follows insertion order even after removals.
pub struct Graph {
    inner: StableDiGraph<NodeData, EdgeData>,
    nodes: IndexMap<String, NodeIndex>,
    edges: IndexMap<String, EdgeIndex>,
    attributes: Attributes,
    listeners: ListenerRegistry,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .field("attributes", &self.attributes.len())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            attributes: Attributes::new(),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Add a new node. Fails if the key is taken.
    pub fn add_node(&mut self, key: impl Into<String>, attributes: Attributes) -> Result<()> {
        let key = key.into();
        if self.nodes.contains_key(&key) {
            return Err(GraphError::DuplicateNode(key));
        }
        self.insert_node(key, attributes);
        Ok(())
    }

    /// Add a new edge under an explicit key. Fails if the key is taken or
    /// either endpoint is missing.
    pub fn add_edge_with_key(
        &mut self,
        key: impl Into<String>,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> Result<()> {
        let key = key.into();
        if self.edges.contains_key(&key) {
            return Err(GraphError::DuplicateEdge(key));
        }
        self.insert_edge(key, source, target, attributes)
    }

    /// Set one graph-level attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttrValue) {
        self.merge_attributes(attrs([(name.into(), value)]));
    }

    /// Set one attribute on an existing node.
    pub fn set_node_attribute(
        &mut self,
        key: &str,
        name: impl Into<String>,
        value: AttrValue,
    ) -> Result<()> {
        if !self.nodes.contains_key(key) {
            return Err(GraphError::NodeNotFound(key.to_string()));
        }
        self.merge_node(key, attrs([(name.into(), value)]))?;
        Ok(())
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Node keys in insertion order.
    pub fn node_keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Edge keys in insertion order.
    pub fn edge_keys(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Source and target node keys of an edge.
    pub fn edge_endpoints(&self, key: &str) -> Option<(&str, &str)> {
        let idx = *self.edges.get(key)?;
        self.endpoints(idx)
    }

    /// The listener registry, read-only.
    pub fn registry(&self) -> &ListenerRegistry {
        &self.listeners
    }

    fn endpoints(&self, idx: EdgeIndex) -> Option<(&str, &str)> {
        let (source, target) = self.inner.edge_endpoints(idx)?;
        let source = self.inner.node_weight(source)?;
        let target = self.inner.node_weight(target)?;
        Some((source.key.as_str(), target.key.as_str()))
    }

    fn insert_node(&mut self, key: String, attributes: Attributes) {
        let idx = self
            .inner
            .add_node(NodeData::new(key.clone(), attributes.clone()));
        self.nodes.insert(key.clone(), idx);
        self.listeners
            .emit(&GraphEvent::NodeAdded { key, attributes });
    }

    fn insert_edge(
        &mut self,
        key: String,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> Result<()> {
        let source_idx = *self
            .nodes
            .get(source)
            .ok_or_else(|| GraphError::MissingEndpoint {
                edge: key.clone(),
                role: "source",
                node: source.to_string(),
            })?;
        let target_idx = *self
            .nodes
            .get(target)
            .ok_or_else(|| GraphError::MissingEndpoint {
                edge: key.clone(),
                role: "target",
                node: target.to_string(),
            })?;

        let idx = self.inner.add_edge(
            source_idx,
            target_idx,
            EdgeData::new(key.clone(), attributes.clone()),
        );
        self.edges.insert(key.clone(), idx);
        self.listeners.emit(&GraphEvent::EdgeAdded {
            key,
            source: source.to_string(),
            target: target.to_string(),
            attributes,
        });
        Ok(())
    }

    /// Keys of every edge touching `idx`, in insertion order, self-loops once.
    fn incident_edges(&self, idx: NodeIndex) -> Vec<String> {
        let mut positions: Vec<usize> = self
            .inner
            .edges_directed(idx, Direction::Outgoing)
            .chain(self.inner.edges_directed(idx, Direction::Incoming))
            .filter_map(|edge_ref| self.inner.edge_weight(edge_ref.id()))
            .filter_map(|edge| self.edges.get_index_of(&edge.key))
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
            .into_iter()
            .filter_map(|pos| self.edges.get_index(pos).map(|(key, _)| key.clone()))
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphView for Graph {
    fn has_node(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    fn has_edge(&self, key: &str) -> bool {
        self.edges.contains_key(key)
    }

    fn for_each_node(&self, visit: &mut dyn FnMut(&str, &Attributes) -> ControlFlow<()>) {
        for (key, &idx) in &self.nodes {
            let Some(node) = self.inner.node_weight(idx) else {
                continue;
            };
            if visit(key, &node.attributes).is_break() {
                break;
            }
        }
    }

    fn for_each_edge(
        &self,
        visit: &mut dyn FnMut(&str, &Attributes, &str, &str) -> ControlFlow<()>,
    ) {
        for (key, &idx) in &self.edges {
            let (Some(edge), Some((source, target))) =
                (self.inner.edge_weight(idx), self.endpoints(idx))
            else {
                continue;
            };
            if visit(key, &edge.attributes, source, target).is_break() {
                break;
            }
        }
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn node_attributes(&self, key: &str) -> Option<&Attributes> {
        let idx = *self.nodes.get(key)?;
        self.inner.node_weight(idx).map(|node| &node.attributes)
    }

    fn edge_attributes(&self, key: &str) -> Option<&Attributes> {
        let idx = *self.edges.get(key)?;
        self.inner.edge_weight(idx).map(|edge| &edge.attributes)
    }
}

impl GraphMut for Graph {
    fn merge_attributes(&mut self, attributes: Attributes) {
        overlay(&mut self.attributes, attributes.clone());
        self.listeners
            .emit(&GraphEvent::AttributesUpdated { attributes });
    }

    fn merge_node(&mut self, key: &str, attributes: Attributes) -> Result<bool> {
        let Some(&idx) = self.nodes.get(key) else {
            self.insert_node(key.to_string(), attributes);
            return Ok(true);
        };
        if let Some(node) = self.inner.node_weight_mut(idx) {
            overlay(&mut node.attributes, attributes.clone());
        }
        self.listeners.emit(&GraphEvent::NodeAttributesUpdated {
            key: key.to_string(),
            attributes,
        });
        Ok(false)
    }

    fn drop_node(&mut self, key: &str) -> Result<()> {
        let idx = *self
            .nodes
            .get(key)
            .ok_or_else(|| GraphError::NodeNotFound(key.to_string()))?;

        for edge in self.incident_edges(idx) {
            self.drop_edge(&edge)?;
        }

        self.nodes.shift_remove(key);
        let node = self
            .inner
            .remove_node(idx)
            .ok_or_else(|| GraphError::NodeNotFound(key.to_string()))?;
        self.listeners.emit(&GraphEvent::NodeDropped {
            key: node.key,
            attributes: node.attributes,
        });
        Ok(())
    }

    fn merge_edge_with_key(
        &mut self,
        key: &str,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> Result<bool> {
        let Some(&idx) = self.edges.get(key) else {
            self.insert_edge(key.to_string(), source, target, attributes)?;
            return Ok(true);
        };
        if let Some(edge) = self.inner.edge_weight_mut(idx) {
            overlay(&mut edge.attributes, attributes.clone());
        }
        self.listeners.emit(&GraphEvent::EdgeAttributesUpdated {
            key: key.to_string(),
            attributes,
        });
        Ok(false)
    }

    fn drop_edge(&mut self, key: &str) -> Result<()> {
        let idx = *self
            .edges
            .get(key)
            .ok_or_else(|| GraphError::EdgeNotFound(key.to_string()))?;
        let (source, target) = self
            .endpoints(idx)
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .ok_or_else(|| GraphError::EdgeNotFound(key.to_string()))?;

        self.edges.shift_remove(key);
        let edge = self
            .inner
            .remove_edge(idx)
            .ok_or_else(|| GraphError::EdgeNotFound(key.to_string()))?;
        self.listeners.emit(&GraphEvent::EdgeDropped {
            key: edge.key,
            source,
            target,
            attributes: edge.attributes,
        });
        Ok(())
    }
}

impl EventSource for Graph {
    fn listeners(&self, event: EventName) -> Vec<ListenerHandle> {
        self.listeners.listeners(event)
    }

    fn off(&mut self, event: EventName, handle: &ListenerHandle) -> bool {
        self.listeners.off(event, handle)
    }

    fn on(&mut self, event: EventName, handle: ListenerHandle) {
        self.listeners.on(event, handle)
    }
}
