//! Per-call sync configuration

use std::fmt;

use graphsync_core::{EventName, GraphView};

use crate::decision::Predicate;
use crate::projector::AttributeFilter;

/// Policy for one sync pass. Every list defaults to empty, which merges
/// graph-level attributes and leaves nodes and edges alone.
#[derive(Default)]
pub struct SyncOptions {
    pub merge_node: Vec<Predicate>,
    pub merge_edge: Vec<Predicate>,
    /// Only consulted for nodes the target held before the merge step.
    pub drop_node: Vec<Predicate>,
    /// Only consulted for edges the target held before the merge step.
    pub drop_edge: Vec<Predicate>,
    pub sleep_events_source: Vec<EventName>,
    pub sleep_events_target: Vec<EventName>,
    pub graph_attributes: AttributeFilter,
    pub node_attributes: AttributeFilter,
    pub edge_attributes: AttributeFilter,
}

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_node_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool> + 'static,
    {
        self.merge_node.push(Box::new(f));
        self
    }

    pub fn merge_edge_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool> + 'static,
    {
        self.merge_edge.push(Box::new(f));
        self
    }

    pub fn drop_node_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool> + 'static,
    {
        self.drop_node.push(Box::new(f));
        self
    }

    pub fn drop_edge_when<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool> + 'static,
    {
        self.drop_edge.push(Box::new(f));
        self
    }

    pub fn sleep_source(mut self, events: impl IntoIterator<Item = EventName>) -> Self {
        self.sleep_events_source.extend(events);
        self
    }

    pub fn sleep_target(mut self, events: impl IntoIterator<Item = EventName>) -> Self {
        self.sleep_events_target.extend(events);
        self
    }

    pub fn graph_attributes(mut self, filter: AttributeFilter) -> Self {
        self.graph_attributes = filter;
        self
    }

    pub fn node_attributes(mut self, filter: AttributeFilter) -> Self {
        self.node_attributes = filter;
        self
    }

    pub fn edge_attributes(mut self, filter: AttributeFilter) -> Self {
        self.edge_attributes = filter;
        self
    }
}

impl fmt::Debug for SyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOptions")
            .field("merge_node", &self.merge_node.len())
            .field("merge_edge", &self.merge_edge.len())
            .field("drop_node", &self.drop_node.len())
            .field("drop_edge", &self.drop_edge.len())
            .field("sleep_events_source", &self.sleep_events_source)
            .field("sleep_events_target", &self.sleep_events_target)
            .field("graph_attributes", &self.graph_attributes)
            .field("node_attributes", &self.node_attributes)
            .field("edge_attributes", &self.edge_attributes)
            .finish()
    }
}
