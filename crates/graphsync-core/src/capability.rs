//! Capability traits a graph exposes to the sync engine
//!
//! The engine never names a concrete graph type. Anything that can answer
//! the read side, accept the write side and expose its listener registry
//! can take part in a sync pass.

use std::ops::ControlFlow;

use crate::error::Result;
use crate::events::{EventName, ListenerHandle};
use crate::model::Attributes;

/// Read access to a graph.
pub trait GraphView {
    fn has_node(&self, key: &str) -> bool;

    fn has_edge(&self, key: &str) -> bool;

    /// Visit every node in insertion order until the visitor breaks.
    fn for_each_node(&self, visit: &mut dyn FnMut(&str, &Attributes) -> ControlFlow<()>);

    /// Visit every edge as `(key, attributes, source, target)` in insertion
    /// order until the visitor breaks.
    fn for_each_edge(
        &self,
        visit: &mut dyn FnMut(&str, &Attributes, &str, &str) -> ControlFlow<()>,
    );

    /// Graph-level attributes.
    fn attributes(&self) -> &Attributes;

    fn node_attributes(&self, key: &str) -> Option<&Attributes>;

    fn edge_attributes(&self, key: &str) -> Option<&Attributes>;
}

/// Write access to a graph.
pub trait GraphMut: GraphView {
    /// Overlay onto the graph-level attributes.
    fn merge_attributes(&mut self, attributes: Attributes);

    /// Create the node, or overlay attributes onto it. Returns true if created.
    fn merge_node(&mut self, key: &str, attributes: Attributes) -> Result<bool>;

    /// Remove the node and every incident edge.
    fn drop_node(&mut self, key: &str) -> Result<()>;

    /// Create the edge between `source` and `target`, or overlay attributes
    /// onto it leaving its endpoints unchanged. Returns true if created.
    fn merge_edge_with_key(
        &mut self,
        key: &str,
        source: &str,
        target: &str,
        attributes: Attributes,
    ) -> Result<bool>;

    fn drop_edge(&mut self, key: &str) -> Result<()>;
}

/// Access to a graph's listener registry.
pub trait EventSource {
    /// Listeners registered for `event`, in registration order.
    fn listeners(&self, event: EventName) -> Vec<ListenerHandle>;

    /// Detach `handle` from `event`. Returns false if it was not attached.
    fn off(&mut self, event: EventName, handle: &ListenerHandle) -> bool;

    /// Attach `handle` to the end of `event`'s list.
    fn on(&mut self, event: EventName, handle: ListenerHandle);
}
