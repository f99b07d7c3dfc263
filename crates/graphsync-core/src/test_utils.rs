//! Test utilities for Graphsync

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{EventName, GraphEvent, ListenerHandle};
use crate::capability::EventSource;
use crate::graph::Graph;
use crate::model::{AttrValue, attrs};

/// Build a graph from `(key, attributes)` nodes and `(key, source, target)` edges.
pub fn graph_from(
    nodes: &[(&str, &[(&str, AttrValue)])],
    edges: &[(&str, &str, &str)],
) -> Graph {
    let mut graph = Graph::new();
    for (key, pairs) in nodes {
        let attributes = attrs(pairs.iter().map(|(k, v)| (*k, v.clone())));
        graph.add_node(*key, attributes).unwrap();
    }
    for (key, source, target) in edges {
        graph
            .add_edge_with_key(*key, source, target, Default::default())
            .unwrap();
    }
    graph
}

/// Records every event delivered to it.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<GraphEvent>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener handle that appends to this recorder.
    pub fn handle(&self) -> ListenerHandle {
        let events = Rc::clone(&self.events);
        ListenerHandle::new(move |event| events.borrow_mut().push(event.clone()))
    }

    /// Register a fresh handle on `graph` for `event` and return it.
    pub fn attach(&self, graph: &mut impl EventSource, event: EventName) -> ListenerHandle {
        let handle = self.handle();
        graph.on(event, handle.clone());
        handle
    }

    pub fn events(&self) -> Vec<GraphEvent> {
        self.events.borrow().clone()
    }

    pub fn names(&self) -> Vec<EventName> {
        self.events.borrow().iter().map(GraphEvent::name).collect()
    }

    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
