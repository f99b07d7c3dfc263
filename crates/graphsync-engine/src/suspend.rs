//! Temporary detachment of graph listeners

use std::ops::{Deref, DerefMut};

use graphsync_core::{EventName, EventSource, ListenerHandle};
use tracing::trace;

/// Listeners taken off a graph, grouped by the event they were attached to.
#[derive(Debug, Default)]
#[must_use = "detached listeners are lost unless restored"]
pub struct DetachedListeners {
    detached: Vec<(EventName, Vec<ListenerHandle>)>,
}

impl DetachedListeners {
    /// Number of listener registrations held.
    pub fn len(&self) -> usize {
        self.detached.iter().map(|(_, handles)| handles.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Detach every listener currently registered for each of `events`.
pub fn suspend<G>(graph: &mut G, events: &[EventName]) -> DetachedListeners
where
    G: EventSource + ?Sized,
{
    let mut detached = Vec::with_capacity(events.len());
    for &event in events {
        let handles = graph.listeners(event);
        for handle in &handles {
            graph.off(event, handle);
        }
        trace!("Suspended {} listener(s) for {}", handles.len(), event);
        detached.push((event, handles));
    }
    DetachedListeners { detached }
}

/// Reattach listeners to the events they came from, in their original order.
pub fn restore<G>(graph: &mut G, listeners: DetachedListeners)
where
    G: EventSource + ?Sized,
{
    for (event, handles) in listeners.detached {
        trace!("Restoring {} listener(s) for {}", handles.len(), event);
        for handle in handles {
            graph.on(event, handle);
        }
    }
}

/// Borrows a graph with some of its listeners detached and reattaches them
/// when dropped, whichever way the scope is left.
pub struct ListenerSuspender<'g, G: EventSource> {
    graph: &'g mut G,
    detached: Option<DetachedListeners>,
}

impl<'g, G: EventSource> ListenerSuspender<'g, G> {
    pub fn new(graph: &'g mut G, events: &[EventName]) -> Self {
        let detached = suspend(graph, events);
        ListenerSuspender {
            graph,
            detached: Some(detached),
        }
    }

    /// Number of listener registrations currently detached.
    pub fn suspended(&self) -> usize {
        self.detached.as_ref().map_or(0, DetachedListeners::len)
    }

    /// Reattach now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl<G: EventSource> Deref for ListenerSuspender<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        &*self.graph
    }
}

impl<G: EventSource> DerefMut for ListenerSuspender<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        &mut *self.graph
    }
}

impl<G: EventSource> Drop for ListenerSuspender<'_, G> {
    fn drop(&mut self) {
        if let Some(detached) = self.detached.take() {
            restore(&mut *self.graph, detached);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsync_core::test_utils::Recorder;
    use graphsync_core::{Attributes, Graph, GraphMut};

    #[test]
    fn suspend_and_restore_preserve_order() {
        let mut graph = Graph::new();
        let first = Recorder::new();
        let second = Recorder::new();
        let a = first.attach(&mut graph, EventName::NodeAdded);
        let b = second.attach(&mut graph, EventName::NodeAdded);

        let detached = suspend(&mut graph, &[EventName::NodeAdded]);
        assert_eq!(detached.len(), 2);
        assert!(graph.listeners(EventName::NodeAdded).is_empty());

        restore(&mut graph, detached);
        let restored = graph.listeners(EventName::NodeAdded);
        assert_eq!(restored.len(), 2);
        assert!(restored[0].same_as(&a));
        assert!(restored[1].same_as(&b));
    }

    #[test]
    fn empty_event_list_is_a_no_op() {
        let mut graph = Graph::new();
        let recorder = Recorder::new();
        recorder.attach(&mut graph, EventName::NodeAdded);

        let detached = suspend(&mut graph, &[]);
        assert!(detached.is_empty());
        restore(&mut graph, detached);

        assert_eq!(graph.listeners(EventName::NodeAdded).len(), 1);
    }

    #[test]
    fn unnamed_events_keep_firing() {
        let mut graph = Graph::new();
        let added = Recorder::new();
        let dropped = Recorder::new();
        added.attach(&mut graph, EventName::NodeAdded);
        dropped.attach(&mut graph, EventName::NodeDropped);

        {
            let mut guard = ListenerSuspender::new(&mut graph, &[EventName::NodeAdded]);
            assert_eq!(guard.suspended(), 1);
            guard.add_node("a", Attributes::new()).unwrap();
            guard.drop_node("a").unwrap();
        }

        assert_eq!(added.count(), 0);
        assert_eq!(dropped.count(), 1);

        graph.add_node("b", Attributes::new()).unwrap();
        assert_eq!(added.count(), 1);
    }

    #[test]
    fn guard_restores_on_panic() {
        let mut graph = Graph::new();
        let recorder = Recorder::new();
        recorder.attach(&mut graph, EventName::NodeAdded);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let guard = ListenerSuspender::new(&mut graph, &[EventName::NodeAdded]);
            if guard.suspended() == 1 {
                panic!("mutation failed");
            }
        }));

        assert!(outcome.is_err());
        assert_eq!(graph.listeners(EventName::NodeAdded).len(), 1);
    }

    #[test]
    fn duplicate_event_names_restore_once() {
        let mut graph = Graph::new();
        let recorder = Recorder::new();
        recorder.attach(&mut graph, EventName::EdgeAdded);

        let guard = ListenerSuspender::new(
            &mut graph,
            &[EventName::EdgeAdded, EventName::EdgeAdded],
        );
        assert_eq!(guard.suspended(), 1);
        guard.release();

        assert_eq!(graph.listeners(EventName::EdgeAdded).len(), 1);
    }
}
