//! Graph change events and the listener registry

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::model::Attributes;

/// Names of the events a graph emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventName {
    NodeAdded,
    NodeAttributesUpdated,
    NodeDropped,
    EdgeAdded,
    EdgeAttributesUpdated,
    EdgeDropped,
    /// Graph-level attributes changed.
    AttributesUpdated,
}

impl EventName {
    pub const ALL: [EventName; 7] = [
        EventName::NodeAdded,
        EventName::NodeAttributesUpdated,
        EventName::NodeDropped,
        EventName::EdgeAdded,
        EventName::EdgeAttributesUpdated,
        EventName::EdgeDropped,
        EventName::AttributesUpdated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::NodeAdded => "nodeAdded",
            EventName::NodeAttributesUpdated => "nodeAttributesUpdated",
            EventName::NodeDropped => "nodeDropped",
            EventName::EdgeAdded => "edgeAdded",
            EventName::EdgeAttributesUpdated => "edgeAttributesUpdated",
            EventName::EdgeDropped => "edgeDropped",
            EventName::AttributesUpdated => "attributesUpdated",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| GraphError::UnknownEvent(s.to_string()))
    }
}

/// A change emitted synchronously after a graph mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    NodeAdded {
        key: String,
        attributes: Attributes,
    },
    NodeAttributesUpdated {
        key: String,
        attributes: Attributes,
    },
    NodeDropped {
        key: String,
        attributes: Attributes,
    },
    EdgeAdded {
        key: String,
        source: String,
        target: String,
        attributes: Attributes,
    },
    EdgeAttributesUpdated {
        key: String,
        attributes: Attributes,
    },
    EdgeDropped {
        key: String,
        source: String,
        target: String,
        attributes: Attributes,
    },
    AttributesUpdated {
        attributes: Attributes,
    },
}

impl GraphEvent {
    /// The registry slot this event is delivered to.
    pub fn name(&self) -> EventName {
        match self {
            GraphEvent::NodeAdded { .. } => EventName::NodeAdded,
            GraphEvent::NodeAttributesUpdated { .. } => EventName::NodeAttributesUpdated,
            GraphEvent::NodeDropped { .. } => EventName::NodeDropped,
            GraphEvent::EdgeAdded { .. } => EventName::EdgeAdded,
            GraphEvent::EdgeAttributesUpdated { .. } => EventName::EdgeAttributesUpdated,
            GraphEvent::EdgeDropped { .. } => EventName::EdgeDropped,
            GraphEvent::AttributesUpdated { .. } => EventName::AttributesUpdated,
        }
    }
}

/// Callback invoked for each delivered event.
pub type Callback = dyn Fn(&GraphEvent);

/// Shared reference to a registered listener.
///
/// Identity is the callback allocation: clones of a handle compare equal,
/// two handles wrapping separately created closures never do.
#[derive(Clone)]
pub struct ListenerHandle {
    callback: Rc<Callback>,
}

impl ListenerHandle {
    pub fn new(callback: impl Fn(&GraphEvent) + 'static) -> Self {
        ListenerHandle {
            callback: Rc::new(callback),
        }
    }

    pub fn call(&self, event: &GraphEvent) {
        (self.callback)(event)
    }

    pub fn same_as(&self, other: &ListenerHandle) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle")
            .field("callback", &Rc::as_ptr(&self.callback))
            .finish()
    }
}

/// Ordered listeners per event name.
#[derive(Debug, Default, Clone)]
pub struct ListenerRegistry {
    slots: HashMap<EventName, Vec<ListenerHandle>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener to the end of the event's list.
    pub fn on(&mut self, event: EventName, handle: ListenerHandle) {
        self.slots.entry(event).or_default().push(handle);
    }

    /// Remove the first registration of `handle` for `event`.
    /// Returns false if it was not registered.
    pub fn off(&mut self, event: EventName, handle: &ListenerHandle) -> bool {
        let Some(slot) = self.slots.get_mut(&event) else {
            return false;
        };
        match slot.iter().position(|h| h.same_as(handle)) {
            Some(pos) => {
                slot.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Currently registered listeners for `event`, in registration order.
    pub fn listeners(&self, event: EventName) -> Vec<ListenerHandle> {
        self.slots.get(&event).cloned().unwrap_or_default()
    }

    pub fn listener_count(&self, event: EventName) -> usize {
        self.slots.get(&event).map_or(0, Vec::len)
    }

    /// Deliver `event` to every listener registered for its name.
    pub fn emit(&self, event: &GraphEvent) {
        let Some(slot) = self.slots.get(&event.name()) else {
            return;
        };
        for handle in slot {
            handle.call(event);
        }
    }
}
