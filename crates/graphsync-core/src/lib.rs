//! Graphsync Core — attributed graph model, change events and snapshots

pub mod capability;
pub mod error;
pub mod events;
pub mod graph;
pub mod model;
pub mod snapshot;


#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use capability::{EventSource, GraphMut, GraphView};
pub use error::GraphError;
pub use events::{EventName, GraphEvent, ListenerHandle, ListenerRegistry};
pub use graph::Graph;
pub use model::{AttrValue, Attributes, EdgeData, NodeData, attrs, overlay};
pub use snapshot::{EdgeRecord, GraphSnapshot, NodeRecord, SNAPSHOT_VERSION, load_snapshot, save_snapshot};
