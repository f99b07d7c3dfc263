//! Graphsync Engine — policy-driven one-way reconciliation between graphs
//!
//! [`sync`] walks every node and edge of a source graph and decides, from
//! the predicate lists in [`SyncOptions`], whether to merge it into the
//! target, drop it from the target, or leave it alone. Attribute filters
//! decide what gets copied, and listeners for chosen events are kept quiet
//! on both graphs while the pass runs.

pub mod decision;
pub mod engine;
pub mod error;
pub mod options;
pub mod policy;
pub mod projector;
pub mod report;
pub mod suspend;


pub use decision::{Predicate, decide, predicate};
pub use engine::sync;
pub use error::{ElementKind, PolicyError, SyncError};
pub use options::SyncOptions;
pub use policy::{PredicateSpec, SyncPolicy};
pub use projector::{AttributeFilter, project};
pub use report::{ElementCounts, SyncReport};
pub use suspend::{DetachedListeners, ListenerSuspender, restore, suspend};
