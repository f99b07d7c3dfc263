//! Declarative sync policies loaded from TOML
//!
//! Closures cannot be written down in a file, so a policy names its
//! predicates from a fixed set and is compiled into [`SyncOptions`]:
//!
//! ```toml
//! sleep_events_target = ["nodeAdded", "edgeAdded"]
//! include_node_attributes = ["label", "color"]
//!
//! [[merge_node]]
//! kind = "always"
//!
//! [[drop_node]]
//! kind = "attribute_equals"
//! name = "deleted"
//! value = true
//! ```

use std::path::Path;

use graphsync_core::{AttrValue, EventName, GraphView};
use serde::{Deserialize, Serialize};

use crate::decision::{Predicate, predicate};
use crate::error::{ElementKind, PolicyError};
use crate::options::SyncOptions;
use crate::projector::AttributeFilter;

/// A named predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateSpec {
    Always,
    Never,
    /// The target holds an element with the same key.
    InTarget,
    /// The target holds no element with the same key.
    NotInTarget,
    /// The source element's attribute `name` equals `value`.
    AttributeEquals { name: String, value: AttrValue },
    /// The source element's attribute `name` differs from the target's,
    /// or the target lacks the element or the attribute.
    AttributeDiffers { name: String },
}

impl PredicateSpec {
    /// Build the predicate for elements of `kind`.
    pub fn compile(&self, kind: ElementKind) -> Predicate {
        match self.clone() {
            PredicateSpec::Always => predicate(|_, _, _| Ok(true)),
            PredicateSpec::Never => predicate(|_, _, _| Ok(false)),
            PredicateSpec::InTarget => {
                predicate(move |key, _, target| Ok(contains(target, kind, key)))
            }
            PredicateSpec::NotInTarget => {
                predicate(move |key, _, target| Ok(!contains(target, kind, key)))
            }
            PredicateSpec::AttributeEquals { name, value } => predicate(move |key, source, _| {
                Ok(lookup(source, kind, key, &name) == Some(&value))
            }),
            PredicateSpec::AttributeDiffers { name } => {
                predicate(move |key, source, target| {
                    let theirs = lookup(target, kind, key, &name);
                    Ok(theirs.is_none() || lookup(source, kind, key, &name) != theirs)
                })
            }
        }
    }
}

fn contains(graph: &dyn GraphView, kind: ElementKind, key: &str) -> bool {
    match kind {
        ElementKind::Node => graph.has_node(key),
        ElementKind::Edge => graph.has_edge(key),
    }
}

fn lookup<'g>(
    graph: &'g dyn GraphView,
    kind: ElementKind,
    key: &str,
    name: &str,
) -> Option<&'g AttrValue> {
    let attributes = match kind {
        ElementKind::Node => graph.node_attributes(key),
        ElementKind::Edge => graph.edge_attributes(key),
    };
    attributes.and_then(|attributes| attributes.get(name))
}

/// Serializable form of [`SyncOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncPolicy {
    pub merge_node: Vec<PredicateSpec>,
    pub merge_edge: Vec<PredicateSpec>,
    pub drop_node: Vec<PredicateSpec>,
    pub drop_edge: Vec<PredicateSpec>,
    pub sleep_events_source: Vec<EventName>,
    pub sleep_events_target: Vec<EventName>,
    pub include_attributes: Vec<String>,
    pub ignore_attributes: Vec<String>,
    pub include_node_attributes: Vec<String>,
    pub ignore_node_attributes: Vec<String>,
    pub include_edge_attributes: Vec<String>,
    pub ignore_edge_attributes: Vec<String>,
}

impl SyncPolicy {
    /// Merge every source node and edge, drop nothing.
    pub fn merge_all() -> Self {
        SyncPolicy {
            merge_node: vec![PredicateSpec::Always],
            merge_edge: vec![PredicateSpec::Always],
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_toml_str(&raw)?;
        tracing::debug!("Loaded sync policy from {}", path.display());
        Ok(policy)
    }

    /// Compile into options for one sync call.
    pub fn to_options(&self) -> SyncOptions {
        let compile = |specs: &[PredicateSpec], kind| {
            specs.iter().map(|spec| spec.compile(kind)).collect::<Vec<_>>()
        };

        SyncOptions {
            merge_node: compile(&self.merge_node, ElementKind::Node),
            merge_edge: compile(&self.merge_edge, ElementKind::Edge),
            drop_node: compile(&self.drop_node, ElementKind::Node),
            drop_edge: compile(&self.drop_edge, ElementKind::Edge),
            sleep_events_source: self.sleep_events_source.clone(),
            sleep_events_target: self.sleep_events_target.clone(),
            graph_attributes: AttributeFilter::new(
                self.include_attributes.iter().cloned(),
                self.ignore_attributes.iter().cloned(),
            ),
            node_attributes: AttributeFilter::new(
                self.include_node_attributes.iter().cloned(),
                self.ignore_node_attributes.iter().cloned(),
            ),
            edge_attributes: AttributeFilter::new(
                self.include_edge_attributes.iter().cloned(),
                self.ignore_edge_attributes.iter().cloned(),
            ),
        }
    }
}
