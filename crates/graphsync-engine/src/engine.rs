//! One-directional reconciliation of a target graph from a source graph

use std::ops::ControlFlow;

use graphsync_core::{Attributes, EventSource, GraphMut, GraphView};
use tracing::{debug, info, trace};

use crate::decision::{Predicate, decide};
use crate::error::{ElementKind, SyncError};
use crate::options::SyncOptions;
use crate::report::{ElementCounts, SyncReport};
use crate::suspend::ListenerSuspender;

/// Reconcile `target` from `source` under `options`.
///
/// Graph-level attributes are always merged. Each source node, then each
/// source edge, is merged when any merge predicate holds and dropped when
/// any drop predicate holds, the latter only if the target held the element
/// before its merge step. Elements only present in the target are never
/// visited.
///
/// Listeners for the configured sleep events are detached from both graphs
/// for the duration of the call and reattached before it returns, including
/// when the pass fails part way. The first failure aborts the pass.
pub fn sync<S, T>(
    source: &mut S,
    target: &mut T,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError>
where
    S: GraphView + EventSource,
    T: GraphMut + EventSource,
{
    let source = ListenerSuspender::new(source, &options.sleep_events_source);
    let mut target = ListenerSuspender::new(target, &options.sleep_events_target);
    debug!(
        "Sync started: {} source listener(s) and {} target listener(s) asleep",
        source.suspended(),
        target.suspended()
    );

    let outcome = reconcile(&*source, &mut *target, options);

    source.release();
    target.release();

    match &outcome {
        Ok(report) => info!(
            "Sync finished: nodes {} created, {} updated, {} dropped; edges {} created, {} updated, {} dropped",
            report.nodes.created,
            report.nodes.updated,
            report.nodes.dropped,
            report.edges.created,
            report.edges.updated,
            report.edges.dropped
        ),
        Err(e) => debug!("Sync aborted: {}", e),
    }
    outcome
}

fn reconcile<S, T>(source: &S, target: &mut T, options: &SyncOptions) -> Result<SyncReport, SyncError>
where
    S: GraphView,
    T: GraphMut,
{
    let mut report = SyncReport::default();

    target.merge_attributes(options.graph_attributes.project(source.attributes()));

    let mut failure = None;
    source.for_each_node(&mut |key, attributes| {
        match reconcile_node(key, attributes, source, target, options, &mut report.nodes) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    let mut failure = None;
    source.for_each_edge(&mut |key, attributes, from, to| {
        let edge = SourceEdge { key, attributes, from, to };
        match reconcile_edge(&edge, source, target, options, &mut report.edges) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                failure = Some(e);
                ControlFlow::Break(())
            }
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }

    Ok(report)
}

fn reconcile_node<S, T>(
    key: &str,
    attributes: &Attributes,
    source: &S,
    target: &mut T,
    options: &SyncOptions,
    counts: &mut ElementCounts,
) -> Result<(), SyncError>
where
    S: GraphView,
    T: GraphMut,
{
    let existed = target.has_node(key);

    let merged = if evaluate(&options.merge_node, ElementKind::Node, key, source, &*target)? {
        let projected = options.node_attributes.project(attributes);
        Some(target.merge_node(key, projected)?)
    } else {
        None
    };

    let dropped = existed && evaluate(&options.drop_node, ElementKind::Node, key, source, &*target)?;
    if dropped {
        target.drop_node(key)?;
    }

    trace!("node {}: existed={} merged={:?} dropped={}", key, existed, merged, dropped);
    counts.record(merged, dropped);
    Ok(())
}

struct SourceEdge<'a> {
    key: &'a str,
    attributes: &'a Attributes,
    from: &'a str,
    to: &'a str,
}

fn reconcile_edge<S, T>(
    edge: &SourceEdge<'_>,
    source: &S,
    target: &mut T,
    options: &SyncOptions,
    counts: &mut ElementCounts,
) -> Result<(), SyncError>
where
    S: GraphView,
    T: GraphMut,
{
    let key = edge.key;
    let existed = target.has_edge(key);

    let merged = if evaluate(&options.merge_edge, ElementKind::Edge, key, source, &*target)? {
        let projected = options.edge_attributes.project(edge.attributes);
        Some(target.merge_edge_with_key(key, edge.from, edge.to, projected)?)
    } else {
        None
    };

    let dropped = existed && evaluate(&options.drop_edge, ElementKind::Edge, key, source, &*target)?;
    if dropped {
        target.drop_edge(key)?;
    }

    trace!("edge {}: existed={} merged={:?} dropped={}", key, existed, merged, dropped);
    counts.record(merged, dropped);
    Ok(())
}

fn evaluate(
    predicates: &[Predicate],
    kind: ElementKind,
    key: &str,
    source: &dyn GraphView,
    target: &dyn GraphView,
) -> Result<bool, SyncError> {
    decide(predicates, key, source, target).map_err(|source| SyncError::Predicate {
        kind,
        key: key.to_string(),
        source,
    })
}
