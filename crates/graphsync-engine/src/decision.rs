//! OR-combination of merge/drop predicates

use graphsync_core::GraphView;

/// A merge or drop rule, called with `(element key, source, target)`.
///
/// Predicates are expected to be pure reads of both graphs. An `Err`
/// aborts the sync pass it is evaluated in.
pub type Predicate = Box<dyn Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool>>;

/// Box a closure as a [`Predicate`].
pub fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&str, &dyn GraphView, &dyn GraphView) -> anyhow::Result<bool> + 'static,
{
    Box::new(f)
}

/// Logical OR over `predicates`, evaluated in order and stopping at the
/// first `true`. An empty list decides `false`.
pub fn decide(
    predicates: &[Predicate],
    key: &str,
    source: &dyn GraphView,
    target: &dyn GraphView,
) -> anyhow::Result<bool> {
    for predicate in predicates {
        if predicate(key, source, target)? {
            return Ok(true);
        }
    }
    Ok(false)
}
