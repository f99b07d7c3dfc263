//! CLI command implementations

use anyhow::Context;
use graphsync_core::{Graph, GraphView, load_snapshot, save_snapshot};
use graphsync_engine::{SyncPolicy, sync as run_sync};
use std::path::PathBuf;

pub fn sync(
    source_path: PathBuf,
    target_path: PathBuf,
    policy_path: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let mut source = load_snapshot(&source_path)
        .with_context(|| format!("loading source graph {}", source_path.display()))?;
    let mut target = load_snapshot(&target_path)
        .with_context(|| format!("loading target graph {}", target_path.display()))?;

    let policy = match &policy_path {
        Some(path) => SyncPolicy::load(path)?,
        None => {
            tracing::info!("No policy given, merging every node and edge");
            SyncPolicy::merge_all()
        }
    };

    tracing::info!(
        "Syncing {} ({} nodes, {} edges) into {} ({} nodes, {} edges)",
        source_path.display(),
        source.node_count(),
        source.edge_count(),
        target_path.display(),
        target.node_count(),
        target.edge_count()
    );

    let report = run_sync(&mut source, &mut target, &policy.to_options())?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if dry_run {
        tracing::info!("Dry run, target left unchanged");
        return Ok(());
    }

    let destination = output.unwrap_or(target_path);
    save_snapshot(&target, &destination)?;
    tracing::info!("Wrote {}", destination.display());
    Ok(())
}

pub fn inspect(path: PathBuf) -> anyhow::Result<()> {
    let graph = load_snapshot(&path)
        .with_context(|| format!("loading graph {}", path.display()))?;
    print!("{}", summary(&graph));
    Ok(())
}

fn summary(graph: &Graph) -> String {
    let mut names: Vec<&str> = graph.attributes().keys().map(String::as_str).collect();
    names.sort_unstable();
    format!(
        "nodes: {}\nedges: {}\nattributes: {}\n",
        graph.node_count(),
        graph.edge_count(),
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphsync_core::test_utils::graph_from;
    use serde_json::json;

    #[test]
    fn test_summary_lists_sorted_attribute_names() {
        let mut graph = graph_from(&[("a", &[]), ("b", &[])], &[("ab", "a", "b")]);
        graph.set_attribute("zeta", json!(1));
        graph.set_attribute("alpha", json!(2));

        assert_eq!(summary(&graph), "nodes: 2\nedges: 1\nattributes: alpha, zeta\n");
    }
}
