//! Topology name resolution.

use serde_json::Value;
use tracing::debug;

use crate::error::StatsError;
use crate::ui::{self, client::UiClient};

/// Find a topology id by name in a topology summary document.
///
/// The scan is linear and the first record whose `name` matches wins
/// (exact, case-sensitive). Duplicate names should not occur under normal
/// cluster operation; when they do, first occurrence wins.
pub fn find_topology_id(summary: &Value, name: &str) -> Result<String, StatsError> {
    let topologies = summary
        .get("topologies")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            StatsError::DataShape("topology summary has no topologies list".to_string())
        })?;

    for topology in topologies {
        if topology.get("name").and_then(Value::as_str) == Some(name) {
            return topology
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StatsError::DataShape(format!("topology {name} has no id")));
        }
    }

    Err(StatsError::TopologyNotFound(name.to_string()))
}

/// Resolve a topology name to its internal id via the summary resource.
pub async fn resolve_topology_id(client: &UiClient, name: &str) -> Result<String, StatsError> {
    let summary = client.fetch(ui::TOPOLOGY_SUMMARY).await?;
    let topology_id = find_topology_id(&summary, name)?;
    debug!("Resolved topology '{}' to {}", name, topology_id);
    Ok(topology_id)
}
