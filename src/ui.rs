//! Storm UI REST API access.

pub mod client;
pub mod topology;

/// Cluster-level counters resource.
pub const CLUSTER_SUMMARY: &str = "/api/v1/cluster/summary";

/// Per-topology summary list resource.
pub const TOPOLOGY_SUMMARY: &str = "/api/v1/topology/summary";

/// Supervisor summary list resource.
pub const SUPERVISOR_SUMMARY: &str = "/api/v1/supervisor/summary";

/// Detail resource for one topology.
pub fn topology_detail(topology_id: &str) -> String {
    format!("/api/v1/topology/{topology_id}")
}

/// Detail resource for one component of a topology.
pub fn component_detail(topology_id: &str, component: &str) -> String {
    format!("/api/v1/topology/{topology_id}/component/{component}")
}
