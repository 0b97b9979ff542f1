//! Report dispatch.
//!
//! Four report granularities, selected once per invocation from which
//! identifying arguments were supplied. Each mode fetches its resources
//! first (batched where several are needed), then renders its sections in
//! a fixed order regardless of fetch completion order.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::error::StatsError;
use crate::output::table::{Align, format_section};
use crate::ui;
use crate::ui::client::{UiClient, take_doc};
use crate::ui::topology::resolve_topology_id;

const CLUSTER_SUMMARY_COLUMNS: &[&str] = &[
    "stormVersion",
    "nimbusUptime",
    "supervisors",
    "slotsTotal",
    "slotsUsed",
    "slotsFree",
    "executorsTotal",
    "tasksTotal",
];

const TOPOLOGY_SUMMARY_COLUMNS: &[&str] = &[
    "name",
    "id",
    "status",
    "uptime",
    "workersTotal",
    "executorsTotal",
    "tasksTotal",
];

const SUPERVISOR_SUMMARY_COLUMNS: &[&str] = &["id", "host", "uptime", "slotsTotal", "slotsUsed"];

const TOPOLOGY_STATS_COLUMNS: &[&str] = &[
    "windowPretty",
    "emitted",
    "transferred",
    "completeLatency",
    "acked",
    "failed",
];

const SPOUT_LIST_COLUMNS: &[&str] = &[
    "spoutId",
    "emitted",
    "transferred",
    "completeLatency",
    "acked",
    "failed",
];

const BOLT_LIST_COLUMNS: &[&str] = &[
    "boltId",
    "executors",
    "tasks",
    "emitted",
    "transferred",
    "capacity",
    "executeLatency",
    "executed",
    "processLatency",
    "acked",
    "failed",
    "lastError",
];

const COMPONENT_SUMMARY_COLUMNS: &[&str] = &["id", "name", "executors", "tasks"];

const SPOUT_STATS_COLUMNS: &[&str] = &[
    "windowPretty",
    "emitted",
    "transferred",
    "completeLatency",
    "acked",
    "failed",
];

const SPOUT_OUTPUT_COLUMNS: &[&str] = &[
    "stream",
    "emitted",
    "transferred",
    "completeLatency",
    "acked",
    "failed",
];

const SPOUT_EXECUTOR_COLUMNS: &[&str] = &[
    "id",
    "uptime",
    "host",
    "port",
    "emitted",
    "transferred",
    "completeLatency",
    "acked",
    "failed",
];

const BOLT_STATS_COLUMNS: &[&str] = &[
    "windowPretty",
    "emitted",
    "transferred",
    "executeLatency",
    "executed",
    "processLatency",
    "acked",
    "failed",
];

const BOLT_INPUT_COLUMNS: &[&str] = &[
    "component",
    "stream",
    "executeLatency",
    "processLatency",
    "executed",
    "acked",
    "failed",
];

const BOLT_OUTPUT_COLUMNS: &[&str] = &["stream", "emitted", "transferred"];

/// Report granularity, fixed at entry from the supplied arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMode {
    /// Cluster, topology, and supervisor summaries.
    Cluster,
    /// One topology's summary, stats, and component lists.
    Topology { name: String },
    /// Detail for a single spout or bolt.
    Component { topology: String, component: String },
    /// Detail for every component declared in the topology.
    AllComponents { topology: String },
}

impl ReportMode {
    /// Select the report mode from the supplied arguments.
    ///
    /// An explicit component name takes precedence over `--all`.
    pub fn from_args(topology: Option<&str>, component: Option<&str>, all_components: bool) -> Self {
        match (topology, component) {
            (None, _) => ReportMode::Cluster,
            (Some(topology), Some(component)) => ReportMode::Component {
                topology: topology.to_string(),
                component: component.to_string(),
            },
            (Some(topology), None) if all_components => ReportMode::AllComponents {
                topology: topology.to_string(),
            },
            (Some(topology), None) => ReportMode::Topology {
                name: topology.to_string(),
            },
        }
    }
}

/// Build the report for the selected mode as a list of formatted sections.
pub async fn build_report(client: &UiClient, mode: &ReportMode) -> Result<Vec<String>> {
    match mode {
        ReportMode::Cluster => cluster_report(client).await,
        ReportMode::Topology { name } => topology_report(client, name).await,
        ReportMode::Component {
            topology,
            component,
        } => component_report(client, topology, component).await,
        ReportMode::AllComponents { topology } => all_components_report(client, topology).await,
    }
}

/// Build and print the report for the selected mode.
pub async fn run_report(client: &UiClient, mode: &ReportMode) -> Result<()> {
    for section in build_report(client, mode).await? {
        println!("{section}");
    }
    Ok(())
}

/// Cluster-wide report: one batched fetch, three fixed sections.
async fn cluster_report(client: &UiClient) -> Result<Vec<String>> {
    let mut docs = client
        .fetch_many([ui::CLUSTER_SUMMARY, ui::TOPOLOGY_SUMMARY, ui::SUPERVISOR_SUMMARY])
        .await;

    let cluster = take_doc(&mut docs, ui::CLUSTER_SUMMARY)?;
    let topologies = take_doc(&mut docs, ui::TOPOLOGY_SUMMARY)?;
    let supervisors = take_doc(&mut docs, ui::SUPERVISOR_SUMMARY)?;

    let sections = vec![
        format_section(
            "Cluster summary",
            &cluster,
            CLUSTER_SUMMARY_COLUMNS,
            Align::Right,
            &[],
        ),
        format_section(
            "Topology summary",
            required_list(&topologies, "topologies")?,
            TOPOLOGY_SUMMARY_COLUMNS,
            Align::Right,
            &[],
        ),
        format_section(
            "Supervisor summary",
            required_list(&supervisors, "supervisors")?,
            SUPERVISOR_SUMMARY_COLUMNS,
            Align::Right,
            &[("host", Align::Left), ("uptime", Align::Left)],
        ),
    ];

    Ok(sections)
}

/// Topology summary report: resolve the id, fetch the detail document.
async fn topology_report(client: &UiClient, name: &str) -> Result<Vec<String>> {
    let topology_id = resolve_topology_id(client, name).await?;
    let detail = client.fetch(&ui::topology_detail(&topology_id)).await?;
    topology_sections(&detail)
}

/// Sections for one topology detail document.
fn topology_sections(detail: &Value) -> Result<Vec<String>> {
    let mut sections = vec![format_section(
        "Topology summary",
        detail,
        TOPOLOGY_SUMMARY_COLUMNS,
        Align::Right,
        &[],
    )];

    let stats = detail.get("topologyStats").ok_or_else(|| {
        StatsError::DataShape("topology detail has no topologyStats".to_string())
    })?;
    sections.push(format_section(
        "Topology stats",
        stats,
        TOPOLOGY_STATS_COLUMNS,
        Align::Right,
        &[],
    ));

    // Spouts are optional; some topologies have none
    if let Some(spouts) = detail.get("spouts") {
        if has_rows(spouts) {
            sections.push(format_section(
                "Spouts (All time)",
                spouts,
                SPOUT_LIST_COLUMNS,
                Align::Right,
                &[("spoutId", Align::Left)],
            ));
        }
    }

    let bolts = required_list(detail, "bolts")?;
    if has_rows(bolts) {
        sections.push(format_section(
            "Bolt (All time)",
            bolts,
            BOLT_LIST_COLUMNS,
            Align::Right,
            &[("boltId", Align::Left)],
        ));
    }

    Ok(sections)
}

/// Single component report.
async fn component_report(
    client: &UiClient,
    topology: &str,
    component: &str,
) -> Result<Vec<String>> {
    let topology_id = resolve_topology_id(client, topology).await?;
    let path = ui::component_detail(&topology_id, component);

    let detail = match client.fetch(&path).await {
        Ok(detail) => detail,
        Err(e) if e.is_not_found() => {
            return Err(StatsError::ComponentNotFound(component.to_string()).into());
        }
        Err(e) => return Err(e.into()),
    };

    component_sections(&detail)
}

/// Sections for one component detail document.
///
/// The summary always renders; the stats subsections depend on the declared
/// componentType. An unknown or absent type renders the summary alone.
fn component_sections(detail: &Value) -> Result<Vec<String>> {
    let mut sections = vec![format_section(
        "Component summary",
        detail,
        COMPONENT_SUMMARY_COLUMNS,
        Align::Right,
        &[],
    )];

    match detail.get("componentType").and_then(Value::as_str) {
        Some("spout") => {
            let summary = required_list(detail, "spoutSummary")?;
            let latest = summary
                .as_array()
                .and_then(|windows| windows.last())
                .ok_or_else(|| StatsError::DataShape("spoutSummary is empty".to_string()))?;
            sections.push(format_section(
                "Spout stats",
                latest,
                SPOUT_STATS_COLUMNS,
                Align::Right,
                &[("windowPretty", Align::Left)],
            ));

            let output = required_list(detail, "outputStats")?;
            if has_rows(output) {
                sections.push(format_section(
                    "Output stats (All time)",
                    output,
                    SPOUT_OUTPUT_COLUMNS,
                    Align::Right,
                    &[("stream", Align::Left)],
                ));
            }

            let executors = required_list(detail, "executorStats")?;
            if has_rows(executors) {
                sections.push(format_section(
                    "Executors (All time)",
                    executors,
                    SPOUT_EXECUTOR_COLUMNS,
                    Align::Right,
                    &[("host", Align::Left)],
                ));
            }
        }
        Some("bolt") => {
            let stats = required_list(detail, "boltStats")?;
            if has_rows(stats) {
                sections.push(format_section(
                    "Bolt stats",
                    stats,
                    BOLT_STATS_COLUMNS,
                    Align::Right,
                    &[("windowPretty", Align::Left)],
                ));
            }

            let input = required_list(detail, "inputStats")?;
            if has_rows(input) {
                sections.push(format_section(
                    "Input stats (All time)",
                    input,
                    BOLT_INPUT_COLUMNS,
                    Align::Right,
                    &[("component", Align::Left)],
                ));
            }

            let output = required_list(detail, "outputStats")?;
            if has_rows(output) {
                sections.push(format_section(
                    "Output stats (All time)",
                    output,
                    BOLT_OUTPUT_COLUMNS,
                    Align::Right,
                    &[("stream", Align::Left)],
                ));
            }
        }
        _ => {}
    }

    Ok(sections)
}

/// All-components report: enumerate the topology's spouts and bolts, fetch
/// every component detail in one batch, render in declared order.
async fn all_components_report(client: &UiClient, topology: &str) -> Result<Vec<String>> {
    let topology_id = resolve_topology_id(client, topology).await?;
    let detail = client.fetch(&ui::topology_detail(&topology_id)).await?;

    let spouts = component_names(&detail, "spouts", "spoutId")?;
    let bolts = component_names(&detail, "bolts", "boltId")?;

    if let Some(duplicate) = spouts.iter().find(|name| bolts.contains(name)) {
        return Err(StatsError::DataShape(format!(
            "component {duplicate} is declared as both spout and bolt"
        ))
        .into());
    }

    let names: Vec<String> = spouts.into_iter().chain(bolts).collect();
    debug!("Fetching details for {} components", names.len());

    let paths: Vec<String> = names
        .iter()
        .map(|name| ui::component_detail(&topology_id, name))
        .collect();
    let mut docs = client.fetch_many(paths.iter().cloned()).await;

    let mut sections = Vec::new();
    for (name, path) in names.iter().zip(&paths) {
        let doc = match take_doc(&mut docs, path) {
            Ok(doc) => doc,
            Err(e) if e.is_not_found() => {
                return Err(StatsError::ComponentNotFound(name.clone()).into());
            }
            Err(e) => return Err(e.into()),
        };
        sections.extend(component_sections(&doc)?);
    }

    Ok(sections)
}

/// Component ids declared in a topology detail document, in declared order.
///
/// A missing collection enumerates as empty; an entry without its id field
/// is a data-shape error.
fn component_names(detail: &Value, key: &str, id_field: &str) -> Result<Vec<String>, StatsError> {
    let Some(entries) = detail.get(key).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    entries
        .iter()
        .map(|entry| {
            entry
                .get(id_field)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| StatsError::DataShape(format!("{key} entry has no {id_field}")))
        })
        .collect()
}

/// A required list field; an absent or non-list value is a data-shape error.
fn required_list<'a>(doc: &'a Value, key: &str) -> Result<&'a Value, StatsError> {
    let list = doc
        .get(key)
        .ok_or_else(|| StatsError::DataShape(format!("response has no {key} field")))?;
    if !list.is_array() {
        return Err(StatsError::DataShape(format!("{key} is not a list")));
    }
    Ok(list)
}

/// True when the value is a list with at least one element.
fn has_rows(list: &Value) -> bool {
    list.as_array().is_some_and(|rows| !rows.is_empty())
}
