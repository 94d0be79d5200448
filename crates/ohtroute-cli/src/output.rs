//! Output formatting for route plans and node listings.
//!
//! JSON output is meant for machines and mirrors the library's serialized
//! route steps exactly; text output is a compact human-readable view.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use ohtroute_lib::{LayoutGraph, NodeKind, RoutePlan};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable text.
    Text,
}

impl OutputFormat {
    /// Render the steps of a planned route.
    pub fn render_route(self, plan: &RoutePlan) -> Result<String> {
        match self {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&plan.steps).context("failed to serialize route")
            }
            OutputFormat::Text => Ok(render_route_text(plan)),
        }
    }

    /// Render node ids grouped by kind.
    pub fn render_nodes(self, groups: &[NodeGroup]) -> Result<String> {
        match self {
            OutputFormat::Json => {
                serde_json::to_string_pretty(groups).context("failed to serialize node listing")
            }
            OutputFormat::Text => Ok(render_nodes_text(groups)),
        }
    }
}

/// Node ids of a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeGroup {
    pub kind: NodeKind,
    pub ids: Vec<String>,
}

/// Group the graph's node ids by kind, optionally restricted to one kind.
///
/// Kinds without nodes are omitted.
pub fn group_nodes(graph: &LayoutGraph, only: Option<NodeKind>) -> Vec<NodeGroup> {
    NodeKind::ALL
        .into_iter()
        .filter(|kind| only.map_or(true, |wanted| wanted == *kind))
        .map(|kind| NodeGroup {
            kind,
            ids: graph
                .nodes_of_kind(kind)
                .into_iter()
                .map(|node| node.id.clone())
                .collect(),
        })
        .filter(|group| !group.ids.is_empty())
        .collect()
}

// Text renderers return lines without a trailing newline; the caller prints
// with `println!` like the JSON output.
fn render_route_text(plan: &RoutePlan) -> String {
    let header = format!(
        "Route from {} to {} ({} hops; algorithm: {}):",
        plan.start,
        plan.goal,
        plan.hop_count(),
        plan.algorithm
    );
    std::iter::once(header)
        .chain(plan.steps.iter().map(ToString::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_nodes_text(groups: &[NodeGroup]) -> String {
    groups
        .iter()
        .map(|group| {
            format!(
                "{} ({}): {}",
                group.kind,
                group.ids.len(),
                group.ids.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
