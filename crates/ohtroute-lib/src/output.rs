use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::LayoutGraph;
use crate::layout::{NodeId, NodeKind, Side};
use crate::path::PathNode;

/// Shape of the public route steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteFormat {
    /// Steps carry the node kind and switch option.
    #[default]
    Full,
    /// Steps carry only ordinal, id and side.
    Simple,
}

impl fmt::Display for RouteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteFormat::Full => "full",
            RouteFormat::Simple => "simple",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteFormat {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("full") {
            Ok(RouteFormat::Full)
        } else if value.eq_ignore_ascii_case("simple") {
            Ok(RouteFormat::Simple)
        } else {
            Err(format!("unknown route format '{value}'; expected full or simple"))
        }
    }
}

/// Branch a vehicle should set at a switch.
///
/// Only the `none` placeholder exists: branch selection is not derived from
/// the path, so full-format steps always carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchOption {
    #[default]
    None,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStep {
    pub no: usize,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
    pub id: NodeId,
    pub side: Side,
    #[serde(rename = "switch-option", skip_serializing_if = "Option::is_none")]
    pub switch_option: Option<SwitchOption>,
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => write!(f, "{:>3}: {} {} (side: {})", self.no, kind, self.id, self.side),
            None => write!(f, "{:>3}: {} (side: {})", self.no, self.id, self.side),
        }
    }
}

/// Convert a found path into public route steps.
pub fn to_route_steps(
    graph: &LayoutGraph,
    path: &[PathNode],
    format: RouteFormat,
) -> Result<Vec<RouteStep>> {
    path.iter()
        .enumerate()
        .map(|(no, path_node)| -> Result<RouteStep> {
            let kind = match format {
                RouteFormat::Full => Some(
                    graph
                        .node(&path_node.node_id)
                        .map(|node| node.kind)
                        .ok_or_else(|| Error::node_not_found(&path_node.node_id))?,
                ),
                RouteFormat::Simple => None,
            };

            Ok(RouteStep {
                no,
                kind,
                id: path_node.node_id.clone(),
                side: path_node.side(),
                switch_option: kind.map(|_| SwitchOption::None),
            })
        })
        .collect()
}
