//! Route planning over a loaded track layout.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (A*, Dijkstra)
//! - [`RouteRequest`] - A single routing query
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes on a graph
//! - [`RouteCalculator`] - Holds the loaded layout graph between queries
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use ohtroute_lib::{read_layout, RouteCalculator, RouteFormat};
//!
//! let layout = read_layout(Path::new("docs/fixtures/main_layout.json"))?;
//! let mut calculator = RouteCalculator::new();
//! calculator.load_layout(&layout)?;
//! let steps = calculator.compute_route("H1", "H5", RouteFormat::Simple)?;
//! println!("Route: {} hops", steps.len() - 1);
//! # Ok::<(), ohtroute_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{build_graph, LayoutGraph};
use crate::layout::{Layout, NodeId};
use crate::output::{to_route_steps, RouteFormat, RouteStep};
use crate::path::{path_cost, SearchOptions};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search (heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Dijkstra's algorithm (exact lowest cost).
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "a-star" | "astar" | "a_star" => Ok(RouteAlgorithm::AStar),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            _ => Err(format!(
                "unknown algorithm '{value}'; expected a-star or dijkstra"
            )),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    pub algorithm: RouteAlgorithm,
    pub format: RouteFormat,
    pub options: SearchOptions,
}

impl RouteRequest {
    /// A* request producing full-format steps without limits.
    pub fn new(start: impl Into<NodeId>, goal: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::default(),
            format: RouteFormat::default(),
            options: SearchOptions::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_format(mut self, format: RouteFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub total_cost: f64,
    pub steps: Vec<RouteStep>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route on an already built graph.
pub fn plan_route(graph: &LayoutGraph, request: &RouteRequest) -> Result<RoutePlan> {
    let planner = select_planner(request.algorithm);
    let path = planner.find_path(graph, &request.start, &request.goal, &request.options)?;
    let steps = to_route_steps(graph, &path, request.format)?;

    debug!(
        start = %request.start,
        goal = %request.goal,
        algorithm = %request.algorithm,
        hops = steps.len().saturating_sub(1),
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start: request.start.clone(),
        goal: request.goal.clone(),
        total_cost: path_cost(&path),
        steps,
    })
}

/// Owns the routing graph for the currently loaded layout.
///
/// Queries issued before a layout has been loaded fail with
/// [`Error::LayoutNotLoaded`]. A failed load leaves any previously loaded
/// graph in place.
#[derive(Debug, Clone, Default)]
pub struct RouteCalculator {
    graph: Option<LayoutGraph>,
}

impl RouteCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and keep the routing graph for `layout`.
    pub fn load_layout(&mut self, layout: &Layout) -> Result<&LayoutGraph> {
        let graph = build_graph(layout)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "layout loaded"
        );
        Ok(&*self.graph.insert(graph))
    }

    /// The loaded routing graph.
    pub fn graph(&self) -> Result<&LayoutGraph> {
        self.graph.as_ref().ok_or(Error::LayoutNotLoaded)
    }

    /// Compute an A* route between two node ids.
    pub fn compute_route(
        &self,
        start: &str,
        end: &str,
        format: RouteFormat,
    ) -> Result<Vec<RouteStep>> {
        let request = RouteRequest::new(start, end).with_format(format);
        Ok(self.compute_route_with(&request)?.steps)
    }

    /// Compute a route for a fully specified request.
    pub fn compute_route_with(&self, request: &RouteRequest) -> Result<RoutePlan> {
        plan_route(self.graph()?, request)
    }
}
