//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search algorithm, so `plan_route` does not need to know how a path is found.

use crate::error::Result;
use crate::graph::LayoutGraph;
use crate::path::{find_path_a_star, find_path_dijkstra, PathNode, SearchOptions};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the pathfinding algorithm on the given graph.
    fn find_path(
        &self,
        graph: &LayoutGraph,
        start: &str,
        goal: &str,
        options: &SearchOptions,
    ) -> Result<Vec<PathNode>>;
}

/// A* planner guided by straight-line distance to the goal.
///
/// Fast on track layouts whose geometry follows the track, but not guaranteed
/// to return the cheapest route when hop counts and distances diverge.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &LayoutGraph,
        start: &str,
        goal: &str,
        options: &SearchOptions,
    ) -> Result<Vec<PathNode>> {
        find_path_a_star(graph, start, goal, options)
    }
}

/// Dijkstra planner returning a lowest-cost route.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &LayoutGraph,
        start: &str,
        goal: &str,
        options: &SearchOptions,
    ) -> Result<Vec<PathNode>> {
        find_path_dijkstra(graph, start, goal, options)
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
    }
}
