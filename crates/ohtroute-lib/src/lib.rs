//! OHT route planner library entry points.
//!
//! This crate loads static track layouts, builds bidirectional routing graphs
//! from them, and plans vehicle routes as sequences of steps with the track
//! side taken at each hop. Higher-level consumers (the CLI) should only depend
//! on the functions exported here instead of reimplementing behavior.

pub mod error;
pub mod graph;
pub mod layout;
pub mod output;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use graph::{build_graph, LayoutGraph};
pub use layout::{read_layout, Edge, Layout, Node, NodeId, NodeKind, Position, Side};
pub use output::{to_route_steps, RouteFormat, RouteStep, SwitchOption};
pub use path::{
    find_path_a_star, find_path_dijkstra, path_cost, CancellationToken, PathNode, SearchOptions,
};
pub use routing::{
    plan_route, RouteAlgorithm, RouteCalculator, RoutePlan, RoutePlanner, RouteRequest,
};
