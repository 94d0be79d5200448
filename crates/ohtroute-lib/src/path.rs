use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::LayoutGraph;
use crate::layout::{Edge, Node, NodeId, Side};

/// One entry of a found path: a node and the edge used to arrive at it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathNode {
    pub node_id: NodeId,
    /// `None` for the first node of the path.
    pub edge: Option<Edge>,
}

impl PathNode {
    fn origin(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            edge: None,
        }
    }

    fn via(node_id: &str, edge: &Edge) -> Self {
        Self {
            node_id: node_id.to_string(),
            edge: Some(edge.clone()),
        }
    }

    /// Side of the arriving edge, or [`Side::None`] for the first node.
    pub fn side(&self) -> Side {
        self.edge.as_ref().map_or(Side::None, |edge| edge.side)
    }
}

/// Sum of the edge costs along a path.
pub fn path_cost(path: &[PathNode]) -> f64 {
    path.iter()
        .filter_map(|node| node.edge.as_ref())
        .map(|edge| edge.cost)
        .sum()
}

/// Shared flag used to abort in-flight searches.
///
/// Clones observe the same flag, so one handle can be kept by the caller while
/// another travels with the search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Per-search limits checked on every iteration of the search loop.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub deadline: Option<Instant>,
    pub cancel: Option<CancellationToken>,
}

impl SearchOptions {
    /// Options with a deadline `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn check(&self, start: &str, goal: &str) -> Result<()> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::SearchCancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(Error::SearchTimedOut {
                start: start.to_string(),
                end: goal.to_string(),
            });
        }
        Ok(())
    }
}

/// Run A* search guided by the straight-line distance to the goal.
///
/// Edge costs in OHT layouts are hop counts while the heuristic is measured in
/// grid units, so the heuristic can overestimate and the returned path is not
/// guaranteed to be the cheapest one. Use [`find_path_dijkstra`] when exact
/// optimality matters.
pub fn find_path_a_star(
    graph: &LayoutGraph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Result<Vec<PathNode>> {
    let (start_node, goal_node) = resolve_endpoints(graph, start, goal)?;
    let goal_position = goal_node.position;
    search(graph, start_node, goal_node, options, |node| {
        node.position.distance_to(&goal_position)
    })
}

/// Run Dijkstra's algorithm, returning a lowest-cost path.
pub fn find_path_dijkstra(
    graph: &LayoutGraph,
    start: &str,
    goal: &str,
    options: &SearchOptions,
) -> Result<Vec<PathNode>> {
    let (start_node, goal_node) = resolve_endpoints(graph, start, goal)?;
    search(graph, start_node, goal_node, options, |_| 0.0)
}

fn resolve_endpoints<'g>(
    graph: &'g LayoutGraph,
    start: &str,
    goal: &str,
) -> Result<(&'g Node, &'g Node)> {
    let start_node = graph
        .node(start)
        .ok_or_else(|| Error::node_not_found(start))?;
    let goal_node = graph
        .node(goal)
        .ok_or_else(|| Error::node_not_found(goal))?;
    Ok((start_node, goal_node))
}

/// Best-first search over the layout graph.
///
/// The open set is a binary heap ordered by `(f, insertion order)`. A node's
/// insertion order is assigned once, when it is first discovered, so among
/// equal `f` scores the node discovered earliest is expanded first. Entries
/// made stale by a later score improvement are skipped when popped.
fn search<'g, H>(
    graph: &'g LayoutGraph,
    start_node: &'g Node,
    goal_node: &'g Node,
    options: &SearchOptions,
    heuristic: H,
) -> Result<Vec<PathNode>>
where
    H: Fn(&Node) -> f64,
{
    let start = start_node.id.as_str();
    let goal = goal_node.id.as_str();

    if start == goal {
        return Ok(vec![PathNode::origin(start)]);
    }

    let estimate = |id: &str| graph.node(id).map_or(0.0, &heuristic);

    let mut g_score: HashMap<&'g str, f64> = HashMap::new();
    let mut f_score: HashMap<&'g str, f64> = HashMap::new();
    let mut discovered: HashMap<&'g str, u64> = HashMap::new();
    let mut parents: HashMap<&'g str, (&'g str, &'g Edge)> = HashMap::new();
    let mut closed: HashSet<&'g str> = HashSet::new();
    let mut open = BinaryHeap::new();

    let start_estimate = estimate(start);
    g_score.insert(start, 0.0);
    f_score.insert(start, start_estimate);
    discovered.insert(start, 0);
    open.push(OpenEntry::new(start, start_estimate, 0));

    let mut expanded = 0usize;

    while let Some(entry) = open.pop() {
        options.check(start, goal)?;

        let current = entry.node;
        if closed.contains(current) {
            continue;
        }
        if f_score.get(current).copied() != Some(entry.estimate.0) {
            continue;
        }

        if current == goal {
            debug!(start, goal, expanded, "route search reached goal");
            return reconstruct_path(&parents, start, goal)
                .ok_or_else(|| Error::no_route(start, goal));
        }

        closed.insert(current);
        expanded += 1;
        let current_g = g_score.get(current).copied().unwrap_or(f64::INFINITY);
        trace!(node = current, g = current_g, f = entry.estimate.0, "expanding");

        for edge in graph.neighbours(current) {
            let next = edge.to.as_str();
            if closed.contains(next) {
                continue;
            }

            let tentative_g = current_g + edge.cost;
            let next_order = discovered.len() as u64;
            let order = *discovered.entry(next).or_insert(next_order);

            if tentative_g >= g_score.get(next).copied().unwrap_or(f64::INFINITY) {
                continue;
            }

            let next_f = tentative_g + estimate(next);
            parents.insert(next, (current, edge));
            g_score.insert(next, tentative_g);
            f_score.insert(next, next_f);
            open.push(OpenEntry::new(next, next_f, order));
        }
    }

    debug!(start, goal, expanded, "route search exhausted frontier");
    Err(Error::no_route(start, goal))
}

fn reconstruct_path(
    parents: &HashMap<&str, (&str, &Edge)>,
    start: &str,
    goal: &str,
) -> Option<Vec<PathNode>> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        let &(previous, edge) = parents.get(current)?;
        path.push(PathNode::via(current, edge));
        current = previous;
    }
    path.push(PathNode::origin(start));
    path.reverse();
    Some(path)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OpenEntry<'g> {
    node: &'g str,
    estimate: FloatOrd,
    order: u64,
}

impl<'g> OpenEntry<'g> {
    fn new(node: &'g str, estimate: f64, order: u64) -> Self {
        Self {
            node,
            estimate: FloatOrd(estimate),
            order,
        }
    }
}

impl Ord for OpenEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate, then
        // by discovery order.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for OpenEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
