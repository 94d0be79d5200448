use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::layout::{Edge, Layout, Node, NodeId, NodeKind};

/// Bidirectional routing graph built from a [`Layout`].
///
/// The graph is immutable once built. Clones share the underlying maps, so a
/// single instance can be handed to any number of concurrent searches.
#[derive(Debug, Clone)]
pub struct LayoutGraph {
    nodes: Arc<HashMap<NodeId, Node>>,
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
    duplicate_node_ids: Arc<[NodeId]>,
}

impl LayoutGraph {
    /// Lookup a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether the layout defines a node with this identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return the outgoing edges (original and synthesized) for a node.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges, i.e. twice the number of layout edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes of the given kind, sorted by identifier.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        let mut matching: Vec<&Node> = self.nodes.values().filter(|n| n.kind == kind).collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));
        matching
    }

    /// Node identifiers that appeared more than once in the source layout.
    ///
    /// For each duplicate the later record replaced the earlier one.
    pub fn duplicate_node_ids(&self) -> &[NodeId] {
        &self.duplicate_node_ids
    }
}

/// Build the routing graph for a layout.
///
/// Every supplied edge is inserted as given and paired with a synthesized
/// reverse edge (same cost, side flipped) so vehicles can travel each track in
/// both directions.
pub fn build_graph(layout: &Layout) -> Result<LayoutGraph> {
    let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(layout.nodes.len());
    let mut duplicates = Vec::new();
    for node in &layout.nodes {
        if nodes.insert(node.id.clone(), node.clone()).is_some() {
            warn!(id = %node.id, "duplicate node id in layout; later record wins");
            duplicates.push(node.id.clone());
        }
    }

    let mut adjacency: HashMap<NodeId, Vec<Edge>> = nodes
        .keys()
        .map(|id| (id.clone(), Vec::new()))
        .collect();

    for (index, edge) in layout.edges.iter().enumerate() {
        validate_edge(&nodes, index, edge)?;
        let reverse = edge.reversed();
        adjacency
            .entry(edge.from.clone())
            .or_default()
            .push(edge.clone());
        adjacency.entry(reverse.from.clone()).or_default().push(reverse);
    }

    debug!(
        nodes = nodes.len(),
        layout_edges = layout.edges.len(),
        duplicates = duplicates.len(),
        "built layout graph"
    );

    Ok(LayoutGraph {
        nodes: Arc::new(nodes),
        adjacency: Arc::new(adjacency),
        duplicate_node_ids: duplicates.into(),
    })
}

fn validate_edge(nodes: &HashMap<NodeId, Node>, index: usize, edge: &Edge) -> Result<()> {
    for endpoint in [&edge.from, &edge.to] {
        if !nodes.contains_key(endpoint) {
            return Err(Error::invalid_layout(format!(
                "edge #{index} ({} -> {}) references unknown node '{endpoint}'",
                edge.from, edge.to
            )));
        }
    }

    if !edge.cost.is_finite() || edge.cost < 0.0 {
        return Err(Error::invalid_layout(format!(
            "edge #{index} ({} -> {}) has invalid cost {}",
            edge.from, edge.to, edge.cost
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Side;

    fn line_layout() -> Layout {
        Layout {
            nodes: vec![
                Node::new("A", NodeKind::Station, 0, 0),
                Node::new("B", NodeKind::Switch, 1, 0),
                Node::new("C", NodeKind::Station, 2, 0),
            ],
            edges: vec![
                Edge::new("A", "B", 1.0, Side::Left),
                Edge::new("B", "C", 1.0, Side::Right),
            ],
        }
    }

    #[test]
    fn synthesizes_reverse_edges() {
        let graph = build_graph(&line_layout()).expect("graph builds");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);

        let from_b: Vec<_> = graph
            .neighbours("B")
            .iter()
            .map(|edge| (edge.to.as_str(), edge.side))
            .collect();
        assert_eq!(from_b, vec![("A", Side::Right), ("C", Side::Right)]);

        let from_c = graph.neighbours("C");
        assert_eq!(from_c.len(), 1);
        assert_eq!(from_c[0].to, "B");
        assert_eq!(from_c[0].side, Side::Left);
    }

    #[test]
    fn unspecified_side_survives_reversal() {
        let mut layout = line_layout();
        layout.edges = vec![Edge::new("A", "C", 3.0, Side::None)];
        let graph = build_graph(&layout).expect("graph builds");

        let back = &graph.neighbours("C")[0];
        assert_eq!(back.to, "A");
        assert_eq!(back.side, Side::None);
        assert_eq!(back.cost, 3.0);
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let mut layout = line_layout();
        layout.edges.push(Edge::new("C", "Z9", 1.0, Side::Left));

        let err = build_graph(&layout).expect_err("unknown node");
        match err {
            Error::LayoutInvalid { message } => assert!(message.contains("'Z9'"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut layout = line_layout();
        layout.edges[0].cost = -1.0;
        assert!(matches!(
            build_graph(&layout),
            Err(Error::LayoutInvalid { .. })
        ));
    }

    #[test]
    fn duplicate_node_ids_keep_last_record() {
        let mut layout = line_layout();
        layout.nodes.push(Node::new("B", NodeKind::ViaPoint, 9, 9));

        let graph = build_graph(&layout).expect("graph builds");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.duplicate_node_ids(), ["B".to_string()]);

        let b = graph.node("B").expect("B present");
        assert_eq!(b.kind, NodeKind::ViaPoint);
        assert_eq!(b.position.x, 9);
        // Edges are unaffected by which record won.
        assert_eq!(graph.neighbours("B").len(), 2);
    }

    #[test]
    fn isolated_node_has_no_neighbours() {
        let mut layout = line_layout();
        layout.nodes.push(Node::new("D", NodeKind::Station, 5, 5));
        let graph = build_graph(&layout).expect("graph builds");

        assert!(graph.contains("D"));
        assert!(graph.neighbours("D").is_empty());
        assert!(graph.neighbours("missing").is_empty());
    }
}
