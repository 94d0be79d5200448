//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use ohtroute_lib::{
    build_graph, read_layout, Edge, Layout, LayoutGraph, Node, NodeKind, RouteStep, Side,
};

/// Path to the demo layout shipped with the repository.
#[allow(dead_code)]
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/main_layout.json")
}

/// Parsed demo layout (49 nodes, 52 edges).
#[allow(dead_code)]
pub fn fixture_layout() -> Layout {
    read_layout(&fixture_path()).expect("fixture layout loads")
}

/// Routing graph built from the demo layout.
#[allow(dead_code)]
pub fn fixture_graph() -> LayoutGraph {
    build_graph(&fixture_layout()).expect("fixture graph builds")
}

/// Three stations on a line: A(0,0) -LEFT-> B(1,0) -RIGHT-> C(2,0).
#[allow(dead_code)]
pub fn line_layout() -> Layout {
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

/// Node ids of a step sequence.
#[allow(dead_code)]
pub fn step_ids(steps: &[RouteStep]) -> Vec<&str> {
    steps.iter().map(|step| step.id.as_str()).collect()
}

/// (id, side) pairs of a step sequence, sides as their wire labels.
#[allow(dead_code)]
pub fn step_sides(steps: &[RouteStep]) -> Vec<(&str, &'static str)> {
    steps
        .iter()
        .map(|step| (step.id.as_str(), step.side.label()))
        .collect()
}
