//! Static track layout description.
//!
//! A [`Layout`] is the parsed form of a layout document: a flat list of
//! [`Node`] records (stations, switches, via-points) and the one-way [`Edge`]
//! records connecting them. The routing graph is built from this value by
//! [`crate::graph::build_graph`]; nothing here knows about adjacency.
//!
//! The JSON wire format mirrors the records one-to-one:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "D1", "type": "SWITCH", "position": { "x": 41, "y": 10 },
//!       "switch_options": { "left": "", "right": "" } }
//!   ],
//!   "edges": [ { "from": "D1", "to": "H1", "cost": 1, "side": "right" } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// String identifier for a track node.
pub type NodeId = String;

/// Classification of a track node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Station,
    Switch,
    ViaPoint,
}

impl NodeKind {
    /// Every kind, in display order.
    pub const ALL: [NodeKind; 3] = [NodeKind::Station, NodeKind::Switch, NodeKind::ViaPoint];

    /// Wire label used in layout documents and full-format route steps.
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Station => "STATION",
            NodeKind::Switch => "SWITCH",
            NodeKind::ViaPoint => "VIA_POINT",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Track side taken when traversing an edge.
///
/// `None` covers edges without a side as well as the first step of a route,
/// which is not reached through any edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    #[default]
    #[serde(alias = "")]
    None,
}

impl Side {
    /// Side seen when travelling the same track in the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::None => Side::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::None => "none",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Integer grid coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// A station, switch or via-point on the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    /// Branch name to value; only meaningful for [`NodeKind::Switch`].
    #[serde(default)]
    pub switch_options: BTreeMap<String, String>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::new(x, y),
            switch_options: BTreeMap::new(),
        }
    }
}

/// One-way connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f64,
    #[serde(default)]
    pub side: Side,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>, cost: f64, side: Side) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            cost,
            side,
        }
    }

    /// The same track travelled backwards: endpoints swapped, side flipped.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            cost: self.cost,
            side: self.side.flipped(),
        }
    }
}

/// Parsed layout description: nodes plus one-way edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Layout {
    /// Decode a layout from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a layout from any JSON byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Read and decode a layout document from disk.
pub fn read_layout(path: &Path) -> Result<Layout> {
    let file = File::open(path).map_err(|source| Error::LayoutFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = Layout::from_reader(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        nodes = layout.nodes.len(),
        edges = layout.edges.len(),
        "loaded layout"
    );
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_flips_left_and_right_only() {
        assert_eq!(Side::Left.flipped(), Side::Right);
        assert_eq!(Side::Right.flipped(), Side::Left);
        assert_eq!(Side::None.flipped(), Side::None);
    }

    #[test]
    fn edge_reversal_keeps_cost() {
        let edge = Edge::new("A", "B", 2.5, Side::Left);
        let reverse = edge.reversed();
        assert_eq!(reverse.from, "B");
        assert_eq!(reverse.to, "A");
        assert_eq!(reverse.cost, 2.5);
        assert_eq!(reverse.side, Side::Right);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < f64::EPSILON);
        assert_eq!(b.distance_to(&b), 0.0);
    }

    #[test]
    fn parses_layout_document() {
        let json = r#"{
            "nodes": [
                { "id": "D1", "type": "SWITCH", "position": { "x": 41, "y": 10 },
                  "switch_options": { "left": "", "right": "" } },
                { "id": "H1", "type": "STATION", "position": { "x": 30, "y": 10 },
                  "switch_options": {} },
                { "id": "B1", "type": "VIA_POINT", "position": { "x": 11, "y": 10 } }
            ],
            "edges": [
                { "from": "D1", "to": "H1", "cost": 1, "side": "right" },
                { "from": "H1", "to": "B1", "cost": 1, "side": "" },
                { "from": "B1", "to": "D1", "cost": 2 }
            ]
        }"#;

        let layout = Layout::from_json_str(json).expect("layout parses");
        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.nodes[0].kind, NodeKind::Switch);
        assert_eq!(layout.nodes[0].switch_options.len(), 2);
        assert_eq!(layout.nodes[2].kind, NodeKind::ViaPoint);
        assert!(layout.nodes[2].switch_options.is_empty());
        assert_eq!(layout.edges[0].side, Side::Right);
        assert_eq!(layout.edges[1].side, Side::None);
        assert_eq!(layout.edges[2].side, Side::None);
        assert_eq!(layout.edges[2].cost, 2.0);
    }

    #[test]
    fn rejects_unknown_node_kind() {
        let json = r#"{
            "nodes": [ { "id": "X", "type": "TURNTABLE", "position": { "x": 0, "y": 0 } } ],
            "edges": []
        }"#;
        let err = Layout::from_json_str(json).expect_err("unknown kind");
        assert!(matches!(err, Error::LayoutParse(_)));
    }

    #[test]
    fn node_without_position_is_rejected() {
        let json = r#"{ "nodes": [ { "id": "H1", "type": "STATION" } ], "edges": [] }"#;
        let err = Layout::from_json_str(json).expect_err("position is required");
        match err {
            Error::LayoutParse(inner) => assert!(inner.to_string().contains("position")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_layout(Path::new("/definitely/not/here.json")).expect_err("missing");
        match err {
            Error::LayoutFileRead { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.json"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reads_layout_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("layout.json");
        std::fs::write(
            &path,
            r#"{
                "nodes": [
                    { "id": "H1", "type": "STATION", "position": { "x": 0, "y": 0 } },
                    { "id": "D1", "type": "SWITCH", "position": { "x": 1, "y": 0 } }
                ],
                "edges": [ { "from": "H1", "to": "D1", "cost": 1, "side": "" } ]
            }"#,
        )
        .expect("write layout");

        let layout = read_layout(&path).expect("layout loads");
        assert_eq!(layout.nodes.len(), 2);
        assert_eq!(layout.edges[0].side, Side::None);
    }
}
