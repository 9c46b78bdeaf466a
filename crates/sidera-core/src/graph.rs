use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Depth. Accepted for completeness; the orthographic projection ignores it.
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Position,
}

impl Node {
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            position: Position::new(x, y, z),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A constellation graph as submitted by a caller.
///
/// Edges may name nodes that are not present; those edges are tolerated and skipped at render
/// time (see [`Constellation::dangling_edges`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Constellation {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Constellation {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rejects coordinates that cannot be projected (NaN or infinite x/y/z).
    pub fn validate(&self) -> Result<()> {
        validate_positions(&self.nodes)
    }

    /// Edges with at least one endpoint that is not a known node id.
    pub fn dangling_edges(&self) -> Vec<&Edge> {
        let known: BTreeSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !known.contains(e.source.as_str()) || !known.contains(e.target.as_str()))
            .collect()
    }
}

pub fn validate_positions(nodes: &[Node]) -> Result<()> {
    for node in nodes {
        let p = node.position;
        for (axis, v) in [('x', p.x), ('y', p.y), ('z', p.z)] {
            if !v.is_finite() {
                return Err(Error::NonFiniteCoordinate {
                    node_id: node.id.clone(),
                    axis,
                });
            }
        }
    }
    Ok(())
}

/// A generation request: a constellation plus the project metadata used for naming and
/// prompting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstellationRequest {
    pub project_id: String,
    pub constellation_name: String,
    #[serde(flatten)]
    pub constellation: Constellation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}
