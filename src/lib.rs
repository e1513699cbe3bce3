use crate::error::GraphError;

/// An undirected edge between two vertex ids, as read from the input
pub type Edge = (i64, i64);

/// Represents an undirected simple graph over vertex ids `1..=n`
#[derive(Debug, Clone)]
pub struct Graph {
    /// Largest vertex id; per-vertex structures have `n + 1` slots (slot 0 unused)
    pub n: usize,
    /// Sorted neighbor lists
    neighbors: Vec<Vec<usize>>,
    /// Whether a vertex is referenced by at least one edge
    present: Vec<bool>,
    num_edges: usize,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        Graph {
            n,
            neighbors: vec![Vec::new(); n + 1],
            present: vec![false; n + 1],
            num_edges: 0,
        }
    }

    /// Build a graph sized to the largest vertex id in `edges`
    pub fn from_edges(edges: &[Edge]) -> Result<Self, GraphError> {
        let n = utils::max_vertex([edges]) as usize;
        Self::with_size(n, edges)
    }

    /// Build a graph over `1..=n`. Duplicate edges are merged.
    pub fn with_size(n: usize, edges: &[Edge]) -> Result<Self, GraphError> {
        let mut graph = Graph::new(n);

        for &(u, v) in edges {
            if let Some(&vertex) = [u, v].iter().find(|&&x| x <= 0) {
                return Err(GraphError::NonPositiveVertex { u, v, vertex });
            }
            let (u, v) = (u as usize, v as usize);
            if let Some(&vertex) = [u, v].iter().find(|&&x| x > n) {
                return Err(GraphError::VertexOutOfRange { vertex, size: n });
            }
            graph.add_edge(u, v);
        }

        for list in &mut graph.neighbors {
            list.sort_unstable();
        }

        Ok(graph)
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        self.present[u] = true;
        self.present[v] = true;
        if self.neighbors[u].contains(&v) {
            return;
        }
        self.neighbors[u].push(v);
        if u != v {
            self.neighbors[v].push(u);
        }
        self.num_edges += 1;
    }

    /// False whenever either id is unknown
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Neighbors of `v`, ascending; empty for isolated or unknown vertices
    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.neighbors.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    /// Vertex ids referenced by at least one edge, ascending
    pub fn vertices(&self) -> Vec<usize> {
        (1..=self.n).filter(|&v| self.present[v]).collect()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Every edge once as `(u, v)` with `u <= v`, ascending
    pub fn edges(&self) -> Vec<(usize, usize)> {
        (1..=self.n)
            .flat_map(|u| {
                self.neighbors(u)
                    .iter()
                    .filter(move |&&v| u <= v)
                    .map(move |&v| (u, v))
            })
            .collect()
    }
}

/// A puzzle instance: the current and the expected edge lists over the same vertices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub current_edges: Vec<Edge>,
    pub expected_edges: Vec<Edge>,
}

impl Instance {
    /// Working size `N`: the largest vertex id across both edge lists
    pub fn vertex_bound(&self) -> usize {
        utils::max_vertex([
            self.current_edges.as_slice(),
            self.expected_edges.as_slice(),
        ]) as usize
    }
}

// Module declarations
pub mod cycles;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod parser;
pub mod permutation;
pub mod search;
pub mod solver;
pub mod utils;

pub use permutation::Permutation;
pub use solver::{solve_instance, Answer, Solver, SolverConfig, TargetPolicy};
