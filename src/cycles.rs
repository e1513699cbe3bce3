use crate::{Graph, Permutation};
use itertools::Itertools;
use log::debug;
use std::collections::BTreeSet;

/// A simple cycle as an ordered vertex sequence; the last vertex is adjacent to the first
pub type Cycle = Vec<usize>;

/// Canonical representative of a cycle under rotation and reflection.
///
/// The sequence is rotated to start at its minimum vertex, then the smaller of the
/// forward and the reversed order (both starting at the minimum) is kept.
/// Canonicalizing a canonical cycle returns it unchanged.
pub fn canonicalize(cycle: &[usize]) -> Cycle {
    let Some(start) = cycle.iter().position_min() else {
        return Vec::new();
    };

    let forward: Cycle = cycle[start..]
        .iter()
        .chain(&cycle[..start])
        .copied()
        .collect();

    let mut reversed = Vec::with_capacity(forward.len());
    reversed.push(forward[0]);
    reversed.extend(forward[1..].iter().rev());

    forward.min(reversed)
}

/// Enumerate every simple cycle of length >= 3, each reported once in canonical form.
///
/// Paths are extended with an explicit stack. A cycle is only ever recorded from its
/// smallest vertex, so paths never step below their start vertex; both traversal
/// directions still find it and collapse onto the same canonical form.
pub fn simple_cycles(graph: &Graph) -> Vec<Cycle> {
    let mut found: BTreeSet<Cycle> = BTreeSet::new();
    let mut on_path = vec![false; graph.n + 1];

    for start in graph.vertices() {
        let mut path = vec![start];
        // Index of the next neighbor to try at each depth of the path
        let mut cursor = vec![0usize];
        on_path[start] = true;

        while let Some(&u) = path.last() {
            let depth = path.len() - 1;

            match graph.neighbors(u).get(cursor[depth]) {
                Some(&v) => {
                    cursor[depth] += 1;

                    if v == start {
                        if path.len() >= 3 {
                            found.insert(canonicalize(&path));
                        }
                    } else if v > start && !on_path[v] && path.len() < graph.n {
                        on_path[v] = true;
                        path.push(v);
                        cursor.push(0);
                    }
                }
                None => {
                    on_path[u] = false;
                    path.pop();
                    cursor.pop();
                }
            }
        }
    }

    debug!(
        "Found {} simple cycles: {}",
        found.len(),
        found
            .iter()
            .map(|cycle| format!("({})", cycle.iter().join(" ")))
            .join(" ")
    );

    found.into_iter().collect()
}

/// One rotation permutation per distinct simple cycle of `graph`
pub fn cycle_generators(graph: &Graph) -> Vec<Permutation> {
    simple_cycles(graph)
        .iter()
        .map(|cycle| Permutation::from_cycle(cycle, graph.n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;

    fn graph(edges: &[Edge]) -> Graph {
        Graph::from_edges(edges).unwrap()
    }

    fn complete_graph(n: i64) -> Graph {
        let edges: Vec<Edge> = (1..=n)
            .flat_map(|u| ((u + 1)..=n).map(move |v| (u, v)))
            .collect();
        graph(&edges)
    }

    #[test]
    fn test_canonicalize_rotation_and_reflection() {
        assert_eq!(canonicalize(&[3, 1, 2]), vec![1, 2, 3]);
        assert_eq!(canonicalize(&[2, 1, 3]), vec![1, 2, 3]);
        assert_eq!(canonicalize(&[4, 2, 7, 5]), vec![2, 4, 5, 7]);
        assert_eq!(canonicalize(&[4, 2, 5, 7]), vec![2, 4, 7, 5]);
        assert!(canonicalize(&[]).is_empty());
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for cycle in [vec![5, 3, 9, 1, 4], vec![2, 8, 6], vec![7, 1, 2, 3]] {
            let once = canonicalize(&cycle);
            assert_eq!(canonicalize(&once), once);
        }
    }

    #[test]
    fn test_triangle_reported_once() {
        let cycles = simple_cycles(&graph(&[(1, 2), (2, 3), (3, 1)]));
        assert_eq!(cycles, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_forest_has_no_cycles() {
        assert!(simple_cycles(&graph(&[(1, 2), (2, 3), (2, 4), (5, 6)])).is_empty());
        assert!(cycle_generators(&Graph::new(0)).is_empty());
    }

    #[test]
    fn test_square_with_diagonal() {
        // 1-2-3-4-1 plus chord 1-3: two triangles and the outer square
        let cycles = simple_cycles(&graph(&[(1, 2), (2, 3), (3, 4), (4, 1), (1, 3)]));
        assert_eq!(cycles, vec![vec![1, 2, 3], vec![1, 2, 3, 4], vec![1, 3, 4]]);
    }

    #[test]
    fn test_complete_graph_cycle_count() {
        // K4: 4 triangles + 3 squares; K5: 10 + 15 + 12
        assert_eq!(simple_cycles(&complete_graph(4)).len(), 7);
        assert_eq!(simple_cycles(&complete_graph(5)).len(), 37);
    }

    #[test]
    fn test_no_duplicate_rotations_or_reflections() {
        let cycles = simple_cycles(&complete_graph(5));
        let mut seen = BTreeSet::new();
        for cycle in &cycles {
            assert_eq!(&canonicalize(cycle), cycle);
            assert!(seen.insert(cycle.clone()));
        }
    }

    #[test]
    fn test_generators_fix_vertices_off_cycle() {
        let g = graph(&[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 3), (5, 6)]);
        let cycles = simple_cycles(&g);
        let generators = cycle_generators(&g);
        assert_eq!(cycles.len(), generators.len());

        for (cycle, generator) in cycles.iter().zip(&generators) {
            for v in 1..=g.n {
                if cycle.contains(&v) {
                    assert_ne!(generator.apply(v), v);
                    assert!(g.is_adjacent(v, generator.apply(v)));
                } else {
                    assert_eq!(generator.apply(v), v);
                }
            }
        }
    }
}
