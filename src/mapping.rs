use crate::{Graph, Permutation};
use log::{debug, warn};

/// Find one isomorphism from `current` onto `expected`, as a permutation mapping each
/// current vertex to its expected vertex.
///
/// Returns the first consistent assignment in ascending vertex/candidate order, or
/// `None` if the graphs are not isomorphic.
pub fn find_isomorphism(current: &Graph, expected: &Graph) -> Option<Permutation> {
    find_all_isomorphisms(current, expected, 1).into_iter().next()
}

/// Enumerate up to `limit` isomorphisms from `current` onto `expected`
pub fn find_all_isomorphisms(
    current: &Graph,
    expected: &Graph,
    limit: usize,
) -> Vec<Permutation> {
    if current.n != expected.n {
        warn!(
            "Graphs have different sizes ({} vs {}), no isomorphism possible",
            current.n, expected.n
        );
        return vec![];
    }
    if current.num_edges() != expected.num_edges() {
        warn!(
            "Graphs have different edge counts ({} vs {}), no isomorphism possible",
            current.num_edges(),
            expected.num_edges()
        );
        return vec![];
    }

    let mut search = MappingSearch::new(current, expected);
    let mappings = search.run(limit);
    debug!("Found {} isomorphism(s) (limit {})", mappings.len(), limit);
    mappings
}

/// Backtracking state over a fixed-size assignment array
struct MappingSearch<'a> {
    current: &'a Graph,
    expected: &'a Graph,
    /// Current vertices in processing order
    order: Vec<usize>,
    /// Degree-compatible candidate images for each entry of `order`
    candidates: Vec<Vec<usize>>,
    /// image[u] = expected vertex assigned to current vertex u, 0 if unassigned
    image: Vec<usize>,
    /// preimage[v] = current vertex assigned to expected vertex v, 0 if unused
    preimage: Vec<usize>,
}

impl<'a> MappingSearch<'a> {
    fn new(current: &'a Graph, expected: &'a Graph) -> Self {
        let n = current.n;

        // Both graphs range over the union of their referenced vertices
        let mut in_use = vec![false; n + 1];
        for v in current.vertices().into_iter().chain(expected.vertices()) {
            in_use[v] = true;
        }
        let order: Vec<usize> = (1..=n).filter(|&v| in_use[v]).collect();

        let candidates = order
            .iter()
            .map(|&u| {
                let degree = current.degree(u);
                let mut list: Vec<usize> = order
                    .iter()
                    .copied()
                    .filter(|&v| expected.degree(v) == degree)
                    .collect();
                // Isolated vertices try to stay where they are
                if degree == 0 {
                    if let Some(pos) = list.iter().position(|&v| v == u) {
                        list[..=pos].rotate_right(1);
                    }
                }
                list
            })
            .collect();

        MappingSearch {
            current,
            expected,
            order,
            candidates,
            image: vec![0; n + 1],
            preimage: vec![0; n + 1],
        }
    }

    /// Mapping u -> v keeps adjacency with every already-assigned vertex, in both graphs
    fn is_consistent(&self, u: usize, v: usize) -> bool {
        if self.preimage[v] != 0 {
            return false;
        }

        let forward = self.current.neighbors(u).iter().all(|&w| {
            let w_image = self.image[w];
            w_image == 0 || self.expected.is_adjacent(v, w_image)
        });

        forward
            && self.expected.neighbors(v).iter().all(|&x| {
                let x_pre = self.preimage[x];
                x_pre == 0 || self.current.is_adjacent(u, x_pre)
            })
    }

    fn assign(&mut self, u: usize, v: usize) {
        self.image[u] = v;
        self.preimage[v] = u;
    }

    fn unassign(&mut self, u: usize) {
        let v = self.image[u];
        self.preimage[v] = 0;
        self.image[u] = 0;
    }

    fn to_permutation(&self) -> Option<Permutation> {
        let mut images: Vec<usize> = (0..=self.current.n).collect();
        for &u in &self.order {
            images[u] = self.image[u];
        }
        Permutation::from_images(images)
    }

    fn run(&mut self, limit: usize) -> Vec<Permutation> {
        let mut found = Vec::new();
        if limit == 0 {
            return found;
        }

        let total = self.order.len();
        // Next candidate index to try at each depth
        let mut cursor = vec![0usize; total + 1];
        let mut depth = 0;

        loop {
            if depth == total {
                if let Some(permutation) = self.to_permutation() {
                    found.push(permutation);
                }
                if found.len() >= limit || depth == 0 {
                    break;
                }
                depth -= 1;
                self.unassign(self.order[depth]);
                continue;
            }

            let u = self.order[depth];
            let mut advanced = false;

            while cursor[depth] < self.candidates[depth].len() {
                let v = self.candidates[depth][cursor[depth]];
                cursor[depth] += 1;

                if self.is_consistent(u, v) {
                    self.assign(u, v);
                    depth += 1;
                    cursor[depth] = 0;
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                self.unassign(self.order[depth]);
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Edge;

    fn graph(n: usize, edges: &[Edge]) -> Graph {
        Graph::with_size(n, edges).unwrap()
    }

    fn preserves_edges(sigma: &Permutation, current: &Graph, expected: &Graph) -> bool {
        current
            .edges()
            .iter()
            .all(|&(u, v)| expected.is_adjacent(sigma.apply(u), sigma.apply(v)))
    }

    #[test]
    fn test_identical_graphs_map_to_identity() {
        let g = graph(4, &[(1, 2), (2, 3), (3, 1), (3, 4)]);
        let sigma = find_isomorphism(&g, &g).unwrap();
        assert!(sigma.is_identity());
    }

    #[test]
    fn test_relabeled_path() {
        let current = graph(3, &[(1, 2), (2, 3)]);
        let expected = graph(3, &[(2, 1), (1, 3)]);
        let sigma = find_isomorphism(&current, &expected).unwrap();
        assert_eq!(sigma.apply(2), 1);
        assert!(preserves_edges(&sigma, &current, &expected));
    }

    #[test]
    fn test_first_mapping_is_lexicographically_smallest() {
        // Triangle 1-2-3 with tail at 3, expected has tail at 1
        let current = graph(4, &[(1, 2), (2, 3), (3, 1), (3, 4)]);
        let expected = graph(4, &[(2, 3), (3, 1), (1, 2), (1, 4)]);
        let sigma = find_isomorphism(&current, &expected).unwrap();
        assert_eq!(sigma.as_slice(), &[0, 2, 3, 1, 4]);
    }

    #[test]
    fn test_non_isomorphic_graphs() {
        // Path and star with the same edge count
        let path = graph(4, &[(1, 2), (2, 3), (3, 4)]);
        let star = graph(4, &[(1, 2), (1, 3), (1, 4)]);
        assert!(find_isomorphism(&path, &star).is_none());

        let triangle = graph(4, &[(1, 2), (2, 3), (3, 1)]);
        assert!(find_isomorphism(&triangle, &path).is_none());
    }

    #[test]
    fn test_different_edge_counts() {
        let a = graph(3, &[(1, 2), (2, 3)]);
        let b = graph(3, &[(1, 2)]);
        assert!(find_isomorphism(&a, &b).is_none());
    }

    #[test]
    fn test_isolated_vertex_moves_when_required() {
        // Vertex 4 only appears in the expected graph, vertex 3 only in the current
        let current = graph(4, &[(1, 2), (2, 3)]);
        let expected = graph(4, &[(1, 2), (2, 4)]);
        let sigma = find_isomorphism(&current, &expected).unwrap();
        assert!(preserves_edges(&sigma, &current, &expected));
        assert_eq!(sigma.apply(2), 2);
    }

    #[test]
    fn test_all_isomorphisms_of_triangle() {
        let g = graph(3, &[(1, 2), (2, 3), (3, 1)]);
        let all = find_all_isomorphisms(&g, &g, usize::MAX);
        assert_eq!(all.len(), 6);
        for sigma in &all {
            assert!(preserves_edges(sigma, &g, &g));
        }
        assert_eq!(find_all_isomorphisms(&g, &g, 2).len(), 2);
        assert!(find_all_isomorphisms(&g, &g, 0).is_empty());
    }

    #[test]
    fn test_empty_graphs() {
        let g = Graph::new(0);
        let sigma = find_isomorphism(&g, &g).unwrap();
        assert!(sigma.is_identity());
    }
}
