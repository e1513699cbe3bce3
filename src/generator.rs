use crate::cycles::cycle_generators;
use crate::error::GraphError;
use crate::{Edge, Graph, Instance, Permutation};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of vertices (ids `1..=vertices`)
    pub vertices: usize,
    /// Chords added on top of the spanning tree
    pub extra_edges: usize,
    /// Number of random rotations applied to produce the expected configuration
    pub scramble: usize,
}

/// A generated instance together with the relabeling it was built from
#[derive(Debug, Clone)]
pub struct GeneratedInstance {
    pub instance: Instance,
    pub scramble: Permutation,
    pub generator_count: usize,
}

/// Random connected simple graph on `1..=n`: a random tree plus up to `extra` chords
fn random_connected_edges<R: Rng>(n: usize, extra: usize, rng: &mut R) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    let mut adj = vec![vec![false; n + 1]; n + 1];

    for v in 2..=n {
        let u = rng.gen_range(1..v);
        adj[u][v] = true;
        adj[v][u] = true;
        edges.push((u, v));
    }

    let max_edges = n * n.saturating_sub(1) / 2;
    let target = (edges.len() + extra).min(max_edges);
    while edges.len() < target {
        let u = rng.gen_range(1..=n);
        let v = rng.gen_range(1..=n);
        if u == v || adj[u][v] {
            continue;
        }
        adj[u][v] = true;
        adj[v][u] = true;
        edges.push((u, v));
    }

    edges
}

/// Generate a solvable instance for the rotation solver.
///
/// The current graph is a random connected graph (random spanning tree plus extra
/// chords). The expected edge list relabels every current edge through a scramble of
/// `scramble` random cycle rotations, shuffled and with endpoints randomly swapped.
///
/// The scramble length bounds the optimal answer when the solver considers every
/// isomorphism (`TargetPolicy::AllIsomorphisms`).
pub fn generate_instance<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GeneratedInstance, GraphError> {
    let n = config.vertices;
    let edges = random_connected_edges(n, config.extra_edges, rng);
    let current_edges: Vec<Edge> = edges.iter().map(|&(u, v)| (u as i64, v as i64)).collect();

    let graph = Graph::with_size(n, &current_edges)?;
    let generators = cycle_generators(&graph);

    let mut scramble = Permutation::identity(n);
    if generators.is_empty() && config.scramble > 0 {
        warn!("Generated graph has no cycles, the instance is left unscrambled");
    } else {
        for _ in 0..config.scramble {
            if let Some(generator) = generators.choose(rng) {
                scramble = generator.compose(&scramble);
            }
        }
    }
    debug!("Scramble: {:?}", scramble);

    let mut expected_edges: Vec<Edge> = edges
        .iter()
        .map(|&(u, v)| {
            let (x, y) = (scramble.apply(u) as i64, scramble.apply(v) as i64);
            if rng.gen::<bool>() {
                (x, y)
            } else {
                (y, x)
            }
        })
        .collect();
    expected_edges.shuffle(rng);

    Ok(GeneratedInstance {
        instance: Instance {
            current_edges,
            expected_edges,
        },
        scramble,
        generator_count: generators.len(),
    })
}
