use crate::Edge;

/// Largest vertex id referenced by any of the edge lists (0 when all are empty)
pub fn max_vertex<'a, I>(edge_lists: I) -> i64
where
    I: IntoIterator<Item = &'a [Edge]>,
{
    edge_lists
        .into_iter()
        .flat_map(|edges| edges.iter())
        .flat_map(|&(u, v)| [u, v])
        .max()
        .unwrap_or(0)
        .max(0)
}

/// Calculate n! without overflow, saturating at `usize::MAX`
///
/// Upper bound on the number of states a permutation search over `n` points can reach.
pub fn saturating_factorial(n: usize) -> usize {
    let mut result = 1usize;

    for i in 2..=n {
        result = result.saturating_mul(i);
        if result == usize::MAX {
            break;
        }
    }

    result
}
