use crate::cycles::cycle_generators;
use crate::error::{GraphError, SearchError, SolveError};
use crate::mapping::{find_all_isomorphisms, find_isomorphism};
use crate::search::{SearchConfig, SearchOutcome, TransformSearch};
use crate::{utils, Edge, Graph, Instance, Permutation};
use log::{debug, info, warn};
use std::fmt;

/// Cap on the number of isomorphisms enumerated by [`TargetPolicy::AllIsomorphisms`]
pub const DEFAULT_TARGET_LIMIT: usize = 10_000;

/// Final result of a solve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Minimum number of cycle rotations
    Rotations(usize),
    Impossible,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Rotations(count) => write!(f, "{}", count),
            Answer::Impossible => write!(f, "Impossible"),
        }
    }
}

/// Which relabelings of the current graph count as reaching the expected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPolicy {
    /// The first isomorphism in ascending vertex order
    FirstIsomorphism,
    /// Any of up to `limit` isomorphisms; the nearest one wins
    AllIsomorphisms { limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub search: SearchConfig,
    pub targets: TargetPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            search: SearchConfig::default(),
            targets: TargetPolicy::FirstIsomorphism,
        }
    }
}

/// Current and expected graphs over a shared vertex range `1..=n`
#[derive(Debug, Clone)]
pub struct Solver {
    current: Graph,
    expected: Graph,
    config: SolverConfig,
}

impl Solver {
    pub fn new(current_edges: &[Edge], expected_edges: &[Edge]) -> Result<Self, GraphError> {
        let n = utils::max_vertex([current_edges, expected_edges]) as usize;
        let current = Graph::with_size(n, current_edges)?;
        let expected = Graph::with_size(n, expected_edges)?;

        debug!(
            "Built graphs over {} vertices: {} current edges, {} expected edges",
            n,
            current.num_edges(),
            expected.num_edges()
        );

        Ok(Solver {
            current,
            expected,
            config: SolverConfig::default(),
        })
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn size(&self) -> usize {
        self.current.n
    }

    /// Relabelings mapping the current graph onto the expected one, per the target policy
    pub fn target_permutations(&self) -> Vec<Permutation> {
        match self.config.targets {
            TargetPolicy::FirstIsomorphism => {
                find_isomorphism(&self.current, &self.expected).into_iter().collect()
            }
            TargetPolicy::AllIsomorphisms { limit } => {
                let targets = find_all_isomorphisms(&self.current, &self.expected, limit);
                if limit > 0 && targets.len() == limit {
                    warn!(
                        "Stopped at the limit of {} isomorphisms; a nearer relabeling may be missed",
                        limit
                    );
                }
                targets
            }
        }
    }

    /// Rotations along every simple cycle of the current graph
    pub fn generators(&self) -> Vec<Permutation> {
        cycle_generators(&self.current)
    }

    pub fn solve(&self) -> Result<Answer, SearchError> {
        let targets = self.target_permutations();
        if targets.is_empty() {
            warn!("No isomorphism between the current and expected graphs");
            return Ok(Answer::Impossible);
        }
        if targets.iter().any(Permutation::is_identity) {
            info!("Expected configuration already matches");
            return Ok(Answer::Rotations(0));
        }
        debug!("Target permutation(s): {:?}", targets);

        let generators = self.generators();
        info!(
            "{} target(s), {} generator(s), at most {} states over {} vertices",
            targets.len(),
            generators.len(),
            utils::saturating_factorial(self.size()),
            self.size()
        );

        let search = TransformSearch::new(&generators, self.config.search);
        Ok(match search.search_any(&targets)? {
            SearchOutcome::Found { distance } => Answer::Rotations(distance),
            SearchOutcome::Unreachable => Answer::Impossible,
        })
    }
}

/// Build the graphs of `instance` and solve it
pub fn solve_instance(instance: &Instance, config: &SolverConfig) -> Result<Answer, SolveError> {
    let solver = Solver::new(&instance.current_edges, &instance.expected_edges)?
        .with_config(*config);
    Ok(solver.solve()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::Rotations(7).to_string(), "7");
        assert_eq!(Answer::Impossible.to_string(), "Impossible");
    }

    #[test]
    fn test_non_isomorphic_is_impossible() {
        let solver = Solver::new(&[(1, 2), (2, 3), (3, 4)], &[(1, 2), (1, 3), (1, 4)]).unwrap();
        assert!(solver.target_permutations().is_empty());
        assert_eq!(solver.solve().unwrap(), Answer::Impossible);
    }

    #[test]
    fn test_shared_vertex_range() {
        let solver = Solver::new(&[(1, 2), (2, 3), (3, 1)], &[(1, 2), (2, 5), (5, 1)]).unwrap();
        assert_eq!(solver.size(), 5);
        assert_eq!(solver.generators().len(), 1);
        assert!(solver.generators().iter().all(|g| g.size() == 5));
    }

    #[test]
    fn test_all_targets_policy_finds_reachable_relabeling() {
        // Triangle 1-2-3 with its tail moved from 3 to 2. The first isomorphism swaps
        // 2 and 3, an odd permutation no 3-cycle rotation can produce; rotating the
        // triangle twice is another valid relabeling.
        let current: Vec<Edge> = vec![(1, 2), (2, 3), (3, 1), (3, 4)];
        let expected: Vec<Edge> = vec![(3, 1), (1, 2), (2, 3), (2, 4)];

        let first = Solver::new(&current, &expected).unwrap();
        assert_eq!(first.target_permutations()[0].as_slice(), &[0, 1, 3, 2, 4]);
        assert_eq!(first.solve().unwrap(), Answer::Impossible);

        let all = first.with_config(SolverConfig {
            targets: TargetPolicy::AllIsomorphisms {
                limit: DEFAULT_TARGET_LIMIT,
            },
            ..SolverConfig::default()
        });
        assert_eq!(all.target_permutations().len(), 2);
        assert_eq!(all.solve().unwrap(), Answer::Rotations(2));
    }

    #[test]
    fn test_target_limit_truncates_enumeration() {
        // Same triangle with a moved tail; only the second isomorphism is reachable
        let current: Vec<Edge> = vec![(1, 2), (2, 3), (3, 1), (3, 4)];
        let expected: Vec<Edge> = vec![(3, 1), (1, 2), (2, 3), (2, 4)];
        let truncated = Solver::new(&current, &expected)
            .unwrap()
            .with_config(SolverConfig {
                targets: TargetPolicy::AllIsomorphisms { limit: 1 },
                ..SolverConfig::default()
            });
        assert_eq!(truncated.target_permutations().len(), 1);
        assert_eq!(truncated.solve().unwrap(), Answer::Impossible);
    }

    #[test]
    fn test_state_limit_propagates() {
        let current: Vec<Edge> = vec![(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 3), (5, 6)];
        let sigma = Permutation::from_cycle(&[3, 4, 5], 6);
        let expected: Vec<Edge> = current
            .iter()
            .map(|&(u, v)| (sigma.apply(u as usize) as i64, sigma.apply(v as usize) as i64))
            .collect();
        let solver = Solver::new(&current, &expected)
            .unwrap()
            .with_config(SolverConfig {
                search: SearchConfig {
                    max_states: 1,
                    parallel: false,
                },
                ..SolverConfig::default()
            });
        assert!(matches!(
            solver.solve(),
            Err(SearchError::StateLimitExceeded { limit: 1 })
        ));
    }
}
