use crate::error::SearchError;
use crate::Permutation;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{HashSet, VecDeque};

/// Default ceiling on the number of distinct states the search may visit
pub const DEFAULT_MAX_STATES: usize = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Fail with [`SearchError::StateLimitExceeded`] once this many states are visited
    pub max_states: usize,
    /// Expand each BFS layer in parallel
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_states: DEFAULT_MAX_STATES,
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target is reached after `distance` generator applications, and no fewer
    Found { distance: usize },
    /// Every reachable state was visited without meeting the target
    Unreachable,
}

/// Counters reported after a search finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub states_visited: usize,
    pub depth: usize,
}

/// Breadth-first search over the group generated by `generators`, starting at the
/// identity. A generator `g` takes state `p` to `g ∘ p`.
pub struct TransformSearch<'a> {
    generators: &'a [Permutation],
    config: SearchConfig,
}

impl<'a> TransformSearch<'a> {
    pub fn new(generators: &'a [Permutation], config: SearchConfig) -> Self {
        TransformSearch { generators, config }
    }

    /// Minimum number of generator applications turning the identity into `target`
    pub fn search(&self, target: &Permutation) -> Result<SearchOutcome, SearchError> {
        self.search_any(std::slice::from_ref(target))
    }

    /// Minimum distance from the identity to the nearest of `targets`
    pub fn search_any(&self, targets: &[Permutation]) -> Result<SearchOutcome, SearchError> {
        let Some(first) = targets.first() else {
            return Ok(SearchOutcome::Unreachable);
        };
        let n = first.size();
        for p in targets.iter().chain(self.generators) {
            if p.size() != n {
                return Err(SearchError::SizeMismatch {
                    expected: n,
                    found: p.size(),
                });
            }
        }

        if targets.iter().any(Permutation::is_identity) {
            return Ok(SearchOutcome::Found { distance: 0 });
        }
        if self.generators.is_empty() {
            debug!("No generators and the target is not the identity");
            return Ok(SearchOutcome::Unreachable);
        }

        let goals: HashSet<&Permutation> = targets.iter().collect();
        let start = Permutation::identity(n);

        let (outcome, stats) = if self.config.parallel {
            self.layered_bfs(start, &goals)?
        } else {
            self.bfs(start, &goals)?
        };

        info!(
            "Search finished: {:?} after visiting {} states (depth {})",
            outcome, stats.states_visited, stats.depth
        );
        Ok(outcome)
    }

    fn limit_exceeded(&self, visited: usize) -> Result<(), SearchError> {
        if visited >= self.config.max_states {
            warn!("State limit of {} reached", self.config.max_states);
            return Err(SearchError::StateLimitExceeded {
                limit: self.config.max_states,
            });
        }
        Ok(())
    }

    fn bfs(
        &self,
        start: Permutation,
        goals: &HashSet<&Permutation>,
    ) -> Result<(SearchOutcome, SearchStats), SearchError> {
        let mut visited: HashSet<Permutation> = HashSet::new();
        let mut queue: VecDeque<(Permutation, usize)> = VecDeque::new();
        let mut stats = SearchStats::default();

        visited.insert(start.clone());
        queue.push_back((start, 0));

        while let Some((state, distance)) = queue.pop_front() {
            stats.depth = distance;

            if goals.contains(&state) {
                stats.states_visited = visited.len();
                return Ok((SearchOutcome::Found { distance }, stats));
            }

            for generator in self.generators {
                let next = generator.compose(&state);
                if !visited.contains(&next) {
                    self.limit_exceeded(visited.len())?;
                    visited.insert(next.clone());
                    queue.push_back((next, distance + 1));
                }
            }
        }

        stats.states_visited = visited.len();
        Ok((SearchOutcome::Unreachable, stats))
    }

    /// Layer-synchronous variant: successors of a whole layer are computed in parallel,
    /// then merged into the visited set sequentially in generator order.
    fn layered_bfs(
        &self,
        start: Permutation,
        goals: &HashSet<&Permutation>,
    ) -> Result<(SearchOutcome, SearchStats), SearchError> {
        let mut visited: HashSet<Permutation> = HashSet::new();
        let mut stats = SearchStats::default();

        visited.insert(start.clone());
        let mut layer = vec![start];
        let mut distance = 0;

        while !layer.is_empty() {
            stats.depth = distance;

            if layer.iter().any(|state| goals.contains(state)) {
                stats.states_visited = visited.len();
                return Ok((SearchOutcome::Found { distance }, stats));
            }

            let successors: Vec<Permutation> = layer
                .par_iter()
                .flat_map_iter(|state| self.generators.iter().map(move |g| g.compose(state)))
                .collect();

            let mut next_layer = Vec::new();
            for next in successors {
                if !visited.contains(&next) {
                    self.limit_exceeded(visited.len())?;
                    visited.insert(next.clone());
                    next_layer.push(next);
                }
            }

            debug!("Layer {} -> {} new states", distance + 1, next_layer.len());
            layer = next_layer;
            distance += 1;
        }

        stats.states_visited = visited.len();
        Ok((SearchOutcome::Unreachable, stats))
    }
}
