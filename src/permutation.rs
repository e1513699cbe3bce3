use std::fmt;
use std::hash::{Hash, Hasher};

const HASH_BASE: u64 = 1_000_003;

/// A permutation of the vertices `1..=n`, stored as an image array of length `n + 1`.
///
/// Position 0 is padding and always maps to 0. Vertices that do not appear in any
/// graph are fixed points.
///
/// Hash/equality contract: two permutations are equal iff their image arrays are
/// equal element-wise. `Hash` feeds a single polynomial hash of the image array to
/// the hasher, so equal permutations always hash equally. Visited-set membership
/// during the transform search relies on this.
#[derive(Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self((0..=n).collect())
    }

    /// Build from an image array (`images[v]` is the image of `v`), validating
    /// that it is a bijection on `0..images.len()` with 0 fixed.
    pub fn from_images(images: Vec<usize>) -> Option<Self> {
        if images.first() != Some(&0) {
            return None;
        }

        let len = images.len();
        let mut seen = vec![false; len];

        for &image in &images {
            if image >= len || seen[image] {
                return None;
            }
            seen[image] = true;
        }

        Some(Self(images))
    }

    /// Rotation along `cycle`: every vertex maps to its successor, the last one wraps
    /// to the first. Vertices off the cycle are fixed.
    pub fn from_cycle(cycle: &[usize], n: usize) -> Self {
        let mut images: Vec<usize> = (0..=n).collect();
        for (i, &u) in cycle.iter().enumerate() {
            images[u] = cycle[(i + 1) % cycle.len()];
        }
        Self(images)
    }

    /// Number of vertices `n` this permutation acts on
    pub fn size(&self) -> usize {
        self.0.len() - 1
    }

    pub fn apply(&self, v: usize) -> usize {
        self.0[v]
    }

    /// `self ∘ other`: the result maps `v` to `self(other(v))`, i.e. `other` is
    /// applied first.
    pub fn compose(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.len(), other.0.len());
        Self(other.0.iter().map(|&v| self.0[v]).collect())
    }

    pub fn inverse(&self) -> Self {
        let mut images = vec![0; self.0.len()];
        for (v, &image) in self.0.iter().enumerate() {
            images[image] = v;
        }
        Self(images)
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(v, &image)| v == image)
    }

    /// Vertices moved by this permutation, ascending
    pub fn support(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|&(v, &image)| v != image)
            .map(|(v, _)| v)
            .collect()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    fn structural_hash(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &image| {
            acc.wrapping_mul(HASH_BASE).wrapping_add(image as u64 + 1)
        })
    }
}

impl Hash for Permutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self.0[1..])
    }
}
