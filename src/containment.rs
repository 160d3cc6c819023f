//! Backtracking search for occurrences of a mesh pattern in a permutation.
//!
//! The search walks the host left to right and, at every position, first
//! tries to take the element into the partial occurrence (only if the chosen
//! values stay order-isomorphic to the matching prefix of the pattern) and
//! then tries to skip it. A complete candidate is accepted when no unchosen
//! host element falls into a shaded box of the grid the candidate induces.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::SearchError;
use crate::{MeshPattern, Permutation};

/// Limits for a containment search.
///
/// The worst case of the search is exponential in the host length, so long
/// running callers can bound it by time or cancel it from another thread.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Abort once this much time has passed since the search started.
    pub time_limit: Option<Duration>,
    /// Abort as soon as this flag is observed set.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Number of search nodes visited between two checks of the limits.
    pub check_interval: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            time_limit: None,
            cancel: None,
            check_interval: 1024,
        }
    }
}

impl MeshPattern {
    /// Returns whether `host` contains an occurrence of this pattern.
    ///
    /// The empty pattern is contained in every host its shading allows; with
    /// no shading that is every host, the empty one included.
    pub fn contained_in(&self, host: &Permutation) -> bool {
        self.find_occurrence(host).is_some()
    }

    /// Returns the 0-based host positions of the first occurrence found,
    /// in increasing order.
    pub fn find_occurrence(&self, host: &Permutation) -> Option<Vec<usize>> {
        // Without limits the search cannot be interrupted.
        self.find_occurrence_with(host, &SearchParams::default())
            .ok()
            .flatten()
    }

    /// Like [`contained_in`](Self::contained_in), but gives up when `params`
    /// says so.
    pub fn contained_in_with(
        &self,
        host: &Permutation,
        params: &SearchParams,
    ) -> Result<bool, SearchError> {
        Ok(self.find_occurrence_with(host, params)?.is_some())
    }

    /// Like [`find_occurrence`](Self::find_occurrence), but gives up when
    /// `params` says so.
    pub fn find_occurrence_with(
        &self,
        host: &Permutation,
        params: &SearchParams,
    ) -> Result<Option<Vec<usize>>, SearchError> {
        let mut search = Search::new(self, host.values(), Budget::new(params));
        match search.extend(0) {
            Ok(true) => {
                log::trace!("{:?} occurs in {} at {:?}", self, host, search.chosen);
                Ok(Some(search.chosen))
            }
            Ok(false) => {
                log::trace!("{:?} does not occur in {}", self, host);
                Ok(None)
            }
            Err(e) => {
                log::debug!(
                    "search for {:?} in {} stopped after {} nodes: {}",
                    self,
                    host,
                    search.budget.nodes,
                    e
                );
                Err(e)
            }
        }
    }

    /// Containment test that explores the candidates for the first matched
    /// host position in parallel.
    #[cfg(feature = "parallel")]
    pub fn contained_in_parallel(&self, host: &Permutation) -> bool {
        use rayon::prelude::*;

        if self.is_empty() {
            return self.contained_in(host);
        }
        let params = SearchParams::default();
        (0..host.len()).into_par_iter().any(|start| {
            let mut search = Search::new(self, host.values(), Budget::new(&params));
            search.chosen.push(start);
            search.extend(start + 1).unwrap_or(false)
        })
    }
}

/// Tracks how much work a search has done against its limits.
struct Budget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    interval: u64,
    nodes: u64,
}

impl Budget {
    fn new(params: &SearchParams) -> Self {
        Self {
            deadline: params.time_limit.map(|limit| Instant::now() + limit),
            cancel: params.cancel.clone(),
            interval: params.check_interval.max(1),
            nodes: 0,
        }
    }

    #[inline]
    fn tick(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        if self.nodes % self.interval != 0 {
            return Ok(());
        }
        if let Some(cancel) = &self.cancel {
            if cancel.load(Ordering::Relaxed) {
                return Err(SearchError::Cancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SearchError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

struct Search<'a> {
    pattern: &'a MeshPattern,
    host: &'a [usize],
    /// Host positions taken into the partial occurrence, increasing.
    chosen: Vec<usize>,
    budget: Budget,
}

impl<'a> Search<'a> {
    fn new(pattern: &'a MeshPattern, host: &'a [usize], budget: Budget) -> Self {
        Self {
            pattern,
            host,
            chosen: Vec::with_capacity(pattern.len()),
            budget,
        }
    }

    /// Tries to complete the partial occurrence using host positions `i..`.
    /// On success `chosen` holds the occurrence.
    fn extend(&mut self, i: usize) -> Result<bool, SearchError> {
        self.budget.tick()?;

        let k = self.chosen.len();
        let n = self.pattern.len();
        if k == n {
            return Ok(self.avoids_shading());
        }
        if self.host.len() - i < n - k {
            return Ok(false);
        }

        if self.matches_prefix(self.host[i]) {
            self.chosen.push(i);
            if self.extend(i + 1)? {
                return Ok(true);
            }
            self.chosen.pop();
        }
        self.extend(i + 1)
    }

    /// Whether appending `value` keeps the chosen values order-isomorphic to
    /// the pattern prefix of the same length. The current prefix is assumed
    /// to match already.
    fn matches_prefix(&self, value: usize) -> bool {
        let perm = self.pattern.perm();
        let k = self.chosen.len();
        let next = perm[k];
        self.chosen
            .iter()
            .enumerate()
            .all(|(t, &c)| (self.host[c] < value) == (perm[t] < next))
    }

    /// Checks every unchosen host element against the shading.
    fn avoids_shading(&self) -> bool {
        let mut values: Vec<usize> = self.chosen.iter().map(|&c| self.host[c]).collect();
        values.sort_unstable();

        let mut x = 0;
        for (j, &v) in self.host.iter().enumerate() {
            if x < self.chosen.len() && self.chosen[x] == j {
                x += 1;
                continue;
            }
            let y = values.partition_point(|&w| w < v);
            if self.pattern.is_shaded((x, y)) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Cell;
    use crate::random::{RandomParams, random_mesh_pattern};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn perm(values: &[usize]) -> Permutation {
        Permutation::new(values.to_vec())
    }

    fn mesh(values: &[usize], cells: &[Cell]) -> MeshPattern {
        MeshPattern::new(perm(values), cells.iter().copied())
    }

    fn hosts_up_to(max_len: usize) -> Vec<Permutation> {
        (0..=max_len).flat_map(Permutation::all).collect()
    }

    /// Tries every subset of host positions directly from the definition.
    fn naive_contains(p: &MeshPattern, host: &Permutation) -> bool {
        let m = host.len();
        let n = p.len();
        (0u32..1 << m)
            .filter(|mask| mask.count_ones() as usize == n)
            .any(|mask| {
                let chosen: Vec<usize> = (0..m).filter(|&i| mask & 1 << i != 0).collect();
                let values: Vec<usize> = chosen.iter().map(|&i| host[i]).collect();
                if Permutation::to_standard(&values) != *p.perm() {
                    return false;
                }
                (0..m).filter(|i| !chosen.contains(i)).all(|j| {
                    let x = chosen.iter().filter(|&&c| c < j).count();
                    let y = values.iter().filter(|&&v| v < host[j]).count();
                    !p.is_shaded((x, y))
                })
            })
    }

    #[test]
    fn classical_increasing_pair() {
        let p = mesh(&[1, 2], &[]);
        assert!(p.contained_in(&perm(&[1, 2, 3])));
        assert!(p.contained_in(&perm(&[2, 3, 1])));
        assert!(!p.contained_in(&perm(&[3, 2, 1])));
        assert!(!p.contained_in(&perm(&[1])));
    }

    #[test]
    fn shaded_middle_box() {
        // An occurrence needs an increasing pair with nothing between the two
        // points in both position and value.
        let p = mesh(&[1, 2], &[(1, 1)]);
        assert!(p.contained_in(&perm(&[1, 3, 2])));
        assert!(p.contained_in(&perm(&[1, 2, 3])));
        assert!(!p.contained_in(&perm(&[3, 2, 1])));
        // 1 and 3 enclose 2; the first pair tried is 1, 2.
        assert_eq!(p.find_occurrence(&perm(&[1, 2, 3])), Some(vec![0, 1]));
        // 2 lies right of 1 and 3, outside the middle box.
        assert_eq!(p.find_occurrence(&perm(&[1, 3, 2])), Some(vec![0, 1]));
        // 1 lies below 2, outside the middle box.
        assert_eq!(p.find_occurrence(&perm(&[2, 1, 3])), Some(vec![0, 2]));
    }

    #[test]
    fn shaded_middle_column() {
        // Nothing may sit between the two points horizontally.
        let p = mesh(&[1, 2], &[(1, 0), (1, 1), (1, 2)]);
        assert!(p.contained_in(&perm(&[3, 1, 2])));
        assert!(!p.contained_in(&perm(&[3, 2, 1])));
        assert_eq!(p.find_occurrence(&perm(&[2, 3, 1, 4])), Some(vec![0, 1]));
        assert_eq!(p.find_occurrence(&perm(&[3, 2, 4, 1])), Some(vec![1, 2]));
    }

    #[test]
    fn fully_shaded_point_only_matches_itself() {
        let p = mesh(&[1], &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(p.contained_in(&perm(&[1])));
        assert!(!p.contained_in(&perm(&[1, 2])));
        assert!(!p.contained_in(&perm(&[2, 1])));
        assert!(!p.contained_in(&perm(&[])));
    }

    #[test]
    fn empty_pattern_is_everywhere() {
        let p = MeshPattern::classical(perm(&[]));
        for h in hosts_up_to(4) {
            assert!(p.contained_in(&h), "empty pattern should occur in {}", h);
            assert_eq!(p.find_occurrence(&h), Some(vec![]));
        }

        let shaded = mesh(&[], &[(0, 0)]);
        assert!(shaded.contained_in(&perm(&[])));
        assert!(!shaded.contained_in(&perm(&[1])));
    }

    #[test]
    fn agrees_with_definition() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let params = RandomParams {
            shade_probability: 0.3,
        };
        let hosts = hosts_up_to(5);
        for n in 0..=3 {
            for _ in 0..15 {
                let p = random_mesh_pattern(n, &mut rng, &params);
                for h in &hosts {
                    assert_eq!(
                        p.contained_in(h),
                        naive_contains(&p, h),
                        "disagreement for {:?} in {}",
                        p,
                        h
                    );
                }
            }
        }
    }

    #[test]
    fn occurrence_is_a_witness() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let params = RandomParams {
            shade_probability: 0.2,
        };
        let hosts = hosts_up_to(5);
        for _ in 0..30 {
            let p = random_mesh_pattern(2, &mut rng, &params);
            for h in &hosts {
                if let Some(occ) = p.find_occurrence(h) {
                    assert!(occ.windows(2).all(|w| w[0] < w[1]));
                    let values: Vec<usize> = occ.iter().map(|&i| h[i]).collect();
                    assert_eq!(&Permutation::to_standard(&values), p.perm());
                }
            }
        }
    }

    #[test]
    fn more_shading_never_creates_occurrences() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        let params = RandomParams {
            shade_probability: 0.25,
        };
        let hosts = hosts_up_to(5);
        for n in 1..=3 {
            for _ in 0..10 {
                let p = random_mesh_pattern(n, &mut rng, &params);
                for x in 0..=n {
                    for y in 0..=n {
                        let q = p.shade((x, y));
                        for h in &hosts {
                            if q.contained_in(h) {
                                assert!(p.contained_in(h), "{:?} in {} but not {:?}", q, h, p);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn cancelled_search_reports_it() {
        let cancel = Arc::new(AtomicBool::new(true));
        let params = SearchParams {
            cancel: Some(cancel.clone()),
            check_interval: 1,
            ..Default::default()
        };
        let p = mesh(&[1, 2], &[]);
        let host = perm(&[3, 2, 1]);
        assert_eq!(p.contained_in_with(&host, &params), Err(SearchError::Cancelled));

        cancel.store(false, Ordering::Relaxed);
        assert_eq!(p.contained_in_with(&host, &params), Ok(false));
        assert_eq!(p.contained_in_with(&perm(&[1, 2]), &params), Ok(true));
    }

    #[test]
    fn expired_deadline_reports_it() {
        let params = SearchParams {
            time_limit: Some(Duration::ZERO),
            check_interval: 1,
            ..Default::default()
        };
        let p = mesh(&[2, 1], &[]);
        assert_eq!(
            p.find_occurrence_with(&perm(&[1, 2, 3, 4]), &params),
            Err(SearchError::DeadlineExceeded)
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_search_agrees() {
        let mut rng = ChaCha20Rng::seed_from_u64(23);
        let params = RandomParams::default();
        let hosts = hosts_up_to(5);
        for n in 0..=3 {
            for _ in 0..5 {
                let p = random_mesh_pattern(n, &mut rng, &params);
                for h in &hosts {
                    assert_eq!(p.contained_in_parallel(h), p.contained_in(h));
                }
            }
        }
    }
}
