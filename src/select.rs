//! Bounded top-K selection for fleet-wide ranking queries
//!
//! Answering "the 10 most recently modified of a million files" does not need
//! a full sort. [`select_top_k`] keeps the K best candidates seen so far in a
//! fixed-capacity heap whose root is the worst of them. Each further candidate
//! is compared against that root only, and replaces it when better, for
//! O(N log K) overall.
//!
//! ## Rankings
//!
//! What "better" means is supplied as a [`Ranking`], an "is worse than"
//! predicate. Two rankings ship with the crate:
//!
//! - [`ByRecency`]: later `last_modified` is better
//! - [`ByVersionCount`]: more versions is better
//!
//! Any `Fn(&T, &T) -> bool` closure is a ranking as well.
//!
//! ## Ties
//!
//! Elements the ranking cannot tell apart keep their input order: the earlier
//! element is treated as the better one. The result therefore always equals the
//! first K elements of a stable sort by the same ranking.
//!
//! ## Examples
//!
//! ```rust
//! use vertree::select::select_top_k;
//!
//! let lengths = vec![3, 9, 1, 7, 9, 4];
//! let longest = select_top_k(lengths, 3, &|a: &i32, b: &i32| a < b)?;
//! assert_eq!(longest, vec![9, 9, 7]);
//! # Ok::<(), vertree::VersionError>(())
//! ```

use crate::error::{Result, VersionError};
use crate::file::FileSummary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::trace;

/// Strict "is worse than" ordering used to rank candidates
///
/// Implementations must behave as a strict weak order: never worse than
/// itself, and transitive.
pub trait Ranking<T: ?Sized> {
    /// Whether `a` ranks strictly below `b`
    fn is_worse(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Ranking<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn is_worse(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Most recently modified first
#[derive(Debug, Clone, Copy, Default)]
pub struct ByRecency;

impl Ranking<FileSummary<'_>> for ByRecency {
    fn is_worse(&self, a: &FileSummary<'_>, b: &FileSummary<'_>) -> bool {
        a.last_modified < b.last_modified
    }
}

/// Largest version tree first
#[derive(Debug, Clone, Copy, Default)]
pub struct ByVersionCount;

impl Ranking<FileSummary<'_>> for ByVersionCount {
    fn is_worse(&self, a: &FileSummary<'_>, b: &FileSummary<'_>) -> bool {
        a.total_versions < b.total_versions
    }
}

/// Ranking chosen by the command layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBy {
    /// See [`ByRecency`]
    Recency,
    /// See [`ByVersionCount`]
    VersionCount,
}

impl<'a> Ranking<FileSummary<'a>> for RankBy {
    fn is_worse(&self, a: &FileSummary<'a>, b: &FileSummary<'a>) -> bool {
        match self {
            RankBy::Recency => ByRecency.is_worse(a, b),
            RankBy::VersionCount => ByVersionCount.is_worse(a, b),
        }
    }
}

/// Return the `k` best items under `ranking`, best first
///
/// When `k` is at least the number of items, every item is returned in ranked
/// order. Memory is bounded by the smaller of `k` and the number of items, so
/// an oversized `k` is harmless.
///
/// # Errors
///
/// [`VersionError::InvalidSelectionSize`] if `k` is zero.
pub fn select_top_k<T, R>(items: impl IntoIterator<Item = T>, k: usize, ranking: &R) -> Result<Vec<T>>
where
    R: Ranking<T> + ?Sized,
{
    if k == 0 {
        return Err(VersionError::InvalidSelectionSize(0));
    }

    let items = items.into_iter();
    let mut heap = BoundedHeap::new(k, items.size_hint().0, ranking);
    let mut seen = 0usize;
    for (seq, item) in items.enumerate() {
        heap.offer(Ranked { seq, item });
        seen += 1;
    }
    trace!("Selected {} of {} candidates", heap.len(), seen);

    Ok(heap.into_sorted_vec())
}

/// Candidate tagged with its input position for tie-breaking
struct Ranked<T> {
    seq: usize,
    item: T,
}

/// Fixed-capacity binary heap with the worst retained candidate at the root
struct BoundedHeap<'r, T, R: ?Sized> {
    capacity: usize,
    ranking: &'r R,
    elements: Vec<Ranked<T>>,
}

impl<'r, T, R> BoundedHeap<'r, T, R>
where
    R: Ranking<T> + ?Sized,
{
    /// `expected` is the caller's estimate of the candidate count; storage is
    /// reserved for at most that many, whatever the capacity.
    fn new(capacity: usize, expected: usize, ranking: &'r R) -> Self {
        Self {
            capacity,
            ranking,
            elements: Vec::with_capacity(capacity.min(expected)),
        }
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    /// Total order: the ranking first, then later input position is worse
    fn worse(&self, a: &Ranked<T>, b: &Ranked<T>) -> bool {
        if self.ranking.is_worse(&a.item, &b.item) {
            return true;
        }
        if self.ranking.is_worse(&b.item, &a.item) {
            return false;
        }
        a.seq > b.seq
    }

    fn offer(&mut self, candidate: Ranked<T>) {
        if self.elements.len() < self.capacity {
            self.elements.push(candidate);
            self.sift_up(self.elements.len() - 1);
        } else if self.worse(&self.elements[0], &candidate) {
            self.elements[0] = candidate;
            self.sift_down(0);
        }
    }

    fn pop_worst(&mut self) -> Option<Ranked<T>> {
        if self.elements.is_empty() {
            return None;
        }
        let worst = self.elements.swap_remove(0);
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Some(worst)
    }

    /// Drain worst-first, then reverse into best-first order
    fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.elements.len());
        while let Some(ranked) = self.pop_worst() {
            out.push(ranked.item);
        }
        out.reverse();
        out
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.worse(&self.elements[i], &self.elements[parent]) {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.elements.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut worst = i;
            if left < len && self.worse(&self.elements[left], &self.elements[worst]) {
                worst = left;
            }
            if right < len && self.worse(&self.elements[right], &self.elements[worst]) {
                worst = right;
            }
            if worst == i {
                break;
            }
            self.elements.swap(i, worst);
            i = worst;
        }
    }
}

/// Comparator equivalent to a ranking, best first, for use with stable sorts
pub fn ranked_order<T, R>(ranking: R) -> impl Fn(&T, &T) -> Ordering
where
    R: Ranking<T>,
{
    move |a: &T, b: &T| {
        if ranking.is_worse(b, a) {
            Ordering::Less
        } else if ranking.is_worse(a, b) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}
