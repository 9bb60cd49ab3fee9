use crate::error::{Error, Result};
use crate::list::{List, Rank};
use std::iter::FusedIterator;
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// The stage of a generation session.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
enum State {
    /// The first permutation has not been visited yet.
    Start,
    /// At least one permutation has been visited, and the list holds the
    /// most recent one.
    Running,
    /// All permutations have been visited, and cycling was not requested.
    Exhausted,
}

/// A lazy sequence over the distinct permutations of a multiset of
/// [ranks](`Rank`), in the order of Algorithm 1.
///
/// Use [`generate`] to create one. The first permutation lists the ranks in
/// non-increasing order, and each of the following permutations is obtained
/// from the previous one by a prefix shift in constant time; the only linear
/// time work per step is copying the permutation out of the session.
///
/// If cycling was requested, the sequence starts over with the first
/// permutation after visiting the last one, and never ends. Otherwise
/// it ends after visiting
/// [`count_multiplicities`](`crate::count_multiplicities`) permutations.
#[derive(Debug, Clone)]
pub struct RankPermutations {
    /// The ranks in ascending order, kept to restart the list for cycling.
    ranks: Vec<Rank>,
    /// The current permutation, or [`None`] if the multiset is empty.
    list: Option<List>,
    /// Whether to start over after visiting the last permutation.
    cycle: bool,
    state: State,
    /// The number of permutations visited in the current cycle.
    visited: u128,
}

/// Creates a lazy sequence over the distinct permutations of the multiset
/// of ranks given in ascending order.
///
/// The empty multiset has exactly one permutation, the empty sequence.
///
/// # Errors
///
/// Returns [`Error::Unsorted`] if `ranks` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// let permutations: Vec<_> = multipermute::generate(vec![1, 1, 2], false)
///     .unwrap()
///     .collect();
/// assert_eq!(permutations, [[2, 1, 1], [1, 2, 1], [1, 1, 2]]);
/// ```
pub fn generate(ranks: Vec<Rank>, cycle: bool) -> Result<RankPermutations> {
    check_sorted(&ranks)?;
    Ok(RankPermutations::new_unchecked(ranks, cycle))
}

/// Fails if some rank is smaller than the rank preceding it.
fn check_sorted(ranks: &[Rank]) -> Result<()> {
    match ranks.windows(2).position(|pair| pair[0] > pair[1]) {
        Some(ix) => Err(Error::Unsorted {
            index: ix + 1,
            previous: ranks[ix],
            rank: ranks[ix + 1],
        }),
        None => Ok(()),
    }
}

impl RankPermutations {
    /// Creates a session for ranks that are already known to be sorted.
    pub(crate) fn new_unchecked(ranks: Vec<Rank>, cycle: bool) -> Self {
        debug_assert!(check_sorted(&ranks).is_ok(), "ranks should be sorted");
        debug!(len = ranks.len(), cycle, "starting multiset permutation session");
        Self {
            list: List::new(&ranks),
            ranks,
            cycle,
            state: State::Start,
            visited: 0,
        }
    }

    /// Returns the number of elements in each permutation.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the permutations are of the empty multiset.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns whether the session starts over after the last permutation.
    pub fn is_cycling(&self) -> bool {
        self.cycle
    }

    /// Moves to the next permutation, which becomes available through
    /// [`Self::current`].
    ///
    /// Returns `false` if and only if all permutations have been visited
    /// and cycling was not requested.
    fn step(&mut self) -> bool {
        match self.state {
            State::Start => {
                self.state = State::Running;
            }
            State::Running => {
                if !self.list.as_mut().is_some_and(List::advance) {
                    if !self.cycle {
                        debug!(visited = self.visited, "visited all permutations");
                        self.state = State::Exhausted;
                        return false;
                    }
                    trace!(visited = self.visited, "starting a new cycle");
                    if let Some(list) = &mut self.list {
                        list.reset(&self.ranks);
                    }
                    self.visited = 0;
                }
            }
            State::Exhausted => return false,
        }
        self.visited += 1;
        true
    }

    /// Returns an iterator over the ranks of the current permutation.
    fn current(&self) -> impl Iterator<Item = Rank> + '_ {
        self.list.iter().flat_map(List::iter)
    }
}

impl Iterator for RankPermutations {
    type Item = Vec<Rank>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step() {
            Some(self.current().collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            State::Exhausted => (0, Some(0)),
            _ if self.cycle => (usize::MAX, None),
            _ => (0, None),
        }
    }
}

impl FusedIterator for RankPermutations {}

/// A lazy sequence over the distinct permutations of a multiset, whose
/// elements are obtained by mapping [ranks](`Rank`) through a table of
/// distinct elements.
///
/// The ranks of the multiset determine which elements are equal; the
/// elements themselves are never compared. A permutation visited by this
/// structure is an independent copy, so it can be retained after the session
/// moves on.
///
/// # Examples
///
/// Pulling the permutations one at a time:
///
/// ```
/// use multipermute::Permutations;
///
/// let permutations = Permutations::new(vec![0, 0, 1], vec!['a', 'b'], false).unwrap();
/// let words: Vec<String> = permutations.map(|p| p.into_iter().collect()).collect();
/// assert_eq!(words, ["baa", "aba", "aab"]);
/// ```
///
/// Visiting them with a closure, stopping early:
///
/// ```
/// use std::ops::ControlFlow;
/// use multipermute::Permutations;
///
/// let permutations = Permutations::new(vec![0, 1, 2, 3], vec![1, 2, 3, 4], false).unwrap();
/// let mut seen = 0;
/// permutations.visit(|p| {
///     assert_eq!(p.len(), 4);
///     seen += 1;
///     if seen == 5 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert_eq!(seen, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    ranks: RankPermutations,
    /// The distinct elements of the multiset, indexed by rank.
    elements: Vec<T>,
}

impl<T> Permutations<T> {
    /// Creates a lazy sequence over the distinct permutations of a multiset,
    /// given the ranks of its elements in ascending order and the table of
    /// distinct elements indexed by rank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsorted`] if `ranks` is not sorted in ascending
    /// order, and [`Error::RankOutOfRange`] if some rank is not a valid
    /// index into `elements`.
    pub fn new(ranks: Vec<Rank>, elements: Vec<T>, cycle: bool) -> Result<Self> {
        check_sorted(&ranks)?;
        // The ranks are sorted, so only the largest one needs to be checked.
        if let Some(&rank) = ranks.last().filter(|&&rank| rank >= elements.len()) {
            let index = ranks.len() - 1;
            return Err(Error::RankOutOfRange {
                index,
                rank,
                len: elements.len(),
            });
        }
        Ok(Self::new_unchecked(ranks, elements, cycle))
    }

    /// Creates a session for sorted ranks that are known to index into
    /// `elements`.
    pub(crate) fn new_unchecked(ranks: Vec<Rank>, elements: Vec<T>, cycle: bool) -> Self {
        Self {
            ranks: RankPermutations::new_unchecked(ranks, cycle),
            elements,
        }
    }

    /// Returns the number of elements in each permutation.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if the permutations are of the empty multiset.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Returns the distinct elements of the multiset, indexed by rank.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Places the elements of the next permutation into `result`, replacing
    /// its previous contents.
    ///
    /// Returns `false` and leaves the vector untouched if and only if all
    /// permutations have already been visited. The chief purpose of this
    /// method is to reduce heap allocations, since the storage of `result`
    /// can be reused for every permutation.
    pub fn next_into(&mut self, result: &mut Vec<T>) -> bool
    where
        T: Clone,
    {
        if !self.ranks.step() {
            return false;
        }
        result.clear();
        let elements = &self.elements;
        result.extend(self.ranks.current().map(|rank| elements[rank].clone()));
        true
    }

    /// Calls a closure on each permutation of the multiset.
    ///
    /// The process continues until the closure returns [`ControlFlow::Break`]
    /// or all permutations have been visited, whichever occurs first. If
    /// cycling was requested, only the former ends the process.
    pub fn visit<F>(mut self, mut visit: F)
    where
        F: FnMut(&[&T]) -> ControlFlow<()>,
    {
        // An auxiliary table that stores the current permutation.
        let mut permutation = Vec::with_capacity(self.len());
        let elements = &self.elements;
        while self.ranks.step() {
            permutation.clear();
            permutation.extend(self.ranks.current().map(|rank| &elements[rank]));
            if visit(&permutation).is_break() {
                return;
            }
        }
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ranks.step() {
            let elements = &self.elements;
            Some(self.ranks.current().map(|rank| elements[rank].clone()).collect())
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranks.size_hint()
    }
}

impl<T: Clone> FusedIterator for Permutations<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn small_multiset() {
        let permutations: Vec<_> = generate(vec![1, 1, 2], false).unwrap().collect();
        assert_eq!(permutations, [[2, 1, 1], [1, 2, 1], [1, 1, 2]]);
    }

    #[test]
    fn empty_multiset_has_one_permutation() {
        let mut permutations = generate(Vec::new(), false).unwrap();
        assert!(permutations.is_empty());
        assert_eq!(permutations.next(), Some(Vec::new()));
        assert_eq!(permutations.next(), None);
        assert_eq!(permutations.next(), None);
    }

    #[test]
    fn single_element() {
        let permutations: Vec<_> = generate(vec![4], false).unwrap().collect();
        assert_eq!(permutations, [[4]]);
    }

    #[test]
    fn identical_elements() {
        let permutations: Vec<_> = generate(vec![2; 6], false).unwrap().collect();
        assert_eq!(permutations, [[2; 6]]);
    }

    #[test]
    fn distinct_elements() {
        let permutations: Vec<_> = generate(vec![0, 1, 2, 3], false).unwrap().collect();
        assert_eq!(permutations.len(), 24);
        assert_eq!(permutations[0], [3, 2, 1, 0]);
        let distinct: HashSet<_> = permutations.iter().collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn two_pairs() {
        let permutations: Vec<_> = generate(vec![0, 0, 1, 1], false).unwrap().collect();
        assert_eq!(
            permutations,
            [
                [1, 1, 0, 0],
                [0, 1, 1, 0],
                [1, 0, 1, 0],
                [0, 1, 0, 1],
                [0, 0, 1, 1],
                [1, 0, 0, 1],
            ]
        );
    }

    #[test]
    fn unsorted_ranks_are_rejected() {
        assert_eq!(
            generate(vec![0, 2, 1], false).unwrap_err(),
            Error::Unsorted {
                index: 2,
                previous: 2,
                rank: 1,
            }
        );
        assert!(Permutations::new(vec![1, 0], vec!['a', 'b'], false).is_err());
    }

    #[test]
    fn ranks_out_of_range_are_rejected() {
        assert_eq!(
            Permutations::new(vec![0, 1, 3], vec!['a', 'b', 'c'], false).unwrap_err(),
            Error::RankOutOfRange {
                index: 2,
                rank: 3,
                len: 3,
            }
        );
        assert!(Permutations::<u8>::new(vec![0], Vec::new(), false).is_err());
        assert!(Permutations::<u8>::new(Vec::new(), Vec::new(), false).is_ok());
    }

    #[test]
    fn cycling_starts_over() {
        let permutations: Vec<_> = generate(vec![0, 1, 1], true).unwrap().take(9).collect();
        let first_cycle = &permutations[..3];
        assert_eq!(first_cycle, [[1, 1, 0], [0, 1, 1], [1, 0, 1]]);
        assert_eq!(&permutations[3..6], first_cycle);
        assert_eq!(&permutations[6..], first_cycle);
    }

    #[test]
    fn cycling_empty_multiset_never_ends() {
        let mut permutations = generate(Vec::new(), true).unwrap();
        for _ in 0..5 {
            assert_eq!(permutations.next(), Some(Vec::new()));
        }
    }

    #[test]
    fn cycling_single_element() {
        let permutations: Vec<_> = generate(vec![0], true).unwrap().take(3).collect();
        assert_eq!(permutations, [[0], [0], [0]]);
    }

    #[test]
    fn elements_are_mapped_through_ranks() {
        let permutations: Vec<_> = Permutations::new(vec![0, 0, 1], vec!["x", "y"], false)
            .unwrap()
            .collect();
        assert_eq!(
            permutations,
            [["y", "x", "x"], ["x", "y", "x"], ["x", "x", "y"]]
        );
    }

    #[test]
    fn next_into_reuses_buffer() {
        let mut permutations = Permutations::new(vec![0, 1], vec!['a', 'b'], false).unwrap();
        let mut permutation = Vec::new();
        assert!(permutations.next_into(&mut permutation));
        assert_eq!(permutation, ['b', 'a']);
        assert!(permutations.next_into(&mut permutation));
        assert_eq!(permutation, ['a', 'b']);
        // The buffer keeps the last permutation once the sequence ends.
        assert!(!permutations.next_into(&mut permutation));
        assert_eq!(permutation, ['a', 'b']);
    }

    #[test]
    fn visit_all_permutations() {
        let permutations = Permutations::new(vec![0, 1, 1, 2], vec!['a', 'b', 'c'], false).unwrap();
        let mut seen = HashSet::new();
        permutations.visit(|p| {
            let word: String = p.iter().copied().collect();
            assert!(seen.insert(word), "permutation visited twice");
            ControlFlow::Continue(())
        });
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn visit_stops_on_break() {
        let permutations = Permutations::new(vec![0, 1], vec![1, 2], true).unwrap();
        let mut visited = Vec::new();
        permutations.visit(|p| {
            visited.push(p.iter().map(|&&x| x).collect::<Vec<_>>());
            if visited.len() == 5 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(visited, [[2, 1], [1, 2], [2, 1], [1, 2], [2, 1]]);
    }

    #[test]
    fn exhausted_sequence_is_fused() {
        let mut permutations = generate(vec![0, 1], false).unwrap();
        assert_eq!(permutations.by_ref().count(), 2);
        assert_eq!(permutations.next(), None);
        assert_eq!(permutations.size_hint(), (0, Some(0)));
    }
}
