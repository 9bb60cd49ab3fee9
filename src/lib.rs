//! This crate visits every distinct permutation of a multiset, using a
//! loopless algorithm due to A. Williams.
//!
//! A _multiset_ is a collection whose elements may repeat; two arrangements
//! of a multiset are the same permutation if they agree position by
//! position, regardless of which copy of a repeated element occupies each
//! slot. If the distinct elements of a multiset occur $m_1,\dots,m_k$ times
//! and $n=m_1+\cdots+m_k$, there are
//! \\[
//! \binom{n}{m_1,\dots,m_k}=\frac{n!}{m_1!\cdots m_k!}
//! \\]
//! distinct permutations, which can be far fewer than the $n!$ arrangements
//! visited by a generator for ordinary permutations. Generating all of the
//! latter and then discarding duplicates is therefore hopeless except for
//! the smallest inputs.
//!
//! In the paper "Loopless generation of multiset permutations using a constant
//! number of variables by prefix shifts", _SODA_ (2009), 987–996, Williams
//! observed that the distinct permutations of any multiset can be listed so
//! that each one is obtained from its predecessor by moving a single element
//! to the front. His _Algorithm 1_ keeps the current permutation in a singly
//! linked list, together with three pointers into it, and performs each such
//! prefix shift with a constant number of pointer updates. The algorithm is
//! loopless: apart from copying a permutation out, it does $O(1)$ work per
//! permutation. It starts with the elements in non-increasing order.
//!
//! This crate stores the linked list in a flat arena and identifies the
//! distinct elements by small integers called [ranks](`Rank`), so the list
//! never compares nor moves the elements themselves. The most important
//! pieces are:
//! - [`generate`] visits the permutations of a multiset of ranks given in
//!   ascending order. [`Permutations::new`] does the same, but maps every
//!   rank through a table of distinct elements.
//! - [`Multiset`] turns a sequence of elements, a list of multiplicities or
//!   a list of `(element, multiplicity)` pairs into ranks and a table of
//!   distinct elements. The free functions [`multipermute`], [`multipermute_by`],
//!   [`from_multiplicities`] and [`from_entries`] are shorthands for it.
//! - [`count_multiplicities`] computes the number of distinct permutations
//!   exactly, without visiting them.
//!
//! Every generation function accepts a `cycle` flag. If it is `true`, the
//! sequence starts over with the first permutation after the last one, and
//! never ends; the list is rewritten in place rather than rebuilt.
//!
//! # Examples
//!
//! ```
//! let permutations: Vec<String> = multipermute::multipermute("aabc".chars(), false)
//!     .map(|p| p.into_iter().collect())
//!     .collect();
//! assert_eq!(permutations.len(), 12);
//! assert_eq!(permutations[0], "cbaa");
//! assert_eq!(multipermute::count_multiset("aabc".chars()), Ok(12));
//! ```

mod count;
mod error;
mod gen;
mod indices;
mod list;
mod multiset;

pub use count::count_multiplicities;
pub use error::{Error, Result};
pub use gen::{generate, Permutations, RankPermutations};
pub use list::Rank;
pub use multiset::Multiset;
use std::hash::Hash;

/// Returns a lazy sequence over the distinct permutations of the multiset
/// formed by `items`. Two items are the same element if they compare equal.
///
/// The first permutation lists the items in non-increasing order of
/// [rank](`Rank`), which is the reverse of their order of first occurrence.
/// See [`Multiset`] and [`Permutations`] for details.
///
/// # Examples
///
/// ```
/// let permutations: Vec<_> = multipermute::multipermute([1, 1, 2], false).collect();
/// assert_eq!(permutations, [[2, 1, 1], [1, 2, 1], [1, 1, 2]]);
/// ```
pub fn multipermute<T, I>(items: I, cycle: bool) -> Permutations<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect::<Multiset<T>>().permutations(cycle)
}

/// Returns a lazy sequence over the distinct permutations of the multiset
/// formed by `items`, where `eq` decides whether two items are the same
/// element.
///
/// See [`Multiset::from_iter_by`] for the requirements on `eq`.
pub fn multipermute_by<T, I, F>(items: I, eq: F, cycle: bool) -> Permutations<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    Multiset::from_iter_by(items, eq).permutations(cycle)
}

/// Returns a lazy sequence over the distinct permutations of the multiset in
/// which [rank](`Rank`) $r$ occurs `multiplicities[r]` times.
///
/// # Examples
///
/// ```
/// let permutations: Vec<_> = multipermute::from_multiplicities([1, 2], false).collect();
/// assert_eq!(permutations, [[1, 1, 0], [0, 1, 1], [1, 0, 1]]);
/// ```
pub fn from_multiplicities<I>(multiplicities: I, cycle: bool) -> Permutations<Rank>
where
    I: IntoIterator<Item = usize>,
{
    Multiset::from_multiplicities(multiplicities).permutations(cycle)
}

/// Returns a lazy sequence over the distinct permutations of the multiset
/// given by `(element, multiplicity)` pairs.
///
/// See [`Multiset::from_entries`] for details.
pub fn from_entries<T, I>(entries: I, cycle: bool) -> Permutations<T>
where
    I: IntoIterator<Item = (T, usize)>,
{
    Multiset::from_entries(entries).permutations(cycle)
}

/// Returns the number of distinct permutations of the multiset formed by
/// `items`, where two items are the same element if they compare equal.
///
/// # Errors
///
/// Returns [`Error::Overflow`] if the count does not fit in a `u128`.
pub fn count_multiset<T, I>(items: I) -> Result<u128>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    items.into_iter().collect::<Multiset<T>>().count()
}

/// Returns the number of distinct permutations of the multiset formed by
/// `items`, where `eq` decides whether two items are the same element.
///
/// # Errors
///
/// Returns [`Error::Overflow`] if the count does not fit in a `u128`.
pub fn count_multiset_by<T, I, F>(items: I, eq: F) -> Result<u128>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    Multiset::from_iter_by(items, eq).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn permutations_of_a_word() {
        let permutations: HashSet<String> = multipermute("mississippi".chars(), false)
            .map(|p| p.into_iter().collect())
            .collect();
        assert_eq!(permutations.len(), 34_650);
        assert_eq!(count_multiset("mississippi".chars()), Ok(34_650));
        assert!(permutations.contains("mississippi"));
    }

    #[test]
    fn first_permutation_reverses_first_occurrences() {
        let mut permutations = multipermute(["x", "y", "x", "z"], false);
        assert_eq!(permutations.next(), Some(vec!["z", "y", "x", "x"]));
    }

    #[test]
    fn custom_equivalence() {
        let permutations: Vec<Vec<&str>> =
            multipermute_by(["a", "A", "b"], |x, y| x.eq_ignore_ascii_case(y), false).collect();
        assert_eq!(
            permutations,
            [["b", "a", "a"], ["a", "b", "a"], ["a", "a", "b"]]
        );
        assert_eq!(
            count_multiset_by(["a", "A", "b"], |x, y| x.eq_ignore_ascii_case(y)),
            Ok(3)
        );
    }

    #[test]
    fn single_distinct_multiplicity() {
        assert_eq!(count_multiplicities([3]), Ok(1));
        let permutations: Vec<_> = from_multiplicities([3], false).collect();
        assert_eq!(permutations, [[0, 0, 0]]);
    }

    #[test]
    fn four_distinct_elements() {
        assert_eq!(count_multiplicities([1, 1, 1, 1]), Ok(24));
        let permutations: HashSet<_> = from_multiplicities([1, 1, 1, 1], false).collect();
        assert_eq!(permutations.len(), 24);
    }

    #[test]
    fn entries_of_two_pairs() {
        assert_eq!(count_multiplicities([2, 2]), Ok(6));
        let permutations: HashSet<_> = from_entries([('a', 2), ('b', 2)], false).collect();
        assert_eq!(permutations.len(), 6);
    }

    #[test]
    fn empty_multiset() {
        assert_eq!(count_multiplicities([]), Ok(1));
        let permutations: Vec<Vec<u8>> = multipermute([], false).collect();
        assert_eq!(permutations, [Vec::<u8>::new()]);
    }

    #[test]
    fn cycling_reproduces_the_first_permutation() {
        let count = count_multiset("abbc".chars()).unwrap() as usize;
        let permutations: Vec<_> = multipermute("abbc".chars(), true)
            .take(3 * count + 1)
            .collect();
        for k in 1..=3 {
            assert_eq!(permutations[k * count], permutations[0]);
            assert_eq!(
                permutations[(k - 1) * count..k * count],
                permutations[..count]
            );
        }
    }
}
