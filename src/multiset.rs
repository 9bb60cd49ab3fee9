use crate::count::count_multiplicities;
use crate::error::Result;
use crate::gen::Permutations;
use crate::list::Rank;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// A multiset, represented by its distinct elements and the number of times
/// each of them occurs.
///
/// The position of a distinct element in [`Self::elements`] is its
/// [rank](`Rank`). Distinct elements appear in the order of their first
/// occurrence when the multiset is collected from a sequence of elements.
///
/// # Examples
///
/// ```
/// use multipermute::Multiset;
///
/// let multiset: Multiset<char> = "banana".chars().collect();
/// assert_eq!(multiset.elements(), ['b', 'a', 'n']);
/// assert_eq!(multiset.multiplicities(), [1, 3, 2]);
/// assert_eq!(multiset.len(), 6);
/// assert_eq!(multiset.count(), Ok(60));
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Multiset<T> {
    /// The distinct elements, indexed by rank.
    elements: Vec<T>,
    /// The number of occurrences of each distinct element, indexed by rank.
    ///
    /// # Invariant
    ///
    /// `multiplicities.len() == elements.len()`.
    multiplicities: Vec<usize>,
}

impl<T> Multiset<T> {
    /// Creates a multiset from `(element, multiplicity)` pairs.
    ///
    /// Each pair introduces a new distinct element, even if it compares equal
    /// to the element of another pair. Pairs with multiplicity zero keep
    /// their rank but contribute no elements to the permutations.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, usize)>,
    {
        let (elements, multiplicities) = entries.into_iter().unzip();
        Self {
            elements,
            multiplicities,
        }
    }

    /// Collects a multiset from a sequence of elements, using `eq` to decide
    /// whether two elements are the same.
    ///
    /// The function `eq` should be an equivalence relation. It is called with
    /// a distinct element found so far and a new element; the most recently
    /// found distinct elements are tried first. This takes $O(nk)$ steps for
    /// $n$ elements of which $k$ are distinct, so prefer [`FromIterator`]
    /// when the elements implement [`Eq`] and [`Hash`].
    ///
    /// # Examples
    ///
    /// ```
    /// use multipermute::Multiset;
    ///
    /// let words = ["Ab", "ab", "c", "AB"];
    /// let multiset = Multiset::from_iter_by(words, |a, b| a.eq_ignore_ascii_case(b));
    /// assert_eq!(multiset.elements(), ["Ab", "c"]);
    /// assert_eq!(multiset.multiplicities(), [3, 1]);
    /// ```
    pub fn from_iter_by<I, F>(items: I, mut eq: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T, &T) -> bool,
    {
        let mut elements: Vec<T> = Vec::new();
        let mut multiplicities = Vec::new();
        for item in items {
            if let Some(rank) = elements.iter().rposition(|o| eq(o, &item)) {
                multiplicities[rank] += 1;
            } else {
                elements.push(item);
                multiplicities.push(1);
            }
        }
        Self {
            elements,
            multiplicities,
        }
    }

    /// Returns the distinct elements, indexed by rank.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Returns the number of occurrences of each distinct element, indexed
    /// by rank.
    pub fn multiplicities(&self) -> &[usize] {
        &self.multiplicities
    }

    /// Returns the number of elements in the multiset, counting repetitions.
    pub fn len(&self) -> usize {
        self.multiplicities.iter().sum()
    }

    /// Returns `true` if the multiset contains no elements.
    pub fn is_empty(&self) -> bool {
        self.multiplicities.iter().all(|&m| m == 0)
    }

    /// Returns the rank of every element of the multiset, in ascending order.
    pub fn ranks(&self) -> Vec<Rank> {
        let mut ranks = Vec::with_capacity(self.len());
        for (rank, &m) in self.multiplicities.iter().enumerate() {
            ranks.extend(std::iter::repeat(rank).take(m));
        }
        ranks
    }

    /// Returns the number of distinct permutations of the multiset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the count does not fit in a `u128`.
    ///
    /// [`Error::Overflow`]: `crate::Error::Overflow`
    pub fn count(&self) -> Result<u128> {
        count_multiplicities(self.multiplicities.iter().copied())
    }

    /// Consumes the multiset and returns a lazy sequence over its distinct
    /// permutations. If `cycle` is `true`, the sequence starts over after
    /// visiting the last permutation and never ends.
    pub fn permutations(self, cycle: bool) -> Permutations<T> {
        // Ranks built from the multiplicities are sorted, and every one of
        // them indexes into `self.elements`.
        Permutations::new_unchecked(self.ranks(), self.elements, cycle)
    }
}

impl Multiset<Rank> {
    /// Creates a multiset in which rank $r$ occurs `multiplicities[r]` times.
    /// Its distinct elements are the ranks themselves.
    pub fn from_multiplicities<I>(multiplicities: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let multiplicities: Vec<usize> = multiplicities.into_iter().collect();
        Self {
            elements: (0..multiplicities.len()).collect(),
            multiplicities,
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for Multiset<T> {
    /// Collects a multiset from a sequence of elements, using their native
    /// equality to decide whether two elements are the same.
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut ranks = HashMap::new();
        let mut multiplicities = Vec::new();
        for item in items {
            match ranks.entry(item) {
                Entry::Occupied(entry) => multiplicities[*entry.get()] += 1,
                Entry::Vacant(entry) => {
                    entry.insert(multiplicities.len());
                    multiplicities.push(1);
                }
            }
        }
        // Lay out the distinct elements by rank.
        let mut elements: Vec<(T, Rank)> = ranks.into_iter().collect();
        elements.sort_unstable_by_key(|&(_, rank)| rank);
        Self {
            elements: elements.into_iter().map(|(element, _)| element).collect(),
            multiplicities,
        }
    }
}
