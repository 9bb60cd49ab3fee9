use thiserror::Error;

/// An error that prevents a generation session from starting, or a count
/// from being returned.
///
/// Every variant is detected before the first permutation is visited (or
/// before a count is reported), so a caller never observes partial output
/// built from invalid input.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The rank at position `index` is smaller than the rank preceding it.
    /// Generation requires the ranks in ascending order, because the initial
    /// list is obtained by prepending them one at a time.
    #[error("rank sequence is not sorted: rank {rank} at index {index} follows rank {previous}")]
    Unsorted {
        index: usize,
        previous: usize,
        rank: usize,
    },

    /// The rank at position `index` does not refer to any of the `len`
    /// entries of the rank-to-element table.
    #[error("rank {rank} at index {index} is out of bounds for {len} distinct elements")]
    RankOutOfRange { index: usize, rank: usize, len: usize },

    /// The number of distinct permutations cannot be represented exactly
    /// as a `u128`.
    #[error("the number of distinct permutations exceeds {}", u128::MAX)]
    Overflow,
}

pub type Result<T> = std::result::Result<T, Error>;
