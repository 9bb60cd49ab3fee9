use crate::error::{Error, Result};

/// Returns the number of distinct permutations of a multiset whose distinct
/// elements occur with the given multiplicities $m_1,\dots,m_k$; that is,
/// the multinomial coefficient
/// \\[
/// \binom{n}{m_1,\dots,m_k}=\frac{n!}{m_1!\cdots m_k!},\qquad n=m_1+\cdots+m_k.
/// \\]
///
/// The order of the multiplicities does not matter, and multiplicities equal
/// to zero are ignored. The empty product convention gives a count of 1 for
/// an empty list, in agreement with the single (empty) permutation visited
/// by [`generate`].
///
/// # Errors
///
/// Returns [`Error::Overflow`] if the count does not fit in a `u128`.
///
/// # Examples
///
/// ```
/// use multipermute::count_multiplicities;
///
/// assert_eq!(count_multiplicities([2, 2]), Ok(6));
/// assert_eq!(count_multiplicities([1, 1, 1, 1]), Ok(24));
/// assert_eq!(count_multiplicities([3, 0]), Ok(1));
/// ```
///
/// [`generate`]: `crate::generate`
pub fn count_multiplicities<I>(multiplicities: I) -> Result<u128>
where
    I: IntoIterator<Item = usize>,
{
    // The count is the product of the binomial coefficients
    // $\binom{m_1+\cdots+m_j}{m_j}$ for $1\le j\le k$. Each coefficient is
    // built one factor $x/i$ at a time, which keeps every intermediate
    // result integral and never larger than the final count.
    let mut x: u128 = 1;
    let mut result: u128 = 1;
    for m in multiplicities {
        for i in 1..=m as u128 {
            // `result * x` is divisible by `i`; cancel the common factor of
            // `x` and `i` first, so the only remaining division is exact.
            let g = gcd(x, i);
            result = (result / (i / g))
                .checked_mul(x / g)
                .ok_or(Error::Overflow)?;
            x += 1;
        }
    }
    Ok(result)
}

/// Returns the greatest common divisor of two positive integers.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_product() {
        assert_eq!(count_multiplicities([]), Ok(1));
    }

    #[test]
    fn single_distinct_element() {
        assert_eq!(count_multiplicities([3]), Ok(1));
        assert_eq!(count_multiplicities([1]), Ok(1));
    }

    #[test]
    fn distinct_elements_give_factorial() {
        assert_eq!(count_multiplicities([1, 1, 1, 1]), Ok(24));
        assert_eq!(count_multiplicities(vec![1; 10]), Ok(3_628_800));
    }

    #[test]
    fn repeated_elements() {
        assert_eq!(count_multiplicities([2, 1]), Ok(3));
        assert_eq!(count_multiplicities([2, 2]), Ok(6));
        assert_eq!(count_multiplicities([2, 3, 5]), Ok(2520));
    }

    #[test]
    fn zero_multiplicities_are_skipped() {
        assert_eq!(count_multiplicities([0]), Ok(1));
        assert_eq!(count_multiplicities([0, 2, 0, 2, 0]), Ok(6));
        assert_eq!(count_multiplicities([0, 0, 1, 1, 1, 1]), Ok(24));
    }

    #[test]
    fn order_of_multiplicities_does_not_matter() {
        let expected = count_multiplicities([1, 2, 3, 4]);
        assert_eq!(expected, Ok(12_600));
        assert_eq!(count_multiplicities([4, 3, 2, 1]), expected);
        assert_eq!(count_multiplicities([2, 4, 1, 3]), expected);
        assert_eq!(count_multiplicities([3, 0, 1, 4, 2]), expected);
    }

    #[test]
    fn largest_representable_factorial() {
        assert_eq!(
            count_multiplicities(vec![1; 34]),
            Ok(295_232_799_039_604_140_847_618_609_643_520_000_000)
        );
        assert_eq!(count_multiplicities(vec![1; 35]), Err(Error::Overflow));
    }

    #[test]
    fn no_spurious_overflow() {
        // $\binom{130}{65}$ fits in a `u128`, even though $130!/65!$ does not.
        assert_eq!(
            count_multiplicities([65, 65]),
            Ok(95_067_625_827_960_698_145_584_333_020_095_113_100)
        );
        assert_eq!(count_multiplicities([70, 70]), Err(Error::Overflow));
        assert_eq!(count_multiplicities([1_000_000]), Ok(1));
    }
}
