//! Key hashing: the `KeyHasher` capability and the two stock functions.
//!
//! Both stock hashers operate on Unicode scalar values (`char as u64`) and
//! use wrapping arithmetic so arbitrarily long keys never overflow.

/// Maps a string key to a non-negative integer. The table reduces the
/// result modulo its capacity to pick a bucket.
///
/// Implemented for any `Fn(&str) -> u64`, so closures and plain function
/// pointers can be passed straight to `HashTable::new`.
pub trait KeyHasher {
    fn hash(&self, key: &str) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> u64,
{
    #[inline]
    fn hash(&self, key: &str) -> u64 {
        self(key)
    }
}

/// Sum of the key's code points.
///
/// Any permutation of the same characters collides: "cat" and "tac" both
/// hash to 312.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SumHash;

impl KeyHasher for SumHash {
    fn hash(&self, key: &str) -> u64 {
        key.chars().fold(0u64, |acc, c| acc.wrapping_add(c as u64))
    }
}

/// Sum of each code point multiplied by its 1-based position.
///
/// Distinguishes anagrams ("cat" = 641, "tac" = 607) but still clusters
/// similar strings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedHash;

impl KeyHasher for WeightedHash {
    fn hash(&self, key: &str) -> u64 {
        key.chars().zip(1u64..).fold(0u64, |acc, (c, pos)| {
            acc.wrapping_add((c as u64).wrapping_mul(pos))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_hash_collides_on_anagrams() {
        assert_eq!(SumHash.hash("cat"), 312);
        assert_eq!(SumHash.hash("tac"), 312);
        assert_eq!(SumHash.hash("act"), SumHash.hash("cat"));
    }

    #[test]
    fn weighted_hash_distinguishes_anagrams() {
        assert_eq!(WeightedHash.hash("cat"), 641);
        assert_eq!(WeightedHash.hash("tac"), 607);
        assert_ne!(WeightedHash.hash("cat"), WeightedHash.hash("tac"));
    }

    #[test]
    fn empty_key_hashes_to_zero() {
        assert_eq!(SumHash.hash(""), 0);
        assert_eq!(WeightedHash.hash(""), 0);
    }

    /// Code points, not bytes: a two-byte character contributes once.
    #[test]
    fn hashes_use_code_points() {
        assert_eq!(SumHash.hash("é"), 'é' as u64);
        assert_eq!(WeightedHash.hash("aé"), 'a' as u64 + 2 * ('é' as u64));
    }

    #[test]
    fn closures_and_fn_pointers_are_hashers() {
        let constant = |_: &str| 0u64;
        assert_eq!(constant.hash("anything"), 0);

        fn length(key: &str) -> u64 {
            key.len() as u64
        }
        let f: fn(&str) -> u64 = length;
        assert_eq!(f.hash("four"), 4);
    }
}
