// src/grouper.rs

//! Collect a sequence into fixed-size, non-overlapping blocks.
//!
//! ```text
//! Fill('x'):  grouper("ABCDEFG", 3, Incomplete::Fill('x'))  --> ABC DEF Gxx
//! Strict:     grouper("ABCDEFG", 3, Incomplete::Strict)     --> ABC DEF error
//! Ignore:     grouper("ABCDEFG", 3, Incomplete::Ignore)     --> ABC DEF
//! Remainder:  grouper("ABCDEFG", 3, Incomplete::Remainder)  --> ABC DEF G
//! ```

use std::mem;

use crate::errors::GrouperError;

/// What to do with a last block that has fewer than `n` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incomplete<T> {
    /// Pad the last block with clones of the given value.
    Fill(T),
    /// Fail with [`GrouperError::Incomplete`].
    Strict,
    /// Drop the partial block.
    Ignore,
    /// Keep the partial block as is.
    Remainder,
}

pub fn grouper<I>(
    items: I,
    n: usize,
    incomplete: Incomplete<I::Item>,
) -> Result<Vec<Vec<I::Item>>, GrouperError>
where
    I: IntoIterator,
    I::Item: Clone,
{
    if n == 0 {
        return Err(GrouperError::ZeroSize);
    }

    let mut blocks = Vec::new();
    // `n` may be far larger than the input; grow blocks on demand.
    let mut current = Vec::new();
    for item in items {
        current.push(item);
        if current.len() == n {
            blocks.push(mem::take(&mut current));
        }
    }

    if current.is_empty() {
        return Ok(blocks);
    }

    match incomplete {
        Incomplete::Fill(value) => {
            current.resize(n, value);
            blocks.push(current);
        }
        Incomplete::Strict => {
            return Err(GrouperError::Incomplete {
                expected: n,
                got: current.len(),
            });
        }
        Incomplete::Ignore => {}
        Incomplete::Remainder => blocks.push(current),
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blocks: Vec<Vec<char>>) -> Vec<String> {
        blocks.into_iter().map(|b| b.into_iter().collect()).collect()
    }

    #[test]
    fn fill_pads_last_block() {
        let blocks = grouper("ABCDEFG".chars(), 3, Incomplete::Fill('x')).unwrap();
        assert_eq!(render(blocks), vec!["ABC", "DEF", "Gxx"]);
    }

    #[test]
    fn strict_rejects_partial_block() {
        let err = grouper("ABCDEFG".chars(), 3, Incomplete::Strict).unwrap_err();
        assert_eq!(err, GrouperError::Incomplete { expected: 3, got: 1 });
    }

    #[test]
    fn ignore_drops_partial_block() {
        let blocks = grouper("ABCDEFG".chars(), 3, Incomplete::Ignore).unwrap();
        assert_eq!(render(blocks), vec!["ABC", "DEF"]);
    }

    #[test]
    fn remainder_keeps_partial_block() {
        let blocks = grouper("ABCDEFG".chars(), 3, Incomplete::Remainder).unwrap();
        assert_eq!(render(blocks), vec!["ABC", "DEF", "G"]);
    }

    #[test]
    fn exact_multiple_is_unaffected_by_policy() {
        for policy in [
            Incomplete::Fill(0),
            Incomplete::Strict,
            Incomplete::Ignore,
            Incomplete::Remainder,
        ] {
            let blocks = grouper(1..=6, 2, policy).unwrap();
            assert_eq!(blocks, vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
        }
    }

    #[test]
    fn zero_size_is_an_error() {
        assert_eq!(
            grouper(vec![1, 2], 0, Incomplete::Remainder),
            Err(GrouperError::ZeroSize)
        );
    }

    #[test]
    fn huge_block_size_keeps_everything_in_one_remainder() {
        assert_eq!(
            grouper(vec![1, 2, 3], usize::MAX, Incomplete::Remainder),
            Ok(vec![vec![1, 2, 3]])
        );
        assert_eq!(
            grouper(vec![1, 2, 3], usize::MAX, Incomplete::Strict),
            Err(GrouperError::Incomplete {
                expected: usize::MAX,
                got: 3
            })
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        let blocks = grouper(Vec::<u8>::new(), 4, Incomplete::Strict).unwrap();
        assert!(blocks.is_empty());
    }
}
