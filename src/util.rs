//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [BitSet] used for storing
//! the candidate values of cells.

use std::ops::{BitAnd, BitOr, Range};
use std::slice::Iter;

/// A fixed-capacity set of bit flags backed by a vector of `u64` words. Bit
/// indices run from 0 (inclusive) to the capacity provided at construction
/// (exclusive). Cells use one bit per candidate value, which makes candidate
/// removal and comparison word-level operations instead of per-value loops.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitSet {
    size: usize,
    len: usize,
    content: Vec<u64>
}

/// An enumeration of the errors that can happen when using a [BitSet].
#[derive(Debug, Eq, PartialEq)]
pub enum BitSetError {

    /// Indicates that a queried or manipulated bit index is outside the
    /// capacity of the `BitSet` in question.
    OutOfBounds
}

/// Syntactic sugar for `Result<V, BitSetError>`.
pub type BitSetResult<V> = Result<V, BitSetError>;

const WORD_BITS: usize = 64;

struct BitIterator {
    bit_index: usize,
    value: u64
}

impl BitIterator {
    fn new(value: u64) -> BitIterator {
        BitIterator {
            bit_index: 0,
            value
        }
    }

    fn progress(&mut self) {
        let diff = self.value.trailing_zeros() as usize;
        self.value >>= diff;
        self.bit_index += diff;
    }
}

impl Iterator for BitIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.value != 0 && (self.value & 1) == 0 {
            self.progress();
        }

        let result = if self.value == 0 { None } else { Some(self.bit_index) };
        self.value &= 0xfffffffffffffffe;
        result
    }
}

/// An iterator over the indices of all raised bits in a [BitSet], in
/// ascending order.
pub struct BitSetIter<'a> {
    offset: usize,
    current: BitIterator,
    content: Iter<'a, u64>
}

impl<'a> BitSetIter<'a> {
    fn new(set: &'a BitSet) -> BitSetIter<'a> {
        let mut iter = set.content.iter();
        let first_bit_iterator = if let Some(&first) = iter.next() {
            BitIterator::new(first)
        }
        else {
            BitIterator::new(0)
        };

        BitSetIter {
            offset: 0,
            current: first_bit_iterator,
            content: iter
        }
    }
}

impl<'a> Iterator for BitSetIter<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if let Some(bit_index) = self.current.next() {
                return Some(self.offset + bit_index);
            }

            if let Some(&next_content) = self.content.next() {
                self.current = BitIterator::new(next_content);
                self.offset += WORD_BITS;
            }
            else {
                return None;
            }
        }
    }
}

fn required_words(size: usize) -> usize {
    (size + WORD_BITS - 1) >> 6
}

impl BitSet {

    /// Creates a new `BitSet` with the given capacity in which every bit is
    /// cleared.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of bits held by the created set. Any index
    /// greater than or equal to this will yield a `BitSetError::OutOfBounds`
    /// if queried or manipulated.
    pub fn new(size: usize) -> BitSet {
        BitSet {
            size,
            len: 0,
            content: vec![0u64; required_words(size)]
        }
    }

    /// Creates a new `BitSet` with the given capacity in which every bit is
    /// raised. Cells start from such a set, since initially every value is
    /// still a candidate.
    ///
    /// # Arguments
    ///
    /// * `size`: The number of bits held by the created set. Any index
    /// greater than or equal to this will yield a `BitSetError::OutOfBounds`
    /// if queried or manipulated.
    pub fn filled(size: usize) -> BitSet {
        let full_words = size >> 6;
        let mut content = vec![!0u64; full_words];
        let remaining_bits = size & (WORD_BITS - 1);

        if remaining_bits > 0 {
            content.push((1u64 << remaining_bits) - 1);
        }

        BitSet {
            size,
            len: size,
            content
        }
    }

    fn compute_index(&self, index: usize) -> BitSetResult<(usize, u64)> {
        if index >= self.size {
            Err(BitSetError::OutOfBounds)
        }
        else {
            let word_index = index >> 6;
            let sub_word_index = index & (WORD_BITS - 1);
            let mask = 1u64 << sub_word_index;
            Ok((word_index, mask))
        }
    }

    /// Returns the capacity of this set, that is, the number of bits it
    /// holds. This is fixed at construction time.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Indicates whether the bit with the given index is currently raised.
    ///
    /// # Errors
    ///
    /// If `index` is greater than or equal to [BitSet::size]. In that case,
    /// `BitSetError::OutOfBounds` is returned.
    pub fn get(&self, index: usize) -> BitSetResult<bool> {
        let (word_index, mask) = self.compute_index(index)?;
        Ok(self.content[word_index] & mask > 0)
    }

    /// Returns the states of all bits whose indices lie in the given range,
    /// in ascending index order.
    ///
    /// # Errors
    ///
    /// If the end of `range` is greater than [BitSet::size]. In that case,
    /// `BitSetError::OutOfBounds` is returned.
    pub fn get_range(&self, range: Range<usize>) -> BitSetResult<Vec<bool>> {
        if range.end > self.size {
            return Err(BitSetError::OutOfBounds);
        }

        range.map(|index| self.get(index)).collect()
    }

    /// Raises or clears the bit with the given index, depending on `value`.
    ///
    /// This method returns `true` if the set changed (i.e. the bit did not
    /// have the given state before) and `false` otherwise.
    ///
    /// # Arguments
    ///
    /// * `index`: The index of the bit to manipulate. Must be less than
    /// [BitSet::size].
    /// * `value`: `true` to raise the bit and `false` to clear it.
    ///
    /// # Errors
    ///
    /// If `index` is greater than or equal to [BitSet::size]. In that case,
    /// `BitSetError::OutOfBounds` is returned.
    pub fn set(&mut self, index: usize, value: bool) -> BitSetResult<bool> {
        let (word_index, mask) = self.compute_index(index)?;
        let word = &mut self.content[word_index];
        let was_raised = *word & mask > 0;

        if value && !was_raised {
            *word |= mask;
            self.len += 1;
            Ok(true)
        }
        else if !value && was_raised {
            *word &= !mask;
            self.len -= 1;
            Ok(true)
        }
        else {
            Ok(false)
        }
    }

    /// Raises or clears all bits whose indices lie in the given range,
    /// depending on `value`.
    ///
    /// This method returns `true` if the set changed (i.e. at least one bit
    /// in the range did not have the given state before) and `false`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// If the end of `range` is greater than [BitSet::size]. In that case,
    /// `BitSetError::OutOfBounds` is returned and the set is unchanged.
    pub fn set_range(&mut self, range: Range<usize>, value: bool)
            -> BitSetResult<bool> {
        if range.end > self.size {
            return Err(BitSetError::OutOfBounds);
        }

        let mut changed = false;

        for index in range {
            changed |= self.set(index, value)?;
        }

        Ok(changed)
    }

    /// Returns an iterator over the indices of all raised bits in this set
    /// in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter::new(self)
    }

    /// Indicates whether no bit in this set is raised. If this method
    /// returns `true`, [BitSet::get] will return `false` for all indices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of raised bits in this set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// If exactly one bit in this set is raised, returns its index,
    /// otherwise `None`. Cells use this to detect that their candidates have
    /// collapsed to a forced value.
    pub fn single(&self) -> Option<usize> {
        if self.len == 1 {
            self.iter().next()
        }
        else {
            None
        }
    }

    fn count(&self) -> usize {
        self.content.iter()
            .map(|c| c.count_ones() as usize)
            .sum()
    }

    fn op(&self, other: &BitSet, op: impl Fn(u64, u64) -> u64) -> BitSet {
        let size = self.size.max(other.size);
        let words = required_words(size);
        let mut content = Vec::with_capacity(words);

        for word_index in 0..words {
            let self_u64 = self.content.get(word_index).copied().unwrap_or(0);
            let other_u64 = other.content.get(word_index).copied().unwrap_or(0);
            content.push(op(self_u64, other_u64));
        }

        let mut result = BitSet {
            size,
            len: 0,
            content
        };
        result.len = result.count();
        result
    }

    /// Computes the set union between this and the given set and stores the
    /// result in a new set which is returned. The result is sized to the
    /// larger operand; missing words of the shorter operand are read as
    /// zero.
    ///
    /// `BitSet` implements [BitOr] for references as syntactic sugar for
    /// this operation.
    pub fn union(&self, other: &BitSet) -> BitSet {
        self.op(other, u64::bitor)
    }

    /// Computes the set intersection between this and the given set and
    /// stores the result in a new set which is returned. The result is sized
    /// to the larger operand; missing words of the shorter operand are read
    /// as zero.
    ///
    /// `BitSet` implements [BitAnd] for references as syntactic sugar for
    /// this operation.
    pub fn intersect(&self, other: &BitSet) -> BitSet {
        self.op(other, u64::bitand)
    }
}

/// Creates a new [BitSet] that has the specified bits raised. First, the
/// capacity of the set must be specified. Then, after a semicolon, a
/// comma-separated list of the raised bit indices must be provided. For
/// empty sets, [BitSet::new] can be used.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_deduction::bits;
/// use sudoku_deduction::util::BitSet;
///
/// let set = bits!(9; 1, 4);
/// assert_eq!(9, set.size());
/// assert!(set.get(4).unwrap());
/// assert!(!set.get(3).unwrap());
/// ```
#[macro_export]
macro_rules! bits {
    ($size:expr; $($bit:expr),+) => {
        {
            let mut set = BitSet::new($size);
            $(set.set($bit, true).unwrap();)+
            set
        }
    };
}

impl BitOr for &BitSet {
    type Output = BitSet;

    fn bitor(self, rhs: &BitSet) -> BitSet {
        self.union(rhs)
    }
}

impl BitAnd for &BitSet {
    type Output = BitSet;

    fn bitand(self, rhs: &BitSet) -> BitSet {
        self.intersect(rhs)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_set_is_empty() {
        let set = BitSet::new(9);
        assert!(set.is_empty());
        assert!(!set.get(0).unwrap());
        assert!(!set.get(4).unwrap());
        assert!(!set.get(8).unwrap());
        assert_eq!(0, set.len());
        assert_eq!(9, set.size());
    }

    #[test]
    fn filled_set_is_full() {
        let set = BitSet::filled(9);
        assert!(!set.is_empty());
        assert!(set.get(0).unwrap());
        assert!(set.get(4).unwrap());
        assert!(set.get(8).unwrap());
        assert_eq!(9, set.len());
    }

    #[test]
    fn filled_set_with_word_aligned_size() {
        let set = BitSet::filled(64);
        assert_eq!(64, set.len());
        assert!(set.get(0).unwrap());
        assert!(set.get(63).unwrap());
    }

    #[test]
    fn bits_macro_contains_specified_elements() {
        let set = bits!(9; 2, 6, 7);
        assert_eq!(3, set.len());
        assert!(set.get(2).unwrap());
        assert!(set.get(6).unwrap());
        assert!(set.get(7).unwrap());
        assert!(!set.get(4).unwrap());
    }

    #[test]
    fn get_out_of_bounds() {
        let set = BitSet::new(9);
        assert_eq!(Err(BitSetError::OutOfBounds), set.get(9));
        assert_eq!(Err(BitSetError::OutOfBounds), set.get(100));
    }

    #[test]
    fn set_out_of_bounds() {
        let mut set = BitSet::new(5);
        assert_eq!(Err(BitSetError::OutOfBounds), set.set(5, true));
        assert_eq!(Err(BitSetError::OutOfBounds), set.set(8, false));
    }

    #[test]
    fn manipulation() {
        let mut set = BitSet::new(9);
        set.set(1, true).unwrap();
        set.set(3, true).unwrap();
        set.set(5, true).unwrap();

        assert!(!set.is_empty());
        assert!(set.get(1).unwrap());
        assert!(set.get(3).unwrap());
        assert!(set.get(5).unwrap());
        assert_eq!(3, set.len());

        set.set(3, false).unwrap();

        assert!(set.get(1).unwrap());
        assert!(!set.get(3).unwrap());
        assert!(set.get(5).unwrap());
        assert_eq!(2, set.len());
    }

    #[test]
    fn set_reports_change() {
        let mut set = BitSet::new(9);
        assert!(set.set(2, true).unwrap());
        assert!(!set.set(2, true).unwrap());
        assert!(set.set(2, false).unwrap());
        assert!(!set.set(2, false).unwrap());
        assert_eq!(0, set.len());
    }

    #[test]
    fn get_range_returns_bit_states() {
        let set = bits!(9; 1, 2, 5);
        let states = set.get_range(0..4).unwrap();
        assert_eq!(vec![false, true, true, false], states);
    }

    #[test]
    fn get_range_out_of_bounds() {
        let set = BitSet::new(9);
        assert_eq!(Err(BitSetError::OutOfBounds), set.get_range(4..10));
    }

    #[test]
    fn set_range_raises_all_bits() {
        let mut set = BitSet::new(9);
        assert!(set.set_range(2..5, true).unwrap());
        assert_eq!(3, set.len());
        assert!(!set.get(1).unwrap());
        assert!(set.get(2).unwrap());
        assert!(set.get(4).unwrap());
        assert!(!set.get(5).unwrap());
    }

    #[test]
    fn set_range_reports_change() {
        let mut set = bits!(9; 2, 3, 4);
        assert!(!set.set_range(2..5, true).unwrap());
        assert!(set.set_range(3..6, false).unwrap());
        assert_eq!(1, set.len());
    }

    #[test]
    fn set_range_out_of_bounds_leaves_set_unchanged() {
        let mut set = BitSet::new(9);
        assert_eq!(Err(BitSetError::OutOfBounds), set.set_range(7..12, true));
        assert!(set.is_empty());
    }

    #[test]
    fn iteration() {
        let mut set = BitSet::new(100);
        set.set(0, true).unwrap();
        set.set(11, true).unwrap();
        set.set(35, true).unwrap();
        set.set(63, true).unwrap();
        set.set(64, true).unwrap();
        set.set(99, true).unwrap();

        let mut iter = set.iter();

        assert_eq!(Some(0), iter.next());
        assert_eq!(Some(11), iter.next());
        assert_eq!(Some(35), iter.next());
        assert_eq!(Some(63), iter.next());
        assert_eq!(Some(64), iter.next());
        assert_eq!(Some(99), iter.next());
        assert_eq!(None, iter.next());
    }

    #[test]
    fn union_zero_extends_shorter_operand() {
        let lhs = bits!(9; 0, 4);
        let rhs = bits!(5; 1);
        let result = &lhs | &rhs;

        assert_eq!(9, result.size());
        assert_eq!(bits!(9; 0, 1, 4), result);
    }

    #[test]
    fn intersection_zero_extends_shorter_operand() {
        let lhs = bits!(9; 0, 4, 8);
        let rhs = bits!(5; 0, 3, 4);
        let result = &lhs & &rhs;

        assert_eq!(9, result.size());
        assert_eq!(bits!(9; 0, 4), result);
    }

    #[test]
    fn single_requires_exactly_one_raised_bit() {
        let mut set = BitSet::new(9);
        assert_eq!(None, set.single());

        set.set(6, true).unwrap();
        assert_eq!(Some(6), set.single());

        set.set(2, true).unwrap();
        assert_eq!(None, set.single());
    }

    #[test]
    fn differently_sized_sets_are_not_equal() {
        let lhs = bits!(9; 1, 2);
        let rhs = bits!(5; 1, 2);
        assert_ne!(lhs, rhs);
    }
}
