//! Provides `KeyCounter`, which owns the frequency map and runs the
//! insertion and removal passes over it.
use anyhow::{bail, Result};
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use std::io::Read;

use crate::io::Operand;
use crate::trace::Trace;

/// The number of lines seen for a key. Never zero for a key in the map.
pub type Count = u64;

/// Keys are owned byte strings; a key need not be valid UTF-8. We never rely
/// on the `IndexMap`'s ordering, which lets us use the `O(1)` `swap_remove`.
type FrequencyMap = IndexMap<Vec<u8>, Count, FxBuildHasher>;

/// A `KeyCounter` maps each distinct key to the number of times it has been
/// inserted. Keys are removed outright, never decremented. Every insertion is
/// reported to the counter's `Trace`.
pub struct KeyCounter<T: Trace> {
    map: FrequencyMap,
    trace: T,
}

impl<T: Trace> KeyCounter<T> {
    /// An empty counter reporting to `trace`
    #[must_use]
    pub fn new(trace: T) -> Self {
        KeyCounter { map: FrequencyMap::default(), trace }
    }

    /// Insert `key` with a count of 1 if it's absent, otherwise add 1 to its
    /// count. Returns the new count.
    pub fn insert(&mut self, key: &[u8]) -> Result<Count> {
        // Look up by slice first, so we only allocate for keys we haven't seen.
        if let Some(count) = self.map.get_mut(key) {
            self.trace.found(key, *count);
            match count.checked_add(1) {
                Some(n) => *count = n,
                None => bail!("Can't count more than {} occurrences of a line", Count::MAX),
            }
            return Ok(*count);
        }
        self.trace.inserted(key);
        self.map.insert(key.to_vec(), 1);
        Ok(1)
    }

    /// Delete `key`, returning its count, or `None` if it wasn't present.
    pub fn remove(&mut self, key: &[u8]) -> Option<Count> {
        self.map.swap_remove(key)
    }

    /// The count for `key`, if present
    #[must_use]
    pub fn count(&self, key: &[u8]) -> Option<Count> {
        self.map.get(key).copied()
    }

    /// The number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Are there no keys at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Insert the key of every line of `operand`. Returns the number of lines
    /// read.
    pub fn insertion_pass<R: Read>(&mut self, operand: Operand<R>) -> Result<usize> {
        operand.for_each_key(|key| {
            self.insert(key)?;
            Ok(())
        })
    }

    /// Remove the key of every line of `operand` from the map. A key seen
    /// again after its removal is ignored. Returns the number of lines read.
    pub fn removal_pass<R: Read>(&mut self, operand: Operand<R>) -> Result<usize> {
        operand.for_each_key(|key| {
            if let Some(count) = self.remove(key) {
                self.trace.removed(key, count);
            }
            Ok(())
        })
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::trace::Recorder;

    fn operand(contents: &[u8]) -> Operand<&[u8]> {
        Operand::from_reader("test", contents)
    }

    /// Returns the size after the insertion pass and after the removal pass
    fn both_passes(contents: &[u8]) -> (usize, usize) {
        let mut counter = KeyCounter::new(());
        counter.insertion_pass(operand(contents)).unwrap();
        let inserted = counter.len();
        counter.removal_pass(operand(contents)).unwrap();
        (inserted, counter.len())
    }

    #[test]
    fn empty_input_leaves_the_map_empty() {
        assert_eq!(both_passes(b""), (0, 0));
    }

    #[test]
    fn repeated_lines_are_counted_once_and_removed_once() {
        assert_eq!(both_passes(b"a\nb\na\nc\n"), (3, 0));
        assert_eq!(both_passes(b"x\nx\nx\n"), (1, 0));
    }

    #[test]
    fn the_removal_pass_always_empties_the_map() {
        let inputs: &[&[u8]] = &[
            b"one",
            b"\n\n\n",
            b"a\r\na\nA\n a\n",
            b"xyz\nabc\nxy\nxz\nx\nxyz\nabc\n",
            b"\xff\n\xc3\n\xff\n",
        ];
        for input in inputs {
            assert_eq!(both_passes(input).1, 0, "for {:?}", input);
        }
    }

    #[test]
    fn size_after_insertion_is_the_number_of_distinct_lines() {
        assert_eq!(both_passes(b"a\nb\nc\nd").0, 4);
        assert_eq!(both_passes(b"a\n\nb\n\n").0, 3);
        assert_eq!(both_passes(b"a\r\na\n").0, 2);
    }

    #[test]
    fn insertion_pass_counts_every_occurrence() {
        let mut counter = KeyCounter::new(());
        let lines = counter.insertion_pass(operand(b"a\nb\na\nc\na")).unwrap();
        assert_eq!(lines, 5);
        assert_eq!(counter.count(b"a"), Some(3));
        assert_eq!(counter.count(b"b"), Some(1));
        assert_eq!(counter.count(b"c"), Some(1));
        assert_eq!(counter.count(b"d"), None);
    }

    #[test]
    fn a_second_removal_pass_is_a_no_op() {
        let contents = b"a\nb\na\nc\n";
        let mut counter = KeyCounter::new(());
        counter.insertion_pass(operand(contents)).unwrap();
        counter.removal_pass(operand(contents)).unwrap();
        assert!(counter.is_empty());
        counter.removal_pass(operand(contents)).unwrap();
        assert!(counter.is_empty());
    }

    #[test]
    fn removal_deletes_rather_than_decrements() {
        let mut counter = KeyCounter::new(());
        for _ in 0..3 {
            counter.insert(b"k").unwrap();
        }
        assert_eq!(counter.remove(b"k"), Some(3));
        assert_eq!(counter.remove(b"k"), None);
        assert_eq!(counter.count(b"k"), None);
    }

    #[test]
    fn removal_pass_only_touches_keys_it_reads() {
        let mut counter = KeyCounter::new(());
        counter.insertion_pass(operand(b"a\nb\nc\n")).unwrap();
        counter.removal_pass(operand(b"b\nz\n")).unwrap();
        assert_eq!(counter.len(), 2);
        assert_eq!(counter.count(b"b"), None);
    }

    #[test]
    fn insert_fails_rather_than_wrapping() {
        let mut counter = KeyCounter::new(());
        counter.insert(b"k").unwrap();
        *counter.map.get_mut(&b"k"[..]).unwrap() = Count::MAX - 1;
        assert_eq!(counter.insert(b"k").unwrap(), Count::MAX);
        assert!(counter.insert(b"k").is_err());
        assert_eq!(counter.count(b"k"), Some(Count::MAX));
    }

    #[test]
    fn trace_sees_each_insertion_with_the_count_before_incrementing() {
        let mut recorder = Recorder::default();
        let mut counter = KeyCounter::new(&mut recorder);
        counter.insertion_pass(operand(b"a\nb\na\na\n")).unwrap();
        counter.removal_pass(operand(b"a\nb\na\na\n")).unwrap();
        drop(counter);
        let expected = vec![
            (b"a".to_vec(), None),
            (b"b".to_vec(), None),
            (b"a".to_vec(), Some(1)),
            (b"a".to_vec(), Some(2)),
        ];
        assert_eq!(recorder.events, expected);
    }

    #[test]
    fn counts_go_past_u32_max() {
        let mut counter = KeyCounter::new(());
        counter.insert(b"k").unwrap();
        *counter.map.get_mut(&b"k"[..]).unwrap() = Count::from(u32::MAX);
        assert_eq!(counter.insert(b"k").unwrap(), Count::from(u32::MAX) + 1);
        assert_eq!(counter.remove(b"k"), Some(Count::from(u32::MAX) + 1));
        assert!(counter.is_empty());
    }
}
