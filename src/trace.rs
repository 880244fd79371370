//! The `Trace` trait lets the caller watch the insertion pass key by key.
//! `KeyCounter` owns its `Trace`, so there's no global switch to flip: pass
//! `LogTrace` to get per-line debug logging, or `()` to get nothing.
//! Removals are reported too, but only `LogTrace` cares, at `trace` level.
use bstr::ByteSlice;

use crate::counter::Count;

/// Observer for a `KeyCounter`'s passes.
pub trait Trace {
    /// `key` was not in the map and has been inserted with a count of 1
    fn inserted(&mut self, key: &[u8]);
    /// `key` was already in the map with count `count`, which is about to be
    /// incremented
    fn found(&mut self, key: &[u8], count: Count);
    /// `key`, with count `count`, was removed during the removal pass
    fn removed(&mut self, _key: &[u8], _count: Count) {}
}

/// The silent `Trace`.
impl Trace for () {
    fn inserted(&mut self, _key: &[u8]) {}
    fn found(&mut self, _key: &[u8], _count: Count) {}
}

/// Sends insertions to the `log` facade at `debug` level, and removals at
/// `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrace;

impl Trace for LogTrace {
    fn inserted(&mut self, key: &[u8]) {
        log::debug!("Inserting key {}: key NOT found", key.as_bstr());
    }
    fn found(&mut self, key: &[u8], count: Count) {
        log::debug!("Inserting key {}: key already FOUND, incrementing {count}", key.as_bstr());
    }
    fn removed(&mut self, key: &[u8], count: Count) {
        log::trace!("Removing key {} (count {count})", key.as_bstr());
    }
}

/// Records every event, for tests that check what the counter reported.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) events: Vec<(Vec<u8>, Option<Count>)>,
}

#[cfg(test)]
impl Trace for Recorder {
    fn inserted(&mut self, key: &[u8]) {
        self.events.push((key.to_vec(), None));
    }
    fn found(&mut self, key: &[u8], count: Count) {
        self.events.push((key.to_vec(), Some(count)));
    }
}

/// Lets a caller keep ownership of its `Trace` while lending it to a counter.
impl<T: Trace> Trace for &mut T {
    fn inserted(&mut self, key: &[u8]) {
        (**self).inserted(key);
    }
    fn found(&mut self, key: &[u8], count: Count) {
        (**self).found(key, count);
    }
    fn removed(&mut self, key: &[u8], count: Count) {
        (**self).removed(key, count);
    }
}
