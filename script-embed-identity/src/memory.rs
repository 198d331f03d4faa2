//! In-memory counter backing one rendering context

use crate::traits::{next_integer_from_state, IdentitySupply, IntegerState};

/// Monotonic counter. One instance per rendering context; `&mut` access
/// keeps it single-writer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    next: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// The value the next call to `next_integer` will return
    pub fn current(&self) -> u64 {
        self.next
    }
}

impl IntegerState for Counter {
    fn get_integer(&self) -> u64 {
        self.next
    }

    fn put_integer(&mut self, value: u64) {
        self.next = value;
    }
}

impl IdentitySupply for Counter {
    fn next_integer(&mut self) -> u64 {
        next_integer_from_state(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(9_999)]
    fn test_consecutive_values_differ_by_one(#[case] start: u64) {
        let mut counter = Counter::starting_at(start);

        let first = counter.next_integer();
        let second = counter.next_integer();

        assert_eq!(first, start);
        assert_eq!(second, first + 1);
        assert_eq!(counter.current(), start + 2);
    }

    #[test]
    fn test_values_are_distinct() {
        let mut counter = Counter::new();
        let seen: HashSet<u64> = (0..100).map(|_| counter.next_integer()).collect();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_separate_counters_are_independent() {
        let mut a = Counter::new();
        let mut b = Counter::new();

        a.next_integer();
        a.next_integer();

        assert_eq!(b.next_integer(), 0);
        assert_eq!(a.current(), 2);
    }
}
