//! Traits defining the identifier supply interface

/// Source of fresh integers for labelling embedded script blocks.
///
/// Every value returned is distinct from every value previously returned
/// by the same supply. Calls never fail.
pub trait IdentitySupply {
    /// Hand out the next identifier, advancing the supply
    fn next_integer(&mut self) -> u64;
}

/// Generic read/replace access to an integer cell
pub trait IntegerState {
    fn get_integer(&self) -> u64;

    fn put_integer(&mut self, value: u64);
}

/// Default [`IdentitySupply::next_integer`] for any [`IntegerState`]:
/// read the current value, store its successor, return what was read.
///
/// A state already at `u64::MAX` has no successor; it is left in place
/// and `u64::MAX` is returned again. Configured counters start far enough
/// below the top that this is never reached.
pub fn next_integer_from_state<S>(state: &mut S) -> u64
where
    S: IntegerState + ?Sized,
{
    let current = state.get_integer();
    if let Some(next) = current.checked_add(1) {
        state.put_integer(next);
    }
    current
}

impl<T> IdentitySupply for &mut T
where
    T: IdentitySupply + ?Sized,
{
    fn next_integer(&mut self) -> u64 {
        (**self).next_integer()
    }
}

impl IdentitySupply for Box<dyn IdentitySupply + '_> {
    fn next_integer(&mut self) -> u64 {
        (**self).next_integer()
    }
}
