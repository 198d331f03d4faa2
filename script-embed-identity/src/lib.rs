//! Identifier supply for embedded script blocks
//!
//! Each embedded block consumes one integer from the supply of its
//! rendering context. The integer labels the block's hygienic names so
//! two blocks on the same page never collide.

pub mod memory;
pub mod traits;

pub use memory::Counter;
pub use traits::{next_integer_from_state, IdentitySupply, IntegerState};
