//! Normalized views and invariant checks for snapshot tests.

mod invariants;
mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, InlineSnap, Snap, normalize};
