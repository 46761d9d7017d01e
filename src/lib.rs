//! A randomized priority queue over a Leftmost Skeleton Tree (LST),
//! following Navarro, Paredes, Poblete, and Sanders, *"Stronger
//! Quickheaps"* (IJFCS, 2011).
//!
//! See [`Lst`] for the public API: `insert`, `peek`, `pop`,
//! `extract`-by-handle, `num_elements`, and `iter`. Elements must implement
//! [`Handle`] so the queue can track each one's physical slot intrusively,
//! which is what makes handle-based extraction O(log n) expected instead of
//! a linear scan.

pub use errors::{ErrorKind, InsertError, LstError, LstResult};
pub use handle::Handle;
pub use lst::{Iter, Lst};

pub mod errors;

mod handle;
mod lst;
mod pivot_stack;

#[cfg(test)]
mod tests;
