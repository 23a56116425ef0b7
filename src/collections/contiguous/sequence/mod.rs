//! A module containing [`Sequence`] and associated types.
//!
//! Currently, the only other included type is [`IntoIter`] for owned iteration over a Sequence.
//! [`IterMut`](std::slice::IterMut) and [`Iter`](std::slice::Iter) from [`std::slice`] are used for
//! borrowed iteration.
//!
//! [`Sequence`] is also re-exported under the parent module.

mod iter;
mod query;
mod sequence;
mod tests;

pub use iter::*;
pub use sequence::*;
