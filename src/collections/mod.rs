//! General-purpose collection types.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! gives read access to the algorithms of slices without repeating them. Where a collection has
//! its own version of a slice method (such as [`first`](contiguous::Sequence::first)), the
//! collection's version takes precedence.

pub mod contiguous;
