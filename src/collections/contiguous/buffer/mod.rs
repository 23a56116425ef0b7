//! A module containing [`Buffer`], the raw storage behind
//! [`Sequence`](super::sequence::Sequence).
//!
//! Buffer only manages an allocation. It doesn't know which of its slots are initialized, so it
//! isn't exported outside of the crate.

mod buffer;

pub(crate) use buffer::*;
