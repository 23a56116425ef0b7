//! Contiguous collection types. Namely [`Sequence`], a growable collection which manages its own
//! capacity according to a [`GrowthPolicy`].
#![warn(missing_docs)]

pub(crate) mod buffer;
pub mod policy;
pub mod sequence;

#[doc(inline)]
pub use policy::GrowthPolicy;
#[doc(inline)]
pub use sequence::Sequence;
