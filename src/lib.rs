//! A growable contiguous collection with a managed capacity policy, [`Sequence`].
//!
//! # Purpose
//! [`Sequence`] is an owned, resizable array with value semantics: cloning it produces an
//! independent deep copy, moving it transfers its buffer. It differs from [`Vec`] in how it treats
//! capacity. Growth is fast while the buffer is small and slower once it passes a memory
//! threshold, removals hand memory back as soon as less than a quarter of the buffer is in use, and
//! every explicit capacity request is honored exactly. All of this is configurable through
//! [`GrowthPolicy`].
//!
//! Alongside the usual array operations, it offers a small set of convenience algorithms:
//! searching by value or predicate, `map` / `filter` / `reduce`, copying and in-place sorting and
//! shuffling, and removal of contiguous runs of elements.
//!
//! # Error Handling
//! Operations which can fail because of their arguments or the state of the Sequence return a
//! [`Result`] with a strongly typed error from [`error`], leaving the Sequence untouched on
//! failure. Operator-style methods that can't return a [`Result`], like indexing with `[]`, panic
//! with the same error message instead.
//!
//! Growth only fails if the buffer would exceed [`isize::MAX`] bytes. Methods that grow panic in
//! that case (imagine having to handle the possibility of a capacity overflow every time you push),
//! while the `try_` variants report it as [`CapacityOverflow`](error::CapacityOverflow) instead:
//! [`try_reserve`](collections::contiguous::Sequence::try_reserve),
//! [`try_resize`](collections::contiguous::Sequence::try_resize) and
//! [`try_push`](collections::contiguous::Sequence::try_push). An allocator failure aborts via
//! [`handle_alloc_error`](std::alloc::handle_alloc_error).
//!
//! # Dependencies
//! The buffer is written directly against [`std::alloc`], [`Vec`] is only used for conversions.
//!
//! - `derive_more` removes some very repetitive programming for the error types.
//! - `log` records reallocations at `trace` level and shrinking at `debug` level.
//! - `rand` provides the random source for
//!   [`shuffle`](collections::contiguous::Sequence::shuffle).
//!
//! # Concurrency
//! A Sequence doesn't synchronize anything internally. It is [`Send`] and [`Sync`] when `T` is,
//! and the borrow checker prevents mutation while references into it are alive.
//!
//! [`Sequence`]: collections::contiguous::Sequence
//! [`GrowthPolicy`]: collections::contiguous::GrowthPolicy

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;

pub use util::error;
