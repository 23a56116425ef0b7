use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};

use crate::collections::contiguous::buffer::Buffer;
use crate::collections::contiguous::policy::GrowthPolicy;
use crate::util::error::{CapacityOverflow, EmptyContainer, IndexOutOfBounds, SequenceError};
use crate::util::result::ResultExtension;

/// A growable contiguous collection, which sizes its buffer according to a [`GrowthPolicy`].
///
/// Unlike [`Vec`], the capacity of a Sequence is managed proactively: it starts at a small minimum,
/// grows by a large factor while the buffer is small, grows more slowly once the buffer passes a
/// memory threshold, and shrinks back down when a removal leaves less than a quarter of it in use.
/// The explicit capacity methods ([`reserve`](Sequence::reserve), [`resize`](Sequence::resize) and
/// [`shrink`](Sequence::shrink)) produce exactly the requested capacity.
///
/// Any method which changes the capacity invalidates pointers into the Sequence. The borrow checker
/// enforces this for references, raw pointers obtained from slices are the caller's concern.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Sequence.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` / `at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `remove_last` | `O(1)`*, `O(n)` |
/// | `insert` | `O(n-i)` |
/// | `remove_at` | `O(n-i)` |
/// | `append_elements` | `O(n+m)`**, `O(m)` |
/// | `reserve` / `resize` / `shrink` | `O(n)` |
/// | `contains` / `find` | `O(n)` |
///
/// \* Amortized. A push into a full Sequence, or a removal which drops below the shrink
/// threshold, reallocates.
///
/// \** Only if the Sequence needs to grow to fit the new items.
pub struct Sequence<T> {
    pub(crate) buf: Buffer<T>,
    pub(crate) len: usize,
    pub(crate) policy: GrowthPolicy,
}

impl<T> Sequence<T> {
    /// Creates a new, empty Sequence with the default capacity of
    /// [`MIN_CAP`](crate::collections::contiguous::policy::MIN_CAP).
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq: Sequence<u8> = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// assert_eq!(seq.cap(), 2);
    /// ```
    pub fn new() -> Sequence<T> {
        Sequence::with_policy(GrowthPolicy::DEFAULT)
    }

    /// Creates a new, empty Sequence which manages its capacity according to `policy`.
    pub fn with_policy(policy: GrowthPolicy) -> Sequence<T> {
        Sequence::with_cap_and_policy(policy.min_cap(), policy)
    }

    /// Creates a new Sequence with capacity exactly equal to the provided value, allowing values to
    /// be added without reallocation.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq: Sequence<u8> = Sequence::with_cap(5);
    /// assert_eq!(seq.cap(), 5);
    /// seq.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(seq.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> Sequence<T> {
        Sequence::with_cap_and_policy(cap, GrowthPolicy::DEFAULT)
    }

    /// Creates a new Sequence with exactly `cap` capacity and the provided `policy`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap_and_policy(cap: usize, policy: GrowthPolicy) -> Sequence<T> {
        Sequence {
            buf: Buffer::new(cap),
            len: 0,
            policy,
        }
    }

    /// Returns the number of elements in the Sequence.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.len(), 3);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Sequence contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the Sequence can hold without reallocating.
    pub const fn cap(&self) -> usize {
        self.buf.cap()
    }

    /// Returns the [`GrowthPolicy`] of the Sequence.
    pub const fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Replaces the [`GrowthPolicy`] of the Sequence. The current capacity isn't changed until the
    /// next growth or removal.
    pub fn set_policy(&mut self, policy: GrowthPolicy) {
        self.policy = policy;
    }

    /// Views the elements of the Sequence as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: len <= cap and all values < len are initialized.
        unsafe { self.buf.as_slice(self.len) }
    }

    /// Views the elements of the Sequence as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: len <= cap and all values < len are initialized.
        unsafe { self.buf.as_mut_slice(self.len) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from(['a', 'b']);
    /// assert_eq!(seq.get(1), Ok(&'b'));
    /// assert!(seq.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        let len = self.len;
        self.as_slice().get(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Probes the element at `index`, returning [`None`] rather than an error if it doesn't exist.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([10, 20]);
    /// assert_eq!(seq.at(0), Some(&10));
    /// assert_eq!(seq.at(2), None);
    /// ```
    pub fn at(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    pub fn first(&self) -> Result<&T, EmptyContainer> {
        self.as_slice().first().ok_or(EmptyContainer)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    pub fn first_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        self.as_mut_slice().first_mut().ok_or(EmptyContainer)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.last(), Ok(&3));
    /// seq.clear();
    /// assert!(seq.last().is_err());
    /// ```
    pub fn last(&self) -> Result<&T, EmptyContainer> {
        self.as_slice().last().ok_or(EmptyContainer)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    pub fn last_mut(&mut self) -> Result<&mut T, EmptyContainer> {
        self.as_mut_slice().last_mut().ok_or(EmptyContainer)
    }

    /// Push the provided value onto the end of the Sequence, growing it according to its
    /// [`GrowthPolicy`] if required.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::<u8>::new();
    /// for i in 0..=5 {
    ///     seq.push(i);
    /// }
    /// assert_eq!(seq, [0, 1, 2, 3, 4, 5]);
    /// assert_eq!(seq.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        self.try_push(value).throw()
    }

    /// Push the provided value onto the end of the Sequence, growing it if required.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the Sequence would have to grow beyond [`isize::MAX`] bytes.
    /// The Sequence is left unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), CapacityOverflow> {
        if self.len == self.cap() {
            self.buf.try_realloc(self.grown_cap()?)?;
        }

        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.buf.write(self.len, value) };
        self.len += 1;
        Ok(())
    }

    /// Inserts the provided value at the given index, shifting all following values to the right.
    /// Inserting at `len` is the same as [`push`](Sequence::push).
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index > len`, without modifying the Sequence.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([0, 1, 2]);
    /// seq.insert(1, 100).unwrap();
    /// seq.insert(1, 200).unwrap();
    /// seq.insert(5, 300).unwrap();
    /// assert_eq!(seq, [0, 200, 100, 1, 2, 300]);
    /// assert!(seq.insert(7, 400).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        if index == self.len {
            self.push(value);
            return Ok(());
        }

        if self.len == self.cap() {
            // Growing and shifting at once moves every value exactly once.
            let mut new_buf = Buffer::new(self.grown_cap().throw());
            log::trace!(
                "growing Sequence from {} to {} slots for insertion",
                self.cap(),
                new_buf.cap()
            );

            // SAFETY: Both Buffers can hold len + 1 values and all values < len are initialized.
            // Afterwards the old Buffer only holds stale copies, which are never dropped.
            unsafe {
                self.buf.move_into(0..index, &mut new_buf, 0);
                self.buf.move_into(index..self.len, &mut new_buf, index + 1);
            }
            self.buf = new_buf;
        } else {
            // SAFETY: len < cap, so the shifted range ends within the Buffer.
            unsafe { self.buf.shift(index..self.len, index + 1) };
        }

        // SAFETY: index < cap and its value has been moved out of the way.
        unsafe { self.buf.write(index, value) };
        self.len += 1;
        Ok(())
    }

    /// Appends every element produced by `elements`. The capacity is computed once for the whole
    /// batch from the iterator's size hint.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2]);
    /// seq.append_elements([3, 4, 5]);
    /// assert_eq!(seq, [1, 2, 3, 4, 5]);
    /// ```
    pub fn append_elements<I: IntoIterator<Item = T>>(&mut self, elements: I) {
        let iter = elements.into_iter();
        self.reserve_additional(iter.size_hint().0);

        for item in iter {
            self.push(item);
        }
    }

    /// Appends clones of every element in `other`.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        self.append_elements(other.iter().cloned());
    }

    /// Inserts every element produced by `elements` at `index`, keeping their order.
    ///
    /// The elements are collected before the Sequence is touched, so if `elements` panics partway
    /// through, the Sequence is left unchanged.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index > len`, without modifying the Sequence.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 5]);
    /// seq.insert_elements(1, [2, 3, 4]).unwrap();
    /// assert_eq!(seq, [1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_elements<I>(&mut self, index: usize, elements: I) -> Result<(), IndexOutOfBounds>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        let mut staged: Sequence<T> = elements.into_iter().collect();
        let added = staged.len;
        self.reserve_additional(added);

        // SAFETY: The capacity fits len + added values. The tail is moved out of the way before
        // the staged values are moved into the gap, and staged forgets them afterwards.
        unsafe {
            self.buf.shift(index..self.len, index + added);
            staged.buf.move_into(0..added, &mut self.buf, index);
        }
        staged.len = 0;
        self.len += added;
        Ok(())
    }

    /// Removes the element at the provided index, moving all following values to fill in the gap.
    /// If less than a quarter of the capacity remains in use, the Sequence shrinks to fit.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty, or [`IndexOutOfBounds`] if
    /// `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = "Hello world!".chars().collect();
    /// assert_eq!(seq.remove_at(1), Ok('e'));
    /// assert_eq!(seq.remove_at(4), Ok(' '));
    /// assert_eq!(seq, "Hlloworld!".chars().collect::<Sequence<_>>());
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, SequenceError> {
        if self.is_empty() {
            return Err(EmptyContainer.into());
        }
        self.check_index(index)?;

        if index == self.len - 1 {
            return Ok(self.remove_last()?);
        }

        // SAFETY: index < len, so the value is initialized. The slot is overwritten by the shift.
        let value = unsafe { self.buf.read(index) };
        // SAFETY: Both ranges are within len.
        unsafe { self.buf.shift(index + 1..self.len, index) };
        self.len -= 1;

        self.shrink_after_removal();
        Ok(value)
    }

    /// Removes the last element. If less than a quarter of the capacity remains in use, the
    /// Sequence shrinks to fit.
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2]);
    /// assert_eq!(seq.remove_last(), Ok(2));
    /// assert_eq!(seq.remove_last(), Ok(1));
    /// assert!(seq.remove_last().is_err());
    /// ```
    pub fn remove_last(&mut self) -> Result<T, EmptyContainer> {
        if self.len == 0 {
            return Err(EmptyContainer);
        }

        self.len -= 1;
        // SAFETY: len has just been decremented, so the slot is initialized and no longer tracked.
        let value = unsafe { self.buf.read(self.len) };

        self.shrink_after_removal();
        Ok(value)
    }

    /// Removes the first element, see [`remove_at`](Sequence::remove_at).
    ///
    /// # Errors
    /// Returns [`EmptyContainer`] if the Sequence is empty.
    pub fn remove_first(&mut self) -> Result<T, SequenceError> {
        self.remove_at(0)
    }

    /// Removes the elements from `start` up to `end`, including `end` if `inclusive` is true. An
    /// empty range does nothing.
    ///
    /// The range is dropped and the tail shifted in a single pass, and the shrink rule is applied
    /// once to the final length. This can leave a smaller capacity than removing the same elements
    /// one at a time with [`remove_at`](Sequence::remove_at), where intermediate shrinks happen at
    /// larger lengths.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the range extends beyond `len`, without modifying the
    /// Sequence.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([0, 1, 2, 3, 4, 5]);
    /// seq.remove_subrange(1, 2, true).unwrap();
    /// assert_eq!(seq, [0, 3, 4, 5]);
    /// seq.remove_subrange(1, 2, false).unwrap();
    /// assert_eq!(seq, [0, 4, 5]);
    /// ```
    pub fn remove_subrange(
        &mut self,
        start: usize,
        end: usize,
        inclusive: bool,
    ) -> Result<(), IndexOutOfBounds> {
        let len = self.len;
        let stop = if inclusive {
            end.checked_add(1).ok_or(IndexOutOfBounds { index: end, len })?
        } else {
            end
        };

        if stop <= start {
            return Ok(());
        }
        if stop > len {
            return Err(IndexOutOfBounds {
                index: stop - 1,
                len,
            });
        }

        // Forget the tail while dropping, so a panicking drop leaks rather than double drops.
        self.len = start;
        // SAFETY: start..stop is initialized and within len. The tail is moved over the dropped
        // values.
        unsafe {
            self.buf.drop_range(start..stop);
            self.buf.shift(stop..len, start);
        }
        self.len = len - (stop - start);

        self.shrink_after_removal();
        Ok(())
    }

    /// Removes all elements. If `keep_cap` is false, the capacity is also reset to the minimum of
    /// the Sequence's [`GrowthPolicy`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq: Sequence<_> = (0..100).collect();
    /// seq.remove_all(true);
    /// assert_eq!(seq.cap(), 100);
    /// seq.remove_all(false);
    /// assert_eq!(seq.cap(), 2);
    /// ```
    pub fn remove_all(&mut self, keep_cap: bool) {
        self.truncate(0);

        if !keep_cap {
            self.buf.realloc(self.policy.min_cap());
        }
    }

    /// Removes all elements, keeping the capacity for reuse.
    pub fn clear(&mut self) {
        self.remove_all(true);
    }

    /// Ensures that the Sequence can hold `new_size` elements. If `new_size` is less than `len`,
    /// the trailing elements are dropped instead, and a `new_size` of 0 releases the buffer like
    /// [`remove_all(false)`](Sequence::remove_all). Growth is exact, without any slack.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// seq.reserve(10);
    /// assert_eq!(seq.cap(), 10);
    /// seq.reserve(1);
    /// assert_eq!(seq, [1]);
    /// assert_eq!(seq.cap(), 10);
    /// ```
    pub fn reserve(&mut self, new_size: usize) {
        self.try_reserve(new_size).throw()
    }

    /// The fallible counterpart to [`reserve`](Sequence::reserve).
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout would have a size that exceeds
    /// [`isize::MAX`]. The Sequence is left unchanged.
    pub fn try_reserve(&mut self, new_size: usize) -> Result<(), CapacityOverflow> {
        if new_size == 0 && self.len > 0 {
            self.remove_all(false);
            return Ok(());
        }

        if new_size > self.cap() {
            // len <= cap < new_size, so there is nothing to truncate.
            return self.buf.try_realloc(new_size);
        }

        self.truncate(new_size);
        Ok(())
    }

    /// Reallocates the Sequence to a capacity of exactly `new_size`, dropping trailing elements
    /// if required. Unlike [`reserve`](Sequence::reserve), this always reallocates. A `new_size`
    /// of 0 on a non-empty Sequence behaves like [`remove_all(false)`](Sequence::remove_all).
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3, 4]);
    /// seq.resize(2);
    /// assert_eq!(seq, [1, 2]);
    /// assert_eq!(seq.cap(), 2);
    /// seq.resize(6);
    /// assert_eq!(seq.cap(), 6);
    /// ```
    pub fn resize(&mut self, new_size: usize) {
        self.try_resize(new_size).throw()
    }

    /// The fallible counterpart to [`resize`](Sequence::resize).
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout would have a size that exceeds
    /// [`isize::MAX`]. The Sequence is left unchanged.
    pub fn try_resize(&mut self, new_size: usize) -> Result<(), CapacityOverflow> {
        if new_size == 0 && self.len > 0 {
            self.remove_all(false);
            return Ok(());
        }

        // Truncation only happens when shrinking, which can't fail.
        self.truncate(new_size);
        self.buf.try_realloc(new_size)
    }

    /// Shrinks the capacity to match the length. Returns true if the capacity was reduced.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// seq.push(4);
    /// assert!(seq.shrink());
    /// assert_eq!(seq.cap(), 4);
    /// assert!(!seq.shrink());
    /// ```
    pub fn shrink(&mut self) -> bool {
        if self.cap() > self.len {
            self.buf.realloc(self.len);
            true
        } else {
            false
        }
    }

    /// Takes the contents of the Sequence, leaving it empty with the minimum capacity of its
    /// [`GrowthPolicy`].
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let taken = seq.take();
    /// assert!(seq.is_empty());
    /// assert_eq!(taken, [1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Sequence<T> {
        let empty = Sequence::with_policy(self.policy);
        mem::replace(self, empty)
    }

    /// Replaces the contents of self with those of `other`, leaving `other` empty. The previous
    /// contents of self are dropped.
    pub fn move_from(&mut self, other: &mut Sequence<T>) {
        *self = other.take();
    }

    /// Exchanges the elements, capacity and policy of self and `other`.
    pub fn swap_with(&mut self, other: &mut Sequence<T>) {
        mem::swap(self, other);
    }

    /// Keeps only the elements from `first` up to and including `last`, moving them to the front.
    /// The bounds are swapped if given in reverse.
    ///
    /// Shrinking follows the [`GrowthPolicy`] like any other removal: the remaining length is
    /// compared against the capacity, not against the previous length.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if either bound is `>= len`, without modifying the Sequence.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([0, 1, 2, 3, 4]);
    /// seq.assign_range(3, 1).unwrap();
    /// assert_eq!(seq, [1, 2, 3]);
    /// ```
    pub fn assign_range(&mut self, first: usize, last: usize) -> Result<(), IndexOutOfBounds> {
        let (first, last) = (cmp::min(first, last), cmp::max(first, last));
        self.check_index(last)?;

        let len = self.len;
        self.len = 0;
        // SAFETY: All ranges are within len and initialized. Only first..=last survives, and is
        // moved to the front after everything else has been dropped.
        unsafe {
            self.buf.drop_range(last + 1..len);
            self.buf.drop_range(0..first);
            self.buf.shift(first..last + 1, 0);
        }
        self.len = last - first + 1;

        self.shrink_after_removal();
        Ok(())
    }

    /// Converts the Sequence into a [`Vec`].
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }
}

impl<T> Sequence<T> {
    /// Drops all values with an index `>= new_len`. Does nothing if `new_len >= len`.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let len = self.len;
        self.len = new_len;
        // SAFETY: new_len..len is initialized and is no longer tracked by len.
        unsafe { self.buf.drop_range(new_len..len) };
    }

    /// Returns the capacity that a full Sequence should grow to, clamped so the layout stays
    /// within [`isize::MAX`] bytes.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if no more growth is possible.
    pub(crate) fn grown_cap(&self) -> Result<usize, CapacityOverflow> {
        let max_cap = isize::MAX as usize / cmp::max(size_of::<T>(), 1);
        let new_cap = cmp::min(self.policy.grown_cap::<T>(self.cap()), max_cap);

        if new_cap <= self.len {
            Err(CapacityOverflow)
        } else {
            Ok(new_cap)
        }
    }

    /// Makes room for `extra` more values in a single reallocation, growing at least as much as
    /// the policy would for a single push.
    ///
    /// # Panics
    /// Panics if the memory layout of the Sequence would have a size that exceeds [`isize::MAX`].
    pub(crate) fn reserve_additional(&mut self, extra: usize) {
        let needed = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();

        if needed > self.cap() {
            let new_cap = cmp::max(needed, self.grown_cap().unwrap_or(needed));
            self.buf.realloc(new_cap);
        }
    }

    /// Shrinks the Sequence to fit if less than `1 / shrink_divisor` of its capacity is used. An
    /// empty Sequence shrinks to the policy's minimum capacity instead.
    pub(crate) fn shrink_after_removal(&mut self) {
        if !self.policy.should_shrink(self.len, self.cap()) {
            return;
        }

        let new_cap = if self.len == 0 {
            self.policy.min_cap()
        } else {
            self.len
        };

        if new_cap < self.cap() {
            log::debug!(
                "shrinking Sequence from {} to {} slots after removal",
                self.cap(),
                new_cap
            );
            self.buf.realloc(new_cap);
        }
    }

    /// Checks that the provided index is within the bounds of self.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub(crate) fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })
        } else {
            Ok(())
        }
    }
}

impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    /// # Panics
    /// Panics if `index >= len`.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
        self.append_elements(iter);
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Sequence<T> {
    fn extend<A: IntoIterator<Item = &'a T>>(&mut self, iter: A) {
        self.append_elements(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let cap = cmp::max(iter.size_hint().0, GrowthPolicy::DEFAULT.min_cap());
        let mut seq = Sequence::with_cap(cap);

        for item in iter {
            seq.push(item);
        }

        seq
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for Sequence<T> {
    fn from(value: &[T]) -> Self {
        value.iter().cloned().collect()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_iter().collect()
    }
}

impl<T> From<Sequence<T>> for Vec<T> {
    fn from(value: Sequence<T>) -> Self {
        value.into_vec()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Sequence<T> {
    fn drop(&mut self) {
        self.truncate(0);

        // Implicitly drop self.buf, which holds only uninitialized slots now and deallocates the
        // owned memory.
    }
}

impl<T> Deref for Sequence<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for Sequence<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Sequence<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Sequence<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for Sequence<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for Sequence<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let mut seq = Sequence::with_cap_and_policy(self.cap(), self.policy);

        for value in self.iter() {
            // SAFETY: seq has the same capacity as self, which holds len values.
            unsafe { seq.buf.write(seq.len, value.clone()) };
            seq.len += 1;
        }

        seq
    }

    fn clone_from(&mut self, source: &Self) {
        self.truncate(source.len);
        if self.cap() < source.cap() {
            self.buf.realloc(source.cap());
        }
        self.policy = source.policy;

        let (existing, remaining) = source.split_at(self.len);
        self.as_mut_slice().clone_from_slice(existing);

        for value in remaining {
            // SAFETY: The capacity is at least that of source, which holds len values.
            unsafe { self.buf.write(self.len, value.clone()) };
            self.len += 1;
        }
    }
}

impl<T: PartialEq<U>, U> PartialEq<Sequence<U>> for Sequence<T> {
    fn eq(&self, other: &Sequence<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for Sequence<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for Sequence<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for Sequence<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for Sequence<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<Sequence<U>> for Vec<T> {
    fn eq(&self, other: &Sequence<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialOrd> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Sequence<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("contents", &self.as_slice())
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

/// Formats the elements as a list, quoting strings and characters.
///
/// # Examples
/// ```
/// # use evt_collections::collections::contiguous::Sequence;
/// assert_eq!(Sequence::from([1, 2, 3]).to_string(), "[1, 2, 3]");
/// assert_eq!(Sequence::from(["a", "b"]).to_string(), r#"["a", "b"]"#);
/// assert_eq!(Sequence::<char>::new().to_string(), "[]");
/// ```
impl<T: Debug> Display for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
