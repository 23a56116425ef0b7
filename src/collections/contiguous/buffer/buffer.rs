use std::alloc::{self, Layout};
use std::any;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ops::Range;
use std::ptr::{self, NonNull};
use std::slice;

use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// An exclusively owned heap allocation of exactly `cap` slots of `T`, none of which are tracked as
/// initialized. Similar to a `Box<[MaybeUninit<T>]>` which can be resized in place.
///
/// A Buffer never drops the values stored in it, only the allocation itself. Keeping track of which
/// slots hold live values is the job of the owning collection, which is why most of the element
/// accessors are `unsafe`.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `new` | `O(1)` |
/// | `cap` | `O(1)` |
/// | `realloc` | `O(n)`*, `O(1)` |
/// | `read` / `write` | `O(1)` |
/// | `shift` | `O(n)` |
///
/// \* Reallocation might happen in place, depending on the allocator.
pub(crate) struct Buffer<T> {
    pub(crate) ptr: NonNull<MaybeUninit<T>>,
    pub(crate) cap: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> Buffer<T> {
    /// Creates a Buffer with capacity 0, which doesn't allocate.
    pub(crate) const fn dangling() -> Buffer<T> {
        Buffer {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates a new Buffer with exactly `cap` uninitialized slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn new(cap: usize) -> Buffer<T> {
        Buffer::try_new(cap).throw()
    }

    /// Allocates a new Buffer with exactly `cap` uninitialized slots.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if memory layout size exceeds [`isize::MAX`]. An allocator
    /// failure is handled by [`alloc::handle_alloc_error`].
    pub(crate) fn try_new(cap: usize) -> Result<Buffer<T>, CapacityOverflow> {
        let layout = Buffer::<T>::make_layout(cap)?;

        Ok(Buffer {
            ptr: Buffer::<T>::make_ptr(layout),
            cap,
            _phantom: PhantomData,
        })
    }

    /// Returns the number of slots in the Buffer.
    pub(crate) const fn cap(&self) -> usize {
        self.cap
    }

    /// Reallocates the Buffer to hold exactly `new_cap` slots. Slots `< min(cap, new_cap)` keep
    /// their contents, new slots are uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`].
    pub(crate) fn realloc(&mut self, new_cap: usize) {
        self.try_realloc(new_cap).throw()
    }

    /// Reallocates the Buffer to hold exactly `new_cap` slots. If an error is returned, the Buffer
    /// hasn't been modified.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the memory layout of the new allocation would have a size
    /// that exceeds [`isize::MAX`].
    pub(crate) fn try_realloc(&mut self, new_cap: usize) -> Result<(), CapacityOverflow> {
        let new_layout = Buffer::<T>::make_layout(new_cap)?;

        if new_cap == self.cap {
            return Ok(());
        }

        // The old layout was valid when it was allocated, so it is still valid now.
        let old_layout = Buffer::<T>::make_layout(self.cap)?;

        log::trace!(
            "reallocating Buffer<{}> from {} to {} slots",
            any::type_name::<T>(),
            self.cap,
            new_cap
        );

        self.ptr = match (old_layout.size(), new_layout.size()) {
            // Zero-sized types and empty buffers never own an allocation, so only the capacity
            // needs to change.
            (0, 0) => self.ptr,
            (0, _) => Buffer::<T>::make_ptr(new_layout),
            (_, 0) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout, which has a
                // non-zero size.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout) };
                NonNull::dangling()
            },
            (_, new_size) => {
                // SAFETY: ptr was allocated in the global allocator with old_layout. new_size is
                // non-zero and doesn't exceed isize::MAX when rounded up to the alignment, because
                // new_layout was successfully created.
                let raw_ptr = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_size)
                };

                NonNull::new(raw_ptr.cast())
                    .unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            },
        };
        self.cap = new_cap;

        Ok(())
    }

    /// Reads the value out of the slot at `index`, leaving a bitwise copy behind.
    ///
    /// # Safety
    /// `index` must be `< cap` and the slot must be initialized. The caller takes ownership of the
    /// value and has to treat the slot as uninitialized afterwards.
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        // SAFETY: The caller guarantees that the slot is in bounds and initialized.
        unsafe { self.ptr.add(index).read().assume_init() }
    }

    /// Writes `value` into the slot at `index` without dropping the previous contents.
    ///
    /// # Safety
    /// `index` must be `< cap`. Anything previously stored in the slot is leaked.
    pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
        // SAFETY: The caller guarantees that the slot is in bounds.
        unsafe { self.ptr.add(index).write(MaybeUninit::new(value)) }
    }

    /// Views the first `len` slots as a slice.
    ///
    /// # Safety
    /// `len` must be `<= cap` and all slots `< len` must be initialized.
    pub(crate) unsafe fn as_slice(&self, len: usize) -> &[T] {
        // SAFETY: The pointer is nonnull and properly aligned, the caller guarantees that the
        // range is allocated and initialized. The total size is <= isize::MAX because the layout
        // was valid.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr().cast(), len) }
    }

    /// Views the first `len` slots as a mutable slice.
    ///
    /// # Safety
    /// `len` must be `<= cap` and all slots `< len` must be initialized.
    pub(crate) unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        // SAFETY: As above, and self is borrowed mutably for the lifetime of the slice.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), len) }
    }

    /// Drops the values in all slots of `range` in place.
    ///
    /// # Safety
    /// `range` must be within `0..cap` and every slot in it must be initialized. The slots are
    /// uninitialized afterwards.
    pub(crate) unsafe fn drop_range(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        // SAFETY: The caller guarantees that the range is in bounds and initialized. Dropping
        // through a slice pointer keeps dropping the rest of the range if one drop panics.
        unsafe {
            let start = self.ptr.add(range.start).as_ptr().cast::<T>();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, range.len()));
        }
    }

    /// Moves the values in `src` so that they start at `dest`. The ranges may overlap.
    ///
    /// # Safety
    /// Both `src` and `dest..dest + src.len()` must be within `0..cap`. Slots of `src` which
    /// aren't overwritten hold stale bitwise copies afterwards and must be treated as
    /// uninitialized.
    pub(crate) unsafe fn shift(&mut self, src: Range<usize>, dest: usize) {
        let count = src.end - src.start;
        // SAFETY: The caller guarantees that both ranges are in bounds. ptr::copy handles
        // overlapping ranges.
        unsafe {
            ptr::copy(
                self.ptr.add(src.start).as_ptr().cast_const(),
                self.ptr.add(dest).as_ptr(),
                count,
            );
        }
    }

    /// Moves the values in `src` into `other`, starting at `dest`.
    ///
    /// # Safety
    /// `src` must be within `0..self.cap` and `dest..dest + src.len()` within `0..other.cap`.
    /// The moved slots of self must be treated as uninitialized afterwards.
    pub(crate) unsafe fn move_into(
        &self,
        src: Range<usize>,
        other: &mut Buffer<T>,
        dest: usize,
    ) {
        let count = src.end - src.start;
        // SAFETY: The caller guarantees that both ranges are in bounds. The Buffers are distinct
        // allocations because other is borrowed mutably while self is borrowed.
        unsafe {
            ptr::copy_nonoverlapping(
                self.ptr.add(src.start).as_ptr().cast_const(),
                other.ptr.add(dest).as_ptr(),
                count,
            );
        }
    }
}

impl<T> Buffer<T> {
    /// A helper function to create a [`Layout`] for use during allocation, containing `cap`
    /// slots of `T`.
    pub(crate) fn make_layout(cap: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<MaybeUninit<T>>(cap).map_err(|_| CapacityOverflow)
    }

    /// A helper function to create a [`NonNull`] for the provided [`Layout`]. Returns a dangling
    /// pointer for a zero-sized layout.
    ///
    /// # Errors
    /// In the event of an allocation error, this method calls [`alloc::handle_alloc_error`] as
    /// recommended, to avoid new allocations rather than panicking.
    pub(crate) fn make_ptr(layout: Layout) -> NonNull<MaybeUninit<T>> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        // Slots are MaybeUninit, so there is nothing to drop except the allocation itself.
        let Ok(layout) = Buffer::<T>::make_layout(self.cap) else {
            return;
        };

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator with this layout, and
            // zero-sized layouts are never allocated.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

// SAFETY: Buffers rely on unique pointers and are therefore safe for Send when T: Send.
unsafe impl<T: Send> Send for Buffer<T> {}
// SAFETY: Buffer's API only hands out shared access through &self, so no interior mutability
// occurs. This means that Buffer<T> can safely implement Sync when T: Sync.
unsafe impl<T: Sync> Sync for Buffer<T> {}
