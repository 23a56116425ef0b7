use std::iter::FusedIterator;
use std::mem;
use std::slice;

use super::Sequence;
use crate::collections::contiguous::buffer::Buffer;

impl<T> IntoIterator for Sequence<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = self.len;
        // Leave self empty and unallocated, so that dropping it is a no-op.
        self.len = 0;
        let buf = mem::replace(&mut self.buf, Buffer::dangling());

        IntoIter {
            buf,
            head: 0,
            tail: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

/// A type for owned iteration over a [`Sequence`]. See [`Sequence::into_iter`].
///
/// The values in `head..tail` of the Buffer are initialized and not yet yielded.
pub struct IntoIter<T> {
    pub(crate) buf: Buffer<T>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.head..self.tail;
        self.head = self.tail;
        // SAFETY: All values in head..tail are initialized and are no longer tracked.
        unsafe { self.buf.drop_range(remaining) };
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head < self.tail {
            // SAFETY: head < tail, so the value is initialized. Incrementing head moves it out.
            let value = unsafe { self.buf.read(self.head) };
            self.head += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head < self.tail {
            self.tail -= 1;
            // SAFETY: The newly decremented tail is >= head, so the value is initialized.
            let value = unsafe { self.buf.read(self.tail) };
            Some(value)
        } else {
            None
        }
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {}
