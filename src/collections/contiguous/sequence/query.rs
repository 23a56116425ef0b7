use std::cmp::{self, Ordering};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use rand::Rng;
use rand::seq::SliceRandom;

use super::Sequence;

impl<T> Sequence<T> {
    /// Returns a new Sequence containing, in order, every element for which `predicate` holds.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([1, 2, 3, 4, 5]);
    /// assert_eq!(seq.filter(|i| i % 2 == 0), [2, 4]);
    /// ```
    pub fn filter<F>(&self, mut predicate: F) -> Sequence<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        let mut filtered = Sequence::with_policy(self.policy);

        for value in self.iter() {
            if predicate(value) {
                filtered.push(value.clone());
            }
        }

        filtered
    }

    /// Returns the first element for which `predicate` holds.
    pub fn first_where<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<&T> {
        self.iter().find(|value| predicate(value))
    }

    /// Returns the last element for which `predicate` holds. The predicate is invoked on every
    /// element, in order.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([1, 8, 3, 6, 5]);
    /// assert_eq!(seq.first_where(|i| *i > 4), Some(&8));
    /// assert_eq!(seq.last_where(|i| *i > 4), Some(&5));
    /// assert_eq!(seq.last_where(|i| *i > 10), None);
    /// ```
    pub fn last_where<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<&T> {
        let mut found = None;

        for value in self.iter() {
            if predicate(value) {
                found = Some(value);
            }
        }

        found
    }

    /// Counts the elements for which `predicate` holds.
    pub fn count_where<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> usize {
        self.iter().filter(|value| predicate(value)).count()
    }

    /// Returns a new Sequence of the same length, with `f` applied to each element.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.map(|i| i * 2), [2, 4, 6]);
    /// assert_eq!(seq.map(|i| i.to_string()), ["1", "2", "3"]);
    /// ```
    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> Sequence<U> {
        let cap = cmp::max(self.len, self.policy.min_cap());
        let mut mapped = Sequence::with_cap_and_policy(cap, self.policy);

        for value in self.iter() {
            mapped.push(f(value));
        }

        mapped
    }

    /// Folds every element into an accumulator, from first to last.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([1, 2, 3, 4, 5]);
    /// assert_eq!(seq.reduce(0, |acc, i| acc + i), 15);
    /// ```
    pub fn reduce<A, F: FnMut(A, &T) -> A>(&self, initial: A, f: F) -> A {
        self.iter().fold(initial, f)
    }

    /// Sorts the Sequence in place with the provided comparator.
    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, compare: F) {
        self.as_mut_slice().sort_by(compare);
    }

    /// Returns a sorted copy of the Sequence, leaving self untouched.
    pub fn sorted_by<F: FnMut(&T, &T) -> Ordering>(&self, compare: F) -> Sequence<T>
    where
        T: Clone,
    {
        let mut sorted = self.clone();
        sorted.sort_by(compare);
        sorted
    }

    /// Shuffles the Sequence in place using the thread-local random number generator. The
    /// resulting order isn't reproducible, see [`shuffle_with`](Sequence::shuffle_with) for that.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffles the Sequence in place using the provided random number generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.as_mut_slice().shuffle(rng);
    }

    /// Returns a shuffled copy of the Sequence, using the thread-local random number generator.
    pub fn shuffled(&self) -> Sequence<T>
    where
        T: Clone,
    {
        self.shuffled_with(&mut rand::rng())
    }

    /// Returns a shuffled copy of the Sequence, using the provided random number generator.
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Sequence<T>
    where
        T: Clone,
    {
        let mut shuffled = self.clone();
        shuffled.shuffle_with(rng);
        shuffled
    }
}

impl<T: PartialEq> Sequence<T> {
    /// Returns true if any element is equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|elem| elem == value)
    }

    /// Returns the index of the first element equal to `value`, or `len` if there is none.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([99, 2, 3]);
    /// assert_eq!(seq.find(&2), 1);
    /// assert_eq!(seq.find(&42), seq.len());
    /// ```
    pub fn find(&self, value: &T) -> usize {
        self.iter().position(|elem| elem == value).unwrap_or(self.len)
    }

    /// Returns the indices of every element equal to `value`.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from(['a', 'b', 'a', 'c', 'a']);
    /// assert_eq!(seq.find_all(&'a'), [0, 2, 4]);
    /// assert!(seq.find_all(&'z').is_empty());
    /// ```
    pub fn find_all(&self, value: &T) -> Sequence<usize> {
        let mut positions = Sequence::with_policy(self.policy);

        for (index, elem) in self.iter().enumerate() {
            if elem == value {
                positions.push(index);
            }
        }

        positions
    }

    /// Counts the elements equal to `value`.
    pub fn count_of(&self, value: &T) -> usize {
        self.count_where(|elem| elem == value)
    }

    /// Removes occurrences of `pattern` as a contiguous run of elements, either only the first
    /// or repeatedly until none remain. Runs which only form after an earlier removal are
    /// removed too. Returns the number of runs removed. An empty pattern removes nothing.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3, 1, 2, 4]);
    /// assert_eq!(seq.remove_elements(&[1, 2], true), 1);
    /// assert_eq!(seq, [3, 1, 2, 4]);
    ///
    /// let mut seq = Sequence::from([1, 1, 2, 2]);
    /// assert_eq!(seq.remove_elements(&[1, 2], false), 2);
    /// assert!(seq.is_empty());
    /// ```
    pub fn remove_elements(&mut self, pattern: &[T], only_first: bool) -> usize {
        if pattern.is_empty() {
            return 0;
        }

        let mut removed = 0;
        let mut search_from = 0;

        loop {
            let Some(offset) = self.as_slice()[search_from..]
                .windows(pattern.len())
                .position(|window| window == pattern)
            else {
                break;
            };

            let start = search_from + offset;
            // The run was found within len, so this can't fail.
            if self.remove_subrange(start, start + pattern.len(), false).is_err() {
                break;
            }
            removed += 1;

            if only_first {
                break;
            }
            // Nothing before this point matched, but the join may now form a new run.
            search_from = start.saturating_sub(pattern.len() - 1);
        }

        removed
    }
}

impl<T: Ord> Sequence<T> {
    /// Sorts the Sequence in ascending order.
    pub fn sort(&mut self) {
        self.as_mut_slice().sort();
    }

    /// Returns a copy of the Sequence sorted in ascending order, leaving self untouched.
    ///
    /// # Examples
    /// ```
    /// # use evt_collections::collections::contiguous::Sequence;
    /// let seq = Sequence::from([5, 3, 1, 4]);
    /// assert_eq!(seq.sorted(), [1, 3, 4, 5]);
    /// assert_eq!(seq, [5, 3, 1, 4]);
    /// ```
    pub fn sorted(&self) -> Sequence<T>
    where
        T: Clone,
    {
        self.sorted_by(Ord::cmp)
    }
}

/// Concatenates any collection of elements onto the end of a Sequence.
///
/// # Examples
/// ```
/// # use evt_collections::collections::contiguous::Sequence;
/// let mut seq = Sequence::from([1, 2]) + [3];
/// seq += vec![4, 5];
/// assert_eq!(seq, [1, 2, 3, 4, 5]);
/// ```
impl<T, I: IntoIterator<Item = T>> Add<I> for Sequence<T> {
    type Output = Sequence<T>;

    fn add(mut self, rhs: I) -> Self::Output {
        self.append_elements(rhs);
        self
    }
}

impl<T, I: IntoIterator<Item = T>> AddAssign<I> for Sequence<T> {
    fn add_assign(&mut self, rhs: I) {
        self.append_elements(rhs);
    }
}

/// Removes every occurrence of a run of elements, see
/// [`remove_elements`](Sequence::remove_elements).
///
/// # Examples
/// ```
/// # use evt_collections::collections::contiguous::Sequence;
/// let mut seq = Sequence::from([1, 2, 3, 1, 2]) - [1, 2];
/// assert_eq!(seq, [3]);
/// seq += [4, 5, 4, 5];
/// seq -= vec![5, 4];
/// assert_eq!(seq, [3, 4, 5]);
/// ```
impl<T: PartialEq, R: AsRef<[T]>> Sub<R> for Sequence<T> {
    type Output = Sequence<T>;

    fn sub(mut self, rhs: R) -> Self::Output {
        self.remove_elements(rhs.as_ref(), false);
        self
    }
}

impl<T: PartialEq, R: AsRef<[T]>> SubAssign<R> for Sequence<T> {
    fn sub_assign(&mut self, rhs: R) {
        self.remove_elements(rhs.as_ref(), false);
    }
}
