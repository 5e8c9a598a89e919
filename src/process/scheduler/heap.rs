/*!
 * Priority Heap
 * Fixed-capacity, array-backed binary max-heap
 *
 * Storage is reserved once at construction and never grows: `insert` hands
 * the item back when the heap is full instead of reallocating. Sift helpers
 * work on indices into a bounds-checked `Vec`.
 */

use crate::core::errors::{SchedulerError, SchedulerResult};

/// Binary max-heap ordered by `T: Ord`
///
/// For every non-root index `i`, `data[parent(i)] >= data[i]`.
#[derive(Debug, Clone)]
pub struct PriorityHeap<T: Ord> {
    data: Vec<T>,
    capacity: usize,
}

#[inline(always)]
const fn parent(index: usize) -> usize {
    (index - 1) / 2
}

#[inline(always)]
const fn left_child(index: usize) -> usize {
    2 * index + 1
}

impl<T: Ord> PriorityHeap<T> {
    /// Create an empty heap holding at most `capacity` items
    ///
    /// Storage is reserved eagerly; an allocation failure is reported as
    /// [`SchedulerError::InitializationFailure`] instead of aborting.
    pub fn with_capacity(capacity: usize) -> SchedulerResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity).map_err(|e| {
            SchedulerError::InitializationFailure(format!(
                "cannot reserve heap storage for {} entries: {}",
                capacity, e
            ))
        })?;

        Ok(Self { data, capacity })
    }

    /// Insert an item, restoring heap order by sifting up - O(log n)
    ///
    /// Returns the item back if the heap is already at capacity.
    pub fn insert(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }

        self.data.push(item);
        let last = self.data.len() - 1;
        self.sift_up(last);
        Ok(())
    }

    /// Remove and return the greatest item, sifting the new root down - O(log n)
    pub fn extract_max(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }

        // Move the last element into the root slot; the old root comes out
        let max = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(max)
    }

    /// Greatest item without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate stored items in storage (not priority) order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Consume the heap, returning items in storage order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Consume the heap, returning items greatest first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(item) = self.extract_max() {
            sorted.push(item);
        }
        sorted
    }

    /// Check the heap property over the whole array
    pub fn is_heap(&self) -> bool {
        (1..self.data.len()).all(|i| self.data[parent(i)] >= self.data[i])
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let p = parent(index);
            if self.data[index] <= self.data[p] {
                break;
            }
            self.data.swap(index, p);
            index = p;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = left_child(index);
            let right = left + 1;
            let mut largest = index;

            if left < len && self.data[left] > self.data[largest] {
                largest = left;
            }
            if right < len && self.data[right] > self.data[largest] {
                largest = right;
            }

            if largest == index {
                break;
            }
            self.data.swap(index, largest);
            index = largest;
        }
    }
}
