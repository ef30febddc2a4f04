//! Head-biased ring container holding a dynamic object population.
//!
//! [`Population`] is a circular doubly-linked list whose links are slot
//! indices into an arena (`Vec<Slot<T>>`) instead of pointers.  Vacated slots
//! are chained into a free list and reused by later inserts.
//!
//! ## Contract
//!
//! | Operation        | Cost | Notes                                            |
//! |------------------|------|--------------------------------------------------|
//! | `insert`         | O(1) | new element becomes the head                     |
//! | `remove_head`    | O(1) | returns the owned element; the next one is head  |
//! | `peek_head`      | O(1) | panics on an empty population                    |
//! | `advance`/`retreat` | O(1) | rotate the head cursor one step               |
//! | `each`           | O(n) | visitor may remove the visited element or stop   |
//!
//! Forward traversal from the head visits elements newest-first.  Each element
//! is owned by exactly one slot; removing it hands ownership back to the
//! caller, and dropping the population drops everything still inside.

use std::fmt;
use std::mem;

/// Traversal direction around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Follow `next` links (newest-first from the head).
    #[default]
    Forward,
    /// Follow `prev` links (head, then oldest-first).
    Backward,
}

/// What [`Population::each`] should do after visiting an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep the element and move on.
    Continue,
    /// Drop the element and move on.
    Remove,
    /// Keep the element and end the traversal.
    Stop,
    /// Drop the element and end the traversal.
    RemoveAndStop,
}

impl Visit {
    fn removes(self) -> bool {
        matches!(self, Visit::Remove | Visit::RemoveAndStop)
    }

    fn stops(self) -> bool {
        matches!(self, Visit::Stop | Visit::RemoveAndStop)
    }
}

#[derive(Clone)]
enum Slot<T> {
    Occupied { value: T, next: usize, prev: usize },
    Vacant { next_free: Option<usize> },
}

/// Circular doubly-linked list of owned elements with a single head cursor.
#[derive(Clone)]
pub struct Population<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    free: Option<usize>,
    len: usize,
}

impl<T> Default for Population<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Population<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Population<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            free: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `item` in front of the current head; it becomes the new head.
    pub fn insert(&mut self, item: T) {
        let index = match self.head {
            None => {
                let index = self.allocate();
                self.slots[index] = Slot::Occupied {
                    value: item,
                    next: index,
                    prev: index,
                };
                index
            }
            Some(head) => {
                let tail = self.prev_of(head);
                let index = self.allocate();
                self.slots[index] = Slot::Occupied {
                    value: item,
                    next: head,
                    prev: tail,
                };
                self.set_next(tail, index);
                self.set_prev(head, index);
                index
            }
        };
        self.head = Some(index);
        self.len += 1;
    }

    /// Remove the head element and return it.  The following element becomes
    /// the head.  `None` when the population is empty.
    pub fn remove_head(&mut self) -> Option<T> {
        self.head.map(|head| self.unlink(head))
    }

    /// The head element.
    ///
    /// # Panics
    ///
    /// When the population is empty.
    pub fn peek_head(&self) -> &T {
        match self.head {
            Some(head) => self.value(head),
            None => panic!("peek_head called on an empty population"),
        }
    }

    /// Mutable access to the head element.
    ///
    /// # Panics
    ///
    /// When the population is empty.
    pub fn peek_head_mut(&mut self) -> &mut T {
        match self.head {
            Some(head) => self.value_mut(head),
            None => panic!("peek_head_mut called on an empty population"),
        }
    }

    /// The element after the head (the head itself when it is alone).
    ///
    /// # Panics
    ///
    /// When the population is empty.
    pub fn peek_head_next(&self) -> &T {
        match self.head {
            Some(head) => self.value(self.next_of(head)),
            None => panic!("peek_head_next called on an empty population"),
        }
    }

    /// Move the head cursor one step forward.  No-op when empty.
    pub fn advance(&mut self) {
        if let Some(head) = self.head {
            self.head = Some(self.next_of(head));
        }
    }

    /// Move the head cursor one step backward.  No-op when empty.
    pub fn retreat(&mut self) {
        if let Some(head) = self.head {
            self.head = Some(self.prev_of(head));
        }
    }

    /// Visit every element once, starting at the head.
    ///
    /// The link to the following element is read before the visitor runs, so
    /// a visitor may remove the element it is looking at without disturbing
    /// the rest of the walk.  Removing the head makes its successor the head.
    /// The head cursor is otherwise left where it was.
    pub fn each<F>(&mut self, direction: Direction, mut visitor: F)
    where
        F: FnMut(&mut T) -> Visit,
    {
        let Some(mut current) = self.head else {
            return;
        };
        let mut remaining = self.len;

        while remaining > 0 {
            remaining -= 1;
            let following = self.step(current, direction);
            let visit = visitor(self.value_mut(current));
            if visit.removes() {
                drop(self.unlink(current));
            }
            if visit.stops() || self.head.is_none() {
                break;
            }
            current = following;
        }
    }

    /// Read-only forward traversal from the head.
    pub fn iter(&self) -> Iter<'_, T> {
        self.iter_in(Direction::Forward)
    }

    /// Read-only traversal from the head in `direction`.
    pub fn iter_in(&self, direction: Direction) -> Iter<'_, T> {
        Iter {
            population: self,
            current: self.head,
            remaining: self.len,
            direction,
        }
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.free = None;
        self.len = 0;
    }

    // ── Slot plumbing ─────────────────────────────────────────────────────────

    fn allocate(&mut self) -> usize {
        match self.free {
            Some(index) => {
                self.free = match self.slots[index] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied { .. } => unreachable!("free list points at a live slot"),
                };
                index
            }
            None => {
                self.slots.push(Slot::Vacant { next_free: None });
                self.slots.len() - 1
            }
        }
    }

    fn unlink(&mut self, index: usize) -> T {
        let vacated = Slot::Vacant {
            next_free: self.free,
        };
        let Slot::Occupied { value, next, prev } = mem::replace(&mut self.slots[index], vacated)
        else {
            unreachable!("unlink of a vacant slot");
        };
        self.free = Some(index);
        self.len -= 1;

        if next == index {
            self.head = None;
        } else {
            self.set_next(prev, next);
            self.set_prev(next, prev);
            if self.head == Some(index) {
                self.head = Some(next);
            }
        }
        value
    }

    fn step(&self, index: usize, direction: Direction) -> usize {
        match direction {
            Direction::Forward => self.next_of(index),
            Direction::Backward => self.prev_of(index),
        }
    }

    fn value(&self, index: usize) -> &T {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    fn value_mut(&mut self, index: usize) -> &mut T {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    fn next_of(&self, index: usize) -> usize {
        match self.slots[index] {
            Slot::Occupied { next, .. } => next,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    fn prev_of(&self, index: usize) -> usize {
        match self.slots[index] {
            Slot::Occupied { prev, .. } => prev,
            Slot::Vacant { .. } => unreachable!("link points at a vacant slot"),
        }
    }

    fn set_next(&mut self, index: usize, to: usize) {
        if let Slot::Occupied { next, .. } = &mut self.slots[index] {
            *next = to;
        }
    }

    fn set_prev(&mut self, index: usize, to: usize) {
        if let Slot::Occupied { prev, .. } = &mut self.slots[index] {
            *prev = to;
        }
    }
}

impl<T> Extend<T> for Population<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> FromIterator<T> for Population<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut population = Population::new();
        population.extend(iter);
        population
    }
}

/// Borrowing iterator returned by [`Population::iter`].
pub struct Iter<'a, T> {
    population: &'a Population<T>,
    current: Option<usize>,
    remaining: usize,
    direction: Direction,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.current?;
        self.remaining -= 1;
        self.current = Some(self.population.step(index, self.direction));
        Some(self.population.value(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Population<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[i32]) -> Population<i32> {
        values.iter().copied().collect()
    }

    fn forward(p: &Population<i32>) -> Vec<i32> {
        p.iter().copied().collect()
    }

    #[test]
    fn new_population_is_empty() {
        let p: Population<i32> = Population::new();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.iter().count(), 0);
    }

    #[test]
    fn insert_places_item_at_head() {
        let p = filled(&[1, 2, 3]);
        assert_eq!(*p.peek_head(), 3);
        assert_eq!(*p.peek_head_next(), 2);
        assert_eq!(forward(&p), vec![3, 2, 1]);
    }

    #[test]
    fn backward_walk_visits_head_then_oldest() {
        let p = filled(&[1, 2, 3]);
        let order: Vec<i32> = p.iter_in(Direction::Backward).copied().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn remove_head_returns_items_newest_first() {
        let mut p = filled(&[1, 2, 3]);
        assert_eq!(p.remove_head(), Some(3));
        assert_eq!(*p.peek_head(), 2);
        assert_eq!(p.remove_head(), Some(2));
        assert_eq!(p.remove_head(), Some(1));
        assert_eq!(p.remove_head(), None);
        assert!(p.is_empty());
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn peek_head_on_empty_panics() {
        let p: Population<i32> = Population::new();
        let _ = p.peek_head();
    }

    #[test]
    fn interleaved_inserts_and_removes_keep_count() {
        let mut p = Population::new();
        let mut expected = 0usize;
        for round in 0..50 {
            p.insert(round);
            expected += 1;
            if round % 3 == 0 {
                assert!(p.remove_head().is_some());
                expected -= 1;
            }
            assert_eq!(p.len(), expected);
            assert_eq!(p.iter().count(), expected);
        }
    }

    #[test]
    fn vacated_slots_are_reused() {
        let mut p = filled(&[1, 2, 3]);
        p.remove_head();
        p.remove_head();
        p.insert(4);
        p.insert(5);
        assert_eq!(p.slots.len(), 3, "free list should recycle slots");
        assert_eq!(forward(&p), vec![5, 4, 1]);
    }

    #[test]
    fn each_visits_every_element_once() {
        let mut p = filled(&[1, 2, 3, 4]);
        let mut seen = Vec::new();
        p.each(Direction::Forward, |v| {
            seen.push(*v);
            Visit::Continue
        });
        assert_eq!(seen, vec![4, 3, 2, 1]);
        assert_eq!(*p.peek_head(), 4, "plain walk leaves the head alone");
    }

    #[test]
    fn each_can_mutate_in_place() {
        let mut p = filled(&[1, 2, 3]);
        p.each(Direction::Backward, |v| {
            *v *= 10;
            Visit::Continue
        });
        assert_eq!(forward(&p), vec![30, 20, 10]);
    }

    #[test]
    fn removal_mid_walk_neither_skips_nor_repeats() {
        let mut p = filled(&[1, 2, 3, 4, 5, 6]);
        let mut seen = Vec::new();
        p.each(Direction::Forward, |v| {
            seen.push(*v);
            if *v % 2 == 0 {
                Visit::Remove
            } else {
                Visit::Continue
            }
        });
        assert_eq!(seen, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(forward(&p), vec![5, 3, 1]);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn removing_every_element_empties_the_ring() {
        let mut p = filled(&[1, 2, 3]);
        let mut visits = 0;
        p.each(Direction::Backward, |_| {
            visits += 1;
            Visit::Remove
        });
        assert_eq!(visits, 3);
        assert!(p.is_empty());
        assert!(p.remove_head().is_none());
    }

    #[test]
    fn remove_and_stop_ends_after_first_match() {
        let mut p = filled(&[1, 2, 3, 4]);
        let mut seen = Vec::new();
        p.each(Direction::Forward, |v| {
            seen.push(*v);
            if *v == 3 {
                Visit::RemoveAndStop
            } else {
                Visit::Continue
            }
        });
        assert_eq!(seen, vec![4, 3]);
        assert_eq!(forward(&p), vec![4, 2, 1]);
    }

    #[test]
    fn removing_head_promotes_its_successor() {
        let mut p = filled(&[1, 2, 3]);
        p.each(Direction::Forward, |_| Visit::RemoveAndStop);
        assert_eq!(*p.peek_head(), 2);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn stop_keeps_the_element() {
        let mut p = filled(&[1, 2]);
        let mut visits = 0;
        p.each(Direction::Forward, |_| {
            visits += 1;
            Visit::Stop
        });
        assert_eq!(visits, 1);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn advance_and_retreat_rotate_the_head() {
        let mut p = filled(&[1, 2, 3]);
        p.advance();
        assert_eq!(*p.peek_head(), 2);
        p.retreat();
        p.retreat();
        assert_eq!(*p.peek_head(), 1);
        assert_eq!(forward(&p), vec![1, 3, 2]);
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let original = filled(&[1, 2, 3]);
        let mut copy = original.clone();
        copy.remove_head();
        *copy.peek_head_mut() = 99;
        assert_eq!(forward(&original), vec![3, 2, 1]);
        assert_eq!(forward(&copy), vec![99, 1]);
    }

    #[test]
    fn clear_drops_everything() {
        let mut p = filled(&[1, 2, 3]);
        p.clear();
        assert!(p.is_empty());
        p.insert(7);
        assert_eq!(forward(&p), vec![7]);
    }
}
