//! Dense, order-preserving entity storage.
//!
//! Every element carries its own index into the roster.  Removal excises the
//! element and shifts the stored index of every later element down by one, so
//! the roster never has gaps and `roster[i].index() == i` always holds.
//!
//! Entities destroyed while the roster is being walked are only *doomed*;
//! they stay in place (and keep their index) until [`Roster::sweep`] runs, so
//! a walk by index never skips or revisits an element.

use std::collections::BTreeSet;
use std::ops::Index;

/// An entity that knows where it lives in its [`Roster`].
pub trait Indexed {
    fn index(&self) -> usize;
    fn set_index(&mut self, index: usize);
}

#[derive(Clone, Debug)]
pub struct Roster<T> {
    items: Vec<T>,
    doomed: BTreeSet<usize>,
}

impl<T> Default for Roster<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            doomed: BTreeSet::new(),
        }
    }
}

impl<T: Indexed> Roster<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `item`, stamping it with its index. Returns that index.
    pub fn push(&mut self, mut item: T) -> usize {
        let index = self.items.len();
        item.set_index(index);
        self.items.push(item);
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Excise the element at `index` immediately and reindex its successors.
    ///
    /// Must not be called while walking the roster by index; use
    /// [`Roster::doom`] there instead.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        for item in &mut self.items[index..] {
            let shifted = item.index() - 1;
            item.set_index(shifted);
        }
        self.doomed = self
            .doomed
            .iter()
            .filter(|&&d| d != index)
            .map(|&d| if d > index { d - 1 } else { d })
            .collect();
        Some(removed)
    }

    /// Mark the element at `index` for removal at the next sweep.
    /// Returns `false` if it was already doomed or does not exist.
    pub fn doom(&mut self, index: usize) -> bool {
        index < self.items.len() && self.doomed.insert(index)
    }

    pub fn is_doomed(&self, index: usize) -> bool {
        self.doomed.contains(&index)
    }

    /// Remove every doomed element, preserving the order of the survivors and
    /// restamping their indices. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        if self.doomed.is_empty() {
            return 0;
        }
        let doomed = std::mem::take(&mut self.doomed);
        let before = self.items.len();
        let mut position = 0;
        self.items.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_index(index);
        }
        before - self.items.len()
    }

    /// True when every element's stored index equals its position.
    pub fn is_consistent(&self) -> bool {
        self.items.iter().enumerate().all(|(i, item)| item.index() == i)
    }
}

impl<T> Index<usize> for Roster<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Roster<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
