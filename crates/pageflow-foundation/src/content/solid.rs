//! Detached, read-only copies of the loaded items.

use std::ops::Index;
use std::rc::Rc;

/// A frozen copy of a window's items.
///
/// It no longer follows the controller; entrances and responses applied after
/// [`PagedContent::solidify`](crate::PagedContent::solidify) leave it untouched.
/// Cloning is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolidContent<T> {
    items: Rc<[T]>,
}

impl<T> SolidContent<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::from(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Index<usize> for SolidContent<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a SolidContent<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
