use std::ops::Range;

use super::item::Item;

/// A parsed outline file: one flat, ordered list of items.
///
/// Order is the only encoding of hierarchy. A section's descendants are the
/// contiguous run of items after it, up to the next section at the same or a
/// shallower level. There are no parent pointers or child lists; every
/// structural question is answered by scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub items: Vec<Item>,
}

impl Outline {
    pub fn new(items: Vec<Item>) -> Self {
        Outline { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Exclusive end of the subtree rooted at `index`.
    ///
    /// For a task this is `index + 1`. For a section at level `L` it is the
    /// position of the next section with level `<= L`, or the end of the list.
    /// Recomputed on every call.
    pub fn subtree_end(&self, index: usize) -> usize {
        let Some(level) = self.items.get(index).and_then(Item::level) else {
            return (index + 1).min(self.items.len());
        };
        self.items[index + 1..]
            .iter()
            .position(|item| item.level().is_some_and(|l| l <= level))
            .map(|offset| index + 1 + offset)
            .unwrap_or(self.items.len())
    }

    /// The range of positions making up the subtree at `index`
    pub fn subtree_range(&self, index: usize) -> Range<usize> {
        index..self.subtree_end(index)
    }
}
