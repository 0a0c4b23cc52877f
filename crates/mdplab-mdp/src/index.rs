use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Bounds shared by state and action identifiers.
///
/// `Display` is used to name offending identifiers in errors.
pub trait Identifier: Clone + Eq + Hash + Debug + Display {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug + Display {}

/// Ordered identifier collection with a dense `identifier -> index` map.
#[derive(Debug, Clone)]
pub struct IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    items: Vec<T>,
    item_to_index: HashMap<T, usize>,
}

impl<T> IdIndex<T>
where
    T: Clone + Eq + Hash,
{
    /// Index `items` in order. Returns the first repeated item on failure.
    pub fn from_ordered<I>(items: I) -> Result<Self, T>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = items.into_iter();
        let mut index = IdIndex {
            items: Vec::with_capacity(iter.size_hint().0),
            item_to_index: HashMap::with_capacity(iter.size_hint().0),
        };

        for item in iter {
            if index.item_to_index.contains_key(&item) {
                return Err(item);
            }
            index.item_to_index.insert(item.clone(), index.items.len());
            index.items.push(item);
        }

        Ok(index)
    }

    /// Identifiers in index order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn indexes(&self) -> &HashMap<T, usize> {
        &self.item_to_index
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.item_to_index.get(item).copied()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.item_to_index.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
