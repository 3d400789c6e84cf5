//! ChainList: the singly-linked collision chain stored in each bucket.
//!
//! Nodes live in a per-chain `SlotMap` and link to each other through
//! generational keys, so unlinking a node never requires juggling owned
//! `Box` pointers. The entry count is the arena's length, which keeps it
//! equal to the number of nodes reachable from `head` as long as every
//! inserted node is linked and every unlinked node is removed from the arena.

use core::fmt;
use slotmap::{DefaultKey, SlotMap};

/// One key-value pair in a chain.
pub struct Entry<V> {
    key: String,
    value: V,
    next: Option<DefaultKey>,
}

impl<V> Entry<V> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}

/// Singly-linked list of entries with push-front insertion.
///
/// Keys are not deduplicated here; `HashTable::put` removes a stale entry
/// before adding its replacement.
pub struct ChainList<V> {
    nodes: SlotMap<DefaultKey, Entry<V>>,
    head: Option<DefaultKey>,
}

impl<V> Default for ChainList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainList<V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Link a new entry in as the head. Never fails and never checks for
    /// an existing entry with the same key.
    pub fn add_front(&mut self, key: String, value: V) {
        let next = self.head;
        let k = self.nodes.insert(Entry { key, value, next });
        self.head = Some(k);
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Unlink the first entry matching `key` and return its value.
    /// `None` if the chain is empty or has no such key.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            let next = node.next;
            if node.key == key {
                match prev {
                    None => self.head = next,
                    Some(p) => self.nodes[p].next = next,
                }
                return self.nodes.remove(k).map(|e| e.value);
            }
            prev = Some(k);
            cur = next;
        }
        None
    }

    /// First entry matching `key`, scanning from the head.
    pub fn contains(&self, key: &str) -> Option<&Entry<V>> {
        let k = self.find(key)?;
        self.nodes.get(k)
    }

    pub fn contains_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        let k = self.find(key)?;
        self.nodes.get_mut(k)
    }

    /// Take every entry out, head to tail, leaving the chain empty.
    pub fn drain(&mut self) -> IntoIter<V> {
        IntoIter {
            nodes: core::mem::replace(&mut self.nodes, SlotMap::with_key()),
            cur: self.head.take(),
        }
    }

    /// Entries from head to tail.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
        }
    }
}

/// Borrowing iterator over a chain, head to tail.
pub struct Iter<'a, V> {
    nodes: &'a SlotMap<DefaultKey, Entry<V>>,
    cur: Option<DefaultKey>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.nodes.get(self.cur?)?;
        self.cur = e.next;
        Some((e.key.as_str(), &e.value))
    }
}

/// Owning iterator that takes the chain apart, head to tail.
pub struct IntoIter<V> {
    nodes: SlotMap<DefaultKey, Entry<V>>,
    cur: Option<DefaultKey>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.nodes.remove(self.cur?)?;
        self.cur = e.next;
        Some((e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<V> IntoIterator for ChainList<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            nodes: self.nodes,
            cur: self.head,
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainList<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders `[(k1, v1) -> (k2, v2)]`, or `[]` for an empty chain.
impl<V: fmt::Display> fmt::Display for ChainList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        f.write_str("]")
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
