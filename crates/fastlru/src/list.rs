//! Recency list
//!
//! Doubly linked list stored in an arena. Links are slot indices, not
//! pointers, so entries never own each other. Slot 0 is a sentinel that
//! carries no data; the list is circular through it, which makes the
//! empty, single and multi element cases the same code path:
//!
//! ```text
//!   sentinel.next -> head -> ... -> tail -> sentinel
//!   sentinel.prev -> tail
//! ```

/// Index of a slot in the arena
pub(crate) type Handle = usize;

const SENTINEL: Handle = 0;

struct Entry<V> {
    key: String,
    value: V,
}

/// Slot in the arena. `entry` is `None` for the sentinel and for free slots.
struct Node<V> {
    entry: Option<Entry<V>>,
    prev: Handle,
    next: Handle,
}

impl<V> Node<V> {
    fn unlinked() -> Self {
        Self {
            entry: None,
            prev: SENTINEL,
            next: SENTINEL,
        }
    }
}

/// Entries ordered from most recently used (head) to least recently used (tail)
pub(crate) struct RecencyList<V> {
    nodes: Vec<Node<V>>,
    free_list: Vec<Handle>,
    len: usize,
}

impl<V> RecencyList<V> {
    /// Create a list with room for `capacity` entries before reallocating
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node::unlinked());

        Self {
            nodes,
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently used entry
    pub(crate) fn head(&self) -> Option<Handle> {
        (!self.is_empty()).then(|| self.nodes[SENTINEL].next)
    }

    /// Least recently used entry
    pub(crate) fn tail(&self) -> Option<Handle> {
        (!self.is_empty()).then(|| self.nodes[SENTINEL].prev)
    }

    pub(crate) fn key(&self, handle: Handle) -> Option<&str> {
        self.entry(handle).map(|entry| entry.key.as_str())
    }

    pub(crate) fn get(&self, handle: Handle) -> Option<&V> {
        self.entry(handle).map(|entry| &entry.value)
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut V> {
        self.nodes
            .get_mut(handle)
            .and_then(|node| node.entry.as_mut())
            .map(|entry| &mut entry.value)
    }

    /// Insert a new entry at the head
    pub(crate) fn push_front(&mut self, key: String, value: V) -> Handle {
        let entry = Some(Entry { key, value });
        let handle = match self.free_list.pop() {
            Some(handle) => {
                self.nodes[handle].entry = entry;
                handle
            }
            None => {
                self.nodes.push(Node {
                    entry,
                    ..Node::unlinked()
                });
                self.nodes.len() - 1
            }
        };

        self.link_front(handle);
        self.len += 1;
        handle
    }

    /// Promote an entry to the head. No-op if it is already there.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        debug_assert!(self.entry(handle).is_some(), "move of a dead slot");

        if self.nodes[SENTINEL].next == handle {
            return;
        }

        self.unlink(handle);
        self.link_front(handle);
    }

    /// Remove an entry, freeing its slot
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<(String, V)> {
        if handle == SENTINEL {
            return None;
        }

        let entry = self.nodes.get_mut(handle)?.entry.take()?;
        self.unlink(handle);
        self.free_list.push(handle);
        self.len -= 1;

        Some((entry.key, entry.value))
    }

    /// Remove the least recently used entry
    pub(crate) fn pop_back(&mut self) -> Option<(String, V)> {
        let tail = self.tail()?;
        self.remove(tail)
    }

    /// Drop every entry, returning to the sentinel-only state
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[SENTINEL] = Node::unlinked();
        self.free_list.clear();
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.nodes[SENTINEL].next,
            remaining: self.len,
        }
    }

    /// Walk head to tail checking that every back link mirrors its forward
    /// link and that the walk visits exactly `len` live entries.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut prev = SENTINEL;
        let mut cursor = self.nodes[SENTINEL].next;
        let mut count = 0;

        while cursor != SENTINEL {
            let node = &self.nodes[cursor];
            if node.prev != prev || node.entry.is_none() || count >= self.len {
                return false;
            }
            prev = cursor;
            cursor = node.next;
            count += 1;
        }

        self.nodes[SENTINEL].prev == prev && count == self.len
    }

    fn entry(&self, handle: Handle) -> Option<&Entry<V>> {
        self.nodes.get(handle).and_then(|node| node.entry.as_ref())
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.nodes[SENTINEL].next;

        let node = &mut self.nodes[handle];
        node.prev = SENTINEL;
        node.next = old_head;

        // On an empty list old_head is the sentinel, so this also sets the tail.
        self.nodes[old_head].prev = handle;
        self.nodes[SENTINEL].next = handle;
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let node = &self.nodes[handle];
            (node.prev, node.next)
        };

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }
}

/// Iterator over `(key, value)` pairs, most recently used first
pub struct Iter<'a, V> {
    nodes: &'a [Node<V>],
    cursor: Handle,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.nodes[self.cursor];
        let entry = node.entry.as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;

        Some((entry.key.as_str(), &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
