//! The recursive unit of the radix tree.
//!
//! A node owns a segment of a key, an optional value, and its children.
//! Children are kept in insertion order and searched linearly; no two
//! children of a node start with the same character (under the tree's
//! comparison rule), so at most one child can ever match a key.
//!
//! A node with children never holds a value itself. If a key ends exactly at
//! a branch point, its value lives in an empty-segment child of that branch.

use core::mem;
use core::iter::FusedIterator;
use crate::case::{Matcher, Overlap};


/// Outcome of [`Node::insert`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Insertion<V> {
    /// The key was not present before.
    Inserted,
    /// The key was present and its value has been overwritten.
    Replaced(V),
    /// The key was present and overwriting was not requested.
    Kept,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    is_root: bool,
    segment: String,
    value: Option<V>,
    children: Vec<Node<V>>,
}

impl<V> Node<V> {
    pub(crate) const fn root() -> Self {
        Node {
            is_root: true,
            segment: String::new(),
            value: None,
            children: Vec::new(),
        }
    }

    fn leaf(segment: String, value: V) -> Self {
        Node {
            is_root: false,
            segment,
            value: Some(value),
            children: Vec::new(),
        }
    }

    fn branch(segment: String) -> Self {
        Node {
            is_root: false,
            segment,
            value: None,
            children: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn segment(&self) -> &str {
        &self.segment
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn children(&self) -> &[Node<V>] {
        &self.children
    }

    /// A non-root node without children. These are exactly the value holders.
    pub(crate) fn is_end_node(&self) -> bool {
        !self.is_root && self.children.is_empty()
    }

    pub(crate) fn insert(&mut self, key: &str, value: V, overwrite: bool, m: Matcher) -> Insertion<V> {
        if key.is_empty() {
            return self.insert_here(value, overwrite);
        }

        let matched = self.children.iter().enumerate().find_map(|(index, child)| {
            let overlap = m.overlap(&child.segment, key);
            (overlap.segment > 0).then_some((index, overlap))
        });

        match matched {
            Some((index, overlap)) if overlap.segment == self.children[index].segment.len() => {
                self.children[index].insert(&key[overlap.key..], value, overwrite, m)
            }
            Some((index, overlap)) => {
                self.split_child(index, overlap, &key[overlap.key..], value);
                Insertion::Inserted
            }
            None => {
                if self.is_end_node() {
                    self.demote();
                }
                self.children.push(Node::leaf(key.to_owned(), value));
                Insertion::Inserted
            }
        }
    }

    /// Stores a value for the key that ends exactly at this node.
    fn insert_here(&mut self, value: V, overwrite: bool) -> Insertion<V> {
        if self.is_end_node() {
            return match self.value.as_mut() {
                Some(current) if overwrite => Insertion::Replaced(mem::replace(current, value)),
                Some(_) => Insertion::Kept,
                None => {
                    self.value = Some(value);
                    Insertion::Inserted
                }
            };
        }

        match self.children.iter_mut().find(|child| child.segment.is_empty()) {
            Some(holder) => holder.insert_here(value, overwrite),
            None => {
                self.children.push(Node::leaf(String::new(), value));
                Insertion::Inserted
            }
        }
    }

    /// Replaces `children[index]` with a branch on the shared prefix, holding
    /// the shrunk original child and a new leaf for `rest`, in that order.
    fn split_child(&mut self, index: usize, overlap: Overlap, rest: &str, value: V) {
        let child = &mut self.children[index];
        let suffix = child.segment.split_off(overlap.segment);
        let shared = mem::replace(&mut child.segment, suffix);

        #[cfg(feature = "tracing")]
        tracing::trace!(shared = %shared, existing = %child.segment, new = %rest, "split node");

        let original = mem::replace(child, Node::branch(shared));
        child.children.push(original);
        child.children.push(Node::leaf(rest.to_owned(), value));
    }

    /// Turns this end node into a branch by moving its value
    /// into a new empty-segment child.
    fn demote(&mut self) {
        debug_assert!(self.is_end_node());

        #[cfg(feature = "tracing")]
        tracing::trace!(segment = %self.segment, "demote end node");

        if let Some(value) = self.value.take() {
            self.children.push(Node::leaf(String::new(), value));
        }
    }

    pub(crate) fn find(&self, key: &str, m: Matcher) -> Option<&Self> {
        if key.is_empty() {
            if self.is_end_node() {
                return Some(self);
            }
            return self.children.iter().find(|child| child.segment.is_empty());
        }

        let (child, rest) = self.children.iter().find_map(|child| {
            m.strip_segment(&child.segment, key).map(|rest| (child, rest))
        })?;

        child.find(rest, m)
    }

    pub(crate) fn find_mut(&mut self, key: &str, m: Matcher) -> Option<&mut Self> {
        if key.is_empty() {
            if self.is_end_node() {
                return Some(self);
            }
            return self.children.iter_mut().find(|child| child.segment.is_empty());
        }

        let (child, rest) = self.children.iter_mut().find_map(|child| {
            let rest = m.strip_segment(&child.segment, key)?;
            Some((child, rest))
        })?;

        child.find_mut(rest, m)
    }

    /// Finds the subtrees whose keys all start with `prefix`.
    ///
    /// `path` is the key spelled by the segments from the root down to and
    /// including this node. Each returned subtree root is paired with its own
    /// path, so keys can be rebuilt without walking back up the tree.
    pub(crate) fn prefix_roots<'a>(&'a self, path: String, prefix: &str, m: Matcher) -> Vec<(String, &'a Self)> {
        if prefix.is_empty() {
            return vec![(path, self)];
        }

        let full_match = self.children.iter().find_map(|child| {
            m.strip_segment(&child.segment, prefix).map(|rest| (child, rest))
        });

        if let Some((child, rest)) = full_match {
            return child.prefix_roots(path + &child.segment, rest, m);
        }

        // the prefix ends inside a child's segment; siblings never share a
        // first character, so at most one child can match here
        self.children
            .iter()
            .filter(|child| m.overlap(&child.segment, prefix).key == prefix.len())
            .map(|child| (path.clone() + &child.segment, child))
            .collect()
    }

    /// Number of end nodes in this subtree, which is the number of keys stored in it.
    pub(crate) fn count_end_nodes(&self) -> usize {
        if self.is_end_node() {
            return 1;
        }
        self.children.iter().map(Node::count_end_nodes).sum()
    }

    pub(crate) fn end_nodes(&self) -> EndNodes<'_, V> {
        EndNodes::new(vec![self])
    }

    /// Iterates over the keys and values of this subtree.
    /// `path` must be the key spelled from the root down to and including this node.
    pub(crate) fn pairs(&self, path: String) -> NodeIter<'_, V> {
        let item = if self.is_end_node() { self.value.as_ref() } else { None };

        NodeIter {
            path,
            item,
            children_iter: self.children.iter(),
            curr_child_iter: None,
        }
    }

    pub(crate) fn into_pairs(self, path: String) -> NodeIntoIter<V> {
        NodeIntoIter { stack: vec![(path, self)] }
    }
}

/// Depth-first iterator over the end nodes of one or more subtrees,
/// in child order.
#[derive(Debug)]
pub(crate) struct EndNodes<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> EndNodes<'a, V> {
    pub(crate) fn new(mut roots: Vec<&'a Node<V>>) -> Self {
        roots.reverse();
        EndNodes { stack: roots }
    }
}

impl<V> Clone for EndNodes<'_, V> {
    fn clone(&self) -> Self {
        EndNodes { stack: self.stack.clone() }
    }
}

impl<'a, V> Iterator for EndNodes<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_end_node() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

impl<V> FusedIterator for EndNodes<'_, V> {}

/// Iterator over the reconstructed keys and borrowed values of a subtree.
#[derive(Debug)]
pub(crate) struct NodeIter<'a, V> {
    path: String,
    item: Option<&'a V>,
    children_iter: core::slice::Iter<'a, Node<V>>,
    curr_child_iter: Option<Box<NodeIter<'a, V>>>,
}

impl<V> Clone for NodeIter<'_, V> {
    fn clone(&self) -> Self {
        NodeIter {
            path: self.path.clone(),
            item: self.item,
            children_iter: self.children_iter.clone(),
            curr_child_iter: self.curr_child_iter.clone(),
        }
    }
}

impl<'a, V> Iterator for NodeIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        // an end node yields its own entry and has nothing else to visit
        if let Some(value) = self.item.take() {
            return Some((mem::take(&mut self.path), value));
        }

        if let Some(item) = self.curr_child_iter.as_mut().and_then(Iterator::next) {
            return Some(item);
        }

        let next_child = self.children_iter.next()?;
        let next_child_iter = next_child.pairs([self.path.as_str(), &next_child.segment].concat());

        // reuse the allocation if possible
        if let Some(curr_child_iter) = self.curr_child_iter.as_mut() {
            **curr_child_iter = next_child_iter;
        } else {
            self.curr_child_iter = Some(Box::new(next_child_iter));
        }

        self.next()
    }
}

impl<V> FusedIterator for NodeIter<'_, V> {}

/// Iterator over the reconstructed keys and owned values of a subtree.
#[derive(Debug)]
pub(crate) struct NodeIntoIter<V> {
    stack: Vec<(String, Node<V>)>,
}

impl<V: Clone> Clone for NodeIntoIter<V> {
    fn clone(&self) -> Self {
        NodeIntoIter { stack: self.stack.clone() }
    }
}

impl<V> Default for NodeIntoIter<V> {
    fn default() -> Self {
        NodeIntoIter { stack: Vec::new() }
    }
}

impl<V> Iterator for NodeIntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            if node.is_end_node() {
                if let Some(value) = node.value {
                    return Some((path, value));
                }
                continue;
            }
            for child in node.children.into_iter().rev() {
                let child_path = [path.as_str(), &child.segment].concat();
                self.stack.push((child_path, child));
            }
        }
        None
    }
}

impl<V> FusedIterator for NodeIntoIter<V> {}
