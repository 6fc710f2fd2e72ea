//! A map from strings to arbitrary values, based on a radix tree.

use core::iter::FusedIterator;
use core::ops::Index;
use crate::case::{CaseSensitivity, Matcher};
use crate::error::{Error, Result};
use crate::key::{self, KeyArg};
use crate::node::{EndNodes, Insertion, Node, NodeIntoIter, NodeIter};


/// A map from strings to arbitrary values, based on a radix tree.
///
/// Keys are compared either exactly or case-insensitively, as chosen at
/// construction time. Iteration order follows the shape of the tree, which
/// depends on the order of insertions; it is not sorted.
///
/// The map is not synchronized. Mutation requires `&mut self`, and all
/// iterators borrow the map, so a tree cannot be restructured while it is
/// being traversed.
#[derive(Clone, Debug)]
pub struct RadixMap<V> {
    root: Node<V>,
    matcher: Matcher,
    len: usize,
}

impl<V> Default for RadixMap<V> {
    fn default() -> Self {
        RadixMap::new()
    }
}

impl<V> RadixMap<V> {
    /// Creates an empty, case-sensitive map. The same as `Default`.
    pub const fn new() -> Self {
        RadixMap::with_case_sensitivity(CaseSensitivity::Sensitive)
    }

    /// Creates an empty map that ignores case when comparing keys.
    pub const fn case_insensitive() -> Self {
        RadixMap::with_case_sensitivity(CaseSensitivity::Insensitive)
    }

    /// Creates an empty map with the given comparison mode.
    pub const fn with_case_sensitivity(sensitivity: CaseSensitivity) -> Self {
        RadixMap {
            root: Node::root(),
            matcher: Matcher::new(sensitivity),
            len: 0,
        }
    }

    /// The comparison mode this map was created with.
    pub const fn case_sensitivity(&self) -> CaseSensitivity {
        self.matcher.sensitivity()
    }

    /// Returns the number of entries (key-value pairs) in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if and only if this map contains no key-value pairs.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a key-value pair unless the key is already present.
    ///
    /// Returns `true` if an insertion happened, and `false` if the key
    /// already existed, in which case the stored value is left untouched.
    pub fn add<K: KeyArg>(&mut self, key: K, value: V) -> Result<bool> {
        let key = key::require(&key, "key")?;

        Ok(self.insert_str(key, value, false).is_some())
    }

    /// Inserts a key-value pair, overwriting the value of an existing key.
    ///
    /// Returns the previous value, if any.
    pub fn set<K: KeyArg>(&mut self, key: K, value: V) -> Result<Option<V>> {
        let key = key::require(&key, "key")?;

        Ok(self.insert_str(key, value, true).flatten())
    }

    /// `None` if nothing was inserted, `Some(previous)` otherwise.
    pub(crate) fn insert_str(&mut self, key: &str, value: V, overwrite: bool) -> Option<Option<V>> {
        match self.root.insert(key, value, overwrite, self.matcher) {
            Insertion::Inserted => {
                self.len += 1;
                debug_assert_eq!(self.len, self.root.count_end_nodes());
                Some(None)
            }
            Insertion::Replaced(previous) => Some(Some(previous)),
            Insertion::Kept => None,
        }
    }

    /// Returns `true` if and only if the given key is found in the map.
    pub fn contains_key<K: KeyArg>(&self, key: K) -> Result<bool> {
        let key = key::require(&key, "key")?;

        Ok(self.get_str(key).is_some())
    }

    /// Returns a reference to the value, or `None` if the key is absent.
    pub fn try_get<K: KeyArg>(&self, key: K) -> Result<Option<&V>> {
        let key = key::require(&key, "key")?;

        Ok(self.get_str(key))
    }

    /// Returns a mutable reference to the value, or `None` if the key is absent.
    pub fn try_get_mut<K: KeyArg>(&mut self, key: K) -> Result<Option<&mut V>> {
        let key = key::require(&key, "key")?;

        Ok(self.root.find_mut(key, self.matcher).and_then(Node::value_mut))
    }

    /// Returns a reference to the value, or [`Error::NotFound`] if the key is absent.
    pub fn get<K: KeyArg>(&self, key: K) -> Result<&V> {
        let key = key::require(&key, "key")?;

        self.get_str(key).ok_or_else(|| Error::NotFound { key: key.to_owned() })
    }

    pub(crate) fn get_str(&self, key: &str) -> Option<&V> {
        self.root.find(key, self.matcher).and_then(Node::value)
    }

    /// An iterator over the keys and references to the corresponding values.
    ///
    /// Keys are rebuilt from the tree, so they are yielded as owned strings.
    /// Under case-insensitive comparison, the spelling of a shared prefix is
    /// the one that was inserted first.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { iter: self.root.pairs(String::new()), len: self.len }
    }

    /// An iterator over the keys.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator over references to the values.
    pub fn values(&self) -> Values<'_, V> {
        Values { iter: self.root.end_nodes(), len: self.len }
    }

    /// An iterator over the owned keys.
    pub fn into_keys(self) -> IntoKeys<V> {
        IntoKeys { iter: self.into_iter() }
    }

    /// An iterator over the owned values.
    pub fn into_values(self) -> IntoValues<V> {
        IntoValues { iter: self.into_iter() }
    }

    /// An iterator over the values of all keys that start with `prefix`,
    /// compared under the map's case rule. The empty prefix yields every value.
    pub fn find_by_prefix<P: KeyArg>(&self, prefix: P) -> Result<FindByPrefix<'_, V>> {
        let prefix = key::require(&prefix, "prefix")?;
        let roots = self.root.prefix_roots(String::new(), prefix, self.matcher);

        Ok(FindByPrefix {
            iter: EndNodes::new(roots.into_iter().map(|(_path, node)| node).collect()),
        })
    }

    /// An iterator over the keys and values of all keys that start with `prefix`.
    pub fn prefix_iter<P: KeyArg>(&self, prefix: P) -> Result<PrefixIter<'_, V>> {
        let prefix = key::require(&prefix, "prefix")?;
        let roots = self.root.prefix_roots(String::new(), prefix, self.matcher);

        Ok(PrefixIter {
            roots: roots.into_iter(),
            curr_root_iter: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &Node<V> {
        &self.root
    }
}

impl<V, Q> Index<&Q> for RadixMap<V>
where
    Q: ?Sized + AsRef<str>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &Self::Output {
        self.get_str(key.as_ref()).expect("key not found in RadixMap")
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for RadixMap<V>
where
    K: AsRef<str>,
{
    fn from(items: [(K, V); N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RadixMap<V>
where
    K: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = RadixMap::default();
        map.extend(iter);
        map
    }
}

/// Later values overwrite earlier ones for the same key.
impl<K, V> Extend<(K, V)> for RadixMap<V>
where
    K: AsRef<str>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert_str(key.as_ref(), value, true);
        }
    }
}

impl<V> IntoIterator for RadixMap<V> {
    type IntoIter = IntoIter<V>;
    type Item = (String, V);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.root.into_pairs(String::new()),
            len: self.len,
        }
    }
}

impl<'a, V> IntoIterator for &'a RadixMap<V> {
    type IntoIter = Iter<'a, V>;
    type Item = (String, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys and borrowed values of the map.
#[derive(Debug)]
pub struct Iter<'a, V> {
    iter: NodeIter<'a, V>,
    len: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter { iter: self.iter.clone(), len: self.len }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.len -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.len
    }
}

/// Iterator over the keys and owned values of the map.
#[derive(Debug)]
pub struct IntoIter<V> {
    iter: NodeIntoIter<V>,
    len: usize,
}

impl<V> Default for IntoIter<V> {
    fn default() -> Self {
        IntoIter { iter: NodeIntoIter::default(), len: 0 }
    }
}

impl<V: Clone> Clone for IntoIter<V> {
    fn clone(&self) -> Self {
        IntoIter { iter: self.iter.clone(), len: self.len }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        self.len -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> ExactSizeIterator for IntoIter<V> {
    fn len(&self) -> usize {
        self.len
    }
}

/// Iterator over the keys of the map.
#[derive(Debug)]
pub struct Keys<'a, V> {
    iter: Iter<'a, V>,
}

impl<V> Clone for Keys<'_, V> {
    fn clone(&self) -> Self {
        Keys { iter: self.iter.clone() }
    }
}

impl<V> Iterator for Keys<'_, V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _v)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> FusedIterator for Keys<'_, V> {}

impl<V> ExactSizeIterator for Keys<'_, V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator over the borrowed values of the map.
///
/// Visits the end nodes directly, without rebuilding any keys.
#[derive(Debug)]
pub struct Values<'a, V> {
    iter: EndNodes<'a, V>,
    len: usize,
}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Values { iter: self.iter.clone(), len: self.len }
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.iter.by_ref().find_map(Node::value)?;
        self.len -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<V> FusedIterator for Values<'_, V> {}

impl<V> ExactSizeIterator for Values<'_, V> {
    fn len(&self) -> usize {
        self.len
    }
}

/// Iterator over the owned keys of the map.
#[derive(Debug)]
pub struct IntoKeys<V> {
    iter: IntoIter<V>,
}

impl<V> Iterator for IntoKeys<V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(k, _v)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> FusedIterator for IntoKeys<V> {}

impl<V> ExactSizeIterator for IntoKeys<V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator over the owned values of the map.
#[derive(Debug)]
pub struct IntoValues<V> {
    iter: IntoIter<V>,
}

impl<V> Iterator for IntoValues<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_k, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<V> FusedIterator for IntoValues<V> {}

impl<V> ExactSizeIterator for IntoValues<V> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator over the values whose keys start with a given prefix.
#[derive(Debug)]
pub struct FindByPrefix<'a, V> {
    iter: EndNodes<'a, V>,
}

impl<V> Clone for FindByPrefix<'_, V> {
    fn clone(&self) -> Self {
        FindByPrefix { iter: self.iter.clone() }
    }
}

impl<'a, V> Iterator for FindByPrefix<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.by_ref().find_map(Node::value)
    }
}

impl<V> FusedIterator for FindByPrefix<'_, V> {}

/// Iterator over the keys and values of entries whose keys start with a given prefix.
#[derive(Debug)]
pub struct PrefixIter<'a, V> {
    roots: std::vec::IntoIter<(String, &'a Node<V>)>,
    curr_root_iter: Option<NodeIter<'a, V>>,
}

impl<V> Clone for PrefixIter<'_, V> {
    fn clone(&self) -> Self {
        PrefixIter {
            roots: self.roots.clone(),
            curr_root_iter: self.curr_root_iter.clone(),
        }
    }
}

impl<'a, V> Iterator for PrefixIter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.curr_root_iter.as_mut().and_then(Iterator::next) {
                return Some(item);
            }

            let (path, node) = self.roots.next()?;
            self.curr_root_iter = Some(node.pairs(path));
        }
    }
}

impl<V> FusedIterator for PrefixIter<'_, V> {}


#[cfg(feature = "serde")]
mod serde {
    use core::fmt;
    use core::marker::PhantomData;
    use serde::{
        ser::{Serialize, Serializer},
        de::{Deserialize, Deserializer, Visitor, MapAccess},
    };
    use crate::map::RadixMap;


    impl<V: Serialize> Serialize for RadixMap<V> {
        fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
            ser.collect_map(self)
        }
    }

    /// Deserializes into a case-sensitive map. Duplicate keys keep the last value.
    impl<'de, V: Deserialize<'de>> Deserialize<'de> for RadixMap<V> {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            de.deserialize_map(RadixMapVisitor(PhantomData))
        }
    }


    struct RadixMapVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for RadixMapVisitor<V> {
        type Value = RadixMap<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("map with string keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut acc: A) -> Result<Self::Value, A::Error> {
            let mut map = RadixMap::new();

            while let Some((key, value)) = acc.next_entry::<String, V>()? {
                map.insert_str(&key, value, true);
            }

            Ok(map)
        }
    }
}
