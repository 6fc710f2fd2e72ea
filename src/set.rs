//! A set of strings, based on a radix tree.

use core::iter::FusedIterator;
use crate::case::CaseSensitivity;
use crate::error::Result;
use crate::key::KeyArg;
use crate::map::{RadixMap, Keys, IntoKeys, PrefixIter};


/// A set of strings based on a radix tree.
///
/// Like [`RadixMap`], iteration follows the shape of the tree and is not sorted.
#[derive(Clone, Debug, Default)]
pub struct RadixSet {
    map: RadixMap<()>,
}

impl RadixSet {
    /// Creates an empty, case-sensitive set. The same as `Default`.
    pub const fn new() -> Self {
        RadixSet { map: RadixMap::new() }
    }

    /// Creates an empty set that ignores case when comparing items.
    pub const fn case_insensitive() -> Self {
        RadixSet { map: RadixMap::case_insensitive() }
    }

    /// Creates an empty set with the given comparison mode.
    pub const fn with_case_sensitivity(sensitivity: CaseSensitivity) -> Self {
        RadixSet { map: RadixMap::with_case_sensitivity(sensitivity) }
    }

    /// The comparison mode this set was created with.
    pub const fn case_sensitivity(&self) -> CaseSensitivity {
        self.map.case_sensitivity()
    }

    /// Returns the number of items in this set.
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if and only if this set is empty.
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts the item if it did not exist.
    ///
    /// Returns `true` if an insertion happened, and `false` if the item already existed.
    pub fn insert<K: KeyArg>(&mut self, item: K) -> Result<bool> {
        self.map.add(item, ())
    }

    /// Returns `true` if the item is found in the set, `false` otherwise.
    pub fn contains<K: KeyArg>(&self, item: K) -> Result<bool> {
        self.map.contains_key(item)
    }

    /// Returns an iterator over the items.
    pub fn iter(&self) -> Iter<'_> {
        Iter { keys: self.map.keys() }
    }

    /// Returns an iterator over the items that start with `prefix`.
    pub fn find_by_prefix<P: KeyArg>(&self, prefix: P) -> Result<PrefixItems<'_>> {
        let iter = self.map.prefix_iter(prefix)?;
        Ok(PrefixItems { iter })
    }

    /// Adds all items of `other` to `self`.
    pub fn union_in_place<I>(&mut self, other: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.map.extend(other.into_iter().map(|item| (item, ())));
    }
}

impl<K, const N: usize> From<[K; N]> for RadixSet
where
    K: AsRef<str>,
{
    fn from(items: [K; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<K: AsRef<str>> FromIterator<K> for RadixSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = RadixSet::default();
        set.extend(iter);
        set
    }
}

impl<K: AsRef<str>> Extend<K> for RadixSet {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.union_in_place(iter);
    }
}

impl IntoIterator for RadixSet {
    type IntoIter = IntoIter;
    type Item = String;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { keys: self.map.into_keys() }
    }
}

impl<'a> IntoIterator for &'a RadixSet {
    type IntoIter = Iter<'a>;
    type Item = String;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the owned items of this set.
#[derive(Debug)]
pub struct IntoIter {
    keys: IntoKeys<()>,
}

impl Iterator for IntoIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl FusedIterator for IntoIter {}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// An iterator over the items of this set.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    keys: Keys<'a, ()>,
}

impl Iterator for Iter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl FusedIterator for Iter<'_> {}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// An iterator over the items of this set that start with a given prefix.
#[derive(Clone, Debug)]
pub struct PrefixItems<'a> {
    iter: PrefixIter<'a, ()>,
}

impl Iterator for PrefixItems<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(item, _unit)| item)
    }
}

impl FusedIterator for PrefixItems<'_> {}

#[cfg(feature = "serde")]
mod serde {
    use core::fmt;
    use serde::{
        ser::{Serialize, Serializer},
        de::{Deserialize, Deserializer, Visitor, SeqAccess},
    };
    use crate::set::RadixSet;


    impl Serialize for RadixSet {
        fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
            ser.collect_seq(self)
        }
    }

    /// Deserializes into a case-sensitive set.
    impl<'de> Deserialize<'de> for RadixSet {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            de.deserialize_seq(RadixSetVisitor)
        }
    }


    struct RadixSetVisitor;

    impl<'de> Visitor<'de> for RadixSetVisitor {
        type Value = RadixSet;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("sequence of strings")
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut acc: A) -> Result<Self::Value, A::Error> {
            let mut set = RadixSet::new();

            while let Some(item) = acc.next_element::<String>()? {
                set.map.insert_str(&item, (), false);
            }

            Ok(set)
        }
    }
}
