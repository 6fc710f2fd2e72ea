//! Case sensitivity of key comparisons.

/// How keys are compared against each other.
///
/// The setting is chosen when a map or set is constructed and applies to
/// every comparison the tree ever makes; it cannot be changed afterwards.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseSensitivity {
    /// Keys are compared character by character, exactly.
    #[default]
    Sensitive,
    /// Characters are compared after conversion to upper case,
    /// so `"Hello"`, `"hello"` and `"HELLO"` denote the same key.
    Insensitive,
}

/// Number of bytes matched in a node's segment and in a key, respectively.
///
/// The two can differ under case folding, because a character and its
/// case-folded counterpart do not always have the same UTF-8 width.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub(crate) struct Overlap {
    pub(crate) segment: usize,
    pub(crate) key: usize,
}

/// The comparison strategy, captured once per tree and handed to every node.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Matcher {
    sensitivity: CaseSensitivity,
    eq: fn(char, char) -> bool,
}

impl Matcher {
    pub(crate) const fn new(sensitivity: CaseSensitivity) -> Self {
        let eq: fn(char, char) -> bool = match sensitivity {
            CaseSensitivity::Sensitive => ordinal_eq,
            CaseSensitivity::Insensitive => ignore_case_eq,
        };

        Matcher { sensitivity, eq }
    }

    pub(crate) const fn sensitivity(self) -> CaseSensitivity {
        self.sensitivity
    }

    /// Length of the longest common prefix of `segment` and `key`.
    pub(crate) fn overlap(self, segment: &str, key: &str) -> Overlap {
        let mut overlap = Overlap::default();

        for (s, k) in segment.chars().zip(key.chars()) {
            if !(self.eq)(s, k) {
                break;
            }
            overlap.segment += s.len_utf8();
            overlap.key += k.len_utf8();
        }

        overlap
    }

    /// If the whole of a non-empty `segment` is a prefix of `key`,
    /// returns the rest of `key`.
    pub(crate) fn strip_segment<'k>(self, segment: &str, key: &'k str) -> Option<&'k str> {
        if segment.is_empty() {
            return None;
        }

        let overlap = self.overlap(segment, key);

        (overlap.segment == segment.len()).then(|| &key[overlap.key..])
    }
}

fn ordinal_eq(a: char, b: char) -> bool {
    a == b
}

fn ignore_case_eq(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}
