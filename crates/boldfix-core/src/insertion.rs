//! Pending text insertions keyed by source offset

use std::collections::BTreeMap;

/// A single splice of `text` at byte `offset` of the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub text: String,
}

impl Insertion {
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }

    pub fn space(offset: usize) -> Self {
        Self::new(offset, " ")
    }
}

/// Insertions collected from several passes. A second request for an offset
/// that is already taken is dropped.
#[derive(Debug, Clone, Default)]
pub struct InsertionSet {
    by_offset: BTreeMap<usize, String>,
}

impl InsertionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an insertion; returns false when the offset was already taken
    pub fn push(&mut self, insertion: Insertion) -> bool {
        match self.by_offset.entry(insertion.offset) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(insertion.text);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.by_offset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_offset.is_empty()
    }

    /// Apply every insertion to `source`, highest offset first so the
    /// offsets of the remaining ones stay valid. Offsets past the end or off a
    /// char boundary are skipped.
    pub fn apply(&self, source: &str) -> String {
        if self.by_offset.is_empty() {
            return source.to_string();
        }

        let extra: usize = self.by_offset.values().map(String::len).sum();
        let mut result = String::with_capacity(source.len() + extra);
        result.push_str(source);

        for (&offset, text) in self.by_offset.iter().rev() {
            if offset > source.len() || !source.is_char_boundary(offset) {
                continue;
            }
            result.insert_str(offset, text);
        }

        result
    }
}

impl FromIterator<Insertion> for InsertionSet {
    fn from_iter<I: IntoIterator<Item = Insertion>>(iter: I) -> Self {
        let mut set = Self::new();
        for insertion in iter {
            set.push(insertion);
        }
        set
    }
}

/// Apply a list of insertions to `source`, first request per offset winning.
pub fn apply_insertions(source: &str, insertions: &[Insertion]) -> String {
    insertions.iter().cloned().collect::<InsertionSet>().apply(source)
}
