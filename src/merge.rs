//! Union-by-name for property lists and typedef lists.
//!
//! Every merge in the expander follows the same rule: walk the inputs in
//! order, keep the first entry seen for each name, drop the rest. Entries
//! without a name share a single "unnamed" slot.

use crate::model::{DocRecord, Property};
use std::collections::HashSet;

/// Anything that can be de-duplicated by name.
pub trait Named {
    fn key(&self) -> Option<&str>;
}

impl Named for Property {
    fn key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Named for DocRecord {
    fn key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Union `first` and `second` by name, earlier entries winning.
///
/// Duplicates inside `first` are dropped too. Insertion order is preserved.
pub fn union<T: Named>(first: Vec<T>, second: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen: HashSet<Option<String>> = HashSet::new();
    let mut out = Vec::with_capacity(first.len());

    for item in first.into_iter().chain(second) {
        if seen.insert(item.key().map(str::to_string)) {
            out.push(item);
        }
    }

    out
}
