//! Column name lookup honoring the schema match's case option.

use std::collections::HashMap;

/// Maps normalized column names to their position and original spelling.
///
/// With case-insensitive matching, names are folded to lowercase. The first
/// spelling of a folded name wins.
#[derive(Debug, Clone, Default)]
pub(crate) struct ColumnIndex {
    case_sensitive: bool,
    inner: HashMap<String, usize>,
}

impl ColumnIndex {
    pub(crate) fn new<I, S>(names: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self {
            case_sensitive,
            inner: HashMap::new(),
        };
        for (position, name) in names.into_iter().enumerate() {
            let key = index.key(name.as_ref());
            index.inner.entry(key).or_insert(position);
        }
        index
    }

    pub(crate) fn key(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }

    /// Position of `name`, if present.
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.inner.get(&self.key(name)).copied()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_lookup() {
        let index = ColumnIndex::new(["Ozone", "Wind", "wind"], false);
        assert_eq!(index.position("WIND"), Some(1));
        assert_eq!(index.len(), 2);
        assert!(!ColumnIndex::new(["Ozone"], true).contains("ozone"));
    }
}
