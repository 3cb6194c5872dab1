use indexmap::IndexMap;

/// Delimiter used by the common `type:id` key naming convention.
pub const DEFAULT_DELIMITER: char = ':';

/// Keys partitioned by prefix.
///
/// Groups iterate in order of first appearance of their prefix in the sorted
/// key list, and members keep that global sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroups {
    groups: IndexMap<String, Vec<String>>,
    delimiter: char,
}

impl Default for KeyGroups {
    fn default() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }
}

impl KeyGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            groups: IndexMap::new(),
            delimiter,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Number of keys across all groups.
    pub fn key_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn get(&self, prefix: &str) -> Option<&[String]> {
        self.groups.get(prefix).map(Vec::as_slice)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(prefix, keys)| (prefix.as_str(), keys.as_slice()))
    }

    /// Prefix of the group holding `key`, if the key is listed.
    pub fn group_of(&self, key: &str) -> Option<&str> {
        let (prefix, keys) = self.groups.get_key_value(prefix_of(key, self.delimiter))?;
        keys.iter().any(|k| k == key).then_some(prefix.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.group_of(key).is_some()
    }

    fn push(&mut self, key: String) {
        let prefix = prefix_of(&key, self.delimiter).to_string();
        self.groups.entry(prefix).or_default().push(key);
    }
}

/// The grouping label of `key`: everything before the first `delimiter`, or
/// the whole key when it has none.
pub fn prefix_of(key: &str, delimiter: char) -> &str {
    key.split_once(delimiter).map_or(key, |(prefix, _)| prefix)
}

/// Sort `keys` and partition them by prefix.
pub fn group_keys(keys: impl IntoIterator<Item = String>, delimiter: char) -> KeyGroups {
    let mut keys: Vec<String> = keys.into_iter().collect();
    keys.sort_unstable();

    let mut groups = KeyGroups::with_delimiter(delimiter);
    for key in keys {
        groups.push(key);
    }
    groups
}
