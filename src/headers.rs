use crate::util::normalize_lower;
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderEntry {
    name: String,
    values: Vec<String>,
}

/// Multi-valued header set keyed case-insensitively by header name.
///
/// Insertion order is kept for iteration; equality ignores it, matching
/// how HTTP treats distinct header fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, HeaderEntry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_lower(name))
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .get(&normalize_lower(name))
            .map(|entry| entry.values.as_slice())
    }

    /// First value of `name`, the way `http::HeaderMap::get` reads.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        self.entries
            .get_mut(&normalize_lower(name))
            .map(|entry| &mut entry.values)
    }

    /// Replaces every value of `name`.
    pub fn set<N, I, V>(&mut self, name: N, values: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let entry = HeaderEntry {
            values: values.into_iter().map(Into::into).collect(),
            name: name.clone(),
        };
        self.entries.insert(normalize_lower(&name), entry);
    }

    /// Replaces every value of `name` with a single value.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.set(name, [value.into()]);
    }

    pub fn append<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        match self.get_mut(&name) {
            Some(values) => values.push(value.into()),
            None => self.insert(name, value),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.entries
            .shift_remove(&normalize_lower(name))
            .map(|entry| entry.values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Set union of two value lists: existing values first, then configured
/// values not yet present. Duplicates are collapsed on both sides.
pub fn union_values<E, C>(existing: &[E], configured: &[C]) -> Vec<String>
where
    E: AsRef<str>,
    C: AsRef<str>,
{
    let mut union: IndexSet<&str> = IndexSet::with_capacity(existing.len() + configured.len());
    union.extend(existing.iter().map(|value| value.as_ref()));
    union.extend(configured.iter().map(|value| value.as_ref()));
    union.into_iter().map(str::to_owned).collect()
}

/// Merges `configured` into `target` in place.
///
/// Names missing from `target` take the configured values; names already
/// present end up with the union of both value lists. Applying the same
/// merge twice leaves `target` unchanged the second time.
pub fn merge_into(target: &mut Headers, configured: &Headers) {
    for (name, values) in configured.iter() {
        match target.get_mut(name) {
            Some(existing) => {
                let union = union_values(existing.as_slice(), values);
                *existing = union;
            }
            None => {
                let empty: [&str; 0] = [];
                target.set(name, union_values(&empty, values));
            }
        }
    }
}

/// Pure form of [`merge_into`]: returns a new header set and leaves both
/// inputs untouched.
pub fn merge_headers(existing: &Headers, configured: &Headers) -> Headers {
    let mut merged = existing.clone();
    merge_into(&mut merged, configured);
    merged
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
