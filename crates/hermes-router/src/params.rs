//! Path parameter storage.
//!
//! Parameters are stored as (name, value) pairs in a small vector, so the
//! common case of one to four parameters never touches the heap for the
//! pair storage itself.

use smallvec::SmallVec;

/// Pairs stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Decoded path parameters extracted during a lookup.
///
/// Values are percent-decoded request segments. Lookup order is tree order,
/// so a parent parameter always precedes a child parameter.
///
/// # Example
///
/// ```
/// use hermes_router::PathParams;
///
/// let mut params = PathParams::new();
/// params.push("user_id", "42");
/// params.push("file", "a.txt");
///
/// assert_eq!(params.get("user_id"), Some("42"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathParams {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl PathParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no parameters were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over (name, value) pairs in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Removes all parameters, keeping the allocation.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<'a> IntoIterator for &'a PathParams {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut params = PathParams::new();
        params.push("id", "123");
        params.push("name", "alice");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.get("name"), Some("alice"));
        assert_eq!(params.get("unknown"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_iter_preserves_order() {
        let mut params = PathParams::new();
        params.push("outer", "1");
        params.push("inner", "2");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("outer", "1"), ("inner", "2")]);
    }

    #[test]
    fn test_clear() {
        let mut params = PathParams::new();
        params.push("a", "1");
        params.clear();
        assert!(params.is_empty());
    }

    #[test]
    fn test_spill_beyond_inline_capacity() {
        let mut params = PathParams::new();
        for i in 0..10 {
            params.push(format!("key{i}"), format!("value{i}"));
        }
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("key7"), Some("value7"));
    }

    #[test]
    fn test_from_iterator() {
        let params: PathParams = vec![("a".to_string(), "1".to_string())]
            .into_iter()
            .collect();
        assert_eq!(params.get("a"), Some("1"));
    }
}
