use serde::Serialize;
use serde::ser::SerializeMap;

/// Ordered mapping from platform key to candidate URLs.
///
/// Keys are stored lower-cased and are unique; re-inserting a key replaces
/// its URLs in place without moving it. The first URL of a sequence is the
/// preferred one for that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformUrlMap {
    entries: Vec<(String, Vec<String>)>,
}

impl PlatformUrlMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, key: &str, urls: Vec<String>) {
        let key = key.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = urls,
            None => self.entries.push((key, urls)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, urls)| urls.as_slice())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, urls)| (k.as_str(), urls.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PlatformUrlMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, urls) in &self.entries {
            map.serialize_entry(key, urls)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lowercases_and_keeps_order() {
        let mut map = PlatformUrlMap::new();
        map.insert("Linux-X86_64", vec!["https://example.com/a".into()]);
        map.insert("darwin", vec!["https://example.com/b".into()]);
        map.insert("all", vec!["https://example.com/c".into()]);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["linux-x86_64", "darwin", "all"]);
        assert_eq!(
            map.get("LINUX-x86_64"),
            Some(&["https://example.com/a".to_string()][..])
        );
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut map = PlatformUrlMap::new();
        map.insert("darwin", vec!["https://example.com/old".into()]);
        map.insert("all", vec!["https://example.com/all".into()]);
        map.insert("DARWIN", vec!["https://example.com/new".into()]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().next(), Some("darwin"));
        assert_eq!(
            map.get("darwin"),
            Some(&["https://example.com/new".to_string()][..])
        );
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut map = PlatformUrlMap::new();
        map.insert("win", vec!["https://example.com/w.zip".into()]);
        map.insert("all", vec!["https://example.com/a.zip".into()]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"win":["https://example.com/w.zip"],"all":["https://example.com/a.zip"]}"#
        );
    }
}
