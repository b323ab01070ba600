//! Static lookup table with a built-in default.
//!
//! Keys are compared with exact, case-sensitive string equality. A miss is
//! never an error: [`FallbackTable::get_or_default`] hands back the table's
//! fallback value instead.

#[derive(Debug)]
pub struct FallbackTable<V: 'static> {
    entries: &'static [(&'static str, V)],
    fallback: V,
}

impl<V: 'static> FallbackTable<V> {
    pub const fn new(entries: &'static [(&'static str, V)], fallback: V) -> Self {
        Self { entries, fallback }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value)
    }

    pub fn get_or_default(&self, key: &str) -> &V {
        self.get(key).unwrap_or(&self.fallback)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn fallback(&self) -> &V {
        &self.fallback
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLOURS: FallbackTable<&str> =
        FallbackTable::new(&[("red", "#f00"), ("green", "#0f0")], "#000");

    #[test]
    fn test_hit_and_miss() {
        assert_eq!(*COLOURS.get_or_default("red"), "#f00");
        assert_eq!(*COLOURS.get_or_default("Red"), "#000");
        assert_eq!(COLOURS.get("blue"), None);
        assert!(COLOURS.contains_key("green"));
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        assert_eq!(COLOURS.keys().collect::<Vec<_>>(), vec!["red", "green"]);
        assert_eq!(COLOURS.len(), 2);
        assert!(!COLOURS.is_empty());
    }
}
