//! Ordered keyword/value attribute sets.
//!
//! Table rows and cells keep the raw control words that describe them until
//! the table reconstruction pass has run. Keys are interned against a fixed
//! vocabulary so a set never owns strings.

use phf::phf_set;
use smallvec::SmallVec;

/// Keywords that describe geometry rather than style.
const GEOMETRY_KEYS: &[&str] = &["cellx", "clmgf", "clmrg", "clvmgf", "clvmrg"];

/// Vocabulary of row and cell keywords retained as attributes.
static ATTR_KEYS: phf::Set<&'static str> = phf_set! {
    // Cell geometry and merging
    "cellx", "clmgf", "clmrg", "clvmgf", "clvmrg",
    // Cell alignment and layout
    "clvertalt", "clvertalc", "clvertalb", "cltxlrtb", "cltxtbrl", "clNoWrap", "clFitText",
    // Cell width and padding
    "clwWidth", "clftsWidth", "clpadl", "clpadt", "clpadr", "clpadb",
    "clpadfl", "clpadft", "clpadfr", "clpadfb",
    // Cell shading
    "clcbpat", "clcfpat", "clshdng",
    // Cell borders (style, width, color per side)
    "clbrdrt", "clbrdrb", "clbrdrl", "clbrdrr",
    "clbrdrt_w", "clbrdrb_w", "clbrdrl_w", "clbrdrr_w",
    "clbrdrt_cf", "clbrdrb_cf", "clbrdrl_cf", "clbrdrr_cf",
    // Row geometry
    "trgaph", "trleft", "trrh", "trwWidth", "trftsWidth",
    "trpaddl", "trpaddt", "trpaddr", "trpaddb",
    // Row alignment and flags
    "trql", "trqr", "trqc", "trhdr", "trkeep", "trkeepfollow", "lastrow", "rtlrow",
    "trautofit", "irow", "irowband",
    // Row borders
    "trbrdrt", "trbrdrb", "trbrdrl", "trbrdrr", "trbrdrh", "trbrdrv",
    // Row shading
    "trcbpat", "trcfpat", "trshdng",
};

/// Intern a keyword if it belongs to the attribute vocabulary.
#[inline]
pub fn intern(keyword: &str) -> Option<&'static str> {
    ATTR_KEYS.get_key(keyword).copied()
}

/// Ordered set of `(keyword, value)` pairs with override semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet {
    entries: SmallVec<[(&'static str, i32); 8]>,
}

impl AttrSet {
    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing value in place.
    pub fn set(&mut self, key: &'static str, value: i32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value of `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, v)| v)
    }

    /// Whether `key` is present.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<i32> {
        let position = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Merge `other` into this set; values from `other` win.
    pub fn merge(&mut self, other: &AttrSet) {
        for &(key, value) in &other.entries {
            self.set(key, value);
        }
    }

    /// Copy every non-geometry attribute of `other`.
    pub fn copy_style_from(&mut self, other: &AttrSet) {
        for &(key, value) in &other.entries {
            if !GEOMETRY_KEYS.contains(&key) {
                self.set(key, value);
            }
        }
    }

    /// Iterate over the pairs in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern() {
        assert_eq!(intern("cellx"), Some("cellx"));
        assert_eq!(intern("clbrdrt_w"), Some("clbrdrt_w"));
        assert_eq!(intern("par"), None);
    }

    #[test]
    fn test_set_overrides_in_place() {
        let mut attrs = AttrSet::new();
        attrs.set("cellx", 100);
        attrs.set("clcbpat", 2);
        attrs.set("cellx", 200);

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("cellx"), Some(200));
        assert_eq!(attrs.iter().next(), Some(("cellx", 200)));
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = AttrSet::new();
        base.set("clvertalt", 1);
        base.set("clcbpat", 1);
        let mut other = AttrSet::new();
        other.set("clcbpat", 3);
        other.set("cellx", 500);

        base.merge(&other);
        assert_eq!(base.get("clcbpat"), Some(3));
        assert_eq!(base.get("clvertalt"), Some(1));
        assert_eq!(base.get("cellx"), Some(500));
    }

    #[test]
    fn test_copy_style_skips_geometry() {
        let mut source = AttrSet::new();
        source.set("cellx", 500);
        source.set("clvmgf", 1);
        source.set("clcbpat", 4);

        let mut placeholder = AttrSet::new();
        placeholder.copy_style_from(&source);
        assert_eq!(placeholder.get("clcbpat"), Some(4));
        assert!(!placeholder.contains("cellx"));
        assert!(!placeholder.contains("clvmgf"));
        assert_eq!(source.clone().remove("cellx"), Some(500));
    }
}
