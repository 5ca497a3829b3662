//! RTF list and numbering support.
//!
//! RTF uses a two-table system: the list table holds numbering templates,
//! and the list override table maps the `\lsN` ids used by paragraphs onto
//! those templates.

/// List level type (bullet or numbered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListLevelType {
    /// Arabic numerals (1, 2, 3...)
    #[default]
    Decimal,
    /// Uppercase Roman numerals (I, II, III...)
    UpperRoman,
    /// Lowercase Roman numerals (i, ii, iii...)
    LowerRoman,
    /// Uppercase letters (A, B, C...)
    UpperLetter,
    /// Lowercase letters (a, b, c...)
    LowerLetter,
    /// Ordinal numbers (1st, 2nd, 3rd...)
    Ordinal,
    /// Cardinal text (One, Two, Three...)
    CardinalText,
    /// Ordinal text (First, Second, Third...)
    OrdinalText,
    /// Bullet (•, ○, ■, etc.)
    Bullet,
    /// No numbering
    None,
    /// Any other `\levelnfc` value
    Other(i32),
}

impl ListLevelType {
    /// Map a `\levelnfcN` value to a level type.
    pub fn from_nfc(value: i32) -> Self {
        match value {
            0 => Self::Decimal,
            1 => Self::UpperRoman,
            2 => Self::LowerRoman,
            3 => Self::UpperLetter,
            4 => Self::LowerLetter,
            5 => Self::Ordinal,
            6 => Self::CardinalText,
            7 => Self::OrdinalText,
            23 => Self::Bullet,
            255 => Self::None,
            other => Self::Other(other),
        }
    }
}

/// List level justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListJustification {
    /// Left-aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

impl ListJustification {
    /// Map a `\leveljcN` value.
    pub fn from_jc(value: i32) -> Self {
        match value {
            1 => Self::Center,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}

/// A single level in a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLevel {
    /// Level number (0-8, where 0 is the top level)
    pub level: u8,
    /// Level type (bullet, decimal, etc.)
    pub level_type: ListLevelType,
    /// Literal level text (the bullet glyph or number template)
    pub text: String,
    /// Positions of level placeholders within `text` (`\levelnumbers`)
    pub numbers: Vec<u8>,
    /// Start value for numbering
    pub start_at: i32,
    /// Justification
    pub justification: ListJustification,
    /// Character after the number: 0 tab, 1 space, 2 nothing
    pub follow: u8,
    /// Use legal numbering
    pub legal: bool,
    /// Do not restart after a higher level
    pub no_restart: bool,
}

impl ListLevel {
    /// Create a new list level
    #[inline]
    pub fn new(level: u8) -> Self {
        Self {
            level,
            level_type: ListLevelType::default(),
            text: String::new(),
            numbers: Vec::new(),
            start_at: 1,
            justification: ListJustification::default(),
            follow: 0,
            legal: false,
            no_restart: false,
        }
    }

    /// Check if this level is a bullet
    #[inline]
    pub fn is_bullet(&self) -> bool {
        matches!(self.level_type, ListLevelType::Bullet)
    }

    /// Check if this level is numbered
    #[inline]
    pub fn is_numbered(&self) -> bool {
        !self.is_bullet() && self.level_type != ListLevelType::None
    }

    /// Set the level text from the raw `\leveltext` destination content.
    ///
    /// The first character is a length prefix and a trailing `;` terminates
    /// the text.
    pub fn set_raw_text(&mut self, raw: &str) {
        let mut chars = raw.chars();
        let declared = chars.next().map(|c| c as usize);
        let body: String = chars.collect();
        let body = body.strip_suffix(';').unwrap_or(&body);
        self.text = match declared {
            Some(length) if length <= body.chars().count() => body.chars().take(length).collect(),
            _ => body.to_string(),
        };
    }

    /// Set the placeholder positions from the raw `\levelnumbers` content.
    pub fn set_raw_numbers(&mut self, raw: &str) {
        self.numbers = raw
            .trim_end_matches(';')
            .chars()
            .filter_map(|c| u8::try_from(u32::from(c)).ok())
            .collect();
    }
}

/// RTF list definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    /// Unique list identifier
    pub id: i32,
    /// List template ID
    pub template_id: i32,
    /// Whether this is a simple list (single level)
    pub simple: bool,
    /// Hybrid list flag
    pub hybrid: bool,
    /// List name
    pub name: Option<String>,
    /// List levels (up to 9 levels)
    pub levels: Vec<ListLevel>,
}

impl List {
    /// Create a new list
    #[inline]
    pub fn new(id: i32) -> Self {
        Self {
            id,
            template_id: 0,
            simple: false,
            hybrid: false,
            name: None,
            levels: Vec::new(),
        }
    }

    /// Get a level by index
    #[inline]
    pub fn level(&self, level: u8) -> Option<&ListLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// List override entry (instance of a list)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOverride {
    /// `\ls` id referenced by paragraphs
    pub id: i32,
    /// Template list id this override points to
    pub list_id: i32,
    /// Number of level overrides (`\listoverridecount`)
    pub override_count: i32,
}

impl ListOverride {
    /// Create a new list override
    #[inline]
    pub fn new(id: i32, list_id: i32) -> Self {
        Self {
            id,
            list_id,
            override_count: 0,
        }
    }
}

/// List table containing all list definitions
#[derive(Debug, Clone, Default)]
pub struct ListTable {
    lists: Vec<List>,
}

impl ListTable {
    /// Add a list to the table
    #[inline]
    pub fn add(&mut self, list: List) {
        self.lists.push(list);
    }

    /// Get a list by ID
    #[inline]
    pub fn get(&self, id: i32) -> Option<&List> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Get all lists
    #[inline]
    pub fn lists(&self) -> &[List] {
        &self.lists
    }
}

/// List override table containing list instances
#[derive(Debug, Clone, Default)]
pub struct ListOverrideTable {
    overrides: Vec<ListOverride>,
}

impl ListOverrideTable {
    /// Add a list override
    #[inline]
    pub fn add(&mut self, entry: ListOverride) {
        self.overrides.push(entry);
    }

    /// Get a list override by id
    #[inline]
    pub fn get(&self, id: i32) -> Option<&ListOverride> {
        self.overrides.iter().find(|o| o.id == id)
    }

    /// Get all overrides
    #[inline]
    pub fn overrides(&self) -> &[ListOverride] {
        &self.overrides
    }

    /// Follow an override id to its list definition.
    pub fn resolve<'t>(&self, id: i32, lists: &'t ListTable) -> Option<&'t List> {
        self.get(id).and_then(|entry| lists.get(entry.list_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_text_length_prefix() {
        let mut level = ListLevel::new(0);
        level.set_raw_text("\u{2}\u{0}.;");
        assert_eq!(level.text, "\u{0}.");

        level.set_raw_text("\u{1}\u{2022};");
        assert_eq!(level.text, "\u{2022}");
    }

    #[test]
    fn test_level_numbers() {
        let mut level = ListLevel::new(1);
        level.set_raw_numbers("\u{1}\u{3};");
        assert_eq!(level.numbers, vec![1, 3]);
    }

    #[test]
    fn test_nfc_mapping() {
        assert_eq!(ListLevelType::from_nfc(23), ListLevelType::Bullet);
        assert_eq!(ListLevelType::from_nfc(4), ListLevelType::LowerLetter);
        assert_eq!(ListLevelType::from_nfc(47), ListLevelType::Other(47));
    }

    #[test]
    fn test_override_resolution() {
        let mut lists = ListTable::default();
        lists.add(List::new(42));
        let mut overrides = ListOverrideTable::default();
        overrides.add(ListOverride::new(1, 42));

        assert_eq!(overrides.resolve(1, &lists).map(|l| l.id), Some(42));
        assert!(overrides.resolve(2, &lists).is_none());
    }
}
