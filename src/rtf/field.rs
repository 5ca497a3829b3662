//! RTF field support (hyperlinks, cross-references, etc.).
//!
//! RTF fields are structured as:
//! `{\field{\*\fldinst FIELD_INSTRUCTION}{\fldrslt FIELD_RESULT}}`
//!
//! The instruction is parsed into a [`Field`]; the result stays in the
//! document tree as the field node's children.

/// Field type in RTF documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Hyperlink field
    Hyperlink,
    /// Cross-reference
    Reference,
    /// Page number
    Page,
    /// Date/time
    Date,
    /// Table of contents
    Toc,
    /// Bookmark
    Bookmark,
    /// Equation/formula
    Equation,
    /// Index entry
    Index,
    /// Embedded picture reference
    IncludePicture,
    /// Unknown or custom field
    Unknown,
}

impl FieldType {
    /// Classify a field by the first word of its instruction.
    pub fn from_command(command: &str) -> Self {
        match command.to_ascii_uppercase().as_str() {
            "HYPERLINK" => Self::Hyperlink,
            "REF" | "PAGEREF" | "NOTEREF" => Self::Reference,
            "PAGE" | "NUMPAGES" | "SECTIONPAGES" => Self::Page,
            "DATE" | "TIME" | "CREATEDATE" | "SAVEDATE" | "PRINTDATE" => Self::Date,
            "TOC" => Self::Toc,
            "BOOKMARK" => Self::Bookmark,
            "EQ" => Self::Equation,
            "INDEX" | "XE" => Self::Index,
            "INCLUDEPICTURE" => Self::IncludePicture,
            _ => Self::Unknown,
        }
    }
}

/// Field modifiers given on the `\field` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFlags {
    /// `\flddirty`
    pub dirty: bool,
    /// `\fldedit`
    pub edited: bool,
    /// `\fldlock`
    pub locked: bool,
    /// `\fldpriv`
    pub private: bool,
}

/// Parsed RTF field instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field type
    pub field_type: FieldType,
    /// Field instruction (the command), trimmed
    pub instruction: String,
    /// Field modifiers
    pub flags: FieldFlags,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            field_type: FieldType::Unknown,
            instruction: String::new(),
            flags: FieldFlags::default(),
        }
    }
}

impl Field {
    /// Parse a field instruction to extract the type.
    pub fn parse_instruction(instruction: &str) -> Self {
        let trimmed = instruction.trim();
        let command = trimmed
            .split(|c: char| c.is_whitespace() || c == '\\' || c == '"')
            .find(|word| !word.is_empty())
            .unwrap_or_default();

        Self {
            field_type: FieldType::from_command(command),
            instruction: trimmed.to_string(),
            flags: FieldFlags::default(),
        }
    }

    /// Instruction text after the command word.
    fn arguments(&self) -> &str {
        let inst = self.instruction.trim_start();
        inst.find(char::is_whitespace)
            .map_or("", |split| inst[split..].trim_start())
    }

    /// Extract the target of a HYPERLINK field.
    ///
    /// `HYPERLINK "url" \o "tooltip"` yields `url`; a `\l "anchor"` switch
    /// yields `url#anchor` (or `#anchor` without a url).
    pub fn url(&self) -> Option<String> {
        if self.field_type != FieldType::Hyperlink {
            return None;
        }

        let mut target = None;
        let mut anchor = None;
        let mut words = split_arguments(self.arguments()).into_iter();
        while let Some(word) = words.next() {
            match word.as_str() {
                "\\l" => anchor = words.next(),
                switch if switch.starts_with('\\') => {
                    // Switches with a value: \o tooltip, \t target frame
                    if matches!(switch, "\\o" | "\\t") {
                        words.next();
                    }
                },
                _ if target.is_none() => target = Some(word),
                _ => {},
            }
        }

        match (target, anchor) {
            (Some(url), Some(anchor)) => Some(format!("{url}#{anchor}")),
            (Some(url), None) => Some(url),
            (None, Some(anchor)) => Some(format!("#{anchor}")),
            (None, None) => None,
        }
    }

    /// Extract the bookmark name of a REF-like field.
    pub fn bookmark(&self) -> Option<String> {
        if self.field_type != FieldType::Reference {
            return None;
        }
        split_arguments(self.arguments())
            .into_iter()
            .find(|word| !word.starts_with('\\'))
    }
}

/// Split field arguments into words, honouring double quotes.
fn split_arguments(arguments: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in arguments.chars() {
        match ch {
            '"' => {
                if quoted {
                    words.push(std::mem::take(&mut current));
                } else if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                quoted = !quoted;
            },
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            },
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hyperlink() {
        let field = Field::parse_instruction(r#" HYPERLINK "https://example.com" "#);
        assert_eq!(field.field_type, FieldType::Hyperlink);
        assert_eq!(field.url(), Some("https://example.com".to_string()));
    }

    #[test]
    fn test_parse_hyperlink_with_tooltip() {
        let field = Field::parse_instruction(r#"HYPERLINK "https://example.com" \o "Click here""#);
        assert_eq!(field.url(), Some("https://example.com".to_string()));
    }

    #[test]
    fn test_hyperlink_anchor() {
        let field = Field::parse_instruction(r#"HYPERLINK \l "_Toc123""#);
        assert_eq!(field.url(), Some("#_Toc123".to_string()));

        let field = Field::parse_instruction(r#"HYPERLINK "doc.rtf" \l "top""#);
        assert_eq!(field.url(), Some("doc.rtf#top".to_string()));
    }

    #[test]
    fn test_unquoted_hyperlink() {
        let field = Field::parse_instruction("hyperlink http://a.example/b");
        assert_eq!(field.field_type, FieldType::Hyperlink);
        assert_eq!(field.url(), Some("http://a.example/b".to_string()));
    }

    #[test]
    fn test_parse_ref() {
        let field = Field::parse_instruction("REF MyBookmark \\h");
        assert_eq!(field.field_type, FieldType::Reference);
        assert_eq!(field.bookmark(), Some("MyBookmark".to_string()));
        assert_eq!(field.url(), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(Field::parse_instruction("PAGE").field_type, FieldType::Page);
        assert_eq!(Field::parse_instruction("TIME \\@ \"HH:mm\"").field_type, FieldType::Date);
        assert_eq!(Field::parse_instruction("TOC \\o \"1-3\"").field_type, FieldType::Toc);
        assert_eq!(Field::parse_instruction("MERGEFIELD x").field_type, FieldType::Unknown);
        assert_eq!(Field::parse_instruction("").field_type, FieldType::Unknown);
    }
}
