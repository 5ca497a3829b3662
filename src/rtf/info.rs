//! RTF document information and page geometry.

use super::error::{RtfError, RtfResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Text fields of the `\info` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    /// `\title`
    Title,
    /// `\subject`
    Subject,
    /// `\author`
    Author,
    /// `\manager`
    Manager,
    /// `\company`
    Company,
    /// `\operator`
    Operator,
    /// `\category`
    Category,
    /// `\keywords`
    Keywords,
    /// `\comment`
    Comment,
    /// `\doccomm`
    DocComment,
    /// `\hlinkbase`
    HyperlinkBase,
}

/// Timestamps of the `\info` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTime {
    /// `\creatim`
    Created,
    /// `\revtim`
    Revised,
    /// `\printim`
    Printed,
    /// `\buptim`
    Backup,
}

/// Date/time components collected from `\yr \mo \dy \hr \min \sec`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    /// Year
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day (1-31)
    pub day: u32,
    /// Hour
    pub hour: u32,
    /// Minute
    pub minute: u32,
    /// Second
    pub second: u32,
}

impl TimeParts {
    /// Build a timestamp; `None` when the components do not form a valid date.
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(
            self.hour,
            self.minute,
            self.second,
        )
    }
}

/// Document information/metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document manager
    pub manager: Option<String>,
    /// Company name
    pub company: Option<String>,
    /// Operator (last person to modify)
    pub operator: Option<String>,
    /// Document category
    pub category: Option<String>,
    /// Keywords
    pub keywords: Option<String>,
    /// Comments
    pub comment: Option<String>,
    /// Document comments (`\doccomm`)
    pub doc_comment: Option<String>,
    /// Base address for relative hyperlinks
    pub hyperlink_base: Option<String>,
    /// Document version
    pub version: Option<i32>,
    /// Document revision number
    pub revision: Option<i32>,
    /// Creation time
    pub creation_time: Option<NaiveDateTime>,
    /// Revision time (last modified)
    pub revision_time: Option<NaiveDateTime>,
    /// Print time (last printed)
    pub print_time: Option<NaiveDateTime>,
    /// Backup time
    pub backup_time: Option<NaiveDateTime>,
    /// Total editing time (in minutes)
    pub editing_time: Option<i32>,
    /// Number of pages
    pub pages: Option<i32>,
    /// Number of words
    pub words: Option<i32>,
    /// Number of characters
    pub characters: Option<i32>,
    /// Number of characters including spaces
    pub characters_with_spaces: Option<i32>,
    /// Document ID (internal identifier)
    pub id: Option<i32>,
}

impl DocumentInfo {
    /// Store the text of an info field; blank values are ignored.
    pub fn set_text(&mut self, field: InfoField, value: String) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        let slot = match field {
            InfoField::Title => &mut self.title,
            InfoField::Subject => &mut self.subject,
            InfoField::Author => &mut self.author,
            InfoField::Manager => &mut self.manager,
            InfoField::Company => &mut self.company,
            InfoField::Operator => &mut self.operator,
            InfoField::Category => &mut self.category,
            InfoField::Keywords => &mut self.keywords,
            InfoField::Comment => &mut self.comment,
            InfoField::DocComment => &mut self.doc_comment,
            InfoField::HyperlinkBase => &mut self.hyperlink_base,
        };
        *slot = Some(value.to_string());
    }

    /// Store a timestamp.
    pub fn set_time(&mut self, which: InfoTime, parts: TimeParts) {
        let Some(value) = parts.to_datetime() else {
            log::debug!(target: "rtf.parser", "ignoring invalid {which:?} timestamp {parts:?}");
            return;
        };
        match which {
            InfoTime::Created => self.creation_time = Some(value),
            InfoTime::Revised => self.revision_time = Some(value),
            InfoTime::Printed => self.print_time = Some(value),
            InfoTime::Backup => self.backup_time = Some(value),
        }
    }

    /// Whether any field was set.
    pub fn has_data(&self) -> bool {
        *self != Self::default()
    }

    /// Convert the metadata to a YAML front matter block.
    ///
    /// Returns an empty string when no field is set.
    pub fn to_yaml_front_matter(&self) -> RtfResult<String> {
        if !self.has_data() {
            return Ok(String::new());
        }
        let yaml = serde_saphyr::to_string(self)
            .map_err(|e| RtfError::Serialization(format!("metadata to YAML: {e}")))?;
        Ok(format!("---\n{yaml}---\n\n"))
    }
}

/// Page size and margins, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Paper width (`\paperw`)
    pub paper_width: i32,
    /// Paper height (`\paperh`)
    pub paper_height: i32,
    /// Left margin (`\margl`)
    pub margin_left: i32,
    /// Right margin (`\margr`)
    pub margin_right: i32,
    /// Top margin (`\margt`)
    pub margin_top: i32,
    /// Bottom margin (`\margb`)
    pub margin_bottom: i32,
    /// Gutter width (`\gutter`)
    pub gutter: i32,
    /// Landscape orientation (`\landscape`)
    pub landscape: bool,
    /// Default tab width (`\deftab`)
    pub default_tab: i32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            paper_width: 12240,
            paper_height: 15840,
            margin_left: 1800,
            margin_right: 1800,
            margin_top: 1440,
            margin_bottom: 1440,
            gutter: 0,
            landscape: false,
            default_tab: 720,
        }
    }
}

impl PageGeometry {
    /// Width available for text between the margins.
    #[inline]
    pub fn content_width(&self) -> i32 {
        self.paper_width - self.margin_left - self.margin_right - self.gutter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_parts() {
        let parts = TimeParts {
            year: 2024,
            month: 3,
            day: 15,
            hour: 9,
            minute: 30,
            second: 0,
        };
        let mut info = DocumentInfo::default();
        info.set_time(InfoTime::Created, parts);
        assert_eq!(
            info.creation_time.map(|t| t.to_string()),
            Some("2024-03-15 09:30:00".to_string())
        );

        info.set_time(InfoTime::Revised, TimeParts::default());
        assert!(info.revision_time.is_none());
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let mut info = DocumentInfo::default();
        info.set_text(InfoField::Title, "  ".to_string());
        assert!(info.title.is_none());
        info.set_text(InfoField::Title, " Report ".to_string());
        assert_eq!(info.title.as_deref(), Some("Report"));
    }

    #[test]
    fn test_yaml_front_matter() {
        assert_eq!(DocumentInfo::default().to_yaml_front_matter().unwrap(), "");

        let mut info = DocumentInfo::default();
        info.set_text(InfoField::Author, "Jane".to_string());
        let yaml = info.to_yaml_front_matter().unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("author: Jane"));
    }

    #[test]
    fn test_default_geometry() {
        let page = PageGeometry::default();
        assert_eq!(page.content_width(), 12240 - 3600);
    }
}
