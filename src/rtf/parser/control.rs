//! Control word and control symbol dispatch.

use super::super::border::{TabAlignment, TabStop};
use super::super::keyword::{
    self, CharFlag, ControlWord, InfoNumber, PageSetting, ParagraphFlag, ParagraphMeasure,
    PictureSetting, ShapeSetting, TableMark, TimePart,
};
use super::super::lexer::{Token, TokenKind};
use super::super::list::{ListJustification, ListLevelType};
use super::super::shape::WrapMode;
use super::super::tree::{NodeKind, OpenKind};
use super::super::types::{DEFAULT_FONT_SIZE, ListRef, ParagraphFormat, UnderlineStyle};
use super::table::{BorderProperty, BorderTarget, PendingTab};
use super::{Destination, DocumentCharset, Parser, html};

/// Whether a toggle word is on: `\b` and `\b1` are, `\b0` is not.
#[inline]
fn flag(param: Option<i32>) -> bool {
    param.is_none_or(|value| value != 0)
}

#[inline]
fn to_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

#[inline]
fn to_ref(param: Option<i32>) -> Option<u16> {
    param.and_then(|value| u16::try_from(value).ok())
}

/// Words that end or break paragraphs, cells and rows.
fn is_structural(word: ControlWord) -> bool {
    matches!(
        word,
        ControlWord::ParagraphEnd
            | ControlWord::LineBreak
            | ControlWord::PageBreak
            | ControlWord::SectionEnd
            | ControlWord::Table(
                TableMark::CellEnd
                    | TableMark::NestedCellEnd
                    | TableMark::RowEnd
                    | TableMark::NestedRowEnd
            )
    )
}

impl<'a> Parser<'a, '_> {
    pub(super) fn control_symbol(&mut self, token: Token<'a>) {
        if let Some(byte) = token.hex_byte() {
            self.push_byte(byte);
            return;
        }
        match token.key {
            "\\" | "{" | "}" => self.push_str_text(token.key),
            "~" => self.push_special('\u{00A0}'),
            "-" => self.push_special('\u{00AD}'),
            "_" => self.push_special('\u{2011}'),
            other => {
                self.flush_text();
                log::trace!(target: "rtf.parser", "ignoring control symbol \\{other}");
            },
        }
    }

    /// Whether paragraph and table marks act in the current destination.
    ///
    /// HTML tags carry their own line breaks as `\par`.
    fn accepts_structure(&self) -> bool {
        match self.frame().destination {
            Destination::Body | Destination::FieldInstruction => true,
            Destination::HtmlTag => self.html.is_some(),
            _ => false,
        }
    }

    /// Append a character produced by a control word or symbol.
    fn push_special(&mut self, ch: char) {
        if self.html.is_some() && self.frame().destination.is_body() {
            if let Some(entity) = html::entity(ch) {
                self.push_str_text(entity);
                return;
            }
        }
        self.push_char(ch);
    }

    fn unicode(&mut self, param: Option<i32>) {
        let Some(value) = param else {
            return;
        };
        // The parameter is a signed 16-bit value; negative numbers encode the upper half
        let unit = value as i16 as u16;
        if !self.frame().destination.is_payload() {
            let encoding = self.encoding();
            self.text.push_utf16(unit, encoding);
        }
        self.reader.begin_fallback();
    }

    pub(super) fn control_word(&mut self, token: Token<'a>) {
        let Some(word) = keyword::lookup(token.key) else {
            self.flush_text();
            if token.kind == TokenKind::ExtensionKeyword && self.reader.is_first_in_group() {
                log::trace!(target: "rtf.parser", "skipping unknown destination \\{}", token.key);
                self.skip_group();
            } else {
                log::trace!(target: "rtf.parser", "ignoring unknown control word \\{}", token.key);
            }
            return;
        };

        let param = token.param;
        let value = param.unwrap_or(0);
        match word {
            ControlWord::Char(ch) => return self.push_special(ch),
            ControlWord::Unicode => return self.unicode(param),
            _ => {},
        }

        self.flush_text();
        if is_structural(word) && !self.accepts_structure() {
            log::trace!(target: "rtf.parser", "ignoring \\{} outside body text", token.key);
            return;
        }
        match word {
            // Document
            ControlWord::Rtf => {},
            ControlWord::Ansi => self.set_charset(DocumentCharset::Ansi),
            ControlWord::Mac => self.set_charset(DocumentCharset::Mac),
            ControlWord::Pc => self.set_charset(DocumentCharset::Pc),
            ControlWord::Pca => self.set_charset(DocumentCharset::Pca),
            ControlWord::AnsiCodepage => {
                if let Ok(codepage) = u32::try_from(value) {
                    self.codepage = Some(codepage);
                    self.update_document_encoding();
                }
            },
            ControlWord::DefaultFont => self.default_font = to_ref(param),
            ControlWord::FromHtml => {
                if flag(param) && self.html.is_none() {
                    log::debug!(target: "rtf.parser", "document carries encapsulated HTML");
                    self.html = Some(String::new());
                }
            },
            ControlWord::UnicodeSkip => self
                .reader
                .set_unicode_skip(usize::try_from(value).unwrap_or(0)),
            ControlWord::Page(setting) => self.page_setting(setting, param),
            ControlWord::Destination(destination) => self.enter_destination(destination),

            // Font table
            ControlWord::FontFamily(family) => {
                if let Some(font) = self.pending_font.as_mut() {
                    font.family = family;
                }
            },
            ControlWord::FontCharset => {
                if let Some(font) = self.pending_font.as_mut() {
                    font.charset = to_u8(value);
                }
            },
            ControlWord::FontPitch => {
                if let Some(font) = self.pending_font.as_mut() {
                    font.pitch = to_u8(value);
                }
            },
            ControlWord::FontCodepage => {
                if let Some(font) = self.pending_font.as_mut() {
                    font.codepage = u32::try_from(value).ok();
                }
            },

            // Color table
            ControlWord::Red | ControlWord::Green | ControlWord::Blue => {
                if self.frame().destination == Destination::ColorTable {
                    let color = &mut self.pending_color;
                    match word {
                        ControlWord::Red => color.red = to_u8(value),
                        ControlWord::Green => color.green = to_u8(value),
                        _ => color.blue = to_u8(value),
                    }
                    color.defined = true;
                }
            },

            // Lists
            ControlWord::ListId => match self.frame().destination {
                Destination::ListOverride => {
                    if let Some(entry) = self.pending_override.as_mut() {
                        entry.list_id = value;
                    }
                },
                _ => {
                    if let Some(list) = self.pending_list.as_mut() {
                        list.id = value;
                    }
                },
            },
            ControlWord::ListTemplateId => {
                if let Some(list) = self.pending_list.as_mut() {
                    list.template_id = value;
                }
            },
            ControlWord::ListSimple => {
                if let Some(list) = self.pending_list.as_mut() {
                    list.simple = flag(param);
                }
            },
            ControlWord::ListHybrid => {
                if let Some(list) = self.pending_list.as_mut() {
                    list.hybrid = true;
                }
            },
            ControlWord::LevelNumberFormat
            | ControlWord::LevelStartAt
            | ControlWord::LevelJustification
            | ControlWord::LevelFollow
            | ControlWord::LevelLegal
            | ControlWord::LevelNoRestart => {
                if let Some(level) = self.pending_level.as_mut() {
                    match word {
                        ControlWord::LevelNumberFormat => {
                            level.level_type = ListLevelType::from_nfc(value);
                        },
                        ControlWord::LevelStartAt => level.start_at = value,
                        ControlWord::LevelJustification => {
                            level.justification = ListJustification::from_jc(value);
                        },
                        ControlWord::LevelFollow => level.follow = to_u8(value),
                        ControlWord::LevelLegal => level.legal = flag(param),
                        _ => level.no_restart = flag(param),
                    }
                }
            },
            ControlWord::ListOverrideCount => {
                if let Some(entry) = self.pending_override.as_mut() {
                    entry.override_count = value;
                }
            },
            ControlWord::ListOverrideRef => {
                if self.frame().destination == Destination::ListOverride {
                    if let Some(entry) = self.pending_override.as_mut() {
                        entry.id = value;
                    }
                } else {
                    self.paragraph.list = Some(ListRef {
                        override_id: value,
                        level: self.list_level,
                    });
                }
            },
            ControlWord::ListLevelRef => {
                self.list_level = to_u8(value).min(8);
                if let Some(list) = self.paragraph.list.as_mut() {
                    list.level = self.list_level;
                }
            },

            // Info
            ControlWord::InfoNumber(number) => self.info_number(number, value),
            ControlWord::TimePart(part) => self.time_part(part, value),

            // Paragraph
            ControlWord::ParagraphDefaults => {
                self.paragraph = ParagraphFormat::default();
                self.list_level = 0;
                self.tab = PendingTab::default();
                self.border = BorderTarget::None;
            },
            ControlWord::Align(alignment) => self.paragraph.alignment = alignment,
            ControlWord::Measure(measure) => self.paragraph_measure(measure, value),
            ControlWord::ParagraphFlag(paragraph_flag) => {
                self.paragraph_flag(paragraph_flag, flag(param));
            },
            ControlWord::InTable => self.paragraph.in_table = flag(param),
            ControlWord::TableDepth => {
                self.paragraph.table_depth = to_u8(value);
                self.paragraph.in_table = value > 0;
            },
            ControlWord::OutlineLevel => self.paragraph.outline_level = Some(to_u8(value)),
            ControlWord::TabPosition => {
                let tab = std::mem::take(&mut self.tab);
                self.paragraph
                    .tabs
                    .push(TabStop::new(value, tab.alignment, tab.leader));
            },
            ControlWord::TabBar => {
                let tab = std::mem::take(&mut self.tab);
                self.paragraph
                    .tabs
                    .push(TabStop::new(value, TabAlignment::Bar, tab.leader));
            },
            ControlWord::TabAlign(alignment) => self.tab.alignment = alignment,
            ControlWord::TabLeader(leader) => self.tab.leader = leader,
            ControlWord::ParagraphShading => self.paragraph.shading = to_ref(param),

            // Borders
            ControlWord::ParagraphBorder(side) => self.border = BorderTarget::Paragraph(side),
            ControlWord::CellBorder(side) => self.border = BorderTarget::Cell(side),
            ControlWord::RowBorder(key) => self.border = BorderTarget::Row(key),
            ControlWord::BorderStyle(style) => self.apply_border(BorderProperty::Style(style)),
            ControlWord::BorderWidth => self.apply_border(BorderProperty::Width(value)),
            ControlWord::BorderColor => self.apply_border(BorderProperty::Color(value)),
            ControlWord::BorderSpace => self.apply_border(BorderProperty::Space(value)),

            // Character
            ControlWord::Plain => self.chars_mut().reset(),
            ControlWord::Font => {
                if matches!(
                    self.frame().destination,
                    Destination::FontTable | Destination::FontEntry
                ) {
                    self.begin_font(to_ref(param).unwrap_or(0));
                } else {
                    self.chars_mut().font = to_ref(param);
                }
            },
            ControlWord::AssociatedFont => self.chars_mut().associated_font = to_ref(param),
            ControlWord::FontSize => {
                self.chars_mut().font_size = to_ref(param)
                    .filter(|&size| size > 0)
                    .unwrap_or(DEFAULT_FONT_SIZE);
            },
            ControlWord::Foreground => self.chars_mut().foreground = to_ref(param),
            ControlWord::Background => self.chars_mut().background = to_ref(param),
            ControlWord::CharFlag(char_flag) => self.char_flag(char_flag, flag(param)),
            ControlWord::Underline(style) => {
                self.chars_mut().underline = if flag(param) {
                    style
                } else {
                    UnderlineStyle::None
                };
            },
            ControlWord::CharSpacingTwips => self.chars_mut().char_spacing = value,
            ControlWord::CharSpacingQuarters => {
                self.chars_mut().char_spacing = value.saturating_mul(5);
            },
            ControlWord::Language => self.chars_mut().language = to_ref(param),
            ControlWord::HtmlRtf => self.chars_mut().html_suppressed = flag(param),

            // Text and breaks
            ControlWord::Char(_) | ControlWord::Unicode => {},
            ControlWord::ParagraphEnd => self.end_paragraph(),
            ControlWord::LineBreak => self.inline_break(NodeKind::LineBreak),
            ControlWord::PageBreak => self.inline_break(NodeKind::PageBreak),
            ControlWord::SectionEnd => {
                if self.html.is_none() {
                    self.seal_paragraph();
                }
            },

            // Tables
            ControlWord::Table(mark) => self.table_mark(mark, value),
            ControlWord::RowAttr => self.row_attr(token.key, param),
            ControlWord::CellAttr => self.cell_attr(token.key, param),

            // Pictures, objects, fields, shapes
            ControlWord::PictureType(image_type) => {
                if self.frame().destination == Destination::Picture {
                    self.pending_picture.image_type = image_type;
                }
            },
            ControlWord::Picture(setting) => {
                if self.frame().destination == Destination::Picture {
                    self.picture_setting(setting, value);
                }
            },
            ControlWord::ObjectKind(kind) => self.update_open(OpenKind::Object, |node| {
                if let NodeKind::EmbeddedObject(object) = node {
                    object.kind = kind;
                }
            }),
            ControlWord::ObjectWidth => self.update_open(OpenKind::Object, |node| {
                if let NodeKind::EmbeddedObject(object) = node {
                    object.width = Some(value);
                }
            }),
            ControlWord::ObjectHeight => self.update_open(OpenKind::Object, |node| {
                if let NodeKind::EmbeddedObject(object) = node {
                    object.height = Some(value);
                }
            }),
            ControlWord::FieldFlag(field_flag) => {
                let on = flag(param);
                self.update_open(OpenKind::Field, |node| {
                    if let NodeKind::Field(field) = node {
                        let flags = &mut field.flags;
                        match field_flag {
                            keyword::FieldFlag::Dirty => flags.dirty = on,
                            keyword::FieldFlag::Edited => flags.edited = on,
                            keyword::FieldFlag::Locked => flags.locked = on,
                            keyword::FieldFlag::Private => flags.private = on,
                        }
                    }
                });
            },
            ControlWord::Shape(setting) => self.shape_setting(setting, value),
        }
    }

    fn set_charset(&mut self, charset: DocumentCharset) {
        self.charset = charset;
        self.update_document_encoding();
    }

    fn page_setting(&mut self, setting: PageSetting, param: Option<i32>) {
        let value = param.unwrap_or(0);
        let page = &mut self.page;
        match setting {
            PageSetting::PaperWidth => page.paper_width = value,
            PageSetting::PaperHeight => page.paper_height = value,
            PageSetting::MarginLeft => page.margin_left = value,
            PageSetting::MarginRight => page.margin_right = value,
            PageSetting::MarginTop => page.margin_top = value,
            PageSetting::MarginBottom => page.margin_bottom = value,
            PageSetting::Gutter => page.gutter = value,
            PageSetting::Landscape => page.landscape = flag(param),
            PageSetting::DefaultTab => page.default_tab = value,
        }
    }

    fn info_number(&mut self, number: InfoNumber, value: i32) {
        let info = &mut self.info;
        let slot = match number {
            InfoNumber::Version => &mut info.version,
            InfoNumber::Revision => &mut info.revision,
            InfoNumber::EditingMinutes => &mut info.editing_time,
            InfoNumber::Pages => &mut info.pages,
            InfoNumber::Words => &mut info.words,
            InfoNumber::Characters => &mut info.characters,
            InfoNumber::CharactersWithSpaces => &mut info.characters_with_spaces,
            InfoNumber::Id => &mut info.id,
        };
        *slot = Some(value);
    }

    fn time_part(&mut self, part: TimePart, value: i32) {
        if !matches!(self.frame().destination, Destination::InfoTime(_)) {
            return;
        }
        let unsigned = u32::try_from(value).unwrap_or(0);
        let time = &mut self.time;
        match part {
            TimePart::Year => time.year = value,
            TimePart::Month => time.month = unsigned,
            TimePart::Day => time.day = unsigned,
            TimePart::Hour => time.hour = unsigned,
            TimePart::Minute => time.minute = unsigned,
            TimePart::Second => time.second = unsigned,
        }
    }

    fn paragraph_measure(&mut self, measure: ParagraphMeasure, value: i32) {
        let paragraph = &mut self.paragraph;
        match measure {
            ParagraphMeasure::LeftIndent => paragraph.indentation.left = value,
            ParagraphMeasure::RightIndent => paragraph.indentation.right = value,
            ParagraphMeasure::FirstIndent => paragraph.indentation.first_line = value,
            ParagraphMeasure::SpaceBefore => paragraph.spacing.before = value,
            ParagraphMeasure::SpaceAfter => paragraph.spacing.after = value,
            ParagraphMeasure::LineSpacing => paragraph.spacing.line = value,
        }
    }

    fn paragraph_flag(&mut self, paragraph_flag: ParagraphFlag, on: bool) {
        let paragraph = &mut self.paragraph;
        match paragraph_flag {
            ParagraphFlag::KeepTogether => paragraph.keep_together = on,
            ParagraphFlag::KeepNext => paragraph.keep_next = on,
            ParagraphFlag::PageBreakBefore => paragraph.page_break_before = on,
            ParagraphFlag::WidowControl => paragraph.widow_control = on,
            ParagraphFlag::NoWidowControl => paragraph.widow_control = false,
            ParagraphFlag::LineMultiple => paragraph.spacing.line_multiple = on,
            ParagraphFlag::RightToLeft => paragraph.right_to_left = true,
            ParagraphFlag::LeftToRight => paragraph.right_to_left = false,
        }
    }

    fn char_flag(&mut self, char_flag: CharFlag, on: bool) {
        let chars = self.chars_mut();
        match char_flag {
            CharFlag::Bold => chars.bold = on,
            CharFlag::Italic => chars.italic = on,
            CharFlag::Strike => chars.strike = on,
            CharFlag::DoubleStrike => chars.double_strike = on,
            CharFlag::Superscript => {
                chars.superscript = on;
                if on {
                    chars.subscript = false;
                }
            },
            CharFlag::Subscript => {
                chars.subscript = on;
                if on {
                    chars.superscript = false;
                }
            },
            CharFlag::NoSuperSub => {
                chars.superscript = false;
                chars.subscript = false;
            },
            CharFlag::SmallCaps => chars.small_caps = on,
            CharFlag::Caps => chars.all_caps = on,
            CharFlag::Hidden => chars.hidden = on,
        }
    }

    fn picture_setting(&mut self, setting: PictureSetting, value: i32) {
        let picture = &mut self.pending_picture;
        match setting {
            PictureSetting::Width => picture.width = Some(value),
            PictureSetting::Height => picture.height = Some(value),
            PictureSetting::GoalWidth => picture.goal_width = Some(value),
            PictureSetting::GoalHeight => picture.goal_height = Some(value),
            PictureSetting::ScaleX => picture.scale_x = Some(value),
            PictureSetting::ScaleY => picture.scale_y = Some(value),
            PictureSetting::CropTop => picture.crop[0] = value,
            PictureSetting::CropBottom => picture.crop[1] = value,
            PictureSetting::CropLeft => picture.crop[2] = value,
            PictureSetting::CropRight => picture.crop[3] = value,
        }
    }

    fn shape_setting(&mut self, setting: ShapeSetting, value: i32) {
        self.update_open(OpenKind::Shape, |node| {
            let NodeKind::Shape(shape) = node else {
                return;
            };
            match setting {
                ShapeSetting::Left => shape.geometry.left = value,
                ShapeSetting::Top => shape.geometry.top = value,
                ShapeSetting::Right => shape.geometry.right = value,
                ShapeSetting::Bottom => shape.geometry.bottom = value,
                ShapeSetting::ZOrder => shape.geometry.z_order = value,
                ShapeSetting::Wrap => shape.wrap_mode = WrapMode::from_value(value),
                ShapeSetting::BehindText => shape.behind_text = value != 0,
                ShapeSetting::Id => shape.id = Some(value),
            }
        });
    }
}
