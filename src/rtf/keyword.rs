//! Control word vocabulary.
//!
//! Every control word the parser acts on is listed here and mapped to a
//! [`ControlWord`] at compile time. Words missing from the map are unknown:
//! plain ones are ignored, extension ones (`\*\word`) skip their group.

use super::border::{BorderSide, BorderStyle, TabAlignment, TabLeader};
use super::info::{InfoField, InfoTime};
use super::object::ObjectKind;
use super::picture::ImageType;
use super::tree::{ContainerKind, HeaderFooterKind};
use super::types::{Alignment, FontFamily, UnderlineStyle};
use phf::phf_map;

/// Groups introduced by a control word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DestinationWord {
    FontTable,
    ColorTable,
    ListTable,
    List,
    ListLevel,
    LevelText,
    LevelNumbers,
    ListName,
    ListOverrideTable,
    ListOverride,
    Info,
    InfoText(InfoField),
    InfoTime(InfoTime),
    Generator,
    Picture,
    Object,
    ObjectData,
    ObjectClass,
    ObjectName,
    Field,
    Container(ContainerKind),
    Shape,
    ShapeGroup,
    ShapeProperty,
    ShapePropertyName,
    ShapePropertyValue,
    Header(HeaderFooterKind),
    Footer(HeaderFooterKind),
    BookmarkStart,
    BookmarkEnd,
    HtmlTag,
    /// Wrapper groups whose content is parsed as if the wrapper were absent
    PassThrough,
    /// Groups whose content is never needed
    Skip,
}

/// Page setup values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageSetting {
    PaperWidth,
    PaperHeight,
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
    Gutter,
    Landscape,
    DefaultTab,
}

/// Numeric `\info` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfoNumber {
    Version,
    Revision,
    EditingMinutes,
    Pages,
    Words,
    Characters,
    CharactersWithSpaces,
    Id,
}

/// Components of an `\info` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Paragraph values carrying a twips parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParagraphMeasure {
    LeftIndent,
    RightIndent,
    FirstIndent,
    SpaceBefore,
    SpaceAfter,
    LineSpacing,
}

/// Paragraph on/off properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParagraphFlag {
    KeepTogether,
    KeepNext,
    PageBreakBefore,
    WidowControl,
    NoWidowControl,
    LineMultiple,
    RightToLeft,
    LeftToRight,
}

/// Character on/off properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharFlag {
    Bold,
    Italic,
    Strike,
    DoubleStrike,
    Superscript,
    Subscript,
    NoSuperSub,
    SmallCaps,
    Caps,
    Hidden,
}

/// Field modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldFlag {
    Dirty,
    Edited,
    Locked,
    Private,
}

/// Shape geometry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShapeSetting {
    Left,
    Top,
    Right,
    Bottom,
    ZOrder,
    Wrap,
    BehindText,
    Id,
}

/// Picture values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PictureSetting {
    Width,
    Height,
    GoalWidth,
    GoalHeight,
    ScaleX,
    ScaleY,
    CropTop,
    CropBottom,
    CropLeft,
    CropRight,
}

/// Table boundary markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableMark {
    RowDefaults,
    CellEnd,
    NestedCellEnd,
    RowEnd,
    NestedRowEnd,
    CellRight,
}

/// Recognized control words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlWord {
    // Document
    Rtf,
    Ansi,
    Mac,
    Pc,
    Pca,
    AnsiCodepage,
    DefaultFont,
    FromHtml,
    UnicodeSkip,
    Page(PageSetting),
    Destination(DestinationWord),

    // Font table
    FontFamily(FontFamily),
    FontCharset,
    FontPitch,
    FontCodepage,

    // Color table
    Red,
    Green,
    Blue,

    // Lists
    ListId,
    ListTemplateId,
    ListSimple,
    ListHybrid,
    LevelNumberFormat,
    LevelStartAt,
    LevelJustification,
    LevelFollow,
    LevelLegal,
    LevelNoRestart,
    ListOverrideCount,
    ListOverrideRef,
    ListLevelRef,

    // Info
    InfoNumber(InfoNumber),
    TimePart(TimePart),

    // Paragraph
    ParagraphDefaults,
    Align(Alignment),
    Measure(ParagraphMeasure),
    ParagraphFlag(ParagraphFlag),
    InTable,
    TableDepth,
    OutlineLevel,
    TabPosition,
    TabBar,
    TabAlign(TabAlignment),
    TabLeader(TabLeader),
    ParagraphShading,

    // Borders
    ParagraphBorder(BorderSide),
    CellBorder(BorderSide),
    RowBorder(&'static str),
    BorderStyle(BorderStyle),
    BorderWidth,
    BorderColor,
    BorderSpace,

    // Character
    Plain,
    Font,
    AssociatedFont,
    FontSize,
    Foreground,
    Background,
    CharFlag(CharFlag),
    Underline(UnderlineStyle),
    CharSpacingTwips,
    CharSpacingQuarters,
    Language,
    HtmlRtf,

    // Text
    Char(char),
    Unicode,
    ParagraphEnd,
    LineBreak,
    PageBreak,
    SectionEnd,

    // Tables
    Table(TableMark),
    RowAttr,
    CellAttr,

    // Pictures, objects, fields, shapes
    PictureType(ImageType),
    Picture(PictureSetting),
    ObjectKind(ObjectKind),
    ObjectWidth,
    ObjectHeight,
    FieldFlag(FieldFlag),
    Shape(ShapeSetting),
}

use ControlWord as W;
use DestinationWord as D;

static KEYWORDS: phf::Map<&'static str, ControlWord> = phf_map! {
    // Document and page setup
    "rtf" => W::Rtf,
    "ansi" => W::Ansi,
    "mac" => W::Mac,
    "pc" => W::Pc,
    "pca" => W::Pca,
    "ansicpg" => W::AnsiCodepage,
    "deff" => W::DefaultFont,
    "fromhtml" => W::FromHtml,
    "uc" => W::UnicodeSkip,
    "paperw" => W::Page(PageSetting::PaperWidth),
    "paperh" => W::Page(PageSetting::PaperHeight),
    "margl" => W::Page(PageSetting::MarginLeft),
    "margr" => W::Page(PageSetting::MarginRight),
    "margt" => W::Page(PageSetting::MarginTop),
    "margb" => W::Page(PageSetting::MarginBottom),
    "gutter" => W::Page(PageSetting::Gutter),
    "landscape" => W::Page(PageSetting::Landscape),
    "deftab" => W::Page(PageSetting::DefaultTab),

    // Destinations
    "fonttbl" => W::Destination(D::FontTable),
    "colortbl" => W::Destination(D::ColorTable),
    "listtable" => W::Destination(D::ListTable),
    "list" => W::Destination(D::List),
    "listlevel" => W::Destination(D::ListLevel),
    "leveltext" => W::Destination(D::LevelText),
    "levelnumbers" => W::Destination(D::LevelNumbers),
    "listname" => W::Destination(D::ListName),
    "listoverridetable" => W::Destination(D::ListOverrideTable),
    "listoverride" => W::Destination(D::ListOverride),
    "info" => W::Destination(D::Info),
    "title" => W::Destination(D::InfoText(InfoField::Title)),
    "subject" => W::Destination(D::InfoText(InfoField::Subject)),
    "author" => W::Destination(D::InfoText(InfoField::Author)),
    "manager" => W::Destination(D::InfoText(InfoField::Manager)),
    "company" => W::Destination(D::InfoText(InfoField::Company)),
    "operator" => W::Destination(D::InfoText(InfoField::Operator)),
    "category" => W::Destination(D::InfoText(InfoField::Category)),
    "keywords" => W::Destination(D::InfoText(InfoField::Keywords)),
    "comment" => W::Destination(D::InfoText(InfoField::Comment)),
    "doccomm" => W::Destination(D::InfoText(InfoField::DocComment)),
    "hlinkbase" => W::Destination(D::InfoText(InfoField::HyperlinkBase)),
    "creatim" => W::Destination(D::InfoTime(InfoTime::Created)),
    "revtim" => W::Destination(D::InfoTime(InfoTime::Revised)),
    "printim" => W::Destination(D::InfoTime(InfoTime::Printed)),
    "buptim" => W::Destination(D::InfoTime(InfoTime::Backup)),
    "generator" => W::Destination(D::Generator),
    "pict" => W::Destination(D::Picture),
    "object" => W::Destination(D::Object),
    "objdata" => W::Destination(D::ObjectData),
    "objclass" => W::Destination(D::ObjectClass),
    "objname" => W::Destination(D::ObjectName),
    "result" => W::Destination(D::Container(ContainerKind::ObjectResult)),
    "field" => W::Destination(D::Field),
    "fldinst" => W::Destination(D::Container(ContainerKind::FieldInstruction)),
    "fldrslt" => W::Destination(D::Container(ContainerKind::FieldResult)),
    "footnote" => W::Destination(D::Container(ContainerKind::Footnote)),
    "shptxt" => W::Destination(D::Container(ContainerKind::ShapeText)),
    "shp" => W::Destination(D::Shape),
    "shpgrp" => W::Destination(D::ShapeGroup),
    "sp" => W::Destination(D::ShapeProperty),
    "sn" => W::Destination(D::ShapePropertyName),
    "sv" => W::Destination(D::ShapePropertyValue),
    "header" => W::Destination(D::Header(HeaderFooterKind::All)),
    "headerl" => W::Destination(D::Header(HeaderFooterKind::Left)),
    "headerr" => W::Destination(D::Header(HeaderFooterKind::Right)),
    "headerf" => W::Destination(D::Header(HeaderFooterKind::First)),
    "footer" => W::Destination(D::Footer(HeaderFooterKind::All)),
    "footerl" => W::Destination(D::Footer(HeaderFooterKind::Left)),
    "footerr" => W::Destination(D::Footer(HeaderFooterKind::Right)),
    "footerf" => W::Destination(D::Footer(HeaderFooterKind::First)),
    "bkmkstart" => W::Destination(D::BookmarkStart),
    "bkmkend" => W::Destination(D::BookmarkEnd),
    "htmltag" => W::Destination(D::HtmlTag),
    "shpinst" => W::Destination(D::PassThrough),
    "shppict" => W::Destination(D::PassThrough),
    "nesttableprops" => W::Destination(D::PassThrough),
    "stylesheet" => W::Destination(D::Skip),
    "pntext" => W::Destination(D::Skip),
    "pn" => W::Destination(D::Skip),
    "listtext" => W::Destination(D::Skip),
    "nonshppict" => W::Destination(D::Skip),
    "nonesttables" => W::Destination(D::Skip),
    "shprslt" => W::Destination(D::Skip),
    "picprop" => W::Destination(D::Skip),
    "lfolevel" => W::Destination(D::Skip),
    "falt" => W::Destination(D::Skip),
    "panose" => W::Destination(D::Skip),
    "rsidtbl" => W::Destination(D::Skip),
    "xmlnstbl" => W::Destination(D::Skip),
    "themedata" => W::Destination(D::Skip),
    "colorschememapping" => W::Destination(D::Skip),
    "latentstyles" => W::Destination(D::Skip),
    "datastore" => W::Destination(D::Skip),
    "pgdsctbl" => W::Destination(D::Skip),
    "mhtmltag" => W::Destination(D::Skip),
    "annotation" => W::Destination(D::Skip),
    "atnid" => W::Destination(D::Skip),
    "atnauthor" => W::Destination(D::Skip),
    "private" => W::Destination(D::Skip),
    "xe" => W::Destination(D::Skip),
    "tc" => W::Destination(D::Skip),

    // Font table
    "fnil" => W::FontFamily(FontFamily::Nil),
    "froman" => W::FontFamily(FontFamily::Roman),
    "fswiss" => W::FontFamily(FontFamily::Swiss),
    "fmodern" => W::FontFamily(FontFamily::Modern),
    "fscript" => W::FontFamily(FontFamily::Script),
    "fdecor" => W::FontFamily(FontFamily::Decor),
    "ftech" => W::FontFamily(FontFamily::Tech),
    "fbidi" => W::FontFamily(FontFamily::Bidi),
    "fcharset" => W::FontCharset,
    "fprq" => W::FontPitch,
    "cpg" => W::FontCodepage,

    // Color table
    "red" => W::Red,
    "green" => W::Green,
    "blue" => W::Blue,

    // Lists
    "listid" => W::ListId,
    "listtemplateid" => W::ListTemplateId,
    "listsimple" => W::ListSimple,
    "listhybrid" => W::ListHybrid,
    "levelnfc" => W::LevelNumberFormat,
    "levelnfcn" => W::LevelNumberFormat,
    "levelstartat" => W::LevelStartAt,
    "leveljc" => W::LevelJustification,
    "leveljcn" => W::LevelJustification,
    "levelfollow" => W::LevelFollow,
    "levellegal" => W::LevelLegal,
    "levelnorestart" => W::LevelNoRestart,
    "listoverridecount" => W::ListOverrideCount,
    "ls" => W::ListOverrideRef,
    "ilvl" => W::ListLevelRef,

    // Info
    "version" => W::InfoNumber(InfoNumber::Version),
    "vern" => W::InfoNumber(InfoNumber::Revision),
    "edmins" => W::InfoNumber(InfoNumber::EditingMinutes),
    "nofpages" => W::InfoNumber(InfoNumber::Pages),
    "nofwords" => W::InfoNumber(InfoNumber::Words),
    "nofchars" => W::InfoNumber(InfoNumber::Characters),
    "nofcharsws" => W::InfoNumber(InfoNumber::CharactersWithSpaces),
    "id" => W::InfoNumber(InfoNumber::Id),
    "yr" => W::TimePart(TimePart::Year),
    "mo" => W::TimePart(TimePart::Month),
    "dy" => W::TimePart(TimePart::Day),
    "hr" => W::TimePart(TimePart::Hour),
    "min" => W::TimePart(TimePart::Minute),
    "sec" => W::TimePart(TimePart::Second),

    // Paragraph
    "pard" => W::ParagraphDefaults,
    "ql" => W::Align(Alignment::Left),
    "qr" => W::Align(Alignment::Right),
    "qc" => W::Align(Alignment::Center),
    "qj" => W::Align(Alignment::Justify),
    "qd" => W::Align(Alignment::Distribute),
    "li" => W::Measure(ParagraphMeasure::LeftIndent),
    "ri" => W::Measure(ParagraphMeasure::RightIndent),
    "fi" => W::Measure(ParagraphMeasure::FirstIndent),
    "sb" => W::Measure(ParagraphMeasure::SpaceBefore),
    "sa" => W::Measure(ParagraphMeasure::SpaceAfter),
    "sl" => W::Measure(ParagraphMeasure::LineSpacing),
    "slmult" => W::ParagraphFlag(ParagraphFlag::LineMultiple),
    "keep" => W::ParagraphFlag(ParagraphFlag::KeepTogether),
    "keepn" => W::ParagraphFlag(ParagraphFlag::KeepNext),
    "pagebb" => W::ParagraphFlag(ParagraphFlag::PageBreakBefore),
    "widctlpar" => W::ParagraphFlag(ParagraphFlag::WidowControl),
    "nowidctlpar" => W::ParagraphFlag(ParagraphFlag::NoWidowControl),
    "rtlpar" => W::ParagraphFlag(ParagraphFlag::RightToLeft),
    "ltrpar" => W::ParagraphFlag(ParagraphFlag::LeftToRight),
    "intbl" => W::InTable,
    "itap" => W::TableDepth,
    "outlinelevel" => W::OutlineLevel,
    "tx" => W::TabPosition,
    "tb" => W::TabBar,
    "tqr" => W::TabAlign(TabAlignment::Right),
    "tqc" => W::TabAlign(TabAlignment::Center),
    "tqdec" => W::TabAlign(TabAlignment::Decimal),
    "tldot" => W::TabLeader(TabLeader::Dot),
    "tlhyph" => W::TabLeader(TabLeader::Hyphen),
    "tlul" => W::TabLeader(TabLeader::Underscore),
    "tlth" => W::TabLeader(TabLeader::ThickLine),
    "tleq" => W::TabLeader(TabLeader::Equal),
    "cbpat" => W::ParagraphShading,

    // Borders
    "brdrt" => W::ParagraphBorder(BorderSide::Top),
    "brdrb" => W::ParagraphBorder(BorderSide::Bottom),
    "brdrl" => W::ParagraphBorder(BorderSide::Left),
    "brdrr" => W::ParagraphBorder(BorderSide::Right),
    "box" => W::ParagraphBorder(BorderSide::Box),
    "clbrdrt" => W::CellBorder(BorderSide::Top),
    "clbrdrb" => W::CellBorder(BorderSide::Bottom),
    "clbrdrl" => W::CellBorder(BorderSide::Left),
    "clbrdrr" => W::CellBorder(BorderSide::Right),
    "trbrdrt" => W::RowBorder("trbrdrt"),
    "trbrdrb" => W::RowBorder("trbrdrb"),
    "trbrdrl" => W::RowBorder("trbrdrl"),
    "trbrdrr" => W::RowBorder("trbrdrr"),
    "trbrdrh" => W::RowBorder("trbrdrh"),
    "trbrdrv" => W::RowBorder("trbrdrv"),
    "brdrs" => W::BorderStyle(BorderStyle::Single),
    "brdrth" => W::BorderStyle(BorderStyle::Thick),
    "brdrsh" => W::BorderStyle(BorderStyle::Shadowed),
    "brdrdb" => W::BorderStyle(BorderStyle::Double),
    "brdrdot" => W::BorderStyle(BorderStyle::Dotted),
    "brdrdash" => W::BorderStyle(BorderStyle::Dashed),
    "brdrdashsm" => W::BorderStyle(BorderStyle::Dashed),
    "brdrdashd" => W::BorderStyle(BorderStyle::DotDash),
    "brdrdashdd" => W::BorderStyle(BorderStyle::DotDotDash),
    "brdrtriple" => W::BorderStyle(BorderStyle::Triple),
    "brdrhair" => W::BorderStyle(BorderStyle::Hairline),
    "brdrwavy" => W::BorderStyle(BorderStyle::Wavy),
    "brdrwavydb" => W::BorderStyle(BorderStyle::WavyDouble),
    "brdremboss" => W::BorderStyle(BorderStyle::Embossed),
    "brdrengrave" => W::BorderStyle(BorderStyle::Engraved),
    "brdroutset" => W::BorderStyle(BorderStyle::Outset),
    "brdrinset" => W::BorderStyle(BorderStyle::Inset),
    "brdrnone" => W::BorderStyle(BorderStyle::None),
    "brdrnil" => W::BorderStyle(BorderStyle::None),
    "brdrtbl" => W::BorderStyle(BorderStyle::None),
    "brdrw" => W::BorderWidth,
    "brdrcf" => W::BorderColor,
    "brsp" => W::BorderSpace,

    // Character
    "plain" => W::Plain,
    "f" => W::Font,
    "af" => W::AssociatedFont,
    "fs" => W::FontSize,
    "cf" => W::Foreground,
    "cb" => W::Background,
    "chcbpat" => W::Background,
    "highlight" => W::Background,
    "b" => W::CharFlag(CharFlag::Bold),
    "i" => W::CharFlag(CharFlag::Italic),
    "strike" => W::CharFlag(CharFlag::Strike),
    "striked" => W::CharFlag(CharFlag::DoubleStrike),
    "super" => W::CharFlag(CharFlag::Superscript),
    "sub" => W::CharFlag(CharFlag::Subscript),
    "nosupersub" => W::CharFlag(CharFlag::NoSuperSub),
    "scaps" => W::CharFlag(CharFlag::SmallCaps),
    "caps" => W::CharFlag(CharFlag::Caps),
    "v" => W::CharFlag(CharFlag::Hidden),
    "ul" => W::Underline(UnderlineStyle::Single),
    "uldb" => W::Underline(UnderlineStyle::Double),
    "uld" => W::Underline(UnderlineStyle::Dotted),
    "uldash" => W::Underline(UnderlineStyle::Dashed),
    "ulldash" => W::Underline(UnderlineStyle::Dashed),
    "uldashd" => W::Underline(UnderlineStyle::DashDot),
    "uldashdd" => W::Underline(UnderlineStyle::DashDotDot),
    "ulw" => W::Underline(UnderlineStyle::Words),
    "ulth" => W::Underline(UnderlineStyle::Thick),
    "ulwave" => W::Underline(UnderlineStyle::Wave),
    "ulnone" => W::Underline(UnderlineStyle::None),
    "expndtw" => W::CharSpacingTwips,
    "expnd" => W::CharSpacingQuarters,
    "lang" => W::Language,
    "htmlrtf" => W::HtmlRtf,

    // Text
    "tab" => W::Char('\t'),
    "emdash" => W::Char('\u{2014}'),
    "endash" => W::Char('\u{2013}'),
    "emspace" => W::Char('\u{2003}'),
    "enspace" => W::Char('\u{2002}'),
    "qmspace" => W::Char('\u{2005}'),
    "bullet" => W::Char('\u{2022}'),
    "lquote" => W::Char('\u{2018}'),
    "rquote" => W::Char('\u{2019}'),
    "ldblquote" => W::Char('\u{201C}'),
    "rdblquote" => W::Char('\u{201D}'),
    "zwj" => W::Char('\u{200D}'),
    "zwnj" => W::Char('\u{200C}'),
    "ltrmark" => W::Char('\u{200E}'),
    "rtlmark" => W::Char('\u{200F}'),
    "u" => W::Unicode,
    "par" => W::ParagraphEnd,
    "line" => W::LineBreak,
    "page" => W::PageBreak,
    "sect" => W::SectionEnd,

    // Tables
    "trowd" => W::Table(TableMark::RowDefaults),
    "cell" => W::Table(TableMark::CellEnd),
    "nestcell" => W::Table(TableMark::NestedCellEnd),
    "row" => W::Table(TableMark::RowEnd),
    "nestrow" => W::Table(TableMark::NestedRowEnd),
    "cellx" => W::Table(TableMark::CellRight),
    "trgaph" => W::RowAttr,
    "trleft" => W::RowAttr,
    "trrh" => W::RowAttr,
    "trql" => W::RowAttr,
    "trqr" => W::RowAttr,
    "trqc" => W::RowAttr,
    "trhdr" => W::RowAttr,
    "trkeep" => W::RowAttr,
    "trkeepfollow" => W::RowAttr,
    "lastrow" => W::RowAttr,
    "rtlrow" => W::RowAttr,
    "trautofit" => W::RowAttr,
    "irow" => W::RowAttr,
    "irowband" => W::RowAttr,
    "trwWidth" => W::RowAttr,
    "trftsWidth" => W::RowAttr,
    "trpaddl" => W::RowAttr,
    "trpaddt" => W::RowAttr,
    "trpaddr" => W::RowAttr,
    "trpaddb" => W::RowAttr,
    "trcbpat" => W::RowAttr,
    "trcfpat" => W::RowAttr,
    "trshdng" => W::RowAttr,
    "clmgf" => W::CellAttr,
    "clmrg" => W::CellAttr,
    "clvmgf" => W::CellAttr,
    "clvmrg" => W::CellAttr,
    "clvertalt" => W::CellAttr,
    "clvertalc" => W::CellAttr,
    "clvertalb" => W::CellAttr,
    "cltxlrtb" => W::CellAttr,
    "cltxtbrl" => W::CellAttr,
    "clNoWrap" => W::CellAttr,
    "clFitText" => W::CellAttr,
    "clwWidth" => W::CellAttr,
    "clftsWidth" => W::CellAttr,
    "clpadl" => W::CellAttr,
    "clpadt" => W::CellAttr,
    "clpadr" => W::CellAttr,
    "clpadb" => W::CellAttr,
    "clpadfl" => W::CellAttr,
    "clpadft" => W::CellAttr,
    "clpadfr" => W::CellAttr,
    "clpadfb" => W::CellAttr,
    "clcbpat" => W::CellAttr,
    "clcfpat" => W::CellAttr,
    "clshdng" => W::CellAttr,

    // Pictures
    "emfblip" => W::PictureType(ImageType::Emf),
    "pngblip" => W::PictureType(ImageType::Png),
    "jpegblip" => W::PictureType(ImageType::Jpeg),
    "macpict" => W::PictureType(ImageType::Pict),
    "pmmetafile" => W::PictureType(ImageType::Os2Metafile),
    "wmetafile" => W::PictureType(ImageType::Wmf),
    "dibitmap" => W::PictureType(ImageType::Dib),
    "wbitmap" => W::PictureType(ImageType::Dib),
    "picw" => W::Picture(PictureSetting::Width),
    "pich" => W::Picture(PictureSetting::Height),
    "picwgoal" => W::Picture(PictureSetting::GoalWidth),
    "pichgoal" => W::Picture(PictureSetting::GoalHeight),
    "picscalex" => W::Picture(PictureSetting::ScaleX),
    "picscaley" => W::Picture(PictureSetting::ScaleY),
    "piccropt" => W::Picture(PictureSetting::CropTop),
    "piccropb" => W::Picture(PictureSetting::CropBottom),
    "piccropl" => W::Picture(PictureSetting::CropLeft),
    "piccropr" => W::Picture(PictureSetting::CropRight),

    // Objects
    "objemb" => W::ObjectKind(ObjectKind::Embedded),
    "objlink" => W::ObjectKind(ObjectKind::Link),
    "objautlink" => W::ObjectKind(ObjectKind::AutoLink),
    "objsub" => W::ObjectKind(ObjectKind::Subscriber),
    "objpub" => W::ObjectKind(ObjectKind::Publisher),
    "objicemb" => W::ObjectKind(ObjectKind::IconEmbedded),
    "objhtml" => W::ObjectKind(ObjectKind::Html),
    "objocx" => W::ObjectKind(ObjectKind::Control),
    "objw" => W::ObjectWidth,
    "objh" => W::ObjectHeight,

    // Fields
    "flddirty" => W::FieldFlag(FieldFlag::Dirty),
    "fldedit" => W::FieldFlag(FieldFlag::Edited),
    "fldlock" => W::FieldFlag(FieldFlag::Locked),
    "fldpriv" => W::FieldFlag(FieldFlag::Private),

    // Shapes
    "shpleft" => W::Shape(ShapeSetting::Left),
    "shptop" => W::Shape(ShapeSetting::Top),
    "shpright" => W::Shape(ShapeSetting::Right),
    "shpbottom" => W::Shape(ShapeSetting::Bottom),
    "shpz" => W::Shape(ShapeSetting::ZOrder),
    "shpwr" => W::Shape(ShapeSetting::Wrap),
    "shpfblwtxt" => W::Shape(ShapeSetting::BehindText),
    "shplid" => W::Shape(ShapeSetting::Id),
};

/// Look up a control word.
#[inline]
pub(crate) fn lookup(name: &str) -> Option<ControlWord> {
    KEYWORDS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("par"), Some(ControlWord::ParagraphEnd));
        assert_eq!(
            lookup("fonttbl"),
            Some(ControlWord::Destination(DestinationWord::FontTable))
        );
        assert_eq!(lookup("emdash"), Some(ControlWord::Char('\u{2014}')));
        assert_eq!(lookup("unknowndest"), None);
    }

    #[test]
    fn test_table_words_have_attribute_keys() {
        for (name, word) in KEYWORDS.entries() {
            if matches!(word, ControlWord::RowAttr | ControlWord::CellAttr) {
                assert!(
                    crate::rtf::attrs::intern(name).is_some(),
                    "{name} is missing from the attribute vocabulary"
                );
            }
        }
    }
}
