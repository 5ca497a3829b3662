use proptest::prelude::*;

use super::*;
use crate::rtf::{
    BookmarkMarker, Color, FieldType, ImageType, ListRef, NodeKind, NodeRef, RtfError,
    ShapeType,
};

fn parse(input: &str) -> RtfDocument {
    RtfDocument::parse(input).unwrap()
}

fn first_row(doc: &RtfDocument) -> NodeRef<'_> {
    doc.tree()
        .iter()
        .find(|node| matches!(node.kind(), NodeKind::TableRow(_)))
        .unwrap()
}

fn cells(row: NodeRef<'_>) -> Vec<crate::rtf::Cell> {
    row.children()
        .filter_map(|node| match node.kind() {
            NodeKind::TableCell(cell) => Some(*cell),
            _ => None,
        })
        .collect()
}

#[test]
fn test_font_and_color() {
    let doc = parse(
        r"{\rtf1\ansi{\fonttbl\f0\fswiss Arial;}{\colortbl;\red255\green0\blue0;}\f0\cf1 Hello\par}",
    );
    let runs = doc.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text(), "Hello");
    assert_eq!(&*runs[0].formatting.font_name, "Arial");
    assert_eq!(runs[0].formatting.foreground, Some(Color::new(255, 0, 0)));
    assert_eq!(doc.paragraphs().len(), 1);
}

#[test]
fn test_braced_font_table_entry() {
    let doc = parse(
        r"{\rtf1\ansi{\fonttbl{\f0 Arial;}}{\colortbl;\red255\green0\blue0;}\f0\cf1 Hello\par}",
    );
    assert_eq!(doc.paragraphs().len(), 1);
    let runs = doc.runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text(), "Hello");
    assert_eq!(&*runs[0].formatting.font_name, "Arial");
    assert_eq!(runs[0].formatting.foreground, Some(Color::new(255, 0, 0)));
}

#[test]
fn test_default_font() {
    let doc = parse(r"{\rtf1\deff1{\fonttbl{\f0\froman Times;}{\f1\fswiss Arial;}}\pard Hi\par}");
    assert_eq!(&*doc.runs()[0].formatting.font_name, "Arial");

    let doc = parse(r"{\rtf1\f9 Hi\par}");
    assert_eq!(&*doc.runs()[0].formatting.font_name, "Times New Roman");
}

#[test]
fn test_color_out_of_range() {
    let doc = parse(r"{\rtf1{\colortbl;\red0\green0\blue255;}\cf999 X\par}");
    assert_eq!(doc.runs()[0].formatting.foreground, Some(Color::black()));
}

#[test]
fn test_unicode_escape() {
    assert_eq!(parse(r"{\rtf1\uc1\u8364 ?\par}").text(), "€");
    assert_eq!(parse(r"{\rtf1\u8364?\par}").text(), "€");
    assert_eq!(parse(r"{\rtf1\uc2\u8364 abc\par}").text(), "€c");
    // A hex escape counts as one fallback character
    assert_eq!(parse(r"{\rtf1\u8364\'80\par}").text(), "€");
}

#[test]
fn test_unicode_skip_count_is_scoped() {
    assert_eq!(parse(r"{\rtf1\uc2{\uc0\u8364}\u8364 ab\par}").text(), "€€");
}

#[test]
fn test_surrogate_pair() {
    assert_eq!(parse(r"{\rtf1\u-10179 ?\u-8694 ?\par}").text(), "😊");
}

#[test]
fn test_double_byte_escapes() {
    assert_eq!(parse(r"{\rtf1\ansi\ansicpg932 \'82\'a0\par}").text(), "あ");
    assert_eq!(parse("{\\rtf1\\ansi\\ansicpg932 \\'82\r\n\\'a0\\par}").text(), "あ");

    let doc = parse(r"{\rtf1{\fonttbl{\f0\fcharset128 MS Mincho;}}\f0 \'82\'a0\par}");
    assert_eq!(doc.text(), "あ");
}

#[test]
fn test_unknown_destination_is_skipped() {
    let skipped = parse(r"{\rtf1{\*\foo bar {nested}}Hello\par}");
    let plain = parse(r"{\rtf1 Hello\par}");
    assert_eq!(skipped.text(), "Hello");
    assert_eq!(skipped.tree().len(), plain.tree().len());
}

fn assert_same_document(a: &RtfDocument, b: &RtfDocument) {
    let kinds = |doc: &RtfDocument| -> Vec<NodeKind> {
        doc.tree().iter().map(|node| node.kind().clone()).collect()
    };
    assert_eq!(kinds(a), kinds(b));
    assert_eq!(a.runs(), b.runs());
    assert_eq!(a.fonts().fonts(), b.fonts().fonts());
    assert_eq!(a.colors().colors(), b.colors().colors());
    assert_eq!(a.lists().lists(), b.lists().lists());
    assert_eq!(a.list_overrides().overrides(), b.list_overrides().overrides());
    assert_eq!(a.info(), b.info());
    assert_eq!(a.page(), b.page());
    assert_eq!(a.generator(), b.generator());
    assert_eq!(a.codepage(), b.codepage());
    assert_eq!(a.html(), b.html());
    assert_eq!(a.text(), b.text());
}

#[test]
fn test_stray_group_end_stops_parse() {
    let plain_source = concat!(
        r"{\rtf1\ansi\ansicpg1251{\fonttbl{\f0\fswiss Arial;}}",
        r"{\colortbl;\red0\green128\blue0;}{\info{\title Notes}}",
        r"\f0\cf1\b A\b0  plain\par}",
    );
    let plain = parse(plain_source);
    let stray = parse(&format!("{plain_source}}} B"));
    assert_same_document(&stray, &plain);
    assert_eq!(stray.text(), "A plain");

    assert_same_document(&parse(r"{\rtf1 A\par}} B"), &parse(r"{\rtf1 A\par}"));

    assert_eq!(parse(r"{\rtf1 A\par}}{\rtf1 B\par}").text(), "A");
}

#[test]
fn test_page_break() {
    let doc = parse(r"{\rtf1 A\page B\par}");
    assert_eq!(doc.text(), "A\nB");
    assert_eq!(doc.paragraphs().len(), 1);
}

#[test]
fn test_horizontal_merge() {
    let doc = parse(
        r"{\rtf1\trowd\clmgf\cellx1000\clmrg\cellx2000\cellx3000\intbl AB\cell\cell C\cell\row}",
    );
    assert_eq!(doc.text(), "AB\tC");

    let cells = cells(first_row(&doc));
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0].colspan, 2);
    assert!(cells[1].is_covered());
    assert!(!cells[2].is_covered());
}

#[test]
fn test_vertical_merge() {
    let doc = parse(concat!(
        r"{\rtf1\trowd\clvmgf\cellx1000\cellx2000\intbl A\cell B\cell\row",
        r"\trowd\clvmrg\cellx1000\cellx2000\intbl\cell D\cell\row}",
    ));
    assert_eq!(doc.text(), "A\tB\nD");

    let tables = doc.tables();
    assert_eq!(tables.len(), 1);
    match tables[0].kind() {
        NodeKind::Table(info) => {
            assert_eq!(info.rows, 2);
            assert_eq!(info.columns, 2);
        },
        other => panic!("expected a table, got {other:?}"),
    }
    assert_eq!(cells(first_row(&doc))[0].rowspan, 2);
}

#[test]
fn test_nested_table() {
    let doc = parse(concat!(
        r"{\rtf1\trowd\cellx4000\intbl Outer\par ",
        r"\itap2 Inner1\nestcell Inner2\nestcell",
        r"{\*\nesttableprops\trowd\cellx1000\cellx2000\nestrow}{\nonesttables\par}",
        r"\itap1 \cell\row\pard After\par}",
    ));
    assert_eq!(doc.text(), "Outer\nInner1\tInner2\nAfter");

    let tables: Vec<_> = doc
        .tables()
        .into_iter()
        .filter_map(|node| match node.kind() {
            NodeKind::Table(info) => Some(*info),
            _ => None,
        })
        .collect();
    assert_eq!(tables.len(), 2);
    assert_eq!((tables[0].depth, tables[0].rows, tables[0].columns), (1, 1, 1));
    assert_eq!((tables[1].depth, tables[1].columns), (2, 2));
}

#[test]
fn test_hyperlink_field() {
    let doc = parse(
        r#"{\rtf1 See {\field{\*\fldinst{HYPERLINK "https://example.com"}}{\fldrslt{\ul link}}} here.\par}"#,
    );
    assert_eq!(doc.text(), "See link here.");

    let link = doc
        .runs()
        .into_iter()
        .find(|run| run.text() == "link")
        .unwrap();
    assert_eq!(link.hyperlink(), Some("https://example.com"));
    assert!(link.underline());

    let fields = doc.fields();
    assert_eq!(fields.len(), 1);
    match fields[0].kind() {
        NodeKind::Field(field) => assert_eq!(field.field_type, FieldType::Hyperlink),
        other => panic!("expected a field, got {other:?}"),
    }
}

#[test]
fn test_stray_field_instruction() {
    let doc = parse(r#"{\rtf1 A{\*\fldinst HYPERLINK "https://example.com"} B\par}"#);
    assert!(doc.fields().is_empty());
    assert!(doc.runs().iter().all(|run| run.hyperlink().is_none()));
}

#[test]
fn test_list_reference() {
    let doc = parse(concat!(
        r"{\rtf1{\*\listtable{\list\listtemplateid1\listhybrid{\listlevel\levelnfc23\levelstartat1",
        r"{\leveltext\'01\u8226 ?;}{\levelnumbers;}}\listid42{\listname ;}}}",
        r"{\*\listoverridetable{\listoverride\listid42\listoverridecount0\ls1}}",
        r"\pard\ls1\ilvl0 Item\par}",
    ));
    let list = doc.list_overrides().resolve(1, doc.lists()).unwrap();
    assert_eq!(list.id, 42);
    let level = list.level(0).unwrap();
    assert!(level.is_bullet());
    assert_eq!(level.text, "•");

    match doc.paragraphs()[0].kind() {
        NodeKind::Paragraph(format) => assert_eq!(
            format.list,
            Some(ListRef {
                override_id: 1,
                level: 0
            })
        ),
        other => panic!("expected a paragraph, got {other:?}"),
    }
}

#[test]
fn test_document_info() {
    let doc = parse(concat!(
        r"{\rtf1{\info{\title My Report}{\author Jane Doe}",
        r"{\creatim\yr2024\mo3\dy15\hr9\min30}{\nofpages3}}",
        r"{\*\generator Riched20 10.0.19041;}Body\par}",
    ));
    let info = doc.info();
    assert_eq!(info.title.as_deref(), Some("My Report"));
    assert_eq!(info.author.as_deref(), Some("Jane Doe"));
    assert_eq!(
        info.creation_time.map(|t| t.to_string()).as_deref(),
        Some("2024-03-15 09:30:00")
    );
    assert_eq!(info.pages, Some(3));
    assert_eq!(doc.generator(), Some("Riched20 10.0.19041"));
    assert_eq!(doc.text(), "Body");
}

#[test]
fn test_bookmarks() {
    let doc = parse(r"{\rtf1 {\*\bkmkstart intro}Intro{\*\bkmkend intro}\par}");
    let bookmarks = doc.bookmarks();
    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[0].name, "intro");
    assert_eq!(bookmarks[0].marker, BookmarkMarker::Start);
    assert_eq!(bookmarks[1].marker, BookmarkMarker::End);
    assert_eq!(doc.text(), "Intro");
}

#[test]
fn test_picture() {
    let doc = parse("{\\rtf1 {\\pict\\pngblip\\picw10\\pich20 89504e47\r\n0d0a1a0a}\\par}");
    let images = doc.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_type, ImageType::Png);
    assert_eq!(images[0].data(), b"\x89PNG\r\n\x1a\n");
    assert_eq!(images[0].width, Some(10));
    assert_eq!(images[0].height, Some(20));

    let doc = parse(r"{\rtf1 {\pict 89504e470d0a1a0a}\par}");
    assert_eq!(doc.images()[0].image_type, ImageType::Unknown);
    assert_eq!(doc.images()[0].detected_type(), ImageType::Png);
}

#[test]
fn test_structure_words_inside_picture() {
    let doc = parse(r"{\rtf1 {\pict\pngblip\cell\sect 89504e47\row}After\par}");
    assert_eq!(doc.images().len(), 1);
    assert!(doc.tables().is_empty());
    assert_eq!(doc.text(), "After");
}

#[test]
fn test_text_box_shape() {
    let doc = parse(concat!(
        r"{\rtf1{\shp{\*\shpinst\shpleft100\shptop200\shpright1100\shpbottom700",
        r"{\sp{\sn shapeType}{\sv 202}}{\shptxt Hello box\par}}}\par}",
    ));
    let shape = doc
        .tree()
        .iter()
        .find_map(|node| match node.kind() {
            NodeKind::Shape(shape) => Some(shape.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(shape.shape_type(), ShapeType::TextBox);
    assert!(shape.is_text_box());
    assert_eq!(doc.text(), "Hello box");
}

#[test]
fn test_header_excluded_from_text() {
    let doc = parse(r"{\rtf1{\header\pard Page header\par}Body\par}");
    assert_eq!(doc.text(), "Body");
    assert!(
        doc.tree()
            .iter()
            .any(|node| matches!(node.kind(), NodeKind::Header(_)))
    );
}

#[test]
fn test_html_extraction() {
    let doc = parse(concat!(
        r"{\rtf1\ansi\fromhtml1 {\*\htmltag64 <p>}Hello \htmlrtf {\b bold?}\htmlrtf0 world",
        r"{\*\htmltag72 </p>}\htmlrtf\par\htmlrtf0 {\*\htmltag0 \par }}",
    ));
    assert!(doc.is_html());
    assert_eq!(doc.html(), Some("<p>Hello world</p>\r\n"));
    assert_eq!(doc.tree().len(), 1);
}

#[test]
fn test_html_entities() {
    assert_eq!(parse(r"{\rtf1\fromhtml1 a\~b}").html(), Some("a&nbsp;b"));
}

#[test]
fn test_cancellation() {
    let options = ParserOptions::new().with_progress_interval(1);
    let mut progress = |progress: &mut ParseProgress| {
        if progress.position > 0 {
            progress.cancel = true;
        }
    };
    let result = RtfDocument::parse_with(r"{\rtf1 Hello\par}", &options, Some(&mut progress));
    assert!(matches!(result, Err(RtfError::Cancelled { .. })));
}

#[test]
fn test_nesting_limit() {
    let options = ParserOptions::new().with_max_depth(3);
    let result = RtfDocument::parse_with(r"{\rtf1{{{x}}}}", &options, None);
    assert!(matches!(
        result,
        Err(RtfError::NestingTooDeep { depth: 4, limit: 3 })
    ));

    assert!(RtfDocument::parse_with(r"{\rtf1{{x}}}", &options, None).is_ok());
}

const PIECES: &[&str] = &[
    r"\par ",
    r"\cell ",
    r"\row ",
    r"\trowd ",
    r"\cellx1000 ",
    r"\cellx2000 ",
    r"\intbl ",
    r"\nestcell ",
    r"\nestrow ",
    r"\itap2 ",
    r"\pard ",
    r"\plain ",
    r"\b ",
    r"\page ",
    r"\sect ",
    r"\line ",
    "text ",
    r"\'e9",
    r"\u8364?",
    r"{\field{\*\fldinst HYPERLINK x}{\fldrslt link}}",
    r"{\*\fldinst PAGE}",
    r"{\pict\pngblip 8950}",
    r"{\footnote note}",
    r"{\header head\par}",
    r"{\shp{\*\shpinst{\shptxt box}}}",
    r"{\*\bkmkstart b}",
    r"\field ",
    r"\fldrslt ",
];

#[derive(Debug, Clone)]
enum Piece {
    Open,
    Close,
    Word(usize),
}

/// Balanced RTF built from structural fragments.
fn document() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just(Piece::Open),
        Just(Piece::Close),
        (0..PIECES.len()).prop_map(Piece::Word),
        (0..PIECES.len()).prop_map(Piece::Word),
    ];
    proptest::collection::vec(piece, 0..48).prop_map(|pieces| {
        let mut out = String::from(r"{\rtf1 ");
        let mut open = 0usize;
        for piece in pieces {
            match piece {
                Piece::Open => {
                    out.push('{');
                    open += 1;
                },
                Piece::Close if open > 0 => {
                    out.push('}');
                    open -= 1;
                },
                Piece::Close => {},
                Piece::Word(index) => out.push_str(PIECES[index]),
            }
        }
        out.extend(std::iter::repeat_n('}', open + 1));
        out
    })
}

fn check_runs(node: NodeRef<'_>) {
    let runs: Vec<_> = node
        .children()
        .filter_map(|child| match child.kind() {
            NodeKind::TextRun(run) => Some(run),
            _ => None,
        })
        .collect();
    for run in &runs {
        assert!(!run.text.is_empty());
    }
    let children: Vec<_> = node.children().collect();
    for pair in children.windows(2) {
        if let (NodeKind::TextRun(a), NodeKind::TextRun(b)) = (pair[0].kind(), pair[1].kind()) {
            assert_ne!(a.formatting, b.formatting);
        }
    }
    node.children().for_each(check_runs);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balanced_groups_unwind(input in document()) {
        let options = ParserOptions::default();
        let mut parser = Parser::new(&input, &options, None);
        prop_assert!(parser.run().is_ok());
        prop_assert_eq!(parser.reader.level(), 0);
        prop_assert_eq!(parser.frames.len(), 1);

        let doc = parser.finish();
        check_runs(doc.root());
        for node in doc.tree().iter() {
            if matches!(node.kind(), NodeKind::TableRow(_)) {
                let parent = node.parent().map(|parent| parent.kind().clone());
                prop_assert!(matches!(parent, Some(NodeKind::Table(_))));
            }
        }
    }

    #[test]
    fn prop_double_byte_text(
        code_points in proptest::collection::vec(0x3041u32..0x3094, 1..20),
        split in any::<bool>(),
    ) {
        let expected: String = code_points.iter().filter_map(|&c| char::from_u32(c)).collect();
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(&expected);
        let separator = if split { "\r\n" } else { "" };
        let escapes: Vec<String> = bytes.iter().map(|b| format!("\\'{b:02x}")).collect();
        let input = format!("{{\\rtf1\\ansi\\ansicpg932 {}\\par}}", escapes.join(separator));
        prop_assert_eq!(parse(&input).text(), expected);
    }
}
