//! Destination groups: entering them and committing what they collected.

use std::mem::take;
use std::sync::Arc;

use super::super::bookmark::{Bookmark, BookmarkMarker};
use super::super::field::Field;
use super::super::keyword::DestinationWord;
use super::super::list::{List, ListLevel, ListOverride};
use super::super::object::EmbeddedObject;
use super::super::picture::{ImageType, Picture};
use super::super::shape::{Shape, ShapeProperty};
use super::super::tree::{ContainerKind, NodeId, NodeKind, OpenKind};
use super::super::types::{Color, Font, FontRef};
use super::{Collect, Destination, Frame, Parser};

impl Parser<'_, '_> {
    fn set_destination(&mut self, destination: Destination) {
        let frame = self.frame_mut();
        frame.destination = destination;
        frame.owns_destination = true;
    }

    fn collect(&mut self, target: Collect) {
        self.scratch.clear();
        self.set_destination(Destination::Collect(target));
    }

    pub(super) fn enter_destination(&mut self, word: DestinationWord) {
        match word {
            DestinationWord::FontTable => self.set_destination(Destination::FontTable),
            DestinationWord::ColorTable => {
                self.pending_color = Default::default();
                self.set_destination(Destination::ColorTable);
            },
            DestinationWord::ListTable => self.set_destination(Destination::ListTable),
            DestinationWord::List => {
                self.pending_list = Some(List::new(0));
                self.set_destination(Destination::List);
            },
            DestinationWord::ListLevel => {
                let index = self
                    .pending_list
                    .as_ref()
                    .map_or(0, |list| list.levels.len());
                self.pending_level = Some(ListLevel::new(u8::try_from(index).unwrap_or(u8::MAX)));
                self.set_destination(Destination::ListLevel);
            },
            DestinationWord::LevelText => self.collect(Collect::LevelText),
            DestinationWord::LevelNumbers => self.collect(Collect::LevelNumbers),
            DestinationWord::ListName => self.collect(Collect::ListName),
            DestinationWord::ListOverrideTable => {
                self.set_destination(Destination::ListOverrideTable);
            },
            DestinationWord::ListOverride => {
                self.pending_override = Some(ListOverride::new(0, 0));
                self.set_destination(Destination::ListOverride);
            },
            DestinationWord::Info => self.set_destination(Destination::Info),
            DestinationWord::InfoText(field) => self.collect(Collect::InfoText(field)),
            DestinationWord::InfoTime(which) => {
                self.time = Default::default();
                self.set_destination(Destination::InfoTime(which));
            },
            DestinationWord::Generator => self.collect(Collect::Generator),
            DestinationWord::Picture => self.begin_picture(),
            DestinationWord::Object => self.begin_object(),
            DestinationWord::ObjectData => {
                self.payload.clear();
                self.hex = Default::default();
                self.set_destination(Destination::ObjectData);
            },
            DestinationWord::ObjectClass => self.collect(Collect::ObjectClass),
            DestinationWord::ObjectName => self.collect(Collect::ObjectName),
            DestinationWord::Field => self.begin_field(),
            DestinationWord::Container(kind) => self.begin_container(kind),
            DestinationWord::Shape => self.begin_shape(NodeKind::Shape(Shape::default())),
            DestinationWord::ShapeGroup => self.begin_shape(NodeKind::ShapeGroup),
            DestinationWord::ShapeProperty => {
                self.pending_property = Default::default();
                self.set_destination(Destination::ShapeProperty);
            },
            DestinationWord::ShapePropertyName => self.collect(Collect::ShapePropertyName),
            DestinationWord::ShapePropertyValue => self.collect(Collect::ShapePropertyValue),
            DestinationWord::Header(kind) => self.begin_header_footer(NodeKind::Header(kind)),
            DestinationWord::Footer(kind) => self.begin_header_footer(NodeKind::Footer(kind)),
            DestinationWord::BookmarkStart | DestinationWord::BookmarkEnd => {
                if self.html.is_some() {
                    self.skip_group();
                    return;
                }
                let marker = if word == DestinationWord::BookmarkStart {
                    BookmarkMarker::Start
                } else {
                    BookmarkMarker::End
                };
                self.collect(Collect::Bookmark(marker));
            },
            DestinationWord::HtmlTag => self.set_destination(Destination::HtmlTag),
            DestinationWord::PassThrough => {},
            DestinationWord::Skip => self.skip_group(),
        }
    }

    fn begin_picture(&mut self) {
        if self.html.is_some() {
            self.skip_group();
            return;
        }
        let level = self.level();
        let placed = matches!(self.tree.top_kind(), OpenKind::Shape | OpenKind::ShapeGroup)
            || self.ensure_inline(level);
        if !placed {
            self.skip_group();
            return;
        }
        self.open_scoped(NodeKind::Image(Picture::default()));
        self.pending_picture = Picture::default();
        self.payload.clear();
        self.hex = Default::default();
        self.set_destination(Destination::Picture);
    }

    fn begin_object(&mut self) {
        let level = self.level();
        if self.html.is_some() || !self.ensure_inline(level) {
            self.skip_group();
            return;
        }
        self.open_scoped(NodeKind::EmbeddedObject(EmbeddedObject::default()));
        self.set_destination(Destination::Object);
    }

    fn begin_field(&mut self) {
        if self.html.is_some() {
            return;
        }
        let level = self.level();
        if !self.ensure_inline(level) {
            self.skip_group();
            return;
        }
        self.open_scoped(NodeKind::Field(Field::default()));
        self.set_destination(Destination::Body);
    }

    fn begin_container(&mut self, kind: ContainerKind) {
        let level = self.level();
        match kind {
            ContainerKind::FieldInstruction => {
                if self.html.is_some() {
                    self.skip_group();
                    return;
                }
                if self.tree.top_kind() != OpenKind::Field && !self.ensure_inline(level) {
                    self.skip_group();
                    return;
                }
                self.open_scoped(NodeKind::Container(kind));
                self.set_destination(Destination::FieldInstruction);
            },
            ContainerKind::FieldResult | ContainerKind::ObjectResult => {
                if self.html.is_some() {
                    return;
                }
                let placed = matches!(self.tree.top_kind(), OpenKind::Field | OpenKind::Object)
                    || self.ensure_inline(level);
                if !placed {
                    self.skip_group();
                    return;
                }
                self.open_scoped(NodeKind::Container(kind));
                self.set_destination(Destination::Body);
            },
            ContainerKind::ShapeText => {
                if self.html.is_some() || self.tree.top_kind() != OpenKind::Shape {
                    self.skip_group();
                    return;
                }
                self.open_block(NodeKind::Container(kind));
                self.set_destination(Destination::Body);
            },
            ContainerKind::Footnote => {
                if self.html.is_some() || !self.ensure_inline(level) {
                    self.skip_group();
                    return;
                }
                self.open_block(NodeKind::Container(kind));
                self.set_destination(Destination::Body);
            },
        }
    }

    fn begin_shape(&mut self, kind: NodeKind) {
        let level = self.level();
        if self.html.is_some() {
            self.skip_group();
            return;
        }
        let placed = self.tree.top_kind() == OpenKind::ShapeGroup || self.ensure_inline(level);
        if !placed {
            self.skip_group();
            return;
        }
        self.open_scoped(kind);
        self.set_destination(Destination::Body);
    }

    fn begin_header_footer(&mut self, kind: NodeKind) {
        if self.html.is_some() {
            self.skip_group();
            return;
        }
        self.open_block(kind);
        self.set_destination(Destination::Body);
    }

    /// Commit what a destination group collected; `level` is the group's own level.
    pub(super) fn finish_destination(&mut self, frame: &Frame, level: usize) {
        match frame.destination {
            Destination::FontTable | Destination::FontEntry => self.commit_font(),
            Destination::ColorTable => {
                if self.pending_color.defined {
                    self.commit_color();
                }
            },
            Destination::List => {
                if let Some(list) = self.pending_list.take() {
                    log::trace!(
                        target: "rtf.parser",
                        "list {} with {} levels",
                        list.id,
                        list.levels.len()
                    );
                    self.lists.add(list);
                }
            },
            Destination::ListLevel => {
                if let Some(level) = self.pending_level.take()
                    && let Some(list) = self.pending_list.as_mut()
                {
                    list.levels.push(level);
                }
            },
            Destination::ListOverride => {
                if let Some(entry) = self.pending_override.take() {
                    self.list_overrides.add(entry);
                }
            },
            Destination::InfoTime(which) => {
                let parts = take(&mut self.time);
                self.info.set_time(which, parts);
            },
            Destination::Collect(target) => {
                let text = take(&mut self.scratch);
                self.finish_collect(target, text, level);
            },
            Destination::Picture => self.finish_picture(frame.node),
            Destination::ObjectData => {
                self.hex.finish();
                let data = take(&mut self.payload);
                self.update_open(OpenKind::Object, |node| {
                    if let NodeKind::EmbeddedObject(object) = node {
                        object.data = data;
                    }
                });
            },
            Destination::ShapeProperty => {
                let property = take(&mut self.pending_property);
                let name = property.name.trim();
                if !name.is_empty() {
                    let property = ShapeProperty {
                        name: name.to_string(),
                        value: property.value,
                    };
                    self.update_open(OpenKind::Shape, |node| {
                        if let NodeKind::Shape(shape) = node {
                            shape.properties.push(property);
                        }
                    });
                }
            },
            Destination::FieldInstruction => self.finish_field_instruction(frame.node),
            _ => {},
        }
    }

    fn finish_collect(&mut self, target: Collect, text: String, level: usize) {
        match target {
            Collect::LevelText => {
                if let Some(list_level) = self.pending_level.as_mut() {
                    list_level.set_raw_text(&text);
                }
            },
            Collect::LevelNumbers => {
                if let Some(list_level) = self.pending_level.as_mut() {
                    list_level.set_raw_numbers(&text);
                }
            },
            Collect::ListName => {
                let name = text.trim().trim_end_matches(';').trim();
                if !name.is_empty()
                    && let Some(list) = self.pending_list.as_mut()
                {
                    list.name = Some(name.to_string());
                }
            },
            Collect::InfoText(field) => self.info.set_text(field, text),
            Collect::Generator => {
                let generator = text.trim().trim_end_matches(';').trim();
                if !generator.is_empty() {
                    self.generator = Some(generator.to_string());
                }
            },
            Collect::ObjectClass | Collect::ObjectName => {
                let value = text.trim().to_string();
                self.update_open(OpenKind::Object, |node| {
                    if let NodeKind::EmbeddedObject(object) = node {
                        if target == Collect::ObjectClass {
                            object.class_name = Some(value);
                        } else {
                            object.name = Some(value);
                        }
                    }
                });
            },
            Collect::ShapePropertyName => self.pending_property.name = text,
            Collect::ShapePropertyValue => self.pending_property.value = text,
            Collect::Bookmark(marker) => {
                let name = text.trim();
                if !name.is_empty() && self.ensure_inline(level) {
                    self.tree
                        .leaf(NodeKind::Bookmark(Bookmark::new(name, marker)), level);
                }
            },
        }
    }

    fn finish_picture(&mut self, node: Option<NodeId>) {
        self.hex.finish();
        let mut picture = take(&mut self.pending_picture);
        picture.data = take(&mut self.payload);
        if picture.image_type == ImageType::Unknown {
            picture.image_type = picture.detected_type();
        }
        log::trace!(
            target: "rtf.parser",
            "{:?} picture, {} bytes",
            picture.image_type,
            picture.data.len()
        );
        match node {
            Some(id) if self.tree.innermost(OpenKind::Image) == Some(id) => {
                self.tree.open_node_mut(id).kind = NodeKind::Image(picture);
            },
            _ => log::debug!(target: "rtf.parser", "picture closed before its data ended"),
        }
    }

    fn finish_field_instruction(&mut self, node: Option<NodeId>) {
        let Some(id) = node else {
            return;
        };
        // Only an instruction placed directly in the innermost open field describes it
        let field = self
            .tree
            .node(id)
            .parent
            .filter(|&parent| self.tree.innermost(OpenKind::Field) == Some(parent));
        let Some(field) = field else {
            log::trace!(target: "rtf.parser", "field instruction outside a field");
            return;
        };

        let parsed = Field::parse_instruction(&self.subtree_text(id));
        let url = parsed.url();
        log::trace!(target: "rtf.parser", "{:?} field: {}", parsed.field_type, parsed.instruction);
        if let NodeKind::Field(current) = &mut self.tree.open_node_mut(field).kind {
            let flags = current.flags;
            *current = parsed;
            current.flags = flags;
        }
        // The instruction frame is gone; the field group's frame is on top
        if let Some(url) = url {
            self.chars_mut().hyperlink = Some(Arc::from(url));
        }
    }

    /// Start a font table entry, committing the previous one.
    pub(super) fn begin_font(&mut self, index: FontRef) {
        self.commit_font();
        self.pending_font = Some(Font::new(index, String::new()));
    }

    fn commit_font(&mut self) {
        let Some(mut font) = self.pending_font.take() else {
            return;
        };
        font.name = font.name.trim().to_string();
        log::trace!(target: "rtf.parser", "font {} = {:?}", font.index, font.name);
        self.fonts.insert(font);
    }

    /// Text inside the font table: the font name, ended by `;`.
    pub(super) fn font_name_text(&mut self, text: &str) {
        let mut parts = text.split(';');
        if let Some(first) = parts.next()
            && let Some(font) = self.pending_font.as_mut()
        {
            font.name.push_str(first);
        }
        // Text after a `;` belongs to no entry until the next `\f`
        for _ in parts {
            self.commit_font();
        }
    }

    fn commit_color(&mut self) {
        let pending = take(&mut self.pending_color);
        if pending.defined {
            self.colors
                .add(Color::new(pending.red, pending.green, pending.blue));
        } else {
            self.colors.add_auto();
        }
    }

    /// Text inside the color table: each `;` ends an entry.
    pub(super) fn color_separators(&mut self, text: &str) {
        for _ in text.matches(';') {
            self.commit_color();
        }
    }
}
