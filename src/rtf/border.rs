//! RTF border and tab stop support.

use super::types::ColorRef;

/// Border style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// No border
    #[default]
    None,
    /// Single line border
    Single,
    /// Single thick line border
    Thick,
    /// Dotted border
    Dotted,
    /// Dashed border
    Dashed,
    /// Dot-dash border
    DotDash,
    /// Dot-dot-dash border
    DotDotDash,
    /// Double line border
    Double,
    /// Triple line border
    Triple,
    /// Hairline border
    Hairline,
    /// Shadowed border
    Shadowed,
    /// Wavy border
    Wavy,
    /// Double wavy border
    WavyDouble,
    /// Embossed border
    Embossed,
    /// Engraved border
    Engraved,
    /// Outset border (3D)
    Outset,
    /// Inset border (3D)
    Inset,
}

impl BorderStyle {
    /// Map a border style control word (`\brdrs`, `\brdrdb`, ...) to a style.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "brdrs" => Self::Single,
            "brdrsh" => Self::Shadowed,
            "brdrth" => Self::Thick,
            "brdrdot" => Self::Dotted,
            "brdrdash" | "brdrdashsm" => Self::Dashed,
            "brdrdashd" => Self::DotDash,
            "brdrdashdd" => Self::DotDotDash,
            "brdrdb" => Self::Double,
            "brdrtriple" => Self::Triple,
            "brdrhair" => Self::Hairline,
            "brdrwavy" => Self::Wavy,
            "brdrwavydb" => Self::WavyDouble,
            "brdremboss" => Self::Embossed,
            "brdrengrave" => Self::Engraved,
            "brdroutset" => Self::Outset,
            "brdrinset" => Self::Inset,
            "brdrnone" | "brdrnil" | "brdrtbl" => Self::None,
            _ => return None,
        })
    }
}

/// Border definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Border style
    pub style: BorderStyle,
    /// Border width (in twips)
    pub width: i32,
    /// Border color reference
    pub color_ref: ColorRef,
    /// Space between border and content (in twips)
    pub space: i32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::default(),
            width: 15, // 1pt
            color_ref: 0,
            space: 0,
        }
    }
}

impl Border {
    /// Create a new border
    #[inline]
    pub fn new(style: BorderStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Check if border is visible
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width > 0
    }
}

/// Which side a border control word addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    /// `\brdrt`
    Top,
    /// `\brdrb`
    Bottom,
    /// `\brdrl`
    Left,
    /// `\brdrr`
    Right,
    /// `\box`, all four sides
    Box,
}

/// Borders for a paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    /// Top border
    pub top: Border,
    /// Bottom border
    pub bottom: Border,
    /// Left border
    pub left: Border,
    /// Right border
    pub right: Border,
}

impl Borders {
    /// Set all borders to the same style
    #[inline]
    pub fn all(border: Border) -> Self {
        Self {
            top: border,
            bottom: border,
            left: border,
            right: border,
        }
    }

    /// Apply `update` to the border(s) addressed by `side`.
    pub fn update(&mut self, side: BorderSide, mut update: impl FnMut(&mut Border)) {
        match side {
            BorderSide::Top => update(&mut self.top),
            BorderSide::Bottom => update(&mut self.bottom),
            BorderSide::Left => update(&mut self.left),
            BorderSide::Right => update(&mut self.right),
            BorderSide::Box => {
                for border in [&mut self.top, &mut self.bottom, &mut self.left, &mut self.right] {
                    update(border);
                }
            },
        }
    }

    /// Check if any border is visible
    #[inline]
    pub fn has_any_border(&self) -> bool {
        self.top.is_visible()
            || self.bottom.is_visible()
            || self.left.is_visible()
            || self.right.is_visible()
    }
}

/// Tab stop alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabAlignment {
    /// Left-aligned tab
    #[default]
    Left,
    /// Right-aligned tab
    Right,
    /// Centered tab
    Center,
    /// Decimal tab (align on decimal point)
    Decimal,
    /// Bar tab (vertical bar)
    Bar,
}

/// Tab stop leader character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabLeader {
    /// No leader
    #[default]
    None,
    /// Dot leader (........)
    Dot,
    /// Hyphen leader (--------)
    Hyphen,
    /// Underscore leader (________)
    Underscore,
    /// Thick line leader
    ThickLine,
    /// Equal sign leader (========)
    Equal,
}

/// Tab stop definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabStop {
    /// Position (in twips from left margin)
    pub position: i32,
    /// Alignment
    pub alignment: TabAlignment,
    /// Leader character
    pub leader: TabLeader,
}

impl TabStop {
    /// Create a new tab stop
    #[inline]
    pub fn new(position: i32, alignment: TabAlignment, leader: TabLeader) -> Self {
        Self {
            position,
            alignment,
            leader,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_keywords() {
        assert_eq!(BorderStyle::from_keyword("brdrs"), Some(BorderStyle::Single));
        assert_eq!(BorderStyle::from_keyword("brdrsh"), Some(BorderStyle::Shadowed));
        assert_eq!(BorderStyle::from_keyword("brdrdb"), Some(BorderStyle::Double));
        assert_eq!(BorderStyle::from_keyword("brdrw"), None);
    }

    #[test]
    fn test_box_updates_every_side() {
        let mut borders = Borders::default();
        borders.update(BorderSide::Box, |border| border.style = BorderStyle::Single);
        assert!(borders.has_any_border());
        assert_eq!(borders, Borders::all(Border::new(BorderStyle::Single)));

        borders.update(BorderSide::Left, |border| border.width = 0);
        assert!(!borders.left.is_visible());
        assert!(borders.right.is_visible());
    }
}
