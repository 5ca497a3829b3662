//! RTF shape and drawing object support.
//!
//! Shapes come from `{\shp{\*\shpinst ...}}` groups. Geometry is given by
//! control words, everything else by `{\sp{\sn name}{\sv value}}` property
//! pairs which are kept verbatim.

/// Shape type (from the `shapeType` property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeType {
    /// Rectangle
    Rectangle,
    /// Rounded rectangle
    RoundRectangle,
    /// Ellipse/circle
    Ellipse,
    /// Line
    Line,
    /// Picture frame
    PictureFrame,
    /// Text box
    TextBox,
    /// Any other preset, by number
    Other(i32),
    /// No `shapeType` property given
    #[default]
    Unknown,
}

impl ShapeType {
    /// Map a numeric `shapeType` value.
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::Rectangle,
            2 => Self::RoundRectangle,
            3 => Self::Ellipse,
            20 => Self::Line,
            75 => Self::PictureFrame,
            202 => Self::TextBox,
            other => Self::Other(other),
        }
    }
}

/// Shape position and size, in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeGeometry {
    /// Left edge (`\shpleft`)
    pub left: i32,
    /// Top edge (`\shptop`)
    pub top: i32,
    /// Right edge (`\shpright`)
    pub right: i32,
    /// Bottom edge (`\shpbottom`)
    pub bottom: i32,
    /// Z-order (`\shpz`)
    pub z_order: i32,
}

impl ShapeGeometry {
    /// Width in twips
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Height in twips
    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Text wrapping mode for shapes (`\shpwrN`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Text wraps around the top and bottom of the shape
    TopAndBottom,
    /// Text wraps around the bounding box
    Square,
    /// No wrapping, shape floats
    #[default]
    None,
    /// Text wraps tightly around the shape
    Tight,
    /// Text wraps through transparent regions
    Through,
}

impl WrapMode {
    /// Map a `\shpwr` value.
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::TopAndBottom,
            2 => Self::Square,
            4 => Self::Tight,
            5 => Self::Through,
            _ => Self::None,
        }
    }
}

/// A `{\sp{\sn}{\sv}}` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeProperty {
    /// Property name
    pub name: String,
    /// Property value, as written
    pub value: String,
}

/// RTF shape/drawing object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shape {
    /// Geometry (position and size)
    pub geometry: ShapeGeometry,
    /// Text wrapping mode
    pub wrap_mode: WrapMode,
    /// Whether shape is behind text (`\shpfblwtxt1`)
    pub behind_text: bool,
    /// Shape id (`\shplid`)
    pub id: Option<i32>,
    /// Raw properties in source order
    pub properties: Vec<ShapeProperty>,
}

impl Shape {
    /// Look up a property value by name (case-insensitive, last one wins).
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
    }

    /// Shape type from the `shapeType` property.
    pub fn shape_type(&self) -> ShapeType {
        self.property("shapeType")
            .and_then(|value| value.trim().parse().ok())
            .map_or(ShapeType::Unknown, ShapeType::from_value)
    }

    /// Shape name from the `wzName` property.
    pub fn name(&self) -> Option<&str> {
        self.property("wzName")
    }

    /// Check if this is a text box
    #[inline]
    pub fn is_text_box(&self) -> bool {
        self.shape_type() == ShapeType::TextBox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(name: &str, value: &str) -> ShapeProperty {
        ShapeProperty {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_properties() {
        let shape = Shape {
            properties: vec![
                property("shapeType", "1"),
                property("wzName", "Box 1"),
                property("shapeType", "202"),
            ],
            ..Default::default()
        };

        assert_eq!(shape.shape_type(), ShapeType::TextBox);
        assert!(shape.is_text_box());
        assert_eq!(shape.name(), Some("Box 1"));
        assert_eq!(shape.property("missing"), None);
    }

    #[test]
    fn test_geometry() {
        let geometry = ShapeGeometry {
            left: 100,
            top: 200,
            right: 1540,
            bottom: 920,
            z_order: 0,
        };
        assert_eq!(geometry.width(), 1440);
        assert_eq!(geometry.height(), 720);
        assert_eq!(Shape::default().shape_type(), ShapeType::Unknown);
    }
}
