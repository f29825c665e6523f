//! Typed property values and attributes.

use std::path::{Path, PathBuf};

use tilekit_core::{Color, Point, Size, TilesetParameters};

/// Attribute holding the filter of a file-path editor's dialog.
pub const FILTER_ATTRIBUTE: &str = "filter";

/// Attribute holding the completion list of a string editor.
pub const SUGGESTIONS_ATTRIBUTE: &str = "suggestions";

/// Type tag of a property, used to pick its editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    String,
    Int,
    Bool,
    Color,
    Point,
    Size,
    FilePath,
    TilesetParameters,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Bool => "bool",
            PropertyType::Color => "color",
            PropertyType::Point => "point",
            PropertyType::Size => "size",
            PropertyType::FilePath => "file path",
            PropertyType::TilesetParameters => "tileset parameters",
        };
        f.write_str(name)
    }
}

/// Value of a property. The variant determines the property's type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Int(i64),
    Bool(bool),
    /// `None` is the "no color" state of an optional color
    Color(Option<Color>),
    Point(Point),
    Size(Size),
    FilePath(PathBuf),
    TilesetParameters(TilesetParameters),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Color(_) => PropertyType::Color,
            PropertyValue::Point(_) => PropertyType::Point,
            PropertyValue::Size(_) => PropertyType::Size,
            PropertyValue::FilePath(_) => PropertyType::FilePath,
            PropertyValue::TilesetParameters(_) => PropertyType::TilesetParameters,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            PropertyValue::Point(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            PropertyValue::FilePath(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_tileset_parameters(&self) -> Option<&TilesetParameters> {
        match self {
            PropertyValue::TilesetParameters(p) => Some(p),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Color(Some(c)) => write!(f, "{}", c.to_hex()),
            PropertyValue::Color(None) => write!(f, "none"),
            PropertyValue::Point(p) => write!(f, "{}", p),
            PropertyValue::Size(s) => write!(f, "{}", s),
            PropertyValue::FilePath(p) => write!(f, "{}", p.display()),
            PropertyValue::TilesetParameters(p) => {
                write!(f, "{} [{}]", p.image_source.display(), p.tile_size)
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<Point> for PropertyValue {
    fn from(p: Point) -> Self {
        PropertyValue::Point(p)
    }
}

impl From<TilesetParameters> for PropertyValue {
    fn from(p: TilesetParameters) -> Self {
        PropertyValue::TilesetParameters(p)
    }
}

/// Value of a property attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    List(Vec<String>),
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttributeValue::List(items) => Some(items),
            AttributeValue::Text(_) => None,
        }
    }
}
