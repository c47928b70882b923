//! Format-independent table model and the renderer capability contract.
//!
//! A report is assembled as a [`Table`] of styled [`Cell`]s plus a sparse
//! column-style map, and only a [`Renderer`] implementation knows how those
//! directives translate into a concrete file format.

pub mod csv;
pub mod excel;

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, ToolError};

pub use csv::CsvRenderer;
pub use excel::ExcelRenderer;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb(u32);

impl Rgb {
    /// Builds a color from a `0x00RRGGBB` integer.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parses a `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ToolError::InvalidColor(hex.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ToolError::InvalidColor(hex.to_string()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ToolError::InvalidColor(hex.to_string()))?;
        Ok(Self(value))
    }

    /// Returns the color as a `0x00RRGGBB` integer.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Moves every channel toward white by the given factor in `[0, 1]`:
    /// `channel + (255 - channel) * factor`, rounded to nearest. A factor of
    /// 0 returns the color unchanged, a factor of 1 returns pure white.
    pub fn lighten(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let lighten_channel = |channel: u32| -> u32 {
            let moved = channel as f64 + (255.0 - channel as f64) * factor;
            (moved.round() as u32).min(255)
        };
        let red = lighten_channel((self.0 >> 16) & 0xFF);
        let green = lighten_channel((self.0 >> 8) & 0xFF);
        let blue = lighten_channel(self.0 & 0xFF);
        Self(red << 16 | green << 8 | blue)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// An immutable set of style directives attached to a cell or a column.
///
/// Identity is structural: two sets built from the same directives compare
/// equal and hash identically, which lets a renderer deduplicate the
/// formatting resources it derives from them. An empty set renders as the
/// output format's default formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleSet {
    bold: bool,
    text_size: Option<u16>,
    wrap_text: bool,
    center: bool,
    angle: bool,
    background_color: Option<Rgb>,
    border_right: bool,
    width: Option<u16>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Font size in points.
    pub fn text_size(mut self, points: u16) -> Self {
        self.text_size = Some(points);
        self
    }

    pub fn wrap_text(mut self) -> Self {
        self.wrap_text = true;
        self
    }

    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }

    /// Rotates the cell text by 45 degrees.
    pub fn angle(mut self) -> Self {
        self.angle = true;
        self
    }

    pub fn background_color(mut self, color: Rgb) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Column-level directive: a thick right border over the full row range.
    pub fn border_right(mut self) -> Self {
        self.border_right = true;
        self
    }

    /// Column-level directive: column width in character units.
    pub fn width(mut self, characters: u16) -> Self {
        self.width = Some(characters);
        self
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn font_size(&self) -> Option<u16> {
        self.text_size
    }

    pub fn is_wrap_text(&self) -> bool {
        self.wrap_text
    }

    pub fn is_center(&self) -> bool {
        self.center
    }

    pub fn is_angle(&self) -> bool {
        self.angle
    }

    pub fn fill(&self) -> Option<Rgb> {
        self.background_color
    }

    pub fn has_border_right(&self) -> bool {
        self.border_right
    }

    pub fn column_width(&self) -> Option<u16> {
        self.width
    }
}

/// A scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Plain-text rendering used by the delimited-text output. Whole numbers
    /// print without a fractional part.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => {
                if number.fract() == 0.0 && number.abs() < 1e15 {
                    format!("{}", *number as i64)
                } else {
                    number.to_string()
                }
            }
            CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// A single table cell: an optional value with an optional style. An absent
/// value renders blank, an absent style renders as default formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    value: Option<CellValue>,
    style: Option<StyleSet>,
}

impl Cell {
    pub fn new(value: impl Into<CellValue>, style: StyleSet) -> Self {
        Self {
            value: Some(value.into()),
            style: Some(style),
        }
    }

    /// A cell without a value that still carries a style, used for colored
    /// filler cells in banner rows.
    pub fn blank(style: StyleSet) -> Self {
        Self {
            value: None,
            style: Some(style),
        }
    }

    pub fn value(&self) -> Option<&CellValue> {
        self.value.as_ref()
    }

    pub fn style(&self) -> Option<&StyleSet> {
        self.style.as_ref()
    }
}

/// Rows and columns kept visible while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePane {
    pub rows: u32,
    pub cols: u16,
}

/// An ordered matrix of styled cells plus per-column layout directives.
///
/// Row 0 is conventionally the header row and all rows are expected to have
/// the same length.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    column_styles: BTreeMap<u16, StyleSet>,
    freeze: Option<FreezePane>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn set_column_style(&mut self, column: u16, style: StyleSet) {
        self.column_styles.insert(column, style);
    }

    pub fn set_freeze(&mut self, rows: u32, cols: u16) {
        self.freeze = Some(FreezePane { rows, cols });
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the header row; zero for an empty table.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn column_styles(&self) -> impl Iterator<Item = (u16, &StyleSet)> {
        self.column_styles.iter().map(|(col, style)| (*col, style))
    }

    /// Freeze coordinate, defaulting to the first row and first column.
    pub fn freeze(&self) -> FreezePane {
        self.freeze.unwrap_or(FreezePane { rows: 1, cols: 1 })
    }
}

/// Capability contract implemented by every output format.
pub trait Renderer {
    /// Writes the table to the given path, overwriting an existing file.
    fn render(&self, table: &Table, path: &Path) -> Result<()>;
}
