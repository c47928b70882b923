use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use tracing::info;

use crate::error::Result;
use crate::render::{CellValue, Renderer, StyleSet, Table};

const FONT_NAME: &str = "Aptos Narrow";

/// Spreadsheet output backed by `rust_xlsxwriter`.
///
/// One formatting resource is derived per distinct style set observed in the
/// table (structural equality, so identical sets share a format). Cells in a
/// column with a right-border directive get a widened variant of their
/// format, mirroring a border drawn over the full row range.
pub struct ExcelRenderer;

impl Renderer for ExcelRenderer {
    fn render(&self, table: &Table, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let border_columns: HashSet<u16> = table
            .column_styles()
            .filter(|(_, style)| style.has_border_right())
            .map(|(column, _)| column)
            .collect();

        let mut formats: HashMap<(Option<StyleSet>, bool), Format> = HashMap::new();

        for (row_index, row) in table.rows().iter().enumerate() {
            for (col_index, cell) in row.iter().enumerate() {
                let row_number = row_index as u32;
                let col_number = col_index as u16;
                let bordered = border_columns.contains(&col_number);

                let key = (cell.style().cloned(), bordered);
                let format = match (&key.0, bordered) {
                    // Unstyled cell outside border columns: default format.
                    (None, false) => None,
                    _ => Some(
                        formats
                            .entry(key.clone())
                            .or_insert_with(|| derive_format(key.0.as_ref(), bordered)),
                    ),
                };

                match (cell.value(), format) {
                    (Some(CellValue::Text(text)), Some(format)) => {
                        worksheet.write_with_format(row_number, col_number, text.as_str(), format)?;
                    }
                    (Some(CellValue::Text(text)), None) => {
                        worksheet.write(row_number, col_number, text.as_str())?;
                    }
                    (Some(CellValue::Number(number)), Some(format)) => {
                        worksheet.write_with_format(row_number, col_number, *number, format)?;
                    }
                    (Some(CellValue::Number(number)), None) => {
                        worksheet.write(row_number, col_number, *number)?;
                    }
                    (Some(CellValue::Date(date)), Some(format)) => {
                        worksheet.write_with_format(row_number, col_number, &*date, format)?;
                    }
                    (Some(CellValue::Date(date)), None) => {
                        worksheet.write(row_number, col_number, &*date)?;
                    }
                    (None, Some(format)) => {
                        worksheet.write_blank(row_number, col_number, format)?;
                    }
                    (None, None) => {}
                }
            }
        }

        for (column, style) in table.column_styles() {
            if let Some(width) = style.column_width() {
                worksheet.set_column_width(column, width as f64)?;
            }
        }

        if table.column_count() > 0 {
            worksheet.autofilter(0, 0, 0, (table.column_count() - 1) as u16)?;
        }

        let freeze = table.freeze();
        worksheet.set_freeze_panes(freeze.rows, freeze.cols)?;

        workbook.save(path)?;
        info!(path = %path.display(), rows = table.row_count(), "created Excel file");
        Ok(())
    }
}

/// Maps a style set onto an `rust_xlsxwriter` format. Column-only directives
/// (width) occurring on a cell style are ignored rather than treated as
/// errors.
fn derive_format(style: Option<&StyleSet>, bordered: bool) -> Format {
    let mut format = Format::new().set_font_name(FONT_NAME);

    if let Some(style) = style {
        if style.is_bold() {
            format = format.set_bold();
        }
        if let Some(points) = style.font_size() {
            format = format.set_font_size(points as f64);
        }
        if style.is_angle() {
            format = format.set_rotation(45);
        }
        if style.is_wrap_text() {
            format = format.set_text_wrap();
        }
        if style.is_center() {
            format = format.set_align(FormatAlign::Center);
        }
        if let Some(color) = style.fill() {
            format = format.set_background_color(Color::RGB(color.value()));
        }
    }

    if bordered {
        format = format.set_border_right(FormatBorder::Thick);
    }

    format
}
