use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::render::{Renderer, Table};

/// Semicolon-delimited text output. Styles and column directives are
/// ignored; absent cell values render as empty fields.
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn render(&self, table: &Table, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for row in table.rows() {
            let line = row
                .iter()
                .map(|cell| cell.value().map(|value| value.display()).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("; ");
            writeln!(writer, "{line}")?;
        }

        writer.flush()?;
        info!(path = %path.display(), rows = table.row_count(), "created delimited-text file");
        Ok(())
    }
}
