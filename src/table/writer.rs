use std::io::Write;

use super::ExportTable;
use crate::error::ExportError;

/// Missing-value token written by default
pub(crate) const DEFAULT_NA: &str = "NA";

/// Cells are written unquoted, so a delimiter or line break would shift columns
fn check_cell(column: &str, row: usize, value: &str) -> Result<(), ExportError> {
    if value.contains(['\t', '\n', '\r']) {
        return Err(ExportError::InvalidValue {
            column: column.to_string(),
            row,
            value: value.to_string(),
        });
    }
    Ok(())
}

impl ExportTable {
    /// Write the table as tab-separated text with a header row.
    ///
    /// Nothing is quoted; missing cells are written as `na_value`. A header,
    /// identifier or cell holding a tab or line break is an `InvalidValue`
    /// error (row 0 is the header).
    pub fn write_tsv<W: Write>(&self, sink: W, na_value: &str) -> Result<(), ExportError> {
        let header = self.header();
        for name in &header {
            check_cell(name, 0, name)?;
        }
        check_cell("NA token", 0, na_value)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(sink);

        writer.write_record(&header)?;

        for (i, row) in self.rows().iter().enumerate() {
            let row_number = i + 1;
            let mut record = Vec::with_capacity(header.len());
            check_cell(header[0], row_number, &row.feature_id)?;
            record.push(row.feature_id.clone());
            for (column, cell) in header[1..].iter().zip(&row.cells) {
                let text = match cell {
                    Some(value) => value.to_string(),
                    None => na_value.to_string(),
                };
                check_cell(column, row_number, &text)?;
                record.push(text);
            }
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Render the table as a TSV string using the default `NA` token
    pub fn to_tsv_string(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_tsv(&mut buffer, DEFAULT_NA)?;
        String::from_utf8(buffer).map_err(|e| {
            ExportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}
