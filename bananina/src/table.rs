//! Per-category CSV tables: written once by the scraper, rewritten by the image fetcher.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{error::AppError, record::ProductRecord};

/// Header written by the scraper, in order.
pub const COLUMNS: [&str; 13] = [
    "Brand",
    "Name",
    "Price",
    "Original Price",
    "Discount",
    "Product Link",
    "Primary Image",
    "Hover Image",
    "SKU",
    "Quality",
    "Description",
    "Details",
    "Condition",
];

pub const NAME_COLUMN: &str = "Name";

/// Streams records into a fresh table as they are scraped.
pub struct ProductTableWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: usize,
}

impl ProductTableWriter {
    pub fn create(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_path(path)?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub fn write(&mut self, record: &ProductRecord) -> Result<(), AppError> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    /// Flushes the file and returns how many rows it holds.
    pub fn finish(mut self) -> Result<usize, AppError> {
        self.writer.flush()?;
        log::info!("saved {} rows to {}", self.rows, self.path.display());
        Ok(self.rows)
    }
}

/// A table held in memory as plain strings, addressed by header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

        let headers = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(String::from).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn require_column(&self, name: &str, path: &Path) -> Result<usize, AppError> {
        self.column_index(name).ok_or_else(|| AppError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    }

    /// Cell content, empty for short rows.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    /// Overwrites a column in place, or appends it when the header is new.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let column = match self.column_index(name) {
            Some(column) => column,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };

        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() <= column {
                row.resize(column + 1, String::new());
            }
            row[column] = value;
        }
    }

    /// Rewrites the whole file, padding short rows to the header width.
    /// Rows longer than the header are kept as read.
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        let width = self.headers.len();
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            let padding = width.saturating_sub(row.len());
            writer.write_record(
                row.iter()
                    .map(String::as_str)
                    .chain(std::iter::repeat("").take(padding)),
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::record::{DetailFields, Field, ItemSummary, NO_DISCOUNT};

    fn record(name: &str) -> ProductRecord {
        ProductRecord::new(
            ItemSummary {
                name: Field::from(name),
                discount: NO_DISCOUNT.to_string(),
                ..ItemSummary::default()
            },
            DetailFields::unavailable(),
        )
    }

    #[test]
    fn writer_emits_fixed_column_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("totes_bags.csv");

        let mut writer = ProductTableWriter::create(&path).unwrap();
        writer.write(&record("Neverfull, MM")).unwrap();
        assert_eq!(writer.finish().unwrap(), 1);

        let table = Table::read(&path).unwrap();
        assert_eq!(table.headers(), COLUMNS);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), "Neverfull, MM");
        assert_eq!(table.cell(0, 0), "N/A");
        assert_eq!(table.cell(0, 4), NO_DISCOUNT);
    }

    #[test]
    fn set_column_appends_then_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "Name,Primary Image\na,http://x/a.jpg\nb,N/A\n").unwrap();

        let mut table = Table::read(&path).unwrap();
        table.set_column("Local", vec!["p/a.jpg".into(), String::new()]);
        assert_eq!(table.headers(), ["Name", "Primary Image", "Local"]);

        table.set_column("Local", vec!["p/a2.jpg".into(), "p/b.jpg".into()]);
        table.write(&path).unwrap();

        let reread = Table::read(&path).unwrap();
        assert_eq!(reread.headers().len(), 3);
        assert_eq!(reread.cell(0, 2), "p/a2.jpg");
        assert_eq!(reread.cell(1, 2), "p/b.jpg");
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "Brand\nx\n").unwrap();

        let table = Table::read(&path).unwrap();
        assert!(matches!(
            table.require_column(NAME_COLUMN, &path),
            Err(AppError::MissingColumn { .. })
        ));
    }

    #[test]
    fn rows_wider_than_header_survive_rewrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "Name,Primary Image\na,http://x/a.jpg,stray,extra\nb\n").unwrap();

        let mut table = Table::read(&path).unwrap();
        table.set_column("Local", vec!["p/a.jpg".into(), "p/b.jpg".into()]);
        table.write(&path).unwrap();

        let reread = Table::read(&path).unwrap();
        assert_eq!(reread.headers(), ["Name", "Primary Image", "Local"]);
        assert_eq!(reread.cell(0, 2), "p/a.jpg");
        assert_eq!(reread.cell(0, 3), "extra");
        assert_eq!(reread.cell(1, 1), "");
        assert_eq!(reread.cell(1, 2), "p/b.jpg");
    }
}
