//! A small table of string cells backed by a CSV file.
//!
//! Rows and columns are addressed 1-based throughout; index 0 is rejected.
//! A file-backed sheet rewrites its whole file on every mutation, which is
//! fine for the classroom-sized tables this is meant for.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::console::{render_table, safe_print};
use crate::error::{Result, SheetError};

/// A single cell lookup result.
///
/// `value` is `None` when the address lies outside the current table or the
/// stored cell is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: Option<String>,
}

/// An in-memory table of string cells, optionally backed by a CSV file.
///
/// Row lengths need not be uniform. When a backing file is present, every
/// mutating call persists before returning, so no explicit save or close is
/// needed. The file is assumed to be owned exclusively by this process;
/// deleting or rewriting it out-of-band between calls is not handled.
pub struct Sheet {
    path: Option<PathBuf>,
    rows: Vec<Vec<String>>,
}

/// Opens the sheet at `path`, creating an empty file (and any missing
/// parent directories) if it does not exist yet.
pub fn open_sheet<P: AsRef<Path>>(path: P) -> Result<Sheet> {
    Sheet::open(path)
}

impl Sheet {
    /// An empty sheet with no backing file. Mutations stay in memory.
    pub fn new() -> Self {
        Self {
            path: None,
            rows: Vec::new(),
        }
    }

    /// Opens or creates the CSV file at `path` and loads it into memory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        create_parent_dirs(&path)?;
        let rows = if path.exists() {
            load_rows(&path)?
        } else {
            File::create(&path)?;
            Vec::new()
        };
        Ok(Self {
            path: Some(path),
            rows,
        })
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// A snapshot copy of all rows in file order.
    pub fn get_all_rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    /// Sets the cell at (`row`, `col`), both 1-based, growing the table as
    /// needed: missing rows and cells are padded with empty strings.
    /// Persists before returning when file-backed.
    pub fn set_cell(&mut self, row: u32, col: u32, value: impl Into<String>) -> Result<()> {
        validate_index(row, "row")?;
        validate_index(col, "col")?;
        let row_idx = (row - 1) as usize;
        let col_idx = (col - 1) as usize;

        while self.rows.len() <= row_idx {
            self.rows.push(vec![String::new()]);
        }
        let row_data = &mut self.rows[row_idx];
        while row_data.len() <= col_idx {
            row_data.push(String::new());
        }
        row_data[col_idx] = value.into();
        self.flush()
    }

    /// Returns the cell at (`row`, `col`), both 1-based. Out-of-bounds
    /// addresses and empty cells come back as `value: None`, not an error.
    pub fn get_cell(&self, row: u32, col: u32) -> Result<Cell> {
        validate_index(row, "row")?;
        validate_index(col, "col")?;
        let value = self
            .rows
            .get((row - 1) as usize)
            .and_then(|r| r.get((col - 1) as usize))
            .filter(|v| !v.is_empty())
            .cloned();
        Ok(Cell { row, col, value })
    }

    /// Appends a row to the end of the table, persists, and returns the new
    /// 1-based row number. At least one value is required; the values
    /// themselves are unconstrained.
    pub fn append_row<I, S>(&mut self, values: I) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = values.into_iter().map(Into::into).collect();
        if row.is_empty() {
            return Err(SheetError::InvalidParameter(
                "append_row requires at least one value".to_string(),
            ));
        }
        self.rows.push(row);
        self.flush()?;
        Ok(self.rows.len() as u32)
    }

    /// A copy of the given 1-based row, or an empty vector past the end.
    pub fn get_row(&self, row: u32) -> Result<Vec<String>> {
        validate_index(row, "row")?;
        Ok(self
            .rows
            .get((row - 1) as usize)
            .cloned()
            .unwrap_or_default())
    }

    /// A copy of the given 1-based column, one entry per row; rows shorter
    /// than `col` contribute an empty string.
    pub fn get_column(&self, col: u32) -> Result<Vec<String>> {
        validate_index(col, "col")?;
        let col_idx = (col - 1) as usize;
        Ok(self
            .rows
            .iter()
            .map(|r| r.get(col_idx).cloned().unwrap_or_default())
            .collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Removes every row and persists the now-empty table.
    pub fn clear(&mut self) -> Result<()> {
        self.rows.clear();
        self.flush()
    }

    /// Writes the current rows as CSV to `path`, or to
    /// `sheets/<YYYYMMDD_HHMMSS>.csv` when `path` is `None`, creating parent
    /// directories as needed. Returns the written path. The backing file of
    /// this sheet is unaffected.
    pub fn save_copy(&self, path: Option<&Path>) -> Result<PathBuf> {
        let target = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let timestamp = Local::now().format("%Y%m%d_%H%M%S");
                PathBuf::from("sheets").join(format!("{timestamp}.csv"))
            }
        };
        create_parent_dirs(&target)?;
        write_rows(&target, &self.rows)?;
        Ok(target)
    }

    /// Renders the table as an aligned text grid.
    pub fn render(&self) -> String {
        render_table(&self.rows)
    }

    /// Prints the table to the console via [`safe_print`].
    pub fn display(&self) {
        safe_print([self.render()]);
    }

    fn flush(&self) -> Result<()> {
        match &self.path {
            Some(path) => write_rows(path, &self.rows),
            None => Ok(()),
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        // Path::parent returns Some("") for a bare file name.
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn validate_index(value: u32, name: &str) -> Result<()> {
    if value == 0 {
        return Err(SheetError::InvalidParameter(format!(
            "{name} must be 1 or greater"
        )));
    }
    Ok(())
}

fn load_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    // Quote every field so a padded row of empty cells comes out as a ""
    // line instead of a blank line the reader would drop, keeping row
    // numbers stable across a reload.
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_missing_file_creates_empty_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.csv");
        let sheet = open_sheet(&path).unwrap();
        assert!(path.exists());
        assert_eq!(sheet.path(), Some(path.as_path()));
        assert!(sheet.get_all_rows().is_empty());
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheets").join("april.csv");
        open_sheet(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn appended_rows_round_trip_through_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.csv");

        let mut sheet = open_sheet(&path).unwrap();
        sheet
            .append_row(["2025-04-01", "08:35", "1A001", "出席"])
            .unwrap();
        sheet
            .append_row(["2025-04-01", "08:41", "1A002", "遅刻"])
            .unwrap();

        let reopened = open_sheet(&path).unwrap();
        let rows = reopened.get_all_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["2025-04-01", "08:35", "1A001", "出席"]);
        assert_eq!(rows[1], ["2025-04-01", "08:41", "1A002", "遅刻"]);
    }

    #[test]
    fn append_row_returns_one_based_row_numbers() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.append_row(["a"]).unwrap(), 1);
        assert_eq!(sheet.append_row(["b"]).unwrap(), 2);
    }

    #[test]
    fn append_row_rejects_empty_input() {
        let mut sheet = Sheet::new();
        let err = sheet.append_row(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SheetError::InvalidParameter(_)));
    }

    #[test]
    fn set_then_get_returns_the_value() {
        let mut sheet = Sheet::new();
        sheet.set_cell(1, 1, "4月").unwrap();
        let cell = sheet.get_cell(1, 1).unwrap();
        assert_eq!(cell.value.as_deref(), Some("4月"));
    }

    #[test]
    fn set_cell_beyond_bounds_pads_with_empty_strings() {
        let mut sheet = Sheet::new();
        sheet.set_cell(3, 2, "x").unwrap();
        assert_eq!(
            sheet.get_all_rows(),
            vec![
                vec!["".to_string()],
                vec!["".to_string()],
                vec!["".to_string(), "x".to_string()],
            ]
        );
    }

    #[test]
    fn padded_rows_survive_a_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.csv");

        let mut sheet = open_sheet(&path).unwrap();
        sheet.set_cell(3, 2, "x").unwrap();

        let reopened = open_sheet(&path).unwrap();
        assert_eq!(reopened.get_all_rows(), sheet.get_all_rows());
        assert_eq!(reopened.get_cell(3, 2).unwrap().value.as_deref(), Some("x"));
    }

    #[test]
    fn index_zero_is_rejected() {
        let mut sheet = Sheet::new();
        assert!(matches!(
            sheet.set_cell(0, 1, "x"),
            Err(SheetError::InvalidParameter(_))
        ));
        assert!(matches!(
            sheet.get_cell(1, 0),
            Err(SheetError::InvalidParameter(_))
        ));
    }

    #[test]
    fn out_of_bounds_get_cell_is_none() {
        let sheet = Sheet::new();
        let cell = sheet.get_cell(5, 5).unwrap();
        assert_eq!(cell.value, None);
        assert_eq!(cell.row, 5);
        assert_eq!(cell.col, 5);
    }

    #[test]
    fn rows_and_columns_are_copied_out() {
        let mut sheet = Sheet::new();
        sheet.append_row(["a", "b"]).unwrap();
        sheet.append_row(["c"]).unwrap();

        assert_eq!(sheet.get_row(1).unwrap(), vec!["a", "b"]);
        assert_eq!(sheet.get_row(9).unwrap(), Vec::<String>::new());
        assert_eq!(sheet.get_column(2).unwrap(), vec!["b", ""]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.column_count(), 2);
    }

    #[test]
    fn clear_persists_an_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("attendance.csv");

        let mut sheet = open_sheet(&path).unwrap();
        sheet.append_row(["a"]).unwrap();
        sheet.clear().unwrap();

        let reopened = open_sheet(&path).unwrap();
        assert_eq!(reopened.row_count(), 0);
    }

    #[test]
    fn save_copy_writes_identical_rows() {
        let dir = tempdir().unwrap();
        let mut sheet = Sheet::new();
        sheet.append_row(["2025-04-01", "出席"]).unwrap();

        let copy_path = dir.path().join("copies").join("backup.csv");
        let written = sheet.save_copy(Some(&copy_path)).unwrap();
        assert_eq!(written, copy_path);

        let copy = open_sheet(&copy_path).unwrap();
        assert_eq!(copy.get_all_rows(), sheet.get_all_rows());
    }

    #[test]
    fn render_reflects_sheet_contents() {
        let mut sheet = Sheet::new();
        assert_eq!(sheet.render(), "(empty sheet)");
        sheet.append_row(["a"]).unwrap();
        assert_eq!(sheet.render(), "+---+\n| a |\n+---+");
    }
}
