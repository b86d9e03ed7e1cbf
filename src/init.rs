use anyhow::Result;
use std::path::{Path, PathBuf};

use shusseki::open_sheet;

pub const HEADER: [&str; 4] = ["date", "time", "student", "status"];

/// Creates a new attendance sheet with the header row, appending a `.csv`
/// extension if the given name has none. Refuses to overwrite an existing
/// file.
pub fn init_sheet(path: &Path) -> Result<PathBuf> {
    let csv_path = if path.extension().is_some_and(|ext| ext == "csv") {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    };
    if csv_path.exists() {
        anyhow::bail!("sheet already exists: {}", csv_path.display());
    }

    let mut sheet = open_sheet(&csv_path)?;
    sheet.append_row(HEADER)?;
    println!("created sheet: {}", csv_path.display());
    Ok(csv_path)
}
