//! A CSV-backed sheet for recording attendance, plus a console printer
//! that keeps non-ASCII text readable.
//!
//! ```no_run
//! use shusseki::open_sheet;
//!
//! # fn main() -> shusseki::Result<()> {
//! let mut sheet = open_sheet("attendance.csv")?;
//! sheet.append_row(["2025-04-01", "08:35", "1A001", "出席"])?;
//! sheet.display();
//! # Ok(())
//! # }
//! ```

pub mod console;
pub mod error;
pub mod sheet;

pub use console::safe_print;
pub use error::{Result, SheetError};
pub use sheet::{Cell, Sheet, open_sheet};
