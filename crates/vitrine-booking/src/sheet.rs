#![forbid(unsafe_code)]

//! Tabular storage for submissions.
//!
//! [`SheetStore`] is the seam to a spreadsheet service. [`MemorySheet`] keeps
//! everything in memory and is what the tests run against.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

/// Errors from a sheet backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The named sheet does not exist.
    NotFound(String),
    /// The backend refused the operation.
    Unavailable(String),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::NotFound(name) => write!(f, "sheet not found: {name}"),
            SheetError::Unavailable(msg) => write!(f, "sheet unavailable: {msg}"),
        }
    }
}

impl std::error::Error for SheetError {}

/// Result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// A spreadsheet holding named sheets of string cells.
pub trait SheetStore: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Create `sheet` with a bold, frozen `header` row unless it exists.
    ///
    /// Returns whether the sheet was created.
    fn ensure_sheet(&self, sheet: &str, header: &[&str]) -> SheetResult<bool>;

    /// Append `row` after the last row and return its 1-based row number.
    fn append_row(&self, sheet: &str, row: &[String]) -> SheetResult<usize>;
}

/// One sheet of a [`MemorySheet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    /// Rows including the header.
    pub rows: Vec<Vec<String>>,
    /// Whether the header row is bold.
    pub bold_header: bool,
    /// Number of frozen rows.
    pub frozen_rows: usize,
}

/// In-memory spreadsheet.
#[derive(Default)]
pub struct MemorySheet {
    sheets: RwLock<HashMap<String, SheetData>>,
    unavailable: Option<String>,
}

impl MemorySheet {
    /// Empty spreadsheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spreadsheet whose every write fails with `reason`.
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self {
            sheets: RwLock::default(),
            unavailable: Some(reason.to_owned()),
        }
    }

    /// Snapshot of one sheet.
    #[must_use]
    pub fn sheet(&self, name: &str) -> Option<SheetData> {
        self.sheets.read().ok()?.get(name).cloned()
    }

    fn check(&self) -> SheetResult<()> {
        match &self.unavailable {
            Some(reason) => Err(SheetError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl SheetStore for MemorySheet {
    fn name(&self) -> &str {
        "MemorySheet"
    }

    fn ensure_sheet(&self, sheet: &str, header: &[&str]) -> SheetResult<bool> {
        self.check()?;
        let mut guard = self
            .sheets
            .write()
            .map_err(|_| SheetError::Unavailable("lock poisoned".into()))?;
        if guard.contains_key(sheet) {
            return Ok(false);
        }
        guard.insert(
            sheet.to_owned(),
            SheetData {
                rows: vec![header.iter().map(|&cell| cell.to_owned()).collect()],
                bold_header: true,
                frozen_rows: 1,
            },
        );
        Ok(true)
    }

    fn append_row(&self, sheet: &str, row: &[String]) -> SheetResult<usize> {
        self.check()?;
        let mut guard = self
            .sheets
            .write()
            .map_err(|_| SheetError::Unavailable("lock poisoned".into()))?;
        let data = guard
            .get_mut(sheet)
            .ok_or_else(|| SheetError::NotFound(sheet.to_owned()))?;
        data.rows.push(row.to_vec());
        Ok(data.rows.len())
    }
}

impl fmt::Debug for MemorySheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.sheets.read().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemorySheet")
            .field("sheets", &count)
            .field("unavailable", &self.unavailable)
            .finish()
    }
}
