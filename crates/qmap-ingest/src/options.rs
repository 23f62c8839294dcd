//! Ingestion options.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Zero-based sheet position.
    Index(usize),
    /// Sheet name, matched exactly first and then ignoring case.
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl FromStr for SheetSelector {
    type Err = Infallible;

    /// All-digit input selects by index, anything else by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(trimmed.to_string()),
        })
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Options for loading a worksheet into a row store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Sheet to read from workbooks; ignored for CSV and JSON input.
    pub sheet: SheetSelector,
    /// Skip rows whose cells are all empty.
    pub skip_blank_rows: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::default(),
            skip_blank_rows: true,
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: SheetSelector) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn keep_blank_rows(mut self) -> Self {
        self.skip_blank_rows = false;
        self
    }
}
