use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single raw spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, normalised across workbook, CSV and Parquet
/// sources before rows are built.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Interpret the cell as a count. Text is trimmed and parsed; thousands
    /// separators are not stripped.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok(),
            CellValue::Bool(_) | CellValue::Null => None,
        }
    }

    /// Cell text as used for station names; `None` for empty cells.
    pub fn as_name(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) if s.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Day types
// ---------------------------------------------------------------------------

/// The three day categories compared for every station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub const ALL: [DayType; 3] = [DayType::Weekday, DayType::Saturday, DayType::Sunday];

    pub fn title(self) -> &'static str {
        match self {
            DayType::Weekday => "Weekday",
            DayType::Saturday => "Saturday",
            DayType::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Entry counts of one row. Cells that did not hold a number load as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCounts {
    pub weekday: f64,
    pub saturday: f64,
    pub sunday: f64,
}

impl DayCounts {
    pub fn get(&self, day: DayType) -> f64 {
        match day {
            DayType::Weekday => self.weekday,
            DayType::Saturday => self.saturday,
            DayType::Sunday => self.sunday,
        }
    }
}

// ---------------------------------------------------------------------------
// StationRow / StationTable
// ---------------------------------------------------------------------------

/// One row of the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub name: String,
    pub counts: DayCounts,
}

/// The loaded dataset. Built once by the loader and never mutated.
#[derive(Debug, Clone, Default)]
pub struct StationTable {
    rows: Vec<StationRow>,
    /// Sheet (or file) the rows were read from, for diagnostics.
    pub source: String,
}

impl StationTable {
    pub fn new(rows: Vec<StationRow>, source: impl Into<String>) -> Self {
        Self {
            rows,
            source: source.into(),
        }
    }

    pub fn rows(&self) -> &[StationRow] {
        &self.rows
    }

    /// Indices of every row whose name equals `name` exactly.
    ///
    /// This is the only matching rule in the program: case-sensitive,
    /// whole-string, no pattern syntax. Selection and extraction both go
    /// through it.
    pub fn matching_indices(&self, name: &str) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.name == name)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rows.iter().any(|row| row.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no station rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
