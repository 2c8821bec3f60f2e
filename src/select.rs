use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::data::model::StationTable;

const LIST_PROMPT: &str =
    "Enter the list of stations you would like to compare, separated by comma:\n";
const RETRY_PROMPT: &str = "Enter it again: ";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A token that names no station in the table. Its message is what the user
/// sees before being asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Station {0} doesn't exist.")]
pub struct InvalidStation(pub String);

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("input closed while waiting for {0}")]
    InputClosed(&'static str),
    #[error("failed to read station names")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Line source abstraction
// ---------------------------------------------------------------------------

/// Where station names come from. The terminal in normal runs, a script in
/// tests.
pub trait LineSource {
    /// Show `prompt` and read one line without its line terminator.
    /// `Ok(None)` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Show an informational message.
    fn notify(&mut self, message: &str);
}

/// Interactive stdin/stdout source.
pub struct StdinSource<R = io::StdinLock<'static>, W = io::Stdout> {
    input: R,
    output: W,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> LineSource for StdinSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{message}") {
            log::warn!("Could not write to terminal: {e}");
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Station names validated against a [`StationTable`], in the order the user
/// typed them. Duplicates are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSelection(Vec<String>);

impl StationSelection {
    pub fn names(&self) -> &[String] {
        &self.0
    }
}

/// Check one trimmed token against the station-name column.
pub fn validate_station(table: &StationTable, token: &str) -> Result<String, InvalidStation> {
    let token = token.trim();
    if table.contains(token) {
        Ok(token.to_string())
    } else {
        Err(InvalidStation(token.to_string()))
    }
}

/// Ask for a comma-separated list of stations and keep asking, token by
/// token, until every entry names a station in `table`.
///
/// Retries are unbounded; only a closed input ends the loop early.
pub fn choose_stations(
    table: &StationTable,
    source: &mut impl LineSource,
) -> Result<StationSelection, SelectError> {
    let line = source
        .read_line(LIST_PROMPT)?
        .ok_or(SelectError::InputClosed("the station list"))?;

    let mut selected = Vec::new();
    for token in line.split(',') {
        let mut attempt = validate_station(table, token);
        let name = loop {
            match attempt {
                Ok(name) => break name,
                Err(invalid) => {
                    log::debug!("Rejected station token {:?}", invalid.0);
                    source.notify(&invalid.to_string());
                    let retry = source
                        .read_line(RETRY_PROMPT)?
                        .ok_or(SelectError::InputClosed("a replacement station"))?;
                    attempt = validate_station(table, &retry);
                }
            }
        };
        selected.push(name);
    }

    log::info!("Selected {} stations: {:?}", selected.len(), selected);
    Ok(StationSelection(selected))
}
