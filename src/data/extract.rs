use thiserror::Error;

use super::model::{DayCounts, DayType, StationTable};
use crate::select::StationSelection;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A selected name has no row. Cannot happen for a selection built
    /// against the same table; reported instead of yielding an empty series.
    #[error("station '{0}' is not in the loaded table")]
    StationMissing(String),
}

// ---------------------------------------------------------------------------
// Per-station lookup
// ---------------------------------------------------------------------------

/// Outcome of looking one name up in the table.
#[derive(Debug, Clone, PartialEq)]
pub enum StationMatch {
    Found(DayCounts),
    /// The name occurs on several rows; all of them, in table order.
    Multiple(Vec<DayCounts>),
    NotFound,
}

impl StationMatch {
    fn into_counts(self) -> Vec<DayCounts> {
        match self {
            StationMatch::Found(c) => vec![c],
            StationMatch::Multiple(cs) => cs,
            StationMatch::NotFound => Vec::new(),
        }
    }
}

pub fn lookup(table: &StationTable, name: &str) -> StationMatch {
    let rows = table.rows();
    let mut counts: Vec<DayCounts> = table
        .matching_indices(name)
        .into_iter()
        .map(|i| rows[i].counts)
        .collect();
    match counts.len() {
        0 => StationMatch::NotFound,
        1 => StationMatch::Found(counts.remove(0)),
        _ => StationMatch::Multiple(counts),
    }
}

// ---------------------------------------------------------------------------
// ExtractedSeries
// ---------------------------------------------------------------------------

/// Counts per selected station, one outer entry per station in selection
/// order. Each inner vector holds the values of every matching row
/// (normally exactly one).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedSeries {
    pub weekday: Vec<Vec<f64>>,
    pub saturday: Vec<Vec<f64>>,
    pub sunday: Vec<Vec<f64>>,
}

impl ExtractedSeries {
    pub fn day(&self, day: DayType) -> &[Vec<f64>] {
        match day {
            DayType::Weekday => &self.weekday,
            DayType::Saturday => &self.saturday,
            DayType::Sunday => &self.sunday,
        }
    }

    /// One value per station: the sum over its matching rows.
    pub fn totals(&self, day: DayType) -> Vec<f64> {
        self.day(day).iter().map(|vals| vals.iter().sum()).collect()
    }

    fn day_mut(&mut self, day: DayType) -> &mut Vec<Vec<f64>> {
        match day {
            DayType::Weekday => &mut self.weekday,
            DayType::Saturday => &mut self.saturday,
            DayType::Sunday => &mut self.sunday,
        }
    }
}

/// Read weekday/Saturday/Sunday counts for every selected station.
pub fn extract_data(
    selection: &StationSelection,
    table: &StationTable,
) -> Result<ExtractedSeries, ExtractError> {
    let mut series = ExtractedSeries::default();

    for name in selection.names() {
        let name = name.trim();
        let counts = match lookup(table, name) {
            StationMatch::NotFound => return Err(ExtractError::StationMissing(name.to_string())),
            m @ StationMatch::Multiple(_) => {
                log::warn!("Station '{name}' matches several rows; keeping all of them");
                m.into_counts()
            }
            m => m.into_counts(),
        };
        for day in DayType::ALL {
            series
                .day_mut(day)
                .push(counts.iter().map(|c| c.get(day)).collect());
        }
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{row, sample_table};
    use crate::select::tests::{ScriptedSource, select};
    use crate::select::choose_stations;

    #[test]
    fn oxford_circus_and_victoria() {
        let table = sample_table();
        let selection = select(&["Oxford Circus, Victoria"]);
        let series = extract_data(&selection, &table).unwrap();

        assert_eq!(series.weekday, vec![vec![100.0], vec![200.0]]);
        assert_eq!(series.saturday, vec![vec![50.0], vec![90.0]]);
        assert_eq!(series.sunday, vec![vec![30.0], vec![60.0]]);
    }

    #[test]
    fn series_align_with_selection() {
        let table = sample_table();
        let selection = select(&["Victoria,Victoria,Oxford Circus"]);
        let series = extract_data(&selection, &table).unwrap();

        assert_eq!(series.weekday.len(), selection.names().len());
        for day in DayType::ALL {
            assert_eq!(series.day(day).len(), 3);
            assert!(series.day(day).iter().all(|v| v.len() == 1));
        }
        assert_eq!(series.totals(DayType::Weekday), vec![200.0, 200.0, 100.0]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let table = sample_table();
        let selection = select(&["Victoria, Oxford Circus"]);
        assert_eq!(
            extract_data(&selection, &table).unwrap(),
            extract_data(&selection, &table).unwrap()
        );
    }

    #[test]
    fn duplicate_rows_are_kept_unreduced() {
        let table = StationTable::new(
            vec![row("Bank", 1.0, 2.0, 3.0), row("Bank", 4.0, 5.0, 6.0)],
            "t",
        );
        let selection = choose_stations(&table, &mut ScriptedSource::new(&["Bank"])).unwrap();
        let series = extract_data(&selection, &table).unwrap();

        assert_eq!(series.weekday, vec![vec![1.0, 4.0]]);
        assert_eq!(series.totals(DayType::Sunday), vec![9.0]);
        assert!(matches!(lookup(&table, "Bank"), StationMatch::Multiple(v) if v.len() == 2));
    }

    #[test]
    fn missing_station_is_reported() {
        let selection = select(&["Victoria"]);
        let other = StationTable::new(vec![row("Bank", 1.0, 1.0, 1.0)], "t");
        assert_eq!(
            extract_data(&selection, &other),
            Err(ExtractError::StationMissing("Victoria".to_string()))
        );
        assert_eq!(lookup(&other, "Victoria"), StationMatch::NotFound);
    }
}
