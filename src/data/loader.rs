use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use calamine::{Data, Reader, open_workbook_auto};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CellValue, DayCounts, StationRow, StationTable};
use crate::config::{ColumnLayout, DatasetConfig};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the station table described by `config`.  Dispatch by extension.
///
/// Supported formats:
/// * `.xls` / `.xlsx` / `.xlsm` / `.xlsb` / `.ods` – workbook, sheet `config.sheet`
/// * `.csv`     – headerless positional CSV (first `header_rows` lines skipped)
/// * `.parquet` – columns read by position; the schema names are ignored
///
/// Any failure here is fatal for the run: there is nothing to compare
/// without the table.
pub fn load_table(config: &DatasetConfig) -> Result<StationTable> {
    let path = config.path.as_path();
    if !path.exists() {
        bail!("Dataset {} not found", path.display());
    }

    let ext = extension(path);
    let table = match ext.as_str() {
        e if is_workbook(e) => load_workbook(path, config)?,
        "csv" => load_csv(path, config)?,
        "parquet" | "pq" => load_parquet(path, &config.columns)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    if table.is_empty() {
        bail!("{} ({}) contains no station rows", path.display(), table.source);
    }

    log::info!(
        "Loaded {} station rows from {} ({})",
        table.len(),
        path.display(),
        table.source
    );
    Ok(table)
}

/// Human-readable name of the data source, for error context. Only
/// workbooks have a sheet to mention.
pub fn describe_source(config: &DatasetConfig) -> String {
    let path = config.path.as_path();
    if is_workbook(&extension(path)) {
        format!("sheet '{}' of {}", config.sheet, path.display())
    } else {
        path.display().to_string()
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn is_workbook(ext: &str) -> bool {
    matches!(ext, "xls" | "xlsx" | "xlsm" | "xlsb" | "ods")
}

/// Turn one positional row into a [`StationRow`]. Rows without a name are
/// dropped; they could never be selected.
fn build_row(cell: impl Fn(usize) -> CellValue, layout: &ColumnLayout) -> Option<StationRow> {
    let name = cell(layout.name).as_name()?;
    let count = |idx: usize| cell(idx).as_f64().unwrap_or(f64::NAN);
    Some(StationRow {
        name,
        counts: DayCounts {
            weekday: count(layout.weekday),
            saturday: count(layout.saturday),
            sunday: count(layout.sunday),
        },
    })
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Cells are addressed absolutely (column A = 0, row 1 = 0), so leading
/// blank columns in the sheet do not shift the layout.
fn load_workbook(path: &Path, config: &DatasetConfig) -> Result<StationTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let sheets = workbook.sheet_names();
    if !sheets.iter().any(|s| s == &config.sheet) {
        bail!(
            "Sheet '{}' not found in {} (available: {})",
            config.sheet,
            path.display(),
            sheets.join(", ")
        );
    }

    let range = workbook
        .worksheet_range(&config.sheet)
        .with_context(|| format!("reading sheet '{}'", config.sheet))?;

    let Some(end) = range.end() else {
        return Ok(StationTable::new(Vec::new(), config.sheet.clone()));
    };
    let layout = &config.columns;
    if (end.1 as usize) < layout.max_index() {
        bail!(
            "Sheet '{}' has {} columns but the layout needs column {}",
            config.sheet,
            end.1 + 1,
            layout.max_index()
        );
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for row in config.header_rows as u32..=end.0 {
        let cell = |col: usize| excel_cell(range.get_value((row, col as u32)));
        match build_row(cell, layout) {
            Some(r) => rows.push(r),
            None => skipped += 1,
        }
    }
    log::debug!("Skipped {skipped} unnamed rows in sheet '{}'", config.sheet);

    Ok(StationTable::new(rows, config.sheet.clone()))
}

fn excel_cell(cell: Option<&Data>) -> CellValue {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => CellValue::Null,
        Some(Data::String(s)) => CellValue::String(s.clone()),
        Some(Data::Int(i)) => CellValue::Integer(*i),
        Some(Data::Float(f)) => CellValue::Float(*f),
        Some(Data::Bool(b)) => CellValue::Bool(*b),
        Some(other) => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout mirrors the sheet: no header handling beyond skipping
/// `header_rows` records, short records read as empty cells.
fn load_csv(path: &Path, config: &DatasetConfig) -> Result<StationTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let layout = &config.columns;
    let mut rows = Vec::new();
    let mut widest = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if row_no < config.header_rows {
            continue;
        }
        widest = widest.max(record.len());
        let cell = |col: usize| match record.get(col) {
            Some(s) => CellValue::String(s.to_string()),
            None => CellValue::Null,
        };
        if let Some(r) = build_row(cell, layout) {
            rows.push(r);
        }
    }

    if !rows.is_empty() && widest <= layout.max_index() {
        bail!(
            "CSV has {widest} columns but the layout needs column {}",
            layout.max_index()
        );
    }

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(StationTable::new(rows, source))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns follow the same positional layout as
/// the sheet. Names and counts are cast (`Utf8`, `Float64`) so Pandas and
/// Polars writers both work; uncastable counts become NaN.
fn load_parquet(path: &Path, layout: &ColumnLayout) -> Result<StationTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() <= layout.max_index() {
            bail!(
                "Parquet file has {} columns but the layout needs column {}",
                batch.num_columns(),
                layout.max_index()
            );
        }

        let names = string_column(batch.column(layout.name))?;
        let weekday = float_column(batch.column(layout.weekday))?;
        let saturday = float_column(batch.column(layout.saturday))?;
        let sunday = float_column(batch.column(layout.sunday))?;

        for row in 0..batch.num_rows() {
            if names.is_null(row) || names.value(row).is_empty() {
                continue;
            }
            rows.push(StationRow {
                name: names.value(row).to_string(),
                counts: DayCounts {
                    weekday: float_at(&weekday, row),
                    saturday: float_at(&saturday, row),
                    sunday: float_at(&sunday, row),
                },
            });
        }
    }

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(StationTable::new(rows, source))
}

// -- Arrow helpers --

fn string_column(col: &ArrayRef) -> Result<StringArray> {
    let cast_col = cast(col.as_ref(), &DataType::Utf8)
        .with_context(|| format!("casting {:?} column to text", col.data_type()))?;
    cast_col
        .as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .context("expected StringArray after cast")
}

fn float_column(col: &ArrayRef) -> Result<Float64Array> {
    let cast_col = cast(col.as_ref(), &DataType::Float64)
        .with_context(|| format!("casting {:?} column to numbers", col.data_type()))?;
    cast_col
        .as_any()
        .downcast_ref::<Float64Array>()
        .cloned()
        .context("expected Float64Array after cast")
}

fn float_at(arr: &Float64Array, row: usize) -> f64 {
    if arr.is_null(row) {
        f64::NAN
    } else {
        arr.value(row)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::Int64Array;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use rust_xlsxwriter::Workbook;
    use tempfile::NamedTempFile;

    use super::*;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn config_for(path: PathBuf) -> DatasetConfig {
        DatasetConfig {
            path,
            ..DatasetConfig::default()
        }
    }

    #[test]
    fn csv_is_read_by_position() {
        let file = csv_file(
            "Station,Borough,Weekday,Saturday,Sunday\n\
             Oxford Circus,Westminster,100,50,30\n\
             Victoria,Westminster,200,90,60\n",
        );
        let table = load_table(&config_for(file.path().to_path_buf())).unwrap();

        assert_eq!(table.len(), 2);
        let row = &table.rows()[1];
        assert_eq!(row.name, "Victoria");
        assert_eq!(row.counts, DayCounts { weekday: 200.0, saturday: 90.0, sunday: 60.0 });
    }

    #[test]
    fn csv_skips_unnamed_rows_and_keeps_non_numeric_as_nan() {
        let file = csv_file(
            "header\n\
             ,,1,2,3\n\
             Bank,City,n/a,5,6\n",
        );
        let table = load_table(&config_for(file.path().to_path_buf())).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.rows()[0].counts.weekday.is_nan());
        assert_eq!(table.rows()[0].counts.sunday, 6.0);
    }

    #[test]
    fn csv_narrower_than_layout_is_rejected() {
        let file = csv_file("h\nBank,1,2\n");
        let err = load_table(&config_for(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("layout needs column 4"));
    }

    #[test]
    fn custom_layout_moves_columns() {
        let file = csv_file("h\n9,8,7,Bank\n");
        let mut config = config_for(file.path().to_path_buf());
        config.columns = ColumnLayout { name: 3, weekday: 0, saturday: 1, sunday: 2 };
        let table = load_table(&config).unwrap();
        assert_eq!(table.rows()[0].name, "Bank");
        assert_eq!(table.rows()[0].counts.weekday, 9.0);
    }

    #[test]
    fn table_without_stations_is_fatal() {
        let file = csv_file("Station,Borough,Weekday,Saturday,Sunday\n");
        let err = load_table(&config_for(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("contains no station rows"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(&config_for(dir.path().join("tube02.xls"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn unknown_extension_is_fatal() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = load_table(&config_for(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn source_mentions_sheet_only_for_workbooks() {
        let workbook = config_for(PathBuf::from("tube02.XLS"));
        assert_eq!(describe_source(&workbook), "sheet '2014 Entry & Exit' of tube02.XLS");

        let csv = config_for(PathBuf::from("stations.csv"));
        assert_eq!(describe_source(&csv), "stations.csv");

        let parquet = config_for(PathBuf::from("stations.parquet"));
        assert!(!describe_source(&parquet).contains("sheet"));
    }

    fn xlsx_file(sheet: &str) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name(sheet).unwrap();
        let headers = ["Station", "Borough", "Weekday", "Saturday", "Sunday"];
        for (col, header) in headers.iter().enumerate() {
            ws.write_string(0, col as u16, *header).unwrap();
        }
        let stations = [
            ("Oxford Circus", 100.0, 50.0, 30.0),
            ("Victoria", 200.0, 90.0, 60.0),
        ];
        for (i, (name, weekday, saturday, sunday)) in stations.iter().enumerate() {
            let row = i as u32 + 1;
            ws.write_string(row, 0, *name).unwrap();
            ws.write_string(row, 1, "Westminster").unwrap();
            ws.write_number(row, 2, *weekday).unwrap();
            ws.write_number(row, 3, *saturday).unwrap();
            ws.write_number(row, 4, *sunday).unwrap();
        }
        workbook.save(file.path()).unwrap();
        file
    }

    #[test]
    fn workbook_sheet_is_read_by_position() {
        let file = xlsx_file("2014 Entry & Exit");
        let table = load_table(&config_for(file.path().to_path_buf())).unwrap();

        assert_eq!(table.source, "2014 Entry & Exit");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].name, "Oxford Circus");
        assert_eq!(
            table.rows()[0].counts,
            DayCounts { weekday: 100.0, saturday: 50.0, sunday: 30.0 }
        );
        assert_eq!(table.rows()[1].name, "Victoria");
        assert_eq!(
            table.rows()[1].counts,
            DayCounts { weekday: 200.0, saturday: 90.0, sunday: 60.0 }
        );
    }

    #[test]
    fn missing_sheet_lists_available_sheets() {
        let file = xlsx_file("Other");
        let err = load_table(&config_for(file.path().to_path_buf())).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Sheet '2014 Entry & Exit' not found"), "{message}");
        assert!(message.contains("(available: Other)"), "{message}");
    }

    #[test]
    fn corrupt_workbook_is_fatal() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"definitely not a zip archive").unwrap();
        assert!(load_table(&config_for(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn parquet_is_read_by_position() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("station", DataType::Utf8, true),
            Field::new("borough", DataType::Utf8, true),
            Field::new("weekday", DataType::Int64, true),
            Field::new("saturday", DataType::Int64, true),
            Field::new("sunday", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Oxford Circus"), None, Some("Victoria")])),
                Arc::new(StringArray::from(vec!["Westminster", "", "Westminster"])),
                Arc::new(Int64Array::from(vec![Some(100), Some(1), None])),
                Arc::new(Int64Array::from(vec![50, 2, 90])),
                Arc::new(Float64Array::from(vec![30.0, 3.0, 60.0])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(std::fs::File::create(file.path()).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_table(&config_for(file.path().to_path_buf())).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].counts.saturday, 50.0);
        assert_eq!(table.rows()[1].name, "Victoria");
        assert!(table.rows()[1].counts.weekday.is_nan());
    }
}
