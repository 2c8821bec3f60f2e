//! Writes `sample_stations.csv` and `sample_stations.parquet` in the
//! positional layout the viewer expects (name, borough, weekday, Saturday,
//! Sunday), for trying the charts without the Datastore workbook.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STATIONS: [(&str, &str, f64); 12] = [
    ("Oxford Circus", "Westminster", 98_000.0),
    ("Victoria", "Westminster", 86_000.0),
    ("Waterloo", "Lambeth", 92_000.0),
    ("King's Cross St. Pancras", "Camden", 84_000.0),
    ("Liverpool Street", "City of London", 76_000.0),
    ("London Bridge", "Southwark", 70_000.0),
    ("Bank & Monument", "City of London", 64_000.0),
    ("Stratford", "Newham", 58_000.0),
    ("Canary Wharf", "Tower Hamlets", 54_000.0),
    ("Paddington", "Westminster", 44_000.0),
    ("Brixton", "Lambeth", 28_000.0),
    ("Mill Hill East", "Barnet", 1_800.0),
];

struct SampleRow {
    name: &'static str,
    borough: &'static str,
    weekday: i64,
    saturday: i64,
    sunday: i64,
}

fn sample_rows(rng: &mut StdRng) -> Vec<SampleRow> {
    STATIONS
        .iter()
        .map(|&(name, borough, base)| {
            let weekday = base * rng.gen_range(0.9..1.1);
            SampleRow {
                name,
                borough,
                weekday: weekday.round() as i64,
                saturday: (weekday * rng.gen_range(0.45..0.8)).round() as i64,
                sunday: (weekday * rng.gen_range(0.3..0.6)).round() as i64,
            }
        })
        .collect()
}

fn write_csv(rows: &[SampleRow], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record(["Station", "Borough", "Weekday", "Saturday", "Sunday"])?;
    for r in rows {
        writer.write_record([
            r.name.to_string(),
            r.borough.to_string(),
            r.weekday.to_string(),
            r.saturday.to_string(),
            r.sunday.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[SampleRow], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("station", DataType::Utf8, false),
        Field::new("borough", DataType::Utf8, false),
        Field::new("weekday", DataType::Int64, false),
        Field::new("saturday", DataType::Int64, false),
        Field::new("sunday", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(rows.iter().map(|r| r.name).collect::<Vec<_>>())),
            Arc::new(StringArray::from(rows.iter().map(|r| r.borough).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.weekday).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.saturday).collect::<Vec<_>>())),
            Arc::new(Int64Array::from(rows.iter().map(|r| r.sunday).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(2014);
    let rows = sample_rows(&mut rng);

    write_csv(&rows, "sample_stations.csv")?;
    write_parquet(&rows, "sample_stations.parquet")?;

    println!(
        "Wrote {} stations to sample_stations.csv and sample_stations.parquet",
        rows.len()
    );
    Ok(())
}
