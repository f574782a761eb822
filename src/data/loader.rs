use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, PitchDataset, PitchEvent};
use crate::config::SeasonConfig;

// ---------------------------------------------------------------------------
// Input schema
// ---------------------------------------------------------------------------

pub const COL_PITCHER: &str = "player_name";
pub const COL_PITCH_TYPE: &str = "pitch_type";
pub const COL_TIMES_THROUGH_ORDER: &str = "n_thruorder_pitcher";
pub const COL_RELEASE_SPEED: &str = "release_speed";
pub const COL_PFX_X: &str = "pfx_x";
pub const COL_PFX_Z: &str = "pfx_z";
pub const COL_DELTA_RUN_EXP: &str = "delta_pitcher_run_exp";

/// Columns every partition must carry, in the order [`event_from_cells`]
/// expects them. Anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_PITCHER,
    COL_PITCH_TYPE,
    COL_TIMES_THROUGH_ORDER,
    COL_RELEASE_SPEED,
    COL_PFX_X,
    COL_PFX_Z,
    COL_DELTA_RUN_EXP,
];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the configured season partitions and concatenate them.
pub fn load_season(config: &SeasonConfig) -> Result<PitchDataset> {
    load_partitions(&config.partition_paths())
}

/// Load every partition in order. Any unreadable partition fails the
/// whole load; there is no partial dataset.
pub fn load_partitions(paths: &[PathBuf]) -> Result<PitchDataset> {
    if paths.is_empty() {
        bail!("No partition files given");
    }

    let mut partitions = Vec::with_capacity(paths.len());
    for path in paths {
        let events = load_file(path)
            .with_context(|| format!("loading partition {}", path.display()))?;
        log::info!("Read {} pitches from {}", events.len(), path.display());
        partitions.push((path.clone(), events));
    }

    let dataset = PitchDataset::from_partitions(partitions);
    log::info!(
        "Season dataset: {} pitches from {} partitions",
        dataset.len(),
        dataset.sources.len()
    );
    Ok(dataset)
}

/// Load one partition.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – columnar partition (recommended)
/// * `.json`    – `[{ "player_name": ..., "pitch_type": ..., ... }, ...]`
/// * `.csv`     – header row with the required column names
pub fn load_file(path: &Path) -> Result<Vec<PitchEvent>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Turn the seven required cells of one row into a [`PitchEvent`].
/// Cells arrive in [`REQUIRED_COLUMNS`] order.
fn event_from_cells(cells: [CellValue; 7]) -> PitchEvent {
    let [pitcher, pitch_type, times_through_order, release_speed, pfx_x, pfx_z, delta_run_exp] =
        cells;
    PitchEvent {
        pitcher: pitcher.into_text(),
        pitch_type: pitch_type.into_text(),
        times_through_order: times_through_order.as_order_pass(),
        release_speed: release_speed.as_f64(),
        pfx_x: pfx_x.as_f64(),
        pfx_z: pfx_z.as_f64(),
        delta_run_exp: delta_run_exp.as_f64(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "player_name": "Skubal, Tarik",
///     "pitch_type": "FF",
///     "n_thruorder_pitcher": 1,
///     "release_speed": 96.8,
///     "pfx_x": -0.61,
///     "pfx_z": 1.32,
///     "delta_pitcher_run_exp": 0.041
///   },
///   ...
/// ]
/// ```
///
/// Keys may hold `null`, but every required key must be present.
fn load_json(path: &Path) -> Result<Vec<PitchEvent>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let mut cells: [CellValue; 7] = Default::default();
            for (cell, col) in cells.iter_mut().zip(REQUIRED_COLUMNS) {
                let val = obj
                    .get(col)
                    .with_context(|| format!("Row {i}: missing '{col}' column"))?;
                *cell = json_to_cell(val);
            }
            Ok(event_from_cells(cells))
        })
        .collect()
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one pitch per record.
/// Empty fields are nulls.
fn load_csv(path: &Path) -> Result<Vec<PitchEvent>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let mut indices = [0usize; 7];
    for (idx, col) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *idx = headers
            .iter()
            .position(|h| h == col)
            .with_context(|| format!("CSV missing '{col}' column"))?;
    }

    let mut events = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells = indices.map(|idx| guess_cell_type(record.get(idx).unwrap_or("")));
        events.push(event_from_cells(cells));
    }

    Ok(events)
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        // `nan` / `inf` text is a missing value, not a number or a label.
        return if f.is_finite() {
            CellValue::Float(f)
        } else {
            CellValue::Null
        };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet partition.
///
/// Text columns may be plain, large or dictionary-encoded (Pandas
/// categoricals); numeric columns may be any integer or float width.
/// Columns are looked up by name, so extra columns and column order in
/// the file do not matter.
fn load_parquet(path: &Path) -> Result<Vec<PitchEvent>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut events = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut columns: Vec<std::vec::IntoIter<CellValue>> = Vec::with_capacity(7);
        for col in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(col)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{col}' column"))?;
            let cells = column_cells(batch.column(idx))
                .with_context(|| format!("reading '{col}' column"))?;
            columns.push(cells.into_iter());
        }

        for _ in 0..batch.num_rows() {
            let mut cells: [CellValue; 7] = Default::default();
            for (cell, column) in cells.iter_mut().zip(columns.iter_mut()) {
                *cell = column.next().unwrap_or(CellValue::Null);
            }
            events.push(event_from_cells(cells));
        }
    }

    Ok(events)
}

// -- Parquet / Arrow helpers --

/// Logical type of a column, looking through dictionary encoding.
fn value_type(data_type: &DataType) -> &DataType {
    match data_type {
        DataType::Dictionary(_, value) => value_type(value),
        other => other,
    }
}

/// Convert a whole Arrow column into cells.
fn column_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let cells = match value_type(col.data_type()) {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let casted = cast(col.as_ref(), &DataType::Utf8).context("casting to Utf8")?;
            let arr = casted.as_string_opt::<i32>().context("expected StringArray")?;
            arr.iter()
                .map(|v| v.map_or(CellValue::Null, |s| CellValue::String(s.to_string())))
                .collect()
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => {
            let casted = cast(col.as_ref(), &DataType::Int64).context("casting to Int64")?;
            let arr = casted
                .as_primitive_opt::<Int64Type>()
                .context("expected Int64Array")?;
            arr.iter()
                .map(|v| v.map_or(CellValue::Null, CellValue::Integer))
                .collect()
        }
        DataType::Float16 | DataType::Float32 | DataType::Float64 => {
            let casted = cast(col.as_ref(), &DataType::Float64).context("casting to Float64")?;
            let arr = casted
                .as_primitive_opt::<Float64Type>()
                .context("expected Float64Array")?;
            arr.iter()
                .map(|v| v.map_or(CellValue::Null, CellValue::Float))
                .collect()
        }
        DataType::Boolean => {
            let arr = col.as_boolean_opt().context("expected BooleanArray")?;
            arr.iter()
                .map(|v| v.map_or(CellValue::Null, CellValue::Bool))
                .collect()
        }
        DataType::Null => vec![CellValue::Null; col.len()],
        other => bail!("Unsupported column type {other:?}"),
    };
    Ok(cells)
}
