use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::SummaryTable;
use super::table::{display_row, header};

/// Write the visible rows with the display header.
pub fn write_csv<W: Write>(writer: W, table: &SummaryTable, indices: &[usize]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(header()).context("writing CSV header")?;
    for &i in indices {
        let row = table
            .rows
            .get(i)
            .with_context(|| format!("row {i} is outside the summary table"))?;
        out.write_record(display_row(row))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    out.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_csv(path: &Path, table: &SummaryTable, indices: &[usize]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, table, indices)?;
    log::info!("Exported {} rows to {}", indices.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SummaryRow;

    #[test]
    fn exports_header_and_selected_rows() {
        let row = SummaryRow {
            pitcher: "Cease, Dylan".into(),
            times_through_order: 1,
            pitch_type: "SL".into(),
            raw_pitch_count: 12,
            total_pitches: 30,
            pitch_usage: 40.0,
            delta_run_exp: Some(0.05),
            release_speed: Some(87.0),
            pfx_x: Some(3.1),
            pfx_z: Some(1.2),
            avg_release_speed: Some(86.8),
            avg_pfx_x: Some(3.0),
            avg_pfx_z: Some(1.4),
            velocity_diff: Some(0.2),
            horizontal_break_diff: Some(0.1),
            vertical_break_diff: Some(-0.2),
        };
        let table = SummaryTable {
            rows: vec![row.clone(), SummaryRow { pitch_type: "FF".into(), ..row }],
        };

        let mut buf = Vec::new();
        write_csv(&mut buf, &table, &[1]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Pitcher,Time Through Order,Pitch Type,Pitch Count"));
        assert_eq!(
            lines[1],
            "\"Cease, Dylan\",1,FF,12,40.0%,0.050,87.0,3.1,1.2,86.8,3.0,1.4,0.2,0.1,-0.2"
        );
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mut buf = Vec::new();
        assert!(write_csv(&mut buf, &SummaryTable::default(), &[0]).is_err());
    }
}
