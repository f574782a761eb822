use super::model::SummaryRow;

// ---------------------------------------------------------------------------
// Display schema for the summary table
// ---------------------------------------------------------------------------

/// A column of [`SummaryRow`] that can be shown in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryField {
    Pitcher,
    TimesThroughOrder,
    PitchType,
    RawPitchCount,
    PitchUsage,
    RunValue,
    Velocity,
    HorizontalBreak,
    VerticalBreak,
    AvgVelocity,
    AvgHorizontalBreak,
    AvgVerticalBreak,
    VelocityDiff,
    HorizontalBreakDiff,
    VerticalBreakDiff,
}

/// Table view projection, in display order. The numeric usage copy and the
/// pass total are not shown; the chart reads usage straight from the row.
pub const DISPLAY_COLUMNS: [(SummaryField, &str); 15] = [
    (SummaryField::Pitcher, "Pitcher"),
    (SummaryField::TimesThroughOrder, "Time Through Order"),
    (SummaryField::PitchType, "Pitch Type"),
    (SummaryField::RawPitchCount, "Pitch Count"),
    (SummaryField::PitchUsage, "Pitch Usage (%)"),
    (SummaryField::RunValue, "Avg Run Value"),
    (SummaryField::Velocity, "Velocity"),
    (SummaryField::HorizontalBreak, "Horizontal Break (in)"),
    (SummaryField::VerticalBreak, "Vertical Break (in)"),
    (SummaryField::AvgVelocity, "Avg Velocity"),
    (SummaryField::AvgHorizontalBreak, "Avg Horizontal Break (in)"),
    (SummaryField::AvgVerticalBreak, "Avg Vertical Break (in)"),
    (SummaryField::VelocityDiff, "Velocity Diff (mph)"),
    (SummaryField::HorizontalBreakDiff, "Horizontal Break Diff (in)"),
    (SummaryField::VerticalBreakDiff, "Vertical Break Diff (in)"),
];

impl SummaryField {
    /// Display text of this field for one row.
    pub fn cell(self, row: &SummaryRow) -> String {
        match self {
            SummaryField::Pitcher => row.pitcher.clone(),
            SummaryField::TimesThroughOrder => row.times_through_order.to_string(),
            SummaryField::PitchType => row.pitch_type.clone(),
            SummaryField::RawPitchCount => row.raw_pitch_count.to_string(),
            SummaryField::PitchUsage => row.usage_label(),
            SummaryField::RunValue => row.run_value_label(),
            SummaryField::Velocity => one_decimal(row.release_speed),
            SummaryField::HorizontalBreak => one_decimal(row.pfx_x),
            SummaryField::VerticalBreak => one_decimal(row.pfx_z),
            SummaryField::AvgVelocity => one_decimal(row.avg_release_speed),
            SummaryField::AvgHorizontalBreak => one_decimal(row.avg_pfx_x),
            SummaryField::AvgVerticalBreak => one_decimal(row.avg_pfx_z),
            SummaryField::VelocityDiff => one_decimal(row.velocity_diff),
            SummaryField::HorizontalBreakDiff => one_decimal(row.horizontal_break_diff),
            SummaryField::VerticalBreakDiff => one_decimal(row.vertical_break_diff),
        }
    }

    /// Text columns are left-aligned, numbers right-aligned.
    pub fn is_numeric(self) -> bool {
        !matches!(self, SummaryField::Pitcher | SummaryField::PitchType)
    }
}

fn one_decimal(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

pub fn header() -> impl Iterator<Item = &'static str> {
    DISPLAY_COLUMNS.iter().map(|(_, label)| *label)
}

/// One row projected through [`DISPLAY_COLUMNS`].
pub fn display_row(row: &SummaryRow) -> Vec<String> {
    DISPLAY_COLUMNS
        .iter()
        .map(|(field, _)| field.cell(row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SummaryRow {
        SummaryRow {
            pitcher: "Skubal, Tarik".into(),
            times_through_order: 2,
            pitch_type: "CH".into(),
            raw_pitch_count: 140,
            total_pitches: 560,
            pitch_usage: 25.0,
            delta_run_exp: Some(0.021),
            release_speed: Some(87.4),
            pfx_x: Some(-14.2),
            pfx_z: Some(4.0),
            avg_release_speed: Some(87.1),
            avg_pfx_x: Some(-14.6),
            avg_pfx_z: Some(3.8),
            velocity_diff: Some(0.3),
            horizontal_break_diff: Some(0.4),
            vertical_break_diff: None,
        }
    }

    #[test]
    fn header_is_fixed() {
        let labels: Vec<&str> = header().collect();
        assert_eq!(labels.len(), 15);
        assert_eq!(labels[0], "Pitcher");
        assert_eq!(labels[4], "Pitch Usage (%)");
        assert_eq!(labels[5], "Avg Run Value");
        assert_eq!(labels[14], "Vertical Break Diff (in)");
    }

    #[test]
    fn row_projection() {
        let cells = display_row(&row());
        assert_eq!(
            cells,
            vec![
                "Skubal, Tarik",
                "2",
                "CH",
                "140",
                "25.0%",
                "0.021",
                "87.4",
                "-14.2",
                "4.0",
                "87.1",
                "-14.6",
                "3.8",
                "0.3",
                "0.4",
                "",
            ]
        );
    }
}
