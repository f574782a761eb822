use std::collections::BTreeMap;

use super::model::SummaryTable;
use super::selection::Choice;

// ---------------------------------------------------------------------------
// Usage-by-pass chart data
// ---------------------------------------------------------------------------

pub const X_LABEL: &str = "Time Through the Order";
pub const Y_LABEL: &str = "Pitch Usage (%)";
pub const LEGEND_TITLE: &str = "Pitch Type";
/// The only x positions that get a tick label.
pub const X_TICKS: [u8; 3] = [1, 2, 3];

/// One line of the chart: a pitch type's usage at each order pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSeries {
    pub pitch_type: String,
    /// `[order pass, usage %]`, ascending by pass.
    pub points: Vec<[f64; 2]>,
}

/// Build one series per pitch type among `indices`, in first-appearance
/// order. Several rows at the same pass (the all-players view) are averaged.
pub fn usage_series(table: &SummaryTable, indices: &[usize]) -> Vec<UsageSeries> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: BTreeMap<(&str, u8), (f64, usize)> = BTreeMap::new();

    for &i in indices {
        let Some(row) = table.rows.get(i) else {
            continue;
        };
        if !order.contains(&row.pitch_type.as_str()) {
            order.push(row.pitch_type.as_str());
        }
        let (sum, n) = sums
            .entry((row.pitch_type.as_str(), row.times_through_order))
            .or_default();
        *sum += row.pitch_usage;
        *n += 1;
    }

    order
        .into_iter()
        .map(|pitch_type| {
            let points = sums
                .range((pitch_type, u8::MIN)..=(pitch_type, u8::MAX))
                .map(|(&(_, pass), &(sum, n))| [pass as f64, sum / n as f64])
                .collect();
            UsageSeries {
                pitch_type: pitch_type.to_string(),
                points,
            }
        })
        .collect()
}

/// Chart title for the current player selection.
pub fn chart_title(player: &Choice) -> String {
    match player {
        Choice::All => "Pitch Usage by Time Through the Order (All Players)".to_string(),
        Choice::Only(name) => format!("{name} - Pitch Usage by Time Through the Order"),
    }
}

/// Axis label for an x grid mark: only the tick positions are labelled.
pub fn x_tick_label(value: f64) -> String {
    X_TICKS
        .iter()
        .find(|&&tick| (value - tick as f64).abs() < 1e-9)
        .map(|tick| tick.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::SummaryRow;

    fn row(pitcher: &str, pass: u8, pitch_type: &str, usage: f64) -> SummaryRow {
        SummaryRow {
            pitcher: pitcher.into(),
            times_through_order: pass,
            pitch_type: pitch_type.into(),
            raw_pitch_count: 1,
            total_pitches: 1,
            pitch_usage: usage,
            delta_run_exp: None,
            release_speed: None,
            pfx_x: None,
            pfx_z: None,
            avg_release_speed: None,
            avg_pfx_x: None,
            avg_pfx_z: None,
            velocity_diff: None,
            horizontal_break_diff: None,
            vertical_break_diff: None,
        }
    }

    #[test]
    fn one_series_per_pitch_type_in_appearance_order() {
        let table = SummaryTable {
            rows: vec![
                row("A", 1, "SL", 40.0),
                row("A", 1, "FF", 60.0),
                row("A", 2, "FF", 70.0),
                row("A", 2, "SL", 30.0),
            ],
        };
        let series = usage_series(&table, &[0, 1, 2, 3]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].pitch_type, "SL");
        assert_eq!(series[0].points, vec![[1.0, 40.0], [2.0, 30.0]]);
        assert_eq!(series[1].points, vec![[1.0, 60.0], [2.0, 70.0]]);
    }

    #[test]
    fn all_players_view_averages_per_pass() {
        let table = SummaryTable {
            rows: vec![
                row("A", 1, "FF", 60.0),
                row("A", 2, "FF", 50.0),
                row("B", 1, "FF", 40.0),
                row("B", 3, "FF", 20.0),
            ],
        };
        let series = usage_series(&table, &[0, 1, 2, 3]);
        assert_eq!(series.len(), 1);
        let points = &series[0].points;
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0][1], 50.0);
        assert_relative_eq!(points[1][1], 50.0);
        assert_relative_eq!(points[2][1], 20.0);
    }

    #[test]
    fn empty_view_has_no_series() {
        let table = SummaryTable {
            rows: vec![row("A", 1, "FF", 60.0)],
        };
        assert!(usage_series(&table, &[]).is_empty());
    }

    #[test]
    fn titles() {
        assert_eq!(
            chart_title(&Choice::All),
            "Pitch Usage by Time Through the Order (All Players)"
        );
        assert_eq!(
            chart_title(&Choice::Only("Skenes, Paul".into())),
            "Skenes, Paul - Pitch Usage by Time Through the Order"
        );
    }

    #[test]
    fn only_integer_passes_are_labelled() {
        assert_eq!(x_tick_label(1.0), "1");
        assert_eq!(x_tick_label(3.0), "3");
        assert_eq!(x_tick_label(1.5), "");
        assert_eq!(x_tick_label(4.0), "");
    }
}
