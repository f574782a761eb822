use super::model::SummaryTable;

// ---------------------------------------------------------------------------
// User selections over the summary table
// ---------------------------------------------------------------------------

/// Label of the "no filter" entry in the dropdowns.
pub const ALL: &str = "All";

/// A dropdown choice: everything, or one specific value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(v) => v == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Choice::All => ALL,
            Choice::Only(v) => v,
        }
    }
}

/// The three controls above the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub player: Choice,
    pub pitch_type: Choice,
    /// Inclusive raw pitch-count range. `None` means the full bounds.
    pub count_range: Option<(usize, usize)>,
}

/// Result of applying a [`Selection`]: the visible rows plus the option
/// lists and bounds the controls should offer next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionView {
    /// Indices into `SummaryTable::rows`, in table order.
    pub indices: Vec<usize>,
    /// Pitch types of the player-filtered rows, first appearance first.
    pub pitch_type_options: Vec<String>,
    /// `(0, max raw count)` over the player- and pitch-type-filtered rows.
    pub count_bounds: (usize, usize),
    /// The range actually applied, clamped into `count_bounds`.
    pub count_range: (usize, usize),
}

/// Distinct pitchers for the player dropdown, in table order.
pub fn player_options(table: &SummaryTable) -> Vec<String> {
    table.pitchers()
}

/// Narrow the table: player first, then pitch type, then raw pitch count.
/// Each step only removes rows.
pub fn apply_selection(table: &SummaryTable, selection: &Selection) -> SelectionView {
    let player_rows: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| selection.player.matches(&row.pitcher))
        .map(|(i, _)| i)
        .collect();

    let mut pitch_type_options: Vec<String> = Vec::new();
    for &i in &player_rows {
        let pitch_type = &table.rows[i].pitch_type;
        if !pitch_type_options.contains(pitch_type) {
            pitch_type_options.push(pitch_type.clone());
        }
    }

    let type_rows: Vec<usize> = player_rows
        .into_iter()
        .filter(|&i| selection.pitch_type.matches(&table.rows[i].pitch_type))
        .collect();

    let max_count = type_rows
        .iter()
        .map(|&i| table.rows[i].raw_pitch_count)
        .max()
        .unwrap_or(0);
    let count_bounds = (0, max_count);
    let count_range = selection
        .count_range
        .map(|range| clamp_range(range, count_bounds))
        .unwrap_or(count_bounds);

    let (lo, hi) = count_range;
    let indices = type_rows
        .into_iter()
        .filter(|&i| (lo..=hi).contains(&table.rows[i].raw_pitch_count))
        .collect();

    SelectionView {
        indices,
        pitch_type_options,
        count_bounds,
        count_range,
    }
}

/// Clamp `(lo, hi)` into `bounds`, keeping `lo <= hi`.
pub fn clamp_range((lo, hi): (usize, usize), bounds: (usize, usize)) -> (usize, usize) {
    let hi = hi.clamp(bounds.0, bounds.1);
    let lo = lo.clamp(bounds.0, hi);
    (lo, hi)
}
