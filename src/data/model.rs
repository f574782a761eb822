use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell read from an input partition
// ---------------------------------------------------------------------------

/// A dynamically-typed input cell, before coercion into a [`PitchEvent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    #[default]
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric coercion: numbers pass through, numeric text is parsed,
    /// everything else (including NaN) becomes `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(_) | CellValue::Null => return None,
        };
        (!v.is_nan()).then_some(v)
    }

    /// Coerce a times-through-the-order cell. Only integral values survive.
    pub fn as_order_pass(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::String(s) => match s.trim().parse::<i64>() {
                Ok(i) => Some(i),
                Err(_) => integral(s.trim().parse::<f64>().ok()?),
            },
            CellValue::Float(v) => integral(*v),
            CellValue::Bool(_) | CellValue::Null => None,
        }
    }

    /// Text coercion for categorical columns. Only `Null` is missing.
    pub fn into_text(self) -> Option<String> {
        match self {
            CellValue::String(s) => Some(s),
            CellValue::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// `Some(v as i64)` when `v` is a finite whole number.
pub(crate) fn integral(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

// ---------------------------------------------------------------------------
// PitchEvent – one row of a partition
// ---------------------------------------------------------------------------

/// A single pitch as read from disk. Every field may be missing; the row
/// filter decides what survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchEvent {
    pub pitcher: Option<String>,
    pub pitch_type: Option<String>,
    /// Times through the order, already coerced to an integer when possible.
    pub times_through_order: Option<i64>,
    /// mph
    pub release_speed: Option<f64>,
    /// Horizontal movement, feet.
    pub pfx_x: Option<f64>,
    /// Vertical movement, feet.
    pub pfx_z: Option<f64>,
    /// Run-expectancy change credited to the pitcher.
    pub delta_run_exp: Option<f64>,
}

// ---------------------------------------------------------------------------
// PitchDataset – the concatenated season
// ---------------------------------------------------------------------------

/// The whole season in source order. Built once, then only borrowed.
#[derive(Debug, Clone, Default)]
pub struct PitchDataset {
    pub events: Vec<PitchEvent>,
    /// Partition files in the order they were concatenated.
    pub sources: Vec<PathBuf>,
}

impl PitchDataset {
    /// Concatenate partitions, preserving partition order and row order.
    pub fn from_partitions(partitions: Vec<(PathBuf, Vec<PitchEvent>)>) -> Self {
        let mut dataset = PitchDataset::default();
        for (path, events) in partitions {
            dataset.sources.push(path);
            dataset.events.extend(events);
        }
        dataset
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ---------------------------------------------------------------------------
// QualifiedPitch – a row that passed the row filter
// ---------------------------------------------------------------------------

/// A pitch with a known pitcher, a usable pitch type and an order pass in
/// the configured domain.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedPitch {
    pub pitcher: String,
    pub times_through_order: u8,
    pub pitch_type: String,
    pub release_speed: Option<f64>,
    pub pfx_x: Option<f64>,
    pub pfx_z: Option<f64>,
    pub delta_run_exp: Option<f64>,
}

impl QualifiedPitch {
    pub fn situation_key(&self) -> SituationKey {
        SituationKey {
            pitcher: self.pitcher.clone(),
            times_through_order: self.times_through_order,
            pitch_type: self.pitch_type.clone(),
        }
    }

    pub fn pass_key(&self) -> PassKey {
        PassKey {
            pitcher: self.pitcher.clone(),
            times_through_order: self.times_through_order,
        }
    }

    pub fn pitch_key(&self) -> PitchKey {
        PitchKey {
            pitcher: self.pitcher.clone(),
            pitch_type: self.pitch_type.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouping keys
// ---------------------------------------------------------------------------
//
// Field order matters: the derived `Ord` is the final table's sort order
// (pitcher lexical, order pass numeric, pitch type lexical).

/// (pitcher, order pass, pitch type)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SituationKey {
    pub pitcher: String,
    pub times_through_order: u8,
    pub pitch_type: String,
}

impl SituationKey {
    pub fn pass_key(&self) -> PassKey {
        PassKey {
            pitcher: self.pitcher.clone(),
            times_through_order: self.times_through_order,
        }
    }

    pub fn pitch_key(&self) -> PitchKey {
        PitchKey {
            pitcher: self.pitcher.clone(),
            pitch_type: self.pitch_type.clone(),
        }
    }
}

/// (pitcher, order pass)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassKey {
    pub pitcher: String,
    pub times_through_order: u8,
}

/// (pitcher, pitch type)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchKey {
    pub pitcher: String,
    pub pitch_type: String,
}

// ---------------------------------------------------------------------------
// Derived tables
// ---------------------------------------------------------------------------

/// How often a pitch type was thrown in one (pitcher, pass) situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SituationUsage {
    pub raw_pitch_count: usize,
    /// All pitches by this pitcher in this pass.
    pub total_pitches: usize,
    /// `raw_pitch_count / total_pitches * 100`
    pub pitch_usage: f64,
}

/// Season-long means for one pitcher's pitch type, in feet / mph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchBaseline {
    pub avg_release_speed: Option<f64>,
    pub avg_pfx_x: Option<f64>,
    pub avg_pfx_z: Option<f64>,
}

/// Means within a single (pitcher, pass, pitch type) situation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SituationCharacteristics {
    pub delta_run_exp: Option<f64>,
    pub release_speed: Option<f64>,
    pub pfx_x: Option<f64>,
    pub pfx_z: Option<f64>,
}

pub type UsageTable = BTreeMap<SituationKey, SituationUsage>;
pub type BaselineTable = BTreeMap<PitchKey, PitchBaseline>;
pub type CharacteristicsTable = BTreeMap<SituationKey, SituationCharacteristics>;

// ---------------------------------------------------------------------------
// SummaryRow / SummaryTable – the final denormalised output
// ---------------------------------------------------------------------------

/// One row of the final table. Movement is in inches and numbers are rounded
/// to one decimal, except the run value, which keeps its full mean and is
/// formatted to three decimals for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub pitcher: String,
    pub times_through_order: u8,
    pub pitch_type: String,
    pub raw_pitch_count: usize,
    pub total_pitches: usize,
    /// Numeric usage percentage, kept for plotting.
    pub pitch_usage: f64,
    pub delta_run_exp: Option<f64>,
    pub release_speed: Option<f64>,
    pub pfx_x: Option<f64>,
    pub pfx_z: Option<f64>,
    pub avg_release_speed: Option<f64>,
    pub avg_pfx_x: Option<f64>,
    pub avg_pfx_z: Option<f64>,
    pub velocity_diff: Option<f64>,
    pub horizontal_break_diff: Option<f64>,
    pub vertical_break_diff: Option<f64>,
}

impl SummaryRow {
    /// Usage as display text, e.g. `"42.5%"`.
    pub fn usage_label(&self) -> String {
        format!("{:.1}%", self.pitch_usage)
    }

    /// Run value as fixed three-decimal text; empty when no pitch had one.
    pub fn run_value_label(&self) -> String {
        self.delta_run_exp
            .map(|v| format!("{v:.3}"))
            .unwrap_or_default()
    }
}

/// The final table, sorted by pitcher, order pass, pitch type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct pitchers in table order.
    pub fn pitchers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            if out.last() != Some(&row.pitcher) {
                out.push(row.pitcher.clone());
            }
        }
        out
    }
}
