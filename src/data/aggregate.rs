use std::collections::BTreeMap;

use super::error::PipelineError;
use super::filter::qualify_pitches;
use super::model::{
    BaselineTable, CharacteristicsTable, PassKey, PitchBaseline, PitchDataset, QualifiedPitch,
    SituationCharacteristics, SituationKey, SituationUsage, SummaryRow, SummaryTable, UsageTable,
};
use crate::config::{FilterConfig, INCHES_PER_FOOT};

// ---------------------------------------------------------------------------
// Whole pipeline
// ---------------------------------------------------------------------------

/// Everything derived from one loaded season.
#[derive(Debug, Clone, Default)]
pub struct SeasonSummary {
    pub loaded_rows: usize,
    pub qualified_rows: usize,
    pub table: SummaryTable,
}

/// Row filter followed by the full aggregation.
pub fn summarize_season(
    dataset: &PitchDataset,
    config: &FilterConfig,
) -> Result<SeasonSummary, PipelineError> {
    let pitches = qualify_pitches(&dataset.events, config);
    let table = summarize(&pitches)?;
    log::info!(
        "Summary: {} rows from {} qualified pitches ({} loaded)",
        table.len(),
        pitches.len(),
        dataset.len()
    );
    Ok(SeasonSummary {
        loaded_rows: dataset.len(),
        qualified_rows: pitches.len(),
        table,
    })
}

/// Build the final table from qualified pitches.
pub fn summarize(pitches: &[QualifiedPitch]) -> Result<SummaryTable, PipelineError> {
    let usage = usage_counts(pitches)?;
    let baselines = pitcher_baselines(pitches);
    let situations = situation_characteristics(pitches);
    log::debug!(
        "Aggregated {} usage rows, {} baselines, {} situations",
        usage.len(),
        baselines.len(),
        situations.len()
    );
    merge(&situations, &baselines, &usage)
}

// ---------------------------------------------------------------------------
// Means
// ---------------------------------------------------------------------------

/// Running mean that skips missing values.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

// ---------------------------------------------------------------------------
// Derived tables
// ---------------------------------------------------------------------------

/// Pitch counts per situation, joined to the pitcher's total for that pass.
pub fn usage_counts(pitches: &[QualifiedPitch]) -> Result<UsageTable, PipelineError> {
    let mut raw: BTreeMap<SituationKey, usize> = BTreeMap::new();
    let mut totals: BTreeMap<PassKey, usize> = BTreeMap::new();
    for pitch in pitches {
        *raw.entry(pitch.situation_key()).or_default() += 1;
        *totals.entry(pitch.pass_key()).or_default() += 1;
    }

    raw.into_iter()
        .map(|(key, raw_pitch_count)| {
            let total_pitches = totals
                .get(&key.pass_key())
                .copied()
                .filter(|&t| t > 0)
                .ok_or_else(|| PipelineError::MissingTotal {
                    pitcher: key.pitcher.clone(),
                    times_through_order: key.times_through_order,
                })?;
            let usage = SituationUsage {
                raw_pitch_count,
                total_pitches,
                pitch_usage: raw_pitch_count as f64 / total_pitches as f64 * 100.0,
            };
            Ok((key, usage))
        })
        .collect()
}

/// Season means per (pitcher, pitch type), regardless of order pass.
pub fn pitcher_baselines(pitches: &[QualifiedPitch]) -> BaselineTable {
    let mut acc: BTreeMap<_, [Mean; 3]> = BTreeMap::new();
    for pitch in pitches {
        let [speed, x, z] = acc.entry(pitch.pitch_key()).or_default();
        speed.push(pitch.release_speed);
        x.push(pitch.pfx_x);
        z.push(pitch.pfx_z);
    }

    acc.into_iter()
        .map(|(key, [speed, x, z])| {
            let baseline = PitchBaseline {
                avg_release_speed: speed.value(),
                avg_pfx_x: x.value(),
                avg_pfx_z: z.value(),
            };
            (key, baseline)
        })
        .collect()
}

/// Means per (pitcher, order pass, pitch type).
pub fn situation_characteristics(pitches: &[QualifiedPitch]) -> CharacteristicsTable {
    let mut acc: BTreeMap<_, [Mean; 4]> = BTreeMap::new();
    for pitch in pitches {
        let [run, speed, x, z] = acc.entry(pitch.situation_key()).or_default();
        run.push(pitch.delta_run_exp);
        speed.push(pitch.release_speed);
        x.push(pitch.pfx_x);
        z.push(pitch.pfx_z);
    }

    acc.into_iter()
        .map(|(key, [run, speed, x, z])| {
            let situation = SituationCharacteristics {
                delta_run_exp: run.value(),
                release_speed: speed.value(),
                pfx_x: x.value(),
                pfx_z: z.value(),
            };
            (key, situation)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Merge, unit conversion, rounding
// ---------------------------------------------------------------------------

/// Join situations to their baseline and usage, convert movement to inches
/// and round. Output order is the key order of `situations`.
pub fn merge(
    situations: &CharacteristicsTable,
    baselines: &BaselineTable,
    usage: &UsageTable,
) -> Result<SummaryTable, PipelineError> {
    let mut rows = Vec::with_capacity(situations.len());

    for (key, situation) in situations {
        let baseline = baselines
            .get(&key.pitch_key())
            .ok_or_else(|| PipelineError::MissingBaseline {
                pitcher: key.pitcher.clone(),
                pitch_type: key.pitch_type.clone(),
            })?;
        let counts = usage.get(key).ok_or_else(|| PipelineError::MissingUsage {
            pitcher: key.pitcher.clone(),
            times_through_order: key.times_through_order,
            pitch_type: key.pitch_type.clone(),
        })?;
        rows.push(summary_row(key, situation, baseline, counts));
    }

    // Both tables come from the same grouping; a usage key with no
    // situation would otherwise vanish from the output.
    if let Some(orphan) = usage.keys().find(|k| !situations.contains_key(*k)) {
        return Err(PipelineError::MissingCharacteristics {
            pitcher: orphan.pitcher.clone(),
            times_through_order: orphan.times_through_order,
            pitch_type: orphan.pitch_type.clone(),
        });
    }

    Ok(SummaryTable { rows })
}

fn summary_row(
    key: &SituationKey,
    situation: &SituationCharacteristics,
    baseline: &PitchBaseline,
    counts: &SituationUsage,
) -> SummaryRow {
    let velocity_diff = diff(situation.release_speed, baseline.avg_release_speed);

    // Diffs are recomputed from the inch values, not scaled from feet.
    let pfx_x = to_inches(situation.pfx_x);
    let pfx_z = to_inches(situation.pfx_z);
    let avg_pfx_x = to_inches(baseline.avg_pfx_x);
    let avg_pfx_z = to_inches(baseline.avg_pfx_z);
    let horizontal_break_diff = diff(pfx_x, avg_pfx_x);
    let vertical_break_diff = diff(pfx_z, avg_pfx_z);

    let one = |v: Option<f64>| v.map(|v| round_to(v, 1));
    SummaryRow {
        pitcher: key.pitcher.clone(),
        times_through_order: key.times_through_order,
        pitch_type: key.pitch_type.clone(),
        raw_pitch_count: counts.raw_pitch_count,
        total_pitches: counts.total_pitches,
        pitch_usage: round_to(counts.pitch_usage, 1),
        // Unrounded: the run value is only ever shown as fixed three-decimal text.
        delta_run_exp: situation.delta_run_exp,
        release_speed: one(situation.release_speed),
        pfx_x: one(pfx_x),
        pfx_z: one(pfx_z),
        avg_release_speed: one(baseline.avg_release_speed),
        avg_pfx_x: one(avg_pfx_x),
        avg_pfx_z: one(avg_pfx_z),
        velocity_diff: one(velocity_diff),
        horizontal_break_diff: one(horizontal_break_diff),
        vertical_break_diff: one(vertical_break_diff),
    }
}

fn diff(value: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    Some(value? - baseline?)
}

fn to_inches(feet: Option<f64>) -> Option<f64> {
    feet.map(|f| f * INCHES_PER_FOOT)
}

/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::PitchKey;

    fn pitch(pitcher: &str, pass: u8, pitch_type: &str, speed: f64) -> QualifiedPitch {
        QualifiedPitch {
            pitcher: pitcher.to_string(),
            times_through_order: pass,
            pitch_type: pitch_type.to_string(),
            release_speed: Some(speed),
            pfx_x: Some(0.5),
            pfx_z: Some(1.0),
            delta_run_exp: Some(0.01),
        }
    }

    fn key(pitcher: &str, pass: u8, pitch_type: &str) -> SituationKey {
        SituationKey {
            pitcher: pitcher.into(),
            times_through_order: pass,
            pitch_type: pitch_type.into(),
        }
    }

    #[test]
    fn usage_joins_raw_counts_to_pass_totals() {
        let pitches = vec![
            pitch("A", 1, "FF", 95.0),
            pitch("A", 1, "FF", 95.0),
            pitch("A", 1, "FF", 95.0),
            pitch("A", 1, "SL", 85.0),
            pitch("A", 2, "SL", 85.0),
        ];
        let usage = usage_counts(&pitches).unwrap();
        assert_eq!(usage.len(), 3);

        let ff = usage[&key("A", 1, "FF")];
        assert_eq!((ff.raw_pitch_count, ff.total_pitches), (3, 4));
        assert_relative_eq!(ff.pitch_usage, 75.0);

        let sl2 = usage[&key("A", 2, "SL")];
        assert_eq!((sl2.raw_pitch_count, sl2.total_pitches), (1, 1));
        assert_relative_eq!(sl2.pitch_usage, 100.0);
    }

    #[test]
    fn baselines_ignore_order_pass() {
        let pitches = vec![
            pitch("A", 1, "FF", 94.0),
            pitch("A", 2, "FF", 96.0),
            pitch("A", 3, "FF", 98.0),
        ];
        let baselines = pitcher_baselines(&pitches);
        assert_eq!(baselines.len(), 1);
        let b = baselines[&PitchKey {
            pitcher: "A".into(),
            pitch_type: "FF".into(),
        }];
        assert_relative_eq!(b.avg_release_speed.unwrap(), 96.0);
    }

    #[test]
    fn means_skip_missing_values() {
        let mut a = pitch("A", 1, "FF", 94.0);
        a.delta_run_exp = None;
        let mut b = pitch("A", 1, "FF", 96.0);
        b.delta_run_exp = Some(0.3);
        b.pfx_x = None;
        let mut c = a.clone();
        c.pfx_x = None;

        let situations = situation_characteristics(&[a, b]);
        let s = situations[&key("A", 1, "FF")];
        assert_relative_eq!(s.delta_run_exp.unwrap(), 0.3);
        assert_relative_eq!(s.release_speed.unwrap(), 95.0);
        assert_relative_eq!(s.pfx_x.unwrap(), 0.5);

        let none = situation_characteristics(&[c]);
        assert_eq!(none[&key("A", 1, "FF")].pfx_x, None);
        assert_eq!(none[&key("A", 1, "FF")].delta_run_exp, None);
    }

    #[test]
    fn merge_rejects_missing_baseline() {
        let pitches = vec![pitch("A", 1, "FF", 95.0), pitch("A", 2, "FF", 95.0)];
        let usage = usage_counts(&pitches).unwrap();
        let situations = situation_characteristics(&pitches);
        let err = merge(&situations, &BaselineTable::new(), &usage).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingBaseline {
                pitcher: "A".into(),
                pitch_type: "FF".into()
            }
        );
    }

    #[test]
    fn merge_rejects_missing_usage() {
        let pitches = vec![pitch("A", 1, "FF", 95.0), pitch("A", 2, "FF", 95.0)];
        let baselines = pitcher_baselines(&pitches);
        let situations = situation_characteristics(&pitches);
        let mut usage = usage_counts(&pitches).unwrap();
        usage.remove(&key("A", 2, "FF"));
        let err = merge(&situations, &baselines, &usage).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingUsage {
                times_through_order: 2,
                ..
            }
        ));
    }

    #[test]
    fn merge_rejects_orphan_usage() {
        let pitches = vec![pitch("A", 1, "FF", 95.0), pitch("A", 2, "FF", 95.0)];
        let baselines = pitcher_baselines(&pitches);
        let mut situations = situation_characteristics(&pitches);
        situations.remove(&key("A", 1, "FF"));
        let usage = usage_counts(&pitches).unwrap();
        let err = merge(&situations, &baselines, &usage).unwrap_err();
        assert!(matches!(err, PipelineError::MissingCharacteristics { .. }));
    }

    #[test]
    fn movement_converted_before_diff() {
        // 1/12 ft and 2/12 ft: inches are exactly 1 and 2 after scaling.
        let mut a = pitch("A", 1, "FF", 95.0);
        a.pfx_x = Some(1.0 / 12.0);
        a.pfx_z = Some(-1.0 / 12.0);
        let mut b = pitch("A", 2, "FF", 93.0);
        b.pfx_x = Some(3.0 / 12.0);
        b.pfx_z = Some(-3.0 / 12.0);

        let table = summarize(&[a, b]).unwrap();
        let first = &table.rows[0];
        assert_relative_eq!(first.pfx_x.unwrap(), 1.0);
        assert_relative_eq!(first.avg_pfx_x.unwrap(), 2.0);
        assert_relative_eq!(first.horizontal_break_diff.unwrap(), -1.0);
        assert_relative_eq!(first.pfx_z.unwrap(), -1.0);
        assert_relative_eq!(first.vertical_break_diff.unwrap(), 1.0);
        assert_relative_eq!(first.velocity_diff.unwrap(), 1.0);
    }

    #[test]
    fn run_value_is_formatted_from_the_raw_mean() {
        let mut a = pitch("A", 1, "FF", 95.0);
        a.delta_run_exp = Some(0.0125);
        let b = a.clone();
        let c = pitch("A", 2, "FF", 95.0);

        let table = summarize(&[a, b, c]).unwrap();
        assert_eq!(table.rows[0].delta_run_exp, Some(0.0125));
        assert_eq!(table.rows[0].run_value_label(), "0.013");
    }

    #[test]
    fn rounding_is_half_even() {
        assert_relative_eq!(round_to(0.25, 1), 0.2);
        assert_relative_eq!(round_to(0.75, 1), 0.8);
        assert_relative_eq!(round_to(-1.25, 1), -1.2);
        assert_relative_eq!(round_to(33.333_333, 1), 33.3);
        assert_relative_eq!(round_to(2.5, 0), 2.0);
    }
}
