use std::collections::{BTreeMap, BTreeSet};

use super::model::{PitchEvent, QualifiedPitch};
use crate::config::FilterConfig;

// ---------------------------------------------------------------------------
// Row filter: raw season rows → qualified pitches
// ---------------------------------------------------------------------------

/// Reduce the raw season to the pitches the aggregation works on.
///
/// A pitch survives when:
/// * its order pass coerced to a value inside `config.order_passes`
/// * its pitch type is present and not one of the excluded sentinels
/// * its pitcher threw more than `config.min_distinct_passes` distinct
///   order passes among the rows that passed the first two checks
///
/// Bad rows are dropped silently. Source order is preserved.
pub fn qualify_pitches(events: &[PitchEvent], config: &FilterConfig) -> Vec<QualifiedPitch> {
    let cleaned: Vec<QualifiedPitch> = events
        .iter()
        .filter_map(|ev| clean_row(ev, config))
        .collect();
    log::debug!(
        "Row filter: {} of {} rows have a valid order pass and pitch type",
        cleaned.len(),
        events.len()
    );

    // Distinct passes are counted on the cleaned rows only, so sentinel or
    // out-of-domain rows can never qualify a pitcher.
    let mut passes: BTreeMap<&str, BTreeSet<u8>> = BTreeMap::new();
    for pitch in &cleaned {
        passes
            .entry(pitch.pitcher.as_str())
            .or_default()
            .insert(pitch.times_through_order);
    }
    let qualified_pitchers: BTreeSet<String> = passes
        .into_iter()
        .filter(|(_, seen)| seen.len() > config.min_distinct_passes)
        .map(|(pitcher, _)| pitcher.to_string())
        .collect();

    let kept: Vec<QualifiedPitch> = cleaned
        .into_iter()
        .filter(|pitch| qualified_pitchers.contains(&pitch.pitcher))
        .collect();
    log::debug!(
        "Row filter: {} rows from {} pitchers with multiple order passes",
        kept.len(),
        qualified_pitchers.len()
    );
    kept
}

/// Per-row checks. Coercion already happened at load time, so a `None`
/// order pass here is an unparseable cell and never reaches a grouping key.
fn clean_row(ev: &PitchEvent, config: &FilterConfig) -> Option<QualifiedPitch> {
    let times_through_order = ev
        .times_through_order
        .and_then(|n| config.order_pass(n))?;
    let pitch_type = ev
        .pitch_type
        .as_ref()
        .filter(|t| !config.is_excluded(t))?;
    let pitcher = ev.pitcher.as_ref()?;

    Some(QualifiedPitch {
        pitcher: pitcher.clone(),
        times_through_order,
        pitch_type: pitch_type.clone(),
        release_speed: ev.release_speed,
        pfx_x: ev.pfx_x,
        pfx_z: ev.pfx_z,
        delta_run_exp: ev.delta_run_exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(pitcher: &str, pass: Option<i64>, pitch_type: Option<&str>) -> PitchEvent {
        PitchEvent {
            pitcher: Some(pitcher.to_string()),
            pitch_type: pitch_type.map(str::to_string),
            times_through_order: pass,
            release_speed: Some(90.0),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_pitchers_with_two_passes_only() {
        let events = vec![
            event("A", Some(1), Some("FF")),
            event("A", Some(2), Some("SL")),
            event("B", Some(1), Some("FF")),
            event("B", Some(1), Some("CH")),
        ];
        let kept = qualify_pitches(&events, &FilterConfig::default());
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|p| p.pitcher == "A"));
    }

    #[test]
    fn out_of_domain_passes_do_not_qualify_a_pitcher() {
        let events = vec![
            event("A", Some(1), Some("FF")),
            event("A", Some(4), Some("FF")),
            event("A", Some(0), Some("FF")),
            event("A", None, Some("FF")),
        ];
        assert!(qualify_pitches(&events, &FilterConfig::default()).is_empty());
    }

    #[test]
    fn sentinel_rows_do_not_qualify_a_pitcher() {
        // Pass 2 only has a pitchout and a null type; A must not qualify.
        let events = vec![
            event("A", Some(1), Some("FF")),
            event("A", Some(2), Some("PO")),
            event("A", Some(2), Some("None")),
            event("A", Some(2), None),
        ];
        assert!(qualify_pitches(&events, &FilterConfig::default()).is_empty());
    }

    #[test]
    fn null_pitcher_is_dropped() {
        let mut anonymous = event("", Some(1), Some("FF"));
        anonymous.pitcher = None;
        let mut anonymous2 = anonymous.clone();
        anonymous2.times_through_order = Some(2);
        let kept = qualify_pitches(&[anonymous, anonymous2], &FilterConfig::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn preserves_source_order_and_values() {
        let events = vec![
            event("A", Some(2), Some("SL")),
            event("A", Some(1), Some("FF")),
            event("A", Some(3), Some("CH")),
        ];
        let kept = qualify_pitches(&events, &FilterConfig::default());
        let order: Vec<(u8, &str)> = kept
            .iter()
            .map(|p| (p.times_through_order, p.pitch_type.as_str()))
            .collect();
        assert_eq!(order, vec![(2, "SL"), (1, "FF"), (3, "CH")]);
        assert_eq!(kept[0].release_speed, Some(90.0));
    }
}
