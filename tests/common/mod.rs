//! Shared builders for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use pitch_arsenal::data::model::{PitchDataset, PitchEvent};

/// A fully populated pitch.
pub fn pitch(pitcher: &str, pass: i64, pitch_type: &str) -> PitchEvent {
    PitchEvent {
        pitcher: Some(pitcher.to_string()),
        pitch_type: Some(pitch_type.to_string()),
        times_through_order: Some(pass),
        release_speed: Some(93.0),
        pfx_x: Some(0.5),
        pfx_z: Some(1.0),
        delta_run_exp: Some(0.0),
    }
}

/// `n` copies of the same pitch.
pub fn repeat(n: usize, event: PitchEvent) -> Vec<PitchEvent> {
    vec![event; n]
}

pub fn dataset(events: Vec<PitchEvent>) -> PitchDataset {
    PitchDataset::from_partitions(vec![(PathBuf::from("memory"), events)])
}

/// Fresh, empty scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "pitch_arsenal_{name}_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}
