use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Season input configuration
// ---------------------------------------------------------------------------

/// Feet → inches factor applied to movement columns.
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Where the season's pitch partitions live.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonConfig {
    pub season: u16,
    /// Directory holding the partition files.
    pub data_dir: PathBuf,
    /// Partition file names, read in order and concatenated.
    pub partition_files: Vec<String>,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self::for_season(2024, ".")
    }
}

impl SeasonConfig {
    /// The standard three-partition layout `data_{n}_{season}.parquet`.
    pub fn for_season(season: u16, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            season,
            data_dir: data_dir.into(),
            partition_files: (1..=3)
                .map(|n| format!("data_{n}_{season}.parquet"))
                .collect(),
        }
    }

    /// Same partition names, different directory.
    pub fn with_data_dir(&self, data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            ..self.clone()
        }
    }

    pub fn partition_paths(&self) -> Vec<PathBuf> {
        self.partition_files
            .iter()
            .map(|name| self.data_dir.join(name))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Row filter configuration
// ---------------------------------------------------------------------------

/// Rules for which pitch rows enter the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Pitch-type codes dropped outright (`"None"` text sentinel, pitchouts).
    pub excluded_pitch_types: Vec<String>,
    /// Times-through-the-order values kept.
    pub order_passes: Vec<u8>,
    /// A pitcher needs strictly more than this many distinct passes.
    pub min_distinct_passes: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_pitch_types: vec!["None".to_string(), "PO".to_string()],
            order_passes: vec![1, 2, 3],
            min_distinct_passes: 1,
        }
    }
}

impl FilterConfig {
    pub fn is_excluded(&self, pitch_type: &str) -> bool {
        self.excluded_pitch_types.iter().any(|p| p == pitch_type)
    }

    /// Map a coerced order-pass value into the configured domain.
    pub fn order_pass(&self, value: i64) -> Option<u8> {
        u8::try_from(value)
            .ok()
            .filter(|pass| self.order_passes.contains(pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_partitions_follow_season_naming() {
        let cfg = SeasonConfig::default();
        assert_eq!(
            cfg.partition_files,
            vec![
                "data_1_2024.parquet",
                "data_2_2024.parquet",
                "data_3_2024.parquet"
            ]
        );
        let moved = cfg.with_data_dir(Path::new("/tmp/season"));
        assert_eq!(
            moved.partition_paths()[2],
            PathBuf::from("/tmp/season/data_3_2024.parquet")
        );
    }

    #[test]
    fn order_pass_domain() {
        let cfg = FilterConfig::default();
        assert_eq!(cfg.order_pass(1), Some(1));
        assert_eq!(cfg.order_pass(3), Some(3));
        assert_eq!(cfg.order_pass(0), None);
        assert_eq!(cfg.order_pass(4), None);
        assert_eq!(cfg.order_pass(-1), None);
        assert_eq!(cfg.order_pass(257), None);
    }

    #[test]
    fn sentinels_are_case_sensitive() {
        let cfg = FilterConfig::default();
        assert!(cfg.is_excluded("PO"));
        assert!(cfg.is_excluded("None"));
        assert!(!cfg.is_excluded("po"));
        assert!(!cfg.is_excluded("FF"));
    }
}
