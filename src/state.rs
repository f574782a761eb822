use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::color::ColorMap;
use crate::config::{FilterConfig, SeasonConfig};
use crate::data::aggregate::{SeasonSummary, summarize_season};
use crate::data::chart::{UsageSeries, chart_title, usage_series};
use crate::data::loader::load_partitions;
use crate::data::model::{PitchDataset, SummaryRow};
use crate::data::selection::{Choice, Selection, SelectionView, apply_selection, player_options};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The summary is computed once per load; selections only recompute the
/// [`SelectionView`].
pub struct AppState {
    pub season: SeasonConfig,
    pub filter_config: FilterConfig,

    /// Partition files the current summary was built from.
    pub sources: Vec<PathBuf>,

    /// Cached pipeline output for the loaded season.
    pub summary: SeasonSummary,

    /// Player dropdown entries (without "All").
    pub player_options: Vec<String>,

    /// Current control values.
    pub selection: Selection,

    /// Rows and control options for the current selection (cached).
    pub view: SelectionView,

    /// Pitch type colours, stable across selections.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Run the pipeline over a freshly loaded season.
    pub fn new(
        season: SeasonConfig,
        filter_config: FilterConfig,
        dataset: &PitchDataset,
    ) -> Result<Self> {
        let summary = summarize_season(dataset, &filter_config)?;
        let mut state = Self {
            season,
            filter_config,
            sources: Vec::new(),
            summary: SeasonSummary::default(),
            player_options: Vec::new(),
            selection: Selection::default(),
            view: SelectionView::default(),
            color_map: ColorMap::default(),
            status_message: None,
        };
        state.set_summary(summary, dataset.sources.clone());
        Ok(state)
    }

    /// Ingest a new summary and reset every selection.
    pub fn set_summary(&mut self, summary: SeasonSummary, sources: Vec<PathBuf>) {
        self.player_options = player_options(&summary.table);
        self.color_map = ColorMap::new(summary.table.rows.iter().map(|r| r.pitch_type.as_str()));
        self.summary = summary;
        self.sources = sources;
        self.selection = Selection::default();
        self.status_message = None;
        self.refresh();
    }

    /// Reload the configured partitions from another directory.
    pub fn reload_folder(&mut self, dir: &Path) {
        let season = self.season.with_data_dir(dir);
        if self.reload(&season.partition_paths()) {
            self.season = season;
        }
    }

    /// Reload from an explicit list of partition files.
    pub fn reload_files(&mut self, paths: &[PathBuf]) {
        self.reload(paths);
    }

    /// Load and summarise; on failure keep the current data and report.
    fn reload(&mut self, paths: &[PathBuf]) -> bool {
        let result = load_partitions(paths).and_then(|dataset| {
            let summary = summarize_season(&dataset, &self.filter_config)?;
            Ok((summary, dataset.sources))
        });
        match result {
            Ok((summary, sources)) => {
                self.set_summary(summary, sources);
                true
            }
            Err(e) => {
                log::error!("Failed to load season: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    pub fn set_player(&mut self, player: Choice) {
        if self.selection.player != player {
            self.selection.player = player;
            self.refresh();
        }
    }

    pub fn set_pitch_type(&mut self, pitch_type: Choice) {
        if self.selection.pitch_type != pitch_type {
            self.selection.pitch_type = pitch_type;
            self.refresh();
        }
    }

    pub fn set_count_range(&mut self, range: (usize, usize)) {
        if self.view.count_range != range {
            self.selection.count_range = Some(range);
            self.refresh();
        }
    }

    /// Recompute the view after a control change.
    ///
    /// A pitch type no longer offered falls back to "All"; when the count
    /// bounds move, the range resets to the new full bounds.
    fn refresh(&mut self) {
        let previous_bounds = self.view.count_bounds;
        let mut view = apply_selection(&self.summary.table, &self.selection);

        if let Choice::Only(pitch_type) = &self.selection.pitch_type {
            if !view.pitch_type_options.contains(pitch_type) {
                self.selection.pitch_type = Choice::All;
                view = apply_selection(&self.summary.table, &self.selection);
            }
        }

        if view.count_bounds != previous_bounds && self.selection.count_range.is_some() {
            self.selection.count_range = None;
            view = apply_selection(&self.summary.table, &self.selection);
        }

        log::debug!(
            "Selection {:?}/{:?}: {} of {} rows visible",
            self.selection.player,
            self.selection.pitch_type,
            view.indices.len(),
            self.summary.table.len()
        );
        self.view = view;
    }

    /// Rows passing the current selection, in table order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &SummaryRow> {
        self.view
            .indices
            .iter()
            .filter_map(|&i| self.summary.table.rows.get(i))
    }

    pub fn usage_series(&self) -> Vec<UsageSeries> {
        usage_series(&self.summary.table, &self.view.indices)
    }

    pub fn chart_title(&self) -> String {
        chart_title(&self.selection.player)
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} pitches loaded, {} qualified, {} summary rows, {} visible",
            self.summary.loaded_rows,
            self.summary.qualified_rows,
            self.summary.table.len(),
            self.view.indices.len()
        )
    }
}
