use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::export_csv;
use crate::data::selection::{ALL, Choice, clamp_range};
use crate::state::AppState;

pub const TITLE: &str = "Pitch Usage and Characteristics by Time Through The Order";

/// Intro paragraph under the title for the loaded season.
pub fn description(season: u16) -> String {
    format!(
        "Analyze how pitchers change their arsenal usage based on times through the order \
         in {season}. The table below displays pitchers and their arsenal (pitch type, \
         velocity, movement) by time through the order. Note that a higher run value is \
         better for pitchers."
    )
}

// ---------------------------------------------------------------------------
// Page header
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, season: u16) {
    ui.heading(TITLE);
    ui.label(description(season));
}

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.summary.table.is_empty() {
        ui.label("No qualifying pitches in the loaded season.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Player ----
            ui.strong("Select Player");
            if let Some(choice) =
                choice_combo(ui, "player", &state.selection.player, &state.player_options)
            {
                state.set_player(choice);
            }
            ui.add_space(8.0);

            // ---- Pitch type (options follow the player selection) ----
            ui.strong("Select Pitch Type");
            if let Some(choice) = choice_combo(
                ui,
                "pitch_type",
                &state.selection.pitch_type,
                &state.view.pitch_type_options,
            ) {
                state.set_pitch_type(choice);
            }
            ui.add_space(8.0);

            // ---- Raw pitch count range ----
            ui.strong("Select Raw Pitch Count Range");
            let bounds = state.view.count_bounds;
            let (mut lo, mut hi) = state.view.count_range;
            ui.add(egui::Slider::new(&mut lo, bounds.0..=bounds.1).text("Min"));
            ui.add(egui::Slider::new(&mut hi, bounds.0..=bounds.1).text("Max"));
            if lo > hi {
                // Dragging one handle past the other moves both.
                if lo != state.view.count_range.0 {
                    hi = lo;
                } else {
                    lo = hi;
                }
            }
            state.set_count_range(clamp_range((lo, hi), bounds));
        });
}

/// A dropdown with "All" followed by `options`. Returns the clicked entry.
fn choice_combo(ui: &mut Ui, id: &str, current: &Choice, options: &[String]) -> Option<Choice> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(*current == Choice::All, ALL).clicked() {
                picked = Some(Choice::All);
            }
            for option in options {
                let selected = matches!(current, Choice::Only(v) if v == option);
                if ui.selectable_label(selected, option).clicked() {
                    picked = Some(Choice::Only(option.clone()));
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open partitions…").clicked() {
                open_files_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            let can_export = !state.view.indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export table as CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.status_line());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open season data folder")
        .set_directory(&state.season.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Reloading season from {}", dir.display());
        state.reload_folder(&dir);
    }
}

pub fn open_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Open season partitions")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_files();

    if let Some(mut paths) = files {
        // Dialog order is platform-dependent; concatenate by name.
        paths.sort();
        state.reload_files(&paths);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Export table")
        .add_filter("CSV", &["csv"])
        .set_file_name("pitch_usage.csv")
        .save_file();

    if let Some(path) = target {
        if let Err(e) = export_csv(&path, &state.summary.table, &state.view.indices) {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
