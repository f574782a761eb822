use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const PLOT_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PitchArsenalApp {
    pub state: AppState,
}

impl PitchArsenalApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PitchArsenalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selections ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("central_scroll")
                .show(ui, |ui| {
                    panels::header(ui, self.state.season.season);
                    ui.separator();

                    ui.heading("Pitch Usage and Characteristics Table");
                    table::summary_table(ui, &self.state, TABLE_HEIGHT);
                    ui.separator();

                    ui.heading("Pitch Usage by Time Through the Order");
                    plot::usage_plot(ui, &self.state, PLOT_HEIGHT);
                });
        });
    }
}
