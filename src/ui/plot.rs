use eframe::egui::{self, RichText, Sense, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points, uniform_grid_spacer};

use crate::data::chart::{LEGEND_TITLE, UsageSeries, X_LABEL, Y_LABEL, x_tick_label};
use crate::state::AppState;

const LEGEND_WIDTH: f32 = 110.0;

// ---------------------------------------------------------------------------
// Usage plot (central panel, bottom)
// ---------------------------------------------------------------------------

/// Render usage % against time through the order, one line per pitch type,
/// with the legend beside the plot.
pub fn usage_plot(ui: &mut Ui, state: &AppState, height: f32) {
    let series = state.usage_series();

    ui.label(RichText::new(state.chart_title()).strong());

    ui.horizontal_top(|ui: &mut Ui| {
        let plot_width = (ui.available_width() - LEGEND_WIDTH).max(200.0);

        Plot::new("usage_plot")
            .width(plot_width)
            .height(height)
            .x_axis_label(X_LABEL)
            .y_axis_label(Y_LABEL)
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .x_axis_formatter(|mark, _range| x_tick_label(mark.value))
            .include_x(0.8)
            .include_x(3.2)
            .include_y(0.0)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                for s in &series {
                    let color = state.color_map.color_for(&s.pitch_type);

                    let line = Line::new(PlotPoints::from(s.points.clone()))
                        .name(&s.pitch_type)
                        .color(color)
                        .width(2.0);
                    plot_ui.line(line);

                    let markers = Points::new(PlotPoints::from(s.points.clone()))
                        .name(&s.pitch_type)
                        .color(color)
                        .radius(4.0);
                    plot_ui.points(markers);
                }
            });

        legend(ui, state, &series);
    });
}

/// Legend drawn outside the plot area.
fn legend(ui: &mut Ui, state: &AppState, series: &[UsageSeries]) {
    ui.vertical(|ui: &mut Ui| {
        ui.set_width(LEGEND_WIDTH);
        ui.strong(LEGEND_TITLE);
        let entries = state
            .color_map
            .legend_entries(series.iter().map(|s| s.pitch_type.as_str()));
        for (label, color) in entries {
            ui.horizontal(|ui: &mut Ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                ui.painter().circle_filled(rect.center(), 5.0, color);
                ui.label(label);
            });
        }
    });
}
